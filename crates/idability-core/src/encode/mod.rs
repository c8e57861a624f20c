pub mod builder;
pub mod prioritize;

pub use builder::{build_codes, Phase};
pub use prioritize::{Prioritizer, Ranking};

use crate::config::Config;
use crate::model::CodeSet;
use crate::trace::{BuildTrace, TraceDocument};

/// Codes for every subject of a table, with the trace of how each was built.
#[derive(Debug, Clone)]
pub struct Encoding {
    pub codes: CodeSet,
    /// One trace per subject, in table column order.
    pub traces: Vec<BuildTrace>,
}

impl Encoding {
    pub fn null_count(&self) -> usize {
        self.codes.values().filter(|c| c.is_none()).count()
    }

    pub fn trace_document(&self, config: &Config) -> TraceDocument {
        TraceDocument::new(
            config.ranking.to_string(),
            config.min_code_size,
            self.traces.clone(),
        )
    }
}
