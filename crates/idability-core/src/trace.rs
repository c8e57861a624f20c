use serde::{Deserialize, Serialize};

pub const TRACE_SCHEMA_VERSION: &str = "1.0";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceStepType {
    /// Taken into the code; shrank the set of look-alike subjects.
    Selected,
    /// Removed nobody from the look-alike set, so left out.
    Skipped,
    /// Dropped from the candidates as too similar to a taken feature.
    KnockedOut,
    /// Appended only to reach the minimum code size.
    Padded,
    /// Removed again because the rest of the code already suffices.
    Pruned,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceStep {
    pub step_type: TraceStepType,
    pub feature: String,
    /// Subjects still indistinguishable from the owner after this step.
    pub remaining: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildOutcome {
    /// A code was found and reaches the minimum size.
    Unique,
    /// A code was found but candidates ran out before the minimum size.
    Short,
    /// No combination of the subject's features singles it out.
    Null,
}

/// Audit of how one subject's code came to be.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildTrace {
    pub subject: String,
    pub candidates: usize,
    pub outcome: BuildOutcome,
    pub steps: Vec<TraceStep>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceDocument {
    pub schema_version: String,
    pub ranking: String,
    pub min_code_size: usize,
    pub subjects: Vec<BuildTrace>,
}

impl TraceDocument {
    pub fn new(ranking: String, min_code_size: usize, subjects: Vec<BuildTrace>) -> Self {
        TraceDocument {
            schema_version: TRACE_SCHEMA_VERSION.to_string(),
            ranking,
            min_code_size,
            subjects,
        }
    }

    pub fn count(&self, outcome: BuildOutcome) -> usize {
        self.subjects.iter().filter(|t| t.outcome == outcome).count()
    }
}
