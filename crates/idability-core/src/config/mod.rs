pub mod builtin;

use crate::discretize::Discretizer;
use crate::encode::prioritize::Ranking;
use crate::error::IdabilityError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Everything that shapes how codes are built and matched.
///
/// Build and match must run with the same discretizer for their results to
/// be comparable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub discretizer: Discretizer,
    #[serde(default)]
    pub ranking: Ranking,
    /// Codes are lengthened past uniqueness until they hold this many features.
    #[serde(default = "default_min_code_size")]
    pub min_code_size: usize,
    /// Jaccard similarity at which a feature taken into a code knocks out
    /// look-alike candidates. `None` disables redundant-feature pruning.
    #[serde(default)]
    pub similarity_cutoff: Option<Decimal>,
}

fn default_min_code_size() -> usize {
    1
}

impl Default for Config {
    fn default() -> Self {
        Config {
            discretizer: Discretizer::Simple,
            ranking: Ranking::Rarity,
            min_code_size: default_min_code_size(),
            similarity_cutoff: None,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), IdabilityError> {
        self.discretizer.validate()?;
        if self.min_code_size == 0 {
            return Err(IdabilityError::InvalidConfig(
                "minimum code size must be at least 1".into(),
            ));
        }
        if let Some(cutoff) = self.similarity_cutoff {
            if cutoff <= Decimal::ZERO || cutoff > Decimal::ONE {
                return Err(IdabilityError::InvalidConfig(format!(
                    "similarity cutoff {cutoff} must lie in (0, 1]"
                )));
            }
        }
        Ok(())
    }

    /// Replace one or both discretization thresholds, keeping whichever is
    /// not given from the current discretizer.
    pub fn with_thresholds(
        mut self,
        presence: Option<Decimal>,
        absence: Option<Decimal>,
    ) -> Result<Config, IdabilityError> {
        if presence.is_none() && absence.is_none() {
            return Ok(self);
        }
        let (base_presence, base_absence) = match self.discretizer {
            Discretizer::Simple => (None, Decimal::ZERO),
            Discretizer::Thresholds { presence, absence } => (Some(presence), absence),
        };
        let Some(presence) = presence.or(base_presence) else {
            return Err(IdabilityError::InvalidConfig(
                "an absence threshold needs a presence threshold".into(),
            ));
        };
        self.discretizer = Discretizer::thresholds(presence, absence.unwrap_or(base_absence))?;
        Ok(self)
    }
}

/// Load a configuration from a JSON file.
pub fn load_config(path: &Path) -> Result<Config, IdabilityError> {
    let content = std::fs::read_to_string(path).map_err(|e| IdabilityError::ConfigLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let config: Config = serde_json::from_str(&content).map_err(|e| IdabilityError::ConfigLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    config.validate()?;
    Ok(config)
}

/// Parse a configuration from a JSON string (no file path context).
pub fn parse_config_str(json: &str) -> Result<Config, IdabilityError> {
    let config: Config = serde_json::from_str(json)?;
    config.validate()?;
    Ok(config)
}
