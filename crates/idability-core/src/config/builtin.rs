use crate::config::Config;
use crate::discretize::Discretizer;
use crate::encode::prioritize::Ranking;
use crate::error::IdabilityError;
use rust_decimal::Decimal;

/// Available named presets.
pub const PRESETS: &[&str] = &["simple", "relab", "rpkm"];

/// One-line description of a preset, for listings.
pub fn describe(name: &str) -> Option<&'static str> {
    match name {
        "simple" => Some("presence/absence at zero, rarest features first, minimal codes"),
        "relab" => Some("metagenomic relative abundance: stable codes of at least 7 features"),
        "rpkm" => Some("metagenomic RPKM: stable codes of at least 7 features"),
        _ => None,
    }
}

/// Load a preset by name.
pub fn load_preset(name: &str) -> Result<Config, IdabilityError> {
    match name {
        "simple" => Ok(Config::default()),
        "relab" => Ok(meta(Decimal::new(1, 3))),
        "rpkm" => Ok(meta(Decimal::from(5))),
        _ => Err(IdabilityError::UnknownPreset {
            name: name.to_string(),
            available: PRESETS.join(", "),
        }),
    }
}

/// Metagenomic presets share everything but the detection level; the absence
/// threshold sits two orders of magnitude below it.
fn meta(presence: Decimal) -> Config {
    Config {
        discretizer: Discretizer::Thresholds {
            presence,
            absence: presence / Decimal::ONE_HUNDRED,
        },
        ranking: Ranking::AbundanceGap,
        min_code_size: 7,
        similarity_cutoff: Some(Decimal::new(8, 1)),
    }
}
