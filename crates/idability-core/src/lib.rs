pub mod config;
pub mod decode;
pub mod discretize;
pub mod encode;
pub mod error;
pub mod model;
pub mod parsing;
pub mod report;
pub mod trace;

use config::Config;
use decode::Evaluation;
use encode::Encoding;
use error::IdabilityError;
use model::{CodeSet, Table};
use tracing::warn;

/// Main API entry point for building: one code per subject of `table`.
///
/// The configuration is validated before any work starts.
pub fn encode(table: &Table, config: &Config) -> Result<Encoding, IdabilityError> {
    let encoding = encode::build_codes(table, config)?;

    let nulls = encoding.null_count();
    if nulls > 0 {
        warn!(
            nulls,
            subjects = table.subjects().len(),
            "some subjects could not be given a unique code"
        );
    }

    Ok(encoding)
}

/// Main API entry point for matching: apply `codes` to `table`.
///
/// Use the configuration the codes were built with, so both sides
/// discretize values the same way.
pub fn decode(
    table: &Table,
    codes: &CodeSet,
    config: &Config,
) -> Result<Evaluation, IdabilityError> {
    config.validate()?;
    decode::evaluate(table, codes, &config.discretizer)
}
