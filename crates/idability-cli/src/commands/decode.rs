use idability_core::error::IdabilityError;
use idability_core::parsing::{load_codes, load_table};
use idability_core::report::{hits_output_name, render_hits, write_atomic};
use std::path::PathBuf;
use tracing::info;

use crate::commands::resolve_config;
use crate::output;
use crate::ConfigArgs;

pub fn run(
    table_path: PathBuf,
    codes_path: PathBuf,
    config_args: &ConfigArgs,
    output_file: Option<PathBuf>,
    output_format: &str,
) -> Result<(), IdabilityError> {
    let config = resolve_config(config_args)?;
    if output_format != "table" && output_format != "json" {
        return Err(IdabilityError::InvalidConfig(format!(
            "unknown output format '{output_format}' (expected table or json)"
        )));
    }
    let output_path =
        output_file.unwrap_or_else(|| hits_output_name(&table_path, &codes_path));

    info!(path = %table_path.display(), "loading table");
    let table = load_table(&table_path)?;
    info!(path = %codes_path.display(), "loading codes");
    let codes = load_codes(&codes_path)?;

    let evaluation = idability_core::decode(&table, &codes, &config)?;

    write_atomic(&output_path, &render_hits(&evaluation))?;
    info!(path = %output_path.display(), "wrote hits");

    match output_format {
        "json" => output::json::print(&evaluation)?,
        _ => output::table::print_evaluation(&evaluation),
    }

    Ok(())
}
