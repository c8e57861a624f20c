use idability_core::error::IdabilityError;
use idability_core::parsing::load_table;
use idability_core::report::{codes_output_name, render_codes, stage};
use std::path::PathBuf;
use tracing::info;

use crate::commands::resolve_config;
use crate::output;
use crate::ConfigArgs;

pub fn run(
    table_path: PathBuf,
    config_args: &ConfigArgs,
    output_file: Option<PathBuf>,
    trace_file: Option<PathBuf>,
) -> Result<(), IdabilityError> {
    // Settings are checked before the table is even read.
    let config = resolve_config(config_args)?;
    let output_path = output_file.unwrap_or_else(|| codes_output_name(&table_path));

    info!(path = %table_path.display(), "loading table");
    let table = load_table(&table_path)?;

    let encoding = idability_core::encode(&table, &config)?;

    // Stage every output first so a failure leaves none of them behind.
    let codes_file = stage(&output_path, &render_codes(&encoding.codes))?;
    let trace_file = match trace_file {
        Some(ref path) => {
            let json = serde_json::to_string_pretty(&encoding.trace_document(&config))?;
            Some((path, stage(path, &json)?))
        }
        None => None,
    };

    codes_file.commit()?;
    info!(path = %output_path.display(), "wrote codes");
    if let Some((path, staged)) = trace_file {
        staged.commit()?;
        info!(path = %path.display(), "wrote build trace");
    }

    output::table::print_encoding(&encoding, &config);
    Ok(())
}
