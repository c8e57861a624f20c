use idability_core::config::builtin;
use idability_core::discretize::Discretizer;
use idability_core::error::IdabilityError;

pub fn list() -> Result<(), IdabilityError> {
    println!("Available presets:\n");
    for name in builtin::PRESETS {
        let config = builtin::load_preset(name)?;
        println!(
            "  {:<8} {}",
            name,
            builtin::describe(name).unwrap_or_default()
        );

        let thresholds = match config.discretizer {
            Discretizer::Simple => "present above 0".to_string(),
            Discretizer::Thresholds { presence, absence } => {
                format!("present >= {presence}, absent <= {absence}")
            }
        };
        let pruning = match config.similarity_cutoff {
            Some(cutoff) => format!("pruning at Jaccard {cutoff}"),
            None => "no pruning".to_string(),
        };
        println!(
            "           {}; {}; min {} features; {}",
            thresholds, config.ranking, config.min_code_size, pruning
        );
        println!();
    }
    Ok(())
}

pub fn show(name: &str) -> Result<(), IdabilityError> {
    let config = builtin::load_preset(name)?;
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}
