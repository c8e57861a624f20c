pub mod decode;
pub mod encode;
pub mod presets;

use crate::ConfigArgs;
use idability_core::config::{builtin, load_config, Config};
use idability_core::error::IdabilityError;

/// Turn the command-line settings into a validated configuration.
///
/// The base comes from `--config` or `--preset` (default "simple"); the
/// individual flags are applied on top of it.
pub fn resolve_config(args: &ConfigArgs) -> Result<Config, IdabilityError> {
    let base = match (&args.config, &args.preset) {
        (Some(path), _) => load_config(path)?,
        (None, Some(name)) => builtin::load_preset(name)?,
        (None, None) => Config::default(),
    };

    let mut config = base.with_thresholds(args.presence, args.absence)?;
    if let Some(size) = args.min_code_size {
        config.min_code_size = size;
    }
    if let Some(ref ranking) = args.ranking {
        config.ranking = ranking.parse()?;
    }
    if let Some(cutoff) = args.similarity_cutoff {
        config.similarity_cutoff = Some(cutoff);
    }
    if args.no_pruning {
        config.similarity_cutoff = None;
    }

    config.validate()?;
    Ok(config)
}
