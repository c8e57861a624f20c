//! Log output for the command line.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Install the stderr log subscriber.
///
/// Reads `IDABILITY_LOG` for per-target levels, e.g.
/// `IDABILITY_LOG=idability_core=debug`. Without it, both crates log at info,
/// or at debug when `verbose` is set. Calling it more than once is harmless.
pub fn init(verbose: bool) {
    INIT.call_once(|| {
        let default_level = if verbose { "debug" } else { "info" };
        let filter = EnvFilter::try_from_env("IDABILITY_LOG").unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "idability_core={default_level},idability_cli={default_level}"
            ))
        });

        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(verbose),
            )
            .with(filter)
            .init();
    });
}
