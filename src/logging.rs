//! Diagnostic logging for the phonoscribe binary.
//!
//! Installs a `tracing` subscriber that writes to stderr so stdout stays
//! reserved for transcription output. `RUST_LOG` takes precedence over the
//! verbosity flags when set.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

/// Filter directive for the given CLI verbosity.
///
/// `-q` → error, default → warn, `-v` → info, `-vv` → debug, `-vvv` → trace.
pub fn level_for(quiet: bool, verbose: u8) -> &'static str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Initializes stderr logging.
///
/// # Errors
/// If a global subscriber is already installed.
pub fn init_logging(quiet: bool, verbose: u8) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_for(quiet, verbose)));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(verbose >= 2)
                .with_level(true),
        )
        .try_init()
        .map_err(|e| anyhow::anyhow!("Logging already initialized: {}", e))?;

    tracing::debug!("Logging initialized");
    Ok(())
}
