//! Logging setup for the CLI.
//!
//! Plaintext records on stderr so stdout stays free for rendered output.
//! `MDPAD_LOG` or `RUST_LOG` override the level chosen by `--verbose`.

use std::io;

use tracing::Level;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Error type for logging initialization
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("failed to parse log filter: {0}")]
    FilterParse(#[from] tracing_subscriber::filter::ParseError),
    #[error("failed to initialize subscriber: {0}")]
    TryInit(#[from] tracing_subscriber::util::TryInitError),
}

/// Map the number of `-v` flags to a default level.
pub fn level_for_verbosity(verbose: u8) -> Level {
    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Build an EnvFilter from environment variables or default level.
fn build_env_filter(default_level: Level) -> Result<EnvFilter, LoggingError> {
    for var in ["MDPAD_LOG", "RUST_LOG"] {
        if let Ok(filter) = std::env::var(var) {
            return Ok(EnvFilter::try_new(filter)?);
        }
    }
    Ok(EnvFilter::try_new(default_level.as_str().to_lowercase())?)
}

/// Initialize the global subscriber. Call once at startup.
pub fn init_logging(verbose: u8) -> Result<(), LoggingError> {
    let filter = build_env_filter(level_for_verbosity(verbose))?;
    let layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init()?;
    Ok(())
}
