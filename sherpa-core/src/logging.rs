use crate::conf::types::{LogFormat, LoggingConfig};
use tracing_subscriber::{EnvFilter, fmt};

/// Initialize the logging system.
///
/// - `RUST_LOG` wins when set, otherwise the configured level is used
/// - JSON output flattens event fields for cleaner structured logs
/// - Pretty output is meant for terminals
///
/// Calling it twice is harmless; the first subscriber stays installed.
pub fn init_logging(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let installed = match config.format {
        LogFormat::Json => fmt()
            .with_env_filter(filter)
            .json()
            .flatten_event(true)
            .with_writer(std::io::stderr)
            .try_init(),
        LogFormat::Pretty => fmt()
            .with_env_filter(filter)
            .compact()
            .with_writer(std::io::stderr)
            .try_init(),
    };

    if installed.is_err() {
        tracing::debug!("global subscriber already installed, keeping it");
    }
}
