use crate::config::{LogFormat, LoggingConfig};
use crate::error::PlannerError;

/// Initialize structured logging with tracing.
/// This should be called once at application startup; logs go to stderr.
pub fn init_logging(config: &LoggingConfig) -> Result<(), PlannerError> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let result = match config.format {
        LogFormat::Json => {
            let subscriber = tracing_subscriber::registry().with(filter).with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true)
                    .json(), // JSON output for structured logging
            );
            tracing::subscriber::set_global_default(subscriber)
        }
        LogFormat::Pretty => {
            let subscriber = tracing_subscriber::registry().with(filter).with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false)
                    .compact(),
            );
            tracing::subscriber::set_global_default(subscriber)
        }
    };

    result.map_err(|e| {
        PlannerError::new(
            format!("Failed to set global tracing subscriber: {}", e),
            "startup",
        )
    })?;

    tracing::debug!(format = ?config.format, "Structured logging initialized");
    Ok(())
}
