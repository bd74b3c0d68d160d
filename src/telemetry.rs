//! Module for telemetry functionality such as logging

use anyhow::{Result, bail};
use tracing::debug;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

const LOG_FORMAT_VAR: &str = "LOG_FORMAT";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LogFormat {
    Pretty,
    Json,
}

impl LogFormat {
    fn from_env() -> Result<Self> {
        match std::env::var(LOG_FORMAT_VAR).as_deref() {
            Err(_) | Ok("pretty") => Ok(Self::Pretty),
            Ok("json") => Ok(Self::Json),
            Ok(other) => bail!("unsupported {LOG_FORMAT_VAR} '{other}', expected 'pretty' or 'json'"),
        }
    }
}

/// Sets up logging. The log level is taken from the `RUST_LOG` env variable (default is `info`).
/// The logging format (pretty/json) is set by the `LOG_FORMAT` env variable.
///
/// Logs go to stderr so that ingested events can be written to stdout.
pub fn setup_logging() -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());

    let layer = match LogFormat::from_env()? {
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .boxed(),
        LogFormat::Pretty => tracing_subscriber::fmt::layer()
            .pretty()
            .with_writer(std::io::stderr)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(layer)
        .try_init()?;

    debug!("Debug mode is enabled. Record contents might be visible.");
    Ok(())
}
