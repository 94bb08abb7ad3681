//! Logging initialization for sbom-uploader.
//!
//! Diagnostic events go through `tracing`; user-facing progress lines
//! are written by the console adapter and are not affected by the level.

use anyhow::Result;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::config::LogFormat;

/// Initialize the global tracing subscriber on stderr.
///
/// `RUST_LOG` takes precedence over `level` when set.
pub fn init_tracing(level: &str, format: LogFormat) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .map_err(|e| anyhow::anyhow!("invalid log level '{}': {}", level, e))?;

    let registry = tracing_subscriber::registry().with(env_filter);
    let result = match format {
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .try_init(),
        LogFormat::Text => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
    };

    result.map_err(|e| anyhow::anyhow!("failed to initialize tracing subscriber: {}", e))
}
