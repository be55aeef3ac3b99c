//! Tracing subscriber setup for binaries embedding the client.

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use golr_core::{Error, Result};

const DEFAULT_FILTER: &str = "golr_client=info,golr_graph=info";

/// Output format of the installed subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl LogFormat {
    fn from_env() -> Self {
        match std::env::var("LOG_FORMAT").as_deref() {
            Ok("json") => LogFormat::Json,
            _ => LogFormat::Text,
        }
    }
}

/// Install a global subscriber configured from the environment.
///
/// Environment variables:
///   LOG_FORMAT  - "json" or "text" (default: "text")
///   LOG_ANSI    - "true"/"false" override ANSI colors (auto-detected by default)
///   RUST_LOG    - standard env filter (default: "golr_client=info,golr_graph=info")
///
/// Fails with [`Error::Config`] when a global subscriber is already set.
pub fn init_tracing() -> Result<()> {
    let format = LogFormat::from_env();
    let ansi = std::env::var("LOG_ANSI")
        .ok()
        .map(|v| v == "true" || v == "1");

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let registry = tracing_subscriber::registry().with(env_filter);

    let installed = match format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init(),
        LogFormat::Text => {
            let mut layer = tracing_subscriber::fmt::layer();
            if let Some(ansi) = ansi {
                layer = layer.with_ansi(ansi);
            }
            registry.with(layer).try_init()
        }
    };
    installed.map_err(|e| Error::Config(format!("Could not install tracing subscriber: {}", e)))?;

    info!(log_format = ?format, "Logging initialized");
    Ok(())
}
