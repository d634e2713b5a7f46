//! Standalone server for the Wafiq Ortho speech-therapy service.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `wafiq-config.yaml` (defaults if absent)
//! 2. Apply environment overrides (`APP_ID`, `EMBEDDED_MODE`, `HOST`,
//!    `PORT`, `STATIC_DIR`, `LOG_FORMAT`)
//! 3. Initialize structured logging (tracing)
//! 4. Build the service for the resolved mode
//! 5. Serve until `Ctrl-C` or `SIGTERM`

mod error;

use std::path::Path;

use tracing::info;
use tracing_subscriber::EnvFilter;
use wafiq_core::AppConfig;
use wafiq_core::config::{LogFormat, LoggingConfig};
use wafiq_server::{ServerConfig, ServiceOptions};

use crate::error::StandaloneError;

const CONFIG_PATH: &str = "wafiq-config.yaml";

/// Application entry point.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the server cannot
/// bind or serve.
#[tokio::main]
async fn main() -> Result<(), StandaloneError> {
    let config_path = Path::new(CONFIG_PATH);
    let found = config_path.exists();
    let mut config = if found {
        AppConfig::from_file(config_path)?
    } else {
        AppConfig::default()
    };
    config.apply_env_overrides(|key| std::env::var(key).ok())?;

    init_tracing(&config.logging);
    if found {
        info!(path = CONFIG_PATH, "Configuration loaded");
    } else {
        info!(path = CONFIG_PATH, "Config file not found, using defaults");
    }

    let service_config = config.service_config()?;
    let options = ServiceOptions {
        app_name: config.service.app_name.clone(),
        ..ServiceOptions::default()
    }
    .with_static_dir(config.content.static_dir.clone());

    info!(
        app_id = service_config.app_id(),
        mode = %service_config.mode(),
        prefix = service_config.path_prefix(),
        static_dir = %config.content.static_dir.display(),
        "wafiq-standalone starting"
    );

    let router = wafiq_server::build(service_config, options).into_router();
    let server = ServerConfig {
        host: config.server.host,
        port: config.server.port,
    };
    wafiq_server::start_server(&server, router).await?;

    info!("wafiq-standalone stopped");
    Ok(())
}

/// Install the global subscriber. `RUST_LOG` wins over the configured
/// level.
fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    match logging.format {
        LogFormat::Pretty => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .init(),
    }
}
