//! Configuration loading and typed config structures.
//!
//! The standalone binary reads `wafiq-config.yaml` (all keys optional) and
//! then applies environment overrides. The library itself never reads the
//! environment: the embedding decision reaches the router only through an
//! explicit [`ServiceConfig`].

use std::path::{Path, PathBuf};

use serde::Deserialize;
use wafiq_types::ServiceMode;

use crate::messages;

/// Application identifier used when none is configured.
pub const DEFAULT_APP_ID: &str = "cmeptomdb01s06lfem89ruzgl";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// The application identifier cannot be used as a path segment.
    #[error("invalid app id {app_id:?}: {reason}")]
    InvalidAppId {
        /// The rejected identifier.
        app_id: String,
        /// Why it was rejected.
        reason: &'static str,
    },

    /// An environment override held a value of the wrong shape.
    #[error("invalid value {value:?} for {key}")]
    InvalidValue {
        /// The environment variable name.
        key: &'static str,
        /// The rejected value.
        value: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

// ---------------------------------------------------------------------------
// ServiceConfig
// ---------------------------------------------------------------------------

/// Immutable routing configuration of one service instance.
///
/// The path prefix is computed once: empty when standalone,
/// `/api/<app_id>` when embedded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    app_id: String,
    embedded: bool,
    path_prefix: String,
}

impl ServiceConfig {
    /// Validate `app_id` and resolve the path prefix.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidAppId`] if `app_id` is empty or holds
    /// characters that cannot appear in a single path segment.
    pub fn new(app_id: impl Into<String>, embedded: bool) -> Result<Self, ConfigError> {
        let app_id = app_id.into();
        validate_app_id(&app_id)?;

        let path_prefix = if embedded {
            format!("/api/{app_id}")
        } else {
            String::new()
        };

        Ok(Self {
            app_id,
            embedded,
            path_prefix,
        })
    }

    /// The application identifier.
    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    /// Whether the service is mounted under a host process.
    pub const fn embedded(&self) -> bool {
        self.embedded
    }

    /// The deployment mode.
    pub const fn mode(&self) -> ServiceMode {
        ServiceMode::from_embedded(self.embedded)
    }

    /// Prefix of every API route; empty in standalone mode.
    pub fn path_prefix(&self) -> &str {
        &self.path_prefix
    }
}

fn validate_app_id(app_id: &str) -> Result<(), ConfigError> {
    let reject = |reason| {
        Err(ConfigError::InvalidAppId {
            app_id: app_id.to_owned(),
            reason,
        })
    };

    if app_id.is_empty() {
        return reject("must not be empty");
    }
    if app_id
        .chars()
        .any(|c| c.is_whitespace() || matches!(c, '/' | '{' | '}' | '?' | '#' | '*' | ':'))
    {
        return reject("must be a single path segment");
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// AppConfig
// ---------------------------------------------------------------------------

/// Top-level configuration, mirroring `wafiq-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AppConfig {
    /// Identity and deployment mode.
    #[serde(default)]
    pub service: ServiceSection,

    /// Listener address.
    #[serde(default)]
    pub server: ListenConfig,

    /// Static asset settings.
    #[serde(default)]
    pub content: ContentConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yml::from_str(yaml)?)
    }

    /// Apply environment overrides, reading variables through `lookup`.
    ///
    /// - `APP_ID` overrides `service.app_id`
    /// - `EMBEDDED_MODE` overrides `service.embedded`
    /// - `HOST` overrides `server.host`
    /// - `PORT` overrides `server.port`
    /// - `STATIC_DIR` overrides `content.static_dir`
    /// - `LOG_FORMAT` overrides `logging.format`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if a boolean, port, or log
    /// format variable cannot be parsed.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(app_id) = lookup("APP_ID") {
            self.service.app_id = app_id;
        }
        if let Some(raw) = lookup("EMBEDDED_MODE") {
            self.service.embedded = parse_flag("EMBEDDED_MODE", &raw)?;
        }
        if let Some(host) = lookup("HOST") {
            self.server.host = host;
        }
        if let Some(raw) = lookup("PORT") {
            self.server.port = match raw.trim().parse() {
                Ok(port) => port,
                Err(_) => {
                    return Err(ConfigError::InvalidValue {
                        key: "PORT",
                        value: raw,
                    });
                }
            };
        }
        if let Some(dir) = lookup("STATIC_DIR") {
            self.content.static_dir = PathBuf::from(dir);
        }
        if let Some(raw) = lookup("LOG_FORMAT") {
            self.logging.format = match raw.trim().to_ascii_lowercase().as_str() {
                "pretty" => LogFormat::Pretty,
                "json" => LogFormat::Json,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        key: "LOG_FORMAT",
                        value: raw,
                    });
                }
            };
        }
        Ok(())
    }

    /// Build the routing configuration for this service.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidAppId`] if the configured app id is
    /// not a valid path segment.
    pub fn service_config(&self) -> Result<ServiceConfig, ConfigError> {
        ServiceConfig::new(self.service.app_id.clone(), self.service.embedded)
    }
}

fn parse_flag(key: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "" | "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key,
            value: raw.to_owned(),
        }),
    }
}

/// Service identity and deployment mode.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServiceSection {
    /// Application identifier; becomes the path segment in embedded mode.
    #[serde(default = "default_app_id")]
    pub app_id: String,

    /// Whether routes are mounted under `/api/<app_id>`.
    #[serde(default)]
    pub embedded: bool,

    /// Human-readable name reported by the health endpoint.
    #[serde(default = "default_app_name")]
    pub app_name: String,
}

impl Default for ServiceSection {
    fn default() -> Self {
        Self {
            app_id: default_app_id(),
            embedded: false,
            app_name: default_app_name(),
        }
    }
}

/// Listener address of the standalone server.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ListenConfig {
    /// The host address to bind to.
    #[serde(default = "default_host")]
    pub host: String,

    /// The TCP port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Static asset settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ContentConfig {
    /// Directory holding `index.html` and the front-end assets.
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            static_dir: default_static_dir(),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format.
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

fn default_app_id() -> String {
    String::from(DEFAULT_APP_ID)
}

fn default_app_name() -> String {
    String::from(messages::APP_NAME)
}

fn default_host() -> String {
    String::from("0.0.0.0")
}

const fn default_port() -> u16 {
    3001
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("public")
}

fn default_log_level() -> String {
    String::from("info")
}
