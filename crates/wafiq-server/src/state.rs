//! Shared application state for the API server.
//!
//! [`AppState`] holds everything a handler needs: the routing
//! configuration, the Progress Tracker, the content catalog, and the
//! optional host error sink. It is wrapped in [`Arc`] and injected via
//! Axum's `State` extractor.

use std::panic::AssertUnwindSafe;
use std::path::PathBuf;
use std::sync::Arc;

use tracing::error;
use wafiq_core::{ContentCatalog, ProgressTracker, ServiceConfig, messages};
use wafiq_types::ErrorReport;

use crate::sink::HostErrorSink;

/// Construction options beyond the routing configuration.
#[derive(Clone)]
pub struct ServiceOptions {
    /// Human-readable name reported by the health endpoint.
    pub app_name: String,
    /// Version reported by the health endpoint.
    pub version: String,
    /// Directory holding `index.html` and the front-end assets.
    pub static_dir: PathBuf,
    /// Receiver of failure reports when the service is embedded.
    pub host_sink: Option<Arc<dyn HostErrorSink>>,
}

impl ServiceOptions {
    /// Register a host error sink.
    #[must_use]
    pub fn with_host_sink(mut self, sink: Arc<dyn HostErrorSink>) -> Self {
        self.host_sink = Some(sink);
        self
    }

    /// Serve front-end assets from `dir`.
    #[must_use]
    pub fn with_static_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.static_dir = dir.into();
        self
    }
}

impl Default for ServiceOptions {
    fn default() -> Self {
        Self {
            app_name: String::from(messages::APP_NAME),
            version: String::from(env!("CARGO_PKG_VERSION")),
            static_dir: PathBuf::from("public"),
            host_sink: None,
        }
    }
}

impl core::fmt::Debug for ServiceOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ServiceOptions")
            .field("app_name", &self.app_name)
            .field("version", &self.version)
            .field("static_dir", &self.static_dir)
            .field("host_sink", &self.host_sink.is_some())
            .finish()
    }
}

/// Shared state for the Axum application.
pub struct AppState {
    /// Routing configuration (app id, mode, prefix).
    pub config: ServiceConfig,
    /// Human-readable application name.
    pub app_name: String,
    /// Application version.
    pub version: String,
    /// Directory holding `index.html` and the front-end assets.
    pub static_dir: PathBuf,
    /// Owner of the progress record.
    pub tracker: ProgressTracker,
    /// Letters, colors, and stories.
    pub catalog: ContentCatalog,
    host_sink: Option<Arc<dyn HostErrorSink>>,
}

impl AppState {
    /// Create the state for one service instance with a zeroed progress
    /// record.
    pub fn new(config: ServiceConfig, options: ServiceOptions) -> Self {
        Self {
            config,
            app_name: options.app_name,
            version: options.version,
            static_dir: options.static_dir,
            tracker: ProgressTracker::new(),
            catalog: ContentCatalog::new(),
            host_sink: options.host_sink,
        }
    }

    /// Whether failures are forwarded to a host.
    ///
    /// True only when the service is embedded and a sink is registered.
    pub const fn escalates(&self) -> bool {
        self.config.embedded() && self.host_sink.is_some()
    }

    /// Forward a failure report to the host sink, if escalation applies.
    ///
    /// Sink errors and sink panics are logged and swallowed.
    pub fn escalate(&self, report: &ErrorReport) {
        if !self.config.embedded() {
            return;
        }
        let Some(sink) = &self.host_sink else {
            return;
        };

        let app_id = self.config.app_id();
        match std::panic::catch_unwind(AssertUnwindSafe(|| sink.report(app_id, report))) {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                error!(app_id, error = %e, "Failed to report error to host");
            }
            Err(_) => {
                error!(app_id, "Host error sink panicked while reporting");
            }
        }
    }
}

impl core::fmt::Debug for AppState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .field("app_name", &self.app_name)
            .field("version", &self.version)
            .field("static_dir", &self.static_dir)
            .field("host_sink", &self.host_sink.is_some())
            .finish_non_exhaustive()
    }
}
