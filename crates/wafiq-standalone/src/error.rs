//! Error types for the standalone binary.
//!
//! [`StandaloneError`] wraps every failure mode during startup and
//! serving so `main` can propagate with `?`.

/// Top-level error for the standalone binary.
#[derive(Debug, thiserror::Error)]
pub enum StandaloneError {
    /// Configuration loading or validation failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: wafiq_core::ConfigError,
    },

    /// The HTTP server failed to bind or serve.
    #[error("server error: {source}")]
    Server {
        /// The underlying server error.
        #[from]
        source: wafiq_server::ServerError,
    },
}
