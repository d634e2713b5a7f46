//! HTTP API server for the Wafiq Ortho speech-therapy service.
//!
//! This crate provides an Axum router that exposes:
//!
//! - **Progress endpoints** for recording finished games, reading and
//!   resetting progress, and summary statistics
//! - **Content endpoints** for the letters, colors, and stories used by
//!   the games
//! - **A health endpoint** reporting identity and deployment mode
//! - **The front end** (`GET /` and static assets)
//!
//! # Deployment modes
//!
//! A standalone service answers at the root and is run by
//! [`start_server`]. An embedded service answers only under
//! `/api/<appId>` and is mounted by a host process, which may register a
//! [`HostErrorSink`] to be told about every failed request.
//!
//! ```no_run
//! use wafiq_core::ServiceConfig;
//! use wafiq_server::{ChannelSink, ServiceOptions, build};
//!
//! # fn main() -> Result<(), wafiq_core::ConfigError> {
//! let (sink, _reports) = ChannelSink::channel(64);
//! let options = ServiceOptions::default().with_host_sink(std::sync::Arc::new(sink));
//! let router = build(ServiceConfig::new("my-app", true)?, options).into_router();
//! # drop(router);
//! # Ok(())
//! # }
//! ```

pub mod cors;
pub mod error;
pub mod extract;
pub mod failure;
pub mod handlers;
pub mod router;
pub mod server;
pub mod sink;
pub mod state;

// Re-export primary types for convenience.
pub use error::{AppError, HandlerFailure};
pub use router::{RoutableService, build, build_router};
pub use server::{ServerConfig, ServerError, start_server};
pub use sink::{ChannelSink, HostErrorSink, HostNotification, SinkError};
pub use state::{AppState, ServiceOptions};
