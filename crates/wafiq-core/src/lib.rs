//! Core logic for the Wafiq Ortho speech-therapy service.
//!
//! Everything here is independent of HTTP:
//!
//! - [`progress`] -- the Progress Tracker that owns the progress record
//! - [`submission`] -- coercion of loosely-typed request bodies into
//!   submissions
//! - [`stats`] -- summary statistics derived from a record
//! - [`content`] -- the static letters, colors, and stories
//! - [`messages`] -- localized user-facing strings
//! - [`config`] -- typed configuration loaded from YAML and the
//!   environment

pub mod config;
pub mod content;
pub mod messages;
pub mod progress;
pub mod stats;
pub mod submission;

pub use config::{AppConfig, ConfigError, ServiceConfig};
pub use content::ContentCatalog;
pub use progress::{Achievement, ProgressTracker, apply_submission};
pub use stats::{TOTAL_GAMES_AVAILABLE, derive_stats};
pub use submission::ProgressSubmission;
