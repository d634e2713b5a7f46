//! Health snapshots and host-facing error reports.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{ErrorKind, ServiceMode};

/// Response body of the health endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct HealthSnapshot {
    /// Always `"ok"` while the service answers.
    pub status: String,
    /// Application identifier the service was built with.
    pub app_id: String,
    /// Deployment mode.
    pub mode: ServiceMode,
    /// When the snapshot was taken.
    pub timestamp: DateTime<Utc>,
    /// Human-readable application name.
    pub app_name: String,
    /// Application version.
    pub version: String,
    /// Process environment details, for debugging.
    pub env: RuntimeInfo,
}

/// Process environment details included in [`HealthSnapshot`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct RuntimeInfo {
    /// Runtime the service is built on.
    pub runtime: String,
    /// Operating system, as reported by `std::env::consts::OS`.
    pub platform: String,
    /// CPU architecture, as reported by `std::env::consts::ARCH`.
    pub arch: String,
}

impl RuntimeInfo {
    /// Describe the current process.
    pub fn current() -> Self {
        Self {
            runtime: String::from("rust"),
            platform: String::from(std::env::consts::OS),
            arch: String::from(std::env::consts::ARCH),
        }
    }
}

/// Details of one failed request, forwarded to the host process when the
/// service is embedded.
///
/// Reports are built per failure and never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct ErrorReport {
    /// Failure category.
    #[serde(rename = "type")]
    pub kind: ErrorKind,
    /// The failure message.
    pub message: String,
    /// Short name of the failure, e.g. `BadRequest` or `panic`.
    pub name: String,
    /// Internal detail such as an error source chain. Never sent to
    /// clients.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
    /// Request path and query as received.
    pub endpoint: String,
    /// Request method.
    pub method: String,
    /// Status code of the failure response.
    pub status_code: u16,
    /// When the failure was observed.
    pub timestamp: DateTime<Utc>,
}
