//! Enumeration types for the Wafiq Ortho service.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Service mode
// ---------------------------------------------------------------------------

/// How the service is deployed.
///
/// A standalone service owns the whole URL space. An embedded service is
/// mounted by a host process under `/api/<app_id>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum ServiceMode {
    /// Running on its own listener.
    Standalone,
    /// Mounted under a host process.
    Embedded,
}

impl ServiceMode {
    /// Resolve the mode from the embedding flag.
    pub const fn from_embedded(embedded: bool) -> Self {
        if embedded { Self::Embedded } else { Self::Standalone }
    }

    /// Whether this is [`ServiceMode::Embedded`].
    pub const fn is_embedded(self) -> bool {
        matches!(self, Self::Embedded)
    }

    /// The wire name of the mode.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Standalone => "standalone",
            Self::Embedded => "embedded",
        }
    }
}

impl core::fmt::Display for ServiceMode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Error classification
// ---------------------------------------------------------------------------

/// Category of a request failure reported to the host process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum ErrorKind {
    /// The request itself was at fault (4xx).
    ClientError,
    /// The service failed while handling a valid request (5xx).
    ServerError,
    /// A fault that carried no HTTP status, such as a handler panic.
    RuntimeError,
}

impl ErrorKind {
    /// Classify a failure by the status it explicitly carried.
    ///
    /// Only an explicit status in `400..500` is a client error and only an
    /// explicit status of 500 or above is a server error. A failure without
    /// a status, or with any other status, is a runtime error even though
    /// its response still defaults to 500.
    pub const fn classify(explicit_status: Option<u16>) -> Self {
        match explicit_status {
            Some(400..=499) => Self::ClientError,
            Some(500..=u16::MAX) => Self::ServerError,
            _ => Self::RuntimeError,
        }
    }
}
