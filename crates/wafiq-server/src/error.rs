//! Error types for the API server.
//!
//! Every failure, whether a typed [`AppError`] or a caught panic, is
//! rendered by [`HandlerFailure::into_response`]. The rendered response
//! carries the [`HandlerFailure`] in its extensions so the escalation
//! middleware can report it without re-parsing the body.

use std::error::Error as _;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use wafiq_core::messages;
use wafiq_types::ErrorKind;

/// Errors that can occur in the API layer.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The request body could not be read or parsed.
    #[error("{0}")]
    BadRequest(String),

    /// An extractor refused the request with its own status, such as 413
    /// for a body over the size limit.
    #[error("{message}")]
    Rejected {
        /// Status chosen by the extractor.
        status: StatusCode,
        /// The rejection text.
        message: String,
    },

    /// An internal error occurred.
    #[error("{message}")]
    Internal {
        /// What failed.
        message: String,
        /// The underlying cause, if any.
        #[source]
        source: Option<std::io::Error>,
    },
}

impl AppError {
    /// HTTP status of the error.
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Rejected { status, .. } => *status,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short name used in host reports.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "BadRequest",
            Self::Rejected { .. } => "RequestRejected",
            Self::Internal { .. } => "InternalError",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let mut detail = format!("{self:?}");
        let mut source = self.source();
        while let Some(cause) = source {
            detail.push_str("\ncaused by: ");
            detail.push_str(&cause.to_string());
            source = cause.source();
        }

        HandlerFailure {
            status: Some(self.status()),
            name: String::from(self.name()),
            message: self.to_string(),
            detail: Some(detail),
        }
        .into_response()
    }
}

/// A failed request, as seen by the failure handler.
///
/// `status` is the status the failure explicitly carried. Panics carry
/// none; their response status defaults to 500.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerFailure {
    /// Status explicitly attached to the failure, if any.
    pub status: Option<StatusCode>,
    /// Short name of the failure.
    pub name: String,
    /// The failure message; may be empty.
    pub message: String,
    /// Internal detail for the host. Never sent to the client.
    pub detail: Option<String>,
}

impl HandlerFailure {
    /// Status of the response: the explicit status, or 500.
    pub fn resolved_status(&self) -> StatusCode {
        self.status.unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Category reported to the host.
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::classify(self.status.map(|s| s.as_u16()))
    }

    /// The message shown to clients: the failure's own, or a localized
    /// fallback when it has none.
    pub fn client_message(&self) -> &str {
        if self.message.is_empty() {
            messages::REQUEST_FAILED
        } else {
            &self.message
        }
    }
}

/// Client-safe failure body.
#[derive(Debug, Serialize)]
struct FailureBody<'a> {
    success: bool,
    error: &'static str,
    message: &'a str,
}

impl IntoResponse for HandlerFailure {
    fn into_response(self) -> Response {
        let body = FailureBody {
            success: false,
            error: messages::SERVER_ERROR,
            message: self.client_message(),
        };
        let mut response = (self.resolved_status(), Json(body)).into_response();
        response.extensions_mut().insert(self);
        response
    }
}
