//! Central failure handling.
//!
//! Two pieces cooperate here. [`panic_response`] turns a handler panic
//! into the same client body a typed error produces. [`escalate`] runs
//! outside it, picks up the [`HandlerFailure`] attached to any failed
//! response, logs it, and forwards an [`ErrorReport`] to the host sink
//! when the service is embedded.

use std::any::Any;
use std::sync::Arc;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use chrono::Utc;
use tracing::error;
use wafiq_types::ErrorReport;

use crate::error::HandlerFailure;
use crate::state::AppState;

/// Message reported to the host for a failure that carries none. The
/// localized fallback is for clients only.
pub const UNKNOWN_ERROR: &str = "Unknown error";

/// Middleware reporting every failed request.
///
/// The response itself is never altered; escalation is a side effect.
pub async fn escalate(State(state): State<Arc<AppState>>, req: Request, next: Next) -> Response {
    let method = req.method().to_string();
    let endpoint = req
        .uri()
        .path_and_query()
        .map_or_else(|| req.uri().path().to_owned(), ToString::to_string);

    let response = next.run(req).await;

    if let Some(failure) = response.extensions().get::<HandlerFailure>() {
        let report = build_report(failure, endpoint, method);
        error!(
            app_id = state.config.app_id(),
            kind = ?report.kind,
            status = report.status_code,
            endpoint = %report.endpoint,
            method = %report.method,
            name = %report.name,
            message = %report.message,
            "Request failed"
        );
        state.escalate(&report);
    }

    response
}

/// Build the host report for a failed request.
pub fn build_report(failure: &HandlerFailure, endpoint: String, method: String) -> ErrorReport {
    ErrorReport {
        kind: failure.kind(),
        message: if failure.message.is_empty() {
            String::from(UNKNOWN_ERROR)
        } else {
            failure.message.clone()
        },
        name: failure.name.clone(),
        stack: failure.detail.clone(),
        endpoint,
        method,
        status_code: failure.resolved_status().as_u16(),
        timestamp: Utc::now(),
    }
}

/// Render a caught panic.
///
/// Panics carry no status of their own, so they are answered with 500
/// and classified as runtime errors.
#[allow(clippy::needless_pass_by_value)]
pub fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    let message = payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_owned())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_default();

    HandlerFailure {
        status: None,
        name: String::from("panic"),
        detail: (!message.is_empty()).then(|| format!("handler panicked: {message}")),
        message,
    }
    .into_response()
}
