//! REST API endpoint handlers.
//!
//! Progress handlers go through the [`ProgressTracker`] held in
//! [`AppState`]; content handlers read the static catalog.
//!
//! # Endpoints
//!
//! Paths are relative to the service prefix (empty when standalone,
//! `/api/<appId>` when embedded), except `GET /`.
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/` | Front-end entry page |
//! | `POST` | `/progress` | Record a finished game |
//! | `GET` | `/progress` | Current progress record |
//! | `POST` | `/reset-progress` | Zero the progress record |
//! | `GET` | `/letters` | The 28 Arabic letters |
//! | `GET` | `/colors` | Color swatches |
//! | `GET` | `/stories` | Short stories |
//! | `GET` | `/stats` | Summary statistics |
//! | `GET` | `/health` | Health snapshot |
//!
//! [`ProgressTracker`]: wafiq_core::ProgressTracker

use std::io::ErrorKind as IoErrorKind;
use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::response::{Html, IntoResponse};
use chrono::Utc;
use tracing::warn;
use wafiq_core::messages;
use wafiq_types::{HealthSnapshot, RuntimeInfo};

use crate::error::AppError;
use crate::extract::SubmissionBody;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// GET / -- front-end entry page
// ---------------------------------------------------------------------------

/// Serve `index.html` from the static directory.
///
/// A missing file is not an error: a minimal built-in page is served in
/// its place.
pub async fn index(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, AppError> {
    let path = state.static_dir.join("index.html");
    match tokio::fs::read_to_string(&path).await {
        Ok(html) => Ok(Html(html)),
        Err(e) if e.kind() == IoErrorKind::NotFound => {
            warn!(path = %path.display(), "index.html not found, serving built-in page");
            Ok(Html(fallback_page(&state)))
        }
        Err(e) => Err(AppError::Internal {
            message: format!("failed to read {}", path.display()),
            source: Some(e),
        }),
    }
}

fn fallback_page(state: &AppState) -> String {
    let prefix = state.config.path_prefix();
    format!(
        r#"<!DOCTYPE html>
<html lang="ar" dir="rtl">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{name}</title>
</head>
<body>
    <h1>{name}</h1>
    <p>v{version} ({mode})</p>
    <ul>
        <li><a href="{prefix}/letters">{prefix}/letters</a></li>
        <li><a href="{prefix}/colors">{prefix}/colors</a></li>
        <li><a href="{prefix}/stories">{prefix}/stories</a></li>
        <li><a href="{prefix}/progress">{prefix}/progress</a></li>
        <li><a href="{prefix}/stats">{prefix}/stats</a></li>
        <li><a href="{prefix}/health">{prefix}/health</a></li>
    </ul>
</body>
</html>"#,
        name = state.app_name,
        version = state.version,
        mode = state.config.mode(),
    )
}

// ---------------------------------------------------------------------------
// Progress
// ---------------------------------------------------------------------------

/// Record a finished game.
///
/// Returns `{ "success": true, "progress": <record> }`.
pub async fn submit_progress(
    State(state): State<Arc<AppState>>,
    SubmissionBody(submission): SubmissionBody,
) -> Result<impl IntoResponse, AppError> {
    let progress = state.tracker.submit(submission).await;
    Ok(Json(serde_json::json!({
        "success": true,
        "progress": progress,
    })))
}

/// Return the current progress record.
pub async fn get_progress(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.tracker.read().await)
}

/// Zero the progress record.
pub async fn reset_progress(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    state.tracker.reset().await;
    Json(serde_json::json!({
        "success": true,
        "message": messages::PROGRESS_RESET,
    }))
}

/// Summary statistics derived from the current record.
pub async fn get_stats(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.tracker.stats().await)
}

// ---------------------------------------------------------------------------
// Content
// ---------------------------------------------------------------------------

/// `{ "letters": [...] }`
pub async fn list_letters(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(serde_json::json!({ "letters": state.catalog.letters() }))
}

/// `{ "colors": [...] }`
pub async fn list_colors(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(serde_json::json!({ "colors": state.catalog.colors() }))
}

/// `{ "stories": [...] }`
pub async fn list_stories(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(serde_json::json!({ "stories": state.catalog.stories() }))
}

// ---------------------------------------------------------------------------
// GET /health
// ---------------------------------------------------------------------------

/// Report service identity and liveness.
pub async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(HealthSnapshot {
        status: String::from("ok"),
        app_id: state.config.app_id().to_owned(),
        mode: state.config.mode(),
        timestamp: Utc::now(),
        app_name: state.app_name.clone(),
        version: state.version.clone(),
        env: RuntimeInfo::current(),
    })
}
