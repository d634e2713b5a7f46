//! Request body extraction for progress submissions.
//!
//! Accepts `application/json` and `application/x-www-form-urlencoded`
//! bodies. Other content types and empty bodies yield an empty submission.
//! Only a body that cannot be read or parsed at all is rejected; field
//! values are always coerced by [`ProgressSubmission`]. A body the
//! extractors refuse keeps their status (413 for an oversized body).

use std::collections::BTreeMap;

use axum::Form;
use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use axum::http::header::CONTENT_TYPE;
use wafiq_core::ProgressSubmission;

use crate::error::AppError;

/// Extractor yielding a coerced [`ProgressSubmission`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionBody(pub ProgressSubmission);

impl<S> FromRequest<S> for SubmissionBody
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.trim().to_ascii_lowercase())
            .unwrap_or_default();

        if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(fields) = Form::<BTreeMap<String, String>>::from_request(req, state)
                .await
                .map_err(|e| AppError::Rejected {
                    status: e.status(),
                    message: e.body_text(),
                })?;
            return Ok(Self(ProgressSubmission::from_form(&fields)));
        }

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::Rejected {
                status: e.status(),
                message: e.body_text(),
            })?;

        if !is_json(&content_type) || bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self(ProgressSubmission::default()));
        }

        let body: serde_json::Value = serde_json::from_slice(&bytes)
            .map_err(|e| AppError::BadRequest(format!("malformed JSON body: {e}")))?;

        Ok(Self(ProgressSubmission::from_json(&body)))
    }
}

fn is_json(content_type: &str) -> bool {
    let mime = content_type.split(';').next().unwrap_or_default().trim();
    mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json"))
}
