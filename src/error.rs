// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Non-2xx status, transport failure or undecodable body from the REST API.
    #[error("Error in fetch: {0}")]
    Fetch(String),

    /// A linked sub-resource (a training's customer) could not be fetched.
    #[error("Could not resolve {link}: {reason}")]
    LinkResolution { link: String, reason: String },

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Build a fetch error from a response status, using its reason phrase.
    pub fn from_status(status: reqwest::StatusCode) -> Self {
        let text = status
            .canonical_reason()
            .map(str::to_string)
            .unwrap_or_else(|| status.as_str().to_string());
        AppError::Fetch(text)
    }

    /// Returns true for errors that originate from the remote REST API.
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            AppError::Fetch(_) | AppError::LinkResolution { .. }
        )
    }
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            AppError::Fetch(msg) => (StatusCode::BAD_GATEWAY, "fetch_error", Some(msg.clone())),
            AppError::LinkResolution { link, reason } => (
                StatusCode::BAD_GATEWAY,
                "link_resolution_error",
                Some(format!("{}: {}", link, reason)),
            ),
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "bad_request", Some(msg.clone()))
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", None)
            }
        };

        let body = ErrorResponse {
            error: error.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias used across the crate.
pub type Result<T> = std::result::Result<T, AppError>;
