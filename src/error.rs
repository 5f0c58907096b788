//! error taxonomy for the hub and the dashboard client.
//!
//! server-side errors are caught at the route boundary and converted to
//! an HTTP status plus a minimal body; nothing is retried. client-side
//! fetch errors never leave the poller: they are logged and mapped to
//! the Offline status transition.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use thiserror::Error;

/// errors surfaced by the two HTTP endpoints
#[derive(Debug, Error)]
pub enum ApiError {
    /// one of the five sensor fields was absent from the ingestion body
    #[error("Missing sensor data")]
    MissingField,

    /// the reading store failed to connect, insert or query
    #[error("database error: {0}")]
    Storage(#[from] sqlx::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::MissingField => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "Missing sensor data" })),
            )
                .into_response(),
            ApiError::Storage(err) => {
                tracing::error!("reading store failure: {err}");
                (StatusCode::INTERNAL_SERVER_ERROR, "database error").into_response()
            }
        }
    }
}

/// errors seen by the dashboard poller when fetching the latest batch
#[derive(Debug, Error)]
pub enum PollError {
    /// the request never completed (unreachable host, timeout, bad body)
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// the hub answered with a non-success status
    #[error("server returned {0}")]
    Status(reqwest::StatusCode),
}
