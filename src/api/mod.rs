//! REST API endpoints.
//!
//! Axum-based HTTP API exposing the chart-ready aggregates:
//! - `GET /user/rating/{handle}` — rating history series
//! - `GET /user/status/{handle}` — submission statistics
//! - `GET /health` — liveness probe

pub mod routes;
pub mod state;

use axum::http::header::HeaderValue;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use thiserror::Error;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::fetch::FetchError;
use crate::transform::TransformError;
use state::AppState;

/// API error types.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Upstream judge error: {0}")]
    Upstream(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            ApiError::Upstream(_) => (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };

        let body = ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message: self.to_string(),
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<FetchError> for ApiError {
    fn from(err: FetchError) -> Self {
        match &err {
            // An unknown handle comes back as a FAILED envelope with a
            // "not found" comment rather than a dedicated status.
            FetchError::Rejected { comment } if comment.contains("not found") => {
                ApiError::NotFound(comment.clone())
            }
            _ => ApiError::Upstream(err.to_string()),
        }
    }
}

impl From<TransformError> for ApiError {
    fn from(err: TransformError) -> Self {
        // A record the judge handed us failed validation. That is a broken
        // upstream payload, not a client mistake.
        ApiError::Upstream(err.to_string())
    }
}

/// Build the application router.
pub fn build_router(state: AppState, cors_origin: &str) -> Router {
    let cors = match cors_origin.parse::<HeaderValue>() {
        Ok(origin) if cors_origin != "*" => CorsLayer::new()
            .allow_origin(origin)
            .allow_methods(Any)
            .allow_headers(Any),
        _ => CorsLayer::permissive(),
    };

    Router::new()
        .route("/health", get(routes::meta::health))
        .route("/user/rating/:handle", get(routes::rating::user_rating))
        .route("/user/status/:handle", get(routes::status::user_status))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
