//! Error translation: one mapping from failure category to the uniform
//! error envelope.
//!
//! # Design Decisions
//! - Downstream failures carrying an HTTP status propagate that status;
//!   everything without a status becomes a 500
//! - Raw transport/decode error text never reaches the client
//! - Every envelope carries the request path, a timestamp, and the
//!   inbound correlation ID (or the "N/A" sentinel)

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clients::DownstreamError;
use crate::services::ServiceError;

/// Value reported when no correlation ID accompanied the request.
pub const CORRELATION_ID_ABSENT: &str = "N/A";

/// Uniform shape returned for all failure paths.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorEnvelope {
    pub status: u16,
    pub error: String,
    pub message: String,
    pub path: String,
    pub timestamp: DateTime<Utc>,
    pub correlation_id: String,
}

/// Failure category, before translation to a response.
#[derive(Debug, thiserror::Error)]
pub enum ApiErrorKind {
    #[error(transparent)]
    Downstream(#[from] DownstreamError),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Missing required header: {0}")]
    MissingHeader(&'static str),
}

/// A request failure, carrying the context the envelope needs.
#[derive(Debug)]
pub struct ApiError {
    kind: ApiErrorKind,
    path: String,
    correlation_id: Option<String>,
}

impl ApiError {
    pub fn new(kind: ApiErrorKind, path: String, correlation_id: Option<String>) -> Self {
        Self {
            kind,
            path,
            correlation_id,
        }
    }

    pub fn kind(&self) -> &ApiErrorKind {
        &self.kind
    }

    fn status(&self) -> StatusCode {
        match &self.kind {
            ApiErrorKind::Downstream(DownstreamError::Status { status }) => *status,
            ApiErrorKind::Downstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiErrorKind::Validation(_) | ApiErrorKind::MissingHeader(_) => StatusCode::BAD_REQUEST,
            ApiErrorKind::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }

    fn message(&self) -> String {
        match &self.kind {
            // The not-configured guard must surface its explanation;
            // other statusless downstream failures stay opaque.
            ApiErrorKind::Downstream(e @ DownstreamError::Status { .. })
            | ApiErrorKind::Downstream(e @ DownstreamError::NotConfigured(_)) => e.to_string(),
            ApiErrorKind::Downstream(_) => {
                "An unexpected error occurred. Please try again later.".to_string()
            }
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.message();

        tracing::error!(
            status = status.as_u16(),
            path = %self.path,
            error = %self.kind,
            "Request failed"
        );

        let envelope = ErrorEnvelope {
            status: status.as_u16(),
            error: status
                .canonical_reason()
                .unwrap_or("Unknown Error")
                .to_string(),
            message,
            path: self.path,
            timestamp: Utc::now(),
            correlation_id: self
                .correlation_id
                .unwrap_or_else(|| CORRELATION_ID_ABSENT.to_string()),
        };

        (status, Json(envelope)).into_response()
    }
}

impl From<ServiceError> for ApiErrorKind {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Downstream(e) => ApiErrorKind::Downstream(e),
            ServiceError::Validation(m) => ApiErrorKind::Validation(m),
        }
    }
}
