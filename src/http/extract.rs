//! Request-scoped extractors: the per-request error context and the
//! mandatory correlation-ID header.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use std::convert::Infallible;
use uuid::Uuid;

use crate::clients::{DownstreamError, HEADER_CORRELATION_ID};
use crate::http::error::{ApiError, ApiErrorKind};
use crate::services::ServiceError;

/// Per-request context for building error envelopes: the request path
/// and the inbound correlation ID, if any.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub path: String,
    pub correlation_id: Option<String>,
}

impl RequestContext {
    /// The inbound correlation ID, or a generated one for operations
    /// that do not require the header (the audit fan-out).
    pub fn correlation_or_generated(&self) -> String {
        self.correlation_id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string())
    }

    pub fn downstream(&self, err: DownstreamError) -> ApiError {
        self.error(ApiErrorKind::Downstream(err))
    }

    pub fn service(&self, err: ServiceError) -> ApiError {
        self.error(err.into())
    }

    pub fn validation(&self, message: impl Into<String>) -> ApiError {
        self.error(ApiErrorKind::Validation(message.into()))
    }

    pub fn not_found(&self, message: impl Into<String>) -> ApiError {
        self.error(ApiErrorKind::NotFound(message.into()))
    }

    fn error(&self, kind: ApiErrorKind) -> ApiError {
        ApiError::new(kind, self.path.clone(), self.correlation_id.clone())
    }
}

impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self {
            path: parts.uri.path().to_string(),
            correlation_id: correlation_header(parts),
        })
    }
}

/// The mandatory `CPPCLIENTCORRELATIONID` header. Rejects with a 400
/// error envelope when absent.
#[derive(Debug, Clone)]
pub struct CorrelationId(pub String);

impl<S> FromRequestParts<S> for CorrelationId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        correlation_header(parts).map(CorrelationId).ok_or_else(|| {
            ApiError::new(
                ApiErrorKind::MissingHeader(HEADER_CORRELATION_ID),
                parts.uri.path().to_string(),
                None,
            )
        })
    }
}

fn correlation_header(parts: &Parts) -> Option<String> {
    parts
        .headers
        .get(HEADER_CORRELATION_ID)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_string())
}
