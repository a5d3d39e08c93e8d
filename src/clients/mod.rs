//! Downstream HTTP callers.
//!
//! # Data Flow
//! ```text
//! aggregation service
//!     → outbound_headers (caller identity + correlation ID + Accept)
//!     → one GET/POST to one upstream base URL + fixed path
//!     → typed envelope deserialization
//!     → null-safe unwrap to Vec (never fails on "empty")
//! ```
//!
//! # Design Decisions
//! - One shared reqwest::Client (connection pool, per-call timeout from config)
//! - Downstream failures are logged with the input identifiers, then
//!   re-raised unchanged; translation to HTTP responses happens in http::error
//! - A null envelope or null inner list degrades to an empty Vec so the
//!   handlers can apply the empty-is-not-found policy

pub mod fabric;
pub mod progression;
pub mod system_id_mapper;
pub mod user;

pub use fabric::FabricClient;
pub use progression::ProgressionClient;
pub use system_id_mapper::SystemIdMapperClient;
pub use user::UserClient;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::StatusCode;

/// Caller-identity header sent on every CQRS gateway call.
pub const HEADER_USER: &str = "CJSCPPUID";

/// Correlation-ID header, inbound and outbound.
pub const HEADER_CORRELATION_ID: &str = "CPPCLIENTCORRELATIONID";

/// Uniform error for any downstream call.
#[derive(Debug, thiserror::Error)]
pub enum DownstreamError {
    /// The upstream answered with a non-2xx status.
    #[error("downstream call failed with status {status}")]
    Status { status: StatusCode },

    /// Transport failure, timeout, or body decode failure.
    #[error("downstream request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// A configured value could not be used as a header.
    #[error("invalid outbound header value: {0}")]
    Header(#[from] reqwest::header::InvalidHeaderValue),

    /// A configured base URL + path did not form a valid URL.
    #[error("invalid downstream URL: {0}")]
    Url(#[from] url::ParseError),

    /// Pipeline execution was invoked without the required configuration.
    #[error("pipeline execution is not configured: {0}")]
    NotConfigured(&'static str),
}

/// Build the outbound header set for a CQRS gateway call: the static
/// caller identity, the per-call correlation ID, and an Accept media
/// type when the endpoint negotiates content.
pub fn outbound_headers(
    cjs_cppuid: &str,
    correlation_id: &str,
    accept: Option<&str>,
) -> Result<HeaderMap, DownstreamError> {
    let mut headers = HeaderMap::new();
    headers.insert(HEADER_USER, HeaderValue::from_str(cjs_cppuid)?);
    headers.insert(HEADER_CORRELATION_ID, HeaderValue::from_str(correlation_id)?);
    if let Some(accept) = accept {
        headers.insert(ACCEPT, HeaderValue::from_str(accept)?);
    }
    Ok(headers)
}

/// Check the response status and surface non-2xx as a uniform error.
pub(crate) fn ensure_success(status: StatusCode) -> Result<(), DownstreamError> {
    if status.is_success() {
        Ok(())
    } else {
        Err(DownstreamError::Status { status })
    }
}
