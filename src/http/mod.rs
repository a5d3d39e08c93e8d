//! HTTP surface of the BFF.
//!
//! # Data Flow
//! ```text
//! inbound request
//!     → server.rs (Axum setup, timeout, trace)
//!     → extract.rs (correlation-ID header, request context)
//!     → handlers/ (query parsing, service invocation, empty ⇒ 404)
//!     → error.rs (uniform ErrorEnvelope on any failure)
//! ```

pub mod error;
pub mod extract;
pub mod handlers;
pub mod server;

pub use error::{ApiError, ErrorEnvelope};
pub use extract::{CorrelationId, RequestContext};
pub use server::{AppState, HttpServer};
