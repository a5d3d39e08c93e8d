//! Aggregation services.
//!
//! # Data Flow
//! ```text
//! http handler
//!     → service (input validation, discriminator defaults, fan-out)
//!     → one or more downstream callers
//!     → unwrapped lists / pipeline acknowledgement
//! ```
//!
//! # Design Decisions
//! - Services never apply the empty-is-not-found policy; that belongs to
//!   the handlers, since empty halves are valid for the audit fan-out
//! - Validation failures are raised before any downstream call is made

pub mod audit;
pub mod case;
pub mod fabric;
pub mod progression;
pub mod user;

pub use audit::{AuditResponse, AuditService};
pub use case::CaseService;
pub use fabric::FabricService;
pub use progression::ProgressionService;
pub use user::UserService;

use crate::clients::DownstreamError;

/// Failure of one aggregation-service operation.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// A downstream call failed; propagated unchanged.
    #[error(transparent)]
    Downstream(#[from] DownstreamError),

    /// The caller's input was rejected before any downstream call.
    #[error("{0}")]
    Validation(String),
}
