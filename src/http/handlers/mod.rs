//! Request handlers, one module per resource.
//!
//! Each handler extracts query/path parameters and the mandatory
//! correlation-ID header, invokes its aggregation service, and applies
//! the empty-is-not-found policy for lookups. Audit and pipeline
//! execution return whatever their services produce.

pub mod audit;
pub mod case;
pub mod fabric;
pub mod material;
pub mod user;
