//! Audit BFF library.
//!
//! A backend-for-frontend aggregator: receives simple HTTP requests,
//! fans them out to downstream REST services (identity directory,
//! case-ID mapper, progression materials, Microsoft Fabric), and
//! republishes the reshaped results as JSON.

pub mod clients;
pub mod config;
pub mod http;
pub mod services;

pub use config::BffConfig;
pub use http::HttpServer;
