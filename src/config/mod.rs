//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → BffConfig (validated, immutable)
//!     → shared via Arc to server state and downstream clients
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require restart
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::BffConfig;
pub use schema::CqrsConfig;
pub use schema::FabricConfig;
pub use schema::PipelineConfig;
