//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, addresses parse)
//! - Check URL well-formedness for every configured base URL
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: BffConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use url::Url;

use crate::config::schema::BffConfig;

/// A single semantic validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: String,
    /// Human-readable description of the problem.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a configuration, collecting every error.
pub fn validate_config(config: &BffConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError {
            field: "listener.bind_address".to_string(),
            message: format!("not a valid socket address: {}", config.listener.bind_address),
        });
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError {
            field: "timeouts.request_secs".to_string(),
            message: "must be greater than zero".to_string(),
        });
    }
    if config.timeouts.downstream_secs == 0 {
        errors.push(ValidationError {
            field: "timeouts.downstream_secs".to_string(),
            message: "must be greater than zero".to_string(),
        });
    }

    check_url(&mut errors, "cqrs.base_url", &config.cqrs.base_url);
    check_url(
        &mut errors,
        "fabric.management_base_url",
        &config.fabric.management_base_url,
    );

    if let Some(pipeline) = &config.fabric.pipeline {
        check_url(&mut errors, "fabric.pipeline.base_url", &pipeline.base_url);
        if pipeline.workspace_id.is_empty() {
            errors.push(ValidationError {
                field: "fabric.pipeline.workspace_id".to_string(),
                message: "must not be empty when pipeline execution is configured".to_string(),
            });
        }
        if pipeline.pipeline_id.is_empty() {
            errors.push(ValidationError {
                field: "fabric.pipeline.pipeline_id".to_string(),
                message: "must not be empty when pipeline execution is configured".to_string(),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_url(errors: &mut Vec<ValidationError>, field: &str, value: &str) {
    if Url::parse(value).is_err() {
        errors.push(ValidationError {
            field: field.to_string(),
            message: format!("not a valid URL: {}", value),
        });
    }
}
