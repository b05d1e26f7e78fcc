//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation of `RunnerConfig` (serde handles syntactic)
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Pure function: RunnerConfig → Result<(), Vec<ValidationError>>

use std::fmt;

use super::schema::RunnerConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

pub fn validate_config(config: &RunnerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.bind_host.trim().is_empty() {
        errors.push(ValidationError {
            field: "bind_host",
            message: "must not be empty".to_string(),
        });
    }
    if config.port == 0 {
        errors.push(ValidationError {
            field: "port",
            message: "must be a fixed port, not 0".to_string(),
        });
    }
    if config.max_body_size == 0 {
        errors.push(ValidationError {
            field: "max_body_size",
            message: "must be greater than 0".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
