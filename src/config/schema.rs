//! Runner configuration schema.
//!
//! Settings for the transport adapters themselves. The function's own
//! configuration is opaque to this crate and loaded through
//! [`crate::config::loader`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::validation::{validate_config, ValidationError};

/// Environment variable holding the server's listen port.
pub const PORT_ENV: &str = "PORT";

/// Default listen port of the server adapter.
pub const DEFAULT_PORT: u16 = 8081;

/// Errors building or checking a `RunnerConfig`.
#[derive(Debug, Error)]
pub enum RunnerConfigError {
    #[error("invalid port {0:?}")]
    InvalidPort(String),

    #[error("validation failed: {}", join(.0))]
    Validation(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Runner configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// Interface the server binds to.
    pub bind_host: String,

    /// Listen port.
    pub port: u16,

    /// Maximum accepted request body in bytes (multipart uploads included).
    pub max_body_size: usize,

    /// Raw `LOG_LEVEL` value, if any.
    pub log_level: Option<String>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            bind_host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            max_body_size: 50 * 1024 * 1024, // 50MB
            log_level: None,
        }
    }
}

impl RunnerConfig {
    /// Build from the process environment.
    pub fn from_env() -> Result<Self, RunnerConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, RunnerConfigError> {
        let mut config = Self::default();

        if let Some(raw) = lookup(PORT_ENV) {
            config.port = raw
                .trim()
                .parse()
                .map_err(|_| RunnerConfigError::InvalidPort(raw.clone()))?;
        }
        config.log_level = lookup(crate::observability::LOG_LEVEL_ENV);

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), RunnerConfigError> {
        validate_config(self).map_err(RunnerConfigError::Validation)
    }

    /// `host:port` string to bind.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.bind_host, self.port)
    }
}
