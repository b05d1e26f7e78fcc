//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! Runner settings:
//!     PORT / LOG_LEVEL env
//!     → schema.rs (RunnerConfig with defaults)
//!     → validation.rs (semantic checks)
//!     → transport adapters
//!
//! Function configuration:
//!     CS_FN_CONFIG_PATH → loader.rs (JSON or TOML)
//!     → opaque value owned by the Router
//!     → handed to handlers that ask for it
//! ```
//!
//! # Design Decisions
//! - Function configuration is a caller-chosen type, never inspected here
//! - All runner fields have defaults to allow an empty environment
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{
    ConfigError, ConfigLoader, FileSystemConfigLoader, StaticConfigLoader, CONFIG_PATH_ENV,
};
pub use schema::{RunnerConfig, RunnerConfigError, DEFAULT_PORT, PORT_ENV};
pub use validation::{validate_config, ValidationError};
