//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     LOG_LEVEL / RUST_LOG → logging.rs (subscriber installed once)
//!
//! Per request:
//!     adapters → tracing span (request_id, method, url)
//!     handler  → logger.rs (Logger with extras) → tracing events
//! ```
//!
//! # Design Decisions
//! - Structured logging through tracing everywhere
//! - Handlers get a `Logger` value rather than a global, so the core treats
//!   it as an opaque sink

pub mod logger;
pub mod logging;

pub use logger::Logger;
pub use logging::{init_logging, parse_log_level, LOG_LEVEL_ENV};
