//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the logging subsystem
//! - Resolve the log level from the environment
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - `RUST_LOG` wins when set; otherwise `LOG_LEVEL` picks a single level
//! - Unknown `LOG_LEVEL` values fall back to info instead of failing startup

use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment variable holding the function's log level.
pub const LOG_LEVEL_ENV: &str = "LOG_LEVEL";

/// Resolve a `LOG_LEVEL` value into a tracing level.
///
/// Accepts `DEBUG`, `INFO`, `WARN`, `WARNING`, `ERROR` and `CRITICAL` in any
/// case. Anything else resolves to info.
pub fn parse_log_level(value: Option<&str>) -> Level {
    value.and_then(known_level).unwrap_or(Level::INFO)
}

fn known_level(raw: &str) -> Option<Level> {
    match raw.trim().to_uppercase().as_str() {
        "DEBUG" => Some(Level::DEBUG),
        "INFO" => Some(Level::INFO),
        "WARN" | "WARNING" => Some(Level::WARN),
        "ERROR" | "CRITICAL" => Some(Level::ERROR),
        _ => None,
    }
}

/// Install the global tracing subscriber.
///
/// Safe to call more than once; later calls are no-ops.
pub fn init_logging(log_level: Option<&str>) {
    let level = parse_log_level(log_level);
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_ascii_lowercase()));

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .is_ok();

    if !installed {
        return;
    }
    if let Some(raw) = log_level.filter(|raw| known_level(raw).is_none()) {
        tracing::warn!(log_level = raw, "Unknown log level, defaulting to INFO");
    }
    tracing::debug!(level = %level, "Logging initialized");
}
