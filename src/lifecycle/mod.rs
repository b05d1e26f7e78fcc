//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (function::Function::run):
//!     Init logging → Load config → Register handlers → Pick runner
//!
//! Shutdown (signals.rs):
//!     SIGTERM/SIGINT → Exit immediately
//! ```
//!
//! # Design Decisions
//! - Ordered startup: logging first, then config, then listeners
//! - Shutdown is abrupt; in-flight requests are not drained

pub mod signals;

pub use signals::{exit_now, wait_for_termination, Termination};
