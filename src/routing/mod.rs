//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Registration (at startup):
//!     Route::new(method, path, handler)
//!     → route.rs (arity classified from the handler signature)
//!     → router.rs (method normalized, verb and duplicate checks)
//!     → frozen route table
//!
//! Dispatch (per request):
//!     Request (method, url)
//!     → path lookup → method lookup
//!     → handler(request [, config [, logger]])
//!     → Response, or NotFound / MethodNotAllowed
//! ```
//!
//! # Design Decisions
//! - Routes registered at startup, read-only afterwards
//! - Exact path match only, no patterns
//! - Deterministic: same (method, url) always reaches the same handler

pub mod route;
pub mod router;

pub use route::{Arity, Handler, IntoHandler, Route};
pub use router::{normalize_method, Router, SUPPORTED_METHODS};
