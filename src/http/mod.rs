//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request ID, span)
//!     → request.rs (JSON or multipart → Request)
//!     → [function router dispatches on the request's own method + url]
//!     → mapping::shape_response (shared with the CLI runner)
//!     → response.rs (status, headers, JSON body)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use server::{AppState, HttpServer};
