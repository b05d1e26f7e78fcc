//! Function invocation SDK.
//!
//! Handlers are registered by (HTTP verb, path) and invoked with whichever of
//! {request, configuration, logger} they declare. A request arrives over HTTP
//! or from a local file for offline testing; both paths share one mapping and
//! response-shaping pipeline.
//!
//! # Architecture Overview
//!
//! ```text
//!     HTTP request                     --data file / --header / --file
//!          │                                        │
//!          ▼                                        ▼
//!   ┌─────────────┐                          ┌─────────────┐
//!   │    http     │                          │     cli     │
//!   │   server    │                          │   runner    │
//!   └──────┬──────┘                          └──────┬──────┘
//!          │        ┌──────────────────────┐        │
//!          └───────▶│ mapping: wire → model│◀───────┘
//!                   └──────────┬───────────┘
//!                              ▼
//!                   ┌──────────────────────┐   context: per-task
//!                   │  routing: Router     │   request slot
//!                   │  (method, path) →    │
//!                   │  handler by arity    │
//!                   └──────────┬───────────┘
//!                              ▼
//!                   ┌──────────────────────┐
//!                   │ mapping: shape_response (code inference,
//!                   │ passthrough headers, JSON payload)
//!                   └──────────────────────┘
//! ```
//!
//! # Example
//!
//! ```no_run
//! use foundry_function::{Function, Request, Response};
//! use serde_json::{Map, Value};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut function = Function::new(());
//!     function.handler("POST", "/echo", |req: Request| {
//!         let mut body = Map::new();
//!         body.insert("req".into(), Value::Object(req.body));
//!         Response::with_body(200, body)
//!     })?;
//!     function.run().await?;
//!     Ok(())
//! }
//! ```

// Core
pub mod mapping;
pub mod model;
pub mod routing;

// Transport adapters
pub mod cli;
pub mod http;

// Cross-cutting concerns
pub mod config;
pub mod context;
pub mod error;
pub mod lifecycle;
pub mod observability;

pub mod function;

pub use error::{CliError, FnError, RunError, ServerError};
pub use function::Function;
pub use model::{APIError, Request, RequestParams, Response};
pub use observability::Logger;
pub use routing::{Arity, Route, Router};
