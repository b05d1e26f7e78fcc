//! Error definitions.
//!
//! # Responsibilities
//! - One distinguished error kind carrying (code, message) for everything a
//!   caller may see: routing, registration, mapping and response-shape failures
//! - Separate error types for process-level failures of the adapters
//!
//! # Design Decisions
//! - `FnError` is never surfaced as a transport failure; adapters convert it
//!   into a normal wire response with a single `APIError`
//! - Failures raised by handler business logic are not wrapped here

use thiserror::Error;

use crate::model::{APIError, Response};

pub const BAD_REQUEST: u16 = 400;
pub const NOT_FOUND: u16 = 404;
pub const METHOD_NOT_ALLOWED: u16 = 405;
pub const PAYLOAD_TOO_LARGE: u16 = 413;
pub const INTERNAL_SERVER_ERROR: u16 = 500;
pub const NOT_IMPLEMENTED: u16 = 501;
pub const SERVICE_UNAVAILABLE: u16 = 503;

/// Errors raised while registering, mapping or dispatching a request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FnError {
    /// The inbound payload could not be mapped onto a `Request`.
    #[error("{0}")]
    BadRequest(String),

    /// No route is registered for the path.
    #[error("Not Found: {method} {url}")]
    NotFound { method: String, url: String },

    /// The path exists but not for this method.
    #[error("Method Not Allowed: {method} at endpoint")]
    MethodNotAllowed { method: String },

    /// Registration with a verb outside the accepted set.
    #[error("Unsupported method: {0}")]
    UnsupportedMethod(String),

    /// Registration of an already registered (method, path) pair.
    #[error("Duplicate method path combination: {method} {path}")]
    DuplicateRoute { method: String, path: String },

    /// The handler produced a response that cannot be written.
    #[error("{0}")]
    InternalResponseType(String),

    /// Inbound payload larger than the configured limit.
    #[error("Request payload exceeds the limit of {0} bytes")]
    PayloadTooLarge(usize),

    /// Inbound HTTP verb the server does not accept.
    #[error("Unsupported method ({0})")]
    NotImplemented(String),
}

impl FnError {
    /// Numeric status code of this error.
    pub fn code(&self) -> u16 {
        match self {
            FnError::BadRequest(_) => BAD_REQUEST,
            FnError::NotFound { .. } => NOT_FOUND,
            FnError::MethodNotAllowed { .. } => METHOD_NOT_ALLOWED,
            FnError::PayloadTooLarge(_) => PAYLOAD_TOO_LARGE,
            FnError::UnsupportedMethod(_) | FnError::DuplicateRoute { .. } => SERVICE_UNAVAILABLE,
            FnError::InternalResponseType(_) => INTERNAL_SERVER_ERROR,
            FnError::NotImplemented(_) => NOT_IMPLEMENTED,
        }
    }

    /// Human-readable message of this error.
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Convert into a response carrying this error as its only entry.
    pub fn into_response(self) -> Response {
        Response {
            errors: vec![APIError::new(self.code(), self.message())],
            ..Response::default()
        }
    }
}

/// Errors from the network server adapter.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Config(#[from] crate::config::RunnerConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors from the offline runner.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Invalid header {0:?}. Must be in \"name: value\" format.")]
    InvalidHeader(String),

    #[error("Also provide -H \"Content-Type: multipart/form-data\" to use the --file argument")]
    MultipartRequired,

    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("request file {path} is not valid JSON: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("request file {0} must contain a JSON object")]
    NotAnObject(String),

    #[error(transparent)]
    Mapping(#[from] FnError),

    #[error("failed to write response: {0}")]
    Write(#[from] std::io::Error),

    #[error(transparent)]
    Args(#[from] clap::Error),
}

/// Errors from running a function under either adapter.
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Cli(#[from] CliError),

    #[error(transparent)]
    Server(#[from] ServerError),

    #[error(transparent)]
    Config(#[from] crate::config::RunnerConfigError),
}
