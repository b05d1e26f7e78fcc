//! Handler response model.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Structured error entry carried in a response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct APIError {
    pub code: u16,
    pub message: String,
}

impl APIError {
    pub fn new(code: u16, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// Response produced by a function handler.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Response {
    pub body: Map<String, Value>,
    /// HTTP status; `0` means unset and is inferred from `errors`.
    pub code: u16,
    pub errors: Vec<APIError>,
    pub header: BTreeMap<String, Vec<String>>,
}

impl Response {
    /// Response with a status code and body.
    pub fn with_body(code: u16, body: Map<String, Value>) -> Self {
        Self {
            body,
            code,
            ..Self::default()
        }
    }

    /// Response carrying errors only; the status is inferred from them.
    pub fn with_errors(errors: Vec<APIError>) -> Self {
        Self {
            errors,
            ..Self::default()
        }
    }

    /// Append a value to a response header.
    pub fn add_header(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.header.entry(key.into()).or_default().push(value.into());
        self
    }
}
