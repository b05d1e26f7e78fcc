//! Inbound request model.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::null_as_default;

/// Header and query parameters of a request.
///
/// Header keys are stored in canonical form (see [`crate::mapping::canonicalize_header`]).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestParams {
    #[serde(deserialize_with = "null_as_default")]
    pub header: BTreeMap<String, Vec<String>>,

    #[serde(deserialize_with = "null_as_default")]
    pub query: BTreeMap<String, Vec<String>>,
}

impl RequestParams {
    /// First value of a header, looked up by its canonical key.
    pub fn header_value(&self, key: &str) -> Option<&str> {
        self.header
            .get(key)
            .and_then(|values| values.first())
            .map(String::as_str)
    }
}

/// Request presented to a function handler.
///
/// Built fresh for every inbound call. Wire keys match the field names; a
/// field sourced from a differently named key carries a `#[serde(rename)]`.
/// Missing keys and `null` values leave the field at its default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Request {
    #[serde(deserialize_with = "null_as_default")]
    pub access_token: String,

    #[serde(deserialize_with = "null_as_default")]
    pub body: Map<String, Value>,

    #[serde(deserialize_with = "null_as_default")]
    pub context: Map<String, Value>,

    /// Uploaded files keyed by filename. Never part of the JSON wire form.
    #[serde(skip)]
    pub files: BTreeMap<String, Vec<u8>>,

    #[serde(deserialize_with = "null_as_default")]
    pub fn_id: String,

    #[serde(deserialize_with = "null_as_default")]
    pub fn_version: i64,

    #[serde(deserialize_with = "null_as_default")]
    pub method: String,

    #[serde(deserialize_with = "null_as_default")]
    pub params: RequestParams,

    #[serde(deserialize_with = "null_as_default")]
    pub trace_id: String,

    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
}

impl Request {
    /// Shorthand for a request with only method, url and body set.
    pub fn new(method: impl Into<String>, url: impl Into<String>, body: Map<String, Value>) -> Self {
        Self {
            method: method.into(),
            url: url.into(),
            body,
            ..Self::default()
        }
    }
}
