//! `Response` → wire, shared by every transport adapter.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value};

use super::headers::{canonicalize_header, take_passthrough};
use crate::error::FnError;
use crate::model::{APIError, Response};

pub const CONTENT_TYPE_JSON: &str = "application/json";

/// A fully shaped response, ready for a transport to write.
#[derive(Debug, Clone, PartialEq)]
pub struct WireResponse {
    /// HTTP status, always within `100..600`.
    pub status: u16,
    /// Response headers with value lists joined by `;`.
    pub headers: BTreeMap<String, String>,
    /// JSON-encoded payload.
    pub payload: String,
}

impl WireResponse {
    pub fn content_length(&self) -> usize {
        self.payload.len()
    }
}

#[derive(Serialize)]
struct WirePayload {
    code: u16,
    #[serde(skip_serializing_if = "Map::is_empty")]
    body: Map<String, Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    errors: Vec<APIError>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    header: BTreeMap<String, String>,
}

/// Infer an unset response code from its errors.
///
/// Only applies when `code == 0`; the scan keeps the largest error code in
/// `100..600`.
pub fn infer_code(response: &mut Response) {
    if response.code != 0 {
        return;
    }
    for error in &response.errors {
        if (100..600).contains(&error.code) && error.code > response.code {
            response.code = error.code;
        }
    }
}

/// Shape a dispatch outcome into its wire form.
///
/// `request_header` is the canonical header map of the inbound request, used
/// to forward the passthrough headers.
pub fn shape_response(
    request_header: &BTreeMap<String, Vec<String>>,
    outcome: Result<Response, FnError>,
) -> WireResponse {
    let mut response = outcome.unwrap_or_else(FnError::into_response);

    infer_code(&mut response);
    if !(100..600).contains(&response.code) {
        tracing::error!(code = response.code, "Handler returned a response with an invalid status");
        response = FnError::InternalResponseType(format!(
            "Response.code is expected to be a valid HTTP status but got {}",
            response.code
        ))
        .into_response();
        infer_code(&mut response);
    }

    let mut header: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (key, values) in std::mem::take(&mut response.header) {
        if values.is_empty() {
            continue;
        }
        header
            .entry(canonicalize_header(&key))
            .or_default()
            .extend(values);
    }
    take_passthrough(request_header, &mut header);

    let headers: BTreeMap<String, String> = header
        .into_iter()
        .map(|(key, values)| (key, values.join(";")))
        .collect();

    let status = response.code;
    let payload = WirePayload {
        code: response.code,
        body: response.body,
        errors: response.errors,
        header: headers.clone(),
    };

    WireResponse {
        status,
        headers,
        payload: encode(&payload),
    }
}

fn encode(payload: &WirePayload) -> String {
    match serde_json::to_string(payload) {
        Ok(json) => json,
        Err(e) => {
            tracing::error!(error = %e, "Failed to encode response payload");
            format!(
                "{{\"code\":{INTERNAL},\"errors\":[{{\"code\":{INTERNAL},\"message\":\"failed to encode response\"}}]}}",
                INTERNAL = crate::error::INTERNAL_SERVER_ERROR
            )
        }
    }
}
