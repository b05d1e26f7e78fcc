//! `WireResponse` → HTTP response.

use axum::body::Body;
use axum::http::header::{CONTENT_LENGTH, CONTENT_TYPE};
use axum::http::{HeaderName, HeaderValue, StatusCode};

use crate::mapping::{WireResponse, CONTENT_TYPE_JSON};

/// Write a shaped response as an HTTP response.
///
/// `Content-Length` and `Content-Type` always describe the JSON payload; a
/// handler header with either name is ignored. Headers whose name or value is
/// not valid on the wire are dropped with a warning.
pub fn into_http(wire: WireResponse) -> axum::response::Response {
    let status = StatusCode::from_u16(wire.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let content_length = wire.content_length();

    let mut response = axum::response::Response::new(Body::from(wire.payload));
    *response.status_mut() = status;

    let headers = response.headers_mut();
    headers.insert(CONTENT_LENGTH, HeaderValue::from(content_length));
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(CONTENT_TYPE_JSON));
    for (key, value) in &wire.headers {
        match (HeaderName::from_bytes(key.as_bytes()), HeaderValue::from_str(value)) {
            (Ok(name), Ok(_)) if name == CONTENT_LENGTH || name == CONTENT_TYPE => {
                tracing::debug!(header = %name, "Ignoring handler header owned by the adapter");
            }
            (Ok(name), Ok(value)) => {
                headers.append(name, value);
            }
            _ => tracing::warn!(header = %key, "Dropping response header that is not valid HTTP"),
        }
    }

    response
}
