//! Inbound HTTP request → `Request`.
//!
//! # Responsibilities
//! - Pick the reader from the `Content-Type` header
//! - JSON: the whole body is one wire request
//! - Multipart: `meta` part (wire request fields), `body` part (request
//!   body), and every file part keyed by its file name
//!
//! # Design Decisions
//! - A missing `Content-Type` is read as JSON
//! - Reader failures are `FnError::BadRequest`, or `PayloadTooLarge` past the
//!   body limit, so they are shaped like any other dispatch error

use std::collections::BTreeMap;

use axum::extract::{FromRequest, Multipart};
use axum::http::header::{CONTENT_LENGTH, CONTENT_TYPE};
use axum::http::{HeaderMap, StatusCode};
use http_body_util::LengthLimitError;
use serde_json::{Map, Value};

use crate::error::FnError;
use crate::mapping::{dict_to_request, parse_payload};
use crate::model::Request;

const MULTIPART_FORM_DATA: &str = "multipart/form-data";

/// Whether the request declares a multipart form body.
pub fn is_multipart(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.trim_start().to_ascii_lowercase().starts_with(MULTIPART_FORM_DATA))
}

fn declared_length(headers: &HeaderMap) -> Option<usize> {
    headers.get(CONTENT_LENGTH)?.to_str().ok()?.trim().parse().ok()
}

fn is_length_limit(error: &(dyn std::error::Error + 'static)) -> bool {
    let mut current = Some(error);
    while let Some(e) = current {
        if e.is::<LengthLimitError>() {
            return true;
        }
        current = e.source();
    }
    false
}

fn body_error(e: axum::Error, max_body_size: usize) -> FnError {
    let inner = e.into_inner();
    if is_length_limit(inner.as_ref()) {
        FnError::PayloadTooLarge(max_body_size)
    } else {
        FnError::BadRequest(format!("Failed to read request body: {inner}"))
    }
}

/// Read an inbound HTTP request into a `Request`.
///
/// Bodies over `max_body_size` fail with `FnError::PayloadTooLarge`, whether
/// the size is declared up front or only found while reading.
pub async fn read_request<S>(
    request: axum::extract::Request,
    state: &S,
    max_body_size: usize,
) -> Result<Request, FnError>
where
    S: Send + Sync,
{
    if declared_length(request.headers()).is_some_and(|len| len > max_body_size) {
        return Err(FnError::PayloadTooLarge(max_body_size));
    }

    if is_multipart(request.headers()) {
        let multipart = Multipart::from_request(request, state)
            .await
            .map_err(|e| FnError::BadRequest(format!("Malformed multipart request: {}", e.body_text())))?;
        return read_multipart(multipart, max_body_size).await;
    }

    let bytes = axum::body::to_bytes(request.into_body(), max_body_size)
        .await
        .map_err(|e| body_error(e, max_body_size))?;
    dict_to_request(parse_payload(&bytes)?)
}

async fn read_multipart(mut multipart: Multipart, max_body_size: usize) -> Result<Request, FnError> {
    let multipart_error = |e: axum::extract::multipart::MultipartError| {
        if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
            FnError::PayloadTooLarge(max_body_size)
        } else {
            FnError::BadRequest(format!("Failed to read multipart field: {}", e.body_text()))
        }
    };

    let mut meta = Map::new();
    let mut body = Map::new();
    let mut files = BTreeMap::new();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if let Some(file_name) = field.file_name().map(str::to_string) {
            let bytes = field.bytes().await.map_err(multipart_error)?;
            files.insert(file_name, bytes.to_vec());
            continue;
        }

        let name = field.name().unwrap_or_default().trim().to_string();
        match name.as_str() {
            "meta" => meta = parse_payload(&field.bytes().await.map_err(multipart_error)?)?,
            "body" => body = parse_payload(&field.bytes().await.map_err(multipart_error)?)?,
            other => tracing::debug!(field = other, "Ignoring multipart field"),
        }
    }

    meta.insert("body".to_string(), Value::Object(body));
    let mut request = dict_to_request(meta)?;
    request.files = files;
    Ok(request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::HeaderValue;
    use serde_json::json;

    fn http_request(content_type: Option<&str>, body: impl Into<Body>) -> axum::extract::Request {
        let mut builder = axum::http::Request::builder().method("POST").uri("/");
        if let Some(ct) = content_type {
            builder = builder.header(CONTENT_TYPE, ct);
        }
        builder.body(body.into()).unwrap()
    }

    #[test]
    fn detects_multipart() {
        let mut headers = HeaderMap::new();
        assert!(!is_multipart(&headers));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("Multipart/Form-Data; boundary=x"));
        assert!(is_multipart(&headers));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        assert!(!is_multipart(&headers));
    }

    #[tokio::test]
    async fn reads_json_body() {
        let raw = json!({
            "method": "POST",
            "url": "/echo",
            "body": {"a": 1},
            "params": {"header": {"x-cs-origin": ["here"]}}
        })
        .to_string();
        let request = read_request(http_request(Some("application/json"), raw), &(), 1024)
            .await
            .unwrap();

        assert_eq!(request.method, "POST");
        assert_eq!(request.body["a"], 1);
        assert_eq!(request.params.header_value("X-Cs-Origin"), Some("here"));
    }

    #[tokio::test]
    async fn empty_body_is_empty_request() {
        let request = read_request(http_request(None, Body::empty()), &(), 1024)
            .await
            .unwrap();
        assert_eq!(request, Request::default());
    }

    #[tokio::test]
    async fn body_past_limit_while_reading_is_too_large() {
        let raw = json!({"body": {"blob": "x".repeat(64)}}).to_string();
        let err = read_request(http_request(None, raw), &(), 16).await.unwrap_err();
        assert_eq!(err, FnError::PayloadTooLarge(16));
    }

    #[tokio::test]
    async fn declared_length_past_limit_is_too_large() {
        let mut request = http_request(None, "{}");
        request
            .headers_mut()
            .insert(CONTENT_LENGTH, HeaderValue::from_static("4096"));
        let err = read_request(request, &(), 16).await.unwrap_err();
        assert_eq!(err.code(), 413);
        assert_eq!(err.message(), "Request payload exceeds the limit of 16 bytes");
    }

    #[tokio::test]
    async fn unreadable_body_is_bad_request() {
        let request = http_request(None, "[1, 2]");
        let err = read_request(request, &(), 1024).await.unwrap_err();
        assert_eq!(err.code(), 400);
    }

    #[tokio::test]
    async fn reads_multipart_parts() {
        let boundary = "XBOUNDARYX";
        let raw = format!(
            "--{b}\r\n\
             Content-Disposition: form-data; name=\"meta\"\r\n\r\n\
             {{\"method\":\"POST\",\"url\":\"/upload\"}}\r\n\
             --{b}\r\n\
             Content-Disposition: form-data; name=\"body\"\r\n\r\n\
             {{\"greeting\":\"hi\"}}\r\n\
             --{b}\r\n\
             Content-Disposition: form-data; name=\"file\"; filename=\"a.txt\"\r\n\
             Content-Type: text/plain\r\n\r\n\
             hello\r\n\
             --{b}--\r\n",
            b = boundary
        );
        let content_type = format!("multipart/form-data; boundary={boundary}");
        let request = read_request(http_request(Some(&content_type), raw), &(), 1024)
            .await
            .unwrap();

        assert_eq!(request.method, "POST");
        assert_eq!(request.url, "/upload");
        assert_eq!(request.body["greeting"], "hi");
        assert_eq!(request.files.get("a.txt").map(Vec::as_slice), Some(&b"hello"[..]));
    }
}
