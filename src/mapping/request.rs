//! Wire dictionary → `Request`.

use serde_json::{Map, Value};

use super::headers::canonicalize_map;
use crate::error::FnError;
use crate::model::Request;

/// Parse a raw payload into a JSON object.
///
/// An empty (or whitespace-only) payload is treated as `{}`.
pub fn parse_payload(raw: &[u8]) -> Result<Map<String, Value>, FnError> {
    let text = std::str::from_utf8(raw)
        .map_err(|e| FnError::BadRequest(format!("Request payload is not valid UTF-8: {e}")))?
        .trim();
    if text.is_empty() {
        return Ok(Map::new());
    }

    match serde_json::from_str(text) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(FnError::BadRequest(format!(
            "Request payload must be a JSON object, got {}",
            json_kind(&other)
        ))),
        Err(e) => Err(FnError::BadRequest(format!("Request payload is not valid JSON: {e}"))),
    }
}

/// Map a wire dictionary onto a `Request`.
///
/// Fields are matched by name, missing keys and `null` values keep their
/// defaults, and every key of `params.header` is canonicalized.
pub fn dict_to_request(dict: Map<String, Value>) -> Result<Request, FnError> {
    if let Some(url) = dict.get("url").filter(|v| !v.is_null() && !v.is_string()) {
        return Err(FnError::BadRequest(format!(
            "Unsupported URL format, expects string: {url}"
        )));
    }
    if let Some(method) = dict.get("method").filter(|v| !v.is_null() && !v.is_string()) {
        return Err(FnError::BadRequest(format!(
            "Unsupported method format, expects string: {method}"
        )));
    }

    let mut request: Request = serde_json::from_value(Value::Object(dict))
        .map_err(|e| FnError::BadRequest(format!("Malformed request: {e}")))?;

    let header = std::mem::take(&mut request.params.header);
    request.params.header = canonicalize_map(header);

    Ok(request)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("not an object"),
        }
    }

    #[test]
    fn maps_full_payload() {
        let payload = object(json!({
            "body": {"hello": "world"},
            "context": {"goodnight": "moon"},
            "fn_id": "d31cd12d3e29422484a0d1ba0ac60e79",
            "fn_version": 123,
            "method": "GET",
            "params": {
                "header": {
                    "accepts": ["application/json"],
                    "ContENt-type": ["application/json"],
                    "xyz": ["a", "b"],
                },
                "query": {"ijk": ["4", "5", "6"]},
            },
            "url": "/qwerty",
        }));

        let req = dict_to_request(payload).unwrap();

        assert_eq!(req.body, object(json!({"hello": "world"})));
        assert_eq!(req.context, object(json!({"goodnight": "moon"})));
        assert_eq!(req.fn_id, "d31cd12d3e29422484a0d1ba0ac60e79");
        assert_eq!(req.fn_version, 123);
        assert_eq!(req.method, "GET");
        assert_eq!(req.url, "/qwerty");
        let keys: Vec<&str> = req.params.header.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["Accepts", "Content-Type", "Xyz"]);
        assert_eq!(req.params.header["Xyz"], vec!["a", "b"]);
        assert_eq!(req.params.query["ijk"], vec!["4", "5", "6"]);
    }

    #[test]
    fn missing_and_null_keys_keep_defaults() {
        let req = dict_to_request(object(json!({
            "access_token": null,
            "url": "/a",
        })))
        .unwrap();

        assert_eq!(req.access_token, "");
        assert_eq!(req.method, "");
        assert!(req.params.header.is_empty());
    }

    #[test]
    fn unknown_keys_ignored() {
        let req = dict_to_request(object(json!({"url": "/a", "extra": 1}))).unwrap();
        assert_eq!(req.url, "/a");
    }

    #[test]
    fn non_string_url_is_bad_request() {
        let err = dict_to_request(object(json!({"url": 5, "method": "GET"}))).unwrap_err();
        assert_eq!(err.code(), 400);
        assert_eq!(err.message(), "Unsupported URL format, expects string: 5");
    }

    #[test]
    fn non_string_method_is_bad_request() {
        let err = dict_to_request(object(json!({"url": "/a", "method": ["GET"]}))).unwrap_err();
        assert_eq!(err.code(), 400);
        assert_eq!(err.message(), "Unsupported method format, expects string: [\"GET\"]");
    }

    #[test]
    fn wrong_field_type_is_bad_request() {
        let err = dict_to_request(object(json!({"url": "/a", "body": "text"}))).unwrap_err();
        assert_eq!(err.code(), 400);
    }

    #[test]
    fn empty_payload_is_empty_object() {
        assert!(parse_payload(b"").unwrap().is_empty());
        assert!(parse_payload(b"  \n").unwrap().is_empty());
    }

    #[test]
    fn payload_must_be_object() {
        let err = parse_payload(b"[1, 2]").unwrap_err();
        assert_eq!(err.message(), "Request payload must be a JSON object, got an array");

        assert!(parse_payload(b"{not json").is_err());
    }
}
