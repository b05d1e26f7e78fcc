//! Header key canonicalization and passthrough selection.

use std::collections::BTreeMap;

/// Request headers copied forward into every response, by canonical key.
pub const PASSTHROUGH_HEADERS: [&str; 3] = ["X-Cs-Executionid", "X-Cs-Origin", "X-Cs-Traceid"];

/// Canonical form of a header key.
///
/// The first character and every character following a `-` are upper-cased,
/// everything else is lower-cased: `content-type` → `Content-Type`,
/// `X-CS-TRACEID` → `X-Cs-Traceid`.
pub fn canonicalize_header(key: &str) -> String {
    let mut canon = String::with_capacity(key.len());
    let mut upper = true;
    for c in key.chars() {
        if upper {
            canon.extend(c.to_uppercase());
        } else {
            canon.extend(c.to_lowercase());
        }
        upper = c == '-';
    }
    canon
}

/// Re-key a header map into canonical form.
///
/// Keys that collapse onto the same canonical form have their values merged
/// in key order.
pub fn canonicalize_map(header: BTreeMap<String, Vec<String>>) -> BTreeMap<String, Vec<String>> {
    let mut canon: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (key, values) in header {
        canon
            .entry(canonicalize_header(&key))
            .or_default()
            .extend(values);
    }
    canon
}

/// Copy the passthrough headers present in `request` into `response`.
pub(crate) fn take_passthrough(
    request: &BTreeMap<String, Vec<String>>,
    response: &mut BTreeMap<String, Vec<String>>,
) {
    for key in PASSTHROUGH_HEADERS {
        match request.get(key) {
            Some(values) if !values.is_empty() => {
                response.insert(key.to_string(), values.clone());
            }
            _ => {}
        }
    }
}
