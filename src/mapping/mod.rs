//! Mapping between wire payloads and the canonical model.
//!
//! # Data Flow
//! ```text
//! Inbound:
//!     raw bytes → parse_payload (JSON object)
//!     → dict_to_request (field mapping, header canonicalization)
//!     → Request
//!
//! Outbound:
//!     Result<Response, FnError>
//!     → shape_response (error-code inference, header passthrough, JSON encoding)
//!     → WireResponse (status, headers, payload)
//! ```
//!
//! # Design Decisions
//! - Response shaping lives here once and is shared by every transport adapter
//! - Mapping failures are `FnError::BadRequest`, shaped like routing errors

pub mod headers;
pub mod request;
pub mod response;

pub use headers::{canonicalize_header, PASSTHROUGH_HEADERS};
pub use request::{dict_to_request, parse_payload};
pub use response::{infer_code, shape_response, WireResponse, CONTENT_TYPE_JSON};
