//! Canonical data model.
//!
//! # Data Flow
//! ```text
//! wire payload (JSON / multipart / file)
//!     → mapping (dict → Request)
//!     → Request handed to the handler
//!     → Response returned by the handler
//!     → mapping (Response → wire)
//! ```
//!
//! # Design Decisions
//! - Plain field storage, no behavior beyond construction helpers
//! - Header and query maps are ordered so serialized output is deterministic
//! - `Response.code == 0` means "unset, infer from errors"

pub mod request;
pub mod response;

pub use request::{Request, RequestParams};
pub use response::{APIError, Response};

use serde::{Deserialize, Deserializer};

/// Deserialize a field, keeping its default when the wire value is `null`.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
