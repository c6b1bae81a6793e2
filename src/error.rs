//! Error types.
//!
//! The taxonomy is deliberately narrow: malformed percent-encoding and
//! malformed stored JSON are recovered inline on the read path and never
//! surface here. The one fallible input is a caller-supplied value that
//! cannot be serialized as JSON.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CookieError {
    #[error("failed to serialize cookie value as JSON: {0}")]
    Serialize(#[from] serde_json::Error),
}
