//! # Error Types — Structured Error Hierarchy
//!
//! Defines the error types used throughout the workspace. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - Frame/payload mismatches carry the offending key and the dot-joined
//!   path of the level where they were detected (empty at the root).
//! - Every variant of [`SdError`] other than `Encoding` and `Crypto` is a
//!   caller input error. None of them are transient.

use thiserror::Error;

/// Top-level error type for disclosure construction.
#[derive(Error, Debug)]
pub enum SdError {
    /// A numeric argument was negative, NaN, infinite, or otherwise out of range.
    #[error("invalid argument: {reason}")]
    InvalidArgument {
        /// Human-readable description of the rejected value.
        reason: String,
    },

    /// The frame marks a key for disclosure but the payload level lacks it.
    #[error("key '{key}' is marked in the frame but missing from the payload at '{path}'")]
    MissingKey {
        /// The frame key with no payload counterpart.
        key: String,
        /// Dot-joined path of the enclosing level.
        path: String,
    },

    /// The payload holds a value of the wrong JSON type for the frame entry.
    #[error("frame expected {expected} for key '{key}' at '{path}', but the payload holds {found}")]
    TypeMismatch {
        /// The frame key.
        key: String,
        /// Dot-joined path of the enclosing level.
        path: String,
        /// The JSON type the frame entry requires.
        expected: &'static str,
        /// The JSON type actually present in the payload.
        found: &'static str,
    },

    /// An array frame has more entries than the payload array.
    #[error(
        "frame array for key '{key}' at '{path}' has {frame_len} entries but the payload array has {payload_len}"
    )]
    FrameLongerThanPayload {
        /// The frame key.
        key: String,
        /// Dot-joined path of the enclosing level.
        path: String,
        /// Number of entries in the frame array.
        frame_len: usize,
        /// Number of elements in the payload array.
        payload_len: usize,
    },

    /// A frame value is not a boolean, nested frame, boolean array, or decoy count.
    #[error(
        "invalid frame entry for key '{key}' at '{path}': found {found}, expected boolean, object, array of booleans, or a decoy count"
    )]
    InvalidFrameEntry {
        /// The frame key.
        key: String,
        /// Dot-joined path of the enclosing level.
        path: String,
        /// The JSON type encountered.
        found: &'static str,
    },

    /// Encoding or decoding of a disclosure failed.
    #[error("encoding error: {0}")]
    Encoding(#[from] EncodingError),

    /// A caller-supplied salt generator or hasher failed.
    #[error("crypto error: {0}")]
    Crypto(#[from] CryptoError),
}

impl SdError {
    /// Build an [`SdError::InvalidArgument`] from any displayable reason.
    pub fn invalid_argument(reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            reason: reason.into(),
        }
    }
}

/// Error while encoding or decoding disclosures.
#[derive(Error, Debug)]
pub enum EncodingError {
    /// JSON serialization or parsing failed.
    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Base64url decoding failed.
    #[error("base64url decode failed: {0}")]
    Base64(#[from] base64::DecodeError),

    /// The decoded bytes are valid JSON but not a disclosure array.
    #[error("malformed disclosure: {0}")]
    MalformedDisclosure(String),
}

/// Error raised by a caller-supplied collaborator.
#[derive(Error, Debug)]
pub enum CryptoError {
    /// The salt generator could not produce a salt.
    #[error("salt generation failed: {0}")]
    SaltGeneration(String),

    /// The hasher could not produce a digest.
    #[error("hashing failed: {0}")]
    Hashing(String),
}

/// Name of a JSON value's type, as used in error messages.
pub fn json_type_name(value: &serde_json::Value) -> &'static str {
    use serde_json::Value;
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
