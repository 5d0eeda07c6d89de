//! # Canonical Serialization — JCS Byte Production
//!
//! This module defines `CanonicalBytes`, the sole construction path for the
//! bytes that are base64url-encoded into a disclosure.
//!
//! ## Invariant
//!
//! The `CanonicalBytes` newtype has a private inner field. The only way to
//! construct it is through `CanonicalBytes::new()`, which serializes with
//! `serde_jcs` (RFC 8785, JSON Canonicalization Scheme):
//!
//! 1. Compact separators, no insignificant whitespace.
//! 2. Object keys sorted by UTF-16 code units.
//! 3. Numbers rendered the ECMAScript way (`30`, `1.5`, `1e+21`).
//! 4. Strings emitted as UTF-8; only the characters JSON requires are escaped.
//!
//! Floats are accepted. Claims such as a height or a score legitimately carry
//! them, and JCS gives them a single rendering.

use serde::Serialize;

use crate::error::EncodingError;

/// Bytes produced exclusively by JCS canonicalization.
///
/// # Invariants
///
/// - The only constructor is `CanonicalBytes::new()`.
/// - The content is valid UTF-8 JSON.
/// - Serialization of equal values is byte-identical.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalBytes(Vec<u8>);

impl CanonicalBytes {
    /// Construct canonical bytes from any serializable value.
    ///
    /// # Errors
    ///
    /// Returns `EncodingError::Serialization` if the value cannot be
    /// represented as JSON (e.g. a map with non-string keys).
    pub fn new(obj: &impl Serialize) -> Result<Self, EncodingError> {
        let s = serde_jcs::to_string(obj)?;
        Ok(Self(s.into_bytes()))
    }

    /// Access the canonical bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Returns the length of the canonical byte sequence.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the canonical byte sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u8]> for CanonicalBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}
