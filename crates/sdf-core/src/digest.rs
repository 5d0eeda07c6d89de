//! # Digests — Opaque base64url Hash Strings
//!
//! Defines `Digest`, the string form of a hashed disclosure or decoy, and the
//! reserved member names that digests are placed under.
//!
//! ## Ordering Invariant
//!
//! Every `_sd` array is kept sorted lexicographically after each insertion.
//! `Digest` orders by plain byte-wise string comparison, which for the
//! base64url alphabet is identical to lexicographic order of the characters.
//! [`insert_sorted`] is the only way the walker grows an `_sd` list.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::base64url;

/// Reserved object member holding the sorted digest array of a level.
pub const SD_DIGESTS_KEY: &str = "_sd";

/// Member name of the single-key placeholder that replaces a disclosed array element.
pub const ARRAY_DIGEST_KEY: &str = "...";

/// Reserved frame key requesting decoy digests at a level.
pub const DECOY_COUNT_KEY: &str = "__decoyCount";

/// Payload member naming the hash algorithm used for every digest.
pub const SD_ALG_KEY: &str = "_sd_alg";

/// A base64url-encoded hash of a disclosure, or of a decoy salt.
///
/// Digests are opaque once computed: nothing in the workspace inspects
/// their content beyond ordering and equality.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Digest(String);

impl Digest {
    /// Wrap an already-encoded digest string.
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// Render raw hasher output as a digest.
    pub fn from_hash_output(bytes: impl AsRef<[u8]>) -> Self {
        Self(base64url::encode(bytes))
    }

    /// The base64url string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the digest, returning the base64url string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Digest {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<Digest> for serde_json::Value {
    fn from(digest: Digest) -> Self {
        serde_json::Value::String(digest.0)
    }
}

/// Insert a digest into an already sorted list, keeping it sorted.
///
/// Equal digests are kept (a duplicate lands next to its twin), matching a
/// push followed by a stable sort.
pub fn insert_sorted(digests: &mut Vec<Digest>, digest: Digest) {
    let idx = digests.partition_point(|d| d <= &digest);
    digests.insert(idx, digest);
}
