//! # Deterministic Collaborators
//!
//! Non-cryptographic salt generators and hashers that make frame application
//! reproducible byte-for-byte. Use them for fixtures, golden files and tests.
//! Never issue real credentials with them: predictable salts let anyone
//! brute-force concealed values from their digests.

use std::sync::atomic::{AtomicUsize, Ordering};

use sdf_core::{CryptoError, Hasher, SaltGenerator};

/// Yields `{prefix}1`, `{prefix}2`, ... or the same salt every time.
#[derive(Debug)]
pub struct SequenceSaltGenerator {
    prefix: String,
    counter: Option<AtomicUsize>,
}

impl SequenceSaltGenerator {
    /// Counting generator: `{prefix}1`, `{prefix}2`, ...
    pub fn counting(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            counter: Some(AtomicUsize::new(0)),
        }
    }

    /// Generator that returns `salt` on every call.
    pub fn fixed(salt: impl Into<String>) -> Self {
        Self {
            prefix: salt.into(),
            counter: None,
        }
    }

    /// Number of salts handed out so far (always 0 for a fixed generator).
    pub fn issued(&self) -> usize {
        self.counter
            .as_ref()
            .map_or(0, |c| c.load(Ordering::SeqCst))
    }
}

impl SaltGenerator for SequenceSaltGenerator {
    async fn generate(&self) -> Result<String, CryptoError> {
        match &self.counter {
            Some(counter) => {
                let n = counter.fetch_add(1, Ordering::SeqCst) + 1;
                Ok(format!("{}{n}", self.prefix))
            }
            None => Ok(self.prefix.clone()),
        }
    }
}

/// Hasher that returns its input unchanged.
///
/// The resulting digest is simply the base64url of the hashed bytes, which
/// makes expected values in tests easy to derive by hand.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IdentityHasher;

impl Hasher for IdentityHasher {
    fn algorithm(&self) -> &str {
        "identity"
    }

    async fn hash(&self, input: &[u8]) -> Result<Vec<u8>, CryptoError> {
        Ok(input.to_vec())
    }
}
