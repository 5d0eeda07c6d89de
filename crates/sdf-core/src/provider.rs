//! # Collaborator Contracts
//!
//! The salt source and the hash function are supplied by the caller. The
//! core only calls them, in a fixed order, and base64url-encodes what they
//! return. Both contracts are asynchronous so that implementations backed
//! by an HSM, a remote KMS, or a WebCrypto-style API fit without blocking.
//!
//! ## Ordering
//!
//! Callers of these traits await each call before issuing the next. Salt
//! and hash calls are never reordered or run concurrently, because both
//! the `_sd` contents and the disclosure order depend on call order when a
//! deterministic generator is injected.
//!
//! Concrete implementations (SHA-2 hashers, OS-random salts, deterministic
//! test doubles) live in `sdf-crypto`.

use crate::error::CryptoError;

/// Source of disclosure and decoy salts.
///
/// Implementations must return sufficiently random, non-repeating values
/// in production. Deterministic implementations are only for tests and
/// reproducible fixtures.
#[allow(async_fn_in_trait)]
pub trait SaltGenerator {
    /// Produce a fresh salt.
    async fn generate(&self) -> Result<String, CryptoError>;
}

/// Hash function applied to encoded disclosures and decoy salts.
#[allow(async_fn_in_trait)]
pub trait Hasher {
    /// IANA "Named Information Hash Algorithm" name, e.g. `sha-256`.
    ///
    /// Callers use it to populate `_sd_alg`.
    fn algorithm(&self) -> &str;

    /// Hash the input bytes, returning the raw digest.
    async fn hash(&self, input: &[u8]) -> Result<Vec<u8>, CryptoError>;
}

impl<T: SaltGenerator> SaltGenerator for &T {
    async fn generate(&self) -> Result<String, CryptoError> {
        (**self).generate().await
    }
}

impl<T: Hasher> Hasher for &T {
    fn algorithm(&self) -> &str {
        (**self).algorithm()
    }

    async fn hash(&self, input: &[u8]) -> Result<Vec<u8>, CryptoError> {
        (**self).hash(input).await
    }
}
