//! # sdf-core — Foundational Types for Selective Disclosure
//!
//! This crate is the leaf of the workspace. It defines the primitives every
//! other crate builds on when turning a claims payload into its selectively
//! disclosable form:
//!
//! 1. **`CanonicalBytes` newtype.** Every disclosure is serialized through
//!    `CanonicalBytes::new()` (RFC 8785 JCS) before it is base64url-encoded.
//!    Two runs over the same salt, key and value always produce the same bytes.
//!
//! 2. **`Digest` newtype.** Digests are opaque base64url strings. Their `Ord`
//!    is the lexicographic order required of every `_sd` array.
//!
//! 3. **`Disclosure` record.** Immutable salt + optional key + value, with the
//!    canonical array form `[salt, key, value]` / `[salt, value]`.
//!
//! 4. **Collaborator contracts.** `SaltGenerator` and `Hasher` are supplied by
//!    the caller and may be asynchronous. The core never picks a hash function
//!    or a randomness source on its own.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `sdf-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod base64url;
pub mod canonical;
pub mod digest;
pub mod disclosure;
pub mod error;
pub mod provider;

// Re-export primary types for ergonomic imports.
pub use canonical::CanonicalBytes;
pub use digest::{
    insert_sorted, Digest, ARRAY_DIGEST_KEY, DECOY_COUNT_KEY, SD_ALG_KEY, SD_DIGESTS_KEY,
};
pub use disclosure::{hash_disclosure, Disclosure};
pub use error::{CryptoError, EncodingError, SdError};
pub use provider::{Hasher, SaltGenerator};
