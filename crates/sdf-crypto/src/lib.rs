//! # sdf-crypto — Salt and Hash Collaborators
//!
//! Concrete implementations of the [`SaltGenerator`](sdf_core::SaltGenerator)
//! and [`Hasher`](sdf_core::Hasher) contracts:
//!
//! - **SHA-2 hashers** (`sha-256`, `sha-384`, `sha-512`) over the `sha2` crate,
//!   selectable at runtime through [`HashAlgorithm`].
//! - **Random salts** from the OS CSPRNG, 128 bits by default.
//! - **Deterministic collaborators** for reproducible fixtures and tests.
//!
//! ## Crate Policy
//!
//! - Depends only on `sdf-core` internally.
//! - Production paths use real SHA-2 and real OS randomness.

pub mod deterministic;
pub mod salt;
pub mod sha;

// Re-export primary types.
pub use deterministic::{IdentityHasher, SequenceSaltGenerator};
pub use salt::{RandomSaltGenerator, DEFAULT_SALT_LEN};
pub use sha::{HashAlgorithm, Sha256Hasher, ShaHasher, UnknownAlgorithm};
