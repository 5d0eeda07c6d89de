//! # SHA-2 Hashers
//!
//! [`Hasher`] implementations over the `sha2` crate. SHA-256 is the default
//! hash for SD-JWT; SHA-384 and SHA-512 are offered for issuers that need a
//! wider digest.
//!
//! ## Algorithm Names
//!
//! `algorithm()` returns the IANA "Named Information Hash Algorithm" name
//! (`sha-256`, `sha-384`, `sha-512`). That string is what belongs in `_sd_alg`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256, Sha384, Sha512};
use thiserror::Error;

use sdf_core::{CryptoError, Hasher};

/// A supported SHA-2 variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum HashAlgorithm {
    /// SHA-256 (32-byte digest).
    #[default]
    #[serde(rename = "sha-256")]
    Sha256,
    /// SHA-384 (48-byte digest).
    #[serde(rename = "sha-384")]
    Sha384,
    /// SHA-512 (64-byte digest).
    #[serde(rename = "sha-512")]
    Sha512,
}

impl HashAlgorithm {
    /// All supported algorithms.
    pub const ALL: [HashAlgorithm; 3] = [Self::Sha256, Self::Sha384, Self::Sha512];

    /// Returns the IANA algorithm name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sha256 => "sha-256",
            Self::Sha384 => "sha-384",
            Self::Sha512 => "sha-512",
        }
    }

    /// Digest length in bytes.
    pub fn output_len(&self) -> usize {
        match self {
            Self::Sha256 => 32,
            Self::Sha384 => 48,
            Self::Sha512 => 64,
        }
    }

    /// A hasher for this algorithm.
    pub fn hasher(self) -> ShaHasher {
        ShaHasher::new(self)
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The requested hash algorithm is not supported.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unsupported hash algorithm '{0}'; expected one of sha-256, sha-384, sha-512")]
pub struct UnknownAlgorithm(pub String);

impl FromStr for HashAlgorithm {
    type Err = UnknownAlgorithm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sha-256" | "sha256" => Ok(Self::Sha256),
            "sha-384" | "sha384" => Ok(Self::Sha384),
            "sha-512" | "sha512" => Ok(Self::Sha512),
            _ => Err(UnknownAlgorithm(s.to_string())),
        }
    }
}

/// SHA-2 hasher selected at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ShaHasher {
    algorithm: HashAlgorithm,
}

impl ShaHasher {
    /// Create a hasher for the given algorithm.
    pub fn new(algorithm: HashAlgorithm) -> Self {
        Self { algorithm }
    }

    /// The configured algorithm.
    pub fn hash_algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    /// Hash synchronously. SHA-2 never fails.
    pub fn digest(&self, input: &[u8]) -> Vec<u8> {
        match self.algorithm {
            HashAlgorithm::Sha256 => Sha256::digest(input).to_vec(),
            HashAlgorithm::Sha384 => Sha384::digest(input).to_vec(),
            HashAlgorithm::Sha512 => Sha512::digest(input).to_vec(),
        }
    }
}

impl Hasher for ShaHasher {
    fn algorithm(&self) -> &str {
        self.algorithm.as_str()
    }

    async fn hash(&self, input: &[u8]) -> Result<Vec<u8>, CryptoError> {
        Ok(self.digest(input))
    }
}

/// SHA-256 hasher, the SD-JWT default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sha256Hasher;

impl Hasher for Sha256Hasher {
    fn algorithm(&self) -> &str {
        HashAlgorithm::Sha256.as_str()
    }

    async fn hash(&self, input: &[u8]) -> Result<Vec<u8>, CryptoError> {
        Ok(Sha256::digest(input).to_vec())
    }
}
