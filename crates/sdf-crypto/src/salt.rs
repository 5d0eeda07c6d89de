//! # Random Salt Generation
//!
//! Salts for production disclosures come from the OS CSPRNG and are rendered
//! as unpadded base64url. The default length is 16 bytes (128 bits), the
//! minimum entropy SD-JWT recommends per salt.

use rand::rngs::OsRng;
use rand::RngCore;

use sdf_core::{base64url, CryptoError, SaltGenerator, SdError};

/// Default salt length in bytes.
pub const DEFAULT_SALT_LEN: usize = 16;

/// Salt generator backed by `OsRng`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RandomSaltGenerator {
    len: usize,
}

impl RandomSaltGenerator {
    /// Generator producing [`DEFAULT_SALT_LEN`]-byte salts.
    pub fn new() -> Self {
        Self {
            len: DEFAULT_SALT_LEN,
        }
    }

    /// Generator producing `len`-byte salts.
    ///
    /// # Errors
    ///
    /// Returns `SdError::InvalidArgument` when `len` is below
    /// [`DEFAULT_SALT_LEN`].
    pub fn with_len(len: usize) -> Result<Self, SdError> {
        if len < DEFAULT_SALT_LEN {
            return Err(SdError::invalid_argument(format!(
                "salt length {len} is below the minimum of {DEFAULT_SALT_LEN} bytes"
            )));
        }
        Ok(Self { len })
    }

    /// Salt length in bytes (before encoding).
    pub fn salt_len(&self) -> usize {
        self.len
    }

    /// Generate a salt synchronously.
    pub fn generate_sync(&self) -> Result<String, CryptoError> {
        let mut bytes = vec![0u8; self.len];
        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|e| CryptoError::SaltGeneration(e.to_string()))?;
        Ok(base64url::encode(bytes))
    }
}

impl Default for RandomSaltGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl SaltGenerator for RandomSaltGenerator {
    async fn generate(&self) -> Result<String, CryptoError> {
        self.generate_sync()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[tokio::test]
    async fn default_salt_is_22_chars() {
        let salt = RandomSaltGenerator::new().generate().await.unwrap();
        // 16 bytes -> 22 unpadded base64url characters.
        assert_eq!(salt.len(), 22);
        assert_eq!(base64url::decode(&salt).unwrap().len(), 16);
    }

    #[tokio::test]
    async fn salts_do_not_repeat() {
        let generator = RandomSaltGenerator::new();
        let mut seen = HashSet::new();
        for _ in 0..256 {
            assert!(seen.insert(generator.generate().await.unwrap()));
        }
    }

    #[test]
    fn custom_length() {
        let generator = RandomSaltGenerator::with_len(32).unwrap();
        assert_eq!(generator.salt_len(), 32);
        let salt = generator.generate_sync().unwrap();
        assert_eq!(base64url::decode(&salt).unwrap().len(), 32);
    }

    #[test]
    fn short_length_rejected() {
        let err = RandomSaltGenerator::with_len(8).unwrap_err();
        assert!(matches!(err, SdError::InvalidArgument { .. }));
    }
}
