//! # Decoy Digests
//!
//! Decoys are digests of bare salts. No disclosure backs them, so a verifier
//! can never resolve one, yet they are indistinguishable from real digests.
//! Mixing them into `_sd` hides how many fields a level actually conceals.

use serde_json::Number;

use sdf_core::{Digest, Hasher, SaltGenerator, SdError};

/// Upper bound accepted for a decoy count read from a frame or the command line.
pub const MAX_DECOY_COUNT: usize = 10_000;

/// A validated, non-negative, integral number of decoys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct DecoyCount(usize);

impl DecoyCount {
    /// Validate a JSON-style number as a decoy count.
    ///
    /// # Errors
    ///
    /// `SdError::InvalidArgument` when `count` is NaN, infinite, negative,
    /// has a fractional part, or exceeds [`MAX_DECOY_COUNT`].
    pub fn new(count: f64) -> Result<Self, SdError> {
        if count.is_nan() {
            return Err(SdError::invalid_argument("NaN is not allowed for a decoy count"));
        }
        if count.is_infinite() {
            return Err(SdError::invalid_argument(
                "an infinite decoy count is not allowed",
            ));
        }
        if count < 0.0 {
            return Err(SdError::invalid_argument(format!(
                "negative decoy count of {count} is not allowed"
            )));
        }
        if count.fract() != 0.0 {
            return Err(SdError::invalid_argument(format!(
                "decoy count must be an integer, got {count}"
            )));
        }
        if count > MAX_DECOY_COUNT as f64 {
            return Err(too_many(count));
        }
        Ok(Self(count as usize))
    }

    /// Validate an integral count against [`MAX_DECOY_COUNT`].
    ///
    /// # Errors
    ///
    /// `SdError::InvalidArgument` when `count` exceeds the bound.
    pub fn bounded(count: usize) -> Result<Self, SdError> {
        if count > MAX_DECOY_COUNT {
            return Err(too_many(count));
        }
        Ok(Self(count))
    }

    /// The number of decoys.
    pub fn get(self) -> usize {
        self.0
    }
}

/// Unchecked. Use [`DecoyCount::bounded`] for counts from untrusted input.
impl From<usize> for DecoyCount {
    fn from(count: usize) -> Self {
        Self(count)
    }
}

impl TryFrom<&Number> for DecoyCount {
    type Error = SdError;

    fn try_from(n: &Number) -> Result<Self, Self::Error> {
        if let Some(u) = n.as_u64() {
            return usize::try_from(u)
                .map_err(|_| too_many(u))
                .and_then(Self::bounded);
        }
        if let Some(i) = n.as_i64() {
            return Err(SdError::invalid_argument(format!(
                "negative decoy count of {i} is not allowed"
            )));
        }
        match n.as_f64() {
            Some(f) => Self::new(f),
            None => Err(SdError::invalid_argument(format!(
                "decoy count {n} is not a representable number"
            ))),
        }
    }
}

fn too_many(count: impl std::fmt::Display) -> SdError {
    SdError::invalid_argument(format!(
        "decoy count {count} exceeds the maximum of {MAX_DECOY_COUNT}"
    ))
}

impl TryFrom<f64> for DecoyCount {
    type Error = SdError;

    fn try_from(count: f64) -> Result<Self, Self::Error> {
        Self::new(count)
    }
}

/// Produce `count` decoy digests.
///
/// Each decoy is one salt from `salts`, hashed with `hasher` and
/// base64url-encoded. Calls are strictly sequential: salt, hash, salt, hash.
pub async fn create_decoys<S, H>(
    count: DecoyCount,
    salts: &S,
    hasher: &H,
) -> Result<Vec<Digest>, SdError>
where
    S: SaltGenerator,
    H: Hasher,
{
    let mut decoys = Vec::new();
    for _ in 0..count.get() {
        let salt = salts.generate().await?;
        let hashed = hasher.hash(salt.as_bytes()).await?;
        decoys.push(Digest::from_hash_output(hashed));
    }
    tracing::trace!(count = decoys.len(), algorithm = hasher.algorithm(), "created decoys");
    Ok(decoys)
}
