//! # Frame Walker
//!
//! Applies a [`DisclosureFrame`] to a payload, depth first, in frame entry
//! order. Each level of the payload is taken by value, concealed members
//! are removed from it as they are turned into disclosures, nested levels
//! are rebuilt recursively and put back, and the level's digests are written
//! to `_sd` once the level is finished.
//!
//! ## Ordering
//!
//! - `_sd` is sorted after every insertion ([`insert_sorted`]).
//! - Disclosures are returned in discovery order and never sorted. Decoys
//!   have no disclosure and do not appear in the list.
//! - Salt and hash calls are awaited one at a time, in entry order.
//!
//! ## Failure
//!
//! The first error aborts the walk. The payload was moved in, so a caller
//! either receives the complete result or an error, never a half-redacted
//! payload.

use std::future::Future;
use std::pin::Pin;

use serde_json::{Map, Value};

use sdf_core::error::json_type_name;
use sdf_core::{
    hash_disclosure, insert_sorted, Digest, Disclosure, EncodingError, Hasher, SaltGenerator,
    SdError, ARRAY_DIGEST_KEY, SD_ALG_KEY, SD_DIGESTS_KEY,
};

use crate::decoy::create_decoys;
use crate::frame::{join_path, DisclosureFrame, FrameNode};

/// The redacted payload together with the disclosures that were cut from it.
#[derive(Debug, Clone, PartialEq)]
pub struct DisclosedPayload {
    /// The payload with concealed members replaced by `_sd` digests.
    pub payload: Map<String, Value>,
    /// Disclosures in discovery order.
    pub disclosures: Vec<Disclosure>,
}

impl DisclosedPayload {
    /// Encoded form of every disclosure, in order.
    pub fn encoded_disclosures(&self) -> Result<Vec<String>, EncodingError> {
        self.disclosures.iter().map(Disclosure::encode).collect()
    }

    /// Record the hash algorithm in the top-level `_sd_alg` member.
    pub fn insert_sd_alg(&mut self, algorithm: &str) {
        self.payload
            .insert(SD_ALG_KEY.to_string(), Value::String(algorithm.to_string()));
    }

    /// Split into the payload and the disclosures.
    pub fn into_parts(self) -> (Map<String, Value>, Vec<Disclosure>) {
        (self.payload, self.disclosures)
    }
}

/// Apply `frame` to `payload`.
///
/// # Errors
///
/// - `SdError::MissingKey` when the frame names a member the payload lacks.
/// - `SdError::TypeMismatch` when an array frame meets a non-array, or a
///   nested frame meets a non-object.
/// - `SdError::FrameLongerThanPayload` when an array frame is longer than
///   the payload array.
/// - `SdError::Crypto` / `SdError::Encoding` when a collaborator fails.
pub async fn apply_disclosure_frame<S, H>(
    salts: &S,
    hasher: &H,
    payload: Map<String, Value>,
    frame: &DisclosureFrame,
) -> Result<DisclosedPayload, SdError>
where
    S: SaltGenerator,
    H: Hasher,
{
    let mut walker = FrameWalker {
        salts,
        hasher,
        disclosures: Vec::new(),
    };
    let payload = walker.walk_object(payload, frame, String::new()).await?;
    tracing::debug!(
        disclosures = walker.disclosures.len(),
        algorithm = hasher.algorithm(),
        "applied disclosure frame"
    );
    Ok(DisclosedPayload {
        payload,
        disclosures: walker.disclosures,
    })
}

/// Apply a frame given as raw JSON to a payload given as raw JSON.
///
/// The frame is validated completely before any salt is drawn, so
/// `InvalidFrameEntry` is reported ahead of payload mismatches.
///
/// # Errors
///
/// As [`apply_disclosure_frame`], plus `SdError::InvalidFrameEntry` for a
/// malformed frame and `SdError::TypeMismatch` for a non-object payload.
pub async fn apply_disclosure_frame_value<S, H>(
    salts: &S,
    hasher: &H,
    payload: Value,
    frame: &Value,
) -> Result<DisclosedPayload, SdError>
where
    S: SaltGenerator,
    H: Hasher,
{
    let frame = DisclosureFrame::from_value(frame)?;
    let payload = match payload {
        Value::Object(map) => map,
        other => {
            return Err(SdError::TypeMismatch {
                key: String::new(),
                path: String::new(),
                expected: "object",
                found: json_type_name(&other),
            })
        }
    };
    apply_disclosure_frame(salts, hasher, payload, &frame).await
}

type LevelFuture<'f> = Pin<Box<dyn Future<Output = Result<Map<String, Value>, SdError>> + 'f>>;

struct FrameWalker<'a, S, H> {
    salts: &'a S,
    hasher: &'a H,
    disclosures: Vec<Disclosure>,
}

impl<'a, S, H> FrameWalker<'a, S, H>
where
    S: SaltGenerator,
    H: Hasher,
{
    /// Boxed entry point so that levels can recurse.
    fn walk_object<'f>(
        &'f mut self,
        payload: Map<String, Value>,
        frame: &'f DisclosureFrame,
        path: String,
    ) -> LevelFuture<'f>
    where
        'a: 'f,
        S: 'f,
        H: 'f,
    {
        Box::pin(self.walk_level(payload, frame, path))
    }

    async fn walk_level(
        &mut self,
        mut payload: Map<String, Value>,
        frame: &DisclosureFrame,
        path: String,
    ) -> Result<Map<String, Value>, SdError> {
        tracing::trace!(path = %path, entries = frame.len(), "walking frame level");
        let mut sd: Option<Vec<Digest>> = None;

        for entry in frame.entries() {
            let key = entry.key();
            match entry.node() {
                FrameNode::Decoys(count) => {
                    let decoys = create_decoys(*count, self.salts, self.hasher).await?;
                    if decoys.is_empty() {
                        continue;
                    }
                    let digests = level_digests(&mut sd, &mut payload, &path)?;
                    for decoy in decoys {
                        insert_sorted(digests, decoy);
                    }
                    tracing::debug!(path = %path, count = count.get(), "added decoy digests");
                }
                FrameNode::Disclose(false) => {}
                FrameNode::Disclose(true) => {
                    let value = payload
                        .remove(key)
                        .ok_or_else(|| missing_key(key, &path))?;
                    let salt = self.salts.generate().await?;
                    let disclosure = Disclosure::field(salt, key, value);
                    let digest = hash_disclosure(&disclosure, self.hasher).await?;
                    self.disclosures.push(disclosure);
                    insert_sorted(level_digests(&mut sd, &mut payload, &path)?, digest);
                    tracing::debug!(path = %path, key, "concealed member");
                }
                FrameNode::Nested(inner) => {
                    let child = match payload.remove(key) {
                        Some(Value::Object(child)) => child,
                        Some(other) => return Err(type_mismatch(key, &path, "object", &other)),
                        None => return Err(missing_key(key, &path)),
                    };
                    let rebuilt = self
                        .walk_object(child, inner, join_path(&path, key))
                        .await?;
                    payload.insert(key.to_string(), Value::Object(rebuilt));
                }
                FrameNode::Elements(flags) => {
                    let items = match payload.remove(key) {
                        Some(Value::Array(items)) => items,
                        Some(other) => return Err(type_mismatch(key, &path, "array", &other)),
                        None => {
                            return Err(SdError::TypeMismatch {
                                key: key.to_string(),
                                path: path.clone(),
                                expected: "array",
                                found: "nothing",
                            })
                        }
                    };
                    let rebuilt = self.conceal_elements(items, flags, key, &path).await?;
                    payload.insert(key.to_string(), Value::Array(rebuilt));
                }
            }
        }

        if let Some(digests) = sd {
            let digests = digests.into_iter().map(Value::from).collect();
            payload.insert(SD_DIGESTS_KEY.to_string(), Value::Array(digests));
        }
        Ok(payload)
    }

    /// Rebuild an array, replacing flagged elements with `{"...": digest}`.
    ///
    /// Elements past the end of `flags` stay in plaintext.
    async fn conceal_elements(
        &mut self,
        items: Vec<Value>,
        flags: &[bool],
        key: &str,
        path: &str,
    ) -> Result<Vec<Value>, SdError> {
        if flags.len() > items.len() {
            return Err(SdError::FrameLongerThanPayload {
                key: key.to_string(),
                path: path.to_string(),
                frame_len: flags.len(),
                payload_len: items.len(),
            });
        }

        let mut rebuilt = Vec::with_capacity(items.len());
        for (index, item) in items.into_iter().enumerate() {
            if !flags.get(index).copied().unwrap_or(false) {
                rebuilt.push(item);
                continue;
            }
            let salt = self.salts.generate().await?;
            let disclosure = Disclosure::element(salt, item);
            let digest = hash_disclosure(&disclosure, self.hasher).await?;
            self.disclosures.push(disclosure);

            let mut placeholder = Map::new();
            placeholder.insert(ARRAY_DIGEST_KEY.to_string(), Value::from(digest));
            rebuilt.push(Value::Object(placeholder));
            tracing::debug!(path = %path, key, index, "concealed array element");
        }
        Ok(rebuilt)
    }
}

/// The `_sd` list of the current level, created on first use.
///
/// An `_sd` array already present in the payload is adopted (and sorted)
/// so that new digests extend it rather than replace it.
fn level_digests<'s>(
    sd: &'s mut Option<Vec<Digest>>,
    payload: &mut Map<String, Value>,
    path: &str,
) -> Result<&'s mut Vec<Digest>, SdError> {
    if sd.is_none() {
        let mut existing = Vec::new();
        match payload.remove(SD_DIGESTS_KEY) {
            None => {}
            Some(Value::Array(items)) => {
                for item in items {
                    match item {
                        Value::String(s) => existing.push(Digest::new(s)),
                        other => {
                            return Err(type_mismatch(SD_DIGESTS_KEY, path, "array of strings", &other))
                        }
                    }
                }
                existing.sort();
            }
            Some(other) => return Err(type_mismatch(SD_DIGESTS_KEY, path, "array of strings", &other)),
        }
        *sd = Some(existing);
    }
    Ok(sd.get_or_insert_with(Vec::new))
}

fn missing_key(key: &str, path: &str) -> SdError {
    SdError::MissingKey {
        key: key.to_string(),
        path: path.to_string(),
    }
}

fn type_mismatch(key: &str, path: &str, expected: &'static str, found: &Value) -> SdError {
    SdError::TypeMismatch {
        key: key.to_string(),
        path: path.to_string(),
        expected,
        found: json_type_name(found),
    }
}
