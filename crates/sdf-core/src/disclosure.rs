//! # Disclosure — One Concealed Field or Array Element
//!
//! A `Disclosure` pairs a salt with the concealed value, plus the member name
//! when it conceals an object field. It is built once while a frame is
//! applied and never mutated afterwards.
//!
//! ## Wire Form
//!
//! - Object field: `[salt, key, value]`
//! - Array element: `[salt, value]`
//!
//! The array is serialized through [`CanonicalBytes`] and base64url-encoded.
//! That encoded string is what an issuer appends to the compact token, and
//! its ASCII bytes are what gets hashed:
//!
//! ```text
//! digest = base64url(hash(ascii(base64url(jcs([salt, key?, value])))))
//! ```

use std::fmt;

use serde_json::Value;

use crate::base64url;
use crate::canonical::CanonicalBytes;
use crate::digest::Digest;
use crate::error::{EncodingError, SdError};
use crate::provider::Hasher;

/// A salted, independently revealable unit of concealed data.
#[derive(Debug, Clone, PartialEq)]
pub struct Disclosure {
    salt: String,
    key: Option<String>,
    value: Value,
}

impl Disclosure {
    /// Disclosure for an object member: serializes to `[salt, key, value]`.
    pub fn field(salt: impl Into<String>, key: impl Into<String>, value: Value) -> Self {
        Self {
            salt: salt.into(),
            key: Some(key.into()),
            value,
        }
    }

    /// Disclosure for an array element: serializes to `[salt, value]`.
    pub fn element(salt: impl Into<String>, value: Value) -> Self {
        Self {
            salt: salt.into(),
            key: None,
            value,
        }
    }

    /// The salt.
    pub fn salt(&self) -> &str {
        &self.salt
    }

    /// The member name, absent for array elements.
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// The concealed value.
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Whether this disclosure conceals an array element.
    pub fn is_element(&self) -> bool {
        self.key.is_none()
    }

    /// The canonical ordered-array form.
    pub fn to_array(&self) -> Value {
        let mut items = Vec::with_capacity(3);
        items.push(Value::String(self.salt.clone()));
        if let Some(key) = &self.key {
            items.push(Value::String(key.clone()));
        }
        items.push(self.value.clone());
        Value::Array(items)
    }

    /// Base64url of the JCS-serialized array form.
    pub fn encode(&self) -> Result<String, EncodingError> {
        let canonical = CanonicalBytes::new(&self.to_array())?;
        Ok(base64url::encode(canonical))
    }

    /// Parse an encoded disclosure.
    ///
    /// Accepts exactly two elements (`[salt, value]`) or three
    /// (`[salt, key, value]`), where salt and key are strings.
    pub fn decode(encoded: &str) -> Result<Self, EncodingError> {
        let value: Value = base64url::decode_json(encoded)?;
        let Value::Array(items) = value else {
            return Err(EncodingError::MalformedDisclosure(
                "expected a JSON array".to_string(),
            ));
        };

        let mut items = items.into_iter();
        match (items.next(), items.next(), items.next(), items.next()) {
            (Some(Value::String(salt)), Some(value), None, None) => Ok(Self::element(salt, value)),
            (Some(Value::String(salt)), Some(Value::String(key)), Some(value), None) => {
                Ok(Self::field(salt, key, value))
            }
            (Some(Value::String(_)), Some(_), Some(_), None) => Err(
                EncodingError::MalformedDisclosure("member name must be a string".to_string()),
            ),
            (Some(Value::String(_)), ..) | (None, ..) => Err(EncodingError::MalformedDisclosure(
                "expected 2 or 3 elements".to_string(),
            )),
            (Some(_), ..) => Err(EncodingError::MalformedDisclosure(
                "salt must be a string".to_string(),
            )),
        }
    }
}

impl fmt::Display for Disclosure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.key {
            Some(key) => write!(f, "[{}, {key}, {}]", self.salt, self.value),
            None => write!(f, "[{}, {}]", self.salt, self.value),
        }
    }
}

/// Compute the digest of a disclosure with the caller's hasher.
///
/// Deterministic for a fixed salt, key, value and a deterministic hasher.
pub async fn hash_disclosure<H: Hasher>(
    disclosure: &Disclosure,
    hasher: &H,
) -> Result<Digest, SdError> {
    let encoded = disclosure.encode()?;
    let hashed = hasher.hash(encoded.as_bytes()).await?;
    let digest = Digest::from_hash_output(hashed);
    tracing::trace!(algorithm = hasher.algorithm(), %digest, "hashed disclosure");
    Ok(digest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CryptoError;
    use serde_json::json;

    struct Identity;

    impl Hasher for Identity {
        fn algorithm(&self) -> &str {
            "identity"
        }

        async fn hash(&self, input: &[u8]) -> Result<Vec<u8>, CryptoError> {
            Ok(input.to_vec())
        }
    }

    struct Broken;

    impl Hasher for Broken {
        fn algorithm(&self) -> &str {
            "broken"
        }

        async fn hash(&self, _input: &[u8]) -> Result<Vec<u8>, CryptoError> {
            Err(CryptoError::Hashing("unavailable".to_string()))
        }
    }

    #[test]
    fn field_serializes_to_three_elements() {
        let d = Disclosure::field("S1", "name", json!("Alice"));
        assert_eq!(d.to_array(), json!(["S1", "name", "Alice"]));
        assert!(!d.is_element());
        assert_eq!(d.key(), Some("name"));
    }

    #[test]
    fn element_serializes_to_two_elements() {
        let d = Disclosure::element("S1", json!("a"));
        assert_eq!(d.to_array(), json!(["S1", "a"]));
        assert!(d.is_element());
        assert_eq!(d.key(), None);
    }

    #[test]
    fn encode_field() {
        let d = Disclosure::field("S1", "name", json!("Alice"));
        assert_eq!(d.encode().unwrap(), "WyJTMSIsIm5hbWUiLCJBbGljZSJd");
    }

    #[test]
    fn encode_element() {
        let d = Disclosure::element("S1", json!("a"));
        assert_eq!(d.encode().unwrap(), "WyJTMSIsImEiXQ");
    }

    #[test]
    fn encode_object_value_sorts_keys() {
        let d = Disclosure::field("S1", "address", json!({"street": "Main", "city": "Berlin"}));
        assert_eq!(
            d.encode().unwrap(),
            "WyJTMSIsImFkZHJlc3MiLHsiY2l0eSI6IkJlcmxpbiIsInN0cmVldCI6Ik1haW4ifV0"
        );
    }

    #[test]
    fn decode_field() {
        let d = Disclosure::decode("WyJTMSIsIm5hbWUiLCJBbGljZSJd").unwrap();
        assert_eq!(d, Disclosure::field("S1", "name", json!("Alice")));
    }

    #[test]
    fn decode_element() {
        let d = Disclosure::decode("WyJTMSIsImEiXQ").unwrap();
        assert_eq!(d, Disclosure::element("S1", json!("a")));
    }

    #[test]
    fn decode_rejects_non_array() {
        let encoded = base64url::encode(br#"{"salt":"S1"}"#);
        let err = Disclosure::decode(&encoded).unwrap_err();
        assert!(matches!(err, EncodingError::MalformedDisclosure(_)));
    }

    #[test]
    fn decode_rejects_wrong_arity() {
        for raw in [r#"["S1"]"#, r#"[]"#, r#"["S1","k","v","extra"]"#] {
            let encoded = base64url::encode(raw.as_bytes());
            let err = Disclosure::decode(&encoded).unwrap_err();
            assert!(matches!(err, EncodingError::MalformedDisclosure(_)), "{raw}");
        }
    }

    #[test]
    fn decode_rejects_non_string_salt_or_key() {
        for raw in [r#"[1,"v"]"#, r#"["S1",2,"v"]"#] {
            let encoded = base64url::encode(raw.as_bytes());
            let err = Disclosure::decode(&encoded).unwrap_err();
            assert!(matches!(err, EncodingError::MalformedDisclosure(_)), "{raw}");
        }
    }

    #[test]
    fn decode_rejects_invalid_base64() {
        let err = Disclosure::decode("not base64!").unwrap_err();
        assert!(matches!(err, EncodingError::Base64(_)));
    }

    #[test]
    fn display_shows_array_form() {
        let d = Disclosure::field("S1", "age", json!(30));
        assert_eq!(format!("{d}"), "[S1, age, 30]");
    }

    #[tokio::test]
    async fn hash_with_identity_is_double_encoding() {
        let d = Disclosure::field("S1", "name", json!("Alice"));
        let digest = hash_disclosure(&d, &Identity).await.unwrap();
        assert_eq!(digest.as_str(), "V3lKVE1TSXNJbTVoYldVaUxDSkJiR2xqWlNKZA");
    }

    #[tokio::test]
    async fn hash_is_deterministic() {
        let d = Disclosure::element("S1", json!({"nested": [1, 2, 3]}));
        let a = hash_disclosure(&d, &Identity).await.unwrap();
        let b = hash_disclosure(&d, &Identity).await.unwrap();
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn hasher_failure_propagates() {
        let d = Disclosure::element("S1", json!("a"));
        let err = hash_disclosure(&d, &Broken).await.unwrap_err();
        assert!(matches!(err, SdError::Crypto(CryptoError::Hashing(_))));
    }
}
