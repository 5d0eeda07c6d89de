//! # Base64url Codec
//!
//! Unpadded URL-safe base64 (RFC 4648 §5). Every digest, decoy, and encoded
//! disclosure in the workspace is rendered through this module.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::canonical::CanonicalBytes;
use crate::error::EncodingError;

/// Encode bytes as unpadded base64url.
pub fn encode(bytes: impl AsRef<[u8]>) -> String {
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Decode unpadded base64url.
///
/// Padding characters are rejected, as are characters from the standard
/// (`+`, `/`) alphabet.
pub fn decode(input: &str) -> Result<Vec<u8>, EncodingError> {
    Ok(URL_SAFE_NO_PAD.decode(input)?)
}

/// Canonicalize a value and encode the JCS bytes as base64url.
pub fn encode_json(value: &impl Serialize) -> Result<String, EncodingError> {
    let canonical = CanonicalBytes::new(value)?;
    Ok(encode(canonical))
}

/// Decode base64url and parse the result as JSON.
pub fn decode_json<T: DeserializeOwned>(input: &str) -> Result<T, EncodingError> {
    let bytes = decode(input)?;
    Ok(serde_json::from_slice(&bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn encode_has_no_padding() {
        assert_eq!(encode(b"S1"), "UzE");
        assert_eq!(encode(b""), "");
    }

    #[test]
    fn encode_uses_url_safe_alphabet() {
        let encoded = encode([0xfb, 0xff, 0xfe]);
        assert_eq!(encoded, "-__-");
    }

    #[test]
    fn decode_rejects_padding() {
        assert!(decode("UzE=").is_err());
    }

    #[test]
    fn decode_rejects_standard_alphabet() {
        assert!(decode("+//+").is_err());
    }

    #[test]
    fn decode_inverts_encode() {
        let bytes = decode("WyJTMSIsIm5hbWUiLCJBbGljZSJd").unwrap();
        assert_eq!(bytes, br#"["S1","name","Alice"]"#);
    }

    #[test]
    fn encode_json_is_canonical() {
        let encoded = encode_json(&json!(["S1", "name", "Alice"])).unwrap();
        assert_eq!(encoded, "WyJTMSIsIm5hbWUiLCJBbGljZSJd");
    }

    #[test]
    fn decode_json_parses_value() {
        let value: Value = decode_json("WyJTMSIsImEiXQ").unwrap();
        assert_eq!(value, json!(["S1", "a"]));
    }

    #[test]
    fn decode_json_rejects_non_json() {
        let garbage = encode(b"not json");
        assert!(decode_json::<Value>(&garbage).is_err());
    }
}
