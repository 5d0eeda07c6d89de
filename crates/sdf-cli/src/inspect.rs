//! # Inspect Subcommand
//!
//! Decodes encoded disclosures and recomputes their digests, so a digest in
//! an `_sd` list can be matched to the disclosure that produced it.

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use serde_json::Value;

use sdf_core::{hash_disclosure, Disclosure};
use sdf_crypto::HashAlgorithm;

use crate::block_on;

/// Arguments for the inspect subcommand.
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Encoded disclosures (base64url).
    #[arg(required = true)]
    pub encoded: Vec<String>,

    /// Hash algorithm used to recompute digests.
    #[arg(long, default_value = "sha-256")]
    pub hash: HashAlgorithm,
}

/// One decoded disclosure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InspectedDisclosure {
    /// The disclosure salt.
    pub salt: String,
    /// The member name, absent for array elements.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// The concealed value.
    pub value: Value,
    /// Digest recomputed with the selected hash algorithm.
    pub digest: String,
}

/// Execute the inspect subcommand.
pub fn run_inspect(args: &InspectArgs) -> Result<u8> {
    for inspected in inspect_all(args)? {
        let line = serde_json::to_string(&inspected).context("failed to render disclosure")?;
        println!("{line}");
    }
    Ok(0)
}

fn inspect_all(args: &InspectArgs) -> Result<Vec<InspectedDisclosure>> {
    let hasher = args.hash.hasher();
    let mut out = Vec::with_capacity(args.encoded.len());
    for encoded in &args.encoded {
        let disclosure = Disclosure::decode(encoded)
            .with_context(|| format!("failed to decode disclosure {encoded}"))?;
        let digest = block_on(hash_disclosure(&disclosure, &hasher))?
            .with_context(|| format!("failed to hash disclosure {encoded}"))?;
        out.push(InspectedDisclosure {
            salt: disclosure.salt().to_string(),
            key: disclosure.key().map(str::to_string),
            value: disclosure.value().clone(),
            digest: digest.into_string(),
        });
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn args(encoded: &[&str]) -> InspectArgs {
        InspectArgs {
            encoded: encoded.iter().map(|s| s.to_string()).collect(),
            hash: HashAlgorithm::Sha256,
        }
    }

    #[test]
    fn inspect_field_disclosure() {
        let out = inspect_all(&args(&["WyJTMSIsIm5hbWUiLCJBbGljZSJd"])).unwrap();
        assert_eq!(
            out,
            vec![InspectedDisclosure {
                salt: "S1".into(),
                key: Some("name".into()),
                value: json!("Alice"),
                digest: "f6AVds_WbQ30oympKOSisVqwPgDZNI9V5dkHsEfSqoY".into(),
            }]
        );
    }

    #[test]
    fn inspect_element_disclosure() {
        let out = inspect_all(&args(&["WyJzYWx0IiwiREUiXQ"])).unwrap();
        assert_eq!(out[0].key, None);
        assert_eq!(out[0].value, json!("DE"));
        assert_eq!(out[0].digest, "WgBMWWJhydDPNWm7GZphlk_GkdROFWzOF929amowudc");

        let rendered = serde_json::to_value(&out[0]).unwrap();
        assert!(rendered.get("key").is_none());
    }

    #[test]
    fn garbage_is_rejected() {
        let err = inspect_all(&args(&["!!not-base64!!"])).unwrap_err();
        assert!(format!("{err:#}").contains("failed to decode disclosure"));
    }
}
