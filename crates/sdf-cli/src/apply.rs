//! # Apply Subcommand
//!
//! Reads a payload and a disclosure frame from disk, applies the frame with
//! fresh random salts, and writes the redacted payload together with the
//! encoded disclosures.
//!
//! ## Output
//!
//! ```json
//! { "payload": { "age": 30, "_sd": ["..."] }, "disclosures": ["WyJ..."] }
//! ```
//!
//! The disclosures are in discovery order; a holder presents a subset of them
//! alongside the signed payload.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use sdf_crypto::{HashAlgorithm, RandomSaltGenerator, DEFAULT_SALT_LEN};
use sdf_frame::apply_disclosure_frame_value;

use crate::{block_on, load_document};

/// Arguments for the apply subcommand.
#[derive(Args, Debug)]
pub struct ApplyArgs {
    /// Payload to redact (JSON or YAML object).
    #[arg(long)]
    pub payload: PathBuf,

    /// Disclosure frame (JSON or YAML).
    #[arg(long)]
    pub frame: PathBuf,

    /// Hash algorithm for digests and decoys.
    #[arg(long, default_value = "sha-256")]
    pub hash: HashAlgorithm,

    /// Salt length in bytes (at least 16).
    #[arg(long, default_value_t = DEFAULT_SALT_LEN)]
    pub salt_len: usize,

    /// Record the hash algorithm in a top-level `_sd_alg` member.
    #[arg(long)]
    pub sd_alg: bool,

    /// Write the result here instead of stdout.
    #[arg(long)]
    pub out: Option<PathBuf>,
}

/// The document written by `sdf apply`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplyOutput {
    /// The redacted payload.
    pub payload: Map<String, Value>,
    /// Encoded disclosures in discovery order.
    pub disclosures: Vec<String>,
}

/// Execute the apply subcommand.
pub fn run_apply(args: &ApplyArgs) -> Result<u8> {
    let output = apply_files(args)?;
    let rendered =
        serde_json::to_string_pretty(&output).context("failed to serialize apply output")?;

    match &args.out {
        Some(path) => {
            write_output(path, &rendered)?;
            tracing::info!(
                out = %path.display(),
                disclosures = output.disclosures.len(),
                "wrote redacted payload"
            );
        }
        None => println!("{rendered}"),
    }
    Ok(0)
}

/// Load the inputs named by `args` and apply the frame.
pub fn apply_files(args: &ApplyArgs) -> Result<ApplyOutput> {
    let payload = load_document(&args.payload)?;
    let frame = load_document(&args.frame)?;
    let salts = RandomSaltGenerator::with_len(args.salt_len)?;
    let hasher = args.hash.hasher();

    tracing::debug!(
        payload = %args.payload.display(),
        frame = %args.frame.display(),
        algorithm = %args.hash,
        "applying disclosure frame"
    );

    let mut disclosed = block_on(apply_disclosure_frame_value(
        &salts, &hasher, payload, &frame,
    ))?
    .with_context(|| {
        format!(
            "failed to apply {} to {}",
            args.frame.display(),
            args.payload.display()
        )
    })?;

    if args.sd_alg {
        disclosed.insert_sd_alg(args.hash.as_str());
    }

    let disclosures = disclosed
        .encoded_disclosures()
        .context("failed to encode disclosures")?;
    Ok(ApplyOutput {
        payload: disclosed.payload,
        disclosures,
    })
}

fn write_output(path: &Path, rendered: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory: {}", parent.display()))?;
    }
    std::fs::write(path, format!("{rendered}\n"))
        .with_context(|| format!("failed to write {}", path.display()))
}
