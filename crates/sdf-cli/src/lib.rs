//! # sdf-cli — CLI Tool for Disclosure Frames
//!
//! Provides the `sdf` command-line interface over `sdf-frame`.
//!
//! ## Subcommands
//!
//! - `sdf apply`: Apply a frame to a payload and emit the redacted payload
//!   with its encoded disclosures.
//! - `sdf decoys`: Generate standalone decoy digests.
//! - `sdf inspect`: Decode encoded disclosures and recompute their digests.
//!
//! ```bash
//! sdf apply --payload claims.json --frame frame.yaml --sd-alg
//! sdf decoys --count 3 --hash sha-384
//! sdf inspect WyJTMSIsIm5hbWUiLCJBbGljZSJd
//! ```

pub mod apply;
pub mod decoys;
pub mod inspect;

use std::future::Future;
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;

/// Load a JSON or YAML document, chosen by file extension.
///
/// `.yaml` and `.yml` are read as YAML, everything else as JSON.
pub fn load_document(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let is_yaml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));

    if is_yaml {
        serde_yaml::from_str(&content)
            .with_context(|| format!("failed to parse YAML: {}", path.display()))
    } else {
        serde_json::from_str(&content)
            .with_context(|| format!("failed to parse JSON: {}", path.display()))
    }
}

/// Drive a future from the async core to completion on a current-thread runtime.
pub fn block_on<F: Future>(future: F) -> Result<F::Output> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;
    Ok(runtime.block_on(future))
}
