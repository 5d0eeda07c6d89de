//! # Decoys Subcommand
//!
//! Prints standalone decoy digests, one per line. Useful for padding `_sd`
//! lists produced by other tooling.

use anyhow::{Context, Result};
use clap::Args;

use sdf_core::Digest;
use sdf_crypto::{HashAlgorithm, RandomSaltGenerator};
use sdf_frame::{create_decoys, DecoyCount};

use crate::block_on;

/// Arguments for the decoys subcommand.
#[derive(Args, Debug)]
pub struct DecoysArgs {
    /// Number of decoy digests to generate (at most 10000).
    #[arg(long)]
    pub count: usize,

    /// Hash algorithm for the digests.
    #[arg(long, default_value = "sha-256")]
    pub hash: HashAlgorithm,
}

/// Execute the decoys subcommand.
pub fn run_decoys(args: &DecoysArgs) -> Result<u8> {
    for decoy in generate(args)? {
        println!("{decoy}");
    }
    Ok(0)
}

fn generate(args: &DecoysArgs) -> Result<Vec<Digest>> {
    let salts = RandomSaltGenerator::new();
    let hasher = args.hash.hasher();
    let count = DecoyCount::bounded(args.count)?;
    let decoys = block_on(create_decoys(count, &salts, &hasher))?
        .context("failed to generate decoys")?;
    tracing::info!(count = decoys.len(), algorithm = %args.hash, "generated decoys");
    Ok(decoys)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generates_requested_count() {
        let args = DecoysArgs {
            count: 5,
            hash: HashAlgorithm::Sha256,
        };
        let decoys = generate(&args).unwrap();
        assert_eq!(decoys.len(), 5);
        assert!(decoys.iter().all(|d| d.as_str().len() == 43));
    }

    #[test]
    fn digest_width_follows_algorithm() {
        let args = DecoysArgs {
            count: 2,
            hash: HashAlgorithm::Sha384,
        };
        let decoys = generate(&args).unwrap();
        assert!(decoys.iter().all(|d| d.as_str().len() == 64));
    }

    #[test]
    fn count_above_maximum_is_an_error() {
        let args = DecoysArgs {
            count: usize::MAX,
            hash: HashAlgorithm::Sha256,
        };
        let err = generate(&args).unwrap_err();
        assert!(format!("{err:#}").contains("exceeds the maximum"));
        assert!(run_decoys(&args).is_err());
    }

    #[test]
    fn zero_count_prints_nothing() {
        let args = DecoysArgs {
            count: 0,
            hash: HashAlgorithm::Sha256,
        };
        assert!(generate(&args).unwrap().is_empty());
        assert_eq!(run_decoys(&args).unwrap(), 0);
    }
}
