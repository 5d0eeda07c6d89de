//! # sdf CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use sdf_cli::apply::{run_apply, ApplyArgs};
use sdf_cli::decoys::{run_decoys, DecoysArgs};
use sdf_cli::inspect::{run_inspect, InspectArgs};

/// Selective disclosure frames for SD-JWT style payloads.
///
/// Conceals payload members and array elements behind salted digests,
/// mixes in decoys, and inspects the resulting disclosures.
#[derive(Parser, Debug)]
#[command(name = "sdf", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Apply a disclosure frame to a payload.
    Apply(ApplyArgs),

    /// Generate decoy digests.
    Decoys(DecoysArgs),

    /// Decode encoded disclosures and recompute their digests.
    Inspect(InspectArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "sdf starting");

    let result = match cli.command {
        Commands::Apply(args) => run_apply(&args),
        Commands::Decoys(args) => run_decoys(&args),
        Commands::Inspect(args) => run_inspect(&args),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
