// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # chainlog CLI
//!
//! Entry point for the `chainlog` binary. Parses CLI arguments, initializes
//! logging, and runs one subcommand:
//!
//! - `demo`     - build the reference chain, then show tampering being caught
//! - `simulate` - append N wall-clock-stamped records and print the export
//! - `verify`   - check an exported chain; exit status 1 when tampered
//! - `version`  - print build version information

mod cli;
mod logging;

use std::io::Read;
use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::json;

use chainlog::config::{DIGEST_ALGORITHM, PROTOCOL_VERSION};
use chainlog::storage::{Chain, Timestamp};

use cli::{ChainlogCli, Commands};

fn main() -> Result<ExitCode> {
    let cli = ChainlogCli::parse();

    logging::init_logging(&cli.logging.log_level, cli.logging.log_format);

    match cli.command {
        Commands::Demo(args) => run_demo(args),
        Commands::Simulate(args) => run_simulate(args),
        Commands::Verify(args) => run_verify(args),
        Commands::Version => {
            print_version();
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// The reference walkthrough: two honest transfers, then a covered-up edit.
fn run_demo(args: cli::DemoArgs) -> Result<ExitCode> {
    let mut chain = reference_chain();

    println!("{}", chain.to_json_pretty()?);
    println!("Is chain valid? {}", chain.validate());

    if args.no_tamper {
        return Ok(ExitCode::SUCCESS);
    }

    let original = chain
        .get(1)
        .cloned()
        .context("reference chain is missing record 1")?;
    let forged = original.with_payload(json!({"amount": 100})).reseal();
    tracing::info!(digest = %forged.digest(), "rewriting record 1 and resealing it");
    chain.replace(1, forged)?;

    println!("Is chain valid after tampering? {}", chain.validate());
    if let Err(fault) = chain.verify() {
        println!("  {}", fault);
    }
    Ok(ExitCode::SUCCESS)
}

fn run_simulate(args: cli::SimulateArgs) -> Result<ExitCode> {
    let mut chain = Chain::new();
    for i in 1..=args.records {
        chain.append(i, Timestamp::now(), json!({ "amount": i }));
    }
    tracing::info!(records = chain.len(), tip = %chain.tip().digest(), "simulation complete");

    let export = if args.compact {
        chain.to_json()?
    } else {
        chain.to_json_pretty()?
    };
    println!("{}", export);
    println!("Is chain valid? {}", chain.validate());
    Ok(ExitCode::SUCCESS)
}

fn run_verify(args: cli::VerifyArgs) -> Result<ExitCode> {
    let raw = read_export(args.input.as_deref())?;
    let (intact, report) = verify_export(&raw)?;
    println!("{}", report);
    Ok(if intact {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}

/// Import an export and describe its integrity. `true` means intact.
fn verify_export(raw: &str) -> Result<(bool, String)> {
    let chain = Chain::from_json(raw).context("input is not a chain export")?;
    Ok(match chain.verify() {
        Ok(()) => (
            true,
            format!("valid ({} records, tip {})", chain.len(), chain.tip().digest()),
        ),
        Err(fault) => (false, format!("tampered: {}", fault)),
    })
}

/// Build the chain used by `demo`.
fn reference_chain() -> Chain {
    let mut chain = Chain::new();
    chain.append(1, "02/10/2024", json!({"amount": 4}));
    chain.append(2, "03/10/2024", json!({"amount": 10}));
    chain
}

/// Read an export from `path`, or from stdin when absent or `-`.
fn read_export(path: Option<&Path>) -> Result<String> {
    match path {
        Some(p) if p != Path::new("-") => std::fs::read_to_string(p)
            .with_context(|| format!("failed to read chain export from {}", p.display())),
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read chain export from stdin")?;
            Ok(buf)
        }
    }
}

/// Prints version information to stdout.
fn print_version() {
    println!("chainlog {}", env!("CARGO_PKG_VERSION"));
    println!("protocol {}", PROTOCOL_VERSION);
    println!("digest   {}", DIGEST_ALGORITHM);
}
