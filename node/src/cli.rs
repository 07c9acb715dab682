//! # CLI Interface
//!
//! Defines the command-line argument structure for `chainlog` using `clap`
//! derive. Four subcommands: `demo`, `simulate`, `verify`, and `version`.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::logging::{LogFormat, DEFAULT_FILTER};

/// Tamper-evident, hash-linked record log.
///
/// Builds chains in memory, prints them as JSON, and checks exported chains
/// for tampering.
#[derive(Parser, Debug)]
#[command(
    name = "chainlog",
    about = "Tamper-evident, hash-linked record log",
    version,
    propagate_version = true
)]
pub struct ChainlogCli {
    #[command(flatten)]
    pub logging: LoggingArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Logging options shared by every subcommand.
#[derive(Args, Debug)]
pub struct LoggingArgs {
    /// Log output format. Logs always go to stderr.
    #[arg(
        long,
        global = true,
        value_enum,
        env = "CHAINLOG_LOG_FORMAT",
        default_value_t = LogFormat::Pretty,
        ignore_case = true
    )]
    pub log_format: LogFormat,

    /// Log filter directives. `RUST_LOG` overrides this when set.
    #[arg(long, global = true, env = "CHAINLOG_LOG", default_value = DEFAULT_FILTER)]
    pub log_level: String,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the two-transfer reference chain, show it, then tamper with it.
    Demo(DemoArgs),
    /// Append a number of records stamped with the current time.
    Simulate(SimulateArgs),
    /// Verify an exported chain read from a file or stdin.
    ///
    /// Exits with status 1 when the chain has been tampered with.
    Verify(VerifyArgs),
    /// Print version information and exit.
    Version,
}

/// Arguments for the `demo` subcommand.
#[derive(Args, Debug)]
pub struct DemoArgs {
    /// Stop after the honest appends; skip the tampering step.
    #[arg(long)]
    pub no_tamper: bool,
}

/// Arguments for the `simulate` subcommand.
#[derive(Args, Debug)]
pub struct SimulateArgs {
    /// How many records to append after genesis.
    #[arg(long, short = 'n', default_value_t = 5)]
    pub records: u64,

    /// Print the export as compact JSON instead of indented.
    #[arg(long)]
    pub compact: bool,
}

/// Arguments for the `verify` subcommand.
#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Path to an exported chain. Reads stdin when omitted or `-`.
    pub input: Option<PathBuf>,
}
