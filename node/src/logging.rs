//! # Logging
//!
//! One `tracing` subscriber for the whole `chainlog` process, writing to
//! stderr. Stdout carries chain exports and verification verdicts and must
//! stay clean enough to pipe into `chainlog verify`.
//!
//! ## Filter precedence
//!
//! 1. `RUST_LOG`, when set and parseable.
//! 2. `--log-level` / `CHAINLOG_LOG`.
//! 3. [`DEFAULT_FILTER`]: `info` for the library and this binary, nothing
//!    from dependencies.
//!
//! Record-level events (`record appended`) sit at `debug`, so
//! `CHAINLOG_LOG=chainlog=debug` shows every append. Integrity failures are
//! `warn` and show by default.

use clap::ValueEnum;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when neither `RUST_LOG` nor `CHAINLOG_LOG` is set.
pub const DEFAULT_FILTER: &str = "chainlog=info,chainlog_node=info";

/// Shape of the lines written to stderr, picked by `--log-format` or
/// `CHAINLOG_LOG_FORMAT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Colored, with file and line. For a terminal.
    Pretty,
    /// One JSON object per event, for log shippers.
    Json,
}

/// Install the global subscriber. Call once, first thing in `main()`.
///
/// `filter` is the `CHAINLOG_LOG` directive string; `RUST_LOG` still wins
/// over it when present.
pub fn init_logging(filter: &str, format: LogFormat) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match format {
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_file(true)
                        .with_line_number(true),
                )
                .init();
        }
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    fmt::layer()
                        .json()
                        .with_writer(std::io::stderr)
                        .with_target(true),
                )
                .init();
        }
    }

    tracing::debug!(?format, filter, "logging initialized");
}
