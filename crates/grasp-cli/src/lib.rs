// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Grasp developer CLI.
//!
//! ```text
//! grasp replay <trace.json> [--config <file>] [--transformer free|follow] [--format table|jsonl]
//! grasp config show [--key <name>]
//! grasp config init [--key <name>] [--force]
//! ```
//!
//! `--config-dir <dir>` overrides where stored profiles live. Logs go to
//! stderr and honour `RUST_LOG` (default `warn`).
#![forbid(unsafe_code)]

pub mod cli;
pub mod report;
pub mod trace;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Installs the stderr log subscriber. `RUST_LOG` wins over the `warn` default.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    // A subscriber may already be installed by an embedding host.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Parses `std::env::args`, runs the command, and returns its stdout text.
pub fn entrypoint() -> Result<String> {
    init_logging();
    cli::run(cli::Cli::parse())
}
