// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! CLI entry point for `grasp`.

// The CLI is expected to print to stdout.
#![allow(clippy::print_stdout)]

use anyhow::Result;
use grasp_cli::entrypoint;

fn main() -> Result<()> {
    let out = entrypoint()?;
    print!("{out}");
    Ok(())
}
