// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Argument parsing and command dispatch.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use grasp_app_core::config::ConfigService;
use grasp_app_core::profile::{
    load_profile, save_profile, TransformerKind, TransformerProfile, DEFAULT_PROFILE_KEY,
};
use grasp_config_fs::FsConfigStore;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::report::{render_jsonl, render_table};
use crate::trace::{replay, GrabTrace};

/// Command-line interface for the `grasp` binary.
#[derive(Parser, Debug)]
#[command(name = "grasp", version, about = "Replay grab traces and manage transformer profiles")]
pub struct Cli {
    /// Directory holding stored profiles (defaults to the platform config dir).
    #[arg(long, global = true, value_name = "DIR")]
    pub config_dir: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Replay a recorded trace and print the object transform per frame
    Replay {
        /// Path to the trace JSON
        trace: PathBuf,
        /// Profile JSON file to use instead of the stored profile
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
        /// Stored profile key (ignored with --config)
        #[arg(long, default_value = DEFAULT_PROFILE_KEY)]
        key: String,
        /// Override the profile's transformer
        #[arg(long, value_enum)]
        transformer: Option<TransformerArg>,
        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Table)]
        format: Format,
    },
    /// Inspect or create stored profiles
    Config {
        /// Config action.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// `grasp config` actions.
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the stored profile (or the default if none is stored)
    Show {
        /// Profile key
        #[arg(long, default_value = DEFAULT_PROFILE_KEY)]
        key: String,
    },
    /// Write the default profile
    Init {
        /// Profile key
        #[arg(long, default_value = DEFAULT_PROFILE_KEY)]
        key: String,
        /// Overwrite an existing profile
        #[arg(long)]
        force: bool,
    },
}

/// Transformer selection on the command line.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransformerArg {
    /// Multi-point translate/rotate/scale
    Free,
    /// Single-point translate-only follow
    Follow,
}

impl From<TransformerArg> for TransformerKind {
    fn from(arg: TransformerArg) -> Self {
        match arg {
            TransformerArg::Free => Self::Free,
            TransformerArg::Follow => Self::Follow,
        }
    }
}

/// Replay output format.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    /// Human-readable table
    Table,
    /// One JSON object per line
    Jsonl,
}

fn store_for(config_dir: Option<&Path>) -> Result<FsConfigStore> {
    match config_dir {
        Some(dir) => Ok(FsConfigStore::with_root(dir)),
        None => FsConfigStore::new().context("resolving config directory"),
    }
}

fn read_profile_file(path: &Path) -> Result<TransformerProfile> {
    let bytes =
        std::fs::read(path).with_context(|| format!("failed to read config {}", path.display()))?;
    serde_json::from_slice(&bytes)
        .with_context(|| format!("failed to parse config {}", path.display()))
}

/// Stored profile, or defaults when nothing is stored or no config dir exists.
///
/// A stored profile that cannot be read or parsed is an error.
fn stored_profile_or_default(config_dir: Option<&Path>, key: &str) -> Result<TransformerProfile> {
    let store = match store_for(config_dir) {
        Ok(store) => store,
        Err(err) => {
            warn!(key, error = %err, "no config directory; using default profile");
            return Ok(TransformerProfile::default());
        }
    };
    load_profile(&ConfigService::new(store), key)
        .with_context(|| format!("failed to load stored profile {key:?}"))
}

/// Runs the parsed command and returns what should go to stdout.
pub fn run(cli: Cli) -> Result<String> {
    let config_dir = cli.config_dir.as_deref();
    match cli.command {
        Command::Replay {
            trace,
            config,
            key,
            transformer,
            format,
        } => {
            let mut profile = match config {
                Some(path) => read_profile_file(&path)?,
                None => stored_profile_or_default(config_dir, &key)?,
            };
            if let Some(kind) = transformer {
                profile.kind = kind.into();
            }
            let trace = GrabTrace::load(&trace)?;
            info!(kind = ?profile.kind, frames = trace.frames.len(), "replaying trace");
            let steps = replay(&trace, profile.build())?;
            match format {
                Format::Table => Ok(render_table(&steps) + "\n"),
                Format::Jsonl => render_jsonl(&steps),
            }
        }
        Command::Config { action } => {
            let service = ConfigService::new(store_for(config_dir)?);
            match action {
                ConfigAction::Show { key } => {
                    let profile = load_profile(&service, &key)?;
                    Ok(serde_json::to_string_pretty(&profile)? + "\n")
                }
                ConfigAction::Init { key, force } => {
                    let path = service.store().path_for(&key)?;
                    if path.exists() && !force {
                        bail!(
                            "{} already exists (use --force to overwrite)",
                            path.display()
                        );
                    }
                    save_profile(&service, &key, &TransformerProfile::default())?;
                    Ok(format!("wrote {}\n", path.display()))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn replay_flags_parse() {
        let cli = Cli::try_parse_from([
            "grasp",
            "replay",
            "t.json",
            "--transformer",
            "follow",
            "--format",
            "jsonl",
        ])
        .unwrap();
        match cli.command {
            Command::Replay {
                transformer,
                format,
                key,
                ..
            } => {
                assert_eq!(transformer, Some(TransformerArg::Follow));
                assert_eq!(format, Format::Jsonl);
                assert_eq!(key, DEFAULT_PROFILE_KEY);
            }
            Command::Config { .. } => unreachable!("parsed as config"),
        }
    }

    #[test]
    fn replay_rejects_a_corrupt_stored_profile() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("transformer.json"), "{ not json").unwrap();
        let cli = Cli::try_parse_from(["grasp", "replay", "unused.json"]).unwrap();
        let cli = Cli {
            config_dir: Some(dir.path().to_path_buf()),
            ..cli
        };
        let err = run(cli).unwrap_err();
        assert!(
            format!("{err:#}").contains("failed to load stored profile"),
            "{err:#}"
        );
    }

    #[test]
    fn replay_uses_defaults_when_nothing_is_stored() {
        let dir = tempfile::tempdir().unwrap();
        let profile = stored_profile_or_default(Some(dir.path()), DEFAULT_PROFILE_KEY).unwrap();
        assert_eq!(profile, TransformerProfile::default());
    }
}
