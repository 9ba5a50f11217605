use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::cli::validation::parse_debounce;

/// Available tome subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build all documentation artifacts
    ///
    /// Parses every document under the content directory, reusing cached
    /// results for unchanged files, then writes route artifacts, the route
    /// manifest and component type docs.
    Build(BuildArgs),

    /// Build, then rebuild incrementally as files change
    ///
    /// Bursts of edits are coalesced so the aggregate artifacts are written
    /// once per quiet period.
    Watch(WatchArgs),

    /// Print the JSON schema for tome.config.json
    Schema,
}

/// Options shared by every command that touches a project
#[derive(Args, Debug, Default, Clone)]
pub struct ProjectArgs {
    /// Path to the config file
    ///
    /// Defaults to tome.config.json in the project root.
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Project root that relative paths are resolved against
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Output directory for generated artifacts
    #[arg(short = 'd', long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,
}

/// Arguments for the build command
#[derive(Args, Debug)]
pub struct BuildArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Ignore the build cache and parse every document
    #[arg(long)]
    pub skip_cache: bool,
}

/// Arguments for the watch command
#[derive(Args, Debug)]
pub struct WatchArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Quiet period before aggregate artifacts are written, in milliseconds
    #[arg(long, value_name = "MS", value_parser = parse_debounce)]
    pub debounce_ms: Option<u64>,
}
