//! Command-line interface definition for tome.
//!
//! # Command Structure
//!
//! - `tome build` - One-shot incremental build of every document
//! - `tome watch` - Initial build followed by watch mode
//! - `tome schema` - Print the JSON schema for `tome.config.json`

mod commands;
pub mod validation;

use clap::Parser;

pub use commands::{BuildArgs, Command, ProjectArgs, WatchArgs};
pub use validation::parse_debounce;

/// tome - documentation build pipeline for design system monorepos
#[derive(Parser, Debug)]
#[command(
    name = "tome",
    version,
    about = "Incremental documentation builds for design system monorepos",
    long_about = "tome turns a directory of MDX documents and a component package's TypeScript\n\
                  prop types into route manifests, per-route JSON artifacts and component\n\
                  type documentation. Unchanged documents are reused between builds."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}
