//! Command implementations for the tome CLI.
//!
//! - [`build`] - One-shot incremental build
//! - [`watch`] - Initial build followed by watch mode
//! - [`schema`] - Print the configuration JSON schema
//!
//! Each command provides an `execute` function that takes the parsed command
//! arguments and returns a Result.

pub mod build;
pub mod schema;
pub mod watch;

use crate::config::{ConfigOverrides, ProjectPaths, TomeConfig};
use crate::error::Result;

pub use build::execute as build_execute;
pub use schema::execute as schema_execute;
pub use watch::execute as watch_execute;

/// Load, validate and resolve the project configuration.
pub(crate) fn load_project(overrides: &ConfigOverrides) -> Result<ProjectPaths> {
    let config = TomeConfig::load(overrides)?;
    config.validate()?;
    let paths = config.resolve()?;
    paths.validate()?;
    tracing::debug!("Project root: {}", paths.root.display());
    Ok(paths)
}
