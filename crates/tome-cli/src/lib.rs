//! tome CLI - incremental documentation build pipeline.
//!
//! Turns a directory of MDX documents and a component package's TypeScript
//! prop types into JSON artifacts for a documentation site.
//!
//! # Architecture
//!
//! - [`cli`] - clap command definitions
//! - [`config`] - layered configuration (`tome.config.json`, `TOME_*`, flags)
//! - [`pipeline`] - caches, parsers, validators and the batch orchestrator
//! - [`dev`] - watch mode: file watcher, debouncer and session loop
//! - [`error`] - error types with actionable messages
//! - [`logger`] - structured logging with tracing
//! - [`ui`] - status lines and build summaries
//!
//! # Example
//!
//! ```rust,no_run
//! use tome_cli::config::{ConfigOverrides, TomeConfig};
//! use tome_cli::pipeline::Pipeline;
//!
//! # async fn run() -> tome_cli::Result<()> {
//! let config = TomeConfig::load(&ConfigOverrides::default())?;
//! let pipeline = Pipeline::new(config.resolve()?)?;
//! let report = pipeline.build(false).await?;
//! println!("{} documents", report.summary.documents);
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod dev;
pub mod error;
pub mod logger;
pub mod pipeline;
pub mod ui;

pub use error::{BuildError, CliError, ConfigError, Result, ResultExt};
