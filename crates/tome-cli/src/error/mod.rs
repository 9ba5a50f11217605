//! Error handling for the tome CLI.
//!
//! Errors follow the same hierarchy throughout the pipeline:
//! - **Top-level errors** (`CliError`) represent broad categories of failures
//! - **Domain-specific errors** (`ConfigError`, `BuildError`) provide detailed context
//! - **Error conversion** is automatic via `#[from]` attributes
//!
//! Messages end with a `Hint:` line wherever the user can act on the failure.

mod report;

use std::path::PathBuf;
use thiserror::Error;

pub use report::cli_error_to_miette;

/// Top-level CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration-related errors (invalid syntax, missing directories, etc.)
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Build pipeline errors
    #[error("Build error: {0}")]
    Build(#[from] BuildError),

    /// File or directory not found
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// I/O errors from file system operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// File watching errors
    #[error("File watcher error: {0}")]
    Watch(#[from] notify::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with custom messages
    #[error("{0}")]
    Custom(String),
}

/// Configuration-specific errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file given with --config doesn't exist
    #[error("Config file not found: {}\n\nHint: Create a tome.config.json file or check the --config path", .0.display())]
    NotFound(PathBuf),

    /// Missing required configuration field
    #[error("Missing required field: {field}\n\nHint: {hint}")]
    MissingField {
        /// Name of the missing field
        field: String,
        /// Helpful hint for providing the field
        hint: String,
    },

    /// Invalid value for a configuration option
    #[error("Invalid value for '{field}': {value}\n\nHint: {hint}")]
    InvalidValue {
        /// Name of the field with invalid value
        field: String,
        /// The invalid value
        value: String,
        /// Helpful hint for correct values
        hint: String,
    },
}

/// Build pipeline errors.
#[derive(Debug, Error)]
pub enum BuildError {
    /// A document could not be split or its frontmatter could not be read
    #[error("Failed to parse {}: {message}", .path.display())]
    DocumentParse {
        /// Source document
        path: PathBuf,
        /// Parser message
        message: String,
    },

    /// No monorepo root above a document
    #[error("No monorepo root found above {}\n\nHint: Documents must live in a workspace whose root has a package.json with \"workspaces\" or a pnpm-workspace.yaml", .0.display())]
    WorkspaceRootNotFound(PathBuf),

    /// Content validation reported errors
    #[error("Content validation failed with {errors} error(s)\n\nHint: Fix the errors listed above and run the build again")]
    ValidationFailed {
        /// Number of error-severity issues
        errors: usize,
    },

    /// The generated route manifest is not valid
    #[error("Route manifest is invalid:\n{details}\n\nHint: Check for documents whose menus produce the same route")]
    ManifestInvalid {
        /// Formatted validation failures
        details: String,
    },

    /// A JSON schema could not be compiled
    #[error("Invalid schema for {name}: {message}")]
    Schema {
        /// Schema owner
        name: String,
        /// Compiler message
        message: String,
    },

    /// Component type extraction failed
    #[error("Type extraction failed: {0}")]
    TypeExtraction(#[from] tome_docs::DocsError),

    /// Failed to write an output artifact
    #[error("Failed to write {}: {error}\n\nHint: Check output directory permissions", .path.display())]
    ArtifactWrite {
        /// Artifact path
        path: PathBuf,
        /// Underlying error
        error: String,
    },
}

/// Result type alias using `CliError` as the default error type.
pub type Result<T, E = CliError> = std::result::Result<T, E>;

/// Attach a leading message to any error convertible into [`CliError`].
pub trait ResultExt<T> {
    fn context(self, msg: impl std::fmt::Display) -> Result<T>;
}

impl<T, E: Into<CliError>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, msg: impl std::fmt::Display) -> Result<T> {
        self.map_err(|e| {
            let err: CliError = e.into();
            CliError::Custom(format!("{}: {}", msg, err))
        })
    }
}
