//! Errors raised while reading MDX documents.
//!
//! Errors carry a suggestion the author can act on where one applies. The
//! caller knows which file it was reading and reports that alongside.

use std::fmt;

/// Result alias for MDX document operations.
pub type Result<T> = std::result::Result<T, MdxError>;

/// MDX processing error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MdxError {
    /// The error message
    pub message: String,
    /// Helpful suggestion to fix the error
    pub suggestion: Option<String>,
}

impl MdxError {
    /// Create a new MDX error
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            suggestion: None,
        }
    }

    /// Add a suggestion
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// The markdown parser rejected the document.
    pub fn parse_error(message: impl fmt::Display) -> Self {
        Self::new(format!("Failed to parse MDX: {}", message))
            .with_suggestion("Check your MDX syntax. Ensure all JSX tags are properly closed and expressions are valid.")
    }

    /// The frontmatter block is not valid YAML or TOML, or has the wrong shape.
    pub fn frontmatter_error(format: &str, message: impl fmt::Display) -> Self {
        Self::new(format!("Invalid {} frontmatter: {}", format, message)).with_suggestion(
            "Frontmatter fields are id, title, description, order, menu, tags, documentState, documentAudiences and figmaLink.",
        )
    }

    /// More than one frontmatter block was found.
    pub fn duplicate_frontmatter() -> Self {
        Self::new("Multiple frontmatter blocks found")
            .with_suggestion("Only one frontmatter block is allowed per MDX file.")
    }
}

impl fmt::Display for MdxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        match &self.suggestion {
            Some(suggestion) => write!(f, "\nSuggestion: {}", suggestion),
            None => Ok(()),
        }
    }
}

impl std::error::Error for MdxError {}
