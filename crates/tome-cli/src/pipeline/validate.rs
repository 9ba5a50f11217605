//! Content checks run over every document before a batch build writes anything.

use std::path::PathBuf;
use tome_mdx::ParsedDocument;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Error,
    Warning,
}

impl Severity {
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        }
    }
}

/// A problem found in one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// Repository path of the document
    pub file: PathBuf,
    pub message: String,
    pub severity: Severity,
}

impl ValidationIssue {
    pub fn error(file: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            message: message.into(),
            severity: Severity::Error,
        }
    }

    pub fn warning(file: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            message: message.into(),
            severity: Severity::Warning,
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// Check every document for missing required fields and empty bodies.
pub fn validate(documents: &[ParsedDocument]) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    for doc in documents {
        let meta = &doc.meta;
        let file = PathBuf::from(&meta.path);

        if meta.id.trim().is_empty() {
            issues.push(ValidationIssue::error(&file, "Missing required field: id"));
        }
        if meta.title.trim().is_empty() {
            issues.push(ValidationIssue::error(&file, "Missing required field: title"));
        }
        if meta.menu.iter().all(|segment| segment.trim().is_empty()) {
            issues.push(ValidationIssue::error(&file, "Missing or empty menu"));
        }
        if doc.mdx.trim().is_empty() {
            issues.push(ValidationIssue::error(&file, "Document body is empty"));
        }

        if meta.description.as_deref().is_none_or(|d| d.trim().is_empty()) {
            issues.push(ValidationIssue::warning(&file, "Missing description"));
        }
        if meta.tags.as_ref().is_none_or(|tags| tags.is_empty()) {
            issues.push(ValidationIssue::warning(&file, "Missing tags"));
        }
    }

    issues
}

/// Number of error-severity issues.
pub fn error_count(issues: &[ValidationIssue]) -> usize {
    issues.iter().filter(|issue| issue.is_error()).count()
}
