//! Frontmatter data structures

use serde::{Deserialize, Serialize};

/// Format of the frontmatter block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrontmatterFormat {
    /// YAML format (---)
    Yaml,
    /// TOML format (+++)
    Toml,
}

impl FrontmatterFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            FrontmatterFormat::Yaml => "YAML",
            FrontmatterFormat::Toml => "TOML",
        }
    }
}

/// Authored document metadata.
///
/// Every field is optional at this stage; required fields are enforced later
/// by schema validation so that a missing `id` is reported against the file
/// instead of failing the parse.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Frontmatter {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub order: Option<u32>,
    #[serde(default)]
    pub menu: Option<Vec<String>>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub document_state: Option<String>,
    #[serde(default)]
    pub document_audiences: Option<Vec<String>>,
    #[serde(default)]
    pub figma_link: Option<String>,
}

/// A document split into its metadata and body.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitDocument {
    /// Parsed frontmatter, or defaults when the document has none
    pub frontmatter: Frontmatter,
    /// Format of the frontmatter block, if one was present
    pub format: Option<FrontmatterFormat>,
    /// Document body with the frontmatter block removed
    pub body: String,
}
