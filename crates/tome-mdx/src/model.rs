//! Document model shared by the parser, the validators and the artifact writers.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Order assigned to documents that do not declare one.
pub const DEFAULT_ORDER: u32 = 999;

fn default_order() -> u32 {
    DEFAULT_ORDER
}

/// One entry in a document's table of contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TocItem {
    /// Plain heading text
    pub text: String,
    /// In-page anchor, e.g. `#usage`
    pub href: String,
    /// Nesting depth, starting at 1 for the outermost listed heading level
    #[schemars(range(min = 1))]
    pub depth: u32,
    /// Zero-based sibling indices along the ancestor chain
    pub numbering: Vec<u32>,
    /// `href` of the enclosing item
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
}

/// Metadata of a parsed document.
///
/// `route` is always derived from `menu` and never authored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DocumentMeta {
    #[serde(default)]
    #[schemars(length(min = 1))]
    pub id: String,
    #[serde(default)]
    #[schemars(length(min = 1))]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default = "default_order")]
    pub order: u32,
    #[serde(default)]
    #[schemars(length(min = 1))]
    pub menu: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_audiences: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub figma_link: Option<String>,
    /// Repository-relative path of the source file, `/`-separated
    pub path: String,
    pub package_name: String,
    pub route: String,
    #[serde(default)]
    pub toc: Vec<TocItem>,
}

/// A document after parsing: metadata plus the raw MDX body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ParsedDocument {
    pub meta: DocumentMeta,
    pub mdx: String,
}

impl ParsedDocument {
    /// JSON Schema every stored document must satisfy.
    pub fn json_schema() -> serde_json::Value {
        let schema = schemars::schema_for!(ParsedDocument);
        serde_json::to_value(schema).unwrap_or(serde_json::Value::Bool(true))
    }

    /// First menu segment, which names the document's category.
    pub fn category(&self) -> Option<&str> {
        self.meta.menu.first().map(String::as_str)
    }
}
