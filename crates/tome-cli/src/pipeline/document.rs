//! MDX document parsing: frontmatter, repository metadata, TOC and schema validation.

use std::path::Path;
use std::sync::Arc;
use tome_mdx::{DEFAULT_ORDER, DocumentMeta, ParsedDocument, route_from_menu, split_frontmatter};

use crate::error::BuildError;
use crate::pipeline::workspace::repository_path;
use crate::pipeline::{ContentCache, DirtyFlag, TocExtractor, WorkspaceLocator};

/// Result of parsing one document.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseOutcome {
    /// New or changed document, stored in the content cache.
    Parsed(ParsedDocument),
    /// Identical to the cached result; nothing was stored or validated.
    Unchanged(ParsedDocument),
    /// Schema validation failed; the cache keeps the last good result.
    Invalid {
        document: ParsedDocument,
        errors: Vec<String>,
    },
    /// The source could not be read and was evicted. Carries the last result.
    Removed(Option<ParsedDocument>),
}

pub struct DocumentParser {
    cache: Arc<ContentCache>,
    toc: TocExtractor,
    workspace: WorkspaceLocator,
    validator: jsonschema::Validator,
    dirty: DirtyFlag,
}

impl DocumentParser {
    /// Create a parser storing results in `cache` and marking `dirty` on change.
    ///
    /// # Errors
    ///
    /// Returns `BuildError::Schema` if the document schema does not compile.
    pub fn new(cache: Arc<ContentCache>, dirty: DirtyFlag) -> Result<Self, BuildError> {
        let schema = ParsedDocument::json_schema();
        let validator = jsonschema::validator_for(&schema).map_err(|e| BuildError::Schema {
            name: "ParsedDocument".to_string(),
            message: e.to_string(),
        })?;

        Ok(Self {
            toc: TocExtractor::new(cache.clone()),
            workspace: WorkspaceLocator::new(),
            cache,
            validator,
            dirty,
        })
    }

    pub fn toc(&self) -> &TocExtractor {
        &self.toc
    }

    /// Parse the document at `path`.
    ///
    /// # Errors
    ///
    /// Malformed frontmatter and documents outside any monorepo are errors
    /// scoped to this file; the cache is left untouched.
    pub async fn parse_document(&self, path: &Path) -> Result<ParseOutcome, BuildError> {
        let content = match self.cache.get_content(path).await {
            Ok(content) => content,
            Err(e) => {
                tracing::debug!("Evicting {}: {}", path.display(), e);
                let previous = self.cache.remove(path);
                self.dirty.mark();
                return Ok(ParseOutcome::Removed(previous));
            }
        };

        let split = split_frontmatter(&content).map_err(|e| BuildError::DocumentParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let root = self
            .workspace
            .monorepo_root(path)
            .await
            .ok_or_else(|| BuildError::WorkspaceRootNotFound(path.to_path_buf()))?;
        let package_name = self.workspace.package_name(path, &root).await;
        let toc = self.toc.get_toc(path).await;

        let frontmatter = split.frontmatter;
        let menu = frontmatter.menu.unwrap_or_default();
        let document = ParsedDocument {
            meta: DocumentMeta {
                id: frontmatter.id.unwrap_or_default(),
                title: frontmatter.title.unwrap_or_default(),
                description: frontmatter.description,
                order: frontmatter.order.unwrap_or(DEFAULT_ORDER),
                route: route_from_menu(&menu),
                menu,
                tags: frontmatter.tags,
                document_state: frontmatter.document_state,
                document_audiences: frontmatter.document_audiences,
                figma_link: frontmatter.figma_link,
                path: repository_path(path, &root),
                package_name,
                toc: toc.as_ref().clone(),
            },
            mdx: split.body,
        };

        let instance = serde_json::to_value(&document).map_err(|e| BuildError::DocumentParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let previous = self
            .cache
            .get_result(path)
            .and_then(|doc| serde_json::to_value(doc).ok());
        if previous.as_ref() == Some(&instance) {
            tracing::debug!("{} unchanged", document.meta.path);
            return Ok(ParseOutcome::Unchanged(document));
        }

        let errors: Vec<String> = self
            .validator
            .iter_errors(&instance)
            .map(|e| e.to_string())
            .collect();
        if !errors.is_empty() {
            for error in &errors {
                tracing::warn!("{}: {}", document.meta.path, error);
            }
            return Ok(ParseOutcome::Invalid { document, errors });
        }

        self.cache.update(path, document.clone());
        self.dirty.mark();
        tracing::debug!("Parsed {} -> /{}", document.meta.path, document.meta.route);
        Ok(ParseOutcome::Parsed(document))
    }
}
