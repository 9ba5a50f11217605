//! JSON artifact writer for the output directory.

use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tome_mdx::ParsedDocument;

use crate::error::BuildError;
use crate::pipeline::manifest::{RouteManifest, chunk_name};

pub const ROUTES_DIR: &str = "routes";
pub const DOCS_FILE: &str = "docs.json";
pub const MANIFEST_FILE: &str = "routes.json";
pub const COMPONENT_TYPES_FILE: &str = "component-types.json";

/// Writes every artifact as pretty-printed JSON through a temp file and rename,
/// so readers never observe a partially written file.
#[derive(Debug, Clone)]
pub struct ArtifactWriter {
    out_dir: PathBuf,
}

impl ArtifactWriter {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
        }
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// `routes/<chunk>.json` for a document.
    pub fn document_path(&self, doc: &ParsedDocument) -> PathBuf {
        self.out_dir
            .join(ROUTES_DIR)
            .join(format!("{}.json", chunk_name(&doc.meta.route)))
    }

    pub async fn write_document(&self, doc: &ParsedDocument) -> Result<PathBuf, BuildError> {
        let path = self.document_path(doc);
        self.write_json(&path, doc).await?;
        Ok(path)
    }

    /// Read back a document artifact. Missing or unreadable artifacts yield `None`.
    pub async fn read_document(&self, path: &Path) -> Option<ParsedDocument> {
        let content = tokio::fs::read_to_string(path).await.ok()?;
        match serde_json::from_str(&content) {
            Ok(doc) => Some(doc),
            Err(e) => {
                tracing::debug!("Discarding unreadable artifact {}: {}", path.display(), e);
                None
            }
        }
    }

    pub async fn remove_document(&self, doc: &ParsedDocument) {
        self.remove_file(&self.document_path(doc)).await;
    }

    /// Remove an artifact, ignoring files that are already gone.
    pub async fn remove_file(&self, path: &Path) {
        match tokio::fs::remove_file(path).await {
            Ok(()) => tracing::debug!("Removed {}", path.display()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!("Failed to remove {}: {}", path.display(), e),
        }
    }

    /// `docs.json`: every document keyed by repository path.
    pub async fn write_aggregate(
        &self,
        documents: &BTreeMap<String, ParsedDocument>,
    ) -> Result<PathBuf, BuildError> {
        let path = self.out_dir.join(DOCS_FILE);
        self.write_json(&path, documents).await?;
        Ok(path)
    }

    pub async fn write_manifest(&self, manifest: &RouteManifest) -> Result<PathBuf, BuildError> {
        let path = self.out_dir.join(MANIFEST_FILE);
        self.write_json(&path, manifest).await?;
        Ok(path)
    }

    /// `component-types.json`, already rendered by the type extractor.
    pub async fn write_component_types(&self, json: &str) -> Result<PathBuf, BuildError> {
        let path = self.out_dir.join(COMPONENT_TYPES_FILE);
        self.write_text(&path, json).await?;
        Ok(path)
    }

    pub async fn write_json<T: Serialize + ?Sized>(
        &self,
        path: &Path,
        value: &T,
    ) -> Result<(), BuildError> {
        let json = serde_json::to_string_pretty(value).map_err(|e| BuildError::ArtifactWrite {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;
        self.write_text(path, &json).await
    }

    async fn write_text(&self, path: &Path, content: &str) -> Result<(), BuildError> {
        let write_error = |error: std::io::Error| BuildError::ArtifactWrite {
            path: path.to_path_buf(),
            error: error.to_string(),
        };

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(write_error)?;
        }
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, content).await.map_err(write_error)?;
        tokio::fs::rename(&tmp, path).await.map_err(write_error)?;
        Ok(())
    }
}
