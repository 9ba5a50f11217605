//! Batch build orchestration.
//!
//! Stages run in a fixed order: enumerate, partition by build-cache
//! staleness, parse stale documents concurrently, validate, write route
//! artifacts and the aggregate, write the manifest, extract component types,
//! copy assets, then persist the build cache.

use futures::future::join_all;
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::sync::Arc;
use tome_docs::{TypeExtractor, render_json};
use tome_mdx::ParsedDocument;
use walkdir::WalkDir;

use crate::config::ProjectPaths;
use crate::error::{BuildError, Result};
use crate::pipeline::assets::ASSETS_DIR;
use crate::pipeline::validate::{error_count, validate};
use crate::pipeline::{
    ArtifactWriter, BuildCache, ContentCache, DirtyFlag, DocumentParser, ParseOutcome,
    RouteManifest, ValidationIssue, content_hash, copy_assets,
};

/// Counts reported at the end of a batch build.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildSummary {
    /// Documents in the aggregate output
    pub documents: usize,
    /// Documents parsed this run
    pub parsed: usize,
    /// Documents restored from their artifact via the build cache
    pub reused: usize,
    /// Documents skipped because they could not be read or parsed
    pub skipped: usize,
    /// Skipped documents still served from their last good artifact
    pub kept: usize,
    pub warnings: usize,
    pub components: usize,
    /// Asset files copied this run
    pub assets: usize,
}

/// Outcome of a batch build whose documentation artifacts were written.
#[derive(Debug, Default)]
pub struct BuildReport {
    pub summary: BuildSummary,
    /// Warning-severity validation issues
    pub issues: Vec<ValidationIssue>,
    /// Component type extraction failure; document outputs are still complete
    pub types_error: Option<BuildError>,
}

/// A source document picked up by enumeration.
struct Source {
    path: PathBuf,
    key: String,
    hash: String,
}

/// Owns the caches and stages shared by batch builds and watch sessions.
pub struct Pipeline {
    paths: ProjectPaths,
    cache: Arc<ContentCache>,
    parser: DocumentParser,
    writer: ArtifactWriter,
    dirty: DirtyFlag,
    types: TypeExtractor,
}

impl Pipeline {
    pub fn new(paths: ProjectPaths) -> Result<Self> {
        let cache = Arc::new(ContentCache::new());
        let dirty = DirtyFlag::new();
        let parser = DocumentParser::new(cache.clone(), dirty.clone())?;

        Ok(Self {
            writer: ArtifactWriter::new(paths.out_dir.clone()),
            types: TypeExtractor::default(),
            paths,
            cache,
            parser,
            dirty,
        })
    }

    pub fn paths(&self) -> &ProjectPaths {
        &self.paths
    }

    pub fn cache(&self) -> &Arc<ContentCache> {
        &self.cache
    }

    pub fn parser(&self) -> &DocumentParser {
        &self.parser
    }

    pub fn writer(&self) -> &ArtifactWriter {
        &self.writer
    }

    pub fn dirty(&self) -> &DirtyFlag {
        &self.dirty
    }

    /// Every document under the content directory, in path order.
    pub fn enumerate_documents(&self) -> Vec<PathBuf> {
        let mut documents: Vec<PathBuf> = WalkDir::new(&self.paths.content_dir)
            .follow_links(true)
            .into_iter()
            .filter_entry(|entry| !self.paths.is_ignored(entry.path()))
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    tracing::warn!("Skipping unreadable entry: {}", e);
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file() && self.paths.is_document(entry.path()))
            .map(|entry| entry.into_path())
            .collect();
        documents.sort();
        documents
    }

    /// Run a full batch build.
    ///
    /// # Errors
    ///
    /// Fails on validation errors and on an invalid manifest before any
    /// artifact is written. A type extraction failure is returned in the
    /// report once everything else has been written; asset copying only warns.
    pub async fn build(&self, skip_cache: bool) -> Result<BuildReport> {
        let mut summary = BuildSummary::default();

        let mut build_cache = if skip_cache {
            self.writer.remove_file(&self.paths.cache_file).await;
            BuildCache::new()
        } else {
            BuildCache::load(&self.paths.cache_file).await
        };

        // Partition by staleness
        let mut stale = Vec::new();
        let mut current: HashMap<PathBuf, Source> = HashMap::new();
        for path in self.enumerate_documents() {
            let bytes = match tokio::fs::read(&path).await {
                Ok(bytes) => bytes,
                Err(e) => {
                    tracing::warn!("Skipping {}: {}", path.display(), e);
                    summary.skipped += 1;
                    continue;
                }
            };
            let source = Source {
                key: self.paths.cache_key(&path),
                hash: content_hash(&bytes),
                path,
            };

            if self.restore(&build_cache, &source).await {
                summary.reused += 1;
            } else {
                stale.push(source.path.clone());
            }
            current.insert(source.path.clone(), source);
        }
        tracing::debug!("{} stale, {} reused", stale.len(), summary.reused);

        // Parse
        let outcomes = join_all(stale.iter().map(|path| self.parser.parse_document(path))).await;
        let mut fresh: Vec<PathBuf> = Vec::new();
        let mut invalid: Vec<(ParsedDocument, Vec<String>)> = Vec::new();
        for (path, outcome) in stale.iter().zip(outcomes) {
            match outcome {
                Ok(ParseOutcome::Parsed(_)) | Ok(ParseOutcome::Unchanged(_)) => {
                    summary.parsed += 1;
                    fresh.push(path.clone());
                }
                Ok(ParseOutcome::Invalid { document, errors }) => invalid.push((document, errors)),
                Ok(ParseOutcome::Removed(_)) => {
                    tracing::debug!("{} disappeared during the build", path.display());
                    current.remove(path);
                }
                Err(e) => {
                    tracing::warn!("Skipping {}: {}", path.display(), e);
                    summary.skipped += 1;
                    // The build cache entry keeps its old hash, so the next
                    // build parses the source again
                    let Some(source) = current.get(path) else {
                        continue;
                    };
                    if self.load_artifact(&build_cache, source).await {
                        tracing::warn!("Serving the last good output of {}", source.key);
                        summary.kept += 1;
                    }
                }
            }
        }

        // Validate
        let documents = self.cache.all_results();
        let mut checked: Vec<ParsedDocument> = documents.values().cloned().collect();
        checked.extend(invalid.iter().map(|(doc, _)| doc.clone()));
        let mut issues = validate(&checked);
        for (doc, errors) in &invalid {
            let file = PathBuf::from(&doc.meta.path);
            let reported = issues.iter().any(|i| i.is_error() && i.file == file);
            if !reported {
                issues.extend(errors.iter().map(|e| ValidationIssue::error(&file, e.as_str())));
            }
        }

        let errors = error_count(&issues);
        if errors > 0 {
            crate::ui::print_issues(&issues);
            return Err(BuildError::ValidationFailed { errors }.into());
        }
        summary.warnings = issues.len();
        summary.documents = documents.len();

        // Route collisions would overwrite each other's artifact
        RouteManifest::generate(documents.values()).validate()?;

        // Route artifacts and aggregate
        for path in &fresh {
            let (Some(doc), Some(source)) = (self.cache.get_result(path), current.get(path)) else {
                continue;
            };
            let artifact = self.writer.write_document(&doc).await?;
            let output = self.paths.cache_key(&artifact);
            let replaced = build_cache.update_entry(&source.key, &source.hash, &output);
            if let Some(old) = replaced.filter(|old| old.output_path != output) {
                self.writer.remove_file(&self.paths.root.join(old.output_path)).await;
            }
        }

        self.write_outputs().await?;

        let mut types_error = None;
        match self.extract_types().await {
            Ok(count) => summary.components = count.unwrap_or(0),
            Err(e) => {
                tracing::warn!("Skipping component types: {}", e);
                types_error = Some(e);
            }
        }
        summary.assets = self.copy_assets().await;

        // Build cache
        let valid: HashSet<String> = current
            .values()
            .filter(|source| self.cache.get_result(&source.path).is_some())
            .map(|source| source.key.clone())
            .collect();
        for (key, entry) in build_cache.clean_stale(&valid) {
            tracing::debug!("Dropping stale cache entry {}", key);
            self.writer.remove_file(&self.paths.root.join(entry.output_path)).await;
        }
        build_cache.save(&self.paths.cache_file).await?;

        Ok(BuildReport {
            summary,
            issues,
            types_error,
        })
    }

    /// Load a fresh document from its recorded artifact into the content cache.
    async fn restore(&self, build_cache: &BuildCache, source: &Source) -> bool {
        if build_cache
            .needs_rebuild(&source.key, &source.hash, &self.paths.root)
            .await
        {
            return false;
        }
        self.load_artifact(build_cache, source).await
    }

    /// Load the artifact recorded for `source` into the content cache.
    /// Artifacts holding another document are rejected.
    async fn load_artifact(&self, build_cache: &BuildCache, source: &Source) -> bool {
        let Some(entry) = build_cache.get(&source.key) else {
            return false;
        };
        let artifact = self.paths.root.join(&entry.output_path);
        let Some(doc) = self.writer.read_document(&artifact).await else {
            return false;
        };
        if !source.path.ends_with(&doc.meta.path) {
            tracing::debug!(
                "{} holds {}, not {}",
                artifact.display(),
                doc.meta.path,
                source.key
            );
            return false;
        }
        self.cache.update(&source.path, doc);
        true
    }

    /// Write `docs.json` and the validated `routes.json` from the current cache state.
    pub async fn write_outputs(&self) -> Result<RouteManifest> {
        self.dirty.take();
        let documents = self.cache.all_results();
        let manifest = RouteManifest::generate(documents.values());
        manifest.validate()?;

        self.writer.write_aggregate(&documents).await?;
        self.writer.write_manifest(&manifest).await?;
        tracing::debug!(
            "Wrote {} documents across {} categories",
            documents.len(),
            manifest.categories.len()
        );
        Ok(manifest)
    }

    /// Extract component types and write `component-types.json`.
    ///
    /// Returns the component count, or `None` when no entry is configured.
    ///
    /// # Errors
    ///
    /// Returns `BuildError::TypeExtraction` if any module fails to parse;
    /// `component-types.json` is left as it was.
    pub async fn extract_types(&self) -> Result<Option<usize>, BuildError> {
        let Some(entry) = self.paths.types_entry.as_deref() else {
            return Ok(None);
        };
        let components = self.types.extract(entry).await?;
        let json = render_json(&components)?;
        self.writer.write_component_types(&json).await?;
        Ok(Some(components.len()))
    }

    async fn copy_assets(&self) -> usize {
        let Some(src) = self.paths.assets_dir.as_deref() else {
            return 0;
        };
        match copy_assets(src, &self.paths.out_dir.join(ASSETS_DIR)).await {
            Ok(report) => report.copied,
            Err(e) => {
                tracing::warn!("Failed to copy assets: {}", e);
                0
            }
        }
    }
}
