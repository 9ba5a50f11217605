//! Build pipeline stages.
//!
//! Leaves first: [`ContentCache`] and [`TocExtractor`] feed the
//! [`DocumentParser`]; [`validate`](validate::validate) and the route
//! [`manifest`] aggregate parsed documents; [`BuildCache`] persists content
//! hashes across runs; [`Pipeline`] runs everything in batch mode and is
//! reused by the watch session.

pub mod assets;
pub mod batch;
pub mod build_cache;
pub mod content_cache;
pub mod dirty;
pub mod document;
pub mod manifest;
pub mod output;
pub mod toc;
pub mod validate;
pub mod workspace;

pub use assets::{AssetReport, copy_assets};
pub use batch::{BuildReport, BuildSummary, Pipeline};
pub use build_cache::{BuildCache, BuildCacheEntry, CACHE_VERSION, content_hash};
pub use content_cache::ContentCache;
pub use dirty::DirtyFlag;
pub use document::{DocumentParser, ParseOutcome};
pub use manifest::RouteManifest;
pub use output::ArtifactWriter;
pub use toc::TocExtractor;
pub use validate::{Severity, ValidationIssue};
pub use workspace::WorkspaceLocator;
