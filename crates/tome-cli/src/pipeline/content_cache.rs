//! In-memory record of document sources and their last parse results.

use parking_lot::Mutex;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;
use tome_mdx::{ParsedDocument, TocItem};

#[derive(Debug, Default)]
struct CacheEntry {
    content: Option<Arc<str>>,
    /// Modification time and length the content was read at
    stamp: Option<(SystemTime, u64)>,
    result: Option<ParsedDocument>,
    /// TOC together with the content it was computed from
    toc: Option<(Arc<str>, Arc<Vec<TocItem>>)>,
}

/// Per-file content, modification stamp, last parse result and TOC.
///
/// Keyed by absolute source path. Shared between the parser, the TOC
/// extractor and the orchestrator behind an `Arc`.
#[derive(Debug, Default)]
pub struct ContentCache {
    entries: Mutex<HashMap<PathBuf, CacheEntry>>,
}

impl ContentCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the file's content, re-reading it only when its modification
    /// time or length changed since the last read.
    ///
    /// # Errors
    ///
    /// Propagates the I/O error when the file cannot be stat'ed or read.
    /// The entry is left in place; callers decide whether to evict.
    pub async fn get_content(&self, path: &Path) -> std::io::Result<Arc<str>> {
        let metadata = tokio::fs::metadata(path).await?;
        let stamp = metadata.modified().ok().map(|m| (m, metadata.len()));

        if stamp.is_some() {
            let entries = self.entries.lock();
            let cached = entries
                .get(path)
                .filter(|entry| entry.stamp == stamp)
                .and_then(|entry| entry.content.clone());
            if let Some(content) = cached {
                return Ok(content);
            }
        }

        let content: Arc<str> = tokio::fs::read_to_string(path).await?.into();

        let mut entries = self.entries.lock();
        let entry = entries.entry(path.to_path_buf()).or_default();
        entry.content = Some(content.clone());
        entry.stamp = stamp;
        Ok(content)
    }

    /// Store the latest successful parse result.
    pub fn update(&self, path: &Path, result: ParsedDocument) {
        self.entries
            .lock()
            .entry(path.to_path_buf())
            .or_default()
            .result = Some(result);
    }

    /// Evict an entry, returning its last parse result.
    pub fn remove(&self, path: &Path) -> Option<ParsedDocument> {
        self.entries.lock().remove(path).and_then(|entry| entry.result)
    }

    pub fn get_result(&self, path: &Path) -> Option<ParsedDocument> {
        self.entries
            .lock()
            .get(path)
            .and_then(|entry| entry.result.clone())
    }

    /// Every stored result keyed by its repository path.
    pub fn all_results(&self) -> BTreeMap<String, ParsedDocument> {
        self.entries
            .lock()
            .values()
            .filter_map(|entry| entry.result.as_ref())
            .map(|doc| (doc.meta.path.clone(), doc.clone()))
            .collect()
    }

    /// Repository path of another document already stored under `route`.
    pub fn route_owner(&self, route: &str, except: &Path) -> Option<String> {
        self.entries
            .lock()
            .iter()
            .filter(|(path, _)| path.as_path() != except)
            .filter_map(|(_, entry)| entry.result.as_ref())
            .find(|doc| doc.meta.route == route)
            .map(|doc| doc.meta.path.clone())
    }

    /// The stored TOC, if it was computed from exactly `content`.
    pub fn cached_toc(&self, path: &Path, content: &str) -> Option<Arc<Vec<TocItem>>> {
        let entries = self.entries.lock();
        let (source, toc) = entries.get(path)?.toc.as_ref()?;
        (&**source == content).then(|| toc.clone())
    }

    pub fn store_toc(&self, path: &Path, content: Arc<str>, toc: Arc<Vec<TocItem>>) {
        self.entries
            .lock()
            .entry(path.to_path_buf())
            .or_default()
            .toc = Some((content, toc));
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}
