//! Table-of-contents extraction with request coalescing.

use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tome_mdx::{TocItem, extract_toc};

use crate::pipeline::ContentCache;

type TocFuture = Shared<BoxFuture<'static, Arc<Vec<TocItem>>>>;

/// Computes document TOCs, sharing one in-flight computation per path.
///
/// TOC failures are never fatal: an unreadable or unparsable document yields
/// an empty TOC.
pub struct TocExtractor {
    cache: Arc<ContentCache>,
    in_flight: Mutex<HashMap<PathBuf, TocFuture>>,
    parses: Arc<AtomicUsize>,
}

impl TocExtractor {
    pub fn new(cache: Arc<ContentCache>) -> Self {
        Self {
            cache,
            in_flight: Mutex::new(HashMap::new()),
            parses: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub async fn get_toc(&self, path: &Path) -> Arc<Vec<TocItem>> {
        let future = {
            let mut in_flight = self.in_flight.lock();
            match in_flight.get(path) {
                Some(existing) => existing.clone(),
                None => {
                    let future = compute(
                        self.cache.clone(),
                        path.to_path_buf(),
                        self.parses.clone(),
                    )
                    .boxed()
                    .shared();
                    in_flight.insert(path.to_path_buf(), future.clone());
                    future
                }
            }
        };

        let toc = future.clone().await;

        // A newer request may have replaced the marker already
        let mut in_flight = self.in_flight.lock();
        if in_flight
            .get(path)
            .is_some_and(|current| Shared::ptr_eq(current, &future))
        {
            in_flight.remove(path);
        }
        toc
    }

    /// Number of markdown parses performed so far.
    pub fn parse_count(&self) -> usize {
        self.parses.load(Ordering::Relaxed)
    }
}

async fn compute(
    cache: Arc<ContentCache>,
    path: PathBuf,
    parses: Arc<AtomicUsize>,
) -> Arc<Vec<TocItem>> {
    let content = match cache.get_content(&path).await {
        Ok(content) => content,
        Err(e) => {
            tracing::debug!("No TOC for {}: {}", path.display(), e);
            return Arc::default();
        }
    };

    if let Some(toc) = cache.cached_toc(&path, &content) {
        return toc;
    }

    // Let other requests for this path attach before the parse runs
    tokio::task::yield_now().await;

    parses.fetch_add(1, Ordering::Relaxed);
    let toc = match extract_toc(&content) {
        Ok(items) => Arc::new(items),
        Err(e) => {
            tracing::warn!("Failed to extract TOC from {}: {}", path.display(), e);
            Arc::default()
        }
    };
    cache.store_toc(&path, content, toc.clone());
    toc
}
