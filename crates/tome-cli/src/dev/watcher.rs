//! File system watcher for watch mode.
//!
//! Watches the project root and forwards changes to relevant files. Bursts are
//! not coalesced here; the watch session debounces downstream.

use crate::error::{CliError, Result};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;

const CHANNEL_CAPACITY: usize = 256;

/// A single change reported by the watcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileChange {
    Modified(PathBuf),
    Created(PathBuf),
    Removed(PathBuf),
}

impl FileChange {
    fn from_kind(kind: &EventKind, path: &Path) -> Option<Self> {
        let path = path.to_path_buf();
        match kind {
            EventKind::Create(_) => Some(Self::Created(path)),
            EventKind::Modify(_) => Some(Self::Modified(path)),
            EventKind::Remove(_) => Some(Self::Removed(path)),
            _ => None,
        }
    }

    /// Path the change refers to.
    pub fn path(&self) -> &Path {
        match self {
            Self::Modified(path) | Self::Created(path) | Self::Removed(path) => path,
        }
    }
}

/// Decides which paths below the watched root are worth reporting.
#[derive(Debug, Clone)]
struct PathFilter {
    root: PathBuf,
    ignore: Vec<String>,
}

impl PathFilter {
    /// Paths outside the root, below an ignored or hidden directory, and
    /// `.tmp` files from atomic writes are dropped.
    fn accepts(&self, path: &Path) -> bool {
        let Ok(relative) = path.strip_prefix(&self.root) else {
            return false;
        };
        if relative.extension().is_some_and(|ext| ext == "tmp") {
            return false;
        }
        !relative
            .components()
            .filter_map(|component| component.as_os_str().to_str())
            .any(|name| self.is_excluded_name(name))
    }

    fn is_excluded_name(&self, name: &str) -> bool {
        let hidden = name.starts_with('.') && name != "." && name != "..";
        hidden || self.ignore.iter().any(|pattern| pattern == name)
    }
}

/// Recursive watcher on the project root.
///
/// notify delivers events on its own thread, so they cross into the async
/// session over a bounded channel. Dropping the watcher stops delivery.
pub struct FileWatcher {
    _inner: RecommendedWatcher,
    root: PathBuf,
}

impl FileWatcher {
    /// Start watching `root` recursively, skipping directories named in `ignore`.
    ///
    /// # Errors
    ///
    /// Fails if `root` does not exist or the platform watcher cannot be started.
    pub fn new(root: PathBuf, ignore: Vec<String>) -> Result<(Self, mpsc::Receiver<FileChange>)> {
        if !root.exists() {
            return Err(CliError::FileNotFound(root));
        }

        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        let filter = PathFilter {
            root: root.clone(),
            ignore,
        };

        let mut inner = notify::recommended_watcher(move |res: notify::Result<Event>| {
            let event = match res {
                Ok(event) => event,
                Err(e) => {
                    tracing::warn!("Watch error: {}", e);
                    return;
                }
            };

            let changes = event
                .paths
                .iter()
                .filter(|path| filter.accepts(path))
                .filter_map(|path| FileChange::from_kind(&event.kind, path));
            for change in changes {
                // Closed once the session has shut down
                if tx.blocking_send(change).is_err() {
                    break;
                }
            }
        })?;
        inner.watch(&root, RecursiveMode::Recursive)?;

        Ok((Self { _inner: inner, root }, rx))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}
