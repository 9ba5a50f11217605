//! Watch session: routes file changes to pipeline stages and debounces the
//! aggregate write.

use std::future::Future;
use std::path::Path;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{Instant, sleep_until};
use tome_mdx::ParsedDocument;

use crate::dev::{Debouncer, FileChange, FileState, FileStates};
use crate::pipeline::{ParseOutcome, Pipeline};

/// What a changed path feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    Document,
    ComponentTypes,
    Ignored,
}

pub struct WatchSession {
    pipeline: Pipeline,
    debouncer: Debouncer,
    states: FileStates,
    types_pending: bool,
    writes: usize,
}

impl WatchSession {
    pub fn new(pipeline: Pipeline) -> Self {
        let delay = Duration::from_millis(pipeline.paths().debounce_ms);
        Self {
            pipeline,
            debouncer: Debouncer::new(delay),
            states: FileStates::new(),
            types_pending: false,
            writes: 0,
        }
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    pub fn states(&self) -> &FileStates {
        &self.states
    }

    /// Number of aggregate writes performed so far.
    pub fn write_count(&self) -> usize {
        self.writes
    }

    /// Process changes until `shutdown` resolves or the channel closes.
    /// A pending aggregate write is flushed before returning.
    pub async fn run<F>(&mut self, mut events: mpsc::Receiver<FileChange>, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        loop {
            let deadline = self.debouncer.deadline();
            tokio::select! {
                biased;
                _ = &mut shutdown => {
                    tracing::debug!("Shutdown requested");
                    break;
                }
                change = events.recv() => match change {
                    Some(change) => self.handle(change).await,
                    None => break,
                },
                _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    self.flush().await;
                }
            }
        }

        if self.debouncer.is_armed() {
            self.flush().await;
        }
    }

    async fn handle(&mut self, change: FileChange) {
        let path = change.path();
        match self.classify(path) {
            Target::Document => self.process_document(path).await,
            Target::ComponentTypes => {
                tracing::debug!("Component source changed: {}", path.display());
                self.types_pending = true;
                self.debouncer.arm();
            }
            Target::Ignored => tracing::trace!("Ignoring {}", path.display()),
        }
    }

    fn classify(&self, path: &Path) -> Target {
        let paths = self.pipeline.paths();
        if paths.is_ignored(path) {
            return Target::Ignored;
        }
        if path.starts_with(&paths.content_dir) && paths.is_document(path) {
            return Target::Document;
        }

        let is_typescript = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext == "ts" || ext == "tsx");
        let in_package = paths
            .component_package
            .as_deref()
            .is_some_and(|package| path.starts_with(package));
        if is_typescript && in_package && paths.types_entry.is_some() {
            return Target::ComponentTypes;
        }

        Target::Ignored
    }

    async fn process_document(&mut self, path: &Path) {
        self.states.begin(path);
        let writer = self.pipeline.writer();
        let previous = self.pipeline.cache().get_result(path);

        let next = match self.pipeline.parser().parse_document(path).await {
            Ok(ParseOutcome::Parsed(doc)) => {
                let cache = self.pipeline.cache();
                if let Some(owner) = cache.route_owner(&doc.meta.route, path) {
                    tracing::error!(
                        "{} uses route /{} already taken by {}; keeping the last good version",
                        doc.meta.path,
                        doc.meta.route,
                        owner
                    );
                    self.restore_previous(path, previous);
                    self.states.finish(path, FileState::Invalid);
                    return;
                }
                if let Some(old) = previous.filter(|old| old.meta.route != doc.meta.route) {
                    writer.remove_document(&old).await;
                }
                if let Err(e) = writer.write_document(&doc).await {
                    tracing::error!("{}", e);
                }
                tracing::info!("Updated {}", doc.meta.path);
                self.debouncer.arm();
                FileState::Valid
            }
            Ok(ParseOutcome::Unchanged(_)) => FileState::Valid,
            Ok(ParseOutcome::Invalid { document, errors }) => {
                tracing::warn!(
                    "{} failed validation with {} error(s); keeping the last good version",
                    document.meta.path,
                    errors.len()
                );
                FileState::Invalid
            }
            Ok(ParseOutcome::Removed(previous)) => {
                if let Some(doc) = previous {
                    writer.remove_document(&doc).await;
                    tracing::info!("Removed {}", doc.meta.path);
                    self.debouncer.arm();
                }
                FileState::Removed
            }
            Err(e) => {
                tracing::warn!("{}", e);
                FileState::Invalid
            }
        };

        self.states.finish(path, next);
    }

    /// Undo a cache update whose artifact was not written.
    fn restore_previous(&self, path: &Path, previous: Option<ParsedDocument>) {
        let cache = self.pipeline.cache();
        match previous {
            Some(doc) => cache.update(path, doc),
            None => {
                cache.remove(path);
            }
        }
    }

    async fn flush(&mut self) {
        self.debouncer.fire();

        if self.pipeline.dirty().take() {
            match self.pipeline.write_outputs().await {
                Ok(manifest) => {
                    self.writes += 1;
                    tracing::info!("Wrote manifest with {} routes", manifest.routes.len());
                }
                Err(e) => tracing::error!("Keeping last good artifacts: {}", e),
            }
        }

        if std::mem::take(&mut self.types_pending) {
            match self.pipeline.extract_types().await {
                Ok(Some(count)) => tracing::info!("Extracted {} components", count),
                Ok(None) => {}
                Err(e) => tracing::warn!("Keeping the last component types: {}", e),
            }
        }
    }
}
