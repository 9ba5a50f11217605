//! Per-file processing state in watch mode.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileState {
    Unseen,
    Processing,
    Valid,
    Invalid,
    Removed,
}

impl FileState {
    /// Allowed transitions:
    /// `unseen -> processing -> {valid, invalid, removed}`, any settled state
    /// back to `processing`, and `valid -> removed` on delete.
    pub fn can_transition_to(self, next: FileState) -> bool {
        use FileState::*;
        matches!(
            (self, next),
            (Unseen, Processing)
                | (Processing, Valid)
                | (Processing, Invalid)
                | (Processing, Removed)
                | (Valid, Processing)
                | (Invalid, Processing)
                | (Removed, Processing)
                | (Valid, Removed)
        )
    }
}

#[derive(Debug, Default)]
pub struct FileStates {
    states: HashMap<PathBuf, FileState>,
}

impl FileStates {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, path: &Path) -> FileState {
        self.states.get(path).copied().unwrap_or(FileState::Unseen)
    }

    /// Move `path` to `next`, returning false (and leaving the state alone)
    /// when the transition is not allowed.
    pub fn transition(&mut self, path: &Path, next: FileState) -> bool {
        let current = self.get(path);
        if !current.can_transition_to(next) {
            tracing::debug!(
                "Ignoring transition {:?} -> {:?} for {}",
                current,
                next,
                path.display()
            );
            return false;
        }
        self.states.insert(path.to_path_buf(), next);
        true
    }

    pub fn begin(&mut self, path: &Path) -> bool {
        self.transition(path, FileState::Processing)
    }

    pub fn finish(&mut self, path: &Path, state: FileState) -> bool {
        self.transition(path, state)
    }

    pub fn count(&self, state: FileState) -> usize {
        self.states.values().filter(|s| **s == state).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifecycle() {
        let mut states = FileStates::new();
        let path = Path::new("/repo/docs/button.mdx");
        assert_eq!(states.get(path), FileState::Unseen);

        assert!(states.begin(path));
        assert!(states.finish(path, FileState::Valid));
        assert!(states.begin(path));
        assert!(states.finish(path, FileState::Invalid));
        assert!(states.begin(path));
        assert!(states.finish(path, FileState::Removed));
        assert_eq!(states.count(FileState::Removed), 1);
    }

    #[test]
    fn test_rejected_transitions() {
        assert!(!FileState::Unseen.can_transition_to(FileState::Valid));
        assert!(!FileState::Invalid.can_transition_to(FileState::Removed));
        assert!(FileState::Valid.can_transition_to(FileState::Removed));

        let mut states = FileStates::new();
        let path = Path::new("/repo/docs/intro.mdx");
        assert!(!states.finish(path, FileState::Valid));
        assert_eq!(states.get(path), FileState::Unseen);
    }
}
