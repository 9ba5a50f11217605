//! Watch mode: filesystem events, per-file state and the debounced aggregate write.

pub mod debounce;
pub mod session;
pub mod state;
pub mod watcher;

pub use debounce::Debouncer;
pub use session::WatchSession;
pub use state::{FileState, FileStates};
pub use watcher::{FileChange, FileWatcher};
