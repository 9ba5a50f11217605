use crate::config::TomeConfig;
use crate::error::{Result, ResultExt};
use path_clean::PathClean;
use std::path::{Path, PathBuf};

/// Absolute, normalized paths derived from a [`TomeConfig`].
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectPaths {
    pub root: PathBuf,
    pub content_dir: PathBuf,
    pub out_dir: PathBuf,
    pub cache_file: PathBuf,
    pub types_entry: Option<PathBuf>,
    pub component_package: Option<PathBuf>,
    pub assets_dir: Option<PathBuf>,
    pub extensions: Vec<String>,
    pub ignore: Vec<String>,
    pub debounce_ms: u64,
}

impl TomeConfig {
    /// Resolve every configured path against the project root.
    pub fn resolve(&self) -> Result<ProjectPaths> {
        let root = if self.root.is_absolute() {
            self.root.clean()
        } else {
            std::env::current_dir()
                .context("Failed to read the working directory")?
                .join(&self.root)
                .clean()
        };

        let under_root = |path: &Path| root.join(path).clean();

        let types_entry = self.types_entry.as_deref().map(under_root);
        let component_package = match (&self.component_package, &types_entry) {
            (Some(dir), _) => Some(under_root(dir)),
            (None, Some(entry)) => Some(package_dir_of(entry, &root)),
            (None, None) => None,
        };

        Ok(ProjectPaths {
            content_dir: under_root(&self.content_dir),
            out_dir: under_root(&self.out_dir),
            cache_file: under_root(&self.cache_file),
            assets_dir: self.assets_dir.as_deref().map(under_root),
            types_entry,
            component_package,
            extensions: self.extensions.clone(),
            ignore: self.ignore.clone(),
            debounce_ms: self.debounce_ms,
            root,
        })
    }
}

/// Nearest directory at or above `entry` holding a package.json, not leaving `root`.
fn package_dir_of(entry: &Path, root: &Path) -> PathBuf {
    let start = entry.parent().unwrap_or(root);
    start
        .ancestors()
        .take_while(|dir| dir.starts_with(root))
        .find(|dir| dir.join("package.json").is_file())
        .unwrap_or(start)
        .to_path_buf()
}

impl ProjectPaths {
    /// Whether `path` has one of the configured document extensions.
    pub fn is_document(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|e| e == ext))
    }

    /// Whether any component of `path` below the root is an ignored directory name.
    pub fn is_ignored(&self, path: &Path) -> bool {
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        relative.components().any(|component| {
            component
                .as_os_str()
                .to_str()
                .is_some_and(|name| self.ignore.iter().any(|ignored| ignored == name))
        })
    }

    /// Build cache key: the path relative to the project root, `/`-separated.
    pub fn cache_key(&self, path: &Path) -> String {
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/")
    }
}
