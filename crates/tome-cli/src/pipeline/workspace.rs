//! Monorepo root and package name resolution for documents.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Name recorded when no enclosing package.json declares one.
pub const UNKNOWN_PACKAGE: &str = "unknown";

/// Finds the monorepo root and owning package of source files.
///
/// Lookups are memoized per directory; package.json files are assumed not
/// to move for the lifetime of a build or watch session.
#[derive(Debug, Default)]
pub struct WorkspaceLocator {
    roots: Mutex<HashMap<PathBuf, Option<PathBuf>>>,
    packages: Mutex<HashMap<PathBuf, String>>,
}

impl WorkspaceLocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Nearest ancestor holding a `pnpm-workspace.yaml` or a `package.json`
    /// with a `workspaces` field.
    pub async fn monorepo_root(&self, file: &Path) -> Option<PathBuf> {
        let dir = file.parent()?;
        if let Some(cached) = self.roots.lock().get(dir) {
            return cached.clone();
        }

        let mut found = None;
        for candidate in dir.ancestors() {
            if is_file(&candidate.join("pnpm-workspace.yaml")).await {
                found = Some(candidate.to_path_buf());
                break;
            }
            let declares_workspaces = read_package_json(candidate)
                .await
                .is_some_and(|json| json.get("workspaces").is_some());
            if declares_workspaces {
                found = Some(candidate.to_path_buf());
                break;
            }
        }

        self.roots.lock().insert(dir.to_path_buf(), found.clone());
        found
    }

    /// `name` of the nearest package.json between the file and `root`.
    pub async fn package_name(&self, file: &Path, root: &Path) -> String {
        let Some(dir) = file.parent() else {
            return UNKNOWN_PACKAGE.to_string();
        };
        if let Some(cached) = self.packages.lock().get(dir) {
            return cached.clone();
        }

        let mut name = None;
        for candidate in dir.ancestors().take_while(|d| d.starts_with(root)) {
            name = read_package_json(candidate).await.and_then(|json| {
                json.get("name")
                    .and_then(|n| n.as_str())
                    .filter(|n| !n.is_empty())
                    .map(str::to_string)
            });
            if name.is_some() {
                break;
            }
        }

        let name = name.unwrap_or_else(|| UNKNOWN_PACKAGE.to_string());
        self.packages.lock().insert(dir.to_path_buf(), name.clone());
        name
    }
}

/// Path of `file` relative to `root`, `/`-separated.
pub fn repository_path(file: &Path, root: &Path) -> String {
    file.strip_prefix(root)
        .unwrap_or(file)
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

async fn is_file(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .is_ok_and(|metadata| metadata.is_file())
}

async fn read_package_json(dir: &Path) -> Option<serde_json::Value> {
    let content = tokio::fs::read_to_string(dir.join("package.json")).await.ok()?;
    match serde_json::from_str(&content) {
        Ok(json) => Some(json),
        Err(e) => {
            tracing::debug!("Ignoring malformed package.json in {}: {}", dir.display(), e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn monorepo() -> TempDir {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("package.json"),
            r#"{ "name": "acme", "private": true, "workspaces": ["packages/*"] }"#,
        )
        .unwrap();
        let docs = dir.path().join("packages/docs/content/components");
        std::fs::create_dir_all(&docs).unwrap();
        std::fs::write(
            dir.path().join("packages/docs/package.json"),
            r#"{ "name": "@acme/docs" }"#,
        )
        .unwrap();
        dir
    }

    #[tokio::test]
    async fn test_monorepo_root_from_workspaces_field() {
        let dir = monorepo();
        let file = dir.path().join("packages/docs/content/components/button.mdx");

        let locator = WorkspaceLocator::new();
        assert_eq!(locator.monorepo_root(&file).await, Some(dir.path().to_path_buf()));
    }

    #[tokio::test]
    async fn test_monorepo_root_from_pnpm_workspace() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("pnpm-workspace.yaml"), "packages:\n  - packages/*\n").unwrap();
        std::fs::create_dir_all(dir.path().join("docs")).unwrap();

        let locator = WorkspaceLocator::new();
        let root = locator.monorepo_root(&dir.path().join("docs/intro.mdx")).await;
        assert_eq!(root, Some(dir.path().to_path_buf()));
    }

    #[tokio::test]
    async fn test_package_name_nearest_wins() {
        let dir = monorepo();
        let locator = WorkspaceLocator::new();

        let file = dir.path().join("packages/docs/content/components/button.mdx");
        assert_eq!(locator.package_name(&file, dir.path()).await, "@acme/docs");

        std::fs::create_dir_all(dir.path().join("guides")).unwrap();
        let file = dir.path().join("guides/intro.mdx");
        assert_eq!(locator.package_name(&file, dir.path()).await, "acme");
    }

    #[tokio::test]
    async fn test_package_name_unknown() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("pnpm-workspace.yaml"), "").unwrap();
        let locator = WorkspaceLocator::new();
        let name = locator
            .package_name(&dir.path().join("intro.mdx"), dir.path())
            .await;
        assert_eq!(name, UNKNOWN_PACKAGE);
    }

    #[test]
    fn test_repository_path() {
        let root = Path::new("/repo");
        assert_eq!(
            repository_path(Path::new("/repo/packages/docs/button.mdx"), root),
            "packages/docs/button.mdx"
        );
    }
}
