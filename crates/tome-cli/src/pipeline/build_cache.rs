//! Persistent content-hash manifest that lets batch builds skip unchanged documents.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use crate::error::BuildError;

/// Bumped whenever the artifact layout changes; older caches are discarded.
pub const CACHE_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildCacheEntry {
    /// BLAKE3 hex digest of the source content
    pub hash: String,
    /// RFC 3339 time the entry was written
    pub timestamp: String,
    /// Artifact path relative to the project root
    pub output_path: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildCache {
    pub version: u32,
    /// Keyed by source path relative to the project root
    pub files: BTreeMap<String, BuildCacheEntry>,
}

impl Default for BuildCache {
    fn default() -> Self {
        Self {
            version: CACHE_VERSION,
            files: BTreeMap::new(),
        }
    }
}

/// Hex-encoded BLAKE3 digest of `content`.
pub fn content_hash(content: &[u8]) -> String {
    blake3::hash(content).to_hex().to_string()
}

impl BuildCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the cache, falling back to an empty one when the file is missing,
    /// unreadable, corrupt or written by a different cache version.
    pub async fn load(path: &Path) -> Self {
        let content = match tokio::fs::read_to_string(path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No build cache at {}", path.display());
                return Self::new();
            }
            Err(e) => {
                tracing::warn!("Ignoring unreadable build cache {}: {}", path.display(), e);
                return Self::new();
            }
        };

        match serde_json::from_str::<BuildCache>(&content) {
            Ok(cache) if cache.version == CACHE_VERSION => cache,
            Ok(cache) => {
                tracing::info!(
                    "Build cache version {} does not match {}, starting cold",
                    cache.version,
                    CACHE_VERSION
                );
                Self::new()
            }
            Err(e) => {
                tracing::warn!("Ignoring corrupt build cache {}: {}", path.display(), e);
                Self::new()
            }
        }
    }

    /// Write the cache through a temp file and rename it into place.
    pub async fn save(&self, path: &Path) -> Result<(), BuildError> {
        let write_error = |error: std::io::Error| BuildError::ArtifactWrite {
            path: path.to_path_buf(),
            error: error.to_string(),
        };

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(write_error)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|e| BuildError::ArtifactWrite {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json).await.map_err(write_error)?;
        tokio::fs::rename(&tmp, path).await.map_err(write_error)?;
        Ok(())
    }

    /// True when there is no entry, the hash differs, or the recorded output is gone.
    pub async fn needs_rebuild(&self, key: &str, hash: &str, root: &Path) -> bool {
        let Some(entry) = self.files.get(key) else {
            return true;
        };
        if entry.hash != hash {
            return true;
        }
        !tokio::fs::try_exists(root.join(&entry.output_path))
            .await
            .unwrap_or(false)
    }

    /// Record a fresh build of `key`, returning the entry it replaced.
    pub fn update_entry(
        &mut self,
        key: impl Into<String>,
        hash: impl Into<String>,
        output_path: impl Into<String>,
    ) -> Option<BuildCacheEntry> {
        self.files.insert(
            key.into(),
            BuildCacheEntry {
                hash: hash.into(),
                timestamp: Utc::now().to_rfc3339(),
                output_path: output_path.into(),
            },
        )
    }

    /// Drop entries whose source is not in `valid`, returning them.
    pub fn clean_stale(&mut self, valid: &HashSet<String>) -> Vec<(String, BuildCacheEntry)> {
        let stale: Vec<String> = self
            .files
            .keys()
            .filter(|key| !valid.contains(*key))
            .cloned()
            .collect();

        stale
            .into_iter()
            .filter_map(|key| self.files.remove(&key).map(|entry| (key, entry)))
            .collect()
    }

    pub fn get(&self, key: &str) -> Option<&BuildCacheEntry> {
        self.files.get(key)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_content_hash_is_stable_hex() {
        let hash = content_hash(b"# Button");
        assert_eq!(hash.len(), 64);
        assert_eq!(hash, content_hash(b"# Button"));
        assert_ne!(hash, content_hash(b"# Badge"));
    }

    #[tokio::test]
    async fn test_needs_rebuild_three_way() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("out/routes")).unwrap();
        std::fs::write(dir.path().join("out/routes/button.json"), "{}").unwrap();

        let mut cache = BuildCache::new();
        let hash = content_hash(b"v1");

        // No entry
        assert!(cache.needs_rebuild("docs/button.mdx", &hash, dir.path()).await);

        cache.update_entry("docs/button.mdx", hash.clone(), "out/routes/button.json");
        assert!(!cache.needs_rebuild("docs/button.mdx", &hash, dir.path()).await);

        // Hash differs
        let changed = content_hash(b"v2");
        assert!(cache.needs_rebuild("docs/button.mdx", &changed, dir.path()).await);

        // Output deleted
        std::fs::remove_file(dir.path().join("out/routes/button.json")).unwrap();
        assert!(cache.needs_rebuild("docs/button.mdx", &hash, dir.path()).await);
    }

    #[tokio::test]
    async fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".tome/build-cache.json");

        let mut cache = BuildCache::new();
        cache.update_entry("docs/a.mdx", "abc", "dist/routes/a.json");
        cache.save(&path).await.unwrap();

        let loaded = BuildCache::load(&path).await;
        assert_eq!(loaded, cache);

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["version"], CACHE_VERSION);
        assert_eq!(raw["files"]["docs/a.mdx"]["outputPath"], "dist/routes/a.json");
    }

    #[tokio::test]
    async fn test_load_falls_back_to_empty() {
        let dir = TempDir::new().unwrap();

        let missing = BuildCache::load(&dir.path().join("missing.json")).await;
        assert!(missing.is_empty());

        let corrupt = dir.path().join("corrupt.json");
        std::fs::write(&corrupt, "{ not json").unwrap();
        assert!(BuildCache::load(&corrupt).await.is_empty());

        let old = dir.path().join("old.json");
        std::fs::write(
            &old,
            r#"{ "version": 0, "files": { "a.mdx": { "hash": "x", "timestamp": "t", "outputPath": "a.json" } } }"#,
        )
        .unwrap();
        assert!(BuildCache::load(&old).await.is_empty());
    }

    #[test]
    fn test_clean_stale() {
        let mut cache = BuildCache::new();
        cache.update_entry("docs/a.mdx", "1", "out/a.json");
        cache.update_entry("docs/b.mdx", "2", "out/b.json");

        let valid = HashSet::from(["docs/a.mdx".to_string()]);
        let removed = cache.clean_stale(&valid);

        assert_eq!(removed.len(), 1);
        assert_eq!(removed[0].0, "docs/b.mdx");
        assert!(cache.get("docs/a.mdx").is_some());
        assert_eq!(cache.len(), 1);
    }
}
