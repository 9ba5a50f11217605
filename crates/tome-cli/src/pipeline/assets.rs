//! Static asset copying into the output directory.

use std::path::Path;
use walkdir::WalkDir;

use crate::error::BuildError;

/// Directory under the output directory that receives static assets.
pub const ASSETS_DIR: &str = "assets";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AssetReport {
    pub copied: usize,
    /// Files whose destination already held identical bytes
    pub skipped: usize,
}

/// Mirror `src` into `dest`, skipping files whose content is unchanged.
pub async fn copy_assets(src: &Path, dest: &Path) -> Result<AssetReport, BuildError> {
    let mut report = AssetReport::default();

    for entry in WalkDir::new(src).follow_links(true) {
        let entry = entry.map_err(|e| BuildError::ArtifactWrite {
            path: src.to_path_buf(),
            error: e.to_string(),
        })?;
        if !entry.file_type().is_file() {
            continue;
        }

        let Ok(relative) = entry.path().strip_prefix(src) else {
            continue;
        };
        let target = dest.join(relative);
        let write_error = |error: std::io::Error| BuildError::ArtifactWrite {
            path: target.clone(),
            error: error.to_string(),
        };

        let bytes = tokio::fs::read(entry.path()).await.map_err(|e| BuildError::ArtifactWrite {
            path: entry.path().to_path_buf(),
            error: e.to_string(),
        })?;
        if tokio::fs::read(&target).await.is_ok_and(|existing| existing == bytes) {
            report.skipped += 1;
            continue;
        }

        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(write_error)?;
        }
        tokio::fs::write(&target, &bytes).await.map_err(write_error)?;
        report.copied += 1;
    }

    tracing::debug!(
        "Assets: {} copied, {} unchanged",
        report.copied,
        report.skipped
    );
    Ok(report)
}
