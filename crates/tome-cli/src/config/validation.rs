use crate::cli::validation::{MAX_DEBOUNCE_MS, MIN_DEBOUNCE_MS};
use crate::config::{ProjectPaths, TomeConfig};
use crate::error::{ConfigError, Result};

impl TomeConfig {
    /// Validate configuration values that do not touch the filesystem.
    pub fn validate(&self) -> Result<()> {
        if self.extensions.is_empty() {
            return Err(ConfigError::MissingField {
                field: "extensions".to_string(),
                hint: "Provide at least one document extension, e.g. [\"mdx\"]".to_string(),
            }
            .into());
        }

        if let Some(ext) = self.extensions.iter().find(|e| e.is_empty() || e.starts_with('.')) {
            return Err(ConfigError::InvalidValue {
                field: "extensions".to_string(),
                value: ext.clone(),
                hint: "List extensions without the leading dot".to_string(),
            }
            .into());
        }

        if !(MIN_DEBOUNCE_MS..=MAX_DEBOUNCE_MS).contains(&self.debounce_ms) {
            return Err(ConfigError::InvalidValue {
                field: "debounceMs".to_string(),
                value: self.debounce_ms.to_string(),
                hint: format!(
                    "Use a value between {} and {}",
                    MIN_DEBOUNCE_MS, MAX_DEBOUNCE_MS
                ),
            }
            .into());
        }

        Ok(())
    }
}

impl ProjectPaths {
    /// Validate that the resolved paths point at usable locations.
    pub fn validate(&self) -> Result<()> {
        if !self.content_dir.is_dir() {
            return Err(ConfigError::InvalidValue {
                field: "contentDir".to_string(),
                value: self.content_dir.display().to_string(),
                hint: "Point contentDir at the directory holding your MDX documents".to_string(),
            }
            .into());
        }

        if self.out_dir == self.content_dir || self.content_dir.starts_with(&self.out_dir) {
            return Err(ConfigError::InvalidValue {
                field: "outDir".to_string(),
                value: self.out_dir.display().to_string(),
                hint: "The output directory must not contain the content directory".to_string(),
            }
            .into());
        }

        if let Some(entry) = self.types_entry.as_ref().filter(|entry| !entry.is_file()) {
            return Err(ConfigError::InvalidValue {
                field: "typesEntry".to_string(),
                value: entry.display().to_string(),
                hint: "Point typesEntry at the module re-exporting your components".to_string(),
            }
            .into());
        }

        if let Some(assets) = self.assets_dir.as_ref().filter(|dir| !dir.is_dir()) {
            return Err(ConfigError::InvalidValue {
                field: "assetsDir".to_string(),
                value: assets.display().to_string(),
                hint: "Remove assetsDir or create the directory".to_string(),
            }
            .into());
        }

        Ok(())
    }
}
