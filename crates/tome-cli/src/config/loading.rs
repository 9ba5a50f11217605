use crate::cli::ProjectArgs;
use crate::config::TomeConfig;
use crate::error::{ConfigError, Result};
use figment::{
    Figment,
    providers::{Env, Format as _, Json, Serialized},
};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Config file looked up in the project root when `--config` is absent.
pub const CONFIG_FILE_NAME: &str = "tome.config.json";

/// Environment keys (after the `TOME_` prefix) that map onto config fields.
const ENV_FIELDS: &[&str] = &[
    "root",
    "content_dir",
    "out_dir",
    "cache_file",
    "types_entry",
    "component_package",
    "assets_dir",
    "extensions",
    "ignore",
    "debounce_ms",
];

/// Values supplied on the command line. Unset fields leave lower layers alone.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigOverrides {
    #[serde(skip)]
    pub config: Option<PathBuf>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub root: Option<PathBuf>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub out_dir: Option<PathBuf>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub debounce_ms: Option<u64>,
}

impl From<&ProjectArgs> for ConfigOverrides {
    fn from(args: &ProjectArgs) -> Self {
        Self {
            config: args.config.clone(),
            root: args.root.clone(),
            out_dir: args.out_dir.clone(),
            debounce_ms: None,
        }
    }
}

impl ConfigOverrides {
    pub fn with_debounce(mut self, debounce_ms: Option<u64>) -> Self {
        self.debounce_ms = debounce_ms;
        self
    }
}

impl TomeConfig {
    /// Load configuration from multiple sources.
    /// Priority: CLI args > environment variables > config file > defaults
    pub fn load(overrides: &ConfigOverrides) -> Result<Self> {
        let mut figment = Figment::new().merge(Serialized::defaults(Self::default()));

        if let Some(path) = Self::config_file(overrides)? {
            tracing::debug!("Loading config from {}", path.display());
            figment = figment.merge(Json::file(path));
        }

        // TOME_OUT_DIR, TOME_DEBOUNCE_MS, ...
        figment = figment.merge(
            Env::prefixed("TOME_")
                .filter(|key| ENV_FIELDS.contains(&key.as_str()))
                .map(|key| env_key_to_field(key.as_str()).into()),
        );

        figment = figment.merge(Serialized::defaults(overrides));

        figment.extract().map_err(|e| {
            ConfigError::InvalidValue {
                field: "configuration".to_string(),
                value: e.to_string(),
                hint: format!("Check {} syntax and field types", CONFIG_FILE_NAME),
            }
            .into()
        })
    }

    /// An explicit `--config` must exist; the default file is optional.
    fn config_file(overrides: &ConfigOverrides) -> Result<Option<PathBuf>> {
        if let Some(path) = &overrides.config {
            if !path.is_file() {
                return Err(ConfigError::NotFound(path.clone()).into());
            }
            return Ok(Some(path.clone()));
        }

        let root = overrides.root.as_deref().unwrap_or(Path::new("."));
        let default_path = root.join(CONFIG_FILE_NAME);
        Ok(default_path.is_file().then_some(default_path))
    }
}

/// Convert a lowercased snake_case env key into its camelCase field name.
pub(crate) fn env_key_to_field(key: &str) -> String {
    let mut field = String::with_capacity(key.len());
    let mut upper_next = false;
    for c in key.chars() {
        if c == '_' {
            upper_next = !field.is_empty();
        } else if upper_next {
            field.extend(c.to_uppercase());
            upper_next = false;
        } else {
            field.extend(c.to_lowercase());
        }
    }
    field
}
