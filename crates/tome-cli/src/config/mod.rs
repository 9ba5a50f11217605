//! Configuration system for tome with multi-source loading.
//!
//! Merges settings from CLI args, environment variables, and config files.
//! Priority: CLI > Environment > File > Defaults

mod defaults;
mod loading;
mod paths;
mod tests;
mod validation;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub use defaults::*;
pub use loading::{ConfigOverrides, CONFIG_FILE_NAME};
pub use paths::ProjectPaths;

/// tome configuration - loaded from tome.config.json, `TOME_*` env vars and CLI args.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TomeConfig {
    /// Project root; every other path is resolved against it
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Directory holding the MDX documents
    #[serde(default = "default_content_dir")]
    pub content_dir: PathBuf,

    /// Output directory for generated artifacts
    #[serde(default = "default_out_dir")]
    pub out_dir: PathBuf,

    /// Location of the persisted build cache
    #[serde(default = "default_cache_file")]
    pub cache_file: PathBuf,

    /// TypeScript module re-exporting the component library
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub types_entry: Option<PathBuf>,

    /// Component package directory watched for type changes.
    /// Defaults to the nearest package.json directory above `typesEntry`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component_package: Option<PathBuf>,

    /// Static assets copied into `<outDir>/assets`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assets_dir: Option<PathBuf>,

    /// Document file extensions, without the leading dot
    #[serde(default = "default_extensions")]
    #[schemars(length(min = 1))]
    pub extensions: Vec<String>,

    /// Directory names skipped during enumeration and watching
    #[serde(default = "default_ignore")]
    pub ignore: Vec<String>,

    /// Quiet period before watch mode writes aggregate artifacts
    #[serde(default = "default_debounce_ms")]
    #[schemars(range(min = 10, max = 10000))]
    pub debounce_ms: u64,
}

impl Default for TomeConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            content_dir: default_content_dir(),
            out_dir: default_out_dir(),
            cache_file: default_cache_file(),
            types_entry: None,
            component_package: None,
            assets_dir: None,
            extensions: default_extensions(),
            ignore: default_ignore(),
            debounce_ms: default_debounce_ms(),
        }
    }
}

impl TomeConfig {
    /// Generate JSON Schema for tome.config.json.
    pub fn json_schema() -> serde_json::Value {
        let schema = schemars::schema_for!(TomeConfig);
        serde_json::to_value(schema).unwrap_or(serde_json::Value::Bool(true))
    }
}
