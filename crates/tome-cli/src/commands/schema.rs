//! Schema command implementation.

use crate::config::TomeConfig;
use crate::error::Result;

/// Print the JSON schema for tome.config.json to stdout.
pub fn execute() -> Result<()> {
    let schema = serde_json::to_string_pretty(&TomeConfig::json_schema())?;
    println!("{}", schema);
    Ok(())
}
