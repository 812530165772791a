//! OpenAPI loading implementations

pub mod dereference;
pub mod file_loader;
pub mod types;

pub use dereference::Dereferencer;
pub use file_loader::FileSpecLoader;
pub use types::*;

use serde_json::Value as JsonValue;
use std::path::Path;

/// Parse document content as JSON or YAML.
///
/// The format is chosen by extension; anything else is tried as JSON first,
/// then as YAML.
pub fn parse_document(source: &Path, content: &str) -> Result<JsonValue, String> {
    let extension = source
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("json") => {
            serde_json::from_str(content).map_err(|e| format!("Failed to parse JSON: {e}"))
        }
        Some("yaml") | Some("yml") => {
            parse_yaml(content).map_err(|e| format!("Failed to parse YAML: {e}"))
        }
        _ => serde_json::from_str(content)
            .or_else(|_| parse_yaml(content))
            .map_err(|e| format!("Failed to parse OpenAPI document: {e}")),
    }
}

/// YAML allows non-string keys such as unquoted response codes; they are
/// converted to strings on the way to JSON.
fn parse_yaml(content: &str) -> Result<JsonValue, Box<dyn std::error::Error>> {
    let yaml: serde_yaml::Value = serde_yaml::from_str(content)?;
    Ok(serde_json::to_value(yaml)?)
}
