//! File-based OpenAPI spec loader
//!
//! Reads a document from disk, validates its structure (`openapiv3` for 3.0,
//! `oas3` for 3.1) and expands every `$ref` before handing it to the
//! generators.

use async_trait::async_trait;
use serde_json::Value as JsonValue;
use std::path::Path;
use tokio::fs;

use super::dereference::Dereferencer;
use super::parse_document;
use super::types::{ResolvedSpec, SpecResolution};
use crate::generation::{GenerationError, Result, SpecLoader};

/// Path-item keys the structural validator accepts besides operations
const PATH_ITEM_FIELDS: [&str; 5] = ["summary", "description", "servers", "parameters", "$ref"];

/// Operation keys of an OpenAPI 3 path item
const OPERATION_KEYS: [&str; 8] = [
    "get", "put", "post", "delete", "options", "head", "patch", "trace",
];

/// Loads OpenAPI specifications from local files
pub struct FileSpecLoader;

impl FileSpecLoader {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FileSpecLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SpecLoader for FileSpecLoader {
    async fn load(&self, service: &str, source: &Path) -> Result<SpecResolution> {
        tracing::debug!(service, source = %source.display(), "Loading OpenAPI document");

        let content = fs::read_to_string(source)
            .await
            .map_err(|e| GenerationError::spec_invalid(service, source, e))?;

        let raw = parse_document(source, &content)
            .map_err(|e| GenerationError::spec_invalid(service, source, e))?;

        validate_structure(&raw).map_err(|e| GenerationError::spec_invalid(service, source, e))?;

        // External references are read from disk
        let root_path = source.to_path_buf();
        let document = tokio::task::spawn_blocking(move || {
            Dereferencer::new(&root_path, raw).dereference(&root_path)
        })
        .await
        .map_err(|e| GenerationError::spec_invalid(service, source, e))?
        .map_err(|e| GenerationError::spec_invalid(service, source, e))?;

        Ok(SpecResolution::from_spec(ResolvedSpec::new(
            service, source, document,
        )))
    }
}

/// Validate a raw document against the OpenAPI 3.0 or 3.1 object model,
/// picked by its `openapi` version.
///
/// Path-item entries the generators skip anyway (non-object operations and
/// unknown keys) are removed from the copy that gets validated, and a missing
/// `paths` map is treated as empty.
pub fn validate_structure(raw: &JsonValue) -> std::result::Result<(), String> {
    let mut candidate = raw.clone();
    let root = candidate
        .as_object_mut()
        .ok_or_else(|| "OpenAPI document must be an object".to_string())?;

    let version = root
        .get("openapi")
        .and_then(JsonValue::as_str)
        .map(str::to_string)
        .ok_or_else(|| "Missing OpenAPI version".to_string())?;
    let minor = version
        .strip_prefix("3.")
        .and_then(|rest| rest.split('.').next());

    let paths = root
        .entry("paths")
        .or_insert_with(|| JsonValue::Object(Default::default()));
    if let JsonValue::Object(paths) = paths {
        for item in paths.values_mut() {
            strip_path_item(item);
        }
    }

    match minor {
        Some("0") => serde_json::from_value::<openapiv3::OpenAPI>(candidate)
            .map(|_| ())
            .map_err(|e| e.to_string()),
        Some("1") => serde_json::from_value::<oas3::OpenApiV3Spec>(candidate)
            .map(|_| ())
            .map_err(|e| e.to_string()),
        _ => Err(format!("Unsupported OpenAPI version {version}")),
    }
}

fn strip_path_item(item: &mut JsonValue) {
    if let JsonValue::Object(obj) = item {
        obj.retain(|key, value| {
            if OPERATION_KEYS.contains(&key.as_str()) {
                value.is_object()
            } else {
                PATH_ITEM_FIELDS.contains(&key.as_str()) || key.starts_with("x-")
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn spec_file(suffix: &str, content: &str) -> NamedTempFile {
        let mut temp_file = tempfile::Builder::new()
            .suffix(suffix)
            .tempfile()
            .expect("Failed to create temp file");
        temp_file
            .write_all(content.as_bytes())
            .expect("Failed to write temp file");
        temp_file.flush().expect("Failed to flush temp file");
        temp_file
    }

    #[tokio::test]
    async fn test_load_yaml_with_operations() {
        let file = spec_file(
            ".yml",
            r#"openapi: 3.0.3
info:
  title: Todos
  version: 1.0.0
paths:
  /todos:
    get:
      responses:
        "200":
          description: ok
"#,
        );

        let resolution = FileSpecLoader::new().load("todos", file.path()).await.unwrap();
        match resolution {
            SpecResolution::Operations(spec) => {
                assert_eq!(spec.service, "todos");
                assert!(spec.paths().unwrap().contains_key("/todos"));
            }
            other => panic!("Expected operations, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_load_json_without_paths() {
        let file = spec_file(
            ".json",
            r#"{"openapi": "3.0.0", "info": {"title": "Empty", "version": "1.0.0"}}"#,
        );

        let resolution = FileSpecLoader::new().load("empty", file.path()).await.unwrap();
        assert!(matches!(resolution, SpecResolution::NoOperations { .. }));
    }

    #[tokio::test]
    async fn test_missing_file_is_spec_invalid() {
        let err = FileSpecLoader::new()
            .load("ghost", Path::new("/nonexistent/ghost.yaml"))
            .await
            .unwrap_err();
        match err {
            GenerationError::SpecInvalid { service, path, .. } => {
                assert_eq!(service, "ghost");
                assert_eq!(path, Path::new("/nonexistent/ghost.yaml"));
            }
            other => panic!("Expected SpecInvalid, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_structurally_invalid_document_is_rejected() {
        let file = spec_file(".json", r#"{"openapi": "3.0.0", "paths": {}}"#);
        let err = FileSpecLoader::new().load("broken", file.path()).await.unwrap_err();
        assert!(matches!(err, GenerationError::SpecInvalid { .. }));
    }

    #[test]
    fn test_validate_structure_tolerates_skipped_entries() {
        let raw = json!({
            "openapi": "3.0.0",
            "info": {"title": "t", "version": "1"},
            "paths": {
                "/todos": {
                    "get": "see the list operation",
                    "x-internal": true,
                    "post": {"responses": {"201": {"description": "created"}}}
                }
            }
        });
        assert!(validate_structure(&raw).is_ok());
    }

    #[test]
    fn test_validate_structure_rejects_swagger_2() {
        let raw = json!({"swagger": "2.0", "info": {"title": "t", "version": "1"}, "paths": {}});
        assert!(validate_structure(&raw).is_err());

        let raw = json!({"openapi": "2.0", "info": {"title": "t", "version": "1"}});
        assert!(validate_structure(&raw).unwrap_err().contains("Unsupported"));

        let raw = json!({"openapi": "3.2.0", "info": {"title": "t", "version": "1"}});
        assert!(validate_structure(&raw).unwrap_err().contains("Unsupported"));
    }

    #[tokio::test]
    async fn test_load_openapi_31_with_type_arrays() {
        let file = spec_file(
            ".yaml",
            r#"openapi: 3.1.0
info:
  title: Todos
  version: 1.0.0
paths:
  /todos:
    get:
      responses:
        "200":
          description: ok
          content:
            application/json:
              schema:
                type: object
                properties:
                  title:
                    type: [string, "null"]
"#,
        );

        let resolution = FileSpecLoader::new().load("todos", file.path()).await.unwrap();
        match resolution {
            SpecResolution::Operations(spec) => {
                let title = spec
                    .document
                    .pointer("/paths/~1todos/get/responses/200/content/application~1json/schema/properties/title/type")
                    .unwrap();
                assert_eq!(title, &json!(["string", "null"]));
            }
            other => panic!("Expected operations, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_structure_30_still_uses_strict_model() {
        let raw = json!({
            "openapi": "3.0.3",
            "info": {"title": "t", "version": "1"},
            "paths": {
                "/todos": {
                    "get": {
                        "responses": {
                            "200": {
                                "description": "ok",
                                "content": {"application/json": {"schema": {"type": ["string", "null"]}}}
                            }
                        }
                    }
                }
            }
        });
        assert!(validate_structure(&raw).is_err());
    }

    #[tokio::test]
    async fn test_load_resolves_external_refs() {
        let dir = tempfile::TempDir::new().expect("Failed to create temp dir");
        std::fs::write(
            dir.path().join("schemas.yaml"),
            "Todo:\n  type: object\n  title: Todo\n",
        )
        .unwrap();
        let source = dir.path().join("todos.yaml");
        std::fs::write(
            &source,
            r#"openapi: 3.0.3
info:
  title: Todos
  version: 1.0.0
paths:
  /todos:
    get:
      responses:
        "200":
          description: ok
          content:
            application/json:
              schema:
                $ref: "schemas.yaml#/Todo"
"#,
        )
        .unwrap();

        let resolution = FileSpecLoader::new().load("todos", &source).await.unwrap();
        let SpecResolution::Operations(spec) = resolution else {
            panic!("Expected operations");
        };
        assert_eq!(
            spec.document
                .pointer("/paths/~1todos/get/responses/200/content/application~1json/schema/title")
                .unwrap(),
            "Todo"
        );
    }
}
