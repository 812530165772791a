//! `$ref` resolution for OpenAPI documents
//!
//! Internal references (`#/components/schemas/Todo`) are looked up in the
//! referring document; external references (`common.yaml#/Todo`) are loaded
//! relative to the referring document and cached for the rest of the run.
//! A reference that points back into its own expansion is left as-is.

use percent_encoding::percent_decode_str;
use serde_json::{Map, Value as JsonValue};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::parse_document;

/// Expands every `$ref` of a document in place of the reference object
pub struct Dereferencer {
    documents: HashMap<PathBuf, JsonValue>,
}

impl Dereferencer {
    /// Create a dereferencer whose root document is already loaded
    pub fn new(root_path: &Path, root: JsonValue) -> Self {
        let mut documents = HashMap::new();
        documents.insert(root_path.to_path_buf(), root);
        Self { documents }
    }

    /// Return a copy of the root document with all references expanded
    pub fn dereference(&mut self, root_path: &Path) -> Result<JsonValue, String> {
        let root = self.document(root_path)?.clone();
        let mut active = Vec::new();
        self.resolve_value(&root, root_path, &mut active)
    }

    fn resolve_value(
        &mut self,
        value: &JsonValue,
        doc_path: &Path,
        active: &mut Vec<String>,
    ) -> Result<JsonValue, String> {
        match value {
            JsonValue::Object(obj) => {
                if let Some(ref_str) = obj.get("$ref").and_then(JsonValue::as_str) {
                    return self.resolve_ref(value, ref_str, doc_path, active);
                }

                let mut resolved = Map::with_capacity(obj.len());
                for (key, val) in obj {
                    resolved.insert(key.clone(), self.resolve_value(val, doc_path, active)?);
                }
                Ok(JsonValue::Object(resolved))
            }
            JsonValue::Array(items) => items
                .iter()
                .map(|item| self.resolve_value(item, doc_path, active))
                .collect::<Result<Vec<_>, _>>()
                .map(JsonValue::Array),
            _ => Ok(value.clone()),
        }
    }

    fn resolve_ref(
        &mut self,
        original: &JsonValue,
        ref_str: &str,
        doc_path: &Path,
        active: &mut Vec<String>,
    ) -> Result<JsonValue, String> {
        let (file, fragment) = ref_str.split_once('#').unwrap_or((ref_str, ""));
        // References are URIs, so the fragment may be percent-encoded
        let pointer = percent_decode_str(fragment)
            .decode_utf8()
            .map_err(|e| format!("Invalid reference {ref_str}: {e}"))?;
        let target_path = if file.is_empty() {
            doc_path.to_path_buf()
        } else {
            doc_path
                .parent()
                .map(|dir| dir.join(file))
                .unwrap_or_else(|| PathBuf::from(file))
        };

        let key = format!("{}#{}", target_path.display(), pointer);
        if active.contains(&key) {
            tracing::debug!("Leaving circular reference {ref_str} unexpanded");
            return Ok(original.clone());
        }

        let target = self
            .document(&target_path)?
            .pointer(&pointer)
            .cloned()
            .ok_or_else(|| format!("Unable to resolve reference: {ref_str}"))?;

        active.push(key);
        let resolved = self.resolve_value(&target, &target_path, active);
        active.pop();
        resolved
    }

    fn document(&mut self, path: &Path) -> Result<&JsonValue, String> {
        if !self.documents.contains_key(path) {
            tracing::debug!("Loading referenced document {}", path.display());
            let content = std::fs::read_to_string(path).map_err(|e| {
                format!("Failed to read referenced document {}: {e}", path.display())
            })?;
            let value = parse_document(path, &content)?;
            self.documents.insert(path.to_path_buf(), value);
        }

        self.documents
            .get(path)
            .ok_or_else(|| format!("Document {} is not loaded", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_internal_refs_are_expanded() {
        let root = json!({
            "paths": {
                "/todos": {
                    "get": {
                        "responses": {
                            "200": { "$ref": "#/components/responses/TodoList" }
                        }
                    }
                }
            },
            "components": {
                "responses": {
                    "TodoList": {
                        "description": "ok",
                        "content": {
                            "application/json": {
                                "schema": { "$ref": "#/components/schemas/Todo" }
                            }
                        }
                    }
                },
                "schemas": {
                    "Todo": { "type": "object", "properties": { "id": { "type": "string" } } }
                }
            }
        });

        let path = Path::new("todos.yml");
        let resolved = Dereferencer::new(path, root).dereference(path).unwrap();
        let schema = resolved
            .pointer("/paths/~1todos/get/responses/200/content/application~1json/schema")
            .unwrap();
        assert_eq!(schema["type"], "object");
        assert!(schema.get("$ref").is_none());
    }

    #[test]
    fn test_circular_refs_terminate() {
        let root = json!({
            "components": {
                "schemas": {
                    "Node": {
                        "type": "object",
                        "properties": { "next": { "$ref": "#/components/schemas/Node" } }
                    }
                }
            },
            "paths": {
                "/nodes": {
                    "get": {
                        "responses": {
                            "200": {
                                "description": "ok",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/Node" }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        });

        let path = Path::new("nodes.json");
        let resolved = Dereferencer::new(path, root).dereference(path).unwrap();
        let schema = resolved
            .pointer("/paths/~1nodes/get/responses/200/content/application~1json/schema")
            .unwrap();
        assert_eq!(schema["type"], "object");
        assert_eq!(
            schema["properties"]["next"]["$ref"],
            "#/components/schemas/Node"
        );
    }

    #[test]
    fn test_percent_encoded_refs_are_decoded() {
        let root = json!({
            "paths": {
                "/todos": {
                    "get": {
                        "responses": {
                            "200": { "$ref": "#/components/responses/Todo%20List" }
                        }
                    }
                },
                "/todos/{id}": {
                    "get": { "responses": { "200": { "description": "one todo" } } }
                },
                "/current": { "$ref": "#/paths/~1todos~1%7Bid%7D" }
            },
            "components": {
                "responses": {
                    "Todo List": { "description": "all todos" }
                }
            }
        });

        let path = Path::new("todos.yml");
        let resolved = Dereferencer::new(path, root).dereference(path).unwrap();
        assert_eq!(
            resolved["paths"]["/todos"]["get"]["responses"]["200"]["description"],
            "all todos"
        );
        assert_eq!(
            resolved["paths"]["/current"]["get"]["responses"]["200"]["description"],
            "one todo"
        );
    }

    #[test]
    fn test_unresolvable_ref_fails() {
        let root = json!({ "paths": { "/a": { "$ref": "#/missing" } } });
        let path = Path::new("broken.json");
        let err = Dereferencer::new(path, root).dereference(path).unwrap_err();
        assert!(err.contains("#/missing"));
    }

    #[test]
    fn test_external_refs_are_loaded_relative_to_document() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let mut common = std::fs::File::create(dir.path().join("common.yaml")).unwrap();
        writeln!(common, "Todo:\n  type: object\n  title: Todo").unwrap();

        let root_path = dir.path().join("api.json");
        let root = json!({
            "components": { "schemas": { "Todo": { "$ref": "common.yaml#/Todo" } } }
        });

        let resolved = Dereferencer::new(&root_path, root)
            .dereference(&root_path)
            .unwrap();
        assert_eq!(resolved["components"]["schemas"]["Todo"]["title"], "Todo");
    }
}
