//! Resolved OpenAPI documents and the operations found in them

use serde_json::{Map, Value as JsonValue};
use std::fmt;
use std::path::{Path, PathBuf};

/// HTTP verbs that produce controller methods
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpVerb {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpVerb {
    /// Get all supported verbs
    pub fn all() -> &'static [HttpVerb] {
        &[HttpVerb::Get, HttpVerb::Post, HttpVerb::Put, HttpVerb::Delete]
    }

    /// Match a path-item key against the supported verbs.
    ///
    /// Keys are matched case-sensitively, as OpenAPI requires lowercase.
    pub fn from_key(key: &str) -> Option<HttpVerb> {
        match key {
            "get" => Some(HttpVerb::Get),
            "post" => Some(HttpVerb::Post),
            "put" => Some(HttpVerb::Put),
            "delete" => Some(HttpVerb::Delete),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpVerb::Get => "get",
            HttpVerb::Post => "post",
            HttpVerb::Put => "put",
            HttpVerb::Delete => "delete",
        }
    }
}

impl fmt::Display for HttpVerb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated, dereferenced OpenAPI document belonging to one service
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSpec {
    pub service: String,
    pub source: PathBuf,
    pub document: JsonValue,
}

impl ResolvedSpec {
    pub fn new(service: impl Into<String>, source: impl Into<PathBuf>, document: JsonValue) -> Self {
        Self {
            service: service.into(),
            source: source.into(),
            document,
        }
    }

    /// The `paths` map, in document order
    pub fn paths(&self) -> Option<&Map<String, JsonValue>> {
        self.document.get("paths").and_then(JsonValue::as_object)
    }

    /// Whether the document declares at least one path
    pub fn has_paths(&self) -> bool {
        self.paths().is_some_and(|paths| !paths.is_empty())
    }
}

/// Outcome of resolving a service's document
#[derive(Debug, Clone, PartialEq)]
pub enum SpecResolution {
    /// The document declares paths to generate from
    Operations(ResolvedSpec),
    /// The document has no `paths` map, or it is empty
    NoOperations { service: String, source: PathBuf },
}

impl SpecResolution {
    /// Classify a resolved document by whether it declares any paths
    pub fn from_spec(spec: ResolvedSpec) -> Self {
        if spec.has_paths() {
            SpecResolution::Operations(spec)
        } else {
            SpecResolution::NoOperations {
                service: spec.service,
                source: spec.source,
            }
        }
    }

    pub fn source(&self) -> &Path {
        match self {
            SpecResolution::Operations(spec) => &spec.source,
            SpecResolution::NoOperations { source, .. } => source,
        }
    }
}

/// One (path, verb) operation of a document
#[derive(Debug, Clone, PartialEq)]
pub struct OperationDescriptor {
    pub path: String,
    pub verb: HttpVerb,
    pub operation: Map<String, JsonValue>,
}

/// A 2xx response of an operation
#[derive(Debug, Clone, PartialEq)]
pub struct SuccessResponse<'a> {
    pub status: u16,
    pub response: &'a JsonValue,
}

impl SuccessResponse<'_> {
    /// The `application/json` payload schema, if the response declares one
    pub fn json_schema(&self) -> Option<&JsonValue> {
        self.response
            .get("content")
            .and_then(|content| content.get("application/json"))
            .and_then(|media| media.get("schema"))
    }
}

impl OperationDescriptor {
    pub fn new(path: impl Into<String>, verb: HttpVerb, operation: Map<String, JsonValue>) -> Self {
        Self {
            path: path.into(),
            verb,
            operation,
        }
    }

    /// Responses whose status code is in [200, 300), in document order.
    ///
    /// Non-numeric codes such as `default` or `2XX` are not included.
    pub fn success_responses(&self) -> Vec<SuccessResponse<'_>> {
        self.operation
            .get("responses")
            .and_then(JsonValue::as_object)
            .map(|responses| {
                responses
                    .iter()
                    .filter_map(|(code, response)| {
                        let status = code.parse::<u16>().ok()?;
                        (200..300)
                            .contains(&status)
                            .then_some(SuccessResponse { status, response })
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Label used in diagnostics, e.g. `GET /todos/{id}`
    pub fn label(&self) -> String {
        format!("{} {}", self.verb.as_str().to_uppercase(), self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_verb_from_key() {
        assert_eq!(HttpVerb::from_key("get"), Some(HttpVerb::Get));
        assert_eq!(HttpVerb::from_key("delete"), Some(HttpVerb::Delete));
        assert_eq!(HttpVerb::from_key("patch"), None);
        assert_eq!(HttpVerb::from_key("parameters"), None);
        assert_eq!(HttpVerb::from_key("GET"), None);
        assert_eq!(HttpVerb::all().len(), 4);
    }

    #[test]
    fn test_resolution_without_paths() {
        let spec = ResolvedSpec::new("todos", "todos.yml", json!({"openapi": "3.0.0"}));
        assert!(matches!(
            SpecResolution::from_spec(spec),
            SpecResolution::NoOperations { .. }
        ));

        let spec = ResolvedSpec::new("todos", "todos.yml", json!({"paths": {}}));
        assert!(matches!(
            SpecResolution::from_spec(spec),
            SpecResolution::NoOperations { .. }
        ));

        let spec = ResolvedSpec::new("todos", "todos.yml", json!({"paths": {"/todos": {}}}));
        assert!(matches!(
            SpecResolution::from_spec(spec),
            SpecResolution::Operations(_)
        ));
    }

    #[test]
    fn test_success_responses_filters_range() {
        let operation = json!({
            "responses": {
                "200": {
                    "description": "ok",
                    "content": {"application/json": {"schema": {"type": "array"}}}
                },
                "201": {"description": "created"},
                "2XX": {"description": "range"},
                "300": {"description": "redirect"},
                "404": {"description": "missing"},
                "default": {"description": "error"}
            }
        });
        let descriptor = OperationDescriptor::new(
            "/todos",
            HttpVerb::Get,
            operation.as_object().unwrap().clone(),
        );

        let responses = descriptor.success_responses();
        let codes: Vec<u16> = responses.iter().map(|r| r.status).collect();
        assert_eq!(codes, vec![200, 201]);
        assert_eq!(responses[0].json_schema(), Some(&json!({"type": "array"})));
        assert_eq!(responses[1].json_schema(), None);
        assert_eq!(descriptor.label(), "GET /todos");
    }
}
