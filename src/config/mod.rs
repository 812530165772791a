//! Project configuration loading and validation
//!
//! The configuration lives in `haku.yml` (or `haku.yaml`) in the working
//! directory. It is parsed as YAML, checked against [`PROJECT_CONFIG_SCHEMA`]
//! and only then deserialized into [`ProjectConfig`].

pub mod schema;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::generation::{GenerationError, Language, Result};
pub use schema::PROJECT_CONFIG_SCHEMA;

/// Configuration file names, in priority order
pub const CONFIG_CANDIDATES: [&str; 2] = ["haku.yml", "haku.yaml"];

/// A project configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectConfig {
    pub version: String,
    pub compilation: Compilation,
    pub services: IndexMap<String, ServiceDescriptor>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Compilation {
    pub language: String,
    pub engine: Engine,
    pub directories: Directories,
}

impl Compilation {
    /// The requested language, if this build knows it
    pub fn language(&self) -> Result<Language> {
        self.language.parse()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Engine {
    pub lib: String,
}

/// Output directories, relative to the project root
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Directories {
    /// Reserved for route generation
    pub routing: PathBuf,
    pub controllers: PathBuf,
    /// Reserved for use-case generation
    pub use_cases: PathBuf,
}

/// A service and the OpenAPI document describing it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDescriptor {
    pub spec_path: PathBuf,
}

impl ServiceDescriptor {
    /// Location of the document, resolving relative paths against `working_dir`
    pub fn spec_location(&self, working_dir: &Path) -> PathBuf {
        if self.spec_path.is_absolute() {
            self.spec_path.clone()
        } else {
            working_dir.join(&self.spec_path)
        }
    }
}

/// Schema validator for project configuration documents.
///
/// Constructed by whoever drives a run and passed to [`ConfigResolver`];
/// there is no shared global instance.
pub struct ConfigValidator {
    validator: jsonschema::Validator,
}

impl ConfigValidator {
    /// Validator for the built-in [`PROJECT_CONFIG_SCHEMA`]
    ///
    /// # Panics
    ///
    /// Only if the embedded schema fails to compile, which its unit tests rule out.
    pub fn new() -> Self {
        Self::with_schema(&PROJECT_CONFIG_SCHEMA).expect("built-in config schema is valid")
    }

    /// Validator for a custom schema
    pub fn with_schema(schema: &JsonValue) -> std::result::Result<Self, String> {
        jsonschema::validator_for(schema)
            .map(|validator| Self { validator })
            .map_err(|e| e.to_string())
    }

    /// Every violated constraint, empty when the document is valid
    pub fn violations(&self, instance: &JsonValue) -> Vec<String> {
        self.validator
            .iter_errors(instance)
            .map(|err| err.to_string())
            .collect()
    }
}

impl Default for ConfigValidator {
    fn default() -> Self {
        Self::new()
    }
}

/// Locates and validates the project configuration
pub struct ConfigResolver<'a> {
    validator: &'a ConfigValidator,
}

impl<'a> ConfigResolver<'a> {
    pub fn new(validator: &'a ConfigValidator) -> Self {
        Self { validator }
    }

    /// Resolve the configuration of the project in `working_dir`.
    ///
    /// The first existing candidate wins. A candidate that exists but does not
    /// parse or validate is an error; later candidates are not tried.
    pub async fn resolve(&self, working_dir: &Path) -> Result<ProjectConfig> {
        for candidate in CONFIG_CANDIDATES {
            let path = working_dir.join(candidate);

            let content = match fs::read_to_string(&path).await {
                Ok(content) => content,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    tracing::debug!(path = %path.display(), "Config candidate not found");
                    continue;
                }
                Err(e) => {
                    return Err(GenerationError::ConfigInvalid {
                        path,
                        violations: vec![format!("Unable to read file: {e}")],
                    });
                }
            };

            tracing::info!(path = %path.display(), "Using Haku config");
            return self.parse(&path, &content);
        }

        Err(GenerationError::ConfigMissing {
            working_dir: working_dir.to_path_buf(),
            candidates: CONFIG_CANDIDATES.iter().map(|c| c.to_string()).collect(),
        })
    }

    /// Parse and validate configuration content read from `path`
    pub fn parse(&self, path: &Path, content: &str) -> Result<ProjectConfig> {
        let invalid = |violations: Vec<String>| GenerationError::ConfigInvalid {
            path: path.to_path_buf(),
            violations,
        };

        let document: JsonValue = serde_yaml::from_str(content)
            .map_err(|e| invalid(vec![format!("YAML parsing error: {e}")]))?;

        let violations = self.validator.violations(&document);
        if !violations.is_empty() {
            return Err(invalid(violations));
        }

        serde_json::from_value(document).map_err(|e| invalid(vec![e.to_string()]))
    }
}
