//! Error types for the generation domain

use std::path::PathBuf;

use thiserror::Error;

/// Result alias used across the generation pipeline
pub type Result<T> = std::result::Result<T, GenerationError>;

/// Errors that can occur during a generation run.
///
/// Every variant is fatal to the whole run.
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error(
        "Haku config file is missing in folder '{}' (looked for: {})",
        working_dir.display(),
        candidates.join(", ")
    )]
    ConfigMissing {
        working_dir: PathBuf,
        candidates: Vec<String>,
    },

    #[error(
        "Invalid Haku config file '{}':\n  - {}",
        path.display(),
        violations.join("\n  - ")
    )]
    ConfigInvalid {
        path: PathBuf,
        violations: Vec<String>,
    },

    #[error("Language {0} not implemented")]
    UnsupportedLanguage(String),

    #[error("Invalid OpenAPI document for service '{service}' at '{}': {reason}", path.display())]
    SpecInvalid {
        service: String,
        path: PathBuf,
        reason: String,
    },

    #[error(
        "Name collision in service '{service}': {first} and {second} both derive '{identifier}'"
    )]
    NameCollision {
        service: String,
        identifier: String,
        first: String,
        second: String,
    },

    #[error("Failed to write artifact '{}': {source}", path.display())]
    ArtifactWriteFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to inspect output directory '{}': {source}", path.display())]
    OutputScan {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to render artifact '{}': {message}", path.display())]
    Render { path: PathBuf, message: String },
}

impl GenerationError {
    /// Create a `SpecInvalid` error for the given service and document
    pub fn spec_invalid(
        service: impl Into<String>,
        path: impl Into<PathBuf>,
        reason: impl std::fmt::Display,
    ) -> Self {
        Self::SpecInvalid {
            service: service.into(),
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Create an `ArtifactWriteFailure` for the given target path
    pub fn write_failure(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ArtifactWriteFailure {
            path: path.into(),
            source,
        }
    }

    /// Create an `OutputScan` error for a directory that could not be read
    pub fn scan_failure(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::OutputScan {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_missing_names_working_dir() {
        let err = GenerationError::ConfigMissing {
            working_dir: PathBuf::from("/work/project"),
            candidates: vec!["haku.yml".to_string(), "haku.yaml".to_string()],
        };
        let msg = err.to_string();
        assert!(msg.contains("/work/project"));
        assert!(msg.contains("haku.yml, haku.yaml"));
    }

    #[test]
    fn test_config_invalid_lists_every_violation() {
        let err = GenerationError::ConfigInvalid {
            path: PathBuf::from("haku.yml"),
            violations: vec![
                "\"version\" is a required property".to_string(),
                "\"services\" is a required property".to_string(),
            ],
        };
        let msg = err.to_string();
        assert!(msg.contains("\"version\" is a required property"));
        assert!(msg.contains("\"services\" is a required property"));
    }

    #[test]
    fn test_spec_invalid_is_tagged() {
        let err = GenerationError::spec_invalid("todos", "specs/todos.yml", "missing info");
        let msg = err.to_string();
        assert!(msg.contains("'todos'"));
        assert!(msg.contains("specs/todos.yml"));
        assert!(msg.contains("missing info"));
    }

    #[test]
    fn test_scan_failure_is_not_a_write_failure() {
        let err = GenerationError::scan_failure(
            "/work/project/src",
            std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        );
        assert!(matches!(err, GenerationError::OutputScan { .. }));
        assert!(err.to_string().starts_with("Failed to inspect output directory '/work/project/src'"));
    }
}
