//! Port interfaces for the generation domain

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use crate::config::ProjectConfig;
use crate::generation::{Artifact, Language, OperationPlan, RenderedFile, Result};
use crate::infrastructure::openapi::SpecResolution;

/// A target-language backend.
///
/// Backends are registered per [`Language`]; the orchestrator never branches
/// on the language itself.
pub trait Backend: Send + Sync {
    /// Language this backend emits
    fn language(&self) -> Language;

    /// Shared, service-independent artifacts, emitted once per run
    fn emit_base_artifacts(&self, config: &ProjectConfig) -> Result<Vec<Artifact>>;

    /// The controller artifact for one service
    fn generate_controller(&self, config: &ProjectConfig, plan: &OperationPlan)
    -> Result<Artifact>;

    /// Serialize an artifact to source text
    fn render(&self, artifact: &Artifact) -> Result<String>;
}

/// Loads and resolves the OpenAPI document of a service
#[async_trait]
pub trait SpecLoader: Send + Sync {
    async fn load(&self, service: &str, source: &Path) -> Result<SpecResolution>;
}

/// Persists rendered artifacts to the project output target
#[async_trait]
pub trait OutputService: Send + Sync {
    /// Source files already present under the project root
    async fn existing_files(&self, root: &Path) -> Result<Vec<PathBuf>>;

    /// Write every file, overwriting existing ones
    async fn write_files(&self, files: &[RenderedFile]) -> Result<()>;
}
