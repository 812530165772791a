//! Generation orchestration - coordinates the generation workflow

use std::path::Path;
use std::sync::Arc;

use crate::config::{ConfigResolver, ConfigValidator};
use crate::generation::{
    GenerationReport, OperationPlan, OutputService, RenderedFile, Result, SpecLoader,
};
use crate::infrastructure::generation::BackendRegistry;
use crate::infrastructure::openapi::{FileSpecLoader, SpecResolution};
use crate::infrastructure::output::FileSystemOutputService;

/// Orchestrates a whole-project generation run
pub struct ProjectOrchestrator {
    registry: Arc<BackendRegistry>,
    spec_loader: Arc<dyn SpecLoader>,
    output: Arc<dyn OutputService>,
    validator: ConfigValidator,
}

impl ProjectOrchestrator {
    /// Create a new project orchestrator
    pub fn new(
        registry: Arc<BackendRegistry>,
        spec_loader: Arc<dyn SpecLoader>,
        output: Arc<dyn OutputService>,
    ) -> Self {
        Self {
            registry,
            spec_loader,
            output,
            validator: ConfigValidator::new(),
        }
    }

    /// Orchestrator reading documents from disk and writing to the filesystem
    pub fn with_defaults() -> Result<Self> {
        Ok(Self::new(
            Arc::new(BackendRegistry::with_defaults()?),
            Arc::new(FileSpecLoader::new()),
            Arc::new(FileSystemOutputService::new()),
        ))
    }

    /// Replace the configuration validator
    pub fn with_validator(mut self, validator: ConfigValidator) -> Self {
        self.validator = validator;
        self
    }

    /// Generate the project in `working_dir` and persist every artifact.
    ///
    /// Nothing is written unless every artifact was generated and rendered.
    pub async fn generate(&self, working_dir: &Path) -> Result<GenerationReport> {
        let (files, report) = self.prepare(working_dir).await?;

        self.output.write_files(&files).await?;
        tracing::info!(
            written = report.written.len(),
            overwritten = report.overwritten.len(),
            "Generation complete"
        );

        Ok(report)
    }

    /// Run the pipeline up to rendering without writing anything
    pub async fn check(&self, working_dir: &Path) -> Result<GenerationReport> {
        let (_, report) = self.prepare(working_dir).await?;
        tracing::info!(files = report.written.len(), "Check complete, nothing written");
        Ok(report)
    }

    async fn prepare(&self, working_dir: &Path) -> Result<(Vec<RenderedFile>, GenerationReport)> {
        // 1. Resolve config
        let config = ConfigResolver::new(&self.validator)
            .resolve(working_dir)
            .await?;

        // 2. Inspect the output target
        let existing = self.output.existing_files(working_dir).await?;

        // 3. Dispatch to the backend of the configured language
        let backend = self.registry.get(&config.compilation.language)?;
        tracing::info!(
            language = %backend.language(),
            services = config.services.len(),
            "Generating project"
        );

        // 4. Shared artifacts, then one controller per service
        let mut artifacts = backend.emit_base_artifacts(&config)?;
        let mut report = GenerationReport::default();

        for (service, descriptor) in &config.services {
            let source = descriptor.spec_location(working_dir);

            let spec = match self.spec_loader.load(service, &source).await? {
                SpecResolution::Operations(spec) => spec,
                SpecResolution::NoOperations { .. } => {
                    tracing::info!(service = %service, "No operations declared, skipping service");
                    report.skipped_services.push(service.clone());
                    continue;
                }
            };

            let plan = OperationPlan::build(&spec)?;
            artifacts.push(backend.generate_controller(&config, &plan)?);

            tracing::info!(
                service = %service,
                operations = plan.operations.len(),
                skipped = plan.skipped,
                "Generated controller"
            );
            report.skipped_entries += plan.skipped;
            report.generated_services.push(service.clone());
        }

        // 5. Render everything before anything is persisted
        let files = artifacts
            .iter()
            .map(|artifact| -> Result<RenderedFile> {
                let content = backend.render(artifact)?;
                Ok(RenderedFile::new(working_dir.join(artifact.path()), content))
            })
            .collect::<Result<Vec<_>>>()?;

        report.written = files.iter().map(|file| file.path.clone()).collect();
        report.overwritten = report
            .written
            .iter()
            .filter(|path| existing.contains(path))
            .cloned()
            .collect();

        Ok((files, report))
    }
}
