//! Registry for language-specific backends

use std::collections::HashMap;
use std::sync::Arc;

use crate::generation::{Backend, GenerationError, Language, Result};

/// Registry that maps a language to the backend generating it
pub struct BackendRegistry {
    backends: HashMap<Language, Arc<dyn Backend>>,
}

impl BackendRegistry {
    /// Create a registry without any backend
    pub fn empty() -> Self {
        Self {
            backends: HashMap::new(),
        }
    }

    /// Create a registry with every built-in backend
    pub fn with_defaults() -> Result<Self> {
        let mut registry = Self::empty();
        registry.register(Arc::new(super::TypeScriptBackend::new()?));
        Ok(registry)
    }

    /// Register a backend under the language it reports
    pub fn register(&mut self, backend: Arc<dyn Backend>) {
        self.backends.insert(backend.language(), backend);
    }

    /// Get the backend for a configured language name
    pub fn get(&self, language: &str) -> Result<Arc<dyn Backend>> {
        let parsed: Language = language.parse()?;
        self.backends
            .get(&parsed)
            .cloned()
            .ok_or_else(|| GenerationError::UnsupportedLanguage(language.to_string()))
    }

    /// Check if a language has a registered backend
    pub fn has_backend(&self, language: Language) -> bool {
        self.backends.contains_key(&language)
    }

    /// Get all supported languages
    pub fn supported_languages(&self) -> Vec<Language> {
        let mut languages: Vec<Language> = self.backends.keys().copied().collect();
        languages.sort_by_key(|language| language.to_string());
        languages
    }
}
