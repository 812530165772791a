//! Per-language backends

pub mod registry;
pub mod typescript;

pub use registry::BackendRegistry;
pub use typescript::TypeScriptBackend;
