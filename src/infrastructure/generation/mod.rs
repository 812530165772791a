//! Generation infrastructure implementations

pub mod backends;
pub mod source_renderer;

pub use backends::{BackendRegistry, TypeScriptBackend};
pub use source_renderer::TeraSourceRenderer;
