//! Generation domain module - orchestrates code generation workflow
//!
//! Turns a project configuration and the OpenAPI documents of its services
//! into controller artifacts. Language specifics live behind [`Backend`];
//! this module only plans operations and sequences the run.

pub mod errors;
pub mod naming;
pub mod operations;
pub mod orchestrator;
pub mod traits;
pub mod types;

pub use errors::*;
pub use naming::DerivedNames;
pub use operations::*;
pub use orchestrator::*;
pub use traits::*;
pub use types::*;
