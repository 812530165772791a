//! Infrastructure layer - concrete implementations of domain ports

pub mod generation;
pub mod openapi;
pub mod output;
