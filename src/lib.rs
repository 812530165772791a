//! Haku generates controller skeletons for web services from a project
//! configuration (`haku.yml`) and the OpenAPI documents of its services.
#![deny(unsafe_code)]

pub mod config;
pub mod generation;
pub mod infrastructure;
