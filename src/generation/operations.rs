//! Operation planning for controller generation
//!
//! Walks every path item of a resolved document and decides, entry by entry,
//! whether it becomes a controller method. The result is language independent;
//! backends only turn the plan into declarations.

use serde_json::Value as JsonValue;
use std::collections::HashMap;

use crate::generation::naming::DerivedNames;
use crate::generation::{GenerationError, Result};
use crate::infrastructure::openapi::{HttpVerb, OperationDescriptor, ResolvedSpec};

/// Decision for one entry of a path item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryStep {
    /// Key is not one of the supported verbs (`parameters`, `summary`, `patch`, ...)
    SkipNonHttpVerb,
    /// Verb entry is not an operation object, e.g. a bare string
    SkipDescriptionOnly,
    Emit(HttpVerb),
}

impl EntryStep {
    pub fn classify(key: &str, value: &JsonValue) -> Self {
        match HttpVerb::from_key(key) {
            None => EntryStep::SkipNonHttpVerb,
            Some(_) if !value.is_object() => EntryStep::SkipDescriptionOnly,
            Some(verb) => EntryStep::Emit(verb),
        }
    }
}

/// An operation that will become a controller method
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedOperation {
    pub descriptor: OperationDescriptor,
    pub names: DerivedNames,
}

/// Every operation of one service, in document order
#[derive(Debug, Clone, PartialEq)]
pub struct OperationPlan {
    pub service: String,
    pub operations: Vec<PlannedOperation>,
    pub skipped: usize,
}

impl OperationPlan {
    /// Plan the controller of `spec`'s service.
    ///
    /// Fails with [`GenerationError::NameCollision`] when two operations
    /// derive the same method name.
    pub fn build(spec: &ResolvedSpec) -> Result<Self> {
        let service = spec.service.as_str();
        let mut operations = Vec::new();
        let mut skipped = 0;
        let mut seen: HashMap<String, String> = HashMap::new();

        for (path, item) in spec.paths().into_iter().flatten() {
            let Some(item) = item.as_object() else {
                tracing::debug!(service, path = %path, "Skipping path without a path item object");
                continue;
            };

            for (key, value) in item {
                let verb = match EntryStep::classify(key, value) {
                    EntryStep::Emit(verb) => verb,
                    step => {
                        tracing::debug!(service, path = %path, key = %key, ?step, "Skipping path item entry");
                        skipped += 1;
                        continue;
                    }
                };

                let Some(operation) = value.as_object() else {
                    continue;
                };
                let descriptor = OperationDescriptor::new(path, verb, operation.clone());
                let names = DerivedNames::derive(path, verb.as_str());

                if let Some(first) = seen.insert(
                    names.method_operation_name.clone(),
                    descriptor.label(),
                ) {
                    return Err(GenerationError::NameCollision {
                        service: service.to_string(),
                        identifier: names.method_operation_name,
                        first,
                        second: descriptor.label(),
                    });
                }

                operations.push(PlannedOperation { descriptor, names });
            }
        }

        Ok(Self {
            service: service.to_string(),
            operations,
            skipped,
        })
    }
}
