//! JSON schema of the project configuration file

use once_cell::sync::Lazy;
use serde_json::{Value as JsonValue, json};

/// Schema every `haku.yml` must satisfy.
///
/// The language itself is only required to be a string; an unknown language
/// is rejected when a backend is selected, not here.
pub static PROJECT_CONFIG_SCHEMA: Lazy<JsonValue> = Lazy::new(|| {
    let directory = json!({ "type": "string", "minLength": 1 });

    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "type": "object",
        "required": ["version", "compilation", "services"],
        "properties": {
            "version": {
                "type": "string",
                "pattern": "^[0-9]+\\.[0-9]+\\.[0-9]+"
            },
            "compilation": {
                "type": "object",
                "required": ["language", "engine", "directories"],
                "properties": {
                    "language": { "type": "string", "minLength": 1 },
                    "engine": {
                        "type": "object",
                        "required": ["lib"],
                        "properties": { "lib": { "type": "string" } }
                    },
                    "directories": {
                        "type": "object",
                        "required": ["routing", "controllers", "useCases"],
                        "properties": {
                            "routing": directory,
                            "controllers": directory,
                            "useCases": directory
                        }
                    }
                },
                "allOf": [
                    engine_rule("typescript", &["express", "fastify"]),
                    engine_rule("python", &["flask"])
                ]
            },
            "services": {
                "type": "object",
                "propertyNames": { "pattern": "^[a-zA-Z_-]+$" },
                "additionalProperties": {
                    "type": "object",
                    "required": ["specPath"],
                    "properties": {
                        "specPath": { "type": "string", "minLength": 1 }
                    }
                }
            }
        }
    })
});

/// `engine.lib` must be one of `libs` when `language` is `language`
fn engine_rule(language: &str, libs: &[&str]) -> JsonValue {
    json!({
        "if": {
            "required": ["language"],
            "properties": { "language": { "const": language } }
        },
        "then": {
            "properties": {
                "engine": { "properties": { "lib": { "enum": libs } } }
            }
        }
    })
}
