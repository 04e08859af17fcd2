//! JSON Schema describing the accepted input document

use serde_json::{json, Value};

use super::types::ComponentType;

/// The JSON Schema a constrained generator is asked to follow
///
/// `Component` is recursive through `$defs`, so children may nest to any
/// depth in the schema itself; depth limits are enforced when the tree is
/// built.
pub fn ui_schema() -> Value {
    let kinds: Vec<&str> = ComponentType::ALL.iter().map(|t| t.as_str()).collect();

    json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "title": "UI",
        "type": "object",
        "required": ["components"],
        "properties": {
            "components": {
                "type": "array",
                "items": { "$ref": "#/$defs/Component" }
            }
        },
        "$defs": {
            "ComponentType": {
                "type": "string",
                "enum": kinds
            },
            "Attribute": {
                "type": "object",
                "required": ["name", "value"],
                "properties": {
                    "name": { "type": "string" },
                    "value": { "type": "string" }
                }
            },
            "Component": {
                "type": "object",
                "required": ["type", "label"],
                "properties": {
                    "type": { "$ref": "#/$defs/ComponentType" },
                    "label": { "type": "string" },
                    "children": {
                        "type": "array",
                        "items": { "$ref": "#/$defs/Component" },
                        "default": []
                    },
                    "attributes": {
                        "type": "array",
                        "items": { "$ref": "#/$defs/Attribute" },
                        "default": []
                    }
                }
            }
        }
    })
}
