//! Structural validation of parsed JSON against the UI contract

use serde_json::{Map, Value};

use crate::error::ParseError;
use crate::schema::{Attribute, ComponentType};

use super::ir::{NodeId, ValidatedNode, ValidatedUi};
use super::ParseOptions;

const ROOT_FIELDS: &[&str] = &["components"];
const COMPONENT_FIELDS: &[&str] = &["type", "label", "children", "attributes"];
const ATTRIBUTE_FIELDS: &[&str] = &["name", "value"];

/// A component value waiting to be checked
struct Pending<'a> {
    value: &'a Value,
    path: String,
    parent: Option<NodeId>,
}

/// Check a parsed document and flatten it into a [`ValidatedUi`]
///
/// Walks the document with an explicit stack, so input depth never turns
/// into call-stack depth here. The first violation found is returned.
pub fn validate(value: &Value, options: &ParseOptions) -> Result<ValidatedUi, ParseError> {
    let root = value.as_object().ok_or_else(|| {
        ParseError::schema(
            "$",
            format!("expected an object, found {}", json_kind(value)),
        )
    })?;
    if options.strict {
        reject_unknown_fields(root, ROOT_FIELDS, "")?;
    }

    let components = match root.get("components") {
        Some(Value::Array(items)) => items,
        Some(other) => {
            return Err(ParseError::schema(
                "components",
                format!("expected an array, found {}", json_kind(other)),
            ))
        }
        None => return Err(ParseError::schema("components", "missing required field")),
    };

    let mut ui = ValidatedUi::default();
    let mut stack: Vec<Pending<'_>> = components
        .iter()
        .enumerate()
        .rev()
        .map(|(i, value)| Pending {
            value,
            path: format!("components[{}]", i),
            parent: None,
        })
        .collect();

    while let Some(Pending {
        value,
        path,
        parent,
    }) = stack.pop()
    {
        let (node, children) = check_component(value, path, options)?;
        let child_base = node.path.clone();
        let id = ui.push(parent, node);
        stack.extend(
            children
                .iter()
                .enumerate()
                .rev()
                .map(|(i, value)| Pending {
                    value,
                    path: format!("{}.children[{}]", child_base, i),
                    parent: Some(id),
                }),
        );
    }

    Ok(ui)
}

/// Validate one component's own fields; children are returned unchecked
fn check_component<'a>(
    value: &'a Value,
    path: String,
    options: &ParseOptions,
) -> Result<(ValidatedNode, &'a [Value]), ParseError> {
    let object = value.as_object().ok_or_else(|| {
        ParseError::schema(
            &path,
            format!("expected a component object, found {}", json_kind(value)),
        )
    })?;
    if options.strict {
        reject_unknown_fields(object, COMPONENT_FIELDS, &path)?;
    }

    let type_name = required_string(object, "type", &path)?;
    let kind: ComponentType = type_name.parse().map_err(|_| {
        ParseError::schema(
            field_path(&path, "type"),
            format!(
                "unknown component type '{}' (expected one of: {})",
                type_name,
                ComponentType::expected_list()
            ),
        )
    })?;
    let label = required_string(object, "label", &path)?.to_string();

    let attributes = optional_array(object, "attributes", &path)?
        .iter()
        .enumerate()
        .map(|(i, item)| {
            check_attribute(item, format!("{}.attributes[{}]", path, i), options)
        })
        .collect::<Result<Vec<_>, _>>()?;
    let children = optional_array(object, "children", &path)?;

    let node = ValidatedNode {
        kind,
        label,
        attributes,
        children: Vec::with_capacity(children.len()),
        path,
    };
    Ok((node, children))
}

fn check_attribute(
    value: &Value,
    path: String,
    options: &ParseOptions,
) -> Result<Attribute, ParseError> {
    let object = value.as_object().ok_or_else(|| {
        ParseError::schema(
            &path,
            format!("expected an attribute object, found {}", json_kind(value)),
        )
    })?;
    if options.strict {
        reject_unknown_fields(object, ATTRIBUTE_FIELDS, &path)?;
    }

    let name = required_string(object, "name", &path)?;
    let value = required_string(object, "value", &path)?;
    Attribute::new(name, value)
        .map_err(|e| ParseError::schema(field_path(&path, "name"), e.to_string()))
}

fn required_string<'a>(
    object: &'a Map<String, Value>,
    field: &str,
    path: &str,
) -> Result<&'a str, ParseError> {
    match object.get(field) {
        Some(Value::String(s)) => Ok(s.as_str()),
        Some(other) => Err(ParseError::schema(
            field_path(path, field),
            format!("expected a string, found {}", json_kind(other)),
        )),
        None => Err(ParseError::schema(
            field_path(path, field),
            "missing required field",
        )),
    }
}

/// Absent and `null` both mean an empty sequence
fn optional_array<'a>(
    object: &'a Map<String, Value>,
    field: &str,
    path: &str,
) -> Result<&'a [Value], ParseError> {
    match object.get(field) {
        Some(Value::Array(items)) => Ok(items.as_slice()),
        None | Some(Value::Null) => Ok(&[][..]),
        Some(other) => Err(ParseError::schema(
            field_path(path, field),
            format!("expected an array, found {}", json_kind(other)),
        )),
    }
}

fn reject_unknown_fields(
    object: &Map<String, Value>,
    known: &[&str],
    path: &str,
) -> Result<(), ParseError> {
    match object.keys().find(|key| !known.contains(&key.as_str())) {
        Some(key) => Err(ParseError::schema(
            field_path(path, key),
            format!("unknown field (expected one of: {})", known.join(", ")),
        )),
        None => Ok(()),
    }
}

fn field_path(path: &str, field: &str) -> String {
    if path.is_empty() {
        field.to_string()
    } else {
        format!("{}.{}", path, field)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
