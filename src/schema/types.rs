//! Component tree types

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

/// Closed set of component kinds a generated UI may use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentType {
    Div,
    Button,
    Header,
    Section,
    Field,
    Form,
}

impl ComponentType {
    /// Every accepted kind, in schema order
    pub const ALL: [ComponentType; 6] = [
        ComponentType::Div,
        ComponentType::Button,
        ComponentType::Header,
        ComponentType::Section,
        ComponentType::Field,
        ComponentType::Form,
    ];

    /// Tag name used in JSON and in rendered markup
    pub fn as_str(self) -> &'static str {
        match self {
            ComponentType::Div => "div",
            ComponentType::Button => "button",
            ComponentType::Header => "header",
            ComponentType::Section => "section",
            ComponentType::Field => "field",
            ComponentType::Form => "form",
        }
    }

    /// Comma-separated list of accepted names, for diagnostics
    pub fn expected_list() -> String {
        Self::ALL
            .iter()
            .map(|t| t.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A component type name outside the closed set
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown component type '{0}'")]
pub struct UnknownComponentType(pub String);

impl FromStr for ComponentType {
    type Err = UnknownComponentType;

    /// Exact, case-sensitive match: `"Div"` and `" div"` are rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownComponentType(s.to_string()))
    }
}

/// An attribute name that cannot be written unquoted into a tag
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{0}' is not a valid attribute name")]
pub struct InvalidAttributeName(pub String);

/// A `name="value"` pair on a component's opening tag
///
/// Values are escaped when rendered; names cannot be, so they are checked
/// here instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attribute {
    name: String,
    value: String,
}

impl Attribute {
    pub fn new(
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<Self, InvalidAttributeName> {
        let name = name.into();
        if !Self::is_valid_name(&name) {
            return Err(InvalidAttributeName(name));
        }
        Ok(Self {
            name,
            value: value.into(),
        })
    }

    /// Names that can appear unquoted before `=` in an opening tag
    pub fn is_valid_name(name: &str) -> bool {
        !name.is_empty()
            && name.chars().all(|c| {
                !c.is_whitespace()
                    && !c.is_control()
                    && !matches!(c, '"' | '\'' | '<' | '>' | '/' | '=' | '&')
            })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

/// A single node of a UI tree
///
/// Each component owns its children, so a tree can never contain shared
/// subtrees or back-references. Fields are read-only once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Component {
    #[serde(rename = "type")]
    kind: ComponentType,
    label: String,
    children: Vec<Component>,
    attributes: Vec<Attribute>,
}

impl Component {
    /// Create a component with no children or attributes
    pub fn new(kind: ComponentType, label: impl Into<String>) -> Self {
        Self {
            kind,
            label: label.into(),
            children: Vec::new(),
            attributes: Vec::new(),
        }
    }

    pub(crate) fn from_parts(
        kind: ComponentType,
        label: String,
        attributes: Vec<Attribute>,
        children: Vec<Component>,
    ) -> Self {
        Self {
            kind,
            label,
            children,
            attributes,
        }
    }

    /// Append a child component
    pub fn with_child(mut self, child: Component) -> Self {
        self.children.push(child);
        self
    }

    /// Append an attribute, rejecting names that cannot be rendered
    pub fn with_attribute(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<Self, InvalidAttributeName> {
        self.attributes.push(Attribute::new(name, value)?);
        Ok(self)
    }

    pub fn kind(&self) -> ComponentType {
        self.kind
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn children(&self) -> &[Component] {
        &self.children
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Number of components in this subtree, including this one
    pub fn count(&self) -> usize {
        let mut total = 0;
        let mut stack = vec![self];
        while let Some(component) = stack.pop() {
            total += 1;
            stack.extend(component.children.iter());
        }
        total
    }

    /// Number of levels in this subtree (a leaf has depth 1)
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(self, 1usize)];
        while let Some((component, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            stack.extend(component.children.iter().map(|c| (c, depth + 1)));
        }
        deepest
    }
}

/// Root of a generated interface: ordered top-level sibling components
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Ui {
    components: Vec<Component>,
}

impl Ui {
    pub fn new(components: Vec<Component>) -> Self {
        Self { components }
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Total number of components across all top-level trees
    pub fn count(&self) -> usize {
        self.components.iter().map(Component::count).sum()
    }

    /// Deepest nesting level across all top-level trees (0 when empty)
    pub fn depth(&self) -> usize {
        self.components
            .iter()
            .map(Component::depth)
            .max()
            .unwrap_or(0)
    }

    /// Serialize back to the input JSON shape
    pub fn to_json_pretty(&self) -> String {
        // Only strings, sequences and unit enum variants: serialization cannot fail.
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_type_round_trips_names() {
        for kind in ComponentType::ALL {
            assert_eq!(kind.as_str().parse::<ComponentType>(), Ok(kind));
        }
    }

    #[test]
    fn test_component_type_is_case_sensitive() {
        assert!("Div".parse::<ComponentType>().is_err());
        assert!("FORM".parse::<ComponentType>().is_err());
        assert!(" div".parse::<ComponentType>().is_err());
        assert_eq!(
            "unknown".parse::<ComponentType>(),
            Err(UnknownComponentType("unknown".to_string()))
        );
    }

    #[test]
    fn test_expected_list() {
        assert_eq!(
            ComponentType::expected_list(),
            "div, button, header, section, field, form"
        );
    }

    #[test]
    fn test_builder_preserves_order() {
        let form = Component::new(ComponentType::Form, "Login")
            .with_attribute("id", "login")
            .unwrap()
            .with_attribute("method", "post")
            .unwrap()
            .with_child(Component::new(ComponentType::Field, "Username"))
            .with_child(Component::new(ComponentType::Button, "Submit"));

        let names: Vec<_> = form.attributes().iter().map(Attribute::name).collect();
        assert_eq!(names, vec!["id", "method"]);
        assert_eq!(form.children()[0].kind(), ComponentType::Field);
        assert_eq!(form.children()[1].label(), "Submit");
    }

    #[test]
    fn test_attribute_names_are_checked() {
        for bad in ["", "on click", "x\"><script>", "a=b", "a/b", "tab\t", "amp&"] {
            assert_eq!(Attribute::new(bad, "v"), Err(InvalidAttributeName(bad.to_string())));
        }
        assert!(Attribute::new("data-id", "<x>").is_ok());
        assert!(Attribute::new("aria-label", "").is_ok());

        let err = Component::new(ComponentType::Div, "")
            .with_attribute("x\"><script>", "v")
            .unwrap_err();
        assert_eq!(err.to_string(), "'x\"><script>' is not a valid attribute name");
    }

    #[test]
    fn test_count_and_depth() {
        let tree = Component::new(ComponentType::Section, "").with_child(
            Component::new(ComponentType::Div, "")
                .with_child(Component::new(ComponentType::Button, "Go")),
        );
        assert_eq!(tree.count(), 3);
        assert_eq!(tree.depth(), 3);

        let ui = Ui::new(vec![tree, Component::new(ComponentType::Header, "Top")]);
        assert_eq!(ui.count(), 4);
        assert_eq!(ui.depth(), 3);
        assert_eq!(Ui::default().depth(), 0);
    }

    #[test]
    fn test_serializes_to_input_shape() {
        let ui = Ui::new(vec![
            Component::new(ComponentType::Button, "OK")
                .with_attribute("type", "submit")
                .unwrap()
        ]);
        let value = serde_json::to_value(&ui).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "components": [{
                    "type": "button",
                    "label": "OK",
                    "children": [],
                    "attributes": [{"name": "type", "value": "submit"}]
                }]
            })
        );
    }
}
