//! Arena to owned-tree conversion with a depth guard

use std::mem;

use crate::parser::{NodeId, ValidatedNode, ValidatedUi};
use crate::schema::{Component, Ui};

use super::{TreeError, DEFAULT_MAX_DEPTH, MAX_DEPTH_CEILING};

/// Build a [`Ui`] allowing up to [`DEFAULT_MAX_DEPTH`] levels
pub fn materialize(validated: ValidatedUi) -> Result<Ui, TreeError> {
    materialize_with_depth(validated, DEFAULT_MAX_DEPTH)
}

/// Build a [`Ui`] whose components nest at most `max_depth` levels
///
/// Top-level components are at depth 1. A `max_depth` above
/// [`MAX_DEPTH_CEILING`] is capped to it. On failure nothing is returned;
/// nodes built so far are dropped.
pub fn materialize_with_depth(validated: ValidatedUi, max_depth: usize) -> Result<Ui, TreeError> {
    let max_depth = max_depth.min(MAX_DEPTH_CEILING);
    let (mut nodes, roots) = validated.into_nodes();

    let components = roots
        .into_iter()
        .map(|id| build(&mut nodes, id, 1, max_depth))
        .collect::<Result<Vec<_>, _>>()?;

    let ui = Ui::new(components);
    tracing::debug!(
        components = ui.count(),
        depth = ui.depth(),
        "materialized UI tree"
    );
    Ok(ui)
}

fn build(
    nodes: &mut [ValidatedNode],
    id: NodeId,
    depth: usize,
    max_depth: usize,
) -> Result<Component, TreeError> {
    let node = &mut nodes[id];
    if depth > max_depth {
        return Err(TreeError::depth_exceeded(mem::take(&mut node.path), max_depth));
    }

    // Every node is reached once from its single parent, so its fields can
    // be moved out.
    let kind = node.kind;
    let label = mem::take(&mut node.label);
    let attributes = mem::take(&mut node.attributes);
    let child_ids = mem::take(&mut node.children);

    let children = child_ids
        .into_iter()
        .map(|child| build(nodes, child, depth + 1, max_depth))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Component::from_parts(kind, label, attributes, children))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{parse, parse_with_options, ParseOptions};
    use crate::schema::ComponentType;

    /// `levels` nested divs, each with a single child; the leaf has no
    /// `children` key
    fn chain(levels: usize) -> String {
        let mut json = r#"{"type": "div", "label": ""}"#.to_string();
        for _ in 1..levels {
            json = format!(r#"{{"type": "div", "label": "", "children": [{}]}}"#, json);
        }
        format!(r#"{{"components": [{}]}}"#, json)
    }

    #[test]
    fn test_builds_nested_tree() {
        let validated = parse(
            r#"{"components": [
                {"type": "form", "label": "Login",
                 "attributes": [{"name": "id", "value": "login"}],
                 "children": [{"type": "field", "label": "Username"}]}
            ]}"#,
        )
        .unwrap();
        let ui = materialize(validated).unwrap();

        assert_eq!(ui.components().len(), 1);
        let form = &ui.components()[0];
        assert_eq!(form.kind(), ComponentType::Form);
        assert_eq!(form.attributes()[0].value(), "login");
        assert_eq!(form.children()[0].label(), "Username");
        assert!(form.children()[0].children().is_empty());
    }

    #[test]
    fn test_depth_at_limit_accepted() {
        let validated = parse(&chain(3)).unwrap();
        let ui = materialize_with_depth(validated, 3).unwrap();
        assert_eq!(ui.depth(), 3);
    }

    #[test]
    fn test_depth_past_limit_rejected() {
        let validated = parse(&chain(4)).unwrap();
        let err = materialize_with_depth(validated, 3).unwrap_err();
        assert_eq!(
            err,
            TreeError::depth_exceeded("components[0].children[0].children[0].children[0]", 3)
        );
    }

    #[test]
    fn test_default_limit() {
        let ui = materialize(parse(&chain(DEFAULT_MAX_DEPTH)).unwrap()).unwrap();
        assert_eq!(ui.depth(), DEFAULT_MAX_DEPTH);

        let err = materialize(parse(&chain(DEFAULT_MAX_DEPTH + 1)).unwrap()).unwrap_err();
        assert!(matches!(err, TreeError::DepthExceeded { limit: 64, .. }));
    }

    #[test]
    fn test_depth_setting_is_capped() {
        let options = ParseOptions::new().with_max_depth(usize::MAX);
        let at_ceiling = parse_with_options(&chain(MAX_DEPTH_CEILING), &options).unwrap();
        assert_eq!(
            materialize_with_depth(at_ceiling, usize::MAX).unwrap().depth(),
            MAX_DEPTH_CEILING
        );

        let past = parse_with_options(&chain(MAX_DEPTH_CEILING + 1), &options).unwrap();
        let err = materialize_with_depth(past, usize::MAX).unwrap_err();
        assert!(matches!(err, TreeError::DepthExceeded { limit: MAX_DEPTH_CEILING, .. }));
    }

    #[test]
    fn test_zero_depth_allows_only_empty_ui() {
        let empty = parse(r#"{"components": []}"#).unwrap();
        assert!(materialize_with_depth(empty, 0).unwrap().is_empty());

        let one = parse(r#"{"components": [{"type": "div", "label": ""}]}"#).unwrap();
        assert!(materialize_with_depth(one, 0).is_err());
    }

    #[test]
    fn test_siblings_keep_order() {
        let validated = parse(
            r#"{"components": [
                {"type": "header", "label": "1"},
                {"type": "section", "label": "2", "children": [
                    {"type": "button", "label": "2a"},
                    {"type": "button", "label": "2b"}
                ]},
                {"type": "div", "label": "3"}
            ]}"#,
        )
        .unwrap();
        let ui = materialize(validated).unwrap();
        let labels: Vec<_> = ui.components().iter().map(|c| c.label()).collect();
        assert_eq!(labels, vec!["1", "2", "3"]);
        let nested: Vec<_> = ui.components()[1].children().iter().map(|c| c.label()).collect();
        assert_eq!(nested, vec!["2a", "2b"]);
    }
}
