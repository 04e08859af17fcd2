//! Validated intermediate representation
//!
//! Nodes are stored flat in pre-order. A node's children always have larger
//! indices than the node itself, so the arena cannot describe a cycle.

use crate::schema::{Attribute, ComponentType};

/// Index of a node in a [`ValidatedUi`] arena
pub type NodeId = usize;

/// One component whose fields have all been checked
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedNode {
    pub kind: ComponentType,
    pub label: String,
    pub attributes: Vec<Attribute>,
    pub children: Vec<NodeId>,
    /// JSON path of the component, e.g. `components[0].children[1]`
    pub path: String,
}

/// A UI document that passed schema validation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidatedUi {
    pub(crate) nodes: Vec<ValidatedNode>,
    pub(crate) roots: Vec<NodeId>,
}

impl ValidatedUi {
    /// All nodes in pre-order
    pub fn nodes(&self) -> &[ValidatedNode] {
        &self.nodes
    }

    /// Top-level components, in document order
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn node(&self, id: NodeId) -> Option<&ValidatedNode> {
        self.nodes.get(id)
    }

    /// Total number of components
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub(crate) fn push(&mut self, parent: Option<NodeId>, node: ValidatedNode) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(node);
        match parent {
            Some(parent) => self.nodes[parent].children.push(id),
            None => self.roots.push(id),
        }
        id
    }

    pub(crate) fn into_nodes(self) -> (Vec<ValidatedNode>, Vec<NodeId>) {
        (self.nodes, self.roots)
    }
}
