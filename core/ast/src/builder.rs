//! Programmatic construction of CeleryScript trees.
//!
//! The `TreeBuilder` owns the arena while a script is being assembled and hands
//! it over as a [`Tree`] once done. It keeps the shape invariants by
//! construction:
//!
//! - **Single parent**: every node is created inside exactly one argument or body slot
//! - **Unique arguments**: an argument name may be set once per node
//! - **Finite floats**: a float leaf never holds NaN or an infinity
//! - **Sequential ids**: the root is id 0, later nodes follow creation order
//!
//! # Example
//!
//! ```
//! use celery_script_ast::builder::TreeBuilder;
//!
//! let mut builder = TreeBuilder::new("move_absolute");
//! let root = builder.root();
//! builder.add_leaf_arg(root, "x", "coordinate", 10);
//! builder.add_leaf_arg(root, "y", "coordinate", 20);
//! let tree = builder.build();
//!
//! assert_eq!(tree.root().arg_count(), 2);
//! ```

use crate::{
    arena::Tree,
    nodes::{AstLeaf, AstNode, AstValue, LeafValue, NodeId},
};

#[derive(Debug)]
pub struct TreeBuilder {
    nodes: Vec<AstNode>,
}

impl TreeBuilder {
    #[must_use]
    pub fn new(root_kind: impl Into<String>) -> Self {
        TreeBuilder {
            nodes: vec![AstNode {
                kind: root_kind.into(),
                args: Vec::new(),
                body: Vec::new(),
                parent: None,
            }],
        }
    }

    #[must_use]
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Appends a node of `kind` to the body of `parent`.
    ///
    /// # Panics
    ///
    /// Panics if `parent` was not created by this builder.
    pub fn add_body(&mut self, parent: NodeId, kind: impl Into<String>) -> NodeId {
        let id = self.push(kind.into(), parent);
        self.node_mut(parent).body.push(id);
        id
    }

    /// Creates a node of `kind` stored under argument `name` of `parent`.
    ///
    /// # Panics
    ///
    /// Panics if `parent` was not created by this builder or already has an
    /// argument called `name`.
    pub fn add_node_arg(
        &mut self,
        parent: NodeId,
        name: impl Into<String>,
        kind: impl Into<String>,
    ) -> NodeId {
        let name = name.into();
        self.assert_free_slot(parent, &name);
        let id = self.push(kind.into(), parent);
        self.node_mut(parent).args.push((name, AstValue::Node(id)));
        id
    }

    /// Stores a leaf of `kind` holding `value` under argument `name` of `parent`.
    ///
    /// # Panics
    ///
    /// Panics if `parent` was not created by this builder, if it already has an
    /// argument called `name`, or if `value` is a NaN or infinite float.
    pub fn add_leaf_arg(
        &mut self,
        parent: NodeId,
        name: impl Into<String>,
        kind: impl Into<String>,
        value: impl Into<LeafValue>,
    ) {
        let name = name.into();
        self.assert_free_slot(parent, &name);
        let value = value.into();
        assert!(
            value.is_finite(),
            "Leaf `{name}` of node {parent} must hold a finite float, got {value}"
        );
        let leaf = AstLeaf {
            kind: kind.into(),
            value,
            parent,
        };
        self.node_mut(parent).args.push((name, AstValue::Leaf(leaf)));
    }

    #[must_use]
    pub fn build(self) -> Tree {
        Tree {
            root: NodeId(0),
            nodes: self.nodes,
        }
    }

    fn push(&mut self, kind: String, parent: NodeId) -> NodeId {
        assert!(
            parent.index() < self.nodes.len(),
            "Parent node {parent} does not belong to this builder"
        );
        let id = u32::try_from(self.nodes.len())
            .map(NodeId)
            .unwrap_or_else(|_| panic!("Tree cannot hold more than {} nodes", u32::MAX));
        self.nodes.push(AstNode {
            kind,
            args: Vec::new(),
            body: Vec::new(),
            parent: Some(parent),
        });
        id
    }

    fn assert_free_slot(&self, parent: NodeId, name: &str) {
        assert!(
            parent.index() < self.nodes.len(),
            "Parent node {parent} does not belong to this builder"
        );
        assert!(
            !self.nodes[parent.index()]
                .args
                .iter()
                .any(|(key, _)| key == name),
            "Node {parent} already has an argument named `{name}`"
        );
    }

    fn node_mut(&mut self, id: NodeId) -> &mut AstNode {
        &mut self.nodes[id.index()]
    }
}
