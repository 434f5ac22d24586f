use core::fmt;
use std::fmt::{Debug, Formatter};

use crate::{
    arena::Tree,
    nodes::{AstLeaf, AstValue, Node, NodeId, Value},
};

impl<'a> Node<'a> {
    #[must_use]
    pub fn id(self) -> NodeId {
        self.id
    }

    #[must_use]
    pub fn kind(self) -> &'a str {
        &self.data.kind
    }

    #[must_use]
    pub fn tree(self) -> &'a Tree {
        self.tree
    }

    /// Arguments in insertion order, with their stored (unresolved) values.
    pub fn args(self) -> impl Iterator<Item = (&'a str, &'a AstValue)> + 'a {
        self.data
            .args
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }

    pub fn arg_names(self) -> impl Iterator<Item = &'a str> + 'a {
        self.data.args.iter().map(|(name, _)| name.as_str())
    }

    #[must_use]
    pub fn arg_count(self) -> usize {
        self.data.args.len()
    }

    #[must_use]
    pub fn has_arg(self, name: &str) -> bool {
        self.data.args.iter().any(|(key, _)| key == name)
    }

    /// Looks up an argument by name and resolves it.
    ///
    /// Returns `None` when the name is absent or refers to a node that is not
    /// part of the tree.
    #[must_use]
    pub fn arg(self, name: &str) -> Option<Value<'a>> {
        self.data
            .args
            .iter()
            .find(|(key, _)| key == name)
            .and_then(|(_, value)| self.tree.resolve(value))
    }

    /// Nested nodes held in argument slots, in insertion order.
    pub fn arg_nodes(self) -> impl Iterator<Item = Node<'a>> + 'a {
        let tree = self.tree;
        self.data.args.iter().filter_map(move |(_, value)| match value {
            AstValue::Node(id) => tree.get(*id),
            AstValue::Leaf(_) => None,
        })
    }

    #[must_use]
    pub fn body_ids(self) -> &'a [NodeId] {
        &self.data.body
    }

    /// Body children in positional order. Empty when the node has no body.
    pub fn body(self) -> impl Iterator<Item = Node<'a>> + 'a {
        let tree = self.tree;
        self.data.body.iter().filter_map(move |id| tree.get(*id))
    }

    #[must_use]
    pub fn parent(self) -> Option<Node<'a>> {
        self.data.parent.and_then(|id| self.tree.get(id))
    }

    #[must_use]
    pub fn is_root(self) -> bool {
        self.data.parent.is_none()
    }
}

impl Debug for Node<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("id", &self.id)
            .field("kind", &self.data.kind)
            .finish_non_exhaustive()
    }
}

impl<'a> Value<'a> {
    #[must_use]
    pub fn kind(self) -> &'a str {
        match self {
            Value::Node(node) => node.kind(),
            Value::Leaf(leaf) => leaf.kind(),
        }
    }

    #[must_use]
    pub fn as_node(self) -> Option<Node<'a>> {
        match self {
            Value::Node(node) => Some(node),
            Value::Leaf(_) => None,
        }
    }

    #[must_use]
    pub fn as_leaf(self) -> Option<&'a AstLeaf> {
        match self {
            Value::Leaf(leaf) => Some(leaf),
            Value::Node(_) => None,
        }
    }
}
