//! Error types for the AST crate.
//!
//! This module defines structured errors for assembling a [`Tree`](crate::arena::Tree)
//! from raw node records, such as a deserialized script.

use thiserror::Error;

use crate::nodes::NodeId;

/// Shape violations that prevent raw node records from forming a tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[must_use = "errors must not be silently ignored"]
pub enum AstError {
    /// The root id does not name a node in the arena.
    #[error("root node {root} is not part of the tree")]
    RootNotFound { root: NodeId },

    /// The root node carries a parent link.
    #[error("root node {root} must not have a parent")]
    RootHasParent { root: NodeId },

    /// A node is held by more than one argument or body slot.
    #[error("node {id} is referenced more than once")]
    SharedNode { id: NodeId },

    /// A node's parent link does not point at the node holding it.
    #[error("node {id} is held by {expected} but its parent link is {}", display_parent(.found.as_ref()))]
    ParentMismatch {
        id: NodeId,
        expected: NodeId,
        found: Option<NodeId>,
    },

    /// A leaf's parent link does not point at the node holding it.
    #[error("leaf `{name}` of node {node} has parent link {found}")]
    LeafParentMismatch {
        node: NodeId,
        name: String,
        found: NodeId,
    },

    /// A node repeats an argument name.
    #[error("node {node} has argument `{name}` more than once")]
    DuplicateArgument { node: NodeId, name: String },

    /// A float leaf holds NaN or an infinity.
    #[error("leaf `{name}` of node {node} holds a non-finite float")]
    NonFiniteLeaf { node: NodeId, name: String },

    /// A node cannot be reached from the root.
    #[error("node {id} is not reachable from the root")]
    UnreachableNode { id: NodeId },

    /// The arena holds more nodes than a [`NodeId`] can address.
    #[error("tree holds more nodes than can be addressed")]
    TooManyNodes,
}

/// Scalars that cannot be stored in a leaf.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum LeafValueError {
    #[error("integer {0} is out of range for a leaf value")]
    IntegerOutOfRange(u64),

    #[error("float {0} is not finite")]
    NonFiniteFloat(f64),
}

fn display_parent(parent: Option<&NodeId>) -> String {
    parent.map_or_else(|| "empty".to_string(), ToString::to_string)
}
