//! Deterministic pre-order walk over a [`Tree`](crate::arena::Tree).
//!
//! A node is yielded before anything reachable through it. Among a node's own
//! children, nodes held in argument slots come first in insertion order,
//! followed by body children in positional order. Leaves are not yielded; they
//! are inspected by whoever examines the argument slot holding them.
//!
//! The walk keeps an explicit stack, so its depth is not bounded by the call
//! stack. It is lazy: a consumer that stops pulling (for example
//! [`Iterator::try_for_each`] on an error) visits no further nodes.

use crate::nodes::Node;

/// Iterator returned by [`preorder`].
#[derive(Debug)]
pub struct Preorder<'a> {
    stack: Vec<Node<'a>>,
}

impl<'a> Iterator for Preorder<'a> {
    type Item = Node<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        let mark = self.stack.len();
        self.stack.extend(node.arg_nodes());
        self.stack.extend(node.body());
        // Children were pushed in visiting order; flip them so the first pops first.
        self.stack[mark..].reverse();
        Some(node)
    }
}

#[must_use]
pub fn preorder(root: Node<'_>) -> Preorder<'_> {
    Preorder { stack: vec![root] }
}

/// Invokes `visit` on every node under `root` in pre-order.
///
/// # Errors
///
/// Returns the first error produced by `visit`; no node after the failing one
/// is visited.
pub fn travel<'a, E, F>(root: Node<'a>, visit: F) -> Result<(), E>
where
    F: FnMut(Node<'a>) -> Result<(), E>,
{
    preorder(root).try_for_each(visit)
}
