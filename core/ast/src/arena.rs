use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::{
    errors::AstError,
    nodes::{AstNode, AstValue, Node, NodeId, Value},
};

/// Owner of every node in a script.
///
/// A `Tree` always has a resolvable root, every node except the root is
/// referenced from exactly one argument or body slot of its parent, and every
/// node is reachable from the root. References to ids outside the arena are
/// tolerated here and reported by the checker.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(try_from = "TreeRepr")]
pub struct Tree {
    pub(crate) root: NodeId,
    pub(crate) nodes: Vec<AstNode>,
}

#[derive(Deserialize)]
struct TreeRepr {
    root: NodeId,
    nodes: Vec<AstNode>,
}

impl TryFrom<TreeRepr> for Tree {
    type Error = AstError;

    fn try_from(repr: TreeRepr) -> Result<Self, Self::Error> {
        Tree::from_parts(repr.root, repr.nodes)
    }
}

impl Tree {
    /// Assembles a tree from raw node records, checking its shape.
    ///
    /// # Errors
    ///
    /// Returns an [`AstError`] if the root is missing or has a parent, if a node
    /// is referenced twice, if a parent link disagrees with the slot holding the
    /// node, if a node repeats an argument name, if a float leaf is not finite,
    /// or if some node cannot be reached from the root.
    pub fn from_parts(root: NodeId, nodes: Vec<AstNode>) -> Result<Self, AstError> {
        let Some(root_node) = nodes.get(root.index()) else {
            return Err(AstError::RootNotFound { root });
        };
        if root_node.parent.is_some() {
            return Err(AstError::RootHasParent { root });
        }

        let mut referenced = vec![false; nodes.len()];
        for (index, node) in nodes.iter().enumerate() {
            let id = NodeId(u32::try_from(index).map_err(|_| AstError::TooManyNodes)?);
            let mut seen = FxHashSet::default();
            let mut children = Vec::with_capacity(node.args.len() + node.body.len());
            for (name, value) in &node.args {
                if !seen.insert(name.as_str()) {
                    return Err(AstError::DuplicateArgument {
                        node: id,
                        name: name.clone(),
                    });
                }
                match value {
                    AstValue::Node(child) => children.push(*child),
                    AstValue::Leaf(leaf) if leaf.parent != id => {
                        return Err(AstError::LeafParentMismatch {
                            node: id,
                            name: name.clone(),
                            found: leaf.parent,
                        });
                    }
                    AstValue::Leaf(leaf) if !leaf.value.is_finite() => {
                        return Err(AstError::NonFiniteLeaf {
                            node: id,
                            name: name.clone(),
                        });
                    }
                    AstValue::Leaf(_) => {}
                }
            }
            children.extend(node.body.iter().copied());

            for child in children {
                let Some(child_node) = nodes.get(child.index()) else {
                    continue;
                };
                if std::mem::replace(&mut referenced[child.index()], true) {
                    return Err(AstError::SharedNode { id: child });
                }
                if child_node.parent != Some(id) {
                    return Err(AstError::ParentMismatch {
                        id: child,
                        expected: id,
                        found: child_node.parent,
                    });
                }
            }
        }

        let tree = Tree { root, nodes };
        let mut reachable = vec![false; tree.nodes.len()];
        for node in crate::traversal::preorder(tree.root()) {
            reachable[node.id().index()] = true;
        }
        if let Some(index) = reachable.iter().position(|r| !r) {
            #[allow(clippy::cast_possible_truncation)]
            return Err(AstError::UnreachableNode {
                id: NodeId(index as u32),
            });
        }
        Ok(tree)
    }

    #[must_use]
    pub fn root(&self) -> Node<'_> {
        Node {
            tree: self,
            id: self.root,
            data: &self.nodes[self.root.index()],
        }
    }

    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<Node<'_>> {
        self.nodes.get(id.index()).map(|data| Node {
            tree: self,
            id,
            data,
        })
    }

    /// Resolves a stored argument value against this tree.
    ///
    /// Returns `None` for a node id that is not part of the arena.
    #[must_use]
    pub fn resolve<'a>(&'a self, value: &'a AstValue) -> Option<Value<'a>> {
        match value {
            AstValue::Node(id) => self.get(*id).map(Value::Node),
            AstValue::Leaf(leaf) => Some(Value::Leaf(leaf)),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
