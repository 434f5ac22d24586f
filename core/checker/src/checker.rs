//! Checker Implementation
//!
//! Validates a tree against a corpus by walking it in pre-order and applying,
//! to every node:
//!
//! 1. **validate_body** - each body child's kind must be allowed under the node
//! 2. **check_arity** - every required argument present, no extra ones
//! 3. **check_arg_validity** - leaf types, then the slot's additional validation
//!
//! The first violation ends the walk; no further node is visited.

use celery_script_ast::{
    arena::Tree,
    nodes::{AstValue, Node, Value},
    traversal,
};
use tracing::{debug, debug_span, trace};

use crate::{
    corpus::{Corpus, NodeSpec},
    errors::CheckError,
};

/// Binds one tree to one corpus.
///
/// The checker holds nothing but the two references; checks never mutate the
/// tree and leave no state behind, so a checker may be run any number of times
/// and from several threads at once.
#[derive(Clone, Copy)]
pub struct Checker<'a> {
    tree: &'a Tree,
    corpus: &'a Corpus,
}

impl<'a> Checker<'a> {
    #[must_use]
    pub fn new(tree: &'a Tree, corpus: &'a Corpus) -> Self {
        Checker { tree, corpus }
    }

    #[must_use]
    pub fn tree(&self) -> &'a Tree {
        self.tree
    }

    #[must_use]
    pub fn corpus(&self) -> &'a Corpus {
        self.corpus
    }

    /// Checks the tree and returns its root, now known to be valid.
    ///
    /// # Errors
    ///
    /// Returns the first violation; it downcasts to [`CheckError`].
    pub fn run(&self) -> anyhow::Result<Node<'a>> {
        Ok(self.run_or_result()?)
    }

    /// Checks the tree, returning the first violation as a value.
    ///
    /// # Errors
    ///
    /// Returns the [`CheckError`] for the first node, in pre-order, that breaks
    /// a corpus rule.
    pub fn run_or_result(&self) -> Result<Node<'a>, CheckError> {
        let root = self.tree.root();
        let _span = debug_span!("check", root = root.kind(), nodes = self.tree.len()).entered();
        traversal::travel(root, |node| self.validate(node)).inspect_err(|error| {
            debug!(kind = %error.kind(), %error, "check failed");
        })?;
        Ok(root)
    }

    /// Returns the first violation, if any.
    #[must_use]
    pub fn error(&self) -> Option<CheckError> {
        self.run_or_result().err()
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.error().is_none()
    }

    fn validate(&self, node: Node<'a>) -> Result<(), CheckError> {
        trace!(id = %node.id(), kind = node.kind(), "validating node");
        let spec = self.corpus.fetch_node(node.kind())?;
        self.validate_body(node, spec)?;
        Self::check_arity(node, spec)?;
        for (name, value) in node.args() {
            self.check_arg_validity(node, name, value)?;
        }
        Ok(())
    }

    fn validate_body(&self, node: Node<'a>, spec: &NodeSpec) -> Result<(), CheckError> {
        for (index, id) in node.body_ids().iter().enumerate() {
            let Some(child) = self.tree.get(*id) else {
                return Err(CheckError::MalformedBody {
                    node_kind: node.kind().to_string(),
                    index,
                });
            };
            if !spec.allows_body(child.kind()) {
                return Err(CheckError::InvalidBodyChild {
                    parent_kind: node.kind().to_string(),
                    child_kind: child.kind().to_string(),
                    index,
                    allowed: spec.allowed_body_types().to_vec(),
                });
            }
        }
        Ok(())
    }

    /// Presence of every required name, then a count comparison.
    ///
    /// Extras are only detected when the number of keys differs from the number
    /// of required names. With unique keys on the node and unique names in the
    /// spec, presence plus equal count already implies equal sets.
    fn check_arity(node: Node<'a>, spec: &NodeSpec) -> Result<(), CheckError> {
        for required in spec.allowed_args() {
            if !node.has_arg(required) {
                return Err(CheckError::MissingArgument {
                    node_kind: node.kind().to_string(),
                    arg_name: required.clone(),
                    present_keys: node.arg_names().map(str::to_string).collect(),
                });
            }
        }

        if node.arg_count() != spec.allowed_args().len() {
            return Err(CheckError::UnexpectedArguments {
                node_kind: node.kind().to_string(),
                extra_names: node
                    .arg_names()
                    .filter(|name| !spec.allows_arg(name))
                    .map(str::to_string)
                    .collect(),
                allowed_names: spec.allowed_args().to_vec(),
            });
        }
        Ok(())
    }

    fn check_arg_validity(
        &self,
        node: Node<'a>,
        should_be: &str,
        value: &'a AstValue,
    ) -> Result<(), CheckError> {
        let Some(resolved) = self.tree.resolve(value) else {
            return Err(CheckError::MalformedArgument {
                argument_name: should_be.to_string(),
            });
        };

        // Nested nodes are checked when the walk reaches them.
        if let Value::Leaf(leaf) = resolved {
            let allowed = self.corpus.fetch_arg(leaf.kind())?.allowed_values();
            let actual = leaf.value().value_type();
            if !allowed.contains(&actual) {
                let parent_kind = self
                    .tree
                    .get(leaf.parent_id())
                    .map_or(node.kind(), Node::kind);
                return Err(CheckError::InvalidLeafType {
                    leaf_kind: leaf.kind().to_string(),
                    parent_kind: parent_kind.to_string(),
                    allowed_types: allowed.to_vec(),
                    actual_type: actual,
                });
            }
        }

        if let Some(validation) = self.corpus.fetch_arg(should_be)?.additional_validation() {
            validation(resolved, self.corpus).map_err(|message| CheckError::CustomValidation {
                arg_name: should_be.to_string(),
                message,
            })?;
        }
        Ok(())
    }
}
