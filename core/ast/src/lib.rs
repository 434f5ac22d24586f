#![warn(clippy::pedantic)]
//! CeleryScript abstract syntax tree.
//!
//! A script is a rooted tree of typed nodes. Every node carries a `kind`, an
//! ordered mapping of named arguments and an ordered body of child nodes.
//! Argument values are either nested nodes or scalar leaves.
//!
//! Nodes live in an [`arena::Tree`] and refer to each other by [`nodes::NodeId`].
//! Parent links are plain ids, so the tree keeps a single owner and holds no
//! reference cycles. Read access goes through the borrowed [`nodes::Node`] and
//! [`nodes::Value`] views.
//!
//! ```
//! use celery_script_ast::builder::TreeBuilder;
//!
//! let mut builder = TreeBuilder::new("sequence");
//! let wait = builder.add_body(builder.root(), "wait");
//! builder.add_leaf_arg(wait, "milliseconds", "milliseconds", 500);
//! let tree = builder.build();
//!
//! let root = tree.root();
//! assert_eq!(root.body().next().map(|n| n.kind()), Some("wait"));
//! ```
pub mod arena;
pub mod builder;
pub mod errors;
pub mod nodes;
pub(crate) mod nodes_impl;
pub mod traversal;
