#![warn(clippy::pedantic)]
//! Type Checker for CeleryScript
//!
//! This crate validates a CeleryScript tree against a corpus before the script
//! is allowed to run a machine. The checker only accepts or rejects: it never
//! executes, infers or mutates anything.
//!
//! ## Rules
//!
//! For every node, visited in pre-order:
//! - **Body membership**: each body child's kind is listed in the node spec's `allowed_body_types`
//! - **Arity**: each name in `allowed_args` is present; no other names are present
//! - **Leaf typing**: a leaf's runtime type is listed in its arg spec's `allowed_values`
//! - **Additional validation**: the slot's arg spec predicate, if any, accepts the value
//!
//! Every node, leaf and argument kind met on the way must resolve in the corpus.
//! The first violation aborts the check and is reported as a [`errors::CheckError`].
//!
//! ## Quick Start
//!
//! ```
//! use celery_script_ast::{builder::TreeBuilder, nodes::ValueType};
//! use celery_script_checker::{checker::Checker, corpus::CorpusBuilder};
//!
//! let corpus = CorpusBuilder::new()
//!     .node("wait", &["milliseconds"], &[])
//!     .arg("milliseconds", &[ValueType::Integer])
//!     .build()?;
//!
//! let mut builder = TreeBuilder::new("wait");
//! let root = builder.root();
//! builder.add_leaf_arg(root, "milliseconds", "milliseconds", 1000);
//! let tree = builder.build();
//!
//! let checker = Checker::new(&tree, &corpus);
//! assert!(checker.is_valid());
//! assert_eq!(checker.run()?.kind(), "wait");
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## Public Modules
//!
//! - [`checker`] - The [`checker::Checker`] and its `run` / `run_or_result` / `is_valid` entry points
//! - [`corpus`] - Schema registry and its builder
//! - [`errors`] - Check and corpus error types

pub mod checker;
pub mod corpus;
pub mod errors;
