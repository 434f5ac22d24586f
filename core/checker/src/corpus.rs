//! Corpus - Schema Registry for CeleryScript
//!
//! The [`Corpus`] describes, per node kind, which argument names a node must
//! carry and which child kinds may appear in its body, and, per argument kind,
//! which primitive leaf types are acceptable. An argument spec may also carry
//! an additional validation predicate for constraints beyond primitive typing
//! (numeric ranges, enumerations, references into the corpus itself).
//!
//! A corpus is assembled once with [`CorpusBuilder`], then frozen. It is
//! `Send + Sync` and is shared by reference between any number of checks.
//!
//! ```
//! use celery_script_ast::nodes::ValueType;
//! use celery_script_checker::corpus::CorpusBuilder;
//!
//! let corpus = CorpusBuilder::new()
//!     .node("move_absolute", &["x", "y", "z", "speed"], &[])
//!     .arg("coordinate", ValueType::NUMERIC)
//!     .build()?;
//!
//! assert!(corpus.fetch_node("move_absolute").is_ok());
//! assert!(corpus.fetch_arg("unknown").is_err());
//! # Ok::<(), celery_script_checker::errors::CorpusError>(())
//! ```

use core::fmt;
use std::{fmt::Debug, sync::Arc};

use celery_script_ast::nodes::{Value, ValueType};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Serialize, Serializer, ser::SerializeStruct};

use crate::errors::{CheckError, CorpusError, KindCategory};

/// Semantic predicate attached to an argument kind.
///
/// Receives the value stored in the slot and the corpus; an `Err` message is
/// reported as [`CheckError::CustomValidation`] without alteration.
pub type AdditionalValidation =
    Arc<dyn Fn(Value<'_>, &Corpus) -> Result<(), String> + Send + Sync>;

/// Schema of one node kind.
#[derive(Debug, Clone, Serialize)]
pub struct NodeSpec {
    name: String,
    allowed_args: Vec<String>,
    allowed_body_types: Vec<String>,
}

impl NodeSpec {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Argument names every node of this kind must carry, in declaration order.
    #[must_use]
    pub fn allowed_args(&self) -> &[String] {
        &self.allowed_args
    }

    #[must_use]
    pub fn allowed_body_types(&self) -> &[String] {
        &self.allowed_body_types
    }

    #[must_use]
    pub fn allows_arg(&self, name: &str) -> bool {
        self.allowed_args.iter().any(|arg| arg == name)
    }

    #[must_use]
    pub fn allows_body(&self, kind: &str) -> bool {
        self.allowed_body_types.iter().any(|body| body == kind)
    }
}

/// Schema of one argument kind.
#[derive(Clone, Serialize)]
pub struct ArgSpec {
    name: String,
    allowed_values: Vec<ValueType>,
    #[serde(
        rename = "has_additional_validation",
        serialize_with = "serialize_presence"
    )]
    additional_validation: Option<AdditionalValidation>,
}

impl ArgSpec {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn allowed_values(&self) -> &[ValueType] {
        &self.allowed_values
    }

    #[must_use]
    pub fn additional_validation(&self) -> Option<&AdditionalValidation> {
        self.additional_validation.as_ref()
    }
}

impl Debug for ArgSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArgSpec")
            .field("name", &self.name)
            .field("allowed_values", &self.allowed_values)
            .field(
                "additional_validation",
                &self.additional_validation.is_some(),
            )
            .finish()
    }
}

#[allow(clippy::ref_option)]
fn serialize_presence<S: Serializer>(
    validation: &Option<AdditionalValidation>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_bool(validation.is_some())
}

/// Read-only registry of node and argument schemas.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    nodes: FxHashMap<String, NodeSpec>,
    args: FxHashMap<String, ArgSpec>,
}

impl Corpus {
    /// Looks up the schema of a node kind.
    ///
    /// # Errors
    ///
    /// Returns [`CheckError::UnknownKind`] if the kind has no entry.
    pub fn fetch_node(&self, kind: &str) -> Result<&NodeSpec, CheckError> {
        self.nodes.get(kind).ok_or_else(|| CheckError::UnknownKind {
            category: KindCategory::Node,
            kind: kind.to_string(),
        })
    }

    /// Looks up the schema of an argument kind.
    ///
    /// # Errors
    ///
    /// Returns [`CheckError::UnknownKind`] if the kind has no entry.
    pub fn fetch_arg(&self, kind: &str) -> Result<&ArgSpec, CheckError> {
        self.args.get(kind).ok_or_else(|| CheckError::UnknownKind {
            category: KindCategory::Arg,
            kind: kind.to_string(),
        })
    }

    /// Registered node kinds, sorted by name.
    #[must_use]
    pub fn node_kinds(&self) -> Vec<&str> {
        let mut kinds: Vec<&str> = self.nodes.keys().map(String::as_str).collect();
        kinds.sort_unstable();
        kinds
    }

    /// Registered argument kinds, sorted by name.
    #[must_use]
    pub fn arg_kinds(&self) -> Vec<&str> {
        let mut kinds: Vec<&str> = self.args.keys().map(String::as_str).collect();
        kinds.sort_unstable();
        kinds
    }
}

/// Exports the schema for clients; specs are ordered by name.
impl Serialize for Corpus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut nodes: Vec<&NodeSpec> = self.nodes.values().collect();
        nodes.sort_unstable_by(|a, b| a.name.cmp(&b.name));
        let mut args: Vec<&ArgSpec> = self.args.values().collect();
        args.sort_unstable_by(|a, b| a.name.cmp(&b.name));

        let mut state = serializer.serialize_struct("Corpus", 2)?;
        state.serialize_field("nodes", &nodes)?;
        state.serialize_field("args", &args)?;
        state.end()
    }
}

#[derive(Default)]
pub struct CorpusBuilder {
    nodes: Vec<NodeSpec>,
    args: Vec<ArgSpec>,
}

impl CorpusBuilder {
    #[must_use]
    pub fn new() -> Self {
        CorpusBuilder::default()
    }

    #[must_use]
    pub fn node(mut self, name: &str, allowed_args: &[&str], allowed_body_types: &[&str]) -> Self {
        self.nodes.push(NodeSpec {
            name: name.to_string(),
            allowed_args: dedup(allowed_args),
            allowed_body_types: dedup(allowed_body_types),
        });
        self
    }

    #[must_use]
    pub fn arg(mut self, name: &str, allowed_values: &[ValueType]) -> Self {
        self.args.push(ArgSpec {
            name: name.to_string(),
            allowed_values: allowed_values.to_vec(),
            additional_validation: None,
        });
        self
    }

    /// Registers an argument kind with an additional validation predicate.
    #[must_use]
    pub fn arg_with<F>(mut self, name: &str, allowed_values: &[ValueType], validation: F) -> Self
    where
        F: Fn(Value<'_>, &Corpus) -> Result<(), String> + Send + Sync + 'static,
    {
        self.args.push(ArgSpec {
            name: name.to_string(),
            allowed_values: allowed_values.to_vec(),
            additional_validation: Some(Arc::new(validation)),
        });
        self
    }

    /// Freezes the registered specs into a [`Corpus`].
    ///
    /// # Errors
    ///
    /// Returns a [`CorpusError`] if a node or argument kind is registered twice.
    pub fn build(self) -> Result<Corpus, CorpusError> {
        let mut corpus = Corpus::default();
        for spec in self.nodes {
            if corpus.nodes.contains_key(&spec.name) {
                return Err(CorpusError::DuplicateNode(spec.name));
            }
            corpus.nodes.insert(spec.name.clone(), spec);
        }
        for spec in self.args {
            if corpus.args.contains_key(&spec.name) {
                return Err(CorpusError::DuplicateArg(spec.name));
            }
            corpus.args.insert(spec.name.clone(), spec);
        }
        Ok(corpus)
    }
}

fn dedup(names: &[&str]) -> Vec<String> {
    let mut seen = FxHashSet::default();
    names
        .iter()
        .filter(|name| seen.insert(**name))
        .map(|name| (*name).to_string())
        .collect()
}
