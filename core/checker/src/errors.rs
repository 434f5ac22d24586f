use std::fmt::{self, Display, Formatter};

use celery_script_ast::nodes::ValueType;
use serde::Serialize;
use thiserror::Error;

/// Which corpus table a lookup went to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum KindCategory {
    Node,
    Arg,
}

impl Display for KindCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            KindCategory::Node => write!(f, "node"),
            KindCategory::Arg => write!(f, "arg"),
        }
    }
}

/// Fieldless tag naming the rule a [`CheckError`] reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckErrorKind {
    UnknownKind,
    MissingArgument,
    UnexpectedArguments,
    InvalidBodyChild,
    InvalidLeafType,
    MalformedArgument,
    MalformedBody,
    CustomValidation,
}

impl Display for CheckErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            CheckErrorKind::UnknownKind => "unknown_kind",
            CheckErrorKind::MissingArgument => "missing_argument",
            CheckErrorKind::UnexpectedArguments => "unexpected_arguments",
            CheckErrorKind::InvalidBodyChild => "invalid_body_child",
            CheckErrorKind::InvalidLeafType => "invalid_leaf_type",
            CheckErrorKind::MalformedArgument => "malformed_argument",
            CheckErrorKind::MalformedBody => "malformed_body",
            CheckErrorKind::CustomValidation => "custom_validation",
        };
        write!(f, "{name}")
    }
}

/// The first rule violation found in a tree.
///
/// Every variant is fatal: checking the same tree against the same corpus
/// always yields the same error.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "error", rename_all = "snake_case")]
pub enum CheckError {
    #[error("unknown {category} kind '{kind}'")]
    UnknownKind { category: KindCategory, kind: String },

    #[error(
        "Expected node '{node_kind}' to have a '{arg_name}', but got: {}.",
        list_or_nothing(.present_keys)
    )]
    MissingArgument {
        node_kind: String,
        arg_name: String,
        present_keys: Vec<String>,
    },

    #[error(
        "'{node_kind}' has unexpected arguments: {}. Allowed arguments: {}",
        list_or_nothing(.extra_names),
        list_or_nothing(.allowed_names)
    )]
    UnexpectedArguments {
        node_kind: String,
        extra_names: Vec<String>,
        allowed_names: Vec<String>,
    },

    #[error(
        "Body of '{parent_kind}' node contains '{child_kind}' node at index {index}. Expected one of: {}",
        list_or_nothing(.allowed)
    )]
    InvalidBodyChild {
        parent_kind: String,
        child_kind: String,
        index: usize,
        allowed: Vec<String>,
    },

    #[error(
        "Expected leaf '{leaf_kind}' within '{parent_kind}' to be one of: {} but got {actual_type}",
        list_or_nothing(.allowed_types)
    )]
    InvalidLeafType {
        leaf_kind: String,
        parent_kind: String,
        allowed_types: Vec<ValueType>,
        actual_type: ValueType,
    },

    #[error("Expected '{argument_name}' to be a node or leaf, but it was neither")]
    MalformedArgument { argument_name: String },

    #[error("Body of '{node_kind}' node refers to a missing node at index {index}")]
    MalformedBody { node_kind: String, index: usize },

    #[error("{message}")]
    CustomValidation { arg_name: String, message: String },
}

impl CheckError {
    #[must_use]
    pub fn kind(&self) -> CheckErrorKind {
        match self {
            CheckError::UnknownKind { .. } => CheckErrorKind::UnknownKind,
            CheckError::MissingArgument { .. } => CheckErrorKind::MissingArgument,
            CheckError::UnexpectedArguments { .. } => CheckErrorKind::UnexpectedArguments,
            CheckError::InvalidBodyChild { .. } => CheckErrorKind::InvalidBodyChild,
            CheckError::InvalidLeafType { .. } => CheckErrorKind::InvalidLeafType,
            CheckError::MalformedArgument { .. } => CheckErrorKind::MalformedArgument,
            CheckError::MalformedBody { .. } => CheckErrorKind::MalformedBody,
            CheckError::CustomValidation { .. } => CheckErrorKind::CustomValidation,
        }
    }
}

/// Errors raised while assembling a corpus.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[must_use = "errors must not be silently ignored"]
pub enum CorpusError {
    #[error("node kind '{0}' is defined more than once")]
    DuplicateNode(String),

    #[error("arg kind '{0}' is defined more than once")]
    DuplicateArg(String),
}

fn list_or_nothing<T: Display>(items: &[T]) -> String {
    if items.is_empty() {
        return "nothing".to_string();
    }
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
