use core::fmt;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::{arena::Tree, errors::LeafValueError};

/// Position of a node inside its [`Tree`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    #[must_use]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl Display for NodeId {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Primitive runtime type of a leaf value.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    Integer,
    Float,
    String,
    Boolean,
}

impl ValueType {
    /// Both numeric representations.
    pub const NUMERIC: &'static [ValueType] = &[ValueType::Integer, ValueType::Float];
}

impl Display for ValueType {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            ValueType::Integer => write!(f, "integer"),
            ValueType::Float => write!(f, "float"),
            ValueType::String => write!(f, "string"),
            ValueType::Boolean => write!(f, "boolean"),
        }
    }
}

/// Scalar payload of a leaf.
///
/// Serialized as the bare JSON scalar. A `Float` is always finite; integers
/// outside the `i64` range and non-finite floats are rejected when read.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(untagged, try_from = "LeafValueRepr")]
pub enum LeafValue {
    Integer(i64),
    Float(f64),
    String(String),
    Boolean(bool),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LeafValueRepr {
    Integer(i64),
    Unsigned(u64),
    Float(f64),
    String(String),
    Boolean(bool),
}

impl TryFrom<LeafValueRepr> for LeafValue {
    type Error = LeafValueError;

    fn try_from(repr: LeafValueRepr) -> Result<Self, Self::Error> {
        match repr {
            LeafValueRepr::Integer(i) => Ok(LeafValue::Integer(i)),
            LeafValueRepr::Unsigned(u) => i64::try_from(u)
                .map(LeafValue::Integer)
                .map_err(|_| LeafValueError::IntegerOutOfRange(u)),
            LeafValueRepr::Float(f) if f.is_finite() => Ok(LeafValue::Float(f)),
            LeafValueRepr::Float(f) => Err(LeafValueError::NonFiniteFloat(f)),
            LeafValueRepr::String(s) => Ok(LeafValue::String(s)),
            LeafValueRepr::Boolean(b) => Ok(LeafValue::Boolean(b)),
        }
    }
}

impl LeafValue {
    /// False only for a NaN or infinite float.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        match self {
            LeafValue::Float(f) => f.is_finite(),
            _ => true,
        }
    }

    #[must_use]
    pub fn value_type(&self) -> ValueType {
        match self {
            LeafValue::Integer(_) => ValueType::Integer,
            LeafValue::Float(_) => ValueType::Float,
            LeafValue::String(_) => ValueType::String,
            LeafValue::Boolean(_) => ValueType::Boolean,
        }
    }

    /// Returns the value as `f64` if it is numeric.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            LeafValue::Integer(i) => Some(*i as f64),
            LeafValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            LeafValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            LeafValue::String(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            LeafValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }
}

impl Display for LeafValue {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            LeafValue::Integer(i) => write!(f, "{i}"),
            LeafValue::Float(x) => write!(f, "{x}"),
            LeafValue::String(s) => write!(f, "{s:?}"),
            LeafValue::Boolean(b) => write!(f, "{b}"),
        }
    }
}

impl From<i64> for LeafValue {
    fn from(value: i64) -> Self {
        LeafValue::Integer(value)
    }
}

impl From<i32> for LeafValue {
    fn from(value: i32) -> Self {
        LeafValue::Integer(i64::from(value))
    }
}

impl From<f64> for LeafValue {
    fn from(value: f64) -> Self {
        LeafValue::Float(value)
    }
}

impl From<&str> for LeafValue {
    fn from(value: &str) -> Self {
        LeafValue::String(value.to_string())
    }
}

impl From<String> for LeafValue {
    fn from(value: String) -> Self {
        LeafValue::String(value)
    }
}

impl From<bool> for LeafValue {
    fn from(value: bool) -> Self {
        LeafValue::Boolean(value)
    }
}

/// Terminal element filling an argument slot.
///
/// `kind` names the argument spec the value is checked against; it usually,
/// but not necessarily, matches the argument name it is stored under.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct AstLeaf {
    pub(crate) kind: String,
    pub(crate) value: LeafValue,
    pub(crate) parent: NodeId,
}

impl AstLeaf {
    #[must_use]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    #[must_use]
    pub fn value(&self) -> &LeafValue {
        &self.value
    }

    #[must_use]
    pub fn parent_id(&self) -> NodeId {
        self.parent
    }
}

/// Stored argument value. A nested node is held by id.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AstValue {
    Node(NodeId),
    Leaf(AstLeaf),
}

/// Stored node record. Use [`Node`] to read it together with its tree.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct AstNode {
    pub(crate) kind: String,
    #[serde(default)]
    pub(crate) args: Vec<(String, AstValue)>,
    #[serde(default)]
    pub(crate) body: Vec<NodeId>,
    #[serde(default)]
    pub(crate) parent: Option<NodeId>,
}

/// Borrowed view of a node within its tree.
#[derive(Clone, Copy)]
pub struct Node<'a> {
    pub(crate) tree: &'a Tree,
    pub(crate) id: NodeId,
    pub(crate) data: &'a AstNode,
}

/// Resolved argument value.
#[derive(Clone, Copy, Debug)]
pub enum Value<'a> {
    Node(Node<'a>),
    Leaf(&'a AstLeaf),
}
