//! The tree model walked by [`walk`](crate::walk).
//!
//! Any document type can be compared once it says, node by node, whether it
//! is a scalar, a mapping or a sequence. Implementations are provided for
//! `serde_json::Value` and `serde_yaml::Value`.

use crate::path::Step;

/// Children of a composite node, in traversal order.
pub type Children<'a, T> = Box<dyn Iterator<Item = (Step, &'a T)> + 'a>;

/// How a node presents itself to the traversal.
pub enum Shape<'a, T> {
    /// A leaf value (string, number, boolean or null).
    Scalar,
    /// A mapping whose entries are yielded in insertion order.
    Mapping(Children<'a, T>),
    /// A sequence whose elements are yielded in index order.
    Sequence(Children<'a, T>),
    /// A node outside the mapping/sequence/scalar model.
    ///
    /// The string names what was found, for the error message.
    Unsupported(String),
}

impl<T> std::fmt::Debug for Shape<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Scalar => f.write_str("Scalar"),
            Self::Mapping(_) => f.write_str("Mapping(..)"),
            Self::Sequence(_) => f.write_str("Sequence(..)"),
            Self::Unsupported(kind) => f.debug_tuple("Unsupported").field(kind).finish(),
        }
    }
}

/// A node of a hierarchical document.
pub trait TreeNode: Sized {
    /// Classify this node and, for composites, expose its children.
    fn shape(&self) -> Shape<'_, Self>;

    /// Render the node for diagnostics.
    fn render(&self) -> String;

    /// Value equality of two leaves.
    ///
    /// Numbers compare by value, so `1` equals `1.0`.
    fn leaf_eq(&self, other: &Self) -> bool;
}

/// Numeric equality: exact when both are integers, by `f64` value when
/// either side is a float.
fn numbers_eq(left_float: bool, right_float: bool, left: Option<f64>, right: Option<f64>) -> bool {
    if !left_float && !right_float {
        return false;
    }
    matches!((left, right), (Some(l), Some(r)) if l == r)
}

impl TreeNode for serde_json::Value {
    fn shape(&self) -> Shape<'_, Self> {
        use serde_json::Value;

        match self {
            Value::Object(map) => Shape::Mapping(Box::new(
                map.iter().map(|(key, value)| (Step::Key(key.clone()), value)),
            )),
            Value::Array(items) => Shape::Sequence(Box::new(
                items
                    .iter()
                    .enumerate()
                    .map(|(index, value)| (Step::Index(index), value)),
            )),
            Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => Shape::Scalar,
        }
    }

    fn render(&self) -> String {
        self.to_string()
    }

    fn leaf_eq(&self, other: &Self) -> bool {
        use serde_json::Value;

        match (self, other) {
            (Value::Number(l), Value::Number(r)) => {
                l == r || numbers_eq(l.is_f64(), r.is_f64(), l.as_f64(), r.as_f64())
            }
            _ => self == other,
        }
    }
}

impl TreeNode for serde_yaml::Value {
    fn shape(&self) -> Shape<'_, Self> {
        use serde_yaml::Value;

        match self {
            Value::Mapping(map) => {
                // Keys must be strings to form a path step.
                if let Some((key, _)) = map.iter().find(|(key, _)| !key.is_string()) {
                    return Shape::Unsupported(format!("non-string mapping key {key:?}"));
                }
                Shape::Mapping(Box::new(map.iter().filter_map(|(key, value)| {
                    key.as_str().map(|key| (Step::Key(key.to_string()), value))
                })))
            }
            Value::Sequence(items) => Shape::Sequence(Box::new(
                items
                    .iter()
                    .enumerate()
                    .map(|(index, value)| (Step::Index(index), value)),
            )),
            Value::Tagged(tagged) => Shape::Unsupported(format!("tagged value {}", tagged.tag)),
            Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => Shape::Scalar,
        }
    }

    fn render(&self) -> String {
        use serde_yaml::Value;

        match self {
            Value::Null => "null".to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => n.to_string(),
            Value::String(s) => format!("{s:?}"),
            other => serde_yaml::to_string(other)
                .map(|s| s.trim_end().to_string())
                .unwrap_or_else(|_| format!("{other:?}")),
        }
    }

    fn leaf_eq(&self, other: &Self) -> bool {
        use serde_yaml::Value;

        match (self, other) {
            (Value::Number(l), Value::Number(r)) => {
                l == r || numbers_eq(l.is_f64(), r.is_f64(), l.as_f64(), r.as_f64())
            }
            _ => self == other,
        }
    }
}
