//! Locations inside a tree.
//!
//! A [`Path`] is the list of mapping keys and sequence indices walked from
//! the root to reach a node. Paths compare step by step, so two records
//! agree on location only if every key and index matches.

use serde::Serialize;
use std::fmt;

/// One step from a node to one of its children.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(untagged)]
pub enum Step {
    /// Descend into a mapping entry.
    Key(String),
    /// Descend into a sequence element.
    Index(usize),
}

impl Step {
    /// Returns the key if this step descends into a mapping.
    #[must_use]
    pub fn as_key(&self) -> Option<&str> {
        match self {
            Self::Key(key) => Some(key),
            Self::Index(_) => None,
        }
    }

    /// Returns the index if this step descends into a sequence.
    #[must_use]
    pub fn as_index(&self) -> Option<usize> {
        match self {
            Self::Key(_) => None,
            Self::Index(index) => Some(*index),
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key) => f.write_str(key),
            Self::Index(index) => write!(f, "[{index}]"),
        }
    }
}

impl From<&str> for Step {
    fn from(key: &str) -> Self {
        Self::Key(key.to_string())
    }
}

impl From<String> for Step {
    fn from(key: String) -> Self {
        Self::Key(key)
    }
}

impl From<usize> for Step {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

/// An ordered list of steps locating a node from the tree root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Path(Vec<Step>);

impl Path {
    /// The root path (no steps).
    #[must_use]
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Builds a path from anything convertible into steps.
    ///
    /// ```
    /// use idiom_diff::{Path, Step};
    ///
    /// let path = Path::from_steps(["objects".into(), Step::Index(0), "name".into()]);
    /// assert_eq!(path.to_string(), "objects[0].name");
    /// ```
    pub fn from_steps<I, S>(steps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Step>,
    {
        Self(steps.into_iter().map(Into::into).collect())
    }

    /// The steps of this path, root first.
    #[must_use]
    pub fn steps(&self) -> &[Step] {
        &self.0
    }

    /// Number of steps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True for the root path.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The final step, if any.
    #[must_use]
    pub fn last(&self) -> Option<&Step> {
        self.0.last()
    }

    /// The field name: the final step when it is a key.
    ///
    /// A path ending in a sequence index has no field name.
    #[must_use]
    pub fn field_name(&self) -> Option<&str> {
        self.0.last().and_then(Step::as_key)
    }

    /// The nearest key step, skipping trailing indices.
    ///
    /// For `objects[0].object_refs[2]` this is `object_refs`.
    #[must_use]
    pub fn enclosing_key(&self) -> Option<&str> {
        self.0.iter().rev().find_map(Step::as_key)
    }

    /// True if any key step equals `name`.
    #[must_use]
    pub fn contains_key(&self, name: &str) -> bool {
        self.0.iter().any(|step| step.as_key() == Some(name))
    }

    pub(crate) fn push(&mut self, step: Step) {
        self.0.push(step);
    }

    pub(crate) fn pop(&mut self) -> Option<Step> {
        self.0.pop()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("$");
        }
        for (i, step) in self.0.iter().enumerate() {
            match step {
                Step::Key(key) if i > 0 => write!(f, ".{key}")?,
                other => write!(f, "{other}")?,
            }
        }
        Ok(())
    }
}

impl<S: Into<Step>> FromIterator<S> for Path {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::from_steps(iter)
    }
}

impl From<Vec<Step>> for Path {
    fn from(steps: Vec<Step>) -> Self {
        Self(steps)
    }
}
