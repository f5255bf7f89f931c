//! Where two sequences stop agreeing.
//!
//! Used after a mismatch has already been found, to tell a human which step
//! of a path or which character of a value differs. It never affects
//! pass/fail.

use serde::Serialize;
use std::fmt;

use crate::path::Path;

/// The first point at which two sequences disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "index", rename_all = "snake_case")]
pub enum Divergence {
    /// Elements at this index differ.
    DiffAt(usize),
    /// Same elements, same length.
    NoDifference,
    /// The left sequence is a strict prefix of the right one and ends here.
    LeftEndedFirst(usize),
    /// The right sequence is a strict prefix of the left one and ends here.
    RightEndedFirst(usize),
}

impl Divergence {
    /// True unless the sequences were equal.
    #[must_use]
    pub fn is_divergent(&self) -> bool {
        !matches!(self, Self::NoDifference)
    }

    /// The index the divergence was found at, if any.
    #[must_use]
    pub fn index(&self) -> Option<usize> {
        match self {
            Self::DiffAt(i) | Self::LeftEndedFirst(i) | Self::RightEndedFirst(i) => Some(*i),
            Self::NoDifference => None,
        }
    }
}

impl fmt::Display for Divergence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DiffAt(i) => write!(f, "difference at {i}"),
            Self::NoDifference => f.write_str("no difference"),
            Self::LeftEndedFirst(i) => write!(f, "left ended at {i}"),
            Self::RightEndedFirst(i) => write!(f, "right ended at {i}"),
        }
    }
}

/// Scan two sequences in step and report the first divergence.
///
/// ```
/// use idiom_diff::{locate, Divergence};
///
/// assert_eq!(locate([1, 2, 3], [1, 9, 3]), Divergence::DiffAt(1));
/// assert_eq!(locate([1, 2], [1, 2, 3]), Divergence::LeftEndedFirst(2));
/// assert_eq!(locate([1, 2], [1, 2]), Divergence::NoDifference);
/// ```
pub fn locate<L, R, T>(left: L, right: R) -> Divergence
where
    L: IntoIterator<Item = T>,
    R: IntoIterator,
    T: PartialEq<R::Item>,
{
    let mut left = left.into_iter();
    let mut right = right.into_iter();
    let mut index = 0;

    loop {
        match (left.next(), right.next()) {
            (Some(l), Some(r)) => {
                if l != r {
                    return Divergence::DiffAt(index);
                }
            }
            (None, None) => return Divergence::NoDifference,
            (None, Some(_)) => return Divergence::LeftEndedFirst(index),
            (Some(_), None) => return Divergence::RightEndedFirst(index),
        }
        index += 1;
    }
}

/// Compare two paths step by step.
#[must_use]
pub fn locate_paths(left: &Path, right: &Path) -> Divergence {
    locate(left.steps(), right.steps())
}

/// Compare two strings character by character.
#[must_use]
pub fn locate_str(left: &str, right: &str) -> Divergence {
    locate(left.chars(), right.chars())
}
