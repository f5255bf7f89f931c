use crate::path::Path;
use thiserror::Error;

/// Errors raised while walking a tree.
///
/// Mismatches between the two documents are not errors; they are reported
/// through [`Outcome`](crate::Outcome). An error means the comparison could
/// not be carried out at all.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompareError {
    /// A node is neither a mapping, a sequence nor a scalar.
    #[error("invalid structure at {path}: {kind}")]
    InvalidStructure {
        /// Location of the offending node.
        path: Path,
        /// What was found there.
        kind: String,
    },
}

/// Result alias for traversal and comparison.
pub type CompareResult<T> = Result<T, CompareError>;
