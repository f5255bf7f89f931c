#![forbid(unsafe_code)]
// Allow pedantic lints for early-stage API ergonomics.
#![allow(clippy::nursery)]
#![allow(clippy::pedantic)]

//! # Idiom Diff
//!
//! Leaf-by-leaf comparison of a freshly converted document against a stored
//! master, ignoring fields that legitimately change between runs.
//!
//! The pieces, from the bottom up:
//! - [`walk`]: lazy preorder traversal yielding `(path, leaf)` records
//! - [`ExclusionPolicy`]: which leaves are not compared, by field name or by
//!   enclosing key
//! - [`pairs`]: both traversals in lockstep, excluded leaves dropped on each
//!   side, survivors paired by position
//! - [`locate`]: where two sequences first disagree, for diagnostics
//! - [`verify`]: the standard assertions over the pairs
//!
//! ## Example
//!
//! ```rust
//! use idiom_diff::{verify, ExclusionPolicy};
//! use serde_json::json;
//!
//! let master = json!({"type": "indicator", "id": "indicator--1", "name": "Bad IP"});
//! let fresh = json!({"type": "indicator", "id": "indicator--2", "name": "Bad IP"});
//!
//! let verdict = verify(&master, &fresh, &ExclusionPolicy::stix_defaults()).unwrap();
//! assert!(verdict.outcome.is_equal());
//! assert_eq!(verdict.pairs, 2);
//! ```
//!
//! Pairing is positional: the K-th surviving leaf of one side is compared
//! with the K-th of the other. Trees that hold the same entries in a
//! different key order are reported as a path mismatch.

pub mod compare;
pub mod divergence;
pub mod error;
pub mod path;
pub mod policy;
pub mod tree;
pub mod walk;

pub use compare::{
    pairs, verify, Mismatch, MismatchKind, Outcome, Pair, Pairs, Side, Tally, Verdict,
};
pub use divergence::{locate, locate_paths, locate_str, Divergence};
pub use error::{CompareError, CompareResult};
pub use path::{Path, Step};
pub use policy::{ExclusionPolicy, STIX_IGNORED_ANCESTORS, STIX_IGNORED_FIELDS};
pub use tree::{Children, Shape, TreeNode};
pub use walk::{walk, PathIter, Record};
