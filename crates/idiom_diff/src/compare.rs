//! Lockstep pairing of two trees and the assertions made over the pairs.
//!
//! [`pairs`] walks the reference and the candidate together, drops excluded
//! leaves on each side independently, and pairs the survivors by position.
//! It never judges the pairs itself. [`verify`] is the standard caller: it
//! checks path equality, then value equality, then that both sides had the
//! same number of surviving leaves, and stops at the first failure.

use serde::Serialize;
use std::fmt;
use std::iter::FusedIterator;

use crate::divergence::{locate_paths, locate_str, Divergence};
use crate::error::{CompareError, CompareResult};
use crate::path::Path;
use crate::policy::ExclusionPolicy;
use crate::tree::TreeNode;
use crate::walk::{walk, PathIter, Record};

/// Which document a record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    /// The stored master.
    Reference,
    /// The freshly converted document.
    Candidate,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reference => f.write_str("reference"),
            Self::Candidate => f.write_str("candidate"),
        }
    }
}

/// Leaves of one tree that survive the exclusion policy.
struct Surviving<'a, 'p, T> {
    records: PathIter<'a, T>,
    policy: &'p ExclusionPolicy,
    side: Side,
}

impl<'a, T: TreeNode> Iterator for Surviving<'a, '_, T> {
    type Item = CompareResult<Record<'a, T>>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let record = match self.records.next()? {
                Ok(record) => record,
                Err(err) => return Some(Err(err)),
            };
            if self.policy.excluded(&record.path) {
                tracing::trace!(side = %self.side, path = %record.path, "excluded");
                continue;
            }
            return Some(Ok(record));
        }
    }
}

/// The K-th surviving leaf of each side.
#[derive(Debug, Clone, PartialEq)]
pub struct Pair<'a, T> {
    /// Zero-based position among surviving pairs.
    pub index: usize,
    /// Leaf from the reference tree.
    pub reference: Record<'a, T>,
    /// Leaf from the candidate tree.
    pub candidate: Record<'a, T>,
}

/// Surviving-leaf counts for both sides, known once pairing has finished.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tally {
    /// Pairs produced.
    pub pairs: usize,
    /// Surviving leaves in the reference.
    pub reference: usize,
    /// Surviving leaves in the candidate.
    pub candidate: usize,
    /// The first leaf left without a partner, if one side was longer.
    pub first_unpaired: Option<(Side, Path)>,
}

impl Tally {
    /// True when both sides had the same number of surviving leaves.
    #[must_use]
    pub fn counts_match(&self) -> bool {
        self.reference == self.candidate
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Running,
    Exhausted,
    Failed,
}

/// Lazy iterator of positionally paired surviving leaves.
///
/// Stops as soon as either side runs out, without raising. Call
/// [`Pairs::finish`] to learn whether the other side still had leaves.
pub struct Pairs<'a, 'p, T> {
    reference: Surviving<'a, 'p, T>,
    candidate: Surviving<'a, 'p, T>,
    yielded: usize,
    dangling: Option<(Side, Record<'a, T>)>,
    failure: Option<CompareError>,
    state: State,
}

/// Pair the surviving leaves of `reference` and `candidate`.
///
/// ```
/// use idiom_diff::{pairs, ExclusionPolicy};
/// use serde_json::json;
///
/// let policy = ExclusionPolicy::empty().ignore_field("id");
/// let master = json!({"id": "a", "name": "Alpha"});
/// let fresh = json!({"id": "b", "name": "Alpha"});
///
/// let paired: Vec<_> = pairs(&master, &fresh, &policy)
///     .collect::<Result<_, _>>()
///     .unwrap();
/// assert_eq!(paired.len(), 1);
/// assert_eq!(paired[0].reference.path.to_string(), "name");
/// ```
pub fn pairs<'a, 'p, T: TreeNode>(
    reference: &'a T,
    candidate: &'a T,
    policy: &'p ExclusionPolicy,
) -> Pairs<'a, 'p, T> {
    Pairs {
        reference: Surviving {
            records: walk(reference),
            policy,
            side: Side::Reference,
        },
        candidate: Surviving {
            records: walk(candidate),
            policy,
            side: Side::Candidate,
        },
        yielded: 0,
        dangling: None,
        failure: None,
        state: State::Running,
    }
}

impl<'a, T: TreeNode> Pairs<'a, '_, T> {
    fn fail(&mut self, err: CompareError) -> Option<CompareResult<Pair<'a, T>>> {
        self.state = State::Failed;
        self.failure = Some(err.clone());
        Some(Err(err))
    }

    /// Drain both sides and report how many leaves each had.
    ///
    /// Pairs not yet pulled are consumed and counted. An invalid structure
    /// met at any point, including one already yielded, is returned as the
    /// error.
    pub fn finish(mut self) -> CompareResult<Tally> {
        while let Some(item) = self.next() {
            item?;
        }
        if let Some(err) = self.failure.take() {
            return Err(err);
        }

        let mut reference = self.yielded;
        let mut candidate = self.yielded;
        let first_unpaired = self.dangling.take().map(|(side, record)| {
            match side {
                Side::Reference => reference += 1,
                Side::Candidate => candidate += 1,
            }
            (side, record.path)
        });
        for record in self.reference.by_ref() {
            record?;
            reference += 1;
        }
        for record in self.candidate.by_ref() {
            record?;
            candidate += 1;
        }

        Ok(Tally {
            pairs: self.yielded,
            reference,
            candidate,
            first_unpaired,
        })
    }
}

impl<'a, T: TreeNode> Iterator for Pairs<'a, '_, T> {
    type Item = CompareResult<Pair<'a, T>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.state != State::Running {
            return None;
        }

        let reference = match self.reference.next() {
            Some(Ok(record)) => Some(record),
            Some(Err(err)) => return self.fail(err),
            None => None,
        };
        let candidate = match self.candidate.next() {
            Some(Ok(record)) => Some(record),
            Some(Err(err)) => return self.fail(err),
            None => None,
        };

        match (reference, candidate) {
            (Some(reference), Some(candidate)) => {
                let pair = Pair {
                    index: self.yielded,
                    reference,
                    candidate,
                };
                self.yielded += 1;
                Some(Ok(pair))
            }
            (None, None) => {
                self.state = State::Exhausted;
                None
            }
            (Some(record), None) => {
                self.dangling = Some((Side::Reference, record));
                self.state = State::Exhausted;
                None
            }
            (None, Some(record)) => {
                self.dangling = Some((Side::Candidate, record));
                self.state = State::Exhausted;
                None
            }
        }
    }
}

impl<T: TreeNode> FusedIterator for Pairs<'_, '_, T> {}

/// What kind of assertion failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MismatchKind {
    /// The K-th surviving leaves sit at different paths; the trees diverged
    /// in shape.
    Path {
        /// Path of the candidate leaf.
        candidate: Path,
        /// First differing step between the two paths.
        divergence: Divergence,
    },
    /// Same path, different leaf values.
    Value {
        /// First differing character of the rendered values.
        divergence: Divergence,
    },
    /// Every pair matched but one side had more surviving leaves.
    Count {
        /// Surviving leaves in the reference.
        reference: usize,
        /// Surviving leaves in the candidate.
        candidate: usize,
        /// The side that still had leaves.
        longer: Side,
    },
}

/// The first failed assertion of a comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Mismatch {
    /// The reference path of the failing pair, or the path of the first
    /// unpaired leaf for a count mismatch.
    pub path: Path,
    /// Position of the failing pair among surviving pairs.
    pub pair_index: usize,
    /// What failed.
    #[serde(flatten)]
    pub kind: MismatchKind,
    /// Rendered reference value, when there is one.
    pub reference: Option<String>,
    /// Rendered candidate value, when there is one.
    pub candidate: Option<String>,
}

impl Mismatch {
    fn at_pair<T: TreeNode>(pair: &Pair<'_, T>, kind: MismatchKind) -> Self {
        Self {
            path: pair.reference.path.clone(),
            pair_index: pair.index,
            kind,
            reference: Some(pair.reference.value.render()),
            candidate: Some(pair.candidate.value.render()),
        }
    }

    /// True for path and count mismatches, which mean the trees differ in
    /// shape rather than in a leaf value.
    #[must_use]
    pub fn is_shape_mismatch(&self) -> bool {
        !matches!(self.kind, MismatchKind::Value { .. })
    }
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            MismatchKind::Path {
                candidate,
                divergence,
            } => write!(
                f,
                "path mismatch at pair {}: reference {} vs candidate {} ({divergence})",
                self.pair_index, self.path, candidate
            ),
            MismatchKind::Value { divergence } => write!(
                f,
                "value mismatch at {}: reference {} vs candidate {} ({divergence})",
                self.path,
                self.reference.as_deref().unwrap_or("-"),
                self.candidate.as_deref().unwrap_or("-"),
            ),
            MismatchKind::Count {
                reference,
                candidate,
                longer,
            } => write!(
                f,
                "leaf count mismatch: reference has {reference}, candidate has {candidate}; \
                 {longer} continues at {}",
                self.path
            ),
        }
    }
}

/// Result of a full comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "mismatch", rename_all = "snake_case")]
pub enum Outcome {
    /// All surviving pairs matched and the counts agree.
    Equal,
    /// The first failed assertion.
    Mismatch(Mismatch),
}

impl Outcome {
    /// True for [`Outcome::Equal`].
    #[must_use]
    pub fn is_equal(&self) -> bool {
        matches!(self, Self::Equal)
    }

    /// The mismatch, if any.
    #[must_use]
    pub fn mismatch(&self) -> Option<&Mismatch> {
        match self {
            Self::Equal => None,
            Self::Mismatch(mismatch) => Some(mismatch),
        }
    }
}

/// Outcome plus how many pairs were examined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verdict {
    /// Equal, or where it first went wrong.
    pub outcome: Outcome,
    /// Surviving pairs examined, including a failing one.
    pub pairs: usize,
}

/// Compare `candidate` against `reference` under `policy`.
///
/// Checks, in order, for each surviving pair: the paths are equal, then the
/// values are equal. After the last pair it checks that neither side had
/// leaves left over. Returns at the first failed check.
///
/// # Errors
///
/// Returns [`CompareError::InvalidStructure`] if either tree contains a node
/// outside the mapping/sequence/scalar model.
///
/// ```
/// use idiom_diff::{verify, ExclusionPolicy, Outcome};
/// use serde_json::json;
///
/// let policy = ExclusionPolicy::empty().ignore_field("id").ignore_field("created");
/// let master = json!({"id": "abc-1", "name": "Alpha", "created": "T1"});
///
/// let fresh = json!({"id": "xyz-2", "name": "Alpha", "created": "T2"});
/// assert_eq!(verify(&master, &fresh, &policy).unwrap().outcome, Outcome::Equal);
///
/// let changed = json!({"id": "xyz-2", "name": "Beta", "created": "T2"});
/// let verdict = verify(&master, &changed, &policy).unwrap();
/// assert_eq!(verdict.outcome.mismatch().unwrap().path.to_string(), "name");
/// ```
pub fn verify<T>(reference: &T, candidate: &T, policy: &ExclusionPolicy) -> CompareResult<Verdict>
where
    T: TreeNode,
{
    let span = tracing::debug_span!("verify");
    let _guard = span.enter();

    let mut paired = pairs(reference, candidate, policy);
    let mut examined = 0;

    for pair in paired.by_ref() {
        let pair = pair?;
        examined += 1;

        if pair.reference.path != pair.candidate.path {
            let divergence = locate_paths(&pair.reference.path, &pair.candidate.path);
            let kind = MismatchKind::Path {
                candidate: pair.candidate.path.clone(),
                divergence,
            };
            return Ok(mismatch(Mismatch::at_pair(&pair, kind), examined));
        }

        if !pair.reference.value.leaf_eq(pair.candidate.value) {
            let mismatch_at = Mismatch::at_pair(&pair, MismatchKind::Value {
                divergence: Divergence::NoDifference,
            });
            let divergence = locate_str(
                mismatch_at.reference.as_deref().unwrap_or_default(),
                mismatch_at.candidate.as_deref().unwrap_or_default(),
            );
            let mismatch_at = Mismatch {
                kind: MismatchKind::Value { divergence },
                ..mismatch_at
            };
            return Ok(mismatch(mismatch_at, examined));
        }
    }

    let tally = paired.finish()?;
    if let Some((longer, path)) = tally.first_unpaired.clone() {
        let unpaired = Mismatch {
            path,
            pair_index: tally.pairs,
            kind: MismatchKind::Count {
                reference: tally.reference,
                candidate: tally.candidate,
                longer,
            },
            reference: None,
            candidate: None,
        };
        return Ok(mismatch(unpaired, examined));
    }

    tracing::debug!(pairs = examined, "documents match");
    Ok(Verdict {
        outcome: Outcome::Equal,
        pairs: examined,
    })
}

fn mismatch(mismatch: Mismatch, pairs: usize) -> Verdict {
    tracing::debug!(pairs, %mismatch, "documents differ");
    Verdict {
        outcome: Outcome::Mismatch(mismatch),
        pairs,
    }
}
