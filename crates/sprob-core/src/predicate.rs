//! Composable membership tests over integer energy values.
//!
//! A [`StatePredicate`] is an immutable tree whose leaves are single points
//! ([`PredicateKind::Discrete`]) or closed ranges ([`PredicateKind::Interval`])
//! and whose inner nodes combine children with negation, conjunction or
//! disjunction. Children are reference counted, so a subtree can be reused by
//! several parents and a finished tree can be shared across threads.
//!
//! Evaluation and teardown both walk the tree with an explicit work list, so
//! a union of many thousands of points built by repeated rebinding neither
//! overflows the stack when queried nor when dropped.

use std::fmt;
use std::mem;
use std::ops::{BitAnd, BitOr, Not};
use std::sync::Arc;

use crate::errors::{ErrorInfo, SprobError};

/// Position on the one-dimensional discrete energy axis.
pub type Energy = i32;

/// Node shape of a [`StatePredicate`].
#[derive(Debug, Clone)]
pub enum PredicateKind {
    /// Matches exactly one energy value.
    Discrete(Energy),
    /// Matches `lo <= s <= hi`. An inverted range never matches.
    Interval {
        /// Inclusive lower bound.
        lo: Energy,
        /// Inclusive upper bound.
        hi: Energy,
    },
    /// Matches everything the base does not.
    Not(Arc<StatePredicate>),
    /// Matches values contained by both children.
    And(Arc<StatePredicate>, Arc<StatePredicate>),
    /// Matches values contained by either child.
    Or(Arc<StatePredicate>, Arc<StatePredicate>),
}

/// Immutable membership test over [`Energy`] values.
#[derive(Clone)]
pub struct StatePredicate {
    kind: PredicateKind,
}

enum Frame<'a> {
    Eval(&'a StatePredicate),
    Negate,
    AndThen(&'a StatePredicate),
    OrElse(&'a StatePredicate),
}

impl StatePredicate {
    /// Predicate matching the single value `value`.
    pub fn discrete(value: Energy) -> Self {
        Self::from_kind(PredicateKind::Discrete(value))
    }

    /// Predicate matching the closed range `[lo, hi]`.
    ///
    /// The bounds are not validated: `lo > hi` yields a predicate that never
    /// matches.
    pub fn interval(lo: Energy, hi: Energy) -> Self {
        Self::from_kind(PredicateKind::Interval { lo, hi })
    }

    /// Negation of `base`.
    pub fn negate(base: impl Into<Arc<StatePredicate>>) -> Self {
        Self::from_kind(PredicateKind::Not(base.into()))
    }

    /// Conjunction of `lhs` and `rhs`.
    pub fn and_of(
        lhs: impl Into<Arc<StatePredicate>>,
        rhs: impl Into<Arc<StatePredicate>>,
    ) -> Self {
        Self::from_kind(PredicateKind::And(lhs.into(), rhs.into()))
    }

    /// Disjunction of `lhs` and `rhs`.
    pub fn or_of(
        lhs: impl Into<Arc<StatePredicate>>,
        rhs: impl Into<Arc<StatePredicate>>,
    ) -> Self {
        Self::from_kind(PredicateKind::Or(lhs.into(), rhs.into()))
    }

    fn from_kind(kind: PredicateKind) -> Self {
        Self { kind }
    }

    /// Shape of the root node.
    pub fn kind(&self) -> &PredicateKind {
        &self.kind
    }

    /// Returns `true` when `energy` belongs to the state.
    ///
    /// `And` and `Or` short-circuit on their left child.
    pub fn contains(&self, energy: Energy) -> bool {
        match &self.kind {
            PredicateKind::Discrete(value) => return *value == energy,
            PredicateKind::Interval { lo, hi } => return *lo <= energy && energy <= *hi,
            _ => {}
        }

        let mut frames = vec![Frame::Eval(self)];
        let mut value = false;
        while let Some(frame) = frames.pop() {
            match frame {
                Frame::Eval(node) => match &node.kind {
                    PredicateKind::Discrete(point) => value = *point == energy,
                    PredicateKind::Interval { lo, hi } => value = *lo <= energy && energy <= *hi,
                    PredicateKind::Not(base) => {
                        frames.push(Frame::Negate);
                        frames.push(Frame::Eval(base.as_ref()));
                    }
                    PredicateKind::And(lhs, rhs) => {
                        frames.push(Frame::AndThen(rhs.as_ref()));
                        frames.push(Frame::Eval(lhs.as_ref()));
                    }
                    PredicateKind::Or(lhs, rhs) => {
                        frames.push(Frame::OrElse(rhs.as_ref()));
                        frames.push(Frame::Eval(lhs.as_ref()));
                    }
                },
                Frame::Negate => value = !value,
                Frame::AndThen(rhs) => {
                    if value {
                        frames.push(Frame::Eval(rhs));
                    }
                }
                Frame::OrElse(rhs) => {
                    if !value {
                        frames.push(Frame::Eval(rhs));
                    }
                }
            }
        }
        value
    }

    /// Number of nodes reachable from the root, counting shared subtrees once
    /// per occurrence.
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        let mut pending = vec![self];
        while let Some(node) = pending.pop() {
            count += 1;
            node.push_children(&mut pending);
        }
        count
    }

    /// Length of the longest root-to-leaf path. A leaf has depth 1.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut pending = vec![(self, 1usize)];
        while let Some((node, level)) = pending.pop() {
            deepest = deepest.max(level);
            let mut children = Vec::with_capacity(2);
            node.push_children(&mut children);
            pending.extend(children.into_iter().map(|child| (child, level + 1)));
        }
        deepest
    }

    /// Number of `Discrete` and `Interval` leaves.
    pub fn leaf_count(&self) -> usize {
        let mut leaves = 0;
        let mut pending = vec![self];
        while let Some(node) = pending.pop() {
            match &node.kind {
                PredicateKind::Discrete(_) | PredicateKind::Interval { .. } => leaves += 1,
                _ => node.push_children(&mut pending),
            }
        }
        leaves
    }

    fn push_children<'a>(&'a self, out: &mut Vec<&'a StatePredicate>) {
        match &self.kind {
            PredicateKind::Discrete(_) | PredicateKind::Interval { .. } => {}
            PredicateKind::Not(base) => out.push(base.as_ref()),
            PredicateKind::And(lhs, rhs) | PredicateKind::Or(lhs, rhs) => {
                out.push(lhs.as_ref());
                out.push(rhs.as_ref());
            }
        }
    }

    fn detach_children(&mut self, out: &mut Vec<Arc<StatePredicate>>) {
        match mem::replace(&mut self.kind, PredicateKind::Discrete(0)) {
            PredicateKind::Discrete(_) | PredicateKind::Interval { .. } => {}
            PredicateKind::Not(base) => out.push(base),
            PredicateKind::And(lhs, rhs) | PredicateKind::Or(lhs, rhs) => {
                out.push(lhs);
                out.push(rhs);
            }
        }
    }
}

impl Drop for StatePredicate {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.detach_children(&mut pending);
        while let Some(child) = pending.pop() {
            // Shared children stay alive through their other owners.
            if let Ok(mut node) = Arc::try_unwrap(child) {
                node.detach_children(&mut pending);
            }
        }
    }
}

impl fmt::Debug for StatePredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            PredicateKind::Discrete(value) => f.debug_tuple("Discrete").field(value).finish(),
            PredicateKind::Interval { lo, hi } => f
                .debug_struct("Interval")
                .field("lo", lo)
                .field("hi", hi)
                .finish(),
            PredicateKind::Not(_) => f.debug_struct("Not").finish_non_exhaustive(),
            PredicateKind::And(..) => f.debug_struct("And").finish_non_exhaustive(),
            PredicateKind::Or(..) => f.debug_struct("Or").finish_non_exhaustive(),
        }
    }
}

impl Not for StatePredicate {
    type Output = StatePredicate;

    fn not(self) -> Self::Output {
        StatePredicate::negate(self)
    }
}

impl BitAnd for StatePredicate {
    type Output = StatePredicate;

    fn bitand(self, rhs: Self) -> Self::Output {
        StatePredicate::and_of(self, rhs)
    }
}

impl BitOr for StatePredicate {
    type Output = StatePredicate;

    fn bitor(self, rhs: Self) -> Self::Output {
        StatePredicate::or_of(self, rhs)
    }
}

/// See [`StatePredicate::discrete`].
pub fn discrete(value: Energy) -> StatePredicate {
    StatePredicate::discrete(value)
}

/// See [`StatePredicate::interval`].
pub fn interval(lo: Energy, hi: Energy) -> StatePredicate {
    StatePredicate::interval(lo, hi)
}

/// See [`StatePredicate::negate`].
pub fn negate(base: impl Into<Arc<StatePredicate>>) -> StatePredicate {
    StatePredicate::negate(base)
}

/// See [`StatePredicate::and_of`].
pub fn and_of(
    lhs: impl Into<Arc<StatePredicate>>,
    rhs: impl Into<Arc<StatePredicate>>,
) -> StatePredicate {
    StatePredicate::and_of(lhs, rhs)
}

/// See [`StatePredicate::or_of`].
pub fn or_of(
    lhs: impl Into<Arc<StatePredicate>>,
    rhs: impl Into<Arc<StatePredicate>>,
) -> StatePredicate {
    StatePredicate::or_of(lhs, rhs)
}

/// Disjunction of every predicate in `terms`, reduced pairwise so the result
/// has logarithmic depth.
pub fn any_of<I>(terms: I) -> Result<StatePredicate, SprobError>
where
    I: IntoIterator<Item = StatePredicate>,
{
    reduce_balanced(terms.into_iter().collect(), |lhs, rhs| {
        StatePredicate::or_of(lhs, rhs)
    })
    .ok_or_else(|| empty_composition("any_of"))
}

/// Conjunction of every predicate in `terms`, reduced pairwise.
pub fn all_of<I>(terms: I) -> Result<StatePredicate, SprobError>
where
    I: IntoIterator<Item = StatePredicate>,
{
    reduce_balanced(terms.into_iter().collect(), |lhs, rhs| {
        StatePredicate::and_of(lhs, rhs)
    })
    .ok_or_else(|| empty_composition("all_of"))
}

/// Left fold of `terms` into `Or(Or(Or(p0, p1), p2), ...)`.
///
/// This is the accumulator pattern `acc = or_of(acc, next)` written as a
/// fold: each intermediate root becomes the left child of its successor.
pub fn union_chain<I>(terms: I) -> Result<StatePredicate, SprobError>
where
    I: IntoIterator<Item = StatePredicate>,
{
    let mut terms = terms.into_iter();
    let first = terms
        .next()
        .ok_or_else(|| empty_composition("union_chain"))?;
    Ok(terms.fold(first, |acc, next| StatePredicate::or_of(acc, next)))
}

fn reduce_balanced(
    terms: Vec<StatePredicate>,
    join: fn(StatePredicate, StatePredicate) -> StatePredicate,
) -> Option<StatePredicate> {
    let mut layer = terms;
    while layer.len() > 1 {
        let mut next = Vec::with_capacity((layer.len() + 1) / 2);
        let mut items = layer.into_iter();
        while let Some(lhs) = items.next() {
            match items.next() {
                Some(rhs) => next.push(join(lhs, rhs)),
                None => next.push(lhs),
            }
        }
        layer = next;
    }
    layer.pop()
}

fn empty_composition(operation: &str) -> SprobError {
    SprobError::InvalidPredicate(
        ErrorInfo::new("empty-composition", "a state needs at least one leaf predicate")
            .with_context("operation", operation),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leaves_match_their_values() {
        let point = discrete(7);
        assert!(point.contains(7));
        assert!(!point.contains(6));

        let range = interval(-2, 3);
        assert!(range.contains(-2));
        assert!(range.contains(3));
        assert!(!range.contains(4));
        assert!(!range.contains(-3));
    }

    #[test]
    fn inverted_interval_never_matches() {
        let empty = interval(5, -5);
        assert!((-10..=10).all(|s| !empty.contains(s)));
    }

    #[test]
    fn shared_children_survive_parent_drop() {
        let shared = Arc::new(interval(0, 10));
        let first = or_of(Arc::clone(&shared), discrete(20));
        let second = and_of(Arc::clone(&shared), negate(discrete(5)));
        drop(first);
        assert!(second.contains(4));
        assert!(!second.contains(5));
        assert!(shared.contains(10));
    }

    #[test]
    fn diagnostics_count_nodes() {
        let tree = or_of(and_of(discrete(1), interval(0, 3)), negate(discrete(2)));
        assert_eq!(tree.node_count(), 6);
        assert_eq!(tree.leaf_count(), 3);
        assert_eq!(tree.depth(), 3);
    }

    #[test]
    fn balanced_union_is_shallow() {
        let union = any_of((0..16).map(discrete)).unwrap();
        assert_eq!(union.leaf_count(), 16);
        assert_eq!(union.depth(), 5);
        assert!((0..16).all(|s| union.contains(s)));
        assert!(!union.contains(16));
    }

    #[test]
    fn single_term_is_returned_unchanged() {
        let only = all_of([interval(1, 2)]).unwrap();
        assert!(matches!(only.kind(), PredicateKind::Interval { lo: 1, hi: 2 }));
    }

    #[test]
    fn debug_output_is_compact_for_composites() {
        let tree = discrete(1) | discrete(2);
        assert_eq!(format!("{tree:?}"), "Or { .. }");
        assert_eq!(format!("{:?}", !interval(0, 1)), "Not { .. }");
    }

    #[test]
    fn debug_of_shared_dag_does_not_walk_paths() {
        let mut dag = Arc::new(discrete(0));
        for _ in 0..64 {
            dag = Arc::new(or_of(Arc::clone(&dag), Arc::clone(&dag)));
        }
        assert_eq!(format!("{dag:?}"), "Or { .. }");
        assert!(dag.contains(0));
    }
}
