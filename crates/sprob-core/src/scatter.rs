//! Random unions of discrete points.

use log::debug;
use rand::distributions::{Distribution, Uniform};
use rand::Rng;

use crate::errors::{ErrorInfo, SprobError};
use crate::predicate::{union_chain, Energy, StatePredicate};

/// Builds a union of `count` discrete points along a random walk.
///
/// The first point is `start`; every following point adds a step drawn
/// uniformly from `[min_step, max_step]`. The points are folded left into a
/// chain of `Or` nodes, one per point, and returned alongside the predicate.
pub fn scattered_union<R>(
    start: Energy,
    count: usize,
    min_step: Energy,
    max_step: Energy,
    rng: &mut R,
) -> Result<(StatePredicate, Vec<Energy>), SprobError>
where
    R: Rng + ?Sized,
{
    if count == 0 {
        return Err(SprobError::InvalidPredicate(
            ErrorInfo::new("scatter-empty", "a scattered union needs at least one point")
                .with_context("count", count),
        ));
    }
    if min_step < 1 || min_step > max_step {
        return Err(SprobError::InvalidPredicate(
            ErrorInfo::new("scatter-steps", "step range must satisfy 1 <= min_step <= max_step")
                .with_context("min_step", min_step)
                .with_context("max_step", max_step),
        ));
    }

    // Even the shortest walk must stay inside the energy axis.
    let headroom = (i64::from(Energy::MAX) - i64::from(start)) / i64::from(min_step);
    if (count - 1) as u64 > headroom as u64 {
        return Err(SprobError::InvalidArgument(
            ErrorInfo::new("scatter-overflow", "scattered points would leave the energy range")
                .with_context("start", start)
                .with_context("count", count)
                .with_context("min_step", min_step),
        ));
    }

    let steps = Uniform::new_inclusive(min_step, max_step);
    let mut points = Vec::new();
    let mut position = start;
    points.push(position);
    for index in 1..count {
        let step = steps.sample(rng);
        position = position.checked_add(step).ok_or_else(|| {
            SprobError::InvalidArgument(
                ErrorInfo::new("scatter-overflow", "scattered points left the energy range")
                    .with_context("start", start)
                    .with_context("index", index),
            )
        })?;
        points.push(position);
    }
    debug!(
        "scattered union: {} points in [{}, {}]",
        points.len(),
        start,
        position
    );

    let union = union_chain(points.iter().copied().map(StatePredicate::discrete))?;
    Ok((union, points))
}
