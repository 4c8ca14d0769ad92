use sprob_core::{ErrorInfo, SprobError, StatePredicate};

use crate::range::SampleRange;

/// Widest range [`exact_probability`] will enumerate.
pub const EXACT_ENUMERATION_LIMIT: u64 = 1 << 24;

/// Exact fraction of `range` contained by `predicate`, by enumeration.
///
/// This is the value Monte-Carlo estimates converge to and is used as the
/// reference when reporting estimation error.
pub fn exact_probability(
    predicate: &StatePredicate,
    range: SampleRange,
) -> Result<f64, SprobError> {
    let width = range.width();
    if width > EXACT_ENUMERATION_LIMIT {
        return Err(SprobError::InvalidArgument(
            ErrorInfo::new("range-too-wide", "range is too wide to enumerate")
                .with_context("width", width)
                .with_context("limit", EXACT_ENUMERATION_LIMIT),
        ));
    }
    let hits = range.iter().filter(|&s| predicate.contains(s)).count();
    Ok(hits as f64 / width as f64)
}
