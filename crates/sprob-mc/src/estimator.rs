use log::debug;
use rand::distributions::{Distribution, Uniform};
use rand::Rng;
use serde::{Deserialize, Serialize};
use sprob_core::{Energy, ErrorInfo, RngHandle, SprobError, StatePredicate};

use crate::range::SampleRange;

/// Outcome of a single estimation run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EstimateReport {
    /// Number of draws performed.
    pub samples: u64,
    /// Draws contained by the predicate.
    pub hits: u64,
    /// `hits / samples`.
    pub probability: f64,
    /// Binomial standard error `sqrt(p (1 - p) / samples)`.
    pub standard_error: f64,
}

impl EstimateReport {
    fn from_counts(hits: u64, samples: u64) -> Self {
        let probability = hits as f64 / samples as f64;
        let standard_error = (probability * (1.0 - probability) / samples as f64).sqrt();
        Self {
            samples,
            hits,
            probability,
            standard_error,
        }
    }
}

/// Estimates the probability that a uniform draw from `[lo, hi]` lies in
/// `predicate`.
///
/// The generator is seeded with `seed`, so identical arguments always give
/// the same result. `sample_count == 0` and `lo > hi` are rejected with
/// [`SprobError::InvalidArgument`] before anything is drawn.
pub fn estimate(
    predicate: &StatePredicate,
    lo: Energy,
    hi: Energy,
    sample_count: u64,
    seed: u64,
) -> Result<f64, SprobError> {
    Estimator::new(SampleRange::new(lo, hi)?).estimate(predicate, sample_count, seed)
}

/// Runs an estimation with a caller-supplied generator.
pub fn estimate_with_rng<R>(
    predicate: &StatePredicate,
    range: SampleRange,
    sample_count: u64,
    rng: &mut R,
) -> Result<EstimateReport, SprobError>
where
    R: Rng + ?Sized,
{
    if sample_count == 0 {
        return Err(SprobError::InvalidArgument(
            ErrorInfo::new("zero-samples", "an estimate needs at least one sample")
                .with_context("lo", range.lo())
                .with_context("hi", range.hi())
                .with_hint("request one or more samples"),
        ));
    }

    let energies = Uniform::new_inclusive(range.lo(), range.hi());
    let mut hits = 0u64;
    for _ in 0..sample_count {
        if predicate.contains(energies.sample(rng)) {
            hits += 1;
        }
    }
    let report = EstimateReport::from_counts(hits, sample_count);
    debug!(
        "estimate over [{}, {}]: {}/{} hits, p = {:.6}",
        range.lo(),
        range.hi(),
        hits,
        sample_count,
        report.probability
    );
    Ok(report)
}

/// Estimator bound to a fixed sampling range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Estimator {
    range: SampleRange,
}

impl Estimator {
    /// Creates an estimator drawing from `range`.
    pub fn new(range: SampleRange) -> Self {
        Self { range }
    }

    /// Fraction of `sample_count` seeded draws contained by `predicate`.
    pub fn estimate(
        &self,
        predicate: &StatePredicate,
        sample_count: u64,
        seed: u64,
    ) -> Result<f64, SprobError> {
        self.estimate_report(predicate, sample_count, seed)
            .map(|report| report.probability)
    }

    /// Like [`Estimator::estimate`], with hit counts and standard error.
    pub fn estimate_report(
        &self,
        predicate: &StatePredicate,
        sample_count: u64,
        seed: u64,
    ) -> Result<EstimateReport, SprobError> {
        let mut rng = RngHandle::from_seed(seed);
        estimate_with_rng(predicate, self.range, sample_count, &mut rng)
    }
}
