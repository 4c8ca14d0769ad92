#![deny(missing_docs)]

//! Deterministic Monte-Carlo estimation of the probability that a uniformly
//! drawn energy lies in a [`StatePredicate`](sprob_core::StatePredicate).

/// Seeded estimation entry points.
pub mod estimator;
/// Exact enumeration for reference probabilities.
pub mod exact;
/// Closed sampling ranges.
pub mod range;
/// Seed sources for repeated estimations.
pub mod seeding;
/// Statistics over repeated estimations.
pub mod stats;

pub use estimator::{estimate, estimate_with_rng, EstimateReport, Estimator};
pub use exact::{exact_probability, EXACT_ENUMERATION_LIMIT};
pub use range::SampleRange;
pub use seeding::{SeedSequence, SeedSource};
pub use stats::TierStats;
