#![deny(missing_docs)]
//! Core types for sprob: the energy-state predicate algebra, structured
//! errors and deterministic randomness shared by the estimator and the
//! experiment driver.

pub mod definition;
pub mod errors;
pub mod predicate;
pub mod rng;
pub mod scatter;

pub use definition::PredicateDef;
pub use errors::{ErrorInfo, SprobError};
pub use predicate::{
    all_of, and_of, any_of, discrete, interval, negate, or_of, union_chain, Energy,
    PredicateKind, StatePredicate,
};
pub use rng::{derive_substream_seed, RngHandle};
pub use scatter::scattered_union;
