//! Declarative predicate descriptions loaded from plans and the command line.

use serde::{Deserialize, Serialize};

use crate::errors::{ErrorInfo, SprobError};
use crate::predicate::{all_of, any_of, Energy, StatePredicate};
use crate::rng::RngHandle;
use crate::scatter::scattered_union;

/// Serializable description of a [`StatePredicate`].
///
/// Definitions are validated when they are built, never later: a missing
/// `not` base or an empty `terms` list is reported as
/// [`SprobError::InvalidPredicate`] before any tree exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum PredicateDef {
    /// Single energy value.
    Discrete {
        /// Matched value.
        value: Energy,
    },
    /// Closed range of energies.
    Interval {
        /// Inclusive lower bound.
        lo: Energy,
        /// Inclusive upper bound.
        hi: Energy,
    },
    /// Negation of `base`.
    Not {
        /// Negated definition. Required; kept optional so that a missing
        /// base surfaces as a predicate error instead of a parse error.
        #[serde(default)]
        base: Option<Box<PredicateDef>>,
    },
    /// Conjunction of all terms.
    And {
        /// Conjoined definitions.
        #[serde(default)]
        terms: Vec<PredicateDef>,
    },
    /// Disjunction of all terms.
    Or {
        /// Disjoined definitions.
        #[serde(default)]
        terms: Vec<PredicateDef>,
    },
    /// Random-walk union of discrete points, see [`scattered_union`].
    Scattered {
        /// First point of the walk.
        start: Energy,
        /// Number of points.
        count: usize,
        /// Smallest step between consecutive points.
        #[serde(default = "default_min_step")]
        min_step: Energy,
        /// Largest step between consecutive points.
        #[serde(default = "default_max_step")]
        max_step: Energy,
        /// Seed for the step sequence.
        #[serde(default)]
        seed: u64,
    },
}

fn default_min_step() -> Energy {
    1
}

fn default_max_step() -> Energy {
    4
}

impl PredicateDef {
    /// Builds the predicate tree described by this definition.
    pub fn build(&self) -> Result<StatePredicate, SprobError> {
        match self {
            PredicateDef::Discrete { value } => Ok(StatePredicate::discrete(*value)),
            PredicateDef::Interval { lo, hi } => Ok(StatePredicate::interval(*lo, *hi)),
            PredicateDef::Not { base } => {
                let base = base.as_deref().ok_or_else(|| {
                    SprobError::InvalidPredicate(
                        ErrorInfo::new("missing-base", "negation requires a base predicate")
                            .with_hint("add a `base` entry to the `not` definition"),
                    )
                })?;
                Ok(StatePredicate::negate(base.build()?))
            }
            PredicateDef::And { terms } => {
                ensure_terms("and", terms)?;
                all_of(build_terms(terms)?)
            }
            PredicateDef::Or { terms } => {
                ensure_terms("or", terms)?;
                any_of(build_terms(terms)?)
            }
            PredicateDef::Scattered {
                start,
                count,
                min_step,
                max_step,
                seed,
            } => {
                let mut rng = RngHandle::from_seed(*seed);
                let (union, _) = scattered_union(*start, *count, *min_step, *max_step, &mut rng)?;
                Ok(union)
            }
        }
    }
}

fn ensure_terms(operator: &str, terms: &[PredicateDef]) -> Result<(), SprobError> {
    if terms.is_empty() {
        return Err(SprobError::InvalidPredicate(
            ErrorInfo::new("empty-terms", "composite definitions need at least one term")
                .with_context("operator", operator),
        ));
    }
    Ok(())
}

fn build_terms(terms: &[PredicateDef]) -> Result<Vec<StatePredicate>, SprobError> {
    terms.iter().map(PredicateDef::build).collect()
}
