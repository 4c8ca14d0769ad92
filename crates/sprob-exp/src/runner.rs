use log::{debug, info};
use serde::{Deserialize, Serialize};
use sprob_core::SprobError;
use sprob_mc::{exact_probability, Estimator, SampleRange, TierStats, EXACT_ENUMERATION_LIMIT};

use crate::hash::stable_hash_string;
use crate::plan::ExperimentPlan;

/// Estimates recorded for one state at one sample count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierResult {
    /// Tier exponent; the sample count is `base^power`.
    pub power: u32,
    /// Raw estimates, one per trial, in seed order.
    pub estimates: Vec<f64>,
    /// Summary of `estimates`.
    pub stats: TierStats,
}

/// All tiers for a single state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateReport {
    /// Label from the plan.
    pub label: String,
    /// Leaf predicates in the built tree.
    pub leaves: usize,
    /// Exact probability over the sampling range.
    pub exact: Option<f64>,
    /// Results ordered by increasing sample count.
    pub tiers: Vec<TierResult>,
}

/// Result of running an [`ExperimentPlan`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentReport {
    /// Hash of the plan that produced this report.
    pub plan_hash: String,
    /// Whether re-running the plan reproduces every estimate.
    pub reproducible: bool,
    /// Per-state results in plan order.
    pub states: Vec<StateReport>,
}

/// Runs every state of `plan` through every sample-count tier.
///
/// Each estimation takes the next seed from the plan's seed policy, so no two
/// estimations share a generator stream.
pub fn run_experiment(plan: &ExperimentPlan) -> Result<ExperimentReport, SprobError> {
    plan.validate()?;
    let plan_hash = stable_hash_string(plan)?;
    let range = SampleRange::symmetric(plan.bound)?;
    let estimator = Estimator::new(range);
    let tiers = plan.tiers()?;
    let mut seeds = plan.seed_policy.sequence();
    info!(
        "experiment {}: {} states, {} tiers, {} trials per tier",
        &plan_hash[..12],
        plan.states.len(),
        tiers.len(),
        plan.trials
    );

    let mut states = Vec::with_capacity(plan.states.len());
    for entry in &plan.states {
        let predicate = entry.predicate.build()?;
        let exact = if range.width() <= EXACT_ENUMERATION_LIMIT {
            Some(exact_probability(&predicate, range)?)
        } else {
            None
        };
        let mut results = Vec::with_capacity(tiers.len());
        for (power, &sample_count) in (0u32..).zip(tiers.iter()) {
            let mut estimates = Vec::with_capacity(plan.trials);
            for _ in 0..plan.trials {
                let seed = seeds.next_seed()?;
                estimates.push(estimator.estimate(&predicate, sample_count, seed)?);
            }
            let stats = TierStats::from_estimates(sample_count, &estimates, exact)?;
            debug!(
                "{} tier {}: mean {:.6}, sd {:.6}",
                entry.label,
                power,
                stats.mean,
                stats.std_dev()
            );
            results.push(TierResult {
                power,
                estimates,
                stats,
            });
        }
        info!(
            "state {} done ({} leaves, exact {:?})",
            entry.label,
            predicate.leaf_count(),
            exact
        );
        states.push(StateReport {
            label: entry.label.clone(),
            leaves: predicate.leaf_count(),
            exact,
            tiers: results,
        });
    }

    Ok(ExperimentReport {
        plan_hash,
        reproducible: plan.seed_policy.is_reproducible(),
        states,
    })
}
