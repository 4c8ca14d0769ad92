//! Tiered estimation experiments: run every state of a plan at
//! geometrically growing sample counts and persist the estimates.

mod hash;
mod output;
mod plan;
mod runner;

pub use hash::{stable_hash_string, to_canonical_json_bytes};
pub use output::{
    tier_file_name, write_report, ExperimentManifest, MANIFEST_FILE, SUMMARY_FILE,
};
pub use plan::{tiers, ExperimentPlan, StateEntry};
pub use runner::{run_experiment, ExperimentReport, StateReport, TierResult};
