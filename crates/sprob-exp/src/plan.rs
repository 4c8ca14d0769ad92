use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use sprob_core::{Energy, ErrorInfo, PredicateDef, SprobError};
use sprob_mc::SeedSource;

/// YAML-configurable description of a tiered estimation experiment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperimentPlan {
    /// Energies are sampled from `[-bound, bound]`.
    #[serde(default = "default_bound")]
    pub bound: Energy,
    /// Ratio between consecutive sample-count tiers.
    #[serde(default = "default_base")]
    pub base: u64,
    /// Largest tier exponent; tiers run `base^0 ..= base^max_power`.
    #[serde(default = "default_max_power")]
    pub max_power: u32,
    /// Estimations per state and tier.
    #[serde(default = "default_trials")]
    pub trials: usize,
    /// Source of per-estimation seeds.
    #[serde(default)]
    pub seed_policy: SeedSource,
    /// States to estimate, in output order.
    pub states: Vec<StateEntry>,
}

/// Labelled state definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateEntry {
    /// Label used in output file names.
    pub label: String,
    /// Definition of the state.
    pub predicate: PredicateDef,
}

fn default_bound() -> Energy {
    1000
}

fn default_base() -> u64 {
    10
}

fn default_max_power() -> u32 {
    6
}

fn default_trials() -> usize {
    1000
}

impl ExperimentPlan {
    /// The classic two-state experiment: an ordered interval covering
    /// `[0, bound / 2]` and a random union of `bound / 2` points starting at
    /// `-bound` with steps of 1 to 4.
    pub fn reference() -> Self {
        let bound = default_bound();
        Self {
            bound,
            base: default_base(),
            max_power: default_max_power(),
            trials: default_trials(),
            seed_policy: SeedSource::default(),
            states: vec![
                StateEntry {
                    label: "ordered".into(),
                    predicate: PredicateDef::Interval {
                        lo: 0,
                        hi: bound / 2,
                    },
                },
                StateEntry {
                    label: "random".into(),
                    predicate: PredicateDef::Scattered {
                        start: -bound,
                        count: (bound / 2) as usize,
                        min_step: 1,
                        max_step: 4,
                        seed: 0,
                    },
                },
            ],
        }
    }

    /// Parses a plan from YAML text and validates it.
    pub fn from_yaml_str(text: &str) -> Result<Self, SprobError> {
        let plan: Self = serde_yaml::from_str(text)
            .map_err(|err| SprobError::Serde(ErrorInfo::new("plan-parse", err.to_string())))?;
        plan.validate()?;
        Ok(plan)
    }

    /// Loads and validates a plan file.
    pub fn load(path: &Path) -> Result<Self, SprobError> {
        let text = fs::read_to_string(path).map_err(|err| {
            SprobError::Io(
                ErrorInfo::new("plan-read", err.to_string())
                    .with_context("path", path.display()),
            )
        })?;
        Self::from_yaml_str(&text)
    }

    /// Sample counts of every tier, in increasing order.
    pub fn tiers(&self) -> Result<Vec<u64>, SprobError> {
        tiers(self.base, self.max_power)
    }

    /// Checks the plan without building any predicate.
    pub fn validate(&self) -> Result<(), SprobError> {
        if self.bound <= 0 {
            return Err(plan_error("bound", "bound must be positive").with_value(self.bound));
        }
        if self.base < 2 {
            return Err(plan_error("base", "tier base must be at least 2").with_value(self.base));
        }
        if self.trials == 0 {
            return Err(plan_error("trials", "each tier needs at least one trial").into());
        }
        if self.states.is_empty() {
            return Err(plan_error("states", "a plan needs at least one state").into());
        }
        let mut labels = BTreeSet::new();
        for entry in &self.states {
            let usable = !entry.label.is_empty()
                && entry
                    .label
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
            if !usable {
                return Err(plan_error("label", "labels may only use [A-Za-z0-9_-]")
                    .with_value(&entry.label));
            }
            if !labels.insert(entry.label.as_str()) {
                return Err(plan_error("label", "duplicate state label").with_value(&entry.label));
            }
        }
        self.tiers().map(|_| ())
    }
}

/// Geometric sample counts `base^0 ..= base^max_power`.
pub fn tiers(base: u64, max_power: u32) -> Result<Vec<u64>, SprobError> {
    (0..=max_power)
        .map(|power| {
            base.checked_pow(power).ok_or_else(|| {
                SprobError::InvalidArgument(
                    ErrorInfo::new("tier-overflow", "sample count does not fit in 64 bits")
                        .with_context("base", base)
                        .with_context("power", power),
                )
            })
        })
        .collect()
}

struct PlanError {
    field: &'static str,
    message: &'static str,
}

fn plan_error(field: &'static str, message: &'static str) -> PlanError {
    PlanError { field, message }
}

impl PlanError {
    fn with_value(self, value: impl ToString) -> SprobError {
        SprobError::InvalidArgument(
            ErrorInfo::new("plan-invalid", self.message)
                .with_context("field", self.field)
                .with_context("value", value.to_string()),
        )
    }
}

impl From<PlanError> for SprobError {
    fn from(err: PlanError) -> Self {
        SprobError::InvalidArgument(
            ErrorInfo::new("plan-invalid", err.message).with_context("field", err.field),
        )
    }
}
