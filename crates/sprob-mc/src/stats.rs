use serde::{Deserialize, Serialize};
use sprob_core::{ErrorInfo, SprobError};

/// Summary of repeated estimations at one sample count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierStats {
    /// Draws per estimation.
    pub sample_count: u64,
    /// Number of estimations summarised.
    pub trials: usize,
    /// Mean estimate.
    pub mean: f64,
    /// Population variance of the estimates.
    pub variance: f64,
    /// Smallest estimate.
    pub min: f64,
    /// Largest estimate.
    pub max: f64,
    /// Exact probability the estimates are compared against, when known.
    pub reference: Option<f64>,
    /// Mean of `|estimate - reference|`, when a reference is known.
    pub mean_abs_error: Option<f64>,
}

impl TierStats {
    /// Summarises `estimates` obtained with `sample_count` draws each.
    pub fn from_estimates(
        sample_count: u64,
        estimates: &[f64],
        reference: Option<f64>,
    ) -> Result<Self, SprobError> {
        if estimates.is_empty() {
            return Err(SprobError::InvalidArgument(
                ErrorInfo::new("no-estimates", "tier statistics need at least one estimate")
                    .with_context("sample_count", sample_count),
            ));
        }
        let n = estimates.len() as f64;
        let mean = estimates.iter().sum::<f64>() / n;
        let variance = estimates
            .iter()
            .map(|&e| (e - mean) * (e - mean))
            .sum::<f64>()
            / n;
        let min = estimates.iter().copied().fold(f64::INFINITY, f64::min);
        let max = estimates.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let mean_abs_error =
            reference.map(|exact| estimates.iter().map(|&e| (e - exact).abs()).sum::<f64>() / n);
        Ok(Self {
            sample_count,
            trials: estimates.len(),
            mean,
            variance,
            min,
            max,
            reference,
            mean_abs_error,
        })
    }

    /// Standard deviation of the estimates.
    pub fn std_dev(&self) -> f64 {
        self.variance.sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summarises_known_values() {
        let stats = TierStats::from_estimates(10, &[0.0, 0.5, 1.0], Some(0.5)).unwrap();
        assert_eq!(stats.trials, 3);
        assert!((stats.mean - 0.5).abs() < 1e-12);
        assert!((stats.variance - 1.0 / 6.0).abs() < 1e-12);
        assert_eq!(stats.min, 0.0);
        assert_eq!(stats.max, 1.0);
        assert!((stats.mean_abs_error.unwrap() - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn empty_tier_is_rejected() {
        assert!(TierStats::from_estimates(10, &[], None).is_err());
    }
}
