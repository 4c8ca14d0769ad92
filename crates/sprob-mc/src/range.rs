use serde::{Deserialize, Serialize};
use sprob_core::{Energy, ErrorInfo, SprobError};

/// Closed integer range `[lo, hi]` energies are drawn from.
///
/// Deserialization goes through [`SampleRange::new`], so an inverted range
/// can never be constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawRange")]
pub struct SampleRange {
    lo: Energy,
    hi: Energy,
}

#[derive(Deserialize)]
struct RawRange {
    lo: Energy,
    hi: Energy,
}

impl TryFrom<RawRange> for SampleRange {
    type Error = SprobError;

    fn try_from(raw: RawRange) -> Result<Self, Self::Error> {
        Self::new(raw.lo, raw.hi)
    }
}

impl SampleRange {
    /// Creates a sampling range, rejecting `lo > hi`.
    pub fn new(lo: Energy, hi: Energy) -> Result<Self, SprobError> {
        if lo > hi {
            return Err(SprobError::InvalidArgument(
                ErrorInfo::new("inverted-range", "sampling range lower bound exceeds upper bound")
                    .with_context("lo", lo)
                    .with_context("hi", hi),
            ));
        }
        Ok(Self { lo, hi })
    }

    /// Symmetric range `[-bound, bound]`. A negative bound is rejected.
    pub fn symmetric(bound: Energy) -> Result<Self, SprobError> {
        if bound < 0 {
            return Err(SprobError::InvalidArgument(
                ErrorInfo::new("negative-bound", "symmetric range bound must not be negative")
                    .with_context("bound", bound),
            ));
        }
        Self::new(-bound, bound)
    }

    /// Inclusive lower bound.
    pub fn lo(&self) -> Energy {
        self.lo
    }

    /// Inclusive upper bound.
    pub fn hi(&self) -> Energy {
        self.hi
    }

    /// Number of integers in the range.
    pub fn width(&self) -> u64 {
        (i64::from(self.hi) - i64::from(self.lo) + 1) as u64
    }

    /// Iterates every energy in the range in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = Energy> {
        self.lo..=self.hi
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inverted_json_range_is_rejected() {
        let err = serde_json::from_str::<SampleRange>(r#"{"lo":10,"hi":-10}"#).unwrap_err();
        assert!(err.to_string().contains("inverted-range"), "{err}");
    }

    #[test]
    fn json_range_round_trips_through_new() {
        let range: SampleRange = serde_json::from_str(r#"{"lo":-3,"hi":4}"#).unwrap();
        assert_eq!(range, SampleRange::new(-3, 4).unwrap());
        assert_eq!(range.width(), 8);
    }

    #[test]
    fn symmetric_rejects_negative_bound() {
        let err = SampleRange::symmetric(-5).unwrap_err();
        assert_eq!(err.info().code, "negative-bound");
        let zero = SampleRange::symmetric(0).unwrap();
        assert_eq!((zero.lo(), zero.hi()), (0, 0));
        let widest = SampleRange::symmetric(Energy::MAX).unwrap();
        assert_eq!(widest.lo(), -Energy::MAX);
    }
}
