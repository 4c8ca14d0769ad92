use std::time::{SystemTime, UNIX_EPOCH};

use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sprob_core::{derive_substream_seed, ErrorInfo, SprobError};

/// Where per-estimation seeds come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum SeedSource {
    /// Reproducible seeds derived from a master seed and the call index.
    Fixed {
        /// Master seed shared by every derived seed.
        #[serde(default = "default_master_seed")]
        master: u64,
    },
    /// Fresh seeds from the operating system entropy source.
    Entropy,
    /// Nanosecond wall clock mixed with the call index.
    Clock,
}

fn default_master_seed() -> u64 {
    0x05EE_D5EE_DD15_5EED_u64
}

impl Default for SeedSource {
    fn default() -> Self {
        SeedSource::Fixed {
            master: default_master_seed(),
        }
    }
}

impl SeedSource {
    /// Whether two sequences from this source emit identical seeds.
    pub fn is_reproducible(&self) -> bool {
        matches!(self, SeedSource::Fixed { .. })
    }

    /// Starts a new seed sequence.
    pub fn sequence(self) -> SeedSequence {
        SeedSequence::new(self)
    }
}

/// Stateful generator of seeds for consecutive estimations.
///
/// Every call yields a distinct seed, even in tight loops where a coarse
/// clock would repeat.
#[derive(Debug, Clone)]
pub struct SeedSequence {
    source: SeedSource,
    issued: u64,
}

impl SeedSequence {
    /// Creates a sequence drawing from `source`.
    pub fn new(source: SeedSource) -> Self {
        Self { source, issued: 0 }
    }

    /// Number of seeds handed out so far.
    pub fn issued(&self) -> u64 {
        self.issued
    }

    /// Returns the next seed.
    pub fn next_seed(&mut self) -> Result<u64, SprobError> {
        let index = self.issued;
        let seed = match self.source {
            SeedSource::Fixed { master } => derive_substream_seed(master, index),
            SeedSource::Entropy => {
                let mut bytes = [0u8; 8];
                OsRng.try_fill_bytes(&mut bytes).map_err(|err| {
                    SprobError::Rng(
                        ErrorInfo::new("entropy-unavailable", err.to_string())
                            .with_hint("use a fixed seed source"),
                    )
                })?;
                u64::from_le_bytes(bytes)
            }
            SeedSource::Clock => {
                let elapsed = SystemTime::now().duration_since(UNIX_EPOCH).map_err(|err| {
                    SprobError::Rng(ErrorInfo::new("clock-before-epoch", err.to_string()))
                })?;
                derive_substream_seed(elapsed.as_nanos() as u64, index)
            }
        };
        self.issued += 1;
        Ok(seed)
    }
}
