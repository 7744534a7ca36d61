//! Engine configuration

use crate::distance::IntervalScoring;
use crate::equivalence::{VanityAdjustment, DEFAULT_OVERLAP_THRESHOLD};
use crate::matcher::DEFAULT_CANDIDATE_THRESHOLD;
use fitx_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// Tunables for a [`SizeEngine`](crate::SizeEngine)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineConfig {
    pub scoring: IntervalScoring,
    pub vanity_adjustment: VanityAdjustment,
    /// Sizes above this confidence are reported as borderline candidates
    pub candidate_threshold: f64,
    /// Minimum interval overlap for a cross-brand equivalent
    pub overlap_threshold: f64,
    /// Fan products out across the rayon thread pool
    pub parallel: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            scoring: IntervalScoring::default(),
            vanity_adjustment: VanityAdjustment::default(),
            candidate_threshold: DEFAULT_CANDIDATE_THRESHOLD,
            overlap_threshold: DEFAULT_OVERLAP_THRESHOLD,
            parallel: true,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("candidate_threshold", self.candidate_threshold),
            ("overlap_threshold", self.overlap_threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::InvalidConfig(format!(
                    "{} must be within [0, 1], got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}
