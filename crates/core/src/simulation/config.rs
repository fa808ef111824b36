//! Run configuration
//!
//! Everything a caller can tune about a spread run. Validation happens once,
//! when a [`SpreadSimulation`](super::SpreadSimulation) is built, so a bad value
//! never surfaces half-way through a run.

use crate::error::SpreadError;
use crate::solver::DEFAULT_IGNITION_PROB_BASE;
use serde::{Deserialize, Serialize};

/// Hour offsets simulated when none are given
pub const DEFAULT_HOURS: [u32; 5] = [1, 2, 3, 6, 12];

/// Configuration of one spread run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpreadConfig {
    /// Base ignition probability per edge per step, in (0, 1]
    pub ignition_prob_base: f32,
    /// Strictly increasing, positive hour offsets; one spread step per entry
    pub hours: Vec<u32>,
    /// Seed for reproducible runs; a fresh seed is drawn and logged when absent
    pub seed: Option<u64>,
    /// Scan source rows in parallel
    pub parallel: bool,
}

impl Default for SpreadConfig {
    fn default() -> Self {
        Self {
            ignition_prob_base: DEFAULT_IGNITION_PROB_BASE,
            hours: DEFAULT_HOURS.to_vec(),
            seed: None,
            parallel: false,
        }
    }
}

impl SpreadConfig {
    /// Set the base ignition probability
    pub fn with_ignition_prob_base(mut self, base: f32) -> Self {
        self.ignition_prob_base = base;
        self
    }

    /// Set the hour offset sequence
    pub fn with_hours(mut self, hours: Vec<u32>) -> Self {
        self.hours = hours;
        self
    }

    /// Fix the random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Enable or disable the parallel neighbour scan
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Check every field
    ///
    /// # Errors
    ///
    /// Returns [`SpreadError::InvalidConfiguration`] if the base probability is
    /// not a finite value in (0, 1], or if the hour sequence contains a zero or
    /// is not strictly increasing.
    pub fn validate(&self) -> Result<(), SpreadError> {
        let base = self.ignition_prob_base;
        if !base.is_finite() || base <= 0.0 || base > 1.0 {
            return Err(SpreadError::InvalidConfiguration(format!(
                "ignition_prob_base must lie in (0, 1], got {base}"
            )));
        }

        if self.hours.first() == Some(&0) {
            return Err(SpreadError::InvalidConfiguration(
                "hour offsets must be positive".to_string(),
            ));
        }

        if let Some(pair) = self.hours.windows(2).find(|pair| pair[0] >= pair[1]) {
            return Err(SpreadError::InvalidConfiguration(format!(
                "hour offsets must be strictly increasing, found {} followed by {}",
                pair[0], pair[1]
            )));
        }

        Ok(())
    }
}
