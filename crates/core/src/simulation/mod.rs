//! Hour-by-hour spread simulation
//!
//! [`SpreadSimulation`] drives the spread step across a caller-supplied,
//! possibly sparse sequence of hour offsets:
//!
//! 1. Fetch the wind field for the hour from a [`WindSource`]
//! 2. Run one spread step against the current cumulative mask
//! 3. OR the new ignitions into the cumulative mask
//! 4. Record a deep copy of the cumulative mask for that hour
//!
//! Hours are processed strictly in sequence order because every step reads the
//! mask produced by all earlier ones. Gaps in the sequence are not subdivided:
//! `[3, 6]` is two steps, not four.

mod config;
mod history;
mod scenario;

pub use config::{SpreadConfig, DEFAULT_HOURS};
pub use history::{HourSnapshot, PartialHistory, SpreadHistory};
pub use scenario::Scenario;

use crate::error::{SimulationAborted, SpreadError};
use crate::grid::{FuelField, IgnitionMask, SlopeField, WindSource};
use crate::solver::{spread_step, spread_step_parallel, SpreadInputs};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};

/// Validated spread run configuration, ready to execute
#[derive(Debug, Clone)]
pub struct SpreadSimulation {
    config: SpreadConfig,
}

impl SpreadSimulation {
    /// Create a simulation from a configuration
    ///
    /// # Errors
    ///
    /// Returns [`SpreadError::InvalidConfiguration`] if the configuration fails
    /// [`SpreadConfig::validate`].
    pub fn new(config: SpreadConfig) -> Result<Self, SpreadError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Configuration this simulation runs with
    pub fn config(&self) -> &SpreadConfig {
        &self.config
    }

    /// Run the configured hour sequence
    ///
    /// Only the hour offsets listed in the configuration are requested from
    /// `winds`, each exactly once.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationAborted`] if the static grids disagree in shape
    /// (with no `hour`), or if the wind field for some hour is missing or
    /// mis-shaped. Snapshots for hours completed before the failure are carried
    /// in its `partial` field.
    pub fn run<W: WindSource + ?Sized>(
        &self,
        initial: &IgnitionMask,
        winds: &W,
        slope: &SlopeField,
        fuel: &FuelField,
    ) -> Result<SpreadHistory, SimulationAborted> {
        let hours = &self.config.hours;
        let shape = initial.shape();

        let abort = |hour: u32, cause: SpreadError, completed: SpreadHistory| {
            warn!("Spread simulation aborted at hour {}: {}", hour, cause);
            SimulationAborted {
                hour: Some(hour),
                cause,
                partial: PartialHistory::new(completed),
            }
        };

        if let Err(cause) = slope
            .ensure_shape("slope", shape)
            .and_then(|()| fuel.ensure_shape("fuel", shape))
        {
            warn!("Spread simulation rejected before the first hour: {}", cause);
            return Err(SimulationAborted::before_start(cause));
        }
        warn_on_unnormalised_slope(slope);

        let seed = self.config.seed.unwrap_or_else(rand::random);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        info!(
            "Starting spread simulation: {} grid, hours={:?}, seed={}, base={}, parallel={}",
            shape, hours, seed, self.config.ignition_prob_base, self.config.parallel
        );

        let mut cumulative = initial.clone();
        let mut history = SpreadHistory::with_capacity(hours.len());

        for &hour in hours {
            let Some(wind) = winds.wind_for_hour(hour) else {
                return Err(abort(hour, SpreadError::MissingHourData { hour }, history));
            };

            let inputs = SpreadInputs {
                current: &cumulative,
                wind: &wind,
                slope,
                fuel,
                ignition_prob_base: self.config.ignition_prob_base,
            };

            let step = if self.config.parallel {
                let step_seed: u64 = rng.random();
                spread_step_parallel(&inputs, step_seed)
            } else {
                spread_step(&inputs, &mut rng)
            };

            let new_ignitions = match step {
                Ok(mask) => mask,
                Err(cause) => return Err(abort(hour, cause, history)),
            };

            let new_count = new_ignitions.count_ignited();
            if let Err(cause) = cumulative.union_with(&new_ignitions) {
                return Err(abort(hour, cause, history));
            }

            debug!(
                "Hour {}: {} new ignitions, {} cells burning",
                hour,
                new_count,
                cumulative.count_ignited()
            );

            history.push(HourSnapshot {
                hour,
                mask: cumulative.clone(),
                new_ignitions: new_count,
            });
        }

        info!(
            "Spread simulation finished: {} hours, {} of {} cells ignited",
            history.len(),
            cumulative.count_ignited(),
            shape.len()
        );

        Ok(history)
    }
}

fn warn_on_unnormalised_slope(slope: &SlopeField) {
    let outside = slope
        .as_slice()
        .iter()
        .filter(|s| !(0.0..=1.0).contains(*s))
        .count();
    if outside > 0 {
        warn!(
            "{} slope values lie outside [0, 1]; ignition probabilities will be scaled accordingly",
            outside
        );
    }
}
