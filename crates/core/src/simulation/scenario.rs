//! Self-contained scenario bundle
//!
//! Groups the already-aligned input grids of one run with its configuration
//! so a scenario can be stored and reloaded as a single document. The byte
//! format is up to the caller; the bundle only needs serde.

use super::{SpreadConfig, SpreadHistory, SpreadSimulation};
use crate::error::{SimulationAborted, SpreadError};
use crate::grid::{FuelField, HourlyWind, IgnitionMask, Shape, SlopeField, WindSource};
use serde::{Deserialize, Serialize};

/// Input grids and configuration of one spread run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    /// Rasterized initial fire footprint
    pub initial_mask: IgnitionMask,
    /// Normalised terrain slope
    pub slope: SlopeField,
    /// Flammability flags
    pub fuel: FuelField,
    /// Wind fields keyed by absolute hour offset
    pub wind: HourlyWind,
    /// Run configuration
    #[serde(default)]
    pub config: SpreadConfig,
}

impl Scenario {
    /// Shape shared by every grid of the scenario
    pub fn shape(&self) -> Shape {
        self.initial_mask.shape()
    }

    /// Check that the static grids and every requested hour are present and aligned
    ///
    /// # Errors
    ///
    /// Returns the first configuration, shape or missing-hour problem found.
    pub fn validate(&self) -> Result<(), SpreadError> {
        self.config.validate()?;
        let shape = self.shape();
        self.slope.ensure_shape("slope", shape)?;
        self.fuel.ensure_shape("fuel", shape)?;
        for &hour in &self.config.hours {
            let wind = self
                .wind
                .wind_for_hour(hour)
                .ok_or(SpreadError::MissingHourData { hour })?;
            wind.ensure_shape(shape)?;
        }
        Ok(())
    }

    /// Run the scenario with its own configuration
    ///
    /// # Errors
    ///
    /// Returns [`SimulationAborted`] on an invalid configuration or any failure
    /// reported by [`SpreadSimulation::run`].
    pub fn run(&self) -> Result<SpreadHistory, SimulationAborted> {
        let sim = SpreadSimulation::new(self.config.clone())
            .map_err(SimulationAborted::before_start)?;
        sim.run(&self.initial_mask, &self.wind, &self.slope, &self.fuel)
    }
}
