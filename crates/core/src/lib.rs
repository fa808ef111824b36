//! Wildfire Spread Core Library
//!
//! A stochastic cellular-automaton model of hour-by-hour wildfire spread over a
//! fixed raster grid. Each hour every burning cell tries to ignite its eight
//! neighbours with a probability driven by local wind alignment, neighbour slope
//! and fuel availability. Burned cells never recover.
//!
//! ## Inputs
//!
//! All rasters of one run share the same shape and are already aligned:
//! - initial ignition mask
//! - hourly wind u/v fields, supplied through a [`WindSource`]
//! - static slope field normalised to [0, 1]
//! - static fuel (flammable / not) field
//!
//! ## Output
//!
//! A [`SpreadHistory`] holding one cumulative ignition mask per requested hour.

// Input rasters
pub mod grid;

// Spread step and ignition probability model
pub mod solver;

// Hour-sequence driver, configuration and results
pub mod simulation;

pub mod error;

// Re-export core types
pub use error::{SimulationAborted, SpreadError};
pub use grid::{
    FnWindSource, FuelField, Grid, HourlyWind, IgnitionMask, Shape, SlopeField, WindField,
    WindSource,
};
pub use simulation::{
    HourSnapshot, PartialHistory, Scenario, SpreadConfig, SpreadHistory, SpreadSimulation,
};
pub use solver::{spread_step, spread_step_parallel, SpreadInputs};
