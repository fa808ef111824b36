//! Error types for the spread engine
//!
//! Every failure the engine can report is a contract violation by the caller:
//! mis-shaped grids, wind data that cannot be produced for a requested hour,
//! or a configuration that makes no sense. None of them are retried.

use crate::grid::Shape;
use crate::simulation::PartialHistory;
use thiserror::Error;

/// Errors raised by grid construction, the spread step and the simulation loop
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SpreadError {
    /// Two grids passed into the same computation have different dimensions
    #[error("grid '{grid}' has shape {found}, expected {expected}")]
    ShapeMismatch {
        /// Name of the offending grid (e.g. `"slope"`, `"wind_u"`)
        grid: &'static str,
        /// Shape every grid of the run must share
        expected: Shape,
        /// Shape actually supplied
        found: Shape,
    },

    /// The wind accessor has no data for a requested hour offset
    #[error("no wind field available for hour offset {hour}")]
    MissingHourData {
        /// Absolute hour offset that was requested
        hour: u32,
    },

    /// Configuration rejected before any simulation work was done
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Grid data could not be assembled into a rectangular array
    #[error("invalid grid: {0}")]
    InvalidGrid(String),
}

impl SpreadError {
    /// Build a shape mismatch error for the named grid
    pub fn shape_mismatch(grid: &'static str, expected: Shape, found: Shape) -> Self {
        Self::ShapeMismatch {
            grid,
            expected,
            found,
        }
    }
}

/// A simulation run that stopped before reaching the end of its hour sequence
///
/// The snapshots produced before the failing hour are kept in `partial`. They
/// are wrapped in [`PartialHistory`] rather than returned as a normal history so
/// callers cannot mistake them for a complete result.
#[derive(Debug, Clone, Error)]
#[error("simulation aborted {}: {cause}", describe_stage(*.hour))]
pub struct SimulationAborted {
    /// Hour offset being processed when the run failed, `None` if the run was
    /// rejected before its first step
    pub hour: Option<u32>,
    /// Underlying failure
    #[source]
    pub cause: SpreadError,
    /// Snapshots completed before the failure
    pub partial: PartialHistory,
}

impl SimulationAborted {
    /// Failure detected before any hour was stepped
    pub(crate) fn before_start(cause: SpreadError) -> Self {
        Self {
            hour: None,
            cause,
            partial: PartialHistory::default(),
        }
    }
}

fn describe_stage(hour: Option<u32>) -> String {
    match hour {
        Some(hour) => format!("at hour offset {hour}"),
        None => "before the first hour".to_string(),
    }
}
