//! One hour of stochastic fire spread
//!
//! Every burning cell attempts to ignite each of its eight neighbours. A
//! neighbour is a candidate only if it is still unburned and carries fuel. For
//! each candidate edge one uniform draw is compared against the edge's
//! [`ignition_probability`]; a neighbour ignites if ANY of its edges succeeds.
//!
//! Newly ignited cells are collected in a separate mask, so the current mask is
//! read-only for the whole step and ignitions made this hour cannot themselves
//! spread until the next hour.
//!
//! Two strategies are provided:
//! - [`spread_step`] scans sources in row-major order with a caller-supplied
//!   generator
//! - [`spread_step_parallel`] scans source rows with Rayon, giving each row its
//!   own `ChaCha8Rng` stream derived from a per-step seed and writing into an
//!   [`IgnitionBuffer`]

use super::buffer::IgnitionBuffer;
use super::probability::{ignition_probability, wind_factor};
use crate::error::SpreadError;
use crate::grid::{FuelField, IgnitionMask, Shape, SlopeField, WindField};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

/// Row/column offsets of the 8-neighbourhood, in scan order
pub const NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Static and per-hour inputs of one spread step
#[derive(Debug, Clone, Copy)]
pub struct SpreadInputs<'a> {
    /// Cumulative ignition mask before this hour
    pub current: &'a IgnitionMask,
    /// Wind for the hour being processed
    pub wind: &'a WindField,
    /// Normalised slope
    pub slope: &'a SlopeField,
    /// Flammability
    pub fuel: &'a FuelField,
    /// Base ignition probability per edge
    pub ignition_prob_base: f32,
}

impl SpreadInputs<'_> {
    /// Check that every grid shares the current mask's shape
    ///
    /// # Errors
    ///
    /// Returns [`SpreadError::ShapeMismatch`] naming the first offending grid.
    pub fn validate(&self) -> Result<Shape, SpreadError> {
        let shape = self.current.shape();
        self.wind.ensure_shape(shape)?;
        self.slope.ensure_shape("slope", shape)?;
        self.fuel.ensure_shape("fuel", shape)?;
        Ok(shape)
    }

    /// Attempt ignition from every neighbour of one burning source cell
    ///
    /// `draw` supplies one uniform sample in `[0, 1)` per candidate edge and
    /// `ignite` is called for every successful edge.
    #[inline]
    fn spread_from(
        &self,
        shape: Shape,
        row: usize,
        col: usize,
        mut draw: impl FnMut() -> f32,
        mut ignite: impl FnMut(usize, usize),
    ) {
        let wind = self.wind.vector_at(row, col);

        for (di, dj) in NEIGHBOR_OFFSETS {
            let (Some(ni), Some(nj)) = (
                row.checked_add_signed(di as isize),
                col.checked_add_signed(dj as isize),
            ) else {
                continue;
            };
            if !shape.contains(ni, nj) {
                continue;
            }
            if self.current[(ni, nj)] || !self.fuel[(ni, nj)] {
                continue;
            }

            let wf = wind_factor(wind, di, dj);
            let prob = ignition_probability(self.ignition_prob_base, wf, self.slope[(ni, nj)]);
            if draw() < prob {
                ignite(ni, nj);
            }
        }
    }
}

/// Compute the cells newly ignited during one hour
///
/// Sources are visited in row-major order and neighbours in
/// [`NEIGHBOR_OFFSETS`] order, drawing exactly one value from `rng` per
/// candidate edge. The same inputs and generator state therefore always
/// produce the same mask.
///
/// # Errors
///
/// Returns [`SpreadError::ShapeMismatch`] if the inputs disagree in shape.
pub fn spread_step<R: Rng>(
    inputs: &SpreadInputs<'_>,
    rng: &mut R,
) -> Result<IgnitionMask, SpreadError> {
    let shape = inputs.validate()?;
    let mut new_ignitions = IgnitionMask::new(shape);

    for row in 0..shape.rows {
        for col in 0..shape.cols {
            if !inputs.current[(row, col)] {
                continue;
            }
            inputs.spread_from(
                shape,
                row,
                col,
                || rng.random::<f32>(),
                |ni, nj| new_ignitions.set(ni, nj, true),
            );
        }
    }

    Ok(new_ignitions)
}

/// Parallel version of [`spread_step`]
///
/// Each source row draws from `ChaCha8Rng::seed_from_u64(step_seed)` on stream
/// `row`, so the result depends only on the inputs and `step_seed`, never on
/// thread count or scheduling. The draw sequence differs from [`spread_step`],
/// so the two strategies are not interchangeable for a given seed.
///
/// # Errors
///
/// Returns [`SpreadError::ShapeMismatch`] if the inputs disagree in shape.
pub fn spread_step_parallel(
    inputs: &SpreadInputs<'_>,
    step_seed: u64,
) -> Result<IgnitionMask, SpreadError> {
    let shape = inputs.validate()?;
    let buffer = IgnitionBuffer::new(shape);

    (0..shape.rows).into_par_iter().for_each(|row| {
        let sources = inputs.current.row(row);
        if !sources.contains(&true) {
            return;
        }

        let mut rng = ChaCha8Rng::seed_from_u64(step_seed);
        rng.set_stream(row as u64);

        for (col, &burning) in sources.iter().enumerate() {
            if burning {
                inputs.spread_from(
                    shape,
                    row,
                    col,
                    || rng.random::<f32>(),
                    |ni, nj| buffer.mark(ni, nj),
                );
            }
        }
    });

    Ok(buffer.into_mask())
}
