//! Cellular-automaton spread solver
//!
//! This module holds the per-hour spread step and the ignition probability
//! model it evaluates on every candidate edge.
//!
//! # Example
//!
//! ```rust
//! use fire_spread_core::grid::{Grid, Shape, WindField};
//! use fire_spread_core::solver::{spread_step, SpreadInputs};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let shape = Shape::new(3, 3);
//! let mut current = Grid::filled(shape, false);
//! current.set(1, 1, true);
//! let wind = WindField::calm(shape);
//! let slope = Grid::filled(shape, 0.0);
//! let fuel = Grid::filled(shape, true);
//!
//! let inputs = SpreadInputs {
//!     current: &current,
//!     wind: &wind,
//!     slope: &slope,
//!     fuel: &fuel,
//!     ignition_prob_base: 1.0,
//! };
//! let new = spread_step(&inputs, &mut ChaCha8Rng::seed_from_u64(0)).unwrap();
//! assert_eq!(new.count_ignited(), 8);
//! ```

mod buffer;
pub mod probability;
mod spread;

// Re-exports
pub use buffer::IgnitionBuffer;
pub use probability::{
    ignition_probability, wind_factor, CLAMP_PROBABILITY, DEFAULT_IGNITION_PROB_BASE,
    WIND_EPSILON,
};
pub use spread::{spread_step, spread_step_parallel, SpreadInputs, NEIGHBOR_OFFSETS};
