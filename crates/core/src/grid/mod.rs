//! Grid inputs for the spread engine

pub mod field;
pub mod wind_field;

// Re-export main types
pub use field::{FuelField, Grid, IgnitionMask, Shape, SlopeField};
pub use wind_field::{FnWindSource, HourlyWind, WindField, WindSource};
