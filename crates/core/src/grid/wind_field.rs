//! Hourly surface wind fields and the accessor the simulation loop reads them through
//!
//! A [`WindField`] holds the u and v components for a single hour. The u
//! component is paired with the row direction and v with the column direction
//! when the spread step computes wind alignment.
//!
//! The simulation loop never assumes a storage layout for hourly data. It asks a
//! [`WindSource`] for exactly the hour offsets in its sequence, so gaps in the
//! sequence are never queried.

use super::field::{Grid, Shape};
use crate::error::SpreadError;
use nalgebra::Vector2;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeMap;

/// Wind components for one hour, one vector per cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "WindFieldRepr", into = "WindFieldRepr")]
pub struct WindField {
    u: Grid<f32>,
    v: Grid<f32>,
}

#[derive(Serialize, Deserialize)]
struct WindFieldRepr {
    u: Grid<f32>,
    v: Grid<f32>,
}

impl TryFrom<WindFieldRepr> for WindField {
    type Error = SpreadError;

    fn try_from(repr: WindFieldRepr) -> Result<Self, Self::Error> {
        Self::new(repr.u, repr.v)
    }
}

impl From<WindField> for WindFieldRepr {
    fn from(field: WindField) -> Self {
        Self {
            u: field.u,
            v: field.v,
        }
    }
}

impl WindField {
    /// Pair u and v components
    ///
    /// # Errors
    ///
    /// Returns [`SpreadError::ShapeMismatch`] if the two components differ in shape.
    pub fn new(u: Grid<f32>, v: Grid<f32>) -> Result<Self, SpreadError> {
        v.ensure_shape("wind_v", u.shape())?;
        Ok(Self { u, v })
    }

    /// Calm field (u = v = 0 everywhere)
    pub fn calm(shape: Shape) -> Self {
        Self {
            u: Grid::filled(shape, 0.0),
            v: Grid::filled(shape, 0.0),
        }
    }

    /// Spatially uniform wind
    ///
    /// `direction_deg` is the heading the wind blows toward, measured from the
    /// +row axis toward the +col axis. A heading of 0° pushes fire to higher row
    /// indices, 90° to higher column indices.
    pub fn uniform(shape: Shape, speed: f32, direction_deg: f32) -> Self {
        let heading = direction_deg.to_radians();
        Self {
            u: Grid::filled(shape, speed * heading.cos()),
            v: Grid::filled(shape, speed * heading.sin()),
        }
    }

    /// Shape shared by both components
    pub fn shape(&self) -> Shape {
        self.u.shape()
    }

    /// Row-direction component
    pub fn u(&self) -> &Grid<f32> {
        &self.u
    }

    /// Column-direction component
    pub fn v(&self) -> &Grid<f32> {
        &self.v
    }

    /// Wind vector `(u, v)` at a cell
    #[inline]
    pub fn vector_at(&self, row: usize, col: usize) -> Vector2<f32> {
        Vector2::new(self.u[(row, col)], self.v[(row, col)])
    }

    /// Fail unless both components match `expected`
    ///
    /// # Errors
    ///
    /// Returns [`SpreadError::ShapeMismatch`] naming the offending component.
    pub fn ensure_shape(&self, expected: Shape) -> Result<(), SpreadError> {
        self.u.ensure_shape("wind_u", expected)?;
        self.v.ensure_shape("wind_v", expected)
    }
}

/// Capability mapping an absolute hour offset to that hour's wind field
///
/// Returning `None` means the data for that hour does not exist; the simulation
/// loop turns it into [`SpreadError::MissingHourData`] and aborts the run.
pub trait WindSource {
    /// Wind field for `hour`, borrowed when the source owns it
    fn wind_for_hour(&self, hour: u32) -> Option<Cow<'_, WindField>>;
}

/// In-memory store of wind fields keyed by absolute hour offset
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HourlyWind {
    fields: FxHashMap<u32, WindField>,
}

impl HourlyWind {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the field for `hour`, replacing any previous one
    pub fn insert(&mut self, hour: u32, field: WindField) -> Option<WindField> {
        self.fields.insert(hour, field)
    }

    /// Store the field for `hour` (builder form)
    pub fn with_hour(mut self, hour: u32, field: WindField) -> Self {
        self.fields.insert(hour, field);
        self
    }

    /// Number of stored hours
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True if no hours are stored
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Stored hour offsets in ascending order
    pub fn hours(&self) -> Vec<u32> {
        let mut hours: Vec<u32> = self.fields.keys().copied().collect();
        hours.sort_unstable();
        hours
    }
}

impl FromIterator<(u32, WindField)> for HourlyWind {
    fn from_iter<I: IntoIterator<Item = (u32, WindField)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

impl WindSource for HourlyWind {
    fn wind_for_hour(&self, hour: u32) -> Option<Cow<'_, WindField>> {
        self.fields.get(&hour).map(Cow::Borrowed)
    }
}

impl WindSource for BTreeMap<u32, WindField> {
    fn wind_for_hour(&self, hour: u32) -> Option<Cow<'_, WindField>> {
        self.get(&hour).map(Cow::Borrowed)
    }
}

/// Adapter turning a closure into a [`WindSource`]
///
/// Useful when hourly data is produced lazily, e.g. read from disk on demand.
pub struct FnWindSource<F>(pub F);

impl<F> WindSource for FnWindSource<F>
where
    F: Fn(u32) -> Option<WindField>,
{
    fn wind_for_hour(&self, hour: u32) -> Option<Cow<'_, WindField>> {
        (self.0)(hour).map(Cow::Owned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_component_shapes_must_match() {
        let u = Grid::filled(Shape::new(2, 2), 1.0);
        let v = Grid::filled(Shape::new(2, 3), 1.0);
        assert!(matches!(
            WindField::new(u, v),
            Err(SpreadError::ShapeMismatch { grid: "wind_v", .. })
        ));
    }

    #[test]
    fn test_uniform_heading() {
        let field = WindField::uniform(Shape::new(3, 3), 10.0, 90.0);
        let w = field.vector_at(1, 1);
        assert_relative_eq!(w.x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(w.y, 10.0, epsilon = 1e-5);
    }

    #[test]
    fn test_hourly_lookup() {
        let shape = Shape::new(2, 2);
        let store = HourlyWind::new()
            .with_hour(1, WindField::calm(shape))
            .with_hour(6, WindField::uniform(shape, 3.0, 0.0));

        assert_eq!(store.hours(), vec![1, 6]);
        assert!(store.wind_for_hour(1).is_some());
        assert!(store.wind_for_hour(2).is_none());
        let six = store.wind_for_hour(6).unwrap();
        assert_relative_eq!(six.vector_at(0, 0).x, 3.0);
    }

    #[test]
    fn test_closure_source() {
        let shape = Shape::new(1, 1);
        let source = FnWindSource(|hour: u32| (hour % 2 == 0).then(|| WindField::calm(shape)));
        assert!(source.wind_for_hour(2).is_some());
        assert!(source.wind_for_hour(3).is_none());
    }
}
