//! Dense 2D grid storage
//!
//! All rasters consumed by the spread engine (ignition mask, wind components,
//! slope, fuel) are stored as a flat `Vec<T>` in row-major order and addressed
//! by `(row, col)`. Every grid used in one simulation run must share the same
//! [`Shape`].

use crate::error::SpreadError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Grid dimensions in cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Shape {
    /// Number of rows (H)
    pub rows: usize,
    /// Number of columns (W)
    pub cols: usize,
}

impl Shape {
    /// Create a new shape
    pub const fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    /// Total number of cells
    pub const fn len(&self) -> usize {
        self.rows * self.cols
    }

    /// True if the shape has no cells
    pub const fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    /// Whether `(row, col)` lies inside the grid
    #[inline]
    pub const fn contains(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols
    }

    /// Row-major flat index of `(row, col)`
    #[inline]
    pub const fn index(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

/// Dense grid of values in row-major order (`row * cols + col`)
///
/// Serializes as a nested array of rows so scenario files stay readable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "Vec<Vec<T>>",
    into = "Vec<Vec<T>>",
    bound(serialize = "T: Clone + Serialize", deserialize = "T: Deserialize<'de>")
)]
pub struct Grid<T> {
    data: Vec<T>,
    shape: Shape,
}

impl<T: Clone> Grid<T> {
    /// Create a grid with every cell set to `value`
    pub fn filled(shape: Shape, value: T) -> Self {
        Self {
            data: vec![value; shape.len()],
            shape,
        }
    }
}

impl<T: Clone + Default> Grid<T> {
    /// Create a grid with every cell set to `T::default()`
    pub fn new(shape: Shape) -> Self {
        Self::filled(shape, T::default())
    }
}

impl<T> Grid<T> {
    /// Wrap row-major data in a grid
    ///
    /// # Errors
    ///
    /// Returns [`SpreadError::InvalidGrid`] if `data.len()` differs from
    /// `shape.rows * shape.cols`.
    pub fn from_vec(shape: Shape, data: Vec<T>) -> Result<Self, SpreadError> {
        if data.len() != shape.len() {
            return Err(SpreadError::InvalidGrid(format!(
                "{} values supplied for a {} grid ({} cells)",
                data.len(),
                shape,
                shape.len()
            )));
        }
        Ok(Self { data, shape })
    }

    /// Build a grid from nested rows
    ///
    /// # Errors
    ///
    /// Returns [`SpreadError::InvalidGrid`] if the rows have different lengths.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self, SpreadError> {
        let cols = rows.first().map_or(0, Vec::len);
        let shape = Shape::new(rows.len(), cols);
        let mut data = Vec::with_capacity(shape.len());
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != cols {
                return Err(SpreadError::InvalidGrid(format!(
                    "row {} has {} columns, expected {}",
                    i,
                    row.len(),
                    cols
                )));
            }
            data.extend(row);
        }
        Ok(Self { data, shape })
    }

    /// Create a grid by evaluating `f(row, col)` for every cell
    pub fn from_fn(shape: Shape, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let mut data = Vec::with_capacity(shape.len());
        for row in 0..shape.rows {
            for col in 0..shape.cols {
                data.push(f(row, col));
            }
        }
        Self { data, shape }
    }

    /// Grid dimensions
    #[inline]
    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Number of rows
    #[inline]
    pub fn rows(&self) -> usize {
        self.shape.rows
    }

    /// Number of columns
    #[inline]
    pub fn cols(&self) -> usize {
        self.shape.cols
    }

    /// Get reference to the row-major cell data
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Get mutable reference to the row-major cell data
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Get the value at `(row, col)`, or `None` outside the grid
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        if self.shape.contains(row, col) {
            self.data.get(self.shape.index(row, col))
        } else {
            None
        }
    }

    /// Set value at `(row, col)`
    ///
    /// # Panics
    ///
    /// Panics if coordinates are out of bounds
    pub fn set(&mut self, row: usize, col: usize, value: T) {
        assert!(self.shape.contains(row, col), "Coordinates out of bounds");
        let idx = self.shape.index(row, col);
        self.data[idx] = value;
    }

    /// Iterate over one row's cells
    pub fn row(&self, row: usize) -> &[T] {
        let start = row * self.shape.cols;
        &self.data[start..start + self.shape.cols]
    }

    /// Fail with [`SpreadError::ShapeMismatch`] unless this grid has `expected` shape
    ///
    /// # Errors
    ///
    /// Returns the mismatch error labelled with `name`.
    pub fn ensure_shape(&self, name: &'static str, expected: Shape) -> Result<(), SpreadError> {
        if self.shape == expected {
            Ok(())
        } else {
            Err(SpreadError::shape_mismatch(name, expected, self.shape))
        }
    }
}

impl<T> std::ops::Index<(usize, usize)> for Grid<T> {
    type Output = T;

    fn index(&self, (row, col): (usize, usize)) -> &T {
        assert!(self.shape.contains(row, col), "Coordinates out of bounds");
        &self.data[self.shape.index(row, col)]
    }
}

impl<T> TryFrom<Vec<Vec<T>>> for Grid<T> {
    type Error = SpreadError;

    fn try_from(rows: Vec<Vec<T>>) -> Result<Self, Self::Error> {
        Self::from_rows(rows)
    }
}

impl<T> From<Grid<T>> for Vec<Vec<T>> {
    fn from(grid: Grid<T>) -> Self {
        let cols = grid.shape.cols;
        if cols == 0 {
            return (0..grid.shape.rows).map(|_| Vec::new()).collect();
        }
        let mut rows = Vec::with_capacity(grid.shape.rows);
        let mut iter = grid.data.into_iter();
        for _ in 0..grid.shape.rows {
            rows.push(iter.by_ref().take(cols).collect());
        }
        rows
    }
}

impl Grid<bool> {
    /// Number of cells set to `true`
    pub fn count_ignited(&self) -> usize {
        self.data.iter().filter(|&&cell| cell).count()
    }

    /// Cell-wise logical OR of `other` into `self`
    ///
    /// # Errors
    ///
    /// Returns [`SpreadError::ShapeMismatch`] if the shapes differ.
    pub fn union_with(&mut self, other: &Grid<bool>) -> Result<(), SpreadError> {
        other.ensure_shape("new_ignitions", self.shape)?;
        for (cell, &incoming) in self.data.iter_mut().zip(other.data.iter()) {
            *cell |= incoming;
        }
        Ok(())
    }

    /// True if every cell set in `other` is also set in `self`
    pub fn is_superset_of(&self, other: &Grid<bool>) -> bool {
        self.shape == other.shape
            && self
                .data
                .iter()
                .zip(other.data.iter())
                .all(|(&mine, &theirs)| mine || !theirs)
    }
}

/// Cumulative set of cells that have ignited at or before the current hour
pub type IgnitionMask = Grid<bool>;
/// Terrain slope normalised to [0, 1]
pub type SlopeField = Grid<f32>;
/// Flammability flag per cell
pub type FuelField = Grid<bool>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_creation() {
        let grid: Grid<f32> = Grid::new(Shape::new(4, 5));
        assert_eq!(grid.rows(), 4);
        assert_eq!(grid.cols(), 5);
        assert_eq!(grid.as_slice().len(), 20);
        assert!(grid.as_slice().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_grid_get_set() {
        let mut grid = Grid::filled(Shape::new(10, 10), 0.0_f32);
        grid.set(4, 3, 123.45);
        assert_eq!(grid.get(4, 3), Some(&123.45));
        assert_eq!(grid[(4, 3)], 123.45);

        // Verify row-major indexing
        assert_eq!(grid.as_slice()[4 * 10 + 3], 123.45);
        assert_eq!(grid.get(10, 0), None);
    }

    #[test]
    #[should_panic(expected = "Coordinates out of bounds")]
    fn test_grid_bounds_check() {
        let grid = Grid::filled(Shape::new(3, 3), false);
        let _ = grid[(0, 3)];
    }

    #[test]
    fn test_from_vec_rejects_wrong_length() {
        let err = Grid::from_vec(Shape::new(2, 2), vec![1, 2, 3]).unwrap_err();
        assert!(matches!(err, SpreadError::InvalidGrid(_)));
    }

    #[test]
    fn test_from_rows_rejects_ragged() {
        let err = Grid::from_rows(vec![vec![1, 2], vec![3]]).unwrap_err();
        assert!(matches!(err, SpreadError::InvalidGrid(_)));
    }

    #[test]
    fn test_rows_conversion() {
        let rows = vec![vec![1, 2, 3], vec![4, 5, 6]];
        let grid = Grid::from_rows(rows.clone()).unwrap();
        assert_eq!(grid.shape(), Shape::new(2, 3));
        assert_eq!(grid[(1, 0)], 4);
        assert_eq!(grid.row(1), &[4, 5, 6]);
        let back: Vec<Vec<i32>> = grid.into();
        assert_eq!(back, rows);
    }

    #[test]
    fn test_union_and_superset() {
        let mut a = Grid::from_rows(vec![vec![true, false], vec![false, false]]).unwrap();
        let b = Grid::from_rows(vec![vec![false, true], vec![false, false]]).unwrap();
        let before = a.clone();
        a.union_with(&b).unwrap();
        assert_eq!(a.count_ignited(), 2);
        assert!(a.is_superset_of(&before));
        assert!(a.is_superset_of(&b));
        assert!(!before.is_superset_of(&a));
    }

    #[test]
    fn test_union_shape_mismatch() {
        let mut a = Grid::filled(Shape::new(2, 2), false);
        let b = Grid::filled(Shape::new(2, 3), true);
        assert!(matches!(
            a.union_with(&b),
            Err(SpreadError::ShapeMismatch { .. })
        ));
    }
}
