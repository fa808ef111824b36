//! Fixed-size new-ignition buffer shared by parallel workers
//!
//! One flag per cell. Workers only ever set flags to `true`, so concurrent
//! writers targeting the same neighbour agree on the outcome and no ordering
//! between them matters.

use crate::grid::{IgnitionMask, Shape};
use std::sync::atomic::{AtomicBool, Ordering};

/// Set-once flags for cells ignited during one spread step
pub struct IgnitionBuffer {
    flags: Vec<AtomicBool>,
    shape: Shape,
}

impl IgnitionBuffer {
    /// Allocate a cleared buffer for a grid of `shape`
    pub fn new(shape: Shape) -> Self {
        Self {
            flags: (0..shape.len()).map(|_| AtomicBool::new(false)).collect(),
            shape,
        }
    }

    /// Mark `(row, col)` as ignited
    #[inline]
    pub fn mark(&self, row: usize, col: usize) {
        self.flags[self.shape.index(row, col)].store(true, Ordering::Relaxed);
    }

    /// Whether `(row, col)` has been marked
    #[inline]
    pub fn is_marked(&self, row: usize, col: usize) -> bool {
        self.flags[self.shape.index(row, col)].load(Ordering::Relaxed)
    }

    /// Freeze the buffer into a plain mask
    pub fn into_mask(self) -> IgnitionMask {
        let data = self.flags.into_iter().map(AtomicBool::into_inner).collect();
        // Length matches the shape by construction
        match IgnitionMask::from_vec(self.shape, data) {
            Ok(mask) => mask,
            Err(_) => unreachable!("buffer length always equals shape length"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rayon::prelude::*;

    #[test]
    fn test_concurrent_marks_are_idempotent() {
        let buffer = IgnitionBuffer::new(Shape::new(4, 4));
        (0..1000).into_par_iter().for_each(|i| {
            buffer.mark(i % 2, 3);
        });
        assert!(buffer.is_marked(0, 3));
        assert!(buffer.is_marked(1, 3));
        assert!(!buffer.is_marked(2, 3));

        let mask = buffer.into_mask();
        assert_eq!(mask.count_ignited(), 2);
    }
}
