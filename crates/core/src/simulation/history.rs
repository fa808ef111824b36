//! Per-hour snapshots produced by a run

use crate::grid::IgnitionMask;
use serde::{Deserialize, Serialize};

/// Square metres per hectare
const SQ_M_PER_HECTARE: f32 = 10_000.0;

/// Cumulative ignition mask recorded after one hour's spread step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourSnapshot {
    /// Absolute hour offset the snapshot belongs to
    pub hour: u32,
    /// Deep copy of the cumulative mask after this hour
    pub mask: IgnitionMask,
    /// Number of cells that ignited during this hour
    pub new_ignitions: usize,
}

impl HourSnapshot {
    /// Cells ignited at or before this hour
    pub fn ignited_cells(&self) -> usize {
        self.mask.count_ignited()
    }

    /// Burned area in hectares for square cells of `cell_size_m` metres
    pub fn burned_area_hectares(&self, cell_size_m: f32) -> f32 {
        self.ignited_cells() as f32 * cell_size_m * cell_size_m / SQ_M_PER_HECTARE
    }
}

/// Snapshots of a completed run, one per requested hour, in sequence order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpreadHistory {
    snapshots: Vec<HourSnapshot>,
}

impl SpreadHistory {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            snapshots: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn push(&mut self, snapshot: HourSnapshot) {
        self.snapshots.push(snapshot);
    }

    /// Snapshot for `hour`, if it was part of the sequence
    pub fn get(&self, hour: u32) -> Option<&HourSnapshot> {
        // Hours are strictly increasing
        self.snapshots
            .binary_search_by_key(&hour, |s| s.hour)
            .ok()
            .map(|i| &self.snapshots[i])
    }

    /// Hour offsets in sequence order
    pub fn hours(&self) -> Vec<u32> {
        self.snapshots.iter().map(|s| s.hour).collect()
    }

    /// Iterate snapshots in sequence order
    pub fn iter(&self) -> std::slice::Iter<'_, HourSnapshot> {
        self.snapshots.iter()
    }

    /// Number of snapshots
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// True if no hours were simulated
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Cumulative mask after the last hour
    pub fn final_mask(&self) -> Option<&IgnitionMask> {
        self.snapshots.last().map(|s| &s.mask)
    }

    /// Unwrap into the underlying snapshots
    pub fn into_snapshots(self) -> Vec<HourSnapshot> {
        self.snapshots
    }
}

impl<'a> IntoIterator for &'a SpreadHistory {
    type Item = &'a HourSnapshot;
    type IntoIter = std::slice::Iter<'a, HourSnapshot>;

    fn into_iter(self) -> Self::IntoIter {
        self.snapshots.iter()
    }
}

/// Snapshots of a run that aborted before finishing its hour sequence
///
/// Deliberately a separate type from [`SpreadHistory`]: the hours after the
/// failure point are missing, so this must never be treated as a full result.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartialHistory(SpreadHistory);

impl PartialHistory {
    pub(crate) fn new(completed: SpreadHistory) -> Self {
        Self(completed)
    }

    /// Snapshots that completed before the failure
    pub fn completed(&self) -> &SpreadHistory {
        &self.0
    }

    /// Take the completed snapshots, acknowledging they are incomplete
    pub fn into_completed(self) -> SpreadHistory {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{Grid, Shape};
    use approx::assert_relative_eq;

    fn snapshot(hour: u32, ignited: usize) -> HourSnapshot {
        let shape = Shape::new(10, 10);
        let mask = Grid::from_fn(shape, |row, col| shape.index(row, col) < ignited);
        HourSnapshot {
            hour,
            mask,
            new_ignitions: 0,
        }
    }

    #[test]
    fn test_lookup_by_hour() {
        let mut history = SpreadHistory::with_capacity(3);
        history.push(snapshot(1, 1));
        history.push(snapshot(3, 4));
        history.push(snapshot(12, 9));

        assert_eq!(history.hours(), vec![1, 3, 12]);
        assert_eq!(history.get(3).map(HourSnapshot::ignited_cells), Some(4));
        assert!(history.get(2).is_none());
        assert_eq!(history.final_mask().map(Grid::count_ignited), Some(9));
    }

    #[test]
    fn test_burned_area() {
        // 100 cells of 30 m = 9 ha
        let snap = snapshot(1, 100);
        assert_relative_eq!(snap.burned_area_hectares(30.0), 9.0);
    }
}
