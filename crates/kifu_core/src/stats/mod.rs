//! Artifact statistics reports.
//!
//! One submodule per artifact:
//!
//! - `ops` - raw interaction log summary
//! - `kifu` - action log summary with grid occupancy
//! - `dataset` - sample summary with image accounting
//! - `policy` - model summary with probability entropy
//!
//! Statistics are purely descriptive; nothing here flips an outcome. The
//! validator (`crate::validate`) is the pass/fail authority.

pub mod dataset;
pub mod kifu;
pub mod ops;
pub mod policy;

pub use dataset::{dataset_stats, DatasetStatsReport, DATASET_STATS_SCHEMA};
pub use kifu::{kifu_stats, KifuStatsReport, KIFU_STATS_SCHEMA};
pub use ops::{ops_stats, OpsStatsReport, OPS_STATS_SCHEMA};
pub use policy::{policy_stats, PolicyStatsReport, POLICY_STATS_SCHEMA};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Closed min/max interval over observed values.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

/// Accumulates a `Range` over a stream of observations.
#[derive(Debug, Clone, Copy, Default)]
pub struct RangeTracker {
    min: Option<f64>,
    max: Option<f64>,
}

impl RangeTracker {
    pub fn push(&mut self, value: f64) {
        self.min = Some(self.min.map_or(value, |m| m.min(value)));
        self.max = Some(self.max.map_or(value, |m| m.max(value)));
    }

    pub fn summary(&self) -> Option<Range> {
        match (self.min, self.max) {
            (Some(min), Some(max)) => Some(Range { min, max }),
            _ => None,
        }
    }
}

/// Per-cell counts plus the dense `gw×gh` matrix (rows indexed by `gy`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GridMatrix {
    pub gw: i64,
    pub gh: i64,
    pub counts: Vec<Vec<u64>>,
}

impl GridMatrix {
    /// Lay sparse cell counts out as a dense matrix; out-of-bounds cells
    /// are dropped (they are the validator's concern, not a panic).
    pub fn from_counts(cell_counts: &BTreeMap<(i64, i64), u64>, gw: i64, gh: i64) -> Self {
        let mut counts = vec![vec![0u64; gw as usize]; gh as usize];
        for (&(gx, gy), &count) in cell_counts {
            if (0..gw).contains(&gx) && (0..gh).contains(&gy) {
                counts[gy as usize][gx as usize] = count;
            }
        }
        Self { gw, gh, counts }
    }
}

/// Serialize sparse cell counts as `"gx,gy" -> count`.
pub(crate) fn cell_count_map(cell_counts: &BTreeMap<(i64, i64), u64>) -> BTreeMap<String, u64> {
    cell_counts
        .iter()
        .map(|(&(gx, gy), &count)| (format!("{gx},{gy}"), count))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_tracker() {
        let mut tracker = RangeTracker::default();
        assert_eq!(tracker.summary(), None);
        tracker.push(2.0);
        tracker.push(-1.0);
        tracker.push(0.5);
        assert_eq!(tracker.summary(), Some(Range { min: -1.0, max: 2.0 }));
    }

    #[test]
    fn test_grid_matrix_drops_out_of_bounds() {
        let mut cells = BTreeMap::new();
        cells.insert((0, 1), 3u64);
        cells.insert((5, 0), 9u64); // outside a 2x2 grid
        let matrix = GridMatrix::from_counts(&cells, 2, 2);
        assert_eq!(matrix.counts, vec![vec![0, 0], vec![3, 0]]);
    }
}
