//! Kifu action log summary.

use super::{cell_count_map, GridMatrix, Range, RangeTracker};
use crate::kifu::{KifuEvent, KIFU_SCHEMA};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const KIFU_STATS_SCHEMA: &str = "kifu_stats/1";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActionStats {
    pub total: u64,
    pub t_range: Option<Range>,
    pub t_avg: Option<f64>,
    pub slot_counts: BTreeMap<i64, u64>,
    pub grid_counts: BTreeMap<String, u64>,
    pub grid_matrix: Option<GridMatrix>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KifuStatsReport {
    pub schema_version: String,
    pub total: u64,
    pub schema_mismatch: u64,
    pub type_counts: BTreeMap<String, u64>,
    pub actor_counts: BTreeMap<String, u64>,
    pub t_range: Option<Range>,
    pub action: ActionStats,
}

/// Summarize a kifu stream. `grid` supplies `(gw, gh)` when the dense
/// occupancy matrix is wanted.
pub fn kifu_stats(events: &[KifuEvent], grid: Option<(i64, i64)>) -> KifuStatsReport {
    let mut schema_mismatch = 0;
    let mut type_counts: BTreeMap<String, u64> = BTreeMap::new();
    let mut actor_counts: BTreeMap<String, u64> = BTreeMap::new();
    let mut slot_counts: BTreeMap<i64, u64> = BTreeMap::new();
    let mut cell_counts: BTreeMap<(i64, i64), u64> = BTreeMap::new();
    let mut t_range = RangeTracker::default();
    let mut action_t_range = RangeTracker::default();
    let mut action_t_sum = 0.0;
    let mut action_total: u64 = 0;

    for event in events {
        if event.schema_version.as_deref() != Some(KIFU_SCHEMA) {
            schema_mismatch += 1;
        }
        if let Some(event_type) = &event.event_type {
            *type_counts.entry(event_type.clone()).or_insert(0) += 1;
        }
        if let Some(actor) = &event.actor {
            *actor_counts.entry(actor.clone()).or_insert(0) += 1;
        }
        if let Some(t) = event.t {
            t_range.push(t);
        }

        if !event.is_action() {
            continue;
        }
        action_total += 1;
        if let Some(t) = event.t {
            action_t_range.push(t);
            action_t_sum += t;
        }
        if let Some(slot) = event.slot {
            *slot_counts.entry(slot).or_insert(0) += 1;
        }
        if let Some((gx, gy)) = event.pos_grid.as_ref().and_then(|g| g.pair()) {
            *cell_counts.entry((gx, gy)).or_insert(0) += 1;
        }
    }

    if events.is_empty() {
        log::warn!("no events to summarize");
    }

    let t_avg = if action_total > 0 {
        Some(action_t_sum / action_total as f64)
    } else {
        None
    };
    let grid_matrix = grid.map(|(gw, gh)| GridMatrix::from_counts(&cell_counts, gw, gh));

    KifuStatsReport {
        schema_version: KIFU_STATS_SCHEMA.to_string(),
        total: events.len() as u64,
        schema_mismatch,
        type_counts,
        actor_counts,
        t_range: t_range.summary(),
        action: ActionStats {
            total: action_total,
            t_range: action_t_range.summary(),
            t_avg,
            slot_counts,
            grid_counts: cell_count_map(&cell_counts),
            grid_matrix,
        },
    }
}
