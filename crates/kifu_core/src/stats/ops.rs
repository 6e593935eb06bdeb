//! Raw ops summary.

use super::{Range, RangeTracker};
use crate::ops::RawOp;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const OPS_STATS_SCHEMA: &str = "ops_stats/1";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct TapStats {
    pub total: u64,
    pub missing_fields: u64,
    pub x_range: Option<Range>,
    pub y_range: Option<Range>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OpsStatsReport {
    pub schema_version: String,
    pub total: u64,
    pub kind_counts: BTreeMap<String, u64>,
    pub t_log_range: Option<Range>,
    pub t_log_nonmonotonic: u64,
    pub tap: TapStats,
}

/// Summarize an ops stream: kind histogram, time range, monotonicity
/// violations, tap position ranges.
pub fn ops_stats(ops: &[RawOp]) -> OpsStatsReport {
    let mut kind_counts: BTreeMap<String, u64> = BTreeMap::new();
    let mut t_range = RangeTracker::default();
    let mut x_range = RangeTracker::default();
    let mut y_range = RangeTracker::default();
    let mut t_log_prev: Option<f64> = None;
    let mut t_log_nonmonotonic = 0;
    let mut tap = TapStats::default();

    for op in ops {
        if let Some(kind) = &op.kind {
            *kind_counts.entry(kind.clone()).or_insert(0) += 1;
        }

        if let Some(t_log) = op.t_log {
            t_range.push(t_log);
            if let Some(prev) = t_log_prev {
                if t_log < prev {
                    t_log_nonmonotonic += 1;
                }
            }
            t_log_prev = Some(t_log);
        }

        if !op.is_tap() {
            continue;
        }
        tap.total += 1;
        match (op.x, op.y) {
            (Some(x), Some(y)) => {
                x_range.push(x);
                y_range.push(y);
            }
            _ => tap.missing_fields += 1,
        }
    }

    if ops.is_empty() {
        log::warn!("no ops to summarize");
    }

    tap.x_range = x_range.summary();
    tap.y_range = y_range.summary();

    OpsStatsReport {
        schema_version: OPS_STATS_SCHEMA.to_string(),
        total: ops.len() as u64,
        kind_counts,
        t_log_range: t_range.summary(),
        t_log_nonmonotonic,
        tap,
    }
}
