//! Label-keyed matching of a predicted action stream against ground truth.
//!
//! Both streams are bucketed by label (`slot`, `gx`, `gy`); matching only
//! ever pairs events with equal labels. Predictions are processed in
//! increasing time order; each one consumes the remaining ground-truth
//! candidate of its label with the smallest absolute time delta within the
//! tolerance, ties going to the earliest candidate in scan order. A consumed
//! candidate can never match again.
//!
//! The per-label candidate pool is an ordered list with positional removal;
//! the scan short-circuits once candidate times pass `prediction.t +
//! tolerance`, which is sound because candidates are time-sorted.

use crate::kifu::{LabelKey, TimedLabel};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const KIFU_SCORE_SCHEMA: &str = "kifu_score/1";
/// Label of the matching rule, recorded in score reports.
pub const MATCH_MODE: &str = "time+slot+pos_grid";

/// Raw matching result.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchOutcome {
    pub matched: usize,
    pub pred_total: usize,
    pub gt_total: usize,
    /// Absolute time deltas of matched pairs, in milliseconds, in
    /// prediction processing order.
    pub deltas_ms: Vec<f64>,
}

impl MatchOutcome {
    /// `matched / pred_total`, 0 for an empty prediction stream.
    pub fn precision(&self) -> f64 {
        if self.pred_total == 0 {
            0.0
        } else {
            self.matched as f64 / self.pred_total as f64
        }
    }

    /// `matched / gt_total`, 0 for an empty ground-truth stream.
    pub fn recall(&self) -> f64 {
        if self.gt_total == 0 {
            0.0
        } else {
            self.matched as f64 / self.gt_total as f64
        }
    }

    pub fn f1(&self) -> f64 {
        let p = self.precision();
        let r = self.recall();
        if p + r == 0.0 {
            0.0
        } else {
            2.0 * p * r / (p + r)
        }
    }

    /// True when either stream is empty; metrics are all zero by convention
    /// and callers must surface a warning rather than fail.
    pub fn is_degenerate(&self) -> bool {
        self.pred_total == 0 || self.gt_total == 0
    }

    pub fn delta_summary(&self) -> Option<DeltaSummary> {
        if self.deltas_ms.is_empty() {
            return None;
        }
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut sum = 0.0;
        for &delta in &self.deltas_ms {
            min = min.min(delta);
            max = max.max(delta);
            sum += delta;
        }
        Some(DeltaSummary {
            min_ms: min,
            max_ms: max,
            avg_ms: sum / self.deltas_ms.len() as f64,
        })
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct DeltaSummary {
    pub min_ms: f64,
    pub max_ms: f64,
    pub avg_ms: f64,
}

/// Score report for a prediction/ground-truth comparison.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoreReport {
    pub schema_version: String,
    pub pred_total: usize,
    pub gt_total: usize,
    pub matched: usize,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub time_tolerance_ms: f64,
    pub match_mode: String,
    pub match_time_ms: Option<DeltaSummary>,
}

impl ScoreReport {
    pub fn from_outcome(outcome: &MatchOutcome, time_tolerance_ms: f64) -> Self {
        Self {
            schema_version: KIFU_SCORE_SCHEMA.to_string(),
            pred_total: outcome.pred_total,
            gt_total: outcome.gt_total,
            matched: outcome.matched,
            precision: outcome.precision(),
            recall: outcome.recall(),
            f1: outcome.f1(),
            time_tolerance_ms,
            match_mode: MATCH_MODE.to_string(),
            match_time_ms: outcome.delta_summary(),
        }
    }
}

/// Match predictions one-to-one against ground truth.
///
/// Input order is irrelevant: predictions are sorted by time before
/// processing and candidate pools are time-sorted per label.
pub fn match_streams(pred: &[TimedLabel], gt: &[TimedLabel], tolerance_sec: f64) -> MatchOutcome {
    let tolerance_sec = tolerance_sec.max(0.0);

    let mut pools: HashMap<LabelKey, Vec<f64>> = HashMap::new();
    for event in gt {
        pools.entry(event.label).or_default().push(event.t);
    }
    for times in pools.values_mut() {
        times.sort_by(f64::total_cmp);
    }

    let mut preds: Vec<TimedLabel> = pred.to_vec();
    preds.sort_by(|a, b| a.t.total_cmp(&b.t));

    let mut matched = 0;
    let mut deltas_ms = Vec::new();

    for p in &preds {
        let Some(pool) = pools.get_mut(&p.label) else {
            continue;
        };
        if let Some((index, delta)) = nearest_candidate(pool, p.t, tolerance_sec) {
            pool.remove(index);
            matched += 1;
            deltas_ms.push(delta * 1000.0);
        }
    }

    MatchOutcome {
        matched,
        pred_total: pred.len(),
        gt_total: gt.len(),
        deltas_ms,
    }
}

/// Scan a time-sorted candidate pool for the eligible candidate with the
/// smallest absolute delta. Strict improvement keeps the earliest candidate
/// on exact ties.
fn nearest_candidate(pool: &[f64], t: f64, tolerance_sec: f64) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;
    for (index, &candidate) in pool.iter().enumerate() {
        if candidate > t + tolerance_sec {
            break;
        }
        let delta = (t - candidate).abs();
        if delta > tolerance_sec {
            continue;
        }
        match best {
            Some((_, best_delta)) if delta >= best_delta => {}
            _ => best = Some((index, delta)),
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label(slot: i64) -> LabelKey {
        LabelKey {
            slot,
            gx: 0,
            gy: 0,
        }
    }

    fn event(t: f64, slot: i64) -> TimedLabel {
        TimedLabel {
            t,
            label: label(slot),
        }
    }

    #[test]
    fn test_self_match_is_perfect() {
        let stream: Vec<TimedLabel> = vec![event(1.0, 0), event(2.0, 0), event(3.0, 1)];
        let outcome = match_streams(&stream, &stream, 0.1);
        assert_eq!(outcome.matched, 3);
        assert!(outcome.deltas_ms.iter().all(|&d| d == 0.0));
        assert_eq!(outcome.precision(), 1.0);
        assert_eq!(outcome.recall(), 1.0);
        assert_eq!(outcome.f1(), 1.0);
    }

    #[test]
    fn test_match_within_tolerance() {
        // gt (t=1.00, A), pred (t=1.05, A), tolerance 100ms
        let gt = vec![event(1.0, 0)];
        let pred = vec![event(1.05, 0)];
        let outcome = match_streams(&pred, &gt, 0.1);
        assert_eq!(outcome.matched, 1);
        assert_eq!(outcome.precision(), 1.0);
        assert_eq!(outcome.recall(), 1.0);
        let summary = outcome.delta_summary().unwrap();
        assert!(
            (summary.avg_ms - 50.0).abs() < 1e-6,
            "avg delta should be 50ms, got {}",
            summary.avg_ms
        );
    }

    #[test]
    fn test_labels_never_cross_match() {
        let gt = vec![event(1.0, 0)];
        let pred = vec![event(1.0, 1)];
        let outcome = match_streams(&pred, &gt, 1.0);
        assert_eq!(outcome.matched, 0);
    }

    #[test]
    fn test_candidates_are_consumed() {
        // Two predictions, one ground-truth candidate: only one can match.
        let gt = vec![event(1.0, 0)];
        let pred = vec![event(0.99, 0), event(1.01, 0)];
        let outcome = match_streams(&pred, &gt, 0.1);
        assert_eq!(outcome.matched, 1);
    }

    #[test]
    fn test_nearest_candidate_wins() {
        // gt [(1.00, A), (1.02, A)], pred [(1.01, A)]: exactly one match,
        // one ground-truth candidate left unmatched; either way the delta
        // is ~10ms.
        let gt = vec![event(1.0, 0), event(1.02, 0)];
        let pred = vec![event(1.01, 0)];
        let outcome = match_streams(&pred, &gt, 0.1);
        assert_eq!(outcome.matched, 1);
        assert_eq!(outcome.gt_total, 2);
        let summary = outcome.delta_summary().unwrap();
        assert!(
            (summary.avg_ms - 10.0).abs() < 1e-6,
            "delta should be ~10ms, got {}",
            summary.avg_ms
        );
    }

    #[test]
    fn test_exact_tie_goes_to_earliest_candidate() {
        // 0.25 either side is exact in binary, a true tie.
        let gt = vec![event(1.0, 0), event(1.5, 0)];
        let pred = vec![event(1.25, 0), event(1.5, 0)];
        let outcome = match_streams(&pred, &gt, 0.5);
        // The tie consumes t=1.0, leaving t=1.5 for the second prediction.
        assert_eq!(outcome.matched, 2);
        assert_eq!(outcome.deltas_ms, vec![250.0, 0.0]);
    }

    #[test]
    fn test_beyond_tolerance_is_unmatched() {
        let gt = vec![event(1.0, 0)];
        let pred = vec![event(1.2, 0)];
        let outcome = match_streams(&pred, &gt, 0.1);
        assert_eq!(outcome.matched, 0);
        assert_eq!(outcome.delta_summary(), None);
    }

    #[test]
    fn test_input_order_does_not_change_match_count() {
        let gt = vec![event(1.0, 0), event(1.04, 0), event(2.0, 0)];
        let forward = vec![event(0.98, 0), event(1.05, 0), event(2.01, 0)];
        let mut shuffled = forward.clone();
        shuffled.reverse();

        let a = match_streams(&forward, &gt, 0.1);
        let b = match_streams(&shuffled, &gt, 0.1);
        assert_eq!(a.matched, b.matched);
        assert_eq!(a.matched, 3);
    }

    #[test]
    fn test_empty_streams_yield_zero_metrics() {
        let gt = vec![event(1.0, 0)];
        let outcome = match_streams(&[], &gt, 0.1);
        assert!(outcome.is_degenerate());
        assert_eq!(outcome.precision(), 0.0);
        assert_eq!(outcome.recall(), 0.0);
        assert_eq!(outcome.f1(), 0.0);
    }

    #[test]
    fn test_score_report_shape() {
        let gt = vec![event(1.0, 0)];
        let pred = vec![event(1.05, 0)];
        let report = ScoreReport::from_outcome(&match_streams(&pred, &gt, 0.1), 100.0);
        assert_eq!(report.schema_version, KIFU_SCORE_SCHEMA);
        assert_eq!(report.match_mode, MATCH_MODE);
        assert_eq!(report.matched, 1);
        assert_eq!(report.time_tolerance_ms, 100.0);
        assert!(report.match_time_ms.is_some());
    }

    #[test]
    fn test_greedy_nearest_differs_from_two_pointer_sweep() {
        // Two same-label candidates closer together than the tolerance.
        // A two-pointer sweep would pair the prediction with the first
        // unconsumed candidate; the adopted rule picks the nearest.
        let gt = vec![event(1.0, 0), event(1.06, 0)];
        let pred = vec![event(1.07, 0)];
        let outcome = match_streams(&pred, &gt, 0.1);
        assert_eq!(outcome.matched, 1);
        assert!(
            (outcome.deltas_ms[0] - 10.0).abs() < 1e-6,
            "nearest candidate (1.06) should win, got delta {}ms",
            outcome.deltas_ms[0]
        );
    }
}
