//! Cross-stream run validation.
//!
//! Verifies that the artifacts derived from one run (raw ops, normalized
//! kifu, sampled dataset) are individually well-formed and mutually
//! consistent. Findings are accumulated exhaustively across the full input
//! before the pass/fail decision: one validation pass always reports the
//! complete picture, never just the first violation.
//!
//! Findings are classified hard (`errors`, flip the outcome) or soft
//! (`warnings`, reported only). Per-section counters carry the detail.

use crate::dataset::{decode_sample_id, DatasetSample, DATASET_SCHEMA};
use crate::io::FileCheck;
use crate::kifu::{KifuEvent, KIFU_SCHEMA};
use crate::meta::{RoiRect, RunMeta};
use crate::ops::RawOp;
use crate::stats::{Range, RangeTracker};
use crate::sync::SyncWindow;
use crate::video::VideoInfo;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};

pub const RUN_CHECK_SCHEMA: &str = "run_check/1";

#[derive(Debug, Clone, Copy)]
pub struct ValidateOptions {
    pub sync_window_ms: f64,
}

impl Default for ValidateOptions {
    fn default() -> Self {
        Self {
            sync_window_ms: 100.0,
        }
    }
}

/// Echo of the configuration the run was validated against.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MetaSummary {
    pub video_w: i64,
    pub video_h: i64,
    pub fps: f64,
    pub offset_sec: f64,
    pub gw: i64,
    pub gh: i64,
    pub roi_board: RoiRect,
}

impl MetaSummary {
    fn from_meta(meta: &RunMeta) -> Self {
        Self {
            video_w: meta.video_w,
            video_h: meta.video_h,
            fps: meta.fps,
            offset_sec: meta.offset_sec,
            gw: meta.gw,
            gh: meta.gh,
            roi_board: meta.roi_board,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct OpsSection {
    pub total: u64,
    pub tap: u64,
    pub tap_out_of_bounds: u64,
    pub tap_out_of_roi: u64,
    pub tap_out_of_range: u64,
    pub t_log_nonmonotonic: u64,
    pub kind_counts: BTreeMap<String, u64>,
    pub t_video_range: Option<Range>,
    pub sync_window_ms: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct KifuSection {
    pub total: u64,
    pub action: u64,
    pub schema_mismatch: u64,
    pub run_id_mismatch: u64,
    pub seq_nonincreasing: u64,
    pub seq_duplicates: u64,
    pub grid_out_of_bounds: u64,
    pub norm_out_of_range: u64,
    pub t_out_of_range: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct DatasetSection {
    pub total: u64,
    pub schema_mismatch: u64,
    pub run_id_mismatch: u64,
    pub missing_fields: u64,
    pub missing_images: u64,
    pub check_files: bool,
}

/// Dataset↔kifu referential join, keyed by decoded `sample_id`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ConsistencySection {
    pub checked: u64,
    pub run_id_mismatch: u64,
    pub missing_in_kifu: u64,
    pub label_mismatch: u64,
    pub t_action_drift: u64,
    /// Drift tolerance applied, one frame period in seconds.
    pub frame_period_sec: f64,
}

/// Aggregated validation report for one run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunReport {
    pub schema_version: String,
    pub run_id: String,
    pub meta: MetaSummary,
    pub video: VideoInfo,
    pub ops: OpsSection,
    pub kifu: Option<KifuSection>,
    pub dataset: Option<DatasetSection>,
    pub consistency: Option<ConsistencySection>,
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
}

impl RunReport {
    /// The run passes iff no hard error was recorded.
    pub fn passed(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Validate one run's artifacts against its configuration and recording.
///
/// `kifu` and `dataset` are optional; the consistency join runs only when
/// both are supplied. `file_check` enables dataset image existence checks.
pub fn validate_run(
    meta: &RunMeta,
    video: &VideoInfo,
    ops: &[RawOp],
    kifu: Option<&[KifuEvent]>,
    dataset: Option<&[DatasetSample]>,
    file_check: Option<&FileCheck>,
    opts: &ValidateOptions,
) -> RunReport {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    check_meta_against_video(meta, video, &mut warnings);

    let window = SyncWindow::from_ms(video.duration_sec, opts.sync_window_ms);
    let ops_section = check_ops(meta, video, ops, &window, opts.sync_window_ms, &mut errors);

    let kifu_section =
        kifu.map(|events| check_kifu(meta, video, events, &window, &mut errors, &mut warnings));

    let dataset_section =
        dataset.map(|samples| check_dataset(meta, samples, file_check, &mut errors, &mut warnings));

    let consistency = match (kifu, dataset) {
        (Some(events), Some(samples)) => Some(check_consistency(
            meta,
            events,
            samples,
            &mut errors,
            &mut warnings,
        )),
        _ => None,
    };

    RunReport {
        schema_version: RUN_CHECK_SCHEMA.to_string(),
        run_id: meta.run_id.clone(),
        meta: MetaSummary::from_meta(meta),
        video: video.clone(),
        ops: ops_section,
        kifu: kifu_section,
        dataset: dataset_section,
        consistency,
        warnings,
        errors,
    }
}

fn check_meta_against_video(meta: &RunMeta, video: &VideoInfo, warnings: &mut Vec<String>) {
    let roi = &meta.roi_board;
    if roi.x1 < 0.0 || roi.y1 < 0.0 || roi.x2 > meta.video_w as f64 || roi.y2 > meta.video_h as f64
    {
        warnings.push("roi_board extends outside video bounds".into());
    }
    if video.width != 0 && video.width != meta.video_w {
        warnings.push("meta video_w does not match actual video width".into());
    }
    if video.height != 0 && video.height != meta.video_h {
        warnings.push("meta video_h does not match actual video height".into());
    }
    if video.fps != 0.0 && meta.fps != 0.0 && (video.fps - meta.fps).abs() > 0.5 {
        warnings.push("meta fps does not match actual video fps".into());
    }
}

fn check_ops(
    meta: &RunMeta,
    video: &VideoInfo,
    ops: &[RawOp],
    window: &SyncWindow,
    sync_window_ms: f64,
    errors: &mut Vec<String>,
) -> OpsSection {
    let mut section = OpsSection {
        sync_window_ms,
        ..Default::default()
    };
    let mut t_video_range = RangeTracker::default();
    let mut t_log_prev: Option<f64> = None;

    for op in ops {
        section.total += 1;
        if let Some(kind) = &op.kind {
            *section.kind_counts.entry(kind.clone()).or_insert(0) += 1;
        }

        let Some(t_log) = op.t_log else {
            errors.push("ops entry missing t_log".into());
            continue;
        };
        if let Some(prev) = t_log_prev {
            if t_log < prev {
                section.t_log_nonmonotonic += 1;
            }
        }
        t_log_prev = Some(t_log);

        if !op.is_tap() {
            continue;
        }
        let (Some(x), Some(y)) = (op.x, op.y) else {
            errors.push("ops tap entry missing x/y".into());
            continue;
        };

        section.tap += 1;
        let t_video = crate::sync::project(t_log, meta.offset_sec);
        t_video_range.push(t_video);

        if x < 0.0 || x >= meta.video_w as f64 || y < 0.0 || y >= meta.video_h as f64 {
            section.tap_out_of_bounds += 1;
        }
        if !meta.roi_board.contains(x, y) {
            section.tap_out_of_roi += 1;
        }
        if video.duration_sec > 0.0 && !window.contains(t_video) {
            section.tap_out_of_range += 1;
        }
    }

    section.t_video_range = t_video_range.summary();
    section
}

fn check_kifu(
    meta: &RunMeta,
    video: &VideoInfo,
    events: &[KifuEvent],
    window: &SyncWindow,
    errors: &mut Vec<String>,
    warnings: &mut Vec<String>,
) -> KifuSection {
    let mut section = KifuSection::default();
    let mut seq_prev: Option<i64> = None;
    let mut seen_seq: HashSet<i64> = HashSet::new();

    for event in events {
        section.total += 1;
        if event.schema_version.as_deref() != Some(KIFU_SCHEMA) {
            section.schema_mismatch += 1;
        }
        if event.run_id.as_deref() != Some(meta.run_id.as_str()) {
            section.run_id_mismatch += 1;
        }

        if let Some(seq) = event.seq {
            if let Some(prev) = seq_prev {
                if seq <= prev {
                    section.seq_nonincreasing += 1;
                }
            }
            if !seen_seq.insert(seq) {
                section.seq_duplicates += 1;
            }
            seq_prev = Some(seq);
        }

        if event.is_action() {
            section.action += 1;
        }

        if let Some(grid) = &event.pos_grid {
            if let Some((gx, gy)) = grid.pair() {
                if gx < 0 || gx >= meta.gw || gy < 0 || gy >= meta.gh {
                    section.grid_out_of_bounds += 1;
                }
            }
        }
        if let Some(norm) = &event.pos_norm {
            if let Some((x, y)) = norm.pair() {
                if !(0.0..=1.0).contains(&x) || !(0.0..=1.0).contains(&y) {
                    section.norm_out_of_range += 1;
                }
            }
        }
        if let Some(t) = event.t {
            if video.duration_sec > 0.0 && !window.contains(t) {
                section.t_out_of_range += 1;
            }
        }
    }

    if section.seq_nonincreasing > 0 {
        errors.push(format!(
            "kifu has {} non-increasing seq values",
            section.seq_nonincreasing
        ));
    }
    if section.seq_duplicates > 0 {
        errors.push(format!(
            "kifu has {} duplicate seq values",
            section.seq_duplicates
        ));
    }
    if section.grid_out_of_bounds > 0 {
        errors.push(format!(
            "kifu has {} events with grid coordinates out of bounds",
            section.grid_out_of_bounds
        ));
    }
    if section.schema_mismatch > 0 {
        warnings.push(format!(
            "kifu has {} events with unexpected schema_version",
            section.schema_mismatch
        ));
    }
    if section.run_id_mismatch > 0 {
        warnings.push(format!(
            "kifu has {} events with mismatched run_id",
            section.run_id_mismatch
        ));
    }
    if section.norm_out_of_range > 0 {
        warnings.push(format!(
            "kifu has {} events with pos_norm outside [0,1]",
            section.norm_out_of_range
        ));
    }
    if section.t_out_of_range > 0 {
        warnings.push(format!(
            "kifu has {} events with t outside the video duration",
            section.t_out_of_range
        ));
    }

    section
}

fn check_dataset(
    meta: &RunMeta,
    samples: &[DatasetSample],
    file_check: Option<&FileCheck>,
    errors: &mut Vec<String>,
    warnings: &mut Vec<String>,
) -> DatasetSection {
    let mut section = DatasetSection {
        check_files: file_check.is_some(),
        ..Default::default()
    };

    for sample in samples {
        section.total += 1;
        if sample.schema_version.as_deref() != Some(DATASET_SCHEMA) {
            section.schema_mismatch += 1;
        }
        if sample.run_id.as_deref() != Some(meta.run_id.as_str()) {
            section.run_id_mismatch += 1;
        }

        let complete = sample.sample_id.is_some()
            && sample.image_path.is_some()
            && sample.label.map(|label| label.is_complete()).unwrap_or(false);
        if !complete {
            section.missing_fields += 1;
            continue;
        }

        if let (Some(check), Some(image_path)) = (file_check, &sample.image_path) {
            if !check.exists(image_path) {
                section.missing_images += 1;
            }
        }
    }

    if section.missing_fields > 0 {
        errors.push(format!(
            "dataset has {} entries missing fields",
            section.missing_fields
        ));
    }
    if section.missing_images > 0 {
        errors.push(format!(
            "dataset has {} missing image files",
            section.missing_images
        ));
    }
    if section.schema_mismatch > 0 {
        warnings.push(format!(
            "dataset has {} entries with unexpected schema_version",
            section.schema_mismatch
        ));
    }
    if section.run_id_mismatch > 0 {
        warnings.push(format!(
            "dataset has {} entries with mismatched run_id",
            section.run_id_mismatch
        ));
    }

    section
}

fn check_consistency(
    meta: &RunMeta,
    events: &[KifuEvent],
    samples: &[DatasetSample],
    errors: &mut Vec<String>,
    warnings: &mut Vec<String>,
) -> ConsistencySection {
    let frame_period = if meta.fps > 0.0 { 1.0 / meta.fps } else { 0.0 };
    let mut section = ConsistencySection {
        frame_period_sec: frame_period,
        ..Default::default()
    };

    let by_seq: HashMap<i64, &KifuEvent> = events
        .iter()
        .filter(|event| event.is_action())
        .filter_map(|event| event.seq.map(|seq| (seq, event)))
        .collect();

    for sample in samples {
        let Some(sample_id) = &sample.sample_id else {
            continue; // already a hard finding in the dataset section
        };
        section.checked += 1;

        let Some((run_id, seq)) = decode_sample_id(sample_id) else {
            section.missing_in_kifu += 1;
            continue;
        };
        if run_id != meta.run_id {
            section.run_id_mismatch += 1;
            continue;
        }
        let Some(event) = by_seq.get(&seq) else {
            section.missing_in_kifu += 1;
            continue;
        };

        if sample.label_key() != event.label_key() {
            section.label_mismatch += 1;
        }
        if let (Some(t_action), Some(t)) = (sample.t_action, event.t) {
            if frame_period > 0.0 && (t_action - t).abs() > frame_period {
                section.t_action_drift += 1;
            }
        }
    }

    if section.run_id_mismatch > 0 {
        errors.push(format!(
            "dataset has {} samples whose sample_id names another run",
            section.run_id_mismatch
        ));
    }
    if section.missing_in_kifu > 0 {
        errors.push(format!(
            "dataset has {} samples referencing a seq missing from kifu",
            section.missing_in_kifu
        ));
    }
    if section.label_mismatch > 0 {
        errors.push(format!(
            "dataset has {} samples whose label disagrees with kifu",
            section.label_mismatch
        ));
    }
    if section.t_action_drift > 0 {
        warnings.push(format!(
            "dataset has {} samples with t_action drift beyond one frame",
            section.t_action_drift
        ));
    }

    section
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{encode_sample_id, SampleLabel};
    use crate::ops::RawOp;

    fn meta() -> RunMeta {
        RunMeta {
            run_id: "run7".into(),
            offset_sec: 0.0,
            roi_board: RoiRect {
                x1: 0.0,
                y1: 0.0,
                x2: 100.0,
                y2: 100.0,
            },
            gw: 9,
            gh: 9,
            video_w: 640,
            video_h: 480,
            fps: 30.0,
        }
    }

    fn video() -> VideoInfo {
        VideoInfo {
            width: 640,
            height: 480,
            fps: 30.0,
            frame_count: 1800,
            duration_sec: 0.0,
        }
        .with_duration()
    }

    fn action(seq: i64, t: f64, slot: i64, gx: i64, gy: i64) -> KifuEvent {
        KifuEvent::action("run7", seq, t, slot, (0.5, 0.5), (gx, gy))
    }

    fn dataset_sample(seq: i64, t: f64, slot: i64, gx: i64, gy: i64) -> DatasetSample {
        DatasetSample {
            schema_version: Some(DATASET_SCHEMA.to_string()),
            sample_id: Some(encode_sample_id("run7", seq)),
            run_id: Some("run7".into()),
            t_action: Some(t),
            image_path: Some(format!("frames/{seq:06}.png")),
            label: Some(SampleLabel::new(slot, gx, gy)),
            meta_ref: Some("meta.json".into()),
        }
    }

    fn validate(
        ops: &[RawOp],
        kifu: Option<&[KifuEvent]>,
        dataset: Option<&[DatasetSample]>,
    ) -> RunReport {
        validate_run(
            &meta(),
            &video(),
            ops,
            kifu,
            dataset,
            None,
            &ValidateOptions::default(),
        )
    }

    #[test]
    fn test_clean_run_passes() {
        let ops = vec![RawOp::tap(1.0, 50.0, 50.0, Some(0))];
        let kifu = vec![action(0, 1.0, 0, 4, 4)];
        let dataset = vec![dataset_sample(0, 1.0, 0, 4, 4)];
        let report = validate(&ops, Some(&kifu), Some(&dataset));
        assert!(report.passed(), "unexpected errors: {:?}", report.errors);
        assert_eq!(report.ops.tap, 1);
        assert_eq!(report.kifu.as_ref().unwrap().action, 1);
        assert_eq!(report.consistency.as_ref().unwrap().checked, 1);
    }

    #[test]
    fn test_nonmonotonic_t_log_counted_once() {
        // The sequence [0, 1, 0.5, 2] regresses exactly once.
        let ops: Vec<RawOp> = [0.0, 1.0, 0.5, 2.0]
            .iter()
            .map(|&t| RawOp::tap(t, 50.0, 50.0, Some(0)))
            .collect();
        let report = validate(&ops, None, None);
        assert_eq!(report.ops.t_log_nonmonotonic, 1);
        assert!(report.passed(), "monotonicity is warning-class");
    }

    #[test]
    fn test_missing_t_log_is_hard_error() {
        let op = RawOp {
            kind: Some("tap".into()),
            x: Some(1.0),
            y: Some(1.0),
            ..Default::default()
        };
        let report = validate(&[op], None, None);
        assert!(!report.passed());
        assert!(report.errors.iter().any(|e| e.contains("missing t_log")));
    }

    #[test]
    fn test_tap_bounds_and_roi_counted_separately() {
        let ops = vec![
            RawOp::tap(1.0, 639.0, 479.0, Some(0)), // in frame, outside ROI
            RawOp::tap(2.0, 700.0, 50.0, Some(0)),  // outside frame and ROI
        ];
        let report = validate(&ops, None, None);
        assert_eq!(report.ops.tap_out_of_bounds, 1);
        assert_eq!(report.ops.tap_out_of_roi, 2);
        assert!(report.passed());
    }

    #[test]
    fn test_out_of_sync_window_is_warning_class() {
        // 1800 frames at 30fps = 60s; projected time far past the end.
        let ops = vec![RawOp::tap(120.0, 50.0, 50.0, Some(0))];
        let report = validate(&ops, None, None);
        assert_eq!(report.ops.tap_out_of_range, 1);
        assert!(report.passed());
    }

    #[test]
    fn test_kind_histogram() {
        let ops = vec![
            RawOp::tap(1.0, 50.0, 50.0, Some(0)),
            RawOp {
                t_log: Some(2.0),
                kind: Some("pause".into()),
                ..Default::default()
            },
        ];
        let report = validate(&ops, None, None);
        assert_eq!(report.ops.kind_counts.get("tap"), Some(&1));
        assert_eq!(report.ops.kind_counts.get("pause"), Some(&1));
    }

    #[test]
    fn test_seq_regression_is_hard_error() {
        let kifu = vec![action(0, 1.0, 0, 0, 0), action(2, 2.0, 0, 0, 0), action(1, 3.0, 0, 0, 0)];
        let report = validate(&[], Some(&kifu), None);
        let section = report.kifu.as_ref().unwrap();
        assert_eq!(section.seq_nonincreasing, 1);
        assert!(!report.passed());
    }

    #[test]
    fn test_duplicate_seq_is_hard_error() {
        let kifu = vec![action(0, 1.0, 0, 0, 0), action(0, 2.0, 0, 0, 0)];
        let report = validate(&[], Some(&kifu), None);
        let section = report.kifu.as_ref().unwrap();
        assert_eq!(section.seq_duplicates, 1);
        assert!(!report.passed());
    }

    #[test]
    fn test_seq_gaps_are_allowed() {
        let kifu = vec![action(0, 1.0, 0, 0, 0), action(5, 2.0, 0, 0, 0)];
        let report = validate(&[], Some(&kifu), None);
        assert!(report.passed(), "gaps are fine: {:?}", report.errors);
    }

    #[test]
    fn test_grid_out_of_bounds_is_hard_error() {
        let kifu = vec![action(0, 1.0, 0, 9, 0)]; // gw = 9, max cell is 8
        let report = validate(&[], Some(&kifu), None);
        assert_eq!(report.kifu.as_ref().unwrap().grid_out_of_bounds, 1);
        assert!(!report.passed());
    }

    #[test]
    fn test_norm_out_of_range_is_warning() {
        let mut event = action(0, 1.0, 0, 0, 0);
        event.pos_norm = Some(crate::kifu::NormPos::new(1.5, 0.5));
        let report = validate(&[], Some(&[event]), None);
        assert_eq!(report.kifu.as_ref().unwrap().norm_out_of_range, 1);
        assert!(report.passed());
        assert!(!report.warnings.is_empty());
    }

    #[test]
    fn test_dataset_missing_fields_is_hard_error() {
        let mut sample = dataset_sample(0, 1.0, 0, 0, 0);
        sample.image_path = None;
        let report = validate(&[], None, Some(&[sample]));
        assert_eq!(report.dataset.as_ref().unwrap().missing_fields, 1);
        assert!(!report.passed());
    }

    #[test]
    fn test_sample_missing_from_kifu_is_hard_error() {
        // Dataset references seq 42, kifu has no such event.
        let kifu = vec![action(0, 1.0, 0, 0, 0)];
        let dataset = vec![dataset_sample(42, 1.0, 0, 0, 0)];
        let report = validate(&[], Some(&kifu), Some(&dataset));

        let section = report.consistency.as_ref().unwrap();
        assert_eq!(section.missing_in_kifu, 1);
        assert!(!report.passed());
        let missing: Vec<_> = report
            .errors
            .iter()
            .filter(|e| e.contains("missing from kifu"))
            .collect();
        assert_eq!(missing.len(), 1, "exactly one missing-in-kifu error");
    }

    #[test]
    fn test_sample_label_mismatch_is_hard_error() {
        let kifu = vec![action(0, 1.0, 3, 2, 2)];
        let dataset = vec![dataset_sample(0, 1.0, 3, 2, 5)];
        let report = validate(&[], Some(&kifu), Some(&dataset));
        assert_eq!(report.consistency.as_ref().unwrap().label_mismatch, 1);
        assert!(!report.passed());
    }

    #[test]
    fn test_t_action_drift_within_frame_period_tolerated() {
        // Half a frame of drift at 30fps: inside the 1/fps tolerance.
        let kifu = vec![action(0, 1.0, 0, 0, 0)];
        let dataset = vec![dataset_sample(0, 1.0 + 0.5 / 30.0, 0, 0, 0)];
        let report = validate(&[], Some(&kifu), Some(&dataset));
        assert_eq!(report.consistency.as_ref().unwrap().t_action_drift, 0);
        assert!(report.passed());
    }

    #[test]
    fn test_t_action_drift_beyond_frame_period_is_warning() {
        let kifu = vec![action(0, 1.0, 0, 0, 0)];
        let dataset = vec![dataset_sample(0, 1.0 + 2.0 / 30.0, 0, 0, 0)];
        let report = validate(&[], Some(&kifu), Some(&dataset));
        assert_eq!(report.consistency.as_ref().unwrap().t_action_drift, 1);
        assert!(report.passed(), "drift is warning-class");
        assert!(!report.warnings.is_empty());
    }

    #[test]
    fn test_sample_id_for_other_run_is_hard_error() {
        let kifu = vec![action(0, 1.0, 0, 0, 0)];
        let mut sample = dataset_sample(0, 1.0, 0, 0, 0);
        sample.sample_id = Some("other:0".into());
        let samples = [sample];
        let report = validate(&[], Some(&kifu), Some(&samples));
        assert_eq!(report.consistency.as_ref().unwrap().run_id_mismatch, 1);
        assert!(!report.passed());
    }

    #[test]
    fn test_consistency_requires_both_artifacts() {
        let kifu = vec![action(0, 1.0, 0, 0, 0)];
        let report = validate(&[], Some(&kifu), None);
        assert!(report.consistency.is_none());
    }

    #[test]
    fn test_schema_mismatch_is_soft() {
        let mut event = action(0, 1.0, 0, 0, 0);
        event.schema_version = Some("kifu/2".into());
        let report = validate(&[], Some(&[event]), None);
        assert_eq!(report.kifu.as_ref().unwrap().schema_mismatch, 1);
        assert!(report.passed());
        assert!(!report.warnings.is_empty());
    }
}
