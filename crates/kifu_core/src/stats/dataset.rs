//! Dataset sample summary.

use super::{cell_count_map, GridMatrix, Range, RangeTracker};
use crate::dataset::{DatasetSample, DATASET_SCHEMA};
use crate::io::FileCheck;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const DATASET_STATS_SCHEMA: &str = "dataset_stats/1";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DatasetStatsReport {
    pub schema_version: String,
    pub total: u64,
    pub schema_mismatch: u64,
    pub run_id_counts: BTreeMap<String, u64>,
    pub t_action_range: Option<Range>,
    pub label_missing: u64,
    pub slot_counts: BTreeMap<i64, u64>,
    pub grid_counts: BTreeMap<String, u64>,
    pub grid_matrix: Option<GridMatrix>,
    pub image_missing_field: u64,
    pub image_missing: u64,
    pub check_files: bool,
}

/// Summarize a dataset. `grid` supplies `(gw, gh)` for the dense matrix;
/// `file_check` enables referenced-image existence accounting.
pub fn dataset_stats(
    samples: &[DatasetSample],
    grid: Option<(i64, i64)>,
    file_check: Option<&FileCheck>,
) -> DatasetStatsReport {
    let mut schema_mismatch = 0;
    let mut run_id_counts: BTreeMap<String, u64> = BTreeMap::new();
    let mut slot_counts: BTreeMap<i64, u64> = BTreeMap::new();
    let mut cell_counts: BTreeMap<(i64, i64), u64> = BTreeMap::new();
    let mut t_range = RangeTracker::default();
    let mut label_missing = 0;
    let mut image_missing_field = 0;
    let mut image_missing = 0;

    for sample in samples {
        if sample.schema_version.as_deref() != Some(DATASET_SCHEMA) {
            schema_mismatch += 1;
        }
        if let Some(run_id) = &sample.run_id {
            *run_id_counts.entry(run_id.clone()).or_insert(0) += 1;
        }
        if let Some(t_action) = sample.t_action {
            t_range.push(t_action);
        }

        match &sample.image_path {
            None => image_missing_field += 1,
            Some(image_path) => {
                if let Some(check) = file_check {
                    if !check.exists(image_path) {
                        image_missing += 1;
                    }
                }
            }
        }

        let Some(key) = sample.label_key() else {
            label_missing += 1;
            continue;
        };
        *slot_counts.entry(key.slot).or_insert(0) += 1;
        *cell_counts.entry((key.gx, key.gy)).or_insert(0) += 1;
    }

    if samples.is_empty() {
        log::warn!("no samples to summarize");
    }

    let grid_matrix = grid.map(|(gw, gh)| GridMatrix::from_counts(&cell_counts, gw, gh));

    DatasetStatsReport {
        schema_version: DATASET_STATS_SCHEMA.to_string(),
        total: samples.len() as u64,
        schema_mismatch,
        run_id_counts,
        t_action_range: t_range.summary(),
        label_missing,
        slot_counts,
        grid_counts: cell_count_map(&cell_counts),
        grid_matrix,
        image_missing_field,
        image_missing,
        check_files: file_check.is_some(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::SampleLabel;

    fn sample(run_id: &str, t: f64, slot: i64, gx: i64, gy: i64) -> DatasetSample {
        DatasetSample {
            schema_version: Some(DATASET_SCHEMA.into()),
            sample_id: Some(format!("{run_id}:0")),
            run_id: Some(run_id.into()),
            t_action: Some(t),
            image_path: Some("frames/000000.png".into()),
            label: Some(SampleLabel::new(slot, gx, gy)),
            meta_ref: None,
        }
    }

    #[test]
    fn test_dataset_stats_counts() {
        let samples = vec![
            sample("run1", 1.0, 0, 0, 0),
            sample("run1", 2.0, 0, 1, 1),
            sample("run2", 3.0, 1, 0, 0),
        ];
        let report = dataset_stats(&samples, Some((2, 2)), None);

        assert_eq!(report.total, 3);
        assert_eq!(report.run_id_counts.get("run1"), Some(&2));
        assert_eq!(report.t_action_range, Some(Range { min: 1.0, max: 3.0 }));
        assert_eq!(report.slot_counts.get(&0), Some(&2));
        assert_eq!(report.grid_counts.get("0,0"), Some(&2));
        assert!(!report.check_files);
    }

    #[test]
    fn test_missing_label_and_image_field() {
        let mut bare = DatasetSample::default();
        bare.schema_version = Some(DATASET_SCHEMA.into());
        let report = dataset_stats(&[bare], None, None);
        assert_eq!(report.label_missing, 1);
        assert_eq!(report.image_missing_field, 1);
    }

    #[test]
    fn test_image_existence_accounting() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("frames")).unwrap();
        std::fs::write(dir.path().join("frames/000000.png"), b"x").unwrap();

        let check = FileCheck::new(vec![dir.path().to_path_buf()]);
        let mut missing = sample("run1", 1.0, 0, 0, 0);
        missing.image_path = Some("frames/000001.png".into());
        let samples = vec![sample("run1", 1.0, 0, 0, 0), missing];

        let report = dataset_stats(&samples, None, Some(&check));
        assert!(report.check_files);
        assert_eq!(report.image_missing, 1);
    }
}
