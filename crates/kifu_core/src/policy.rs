//! Frequency-based action policy.
//!
//! The "model" is a histogram of dataset labels: each distinct
//! `(slot, gx, gy)` with its count and empirical probability, sorted by
//! descending frequency. Prediction returns the top of that ranking;
//! scoring measures how often dataset labels fall inside it.

use crate::dataset::DatasetSample;
use crate::error::{PipelineError, Result};
use crate::io;
use crate::kifu::{GridPos, LabelKey};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

pub const POLICY_SCHEMA: &str = "policy/1";
pub const POLICY_SCORE_SCHEMA: &str = "policy_score/1";

/// One histogram bucket.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PolicyLabel {
    pub slot: i64,
    pub pos_grid: GridPos,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prob: Option<f64>,
}

impl PolicyLabel {
    pub fn key(&self) -> Option<LabelKey> {
        let (gx, gy) = self.pos_grid.pair()?;
        Some(LabelKey {
            slot: self.slot,
            gx,
            gy,
        })
    }
}

/// Trained frequency model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PolicyModel {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default)]
    pub total_samples: u64,
    #[serde(default)]
    pub labels: Vec<PolicyLabel>,
}

impl PolicyModel {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let model: PolicyModel = io::load_json(path)?;
        if model.schema_version.as_deref() != Some(POLICY_SCHEMA) {
            log::warn!("unexpected model schema_version");
        }
        Ok(model)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        io::save_json_pretty(self, path)
    }

    /// Total sample count, reconstructed from label counts when the field
    /// is missing or zero.
    pub fn effective_total(&self) -> u64 {
        if self.total_samples > 0 {
            self.total_samples
        } else {
            self.labels.iter().filter_map(|l| l.count).sum()
        }
    }

    /// Score of one label: stored probability, else count normalized by the
    /// effective total, else the raw count.
    pub fn label_score(&self, label: &PolicyLabel) -> f64 {
        if let Some(prob) = label.prob {
            return prob;
        }
        let count = label.count.unwrap_or(0) as f64;
        let total = self.effective_total();
        if total > 0 {
            count / total as f64
        } else {
            count
        }
    }

    /// Labels in descending score order. Sorting is stable, so equal-score
    /// labels keep their stored (count-descending) order.
    pub fn ranked(&self) -> Vec<&PolicyLabel> {
        let mut labels: Vec<&PolicyLabel> = self.labels.iter().collect();
        labels.sort_by(|a, b| self.label_score(b).total_cmp(&self.label_score(a)));
        labels
    }
}

/// Count dataset labels into a model.
///
/// A sample with an incomplete label is a malformed record: training on a
/// silently reduced dataset would misstate every probability.
pub fn train(samples: &[DatasetSample], source: &Path) -> Result<PolicyModel> {
    let mut counts: BTreeMap<LabelKey, u64> = BTreeMap::new();
    let mut total: u64 = 0;

    for sample in samples {
        let key = sample.label_key().ok_or_else(|| PipelineError::MalformedRecord {
            path: source.to_path_buf(),
            reason: "entry missing label slot or pos_grid gx/gy".into(),
        })?;
        *counts.entry(key).or_insert(0) += 1;
        total += 1;
    }

    if total == 0 {
        return Err(PipelineError::EmptyInput(format!(
            "no samples found in {}",
            source.display()
        )));
    }

    let mut buckets: Vec<(LabelKey, u64)> = counts.into_iter().collect();
    // Descending count; the BTreeMap ordering breaks ties by label key.
    buckets.sort_by(|a, b| b.1.cmp(&a.1));

    let labels = buckets
        .into_iter()
        .map(|(key, count)| PolicyLabel {
            slot: key.slot,
            pos_grid: GridPos::new(key.gx, key.gy),
            count: Some(count),
            prob: Some(count as f64 / total as f64),
        })
        .collect();

    Ok(PolicyModel {
        schema_version: Some(POLICY_SCHEMA.to_string()),
        created_at: Some(chrono::Utc::now().to_rfc3339()),
        total_samples: total,
        labels,
    })
}

/// One ranked prediction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Prediction {
    pub rank: usize,
    pub run_id: String,
    pub slot: i64,
    pub pos_grid: GridPos,
    pub score: f64,
}

/// Top-k most frequent labels as predictions for a run.
pub fn predict(model: &PolicyModel, run_id: &str, topk: usize) -> Result<Vec<Prediction>> {
    if model.labels.is_empty() {
        return Err(PipelineError::EmptyInput(
            "model contains no labels to predict".into(),
        ));
    }
    let ranked = model.ranked();
    let topk = topk.max(1).min(ranked.len());

    Ok(ranked[..topk]
        .iter()
        .enumerate()
        .map(|(index, label)| Prediction {
            rank: index + 1,
            run_id: run_id.to_string(),
            slot: label.slot,
            pos_grid: label.pos_grid,
            score: model.label_score(label),
        })
        .collect())
}

/// Accuracy report of a model against dataset labels.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PolicyScoreReport {
    pub schema_version: String,
    pub total_samples: usize,
    pub top1_correct: usize,
    pub top1_acc: f64,
    pub topk: usize,
    pub topk_correct: usize,
    pub topk_acc: f64,
    pub label_count: usize,
    pub missing_label: usize,
}

/// Score the model's fixed top-k prediction against every dataset label.
pub fn score(model: &PolicyModel, samples: &[DatasetSample], topk: usize) -> Result<PolicyScoreReport> {
    if model.labels.is_empty() {
        return Err(PipelineError::EmptyInput(
            "model contains no labels to score".into(),
        ));
    }
    if samples.is_empty() {
        return Err(PipelineError::EmptyInput(
            "no samples found in dataset".into(),
        ));
    }

    let ranked = model.ranked();
    let topk = topk.max(1).min(ranked.len());
    let top1 = ranked[0].key();
    let topk_keys: HashSet<LabelKey> =
        ranked[..topk].iter().filter_map(|label| label.key()).collect();

    let mut top1_correct = 0;
    let mut topk_correct = 0;
    let mut missing_label = 0;

    for sample in samples {
        let Some(key) = sample.label_key() else {
            missing_label += 1;
            continue;
        };
        if Some(key) == top1 {
            top1_correct += 1;
        }
        if topk_keys.contains(&key) {
            topk_correct += 1;
        }
    }

    if missing_label > 0 {
        log::warn!("{missing_label} samples missing labels");
    }

    let total = samples.len();
    Ok(PolicyScoreReport {
        schema_version: POLICY_SCORE_SCHEMA.to_string(),
        total_samples: total,
        top1_correct,
        top1_acc: top1_correct as f64 / total as f64,
        topk,
        topk_correct,
        topk_acc: topk_correct as f64 / total as f64,
        label_count: model.labels.len(),
        missing_label,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::SampleLabel;
    use std::path::PathBuf;

    fn sample(slot: i64, gx: i64, gy: i64) -> DatasetSample {
        DatasetSample {
            label: Some(SampleLabel::new(slot, gx, gy)),
            ..Default::default()
        }
    }

    fn src() -> PathBuf {
        PathBuf::from("dataset.jsonl")
    }

    #[test]
    fn test_train_counts_and_sorts() {
        let samples = vec![
            sample(0, 1, 1),
            sample(0, 1, 1),
            sample(0, 1, 1),
            sample(1, 2, 2),
        ];
        let model = train(&samples, &src()).unwrap();
        assert_eq!(model.total_samples, 4);
        assert_eq!(model.labels.len(), 2);

        let first = &model.labels[0];
        assert_eq!((first.slot, first.count), (0, Some(3)));
        assert_eq!(first.prob, Some(0.75));
    }

    #[test]
    fn test_train_tie_break_is_deterministic() {
        let samples = vec![sample(2, 0, 0), sample(1, 0, 0)];
        let model = train(&samples, &src()).unwrap();
        // Equal counts order by label key.
        assert_eq!(model.labels[0].slot, 1);
        assert_eq!(model.labels[1].slot, 2);
    }

    #[test]
    fn test_train_rejects_empty_and_unlabeled() {
        assert!(train(&[], &src()).is_err());
        assert!(train(&[DatasetSample::default()], &src()).is_err());
    }

    #[test]
    fn test_predict_ranks_by_frequency() {
        let samples = vec![sample(0, 1, 1), sample(0, 1, 1), sample(1, 2, 2)];
        let model = train(&samples, &src()).unwrap();
        let preds = predict(&model, "run1", 2).unwrap();

        assert_eq!(preds.len(), 2);
        assert_eq!(preds[0].rank, 1);
        assert_eq!(preds[0].slot, 0);
        assert_eq!(preds[0].run_id, "run1");
        assert!(preds[0].score > preds[1].score);
    }

    #[test]
    fn test_predict_clamps_topk() {
        let model = train(&[sample(0, 0, 0)], &src()).unwrap();
        assert_eq!(predict(&model, "run1", 0).unwrap().len(), 1);
        assert_eq!(predict(&model, "run1", 99).unwrap().len(), 1);
    }

    #[test]
    fn test_score_accuracy() {
        let samples = vec![
            sample(0, 1, 1),
            sample(0, 1, 1),
            sample(1, 2, 2),
            sample(9, 9, 9),
        ];
        let model = train(&samples, &src()).unwrap();
        let report = score(&model, &samples, 2).unwrap();

        assert_eq!(report.total_samples, 4);
        assert_eq!(report.top1_correct, 2);
        assert_eq!(report.top1_acc, 0.5);
        assert_eq!(report.topk, 2);
        assert_eq!(report.topk_correct, 3);
        assert_eq!(report.topk_acc, 0.75);
        assert_eq!(report.missing_label, 0);
    }

    #[test]
    fn test_score_counts_missing_labels() {
        let model = train(&[sample(0, 0, 0)], &src()).unwrap();
        let mixed = vec![sample(0, 0, 0), DatasetSample::default()];
        let report = score(&model, &mixed, 1).unwrap();
        assert_eq!(report.missing_label, 1);
        assert_eq!(report.top1_correct, 1);
    }

    #[test]
    fn test_score_fallback_without_prob() {
        let model = PolicyModel {
            schema_version: Some(POLICY_SCHEMA.into()),
            created_at: None,
            total_samples: 0,
            labels: vec![
                PolicyLabel {
                    slot: 1,
                    pos_grid: GridPos::new(0, 0),
                    count: Some(1),
                    prob: None,
                },
                PolicyLabel {
                    slot: 0,
                    pos_grid: GridPos::new(0, 0),
                    count: Some(5),
                    prob: None,
                },
            ],
        };
        assert_eq!(model.effective_total(), 6);
        let ranked = model.ranked();
        assert_eq!(ranked[0].slot, 0, "higher count should rank first");
    }
}
