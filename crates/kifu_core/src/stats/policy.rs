//! Policy model summary.

use crate::error::{PipelineError, Result};
use crate::kifu::GridPos;
use crate::policy::PolicyModel;
use serde::{Deserialize, Serialize};

pub const POLICY_STATS_SCHEMA: &str = "policy_stats/1";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProbabilitySummary {
    pub max: f64,
    pub min: f64,
    /// Shannon entropy of the label distribution, in bits.
    pub entropy: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TopLabel {
    pub rank: usize,
    pub slot: i64,
    pub pos_grid: GridPos,
    pub prob: f64,
    pub count: Option<u64>,
    pub cumulative_prob: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PolicyStatsReport {
    pub schema_version: String,
    pub label_count: usize,
    pub total_samples: u64,
    pub probability: ProbabilitySummary,
    pub topk: usize,
    pub top_labels: Vec<TopLabel>,
}

/// Summarize a model's label distribution.
pub fn policy_stats(model: &PolicyModel, topk: usize) -> Result<PolicyStatsReport> {
    if model.labels.is_empty() {
        return Err(PipelineError::EmptyInput("model contains no labels".into()));
    }

    let total = model.effective_total();
    if total == 0 {
        log::warn!("total_samples is zero or missing");
    }

    let probs: Vec<f64> = model.labels.iter().map(|l| model.label_score(l)).collect();
    let max = probs.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let min = probs.iter().copied().fold(f64::INFINITY, f64::min);

    let ranked = model.ranked();
    let topk = topk.max(1).min(ranked.len());
    let mut cumulative = 0.0;
    let top_labels = ranked[..topk]
        .iter()
        .enumerate()
        .map(|(index, label)| {
            let prob = model.label_score(label);
            cumulative += prob;
            TopLabel {
                rank: index + 1,
                slot: label.slot,
                pos_grid: label.pos_grid,
                prob,
                count: label.count,
                cumulative_prob: cumulative,
            }
        })
        .collect();

    Ok(PolicyStatsReport {
        schema_version: POLICY_STATS_SCHEMA.to_string(),
        label_count: model.labels.len(),
        total_samples: total,
        probability: ProbabilitySummary {
            max,
            min,
            entropy: entropy_bits(&probs),
        },
        topk,
        top_labels,
    })
}

/// Shannon entropy in bits; non-positive probabilities contribute nothing.
fn entropy_bits(probs: &[f64]) -> f64 {
    probs
        .iter()
        .filter(|&&p| p > 0.0)
        .map(|&p| -p * p.log2())
        .sum()
}
