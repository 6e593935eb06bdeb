//! Phase gate over score reports.
//!
//! Reads a kifu score and a policy score and decides whether the run set
//! clears the phase criteria: matching precision/recall, top-k accuracy,
//! and a data minimum (enough games or enough ground-truth actions). Score
//! documents are consumed as raw JSON so that a gate can run over reports
//! from older tool versions with missing fields.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

pub const PHASE_CHECK_SCHEMA: &str = "phase1_check/1";

#[derive(Debug, Clone, Copy)]
pub struct PhaseThresholds {
    pub min_precision: f64,
    pub min_recall: f64,
    pub min_topk: f64,
    pub topk: i64,
    pub min_actions: i64,
    pub min_games: i64,
}

impl Default for PhaseThresholds {
    fn default() -> Self {
        Self {
            min_precision: 0.95,
            min_recall: 0.90,
            min_topk: 0.60,
            topk: 3,
            min_actions: 500,
            min_games: 5,
        }
    }
}

/// One named criterion with its observed value and threshold.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PhaseCheck {
    pub name: String,
    pub value: Value,
    pub threshold: Value,
    pub pass: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topk_used: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PhaseReport {
    pub schema_version: String,
    pub overall_pass: bool,
    pub checks: Vec<PhaseCheck>,
    pub warnings: Vec<String>,
}

fn get_f64(value: &Value, key: &str) -> f64 {
    value.get(key).and_then(Value::as_f64).unwrap_or(0.0)
}

fn get_i64(value: &Value, key: &str) -> i64 {
    value.get(key).and_then(Value::as_i64).unwrap_or(0)
}

/// Evaluate the gate.
pub fn check_phase(
    kifu_score: &Value,
    policy_score: &Value,
    games: Option<i64>,
    thresholds: &PhaseThresholds,
) -> PhaseReport {
    let precision = get_f64(kifu_score, "precision");
    let recall = get_f64(kifu_score, "recall");
    let gt_total = get_i64(kifu_score, "gt_total");

    let topk_used = get_i64(policy_score, "topk");
    let topk_acc = get_f64(policy_score, "topk_acc");

    let mut checks = vec![
        PhaseCheck {
            name: "action_precision".into(),
            value: json!(precision),
            threshold: json!(thresholds.min_precision),
            pass: precision >= thresholds.min_precision,
            topk_used: None,
            notes: None,
        },
        PhaseCheck {
            name: "action_recall".into(),
            value: json!(recall),
            threshold: json!(thresholds.min_recall),
            pass: recall >= thresholds.min_recall,
            topk_used: None,
            notes: None,
        },
        PhaseCheck {
            name: format!("top{}_acc", thresholds.topk),
            value: json!(topk_acc),
            threshold: json!(thresholds.min_topk),
            pass: topk_acc >= thresholds.min_topk,
            topk_used: Some(topk_used),
            notes: None,
        },
    ];

    // Data minimum: enough games, or failing that, enough actions.
    let mut data_pass = false;
    let mut data_notes = Vec::new();
    match games {
        Some(games) if games >= thresholds.min_games => data_pass = true,
        Some(games) => data_notes.push(format!(
            "games {games} < min_games {}",
            thresholds.min_games
        )),
        None => data_notes.push("games not provided".into()),
    }
    if gt_total >= thresholds.min_actions {
        data_pass = true;
    } else {
        data_notes.push(format!(
            "gt_total {gt_total} < min_actions {}",
            thresholds.min_actions
        ));
    }

    checks.push(PhaseCheck {
        name: "data_minimum".into(),
        value: json!({ "games": games, "gt_total": gt_total }),
        threshold: json!({
            "min_games": thresholds.min_games,
            "min_actions": thresholds.min_actions,
        }),
        pass: data_pass,
        topk_used: None,
        notes: Some(data_notes),
    });

    let overall_pass = checks.iter().all(|check| check.pass);

    let mut warnings = Vec::new();
    if topk_used != 0 && topk_used != thresholds.topk {
        warnings.push(format!(
            "policy_score topk={topk_used} differs from expected {}",
            thresholds.topk
        ));
    }

    PhaseReport {
        schema_version: PHASE_CHECK_SCHEMA.to_string(),
        overall_pass,
        checks,
        warnings,
    }
}
