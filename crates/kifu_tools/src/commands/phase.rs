//! `check-phase`: gate decision over a kifu score and a policy score.
//! Exit code 2 when the gate fails.

use super::emit_report;
use anyhow::{Context, Result};
use clap::Args;
use kifu_core::io::require_file;
use kifu_core::phase::{check_phase, PhaseThresholds};
use std::path::PathBuf;

#[derive(Args)]
pub struct CheckPhaseArgs {
    /// Path to kifu_score.json
    #[arg(long)]
    pub kifu_score: PathBuf,

    /// Path to policy_score.json
    #[arg(long)]
    pub policy_score: PathBuf,

    /// Optional number of games
    #[arg(long)]
    pub games: Option<i64>,

    #[arg(long, default_value_t = 0.95)]
    pub min_precision: f64,

    #[arg(long, default_value_t = 0.90)]
    pub min_recall: f64,

    #[arg(long, default_value_t = 0.60)]
    pub min_topk: f64,

    #[arg(long, default_value_t = 3)]
    pub topk: i64,

    #[arg(long, default_value_t = 500)]
    pub min_actions: i64,

    #[arg(long, default_value_t = 5)]
    pub min_games: i64,

    /// Optional output JSON path
    #[arg(long)]
    pub out: Option<PathBuf>,
}

pub fn run(args: CheckPhaseArgs) -> Result<i32> {
    require_file(&args.kifu_score)?;
    require_file(&args.policy_score)?;

    let kifu_score: serde_json::Value = kifu_core::io::load_json(&args.kifu_score)
        .with_context(|| format!("Failed to read {}", args.kifu_score.display()))?;
    let policy_score: serde_json::Value = kifu_core::io::load_json(&args.policy_score)
        .with_context(|| format!("Failed to read {}", args.policy_score.display()))?;

    let thresholds = PhaseThresholds {
        min_precision: args.min_precision,
        min_recall: args.min_recall,
        min_topk: args.min_topk,
        topk: args.topk,
        min_actions: args.min_actions,
        min_games: args.min_games,
    };

    let report = check_phase(&kifu_score, &policy_score, args.games, &thresholds);
    emit_report(&report, args.out.as_deref())?;
    Ok(if report.overall_pass { 0 } else { 2 })
}
