//! `score-kifu`: precision/recall/F1 of a predicted kifu against ground
//! truth under the time-tolerance matching rule.

use super::emit_report;
use anyhow::Result;
use clap::Args;
use kifu_core::io::{read_jsonl, require_file};
use kifu_core::kifu::collect_actions;
use kifu_core::matcher::{match_streams, ScoreReport};
use kifu_core::KifuEvent;
use std::path::PathBuf;

#[derive(Args)]
pub struct ScoreKifuArgs {
    /// Predicted kifu.jsonl
    #[arg(long)]
    pub pred: PathBuf,

    /// Ground-truth kifu.jsonl
    #[arg(long)]
    pub gt: PathBuf,

    /// Time tolerance in ms for matching
    #[arg(long, default_value_t = 100.0)]
    pub time_tol_ms: f64,

    /// Optional output JSON path
    #[arg(long)]
    pub out: Option<PathBuf>,
}

pub fn run(args: ScoreKifuArgs) -> Result<i32> {
    require_file(&args.pred)?;
    require_file(&args.gt)?;

    let pred_events: Vec<KifuEvent> = read_jsonl(&args.pred)?;
    let gt_events: Vec<KifuEvent> = read_jsonl(&args.gt)?;
    let pred = collect_actions(&args.pred, &pred_events)?;
    let gt = collect_actions(&args.gt, &gt_events)?;

    let tol_sec = args.time_tol_ms.max(0.0) / 1000.0;
    let outcome = match_streams(&pred, &gt, tol_sec);
    let report = ScoreReport::from_outcome(&outcome, args.time_tol_ms);

    emit_report(&report, args.out.as_deref())?;
    if outcome.is_degenerate() {
        log::warn!("empty pred or gt actions");
    }
    Ok(0)
}
