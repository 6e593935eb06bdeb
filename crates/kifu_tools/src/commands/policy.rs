//! Policy subcommands: `train-policy`, `predict-policy`, `score-policy`.

use super::emit_report;
use anyhow::{Context, Result};
use clap::Args;
use kifu_core::io::{read_jsonl, require_file};
use kifu_core::policy::{predict, score, train, PolicyModel};
use kifu_core::DatasetSample;
use std::path::PathBuf;

/// Default model file name inside the output directory.
const MODEL_FILE: &str = "policy.json";

#[derive(Args)]
pub struct TrainArgs {
    /// Path to dataset.jsonl
    #[arg(long)]
    pub dataset: PathBuf,

    /// Output directory for the model
    #[arg(long)]
    pub out: PathBuf,
}

pub fn run_train(args: TrainArgs) -> Result<i32> {
    require_file(&args.dataset)?;
    let samples: Vec<DatasetSample> = read_jsonl(&args.dataset)?;
    let model = train(&samples, &args.dataset)?;

    let model_path = args.out.join(MODEL_FILE);
    model.save(&model_path)?;
    log::info!("wrote model to {}", model_path.display());
    Ok(0)
}

#[derive(Args)]
pub struct PredictArgs {
    /// Path to the policy model
    #[arg(long)]
    pub model: PathBuf,

    /// Path to the demuxed video directory (or its video.json)
    #[arg(long)]
    pub video: PathBuf,

    /// Path to meta.json
    #[arg(long)]
    pub meta: PathBuf,

    /// Number of top actions
    #[arg(long, default_value_t = 3)]
    pub topk: usize,

    /// Optional output path for predictions jsonl
    #[arg(long)]
    pub out: Option<PathBuf>,
}

pub fn run_predict(args: PredictArgs) -> Result<i32> {
    require_file(&args.model)?;
    require_file(&args.meta)?;
    if !args.video.exists() {
        anyhow::bail!("Missing required file: {}", args.video.display());
    }

    let model = PolicyModel::load(&args.model)?;
    let meta: serde_json::Value = kifu_core::io::load_json(&args.meta)
        .with_context(|| format!("Failed to read meta: {}", args.meta.display()))?;
    let run_id = meta
        .get("run_id")
        .and_then(serde_json::Value::as_str)
        .unwrap_or("unknown");

    let predictions = predict(&model, run_id, args.topk)?;

    match &args.out {
        Some(path) => kifu_core::io::write_jsonl(&predictions, path)?,
        None => {
            for prediction in &predictions {
                println!("{}", serde_json::to_string(prediction)?);
            }
        }
    }
    Ok(0)
}

#[derive(Args)]
pub struct ScorePolicyArgs {
    /// Path to the policy model
    #[arg(long)]
    pub model: PathBuf,

    /// Path to dataset.jsonl
    #[arg(long)]
    pub dataset: PathBuf,

    /// Top-k accuracy to compute
    #[arg(long, default_value_t = 3)]
    pub topk: usize,

    /// Optional output JSON path
    #[arg(long)]
    pub out: Option<PathBuf>,
}

pub fn run_score(args: ScorePolicyArgs) -> Result<i32> {
    require_file(&args.model)?;
    require_file(&args.dataset)?;

    let model = PolicyModel::load(&args.model)?;
    let samples: Vec<DatasetSample> = read_jsonl(&args.dataset)?;
    let report = score(&model, &samples, args.topk)?;

    emit_report(&report, args.out.as_deref())?;
    Ok(0)
}
