//! Statistics subcommands: `stats-ops`, `stats-kifu`, `stats-dataset`,
//! `stats-policy`.

use super::{emit_report, grid_from_meta};
use anyhow::Result;
use clap::Args;
use kifu_core::io::{read_jsonl, require_file, FileCheck};
use kifu_core::policy::PolicyModel;
use kifu_core::stats::{dataset_stats, kifu_stats, ops_stats, policy_stats};
use kifu_core::{DatasetSample, KifuEvent, RawOp};
use std::path::{Path, PathBuf};

#[derive(Args)]
pub struct StatsOpsArgs {
    /// Path to ops.jsonl
    #[arg(long)]
    pub ops: PathBuf,

    /// Optional output JSON path
    #[arg(long)]
    pub out: Option<PathBuf>,
}

pub fn run_ops(args: StatsOpsArgs) -> Result<i32> {
    require_file(&args.ops)?;
    let ops: Vec<RawOp> = read_jsonl(&args.ops)?;
    let report = ops_stats(&ops);
    emit_report(&report, args.out.as_deref())?;
    Ok(0)
}

#[derive(Args)]
pub struct StatsKifuArgs {
    /// Path to kifu.jsonl
    #[arg(long)]
    pub kifu: PathBuf,

    /// Optional meta.json for grid sizing
    #[arg(long)]
    pub meta: Option<PathBuf>,

    /// Optional output JSON path
    #[arg(long)]
    pub out: Option<PathBuf>,
}

pub fn run_kifu(args: StatsKifuArgs) -> Result<i32> {
    require_file(&args.kifu)?;
    let grid = match &args.meta {
        Some(meta) => {
            require_file(meta)?;
            grid_from_meta(meta)?
        }
        None => None,
    };

    let events: Vec<KifuEvent> = read_jsonl(&args.kifu)?;
    let report = kifu_stats(&events, grid);
    emit_report(&report, args.out.as_deref())?;
    Ok(0)
}

#[derive(Args)]
pub struct StatsDatasetArgs {
    /// Path to dataset.jsonl
    #[arg(long)]
    pub dataset: PathBuf,

    /// Optional meta.json for grid sizing
    #[arg(long)]
    pub meta: Option<PathBuf>,

    /// Check referenced image files exist
    #[arg(long)]
    pub check_files: bool,

    /// Optional output JSON path
    #[arg(long)]
    pub out: Option<PathBuf>,
}

pub fn run_dataset(args: StatsDatasetArgs) -> Result<i32> {
    require_file(&args.dataset)?;
    let grid = match &args.meta {
        Some(meta) => {
            require_file(meta)?;
            grid_from_meta(meta)?
        }
        None => None,
    };

    let samples: Vec<DatasetSample> = read_jsonl(&args.dataset)?;
    let file_check = if args.check_files {
        Some(candidate_bases(&args.dataset, args.meta.as_deref())?)
    } else {
        None
    };

    let report = dataset_stats(&samples, grid, file_check.as_ref());
    emit_report(&report, args.out.as_deref())?;
    Ok(0)
}

/// Candidate base directories for relative image paths: the dataset's
/// directory, the meta directory, the run tree root when the dataset lives
/// under `runs/`, and the working directory.
fn candidate_bases(dataset: &Path, meta: Option<&Path>) -> Result<FileCheck> {
    let mut bases = Vec::new();
    if let Some(parent) = dataset.parent() {
        bases.push(parent.to_path_buf());
        let runs_dir = parent.parent().and_then(|p| p.file_name())
            == Some(std::ffi::OsStr::new("runs"));
        if runs_dir {
            if let Some(root) = parent.parent().and_then(|p| p.parent()) {
                bases.push(root.to_path_buf());
            }
        }
    }
    if let Some(parent) = meta.and_then(Path::parent) {
        bases.push(parent.to_path_buf());
    }
    bases.push(std::env::current_dir()?);
    Ok(FileCheck::new(bases))
}

#[derive(Args)]
pub struct StatsPolicyArgs {
    /// Path to the policy model
    #[arg(long)]
    pub model: PathBuf,

    /// Number of top labels to include
    #[arg(long, default_value_t = 5)]
    pub topk: usize,

    /// Optional output JSON path
    #[arg(long)]
    pub out: Option<PathBuf>,
}

pub fn run_policy(args: StatsPolicyArgs) -> Result<i32> {
    require_file(&args.model)?;
    let model = PolicyModel::load(&args.model)?;
    let report = policy_stats(&model, args.topk)?;
    emit_report(&report, args.out.as_deref())?;
    Ok(0)
}
