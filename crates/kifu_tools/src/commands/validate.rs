//! `validate-run`: cross-stream consistency check with a machine-readable
//! report. Exit code 1 iff any hard error was recorded.

use super::emit_report;
use anyhow::{Context, Result};
use clap::Args;
use kifu_core::io::{read_jsonl, require_file, FileCheck};
use kifu_core::validate::{validate_run, ValidateOptions};
use kifu_core::video::VideoInfo;
use kifu_core::{DatasetSample, KifuEvent, RawOp, RunMeta};
use std::path::PathBuf;

#[derive(Args)]
pub struct ValidateArgs {
    /// Path to the demuxed video directory (or its video.json)
    #[arg(long)]
    pub video: PathBuf,

    /// Path to ops.jsonl
    #[arg(long)]
    pub ops: PathBuf,

    /// Path to meta.json
    #[arg(long)]
    pub meta: PathBuf,

    /// Optional kifu.jsonl to validate
    #[arg(long)]
    pub kifu: Option<PathBuf>,

    /// Optional dataset.jsonl to validate
    #[arg(long)]
    pub dataset: Option<PathBuf>,

    /// Check that referenced dataset image files exist
    #[arg(long)]
    pub check_files: bool,

    /// Allowed sync drift window in milliseconds
    #[arg(long, default_value_t = 100.0)]
    pub sync_window_ms: f64,

    /// Optional JSON report path
    #[arg(long)]
    pub out: Option<PathBuf>,
}

pub fn run(args: ValidateArgs) -> Result<i32> {
    require_file(&args.ops)?;
    require_file(&args.meta)?;
    if let Some(kifu) = &args.kifu {
        require_file(kifu)?;
    }
    if let Some(dataset) = &args.dataset {
        require_file(dataset)?;
    }

    let meta = RunMeta::load(&args.meta)
        .with_context(|| format!("Failed to load meta: {}", args.meta.display()))?;
    let video = VideoInfo::probe(&args.video)
        .with_context(|| format!("Failed to probe video: {}", args.video.display()))?;
    let ops: Vec<RawOp> = read_jsonl(&args.ops)?;

    let kifu: Option<Vec<KifuEvent>> = match &args.kifu {
        Some(path) => Some(read_jsonl(path)?),
        None => None,
    };
    let dataset: Option<Vec<DatasetSample>> = match &args.dataset {
        Some(path) => Some(read_jsonl(path)?),
        None => None,
    };

    let file_check = if args.check_files {
        let mut bases = Vec::new();
        if let Some(dataset) = &args.dataset {
            if let Some(parent) = dataset.parent() {
                bases.push(parent.to_path_buf());
            }
        }
        if let Some(parent) = args.meta.parent() {
            bases.push(parent.to_path_buf());
        }
        bases.push(std::env::current_dir().context("Failed to resolve cwd")?);
        Some(FileCheck::new(bases))
    } else {
        None
    };

    let report = validate_run(
        &meta,
        &video,
        &ops,
        kifu.as_deref(),
        dataset.as_deref(),
        file_check.as_ref(),
        &ValidateOptions {
            sync_window_ms: args.sync_window_ms,
        },
    );

    emit_report(&report, args.out.as_deref())?;
    Ok(if report.passed() { 0 } else { 1 })
}
