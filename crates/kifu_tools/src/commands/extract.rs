//! `extract-kifu`: derive the normalized action log from raw ops.

use anyhow::{Context, Result};
use clap::Args;
use kifu_core::io::{read_jsonl, require_file, write_jsonl};
use kifu_core::{extract_actions, ExtractOptions, RawOp, RunMeta};
use std::path::PathBuf;

#[derive(Args)]
pub struct ExtractArgs {
    /// Path to the demuxed video directory (or its video.json)
    #[arg(long)]
    pub video: PathBuf,

    /// Path to ops.jsonl
    #[arg(long)]
    pub ops: PathBuf,

    /// Path to meta.json
    #[arg(long)]
    pub meta: PathBuf,

    /// Output path for kifu.jsonl
    #[arg(long)]
    pub out: PathBuf,

    /// Slot to use when an ops entry lacks slot
    #[arg(long, default_value_t = -1, allow_negative_numbers = true)]
    pub default_slot: i64,

    /// Fail if an ops entry lacks slot
    #[arg(long)]
    pub require_slot: bool,
}

pub fn run(args: ExtractArgs) -> Result<i32> {
    if !args.video.exists() {
        anyhow::bail!("Missing required file: {}", args.video.display());
    }
    require_file(&args.ops)?;
    require_file(&args.meta)?;

    let meta = RunMeta::load(&args.meta)
        .with_context(|| format!("Failed to load meta: {}", args.meta.display()))?;
    let ops: Vec<RawOp> = read_jsonl(&args.ops)?;

    let opts = ExtractOptions {
        default_slot: args.default_slot,
        require_slot: args.require_slot,
    };
    let (events, stats) = extract_actions(&meta, &ops, &opts, &args.ops)?;

    write_jsonl(&events, &args.out)?;
    log::info!(
        "extracted {} actions from {} ops entries",
        stats.actions,
        stats.total_ops
    );
    Ok(0)
}
