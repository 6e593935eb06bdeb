//! `build-dataset`: cut one labeled ROI crop per kifu action.

use anyhow::{Context, Result};
use clap::Args;
use kifu_core::dataset::build_dataset;
use kifu_core::io::{read_jsonl, require_file, write_jsonl};
use kifu_core::video::FrameDir;
use kifu_core::{KifuEvent, RunMeta};
use std::path::PathBuf;

#[derive(Args)]
pub struct BuildDatasetArgs {
    /// Path to the demuxed video directory
    #[arg(long)]
    pub video: PathBuf,

    /// Path to meta.json
    #[arg(long)]
    pub meta: PathBuf,

    /// Path to kifu.jsonl
    #[arg(long)]
    pub kifu: PathBuf,

    /// Output path for dataset.jsonl
    #[arg(long)]
    pub out: PathBuf,

    /// Directory to write ROI frames
    #[arg(long)]
    pub frames_dir: PathBuf,
}

pub fn run(args: BuildDatasetArgs) -> Result<i32> {
    require_file(&args.meta)?;
    require_file(&args.kifu)?;

    let meta = RunMeta::load(&args.meta)
        .with_context(|| format!("Failed to load meta: {}", args.meta.display()))?;
    let events: Vec<KifuEvent> = read_jsonl(&args.kifu)?;
    let mut video = FrameDir::open(&args.video)
        .with_context(|| format!("Failed to open video: {}", args.video.display()))?;

    let samples = build_dataset(
        &meta,
        &events,
        &mut video,
        &args.frames_dir,
        &args.meta,
        &args.kifu,
    )?;

    write_jsonl(&samples, &args.out)?;
    log::info!("wrote {} samples", samples.len());
    Ok(0)
}
