//! Labeled dataset samples derived from kifu events.
//!
//! Each sample references exactly one action event through
//! `sample_id = "{run_id}:{seq}"` and carries the event's label plus a
//! cropped board frame on disk. Read-side fields are optional so validation
//! can count incomplete records.

use crate::error::{PipelineError, Result};
use crate::kifu::{GridPos, KifuEvent, LabelKey};
use crate::meta::RunMeta;
use crate::video::VideoSource;
use image::GenericImageView;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DATASET_SCHEMA: &str = "dataset/1";

/// Sample label: action slot plus board cell.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct SampleLabel {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slot: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pos_grid: Option<GridPos>,
}

impl SampleLabel {
    pub fn new(slot: i64, gx: i64, gy: i64) -> Self {
        Self {
            slot: Some(slot),
            pos_grid: Some(GridPos::new(gx, gy)),
        }
    }

    pub fn key(&self) -> Option<LabelKey> {
        let slot = self.slot?;
        let (gx, gy) = self.pos_grid?.pair()?;
        Some(LabelKey { slot, gx, gy })
    }

    pub fn is_complete(&self) -> bool {
        self.key().is_some()
    }
}

/// One dataset record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct DatasetSample {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub t_action: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<SampleLabel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta_ref: Option<String>,
}

impl DatasetSample {
    pub fn label_key(&self) -> Option<LabelKey> {
        self.label.as_ref()?.key()
    }
}

/// Compose the composite sample key.
pub fn encode_sample_id(run_id: &str, seq: i64) -> String {
    format!("{run_id}:{seq}")
}

/// Split a sample key back into run identity and sequence number.
///
/// The sequence is everything after the last `:`, so run ids containing
/// colons survive the round trip.
pub fn decode_sample_id(sample_id: &str) -> Option<(&str, i64)> {
    let (run_id, seq) = sample_id.rsplit_once(':')?;
    let seq = seq.parse().ok()?;
    Some((run_id, seq))
}

/// Build dataset samples and their ROI frame crops.
///
/// The frame index is the nearest frame to the action time at the
/// configured rate. A negative index, an unreadable frame, or an action
/// event missing required fields aborts the build; a partial dataset would
/// silently starve training.
pub fn build_dataset(
    meta: &RunMeta,
    events: &[KifuEvent],
    video: &mut dyn VideoSource,
    frames_dir: &Path,
    meta_ref: &Path,
    kifu_path: &Path,
) -> Result<Vec<DatasetSample>> {
    meta.validate()?;
    if meta.fps <= 0.0 {
        return Err(PipelineError::InvalidConfig("fps must be positive".into()));
    }

    std::fs::create_dir_all(frames_dir).map_err(|source| PipelineError::Io {
        path: frames_dir.to_path_buf(),
        source,
    })?;

    let mut samples = Vec::new();
    for event in events {
        if !event.is_action() {
            continue;
        }
        let (seq, t_action, slot, (gx, gy)) = match (
            event.seq,
            event.t,
            event.slot,
            event.pos_grid.as_ref().and_then(GridPos::pair),
        ) {
            (Some(seq), Some(t), Some(slot), Some(grid)) => (seq, t, slot, grid),
            _ => {
                return Err(PipelineError::MalformedRecord {
                    path: kifu_path.to_path_buf(),
                    reason: "action event missing seq/t/slot/pos_grid".into(),
                })
            }
        };

        let frame_index = (t_action * meta.fps).round() as i64;
        if frame_index < 0 {
            return Err(PipelineError::FrameRead(format!(
                "negative frame index for seq {seq}"
            )));
        }

        let frame = video.read_frame(frame_index)?;
        let crop = crop_roi(&frame, meta);

        let frame_path = frames_dir.join(format!("{seq:06}.png"));
        crop.save(&frame_path)?;

        samples.push(DatasetSample {
            schema_version: Some(DATASET_SCHEMA.to_string()),
            sample_id: Some(encode_sample_id(&meta.run_id, seq)),
            run_id: Some(meta.run_id.clone()),
            t_action: Some(t_action),
            image_path: Some(frame_path.to_string_lossy().into_owned()),
            label: Some(SampleLabel::new(slot, gx, gy)),
            meta_ref: Some(meta_ref.to_string_lossy().into_owned()),
        });
    }

    if samples.is_empty() {
        log::warn!("no action samples written from {}", kifu_path.display());
    }

    Ok(samples)
}

/// Crop the board ROI out of a decoded frame, clamping the rectangle to the
/// frame bounds so a ROI hanging over the edge still yields a non-empty
/// crop.
fn crop_roi(frame: &image::DynamicImage, meta: &RunMeta) -> image::DynamicImage {
    let width = frame.width() as i64;
    let height = frame.height() as i64;

    let x1 = (meta.roi_board.x1.round() as i64).clamp(0, width - 1);
    let x2 = (meta.roi_board.x2.round() as i64).clamp(x1 + 1, width);
    let y1 = (meta.roi_board.y1.round() as i64).clamp(0, height - 1);
    let y2 = (meta.roi_board.y2.round() as i64).clamp(y1 + 1, height);

    frame.crop_imm(x1 as u32, y1 as u32, (x2 - x1) as u32, (y2 - y1) as u32)
}
