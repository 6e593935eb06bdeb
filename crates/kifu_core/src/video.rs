//! Video collaborator interface.
//!
//! Container decoding is out of scope for this crate; the pipeline consumes
//! a recording through `VideoSource`. The production implementation is
//! `FrameDir`: a directory produced by the capture tooling holding
//! `video.json` (the probe info) and pre-demuxed PNG frames numbered
//! `000000.png`, `000001.png`, …

use crate::error::{PipelineError, Result};
use crate::io;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Probe info file inside a frame directory.
pub const VIDEO_INFO_FILE: &str = "video.json";

/// Probe properties of a recording.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VideoInfo {
    pub width: i64,
    pub height: i64,
    pub fps: f64,
    pub frame_count: i64,
    #[serde(default)]
    pub duration_sec: f64,
}

impl VideoInfo {
    /// Derive the duration from frame count and rate.
    pub fn with_duration(mut self) -> Self {
        self.duration_sec = if self.fps > 0.0 {
            self.frame_count as f64 / self.fps
        } else {
            0.0
        };
        self
    }

    /// One frame period in seconds, 0 when the rate is unknown.
    pub fn frame_period(&self) -> f64 {
        if self.fps > 0.0 {
            1.0 / self.fps
        } else {
            0.0
        }
    }

    /// Read probe info from a frame directory or directly from an info
    /// JSON file.
    pub fn probe<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let info_path = if path.is_dir() {
            path.join(VIDEO_INFO_FILE)
        } else {
            path.to_path_buf()
        };
        let info: VideoInfo = io::load_json(info_path)?;
        Ok(info.with_duration())
    }
}

/// A decoded-frame supplier.
pub trait VideoSource {
    fn info(&self) -> &VideoInfo;

    /// Decode the frame at `index`, failing on negative or unreadable
    /// indices.
    fn read_frame(&mut self, index: i64) -> Result<image::DynamicImage>;
}

/// Frame directory produced by the capture tooling.
#[derive(Debug, Clone)]
pub struct FrameDir {
    root: PathBuf,
    info: VideoInfo,
}

impl FrameDir {
    pub fn open<P: AsRef<Path>>(root: P) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        let info = VideoInfo::probe(&root)?;
        Ok(Self { root, info })
    }

    pub fn frame_path(&self, index: i64) -> PathBuf {
        self.root.join(format!("{index:06}.png"))
    }
}

impl VideoSource for FrameDir {
    fn info(&self) -> &VideoInfo {
        &self.info
    }

    fn read_frame(&mut self, index: i64) -> Result<image::DynamicImage> {
        if index < 0 {
            return Err(PipelineError::FrameRead(format!(
                "negative frame index {index}"
            )));
        }
        let path = self.frame_path(index);
        image::open(&path).map_err(|err| {
            PipelineError::FrameRead(format!("failed to read frame {}: {err}", path.display()))
        })
    }
}
