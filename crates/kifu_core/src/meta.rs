//! Per-run configuration loaded from `meta.json`.
//!
//! `RunMeta` is loaded once and passed by reference through every pipeline
//! step; no component holds run configuration as ambient state. Structural
//! problems (degenerate ROI, non-positive grid) are configuration errors and
//! abort before any event processing starts.

use crate::error::{PipelineError, Result};
use crate::io;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Rectangle in video pixel space bounding the interactive board.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RoiRect {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl RoiRect {
    pub fn width(&self) -> f64 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> f64 {
        self.y2 - self.y1
    }

    /// A valid ROI has positive width and height.
    pub fn is_degenerate(&self) -> bool {
        self.x2 <= self.x1 || self.y2 <= self.y1
    }

    /// Inclusive containment test in video pixel space.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x1 && x <= self.x2 && y >= self.y1 && y <= self.y2
    }
}

/// Immutable per-run configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunMeta {
    pub run_id: String,
    /// Device-clock to video-clock offset in seconds.
    pub offset_sec: f64,
    pub roi_board: RoiRect,
    /// Grid width (columns).
    pub gw: i64,
    /// Grid height (rows).
    pub gh: i64,
    pub video_w: i64,
    pub video_h: i64,
    pub fps: f64,
}

impl RunMeta {
    /// Load and validate `meta.json`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let meta: RunMeta = io::load_json(path)?;
        meta.validate()?;
        Ok(meta)
    }

    /// Range checks beyond what deserialization enforces.
    pub fn validate(&self) -> Result<()> {
        if self.roi_board.is_degenerate() {
            return Err(PipelineError::InvalidConfig(
                "roi_board has invalid dimensions".into(),
            ));
        }
        if self.gw <= 0 || self.gh <= 0 {
            return Err(PipelineError::InvalidConfig(
                "gw/gh must be positive".into(),
            ));
        }
        Ok(())
    }

    pub fn grid(&self) -> (i64, i64) {
        (self.gw, self.gh)
    }
}
