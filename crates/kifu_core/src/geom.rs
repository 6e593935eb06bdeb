//! Board coordinate normalization and grid quantization.
//!
//! Two coordinate systems are in play:
//!
//! **Video pixel space**: raw tap positions as recorded by the
//! instrumentation, bounded by the video frame.
//!
//! **Normalized board space**: `[0,1]²` relative to the board ROI, with
//! positions outside the ROI clamped to the edge. Quantization partitions
//! this square into a `gw×gh` lattice of grid cells.
//!
//! Quantization uses floor and clamps rather than wraps: a normalized value
//! of exactly 1.0 lands in the last cell, never out of range.

use crate::meta::RoiRect;

/// Clamp a value into `[0, 1]`.
pub fn clamp01(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}

/// Map a pixel position into normalized board space through the ROI.
///
/// The ROI must be non-degenerate; `RunMeta::validate` rejects degenerate
/// rectangles before any event is processed.
pub fn normalize(x: f64, y: f64, roi: &RoiRect) -> (f64, f64) {
    let x_norm = (x - roi.x1) / roi.width();
    let y_norm = (y - roi.y1) / roi.height();
    (clamp01(x_norm), clamp01(y_norm))
}

/// Quantize a normalized position into a grid cell.
///
/// Total for `gw, gh > 0`: the result always satisfies `0 <= gx < gw` and
/// `0 <= gy < gh`.
pub fn quantize(x_norm: f64, y_norm: f64, gw: i64, gh: i64) -> (i64, i64) {
    let gx = (x_norm * gw as f64).floor() as i64;
    let gy = (y_norm * gh as f64).floor() as i64;
    (gx.clamp(0, gw - 1), gy.clamp(0, gh - 1))
}
