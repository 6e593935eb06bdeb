//! Derivation of the kifu action log from raw ops.
//!
//! Only `tap` ops produce actions. Each tap is projected onto the video
//! clock, normalized through the board ROI, and quantized into a grid cell;
//! `seq` is assigned densely in arrival order and is unique within the run.

use crate::error::{PipelineError, Result};
use crate::geom;
use crate::kifu::KifuEvent;
use crate::meta::RunMeta;
use crate::ops::RawOp;
use crate::sync;
use std::path::Path;

#[derive(Debug, Clone, Copy)]
pub struct ExtractOptions {
    /// Slot assigned when a tap carries none.
    pub default_slot: i64,
    /// Fail instead of defaulting when a tap carries no slot.
    pub require_slot: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            default_slot: -1,
            require_slot: false,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractStats {
    pub total_ops: usize,
    pub actions: usize,
    pub missing_slot: usize,
}

/// Project every tap op into a kifu action event.
///
/// A tap missing `t_log`, `x`, or `y` is a malformed record and fatal for
/// the whole run; partial extraction would produce a silently incomplete
/// kifu. `source` names the ops file in error messages.
pub fn extract_actions(
    meta: &RunMeta,
    ops: &[RawOp],
    opts: &ExtractOptions,
    source: &Path,
) -> Result<(Vec<KifuEvent>, ExtractStats)> {
    meta.validate()?;

    let mut events = Vec::new();
    let mut stats = ExtractStats::default();
    let mut seq: i64 = 0;

    for op in ops {
        stats.total_ops += 1;
        if !op.is_tap() {
            continue;
        }
        let (t_log, x, y) = match (op.t_log, op.x, op.y) {
            (Some(t), Some(x), Some(y)) => (t, x, y),
            _ => {
                return Err(PipelineError::MalformedRecord {
                    path: source.to_path_buf(),
                    reason: "tap entry missing t_log/x/y".into(),
                })
            }
        };

        let slot = match op.slot {
            Some(slot) => slot,
            None if opts.require_slot => {
                return Err(PipelineError::MalformedRecord {
                    path: source.to_path_buf(),
                    reason: "tap entry missing slot while require_slot set".into(),
                })
            }
            None => {
                stats.missing_slot += 1;
                opts.default_slot
            }
        };

        let t_video = sync::project(t_log, meta.offset_sec);
        let pos_norm = geom::normalize(x, y, &meta.roi_board);
        let pos_grid = geom::quantize(pos_norm.0, pos_norm.1, meta.gw, meta.gh);

        events.push(KifuEvent::action(
            &meta.run_id,
            seq,
            t_video,
            slot,
            pos_norm,
            pos_grid,
        ));
        seq += 1;
        stats.actions += 1;
    }

    if stats.actions == 0 {
        log::warn!("no action events extracted from {}", source.display());
    }
    if stats.missing_slot > 0 {
        log::warn!(
            "{} action events used default slot {}",
            stats.missing_slot,
            opts.default_slot
        );
    }

    Ok((events, stats))
}
