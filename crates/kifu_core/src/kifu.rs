//! Normalized action log ("kifu") records and label identity.
//!
//! A kifu event is derived from exactly one tap op and never mutated; its
//! `seq` is the sole stable handle for referential joins with the dataset.
//! Read-side fields are optional so validation can count incomplete records
//! instead of failing to parse them; events written by the extractor always
//! carry the full field set.

use crate::error::{PipelineError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const KIFU_SCHEMA: &str = "kifu/1";
pub const EVENT_TYPE_ACTION: &str = "action";
pub const ACTOR_SELF: &str = "self";

/// Discrete board cell.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub struct GridPos {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gx: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gy: Option<i64>,
}

impl GridPos {
    pub fn new(gx: i64, gy: i64) -> Self {
        Self {
            gx: Some(gx),
            gy: Some(gy),
        }
    }

    pub fn pair(&self) -> Option<(i64, i64)> {
        Some((self.gx?, self.gy?))
    }
}

/// Position in normalized board space.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct NormPos {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
}

impl NormPos {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
        }
    }

    pub fn pair(&self) -> Option<(f64, f64)> {
        Some((self.x?, self.y?))
    }
}

/// Categorical action identity: "what action, at what board cell",
/// independent of time. Equality of this triple is what makes two events
/// the same action type for matching and scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LabelKey {
    pub slot: i64,
    pub gx: i64,
    pub gy: i64,
}

/// A timestamped label, the matcher's working unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimedLabel {
    /// Video-clock seconds.
    pub t: f64,
    pub label: LabelKey,
}

/// One kifu record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct KifuEvent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seq: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_id: Option<String>,
    /// Video-clock seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub t: Option<f64>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub event_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slot: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pos_grid: Option<GridPos>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pos_norm: Option<NormPos>,
}

impl KifuEvent {
    /// Build a complete action event as written by the extractor.
    pub fn action(
        run_id: &str,
        seq: i64,
        t_video: f64,
        slot: i64,
        pos_norm: (f64, f64),
        pos_grid: (i64, i64),
    ) -> Self {
        Self {
            schema_version: Some(KIFU_SCHEMA.to_string()),
            run_id: Some(run_id.to_string()),
            seq: Some(seq),
            event_id: Some(format!("{run_id}:{seq}")),
            t: Some(t_video),
            event_type: Some(EVENT_TYPE_ACTION.to_string()),
            actor: Some(ACTOR_SELF.to_string()),
            confidence: Some(1.0),
            slot: Some(slot),
            pos_grid: Some(GridPos::new(pos_grid.0, pos_grid.1)),
            pos_norm: Some(NormPos::new(pos_norm.0, pos_norm.1)),
        }
    }

    pub fn is_action(&self) -> bool {
        self.event_type.as_deref() == Some(EVENT_TYPE_ACTION)
    }

    pub fn label_key(&self) -> Option<LabelKey> {
        let slot = self.slot?;
        let (gx, gy) = self.pos_grid.as_ref()?.pair()?;
        Some(LabelKey { slot, gx, gy })
    }
}

/// Collect the timed labels of all action events.
///
/// An action event missing `t`, `slot`, or a complete `pos_grid` is a
/// malformed record: scoring against a partially-labeled stream would
/// silently undercount, so this is fatal for the whole file.
pub fn collect_actions(path: &Path, events: &[KifuEvent]) -> Result<Vec<TimedLabel>> {
    let mut actions = Vec::new();
    for event in events {
        if !event.is_action() {
            continue;
        }
        let t = event.t.ok_or_else(|| malformed(path))?;
        let label = event.label_key().ok_or_else(|| malformed(path))?;
        actions.push(TimedLabel { t, label });
    }
    Ok(actions)
}

fn malformed(path: &Path) -> PipelineError {
    PipelineError::MalformedRecord {
        path: path.to_path_buf(),
        reason: "action event missing t/slot/pos_grid".into(),
    }
}
