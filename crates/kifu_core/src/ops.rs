//! Raw interaction log records (`ops.jsonl`).
//!
//! One JSON object per line, in arrival order. `t_log` is not guaranteed
//! monotonic; downstream passes detect violations instead of assuming order.
//! Fields are optional on read so that statistics and validation can count
//! incomplete records rather than failing to parse them.

use serde::{Deserialize, Serialize};

/// The only op kind that carries a position.
pub const KIND_TAP: &str = "tap";

/// A raw input event as logged by the instrumented session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct RawOp {
    /// Device-clock timestamp in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub t_log: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Video pixel position, `tap` only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slot: Option<i64>,
}

impl RawOp {
    pub fn tap(t_log: f64, x: f64, y: f64, slot: Option<i64>) -> Self {
        Self {
            t_log: Some(t_log),
            kind: Some(KIND_TAP.to_string()),
            x: Some(x),
            y: Some(y),
            slot,
        }
    }

    pub fn is_tap(&self) -> bool {
        self.kind.as_deref() == Some(KIND_TAP)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tap_constructor_roundtrips() {
        let op = RawOp::tap(1.5, 320.0, 240.0, Some(2));
        let json = serde_json::to_string(&op).unwrap();
        let back: RawOp = serde_json::from_str(&json).unwrap();
        assert_eq!(back, op);
        assert!(back.is_tap());
    }

    #[test]
    fn test_partial_record_parses() {
        let op: RawOp = serde_json::from_str("{\"kind\":\"pause\"}").unwrap();
        assert!(!op.is_tap());
        assert_eq!(op.t_log, None);
    }

    #[test]
    fn test_unknown_fields_tolerated() {
        let op: RawOp =
            serde_json::from_str("{\"kind\":\"tap\",\"t_log\":1.0,\"x\":1.0,\"y\":2.0,\"pressure\":0.7}")
                .unwrap();
        assert!(op.is_tap());
    }
}
