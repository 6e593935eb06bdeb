//! Subcommand implementations.
//!
//! Each `run` function returns the process exit code: 0 for success, 1 when
//! validation records hard errors, 2 when the phase gate fails. Fatal
//! configuration or parse errors propagate as `anyhow` errors instead.

pub mod build_dataset;
pub mod extract;
pub mod phase;
pub mod policy;
pub mod score;
pub mod stats;
pub mod validate;

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;

/// Print a report as pretty JSON and optionally persist it.
pub(crate) fn emit_report<T: Serialize>(report: &T, out: Option<&Path>) -> Result<()> {
    let text = serde_json::to_string_pretty(report).context("Failed to serialize report")?;
    if let Some(path) = out {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create output directory: {}", parent.display())
                })?;
            }
        }
        std::fs::write(path, &text)
            .with_context(|| format!("Failed to write report: {}", path.display()))?;
    }
    println!("{text}");
    Ok(())
}

/// Read `gw`/`gh` from a loosely-typed meta.json for the stats tools; an
/// invalid grid degrades to no grid matrix instead of failing the summary.
pub(crate) fn grid_from_meta(path: &Path) -> Result<Option<(i64, i64)>> {
    let meta: serde_json::Value = kifu_core::io::load_json(path)
        .with_context(|| format!("Failed to read meta: {}", path.display()))?;
    let gw = meta.get("gw").and_then(serde_json::Value::as_i64).unwrap_or(0);
    let gh = meta.get("gh").and_then(serde_json::Value::as_i64).unwrap_or(0);
    if gw <= 0 || gh <= 0 {
        log::warn!("invalid gw/gh in {}", path.display());
        return Ok(None);
    }
    Ok(Some((gw, gh)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_from_meta_reads_partial_meta() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("meta.json");
        std::fs::write(&path, "{\"run_id\":\"r\",\"gw\":9,\"gh\":7}").unwrap();
        assert_eq!(grid_from_meta(&path).unwrap(), Some((9, 7)));
    }

    #[test]
    fn test_grid_from_meta_degrades_on_bad_grid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("meta.json");
        std::fs::write(&path, "{\"gw\":0,\"gh\":9}").unwrap();
        assert_eq!(grid_from_meta(&path).unwrap(), None);
    }

    #[test]
    fn test_emit_report_writes_out_file() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("reports/check.json");
        emit_report(&serde_json::json!({"ok": true}), Some(&out)).unwrap();
        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(written["ok"], true);
    }
}
