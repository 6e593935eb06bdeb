//! JSON and JSONL file helpers.
//!
//! Every artifact in the pipeline is either a whole-file JSON document
//! (meta, reports, policy model) or newline-delimited JSON records (ops,
//! kifu, dataset). A malformed JSONL line is a hard error naming the file
//! and the 1-based line number; blank lines are skipped.

use crate::error::{PipelineError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Load a whole-file JSON document.
pub fn load_json<T, P>(path: P) -> Result<T>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let data = fs::read_to_string(path).map_err(|source| PipelineError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&data).map_err(|source| PipelineError::MalformedJson {
        path: path.to_path_buf(),
        source,
    })
}

/// Save a JSON document pretty-printed, creating parent directories.
pub fn save_json_pretty<T, P>(value: &T, path: P) -> Result<()>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    ensure_parent(path)?;
    let data = serde_json::to_string_pretty(value).map_err(|source| {
        PipelineError::MalformedJson {
            path: path.to_path_buf(),
            source,
        }
    })?;
    fs::write(path, data).map_err(|source| PipelineError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Read all records from a JSONL file.
pub fn read_jsonl<T, P>(path: P) -> Result<Vec<T>>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let data = fs::read_to_string(path).map_err(|source| PipelineError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut records = Vec::new();
    for (line_no, line) in data.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let record = serde_json::from_str(line).map_err(|source| {
            PipelineError::MalformedLine {
                path: path.to_path_buf(),
                line: line_no + 1,
                source,
            }
        })?;
        records.push(record);
    }
    Ok(records)
}

/// Write records as compact JSONL, creating parent directories.
pub fn write_jsonl<T, P>(records: &[T], path: P) -> Result<()>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    ensure_parent(path)?;
    let mut out = String::new();
    for record in records {
        let line = serde_json::to_string(record).map_err(|source| {
            PipelineError::MalformedJson {
                path: path.to_path_buf(),
                source,
            }
        })?;
        out.push_str(&line);
        out.push('\n');
    }
    fs::write(path, out).map_err(|source| PipelineError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Fail with `MissingFile` unless `path` names an existing file.
pub fn require_file<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();
    if path.is_file() {
        Ok(())
    } else {
        Err(PipelineError::MissingFile {
            path: path.to_path_buf(),
        })
    }
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|source| PipelineError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }
    Ok(())
}

/// Existence checker for referenced artifacts such as dataset images.
///
/// Absolute paths are checked directly; relative paths are resolved against
/// each candidate base directory in order.
#[derive(Debug, Clone, Default)]
pub struct FileCheck {
    bases: Vec<PathBuf>,
}

impl FileCheck {
    pub fn new(bases: Vec<PathBuf>) -> Self {
        Self { bases }
    }

    pub fn exists(&self, path: &str) -> bool {
        let path = Path::new(path);
        if path.is_absolute() {
            return path.is_file();
        }
        self.bases.iter().any(|base| base.join(path).is_file())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Row {
        n: i64,
    }

    #[test]
    fn test_jsonl_roundtrip_skips_blank_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rows.jsonl");
        std::fs::write(&path, "{\"n\":1}\n\n{\"n\":2}\n").unwrap();

        let rows: Vec<Row> = read_jsonl(&path).unwrap();
        assert_eq!(rows, vec![Row { n: 1 }, Row { n: 2 }]);

        let out = dir.path().join("nested/out.jsonl");
        write_jsonl(&rows, &out).unwrap();
        let back: Vec<Row> = read_jsonl(&out).unwrap();
        assert_eq!(back, rows);
    }

    #[test]
    fn test_malformed_line_reports_position() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.jsonl");
        std::fs::write(&path, "{\"n\":1}\nnot json\n").unwrap();

        let err = read_jsonl::<Row, _>(&path).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("bad.jsonl"), "error should name the file: {msg}");
        assert!(msg.contains(":2:"), "error should carry the 1-based line: {msg}");
    }

    #[test]
    fn test_file_check_resolves_relative_against_bases() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("frame.png"), b"x").unwrap();

        let check = FileCheck::new(vec![dir.path().to_path_buf()]);
        assert!(check.exists("frame.png"));
        assert!(!check.exists("missing.png"));
        assert!(check.exists(&dir.path().join("frame.png").to_string_lossy()));
    }
}
