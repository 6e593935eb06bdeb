use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the pipeline core.
///
/// Configuration and malformed-record errors unwind immediately; consistency
/// findings never travel through this type, they are accumulated into the
/// run report instead (see `validate`).
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON at {}:{line}: {source}", path.display())]
    MalformedLine {
        path: PathBuf,
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    MalformedJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("malformed record in {}: {reason}", path.display())]
    MalformedRecord { path: PathBuf, reason: String },

    #[error("missing required file: {}", path.display())]
    MissingFile { path: PathBuf },

    #[error("frame read failed: {0}")]
    FrameRead(String),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("empty input: {0}")]
    EmptyInput(String),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
