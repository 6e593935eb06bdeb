//! # kifu_core - Session Replay Reconciliation Engine
//!
//! This library turns raw interaction logs from an instrumented session
//! (pointer taps on a board, device-clock timestamps) plus a recording of
//! the same session into a normalized action log ("kifu"), builds a labeled
//! dataset from it, trains and scores a frequency-based action predictor,
//! and cross-validates all derived artifacts.
//!
//! ## Pipeline
//!
//! ```text
//! ops.jsonl ──(extract: project + normalize + quantize)──▶ kifu.jsonl
//! kifu.jsonl ──(build: frame crop per action)──▶ dataset.jsonl + frames/
//! dataset.jsonl ──(train)──▶ policy model ──(predict / score)
//! ops + kifu + dataset ──(validate)──▶ run report
//! ```
//!
//! Everything is single-threaded, batch-oriented, and keyed by the derived
//! per-run sequence number; see `validate` for the consistency rules.

pub mod dataset;
pub mod error;
pub mod extract;
pub mod geom;
pub mod io;
pub mod kifu;
pub mod matcher;
pub mod meta;
pub mod ops;
pub mod phase;
pub mod policy;
pub mod stats;
pub mod sync;
pub mod validate;
pub mod video;

pub use error::{PipelineError, Result};

// Re-export configuration and record types
pub use dataset::{decode_sample_id, encode_sample_id, DatasetSample, SampleLabel, DATASET_SCHEMA};
pub use kifu::{
    GridPos, KifuEvent, LabelKey, NormPos, TimedLabel, ACTOR_SELF, EVENT_TYPE_ACTION, KIFU_SCHEMA,
};
pub use meta::{RoiRect, RunMeta};
pub use ops::{RawOp, KIND_TAP};

// Re-export the reconciliation engine
pub use extract::{extract_actions, ExtractOptions, ExtractStats};
pub use matcher::{match_streams, DeltaSummary, MatchOutcome, ScoreReport, KIFU_SCORE_SCHEMA};
pub use sync::{project, SyncWindow};
pub use validate::{validate_run, RunReport, ValidateOptions, RUN_CHECK_SCHEMA};

// Re-export the policy model
pub use policy::{
    predict, score as score_policy, train as train_policy, PolicyLabel, PolicyModel,
    PolicyScoreReport, Prediction, POLICY_SCHEMA, POLICY_SCORE_SCHEMA,
};

// Re-export collaborator interfaces
pub use io::FileCheck;
pub use phase::{check_phase, PhaseCheck, PhaseReport, PhaseThresholds, PHASE_CHECK_SCHEMA};
pub use video::{FrameDir, VideoInfo, VideoSource, VIDEO_INFO_FILE};
