//! Error types for glyphmatch-recog

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during classification and evaluation
#[derive(Debug, Error)]
pub enum Error {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] glyphmatch_core::Error),

    /// Classification attempted with no candidates
    #[error("no candidate examples to classify against")]
    EmptyCandidateSet,

    /// An image referenced by a run could not be read or decoded
    #[error("missing asset '{}': {source}", .path.display())]
    MissingAsset {
        path: PathBuf,
        source: glyphmatch_io::IoError,
    },

    /// A run's label file could not be read or parsed
    #[error("label file '{}': {source}", .path.display())]
    LabelFile {
        path: PathBuf,
        source: glyphmatch_io::IoError,
    },

    /// A run failed; carries the run identifier and the cause
    #[error("run '{run}' failed: {source}")]
    RunFailed { run: String, source: Box<Error> },

    /// An experiment was configured with no runs
    #[error("no runs to evaluate")]
    NoRuns,
}

/// Result type for recognition operations
pub type Result<T> = std::result::Result<T, Error>;
