//! Glyphmatch Recog - One-shot classification and evaluation
//!
//! The decision rule and the evaluation harness:
//!
//! - [`classify`] - nearest-match decision over labeled point sets
//! - [`RunSpec`] / [`evaluate_run`] - one independent trial
//! - [`ExperimentConfig`] / [`run_experiment`] - N-run experiments with
//!   aggregated error rates
//!
//! Classification itself is pure; only the run/experiment layer touches
//! the filesystem, through the `glyphmatch-io` collaborators.

pub mod classify;
pub mod error;
pub mod experiment;
pub mod run;

pub use classify::{LabeledExample, Match, classify};
pub use error::{Error, Result};
pub use experiment::{
    DEFAULT_LABEL_FILENAME, DEFAULT_RUN_COUNT, ExperimentConfig, ExperimentResult, RunState,
    run_experiment,
};
pub use run::{RunResult, RunSpec, evaluate_run};
