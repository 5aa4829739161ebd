//! Multi-run experiments
//!
//! Repeats run evaluation over N independent runs and aggregates the
//! per-run error rates into a mean. Runs share no mutable state, so
//! they may optionally execute in parallel; results are always
//! collected in run order to keep the report deterministic.

use crate::error::{Error, Result};
use crate::run::{RunResult, RunSpec, evaluate_run};
use rayon::prelude::*;
use std::fmt;
use std::path::{Path, PathBuf};

/// Default number of runs in an experiment.
pub const DEFAULT_RUN_COUNT: usize = 20;

/// Default label filename inside each run directory.
pub const DEFAULT_LABEL_FILENAME: &str = "class_labels.txt";

/// Experiment configuration.
///
/// Replaces ad-hoc global settings with an explicit value handed to
/// [`run_experiment`].
///
/// # Examples
///
/// ```no_run
/// use glyphmatch_recog::ExperimentConfig;
///
/// let config = ExperimentConfig::new("all_runs")
///     .with_run_count(5)
///     .with_parallel(true);
/// ```
#[derive(Debug, Clone)]
pub struct ExperimentConfig {
    data_root: PathBuf,
    run_count: Option<usize>,
    label_filename: String,
    parallel: bool,
}

impl ExperimentConfig {
    /// Create a configuration for the given data root, with the
    /// defaults: 20 runs named `run01..run20`, label file
    /// `class_labels.txt`, sequential execution.
    pub fn new(data_root: impl Into<PathBuf>) -> Self {
        Self {
            data_root: data_root.into(),
            run_count: Some(DEFAULT_RUN_COUNT),
            label_filename: DEFAULT_LABEL_FILENAME.to_string(),
            parallel: false,
        }
    }

    /// Use `run01..runNN` naming with the given run count.
    pub fn with_run_count(mut self, count: usize) -> Self {
        self.run_count = Some(count);
        self
    }

    /// Discover run directories under the data root (lexical order)
    /// instead of assuming `runNN` names.
    pub fn with_discovery(mut self) -> Self {
        self.run_count = None;
        self
    }

    /// Use a different label filename inside each run directory.
    pub fn with_label_filename(mut self, name: impl Into<String>) -> Self {
        self.label_filename = name.into();
        self
    }

    /// Evaluate runs on the rayon thread pool. The report order is
    /// unchanged: results are collected by run index, not completion
    /// order.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Get the data root.
    pub fn data_root(&self) -> &Path {
        &self.data_root
    }

    /// Resolve the ordered run names this configuration selects.
    pub fn run_names(&self) -> Result<Vec<String>> {
        match self.run_count {
            Some(count) => Ok((1..=count).map(|i| format!("run{:02}", i)).collect()),
            None => {
                let dirs = glyphmatch_io::discover_runs(&self.data_root).map_err(|source| {
                    Error::MissingAsset {
                        path: self.data_root.clone(),
                        source,
                    }
                })?;
                Ok(dirs
                    .iter()
                    .filter_map(|p| p.file_name())
                    .map(|n| n.to_string_lossy().into_owned())
                    .collect())
            }
        }
    }
}

/// Lifecycle of one run inside an experiment.
///
/// Valid transitions are `Pending -> Running -> Completed` and
/// `Running -> Failed`. The experiment as a whole is complete only when
/// every run reaches `Completed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    /// Not yet started
    #[default]
    Pending,
    /// Evaluation in progress
    Running,
    /// Evaluated successfully
    Completed,
    /// Evaluation failed
    Failed,
}

impl RunState {
    /// Whether a transition to `next` is allowed.
    pub fn can_transition(self, next: RunState) -> bool {
        matches!(
            (self, next),
            (RunState::Pending, RunState::Running)
                | (RunState::Running, RunState::Completed)
                | (RunState::Running, RunState::Failed)
        )
    }
}

/// Aggregated outcome of an experiment.
#[derive(Debug, Clone)]
pub struct ExperimentResult {
    runs: Vec<RunResult>,
    mean_error_rate: f64,
}

impl ExperimentResult {
    /// Build a result from completed runs.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoRuns`] if `runs` is empty; a mean over zero
    /// runs is undefined.
    pub fn new(runs: Vec<RunResult>) -> Result<Self> {
        if runs.is_empty() {
            return Err(Error::NoRuns);
        }
        let mean_error_rate =
            runs.iter().map(RunResult::error_rate).sum::<f64>() / runs.len() as f64;
        Ok(Self {
            runs,
            mean_error_rate,
        })
    }

    /// Get the per-run results, in run order.
    pub fn runs(&self) -> &[RunResult] {
        &self.runs
    }

    /// Get the arithmetic mean of the per-run error rates.
    pub fn mean_error_rate(&self) -> f64 {
        self.mean_error_rate
    }
}

impl fmt::Display for ExperimentResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for run in &self.runs {
            writeln!(f, "{}", run)?;
        }
        write!(
            f,
            "average error rate across {} runs: {:.1}%",
            self.runs.len(),
            self.mean_error_rate
        )
    }
}

/// Execute every run selected by the configuration and aggregate the
/// error rates.
///
/// Runs execute in order (or in parallel when configured; see
/// [`ExperimentConfig::with_parallel`]). The first failing run aborts
/// the experiment with [`Error::RunFailed`] naming that run; a partial
/// mean over the surviving runs is never reported.
pub fn run_experiment(config: &ExperimentConfig) -> Result<ExperimentResult> {
    let names = config.run_names()?;
    if names.is_empty() {
        return Err(Error::NoRuns);
    }

    let mut states = vec![RunState::Pending; names.len()];
    let mut results = Vec::with_capacity(names.len());

    if config.parallel {
        // Evaluate concurrently, then settle states by run index so the
        // first failure in run order wins, not the first to finish.
        let outcomes: Vec<Result<RunResult>> = names
            .par_iter()
            .map(|name| evaluate_named_run(config, name))
            .collect();
        for (index, outcome) in outcomes.into_iter().enumerate() {
            states[index] = RunState::Running;
            match outcome {
                Ok(result) => {
                    states[index] = RunState::Completed;
                    results.push(result);
                }
                Err(source) => {
                    states[index] = RunState::Failed;
                    return Err(Error::RunFailed {
                        run: names[index].clone(),
                        source: Box::new(source),
                    });
                }
            }
        }
    } else {
        for (index, name) in names.iter().enumerate() {
            states[index] = RunState::Running;
            match evaluate_named_run(config, name) {
                Ok(result) => {
                    states[index] = RunState::Completed;
                    results.push(result);
                }
                Err(source) => {
                    states[index] = RunState::Failed;
                    return Err(Error::RunFailed {
                        run: name.clone(),
                        source: Box::new(source),
                    });
                }
            }
        }
    }

    debug_assert!(states.iter().all(|s| *s == RunState::Completed));
    ExperimentResult::new(results)
}

fn evaluate_named_run(config: &ExperimentConfig, name: &str) -> Result<RunResult> {
    let spec = RunSpec::load(&config.data_root, name, &config.label_filename)?;
    evaluate_run(&spec)
}
