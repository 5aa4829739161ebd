//! Single-run evaluation
//!
//! A run is one independent trial: an ordered list of `(test, train)`
//! image pairs with the training images doubling as the one-example
//! candidate pool. The evaluator classifies every test item against all
//! of the run's training images and reports the error rate.

use crate::classify::{LabeledExample, classify};
use crate::error::{Error, Result};
use glyphmatch_core::{DEFAULT_INK_THRESHOLD, PointSet};
use glyphmatch_io::PathPair;
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// One evaluation run: identifier, data root, and the ordered label
/// pairs. Paths inside the pairs are relative to the data root.
#[derive(Debug, Clone)]
pub struct RunSpec {
    id: String,
    root: PathBuf,
    pairs: Vec<PathPair>,
}

impl RunSpec {
    /// Create a run spec from already-parsed pairs.
    pub fn new(id: impl Into<String>, root: impl Into<PathBuf>, pairs: Vec<PathPair>) -> Self {
        Self {
            id: id.into(),
            root: root.into(),
            pairs,
        }
    }

    /// Load a run spec from `root/run_name/label_filename`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LabelFile`] if the label file is missing or
    /// malformed.
    pub fn load(root: &Path, run_name: &str, label_filename: &str) -> Result<Self> {
        let label_path = root.join(run_name).join(label_filename);
        let pairs = glyphmatch_io::read_pair_file(&label_path).map_err(|source| {
            Error::LabelFile {
                path: label_path.clone(),
                source,
            }
        })?;
        Ok(Self::new(run_name, root, pairs))
    }

    /// Get the run identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Get the label pairs.
    pub fn pairs(&self) -> &[PathPair] {
        &self.pairs
    }
}

/// Result of evaluating one run.
#[derive(Debug, Clone)]
pub struct RunResult {
    id: String,
    item_count: usize,
    misclassified: Vec<usize>,
    error_rate: f64,
}

impl RunResult {
    /// Build a result from the misclassified item indices.
    ///
    /// The error rate is `misclassified.len() / item_count * 100`.
    pub fn new(id: impl Into<String>, item_count: usize, misclassified: Vec<usize>) -> Self {
        debug_assert!(item_count > 0);
        debug_assert!(misclassified.len() <= item_count);
        let error_rate = misclassified.len() as f64 / item_count as f64 * 100.0;
        Self {
            id: id.into(),
            item_count,
            misclassified,
            error_rate,
        }
    }

    /// Get the run identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Get the number of test items in the run.
    pub fn item_count(&self) -> usize {
        self.item_count
    }

    /// Get the number of misclassified test items.
    pub fn miss_count(&self) -> usize {
        self.misclassified.len()
    }

    /// Get the indices of the misclassified test items, in pair order.
    pub fn misclassified(&self) -> &[usize] {
        &self.misclassified
    }

    /// Get the error rate as a percentage in [0, 100].
    pub fn error_rate(&self) -> f64 {
        self.error_rate
    }
}

impl fmt::Display for RunResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: error rate {:.1}%", self.id, self.error_rate)
    }
}

/// Evaluate one run.
///
/// Loads every referenced image once, extracts and centers its ink
/// point set, then classifies each test item against the run's training
/// images (labeled by their own path tokens, in label-file order). A
/// test item counts as correct when the winning training image is the
/// one it was paired with.
///
/// # Errors
///
/// * [`Error::EmptyCandidateSet`] if the run has no pairs.
/// * [`Error::MissingAsset`] if any referenced image cannot be read or
///   decoded. The run fails as a whole; skipping items would silently
///   bias the error rate.
pub fn evaluate_run(spec: &RunSpec) -> Result<RunResult> {
    if spec.pairs.is_empty() {
        return Err(Error::EmptyCandidateSet);
    }

    // Load each distinct image once
    let mut cache: HashMap<&str, PointSet> = HashMap::new();
    for pair in &spec.pairs {
        for path in [pair.test.as_str(), pair.train.as_str()] {
            if !cache.contains_key(path) {
                cache.insert(path, load_points(&spec.root, path)?);
            }
        }
    }

    // Candidate pool: distinct training images in first-occurrence order
    let mut candidates = Vec::with_capacity(spec.pairs.len());
    for pair in &spec.pairs {
        if candidates
            .iter()
            .all(|c: &LabeledExample| c.label() != pair.train)
        {
            candidates.push(LabeledExample::new(
                pair.train.clone(),
                cache[pair.train.as_str()].clone(),
            ));
        }
    }

    let mut misclassified = Vec::new();
    for (index, pair) in spec.pairs.iter().enumerate() {
        let probe = &cache[pair.test.as_str()];
        let m = classify(probe, &candidates)?;
        if m.label != pair.train {
            misclassified.push(index);
        }
    }

    Ok(RunResult::new(
        spec.id.clone(),
        spec.pairs.len(),
        misclassified,
    ))
}

/// Read one image and reduce it to a centered ink point set.
fn load_points(root: &Path, relative: &str) -> Result<PointSet> {
    let path = root.join(relative);
    let bitmap = glyphmatch_io::read_image(&path)
        .map_err(|source| Error::MissingAsset { path, source })?;
    Ok(bitmap.ink_points(DEFAULT_INK_THRESHOLD).centered())
}
