//! Nearest-match classification
//!
//! One-shot decision rule: the probe takes the label of whichever
//! candidate point set is nearest under the modified Hausdorff distance.

use crate::error::{Error, Result};
use glyphmatch_core::{PointSet, modified_hausdorff};

/// A candidate point set tagged with its class label.
#[derive(Debug, Clone)]
pub struct LabeledExample {
    label: String,
    points: PointSet,
}

impl LabeledExample {
    /// Create a labeled example.
    pub fn new(label: impl Into<String>, points: PointSet) -> Self {
        Self {
            label: label.into(),
            points,
        }
    }

    /// Get the class label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Get the point set.
    pub fn points(&self) -> &PointSet {
        &self.points
    }
}

/// Best-match result of one classification.
#[derive(Debug, Clone)]
pub struct Match {
    /// Index of the winning candidate
    pub index: usize,
    /// Label of the winning candidate
    pub label: String,
    /// Distance from the probe to the winning candidate
    pub distance: f64,
}

/// Classify a probe against an ordered candidate collection.
///
/// Evaluates the modified Hausdorff distance once per candidate and
/// returns the candidate with the minimum distance. Ties are broken by
/// candidate order: the comparison is strict, so the first candidate at
/// the minimum distance wins. This makes the result deterministic for a
/// given candidate ordering.
///
/// # Errors
///
/// Returns [`Error::EmptyCandidateSet`] if `candidates` is empty;
/// classification is undefined with no references.
pub fn classify(probe: &PointSet, candidates: &[LabeledExample]) -> Result<Match> {
    let mut best: Option<Match> = None;

    for (index, candidate) in candidates.iter().enumerate() {
        let distance = modified_hausdorff(probe, candidate.points());
        let better = match &best {
            None => true,
            Some(current) => distance < current.distance,
        };
        if better {
            best = Some(Match {
                index,
                label: candidate.label.clone(),
                distance,
            });
        }
    }

    best.ok_or(Error::EmptyCandidateSet)
}
