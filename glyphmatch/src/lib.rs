//! Glyphmatch - One-shot handwritten character classification
//!
//! Given a single labeled example per class, glyphmatch predicts the
//! class of an unseen character by nearest-neighbor matching under a
//! modified Hausdorff distance between ink point sets, and evaluates
//! the decision rule over many independent runs.
//!
//! # Overview
//!
//! - Image decoding to intensity bitmaps (PNG, PNM)
//! - Ink point-set extraction and centering
//! - Modified Hausdorff distance
//! - Nearest-match classification with deterministic tie-breaking
//! - Multi-run evaluation with aggregated error rates
//!
//! # Example
//!
//! ```
//! use glyphmatch::{PointSet, modified_hausdorff};
//!
//! let a: PointSet = [(0.0, 0.0), (1.0, 0.0)].into_iter().collect();
//! assert_eq!(modified_hausdorff(&a, &a), 0.0);
//! ```

// Re-export core types (primary data structures used everywhere)
pub use glyphmatch_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use glyphmatch_io as io;
pub use glyphmatch_recog as recog;
