//! Glyphmatch Core - Data structures and the shape metric
//!
//! This crate provides the fundamental pieces of the one-shot glyph
//! classifier:
//!
//! - [`Bitmap`] - 8-bit intensity image container
//! - [`PointSet`] - 2D point collections extracted from bitmaps
//! - [`metric::modified_hausdorff`] - the shape distance
//!
//! Everything here is pure computation over in-memory values; image
//! decoding and file handling live in `glyphmatch-io`.

pub mod bitmap;
pub mod error;
pub mod metric;
pub mod pointset;

pub use bitmap::{Bitmap, DEFAULT_INK_THRESHOLD};
pub use error::{Error, Result};
pub use metric::modified_hausdorff;
pub use pointset::{PointSet, PointSetIter};
