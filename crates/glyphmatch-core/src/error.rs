//! Error types for glyphmatch-core
//!
//! Provides a unified error type for all operations in the core crate.
//! Each variant captures enough context for diagnostics without exposing
//! internal implementation details.

use thiserror::Error;

/// Glyphmatch core error type
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid image dimensions
    #[error("invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// Pixel buffer does not match the declared dimensions
    #[error("pixel buffer length mismatch: expected {expected}, got {actual}")]
    BufferLengthMismatch { expected: usize, actual: usize },

    /// Index out of bounds
    #[error("index out of bounds: {index} >= {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Coordinate vectors of unequal length
    #[error("coordinate length mismatch: {x_len} x-coords vs {y_len} y-coords")]
    CoordinateLengthMismatch { x_len: usize, y_len: usize },
}

/// Result type alias for glyphmatch-core operations
pub type Result<T> = std::result::Result<T, Error>;
