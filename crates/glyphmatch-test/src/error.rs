//! Error types for the test framework

use thiserror::Error;

/// Errors that can occur while building test fixtures
#[derive(Debug, Error)]
pub enum TestError {
    /// Failed to write a fixture image
    #[error("failed to write image '{path}': {message}")]
    ImageWrite { path: String, message: String },

    /// A fixture glyph pattern was malformed
    #[error("invalid glyph pattern: {0}")]
    InvalidPattern(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for test operations
pub type TestResult<T> = Result<T, TestError>;
