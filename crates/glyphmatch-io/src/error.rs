//! I/O error types
//!
//! Provides a unified error type for all collaborator operations: image
//! decoding/encoding, label-pair parsing, and run discovery. Each
//! format-specific module maps its underlying library errors into
//! `IoError` variants so that callers only need to handle one error
//! type.

use thiserror::Error;

/// Error type for glyphmatch I/O operations.
#[derive(Error, Debug)]
pub enum IoError {
    /// Standard I/O error (file not found, permission denied, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The image format is not supported or not enabled via features
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// The image data is structurally invalid
    #[error("invalid image data: {0}")]
    InvalidData(String),

    /// A format-specific decoder returned an error
    #[error("decode error: {0}")]
    DecodeError(String),

    /// A format-specific encoder returned an error
    #[error("encode error: {0}")]
    EncodeError(String),

    /// A malformed line in a label-pair file
    #[error("parse error in {path} at line {line}: {message}")]
    ParseError {
        path: String,
        line: usize,
        message: String,
    },

    /// An error from the core library (e.g. zero image dimensions)
    #[error("core error: {0}")]
    Core(#[from] glyphmatch_core::Error),
}

/// Convenience alias for I/O results.
pub type IoResult<T> = Result<T, IoError>;
