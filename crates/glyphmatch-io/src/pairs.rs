//! Label-pair files
//!
//! Each run directory carries a label file with one `test train` pair
//! per line, paths relative to the data root. The pair order is
//! authoritative: it defines both the ground truth (a test item's true
//! class is its paired training image) and the iteration order of the
//! evaluator.

use crate::{IoError, IoResult};
use std::fs;
use std::path::Path;

/// One line of a label file: a test image path and the training image
/// path it is paired with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPair {
    /// Test image path, relative to the data root
    pub test: String,
    /// Paired training image path, relative to the data root
    pub train: String,
}

/// Read a label file into its ordered `(test, train)` pairs.
///
/// Blank lines are ignored. Any non-blank line that does not split into
/// exactly two whitespace-separated tokens fails with
/// [`IoError::ParseError`] carrying the 1-based line number.
pub fn read_pair_file<P: AsRef<Path>>(path: P) -> IoResult<Vec<PathPair>> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let mut pairs = Vec::new();
    for (idx, line) in contents.lines().enumerate() {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        match tokens.as_slice() {
            [] => continue,
            [test, train] => pairs.push(PathPair {
                test: (*test).to_string(),
                train: (*train).to_string(),
            }),
            other => {
                return Err(IoError::ParseError {
                    path: path.display().to_string(),
                    line: idx + 1,
                    message: format!("expected 2 tokens, found {}", other.len()),
                });
            }
        }
    }

    Ok(pairs)
}
