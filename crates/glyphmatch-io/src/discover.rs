//! Run discovery
//!
//! Enumerates the run subdirectories of a data root in stable lexical
//! order, so experiments are reproducible regardless of filesystem
//! iteration order.

use crate::IoResult;
use std::fs;
use std::path::{Path, PathBuf};

/// List the subdirectories of `root` in lexical order of their names.
///
/// Non-directory entries are skipped; the run evaluator decides whether
/// a directory actually holds a valid run (label file present).
pub fn discover_runs<P: AsRef<Path>>(root: P) -> IoResult<Vec<PathBuf>> {
    let mut dirs = Vec::new();
    for entry in fs::read_dir(root)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            dirs.push(entry.path());
        }
    }
    dirs.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(dirs)
}
