//! Glyphmatch I/O - decoding and file collaborators
//!
//! Everything the classification core needs from the filesystem lives
//! here, behind small free functions:
//!
//! - [`read_image`] / [`write_image`] - image decoding to intensity
//!   bitmaps, with format detection by magic number
//! - [`read_pair_file`] - the `test train` label pairs of one run
//! - [`discover_runs`] - run subdirectories of a data root
//!
//! The core crates never touch paths; keeping the collaborators here
//! leaves the distance and classification logic unit-testable with
//! in-memory point sets.

mod discover;
mod error;
mod format;
mod pairs;
#[cfg(feature = "png-format")]
mod png;
#[cfg(feature = "pnm")]
mod pnm;

pub use discover::discover_runs;
pub use error::{IoError, IoResult};
pub use format::{ImageFormat, detect_format, detect_format_from_bytes};
pub use pairs::{PathPair, read_pair_file};
#[cfg(feature = "png-format")]
pub use png::{read_png, write_png};
#[cfg(feature = "pnm")]
pub use pnm::{read_pnm, write_pnm};

use glyphmatch_core::Bitmap;
use std::fs::File;
use std::io::{BufWriter, Cursor};
use std::path::Path;

/// Read an image file as an 8-bit intensity bitmap.
///
/// The format is detected from the file's magic number, not its
/// extension.
pub fn read_image<P: AsRef<Path>>(path: P) -> IoResult<Bitmap> {
    let data = std::fs::read(path)?;
    match detect_format_from_bytes(&data)? {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => read_png(Cursor::new(data)),
        #[cfg(feature = "pnm")]
        ImageFormat::Pnm => read_pnm(Cursor::new(data)),
        #[allow(unreachable_patterns)]
        other => Err(IoError::UnsupportedFormat(format!(
            "{:?} support not compiled in",
            other
        ))),
    }
}

/// Write a bitmap to a file in the given format.
pub fn write_image<P: AsRef<Path>>(
    bitmap: &Bitmap,
    path: P,
    format: ImageFormat,
) -> IoResult<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => write_png(bitmap, writer),
        #[cfg(feature = "pnm")]
        ImageFormat::Pnm => write_pnm(bitmap, writer),
        #[allow(unreachable_patterns)]
        other => Err(IoError::UnsupportedFormat(format!(
            "{:?} support not compiled in",
            other
        ))),
    }
}
