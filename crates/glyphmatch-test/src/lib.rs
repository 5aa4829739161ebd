//! glyphmatch-test - Regression test support
//!
//! Shared helpers for the workspace's integration tests:
//!
//! - [`RegParams`] - check accumulator that records every mismatch and
//!   reports a single verdict from `cleanup()`
//! - [`glyph_bitmap`] - build a bitmap from an ASCII-art pattern
//! - [`write_glyph`] - write a fixture glyph image to disk
//!
//! # Usage
//!
//! ```
//! use glyphmatch_test::{RegParams, glyph_bitmap};
//!
//! let mut rp = RegParams::new("doc");
//! let glyph = glyph_bitmap(&["#.", ".#"]).unwrap();
//! rp.compare_values(2.0, glyph.ink_points(128).len() as f64, 0.0);
//! assert!(rp.cleanup());
//! ```

mod error;
mod params;

pub use error::{TestError, TestResult};
pub use params::RegParams;

use glyphmatch_core::Bitmap;
use glyphmatch_io::ImageFormat;
use std::path::Path;

/// Build a bitmap from an ASCII-art pattern.
///
/// Each string is one row; `#` marks an ink pixel (intensity 0) and any
/// other character paper (intensity 255). All rows must have the same
/// length.
pub fn glyph_bitmap(pattern: &[&str]) -> TestResult<Bitmap> {
    let height = pattern.len();
    let width = pattern.first().map_or(0, |row| row.len());
    if height == 0 || width == 0 {
        return Err(TestError::InvalidPattern("empty pattern".to_string()));
    }
    if pattern.iter().any(|row| row.len() != width) {
        return Err(TestError::InvalidPattern(
            "rows have unequal lengths".to_string(),
        ));
    }

    let mut data = Vec::with_capacity(width * height);
    for row in pattern {
        for ch in row.chars() {
            data.push(if ch == '#' { 0 } else { 255 });
        }
    }
    Bitmap::from_raw(width as u32, height as u32, data)
        .map_err(|e| TestError::InvalidPattern(e.to_string()))
}

/// Write a fixture glyph image to disk as PNG, creating parent
/// directories as needed.
pub fn write_glyph<P: AsRef<Path>>(path: P, bitmap: &Bitmap) -> TestResult<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    glyphmatch_io::write_image(bitmap, path, ImageFormat::Png).map_err(|e| {
        TestError::ImageWrite {
            path: path.display().to_string(),
            message: e.to_string(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glyph_bitmap_pattern() {
        let bitmap = glyph_bitmap(&["#..", ".#.", "..#"]).unwrap();
        assert_eq!(bitmap.width(), 3);
        assert_eq!(bitmap.height(), 3);
        assert_eq!(bitmap.get_pixel(0, 0), Some(0));
        assert_eq!(bitmap.get_pixel(1, 0), Some(255));
        assert_eq!(bitmap.get_pixel(2, 2), Some(0));
    }

    #[test]
    fn test_glyph_bitmap_rejects_ragged_rows() {
        assert!(glyph_bitmap(&["##", "#"]).is_err());
        assert!(glyph_bitmap(&[]).is_err());
    }
}
