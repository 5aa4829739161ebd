//! PNM (Portable Any Map) format support
//!
//! Reads PBM (P4 binary) and PGM (P5 binary) as 8-bit intensity
//! bitmaps and writes PGM (P5). ASCII variants (P1/P2) and the color
//! formats (P3/P6) are detected but rejected; the run data never uses
//! them.

use crate::{IoError, IoResult};
use glyphmatch_core::Bitmap;
use std::io::{BufRead, Read, Write};

/// Read a PNM image (P4/P5) from a reader.
///
/// P4 bits map to intensities: 1 (set) is black ink (0), 0 is white
/// paper (255). P5 samples with a maxval below 255 are rescaled to the
/// full 8-bit range.
pub fn read_pnm<R: BufRead>(mut reader: R) -> IoResult<Bitmap> {
    let mut magic = [0u8; 2];
    reader.read_exact(&mut magic)?;

    match &magic {
        b"P4" => {
            let width = read_header_value(&mut reader)?;
            let height = read_header_value(&mut reader)?;
            let row_bytes = (width as usize).div_ceil(8);
            let mut packed = vec![0u8; row_bytes * height as usize];
            reader.read_exact(&mut packed)?;

            let mut pixels = Vec::with_capacity(width as usize * height as usize);
            for y in 0..height as usize {
                let row = &packed[y * row_bytes..(y + 1) * row_bytes];
                for x in 0..width as usize {
                    let bit = (row[x / 8] >> (7 - (x % 8))) & 1;
                    pixels.push(if bit == 1 { 0 } else { 255 });
                }
            }
            Bitmap::from_raw(width, height, pixels).map_err(IoError::Core)
        }
        b"P5" => {
            let width = read_header_value(&mut reader)?;
            let height = read_header_value(&mut reader)?;
            let maxval = read_header_value(&mut reader)?;
            if maxval == 0 || maxval > 255 {
                return Err(IoError::InvalidData(format!(
                    "unsupported PGM maxval: {}",
                    maxval
                )));
            }
            let mut pixels = vec![0u8; width as usize * height as usize];
            reader.read_exact(&mut pixels)?;
            if maxval != 255 {
                for p in &mut pixels {
                    *p = (*p as u32 * 255 / maxval) as u8;
                }
            }
            Bitmap::from_raw(width, height, pixels).map_err(IoError::Core)
        }
        b"P1" | b"P2" | b"P3" | b"P6" => Err(IoError::UnsupportedFormat(format!(
            "PNM variant {} not supported",
            String::from_utf8_lossy(&magic)
        ))),
        _ => Err(IoError::InvalidData("not a PNM file".to_string())),
    }
}

/// Write a bitmap as binary PGM (P5).
pub fn write_pnm<W: Write>(bitmap: &Bitmap, mut writer: W) -> IoResult<()> {
    write!(writer, "P5\n{} {}\n255\n", bitmap.width(), bitmap.height())?;
    writer.write_all(bitmap.pixels())?;
    Ok(())
}

/// Read the next decimal value from a PNM header, skipping whitespace
/// and `#` comment lines. Consumes the single whitespace byte that
/// terminates the value.
fn read_header_value<R: BufRead>(reader: &mut R) -> IoResult<u32> {
    let mut byte = [0u8; 1];

    // Skip whitespace and comments
    loop {
        reader.read_exact(&mut byte)?;
        match byte[0] {
            b' ' | b'\t' | b'\r' | b'\n' => continue,
            b'#' => {
                // Comment runs to end of line
                loop {
                    reader.read_exact(&mut byte)?;
                    if byte[0] == b'\n' {
                        break;
                    }
                }
            }
            _ => break,
        }
    }

    let mut value: u32 = 0;
    let mut seen_digit = false;
    loop {
        match byte[0] {
            b'0'..=b'9' => {
                seen_digit = true;
                value = value
                    .checked_mul(10)
                    .and_then(|v| v.checked_add((byte[0] - b'0') as u32))
                    .ok_or_else(|| {
                        IoError::InvalidData("PNM header value overflow".to_string())
                    })?;
            }
            b' ' | b'\t' | b'\r' | b'\n' if seen_digit => return Ok(value),
            other => {
                return Err(IoError::InvalidData(format!(
                    "unexpected byte 0x{:02x} in PNM header",
                    other
                )));
            }
        }
        reader.read_exact(&mut byte)?;
    }
}
