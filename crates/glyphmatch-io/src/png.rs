//! PNG image format support
//!
//! Decodes any PNG color layout to an 8-bit intensity [`Bitmap`] and
//! encodes bitmaps as 8-bit grayscale PNG. Color and palette images are
//! reduced to intensity at decode time; the classifier only ever looks
//! at ink-versus-paper.

use crate::{IoError, IoResult};
use glyphmatch_core::Bitmap;
use png::{BitDepth, ColorType, Decoder, Encoder};
use std::io::{BufRead, Seek, Write};

/// ITU-R 601 luma from 8-bit RGB.
#[inline]
fn luma(r: u8, g: u8, b: u8) -> u8 {
    ((r as u32 * 77 + g as u32 * 150 + b as u32 * 29) >> 8) as u8
}

/// Read a PNG image as an 8-bit intensity bitmap.
pub fn read_png<R: BufRead + Seek>(reader: R) -> IoResult<Bitmap> {
    let decoder = Decoder::new(reader);
    let mut reader = decoder
        .read_info()
        .map_err(|e| IoError::DecodeError(format!("PNG decode error: {}", e)))?;

    let info = reader.info();
    let width = info.width;
    let height = info.height;
    let color_type = info.color_type;
    let bit_depth = info.bit_depth;

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("failed to get output buffer size".to_string()))?;
    let mut buf = vec![0; buf_size];
    let output_info = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::DecodeError(format!("PNG frame error: {}", e)))?;

    // Palette lookup table for indexed images, flattened RGB triples
    let palette: Option<Vec<u8>> = reader
        .info()
        .palette
        .as_ref()
        .map(|p| p.as_ref().to_vec());

    let bytes_per_row = output_info.line_size;
    let data = &buf[..output_info.buffer_size()];

    let mut pixels = Vec::with_capacity(width as usize * height as usize);

    // Resolve an index through the palette, or scale gray to 8 bits
    let resolve = |val: u32, levels: u32| -> IoResult<u8> {
        if let Some(palette) = palette.as_deref() {
            let base = val as usize * 3;
            if base + 2 >= palette.len() {
                return Err(IoError::DecodeError(format!(
                    "palette index {} out of range",
                    val
                )));
            }
            Ok(luma(palette[base], palette[base + 1], palette[base + 2]))
        } else {
            Ok((val * 255 / (levels - 1)) as u8)
        }
    };

    match (color_type, bit_depth) {
        (ColorType::Grayscale, BitDepth::One) | (ColorType::Indexed, BitDepth::One) => {
            for y in 0..height {
                let row_start = y as usize * bytes_per_row;
                for x in 0..width {
                    let byte_idx = row_start + (x / 8) as usize;
                    let bit_idx = 7 - (x % 8);
                    let val = ((data[byte_idx] >> bit_idx) & 1) as u32;
                    pixels.push(resolve(val, 2)?);
                }
            }
        }
        (ColorType::Grayscale, BitDepth::Two) | (ColorType::Indexed, BitDepth::Two) => {
            for y in 0..height {
                let row_start = y as usize * bytes_per_row;
                for x in 0..width {
                    let byte_idx = row_start + (x / 4) as usize;
                    let shift = 6 - ((x % 4) * 2);
                    let val = ((data[byte_idx] >> shift) & 3) as u32;
                    pixels.push(resolve(val, 4)?);
                }
            }
        }
        (ColorType::Grayscale, BitDepth::Four) | (ColorType::Indexed, BitDepth::Four) => {
            for y in 0..height {
                let row_start = y as usize * bytes_per_row;
                for x in 0..width {
                    let byte_idx = row_start + (x / 2) as usize;
                    let val = if x % 2 == 0 {
                        (data[byte_idx] >> 4) & 0xF
                    } else {
                        data[byte_idx] & 0xF
                    } as u32;
                    pixels.push(resolve(val, 16)?);
                }
            }
        }
        (ColorType::Grayscale, BitDepth::Eight) | (ColorType::Indexed, BitDepth::Eight) => {
            for y in 0..height {
                let row_start = y as usize * bytes_per_row;
                for x in 0..width {
                    let val = data[row_start + x as usize] as u32;
                    pixels.push(resolve(val, 256)?);
                }
            }
        }
        (ColorType::Grayscale, BitDepth::Sixteen) => {
            for y in 0..height {
                let row_start = y as usize * bytes_per_row;
                for x in 0..width {
                    // High byte carries the significant bits
                    pixels.push(data[row_start + x as usize * 2]);
                }
            }
        }
        (ColorType::GrayscaleAlpha, _) => {
            let samples = if bit_depth == BitDepth::Sixteen { 4 } else { 2 };
            for y in 0..height {
                let row_start = y as usize * bytes_per_row;
                for x in 0..width {
                    pixels.push(data[row_start + x as usize * samples]);
                }
            }
        }
        (ColorType::Rgb, _) => {
            let samples = if bit_depth == BitDepth::Sixteen { 6 } else { 3 };
            for y in 0..height {
                let row_start = y as usize * bytes_per_row;
                for x in 0..width {
                    let idx = row_start + (x as usize * samples);
                    let (r, g, b) = if bit_depth == BitDepth::Sixteen {
                        (data[idx], data[idx + 2], data[idx + 4])
                    } else {
                        (data[idx], data[idx + 1], data[idx + 2])
                    };
                    pixels.push(luma(r, g, b));
                }
            }
        }
        (ColorType::Rgba, _) => {
            let samples = if bit_depth == BitDepth::Sixteen { 8 } else { 4 };
            for y in 0..height {
                let row_start = y as usize * bytes_per_row;
                for x in 0..width {
                    let idx = row_start + (x as usize * samples);
                    let (r, g, b) = if bit_depth == BitDepth::Sixteen {
                        (data[idx], data[idx + 2], data[idx + 4])
                    } else {
                        (data[idx], data[idx + 1], data[idx + 2])
                    };
                    pixels.push(luma(r, g, b));
                }
            }
        }
        _ => {
            return Err(IoError::UnsupportedFormat(format!(
                "unsupported PNG format: {:?} {:?}",
                color_type, bit_depth
            )));
        }
    }

    Bitmap::from_raw(width, height, pixels).map_err(IoError::Core)
}

/// Write a bitmap as an 8-bit grayscale PNG.
pub fn write_png<W: Write>(bitmap: &Bitmap, writer: W) -> IoResult<()> {
    let mut encoder = Encoder::new(writer, bitmap.width(), bitmap.height());
    encoder.set_color(ColorType::Grayscale);
    encoder.set_depth(BitDepth::Eight);

    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(format!("PNG header error: {}", e)))?;

    writer
        .write_image_data(bitmap.pixels())
        .map_err(|e| IoError::EncodeError(format!("PNG write error: {}", e)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_png_roundtrip_grayscale() {
        let bitmap = Bitmap::from_fn(10, 10, |x, y| ((x + y) * 10) as u8).unwrap();

        let mut buffer = Vec::new();
        write_png(&bitmap, &mut buffer).unwrap();

        let decoded = read_png(Cursor::new(buffer)).unwrap();
        assert_eq!(decoded.width(), 10);
        assert_eq!(decoded.height(), 10);
        assert_eq!(decoded, bitmap);
    }

    #[test]
    fn test_png_decode_rgb_to_intensity() {
        // Author a 2x1 RGB image with a black and a white pixel
        let mut buffer = Vec::new();
        {
            let mut encoder = Encoder::new(&mut buffer, 2, 1);
            encoder.set_color(ColorType::Rgb);
            encoder.set_depth(BitDepth::Eight);
            let mut writer = encoder.write_header().unwrap();
            writer.write_image_data(&[0, 0, 0, 255, 255, 255]).unwrap();
        }

        let decoded = read_png(Cursor::new(buffer)).unwrap();
        assert_eq!(decoded.get_pixel(0, 0), Some(0));
        // Luma of pure white: (77 + 150 + 29) * 255 / 256
        assert_eq!(decoded.get_pixel(1, 0), Some(255));
    }

    #[test]
    fn test_png_decode_one_bit() {
        // Author a 9x1 1-bit grayscale image: first pixel black, rest white
        let mut buffer = Vec::new();
        {
            let mut encoder = Encoder::new(&mut buffer, 9, 1);
            encoder.set_color(ColorType::Grayscale);
            encoder.set_depth(BitDepth::One);
            let mut writer = encoder.write_header().unwrap();
            writer.write_image_data(&[0b0111_1111, 0b1000_0000]).unwrap();
        }

        let decoded = read_png(Cursor::new(buffer)).unwrap();
        assert_eq!(decoded.width(), 9);
        assert_eq!(decoded.get_pixel(0, 0), Some(0));
        for x in 1..9 {
            assert_eq!(decoded.get_pixel(x, 0), Some(255));
        }
    }
}
