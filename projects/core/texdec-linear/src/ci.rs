//! Palette-indexed linear decoders: CI4, CI8 and 1bpp monochrome.
//!
//! All indexed output is CI8: CI4 nibbles are widened to one byte per pixel
//! and monochrome bits become indices into a two-entry palette. The caller
//! supplies the raw palette; it is converted with the same pixel kernels as
//! the linear RGB decoders, and the first fully transparent entry is
//! recorded as the surface's transparent index.

use likely_stable::unlikely;
use texdec_common::pixel_convert::*;
use texdec_common::{DecodeError, PixelFormat, SignificantBits, Surface, SurfaceFormat};

use crate::util::{read_u16_le, read_u32_le};

/// Converts `entries` raw palette colors into ARGB32.
///
/// Returns the first fully transparent index (if any) and the
/// significant-bits record for the palette format.
fn convert_palette(
    px_format: PixelFormat,
    pal_buf: &[u8],
    palette: &mut [u32],
) -> Result<(Option<u8>, SignificantBits), DecodeError> {
    use PixelFormat::*;

    let entries = palette.len();
    let entry_bytes = match px_format {
        Rgb888 => 3,
        Bgr888Abgr7888 | Argb8888 | Bgra8888 | Xrgb8888 | Bgrx8888 => 4,
        _ => 2,
    };
    let expected = entries * entry_bytes;
    if unlikely(pal_buf.len() < expected) {
        return Err(DecodeError::PaletteTooSmall { expected, actual: pal_buf.len() });
    }

    let sbit = match px_format {
        Argb1555 => {
            for (i, dest) in palette.iter_mut().enumerate() {
                *dest = argb1555_to_argb32(read_u16_le(pal_buf, i * 2));
            }
            SignificantBits::new(5, 5, 5, 0, 1)
        }
        Rgb555 => {
            for (i, dest) in palette.iter_mut().enumerate() {
                *dest = rgb555_to_argb32(read_u16_le(pal_buf, i * 2));
            }
            SignificantBits::new(5, 5, 5, 0, 0)
        }
        Rgb565 => {
            for (i, dest) in palette.iter_mut().enumerate() {
                *dest = rgb565_to_argb32(read_u16_le(pal_buf, i * 2));
            }
            SignificantBits::new(5, 6, 5, 0, 0)
        }
        Argb4444 => {
            for (i, dest) in palette.iter_mut().enumerate() {
                *dest = argb4444_to_argb32(read_u16_le(pal_buf, i * 2));
            }
            SignificantBits::new(4, 4, 4, 0, 4)
        }
        Rgba4444 => {
            for (i, dest) in palette.iter_mut().enumerate() {
                *dest = rgba4444_to_argb32(read_u16_le(pal_buf, i * 2));
            }
            SignificantBits::new(4, 4, 4, 0, 4)
        }
        Bgr555 => {
            for (i, dest) in palette.iter_mut().enumerate() {
                *dest = bgr555_to_argb32(read_u16_le(pal_buf, i * 2));
            }
            SignificantBits::new(5, 5, 5, 0, 0)
        }
        Bgr555Ps1 => {
            // A $0000 color is fully transparent on PS1.
            for (i, dest) in palette.iter_mut().enumerate() {
                let px = read_u16_le(pal_buf, i * 2);
                *dest = if px == 0 { 0 } else { bgr555_to_argb32(px) };
            }
            SignificantBits::new(5, 5, 5, 0, 0)
        }
        Bgr5A3 => {
            for (i, dest) in palette.iter_mut().enumerate() {
                *dest = bgr5a3_to_argb32(read_u16_le(pal_buf, i * 2));
            }
            SignificantBits::new(5, 5, 5, 0, 4)
        }
        Bgr888Abgr7888 => {
            for (i, dest) in palette.iter_mut().enumerate() {
                *dest = bgr888_abgr7888_to_argb32(read_u32_le(pal_buf, i * 4));
            }
            SignificantBits::new(8, 8, 8, 0, 8)
        }
        Rgb888 => {
            // 24-bit palette entries, stored B, G, R.
            for (i, dest) in palette.iter_mut().enumerate() {
                let p = &pal_buf[i * 3..i * 3 + 3];
                *dest = 0xFF000000 | ((p[2] as u32) << 16) | ((p[1] as u32) << 8) | (p[0] as u32);
            }
            SignificantBits::new(8, 8, 8, 0, 0)
        }
        Argb8888 => {
            for (i, dest) in palette.iter_mut().enumerate() {
                *dest = read_u32_le(pal_buf, i * 4);
            }
            SignificantBits::new(8, 8, 8, 0, 8)
        }
        Bgra8888 => {
            for (i, dest) in palette.iter_mut().enumerate() {
                *dest = read_u32_le(pal_buf, i * 4).swap_bytes();
            }
            SignificantBits::new(8, 8, 8, 0, 8)
        }
        Xrgb8888 => {
            for (i, dest) in palette.iter_mut().enumerate() {
                *dest = read_u32_le(pal_buf, i * 4) | 0xFF000000;
            }
            SignificantBits::new(8, 8, 8, 0, 0)
        }
        Bgrx8888 => {
            for (i, dest) in palette.iter_mut().enumerate() {
                *dest = read_u32_le(pal_buf, i * 4).swap_bytes() | 0xFF000000;
            }
            SignificantBits::new(8, 8, 8, 0, 0)
        }
        _ => return Err(DecodeError::UnsupportedPixelFormat(px_format)),
    };

    let tr_idx = palette
        .iter()
        .position(|&px| px >> 24 == 0)
        .map(|i| i as u8);
    Ok((tr_idx, sbit))
}

/// Decodes a linear CI4 image to a CI8 surface.
///
/// `msn_left`: if true, the most significant nybble of each byte is the left
/// pixel. The palette holds 16 entries in `px_format` layout.
pub fn from_linear_ci4(
    px_format: PixelFormat,
    msn_left: bool,
    width: usize,
    height: usize,
    src: &[u8],
    pal_buf: &[u8],
) -> Result<Surface, DecodeError> {
    if unlikely(width == 0 || height == 0) {
        return Err(DecodeError::InvalidDimensions { width, height });
    }
    // Two pixels per byte.
    if unlikely(width % 2 != 0) {
        return Err(DecodeError::TileGranularity {
            width,
            height,
            tile_width: 2,
            tile_height: 1,
        });
    }
    let expected = width * height / 2;
    if unlikely(src.len() < expected) {
        return Err(DecodeError::SourceTooSmall { expected, actual: src.len() });
    }

    let mut img = Surface::new(width, height, SurfaceFormat::Ci8)?;

    let mut pal16 = [0u32; 16];
    let (tr_idx, sbit) = convert_palette(px_format, pal_buf, &mut pal16)?;
    img.palette_mut().expect("CI8 surface")[..16].copy_from_slice(&pal16);
    img.set_transparent_index(tr_idx);
    img.set_significant_bits(sbit);

    let src_row_bytes = width / 2;
    for y in 0..height {
        let src_row = &src[y * src_row_bytes..(y + 1) * src_row_bytes];
        let dest_row = img.row_mut(y);
        for (x, &byte) in src_row.iter().enumerate() {
            let (left, right) = if msn_left {
                (byte >> 4, byte & 0x0F)
            } else {
                (byte & 0x0F, byte >> 4)
            };
            dest_row[x * 2] = left;
            dest_row[x * 2 + 1] = right;
        }
    }

    Ok(img)
}

/// Decodes a linear CI8 image to a CI8 surface.
///
/// The palette holds 256 entries in `px_format` layout.
pub fn from_linear_ci8(
    px_format: PixelFormat,
    width: usize,
    height: usize,
    src: &[u8],
    pal_buf: &[u8],
) -> Result<Surface, DecodeError> {
    if unlikely(width == 0 || height == 0) {
        return Err(DecodeError::InvalidDimensions { width, height });
    }
    let expected = width * height;
    if unlikely(src.len() < expected) {
        return Err(DecodeError::SourceTooSmall { expected, actual: src.len() });
    }

    let mut img = Surface::new(width, height, SurfaceFormat::Ci8)?;

    let mut pal256 = [0u32; 256];
    let (tr_idx, sbit) = convert_palette(px_format, pal_buf, &mut pal256)?;
    img.palette_mut().expect("CI8 surface").copy_from_slice(&pal256);
    img.set_transparent_index(tr_idx);
    img.set_significant_bits(sbit);

    for y in 0..height {
        img.row_mut(y).copy_from_slice(&src[y * width..(y + 1) * width]);
    }

    Ok(img)
}

/// Decodes a linear 1bpp monochrome image to a CI8 surface.
///
/// The most significant bit is the leftmost pixel. Index 0 is white and
/// index 1 is black, matching the usual "ink on paper" convention.
pub fn from_linear_mono(
    width: usize,
    height: usize,
    src: &[u8],
) -> Result<Surface, DecodeError> {
    if unlikely(width == 0 || height == 0) {
        return Err(DecodeError::InvalidDimensions { width, height });
    }
    if unlikely(width % 8 != 0) {
        return Err(DecodeError::TileGranularity {
            width,
            height,
            tile_width: 8,
            tile_height: 1,
        });
    }
    let expected = width * height / 8;
    if unlikely(src.len() < expected) {
        return Err(DecodeError::SourceTooSmall { expected, actual: src.len() });
    }

    let mut img = Surface::new(width, height, SurfaceFormat::Ci8)?;
    {
        let palette = img.palette_mut().expect("CI8 surface");
        palette[0] = 0xFFFFFFFF; // white
        palette[1] = 0xFF000000; // black
    }
    img.set_transparent_index(None);

    let src_row_bytes = width / 8;
    for y in 0..height {
        let src_row = &src[y * src_row_bytes..(y + 1) * src_row_bytes];
        let dest_row = img.row_mut(y);
        for (x, &packed) in src_row.iter().enumerate() {
            let mut bits = packed;
            for bit in 0..8 {
                dest_row[x * 8 + bit] = bits >> 7;
                bits <<= 1;
            }
        }
    }

    img.set_significant_bits(SignificantBits::new(1, 1, 1, 1, 0));
    Ok(img)
}
