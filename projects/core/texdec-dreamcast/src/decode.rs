//! Dreamcast image decoding.
//!
//! Reference: Puyo Tools' PVR data codec, which documents the VQ codebook
//! layout (each codebook entry holds a 2x2 pixel block).

use alloc::vec;

use likely_stable::unlikely;
use texdec_common::pixel_convert::{
    argb1555_to_argb32, argb4444_to_argb32, rgb565_to_argb32,
};
use texdec_common::{DecodeError, PixelFormat, SignificantBits, Surface, SurfaceFormat};

use crate::twiddle::twiddle_map;

/// Largest square texture the PowerVR2 supports.
const DC_MAX_DIM: usize = 4096;

fn dc_pixel_kernel(
    px_format: PixelFormat,
) -> Result<(fn(u16) -> u32, SignificantBits), DecodeError> {
    match px_format {
        PixelFormat::Argb1555 => Ok((argb1555_to_argb32, SignificantBits::new(5, 5, 5, 0, 1))),
        PixelFormat::Rgb565 => Ok((rgb565_to_argb32, SignificantBits::new(5, 6, 5, 0, 0))),
        PixelFormat::Argb4444 => Ok((argb4444_to_argb32, SignificantBits::new(4, 4, 4, 0, 4))),
        _ => Err(DecodeError::UnsupportedPixelFormat(px_format)),
    }
}

fn check_square(width: usize, height: usize) -> Result<(), DecodeError> {
    if unlikely(width == 0 || height == 0 || width != height || width > DC_MAX_DIM) {
        return Err(DecodeError::InvalidDimensions { width, height });
    }
    Ok(())
}

/// Decodes a Dreamcast square twiddled 16-bit image to an ARGB32 surface.
///
/// Supported formats: [`PixelFormat::Argb1555`], [`PixelFormat::Rgb565`],
/// [`PixelFormat::Argb4444`]. Width and height must be equal and at most
/// 4096.
pub fn from_dreamcast_square_twiddled16(
    px_format: PixelFormat,
    width: usize,
    height: usize,
    src: &[u8],
) -> Result<Surface, DecodeError> {
    let (convert, sbit) = dc_pixel_kernel(px_format)?;
    check_square(width, height)?;
    let expected = width * height * 2;
    if unlikely(src.len() < expected) {
        return Err(DecodeError::SourceTooSmall { expected, actual: src.len() });
    }

    let tmap = twiddle_map(width);

    let mut img = Surface::new(width, height, SurfaceFormat::Argb32)?;
    for y in 0..height {
        let dest_row = img.argb_row_mut(y);
        for (x, dest) in dest_row.iter_mut().enumerate() {
            let src_idx = (((tmap[x] << 1) | tmap[y]) as usize) * 2;
            *dest = convert(u16::from_le_bytes([src[src_idx], src[src_idx + 1]]));
        }
    }

    img.set_significant_bits(sbit);
    Ok(img)
}

/// Number of codebook colors for a SmallVQ texture without mipmaps.
pub fn small_vq_palette_entries(width: usize) -> usize {
    if width <= 16 {
        8 * 4
    } else if width <= 32 {
        32 * 4
    } else if width <= 64 {
        128 * 4
    } else {
        256 * 4
    }
}

/// Number of codebook colors for a SmallVQ texture with mipmaps.
pub fn small_vq_palette_entries_with_mipmaps(width: usize) -> usize {
    if width <= 16 {
        16 * 4
    } else if width <= 32 {
        64 * 4
    } else if width <= 64 {
        128 * 4
    } else {
        256 * 4
    }
}

/// Decodes a Dreamcast vector-quantized 16-bit image to an ARGB32 surface.
///
/// Each source byte addresses a 4-color codebook entry covering a 2x2 pixel
/// block; blocks are laid out in twiddled order. `small_vq` selects the
/// width-dependent reduced codebook (`has_mipmaps` changes its size).
///
/// `pal_buf` is the codebook: little-endian 16-bit colors in `px_format`
/// layout.
pub fn from_dreamcast_vq16(
    px_format: PixelFormat,
    small_vq: bool,
    has_mipmaps: bool,
    width: usize,
    height: usize,
    src: &[u8],
    pal_buf: &[u8],
) -> Result<Surface, DecodeError> {
    let (convert, sbit) = dc_pixel_kernel(px_format)?;
    check_square(width, height)?;

    // One index byte per 2x2 block.
    let expected = (width / 2) * (height / 2);
    if unlikely(src.len() < expected) {
        return Err(DecodeError::SourceTooSmall { expected, actual: src.len() });
    }

    let pal_entry_count = if small_vq {
        if has_mipmaps {
            small_vq_palette_entries_with_mipmaps(width)
        } else {
            small_vq_palette_entries(width)
        }
    } else {
        1024
    };
    if unlikely(pal_buf.len() < pal_entry_count * 2) {
        return Err(DecodeError::PaletteTooSmall {
            expected: pal_entry_count * 2,
            actual: pal_buf.len(),
        });
    }

    // Convert the codebook once.
    let mut palette = vec![0u32; pal_entry_count];
    for (i, dest) in palette.iter_mut().enumerate() {
        *dest = convert(u16::from_le_bytes([pal_buf[i * 2], pal_buf[i * 2 + 1]]));
    }

    let tmap = twiddle_map(width / 2);

    let mut img = Surface::new(width, height, SurfaceFormat::Argb32)?;
    for by in 0..height / 2 {
        for bx in 0..width / 2 {
            let src_idx = ((tmap[bx] << 1) | tmap[by]) as usize;

            // Each codebook entry is a 2x2 block: entries are stored
            // column-major within the block.
            let pal_idx = src[src_idx] as usize * 4;
            if unlikely(pal_idx + 3 >= pal_entry_count) {
                // Only possible with SmallVQ; full VQ always has 1024
                // colors.
                return Err(DecodeError::PaletteTooSmall {
                    expected: (pal_idx + 4) * 2,
                    actual: pal_buf.len(),
                });
            }

            let x = bx * 2;
            let y = by * 2;
            img.argb_row_mut(y)[x] = palette[pal_idx];
            img.argb_row_mut(y)[x + 1] = palette[pal_idx + 2];
            img.argb_row_mut(y + 1)[x] = palette[pal_idx + 1];
            img.argb_row_mut(y + 1)[x + 1] = palette[pal_idx + 3];
        }
    }

    img.set_significant_bits(sbit);
    Ok(img)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_twiddled_untwiddles() {
        // 2x2 RGB565: twiddled order is (0,0) (0,1) (1,0) (1,1).
        let pixels: [u16; 4] = [0xF800, 0x07E0, 0x001F, 0x0000];
        let mut src = [0u8; 8];
        for (i, px) in pixels.iter().enumerate() {
            src[i * 2..i * 2 + 2].copy_from_slice(&px.to_le_bytes());
        }
        let img =
            from_dreamcast_square_twiddled16(PixelFormat::Rgb565, 2, 2, &src).unwrap();
        assert_eq!(img.pixel(0, 0), 0xFFFF0000);
        assert_eq!(img.pixel(0, 1), 0xFF00FF00);
        assert_eq!(img.pixel(1, 0), 0xFF0000FF);
        assert_eq!(img.pixel(1, 1), 0xFF000000);
    }

    #[test]
    fn rectangles_are_rejected() {
        assert!(matches!(
            from_dreamcast_square_twiddled16(PixelFormat::Rgb565, 4, 8, &[0; 64]),
            Err(DecodeError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn vq_expands_codebook_blocks() {
        // 2x2 texture: one index byte referencing codebook entry 1.
        // Entry 1 colors (column-major in the block): a, c / b, d.
        let mut pal = [0u8; 2048];
        let colors: [u16; 4] = [0xF800, 0x07E0, 0x001F, 0xFFFF];
        for (i, c) in colors.iter().enumerate() {
            pal[(4 + i) * 2..(4 + i) * 2 + 2].copy_from_slice(&c.to_le_bytes());
        }
        let img = from_dreamcast_vq16(
            PixelFormat::Rgb565,
            false,
            false,
            2,
            2,
            &[1],
            &pal,
        )
        .unwrap();
        assert_eq!(img.pixel(0, 0), 0xFFFF0000); // entry +0
        assert_eq!(img.pixel(0, 1), 0xFF00FF00); // entry +1
        assert_eq!(img.pixel(1, 0), 0xFF0000FF); // entry +2
        assert_eq!(img.pixel(1, 1), 0xFFFFFFFF); // entry +3
    }

    #[test]
    fn small_vq_sizes_follow_width() {
        assert_eq!(small_vq_palette_entries(16), 32);
        assert_eq!(small_vq_palette_entries(32), 128);
        assert_eq!(small_vq_palette_entries(64), 512);
        assert_eq!(small_vq_palette_entries(128), 1024);
        assert_eq!(small_vq_palette_entries_with_mipmaps(16), 64);
        assert_eq!(small_vq_palette_entries_with_mipmaps(128), 1024);
    }

    #[test]
    fn small_vq_out_of_range_index_fails() {
        // 16x16 SmallVQ without mipmaps has 32 colors = 8 blocks; index 10
        // is out of range.
        let src = [10u8; 64];
        let pal = [0u8; 64];
        assert!(matches!(
            from_dreamcast_vq16(PixelFormat::Rgb565, true, false, 16, 16, &src, &pal),
            Err(DecodeError::PaletteTooSmall { .. })
        ));
    }
}
