//! GameCube/Wii tiled decoders.
//!
//! GameCube textures are big-endian and tiled: 16-bit formats use 4x4 pixel
//! tiles, 8-bit formats use 8x4. Tiles are stored row-major; pixels within a
//! tile are raster order. Output is conventional row-major.

use likely_stable::unlikely;
use texdec_common::pixel_convert::{ia8_to_argb32, rgb565_to_argb32, rgb5a3_to_argb32};
use texdec_common::{DecodeError, PixelFormat, SignificantBits, Surface, SurfaceFormat};

use crate::util::read_u16_be;

fn check_tiled_args(
    width: usize,
    height: usize,
    tile_w: usize,
    tile_h: usize,
    src_len: usize,
    expected: usize,
) -> Result<(), DecodeError> {
    if unlikely(width == 0 || height == 0) {
        return Err(DecodeError::InvalidDimensions { width, height });
    }
    if unlikely(width % tile_w != 0 || height % tile_h != 0) {
        return Err(DecodeError::TileGranularity {
            width,
            height,
            tile_width: tile_w,
            tile_height: tile_h,
        });
    }
    if unlikely(src_len < expected) {
        return Err(DecodeError::SourceTooSmall { expected, actual: src_len });
    }
    Ok(())
}

/// Decodes a GameCube 16-bit tiled image to an ARGB32 surface.
///
/// Supported formats: [`PixelFormat::Rgb5A3`], [`PixelFormat::Rgb565`],
/// [`PixelFormat::Ia8`]. Pixels are big-endian, in 4x4 tiles.
pub fn from_gcn16(
    px_format: PixelFormat,
    width: usize,
    height: usize,
    src: &[u8],
) -> Result<Surface, DecodeError> {
    let (convert, sbit): (fn(u16) -> u32, SignificantBits) = match px_format {
        // NOTE: RGB5A3 pixels may be RGB555 or ARGB4443; report 555 color
        // with 4 alpha bits.
        PixelFormat::Rgb5A3 => (rgb5a3_to_argb32, SignificantBits::new(5, 5, 5, 0, 4)),
        PixelFormat::Rgb565 => (rgb565_to_argb32, SignificantBits::new(5, 6, 5, 0, 0)),
        PixelFormat::Ia8 => (ia8_to_argb32, SignificantBits::new(8, 8, 8, 8, 8)),
        _ => return Err(DecodeError::UnsupportedPixelFormat(px_format)),
    };

    check_tiled_args(width, height, 4, 4, src.len(), width * height * 2)?;

    let mut img = Surface::new(width, height, SurfaceFormat::Argb32)?;

    let tiles_x = width / 4;
    let tiles_y = height / 4;
    let mut tile_buf = [0u32; 4 * 4];

    let mut offset = 0;
    for ty in 0..tiles_y {
        for tx in 0..tiles_x {
            for px in tile_buf.iter_mut() {
                *px = convert(read_u16_be(src, offset));
                offset += 2;
            }
            img.blit_argb_tile(&tile_buf, 4, 4, tx, ty);
        }
    }

    img.set_significant_bits(sbit);
    Ok(img)
}

/// Decodes a GameCube CI8 tiled image to a CI8 surface.
///
/// The palette holds 256 big-endian RGB5A3 colors; image data is 8x4 tiles
/// of palette indices.
pub fn from_gcn_ci8(
    width: usize,
    height: usize,
    src: &[u8],
    pal_buf: &[u8],
) -> Result<Surface, DecodeError> {
    check_tiled_args(width, height, 8, 4, src.len(), width * height)?;
    if unlikely(pal_buf.len() < 256 * 2) {
        return Err(DecodeError::PaletteTooSmall { expected: 256 * 2, actual: pal_buf.len() });
    }

    let mut img = Surface::new(width, height, SurfaceFormat::Ci8)?;

    let mut tr_idx = None;
    {
        let palette = img.palette_mut().expect("CI8 surface");
        for (i, dest) in palette.iter_mut().enumerate() {
            *dest = rgb5a3_to_argb32(read_u16_be(pal_buf, i * 2));
            if tr_idx.is_none() && *dest >> 24 == 0 {
                tr_idx = Some(i as u8);
            }
        }
    }
    img.set_transparent_index(tr_idx);

    let tiles_x = width / 8;
    let tiles_y = height / 4;
    let mut offset = 0;
    for ty in 0..tiles_y {
        for tx in 0..tiles_x {
            img.blit_ci8_tile(&src[offset..offset + 8 * 4], 8, 4, tx, ty);
            offset += 8 * 4;
        }
    }

    // Pixels may be RGB555 or ARGB4443; report 555 color with 4 alpha bits.
    img.set_significant_bits(SignificantBits::new(5, 5, 5, 0, 4));
    Ok(img)
}

/// Decodes a GameCube I8 tiled image to a CI8 surface with a grayscale
/// palette.
pub fn from_gcn_i8(width: usize, height: usize, src: &[u8]) -> Result<Surface, DecodeError> {
    check_tiled_args(width, height, 8, 4, src.len(), width * height)?;

    let mut img = Surface::new(width, height, SurfaceFormat::Ci8)?;

    {
        let palette = img.palette_mut().expect("CI8 surface");
        let mut gray = 0xFF000000u32;
        for dest in palette.iter_mut() {
            *dest = gray;
            gray = gray.wrapping_add(0x010101);
        }
    }
    img.set_transparent_index(None);

    let tiles_x = width / 8;
    let tiles_y = height / 4;
    let mut offset = 0;
    for ty in 0..tiles_y {
        for tx in 0..tiles_x {
            img.blit_ci8_tile(&src[offset..offset + 8 * 4], 8, 4, tx, ty);
            offset += 8 * 4;
        }
    }

    img.set_significant_bits(SignificantBits::new(8, 8, 8, 0, 0));
    Ok(img)
}
