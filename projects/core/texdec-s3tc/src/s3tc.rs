//! DXT1 through DXT5 image decoders.

use likely_stable::unlikely;
use texdec_common::{DecodeError, SignificantBits, Surface, SurfaceFormat};

use crate::block::{
    check_block_args, decode_dxt1_color_palette, decode_dxt5_alpha, extract48,
    PALETTE_BIG_ENDIAN, PALETTE_COLOR0_GT_COLOR1, PALETTE_COLOR3_ALPHA,
};

fn block8(src: &[u8], offset: usize) -> &[u8; 8] {
    src[offset..offset + 8].try_into().expect("8-byte block")
}

/// Shared DXT1 tile loop.
fn t_from_dxt1(
    flags: u32,
    width: usize,
    height: usize,
    src: &[u8],
) -> Result<Surface, DecodeError> {
    let (phys_w, phys_h) = check_block_args(width, height, src.len(), 8)?;

    let mut img = Surface::new(phys_w, phys_h, SurfaceFormat::Argb32)?;

    let tiles_x = phys_w / 4;
    let tiles_y = phys_h / 4;
    let mut tile_buf = [0u32; 4 * 4];

    let mut offset = 0;
    for ty in 0..tiles_y {
        for tx in 0..tiles_x {
            let block = block8(src, offset);
            let pal = decode_dxt1_color_palette(block, flags);

            let mut indexes = u32::from_le_bytes([block[4], block[5], block[6], block[7]]);
            for px in tile_buf.iter_mut() {
                *px = pal[(indexes & 3) as usize].to_u32();
                indexes >>= 2;
            }

            img.blit_argb_tile(&tile_buf, 4, 4, tx, ty);
            offset += 8;
        }
    }

    if width < phys_w || height < phys_h {
        img.shrink(width, height)?;
    }

    img.set_significant_bits(SignificantBits::new(8, 8, 8, 0, 1));
    Ok(img)
}

/// Decodes a DXT1 image. Index 3 in three-color blocks is black.
pub fn from_dxt1(width: usize, height: usize, src: &[u8]) -> Result<Surface, DecodeError> {
    t_from_dxt1(0, width, height, src)
}

/// Decodes a DXT1 image. Index 3 in three-color blocks is fully transparent
/// (`GL_COMPRESSED_RGBA_S3TC_DXT1_EXT` semantics).
pub fn from_dxt1_a1(width: usize, height: usize, src: &[u8]) -> Result<Surface, DecodeError> {
    t_from_dxt1(PALETTE_COLOR3_ALPHA, width, height, src)
}

/// Decodes a GameCube DXT1 image.
///
/// The GameCube variant groups 4x4 tiles into 2x2 super-blocks, stores the
/// color endpoints big-endian, and packs the index bits MSB-first. Index 3
/// is treated as fully transparent; most GVR DXT1 textures use transparency.
pub fn from_dxt1_gcn(width: usize, height: usize, src: &[u8]) -> Result<Surface, DecodeError> {
    if unlikely(width == 0 || height == 0) {
        return Err(DecodeError::InvalidDimensions { width, height });
    }
    // 2x2 blocks of 4x4 tiles.
    if unlikely(width % 8 != 0 || height % 8 != 0) {
        return Err(DecodeError::TileGranularity {
            width,
            height,
            tile_width: 8,
            tile_height: 8,
        });
    }
    let expected = width * height / 2;
    if unlikely(src.len() < expected) {
        return Err(DecodeError::SourceTooSmall { expected, actual: src.len() });
    }

    let mut img = Surface::new(width, height, SurfaceFormat::Argb32)?;

    let tiles_x = width / 4;
    let tiles_y = height / 4;
    let mut tile_buf = [0u32; 4 * 4];

    let mut offset = 0;
    for ty in (0..tiles_y).step_by(2) {
        for tx in (0..tiles_x).step_by(2) {
            // Super-block order: top-left, top-right, bottom-left,
            // bottom-right.
            for (sub_y, sub_x) in [(0, 0), (0, 1), (1, 0), (1, 1)] {
                let block = block8(src, offset);
                let pal =
                    decode_dxt1_color_palette(block, PALETTE_BIG_ENDIAN | PALETTE_COLOR3_ALPHA);

                // Index bits are MSB-first: fill the tile backwards while
                // consuming from the low end.
                let mut indexes = u32::from_be_bytes([block[4], block[5], block[6], block[7]]);
                for px in tile_buf.iter_mut().rev() {
                    *px = pal[(indexes & 3) as usize].to_u32();
                    indexes >>= 2;
                }

                img.blit_argb_tile(&tile_buf, 4, 4, tx + sub_x, ty + sub_y);
                offset += 8;
            }
        }
    }

    img.set_significant_bits(SignificantBits::new(8, 8, 8, 0, 1));
    Ok(img)
}

/// Decodes a DXT3 image: DXT1-style color plus an explicit 4-bit alpha
/// plane. Color blocks are always decoded in four-color mode.
pub fn from_dxt3(width: usize, height: usize, src: &[u8]) -> Result<Surface, DecodeError> {
    let (phys_w, phys_h) = check_block_args(width, height, src.len(), 16)?;

    let mut img = Surface::new(phys_w, phys_h, SurfaceFormat::Argb32)?;

    let tiles_x = phys_w / 4;
    let tiles_y = phys_h / 4;
    let mut tile_buf = [0u32; 4 * 4];

    let mut offset = 0;
    for ty in 0..tiles_y {
        for tx in 0..tiles_x {
            let mut alpha = u64::from_le_bytes(src[offset..offset + 8].try_into().unwrap());
            let color = block8(src, offset + 8);
            let pal = decode_dxt1_color_palette(color, PALETTE_COLOR0_GT_COLOR1);

            let mut indexes = u32::from_le_bytes([color[4], color[5], color[6], color[7]]);
            for px in tile_buf.iter_mut() {
                let mut c = pal[(indexes & 3) as usize];
                let a4 = (alpha & 0xF) as u8;
                c.a = a4 | (a4 << 4);
                *px = c.to_u32();

                indexes >>= 2;
                alpha >>= 4;
            }

            img.blit_argb_tile(&tile_buf, 4, 4, tx, ty);
            offset += 16;
        }
    }

    if width < phys_w || height < phys_h {
        img.shrink(width, height)?;
    }

    img.set_significant_bits(SignificantBits::new(8, 8, 8, 0, 4));
    Ok(img)
}

/// Decodes a DXT2 image: DXT3 layout with premultiplied alpha, which is
/// converted back to straight alpha.
pub fn from_dxt2(width: usize, height: usize, src: &[u8]) -> Result<Surface, DecodeError> {
    let mut img = from_dxt3(width, height, src)?;
    img.un_premultiply()?;
    Ok(img)
}

/// Decodes a DXT5 image: DXT1-style color plus an interpolated 3-bit alpha
/// plane.
pub fn from_dxt5(width: usize, height: usize, src: &[u8]) -> Result<Surface, DecodeError> {
    let (phys_w, phys_h) = check_block_args(width, height, src.len(), 16)?;

    let mut img = Surface::new(phys_w, phys_h, SurfaceFormat::Argb32)?;

    let tiles_x = phys_w / 4;
    let tiles_y = phys_h / 4;
    let mut tile_buf = [0u32; 4 * 4];

    let mut offset = 0;
    for ty in 0..tiles_y {
        for tx in 0..tiles_x {
            let alpha_block = block8(src, offset);
            let alpha_ref = [alpha_block[0], alpha_block[1]];
            let mut alpha48 = extract48(alpha_block);

            let color = block8(src, offset + 8);
            let pal = decode_dxt1_color_palette(color, 0);

            let mut indexes = u32::from_le_bytes([color[4], color[5], color[6], color[7]]);
            for px in tile_buf.iter_mut() {
                let mut c = pal[(indexes & 3) as usize];
                c.a = decode_dxt5_alpha((alpha48 & 7) as u32, alpha_ref);
                *px = c.to_u32();

                indexes >>= 2;
                alpha48 >>= 3;
            }

            img.blit_argb_tile(&tile_buf, 4, 4, tx, ty);
            offset += 16;
        }
    }

    if width < phys_w || height < phys_h {
        img.shrink(width, height)?;
    }

    img.set_significant_bits(SignificantBits::new(8, 8, 8, 0, 8));
    Ok(img)
}

/// Decodes a DXT4 image: DXT5 layout with premultiplied alpha, which is
/// converted back to straight alpha.
pub fn from_dxt4(width: usize, height: usize, src: &[u8]) -> Result<Surface, DecodeError> {
    let mut img = from_dxt5(width, height, src)?;
    img.un_premultiply()?;
    Ok(img)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A DXT1 block exercising all four palette entries in the first four
    /// pixels: indices 0, 1, 2, 3.
    fn dxt1_block(c0: u16, c1: u16) -> [u8; 8] {
        let mut b = [0u8; 8];
        b[0..2].copy_from_slice(&c0.to_le_bytes());
        b[2..4].copy_from_slice(&c1.to_le_bytes());
        b[4] = 0b11100100; // pixel 0..3 -> index 0,1,2,3
        b
    }

    #[test]
    fn dxt1_four_color_ordering_property() {
        // c0 > c1: four-color mode with 2:1 and 1:2 midpoints.
        let img = from_dxt1(4, 4, &dxt1_block(0xF800, 0x001F)).unwrap();
        assert_eq!(img.pixel(0, 0), 0xFFFF0000);
        assert_eq!(img.pixel(1, 0), 0xFF0000FF);
        assert_eq!(img.pixel(2, 0), 0xFFAA0055);
        assert_eq!(img.pixel(3, 0), 0xFF5500AA);
    }

    #[test]
    fn dxt1_three_color_policy() {
        // c0 <= c1: three-color mode; index 3 policy differs per entry point.
        let black = from_dxt1(4, 4, &dxt1_block(0x001F, 0xF800)).unwrap();
        assert_eq!(black.pixel(3, 0), 0xFF000000);
        let transparent = from_dxt1_a1(4, 4, &dxt1_block(0x001F, 0xF800)).unwrap();
        assert_eq!(transparent.pixel(3, 0), 0x00000000);
        // The midpoint entry is the same for both.
        assert_eq!(black.pixel(2, 0), transparent.pixel(2, 0));
    }

    #[test]
    fn dxt1_size_boundary() {
        let src = [0u8; 32];
        assert!(from_dxt1(8, 4, &src[..32]).is_ok());
        assert!(matches!(
            from_dxt1(8, 4, &src[..31]),
            Err(DecodeError::SourceTooSmall { expected: 32, actual: 31 })
        ));
    }

    #[test]
    fn dxt1_shrinks_partial_tiles() {
        let src = [0u8; 32]; // 8x8 physical
        let img = from_dxt1(5, 6, &src).unwrap();
        assert_eq!(img.width(), 5);
        assert_eq!(img.height(), 6);
    }

    #[test]
    fn dxt3_expands_alpha_nibbles() {
        let mut src = [0u8; 16];
        // First two pixels: alpha nibbles 0x0 and 0xF.
        src[0] = 0xF0;
        // Color block: both endpoints white.
        src[8..10].copy_from_slice(&0xFFFFu16.to_le_bytes());
        src[10..12].copy_from_slice(&0xFFFFu16.to_le_bytes());
        let img = from_dxt3(4, 4, &src).unwrap();
        assert_eq!(img.pixel(0, 0) >> 24, 0x00);
        assert_eq!(img.pixel(1, 0) >> 24, 0xFF);
        assert_eq!(img.pixel(1, 0), 0xFFFFFFFF);
    }

    #[test]
    fn dxt5_interpolates_alpha() {
        let mut src = [0u8; 16];
        src[0] = 0xFF; // a0
        src[1] = 0x00; // a1
        // First two alpha codes: 0 (a0) and 1 (a1).
        src[2] = 0b00_001_000;
        // White color block.
        src[8..10].copy_from_slice(&0xFFFFu16.to_le_bytes());
        let img = from_dxt5(4, 4, &src).unwrap();
        assert_eq!(img.pixel(0, 0) >> 24, 0xFF);
        assert_eq!(img.pixel(1, 0) >> 24, 0x00);
    }

    #[test]
    fn gcn_variant_uses_superblocks_and_msb_first_indexes() {
        // 8x8 image = one 2x2 super-block of 4x4 tiles. Make each tile a
        // solid color via index 0 (all index bits zero) with distinct c0.
        let mut src = [0u8; 32];
        let colors = [0xF800u16, 0x07E0, 0x001F, 0xFFFF];
        for (i, &c) in colors.iter().enumerate() {
            src[i * 8..i * 8 + 2].copy_from_slice(&c.to_be_bytes());
            // c1 < c0 keeps four-color mode so nothing is transparent.
            src[i * 8 + 2..i * 8 + 4].copy_from_slice(&0x0000u16.to_be_bytes());
        }
        let img = from_dxt1_gcn(8, 8, &src).unwrap();
        assert_eq!(img.pixel(0, 0), 0xFFFF0000); // top-left tile
        assert_eq!(img.pixel(4, 0), 0xFF00FF00); // top-right tile
        assert_eq!(img.pixel(0, 4), 0xFF0000FF); // bottom-left tile
        assert_eq!(img.pixel(4, 4), 0xFFFFFFFF); // bottom-right tile
    }

    #[test]
    fn gcn_variant_requires_superblock_granularity() {
        assert!(matches!(
            from_dxt1_gcn(4, 4, &[0u8; 32]),
            Err(DecodeError::TileGranularity { .. })
        ));
    }

    #[test]
    fn dxt2_unpremultiplies() {
        let mut src = [0u8; 16];
        // Alpha nibbles all 0x8 (-> 0x88).
        src[0..8].fill(0x88);
        // Both endpoints mid-gray 0x8410 (R=G=B≈0x84/0x82/0x84 premultiplied).
        src[8..10].copy_from_slice(&0x8410u16.to_le_bytes());
        src[10..12].copy_from_slice(&0x8410u16.to_le_bytes());
        let dxt3 = from_dxt3(4, 4, &src).unwrap();
        let dxt2 = from_dxt2(4, 4, &src).unwrap();
        // DXT2 output must be the straight-alpha version: channels scaled up.
        let c3 = dxt3.pixel(0, 0);
        let c2 = dxt2.pixel(0, 0);
        assert_eq!(c3 >> 24, c2 >> 24);
        assert!(((c2 >> 16) & 0xFF) > ((c3 >> 16) & 0xFF));
    }
}
