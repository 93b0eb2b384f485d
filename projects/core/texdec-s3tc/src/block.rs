//! DXTn block primitives shared by the decoders.
//!
//! References:
//! - <https://en.wikipedia.org/wiki/S3_Texture_Compression>
//! - <https://learn.microsoft.com/en-us/windows/win32/direct3d10/d3d10-graphics-programming-guide-resources-block-compression>

use likely_stable::unlikely;
use texdec_common::pixel_convert::rgb565_to_argb32;
use texdec_common::{Argb32, DecodeError};

/// Color endpoints are big-endian (GameCube).
pub(crate) const PALETTE_BIG_ENDIAN: u32 = 1 << 0;
/// In three-color mode, index 3 is fully transparent instead of black.
pub(crate) const PALETTE_COLOR3_ALPHA: u32 = 1 << 1;
/// Always use four-color mode regardless of endpoint ordering (DXT2/DXT3).
pub(crate) const PALETTE_COLOR0_GT_COLOR1: u32 = 1 << 2;

/// Decodes the 4-entry color palette of a DXT1-style color block.
///
/// `block` is the 8-byte color half: two RGB565 endpoints followed by the
/// 2-bit index table (which this function ignores).
pub(crate) fn decode_dxt1_color_palette(block: &[u8; 8], flags: u32) -> [Argb32; 4] {
    let (c0, c1) = if flags & PALETTE_BIG_ENDIAN != 0 {
        (
            u16::from_be_bytes([block[0], block[1]]),
            u16::from_be_bytes([block[2], block[3]]),
        )
    } else {
        (
            u16::from_le_bytes([block[0], block[1]]),
            u16::from_le_bytes([block[2], block[3]]),
        )
    };

    let p0 = Argb32::from_u32(rgb565_to_argb32(c0));
    let p1 = Argb32::from_u32(rgb565_to_argb32(c1));
    let mut pal = [p0, p1, Argb32::default(), Argb32::default()];

    let lerp3 = |hi: u8, lo: u8| ((2 * hi as u16 + lo as u16) / 3) as u8;
    if flags & PALETTE_COLOR0_GT_COLOR1 != 0 || c0 > c1 {
        // Four-color block: two weighted interpolation points.
        pal[2] = Argb32 {
            a: 0xFF,
            r: lerp3(p0.r, p1.r),
            g: lerp3(p0.g, p1.g),
            b: lerp3(p0.b, p1.b),
        };
        pal[3] = Argb32 {
            a: 0xFF,
            r: lerp3(p1.r, p0.r),
            g: lerp3(p1.g, p0.g),
            b: lerp3(p1.b, p0.b),
        };
    } else {
        // Three-color block: midpoint, then black or transparent.
        pal[2] = Argb32 {
            a: 0xFF,
            r: ((p0.r as u16 + p1.r as u16) / 2) as u8,
            g: ((p0.g as u16 + p1.g as u16) / 2) as u8,
            b: ((p0.b as u16 + p1.b as u16) / 2) as u8,
        };
        pal[3] = if flags & PALETTE_COLOR3_ALPHA != 0 {
            Argb32::from_u32(0x00000000)
        } else {
            Argb32::from_u32(0xFF000000)
        };
    }
    pal
}

/// Extracts the 48-bit 3-bit-per-pixel code field from a DXT5 alpha block.
///
/// The codes start two bytes into the 8-byte block, after the two reference
/// values, hence the shift after the little-endian load.
#[inline]
pub(crate) fn extract48(block: &[u8; 8]) -> u64 {
    u64::from_le_bytes(*block) >> 16
}

/// Decodes one DXT5-style alpha value from a 3-bit selector code.
///
/// The same interpolation drives BC4/BC5 color channels.
pub(crate) fn decode_dxt5_alpha(code: u32, alpha: [u8; 2]) -> u8 {
    let a0 = alpha[0] as u32;
    let a1 = alpha[1] as u32;

    let value = if alpha[0] > alpha[1] {
        // Eight-point ramp.
        match code & 7 {
            0 => a0,
            1 => a1,
            2 => (6 * a0 + a1) / 7,
            3 => (5 * a0 + 2 * a1) / 7,
            4 => (4 * a0 + 3 * a1) / 7,
            5 => (3 * a0 + 4 * a1) / 7,
            6 => (2 * a0 + 5 * a1) / 7,
            _ => (a0 + 6 * a1) / 7,
        }
    } else {
        // Six-point ramp plus explicit 0 and 255.
        match code & 7 {
            0 => a0,
            1 => a1,
            2 => (4 * a0 + a1) / 5,
            3 => (3 * a0 + 2 * a1) / 5,
            4 => (2 * a0 + 3 * a1) / 5,
            5 => (a0 + 4 * a1) / 5,
            6 => 0,
            _ => 255,
        }
    };

    value.min(255) as u8
}

/// Validates a block decode request and returns the rounded-up physical
/// dimensions.
///
/// Container formats may cut off the last tile row/column, so the buffer
/// must cover the physical (tile-aligned) size while the returned surface
/// is shrunk to the caller's dimensions afterwards.
pub(crate) fn check_block_args(
    width: usize,
    height: usize,
    src_len: usize,
    bytes_per_block: usize,
) -> Result<(usize, usize), DecodeError> {
    if unlikely(width == 0 || height == 0) {
        return Err(DecodeError::InvalidDimensions { width, height });
    }
    let phys_w = (width + 3) & !3;
    let phys_h = (height + 3) & !3;
    let expected = (phys_w / 4) * (phys_h / 4) * bytes_per_block;
    if unlikely(src_len < expected) {
        return Err(DecodeError::SourceTooSmall { expected, actual: src_len });
    }
    Ok((phys_w, phys_h))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn block_with_colors(c0: u16, c1: u16) -> [u8; 8] {
        let mut b = [0u8; 8];
        b[0..2].copy_from_slice(&c0.to_le_bytes());
        b[2..4].copy_from_slice(&c1.to_le_bytes());
        b
    }

    #[test]
    fn four_color_mode_interpolates_thirds() {
        // c0 > c1 as raw packed values.
        let pal = decode_dxt1_color_palette(&block_with_colors(0xF800, 0x001F), 0);
        assert_eq!(pal[0].to_u32(), 0xFFFF0000);
        assert_eq!(pal[1].to_u32(), 0xFF0000FF);
        assert_eq!(pal[2].r, ((2u32 * 255 + 0) / 3) as u8);
        assert_eq!(pal[2].b, 255 / 3);
        assert_eq!(pal[3].r, 255 / 3);
        assert_eq!(pal[3].b, ((2u32 * 255) / 3) as u8);
        assert_eq!(pal[3].a, 0xFF);
    }

    #[rstest]
    #[case(0, 0xFF000000)]
    #[case(PALETTE_COLOR3_ALPHA, 0x00000000)]
    fn three_color_mode_midpoint_and_policy(#[case] flags: u32, #[case] color3: u32) {
        // c0 <= c1 selects three-color mode.
        let pal = decode_dxt1_color_palette(&block_with_colors(0x001F, 0xF800), flags);
        assert_eq!(pal[2].r, 255 / 2);
        assert_eq!(pal[2].b, 255 / 2);
        assert_eq!(pal[3].to_u32(), color3);
    }

    #[test]
    fn forced_four_color_mode_ignores_ordering() {
        let pal = decode_dxt1_color_palette(
            &block_with_colors(0x001F, 0xF800),
            PALETTE_COLOR0_GT_COLOR1,
        );
        // Still interpolated, not black/transparent.
        assert_eq!(pal[3].a, 0xFF);
        assert_ne!(pal[3].to_u32(), 0xFF000000);
    }

    #[rstest]
    #[case([200, 100], 0, 200)]
    #[case([200, 100], 1, 100)]
    #[case([200, 100], 2, (6 * 200 + 100) / 7)]
    #[case([200, 100], 7, (200 + 6 * 100) / 7)]
    #[case([100, 200], 2, (4 * 100 + 200) / 5)]
    #[case([100, 200], 6, 0)]
    #[case([100, 200], 7, 255)]
    fn dxt5_alpha_ramps(#[case] alpha: [u8; 2], #[case] code: u32, #[case] expected: u32) {
        assert_eq!(decode_dxt5_alpha(code, alpha) as u32, expected);
    }

    #[test]
    fn extract48_skips_reference_values() {
        let block = [0x11, 0x22, 0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF];
        assert_eq!(extract48(&block), 0xFFEEDDCCBBAA);
    }

    #[test]
    fn physical_size_rounds_up() {
        assert_eq!(check_block_args(5, 5, 32, 8), Ok((8, 8)));
        assert!(matches!(
            check_block_args(5, 5, 31, 8),
            Err(DecodeError::SourceTooSmall { expected: 32, actual: 31 })
        ));
    }
}
