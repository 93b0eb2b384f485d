//! BC7 image decoding.

use likely_stable::unlikely;
use texdec_common::{Argb32, DecodeError, SignificantBits, Surface, SurfaceFormat};

use crate::block::decode_bc7_block;

/// Decodes a BC7 image to an ARGB32 surface.
///
/// Images whose dimensions are not multiples of 4 are decoded at the
/// rounded-up physical size and shrunk back. Blocks with an invalid mode
/// decode as a fully transparent tile rather than failing the whole image.
pub fn from_bc7(width: usize, height: usize, src: &[u8]) -> Result<Surface, DecodeError> {
    if unlikely(width == 0 || height == 0) {
        return Err(DecodeError::InvalidDimensions { width, height });
    }
    let phys_w = (width + 3) & !3;
    let phys_h = (height + 3) & !3;
    let expected = (phys_w / 4) * (phys_h / 4) * 16;
    if unlikely(src.len() < expected) {
        return Err(DecodeError::SourceTooSmall { expected, actual: src.len() });
    }

    let mut img = Surface::new(phys_w, phys_h, SurfaceFormat::Argb32)?;

    let tiles_x = phys_w / 4;
    let tiles_y = phys_h / 4;
    let mut tile = [Argb32::default(); 16];
    let mut tile_buf = [0u32; 16];

    let mut offset = 0;
    for ty in 0..tiles_y {
        for tx in 0..tiles_x {
            let bytes: &[u8; 16] = src[offset..offset + 16].try_into().expect("16-byte block");
            decode_bc7_block(&mut tile, bytes);
            for (dest, px) in tile_buf.iter_mut().zip(tile.iter()) {
                *dest = px.to_u32();
            }
            img.blit_argb_tile(&tile_buf, 4, 4, tx, ty);
            offset += 16;
        }
    }

    if width < phys_w || height < phys_h {
        img.shrink(width, height)?;
    }

    // Whether alpha is actually used depends on the modes (and rotation)
    // present; report full depth.
    img.set_significant_bits(SignificantBits::new(8, 8, 8, 0, 8));
    Ok(img)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block_bytes(bits: u128) -> [u8; 16] {
        bits.to_le_bytes()
    }

    /// Mode 5, no rotation, 7-bit endpoints R=0x7F G=B=0, alpha 0xFF, all
    /// indexes zero: a solid red block.
    fn solid_red_mode5() -> [u8; 16] {
        let bits: u128 = 0x20            // mode 5 (bit 5 set), rotation 0
            | (0x7F << 8)                // R0
            | (0x7F << 15)               // R1
            | (0xFF << 50)               // A0
            | (0xFF << 58); // A1
        block_bytes(bits)
    }

    #[test]
    fn mode5_solid_color() {
        let img = from_bc7(4, 4, &solid_red_mode5()).unwrap();
        for y in 0..4 {
            for x in 0..4 {
                assert_eq!(img.pixel(x, y), 0xFFFF0000, "pixel {x},{y}");
            }
        }
    }

    #[test]
    fn mode5_rotation_swaps_alpha_into_red() {
        // Same block with rotation 01 (swap A and R): red 0xFF moves to
        // alpha, alpha 0xFF moves to red; both are 0xFF so change green.
        let bits: u128 = 0x20
            | (1 << 6)                   // rotation = 01 (A<->R)
            | (0x7F << 22)               // G0 instead of R
            | (0x7F << 29)               // G1
            | (0x00 << 50); // A0 = 0
        let img = from_bc7(4, 4, &block_bytes(bits)).unwrap();
        // Before rotation: R=0, G=0xFF, B=0, A=0. After swapping A and R:
        // A=0, R=0 -> pixel has green with transparent alpha swapped in red.
        let px = img.pixel(0, 0);
        assert_eq!((px >> 8) & 0xFF, 0xFF); // green survives
        assert_eq!(px >> 24, 0x00); // alpha took the old red (0)
    }

    /// Mode 1, partition 0: subset 1 covers the right half, anchored at
    /// pixel 15. With every index bit set, non-anchor pixels read index 7
    /// (endpoint 1) while the anchor's stored bits decode as index 3 - the
    /// implicit high bit must be masked off.
    #[test]
    fn anchor_index_high_bit_is_masked() {
        let bits: u128 = 0x02            // mode 1
            // partition 0 (bits 2..8 zero)
            | (0x3F << 26)               // R endpoint 3 (subset 1, ep 1)
            | (0x3F << 50)               // G endpoint 3
            | (0x3F << 74)               // B endpoint 3
            | (1 << 81)                  // P-bit for subset 1
            | (((1u128 << 46) - 1) << 82); // all index bits set
        let img = from_bc7(4, 4, &block_bytes(bits)).unwrap();

        // Subset 0 (left half): endpoints are black.
        assert_eq!(img.pixel(0, 0), 0xFF000000);
        // Subset 1 non-anchor pixel: index 7 -> endpoint 1 (255 after P-bit
        // and expansion).
        assert_eq!(img.pixel(2, 0), 0xFFFFFFFF);
        // Subset 1 anchor (pixel 15): two stored bits decode as index 3,
        // which must stay in the lower half of the 3-bit range.
        // interpolate(3, e0=2, e1=255) = (37*2 + 27*255 + 32) >> 6 = 109.
        assert_eq!(img.pixel(3, 3), 0xFF6D6D6D);
    }

    #[test]
    fn invalid_mode_zero_fills_but_decode_continues() {
        // First block all zero (invalid mode), second block solid red.
        let mut src = [0u8; 32];
        src[16..].copy_from_slice(&solid_red_mode5());
        let img = from_bc7(8, 4, &src).unwrap();
        assert_eq!(img.pixel(0, 0), 0x00000000);
        assert_eq!(img.pixel(4, 0), 0xFFFF0000);
    }

    #[test]
    fn size_boundary_and_shrink() {
        assert!(from_bc7(4, 4, &[0u8; 16]).is_ok());
        assert!(matches!(
            from_bc7(4, 4, &[0u8; 15]),
            Err(DecodeError::SourceTooSmall { expected: 16, actual: 15 })
        ));

        let img = from_bc7(3, 3, &[0u8; 16]).unwrap();
        assert_eq!(img.width(), 3);
        assert_eq!(img.height(), 3);
    }
}
