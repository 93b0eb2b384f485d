//! BC4 and BC5 decoders.
//!
//! Both reuse the DXT5 alpha interpolation for their color channels: BC4
//! carries one channel (presented as red), BC5 two (red and green, the
//! usual normal-map layout). The channel-spread helpers convert the result
//! in place for containers that declare them as luminance textures (LATC).

use texdec_common::{DecodeError, SignificantBits, Surface, SurfaceFormat};

use crate::block::{check_block_args, decode_dxt5_alpha, extract48};

/// Decodes a BC4 (ATI1) image. The single channel lands in red; green and
/// blue are zero and alpha is opaque.
pub fn from_bc4(width: usize, height: usize, src: &[u8]) -> Result<Surface, DecodeError> {
    let (phys_w, phys_h) = check_block_args(width, height, src.len(), 8)?;

    let mut img = Surface::new(phys_w, phys_h, SurfaceFormat::Argb32)?;

    let tiles_x = phys_w / 4;
    let tiles_y = phys_h / 4;
    let mut tile_buf = [0u32; 4 * 4];

    let mut offset = 0;
    for ty in 0..tiles_y {
        for tx in 0..tiles_x {
            let block: &[u8; 8] = src[offset..offset + 8].try_into().expect("8-byte block");
            let red_ref = [block[0], block[1]];
            let mut red48 = extract48(block);

            for px in tile_buf.iter_mut() {
                let r = decode_dxt5_alpha((red48 & 7) as u32, red_ref) as u32;
                *px = 0xFF000000 | (r << 16);
                red48 >>= 3;
            }

            img.blit_argb_tile(&tile_buf, 4, 4, tx, ty);
            offset += 8;
        }
    }

    if width < phys_w || height < phys_h {
        img.shrink(width, height)?;
    }

    // NOTE: Have to claim 1 bit for the empty Green and Blue channels.
    img.set_significant_bits(SignificantBits::new(8, 1, 1, 0, 0));
    Ok(img)
}

/// Decodes a BC5 (ATI2) image. The two channels land in red and green;
/// blue is zero and alpha is opaque.
pub fn from_bc5(width: usize, height: usize, src: &[u8]) -> Result<Surface, DecodeError> {
    let (phys_w, phys_h) = check_block_args(width, height, src.len(), 16)?;

    let mut img = Surface::new(phys_w, phys_h, SurfaceFormat::Argb32)?;

    let tiles_x = phys_w / 4;
    let tiles_y = phys_h / 4;
    let mut tile_buf = [0u32; 4 * 4];

    let mut offset = 0;
    for ty in 0..tiles_y {
        for tx in 0..tiles_x {
            let red_block: &[u8; 8] = src[offset..offset + 8].try_into().expect("8-byte block");
            let green_block: &[u8; 8] =
                src[offset + 8..offset + 16].try_into().expect("8-byte block");
            let red_ref = [red_block[0], red_block[1]];
            let green_ref = [green_block[0], green_block[1]];
            let mut red48 = extract48(red_block);
            let mut green48 = extract48(green_block);

            for px in tile_buf.iter_mut() {
                let r = decode_dxt5_alpha((red48 & 7) as u32, red_ref) as u32;
                let g = decode_dxt5_alpha((green48 & 7) as u32, green_ref) as u32;
                *px = 0xFF000000 | (r << 16) | (g << 8);
                red48 >>= 3;
                green48 >>= 3;
            }

            img.blit_argb_tile(&tile_buf, 4, 4, tx, ty);
            offset += 16;
        }
    }

    if width < phys_w || height < phys_h {
        img.shrink(width, height)?;
    }

    // NOTE: Have to claim 1 bit for the empty Blue channel.
    img.set_significant_bits(SignificantBits::new(8, 8, 1, 0, 0));
    Ok(img)
}

/// Spreads the red channel to green and blue in place, turning a decoded
/// BC4 surface into grayscale (LATC1 presentation).
pub fn red8_to_l8(img: &mut Surface) -> Result<(), DecodeError> {
    if img.format() != SurfaceFormat::Argb32 {
        return Err(DecodeError::RequiresArgb32);
    }
    for y in 0..img.height() {
        for px in img.argb_row_mut(y) {
            let r = (*px >> 16) & 0xFF;
            *px = 0xFF000000 | (r << 16) | (r << 8) | r;
        }
    }
    Ok(())
}

/// Moves green to alpha and spreads red to all color channels in place,
/// turning a decoded BC5 surface into luminance+alpha (LATC2 presentation).
pub fn rg8_to_la8(img: &mut Surface) -> Result<(), DecodeError> {
    if img.format() != SurfaceFormat::Argb32 {
        return Err(DecodeError::RequiresArgb32);
    }
    for y in 0..img.height() {
        for px in img.argb_row_mut(y) {
            let r = (*px >> 16) & 0xFF;
            let g = (*px >> 8) & 0xFF;
            *px = (g << 24) | (r << 16) | (r << 8) | r;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bc4_block(r0: u8, r1: u8, first_codes: u8) -> [u8; 8] {
        let mut b = [0u8; 8];
        b[0] = r0;
        b[1] = r1;
        b[2] = first_codes;
        b
    }

    #[test]
    fn bc4_decodes_single_channel_as_red() {
        // Codes 0 and 1 for the first two pixels.
        let img = from_bc4(4, 4, &bc4_block(0xC0, 0x30, 0b00_001_000)).unwrap();
        assert_eq!(img.pixel(0, 0), 0xFFC00000);
        assert_eq!(img.pixel(1, 0), 0xFF300000);
    }

    #[test]
    fn bc5_decodes_two_channels() {
        let mut src = [0u8; 16];
        src[0] = 0xAA; // red refs
        src[1] = 0x55;
        src[8] = 0x11; // green refs
        src[9] = 0x99;
        let img = from_bc5(4, 4, &src).unwrap();
        // All codes zero: reference value 0 everywhere.
        assert_eq!(img.pixel(0, 0), 0xFFAA1100);
        assert_eq!(img.pixel(3, 3), 0xFFAA1100);
    }

    #[test]
    fn channel_spreads() {
        let mut img = from_bc4(4, 4, &bc4_block(0x80, 0x80, 0)).unwrap();
        red8_to_l8(&mut img).unwrap();
        assert_eq!(img.pixel(0, 0), 0xFF808080);

        let mut src = [0u8; 16];
        src[0] = 0x40;
        src[8] = 0xC0;
        let mut img = from_bc5(4, 4, &src).unwrap();
        rg8_to_la8(&mut img).unwrap();
        assert_eq!(img.pixel(0, 0), 0xC0404040);
    }

    #[test]
    fn bc4_size_boundary() {
        assert!(from_bc4(4, 4, &[0u8; 8]).is_ok());
        assert!(matches!(
            from_bc4(4, 4, &[0u8; 7]),
            Err(DecodeError::SourceTooSmall { .. })
        ));
    }
}
