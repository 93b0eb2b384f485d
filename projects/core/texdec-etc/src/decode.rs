//! ETC1/ETC2/EAC image decoding.

use likely_stable::unlikely;
use texdec_common::argb32::{ARGB32_SHIFT_A, ARGB32_SHIFT_G, ARGB32_SHIFT_R};
use texdec_common::{DecodeError, SignificantBits, Surface, SurfaceFormat};

use crate::block::{decode_eac, decode_etc_rgb, EtcBlock, ETC2_DM_A1, ETC_DM_ETC2};

/// Validates dimensions and buffer size; returns physical (tile-aligned)
/// dimensions.
fn check_block_args(
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

fn block8(src: &[u8], offset: usize) -> &[u8; 8] {
    src[offset..offset + 8].try_into().expect("8-byte block")
}

/// Shared tile loop for the 8-byte RGB-only variants.
fn t_from_etc_rgb(
    mode: u32,
    sbit: SignificantBits,
    width: usize,
    height: usize,
    src: &[u8],
) -> Result<Surface, DecodeError> {
    let (phys_w, phys_h) = check_block_args(width, height, src.len(), 8)?;

    let mut img = Surface::new(phys_w, phys_h, SurfaceFormat::Argb32)?;

    let tiles_x = phys_w / 4;
    let tiles_y = phys_h / 4;
    let mut tile = [0u32; 16];

    let mut offset = 0;
    for ty in 0..tiles_y {
        for tx in 0..tiles_x {
            decode_etc_rgb(mode, &mut tile, &EtcBlock::new(block8(src, offset)));
            img.blit_argb_tile(&tile, 4, 4, tx, ty);
            offset += 8;
        }
    }

    if width < phys_w || height < phys_h {
        img.shrink(width, height)?;
    }

    img.set_significant_bits(sbit);
    Ok(img)
}

/// Decodes an ETC1 image to an ARGB32 surface.
pub fn from_etc1(width: usize, height: usize, src: &[u8]) -> Result<Surface, DecodeError> {
    t_from_etc_rgb(0, SignificantBits::new(8, 8, 8, 0, 0), width, height, src)
}

/// Decodes an ETC2 RGB image to an ARGB32 surface.
pub fn from_etc2_rgb(width: usize, height: usize, src: &[u8]) -> Result<Surface, DecodeError> {
    t_from_etc_rgb(
        ETC_DM_ETC2,
        SignificantBits::new(8, 8, 8, 0, 0),
        width,
        height,
        src,
    )
}

/// Decodes an ETC2 RGB+A1 (punchthrough alpha) image to an ARGB32 surface.
pub fn from_etc2_rgb_a1(width: usize, height: usize, src: &[u8]) -> Result<Surface, DecodeError> {
    t_from_etc_rgb(
        ETC_DM_ETC2 | ETC2_DM_A1,
        SignificantBits::new(8, 8, 8, 0, 1),
        width,
        height,
        src,
    )
}

/// Decodes an ETC2 RGBA image (EAC alpha block per tile) to an ARGB32
/// surface.
pub fn from_etc2_rgba(width: usize, height: usize, src: &[u8]) -> Result<Surface, DecodeError> {
    let (phys_w, phys_h) = check_block_args(width, height, src.len(), 16)?;

    let mut img = Surface::new(phys_w, phys_h, SurfaceFormat::Argb32)?;

    let tiles_x = phys_w / 4;
    let tiles_y = phys_h / 4;
    let mut tile = [0u32; 16];

    let mut offset = 0;
    for ty in 0..tiles_y {
        for tx in 0..tiles_x {
            // Alpha block first, then the ETC2 RGB block.
            decode_etc_rgb(
                ETC_DM_ETC2,
                &mut tile,
                &EtcBlock::new(block8(src, offset + 8)),
            );
            decode_eac(&mut tile, block8(src, offset), ARGB32_SHIFT_A);
            img.blit_argb_tile(&tile, 4, 4, tx, ty);
            offset += 16;
        }
    }

    if width < phys_w || height < phys_h {
        img.shrink(width, height)?;
    }

    img.set_significant_bits(SignificantBits::new(8, 8, 8, 0, 8));
    Ok(img)
}

/// Decodes an EAC R11 image to an ARGB32 surface. The channel is truncated
/// to 8 bits and lands in red.
pub fn from_eac_r11(width: usize, height: usize, src: &[u8]) -> Result<Surface, DecodeError> {
    let (phys_w, phys_h) = check_block_args(width, height, src.len(), 8)?;

    let mut img = Surface::new(phys_w, phys_h, SurfaceFormat::Argb32)?;

    let tiles_x = phys_w / 4;
    let tiles_y = phys_h / 4;
    // decode_eac only touches one channel; everything else stays opaque
    // black.
    let mut tile = [0xFF000000u32; 16];

    let mut offset = 0;
    for ty in 0..tiles_y {
        for tx in 0..tiles_x {
            decode_eac(&mut tile, block8(src, offset), ARGB32_SHIFT_R);
            img.blit_argb_tile(&tile, 4, 4, tx, ty);
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

/// Decodes an EAC RG11 image to an ARGB32 surface. The channels are
/// truncated to 8 bits and land in red and green.
pub fn from_eac_rg11(width: usize, height: usize, src: &[u8]) -> Result<Surface, DecodeError> {
    let (phys_w, phys_h) = check_block_args(width, height, src.len(), 16)?;

    let mut img = Surface::new(phys_w, phys_h, SurfaceFormat::Argb32)?;

    let tiles_x = phys_w / 4;
    let tiles_y = phys_h / 4;
    let mut tile = [0xFF000000u32; 16];

    let mut offset = 0;
    for ty in 0..tiles_y {
        for tx in 0..tiles_x {
            decode_eac(&mut tile, block8(src, offset), ARGB32_SHIFT_R);
            decode_eac(&mut tile, block8(src, offset + 8), ARGB32_SHIFT_G);
            img.blit_argb_tile(&tile, 4, 4, tx, ty);
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
