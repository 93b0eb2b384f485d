//! ETC block decoding.

use crate::tables::*;

/// Decode-mode flags for [`decode_etc_rgb`].
pub(crate) const ETC_DM_ETC2: u32 = 1 << 0;
/// ETC2 punchthrough alpha: the differential bit is an opaque flag.
pub(crate) const ETC2_DM_A1: u32 = 1 << 1;

/// One 8-byte ETC1/ETC2 RGB block, as stored (big-endian).
pub(crate) struct EtcBlock<'a> {
    bytes: &'a [u8; 8],
}

impl<'a> EtcBlock<'a> {
    pub(crate) fn new(bytes: &'a [u8; 8]) -> Self {
        Self { bytes }
    }

    // Individual/differential layout: R, G, B bytes then control.
    #[inline]
    fn r(&self) -> u8 {
        self.bytes[0]
    }
    #[inline]
    fn g(&self) -> u8 {
        self.bytes[1]
    }
    #[inline]
    fn b(&self) -> u8 {
        self.bytes[2]
    }

    /// Control byte: 3 bits codeword 1, 3 bits codeword 2, diff bit, flip
    /// bit. With punchthrough alpha the diff bit is the opaque flag.
    #[inline]
    fn control(&self) -> u8 {
        self.bytes[3]
    }

    /// High bitplane of the 2-bit pixel indexes.
    #[inline]
    fn px_msb(&self) -> u16 {
        u16::from_be_bytes([self.bytes[4], self.bytes[5]])
    }

    /// Low bitplane of the 2-bit pixel indexes.
    #[inline]
    fn px_lsb(&self) -> u16 {
        u16::from_be_bytes([self.bytes[6], self.bytes[7]])
    }

    /// Raw byte access for the T/H/Planar overlays.
    #[inline]
    fn byte(&self, i: usize) -> u8 {
        self.bytes[i]
    }
}

/// Working color with headroom for the intensity modifiers.
#[derive(Clone, Copy, Default)]
struct ColorRgb {
    r: i32,
    g: i32,
    b: i32,
}

/// Clamps to [0,255] per channel and packs as opaque ARGB32.
#[inline]
fn clamp_to_argb(color: ColorRgb) -> u32 {
    let clamp = |c: i32| -> u32 {
        if c > 255 {
            255
        } else if c > 0 {
            c as u32
        } else {
            0
        }
    };
    0xFF000000 | (clamp(color.r) << 16) | (clamp(color.g) << 8) | clamp(color.b)
}

enum BlockMode {
    Etc1,
    TH,
    Planar,
}

/// Decodes an ETC1/ETC2 RGB block into a raster-order 4x4 tile.
///
/// `mode` selects ETC1 vs ETC2 sub-mode availability and punchthrough
/// alpha handling; see [`ETC_DM_ETC2`] and [`ETC2_DM_A1`].
pub(crate) fn decode_etc_rgb(mode: u32, tile: &mut [u32; 16], blk: &EtcBlock<'_>) {
    debug_assert!(mode != ETC2_DM_A1, "punchthrough alpha requires ETC2");

    // Base colors. ETC1 modes use two subblock bases; T/H derive four paint
    // colors; Planar uses three ('O', 'H', 'V').
    let mut base = [ColorRgb::default(); 3];
    let mut paint = [0u32; 4];
    let mut block_mode = None;

    let control = blk.control();
    let punch_transparent = mode & ETC2_DM_A1 != 0 && control & 0x02 == 0;

    if mode & ETC2_DM_A1 == 0 && control & 0x02 == 0 {
        // Individual mode: two 4-bit bases per channel byte.
        block_mode = Some(BlockMode::Etc1);
        base[0].r = extend_4to8(blk.r() >> 4) as i32;
        base[0].g = extend_4to8(blk.g() >> 4) as i32;
        base[0].b = extend_4to8(blk.b() >> 4) as i32;
        base[1].r = extend_4to8(blk.r() & 0x0F) as i32;
        base[1].g = extend_4to8(blk.g() & 0x0F) as i32;
        base[1].b = extend_4to8(blk.b() & 0x0F) as i32;
    } else {
        // Differential colors are 3-bit two's complement. The sums select
        // the block mode: an out-of-range channel picks an ETC2 mode in
        // T, H, Planar priority order.
        let dr = ETC1_3BIT_DIFF[(blk.r() & 0x07) as usize] as i32;
        let dg = ETC1_3BIT_DIFF[(blk.g() & 0x07) as usize] as i32;
        let db = ETC1_3BIT_DIFF[(blk.b() & 0x07) as usize] as i32;
        let sr = (blk.r() >> 3) as i32 + dr;
        let sg = (blk.g() >> 3) as i32 + dg;
        let sb = (blk.b() >> 3) as i32 + db;

        if mode & ETC_DM_ETC2 != 0 {
            if sr & !0x1F != 0 {
                // 'T' mode. R1 is split across the byte; G and B are
                // arranged differently from ETC1.
                block_mode = Some(BlockMode::TH);
                base[0].r =
                    extend_4to8(((blk.byte(0) & 0x18) >> 1) | (blk.byte(0) & 0x03)) as i32;
                base[0].g = extend_4to8(blk.byte(1) >> 4) as i32;
                base[0].b = extend_4to8(blk.byte(1) & 0x0F) as i32;
                base[1].r = extend_4to8(blk.byte(2) >> 4) as i32;
                base[1].g = extend_4to8(blk.byte(2) & 0x0F) as i32;
                base[1].b = extend_4to8(control >> 4) as i32;

                paint[0] = clamp_to_argb(base[0]);
                paint[2] = clamp_to_argb(base[1]);

                // Paint colors 1 and 3 offset base 1 by the table distance.
                let d = ETC2_DIST[(((control & 0x0C) >> 1) | (control & 0x01)) as usize] as i32;
                paint[1] = clamp_to_argb(ColorRgb {
                    r: base[1].r + d,
                    g: base[1].g + d,
                    b: base[1].b + d,
                });
                paint[3] = clamp_to_argb(ColorRgb {
                    r: base[1].r - d,
                    g: base[1].g - d,
                    b: base[1].b - d,
                });
            } else if sg & !0x1F != 0 {
                // 'H' mode.
                block_mode = Some(BlockMode::TH);
                base[0].r = extend_4to8(blk.byte(0) >> 3) as i32;
                base[0].g = extend_4to8(((blk.byte(0) & 0x07) << 1) | ((blk.byte(1) >> 4) & 0x01))
                    as i32;
                base[0].b = extend_4to8(
                    (blk.byte(1) & 0x08) | ((blk.byte(1) & 0x03) << 1) | (blk.byte(2) >> 7),
                ) as i32;
                base[1].r = extend_4to8(blk.byte(2) >> 3) as i32;
                base[1].g =
                    extend_4to8(((blk.byte(2) & 0x07) << 1) | (control >> 7)) as i32;
                base[1].b = extend_4to8((control >> 3) & 0x0F) as i32;

                // The distance index LSB comes from comparing the packed
                // base colors.
                let mut d_idx = (control & 0x04) | ((control & 0x01) << 1);
                d_idx |= (clamp_to_argb(base[0]) >= clamp_to_argb(base[1])) as u8;

                let d = ETC2_DIST[d_idx as usize] as i32;
                paint[0] = clamp_to_argb(ColorRgb {
                    r: base[0].r + d,
                    g: base[0].g + d,
                    b: base[0].b + d,
                });
                paint[1] = clamp_to_argb(ColorRgb {
                    r: base[0].r - d,
                    g: base[0].g - d,
                    b: base[0].b - d,
                });
                paint[2] = clamp_to_argb(ColorRgb {
                    r: base[1].r + d,
                    g: base[1].g + d,
                    b: base[1].b + d,
                });
                paint[3] = clamp_to_argb(ColorRgb {
                    r: base[1].r - d,
                    g: base[1].g - d,
                    b: base[1].b - d,
                });
            } else if sb & !0x1F != 0 {
                // 'Planar' mode: three RGB676 colors. Kept as its own code
                // path; sample files with Planar encoding are rare.
                block_mode = Some(BlockMode::Planar);

                // 'O' color.
                base[0].r = extend_6to8((blk.byte(0) >> 1) & 0x3F) as i32;
                base[0].g = extend_7to8(((blk.byte(0) << 6) & 0x40) | ((blk.byte(1) >> 1) & 0x3F))
                    as i32;
                base[0].b = extend_6to8(
                    ((blk.byte(1) << 5) & 0x20)
                        | (blk.byte(2) & 0x18)
                        | ((blk.byte(2) << 1) & 0x06)
                        | (blk.byte(3) >> 7),
                ) as i32;

                // 'H' color.
                base[1].r =
                    extend_6to8(((blk.byte(3) >> 1) & 0x3C) | (blk.byte(3) & 0x01)) as i32;
                base[1].g = extend_7to8(blk.byte(4) >> 1) as i32;
                base[1].b =
                    extend_6to8(((blk.byte(4) << 5) & 0x20) | (blk.byte(5) >> 3)) as i32;

                // 'V' color.
                base[2].r =
                    extend_6to8(((blk.byte(5) << 3) & 0x38) | (blk.byte(6) >> 5)) as i32;
                base[2].g =
                    extend_7to8(((blk.byte(6) << 2) & 0x7C) | (blk.byte(7) >> 6)) as i32;
                base[2].b = extend_6to8(blk.byte(7) & 0x3F) as i32;
            }
        }

        if block_mode.is_none() {
            // ETC1 differential mode.
            block_mode = Some(BlockMode::Etc1);
            base[0].r = extend_5to8(blk.r() >> 3) as i32;
            base[0].g = extend_5to8(blk.g() >> 3) as i32;
            base[0].b = extend_5to8(blk.b() >> 3) as i32;
            base[1].r = extend_5to8(sr as u8) as i32;
            base[1].g = extend_5to8(sg as u8) as i32;
            base[1].b = extend_5to8(sb as u8) as i32;
        }
    }

    let mut px_msb = blk.px_msb();
    let mut px_lsb = blk.px_lsb();
    match block_mode.expect("block mode always resolved") {
        BlockMode::Etc1 => {
            // Intensity tables for the two codewords.
            let tbl: [&[i16; 4]; 2] = if punch_transparent {
                [
                    &ETC2_INTENSITY_A1[(control >> 5) as usize],
                    &ETC2_INTENSITY_A1[((control >> 2) & 0x07) as usize],
                ]
            } else {
                [
                    &ETC1_INTENSITY[(control >> 5) as usize],
                    &ETC1_INTENSITY[((control >> 2) & 0x07) as usize],
                ]
            };

            let mut subblock = ETC1_SUBBLOCK_MAPPING[(control & 0x01) as usize];
            for i in 0..16 {
                let px_idx = (((px_msb & 1) << 1) | (px_lsb & 1)) as usize;
                let p = &mut tile[ETC1_MAPPING[i] as usize];
                let cur_sub = (subblock & 1) as usize;
                px_msb >>= 1;
                px_lsb >>= 1;
                subblock >>= 1;

                if punch_transparent && px_idx == 2 {
                    // Punchthrough: pixel is completely transparent.
                    *p = 0;
                    continue;
                }

                let adj = tbl[cur_sub][px_idx] as i32;
                *p = clamp_to_argb(ColorRgb {
                    r: base[cur_sub].r + adj,
                    g: base[cur_sub].g + adj,
                    b: base[cur_sub].b + adj,
                });
            }
        }

        BlockMode::TH => {
            for i in 0..16 {
                let px_idx = (((px_msb & 1) << 1) | (px_lsb & 1)) as usize;
                let p = &mut tile[ETC1_MAPPING[i] as usize];
                px_msb >>= 1;
                px_lsb >>= 1;

                if punch_transparent && px_idx == 2 {
                    *p = 0;
                    continue;
                }

                // The pixel index selects the paint color directly.
                *p = paint[px_idx];
            }
        }

        BlockMode::Planar => {
            // Each pixel interpolates the three RGB676 colors.
            for i in 0..16 {
                let px = (i / 4) as i32;
                let py = (i % 4) as i32;
                let tmp = ColorRgb {
                    r: ((px * (base[1].r - base[0].r))
                        + (py * (base[2].r - base[0].r))
                        + (4 * base[0].r)
                        + 2)
                        >> 2,
                    g: ((px * (base[1].g - base[0].g))
                        + (py * (base[2].g - base[0].g))
                        + (4 * base[0].g)
                        + 2)
                        >> 2,
                    b: ((px * (base[1].b - base[0].b))
                        + (py * (base[2].b - base[0].b))
                        + (4 * base[0].b)
                        + 2)
                        >> 2,
                };
                tile[ETC1_MAPPING[i] as usize] = clamp_to_argb(tmp);
            }
        }
    }
}

/// Decodes an EAC block into one byte channel of the tile.
///
/// `shift` is the bit position of the target channel within an ARGB32
/// pixel (24 for alpha, 16 for red, 8 for green).
pub(crate) fn decode_eac(tile: &mut [u32; 16], block: &[u8; 8], shift: u32) {
    // Base codeword and multiplier. mult == 0 is not produced by encoders
    // but decoders must accept it.
    let base = block[0] as i32;
    let mult = (block[1] >> 4) as i32;
    let tbl = &ETC2_ALPHA[(block[1] & 0x0F) as usize];

    // 48-bit code field, consumed MSB-first.
    let mut codes = u64::from_be_bytes(*block) & 0x0000FFFFFFFFFFFF;

    for i in 0..16 {
        let code = ((codes >> 45) & 0x07) as usize;
        codes <<= 3;

        let value = (base + tbl[code] as i32 * mult).clamp(0, 255) as u32;

        let p = &mut tile[ETC1_MAPPING[i] as usize];
        *p = (*p & !(0xFF << shift)) | (value << shift);
    }
}
