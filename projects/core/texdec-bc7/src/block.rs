//! BC7 block decoding.
//!
//! BC7 has eight block modes with varying properties, including bitfields of
//! different lengths. The only guaranteed layout is 128-bit little-endian,
//! represented here as two u64 halves that are shifted down as each field is
//! consumed.

use texdec_common::Argb32;

use crate::tables::*;

/// A BC7 block as two 64-bit words, consumed LSB-first.
pub(crate) struct Bc7Block {
    lsb: u64,
    msb: u64,
}

impl Bc7Block {
    pub(crate) fn new(bytes: &[u8; 16]) -> Self {
        Self {
            lsb: u64::from_le_bytes(bytes[0..8].try_into().unwrap()),
            msb: u64::from_le_bytes(bytes[8..16].try_into().unwrap()),
        }
    }

    /// Right-shifts the two words as if they were one 128-bit value.
    /// `shamt` must be less than 64.
    #[inline]
    fn rshift128(&mut self, shamt: u32) {
        debug_assert!(shamt < 64);
        if shamt == 0 {
            return;
        }
        self.lsb >>= shamt;
        self.lsb |= self.msb << (64 - shamt);
        self.msb >>= shamt;
    }
}

/// Interpolates one color component between two endpoints.
fn interpolate_component(bits: u32, index: u32, e0: u8, e1: u8) -> u8 {
    debug_assert!((2..=4).contains(&bits));
    debug_assert!(index < (1 << bits));

    // Endpoint shortcuts.
    if index == 0 {
        return e0;
    } else if index == (1 << bits) - 1 {
        return e1;
    }

    let weight = match bits {
        2 => WEIGHT2[index as usize],
        3 => WEIGHT3[index as usize],
        _ => WEIGHT4[index as usize],
    } as u32;

    (((64 - weight) * e0 as u32 + weight * e1 as u32 + 32) >> 6) as u8
}

/// Anchor position for `subset` within a partition. Subset 0 is always
/// anchored at pixel 0.
fn anchor_index(partition: u8, subset: u8, subset_count: u8) -> u8 {
    if subset == 0 {
        return 0;
    }
    match subset_count {
        2 => ANCHOR_SUBSET2_OF2[partition as usize],
        3 => {
            if subset == 1 {
                ANCHOR_SUBSET2_OF3[partition as usize]
            } else {
                ANCHOR_SUBSET3_OF3[partition as usize]
            }
        }
        _ => {
            debug_assert!(false, "invalid subset count");
            0
        }
    }
}

/// Decodes one 128-bit BC7 block into a 4x4 tile.
///
/// A block with an invalid mode (first byte zero) zero-fills the tile; the
/// caller continues with the next block.
pub(crate) fn decode_bc7_block(tile: &mut [Argb32; 16], bytes: &[u8; 16]) {
    let mut block = Bc7Block::new(bytes);

    // Mode is encoded unary: the position of the lowest set bit of the
    // first dword.
    let dword0 = block.lsb as u32;
    let mode = if dword0 == 0 { 32 } else { dword0.trailing_zeros() } as usize;
    if mode >= 8 {
        // Invalid mode. The block is corrupt; blank the tile and let the
        // caller continue with the rest of the image.
        tile.fill(Argb32::from_u32(0));
        return;
    }
    block.rshift128(mode as u32 + 1);

    // Rotation mode (modes 4 and 5 only):
    // - 0: no swap; 1: swap A/R; 2: swap A/G; 3: swap A/B
    let rotation_mode = if mode == 4 || mode == 5 {
        let r = (block.lsb & 3) as u8;
        block.rshift128(2);
        r
    } else {
        0
    };

    // Mode 4 has both 2-bit and 3-bit index planes; this bit selects which
    // one carries color (the other carries alpha).
    let idx_mode_m4 = if mode == 4 {
        let b = (block.lsb & 1) as u8;
        block.rshift128(1);
        b
    } else {
        0
    };

    // Subset/partition.
    let mut partition = 0u8;
    let mut subset = 0u32;
    if PARTITION_BITS[mode] != 0 {
        partition = (block.lsb & ((1u64 << PARTITION_BITS[mode]) - 1)) as u8;
        block.rshift128(PARTITION_BITS[mode] as u32);
        subset = match SUBSET_COUNT[mode] {
            2 => BC7_2SUB[partition as usize],
            3 => BC7_3SUB[partition as usize],
            _ => 0,
        };
    }

    // Extract the endpoint components. They are stored grouped by component
    // (all R, then all G, then all B), MSB-aligned into 8 bits here.
    let endpoint_count = ENDPOINT_COUNT[mode] as usize;
    let mut endpoint_bits = ENDPOINT_BITS[mode] as u32;
    let endpoint_mask = (1u64 << endpoint_bits) - 1;
    let endpoint_shamt = 8 - endpoint_bits;
    let mut endpoints = [[0u8; 3]; 6];
    for comp in 0..3 {
        for ep in endpoints.iter_mut().take(endpoint_count) {
            ep[comp] = ((block.lsb & endpoint_mask) << endpoint_shamt) as u8;
            block.rshift128(endpoint_bits);
        }
    }

    // Alpha components, one per endpoint where the mode has them.
    let mut alpha_bits = ALPHA_BITS[mode] as u32;
    let mut alpha = [255u8; 4];
    if alpha_bits != 0 {
        let alpha_mask = (1u64 << alpha_bits) - 1;
        let alpha_shamt = 8 - alpha_bits;
        for a in alpha.iter_mut().take(endpoint_count) {
            *a = ((block.lsb & alpha_mask) << alpha_shamt) as u8;
            block.rshift128(alpha_bits);
        }
    }

    // P-bits extend endpoint (and alpha) precision by one bit.
    if PBIT_COUNT[mode] != 0 {
        if mode == 1 {
            // Mode 1: one P-bit per subset, shared by both endpoints.
            if block.lsb & 1 != 0 {
                for c in 0..3 {
                    endpoints[0][c] |= 0x02;
                    endpoints[1][c] |= 0x02;
                }
            }
            if block.lsb & 2 != 0 {
                for c in 0..3 {
                    endpoints[2][c] |= 0x02;
                    endpoints[3][c] |= 0x02;
                }
            }
            block.rshift128(2);
        } else {
            // Other modes: a unique P-bit per endpoint.
            let lsb8 = (block.lsb & 0xFF) as u32;
            let p_ep_shamt = 7 - endpoint_bits;
            for (i, ep) in endpoints.iter_mut().take(endpoint_count).enumerate() {
                if (lsb8 >> i) & 1 != 0 {
                    for c in ep.iter_mut() {
                        *c |= 1 << p_ep_shamt;
                    }
                }
            }

            if alpha_bits > 0 {
                let p_a_shamt = 7 - alpha_bits;
                for (i, a) in alpha.iter_mut().take(endpoint_count).enumerate() {
                    *a |= (((lsb8 >> i) & 1) as u8) << p_a_shamt;
                }
                alpha_bits += 1;
            }

            block.rshift128(endpoint_count as u32);
        }
        endpoint_bits += 1;
    }

    // Widen to 8 bits by MSB replication.
    if endpoint_bits < 8 {
        for ep in endpoints.iter_mut().take(endpoint_count) {
            for c in ep.iter_mut() {
                *c |= *c >> endpoint_bits;
            }
        }
    }
    if alpha_bits != 0 && alpha_bits < 8 {
        for a in alpha.iter_mut().take(endpoint_count) {
            *a |= *a >> alpha_bits;
        }
    }

    // Index data. Everything left fits in the LSB word except mode 4's
    // 3-bit plane, which straddles the halves.
    let mut index_bits = INDEX_BITS[mode] as u32;
    let mut idx_data: u64;
    let index_mask: u32;
    if mode == 4 {
        if idx_mode_m4 != 0 {
            // Color data uses the 3-bit plane. 50 bits have been consumed,
            // so the plane spans lsb[31..] and the low msb bits.
            idx_data = (block.msb << 33) | (block.lsb >> 31);
            index_bits = 3;
            index_mask = (1 << 3) - 1;
        } else {
            idx_data = block.lsb & ((1u64 << 31) - 1);
            index_bits = 2;
            index_mask = (1 << 2) - 1;
        }
    } else {
        idx_data = block.lsb;
        index_mask = (1u32 << index_bits) - 1;
    }

    // Anchor positions per subset.
    let subset_count = SUBSET_COUNT[mode];
    let mut anchors = [0u8; 4];
    for (i, a) in anchors.iter_mut().enumerate().take(subset_count as usize).skip(1) {
        *a = anchor_index(partition, i as u8, subset_count);
    }

    // Color indexes.
    let mut subset_data = subset;
    for (i, px) in tile.iter_mut().enumerate() {
        let subset_idx = (subset_data & 3) as usize;
        subset_data >>= 2;
        debug_assert!(subset_idx != 3);

        // The anchor position's high index bit is implicitly zero and is
        // not stored.
        let data_idx = if i == anchors[subset_idx] as usize {
            let v = (idx_data as u32) & (index_mask >> 1);
            idx_data >>= index_bits - 1;
            v
        } else {
            let v = (idx_data as u32) & index_mask;
            idx_data >>= index_bits;
            v
        };

        let ep = subset_idx * 2;
        px.r = interpolate_component(index_bits, data_idx, endpoints[ep][0], endpoints[ep + 1][0]);
        px.g = interpolate_component(index_bits, data_idx, endpoints[ep][1], endpoints[ep + 1][1]);
        px.b = interpolate_component(index_bits, data_idx, endpoints[ep][2], endpoints[ep + 1][2]);
    }

    // Alpha.
    if mode == 4 {
        // The plane not used for color carries alpha.
        let (mut idx_data, index_bits, index_mask) = if idx_mode_m4 != 0 {
            (block.lsb & ((1u64 << 31) - 1), 2u32, (1u32 << 2) - 1)
        } else {
            ((block.msb << 33) | (block.lsb >> 31), 3u32, (1u32 << 3) - 1)
        };

        let mut subset_data = subset;
        for (i, px) in tile.iter_mut().enumerate() {
            let subset_idx = (subset_data & 3) as usize;
            subset_data >>= 2;

            let data_idx = if i == anchors[subset_idx] as usize {
                let v = (idx_data as u32) & (index_mask >> 1);
                idx_data >>= index_bits - 1;
                v
            } else {
                let v = (idx_data as u32) & index_mask;
                idx_data >>= index_bits;
                v
            };

            px.a = interpolate_component(index_bits, data_idx, alpha[0], alpha[1]);
        }
    } else if alpha_bits == 0 {
        for px in tile.iter_mut() {
            px.a = 255;
        }
    } else {
        // Mode 5 stores separate alpha indexes after the color indexes;
        // the rest share the color index data.
        let mut idx_data = if mode == 5 { block.lsb >> 31 } else { block.lsb };
        let mut subset_data = subset;
        for (i, px) in tile.iter_mut().enumerate() {
            let subset_idx = (subset_data & 3) as usize;
            subset_data >>= 2;

            let data_idx = if i == anchors[subset_idx] as usize {
                let v = (idx_data as u32) & (index_mask >> 1);
                idx_data >>= index_bits - 1;
                v
            } else {
                let v = (idx_data as u32) & index_mask;
                idx_data >>= index_bits;
                v
            };

            let ep = subset_idx * 2;
            px.a = interpolate_component(index_bits, data_idx, alpha[ep], alpha[ep + 1]);
        }
    }

    // Component rotation.
    match rotation_mode & 3 {
        1 => {
            for px in tile.iter_mut() {
                core::mem::swap(&mut px.a, &mut px.r);
            }
        }
        2 => {
            for px in tile.iter_mut() {
                core::mem::swap(&mut px.a, &mut px.g);
            }
        }
        3 => {
            for px in tile.iter_mut() {
                core::mem::swap(&mut px.a, &mut px.b);
            }
        }
        _ => {}
    }
}
