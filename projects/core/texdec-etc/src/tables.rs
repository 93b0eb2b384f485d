//! ETC1/ETC2 constant tables.
//!
//! References:
//! - <https://www.khronos.org/registry/OpenGL/extensions/OES/OES_compressed_ETC1_RGB8_texture.txt>
//! - <https://registry.khronos.org/DataFormat/specs/1.1/dataformat.1.1.html#ETC2>

// Pixel index values are (msb << 1) | lsb. The intensity tables below are
// rearranged into that ascending two-bit order instead of the spec's
// modifier-table order:
//   0: small positive, 1: large positive, 2: small negative, 3: large negative

/// Intensity modifier sets, indexed by table codeword then pixel index.
pub(crate) static ETC1_INTENSITY: [[i16; 4]; 8] = [
    [2, 8, -2, -8],
    [5, 17, -5, -17],
    [9, 29, -9, -29],
    [13, 42, -13, -42],
    [18, 60, -18, -60],
    [24, 80, -24, -80],
    [33, 106, -33, -106],
    [47, 183, -47, -183],
];

/// Intensity modifier sets for ETC2 punchthrough blocks whose opaque bit is
/// clear: the "small" modifiers collapse to zero.
pub(crate) static ETC2_INTENSITY_A1: [[i16; 4]; 8] = [
    [0, 8, 0, -8],
    [0, 17, 0, -17],
    [0, 29, 0, -29],
    [0, 42, 0, -42],
    [0, 60, 0, -60],
    [0, 80, 0, -80],
    [0, 106, 0, -106],
    [0, 183, 0, -183],
];

/// ETC1 arranges pixels by column, then by row. This maps the bit position
/// back to a raster-order tile index.
pub(crate) static ETC1_MAPPING: [u8; 16] = [0, 4, 8, 12, 1, 5, 9, 13, 2, 6, 10, 14, 3, 7, 11, 15];

/// Subblock membership per flip bit: bit i is set if ETC1-arranged pixel i
/// belongs to subblock 1.
pub(crate) static ETC1_SUBBLOCK_MAPPING: [u16; 2] = [
    // flip == 0: left 2x4 / right 2x4
    0xFF00,
    // flip == 1: top 4x2 / bottom 4x2
    0xCCCC,
];

/// 3-bit two's complement lookup table.
pub(crate) static ETC1_3BIT_DIFF: [i8; 8] = [0, 1, 2, 3, -4, -3, -2, -1];

/// ETC2 distance table for the T and H modes.
pub(crate) static ETC2_DIST: [u8; 8] = [3, 6, 11, 16, 23, 32, 41, 64];

/// EAC alpha modifier tables, indexed by table selector then 3-bit code.
pub(crate) static ETC2_ALPHA: [[i8; 8]; 16] = [
    [-3, -6, -9, -15, 2, 5, 8, 14],
    [-3, -7, -10, -13, 2, 6, 9, 12],
    [-2, -5, -8, -13, 1, 4, 7, 12],
    [-2, -4, -6, -13, 1, 3, 5, 12],
    [-3, -6, -8, -12, 2, 5, 7, 11],
    [-3, -7, -9, -11, 2, 6, 8, 10],
    [-4, -7, -8, -11, 3, 6, 7, 10],
    [-3, -5, -8, -11, 2, 4, 7, 10],
    [-2, -6, -8, -10, 1, 5, 7, 9],
    [-2, -5, -8, -10, 1, 4, 7, 9],
    [-2, -4, -8, -10, 1, 3, 7, 9],
    [-2, -5, -7, -10, 1, 4, 6, 9],
    [-3, -4, -7, -10, 2, 3, 6, 9],
    [-1, -2, -3, -10, 0, 1, 2, 9],
    [-4, -6, -8, -9, 3, 5, 7, 8],
    [-3, -5, -7, -9, 2, 4, 6, 8],
];

// The extension helpers compute in u32 and truncate: an out-of-range input
// (possible when ETC1 decoding is forced on a block ETC2 would treat as
// T/H/Planar) must wrap the way the packed math does, not overflow.

/// Extends a 4-bit color component to 8 bits.
#[inline]
pub(crate) const fn extend_4to8(value: u8) -> u8 {
    let v = value as u32;
    ((v << 4) | v) as u8
}

/// Extends a 5-bit color component to 8 bits.
#[inline]
pub(crate) const fn extend_5to8(value: u8) -> u8 {
    let v = value as u32;
    ((v << 3) | (v >> 2)) as u8
}

/// Extends a 6-bit color component to 8 bits.
#[inline]
pub(crate) const fn extend_6to8(value: u8) -> u8 {
    let v = value as u32;
    ((v << 2) | (v >> 4)) as u8
}

/// Extends a 7-bit color component to 8 bits.
#[inline]
pub(crate) const fn extend_7to8(value: u8) -> u8 {
    let v = value as u32;
    ((v << 1) | (v >> 6)) as u8
}
