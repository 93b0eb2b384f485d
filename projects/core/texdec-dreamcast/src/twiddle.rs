//! PowerVR twiddle (Morton order) addressing.

use alloc::vec::Vec;

/// Builds the twiddle map for one axis of a `dim`-sized texture.
///
/// `map[i]` spreads the bits of `i` so that interleaving two mapped
/// coordinates (`map[x] << 1 | map[y]`) yields the Morton-order offset.
/// The table is scratch for a single decode.
pub(crate) fn twiddle_map(dim: usize) -> Vec<u32> {
    let mut map = Vec::with_capacity(dim);
    for i in 0..dim as u32 {
        let mut spread = 0u32;
        let mut j = 0;
        let mut k = 1u32;
        while k <= i {
            spread |= (i & k) << j;
            j += 1;
            k <<= 1;
        }
        map.push(spread);
    }
    map
}
