//! SSSE3 fast path for the 32-bit byte-swizzle formats.
//!
//! One `pshufb` reorders four pixels at a time; bytes the format leaves
//! undefined are zeroed by the shuffle and forced opaque with an OR mask.

#[cfg(target_arch = "x86")]
use core::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use core::arch::x86_64::*;

use texdec_common::Surface;

use super::ByteSwizzle;

/// Converts `width`x`height` 32-bit pixels, eight at a time, with a scalar
/// tail.
///
/// # Safety
///
/// - The CPU must support SSSE3.
/// - `src` must hold `src_stride * (height - 1) + width * 4` bytes.
/// - `src` must be 16-byte aligned and `src_stride` a multiple of 16.
#[target_feature(enable = "ssse3")]
pub(crate) unsafe fn fill_rows_ssse3(
    swizzle: ByteSwizzle,
    width: usize,
    height: usize,
    src: &[u8],
    src_stride: usize,
    img: &mut Surface,
) {
    debug_assert_eq!(src.as_ptr() as usize % 16, 0);
    debug_assert_eq!(src_stride % 16, 0);

    // Expand the 4-byte swizzle to a whole-register pshufb control plus the
    // alpha OR mask for `None` (forced 0xFF) entries.
    let mut shuf = [0u8; 16];
    let mut or_mask = [0u8; 16];
    for px in 0..4 {
        for byte in 0..4 {
            match swizzle.map[byte] {
                Some(i) => shuf[px * 4 + byte] = px as u8 * 4 + i,
                None => {
                    shuf[px * 4 + byte] = 0x80;
                    or_mask[px * 4 + byte] = 0xFF;
                }
            }
        }
    }
    let shuf = _mm_loadu_si128(shuf.as_ptr() as *const __m128i);
    let or_mask = _mm_loadu_si128(or_mask.as_ptr() as *const __m128i);

    let vec_px = width & !7;
    for y in 0..height {
        let src_row = src.as_ptr().add(y * src_stride);
        let dest_row = img.argb_row_mut(y);
        let dest_ptr = dest_row.as_mut_ptr();

        let mut x = 0;
        while x < vec_px {
            let base = src_row.add(x * 4) as *const __m128i;
            let v0 = _mm_load_si128(base);
            let v1 = _mm_load_si128(base.add(1));
            let out = dest_ptr.add(x) as *mut __m128i;
            _mm_store_si128(out, _mm_or_si128(_mm_shuffle_epi8(v0, shuf), or_mask));
            _mm_store_si128(out.add(1), _mm_or_si128(_mm_shuffle_epi8(v1, shuf), or_mask));
            x += 8;
        }

        // Scalar tail columns.
        let src_row = &src[y * src_stride..y * src_stride + width * 4];
        for x in vec_px..width {
            let px = &src_row[x * 4..x * 4 + 4];
            dest_row[x] = swizzle.apply([px[0], px[1], px[2], px[3]]);
        }
    }
}
