//! SSE2 fast path for the common 15/16-bit RGB layouts.
//!
//! Eight pixels are converted per iteration: the packed channels are masked
//! and widened inside 16-bit lanes, recombined into G|B and A|R lane pairs,
//! then interleaved into ARGB32 dwords with `punpcklwd`/`punpckhwd`.
//!
//! Callers guarantee the source rows are 16-byte aligned (pointer and
//! stride); destination rows are always aligned by construction.

#[cfg(target_arch = "x86")]
use core::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use core::arch::x86_64::*;

use texdec_common::{PixelFormat, Surface};

use crate::util::read_u16_le;

/// Formats with an SSE2 kernel. Everything else takes the portable path.
#[inline]
pub(crate) fn is_accelerated_format(px_format: PixelFormat) -> bool {
    matches!(
        px_format,
        PixelFormat::Rgb565 | PixelFormat::Rgb555 | PixelFormat::Argb1555
    )
}

/// Converts `width`x`height` pixels, eight at a time, with a scalar tail.
///
/// # Safety
///
/// - The CPU must support SSE2.
/// - `src` must hold `src_stride * (height - 1) + width * 2` bytes.
/// - `src` must be 16-byte aligned and `src_stride` a multiple of 16.
#[target_feature(enable = "sse2")]
pub(crate) unsafe fn fill_rows_sse2(
    px_format: PixelFormat,
    scalar: fn(u16) -> u32,
    width: usize,
    height: usize,
    src: &[u8],
    src_stride: usize,
    img: &mut Surface,
) {
    debug_assert_eq!(src.as_ptr() as usize % 16, 0);
    debug_assert_eq!(src_stride % 16, 0);

    match px_format {
        PixelFormat::Rgb565 => fill_rows(width, height, src, src_stride, img, scalar, convert8_rgb565),
        PixelFormat::Rgb555 => fill_rows(width, height, src, src_stride, img, scalar, convert8_rgb555),
        PixelFormat::Argb1555 => {
            fill_rows(width, height, src, src_stride, img, scalar, convert8_argb1555)
        }
        _ => unreachable!("not an SSE2-accelerated format"),
    }
}

#[target_feature(enable = "sse2")]
#[inline]
unsafe fn fill_rows(
    width: usize,
    height: usize,
    src: &[u8],
    src_stride: usize,
    img: &mut Surface,
    scalar: fn(u16) -> u32,
    convert8: unsafe fn(__m128i) -> (__m128i, __m128i),
) {
    let vec_px = width & !7;
    for y in 0..height {
        let src_row = src.as_ptr().add(y * src_stride);
        let dest_row = img.argb_row_mut(y);
        let dest_ptr = dest_row.as_mut_ptr();

        let mut x = 0;
        while x < vec_px {
            let v = _mm_load_si128(src_row.add(x * 2) as *const __m128i);
            let (lo, hi) = convert8(v);
            _mm_store_si128(dest_ptr.add(x) as *mut __m128i, lo);
            _mm_store_si128(dest_ptr.add(x + 4) as *mut __m128i, hi);
            x += 8;
        }

        // Scalar tail for widths that are not a multiple of 8.
        let src_row = &src[y * src_stride..y * src_stride + width * 2];
        for x in vec_px..width {
            dest_row[x] = scalar(read_u16_le(src_row, x * 2));
        }
    }
}

/// Interleaves per-lane `G<<8|B` and `A<<8|R` words into two ARGB32 vectors.
#[inline(always)]
unsafe fn interleave(gb: __m128i, ar: __m128i) -> (__m128i, __m128i) {
    (_mm_unpacklo_epi16(gb, ar), _mm_unpackhi_epi16(gb, ar))
}

#[inline(always)]
unsafe fn convert8_rgb565(v: __m128i) -> (__m128i, __m128i) {
    let mask5 = _mm_set1_epi16(0x1F);
    let mask6 = _mm_set1_epi16(0x3F);

    let b5 = _mm_and_si128(v, mask5);
    let b8 = _mm_or_si128(_mm_slli_epi16(b5, 3), _mm_srli_epi16(b5, 2));

    let g6 = _mm_and_si128(_mm_srli_epi16(v, 5), mask6);
    let g8 = _mm_or_si128(_mm_slli_epi16(g6, 2), _mm_srli_epi16(g6, 4));

    let r5 = _mm_srli_epi16(v, 11);
    let r8 = _mm_or_si128(_mm_slli_epi16(r5, 3), _mm_srli_epi16(r5, 2));

    let gb = _mm_or_si128(_mm_slli_epi16(g8, 8), b8);
    let ar = _mm_or_si128(_mm_set1_epi16(0xFF00u16 as i16), r8);
    interleave(gb, ar)
}

#[inline(always)]
unsafe fn convert8_rgb555(v: __m128i) -> (__m128i, __m128i) {
    let mask5 = _mm_set1_epi16(0x1F);

    let b5 = _mm_and_si128(v, mask5);
    let b8 = _mm_or_si128(_mm_slli_epi16(b5, 3), _mm_srli_epi16(b5, 2));

    let g5 = _mm_and_si128(_mm_srli_epi16(v, 5), mask5);
    let g8 = _mm_or_si128(_mm_slli_epi16(g5, 3), _mm_srli_epi16(g5, 2));

    let r5 = _mm_and_si128(_mm_srli_epi16(v, 10), mask5);
    let r8 = _mm_or_si128(_mm_slli_epi16(r5, 3), _mm_srli_epi16(r5, 2));

    let gb = _mm_or_si128(_mm_slli_epi16(g8, 8), b8);
    let ar = _mm_or_si128(_mm_set1_epi16(0xFF00u16 as i16), r8);
    interleave(gb, ar)
}

#[inline(always)]
unsafe fn convert8_argb1555(v: __m128i) -> (__m128i, __m128i) {
    let mask5 = _mm_set1_epi16(0x1F);

    let b5 = _mm_and_si128(v, mask5);
    let b8 = _mm_or_si128(_mm_slli_epi16(b5, 3), _mm_srli_epi16(b5, 2));

    let g5 = _mm_and_si128(_mm_srli_epi16(v, 5), mask5);
    let g8 = _mm_or_si128(_mm_slli_epi16(g5, 3), _mm_srli_epi16(g5, 2));

    let r5 = _mm_and_si128(_mm_srli_epi16(v, 10), mask5);
    let r8 = _mm_or_si128(_mm_slli_epi16(r5, 3), _mm_srli_epi16(r5, 2));

    // Arithmetic shift smears the alpha bit across the whole lane; keep the
    // high byte only.
    let a8 = _mm_and_si128(_mm_srai_epi16(v, 15), _mm_set1_epi16(0xFF00u16 as i16));

    let gb = _mm_or_si128(_mm_slli_epi16(g8, 8), b8);
    let ar = _mm_or_si128(a8, r8);
    interleave(gb, ar)
}
