//! SSSE3 fast path for 24-bit RGB.
//!
//! Sixteen pixels are expanded per iteration: three aligned 16-byte loads
//! cover 48 source bytes, `palignr` re-centers each 12-byte run of four
//! pixels, and `pshufb` scatters the triplets into dword lanes with the
//! alpha byte zeroed, which a final OR forces opaque.

#[cfg(target_arch = "x86")]
use core::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use core::arch::x86_64::*;

use texdec_common::Surface;

/// Shuffle for sources stored B, G, R (decoded format `Rgb888`).
static SHUF_BGR_BYTES: [u8; 16] = [0, 1, 2, 0x80, 3, 4, 5, 0x80, 6, 7, 8, 0x80, 9, 10, 11, 0x80];

/// Shuffle for sources stored R, G, B (decoded format `Bgr888`).
static SHUF_RGB_BYTES: [u8; 16] = [2, 1, 0, 0x80, 5, 4, 3, 0x80, 8, 7, 6, 0x80, 11, 10, 9, 0x80];

/// Converts `width`x`height` 24-bit pixels, sixteen at a time, with a scalar
/// tail handled by the portable row filler.
///
/// # Safety
///
/// - The CPU must support SSSE3.
/// - `src` must hold `src_stride * (height - 1) + width * 3` bytes.
/// - `src` must be 16-byte aligned and `src_stride` a multiple of 16.
#[target_feature(enable = "ssse3")]
pub(crate) unsafe fn fill_rows_ssse3(
    swap_rb: bool,
    width: usize,
    height: usize,
    src: &[u8],
    src_stride: usize,
    img: &mut Surface,
) {
    debug_assert_eq!(src.as_ptr() as usize % 16, 0);
    debug_assert_eq!(src_stride % 16, 0);

    let shuffle = if swap_rb {
        _mm_loadu_si128(SHUF_RGB_BYTES.as_ptr() as *const __m128i)
    } else {
        _mm_loadu_si128(SHUF_BGR_BYTES.as_ptr() as *const __m128i)
    };
    let alpha = _mm_set1_epi32(0xFF000000u32 as i32);

    let vec_px = width & !15;
    for y in 0..height {
        let src_row = src.as_ptr().add(y * src_stride);
        let dest_ptr = img.argb_row_mut(y).as_mut_ptr();

        let mut x = 0;
        while x < vec_px {
            // 48 source bytes; offsets stay 16-byte aligned because
            // x is a multiple of 16 (16 px * 3 bytes = 48).
            let base = src_row.add(x * 3) as *const __m128i;
            let v0 = _mm_load_si128(base);
            let v1 = _mm_load_si128(base.add(1));
            let v2 = _mm_load_si128(base.add(2));

            let p0 = v0; // bytes 0..15, pixels 0..3 in 0..11
            let p1 = _mm_alignr_epi8(v1, v0, 12); // bytes 12..27
            let p2 = _mm_alignr_epi8(v2, v1, 8); // bytes 24..39
            let p3 = _mm_srli_si128(v2, 4); // bytes 36..47

            let out = dest_ptr.add(x) as *mut __m128i;
            _mm_store_si128(out, _mm_or_si128(_mm_shuffle_epi8(p0, shuffle), alpha));
            _mm_store_si128(out.add(1), _mm_or_si128(_mm_shuffle_epi8(p1, shuffle), alpha));
            _mm_store_si128(out.add(2), _mm_or_si128(_mm_shuffle_epi8(p2, shuffle), alpha));
            _mm_store_si128(out.add(3), _mm_or_si128(_mm_shuffle_epi8(p3, shuffle), alpha));
            x += 16;
        }
    }

    // Scalar tail columns.
    if vec_px < width {
        fill_tail_portable(swap_rb, vec_px, width, height, src, src_stride, img);
    }
}

fn fill_tail_portable(
    swap_rb: bool,
    x0: usize,
    width: usize,
    height: usize,
    src: &[u8],
    src_stride: usize,
    img: &mut Surface,
) {
    for y in 0..height {
        let src_row = &src[y * src_stride..y * src_stride + width * 3];
        let dest_row = img.argb_row_mut(y);
        for x in x0..width {
            let px = &src_row[x * 3..x * 3 + 3];
            let (b, g, r) = if swap_rb {
                (px[2], px[1], px[0])
            } else {
                (px[0], px[1], px[2])
            };
            dest_row[x] = 0xFF000000 | ((r as u32) << 16) | ((g as u32) << 8) | (b as u32);
        }
    }
}
