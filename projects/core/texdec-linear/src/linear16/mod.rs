//! Linear 16-bit decoders.
//!
//! The portable path converts one pixel at a time through the kernels in
//! `texdec_common::pixel_convert`. On x86 an SSE2 path handles the common
//! 15/16-bit RGB layouts eight pixels at a time; it is only taken when the
//! source rows are 16-byte aligned, otherwise this call silently uses the
//! portable path (per-call fallback, not a permanent downgrade).

#[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
mod sse2;

use texdec_common::pixel_convert::*;
use texdec_common::{DecodeError, PixelFormat, SignificantBits, Surface, SurfaceFormat};

use crate::util::{read_u16_le, validate_linear_args};

/// Returns the scalar kernel and significant-bits record for a 16-bit format.
pub(crate) fn kernel_for(
    px_format: PixelFormat,
) -> Result<(fn(u16) -> u32, SignificantBits), DecodeError> {
    use PixelFormat::*;
    let pair: (fn(u16) -> u32, SignificantBits) = match px_format {
        // 16-bit RGB
        Rgb565 => (rgb565_to_argb32, SignificantBits::new(5, 6, 5, 0, 0)),
        Bgr565 => (bgr565_to_argb32, SignificantBits::new(5, 6, 5, 0, 0)),
        Argb1555 => (argb1555_to_argb32, SignificantBits::new(5, 5, 5, 0, 1)),
        Abgr1555 => (abgr1555_to_argb32, SignificantBits::new(5, 5, 5, 0, 1)),
        Rgba5551 => (rgba5551_to_argb32, SignificantBits::new(5, 5, 5, 0, 1)),
        Bgra5551 => (bgra5551_to_argb32, SignificantBits::new(5, 5, 5, 0, 1)),
        Argb4444 => (argb4444_to_argb32, SignificantBits::new(4, 4, 4, 0, 4)),
        Abgr4444 => (abgr4444_to_argb32, SignificantBits::new(4, 4, 4, 0, 4)),
        Rgba4444 => (rgba4444_to_argb32, SignificantBits::new(4, 4, 4, 0, 4)),
        Bgra4444 => (bgra4444_to_argb32, SignificantBits::new(4, 4, 4, 0, 4)),
        Xrgb4444 => (xrgb4444_to_argb32, SignificantBits::new(4, 4, 4, 0, 4)),
        Xbgr4444 => (xbgr4444_to_argb32, SignificantBits::new(4, 4, 4, 0, 4)),
        Rgbx4444 => (rgbx4444_to_argb32, SignificantBits::new(4, 4, 4, 0, 4)),
        Bgrx4444 => (bgrx4444_to_argb32, SignificantBits::new(4, 4, 4, 0, 4)),
        Argb8332 => (argb8332_to_argb32, SignificantBits::new(3, 3, 2, 0, 8)),

        // PlayStation 2
        Bgr5A3 => (bgr5a3_to_argb32, SignificantBits::new(5, 5, 5, 0, 4)),

        // 15-bit RGB
        Rgb555 => (rgb555_to_argb32, SignificantBits::new(5, 5, 5, 0, 0)),
        Bgr555 => (bgr555_to_argb32, SignificantBits::new(5, 5, 5, 0, 0)),

        // IA8
        Ia8 => (ia8_to_argb32, SignificantBits::new(8, 8, 8, 8, 8)),

        // Luminance. 16-bit luminance is downconverted to 8.
        L16 => (l16_to_argb32, SignificantBits::new(8, 8, 8, 8, 0)),
        A8L8 => (a8l8_to_argb32, SignificantBits::new(8, 8, 8, 8, 8)),
        L8A8 => (l8a8_to_argb32, SignificantBits::new(8, 8, 8, 8, 8)),

        // RG formats.
        // NOTE: Have to claim 1 bit for the empty Blue channel.
        Rg88 => (rg88_to_argb32, SignificantBits::new(8, 8, 1, 0, 0)),
        Gr88 => (gr88_to_argb32, SignificantBits::new(8, 8, 1, 0, 0)),

        _ => return Err(DecodeError::UnsupportedPixelFormat(px_format)),
    };
    Ok(pair)
}

/// Decodes a linear 16-bit image to an ARGB32 surface.
///
/// Source pixels are little-endian. `stride` is the source row pitch in
/// bytes; 0 means tightly packed.
pub fn from_linear16(
    px_format: PixelFormat,
    width: usize,
    height: usize,
    src: &[u8],
    stride: usize,
) -> Result<Surface, DecodeError> {
    let (convert, sbit) = kernel_for(px_format)?;
    let src_stride = validate_linear_args(2, width, height, src.len(), stride)?;

    let mut img = Surface::new(width, height, SurfaceFormat::Argb32)?;

    #[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
    {
        #[cfg(not(feature = "no-runtime-cpu-detection"))]
        let have_sse2 = texdec_common::cpu_detect::has_sse2();
        #[cfg(feature = "no-runtime-cpu-detection")]
        let have_sse2 = cfg!(target_feature = "sse2");

        if have_sse2
            && sse2::is_accelerated_format(px_format)
            && src.as_ptr() as usize % 16 == 0
            && src_stride % 16 == 0
        {
            unsafe {
                sse2::fill_rows_sse2(px_format, convert, width, height, src, src_stride, &mut img);
            }
            img.set_significant_bits(sbit);
            return Ok(img);
        }
    }

    fill_rows_portable(convert, width, height, src, src_stride, &mut img);
    img.set_significant_bits(sbit);
    Ok(img)
}

pub(crate) fn fill_rows_portable(
    convert: fn(u16) -> u32,
    width: usize,
    height: usize,
    src: &[u8],
    src_stride: usize,
    img: &mut Surface,
) {
    for y in 0..height {
        let src_row = &src[y * src_stride..y * src_stride + width * 2];
        for (x, dest) in img.argb_row_mut(y).iter_mut().enumerate() {
            *dest = convert(read_u16_le(src_row, x * 2));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn rgb565_two_by_two() {
        // Red, green, blue, black.
        let src = [0x00, 0xF8, 0xE0, 0x07, 0x1F, 0x00, 0x00, 0x00];
        let img = from_linear16(PixelFormat::Rgb565, 2, 2, &src, 0).unwrap();
        assert_eq!(img.pixel(0, 0), 0xFFFF0000);
        assert_eq!(img.pixel(1, 0), 0xFF00FF00);
        assert_eq!(img.pixel(0, 1), 0xFF0000FF);
        assert_eq!(img.pixel(1, 1), 0xFF000000);
        let sbit = img.significant_bits().unwrap();
        assert_eq!((sbit.red, sbit.green, sbit.blue), (5, 6, 5));
    }

    #[rstest]
    #[case(PixelFormat::Argb1555, 0xFFFF, 0xFFFFFFFF)]
    #[case(PixelFormat::Argb1555, 0x7FFF, 0x00FFFFFF)]
    #[case(PixelFormat::Rgba5551, 0xFFFE, 0x00FFFFFF)]
    #[case(PixelFormat::Argb4444, 0x0FFF, 0x00FFFFFF)]
    #[case(PixelFormat::Ia8, 0x80FF, 0xFF808080)]
    fn single_pixel_values(#[case] format: PixelFormat, #[case] px: u16, #[case] expected: u32) {
        let src = px.to_le_bytes();
        let img = from_linear16(format, 1, 1, &src, 0).unwrap();
        assert_eq!(img.pixel(0, 0), expected);
    }

    #[test]
    fn exact_size_ok_one_byte_short_fails() {
        let src = [0u8; 8];
        assert!(from_linear16(PixelFormat::Rgb565, 2, 2, &src, 0).is_ok());
        assert!(matches!(
            from_linear16(PixelFormat::Rgb565, 2, 2, &src[..7], 0),
            Err(DecodeError::SourceTooSmall { .. })
        ));
    }

    // Wide enough to exercise the 8-pixel SSE2 loop plus a scalar remainder
    // on x86; elsewhere it simply runs the portable path twice.
    #[test]
    fn wide_row_matches_scalar_kernel() {
        let width = 19;
        let mut src = alloc::vec![0u8; width * 2 * 2];
        for x in 0..width * 2 {
            let px = ((x * 2654435761) & 0xFFFF) as u16;
            src[x * 2..x * 2 + 2].copy_from_slice(&px.to_le_bytes());
        }
        let img = from_linear16(PixelFormat::Rgb565, width, 2, &src, 0).unwrap();
        for y in 0..2 {
            for x in 0..width {
                let raw = read_u16_le(&src, (y * width + x) * 2);
                assert_eq!(img.pixel(x, y), rgb565_to_argb32(raw), "mismatch at {x},{y}");
            }
        }
    }
}
