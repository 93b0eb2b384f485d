//! Linear 24-bit decoders.

#[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
mod ssse3;

use texdec_common::{DecodeError, PixelFormat, SignificantBits, Surface, SurfaceFormat};

use crate::util::validate_linear_args;

/// Decodes a linear 24-bit image to an ARGB32 surface.
///
/// [`PixelFormat::Rgb888`] stores bytes as B, G, R; [`PixelFormat::Bgr888`]
/// as R, G, B. `stride` is the source row pitch in bytes; 0 means tightly
/// packed.
pub fn from_linear24(
    px_format: PixelFormat,
    width: usize,
    height: usize,
    src: &[u8],
    stride: usize,
) -> Result<Surface, DecodeError> {
    let swap_rb = match px_format {
        PixelFormat::Rgb888 => false,
        PixelFormat::Bgr888 => true,
        _ => return Err(DecodeError::UnsupportedPixelFormat(px_format)),
    };

    let src_stride = validate_linear_args(3, width, height, src.len(), stride)?;

    let mut img = Surface::new(width, height, SurfaceFormat::Argb32)?;

    #[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
    {
        #[cfg(not(feature = "no-runtime-cpu-detection"))]
        let have_ssse3 = texdec_common::cpu_detect::has_ssse3();
        #[cfg(feature = "no-runtime-cpu-detection")]
        let have_ssse3 = cfg!(target_feature = "ssse3");

        if have_ssse3 && src.as_ptr() as usize % 16 == 0 && src_stride % 16 == 0 {
            unsafe {
                ssse3::fill_rows_ssse3(swap_rb, width, height, src, src_stride, &mut img);
            }
            img.set_significant_bits(SignificantBits::new(8, 8, 8, 0, 0));
            return Ok(img);
        }
    }

    fill_rows_portable(swap_rb, width, height, src, src_stride, &mut img);
    img.set_significant_bits(SignificantBits::new(8, 8, 8, 0, 0));
    Ok(img)
}

pub(crate) fn fill_rows_portable(
    swap_rb: bool,
    width: usize,
    height: usize,
    src: &[u8],
    src_stride: usize,
    img: &mut Surface,
) {
    for y in 0..height {
        let src_row = &src[y * src_stride..y * src_stride + width * 3];
        for (px, dest) in src_row.chunks_exact(3).zip(img.argb_row_mut(y).iter_mut()) {
            let (b, g, r) = if swap_rb {
                (px[2], px[1], px[0])
            } else {
                (px[0], px[1], px[2])
            };
            *dest = 0xFF000000 | ((r as u32) << 16) | ((g as u32) << 8) | (b as u32);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_order_per_format() {
        // One pixel: bytes 0x11, 0x22, 0x33.
        let src = [0x11, 0x22, 0x33];
        let rgb = from_linear24(PixelFormat::Rgb888, 1, 1, &src, 0).unwrap();
        assert_eq!(rgb.pixel(0, 0), 0xFF332211);
        let bgr = from_linear24(PixelFormat::Bgr888, 1, 1, &src, 0).unwrap();
        assert_eq!(bgr.pixel(0, 0), 0xFF112233);
    }

    #[test]
    fn wide_rows_round_trip_every_pixel() {
        // 21 pixels exercises the 16-pixel SSSE3 chunk plus a tail on x86.
        let width = 21;
        let mut src = alloc::vec![0u8; width * 3];
        for (i, b) in src.iter_mut().enumerate() {
            *b = (i * 7 + 3) as u8;
        }
        let img = from_linear24(PixelFormat::Rgb888, width, 1, &src, 0).unwrap();
        for x in 0..width {
            let expect = 0xFF000000
                | ((src[x * 3 + 2] as u32) << 16)
                | ((src[x * 3 + 1] as u32) << 8)
                | (src[x * 3] as u32);
            assert_eq!(img.pixel(x, 0), expect, "pixel {x}");
        }
    }

    #[test]
    fn short_buffer_is_rejected() {
        assert!(matches!(
            from_linear24(PixelFormat::Rgb888, 4, 1, &[0u8; 11], 0),
            Err(DecodeError::SourceTooSmall { expected: 12, actual: 11 })
        ));
    }
}
