//! Linear 32-bit decoders.
//!
//! The byte-swizzle family (the `*8888` layouts) has an SSSE3 `pshufb`
//! path; the arithmetic formats (G16R16, A2R10G10B10, RGB9_E5, the PS2
//! split format) are always converted with the scalar kernels.

#[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
mod ssse3;

use texdec_common::pixel_convert::{
    a2b10g10r10_to_argb32, a2r10g10b10_to_argb32, bgr888_abgr7888_to_argb32, g16r16_to_argb32,
    rgb9_e5_to_argb32,
};
use texdec_common::{DecodeError, PixelFormat, SignificantBits, Surface, SurfaceFormat};

use crate::util::{read_u32_le, validate_linear_args};

/// Per-byte shuffle describing how a `*8888` source maps to ARGB32.
///
/// Each entry is the source byte index for the corresponding output byte in
/// a little-endian `[B, G, R, A]` dword, or `None` for "force 0xFF".
#[derive(Clone, Copy)]
pub(crate) struct ByteSwizzle {
    pub(crate) map: [Option<u8>; 4],
}

impl ByteSwizzle {
    #[inline]
    fn apply(self, bytes: [u8; 4]) -> u32 {
        let mut out = [0u8; 4];
        for (dest, m) in out.iter_mut().zip(self.map.iter()) {
            *dest = match m {
                Some(i) => bytes[*i as usize],
                None => 0xFF,
            };
        }
        u32::from_le_bytes(out)
    }
}

/// Returns the swizzle for byte-shuffle formats, or `None` for the
/// arithmetic ones.
pub(crate) fn swizzle_for(px_format: PixelFormat) -> Option<(ByteSwizzle, SignificantBits)> {
    use PixelFormat::*;
    // Source dwords are little-endian; byte 0 is the lowest byte of the
    // packed value.
    let (map, alpha_bits): ([Option<u8>; 4], u8) = match px_format {
        Argb8888 => ([Some(0), Some(1), Some(2), Some(3)], 8),
        Bgra8888 => ([Some(3), Some(2), Some(1), Some(0)], 8),
        Rgba8888 => ([Some(1), Some(2), Some(3), Some(0)], 8),
        Abgr8888 => ([Some(2), Some(1), Some(0), Some(3)], 8),
        Xrgb8888 => ([Some(0), Some(1), Some(2), None], 0),
        Bgrx8888 => ([Some(3), Some(2), Some(1), None], 0),
        Rgbx8888 => ([Some(1), Some(2), Some(3), None], 0),
        Xbgr8888 => ([Some(2), Some(1), Some(0), None], 0),
        // VTF's "ARGB8888" is really RABG. Kept bug-compatible; the files
        // in the wild rely on it.
        Rabg8888 => ([Some(1), Some(0), Some(3), Some(2)], 0),
        _ => return None,
    };
    Some((
        ByteSwizzle { map },
        SignificantBits::new(8, 8, 8, 0, alpha_bits),
    ))
}

/// Decodes a linear 32-bit image to an ARGB32 surface.
///
/// Source pixels are little-endian. `stride` is the source row pitch in
/// bytes; 0 means tightly packed.
pub fn from_linear32(
    px_format: PixelFormat,
    width: usize,
    height: usize,
    src: &[u8],
    stride: usize,
) -> Result<Surface, DecodeError> {
    let src_stride = validate_linear_args(4, width, height, src.len(), stride)?;

    let mut img = Surface::new(width, height, SurfaceFormat::Argb32)?;

    if let Some((swizzle, sbit)) = swizzle_for(px_format) {
        #[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
        {
            #[cfg(not(feature = "no-runtime-cpu-detection"))]
            let have_ssse3 = texdec_common::cpu_detect::has_ssse3();
            #[cfg(feature = "no-runtime-cpu-detection")]
            let have_ssse3 = cfg!(target_feature = "ssse3");

            if have_ssse3 && src.as_ptr() as usize % 16 == 0 && src_stride % 16 == 0 {
                unsafe {
                    ssse3::fill_rows_ssse3(swizzle, width, height, src, src_stride, &mut img);
                }
                img.set_significant_bits(sbit);
                return Ok(img);
            }
        }

        for y in 0..height {
            let src_row = &src[y * src_stride..y * src_stride + width * 4];
            for (px, dest) in src_row.chunks_exact(4).zip(img.argb_row_mut(y).iter_mut()) {
                *dest = swizzle.apply([px[0], px[1], px[2], px[3]]);
            }
        }
        img.set_significant_bits(sbit);
        return Ok(img);
    }

    // Arithmetic formats.
    let (convert, sbit): (fn(u32) -> u32, SignificantBits) = match px_format {
        // NOTE: Have to claim 1 bit for the empty Blue channel.
        PixelFormat::G16R16 => (g16r16_to_argb32, SignificantBits::new(8, 8, 1, 0, 0)),
        PixelFormat::A2R10G10B10 => (a2r10g10b10_to_argb32, SignificantBits::new(8, 8, 8, 0, 2)),
        PixelFormat::A2B10G10R10 => (a2b10g10r10_to_argb32, SignificantBits::new(8, 8, 8, 0, 2)),
        PixelFormat::Rgb9E5 => (rgb9_e5_to_argb32, SignificantBits::new(8, 8, 8, 0, 0)),
        PixelFormat::Bgr888Abgr7888 => {
            (bgr888_abgr7888_to_argb32, SignificantBits::new(8, 8, 8, 0, 8))
        }
        _ => return Err(DecodeError::UnsupportedPixelFormat(px_format)),
    };

    for y in 0..height {
        let src_row = &src[y * src_stride..y * src_stride + width * 4];
        for (x, dest) in img.argb_row_mut(y).iter_mut().enumerate() {
            *dest = convert(read_u32_le(src_row, x * 4));
        }
    }
    img.set_significant_bits(sbit);
    Ok(img)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn decode1(format: PixelFormat, px: u32) -> u32 {
        let src = px.to_le_bytes();
        from_linear32(format, 1, 1, &src, 0).unwrap().pixel(0, 0)
    }

    #[rstest]
    #[case(PixelFormat::Argb8888, 0x80112233, 0x80112233)]
    #[case(PixelFormat::Bgra8888, 0x33221180, 0x80112233)]
    #[case(PixelFormat::Rgba8888, 0x11223380, 0x80112233)]
    #[case(PixelFormat::Abgr8888, 0x80332211, 0x80112233)]
    #[case(PixelFormat::Xrgb8888, 0x00112233, 0xFF112233)]
    #[case(PixelFormat::Rgbx8888, 0x11223300, 0xFF112233)]
    #[case(PixelFormat::Xbgr8888, 0x00332211, 0xFF112233)]
    #[case(PixelFormat::Bgrx8888, 0x33221100, 0xFF112233)]
    fn swizzle_formats(#[case] format: PixelFormat, #[case] input: u32, #[case] expected: u32) {
        assert_eq!(decode1(format, input), expected);
    }

    #[test]
    fn rabg_is_decoded_bug_compatibly() {
        // out.b = byte1, out.g = byte0, out.r = byte3, out.a = byte2
        assert_eq!(decode1(PixelFormat::Rabg8888, 0x44332211), 0x33441122);
    }

    #[test]
    fn g16r16_truncates_low_bits() {
        // G = 0xABCD, R = 0x1234 -> R8 = 0x12, G8 = 0xAB.
        assert_eq!(decode1(PixelFormat::G16R16, 0xABCD1234), 0xFF12AB00);
    }

    #[test]
    fn a2r10g10b10_uses_alpha_table() {
        // Alpha bits 0b11 -> 0xFF; channels all ones.
        assert_eq!(decode1(PixelFormat::A2R10G10B10, 0xFFFFFFFF), 0xFFFFFFFF);
        assert_eq!(decode1(PixelFormat::A2R10G10B10, 0x3FFFFFFF) >> 24, 0);
    }

    #[test]
    fn wide_row_matches_scalar_swizzle() {
        let width = 11;
        let mut src = alloc::vec![0u8; width * 4];
        for (i, b) in src.iter_mut().enumerate() {
            *b = (i * 13 + 1) as u8;
        }
        let img = from_linear32(PixelFormat::Rgba8888, width, 1, &src, 0).unwrap();
        let (swz, _) = swizzle_for(PixelFormat::Rgba8888).unwrap();
        for x in 0..width {
            let bytes = [src[x * 4], src[x * 4 + 1], src[x * 4 + 2], src[x * 4 + 3]];
            assert_eq!(img.pixel(x, 0), swz.apply(bytes), "pixel {x}");
        }
    }
}
