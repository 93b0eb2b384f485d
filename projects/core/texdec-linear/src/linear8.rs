//! Linear 8-bit decoders: luminance, alpha and tiny-RGB formats.

use texdec_common::pixel_convert::{
    a4l4_to_argb32, a8_to_argb32, l8_to_argb32, r8_to_argb32, rgb332_to_argb32,
};
use texdec_common::{DecodeError, PixelFormat, SignificantBits, Surface, SurfaceFormat};

use crate::util::validate_linear_args;

/// Decodes a linear 8-bit image to an ARGB32 surface.
///
/// Supported formats: [`PixelFormat::L8`], [`PixelFormat::A4L4`],
/// [`PixelFormat::A8`], [`PixelFormat::R8`], [`PixelFormat::Rgb332`].
///
/// `stride` is the source row pitch in bytes; 0 means tightly packed.
pub fn from_linear8(
    px_format: PixelFormat,
    width: usize,
    height: usize,
    src: &[u8],
    stride: usize,
) -> Result<Surface, DecodeError> {
    let (convert, sbit): (fn(u8) -> u32, SignificantBits) = match px_format {
        // Luminance
        PixelFormat::L8 => (l8_to_argb32, SignificantBits::new(8, 8, 8, 8, 0)),
        PixelFormat::A4L4 => (a4l4_to_argb32, SignificantBits::new(4, 4, 4, 4, 4)),

        // Alpha
        // NOTE: Have to claim at least 1 bit for the RGB channels.
        PixelFormat::A8 => (a8_to_argb32, SignificantBits::new(1, 1, 1, 1, 8)),

        // Other
        PixelFormat::R8 => (r8_to_argb32, SignificantBits::new(8, 1, 1, 0, 0)),
        PixelFormat::Rgb332 => (rgb332_to_argb32, SignificantBits::new(3, 3, 2, 0, 0)),

        _ => return Err(DecodeError::UnsupportedPixelFormat(px_format)),
    };

    let src_stride = validate_linear_args(1, width, height, src.len(), stride)?;

    let mut img = Surface::new(width, height, SurfaceFormat::Argb32)?;
    for y in 0..height {
        let src_row = &src[y * src_stride..y * src_stride + width];
        for (dest, &px) in img.argb_row_mut(y).iter_mut().zip(src_row.iter()) {
            *dest = convert(px);
        }
    }

    img.set_significant_bits(sbit);
    Ok(img)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn l8_produces_opaque_grayscale() {
        let img = from_linear8(PixelFormat::L8, 2, 2, &[0x00, 0x7F, 0x80, 0xFF], 0).unwrap();
        assert_eq!(img.pixel(0, 0), 0xFF000000);
        assert_eq!(img.pixel(1, 0), 0xFF7F7F7F);
        assert_eq!(img.pixel(1, 1), 0xFFFFFFFF);
    }

    #[test]
    fn a8_maps_to_alpha_only() {
        let img = from_linear8(PixelFormat::A8, 2, 1, &[0x00, 0xFF], 0).unwrap();
        assert_eq!(img.pixel(0, 0), 0x00000000);
        assert_eq!(img.pixel(1, 0), 0xFF000000);
        assert_eq!(img.significant_bits().unwrap().alpha, 8);
    }

    #[test]
    fn stride_skips_padding_bytes() {
        let src = [0x10, 0xAA, 0x20, 0xAA];
        let img = from_linear8(PixelFormat::L8, 1, 2, &src, 2).unwrap();
        assert_eq!(img.pixel(0, 0), 0xFF101010);
        assert_eq!(img.pixel(0, 1), 0xFF202020);
    }

    #[test]
    fn short_buffer_is_rejected() {
        assert!(matches!(
            from_linear8(PixelFormat::L8, 4, 4, &[0; 15], 0),
            Err(DecodeError::SourceTooSmall { expected: 16, actual: 15 })
        ));
    }

    #[test]
    fn sixteen_bit_format_is_rejected() {
        assert!(matches!(
            from_linear8(PixelFormat::Rgb565, 2, 2, &[0; 4], 0),
            Err(DecodeError::UnsupportedPixelFormat(PixelFormat::Rgb565))
        ));
    }
}
