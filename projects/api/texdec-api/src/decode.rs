//! The unified decode entry point.

use texdec_common::{DecodeError, Surface};

use crate::format::TextureFormat;

/// One decode request: dimensions, source bytes, and the optional palette
/// and stride the format may require.
///
/// Requests are plain borrowed data; nothing is retained after
/// [`decode`] returns.
#[derive(Debug, Clone, Copy)]
pub struct DecodeRequest<'a> {
    /// Image width, in pixels.
    pub width: usize,
    /// Image height, in pixels.
    pub height: usize,
    /// Raw image data.
    pub src: &'a [u8],
    /// Raw palette/codebook data for indexed formats.
    pub palette: Option<&'a [u8]>,
    /// Source row pitch in bytes for the linear decoders; 0 means tightly
    /// packed. Ignored by block formats.
    pub stride: usize,
}

impl<'a> DecodeRequest<'a> {
    /// A request with no palette and tightly packed rows.
    pub fn new(width: usize, height: usize, src: &'a [u8]) -> Self {
        Self { width, height, src, palette: None, stride: 0 }
    }

    /// Attaches a palette/codebook buffer.
    pub fn with_palette(mut self, palette: &'a [u8]) -> Self {
        self.palette = Some(palette);
        self
    }

    /// Overrides the source stride (linear formats only).
    pub fn with_stride(mut self, stride: usize) -> Self {
        self.stride = stride;
        self
    }

    fn palette_or_err(&self) -> Result<&'a [u8], DecodeError> {
        self.palette.ok_or(DecodeError::PaletteRequired)
    }
}

/// Decodes one texture into a [`Surface`].
///
/// This is a pure transform: all validation happens up front, a failed
/// decode returns an error without partial output, and the only allocation
/// that outlives the call is the returned surface.
pub fn decode(format: TextureFormat, req: &DecodeRequest<'_>) -> Result<Surface, DecodeError> {
    use TextureFormat::*;

    let (w, h, src) = (req.width, req.height, req.src);
    match format {
        Linear(px) => match px.bytes_per_pixel() {
            1 => texdec_linear::from_linear8(px, w, h, src, req.stride),
            2 => texdec_linear::from_linear16(px, w, h, src, req.stride),
            3 => texdec_linear::from_linear24(px, w, h, src, req.stride),
            _ => texdec_linear::from_linear32(px, w, h, src, req.stride),
        },
        LinearCi4 { palette, msn_left } => {
            texdec_linear::from_linear_ci4(palette, msn_left, w, h, src, req.palette_or_err()?)
        }
        LinearCi8 { palette } => {
            texdec_linear::from_linear_ci8(palette, w, h, src, req.palette_or_err()?)
        }
        LinearMono => texdec_linear::from_linear_mono(w, h, src),

        Gcn16(px) => texdec_linear::from_gcn16(px, w, h, src),
        GcnCi8 => texdec_linear::from_gcn_ci8(w, h, src, req.palette_or_err()?),
        GcnI8 => texdec_linear::from_gcn_i8(w, h, src),
        GcnDxt1 => texdec_s3tc::from_dxt1_gcn(w, h, src),

        Dxt1 => texdec_s3tc::from_dxt1(w, h, src),
        Dxt1Alpha => texdec_s3tc::from_dxt1_a1(w, h, src),
        Dxt2 => texdec_s3tc::from_dxt2(w, h, src),
        Dxt3 => texdec_s3tc::from_dxt3(w, h, src),
        Dxt4 => texdec_s3tc::from_dxt4(w, h, src),
        Dxt5 => texdec_s3tc::from_dxt5(w, h, src),
        Bc4 => texdec_s3tc::from_bc4(w, h, src),
        Bc5 => texdec_s3tc::from_bc5(w, h, src),
        Bc7 => texdec_bc7::from_bc7(w, h, src),

        Etc1 => texdec_etc::from_etc1(w, h, src),
        Etc2Rgb => texdec_etc::from_etc2_rgb(w, h, src),
        Etc2Rgba => texdec_etc::from_etc2_rgba(w, h, src),
        Etc2RgbA1 => texdec_etc::from_etc2_rgb_a1(w, h, src),
        EacR11 => texdec_etc::from_eac_r11(w, h, src),
        EacRg11 => texdec_etc::from_eac_rg11(w, h, src),

        DreamcastTwiddled16(px) => {
            texdec_dreamcast::from_dreamcast_square_twiddled16(px, w, h, src)
        }
        DreamcastVq16 { palette, small_vq, has_mipmaps } => texdec_dreamcast::from_dreamcast_vq16(
            palette,
            small_vq,
            has_mipmaps,
            w,
            h,
            src,
            req.palette_or_err()?,
        ),
    }
}
