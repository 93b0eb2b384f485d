//! The closed set of decodable texture layouts.

use texdec_common::PixelFormat;

/// Every texture layout the library can decode.
///
/// Linear and palette variants carry the packed [`PixelFormat`]; block
/// formats are self-describing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum TextureFormat {
    /// Row-major packed pixels; bytes per pixel follow the pixel format.
    Linear(PixelFormat),
    /// 4-bit palette indices, two per byte. `msn_left` selects whether the
    /// most significant nybble is the left pixel.
    LinearCi4 {
        /// Palette entry layout.
        palette: PixelFormat,
        /// If true, the most significant nybble is the left pixel.
        msn_left: bool,
    },
    /// 8-bit palette indices.
    LinearCi8 {
        /// Palette entry layout.
        palette: PixelFormat,
    },
    /// 1-bit monochrome, MSB leftmost.
    LinearMono,

    /// GameCube 4x4-tiled big-endian 16-bit (RGB5A3, RGB565 or IA8).
    Gcn16(PixelFormat),
    /// GameCube 8x4-tiled CI8 with a big-endian RGB5A3 palette.
    GcnCi8,
    /// GameCube 8x4-tiled I8 (grayscale).
    GcnI8,
    /// GameCube DXT1: 2x2 super-blocks, big-endian, index 3 transparent.
    GcnDxt1,

    /// DXT1; index 3 in three-color blocks is black.
    Dxt1,
    /// DXT1; index 3 in three-color blocks is fully transparent.
    Dxt1Alpha,
    /// DXT2 (premultiplied explicit alpha; un-premultiplied on decode).
    Dxt2,
    /// DXT3 (explicit 4-bit alpha).
    Dxt3,
    /// DXT4 (premultiplied interpolated alpha; un-premultiplied on decode).
    Dxt4,
    /// DXT5 (interpolated 3-bit alpha).
    Dxt5,
    /// BC4 (ATI1): one channel, presented as red.
    Bc4,
    /// BC5 (ATI2): two channels, presented as red/green.
    Bc5,
    /// BC7: all eight block modes.
    Bc7,

    /// ETC1.
    Etc1,
    /// ETC2 RGB (adds T/H/Planar modes).
    Etc2Rgb,
    /// ETC2 RGBA (separate EAC alpha block).
    Etc2Rgba,
    /// ETC2 RGB with punchthrough alpha.
    Etc2RgbA1,
    /// EAC R11 (one channel, truncated to 8 bits).
    EacR11,
    /// EAC RG11 (two channels, truncated to 8 bits).
    EacRg11,

    /// Dreamcast square twiddled 16-bit.
    DreamcastTwiddled16(PixelFormat),
    /// Dreamcast vector-quantized 16-bit.
    DreamcastVq16 {
        /// Codebook entry layout.
        palette: PixelFormat,
        /// Use the width-dependent reduced codebook.
        small_vq: bool,
        /// SmallVQ codebook size differs when mipmaps are present.
        has_mipmaps: bool,
    },
}
