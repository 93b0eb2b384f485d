//! The closed set of packed source pixel layouts.
//!
//! Multi-byte pixels are little-endian in the source buffer unless the
//! decoder consuming them is a console-specific big-endian path (GameCube).
//! Channel letters read from the most significant bit downwards, so
//! `Argb4444` is `AAAARRRR GGGGBBBB` in a host-endian `u16`.

/// Packed pixel layouts understood by the linear, palette and twiddled
/// decoders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum PixelFormat {
    // 16-bit RGB
    /// `RRRRRGGG GGGBBBBB`
    Rgb565,
    /// `BBBBBGGG GGGRRRRR`
    Bgr565,
    /// `ARRRRRGG GGGBBBBB`
    Argb1555,
    /// `ABBBBBGG GGGRRRRR`
    Abgr1555,
    /// `RRRRRGGG GGBBBBBA`
    Rgba5551,
    /// `BBBBBGGG GGRRRRRA`
    Bgra5551,
    /// `AAAARRRR GGGGBBBB`
    Argb4444,
    /// `AAAABBBB GGGGRRRR`
    Abgr4444,
    /// `RRRRGGGG BBBBAAAA`
    Rgba4444,
    /// `BBBBGGGG RRRRAAAA`
    Bgra4444,
    /// `xxxxRRRR GGGGBBBB`
    Xrgb4444,
    /// `xxxxBBBB GGGGRRRR`
    Xbgr4444,
    /// `RRRRGGGG BBBBxxxx`
    Rgbx4444,
    /// `BBBBGGGG RRRRxxxx`
    Bgrx4444,
    /// `AAAAAAAA RRRGGGBB`
    Argb8332,
    /// `RRRRRRRR GGGGGGGG`
    Rg88,
    /// `GGGGGGGG RRRRRRRR`
    Gr88,

    // GameCube-specific 16-bit
    /// High bit selects RGB555 (opaque) or ARGB4443 with a 3-bit alpha.
    Rgb5A3,
    /// Intensity + alpha, `IIIIIIII AAAAAAAA`.
    Ia8,

    // PlayStation 2-specific 16-bit
    /// Like [`PixelFormat::Rgb5A3`] with the R and B channels swapped.
    Bgr5A3,

    // 15-bit RGB
    /// `xRRRRRGG GGGBBBBB`
    Rgb555,
    /// `xBBBBBGG GGGRRRRR`
    Bgr555,
    /// `xBBBBBGG GGGRRRRR`; an all-zero pixel is fully transparent.
    Bgr555Ps1,

    // 24-bit RGB
    /// Bytes in memory: B, G, R.
    Rgb888,
    /// Bytes in memory: R, G, B.
    Bgr888,

    // 32-bit with alpha channel
    /// `AARRGGBB` as a little-endian `u32`.
    Argb8888,
    /// `AABBGGRR` as a little-endian `u32`.
    Abgr8888,
    /// `RRGGBBAA` as a little-endian `u32`.
    Rgba8888,
    /// `BBGGRRAA` as a little-endian `u32`.
    Bgra8888,

    // 32-bit with unused alpha channel
    /// `xxRRGGBB`; alpha forced opaque.
    Xrgb8888,
    /// `xxBBGGRR`; alpha forced opaque.
    Xbgr8888,
    /// `RRGGBBxx`; alpha forced opaque.
    Rgbx8888,
    /// `BBGGRRxx`; alpha forced opaque.
    Bgrx8888,

    /// VTF files label this "ARGB8888" but actually store RABG. Decoded
    /// bug-compatibly because files in the wild depend on it.
    Rabg8888,

    // PlayStation 2-specific 32-bit
    /// High bit selects opaque BGR888 or ABGR7888 with a 7-bit alpha.
    Bgr888Abgr7888,

    // Uncommon 32-bit formats
    /// 16-bit green + 16-bit red; truncated to 8 bits per channel.
    G16R16,
    /// 2-bit alpha, 10 bits per color channel; truncated to 8.
    A2R10G10B10,
    /// 2-bit alpha, 10 bits per color channel, BGR order; truncated to 8.
    A2B10G10R10,
    /// Shared-exponent HDR format; tone-dropped to LDR on decode.
    Rgb9E5,

    // Luminance
    /// `LLLLLLLL`
    L8,
    /// `AAAAllll`
    A4L4,
    /// `LLLLLLLL llllllll`; truncated to 8 bits.
    L16,
    /// `AAAAAAAA LLLLLLLL`
    A8L8,
    /// `LLLLLLLL AAAAAAAA`
    L8A8,

    // Alpha
    /// `AAAAAAAA`, decoded over a black background.
    A8,

    // Other 8-bit
    /// Red only; green/blue zero, alpha opaque.
    R8,
    /// `RRRGGGBB`
    Rgb332,
}

impl PixelFormat {
    /// Size of one packed source pixel, in bytes.
    pub const fn bytes_per_pixel(self) -> usize {
        use PixelFormat::*;
        match self {
            L8 | A4L4 | A8 | R8 | Rgb332 => 1,
            Rgb888 | Bgr888 => 3,
            Argb8888 | Abgr8888 | Rgba8888 | Bgra8888 | Xrgb8888 | Xbgr8888 | Rgbx8888
            | Bgrx8888 | Rabg8888 | Bgr888Abgr7888 | G16R16 | A2R10G10B10 | A2B10G10R10
            | Rgb9E5 => 4,
            _ => 2,
        }
    }
}
