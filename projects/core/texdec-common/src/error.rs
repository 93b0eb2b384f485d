//! Error types shared by every decoder.
//!
//! Decoders validate all preconditions up front and return a typed error
//! before a single output pixel is written; a decode either produces a fully
//! populated surface or nothing. No error state lives in globals.

use thiserror::Error;

use crate::allocate::AllocateError;
use crate::pixel_format::PixelFormat;

/// Reasons a decode request can be rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Width or height is zero (or otherwise unusable).
    #[error("image dimensions {width}x{height} are not valid")]
    InvalidDimensions {
        /// Requested width, in pixels.
        width: usize,
        /// Requested height, in pixels.
        height: usize,
    },

    /// The dimensions are not a multiple of the format's tile granularity.
    #[error("dimensions {width}x{height} are not a multiple of the {tile_width}x{tile_height} tile size")]
    TileGranularity {
        /// Requested width, in pixels.
        width: usize,
        /// Requested height, in pixels.
        height: usize,
        /// Required horizontal granularity.
        tile_width: usize,
        /// Required vertical granularity.
        tile_height: usize,
    },

    /// The source buffer is shorter than the format requires.
    #[error("source buffer is {actual} bytes, expected at least {expected}")]
    SourceTooSmall {
        /// Minimum number of bytes the decoder needs.
        expected: usize,
        /// Number of bytes actually supplied.
        actual: usize,
    },

    /// The format requires a palette buffer and none was supplied.
    #[error("this format requires a palette buffer")]
    PaletteRequired,

    /// The palette buffer is shorter than the format requires.
    #[error("palette buffer is {actual} bytes, expected at least {expected}")]
    PaletteTooSmall {
        /// Minimum number of bytes the decoder needs.
        expected: usize,
        /// Number of bytes actually supplied.
        actual: usize,
    },

    /// An explicit source stride is smaller than one row of pixels, or not a
    /// multiple of the pixel size.
    #[error("stride of {stride} bytes is invalid for rows of {row_bytes} bytes")]
    InvalidStride {
        /// Caller-supplied stride, in bytes.
        stride: usize,
        /// Bytes in one row at the requested width.
        row_bytes: usize,
    },

    /// The pixel format is not in the set this particular decoder handles.
    #[error("pixel format {0:?} is not supported by this decoder")]
    UnsupportedPixelFormat(PixelFormat),

    /// A whole-image operation was invoked on a surface that is not ARGB32.
    #[error("operation requires an ARGB32 surface")]
    RequiresArgb32,

    /// Pixel storage could not be allocated.
    #[error(transparent)]
    Allocate(#[from] AllocateError),
}
