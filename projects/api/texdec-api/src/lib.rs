#![doc = include_str!(concat!("../", core::env!("CARGO_PKG_README")))]
#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

extern crate alloc;

mod decode;
mod format;

pub use decode::{decode, DecodeRequest};
pub use format::TextureFormat;

// Re-export the types callers hold on to.
pub use texdec_common::{
    DecodeError, PixelFormat, SignificantBits, Surface, SurfaceFormat, VerticalAlignment,
};
