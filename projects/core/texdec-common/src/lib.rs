#![doc = include_str!(concat!("../", core::env!("CARGO_PKG_README")))]
#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

extern crate alloc;

pub mod allocate;
pub mod argb32;
pub mod cpu_detect;
pub mod error;
pub mod pixel_convert;
pub mod pixel_format;
pub mod surface;

pub use argb32::Argb32;
pub use error::DecodeError;
pub use pixel_format::PixelFormat;
pub use surface::{SignificantBits, Surface, SurfaceFormat, VerticalAlignment};
