#![doc = include_str!(concat!("../", core::env!("CARGO_PKG_README")))]
#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

extern crate alloc;

mod decode;
mod twiddle;

pub use decode::{
    from_dreamcast_square_twiddled16, from_dreamcast_vq16, small_vq_palette_entries,
    small_vq_palette_entries_with_mipmaps,
};
