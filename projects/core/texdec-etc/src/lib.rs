#![doc = include_str!(concat!("../", core::env!("CARGO_PKG_README")))]
#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

extern crate alloc;

mod block;
mod decode;
mod tables;

pub use decode::{
    from_eac_r11, from_eac_rg11, from_etc1, from_etc2_rgb, from_etc2_rgb_a1, from_etc2_rgba,
};
