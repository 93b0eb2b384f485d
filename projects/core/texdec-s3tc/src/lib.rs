#![doc = include_str!(concat!("../", core::env!("CARGO_PKG_README")))]
#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

extern crate alloc;

mod bc4_bc5;
mod block;
mod s3tc;

pub use bc4_bc5::{from_bc4, from_bc5, red8_to_l8, rg8_to_la8};
pub use s3tc::{
    from_dxt1, from_dxt1_a1, from_dxt1_gcn, from_dxt2, from_dxt3, from_dxt4, from_dxt5,
};
