#![doc = include_str!(concat!("../", core::env!("CARGO_PKG_README")))]
#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

extern crate alloc;

mod ci;
mod gcn;
mod linear16;
mod linear24;
mod linear32;
mod linear8;
pub(crate) mod util;

pub use ci::{from_linear_ci4, from_linear_ci8, from_linear_mono};
pub use gcn::{from_gcn16, from_gcn_ci8, from_gcn_i8};
pub use linear16::from_linear16;
pub use linear24::from_linear24;
pub use linear32::from_linear32;
pub use linear8::from_linear8;
