//! Common network-related structs.

mod afi;

pub use afi::*;
