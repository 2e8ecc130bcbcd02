//! Aggregates built from RPSL objects of the RIPE database.

mod maintainer;
mod organisation;
mod serde_impl;

pub use maintainer::*;
pub use organisation::*;
