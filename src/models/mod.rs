/*!
Data structures of the aggregate model: address families, maintainers and the organisations
they maintain.
*/

mod network;
mod rpsl;

pub use network::*;
pub use rpsl::*;
