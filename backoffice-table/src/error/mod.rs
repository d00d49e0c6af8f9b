//! Error types

mod navigation;
mod params;
mod table;

pub use navigation::*;
pub use params::*;
pub use table::*;
