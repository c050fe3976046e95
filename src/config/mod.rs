//! Configuration module.

mod loader;
mod palette;
mod types;

pub use loader::*;
pub use palette::*;
pub use types::*;
