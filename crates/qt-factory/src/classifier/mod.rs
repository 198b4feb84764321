pub mod core;
pub mod types;

pub use types::*;
