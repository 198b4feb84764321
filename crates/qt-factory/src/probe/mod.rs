pub mod cli;
pub mod core;
pub mod types;

pub use self::core::*;
pub use cli::*;
pub use types::*;
