pub mod builder;
pub mod classifier;
pub mod clipboard;
pub mod config;
pub mod error;
pub mod installer;
pub mod menu;
pub mod probe;
pub mod runner;

pub use error::QuickTubeError;
