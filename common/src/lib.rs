pub mod config;
pub mod engine;
pub mod identifiers;
pub mod logger;

pub use identifiers::*;
