//! Configuration system for the glyphword typesetter.
//!
//! This crate provides configuration loading, saving, validation and default
//! values. It includes:
//!
//! - `Config`: font location, default OpenType features, segment properties
//!   and output options
//! - `LogLevel`: verbosity of the stderr log bridge
//! - `ConfigError`: typed failures for config I/O and validation

pub mod config;
pub mod defaults;
pub mod error;
mod persistence;
mod types;

// Re-export main types for convenience
pub use config::Config;
pub use error::ConfigError;
pub use types::LogLevel;
