//! Parsing and validation of `enumgen.toml` generator configuration files.
//!
//! This crate reads the optional configuration file and produces a
//! strongly-typed [`GeneratorConfig`] controlling which attributes the
//! extractor recognizes, which artifacts are emitted, and how the
//! incremental pipeline runs. Every field has a default, so an absent or
//! empty file yields a working configuration.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, load_config_from_str, CONFIG_FILE};
pub use types::*;
