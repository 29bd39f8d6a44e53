//! Configuration module for Pagevault
//!
//! Handles loading, parsing, and validating TOML configuration files.
//! Every section has defaults, so an empty file is a valid configuration.

mod parser;
mod types;
mod validation;

pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use types::{ArchiverConfig, Config, StorageConfig, UserAgentConfig};
pub use validation::validate;
