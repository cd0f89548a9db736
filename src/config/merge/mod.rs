//! Merge policy: how configuration sources are combined.

pub mod service;

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError};

/// Builder every load starts from. Missing keys fall back to the serde defaults.
pub fn base_builder() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Ok(Config::builder())
}
