//! MergeService: orchestrates sources, applies merge policy, deserializes to ParlanceConfig.

use super::base_builder;
use crate::config::sources::{environment, file};
use crate::config::ParlanceConfig;
use config::ConfigError;
use std::path::Path;

/// Merge service for config composition.
pub struct MergeService;

impl MergeService {
    /// Precedence: user config file (lowest) -> ./parlance.toml -> environment (highest).
    pub fn load() -> Result<ParlanceConfig, ConfigError> {
        let builder = base_builder()?;
        let builder = file::add_user_file(builder)?;
        let builder = file::add_working_dir_file(builder)?;
        let builder = environment::add_to_builder(builder)?;

        Self::finish(builder.build()?)
    }

    /// Load config from a specific file with environment overlay.
    pub fn load_from_file(path: &Path) -> Result<ParlanceConfig, ConfigError> {
        let builder = base_builder()?;
        let builder = file::add_required_file(builder, path)?;
        let builder = environment::add_to_builder(builder)?;

        Self::finish(builder.build()?)
    }

    fn finish(config: config::Config) -> Result<ParlanceConfig, ConfigError> {
        let parsed: ParlanceConfig = config.try_deserialize()?;
        parsed.validate().map_err(ConfigError::Message)?;
        Ok(parsed)
    }
}
