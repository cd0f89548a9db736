//! ConfigLoader facade delegating to merge service.

use super::merge::service::MergeService;
use super::ParlanceConfig;
use config::ConfigError;
use std::path::Path;

/// Configuration loader facade.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from the standard locations and environment.
    pub fn load() -> Result<ParlanceConfig, ConfigError> {
        MergeService::load()
    }

    /// Load configuration from a specific file with environment overlay.
    pub fn load_from_file(path: &Path) -> Result<ParlanceConfig, ConfigError> {
        MergeService::load_from_file(path)
    }

    /// Create default configuration.
    pub fn default() -> ParlanceConfig {
        ParlanceConfig::default()
    }
}
