//! Configuration
//!
//! Every section has compiled-in defaults; a TOML file and `PARLANCE__*`
//! environment variables are layered on top by [`ConfigLoader`].

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;

use crate::evaluator::DEFAULT_MAX_DEPTH;
use crate::template::MAX_NESTING_LIMIT;
use crate::logging::LoggingConfig;
use crate::store::flat_file::{DEFAULT_BASE_DIR, DEFAULT_SUFFIX};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Root configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ParlanceConfig {
    pub store: StoreConfig,
    pub evaluator: EvaluatorConfig,
    pub predicates: PredicateConfig,
    pub gossip: ShareLogConfig,
    pub logging: LoggingConfig,
    /// Agent id to agent settings
    pub agents: HashMap<String, AgentConfig>,
}

/// Flat-file predicate storage
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Directory holding one subdirectory per agent
    pub base_dir: PathBuf,
    /// Suffix of each per-user predicate file
    pub suffix: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from(DEFAULT_BASE_DIR),
            suffix: DEFAULT_SUFFIX.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluatorConfig {
    /// Maximum element nesting, including handler-triggered re-evaluation
    pub max_depth: usize,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PredicateConfig {
    /// Returned by `<get/>` for a predicate that was never set
    pub empty_default: String,
}

/// Gossip (share) log destinations
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShareLogConfig {
    /// Also record gossip into the structured document at `xml_path`
    pub xml_enabled: bool,
    pub xml_path: PathBuf,
    /// Root element wrapping the structured document
    pub xml_root: String,
    /// Plain diagnostic log, always written
    pub plain_path: PathBuf,
}

impl Default for ShareLogConfig {
    fn default() -> Self {
        Self {
            xml_enabled: false,
            xml_path: PathBuf::from("./aiml/gossip.aiml"),
            xml_root: "aiml".to_string(),
            plain_path: PathBuf::from("./logs/gossip.log"),
        }
    }
}

/// Per-agent settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Properties exposed through `<bot name="..."/>`
    pub properties: HashMap<String, String>,
}

impl ParlanceConfig {
    /// Reject settings that would make the runtime unusable
    pub fn validate(&self) -> Result<(), String> {
        if self.evaluator.max_depth == 0 {
            return Err("evaluator.max_depth must be at least 1".to_string());
        }
        if self.evaluator.max_depth > MAX_NESTING_LIMIT {
            return Err(format!(
                "evaluator.max_depth must be at most {}",
                MAX_NESTING_LIMIT
            ));
        }
        if self.store.suffix.is_empty() {
            return Err("store.suffix must not be empty".to_string());
        }
        if self.gossip.xml_root.trim().is_empty() {
            return Err("gossip.xml_root must not be empty".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ParlanceConfig::default();
        assert_eq!(config.store.base_dir, PathBuf::from("ffm"));
        assert_eq!(config.store.suffix, ".predicates");
        assert_eq!(config.evaluator.max_depth, DEFAULT_MAX_DEPTH);
        assert!(!config.gossip.xml_enabled);
        assert_eq!(config.gossip.xml_root, "aiml");
        assert_eq!(config.predicates.empty_default, "");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: ParlanceConfig = toml::from_str(
            r#"
            [evaluator]
            max_depth = 8

            [agents.aria.properties]
            name = "Aria"
            "#,
        )
        .unwrap();
        assert_eq!(config.evaluator.max_depth, 8);
        assert_eq!(config.store.suffix, ".predicates");
        assert_eq!(config.agents["aria"].properties["name"], "Aria");
    }

    #[test]
    fn test_validate_rejects_zero_depth() {
        let mut config = ParlanceConfig::default();
        config.evaluator.max_depth = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_depth_past_parse_limit() {
        let mut config = ParlanceConfig::default();
        config.evaluator.max_depth = MAX_NESTING_LIMIT;
        assert!(config.validate().is_ok());
        config.evaluator.max_depth = MAX_NESTING_LIMIT + 1;
        assert!(config.validate().is_err());
    }
}
