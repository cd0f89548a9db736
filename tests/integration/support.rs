use parlance::config::{AgentConfig, ParlanceConfig};
use std::path::Path;

/// Config rooted entirely inside `root`, with agent "aria" named "Aria".
pub fn test_config(root: &Path, xml_enabled: bool) -> ParlanceConfig {
    let mut config = ParlanceConfig::default();
    config.store.base_dir = root.join("ffm");
    config.gossip.xml_enabled = xml_enabled;
    config.gossip.xml_path = root.join("aiml").join("gossip.aiml");
    config.gossip.plain_path = root.join("logs").join("gossip.log");

    let mut aria = AgentConfig::default();
    aria.properties.insert("name".to_string(), "Aria".to_string());
    aria.properties.insert("master".to_string(), "Ada".to_string());
    config.agents.insert("aria".to_string(), aria);
    config
}
