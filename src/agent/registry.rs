//! Agent registry and identity types.

use crate::config::ParlanceConfig;
use crate::error::ApiError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Read-only agent metadata lookup used by template handlers
pub trait AgentProperties: Send + Sync {
    /// Value of property `name` for `agent_id`, if the agent defines it
    fn property(&self, agent_id: &str, name: &str) -> Option<String>;
}

/// Agent identity with its property sheet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentIdentity {
    /// Unique identifier for the agent
    pub agent_id: String,
    /// Named properties (name, gender, master, ...) exposed to templates
    #[serde(default)]
    pub properties: HashMap<String, String>,
}

impl AgentIdentity {
    pub fn new(agent_id: String) -> Self {
        Self {
            agent_id,
            properties: HashMap::new(),
        }
    }

    pub fn with_property(mut self, name: &str, value: &str) -> Self {
        self.properties.insert(name.to_string(), value.to_string());
        self
    }
}

/// Agent registry
///
/// Built once at startup from configuration and shared read-only afterwards.
#[derive(Debug, Default)]
pub struct AgentRegistry {
    agents: HashMap<String, AgentIdentity>,
}

impl AgentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an agent, replacing any earlier identity with the same id
    pub fn register(&mut self, identity: AgentIdentity) {
        self.agents.insert(identity.agent_id.clone(), identity);
    }

    pub fn get(&self, agent_id: &str) -> Option<&AgentIdentity> {
        self.agents.get(agent_id)
    }

    /// Get an agent identity by ID or return an error
    pub fn get_or_error(&self, agent_id: &str) -> Result<&AgentIdentity, ApiError> {
        self.get(agent_id)
            .ok_or_else(|| ApiError::ConfigError(format!("Agent not found: {}", agent_id)))
    }

    /// Agent ids, sorted
    pub fn agent_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.agents.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Load agents from configuration
    pub fn load_from_config(&mut self, config: &ParlanceConfig) -> Result<(), ApiError> {
        for (agent_id, agent_config) in &config.agents {
            if agent_id.is_empty() {
                return Err(ApiError::ConfigError(
                    "Agent configured with an empty id".to_string(),
                ));
            }
            let mut identity = AgentIdentity::new(agent_id.clone());
            for (key, value) in &agent_config.properties {
                identity.properties.insert(key.clone(), value.clone());
            }
            self.register(identity);
        }
        Ok(())
    }
}

impl AgentProperties for AgentRegistry {
    fn property(&self, agent_id: &str, name: &str) -> Option<String> {
        self.agents
            .get(agent_id)
            .and_then(|agent| agent.properties.get(name))
            .cloned()
    }
}
