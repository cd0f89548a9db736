//! Core identifier types shared by the evaluator and the predicate stores.

/// Identifies one conversation partner.
pub type UserId = String;

/// Identifies the agent (bot persona) a template and its predicates belong to.
pub type AgentId = String;

/// The (agent, user) pair every predicate is scoped to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Scope {
    pub agent_id: AgentId,
    pub user_id: UserId,
}

impl Scope {
    pub fn new(user_id: &str, agent_id: &str) -> Self {
        Self {
            agent_id: agent_id.to_string(),
            user_id: user_id.to_string(),
        }
    }
}
