//! `<bot name="..."/>`: the current agent's property value.

use super::NAME;
use crate::agent::AgentProperties;
use crate::error::ProcessorError;
use crate::evaluator::EvaluationContext;
use crate::registry::{ContentPolicy, TagHandler};
use crate::template::TagNode;
use std::sync::Arc;
use tracing::debug;

pub struct BotPropertyHandler {
    agents: Arc<dyn AgentProperties>,
}

impl BotPropertyHandler {
    pub fn new(agents: Arc<dyn AgentProperties>) -> Self {
        Self { agents }
    }
}

impl TagHandler for BotPropertyHandler {
    fn tag_name(&self) -> &str {
        "bot"
    }

    fn content_policy(&self) -> ContentPolicy {
        ContentPolicy::MustBeEmpty
    }

    fn evaluate(
        &self,
        node: &TagNode,
        context: &mut EvaluationContext<'_>,
    ) -> Result<String, ProcessorError> {
        let name = node.attribute(NAME).unwrap_or_default();
        if name.is_empty() {
            return Ok(String::new());
        }

        match self.agents.property(context.agent_id(), name) {
            Some(value) => Ok(value),
            None => {
                debug!(agent_id = context.agent_id(), property = name, "Agent property not defined");
                Ok(String::new())
            }
        }
    }
}
