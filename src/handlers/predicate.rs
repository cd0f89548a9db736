//! `<get name="..."/>` and `<set name="...">...</set>`: per-user predicates.

use super::NAME;
use crate::error::ProcessorError;
use crate::evaluator::EvaluationContext;
use crate::registry::{ContentPolicy, TagHandler};
use crate::template::TagNode;

/// Reads a predicate; an unset predicate yields the configured empty default.
pub struct GetPredicateHandler {
    empty_default: String,
}

impl GetPredicateHandler {
    pub fn new(empty_default: &str) -> Self {
        Self {
            empty_default: empty_default.to_string(),
        }
    }
}

impl TagHandler for GetPredicateHandler {
    fn tag_name(&self) -> &str {
        "get"
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
            return Ok(self.empty_default.clone());
        }

        let value = context
            .store()
            .load(name, context.user_id(), context.agent_id())?;
        Ok(value.unwrap_or_else(|| self.empty_default.clone()))
    }
}

/// Stores its evaluated content and echoes it.
pub struct SetPredicateHandler;

impl TagHandler for SetPredicateHandler {
    fn tag_name(&self) -> &str {
        "set"
    }

    fn content_policy(&self) -> ContentPolicy {
        ContentPolicy::Either
    }

    fn evaluate(
        &self,
        node: &TagNode,
        context: &mut EvaluationContext<'_>,
    ) -> Result<String, ProcessorError> {
        let name = match node.attribute(NAME) {
            Some(name) if !name.is_empty() => name,
            _ => {
                return Err(ProcessorError::invalid_content(
                    node.name(),
                    "requires a non-empty name attribute",
                ))
            }
        };

        let value = context.evaluate_children(node)?;
        context
            .store()
            .save(name, &value, context.user_id(), context.agent_id())?;
        Ok(value)
    }
}
