//! `<think>...</think>`: evaluates content for its side effects only.

use crate::error::ProcessorError;
use crate::evaluator::EvaluationContext;
use crate::registry::{ContentPolicy, TagHandler};
use crate::template::TagNode;

pub struct ThinkHandler;

impl TagHandler for ThinkHandler {
    fn tag_name(&self) -> &str {
        "think"
    }

    fn content_policy(&self) -> ContentPolicy {
        ContentPolicy::Either
    }

    fn evaluate(
        &self,
        node: &TagNode,
        context: &mut EvaluationContext<'_>,
    ) -> Result<String, ProcessorError> {
        context.evaluate_children(node)?;
        Ok(String::new())
    }
}
