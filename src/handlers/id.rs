//! `<id/>`: the current user id.

use crate::error::ProcessorError;
use crate::evaluator::EvaluationContext;
use crate::registry::{ContentPolicy, TagHandler};
use crate::template::TagNode;

pub struct IdHandler;

impl TagHandler for IdHandler {
    fn tag_name(&self) -> &str {
        "id"
    }

    fn content_policy(&self) -> ContentPolicy {
        ContentPolicy::MustBeEmpty
    }

    fn evaluate(
        &self,
        _node: &TagNode,
        context: &mut EvaluationContext<'_>,
    ) -> Result<String, ProcessorError> {
        Ok(context.user_id().to_string())
    }
}
