//! `<gossip>...</gossip>`: records its evaluated content and contributes nothing.

use crate::error::ProcessorError;
use crate::evaluator::EvaluationContext;
use crate::registry::{ContentPolicy, TagHandler};
use crate::share_log::ShareLog;
use crate::template::TagNode;
use std::sync::Arc;

pub struct GossipHandler {
    log: Arc<ShareLog>,
}

impl GossipHandler {
    pub fn new(log: Arc<ShareLog>) -> Self {
        Self { log }
    }
}

impl TagHandler for GossipHandler {
    fn tag_name(&self) -> &str {
        "gossip"
    }

    fn content_policy(&self) -> ContentPolicy {
        ContentPolicy::RequiresContent
    }

    fn evaluate(
        &self,
        node: &TagNode,
        context: &mut EvaluationContext<'_>,
    ) -> Result<String, ProcessorError> {
        let gossip = context.evaluate_children(node)?;
        self.log
            .record(&gossip, context.user_id(), context.agent_id())?;
        Ok(String::new())
    }
}
