//! Tag handlers
//!
//! The standard handler set and the registry assembled from it.

mod bot;
mod gossip;
mod id;
mod predicate;
mod think;

pub use bot::BotPropertyHandler;
pub use gossip::GossipHandler;
pub use id::IdHandler;
pub use predicate::{GetPredicateHandler, SetPredicateHandler};
pub use think::ThinkHandler;

use crate::agent::AgentProperties;
use crate::error::ApiError;
use crate::registry::HandlerRegistry;
use crate::share_log::ShareLog;
use std::sync::Arc;

/// Name attribute shared by the property and predicate tags.
pub(crate) const NAME: &str = "name";

/// Registry with every standard handler.
pub fn standard_registry(
    agents: Arc<dyn AgentProperties>,
    share_log: Arc<ShareLog>,
    empty_default: &str,
) -> Result<HandlerRegistry, ApiError> {
    Ok(HandlerRegistry::builder()
        .register(Arc::new(BotPropertyHandler::new(agents)))?
        .register(Arc::new(GossipHandler::new(share_log)))?
        .register(Arc::new(GetPredicateHandler::new(empty_default)))?
        .register(Arc::new(SetPredicateHandler))?
        .register(Arc::new(ThinkHandler))?
        .register(Arc::new(IdHandler))?
        .build())
}
