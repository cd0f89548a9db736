//! Handler registry
//!
//! A tag handler is the behavior bound to one element name. The registry maps
//! names to handlers; it is assembled once at startup and only read afterwards,
//! so it is shared between conversations without locking.

use crate::error::{ApiError, ProcessorError};
use crate::evaluator::EvaluationContext;
use crate::template::{NodeKind, TagNode};
use std::collections::HashMap;
use std::sync::Arc;

/// What an element may contain for its handler to accept it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentPolicy {
    /// Must be written as a container with at least one child.
    RequiresContent,
    /// Must not carry children.
    MustBeEmpty,
    Either,
}

impl ContentPolicy {
    /// Check `node` against this policy.
    pub fn check(self, node: &TagNode) -> Result<(), ProcessorError> {
        match self {
            ContentPolicy::RequiresContent
                if node.kind() == NodeKind::Leaf || !node.has_children() =>
            {
                Err(ProcessorError::invalid_content(
                    node.name(),
                    "element must have content",
                ))
            }
            ContentPolicy::MustBeEmpty if node.has_children() => Err(
                ProcessorError::invalid_content(node.name(), "element cannot contain content"),
            ),
            _ => Ok(()),
        }
    }
}

/// Behavior bound to one element name.
///
/// Handlers never mutate the node they are given. State changes go through the
/// predicate store or a handler's own collaborators. Handlers that need their
/// children's text evaluate them through the same `context`.
pub trait TagHandler: Send + Sync {
    fn tag_name(&self) -> &str;

    fn content_policy(&self) -> ContentPolicy;

    fn evaluate(
        &self,
        node: &TagNode,
        context: &mut EvaluationContext<'_>,
    ) -> Result<String, ProcessorError>;
}

/// Immutable tag name to handler mapping.
pub struct HandlerRegistry {
    handlers: HashMap<String, Arc<dyn TagHandler>>,
}

impl HandlerRegistry {
    pub fn builder() -> HandlerRegistryBuilder {
        HandlerRegistryBuilder::default()
    }

    /// Exact, case-sensitive lookup. `None` is the normal unknown-tag outcome.
    pub fn lookup(&self, tag_name: &str) -> Option<&Arc<dyn TagHandler>> {
        self.handlers.get(tag_name)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Registered tag names, sorted.
    pub fn tag_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

/// Collects handlers before the registry is frozen.
#[derive(Default)]
pub struct HandlerRegistryBuilder {
    handlers: HashMap<String, Arc<dyn TagHandler>>,
}

impl HandlerRegistryBuilder {
    /// Add a handler. Registering the same tag twice is a configuration error.
    pub fn register(mut self, handler: Arc<dyn TagHandler>) -> Result<Self, ApiError> {
        let name = handler.tag_name().to_string();
        if name.is_empty() {
            return Err(ApiError::ConfigError(
                "Tag handler registered with an empty tag name".to_string(),
            ));
        }
        if self.handlers.contains_key(&name) {
            return Err(ApiError::ConfigError(format!(
                "Duplicate handler for tag <{}>",
                name
            )));
        }
        self.handlers.insert(name, handler);
        Ok(self)
    }

    pub fn build(self) -> HandlerRegistry {
        HandlerRegistry {
            handlers: self.handlers,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(&'static str);

    impl TagHandler for Fixed {
        fn tag_name(&self) -> &str {
            self.0
        }

        fn content_policy(&self) -> ContentPolicy {
            ContentPolicy::Either
        }

        fn evaluate(
            &self,
            _node: &TagNode,
            _context: &mut EvaluationContext<'_>,
        ) -> Result<String, ProcessorError> {
            Ok(self.0.to_string())
        }
    }

    #[test]
    fn test_lookup_is_exact_and_case_sensitive() {
        let registry = HandlerRegistry::builder()
            .register(Arc::new(Fixed("bot")))
            .unwrap()
            .build();
        assert!(registry.lookup("bot").is_some());
        assert!(registry.lookup("BOT").is_none());
        assert!(registry.lookup("bo").is_none());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_duplicate_registration_rejected() {
        let result = HandlerRegistry::builder()
            .register(Arc::new(Fixed("bot")))
            .unwrap()
            .register(Arc::new(Fixed("bot")));
        assert!(matches!(result, Err(ApiError::ConfigError(_))));
    }

    #[test]
    fn test_content_policies() {
        let leaf = TagNode::leaf("x");
        let empty_container = TagNode::container("x");
        let full = TagNode::container("x").with_text("hi");

        assert!(ContentPolicy::RequiresContent.check(&leaf).is_err());
        assert!(ContentPolicy::RequiresContent.check(&empty_container).is_err());
        assert!(ContentPolicy::RequiresContent.check(&full).is_ok());

        assert!(ContentPolicy::MustBeEmpty.check(&leaf).is_ok());
        assert!(ContentPolicy::MustBeEmpty.check(&empty_container).is_ok());
        assert!(ContentPolicy::MustBeEmpty.check(&full).is_err());

        assert!(ContentPolicy::Either.check(&full).is_ok());
        assert!(ContentPolicy::Either.check(&leaf).is_ok());
    }
}
