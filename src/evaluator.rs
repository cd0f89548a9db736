//! Template Evaluator
//!
//! Walks a parsed tag tree, dispatching every element to its registered
//! handler and concatenating the contributions in document order. Unknown
//! elements are transparent: a warning is logged and their children are
//! evaluated in their place, so one unrecognized tag never aborts a response.
//!
//! Nesting is bounded. Every element evaluation, including evaluations a
//! handler triggers on its children or on freshly built nodes, counts one
//! level against the configured maximum.

use crate::error::ProcessorError;
use crate::registry::HandlerRegistry;
use crate::store::PredicateStore;
use crate::template::{Node, TagNode, Template};
use std::sync::Arc;
use tracing::{debug_span, warn};

/// Default maximum element nesting depth
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Entry point used by front ends: evaluate a template for one conversational turn.
pub struct TemplateEvaluator {
    registry: Arc<HandlerRegistry>,
    store: Arc<dyn PredicateStore>,
    max_depth: usize,
}

impl TemplateEvaluator {
    pub fn new(
        registry: Arc<HandlerRegistry>,
        store: Arc<dyn PredicateStore>,
        max_depth: usize,
    ) -> Self {
        Self {
            registry,
            store,
            max_depth,
        }
    }

    pub fn registry(&self) -> &HandlerRegistry {
        &self.registry
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Evaluate `template` for `user_id` talking to `agent_id`.
    ///
    /// Runs to completion, including every handler side effect, before returning.
    pub fn evaluate(
        &self,
        template: &Template,
        user_id: &str,
        agent_id: &str,
    ) -> Result<String, ProcessorError> {
        let span = debug_span!("evaluate", user_id, agent_id);
        let _entered = span.enter();

        let mut context = EvaluationContext::new(
            &self.registry,
            self.store.as_ref(),
            user_id,
            agent_id,
            self.max_depth,
        );
        context.evaluate_nodes(template.nodes())
    }
}

/// Per-call evaluation state. Lives for one `evaluate` call only.
pub struct EvaluationContext<'a> {
    agent_id: &'a str,
    user_id: &'a str,
    depth: usize,
    max_depth: usize,
    registry: &'a HandlerRegistry,
    store: &'a dyn PredicateStore,
}

impl<'a> EvaluationContext<'a> {
    pub fn new(
        registry: &'a HandlerRegistry,
        store: &'a dyn PredicateStore,
        user_id: &'a str,
        agent_id: &'a str,
        max_depth: usize,
    ) -> Self {
        Self {
            agent_id,
            user_id,
            depth: 0,
            max_depth,
            registry,
            store,
        }
    }

    pub fn agent_id(&self) -> &'a str {
        self.agent_id
    }

    pub fn user_id(&self) -> &'a str {
        self.user_id
    }

    /// Number of elements currently being evaluated.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn store(&self) -> &'a dyn PredicateStore {
        self.store
    }

    pub fn registry(&self) -> &'a HandlerRegistry {
        self.registry
    }

    /// Evaluate siblings and concatenate their contributions in order.
    pub fn evaluate_nodes(&mut self, nodes: &[Node]) -> Result<String, ProcessorError> {
        let mut response = String::new();
        for node in nodes {
            response.push_str(&self.evaluate_node(node)?);
        }
        Ok(response)
    }

    pub fn evaluate_node(&mut self, node: &Node) -> Result<String, ProcessorError> {
        match node {
            Node::Text(text) => Ok(text.clone()),
            Node::Tag(tag) => self.evaluate_tag(tag),
        }
    }

    /// Evaluate the children of `node`, for handlers that need their inner text.
    pub fn evaluate_children(&mut self, node: &TagNode) -> Result<String, ProcessorError> {
        self.evaluate_nodes(node.children())
    }

    /// Evaluate one element one level deeper.
    pub fn evaluate_tag(&mut self, node: &TagNode) -> Result<String, ProcessorError> {
        if self.depth >= self.max_depth {
            return Err(ProcessorError::DepthExceeded {
                tag: node.name().to_string(),
                max: self.max_depth,
            });
        }

        self.depth += 1;
        let result = self.dispatch(node);
        self.depth -= 1;
        result
    }

    fn dispatch(&mut self, node: &TagNode) -> Result<String, ProcessorError> {
        let registry = self.registry;
        match registry.lookup(node.name()) {
            Some(handler) => {
                handler.content_policy().check(node)?;
                handler.evaluate(node, self)
            }
            None => {
                warn!(tag = node.name(), depth = self.depth, "Ignoring unknown element");
                self.evaluate_children(node)
            }
        }
    }
}
