//! Parlance: Conversational Template Runtime
//!
//! Evaluates response templates, trees of tags bound to pluggable handlers,
//! while maintaining per-user, per-agent conversational state ("predicates").

pub mod agent;
pub mod concurrency;
pub mod config;
pub mod error;
pub mod evaluator;
pub mod handlers;
pub mod logging;
pub mod registry;
pub mod runtime;
pub mod share_log;
pub mod store;
pub mod template;
pub mod tooling;
pub mod types;

pub use error::{ApiError, ParseError, ParseErrorKind, ProcessorError, StoreError};
pub use evaluator::{EvaluationContext, TemplateEvaluator};
pub use registry::{ContentPolicy, HandlerRegistry, TagHandler};
pub use runtime::Runtime;
pub use store::PredicateStore;
pub use template::{
    parse_template, parse_template_with_limit, Node, NodeKind, TagNode, Template,
};
