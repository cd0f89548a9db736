//! Templates
//!
//! The immutable tag tree a matched pattern's response is generated from,
//! and the parser that builds it from markup.

mod node;
mod parser;

pub use node::{Node, NodeKind, TagNode, Template};
pub use parser::{parse_template, parse_template_with_limit, MAX_NESTING_LIMIT};
