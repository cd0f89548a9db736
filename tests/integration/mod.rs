//! Integration tests for the Parlance template runtime

mod cli_commands;
mod concurrent_predicates;
mod predicate_store;
mod support;
mod template_evaluation;
