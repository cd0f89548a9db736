//! Tooling
//!
//! Command-line front end over the runtime: evaluate templates and inspect or
//! edit stored predicates.

pub mod cli;

pub use cli::{Cli, CliContext, Commands, PredicateCommands};
