//! Agents
//!
//! The personas templates speak for. Handlers read agent properties through
//! [`AgentProperties`]; the registry is the in-process implementation loaded
//! from configuration.

mod registry;

pub use registry::{AgentIdentity, AgentProperties, AgentRegistry};
