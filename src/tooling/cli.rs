//! CLI Tooling
//!
//! Argument definitions and command execution. Commands return their output
//! as a string so they can be driven from tests as well as from the binary.

use crate::config::{ConfigLoader, ParlanceConfig};
use crate::error::ApiError;
use crate::runtime::Runtime;
use clap::{Parser, Subcommand};
use comfy_table::Table;
use serde_json::json;
use std::path::PathBuf;
use tracing::{info, warn};

/// Parlance CLI - conversational template evaluation
#[derive(Parser)]
#[command(name = "parlance")]
#[command(about = "Evaluate conversational templates against per-user predicate state")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr, both)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Evaluate template markup for one user talking to one agent
    Eval {
        #[arg(long)]
        user: String,
        #[arg(long)]
        agent: String,
        /// Template markup; read from --file when omitted
        template: Option<String>,
        /// File containing template markup
        #[arg(long, conflicts_with = "template")]
        file: Option<PathBuf>,
    },
    /// Inspect or edit stored predicates
    Predicate {
        #[command(subcommand)]
        command: PredicateCommands,
    },
    /// Count users with stored predicates for an agent
    Users {
        #[arg(long)]
        agent: String,
    },
    /// List registered template tags
    Tags,
}

#[derive(Subcommand)]
pub enum PredicateCommands {
    /// Print one predicate value
    Get {
        #[arg(long)]
        user: String,
        #[arg(long)]
        agent: String,
        name: String,
    },
    /// Store one predicate value
    Set {
        #[arg(long)]
        user: String,
        #[arg(long)]
        agent: String,
        name: String,
        value: String,
    },
    /// List all predicates for a user and agent
    List {
        #[arg(long)]
        user: String,
        #[arg(long)]
        agent: String,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
}

impl Cli {
    /// Load configuration and fold the logging flags into it.
    pub fn resolve_config(&self) -> Result<ParlanceConfig, ApiError> {
        let mut config = match &self.config {
            Some(path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load()?,
        };
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }
        if let Some(format) = &self.log_format {
            config.logging.format = format.clone();
        }
        if let Some(output) = &self.log_output {
            config.logging.output = output.clone();
        }
        if let Some(file) = &self.log_file {
            config.logging.file = Some(file.clone());
        }
        Ok(config)
    }
}

/// Runtime plus command dispatch
pub struct CliContext {
    runtime: Runtime,
}

impl CliContext {
    pub fn new(config: &ParlanceConfig) -> Result<Self, ApiError> {
        Ok(Self {
            runtime: Runtime::from_config(config)?,
        })
    }

    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        match command {
            Commands::Eval {
                user,
                agent,
                template,
                file,
            } => {
                let source = match (template, file) {
                    (Some(markup), _) => markup.clone(),
                    (None, Some(path)) => std::fs::read_to_string(path).map_err(|e| {
                        ApiError::ConfigError(format!(
                            "Failed to read template file {}: {}",
                            path.display(),
                            e
                        ))
                    })?,
                    (None, None) => {
                        return Err(ApiError::ConfigError(
                            "Provide template markup or --file".to_string(),
                        ))
                    }
                };
                if let Err(err) = self.runtime.agents().get_or_error(agent) {
                    warn!(agent_id = %agent, error = %err, "Evaluating for an unconfigured agent");
                }
                self.runtime.respond(&source, user, agent)
            }
            Commands::Predicate { command } => self.execute_predicate(command),
            Commands::Users { agent } => {
                let count = self.runtime.store().user_count(agent)?;
                Ok(count.to_string())
            }
            Commands::Tags => Ok(self.runtime.evaluator().registry().tag_names().join("\n")),
        }
    }

    fn execute_predicate(&self, command: &PredicateCommands) -> Result<String, ApiError> {
        let store = self.runtime.store();
        match command {
            PredicateCommands::Get { user, agent, name } => {
                match store.load(name, user, agent)? {
                    Some(value) => Ok(value),
                    None => Ok(format!("{} is not set", name)),
                }
            }
            PredicateCommands::Set {
                user,
                agent,
                name,
                value,
            } => {
                store.save(name, value, user, agent)?;
                info!(predicate = %name, user_id = %user, agent_id = %agent, "Predicate set from CLI");
                Ok(format!("{}={}", name, value))
            }
            PredicateCommands::List {
                user,
                agent,
                format,
            } => {
                let predicates = store.predicates(user, agent)?;
                match format.as_str() {
                    "json" => serde_json::to_string_pretty(&json!({
                        "user_id": user,
                        "agent_id": agent,
                        "predicates": predicates,
                    }))
                    .map_err(|e| ApiError::ConfigError(format!("Failed to render JSON: {}", e))),
                    "text" => {
                        let mut table = Table::new();
                        table.load_preset(comfy_table::presets::UTF8_FULL);
                        table.set_header(vec!["Predicate", "Value"]);
                        for (name, value) in &predicates {
                            table.add_row(vec![name, value]);
                        }
                        Ok(table.to_string())
                    }
                    other => Err(ApiError::ConfigError(format!(
                        "Invalid format: {} (must be 'text' or 'json')",
                        other
                    ))),
                }
            }
        }
    }
}
