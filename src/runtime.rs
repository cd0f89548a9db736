//! Runtime assembly
//!
//! Builds every shared component once from configuration and hands out the
//! evaluator front ends call per conversational turn.

use crate::agent::AgentRegistry;
use crate::config::ParlanceConfig;
use crate::error::{ApiError, ParseErrorKind, ProcessorError};
use crate::evaluator::TemplateEvaluator;
use crate::handlers::standard_registry;
use crate::share_log::ShareLog;
use crate::store::{FlatFileStore, PredicateStore};
use crate::template::{parse_template_with_limit, Template};
use std::sync::Arc;
use tracing::info;

pub struct Runtime {
    agents: Arc<AgentRegistry>,
    store: Arc<dyn PredicateStore>,
    evaluator: TemplateEvaluator,
}

impl Runtime {
    /// Assemble a runtime backed by the flat-file predicate store.
    pub fn from_config(config: &ParlanceConfig) -> Result<Self, ApiError> {
        config.validate().map_err(ApiError::ConfigError)?;
        let store: Arc<dyn PredicateStore> = Arc::new(FlatFileStore::new(
            config.store.base_dir.clone(),
            config.store.suffix.clone(),
        )?);
        Self::with_store(config, store)
    }

    /// Assemble a runtime around an existing predicate store.
    pub fn with_store(
        config: &ParlanceConfig,
        store: Arc<dyn PredicateStore>,
    ) -> Result<Self, ApiError> {
        config.validate().map_err(ApiError::ConfigError)?;
        let mut agents = AgentRegistry::new();
        agents.load_from_config(config)?;
        let agents = Arc::new(agents);

        let share_log = Arc::new(ShareLog::new(&config.gossip));
        let registry = standard_registry(
            agents.clone(),
            share_log,
            &config.predicates.empty_default,
        )?;

        info!(
            handlers = registry.len(),
            agents = agents.agent_ids().len(),
            max_depth = config.evaluator.max_depth,
            "Runtime assembled"
        );

        let evaluator =
            TemplateEvaluator::new(Arc::new(registry), store.clone(), config.evaluator.max_depth);
        Ok(Self {
            agents,
            store,
            evaluator,
        })
    }

    pub fn agents(&self) -> &AgentRegistry {
        &self.agents
    }

    pub fn store(&self) -> &dyn PredicateStore {
        self.store.as_ref()
    }

    pub fn evaluator(&self) -> &TemplateEvaluator {
        &self.evaluator
    }

    /// Evaluate an already parsed template.
    pub fn evaluate(
        &self,
        template: &Template,
        user_id: &str,
        agent_id: &str,
    ) -> Result<String, ApiError> {
        Ok(self.evaluator.evaluate(template, user_id, agent_id)?)
    }

    /// Parse and evaluate template markup.
    ///
    /// Markup nested past the evaluator's depth limit is rejected while
    /// parsing and reported as [`ProcessorError::DepthExceeded`].
    pub fn respond(&self, source: &str, user_id: &str, agent_id: &str) -> Result<String, ApiError> {
        let template = parse_template_with_limit(source, self.evaluator.max_depth()).map_err(
            |err| match err.kind {
                ParseErrorKind::NestingTooDeep { tag, max } => {
                    ApiError::Processor(ProcessorError::DepthExceeded { tag, max })
                }
                ParseErrorKind::Syntax => ApiError::Parse(err),
            },
        )?;
        self.evaluate(&template, user_id, agent_id)
    }
}
