//! Error types
//!
//! Three families with distinct propagation:
//! - [`ProcessorError`]: a template could not be evaluated (bad structure,
//!   runaway recursion, or an environment failure hit while evaluating).
//! - [`StoreError`]: the predicate store itself failed. An unset predicate is
//!   not a `StoreError`; `PredicateStore::load` reports it as `Ok(None)`.
//! - [`ApiError`]: operator-facing umbrella used by configuration, runtime
//!   assembly and the CLI.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while evaluating a template.
#[derive(Debug, Error)]
pub enum ProcessorError {
    /// The element violates its handler's content policy or lacks a required attribute.
    #[error("invalid content in <{tag}>: {reason}")]
    InvalidContent { tag: String, reason: String },

    /// Evaluation nested deeper than the configured maximum.
    #[error("maximum evaluation depth {max} exceeded at <{tag}>")]
    DepthExceeded { tag: String, max: usize },

    #[error(transparent)]
    Store(#[from] StoreError),

    /// A share log resource could not be written.
    #[error("failed to write share log {path}: {source}")]
    ShareLog {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ProcessorError {
    pub fn invalid_content(tag: impl Into<String>, reason: impl Into<String>) -> Self {
        ProcessorError::InvalidContent {
            tag: tag.into(),
            reason: reason.into(),
        }
    }

    /// True for failures caused by the template itself rather than the deployment.
    pub fn is_template_error(&self) -> bool {
        matches!(
            self,
            ProcessorError::InvalidContent { .. } | ProcessorError::DepthExceeded { .. }
        )
    }
}

/// Predicate storage failures.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("predicate storage I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A user or agent id that cannot be used as a storage path component.
    #[error("invalid {kind} id: {value:?}")]
    InvalidIdentifier { kind: &'static str, value: String },
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Template text that could not be parsed into a tag tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("template parse error at byte {offset}: {message}")]
pub struct ParseError {
    pub offset: usize,
    pub message: String,
    pub kind: ParseErrorKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Malformed markup
    Syntax,
    /// Elements nested at or past the parse limit, starting at `<tag>`
    NestingTooDeep { tag: String, max: usize },
}

/// Operator-facing error for configuration, runtime assembly and tooling.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Processor(#[from] ProcessorError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}
