//! Error type shared by the engine and by node phases.
//!
//! Node phases return [`Result`]; the flow driver forwards whatever a phase
//! returns without wrapping it, so callers of [`crate::Flow::run`] see the
//! exact error the failing phase produced.

use crate::types::NodeId;
use thiserror::Error;

/// Result alias used by node phases and the flow driver.
pub type Result<T> = std::result::Result<T, FlowError>;

/// Errors raised while building or running a flow.
#[derive(Debug, Error)]
pub enum FlowError {
  /// A node phase failed with a message.
  #[error("node failed: {0}")]
  Failed(String),

  /// A required key was absent from the shared context.
  #[error("missing context key: {0}")]
  MissingKey(String),

  /// A context value was present but could not be decoded as the requested type.
  #[error("invalid value for context key '{key}': {source}")]
  InvalidValue {
    key: String,
    #[source]
    source: serde_json::Error,
  },

  /// A value could not be encoded into the shared context.
  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),

  /// Any other error raised by a node phase.
  #[error(transparent)]
  Other(#[from] Box<dyn std::error::Error + Send + Sync>),

  /// A node id that does not belong to the graph.
  #[error("unknown node: {0}")]
  UnknownNode(NodeId),

  /// The run visited more nodes than `FlowConfig::max_steps` allows.
  #[error("step limit of {limit} exceeded")]
  StepLimitExceeded { limit: usize },

  /// Invalid flow configuration.
  #[error("invalid configuration: {0}")]
  Config(String),
}

impl FlowError {
  /// Creates a [`FlowError::Failed`] from a message.
  pub fn failed(msg: impl Into<String>) -> Self {
    Self::Failed(msg.into())
  }

  /// Wraps an arbitrary error as [`FlowError::Other`].
  pub fn other<E>(err: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Other(Box::new(err))
  }
}
