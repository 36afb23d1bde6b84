//! Run-time options for a [`crate::Flow`].

use std::env;

use serde::{Deserialize, Serialize};

use crate::error::{FlowError, Result};

/// Environment variable overriding [`FlowConfig::max_steps`].
pub const MAX_STEPS_ENV: &str = "MINILLMFLOW_MAX_STEPS";
/// Environment variable overriding [`FlowConfig::record_steps`].
pub const RECORD_STEPS_ENV: &str = "MINILLMFLOW_RECORD_STEPS";

/// Run-time options for a flow.
///
/// The default places no bound on the number of node visits, so a graph wired
/// with a cycle runs until a node breaks out of it or fails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowConfig {
  /// Maximum number of node visits per run; `None` means unbounded.
  pub max_steps: Option<usize>,
  /// Whether to record a [`super::FlowStep`] for every visit.
  pub record_steps: bool,
}

impl Default for FlowConfig {
  fn default() -> Self {
    Self {
      max_steps: None,
      record_steps: true,
    }
  }
}

impl FlowConfig {
  /// Fails a run with [`crate::FlowError::StepLimitExceeded`] after `limit` visits.
  pub fn with_max_steps(mut self, limit: usize) -> Self {
    self.max_steps = Some(limit);
    self
  }

  /// Turns per-visit step records on or off.
  pub fn with_record_steps(mut self, record: bool) -> Self {
    self.record_steps = record;
    self
  }

  /// Defaults overridden by `MINILLMFLOW_MAX_STEPS` and `MINILLMFLOW_RECORD_STEPS` when set.
  pub fn from_env() -> Result<Self> {
    Self::from_lookup(|key| env::var(key).ok())
  }

  pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
    let mut config = Self::default();
    if let Some(raw) = lookup(MAX_STEPS_ENV) {
      let limit = raw
        .trim()
        .parse::<usize>()
        .map_err(|e| FlowError::Config(format!("{MAX_STEPS_ENV}={raw:?}: {e}")))?;
      config.max_steps = Some(limit);
    }
    if let Some(raw) = lookup(RECORD_STEPS_ENV) {
      config.record_steps = match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => true,
        "0" | "false" | "no" | "off" => false,
        _ => {
          return Err(FlowError::Config(format!(
            "{RECORD_STEPS_ENV}={raw:?}: expected a boolean"
          )));
        }
      };
    }
    Ok(config)
  }
}
