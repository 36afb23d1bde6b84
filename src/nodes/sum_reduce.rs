//! Reduce step of a map-reduce sum.

use serde_json::Number;

use crate::error::{FlowError, Result};
use crate::node::Node;
use crate::types::{Action, SharedContext};

use super::chunk_sum::CHUNK_RESULTS_KEY;

/// Context key the total is written to by default.
pub const TOTAL_KEY: &str = "total";

/// Adds two JSON numbers. Integers stay integers until the sum leaves the
/// `i64` range; anything else is summed as `f64`.
pub(crate) fn add_numbers(a: &Number, b: &Number) -> Result<Number> {
  if let (Some(x), Some(y)) = (a.as_i64(), b.as_i64())
    && let Some(sum) = x.checked_add(y)
  {
    return Ok(sum.into());
  }
  let (x, y) = (as_f64(a), as_f64(b));
  Number::from_f64(x + y)
    .ok_or_else(|| FlowError::failed(format!("sum of {a} and {b} is not a finite number")))
}

fn as_f64(n: &Number) -> f64 {
  n.as_f64().unwrap_or(f64::NAN)
}

/// Sums a list of partial results into a single total. A missing list sums to zero.
#[derive(Debug, Clone)]
pub struct SumReduceNode {
  input_key: String,
  output_key: String,
}

impl Default for SumReduceNode {
  fn default() -> Self {
    Self {
      input_key: CHUNK_RESULTS_KEY.to_string(),
      output_key: TOTAL_KEY.to_string(),
    }
  }
}

impl SumReduceNode {
  /// Reads `chunk_results` and writes `total`.
  pub fn new() -> Self {
    Self::default()
  }

  /// Reads partial results from `key` instead of `chunk_results`.
  pub fn with_input_key(mut self, key: impl Into<String>) -> Self {
    self.input_key = key.into();
    self
  }

  /// Writes the total to `key` instead of `total`.
  pub fn with_output_key(mut self, key: impl Into<String>) -> Self {
    self.output_key = key.into();
    self
  }
}

impl Node for SumReduceNode {
  type Prep = Vec<Number>;
  type Exec = Number;

  fn prep(&self, shared: &SharedContext) -> Result<Vec<Number>> {
    shared.get_or_default(&self.input_key)
  }

  fn exec(&self, _shared: &SharedContext, partials: &Vec<Number>) -> Result<Number> {
    partials
      .iter()
      .try_fold(Number::from(0), |acc, n| add_numbers(&acc, n))
  }

  fn post(&self, shared: &mut SharedContext, _partials: Vec<Number>, total: Number) -> Result<Action> {
    shared.insert(self.output_key.clone(), total)?;
    Ok(Action::DEFAULT)
  }
}
