//! Map step of a map-reduce sum: splits a numeric array into index ranges
//! and sums each range.

use std::num::NonZeroUsize;
use std::ops::Range;

use serde_json::{Number, Value};
use tracing::instrument;

use crate::batch::{BatchNode, chunk_ranges};
use crate::error::{FlowError, Result};
use crate::types::{Action, SharedContext};

use super::sum_reduce::add_numbers;

/// Context key the input array is read from by default.
pub const INPUT_ARRAY_KEY: &str = "input_array";
/// Context key the per-chunk sums are written to by default.
pub const CHUNK_RESULTS_KEY: &str = "chunk_results";

/// Batch node summing fixed-size chunks of a numeric array.
///
/// A missing input array is treated as empty.
#[derive(Debug, Clone)]
pub struct ChunkSumNode {
  chunk_size: NonZeroUsize,
  input_key: String,
  output_key: String,
}

impl ChunkSumNode {
  /// Reads `input_array` and writes `chunk_results`.
  pub fn new(chunk_size: NonZeroUsize) -> Self {
    Self {
      chunk_size,
      input_key: INPUT_ARRAY_KEY.to_string(),
      output_key: CHUNK_RESULTS_KEY.to_string(),
    }
  }

  /// Reads the array from `key` instead of `input_array`.
  pub fn with_input_key(mut self, key: impl Into<String>) -> Self {
    self.input_key = key.into();
    self
  }

  /// Writes the per-chunk sums to `key` instead of `chunk_results`.
  pub fn with_output_key(mut self, key: impl Into<String>) -> Self {
    self.output_key = key.into();
    self
  }

  pub fn chunk_size(&self) -> NonZeroUsize {
    self.chunk_size
  }

  fn input<'a>(&self, shared: &'a SharedContext) -> Result<&'a [Value]> {
    match shared.get(&self.input_key) {
      None => Ok(&[][..]),
      Some(Value::Array(values)) => Ok(values.as_slice()),
      Some(other) => Err(FlowError::failed(format!(
        "'{}' must be an array, got {}",
        self.input_key, other
      ))),
    }
  }
}

impl BatchNode for ChunkSumNode {
  type Item = Range<usize>;
  type Output = Number;

  fn prep(&self, shared: &SharedContext) -> Result<Vec<Range<usize>>> {
    let len = self.input(shared)?.len();
    Ok(chunk_ranges(len, self.chunk_size))
  }

  #[instrument(level = "trace", skip(self, shared))]
  fn exec(&self, shared: &SharedContext, range: &Range<usize>) -> Result<Number> {
    let values = self.input(shared)?;
    let chunk = values.get(range.clone()).ok_or_else(|| {
      FlowError::failed(format!(
        "chunk {range:?} is out of bounds for '{}' of length {}",
        self.input_key,
        values.len()
      ))
    })?;
    chunk
      .iter()
      .zip(range.clone())
      .try_fold(Number::from(0), |acc, (value, index)| {
        let Value::Number(n) = value else {
          return Err(FlowError::failed(format!(
            "'{}'[{index}] is not a number: {value}",
            self.input_key
          )));
        };
        add_numbers(&acc, n)
      })
  }

  fn post(
    &self,
    shared: &mut SharedContext,
    _ranges: Vec<Range<usize>>,
    sums: Vec<Number>,
  ) -> Result<Action> {
    shared.insert(self.output_key.clone(), sums)?;
    Ok(Action::DEFAULT)
  }
}
