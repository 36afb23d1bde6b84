//! Key-value store shared by every node phase during a flow run.

use std::collections::HashMap;
use std::collections::hash_map;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{FlowError, Result};

/// Reserved context key holding the parameters of the current batch-flow run.
pub const PARAMS_KEY: &str = "params";

/// Per-run parameters handed to the nodes of a batch-flow run.
pub type Params = Map<String, Value>;

/// Mutable mapping from string keys to arbitrary JSON values.
///
/// Owned by the caller and passed by reference into every phase of every node
/// visited during a run. The engine enforces no schema: producers and
/// consumers agree on keys among themselves.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SharedContext {
  values: HashMap<String, Value>,
}

impl SharedContext {
  /// Creates an empty context.
  pub fn new() -> Self {
    Self::default()
  }

  /// Raw value stored under `key`.
  pub fn get(&self, key: &str) -> Option<&Value> {
    self.values.get(key)
  }

  /// Decodes the value under `key`; `Ok(None)` when the key is absent.
  pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
    self
      .values
      .get(key)
      .map(|v| decode(key, v))
      .transpose()
  }

  /// Decodes the value under `key`, resolving a missing key to `T::default()`.
  pub fn get_or_default<T: DeserializeOwned + Default>(&self, key: &str) -> Result<T> {
    Ok(self.get_as(key)?.unwrap_or_default())
  }

  /// Decodes the value under `key`, failing with [`FlowError::MissingKey`] when absent.
  pub fn require<T: DeserializeOwned>(&self, key: &str) -> Result<T> {
    self
      .get_as(key)?
      .ok_or_else(|| FlowError::MissingKey(key.to_string()))
  }

  /// Encodes `value` and stores it under `key`, returning the previous value.
  pub fn insert<T: Serialize>(&mut self, key: impl Into<String>, value: T) -> Result<Option<Value>> {
    let value = serde_json::to_value(value)?;
    Ok(self.values.insert(key.into(), value))
  }

  /// Stores an already encoded value under `key`, returning the previous value.
  pub fn insert_value(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
    self.values.insert(key.into(), value)
  }

  /// Removes `key`, returning its value.
  pub fn remove(&mut self, key: &str) -> Option<Value> {
    self.values.remove(key)
  }

  pub fn contains_key(&self, key: &str) -> bool {
    self.values.contains_key(key)
  }

  /// Keys in arbitrary order.
  pub fn keys(&self) -> impl Iterator<Item = &str> {
    self.values.keys().map(String::as_str)
  }

  pub fn len(&self) -> usize {
    self.values.len()
  }

  pub fn is_empty(&self) -> bool {
    self.values.is_empty()
  }

  pub fn clear(&mut self) {
    self.values.clear();
  }

  /// Parameters of the batch-flow run in progress, read from [`PARAMS_KEY`].
  /// Empty outside a batch flow.
  pub fn params(&self) -> Result<Params> {
    self.get_or_default(PARAMS_KEY)
  }

  /// Consumes the context, returning the underlying map.
  pub fn into_inner(self) -> HashMap<String, Value> {
    self.values
  }
}

fn decode<T: DeserializeOwned>(key: &str, value: &Value) -> Result<T> {
  T::deserialize(value).map_err(|source| FlowError::InvalidValue {
    key: key.to_string(),
    source,
  })
}

impl From<HashMap<String, Value>> for SharedContext {
  fn from(values: HashMap<String, Value>) -> Self {
    Self { values }
  }
}

impl<K: Into<String>> FromIterator<(K, Value)> for SharedContext {
  fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
    Self {
      values: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
    }
  }
}

impl IntoIterator for SharedContext {
  type Item = (String, Value);
  type IntoIter = hash_map::IntoIter<String, Value>;

  fn into_iter(self) -> Self::IntoIter {
    self.values.into_iter()
  }
}
