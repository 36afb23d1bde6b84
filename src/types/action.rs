//! Action label returned by a node's post phase and used to pick the next edge.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Label of the edge taken when a node does not ask for a specific one.
pub const DEFAULT_ACTION: &str = "default";

/// Action label returned by a node's post phase.
///
/// [`Action::DEFAULT`] is the distinguished default label. An empty string is
/// an ordinary label and never stands in for the default.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Action(Cow<'static, str>);

impl Action {
  /// The default action.
  pub const DEFAULT: Action = Action(Cow::Borrowed(DEFAULT_ACTION));

  /// Action with an owned label.
  pub fn new(label: impl Into<String>) -> Self {
    Self(Cow::Owned(label.into()))
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }

  /// Whether this is the `default` action.
  pub fn is_default(&self) -> bool {
    self.0 == DEFAULT_ACTION
  }
}

impl Default for Action {
  fn default() -> Self {
    Self::DEFAULT
  }
}

impl fmt::Display for Action {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

impl AsRef<str> for Action {
  fn as_ref(&self) -> &str {
    &self.0
  }
}

impl From<&str> for Action {
  fn from(label: &str) -> Self {
    Self::new(label)
  }
}

impl From<String> for Action {
  fn from(label: String) -> Self {
    Self(Cow::Owned(label))
  }
}
