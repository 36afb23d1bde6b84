//! Batch nodes: split in prep, map exec over the pieces, merge in post.

use std::num::NonZeroUsize;
use std::ops::Range;

use tracing::{debug, instrument};

use crate::error::Result;
use crate::node::Node;
use crate::types::{Action, SharedContext};

/// A node whose exec phase runs once per item produced by prep.
///
/// Items are executed strictly in order, one at a time. Outputs are collected
/// in item order and handed to `post` as a whole. The first failing item
/// aborts the visit: later items are not executed and `post` does not run.
pub trait BatchNode {
  /// Descriptor of one unit of input, e.g. an index range.
  type Item;
  /// Result of executing one item.
  type Output;

  /// Produces the ordered items for this visit. An empty input yields no items.
  fn prep(&self, shared: &SharedContext) -> Result<Vec<Self::Item>>;

  /// Processes a single item.
  fn exec(&self, shared: &SharedContext, item: &Self::Item) -> Result<Self::Output>;

  /// Receives every item and every output, in order.
  fn post(
    &self,
    shared: &mut SharedContext,
    items: Vec<Self::Item>,
    outputs: Vec<Self::Output>,
  ) -> Result<Action> {
    let _ = (shared, items, outputs);
    Ok(Action::DEFAULT)
  }
}

/// Adapts a [`BatchNode`] to the [`Node`] lifecycle.
#[derive(Debug, Clone, Default)]
pub struct Batch<B>(pub B);

impl<B> Batch<B> {
  /// Wraps a batch node so it can be registered in a graph.
  pub fn new(inner: B) -> Self {
    Self(inner)
  }

  /// Wrapped batch node.
  pub fn inner(&self) -> &B {
    &self.0
  }

  /// Unwraps the batch node.
  pub fn into_inner(self) -> B {
    self.0
  }
}

impl<B: BatchNode> Node for Batch<B> {
  type Prep = Vec<B::Item>;
  type Exec = Vec<B::Output>;

  fn prep(&self, shared: &SharedContext) -> Result<Self::Prep> {
    self.0.prep(shared)
  }

  #[instrument(level = "trace", skip_all, fields(items = items.len()))]
  fn exec(&self, shared: &SharedContext, items: &Self::Prep) -> Result<Self::Exec> {
    items
      .iter()
      .enumerate()
      .map(|(index, item)| {
        debug!(index, "executing batch item");
        self.0.exec(shared, item)
      })
      .collect()
  }

  fn post(
    &self,
    shared: &mut SharedContext,
    items: Self::Prep,
    outputs: Self::Exec,
  ) -> Result<Action> {
    self.0.post(shared, items, outputs)
  }
}

/// Splits `0..len` into consecutive ranges of at most `chunk_size` elements.
///
/// Yields `ceil(len / chunk_size)` ranges covering `0..len` exactly once; the
/// last range may be shorter. `len == 0` yields no ranges.
pub fn chunk_ranges(len: usize, chunk_size: NonZeroUsize) -> Vec<Range<usize>> {
  let step = chunk_size.get();
  (0..len)
    .step_by(step)
    .map(|start| start..start.saturating_add(step).min(len))
    .collect()
}
