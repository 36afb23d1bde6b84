//! Node lifecycle: prep, exec, post.
//!
//! A visit always runs the three phases once each, in that order. `prep` and
//! `exec` only read the shared context; `post` is the write phase and returns
//! the [`Action`] used to pick the next edge.

use std::any::type_name;

use tracing::{instrument, trace};

use crate::error::Result;
use crate::types::{Action, SharedContext};

/// Atomic unit of work in a flow.
pub trait Node {
  /// Value produced by `prep` and handed to `exec` and `post`.
  type Prep;
  /// Value produced by `exec` and handed to `post`.
  type Exec;

  /// Reads what the node needs from the shared context.
  fn prep(&self, shared: &SharedContext) -> Result<Self::Prep>;

  /// Performs the node's work.
  fn exec(&self, shared: &SharedContext, prep: &Self::Prep) -> Result<Self::Exec>;

  /// Writes results back into the shared context and picks the outgoing action.
  fn post(&self, shared: &mut SharedContext, prep: Self::Prep, exec: Self::Exec) -> Result<Action> {
    let _ = (shared, prep, exec);
    Ok(Action::DEFAULT)
  }
}

/// Runs one full visit of `node`: prep, exec, post.
///
/// The first failing phase aborts the visit; its error is returned as is.
#[instrument(level = "trace", skip_all, fields(node = type_name::<N>()))]
pub fn run_lifecycle<N: Node + ?Sized>(node: &N, shared: &mut SharedContext) -> Result<Action> {
  let prep = node.prep(shared)?;
  trace!("prep done");
  let exec = node.exec(shared, &prep)?;
  trace!("exec done");
  let action = node.post(shared, prep, exec)?;
  trace!(action = %action, "post done");
  Ok(action)
}

/// Object-safe view of a node, as stored in a [`crate::Graph`].
///
/// Every [`Node`] is a `DynNode`; [`crate::Flow`] implements it directly so
/// flows can be nested inside other flows.
pub trait DynNode {
  /// Runs one full visit and returns the action label.
  fn run_visit(&self, shared: &mut SharedContext) -> Result<Action>;

  /// Type name used in logs.
  fn kind(&self) -> &'static str;
}

impl<N: Node> DynNode for N {
  fn run_visit(&self, shared: &mut SharedContext) -> Result<Action> {
    run_lifecycle(self, shared)
  }

  fn kind(&self) -> &'static str {
    type_name::<N>()
  }
}
