//! Record of a finished flow run.

use serde::{Deserialize, Serialize};

use super::{Action, NodeId};

/// One node visit during a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowStep {
  /// 1-based visit index.
  pub step: usize,
  pub node: NodeId,
  /// Name the node was registered under.
  pub name: String,
  /// Action returned by the node's post phase.
  pub action: Action,
  /// Successor chosen for `action`, or `None` when the run halted here.
  pub next: Option<NodeId>,
}

/// Result of a completed run. Node outputs live in the shared context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowOutcome {
  /// Action returned by the last visited node.
  pub last_action: Action,
  /// Action the flow exits with when nested in another flow: the post hook's
  /// result, or `default` without one.
  pub exit_action: Action,
  /// Total number of node visits.
  pub visits: usize,
  /// Visits in order; empty when step recording is disabled.
  pub steps: Vec<FlowStep>,
}

impl FlowOutcome {
  /// Names of the visited nodes in order.
  pub fn visited_names(&self) -> Vec<&str> {
    self.steps.iter().map(|s| s.name.as_str()).collect()
  }

  /// Node the run halted on.
  pub fn last_node(&self) -> Option<NodeId> {
    self.steps.last().map(|s| s.node)
  }
}
