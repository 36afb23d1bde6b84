//! Flow: walks a graph from its start node, following the edge named by each
//! node's returned action until no edge matches.

use std::fmt;

use tracing::{debug, info, instrument, warn};

use crate::error::{FlowError, Result};
use crate::graph::Graph;
use crate::node::DynNode;
use crate::types::{Action, FlowConfig, FlowOutcome, FlowStep, NodeId, SharedContext};

/// Hook run after a flow's walk ends; picks the action the flow exits with.
pub type FlowPost = Box<dyn Fn(&mut SharedContext, &FlowOutcome) -> Result<Action>>;

/// Drives execution over a [`Graph`].
///
/// A flow keeps no state between runs; everything a run produces is written to
/// the caller's [`SharedContext`]. A flow is itself a [`DynNode`], so it can be
/// added to another graph as a sub-flow. Its exit action, which routes the
/// outer flow, is [`Action::DEFAULT`] unless a post hook is set with
/// [`Flow::with_post`].
pub struct Flow {
  graph: Graph,
  start: NodeId,
  config: FlowConfig,
  post: Option<FlowPost>,
}

impl fmt::Debug for Flow {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Flow")
      .field("graph", &self.graph)
      .field("start", &self.start)
      .field("config", &self.config)
      .field("post", &self.post.is_some())
      .finish()
  }
}

impl Flow {
  /// Creates a flow starting at `start`, which must belong to `graph`.
  pub fn new(graph: Graph, start: NodeId) -> Result<Self> {
    if !graph.contains(start) {
      return Err(FlowError::UnknownNode(start));
    }
    Ok(Self {
      graph,
      start,
      config: FlowConfig::default(),
      post: None,
    })
  }

  /// Replaces the run limits.
  pub fn with_config(mut self, config: FlowConfig) -> Self {
    self.config = config;
    self
  }

  /// Sets a hook that runs once the walk has ended. It may write to the
  /// context and returns the flow's exit action. A hook error fails the run.
  pub fn with_post<F>(mut self, post: F) -> Self
  where
    F: Fn(&mut SharedContext, &FlowOutcome) -> Result<Action> + 'static,
  {
    self.post = Some(Box::new(post));
    self
  }

  /// Graph this flow walks.
  pub fn graph(&self) -> &Graph {
    &self.graph
  }

  /// Node every run begins at.
  pub fn start(&self) -> NodeId {
    self.start
  }

  /// Run limits in effect.
  pub fn config(&self) -> &FlowConfig {
    &self.config
  }

  /// Runs the flow to completion against `shared`.
  ///
  /// Halts after the first node whose action has no registered successor.
  /// A phase error aborts the run immediately and is returned unchanged; the
  /// context keeps every write made before the failure. The post hook, if
  /// any, runs after the walk and sets [`FlowOutcome::exit_action`].
  #[instrument(level = "trace", skip_all, fields(start = %self.start))]
  pub fn run(&self, shared: &mut SharedContext) -> Result<FlowOutcome> {
    let start_name = self.graph.name(self.start).unwrap_or_default();
    info!(start = %start_name, "flow run starting");

    let mut current = self.start;
    let mut visits = 0usize;
    let mut steps = Vec::new();

    loop {
      if let Some(limit) = self.config.max_steps
        && visits >= limit
      {
        warn!(limit, "flow step limit reached");
        return Err(FlowError::StepLimitExceeded { limit });
      }
      visits += 1;

      let node = self
        .graph
        .node(current)
        .ok_or(FlowError::UnknownNode(current))?;
      debug!(step = visits, node = %node.name(), kind = node.kind(), "visiting node");

      let action = node.run_visit(shared).inspect_err(|e| {
        warn!(step = visits, node = %node.name(), error = %e, "node failed");
      })?;
      let next = self.next_node(current, &action);

      if self.config.record_steps {
        steps.push(FlowStep {
          step: visits,
          node: current,
          name: node.name().to_string(),
          action: action.clone(),
          next,
        });
      }

      match next {
        Some(next) => current = next,
        None => {
          info!(visits, last = %node.name(), action = %action, "flow run complete");
          let mut outcome = FlowOutcome {
            last_action: action,
            exit_action: Action::DEFAULT,
            visits,
            steps,
          };
          if let Some(post) = &self.post {
            outcome.exit_action = post(shared, &outcome)?;
            debug!(exit = %outcome.exit_action, "flow post hook done");
          }
          return Ok(outcome);
        }
      }
    }
  }

  /// Successor of `current` for `action`. Ending on an action that the node
  /// has no edge for is not an error, but is logged when the node has other
  /// edges.
  fn next_node(&self, current: NodeId, action: &Action) -> Option<NodeId> {
    let next = self.graph.successor(current, action);
    if next.is_none()
      && let Some(node) = self.graph.node(current)
      && !node.successors().is_empty()
    {
      let mut known: Vec<&str> = node.successors().keys().map(Action::as_str).collect();
      known.sort_unstable();
      warn!(
        node = %node.name(),
        action = %action,
        known = ?known,
        "flow ends: action has no successor"
      );
    }
    next
  }
}

impl DynNode for Flow {
  /// Runs the whole sub-flow and continues the outer flow on its exit action.
  fn run_visit(&self, shared: &mut SharedContext) -> Result<Action> {
    Ok(self.run(shared)?.exit_action)
  }

  fn kind(&self) -> &'static str {
    "Flow"
  }
}
