//! Node arena and labeled edges.

use std::collections::HashMap;
use std::fmt;

use tracing::{instrument, warn};

use crate::error::{FlowError, Result};
use crate::node::DynNode;
use crate::types::{Action, NodeId, SharedContext};

/// A node stored in a [`Graph`] with its outgoing edges.
pub struct GraphNode {
  name: String,
  node: Box<dyn DynNode>,
  successors: HashMap<Action, NodeId>,
}

impl GraphNode {
  /// Name given at registration.
  pub fn name(&self) -> &str {
    &self.name
  }

  /// Type name of the stored node, or `"Flow"` for a nested flow.
  pub fn kind(&self) -> &'static str {
    self.node.kind()
  }

  /// Outgoing edges keyed by action.
  pub fn successors(&self) -> &HashMap<Action, NodeId> {
    &self.successors
  }

  pub(crate) fn run_visit(&self, shared: &mut SharedContext) -> Result<Action> {
    self.node.run_visit(shared)
  }
}

impl fmt::Debug for GraphNode {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("GraphNode")
      .field("name", &self.name)
      .field("kind", &self.kind())
      .field("successors", &self.successors)
      .finish()
  }
}

/// Owns a set of nodes and the action-labeled edges between them.
///
/// Each node has at most one successor per action. Nodes are never removed,
/// so a [`NodeId`] returned by [`Graph::add`] stays valid for the graph's
/// lifetime. Passing an id minted by a different graph to the edge methods
/// panics.
#[derive(Debug, Default)]
pub struct Graph {
  nodes: Vec<GraphNode>,
}

impl Graph {
  /// Creates an empty graph.
  pub fn new() -> Self {
    Self::default()
  }

  /// Adds a node and returns its id. Names are used for logs and step records.
  pub fn add<N: DynNode + 'static>(&mut self, name: impl Into<String>, node: N) -> NodeId {
    self.add_boxed(name, Box::new(node))
  }

  /// Adds an already boxed node, e.g. one picked at runtime.
  pub fn add_boxed(&mut self, name: impl Into<String>, node: Box<dyn DynNode>) -> NodeId {
    let id = NodeId(self.nodes.len());
    self.nodes.push(GraphNode {
      name: name.into(),
      node,
      successors: HashMap::new(),
    });
    id
  }

  /// Registers `to` as the default successor of `from` and returns `to`.
  pub fn connect(&mut self, from: NodeId, to: NodeId) -> NodeId {
    self.connect_on(from, Action::DEFAULT, to)
  }

  /// Registers `to` as the successor of `from` for `action` and returns `to`.
  ///
  /// Replaces any successor previously registered for the same action.
  ///
  /// # Panics
  ///
  /// Panics if `from` or `to` does not belong to this graph.
  #[instrument(level = "trace", skip(self, action))]
  pub fn connect_on(&mut self, from: NodeId, action: impl Into<Action>, to: NodeId) -> NodeId {
    let action = action.into();
    assert!(self.contains(from), "node {from} is not in this graph");
    assert!(self.contains(to), "successor {to} is not in this graph");
    let previous = self.nodes[from.0].successors.insert(action.clone(), to);
    if let Some(previous) = previous {
      warn!(
        node = %self.nodes[from.0].name,
        action = %action,
        previous = %self.nodes[previous.0].name,
        replacement = %self.nodes[to.0].name,
        "overwriting existing successor"
      );
    }
    to
  }

  /// Starts a fluent chain of edge registrations at `from`.
  pub fn chain(&mut self, from: NodeId) -> Chain<'_> {
    Chain {
      graph: self,
      current: from,
    }
  }

  /// Successor of `from` for `action`, if any.
  pub fn successor(&self, from: NodeId, action: &Action) -> Option<NodeId> {
    self.nodes.get(from.0)?.successors.get(action).copied()
  }

  /// All outgoing edges of `from`, or `None` if `from` is not in this graph.
  pub fn successors(&self, from: NodeId) -> Option<&HashMap<Action, NodeId>> {
    self.node(from).map(GraphNode::successors)
  }

  /// Node `id`, if it belongs to this graph.
  pub fn node(&self, id: NodeId) -> Option<&GraphNode> {
    self.nodes.get(id.index())
  }

  /// Name of node `id`.
  pub fn name(&self, id: NodeId) -> Option<&str> {
    self.node(id).map(GraphNode::name)
  }

  /// Whether `id` was minted by this graph.
  pub fn contains(&self, id: NodeId) -> bool {
    id.index() < self.nodes.len()
  }

  /// Number of registered nodes.
  pub fn len(&self) -> usize {
    self.nodes.len()
  }

  pub fn is_empty(&self) -> bool {
    self.nodes.is_empty()
  }

  /// Runs a single node's lifecycle without following any edge.
  pub fn run_node(&self, id: NodeId, shared: &mut SharedContext) -> Result<Action> {
    let node = self.node(id).ok_or(FlowError::UnknownNode(id))?;
    if !node.successors.is_empty() {
      warn!(
        node = %node.name,
        "node has successors; run it from a Flow to follow them"
      );
    }
    node.run_visit(shared)
  }
}

/// Cursor returned by [`Graph::chain`]; each call registers an edge from the
/// current node and moves to the successor.
pub struct Chain<'g> {
  graph: &'g mut Graph,
  current: NodeId,
}

impl Chain<'_> {
  /// Registers `to` as the default successor of the current node.
  pub fn then(self, to: NodeId) -> Self {
    self.on(Action::DEFAULT, to)
  }

  /// Registers `to` as the successor of the current node for `action`.
  pub fn on(self, action: impl Into<Action>, to: NodeId) -> Self {
    let current = self.graph.connect_on(self.current, action, to);
    Self {
      graph: self.graph,
      current,
    }
  }

  /// Node the cursor points at.
  pub fn current(&self) -> NodeId {
    self.current
  }
}
