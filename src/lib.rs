//! # minillmflow
//!
//! Minimal directed-graph task engine.
//!
//! ## Architecture
//!
//! - [`Node`]: three-phase lifecycle (prep, exec, post). Post returns an [`Action`].
//! - [`BatchNode`]: prep yields items, exec runs once per item in order, post
//!   receives every output. Wrap in [`Batch`] to use it as a node.
//! - [`Graph`]: owns nodes and the action-labeled edges between them.
//! - [`Flow`]: starts at one node, runs it, follows the edge named by its
//!   action, and stops when no edge matches. A flow can be nested in another
//!   graph; an optional post hook picks the action it exits with.
//! - [`BatchFlow`]: runs a flow once per parameter set. Nodes read the current
//!   set with [`SharedContext::params`].
//!
//! All nodes of a run share one caller-owned [`SharedContext`].
//!
//! ```
//! use std::num::NonZeroUsize;
//! use minillmflow::nodes::{ChunkSumNode, SumReduceNode};
//! use minillmflow::{Batch, Flow, Graph, SharedContext};
//!
//! let mut graph = Graph::new();
//! let chunk = graph.add("chunk", Batch::new(ChunkSumNode::new(NonZeroUsize::new(10).unwrap())));
//! let reduce = graph.add("reduce", SumReduceNode::new());
//! graph.connect(chunk, reduce);
//! let flow = Flow::new(graph, chunk).unwrap();
//!
//! let mut shared = SharedContext::new();
//! shared.insert("input_array", (0..25).collect::<Vec<i64>>()).unwrap();
//! flow.run(&mut shared).unwrap();
//! assert_eq!(shared.get_as::<i64>("total").unwrap(), Some(300));
//! ```

pub mod batch;
pub mod batch_flow;
#[cfg(test)]
mod batch_test;
pub mod error;
#[cfg(test)]
mod error_test;
pub mod flow;
pub mod graph;
pub mod node;
#[cfg(test)]
mod node_test;
pub mod nodes;
pub mod types;

pub use batch::{Batch, BatchNode, chunk_ranges};
pub use batch_flow::{BatchFlow, BatchParams};
pub use error::{FlowError, Result};
pub use flow::{Flow, FlowPost};
pub use graph::{Chain, Graph, GraphNode};
pub use node::{DynNode, Node, run_lifecycle};
pub use types::{
  Action, DEFAULT_ACTION, FlowConfig, FlowOutcome, FlowStep, NodeId, PARAMS_KEY, Params,
  SharedContext,
};
