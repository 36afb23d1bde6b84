//! Runs the map-reduce sum pipeline with logging enabled.
//!
//! `RUST_LOG=minillmflow=debug cargo run --example map_reduce`
//! Honours `MINILLMFLOW_MAX_STEPS` / `MINILLMFLOW_RECORD_STEPS`.

use std::num::NonZeroUsize;

use minillmflow::nodes::{ChunkSumNode, SumReduceNode, TOTAL_KEY};
use minillmflow::{Batch, Flow, FlowConfig, Graph, SharedContext};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .init();

  let chunk_size = NonZeroUsize::new(15).ok_or("chunk size must be non-zero")?;
  let mut graph = Graph::new();
  let chunk = graph.add("chunk", Batch::new(ChunkSumNode::new(chunk_size)));
  let reduce = graph.add("reduce", SumReduceNode::new());
  graph.connect(chunk, reduce);
  let flow = Flow::new(graph, chunk)?.with_config(FlowConfig::from_env()?);

  let mut shared = SharedContext::new();
  shared.insert("input_array", (0..100).collect::<Vec<i64>>())?;
  let outcome = flow.run(&mut shared)?;

  let total: i64 = shared.require(TOTAL_KEY)?;
  info!(total, visits = outcome.visits, "pipeline finished");
  println!("Pipeline completed.");
  println!("  Total: {total}");
  println!("  Visited: {:?}", outcome.visited_names());
  Ok(())
}
