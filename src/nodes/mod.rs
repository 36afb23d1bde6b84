//! Ready-made nodes for the map-reduce sum pipeline.

mod chunk_sum;
mod sum_reduce;

pub use chunk_sum::{CHUNK_RESULTS_KEY, ChunkSumNode, INPUT_ARRAY_KEY};
pub use sum_reduce::{SumReduceNode, TOTAL_KEY};
