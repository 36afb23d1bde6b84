//! Value types shared across the engine.

mod action;
#[cfg(test)]
mod action_test;
mod flow_config;
mod flow_outcome;
mod node_id;
mod shared_context;

pub use action::{Action, DEFAULT_ACTION};
pub use flow_config::{FlowConfig, MAX_STEPS_ENV, RECORD_STEPS_ENV};
pub use flow_outcome::{FlowOutcome, FlowStep};
pub use node_id::NodeId;
pub use shared_context::{PARAMS_KEY, Params, SharedContext};
