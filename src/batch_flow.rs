//! Batch flows: run a whole flow once per parameter set.

use tracing::{debug, info, instrument, warn};

use crate::error::Result;
use crate::flow::Flow;
use crate::node::DynNode;
use crate::types::{Action, FlowOutcome, PARAMS_KEY, Params, SharedContext};

/// Supplies the parameter sets of a [`BatchFlow`] and handles the aggregate.
pub trait BatchParams {
  /// Produces one parameter map per run, in run order.
  fn prep(&self, shared: &SharedContext) -> Result<Vec<Params>>;

  /// Runs after every inner run succeeded. Receives the parameter sets from
  /// `prep` and the outcome of each run, in order.
  fn post(
    &self,
    shared: &mut SharedContext,
    params: Vec<Params>,
    outcomes: Vec<FlowOutcome>,
  ) -> Result<Action> {
    let _ = (shared, params, outcomes);
    Ok(Action::DEFAULT)
  }
}

/// Runs an inner [`Flow`] once per parameter set, strictly in order.
///
/// Before each run, the set is merged over the parameters already in effect
/// (those of an enclosing batch flow, if any) and written under
/// [`PARAMS_KEY`], where nodes read it with [`SharedContext::params`]. The
/// entry is rewritten before every run and restored to its previous value
/// afterwards, so writes to it from inside a run do not leak. The first
/// failing run aborts the batch and `post` does not run.
#[derive(Debug)]
pub struct BatchFlow<S> {
  flow: Flow,
  source: S,
}

impl<S: BatchParams> BatchFlow<S> {
  pub fn new(flow: Flow, source: S) -> Self {
    Self { flow, source }
  }

  /// Flow run once per parameter set.
  pub fn flow(&self) -> &Flow {
    &self.flow
  }

  pub fn source(&self) -> &S {
    &self.source
  }

  /// Runs prep, every inner run, then post; returns post's action.
  #[instrument(level = "trace", skip_all, fields(start = %self.flow.start()))]
  pub fn run(&self, shared: &mut SharedContext) -> Result<Action> {
    let sets = self.source.prep(shared)?;
    let outer = shared.params()?;
    info!(runs = sets.len(), "batch flow starting");

    let previous = shared.remove(PARAMS_KEY);
    let result = self.run_each(shared, &outer, &sets);
    match previous {
      Some(value) => shared.insert_value(PARAMS_KEY, value),
      None => shared.remove(PARAMS_KEY),
    };
    let outcomes = result?;

    let action = self.source.post(shared, sets, outcomes)?;
    info!(action = %action, "batch flow complete");
    Ok(action)
  }

  fn run_each(
    &self,
    shared: &mut SharedContext,
    outer: &Params,
    sets: &[Params],
  ) -> Result<Vec<FlowOutcome>> {
    let mut outcomes = Vec::with_capacity(sets.len());
    for (index, set) in sets.iter().enumerate() {
      let mut merged = outer.clone();
      merged.extend(set.iter().map(|(k, v)| (k.clone(), v.clone())));
      debug!(index, params = ?merged, "batch flow run");
      shared.insert_value(PARAMS_KEY, merged.into());
      let outcome = self.flow.run(shared).inspect_err(|e| {
        warn!(index, error = %e, "batch flow run failed");
      })?;
      outcomes.push(outcome);
    }
    Ok(outcomes)
  }
}

impl<S: BatchParams> DynNode for BatchFlow<S> {
  fn run_visit(&self, shared: &mut SharedContext) -> Result<Action> {
    self.run(shared)
  }

  fn kind(&self) -> &'static str {
    "BatchFlow"
  }
}
