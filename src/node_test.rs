//! Tests for the node lifecycle.

use std::cell::RefCell;

use super::node::{DynNode, Node, run_lifecycle};
use crate::error::{FlowError, Result};
use crate::types::{Action, SharedContext};

/// Records phase order and passes values between phases.
struct Recorder {
  log: RefCell<Vec<String>>,
  fail_in: Option<&'static str>,
}

impl Recorder {
  fn new(fail_in: Option<&'static str>) -> Self {
    Self {
      log: RefCell::new(Vec::new()),
      fail_in,
    }
  }

  fn enter(&self, phase: &'static str) -> Result<()> {
    self.log.borrow_mut().push(phase.to_string());
    if self.fail_in == Some(phase) {
      return Err(FlowError::failed(format!("{phase} failed")));
    }
    Ok(())
  }
}

impl Node for Recorder {
  type Prep = i64;
  type Exec = i64;

  fn prep(&self, shared: &SharedContext) -> Result<i64> {
    self.enter("prep")?;
    shared.get_or_default("seed")
  }

  fn exec(&self, _shared: &SharedContext, prep: &i64) -> Result<i64> {
    self.enter("exec")?;
    Ok(prep * 2)
  }

  fn post(&self, shared: &mut SharedContext, prep: i64, exec: i64) -> Result<Action> {
    self.enter("post")?;
    shared.insert("result", prep + exec)?;
    Ok(Action::from("done"))
  }
}

/// Relies on the provided `post`.
struct Silent;

impl Node for Silent {
  type Prep = ();
  type Exec = ();

  fn prep(&self, _shared: &SharedContext) -> Result<()> {
    Ok(())
  }

  fn exec(&self, _shared: &SharedContext, _prep: &()) -> Result<()> {
    Ok(())
  }
}

#[test]
fn phases_run_in_order_once() {
  let node = Recorder::new(None);
  let mut shared = SharedContext::new();
  shared.insert("seed", 5).unwrap();
  let action = run_lifecycle(&node, &mut shared).unwrap();
  assert_eq!(action.as_str(), "done");
  assert_eq!(*node.log.borrow(), vec!["prep", "exec", "post"]);
  assert_eq!(shared.get_as::<i64>("result").unwrap(), Some(15));
}

#[test]
fn default_post_returns_default_action() {
  let mut shared = SharedContext::new();
  let action = run_lifecycle(&Silent, &mut shared).unwrap();
  assert_eq!(action, Action::DEFAULT);
  assert!(shared.is_empty());
}

#[test]
fn exec_failure_skips_post() {
  let node = Recorder::new(Some("exec"));
  let mut shared = SharedContext::new();
  let err = run_lifecycle(&node, &mut shared).unwrap_err();
  assert!(matches!(err, FlowError::Failed(ref m) if m == "exec failed"));
  assert_eq!(*node.log.borrow(), vec!["prep", "exec"]);
  assert!(!shared.contains_key("result"));
}

#[test]
fn prep_failure_skips_exec_and_post() {
  let node = Recorder::new(Some("prep"));
  let mut shared = SharedContext::new();
  assert!(run_lifecycle(&node, &mut shared).is_err());
  assert_eq!(*node.log.borrow(), vec!["prep"]);
}

#[test]
fn dyn_node_delegates_to_lifecycle() {
  let node: Box<dyn DynNode> = Box::new(Recorder::new(None));
  let mut shared = SharedContext::new();
  let action = node.run_visit(&mut shared).unwrap();
  assert_eq!(action.as_str(), "done");
  assert!(node.kind().ends_with("Recorder"));
}
