//! Tests for batch nodes and chunking.

use std::cell::RefCell;
use std::num::NonZeroUsize;

use proptest::prelude::*;

use super::batch::{Batch, BatchNode, chunk_ranges};
use crate::error::{FlowError, Result};
use crate::node::run_lifecycle;
use crate::types::{Action, SharedContext};

fn size(n: usize) -> NonZeroUsize {
  NonZeroUsize::new(n).unwrap()
}

#[test]
fn chunk_ranges_uneven() {
  assert_eq!(chunk_ranges(25, size(10)), vec![0..10, 10..20, 20..25]);
}

#[test]
fn chunk_ranges_empty() {
  assert!(chunk_ranges(0, size(10)).is_empty());
}

#[test]
fn chunk_ranges_single_element_chunks() {
  assert_eq!(chunk_ranges(3, size(1)), vec![0..1, 1..2, 2..3]);
}

#[test]
fn chunk_ranges_chunk_larger_than_input() {
  assert_eq!(chunk_ranges(4, size(10)), vec![0..4]);
}

proptest! {
  #[test]
  fn chunk_ranges_cover_input_exactly_once(len in 0usize..500, c in 1usize..64) {
    let ranges = chunk_ranges(len, size(c));
    prop_assert_eq!(ranges.len(), len.div_ceil(c));
    let mut next = 0;
    for r in &ranges {
      prop_assert_eq!(r.start, next);
      prop_assert!(r.end > r.start);
      prop_assert!(r.end - r.start <= c);
      next = r.end;
    }
    prop_assert_eq!(next, len);
  }
}

/// Emits each letter of a word, optionally failing on one letter.
struct Letters {
  seen: RefCell<Vec<char>>,
  fail_on: Option<char>,
}

impl Letters {
  fn new(fail_on: Option<char>) -> Self {
    Self {
      seen: RefCell::new(Vec::new()),
      fail_on,
    }
  }
}

impl BatchNode for Letters {
  type Item = char;
  type Output = String;

  fn prep(&self, shared: &SharedContext) -> Result<Vec<char>> {
    let word: String = shared.get_or_default("word")?;
    Ok(word.chars().collect())
  }

  fn exec(&self, _shared: &SharedContext, item: &char) -> Result<String> {
    self.seen.borrow_mut().push(*item);
    if self.fail_on == Some(*item) {
      return Err(FlowError::failed(format!("bad letter {item}")));
    }
    Ok(item.to_ascii_uppercase().to_string())
  }

  fn post(&self, shared: &mut SharedContext, items: Vec<char>, outputs: Vec<String>) -> Result<Action> {
    shared.insert("count", items.len())?;
    shared.insert("upper", outputs.concat())?;
    Ok(Action::from("merged"))
  }
}

#[test]
fn outputs_reach_post_in_item_order() {
  let node = Batch::new(Letters::new(None));
  let mut shared = SharedContext::new();
  shared.insert("word", "flow").unwrap();
  let action = run_lifecycle(&node, &mut shared).unwrap();
  assert_eq!(action.as_str(), "merged");
  assert_eq!(shared.get_as::<String>("upper").unwrap().as_deref(), Some("FLOW"));
  assert_eq!(*node.inner().seen.borrow(), vec!['f', 'l', 'o', 'w']);
}

#[test]
fn empty_batch_still_runs_post() {
  let node = Batch::new(Letters::new(None));
  let mut shared = SharedContext::new();
  run_lifecycle(&node, &mut shared).unwrap();
  assert_eq!(shared.get_as::<usize>("count").unwrap(), Some(0));
  assert_eq!(shared.get_as::<String>("upper").unwrap().as_deref(), Some(""));
}

#[test]
fn failing_item_stops_batch_and_skips_post() {
  let node = Batch::new(Letters::new(Some('o')));
  let mut shared = SharedContext::new();
  shared.insert("word", "flow").unwrap();
  let err = run_lifecycle(&node, &mut shared).unwrap_err();
  assert!(matches!(err, FlowError::Failed(ref m) if m == "bad letter o"));
  assert_eq!(*node.inner().seen.borrow(), vec!['f', 'l', 'o']);
  assert!(!shared.contains_key("upper"));
}
