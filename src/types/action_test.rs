//! Tests for `Action`.

use std::collections::HashMap;

use super::{Action, DEFAULT_ACTION};

#[test]
fn default_is_the_reserved_label() {
  assert_eq!(Action::default(), Action::DEFAULT);
  assert_eq!(Action::default().as_str(), DEFAULT_ACTION);
  assert!(Action::DEFAULT.is_default());
}

#[test]
fn named_default_equals_constant() {
  assert_eq!(Action::from("default"), Action::DEFAULT);
}

#[test]
fn empty_label_is_not_default() {
  let empty = Action::from("");
  assert!(!empty.is_default());
  assert_ne!(empty, Action::DEFAULT);
}

#[test]
fn borrowed_and_owned_labels_hash_alike() {
  let mut edges = HashMap::new();
  edges.insert(Action::DEFAULT, 1);
  assert_eq!(edges.get(&Action::from(String::from("default"))), Some(&1));
}

#[test]
fn serializes_as_plain_string() {
  let json = serde_json::to_string(&Action::from("retry")).unwrap();
  assert_eq!(json, "\"retry\"");
  let back: Action = serde_json::from_str(&json).unwrap();
  assert_eq!(back.as_str(), "retry");
}
