//! Tests for `FlowError`.

use super::error::FlowError;
use crate::types::NodeId;

#[test]
fn failed_formats_message() {
  let e = FlowError::failed("chunk 3 overflowed");
  assert_eq!(e.to_string(), "node failed: chunk 3 overflowed");
}

#[test]
fn other_is_transparent() {
  let io = std::io::Error::other("disk gone");
  let e = FlowError::other(io);
  assert_eq!(e.to_string(), "disk gone");
}

#[test]
fn invalid_value_names_key() {
  let source = serde_json::from_str::<u32>("\"x\"").unwrap_err();
  let e = FlowError::InvalidValue {
    key: "total".to_string(),
    source,
  };
  assert!(e.to_string().starts_with("invalid value for context key 'total'"));
}

#[test]
fn unknown_node_and_step_limit_messages() {
  assert_eq!(FlowError::UnknownNode(NodeId(7)).to_string(), "unknown node: #7");
  assert_eq!(
    FlowError::StepLimitExceeded { limit: 3 }.to_string(),
    "step limit of 3 exceeded"
  );
}
