use http::Method;
use serde_json::json;

use crate::generator::store::{OperationStatePatch, Store};

#[test]
fn test_update_operation_state_creates_default() {
  let document = json!({});
  let mut store = Store::new(&document);
  store.update_operation_state(Method::GET, "/pets", "listPets", OperationStatePatch::default());

  let state = store.operation_state("listPets").expect("state");
  assert_eq!(state.method, Method::GET);
  assert_eq!(state.request_uri, "/pets");
  assert!(state.parameters.is_empty());
  assert!(state.request_body.is_none());
  assert!(!state.deprecated);
}

#[test]
fn test_update_operation_state_merges_fields() {
  let document = json!({});
  let mut store = Store::new(&document);
  store.update_operation_state(
    Method::POST,
    "/pets",
    "createPet",
    OperationStatePatch::builder()
      .parameters(vec!["limit".to_string()])
      .summary("Create a pet")
      .build(),
  );
  store.update_operation_state(
    Method::POST,
    "/pets",
    "createPet",
    OperationStatePatch::builder()
      .request_body("NewPet")
      .responses(vec!["201".to_string()])
      .build(),
  );

  let state = store.operation_state("createPet").expect("state");
  assert_eq!(state.parameters, ["limit"]);
  assert_eq!(state.request_body.as_deref(), Some("NewPet"));
  assert_eq!(state.responses, ["201"]);
  assert_eq!(state.summary.as_deref(), Some("Create a pet"));
  assert_eq!(store.operations().len(), 1);
}
