use crate::generator::naming::operations::{
  generate_operation_id, parameter_type_name, request_body_type_name, response_type_name,
};

#[test]
fn test_generate_operation_id() {
  let cases = [
    ("GET", "/pets", "get_pets"),
    ("get", "/pets/{petId}", "get_pets_by_id"),
    ("DELETE", "/pets/{petId}/toys/{toyId}", "delete_pets_by_id_toys_by_id"),
    ("post", "/", "post"),
  ];
  for (method, path, expected) in cases {
    assert_eq!(generate_operation_id(method, path), expected, "{method} {path}");
  }
}

#[test]
fn test_operation_statement_names() {
  assert_eq!(parameter_type_name("getPet"), "Parameter$getPet");
  assert_eq!(request_body_type_name("pets.create"), "RequestBody$pets_create");
  assert_eq!(response_type_name("getPet", "200"), "Response$getPet$Status$200");
  assert_eq!(response_type_name("getPet", "4XX"), "Response$getPet$Status$4XX");
  assert_eq!(response_type_name("getPet", "default"), "Response$getPet$Status$default");
}
