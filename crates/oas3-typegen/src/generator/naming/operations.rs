use super::identifiers::sanitize;

/// Fallback id for operations that declare no `operationId`.
///
/// ```text
/// GET /pets/{petId}/toys => get_pets_by_id_toys
/// ```
#[must_use]
pub fn generate_operation_id(method: &str, path: &str) -> String {
  let path_parts: Vec<&str> = path
    .split('/')
    .filter(|s| !s.is_empty())
    .map(|s| {
      if s.starts_with('{') && s.ends_with('}') {
        "by_id"
      } else {
        s
      }
    })
    .collect();

  let method_lower = method.to_lowercase();
  if path_parts.is_empty() {
    method_lower
  } else {
    format!("{}_{}", method_lower, path_parts.join("_"))
  }
}

/// Identifier-safe form of an operation id, used inside `Parameter$<id>` style names.
#[must_use]
pub fn operation_identifier(operation_id: &str) -> String {
  let ident = sanitize(operation_id);
  if ident.is_empty() { "operation".to_string() } else { ident }
}

/// `Parameter$getPet`
#[must_use]
pub fn parameter_type_name(operation_id: &str) -> String {
  format!("Parameter${}", operation_identifier(operation_id))
}

/// `RequestBody$createPet`
#[must_use]
pub fn request_body_type_name(operation_id: &str) -> String {
  format!("RequestBody${}", operation_identifier(operation_id))
}

/// `Response$getPet$Status$200`
#[must_use]
pub fn response_type_name(operation_id: &str, status: &str) -> String {
  format!("Response${}$Status${}", operation_identifier(operation_id), sanitize(status))
}
