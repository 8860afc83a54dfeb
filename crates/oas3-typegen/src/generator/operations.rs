//! Walks `paths` and produces the free-standing declarations of each operation.
//!
//! Runs after every component namespace is generated, so references only add
//! to the store what external documents still contribute.

use http::Method;
use indexmap::IndexMap;
use serde_json::Value;

use super::{
  ast::{InterfaceDecl, Keyword, PropertySignature, Statement, TypeAliasDecl, TypeMember},
  components::{CONTENT, comment_for, content_members, final_definition, member_of},
  context::{ConversionContext, GeneratorContext},
  converter::{ConvertOptions, convert},
  document::{DocumentPoint, DocumentSet, JsonPointer},
  errors::{GenerateError, Result},
  metrics::GenerationWarning,
  naming::operations::{generate_operation_id, parameter_type_name, request_body_type_name, response_type_name},
  reference::{Reference, ReferenceKind},
  registry::ComponentName,
  schema::{is_deprecated, reference_pointer},
  store::OperationStatePatch,
};

/// Operation keys of a path item, in emission order.
fn methods() -> [(&'static str, Method); 8] {
  [
    ("get", Method::GET),
    ("put", Method::PUT),
    ("post", Method::POST),
    ("delete", Method::DELETE),
    ("options", Method::OPTIONS),
    ("head", Method::HEAD),
    ("patch", Method::PATCH),
    ("trace", Method::TRACE),
  ]
}

/// An operation under `paths`, as listed by the CLI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationEntry {
  pub operation_id: String,
  pub method: Method,
  pub path: String,
  pub deprecated: bool,
}

/// Every operation of the entry document, in path and method order. Nothing is generated.
pub fn collect_operations(documents: &DocumentSet) -> Result<Vec<OperationEntry>> {
  let Some(paths) = documents.root().get("paths").and_then(Value::as_object) else {
    return Ok(vec![]);
  };
  let base = documents.entry_point(JsonPointer::from_segments(["paths"]));

  let mut entries = vec![];
  for (uri, item) in paths {
    let item = if reference_pointer(item).is_some() {
      Reference::resolve(documents, &base.join(uri.as_str()), item)?.data
    } else {
      item
    };
    for (key, method) in methods() {
      if let Some(operation) = item.get(key) {
        entries.push(OperationEntry {
          operation_id: operation_id(operation, key, uri),
          method,
          path: uri.clone(),
          deprecated: is_deprecated(operation),
        });
      }
    }
  }
  Ok(entries)
}

fn operation_id(operation: &Value, key: &str, uri: &str) -> String {
  operation
    .get("operationId")
    .and_then(Value::as_str)
    .map_or_else(|| generate_operation_id(key, uri), str::to_string)
}

pub fn generate_operations(ctx: &mut GeneratorContext<'_>) -> Result<()> {
  let documents = ctx.documents();
  let Some(paths) = documents.root().get("paths").and_then(Value::as_object) else {
    return Ok(());
  };
  let base = documents.entry_point(JsonPointer::from_segments(["paths"]));

  for (uri, item) in paths {
    let (item_point, item) = resolve_path_item(ctx, base.join(uri.as_str()), item)?;
    for (key, method) in methods() {
      if item.get(key).is_some() {
        generate_operation(ctx, method, uri, &item_point, item, key)?;
      }
    }
  }
  Ok(())
}

fn resolve_path_item<'d>(
  ctx: &mut GeneratorContext<'d>,
  point: DocumentPoint,
  item: &'d Value,
) -> Result<(DocumentPoint, &'d Value)> {
  if reference_pointer(item).is_none() {
    return Ok((point, item));
  }

  let documents = ctx.documents();
  let reference = Reference::resolve(documents, &point, item)?;
  let item = match reference.component {
    Some(ComponentName::PathItems) if reference.kind == ReferenceKind::Local => {
      ctx.store().get_path_item(&reference.path)?
    }
    _ => reference.data,
  };
  Ok((reference.point, item))
}

fn generate_operation<'d>(
  ctx: &mut GeneratorContext<'d>,
  method: Method,
  uri: &str,
  item_point: &DocumentPoint,
  item: &'d Value,
  key: &str,
) -> Result<()> {
  let point = item_point.join(key);
  let operation = &item[key];
  let operation_id = operation_id(operation, key, uri);

  let mut statements = vec![];

  let parameters = parameter_members(ctx, [(item_point.clone(), item), (point.clone(), operation)])?;
  let parameter_names: Vec<String> = parameters.keys().cloned().collect();
  if !parameters.is_empty() {
    statements.push(Statement::Interface(
      InterfaceDecl::builder()
        .name(parameter_type_name(&operation_id))
        .members(parameters.into_values().collect())
        .build(),
    ));
  }

  let mut request_body = None;
  if let Some(body) = operation.get("requestBody") {
    let name = request_body_type_name(&operation_id);
    let statement = content_statement(ctx, &point.join("requestBody"), body, ComponentName::RequestBodies, &name)?;
    if let Some(statement) = statement {
      statements.push(statement);
      request_body = Some(name);
    }
  }

  let mut responses = vec![];
  if let Some(declared) = operation.get("responses").and_then(Value::as_object) {
    let base = point.join("responses");
    for (status, response) in declared {
      let name = response_type_name(&operation_id, status);
      let statement = content_statement(ctx, &base.join(status.as_str()), response, ComponentName::Responses, &name)?;
      if let Some(statement) = statement {
        statements.push(statement);
        responses.push(name);
      }
    }
  }

  if let Some(existing) = ctx.store().operation_state(&operation_id)
    && (existing.method != method || existing.request_uri != uri)
  {
    ctx.warn(GenerationWarning::DuplicateOperationId {
      operation_id: operation_id.clone(),
      method: method.to_string(),
      path: uri.to_string(),
    });
  }

  let store = ctx.store_mut();
  store.update_operation_state(
    method,
    uri,
    &operation_id,
    OperationStatePatch::builder()
      .parameters(parameter_names)
      .maybe_request_body(request_body)
      .responses(responses)
      .deprecated(is_deprecated(operation))
      .maybe_summary(operation.get("summary").and_then(Value::as_str))
      .build(),
  );
  store.add_additional_statements(statements);
  Ok(())
}

/// Members keyed by parameter name; later sources override earlier ones.
fn parameter_members<'d>(
  ctx: &mut GeneratorContext<'d>,
  sources: [(DocumentPoint, &'d Value); 2],
) -> Result<IndexMap<String, TypeMember>> {
  let mut members = IndexMap::new();

  for (owner_point, owner) in sources {
    let Some(entries) = owner.get("parameters").and_then(Value::as_array) else {
      continue;
    };
    let base = owner_point.join("parameters");

    for (index, entry) in entries.iter().enumerate() {
      let (point, definition) = resolve_parameter(ctx, base.join(index.to_string()), entry)?;
      let name = definition
        .get("name")
        .and_then(Value::as_str)
        .ok_or_else(|| GenerateError::unsupported(format!("parameter without a name at {point}")))?;

      let ty = match definition.get("schema") {
        Some(schema) => {
          let documents = ctx.documents();
          convert(
            documents,
            &point.join("schema"),
            schema,
            ctx,
            ConvertOptions::with_parent(definition),
          )?
        }
        None => Keyword::Undefined.into(),
      };

      let required = definition.get("required").and_then(Value::as_bool).unwrap_or(false);
      members.insert(
        name.to_string(),
        TypeMember::Property(
          PropertySignature::builder()
            .name(name)
            .ty(ty)
            .optional(!required)
            .maybe_comment(comment_for(definition))
            .build(),
        ),
      );
    }
  }

  Ok(members)
}

fn resolve_parameter<'d>(
  ctx: &mut GeneratorContext<'d>,
  point: DocumentPoint,
  entry: &'d Value,
) -> Result<(DocumentPoint, &'d Value)> {
  if reference_pointer(entry).is_none() {
    return Ok((point, entry));
  }

  let documents = ctx.documents();
  let reference = Reference::resolve(documents, &point, entry)?;
  ctx.register_reference(&reference)?;
  let definition = match reference.component {
    Some(ComponentName::Parameters) if reference.kind == ReferenceKind::Local => {
      ctx.store().get_parameter(&reference.path)?
    }
    _ => reference.data,
  };
  Ok((reference.point, definition))
}

/// Interface of the media types of a request body or response, or an alias of
/// the `Content` member of the referenced component. `None` without content.
fn content_statement(
  ctx: &mut GeneratorContext<'_>,
  point: &DocumentPoint,
  value: &Value,
  component: ComponentName,
  name: &str,
) -> Result<Option<Statement>> {
  if reference_pointer(value).is_some() {
    let documents = ctx.documents();
    let reference = Reference::resolve(documents, point, value)?;
    ctx.register_reference(&reference)?;

    if reference.component != Some(component) {
      return content_statement(ctx, &reference.point, reference.data, component, name);
    }
    if final_definition(documents, &reference)?.get("content").is_none() {
      return Ok(None);
    }
    let target = ctx.reference_name(point, &reference.path);
    return Ok(Some(Statement::TypeAlias(
      TypeAliasDecl::builder()
        .name(name)
        .maybe_comment(comment_for(value))
        .ty(member_of(&target, CONTENT))
        .build(),
    )));
  }

  let Some(content) = value.get("content").and_then(Value::as_object) else {
    return Ok(None);
  };
  let members = content_members(ctx, &point.join("content"), content)?;
  Ok(Some(Statement::Interface(
    InterfaceDecl::builder()
      .name(name)
      .maybe_comment(comment_for(value))
      .members(members)
      .build(),
  )))
}
