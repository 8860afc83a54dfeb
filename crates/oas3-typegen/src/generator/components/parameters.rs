use serde_json::Value;

use super::{EntryTarget, comment_for, entry_target};
use crate::generator::{
  ast::{Keyword, Literal, PropertySignature, TypeAliasDecl, TypeMember, TypeNode},
  context::{ConversionContext, GeneratorContext},
  converter::{ConvertOptions, convert},
  document::DocumentPoint,
  errors::{GenerateError, Result},
  metrics::GenerationWarning,
  reference::{Reference, ReferenceKind},
  registry::ComponentName,
  schema::reference_pointer,
  store::ComponentStatement,
};

pub(super) fn generate(ctx: &mut GeneratorContext<'_>, name: &str, point: &DocumentPoint, data: &Value) -> Result<()> {
  if reference_pointer(data).is_some() {
    let documents = ctx.documents();
    let reference = Reference::resolve(documents, point, data)?;
    if reference.kind == ReferenceKind::Local {
      return Err(local_reference_error(name));
    }
    if reference.data.get("schema").is_none() {
      ctx.warn(GenerationWarning::ParameterSkipped {
        name: name.to_string(),
        reason: format!("{} has no schema", reference.point),
      });
      return Ok(());
    }
  }

  let ty = match entry_target(ctx, ComponentName::Parameters, name, point, data)? {
    Some(EntryTarget::Inline(reference)) => return generate(ctx, name, &reference.point, reference.data),
    Some(EntryTarget::Named { name: target, .. }) => TypeNode::reference(target),
    None => parameter_type(ctx, point, data)?,
  };

  add_alias(ctx, name, data, ty)
}

/// Parameters given as a list: entries are keyed by `name`, or by the
/// referenced entry's name for references.
pub(super) fn generate_list(ctx: &mut GeneratorContext<'_>, base: &DocumentPoint, entries: &[Value]) -> Result<()> {
  for (index, entry) in entries.iter().enumerate() {
    let point = base.join(index.to_string());

    if reference_pointer(entry).is_some() {
      let documents = ctx.documents();
      let reference = Reference::resolve(documents, &point, entry)?;
      if reference.kind == ReferenceKind::Local {
        return Err(local_reference_error(&reference.name));
      }
      let path = ComponentName::Parameters.entry_path(&reference.name);
      ctx.materialize_with(&path, |ctx| {
        let ty = parameter_type(ctx, &reference.point, reference.data)?;
        add_alias(ctx, &reference.name, reference.data, ty)
      })?;
      continue;
    }

    let name = entry
      .get("name")
      .and_then(Value::as_str)
      .ok_or_else(|| GenerateError::unsupported(format!("parameter without a name at {point}")))?;
    let path = ComponentName::Parameters.entry_path(name);
    ctx.materialize_with(&path, |ctx| {
      let ty = parameter_type(ctx, &point, entry)?;
      add_alias(ctx, name, entry, ty)
    })?;
  }
  Ok(())
}

fn local_reference_error(name: &str) -> GenerateError {
  GenerateError::unsupported(format!(
    "components.parameters entry '{name}' is a local reference; define the parameter in place"
  ))
}

fn add_alias(ctx: &mut GeneratorContext<'_>, name: &str, data: &Value, ty: TypeNode) -> Result<()> {
  let identifier = ctx.entry_identifier(ComponentName::Parameters, name);
  ctx.store_mut().add_statement(
    &ComponentName::Parameters.entry_path(name),
    ComponentStatement::TypeAlias(
      TypeAliasDecl::builder()
        .name(identifier)
        .maybe_comment(comment_for(data))
        .ty(ty)
        .build(),
    ),
  )
}

fn literal_string(value: Option<&Value>) -> TypeNode {
  match value.and_then(Value::as_str) {
    Some(text) => TypeNode::Literals(vec![Literal::String(text.to_string())]),
    None => Keyword::String.into(),
  }
}

fn member(name: &str, ty: TypeNode) -> TypeMember {
  TypeMember::Property(PropertySignature::builder().name(name).ty(ty).build())
}

/// `{ name: "<name>"; in: "<in>"; required?; description?; style?; explode?; schema }`
pub(crate) fn parameter_type(ctx: &mut GeneratorContext<'_>, point: &DocumentPoint, parameter: &Value) -> Result<TypeNode> {
  let mut members = vec![
    member("name", literal_string(parameter.get("name"))),
    member("in", literal_string(parameter.get("in"))),
  ];

  if let Some(required) = parameter.get("required").and_then(Value::as_bool) {
    members.push(member("required", TypeNode::Literals(vec![Literal::Boolean(required)])));
  }
  if parameter.get("description").is_some() {
    members.push(member("description", literal_string(parameter.get("description"))));
  }
  if parameter.get("style").is_some() {
    members.push(member("style", literal_string(parameter.get("style"))));
  }
  if let Some(explode) = parameter.get("explode").and_then(Value::as_bool) {
    members.push(member("explode", TypeNode::Literals(vec![Literal::Boolean(explode)])));
  }
  if let Some(schema) = parameter.get("schema") {
    let documents = ctx.documents();
    let ty = convert(
      documents,
      &point.join("schema"),
      schema,
      ctx,
      ConvertOptions::with_parent(parameter),
    )?;
    members.push(member("schema", ty));
  }

  Ok(TypeNode::Object(members))
}
