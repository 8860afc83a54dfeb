use serde_json::{Map, Value};

use super::{EntryTarget, comment_for, entry_target};
use crate::generator::{
  ast::{Keyword, PropertySignature, TypeAliasDecl, TypeMember, TypeNode},
  context::{ConversionContext, GeneratorContext},
  converter::{ConvertOptions, convert},
  document::DocumentPoint,
  errors::Result,
  reference::Reference,
  registry::ComponentName,
  schema::reference_pointer,
  store::ComponentStatement,
};

pub(super) fn generate(ctx: &mut GeneratorContext<'_>, name: &str, point: &DocumentPoint, data: &Value) -> Result<()> {
  let ty = match entry_target(ctx, ComponentName::Headers, name, point, data)? {
    Some(EntryTarget::Inline(reference)) => return generate(ctx, name, &reference.point, reference.data),
    Some(EntryTarget::Named { name: target, .. }) => TypeNode::reference(target),
    None => header_type(ctx, point, data)?,
  };

  let identifier = ctx.entry_identifier(ComponentName::Headers, name);
  ctx.store_mut().add_statement(
    &ComponentName::Headers.entry_path(name),
    ComponentStatement::TypeAlias(
      TypeAliasDecl::builder()
        .name(identifier)
        .maybe_comment(comment_for(data))
        .ty(ty)
        .build(),
    ),
  )
}

/// Type of a header object (or a reference to one): its converted `schema`.
pub(crate) fn header_type(ctx: &mut GeneratorContext<'_>, point: &DocumentPoint, header: &Value) -> Result<TypeNode> {
  if reference_pointer(header).is_some() {
    let documents = ctx.documents();
    let reference = Reference::resolve(documents, point, header)?;
    ctx.register_reference(&reference)?;
    if reference.is_component() {
      return Ok(TypeNode::reference(ctx.reference_name(point, &reference.path)));
    }
    return header_type(ctx, &reference.point, reference.data);
  }

  match header.get("schema") {
    Some(schema) => {
      let documents = ctx.documents();
      convert(
        documents,
        &point.join("schema"),
        schema,
        ctx,
        ConvertOptions::with_parent(header),
      )
    }
    None => Ok(Keyword::Undefined.into()),
  }
}

/// One member per header of a response, optional unless `required`.
pub(super) fn header_members(
  ctx: &mut GeneratorContext<'_>,
  base: &DocumentPoint,
  headers: &Map<String, Value>,
) -> Result<Vec<TypeMember>> {
  let documents = ctx.documents();
  headers
    .iter()
    .map(|(name, header)| {
      let point = base.join(name.as_str());
      let definition = match reference_pointer(header) {
        Some(_) => Reference::resolve(documents, &point, header)?.data,
        None => header,
      };
      let ty = header_type(ctx, &point, header)?;
      Ok(TypeMember::Property(
        PropertySignature::builder()
          .name(name.as_str())
          .ty(ty)
          .optional(!definition.get("required").and_then(Value::as_bool).unwrap_or(false))
          .maybe_comment(comment_for(definition))
          .build(),
      ))
    })
    .collect()
}
