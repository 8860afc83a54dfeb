use serde_json::Value;

use super::{EntryTarget, comment_for, entry_target};
use crate::generator::{
  ast::{InterfaceDecl, TypeAliasDecl, TypeNode},
  context::GeneratorContext,
  converter::{ConvertOptions, convert, convert_members},
  document::DocumentPoint,
  errors::Result,
  registry::ComponentName,
  schema::SchemaNode,
  store::ComponentStatement,
};

/// Objects with their own members become interfaces, everything else an alias.
fn is_interface(schema: &Value) -> bool {
  matches!(
    SchemaNode::classify(schema),
    Ok(SchemaNode::Object(object)) if object.has_declared_members() && !object.nullable
  )
}

pub(super) fn generate(ctx: &mut GeneratorContext<'_>, name: &str, point: &DocumentPoint, data: &Value) -> Result<()> {
  let path = ComponentName::Schemas.entry_path(name);
  let ident = ctx.entry_identifier(ComponentName::Schemas, name);

  let statement = match entry_target(ctx, ComponentName::Schemas, name, point, data)? {
    Some(EntryTarget::Inline(reference)) => return generate(ctx, name, &reference.point, reference.data),
    Some(EntryTarget::Named { name: target, .. }) => ComponentStatement::TypeAlias(
      TypeAliasDecl::builder()
        .name(ident)
        .maybe_comment(comment_for(data))
        .ty(TypeNode::reference(target))
        .build(),
    ),
    None if is_interface(data) => {
      let documents = ctx.documents();
      let members = convert_members(documents, point, data, ctx)?;
      ComponentStatement::Interface(
        InterfaceDecl::builder()
          .name(ident)
          .maybe_comment(comment_for(data))
          .members(members)
          .build(),
      )
    }
    None => {
      let documents = ctx.documents();
      let ty = convert(documents, point, data, ctx, ConvertOptions::default())?;
      ComponentStatement::TypeAlias(
        TypeAliasDecl::builder()
          .name(ident)
          .maybe_comment(comment_for(data))
          .ty(ty)
          .build(),
      )
    }
  };

  ctx.store_mut().add_statement(&path, statement)
}
