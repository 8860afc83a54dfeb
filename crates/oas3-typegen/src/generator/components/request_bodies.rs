use serde_json::Value;

use super::{EntryTarget, content_members, entry_target, final_definition, member_of, responses::CONTENT};
use crate::generator::{
  ast::{InterfaceDecl, TypeAliasDecl},
  context::GeneratorContext,
  document::DocumentPoint,
  errors::Result,
  registry::ComponentName,
  schema::{description, is_deprecated},
  store::{ComponentStatement, NamespaceParams},
};

/// A request body becomes `namespace <Name> { interface Content }`.
pub(super) fn generate(ctx: &mut GeneratorContext<'_>, name: &str, point: &DocumentPoint, data: &Value) -> Result<()> {
  let path = ComponentName::RequestBodies.entry_path(name);

  let content = match entry_target(ctx, ComponentName::RequestBodies, name, point, data)? {
    Some(EntryTarget::Inline(reference)) => return generate(ctx, name, &reference.point, reference.data),
    Some(EntryTarget::Named { name: target, reference }) => final_definition(ctx.documents(), &reference)?
      .get("content")
      .map(|_| {
        ComponentStatement::TypeAlias(
          TypeAliasDecl::builder()
            .name(CONTENT)
            .ty(member_of(&target, CONTENT))
            .build(),
        )
      }),
    None => match data.get("content").and_then(Value::as_object) {
      Some(content) => {
        let members = content_members(ctx, &point.join("content"), content)?;
        Some(ComponentStatement::Interface(
          InterfaceDecl::builder().name(CONTENT).members(members).build(),
        ))
      }
      None => None,
    },
  };

  let identifier = ctx.entry_identifier(ComponentName::RequestBodies, name);
  ctx.store_mut().add_statement(
    &path,
    ComponentStatement::Namespace(
      NamespaceParams::builder()
        .name(identifier)
        .maybe_comment(description(data).map(str::to_string))
        .deprecated(is_deprecated(data))
        .build(),
    ),
  )?;
  if let Some(content) = content {
    ctx.store_mut().add_statement(&format!("{path}/{CONTENT}"), content)?;
  }
  Ok(())
}
