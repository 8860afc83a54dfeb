use serde_json::Value;

use super::{EntryTarget, content_members, entry_target, final_definition, headers::header_members, member_of};
use crate::generator::{
  ast::{InterfaceDecl, TypeAliasDecl},
  context::GeneratorContext,
  document::DocumentPoint,
  errors::Result,
  registry::ComponentName,
  schema::{description, is_deprecated},
  store::{ComponentStatement, NamespaceParams},
};

pub(crate) const HEADER: &str = "Header";
pub(crate) const CONTENT: &str = "Content";

/// A response becomes `namespace <Name> { interface Header; interface Content }`.
pub(super) fn generate(ctx: &mut GeneratorContext<'_>, name: &str, point: &DocumentPoint, data: &Value) -> Result<()> {
  let path = ComponentName::Responses.entry_path(name);

  let children = match entry_target(ctx, ComponentName::Responses, name, point, data)? {
    Some(EntryTarget::Inline(reference)) => return generate(ctx, name, &reference.point, reference.data),
    Some(EntryTarget::Named { name: target, reference }) => {
      let definition = final_definition(ctx.documents(), &reference)?;
      [(HEADER, "headers"), (CONTENT, "content")]
        .into_iter()
        .filter(|(_, key)| definition.get(*key).is_some())
        .map(|(member, _)| {
          let alias = TypeAliasDecl::builder().name(member).ty(member_of(&target, member)).build();
          (member, ComponentStatement::TypeAlias(alias))
        })
        .collect()
    }
    None => own_children(ctx, point, data)?,
  };

  let identifier = ctx.entry_identifier(ComponentName::Responses, name);
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
  for (member, statement) in children {
    ctx.store_mut().add_statement(&format!("{path}/{member}"), statement)?;
  }
  Ok(())
}

fn own_children(
  ctx: &mut GeneratorContext<'_>,
  point: &DocumentPoint,
  data: &Value,
) -> Result<Vec<(&'static str, ComponentStatement)>> {
  let mut children = vec![];

  if let Some(headers) = data.get("headers").and_then(Value::as_object) {
    let members = header_members(ctx, &point.join("headers"), headers)?;
    children.push((
      HEADER,
      ComponentStatement::Interface(InterfaceDecl::builder().name(HEADER).members(members).build()),
    ));
  }

  if let Some(content) = data.get("content").and_then(Value::as_object) {
    let members = content_members(ctx, &point.join("content"), content)?;
    children.push((
      CONTENT,
      ComponentStatement::Interface(InterfaceDecl::builder().name(CONTENT).members(members).build()),
    ));
  }

  Ok(children)
}
