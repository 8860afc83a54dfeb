//! Per-category generators for `components`.
//!
//! Each generator turns one entry into declarations under
//! `components/<category>/<name>`. Entries are only ever reached through
//! [`GeneratorContext::ensure_component`], which guards against duplicates and
//! cycles for every category alike.

mod headers;
mod parameters;
mod request_bodies;
mod responses;
mod schemas;

#[cfg(test)]
mod tests;

use serde_json::{Map, Value};

pub(crate) use self::responses::CONTENT;

use super::{
  ast::{Keyword, PropertySignature, TypeMember, TypeNode},
  context::{ConversionContext, GeneratorContext},
  converter::{ConvertOptions, convert},
  document::{DocumentPoint, DocumentSet, JsonPointer},
  errors::{GenerateError, Result},
  reference::Reference,
  registry::ComponentName,
  schema::{description, is_deprecated, reference_pointer},
  store::component_namespace,
};

/// Generates every entry of `component` found in the entry document.
pub fn generate_namespace(ctx: &mut GeneratorContext<'_>, component: ComponentName) -> Result<()> {
  if !component.has_declarations() {
    return Ok(());
  }

  let documents = ctx.documents();
  let base = documents.entry_point(JsonPointer::from_segments(["components", component.as_ref()]));
  let Some(entries) = documents.resolve(&base) else {
    return Ok(());
  };

  if !ctx.store().has_component(component) {
    ctx.store_mut().add_component(component, component_namespace(component));
  }

  match entries {
    Value::Object(entries) => {
      // Suffixes follow document order, not reference order.
      for name in entries.keys() {
        ctx.assign_identifier(&component.entry_path(name));
      }
      for name in entries.keys() {
        ctx.ensure_component(component, name, &base.join(name.as_str()))?;
      }
      Ok(())
    }
    Value::Array(entries) if component == ComponentName::Parameters => parameters::generate_list(ctx, &base, entries),
    _ => Err(GenerateError::unsupported(format!(
      "components.{component} must be a map of named entries"
    ))),
  }
}

/// Generates one entry; called by the context once the guard has passed.
pub(crate) fn generate_entry(
  ctx: &mut GeneratorContext<'_>,
  component: ComponentName,
  name: &str,
  point: &DocumentPoint,
  data: &Value,
) -> Result<()> {
  match component {
    ComponentName::Schemas => schemas::generate(ctx, name, point, data),
    ComponentName::Parameters => parameters::generate(ctx, name, point, data),
    ComponentName::Headers => headers::generate(ctx, name, point, data),
    ComponentName::Responses => responses::generate(ctx, name, point, data),
    ComponentName::RequestBodies => request_bodies::generate(ctx, name, point, data),
    ComponentName::PathItems => Ok(()),
  }
}

/// How an entry that is itself a `$ref` should be generated.
enum EntryTarget<'d> {
  /// Another named entry; the entry becomes an alias of `name`.
  Named { name: String, reference: Reference<'d> },
  /// Generate the entry from the target's definition.
  Inline(Reference<'d>),
}

fn entry_target<'d>(
  ctx: &mut GeneratorContext<'d>,
  component: ComponentName,
  name: &str,
  point: &DocumentPoint,
  data: &Value,
) -> Result<Option<EntryTarget<'d>>> {
  if reference_pointer(data).is_none() {
    return Ok(None);
  }

  let documents = ctx.documents();
  let own_path = component.entry_path(name);
  let mut visited = vec![point.clone()];
  let mut reference = Reference::resolve(documents, point, data)?;

  loop {
    if reference.is_component() && reference.path != own_path {
      ctx.register_reference(&reference)?;
      let name = ctx.reference_name(point, &reference.path);
      return Ok(Some(EntryTarget::Named { name, reference }));
    }

    if visited.contains(&reference.point) {
      return Err(GenerateError::unsupported(format!(
        "'{own_path}' only refers back to itself through {}",
        reference.point
      )));
    }

    // Same-named entries of another document fold into this one.
    if reference.path != own_path {
      ctx.register_reference(&reference)?;
    }
    if reference_pointer(reference.data).is_none() {
      return Ok(Some(EntryTarget::Inline(reference)));
    }

    visited.push(reference.point.clone());
    reference = Reference::resolve(documents, &reference.point, reference.data)?;
  }
}

/// The definition a reference chain ends at, following `$ref` hops from `reference`.
pub(crate) fn final_definition<'d>(documents: &'d DocumentSet, reference: &Reference<'d>) -> Result<&'d Value> {
  let mut current = reference.point.clone();
  let mut data = reference.data;
  let mut visited = vec![];

  while reference_pointer(data).is_some() {
    visited.push(current.clone());
    let next = Reference::resolve(documents, &current, data)?;
    if visited.contains(&next.point) {
      return Err(GenerateError::unsupported(format!(
        "reference chain starting at {} never reaches a definition",
        reference.point
      )));
    }
    current = next.point;
    data = next.data;
  }
  Ok(data)
}

/// Doc comment for a declaration: the description plus a `@deprecated` tag.
pub(crate) fn comment_for(value: &Value) -> Option<String> {
  let deprecated = is_deprecated(value).then_some("@deprecated");
  let parts: Vec<&str> = description(value).into_iter().chain(deprecated).collect();
  (!parts.is_empty()).then(|| parts.join("\n"))
}

/// One member per media type of a `content` map, typed by its `schema`.
pub(crate) fn content_members(
  ctx: &mut GeneratorContext<'_>,
  base: &DocumentPoint,
  content: &Map<String, Value>,
) -> Result<Vec<TypeMember>> {
  let documents = ctx.documents();
  content
    .iter()
    .map(|(media_type, media)| {
      let point = base.join(media_type.as_str());
      let ty = match media.get("schema") {
        Some(schema) => convert(
          documents,
          &point.join("schema"),
          schema,
          ctx,
          ConvertOptions::with_parent(media),
        )?,
        None => Keyword::Undefined.into(),
      };
      Ok(TypeMember::Property(
        PropertySignature::builder().name(media_type.as_str()).ty(ty).build(),
      ))
    })
    .collect()
}

/// `<name>.<member>` alias target for entries that point at another namespace entry.
pub(crate) fn member_of(name: &str, member: &str) -> TypeNode {
  TypeNode::reference(format!("{name}.{member}"))
}
