use serde_json::Value;
use strum::IntoEnumIterator;

use crate::generator::{
  ast::{PropertySignature, Statement, TypeMember},
  components::generate_namespace,
  context::GeneratorContext,
  document::DocumentSet,
  errors::Result,
  registry::ComponentName,
};

pub(super) fn documents(root: Value) -> DocumentSet {
  DocumentSet::new("api.json", root)
}

/// Runs every category generator over `documents`.
pub(super) fn generate_components(documents: &DocumentSet) -> Result<GeneratorContext<'_>> {
  let mut ctx = GeneratorContext::new(documents);
  for component in ComponentName::iter() {
    generate_namespace(&mut ctx, component)?;
  }
  Ok(ctx)
}

/// Names of the declarations inside the category namespace of `component`.
pub(super) fn category_names(ctx: &GeneratorContext<'_>, component: ComponentName) -> Vec<String> {
  ctx
    .store()
    .root_statements()
    .into_iter()
    .find_map(|statement| match statement {
      Statement::Namespace(namespace) if namespace.name == component.namespace_name() => Some(namespace),
      _ => None,
    })
    .map(|namespace| namespace.statements.iter().map(|s| s.name().to_string()).collect())
    .unwrap_or_default()
}

pub(super) fn property<'a>(members: &'a [TypeMember], name: &str) -> &'a PropertySignature {
  members
    .iter()
    .find_map(|member| match member {
      TypeMember::Property(property) if property.name == name => Some(property),
      _ => None,
    })
    .unwrap_or_else(|| panic!("missing property {name}"))
}
