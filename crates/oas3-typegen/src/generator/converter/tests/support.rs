use serde_json::Value;

use crate::generator::{
  ast::{TypeMember, TypeNode},
  context::{self, ConversionContext},
  converter::{ConvertOptions, convert},
  document::{DocumentPoint, DocumentSet, JsonPointer},
  errors::Result,
  reference::Reference,
};

/// Context that only remembers what it was asked to register.
#[derive(Debug, Default)]
pub(super) struct RecordingContext {
  pub(super) registered: Vec<String>,
}

impl ConversionContext for RecordingContext {
  fn register_reference(&mut self, reference: &Reference<'_>) -> Result<()> {
    self.registered.push(reference.path.clone());
    Ok(())
  }

  fn reference_name(&self, current: &DocumentPoint, path: &str) -> String {
    context::reference_name(current, path)
  }
}

pub(super) fn schema_point(name: &str) -> DocumentPoint {
  DocumentPoint::new("api.json", JsonPointer::from_segments(["components", "schemas", name]))
}

/// Converts `schema` as if it were `components/schemas/Subject` of `documents`.
pub(super) fn convert_in(documents: &DocumentSet, schema: &Value) -> Result<(TypeNode, RecordingContext)> {
  let mut ctx = RecordingContext::default();
  let ty = convert(
    documents,
    &schema_point("Subject"),
    schema,
    &mut ctx,
    ConvertOptions::default(),
  )?;
  Ok((ty, ctx))
}

pub(super) fn convert_schema(schema: &Value) -> Result<TypeNode> {
  let documents = DocumentSet::new("api.json", serde_json::json!({}));
  convert_in(&documents, schema).map(|(ty, _)| ty)
}

pub(super) fn property<'a>(members: &'a [TypeMember], name: &str) -> &'a crate::generator::ast::PropertySignature {
  members
    .iter()
    .find_map(|member| match member {
      TypeMember::Property(property) if property.name == name => Some(property),
      _ => None,
    })
    .unwrap_or_else(|| panic!("missing property {name}"))
}
