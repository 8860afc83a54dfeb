//! Classification of `$ref` pointers.
//!
//! A pointer either names an entry of a known component category (and becomes a
//! named declaration) or lands anywhere else (and is converted in place).

use serde_json::Value;
use strum::Display;

use super::{
  document::{DocumentPoint, DocumentSet, JsonPointer, join_document_path},
  errors::{GenerateError, Result},
  registry::ComponentName,
  schema::reference_pointer,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum ReferenceKind {
  /// `#/components/<category>/<name>` in the entry document.
  Local,
  /// A component entry that lives in another document.
  ExternalComponent,
  /// Anything else; the target is inlined.
  ExternalInline,
}

#[derive(Debug, Clone)]
pub struct Reference<'d> {
  pub kind: ReferenceKind,
  /// Deduplication key. `components/<category>/<name>` for component entries,
  /// `<document>#<pointer>` for inlined targets.
  pub path: String,
  pub name: String,
  pub point: DocumentPoint,
  pub data: &'d Value,
  pub component: Option<ComponentName>,
}

impl PartialEq for Reference<'_> {
  fn eq(&self, other: &Self) -> bool {
    self.path == other.path
  }
}

impl Eq for Reference<'_> {}

impl<'d> Reference<'d> {
  /// Resolves `raw`, either a pointer string or a `{ "$ref": ... }` object,
  /// relative to the document of `current`.
  pub fn resolve(documents: &'d DocumentSet, current: &DocumentPoint, raw: &Value) -> Result<Self> {
    let pointer = match raw {
      Value::String(pointer) => pointer.as_str(),
      other => reference_pointer(other).ok_or_else(|| GenerateError::InvalidPointer {
        pointer: other.to_string(),
      })?,
    };
    Self::resolve_pointer(documents, current, pointer)
  }

  pub fn resolve_pointer(documents: &'d DocumentSet, current: &DocumentPoint, raw: &str) -> Result<Self> {
    let (document_part, fragment) = raw.split_once('#').unwrap_or((raw, ""));
    let document = if document_part.is_empty() {
      current.document.clone()
    } else {
      join_document_path(&current.document, document_part)
    };

    let point = DocumentPoint::new(document, JsonPointer::from_fragment(fragment)?);
    let data = documents.resolve(&point).ok_or_else(|| GenerateError::not_found(raw))?;

    let entry = component_entry(&point.pointer).map(|(component, name)| (component, name.to_string()));
    let reference = match entry {
      Some((component, name)) => Self {
        kind: if point.document == documents.entry() {
          ReferenceKind::Local
        } else {
          ReferenceKind::ExternalComponent
        },
        path: component.entry_path(&name),
        name,
        component: Some(component),
        point,
        data,
      },
      None => Self {
        kind: ReferenceKind::ExternalInline,
        path: point.to_string(),
        name: inline_name(&point),
        component: None,
        point,
        data,
      },
    };

    Ok(reference)
  }

  /// True when the target becomes a named declaration.
  #[must_use]
  pub fn is_component(&self) -> bool {
    self.component.is_some()
  }
}

/// `(category, name)` when `pointer` is exactly `/components/<category>/<name>`.
fn component_entry(pointer: &JsonPointer) -> Option<(ComponentName, &str)> {
  match pointer.segments() {
    [root, category, name] if root == "components" => {
      let component = category.parse::<ComponentName>().ok()?;
      Some((component, name.as_str()))
    }
    _ => None,
  }
}

fn inline_name(point: &DocumentPoint) -> String {
  point.pointer.segments().last().cloned().unwrap_or_else(|| {
    let file = point.document.rsplit('/').next().unwrap_or(&point.document);
    file.split('.').next().unwrap_or(file).to_string()
  })
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  fn documents() -> DocumentSet {
    DocumentSet::new(
      "specs/api.json",
      json!({
        "components": {
          "schemas": {
            "Pet": { "type": "object", "properties": { "name": { "type": "string" } } }
          },
          "parameters": { "Limit": { "name": "limit", "in": "query", "schema": { "type": "integer" } } }
        }
      }),
    )
    .with_document(
      "specs/common/types.json",
      json!({
        "components": { "schemas": { "Error": { "type": "string" } } },
        "definitions": { "Id": { "type": "integer" } }
      }),
    )
  }

  fn entry_point(documents: &DocumentSet) -> DocumentPoint {
    documents.entry_point(JsonPointer::from_segments(["components", "schemas", "Owner"]))
  }

  #[test]
  fn test_local_component_reference() -> anyhow::Result<()> {
    let documents = documents();
    let reference = Reference::resolve(
      &documents,
      &entry_point(&documents),
      &json!({ "$ref": "#/components/schemas/Pet" }),
    )?;

    assert_eq!(reference.kind, ReferenceKind::Local);
    assert_eq!(reference.path, "components/schemas/Pet");
    assert_eq!(reference.name, "Pet");
    assert_eq!(reference.component, Some(ComponentName::Schemas));
    assert_eq!(reference.data["type"], "object");
    Ok(())
  }

  #[test]
  fn test_external_component_reference() -> anyhow::Result<()> {
    let documents = documents();
    let reference = Reference::resolve_pointer(
      &documents,
      &entry_point(&documents),
      "./common/types.json#/components/schemas/Error",
    )?;

    assert_eq!(reference.kind, ReferenceKind::ExternalComponent);
    assert_eq!(reference.path, "components/schemas/Error");
    assert_eq!(reference.point.document, "specs/common/types.json");
    assert_eq!(reference.component, Some(ComponentName::Schemas));
    Ok(())
  }

  #[test]
  fn test_component_pointer_inside_external_document() -> anyhow::Result<()> {
    let documents = documents();
    let current = DocumentPoint::new(
      "specs/common/types.json",
      JsonPointer::from_segments(["definitions", "Id"]),
    );
    let reference = Reference::resolve_pointer(&documents, &current, "#/components/schemas/Error")?;

    assert_eq!(reference.kind, ReferenceKind::ExternalComponent);
    assert_eq!(reference.path, "components/schemas/Error");
    Ok(())
  }

  #[test]
  fn test_external_pointer_outside_components_is_inlined() -> anyhow::Result<()> {
    let documents = documents();
    let reference = Reference::resolve_pointer(
      &documents,
      &entry_point(&documents),
      "common/types.json#/definitions/Id",
    )?;

    assert_eq!(reference.kind, ReferenceKind::ExternalInline);
    assert_eq!(reference.path, "specs/common/types.json#/definitions/Id");
    assert_eq!(reference.name, "Id");
    assert!(!reference.is_component());
    assert_eq!(reference.data, &json!({ "type": "integer" }));
    Ok(())
  }

  #[test]
  fn test_deep_local_pointer_is_inlined() -> anyhow::Result<()> {
    let documents = documents();
    let reference = Reference::resolve_pointer(
      &documents,
      &entry_point(&documents),
      "#/components/schemas/Pet/properties/name",
    )?;

    assert_eq!(reference.kind, ReferenceKind::ExternalInline);
    assert_eq!(reference.data, &json!({ "type": "string" }));
    Ok(())
  }

  #[test]
  fn test_missing_target_is_not_found() {
    let documents = documents();
    let error = Reference::resolve_pointer(&documents, &entry_point(&documents), "#/components/schemas/Nope")
      .unwrap_err();
    assert!(matches!(error, GenerateError::NotFound { path } if path == "#/components/schemas/Nope"));

    let error = Reference::resolve_pointer(&documents, &entry_point(&documents), "missing.json#/a").unwrap_err();
    assert!(matches!(error, GenerateError::NotFound { .. }));
  }

  #[test]
  fn test_same_path_means_same_reference() -> anyhow::Result<()> {
    let documents = documents();
    let current = entry_point(&documents);
    let first = Reference::resolve_pointer(&documents, &current, "#/components/schemas/Pet")?;
    let second = Reference::resolve(&documents, &current, &json!("#/components/schemas/Pet"))?;
    assert_eq!(first, second);
    Ok(())
  }
}
