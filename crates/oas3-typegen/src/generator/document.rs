//! In-memory documents and typed navigation inside them.
//!
//! Documents are keyed by a normalized, `/`-separated path. Locations inside a
//! document are [`JsonPointer`]s (RFC 6901), and a [`DocumentPoint`] pairs the
//! two so that every schema node can be traced back to where it was written.

use std::{collections::BTreeMap, fmt};

use itertools::Itertools;
use percent_encoding::percent_decode_str;
use serde_json::Value;

use super::errors::{GenerateError, Result};

/// A parsed JSON pointer, stored as unescaped segments.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct JsonPointer {
  segments: Vec<String>,
}

impl JsonPointer {
  #[must_use]
  pub fn root() -> Self {
    Self::default()
  }

  #[must_use]
  pub fn from_segments<I, S>(segments: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    Self {
      segments: segments.into_iter().map(Into::into).collect(),
    }
  }

  /// Parses an RFC 6901 pointer such as `/components/schemas/Pet`.
  ///
  /// The empty string is the document root. Anything else must start with `/`.
  pub fn parse(raw: &str) -> Result<Self> {
    if raw.is_empty() {
      return Ok(Self::root());
    }

    let Some(rest) = raw.strip_prefix('/') else {
      return Err(GenerateError::InvalidPointer {
        pointer: raw.to_string(),
      });
    };

    Ok(Self::from_segments(
      rest.split('/').map(|segment| segment.replace("~1", "/").replace("~0", "~")),
    ))
  }

  /// Parses the fragment part of a URI reference (`#/components/schemas/Pet`).
  ///
  /// The fragment is percent-decoded before pointer unescaping.
  pub fn from_fragment(fragment: &str) -> Result<Self> {
    let fragment = fragment.strip_prefix('#').unwrap_or(fragment);
    let decoded = percent_decode_str(fragment)
      .decode_utf8()
      .map_err(|_| GenerateError::InvalidPointer {
        pointer: fragment.to_string(),
      })?;
    Self::parse(&decoded)
  }

  #[must_use]
  pub fn segments(&self) -> &[String] {
    &self.segments
  }

  #[must_use]
  pub fn is_root(&self) -> bool {
    self.segments.is_empty()
  }

  #[must_use]
  pub fn join(&self, segment: impl Into<String>) -> Self {
    let mut segments = self.segments.clone();
    segments.push(segment.into());
    Self { segments }
  }

  #[must_use]
  pub fn starts_with<S: AsRef<str>>(&self, prefix: &[S]) -> bool {
    self.segments.len() >= prefix.len()
      && self
        .segments
        .iter()
        .zip(prefix)
        .all(|(segment, expected)| segment == expected.as_ref())
  }

  /// Walks `value` along this pointer.
  #[must_use]
  pub fn resolve<'v>(&self, value: &'v Value) -> Option<&'v Value> {
    self.segments.iter().try_fold(value, |current, segment| match current {
      Value::Object(map) => map.get(segment),
      Value::Array(items) => segment.parse::<usize>().ok().and_then(|index| items.get(index)),
      _ => None,
    })
  }
}

impl fmt::Display for JsonPointer {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for segment in &self.segments {
      write!(f, "/{}", segment.replace('~', "~0").replace('/', "~1"))?;
    }
    Ok(())
  }
}

/// A location inside one document of a [`DocumentSet`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DocumentPoint {
  pub document: String,
  pub pointer: JsonPointer,
}

impl DocumentPoint {
  #[must_use]
  pub fn new(document: impl Into<String>, pointer: JsonPointer) -> Self {
    Self {
      document: document.into(),
      pointer,
    }
  }

  #[must_use]
  pub fn join(&self, segment: impl Into<String>) -> Self {
    Self {
      document: self.document.clone(),
      pointer: self.pointer.join(segment),
    }
  }
}

impl fmt::Display for DocumentPoint {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}#{}", self.document, self.pointer)
  }
}

/// The entry document together with every external document it reaches.
///
/// Loading is the caller's job; the set only answers lookups.
#[derive(Debug, Clone)]
pub struct DocumentSet {
  entry: String,
  documents: BTreeMap<String, Value>,
}

impl DocumentSet {
  #[must_use]
  pub fn new(entry: impl Into<String>, root: Value) -> Self {
    let entry = normalize_document_path(&entry.into());
    let documents = BTreeMap::from([(entry.clone(), root)]);
    Self { entry, documents }
  }

  #[must_use]
  pub fn with_document(mut self, path: impl Into<String>, document: Value) -> Self {
    self.insert(path, document);
    self
  }

  pub fn insert(&mut self, path: impl Into<String>, document: Value) {
    self.documents.insert(normalize_document_path(&path.into()), document);
  }

  #[must_use]
  pub fn entry(&self) -> &str {
    &self.entry
  }

  /// The entry document.
  #[must_use]
  pub fn root(&self) -> &Value {
    &self.documents[&self.entry]
  }

  #[must_use]
  pub fn entry_point(&self, pointer: JsonPointer) -> DocumentPoint {
    DocumentPoint::new(self.entry.clone(), pointer)
  }

  #[must_use]
  pub fn contains(&self, path: &str) -> bool {
    self.documents.contains_key(path)
  }

  #[must_use]
  pub fn get(&self, path: &str) -> Option<&Value> {
    self.documents.get(path)
  }

  #[must_use]
  pub fn resolve(&self, point: &DocumentPoint) -> Option<&Value> {
    self.get(&point.document).and_then(|document| point.pointer.resolve(document))
  }

  pub fn len(&self) -> usize {
    self.documents.len()
  }

  pub fn is_empty(&self) -> bool {
    self.documents.is_empty()
  }
}

/// Resolves `target` against the directory of `base`, POSIX style.
#[must_use]
pub fn join_document_path(base: &str, target: &str) -> String {
  if target.starts_with('/') {
    return normalize_document_path(target);
  }

  match base.rsplit_once('/') {
    Some((directory, _)) => normalize_document_path(&format!("{directory}/{target}")),
    None => normalize_document_path(target),
  }
}

/// Collapses `.`, `..` and repeated separators; `\` is treated as `/`.
#[must_use]
pub fn normalize_document_path(path: &str) -> String {
  let path = path.replace('\\', "/");
  let absolute = path.starts_with('/');
  let mut segments: Vec<&str> = vec![];

  for segment in path.split('/') {
    match segment {
      "" | "." => {}
      ".." => match segments.last() {
        Some(&last) if last != ".." => {
          segments.pop();
        }
        _ if absolute => {}
        _ => segments.push(".."),
      },
      other => segments.push(other),
    }
  }

  let joined = segments.iter().join("/");
  if absolute { format!("/{joined}") } else { joined }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[test]
  fn test_pointer_parse_unescapes_segments() -> anyhow::Result<()> {
    let pointer = JsonPointer::parse("/paths/~1pets~1{id}/get")?;
    assert_eq!(pointer.segments(), ["paths", "/pets/{id}", "get"]);
    assert_eq!(pointer.to_string(), "/paths/~1pets~1{id}/get");
    Ok(())
  }

  #[test]
  fn test_pointer_rejects_relative_form() {
    let error = JsonPointer::parse("components/schemas").unwrap_err();
    assert!(matches!(error, GenerateError::InvalidPointer { .. }));
  }

  #[test]
  fn test_fragment_is_percent_decoded() -> anyhow::Result<()> {
    let pointer = JsonPointer::from_fragment("#/components/schemas/Pet%20Owner")?;
    assert_eq!(pointer.segments(), ["components", "schemas", "Pet Owner"]);
    Ok(())
  }

  #[test]
  fn test_pointer_resolves_through_arrays() {
    let document = json!({ "allOf": [{ "type": "string" }] });
    let pointer = JsonPointer::from_segments(["allOf", "0", "type"]);
    assert_eq!(pointer.resolve(&document), Some(&json!("string")));
    assert_eq!(JsonPointer::from_segments(["allOf", "x"]).resolve(&document), None);
  }

  #[test]
  fn test_join_document_path() {
    let cases = [
      ("api.yaml", "common.yaml", "common.yaml"),
      ("specs/api.yaml", "./shared/pet.yaml", "specs/shared/pet.yaml"),
      ("specs/v1/api.yaml", "../common.yaml", "specs/common.yaml"),
      ("api.yaml", "../common.yaml", "../common.yaml"),
      ("/srv/specs/api.yaml", "/etc/other.json", "/etc/other.json"),
    ];

    for (base, target, expected) in cases {
      assert_eq!(join_document_path(base, target), expected, "{base} + {target}");
    }
  }

  #[test]
  fn test_document_set_resolves_points() {
    let documents = DocumentSet::new("./api.json", json!({ "a": 1 })).with_document("b.json", json!({ "b": [true] }));
    assert_eq!(documents.entry(), "api.json");
    assert_eq!(documents.len(), 2);

    let point = DocumentPoint::new("b.json", JsonPointer::from_segments(["b", "0"]));
    assert_eq!(documents.resolve(&point), Some(&json!(true)));
    assert_eq!(point.to_string(), "b.json#/b/0");
  }
}
