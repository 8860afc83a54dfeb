use serde_json::{Number, Value};
use strum::Display;

use crate::generator::schema::PrimitiveKind;

/// Language-neutral type representation produced by the converter.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeNode {
  Keyword(Keyword),
  /// Union of literal values taken from an `enum`.
  Literals(Vec<Literal>),
  Array(Box<TypeNode>),
  /// Object literal type. No members means an open, free-form object.
  Object(Vec<TypeMember>),
  Union(Vec<TypeNode>),
  Intersection(Vec<TypeNode>),
  /// Named type, possibly namespace-qualified (`Schemas.Pet`).
  Reference(String),
}

impl TypeNode {
  #[must_use]
  pub fn open_object() -> Self {
    Self::Object(vec![])
  }

  #[must_use]
  pub fn reference(name: impl Into<String>) -> Self {
    Self::Reference(name.into())
  }

  #[must_use]
  pub fn array_of(element: TypeNode) -> Self {
    Self::Array(Box::new(element))
  }

  /// Wraps the node as `self | null` when `nullable` is set.
  #[must_use]
  pub fn with_nullable(self, nullable: bool) -> Self {
    if nullable {
      Self::Union(vec![self, Self::Keyword(Keyword::Null)])
    } else {
      self
    }
  }

  #[must_use]
  pub fn is_open_object(&self) -> bool {
    matches!(self, Self::Object(members) if members.is_empty())
  }
}

impl From<Keyword> for TypeNode {
  fn from(keyword: Keyword) -> Self {
    Self::Keyword(keyword)
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Keyword {
  Boolean,
  Null,
  Integer,
  Number,
  String,
  Undefined,
  Never,
}

impl From<PrimitiveKind> for Keyword {
  fn from(kind: PrimitiveKind) -> Self {
    match kind {
      PrimitiveKind::Boolean => Self::Boolean,
      PrimitiveKind::Null => Self::Null,
      PrimitiveKind::Integer => Self::Integer,
      PrimitiveKind::Number => Self::Number,
      PrimitiveKind::String => Self::String,
    }
  }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
  String(String),
  Number(Number),
  Boolean(bool),
}

impl Literal {
  /// Collects `values` as literals of `kind`, or `None` when any value has a different type.
  #[must_use]
  pub fn collect(kind: PrimitiveKind, values: &[Value]) -> Option<Vec<Literal>> {
    values
      .iter()
      .map(|value| match (kind, value) {
        (PrimitiveKind::String, Value::String(text)) => Some(Self::String(text.clone())),
        (PrimitiveKind::Integer | PrimitiveKind::Number, Value::Number(number)) => Some(Self::Number(number.clone())),
        (PrimitiveKind::Boolean, Value::Bool(flag)) => Some(Self::Boolean(*flag)),
        _ => None,
      })
      .collect()
  }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TypeMember {
  Property(PropertySignature),
  Index(IndexSignatureDecl),
}

#[derive(Debug, Clone, PartialEq, bon::Builder)]
pub struct PropertySignature {
  #[builder(into)]
  pub name: String,
  pub ty: TypeNode,
  #[builder(default)]
  pub optional: bool,
  pub comment: Option<String>,
}

/// `[key: string]: T`
#[derive(Debug, Clone, PartialEq)]
pub struct IndexSignatureDecl {
  pub name: String,
  pub ty: TypeNode,
}

impl IndexSignatureDecl {
  #[must_use]
  pub fn new(name: impl Into<String>, ty: TypeNode) -> Self {
    Self { name: name.into(), ty }
  }
}
