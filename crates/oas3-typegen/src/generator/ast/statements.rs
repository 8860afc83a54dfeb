use strum::Display;

use super::types::{IndexSignatureDecl, TypeMember, TypeNode};

/// A declaration handed to the renderer.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
  Namespace(NamespaceDecl),
  TypeAlias(TypeAliasDecl),
  Interface(InterfaceDecl),
  IndexSignature(IndexSignatureDecl),
}

impl Statement {
  #[must_use]
  pub fn kind(&self) -> StatementKind {
    match self {
      Self::Namespace(_) => StatementKind::Namespace,
      Self::TypeAlias(_) => StatementKind::TypeAlias,
      Self::Interface(_) => StatementKind::Interface,
      Self::IndexSignature(_) => StatementKind::IndexSignature,
    }
  }

  #[must_use]
  pub fn name(&self) -> &str {
    match self {
      Self::Namespace(decl) => &decl.name,
      Self::TypeAlias(decl) => &decl.name,
      Self::Interface(decl) => &decl.name,
      Self::IndexSignature(decl) => &decl.name,
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "camelCase")]
pub enum StatementKind {
  Namespace,
  TypeAlias,
  Interface,
  IndexSignature,
}

#[derive(Debug, Clone, PartialEq, bon::Builder)]
pub struct NamespaceDecl {
  #[builder(into)]
  pub name: String,
  #[builder(default = true)]
  pub export: bool,
  pub comment: Option<String>,
  #[builder(default)]
  pub deprecated: bool,
  #[builder(default)]
  pub statements: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq, bon::Builder)]
pub struct TypeAliasDecl {
  #[builder(into)]
  pub name: String,
  #[builder(default = true)]
  pub export: bool,
  pub comment: Option<String>,
  pub ty: TypeNode,
}

#[derive(Debug, Clone, PartialEq, bon::Builder)]
pub struct InterfaceDecl {
  #[builder(into)]
  pub name: String,
  #[builder(default = true)]
  pub export: bool,
  pub comment: Option<String>,
  #[builder(default)]
  pub members: Vec<TypeMember>,
}
