use indexmap::IndexMap;

use crate::generator::{
  ast::{IndexSignatureDecl, InterfaceDecl, NamespaceDecl, Statement, StatementKind, TypeAliasDecl},
  naming::identifiers::type_identifier,
};

/// Header of a namespace node.
#[derive(Debug, Clone, PartialEq, Eq, Default, bon::Builder)]
pub struct NamespaceParams {
  #[builder(into)]
  pub name: String,
  pub comment: Option<String>,
  #[builder(default)]
  pub deprecated: bool,
}

impl NamespaceParams {
  #[must_use]
  pub fn named(name: impl Into<String>) -> Self {
    Self::builder().name(name).build()
  }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TreeNode {
  Namespace(NamespaceNode),
  TypeAlias(TypeAliasDecl),
  Interface(InterfaceDecl),
  IndexSignature(IndexSignatureDecl),
}

impl TreeNode {
  #[must_use]
  pub fn kind(&self) -> StatementKind {
    match self {
      Self::Namespace(_) => StatementKind::Namespace,
      Self::TypeAlias(_) => StatementKind::TypeAlias,
      Self::Interface(_) => StatementKind::Interface,
      Self::IndexSignature(_) => StatementKind::IndexSignature,
    }
  }

  fn to_statement(&self) -> Statement {
    match self {
      Self::Namespace(namespace) => Statement::Namespace(namespace.to_declaration()),
      Self::TypeAlias(decl) => Statement::TypeAlias(decl.clone()),
      Self::Interface(decl) => Statement::Interface(decl.clone()),
      Self::IndexSignature(decl) => Statement::IndexSignature(decl.clone()),
    }
  }
}

/// Children are keyed by kind and source segment, so a namespace and a type
/// sharing one name live side by side.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChildKey {
  pub kind: StatementKind,
  pub name: String,
}

impl ChildKey {
  fn new(kind: StatementKind, name: &str) -> Self {
    Self {
      kind,
      name: name.to_string(),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct NamespaceNode {
  pub params: NamespaceParams,
  children: IndexMap<ChildKey, TreeNode>,
}

impl NamespaceNode {
  #[must_use]
  pub fn new(params: NamespaceParams) -> Self {
    Self {
      params,
      children: IndexMap::new(),
    }
  }

  #[must_use]
  pub fn children(&self) -> impl Iterator<Item = &TreeNode> {
    self.children.values()
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.children.is_empty()
  }

  /// Node of `kind` at `segments`, walking intermediate namespaces.
  #[must_use]
  pub fn get(&self, segments: &[String], kind: StatementKind) -> Option<&TreeNode> {
    let (last, parents) = segments.split_last()?;
    let mut namespace = self;
    for segment in parents {
      namespace = match namespace.children.get(&ChildKey::new(StatementKind::Namespace, segment)) {
        Some(TreeNode::Namespace(child)) => child,
        _ => return None,
      };
    }
    namespace.children.get(&ChildKey::new(kind, last))
  }

  /// Places `node` at `segments`, creating missing namespaces along the way.
  ///
  /// Declarations replace an existing node of the same kind in place. A
  /// namespace keeps its children and only takes the new header.
  pub fn set(&mut self, segments: &[String], node: TreeNode) {
    let Some((last, parents)) = segments.split_last() else {
      return;
    };

    let mut namespace = self;
    for segment in parents {
      namespace = namespace.namespace_entry(segment);
    }

    match node {
      TreeNode::Namespace(incoming) => {
        let existing = namespace.namespace_entry(last);
        existing.params = incoming.params;
        existing.children.extend(incoming.children);
      }
      node => {
        namespace.children.insert(ChildKey::new(node.kind(), last), node);
      }
    }
  }

  fn namespace_entry(&mut self, segment: &str) -> &mut NamespaceNode {
    let entry = self
      .children
      .entry(ChildKey::new(StatementKind::Namespace, segment))
      .or_insert_with(|| TreeNode::Namespace(NamespaceNode::new(NamespaceParams::named(type_identifier(segment)))));

    match entry {
      TreeNode::Namespace(namespace) => namespace,
      _ => unreachable!("namespace keys only hold namespace nodes"),
    }
  }

  /// Children as declarations, depth-first in insertion order.
  #[must_use]
  pub fn to_statements(&self) -> Vec<Statement> {
    self.children.values().map(TreeNode::to_statement).collect()
  }

  #[must_use]
  pub fn to_declaration(&self) -> NamespaceDecl {
    NamespaceDecl::builder()
      .name(self.params.name.clone())
      .maybe_comment(self.params.comment.clone())
      .deprecated(self.params.deprecated)
      .statements(self.to_statements())
      .build()
  }
}
