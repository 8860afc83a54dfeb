//! The namespace store: a path-keyed tree of generated declarations.
//!
//! Every category of [`ComponentName`] owns one top-level namespace. Entries are
//! addressed with `components/<category>/<name>[/<child>...]` paths, parsed into
//! a [`StorePath`] before anything is touched.

mod operation_state;
mod path;
mod tree;

#[cfg(test)]
mod tests;

use http::Method;
use indexmap::IndexMap;
pub use operation_state::{OperationState, OperationStatePatch};
pub use path::StorePath;
use serde_json::Value;
use strum::IntoEnumIterator;
pub use tree::{NamespaceNode, NamespaceParams, TreeNode};

use crate::generator::{
  ast::{IndexSignatureDecl, InterfaceDecl, Statement, StatementKind, TypeAliasDecl},
  document::JsonPointer,
  errors::{GenerateError, Result},
  registry::ComponentName,
};

/// Input accepted by [`Store::add_statement`].
#[derive(Debug, Clone, PartialEq)]
pub enum ComponentStatement {
  Namespace(NamespaceParams),
  TypeAlias(TypeAliasDecl),
  Interface(InterfaceDecl),
  IndexSignature(IndexSignatureDecl),
}

impl From<ComponentStatement> for TreeNode {
  fn from(statement: ComponentStatement) -> Self {
    match statement {
      ComponentStatement::Namespace(params) => Self::Namespace(NamespaceNode::new(params)),
      ComponentStatement::TypeAlias(decl) => Self::TypeAlias(decl),
      ComponentStatement::Interface(decl) => Self::Interface(decl),
      ComponentStatement::IndexSignature(decl) => Self::IndexSignature(decl),
    }
  }
}

/// Header of the top-level namespace owned by `component`.
#[must_use]
pub fn component_namespace(component: ComponentName) -> NamespaceParams {
  NamespaceParams::builder()
    .name(component.namespace_name())
    .comment(component.documentation_url())
    .build()
}

/// Typed access for [`Store::get_statement`].
pub trait StatementLookup {
  const KIND: StatementKind;

  fn from_node(node: &TreeNode) -> Option<&Self>;
}

macro_rules! statement_lookup {
  ($ty:ty, $variant:ident) => {
    impl StatementLookup for $ty {
      const KIND: StatementKind = StatementKind::$variant;

      fn from_node(node: &TreeNode) -> Option<&Self> {
        match node {
          TreeNode::$variant(inner) => Some(inner),
          _ => None,
        }
      }
    }
  };
}

statement_lookup!(NamespaceNode, Namespace);
statement_lookup!(TypeAliasDecl, TypeAlias);
statement_lookup!(InterfaceDecl, Interface);
statement_lookup!(IndexSignatureDecl, IndexSignature);

#[derive(Debug)]
pub struct Store<'d> {
  document: &'d Value,
  components: IndexMap<ComponentName, NamespaceNode>,
  operations: IndexMap<String, OperationState>,
  additional: Vec<Statement>,
}

impl<'d> Store<'d> {
  /// Creates an empty store over the entry document.
  #[must_use]
  pub fn new(document: &'d Value) -> Self {
    Self {
      document,
      components: IndexMap::new(),
      operations: IndexMap::new(),
      additional: vec![],
    }
  }

  /// Creates or resets the top-level namespace of `component`.
  pub fn add_component(&mut self, component: ComponentName, params: NamespaceParams) {
    self.components.insert(component, NamespaceNode::new(params));
  }

  #[must_use]
  pub fn has_component(&self, component: ComponentName) -> bool {
    self.components.contains_key(&component)
  }

  pub fn add_statement(&mut self, path: &str, statement: ComponentStatement) -> Result<()> {
    let path = StorePath::parse(path)?;
    if path.is_category() {
      return Err(GenerateError::unsupported_path(path.to_string()));
    }

    self
      .components
      .entry(path.component())
      .or_insert_with(|| NamespaceNode::new(component_namespace(path.component())))
      .set(path.segments(), statement.into());
    Ok(())
  }

  /// True when a node of any of `kinds` exists at `path`.
  pub fn has_statement(&self, path: &str, kinds: &[StatementKind]) -> Result<bool> {
    let path = StorePath::parse(path)?;
    Ok(kinds.iter().any(|&kind| self.node(&path, kind).is_some()))
  }

  pub fn get_statement<T: StatementLookup>(&self, path: &str) -> Result<Option<&T>> {
    let path = StorePath::parse(path)?;
    Ok(self.node(&path, T::KIND).and_then(T::from_node))
  }

  fn node(&self, path: &StorePath, kind: StatementKind) -> Option<&TreeNode> {
    self
      .components
      .get(&path.component())
      .and_then(|namespace| namespace.get(path.segments(), kind))
  }

  /// Path item definition at `components/pathItems/<name>` in the entry document.
  pub fn get_path_item(&self, path: &str) -> Result<&'d Value> {
    self.lookup(path, ComponentName::PathItems)
  }

  /// Parameter definition at `components/parameters/<name>` in the entry document.
  pub fn get_parameter(&self, path: &str) -> Result<&'d Value> {
    self.lookup(path, ComponentName::Parameters)
  }

  fn lookup(&self, raw: &str, component: ComponentName) -> Result<&'d Value> {
    let path = StorePath::parse(raw)?;
    if path.component() != component || path.is_category() {
      return Err(GenerateError::unsupported_path(raw));
    }

    let pointer = JsonPointer::from_segments(
      ["components".to_string(), component.to_string()]
        .into_iter()
        .chain(path.segments().iter().cloned()),
    );
    pointer
      .resolve(self.document)
      .ok_or_else(|| GenerateError::not_found(raw))
  }

  /// Merges `patch` into the state of `operation_id`, creating it on first touch.
  pub fn update_operation_state(
    &mut self,
    method: Method,
    request_uri: &str,
    operation_id: &str,
    patch: OperationStatePatch,
  ) {
    let state = self
      .operations
      .entry(operation_id.to_string())
      .or_insert_with(|| OperationState::new(method.clone(), request_uri));
    state.method = method;
    request_uri.clone_into(&mut state.request_uri);
    state.apply(patch);
  }

  #[must_use]
  pub fn operation_state(&self, operation_id: &str) -> Option<&OperationState> {
    self.operations.get(operation_id)
  }

  #[must_use]
  pub fn operations(&self) -> &IndexMap<String, OperationState> {
    &self.operations
  }

  pub fn add_additional_statements(&mut self, statements: impl IntoIterator<Item = Statement>) {
    self.additional.extend(statements);
  }

  /// Category namespaces in registry order, each rendered depth-first.
  #[must_use]
  pub fn root_statements(&self) -> Vec<Statement> {
    ComponentName::iter()
      .filter_map(|component| self.components.get(&component))
      .map(|namespace| Statement::Namespace(namespace.to_declaration()))
      .collect()
  }

  #[must_use]
  pub fn additional_statements(&self) -> &[Statement] {
    &self.additional
  }

  /// Consumes the store, returning `(root statements, additional statements, operations)`.
  #[must_use]
  pub fn into_parts(self) -> (Vec<Statement>, Vec<Statement>, IndexMap<String, OperationState>) {
    let root = self.root_statements();
    (root, self.additional, self.operations)
  }
}
