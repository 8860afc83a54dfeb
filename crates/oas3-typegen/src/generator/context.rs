//! The bridge between the converter and the store.
//!
//! The converter only sees [`ConversionContext`]. [`GeneratorContext`] implements
//! it on top of the [`Store`], and is also the single place where component
//! entries are materialized, so every category shares one at-most-once guard.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use petgraph::{algo::kosaraju_scc, graphmap::DiGraphMap};

use super::{
  ast::StatementKind,
  components,
  document::{DocumentPoint, DocumentSet},
  errors::{GenerateError, Result},
  metrics::GenerationWarning,
  naming::identifiers::{ensure_unique, qualified_name, type_identifier},
  reference::Reference,
  registry::ComponentName,
  store::{Store, StorePath},
};

/// Kinds that count as "already generated" for a component entry.
const MATERIALIZED_KINDS: [StatementKind; 3] = [
  StatementKind::Namespace,
  StatementKind::Interface,
  StatementKind::TypeAlias,
];

/// What the converter needs from its caller.
pub trait ConversionContext {
  /// Makes sure the entity behind `reference` is generated. Idempotent.
  fn register_reference(&mut self, reference: &Reference<'_>) -> Result<()>;

  /// Identifier to emit at `current` for the declaration at `path`.
  fn reference_name(&self, current: &DocumentPoint, path: &str) -> String;

  /// Reports a non-fatal finding.
  fn warn(&mut self, _warning: GenerationWarning) {}
}

pub struct GeneratorContext<'d> {
  documents: &'d DocumentSet,
  store: Store<'d>,
  in_progress: HashSet<String>,
  scopes: Vec<String>,
  dependencies: BTreeMap<String, BTreeSet<String>>,
  /// Declaration name of each entry path, unique within its category.
  identifiers: BTreeMap<String, String>,
  used_identifiers: BTreeMap<ComponentName, BTreeSet<String>>,
  references_resolved: usize,
  warnings: Vec<GenerationWarning>,
}

impl<'d> GeneratorContext<'d> {
  #[must_use]
  pub fn new(documents: &'d DocumentSet) -> Self {
    Self {
      documents,
      store: Store::new(documents.root()),
      in_progress: HashSet::new(),
      scopes: vec![],
      dependencies: BTreeMap::new(),
      identifiers: BTreeMap::new(),
      used_identifiers: BTreeMap::new(),
      references_resolved: 0,
      warnings: vec![],
    }
  }

  #[must_use]
  pub fn documents(&self) -> &'d DocumentSet {
    self.documents
  }

  #[must_use]
  pub fn store(&self) -> &Store<'d> {
    &self.store
  }

  pub fn store_mut(&mut self) -> &mut Store<'d> {
    &mut self.store
  }

  #[must_use]
  pub fn into_store(self) -> Store<'d> {
    self.store
  }

  #[must_use]
  pub fn references_resolved(&self) -> usize {
    self.references_resolved
  }

  #[must_use]
  pub fn warnings(&self) -> &[GenerationWarning] {
    &self.warnings
  }

  /// Runs `generate` for `path` unless the path is already in the store or is
  /// being generated further up the stack.
  pub fn materialize_with<F>(&mut self, path: &str, generate: F) -> Result<()>
  where
    F: FnOnce(&mut Self) -> Result<()>,
  {
    if self.in_progress.contains(path) || self.store.has_statement(path, &MATERIALIZED_KINDS)? {
      return Ok(());
    }

    self.assign_identifier(path);
    self.in_progress.insert(path.to_string());
    self.scopes.push(path.to_string());
    let result = generate(self);
    self.scopes.pop();
    self.in_progress.remove(path);
    result
  }

  /// Gives the entry at `path` its declaration name, once. Names that sanitize
  /// to one already taken in the category get a numeric suffix.
  pub fn assign_identifier(&mut self, path: &str) {
    if self.identifiers.contains_key(path) {
      return;
    }
    let Ok(target) = StorePath::parse(path) else {
      return;
    };
    let [name] = target.segments() else {
      return;
    };

    let used = self.used_identifiers.entry(target.component()).or_default();
    let identifier = ensure_unique(&type_identifier(name), used);
    used.insert(identifier.clone());
    self.identifiers.insert(path.to_string(), identifier);
  }

  /// Declaration name of the `component` entry `name`.
  #[must_use]
  pub fn entry_identifier(&self, component: ComponentName, name: &str) -> String {
    identifier_of(&self.identifiers, component, name)
  }

  /// Generates the `component` entry `name`, whose definition lives at `point`.
  pub fn ensure_component(&mut self, component: ComponentName, name: &str, point: &DocumentPoint) -> Result<()> {
    if !component.has_declarations() {
      return Ok(());
    }

    let documents = self.documents;
    let data = documents
      .resolve(point)
      .ok_or_else(|| GenerateError::not_found(point.to_string()))?;
    let path = component.entry_path(name);
    self.materialize_with(&path, |ctx| {
      components::generate_entry(ctx, component, name, point, data)
    })
  }

  /// Records that the declaration currently being generated uses `path`.
  fn record_dependency(&mut self, path: &str) {
    if let Some(scope) = self.scopes.last() {
      self
        .dependencies
        .entry(scope.clone())
        .or_default()
        .insert(path.to_string());
    }
  }

  /// Strongly connected groups of declarations that reference each other.
  #[must_use]
  pub fn detect_cycles(&self) -> Vec<Vec<String>> {
    let mut graph = DiGraphMap::<&str, ()>::new();
    for (node, deps) in &self.dependencies {
      graph.add_node(node.as_str());
      for dep in deps {
        graph.add_edge(node.as_str(), dep.as_str(), ());
      }
    }

    let mut cycles: Vec<Vec<String>> = kosaraju_scc(&graph)
      .into_iter()
      .filter(|scc| scc.len() > 1 || graph.contains_edge(scc[0], scc[0]))
      .map(|scc| {
        let mut cycle: Vec<String> = scc.into_iter().map(String::from).collect();
        cycle.sort();
        cycle
      })
      .collect();
    cycles.sort();
    cycles
  }
}

impl ConversionContext for GeneratorContext<'_> {
  fn register_reference(&mut self, reference: &Reference<'_>) -> Result<()> {
    self.references_resolved += 1;
    self.record_dependency(&reference.path);

    match reference.component {
      Some(component) => self.ensure_component(component, &reference.name, &reference.point),
      None => Ok(()),
    }
  }

  /// Names are relative to the declaration being generated; outside of any
  /// component entry they are fully qualified.
  fn reference_name(&self, _current: &DocumentPoint, path: &str) -> String {
    let owner = self
      .scopes
      .last()
      .and_then(|scope| StorePath::parse(scope).ok())
      .map(|scope| scope.component());
    name_from(&self.identifiers, owner, path)
  }

  fn warn(&mut self, warning: GenerationWarning) {
    self.warnings.push(warning);
  }
}

/// Bare name inside the owning category namespace, `Namespace.Name` elsewhere.
///
/// The owner is read from `current`, which must point into `components`.
#[cfg(test)]
pub(crate) fn reference_name(current: &DocumentPoint, path: &str) -> String {
  let owner = match current.pointer.segments() {
    [root, category, ..] if root == "components" => category.parse::<ComponentName>().ok(),
    _ => None,
  };
  name_from(&BTreeMap::new(), owner, path)
}

fn identifier_of(identifiers: &BTreeMap<String, String>, component: ComponentName, name: &str) -> String {
  identifiers
    .get(&component.entry_path(name))
    .cloned()
    .unwrap_or_else(|| type_identifier(name))
}

fn name_from(identifiers: &BTreeMap<String, String>, owner: Option<ComponentName>, path: &str) -> String {
  let Ok(target) = StorePath::parse(path) else {
    return type_identifier(path.rsplit('/').next().unwrap_or(path));
  };

  let Some((entry, members)) = target.segments().split_first() else {
    return target.component().namespace_name();
  };
  let mut parts = vec![identifier_of(identifiers, target.component(), entry)];
  parts.extend(members.iter().map(|segment| type_identifier(segment)));
  if owner != Some(target.component()) {
    parts.insert(0, target.component().namespace_name());
  }
  qualified_name(&parts)
}
