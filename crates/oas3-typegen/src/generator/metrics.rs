use strum::Display;

use crate::generator::ast::Statement;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GenerationStats {
  pub declarations_generated: usize,
  pub namespaces_generated: usize,
  pub interfaces_generated: usize,
  pub type_aliases_generated: usize,
  pub index_signatures_generated: usize,
  pub operations_converted: usize,
  pub additional_statements: usize,
  pub references_resolved: usize,
  pub documents_loaded: usize,
  pub cycles_detected: usize,
  pub cycle_details: Vec<Vec<String>>,
  pub warnings: Vec<GenerationWarning>,
}

impl GenerationStats {
  /// Counts `statement` and, for namespaces, everything nested inside it.
  pub fn record_statement(&mut self, statement: &Statement) {
    match statement {
      Statement::Namespace(namespace) => {
        self.namespaces_generated += 1;
        self.record_statements(&namespace.statements);
        return;
      }
      Statement::Interface(_) => self.interfaces_generated += 1,
      Statement::TypeAlias(_) => self.type_aliases_generated += 1,
      Statement::IndexSignature(_) => self.index_signatures_generated += 1,
    }
    self.declarations_generated += 1;
  }

  pub fn record_statements(&mut self, statements: &[Statement]) {
    for statement in statements {
      self.record_statement(statement);
    }
  }

  pub fn record_additional_statements(&mut self, statements: &[Statement]) {
    self.additional_statements += statements.len();
    self.record_statements(statements);
  }

  pub fn record_operations(&mut self, count: usize) {
    self.operations_converted += count;
  }

  pub fn record_references(&mut self, count: usize) {
    self.references_resolved += count;
  }

  pub fn record_documents(&mut self, count: usize) {
    self.documents_loaded += count;
  }

  pub fn record_cycle(&mut self, cycle: Vec<String>) {
    self.cycles_detected += 1;
    self.cycle_details.push(cycle);
  }

  pub fn record_cycles(&mut self, cycles: Vec<Vec<String>>) {
    for cycle in cycles {
      self.record_cycle(cycle);
    }
  }

  pub fn record_warning(&mut self, warning: GenerationWarning) {
    self.warnings.push(warning);
  }

  pub fn record_warnings(&mut self, warnings: impl IntoIterator<Item = GenerationWarning>) {
    self.warnings.extend(warnings);
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum GenerationWarning {
  #[strum(to_string = "Skipped parameter '{name}': {reason}")]
  ParameterSkipped { name: String, reason: String },
  #[strum(to_string = "anyOf at {location} has no declaration form and was emitted as 'never'")]
  AnyOfCollapsed { location: String },
  #[strum(to_string = "Operation id '{operation_id}' is used by more than one operation ({method} {path})")]
  DuplicateOperationId {
    operation_id: String,
    method: String,
    path: String,
  },
}

impl GenerationWarning {
  pub fn is_skipped_item(&self) -> bool {
    matches!(self, Self::ParameterSkipped { .. })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::generator::ast::{InterfaceDecl, Keyword, NamespaceDecl, TypeAliasDecl};

  #[test]
  fn test_record_statements_walks_namespaces() {
    let statements = vec![Statement::Namespace(
      NamespaceDecl::builder()
        .name("Schemas")
        .statements(vec![
          Statement::Interface(InterfaceDecl::builder().name("Pet").build()),
          Statement::TypeAlias(TypeAliasDecl::builder().name("Id").ty(Keyword::String.into()).build()),
          Statement::Namespace(NamespaceDecl::builder().name("Inner").build()),
        ])
        .build(),
    )];

    let mut stats = GenerationStats::default();
    stats.record_statements(&statements);

    assert_eq!(stats.namespaces_generated, 2);
    assert_eq!(stats.interfaces_generated, 1);
    assert_eq!(stats.type_aliases_generated, 1);
    assert_eq!(stats.declarations_generated, 2);
  }

  #[test]
  fn test_warning_messages() {
    let warning = GenerationWarning::ParameterSkipped {
      name: "trace".to_string(),
      reason: "referenced parameter has no schema".to_string(),
    };
    assert_eq!(
      warning.to_string(),
      "Skipped parameter 'trace': referenced parameter has no schema"
    );
    assert!(warning.is_skipped_item());

    let warning = GenerationWarning::AnyOfCollapsed {
      location: "api.json#/components/schemas/Pet".to_string(),
    };
    assert!(!warning.is_skipped_item());
  }
}
