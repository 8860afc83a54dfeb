//! Orchestration of the OpenAPI to TypeScript declaration pipeline.
//!
//! The orchestrator owns the loaded documents and runs the whole conversion:
//! every component category in registry order, then the operation walker.
//! Nothing is written anywhere; the caller decides what to do with the output.
//!
//! ## Usage
//!
//! ```no_run
//! use oas3_typegen::generator::{document::DocumentSet, orchestrator::Orchestrator};
//!
//! # fn example() -> anyhow::Result<()> {
//! let root = serde_json::from_str(&std::fs::read_to_string("openapi.json")?)?;
//! let orchestrator = Orchestrator::new(DocumentSet::new("openapi.json", root));
//! let (code, stats) = orchestrator.generate_with_header("openapi.json")?;
//!
//! println!("Generated {} declarations", stats.declarations_generated);
//! std::fs::write("openapi.d.ts", code)?;
//! # Ok(())
//! # }
//! ```

use indexmap::IndexMap;
use serde_json::Value;
use strum::IntoEnumIterator;

use crate::generator::{
  ast::Statement,
  codegen,
  components::generate_namespace,
  context::GeneratorContext,
  document::DocumentSet,
  errors::Result,
  metrics::GenerationStats,
  operations::generate_operations,
  registry::ComponentName,
  store::OperationState,
};

pub struct Orchestrator {
  documents: DocumentSet,
}

/// Metadata about the API, used for the generated file header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeMetadata {
  pub title: String,
  pub version: String,
  pub description: Option<String>,
}

/// Everything one run produces.
#[derive(Debug, Clone)]
pub struct GeneratedOutput {
  /// One namespace per non-empty component category, in registry order.
  pub statements: Vec<Statement>,
  /// Per-operation declarations, in path and method order.
  pub additional_statements: Vec<Statement>,
  pub operations: IndexMap<String, OperationState>,
  pub stats: GenerationStats,
}

impl GeneratedOutput {
  /// Namespaces first, then the per-operation declarations.
  #[must_use]
  pub fn all_statements(&self) -> Vec<Statement> {
    self
      .statements
      .iter()
      .chain(&self.additional_statements)
      .cloned()
      .collect()
  }
}

impl Orchestrator {
  #[must_use]
  pub fn new(documents: DocumentSet) -> Self {
    Self { documents }
  }

  #[must_use]
  pub fn documents(&self) -> &DocumentSet {
    &self.documents
  }

  /// Reads `info` from the entry document.
  #[must_use]
  pub fn metadata(&self) -> CodeMetadata {
    let info = self.documents.root().get("info");
    let text = |key: &str| info.and_then(|info| info.get(key)).and_then(Value::as_str).map(str::to_string);

    CodeMetadata {
      title: text("title").unwrap_or_else(|| "Untitled API".to_string()),
      version: text("version").unwrap_or_default(),
      description: text("description"),
    }
  }

  /// Runs the conversion. Any error aborts the run without partial output.
  pub fn generate(&self) -> Result<GeneratedOutput> {
    let mut ctx = GeneratorContext::new(&self.documents);

    for component in ComponentName::iter() {
      generate_namespace(&mut ctx, component)?;
    }
    generate_operations(&mut ctx)?;

    let mut stats = GenerationStats::default();
    stats.record_documents(self.documents.len());
    stats.record_references(ctx.references_resolved());
    stats.record_cycles(ctx.detect_cycles());
    stats.record_warnings(ctx.warnings().iter().cloned());

    let (statements, additional_statements, operations) = ctx.into_store().into_parts();
    stats.record_statements(&statements);
    stats.record_additional_statements(&additional_statements);
    stats.record_operations(operations.len());

    Ok(GeneratedOutput {
      statements,
      additional_statements,
      operations,
      stats,
    })
  }

  /// Generates the declarations as TypeScript text, without a file header.
  pub fn generate_code(&self) -> Result<(String, GenerationStats)> {
    let output = self.generate()?;
    let code = codegen::render(&output.all_statements());
    Ok((code, output.stats))
  }

  /// Generates the declarations preceded by a header naming the API and `source_path`.
  pub fn generate_with_header(&self, source_path: &str) -> Result<(String, GenerationStats)> {
    let (code, stats) = self.generate_code()?;
    let metadata = self.metadata();
    let header = codegen::file_header(
      &metadata.title,
      &metadata.version,
      metadata.description.as_deref(),
      source_path,
    );

    Ok((format!("{header}\n{code}"), stats))
  }
}
