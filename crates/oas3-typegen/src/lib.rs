#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::too_many_lines)]
//! Converts the `components` and `paths` of an OpenAPI 3.x document into
//! TypeScript declarations.
//!
//! [`generator::orchestrator::Orchestrator`] drives a run over a loaded
//! [`generator::document::DocumentSet`]; [`utils::spec::load_documents`] builds
//! that set from a file and everything it references.

pub mod generator;
pub mod ui;
pub mod utils;
