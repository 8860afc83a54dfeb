use serde_json::Value;
use thiserror::Error;

use super::document::DocumentPoint;

pub type Result<T, E = GenerateError> = std::result::Result<T, E>;

/// Fatal conditions raised while converting a document.
///
/// Every variant aborts the run; nothing is retried and no partial output is kept.
#[derive(Debug, Error)]
pub enum GenerateError {
  #[error("unsupported construct: {message}")]
  UnsupportedConstruct { message: String },

  #[error("please set 'type' or '$ref' property at {location}\n{schema}{}", describe_parent(.parent.as_deref()))]
  UnsetType {
    schema: Box<Value>,
    parent: Option<Box<Value>>,
    location: DocumentPoint,
  },

  #[error("unknown schema shape at {location}\n{schema}")]
  UnknownSchemaShape { schema: Box<Value>, location: DocumentPoint },

  #[error("not found: {path}")]
  NotFound { path: String },

  #[error("unsupported path '{path}': statements must live under a known 'components/<category>'")]
  UnsupportedPath { path: String },

  #[error("invalid JSON pointer '{pointer}'")]
  InvalidPointer { pointer: String },
}

impl GenerateError {
  pub(crate) fn unsupported(message: impl Into<String>) -> Self {
    Self::UnsupportedConstruct {
      message: message.into(),
    }
  }

  pub(crate) fn not_found(path: impl Into<String>) -> Self {
    Self::NotFound { path: path.into() }
  }

  pub(crate) fn unsupported_path(path: impl Into<String>) -> Self {
    Self::UnsupportedPath { path: path.into() }
  }

  /// Source location of the failure, when the error carries one.
  #[must_use]
  pub fn location(&self) -> Option<&DocumentPoint> {
    match self {
      Self::UnsetType { location, .. } | Self::UnknownSchemaShape { location, .. } => Some(location),
      _ => None,
    }
  }

  /// Enclosing schema of the offending node, when known.
  #[must_use]
  pub fn parent(&self) -> Option<&Value> {
    match self {
      Self::UnsetType { parent, .. } => parent.as_deref(),
      _ => None,
    }
  }
}

fn describe_parent(parent: Option<&Value>) -> String {
  parent.map_or_else(String::new, |parent| format!("\nparent schema: {parent}"))
}
