use std::fmt;

use crate::generator::{
  errors::{GenerateError, Result},
  registry::ComponentName,
};

const COMPONENTS: &str = "components";

/// A validated location in the namespace tree: `components/<category>/<segment>...`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StorePath {
  component: ComponentName,
  segments: Vec<String>,
}

impl StorePath {
  /// Parses a `/`-separated path. Paths outside `components/<known category>` and
  /// paths with empty segments are rejected.
  pub fn parse(path: &str) -> Result<Self> {
    let mut parts = path.split('/');

    if parts.next() != Some(COMPONENTS) {
      return Err(GenerateError::unsupported_path(path));
    }

    let component = parts
      .next()
      .and_then(|category| category.parse::<ComponentName>().ok())
      .ok_or_else(|| GenerateError::unsupported_path(path))?;

    let segments: Vec<String> = parts.map(str::to_string).collect();
    if segments.iter().any(String::is_empty) {
      return Err(GenerateError::unsupported_path(path));
    }

    Ok(Self { component, segments })
  }

  #[must_use]
  pub fn component(&self) -> ComponentName {
    self.component
  }

  /// Segments below the category namespace.
  #[must_use]
  pub fn segments(&self) -> &[String] {
    &self.segments
  }

  #[must_use]
  pub fn name(&self) -> Option<&str> {
    self.segments.last().map(String::as_str)
  }

  #[must_use]
  pub fn is_category(&self) -> bool {
    self.segments.is_empty()
  }
}

impl fmt::Display for StorePath {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{COMPONENTS}/{}", self.component)?;
    for segment in &self.segments {
      write!(f, "/{segment}")?;
    }
    Ok(())
  }
}
