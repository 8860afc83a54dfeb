use inflections::Inflect;
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// The fixed set of component categories.
///
/// Declaration order is emission order: iterating with [`strum::IntoEnumIterator`]
/// yields the categories exactly as their namespaces appear in the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, AsRefStr, Display, EnumIter, EnumString)]
#[strum(serialize_all = "camelCase")]
pub enum ComponentName {
  Schemas,
  Parameters,
  Headers,
  Responses,
  RequestBodies,
  PathItems,
}

impl ComponentName {
  /// Name of the namespace that holds this category (`requestBodies` -> `RequestBodies`).
  #[must_use]
  pub fn namespace_name(self) -> String {
    self.as_ref().to_pascal_case()
  }

  /// Path items feed the operation walker and never produce declarations of their own.
  #[must_use]
  pub const fn has_declarations(self) -> bool {
    !matches!(self, Self::PathItems)
  }

  /// Link to the object definition this category holds, used as the namespace comment.
  #[must_use]
  pub fn documentation_url(self) -> String {
    let object = match self {
      Self::Schemas => "schemaObject",
      Self::Parameters => "parameterObject",
      Self::Headers => "headerObject",
      Self::Responses => "responseObject",
      Self::RequestBodies => "requestBodyObject",
      Self::PathItems => "pathItemObject",
    };
    format!("@see https://github.com/OAI/OpenAPI-Specification/blob/main/versions/3.1.0.md#{object}")
  }

  /// Canonical store path of a named entry, e.g. `components/schemas/Pet`.
  #[must_use]
  pub fn entry_path(self, name: &str) -> String {
    format!("components/{self}/{name}")
  }
}
