use std::{
  collections::{BTreeSet, HashSet},
  sync::LazyLock,
};

use any_ascii::any_ascii;
use regex::Regex;

/// Words that cannot name a type or namespace in a declaration file.
pub(crate) static RESERVED_WORDS: LazyLock<HashSet<&str>> = LazyLock::new(|| {
  [
    "any", "boolean", "break", "case", "catch", "class", "const", "continue", "debugger", "declare", "default",
    "delete", "do", "else", "enum", "export", "extends", "false", "finally", "for", "function", "if", "implements",
    "import", "in", "instanceof", "interface", "let", "never", "new", "null", "number", "object", "package",
    "private", "protected", "public", "return", "static", "string", "super", "switch", "symbol", "this", "throw",
    "true", "try", "type", "typeof", "undefined", "unknown", "var", "void", "while", "with", "yield",
  ]
  .into_iter()
  .collect()
});

static INVALID_CHARS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_$]+").unwrap());
static MULTI_UNDERSCORE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"_+").unwrap());
static IDENTIFIER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").unwrap());

/// Transliterates to ASCII, replaces runs of invalid characters with `_`,
/// collapses repeated underscores and trims them from both ends.
pub(crate) fn sanitize(input: &str) -> String {
  if input.is_empty() {
    return String::new();
  }

  let ascii = any_ascii(input);
  let replaced = INVALID_CHARS_RE.replace_all(&ascii, "_");
  let collapsed = MULTI_UNDERSCORE_RE.replace_all(&replaced, "_");

  collapsed.trim_matches('_').to_string()
}

#[must_use]
pub fn is_identifier(name: &str) -> bool {
  IDENTIFIER_RE.is_match(name)
}

/// Declared name of a type, interface or namespace.
///
/// Case is preserved. A leading digit gets a `_` prefix, a reserved word gets a
/// `_` suffix and an empty result becomes `Unnamed`.
#[must_use]
pub fn type_identifier(name: &str) -> String {
  let mut ident = sanitize(name);

  if ident.is_empty() {
    return "Unnamed".to_string();
  }

  if ident.starts_with(|c: char| c.is_ascii_digit()) {
    ident.insert(0, '_');
  }

  if RESERVED_WORDS.contains(ident.as_str()) {
    ident.push('_');
  }

  ident
}

/// `base_name`, or `base_name` with the first free numeric suffix from 2 up.
#[must_use]
pub fn ensure_unique(base_name: &str, used_names: &BTreeSet<String>) -> String {
  if !used_names.contains(base_name) {
    return base_name.to_string();
  }
  (2..)
    .map(|i| format!("{base_name}{i}"))
    .find(|name| !used_names.contains(name))
    .unwrap_or_else(|| base_name.to_string())
}

/// Property key as written inside an object type: bare when it is a valid
/// identifier, a double-quoted string otherwise.
#[must_use]
pub fn property_key(name: &str) -> String {
  if is_identifier(name) {
    name.to_string()
  } else {
    serde_json::Value::String(name.to_string()).to_string()
  }
}

/// `Namespace.Name`, skipping empty parts.
#[must_use]
pub fn qualified_name<S: AsRef<str>>(parts: &[S]) -> String {
  parts
    .iter()
    .map(AsRef::as_ref)
    .filter(|part| !part.is_empty())
    .collect::<Vec<_>>()
    .join(".")
}
