//! TypeScript rendering of the statement tree.
//!
//! Output is a pure function of the statements: no ordering or naming
//! decisions happen here.

mod comments;
mod types;


use itertools::Itertools;

pub(crate) use self::types::render_type;
use self::{comments::doc_comment, types::render_member};
use super::ast::{IndexSignatureDecl, InterfaceDecl, NamespaceDecl, Statement, TypeAliasDecl};

pub(crate) const INDENT: &str = "  ";

/// Renders `statements` as the body of a declaration file.
#[must_use]
pub fn render(statements: &[Statement]) -> String {
  let mut printer = Printer::default();
  printer.statements(statements);
  printer.finish()
}

#[derive(Debug, Default)]
struct Printer {
  lines: Vec<String>,
  depth: usize,
}

impl Printer {
  fn finish(self) -> String {
    if self.lines.is_empty() {
      return String::new();
    }
    let mut output = self.lines.join("\n");
    output.push('\n');
    output
  }

  fn line(&mut self, text: impl AsRef<str>) {
    let text = text.as_ref();
    if text.is_empty() {
      self.lines.push(String::new());
    } else {
      self.lines.push(format!("{}{text}", INDENT.repeat(self.depth)));
    }
  }

  fn comment(&mut self, comment: Option<&str>, deprecated: bool) {
    let mut text = comment.unwrap_or_default().to_string();
    if deprecated && !text.contains("@deprecated") {
      if !text.is_empty() {
        text.push('\n');
      }
      text.push_str("@deprecated");
    }
    for line in doc_comment(&text) {
      self.line(line);
    }
  }

  fn statements(&mut self, statements: &[Statement]) {
    for (index, statement) in statements.iter().enumerate() {
      if index > 0 && self.depth == 0 {
        self.line("");
      }
      self.statement(statement);
    }
  }

  fn statement(&mut self, statement: &Statement) {
    match statement {
      Statement::Namespace(decl) => self.namespace(decl),
      Statement::TypeAlias(decl) => self.type_alias(decl),
      Statement::Interface(decl) => self.interface(decl),
      Statement::IndexSignature(decl) => self.index_signature(decl),
    }
  }

  fn namespace(&mut self, decl: &NamespaceDecl) {
    self.comment(decl.comment.as_deref(), decl.deprecated);
    let head = format!("{}namespace {}", export(decl.export), decl.name);
    if decl.statements.is_empty() {
      self.line(format!("{head} {{}}"));
      return;
    }

    self.line(format!("{head} {{"));
    self.depth += 1;
    self.statements(&decl.statements);
    self.depth -= 1;
    self.line("}");
  }

  fn type_alias(&mut self, decl: &TypeAliasDecl) {
    self.comment(decl.comment.as_deref(), false);
    let ty = render_type(&decl.ty, self.depth);
    self.line(format!("{}type {} = {ty};", export(decl.export), decl.name));
  }

  fn interface(&mut self, decl: &InterfaceDecl) {
    self.comment(decl.comment.as_deref(), false);
    let head = format!("{}interface {}", export(decl.export), decl.name);
    if decl.members.is_empty() {
      self.line(format!("{head} {{}}"));
      return;
    }

    self.line(format!("{head} {{"));
    let body = decl
      .members
      .iter()
      .map(|member| render_member(member, self.depth + 1))
      .join("\n");
    self.lines.push(body);
    self.line("}");
  }

  fn index_signature(&mut self, decl: &IndexSignatureDecl) {
    let ty = render_type(&decl.ty, self.depth);
    self.line(format!("[{}: string]: {ty};", decl.name));
  }
}

fn export(export: bool) -> &'static str {
  if export { "export " } else { "" }
}

/// Banner placed above the rendered declarations.
#[must_use]
pub fn file_header(title: &str, version: &str, description: Option<&str>, source: &str) -> String {
  let description = description
    .map(|text| text.lines().map(|line| format!("// {line}").trim_end().to_string()).join("\n"))
    .unwrap_or_else(|| "// No description provided".to_string());

  format!(
    "// AUTO-GENERATED CODE - DO NOT EDIT!\n//\n// {title}\n// Source: {source}\n// Version: {version}\n// Generated by `oas3-typegen`\n//\n{description}\n"
  )
}
