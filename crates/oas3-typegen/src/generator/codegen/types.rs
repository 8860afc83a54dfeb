use itertools::Itertools;

use super::{INDENT, comments::doc_comment};
use crate::generator::{
  ast::{Keyword, Literal, TypeMember, TypeNode},
  naming::identifiers::property_key,
};

/// Renders `ty` for a declaration nested `depth` levels deep.
#[must_use]
pub(crate) fn render_type(ty: &TypeNode, depth: usize) -> String {
  match ty {
    TypeNode::Keyword(keyword) => keyword_text(*keyword).to_string(),
    TypeNode::Literals(literals) => literals.iter().map(literal_text).join(" | "),
    TypeNode::Array(element) => {
      let element_text = render_type(element, depth);
      if needs_parens_in_array(element) {
        format!("({element_text})[]")
      } else {
        format!("{element_text}[]")
      }
    }
    TypeNode::Object(members) if members.is_empty() => "{}".to_string(),
    TypeNode::Object(members) => {
      let body = members.iter().map(|member| render_member(member, depth + 1)).join("\n");
      format!("{{\n{body}\n{}}}", INDENT.repeat(depth))
    }
    TypeNode::Union(members) if members.is_empty() => keyword_text(Keyword::Never).to_string(),
    TypeNode::Union(members) => members.iter().map(|member| render_type(member, depth)).join(" | "),
    TypeNode::Intersection(members) if members.is_empty() => "unknown".to_string(),
    TypeNode::Intersection(members) => members
      .iter()
      .map(|member| {
        let text = render_type(member, depth);
        if is_union_like(member) { format!("({text})") } else { text }
      })
      .join(" & "),
    TypeNode::Reference(name) => name.clone(),
  }
}

/// One member line (with its doc comment) at `depth`.
pub(crate) fn render_member(member: &TypeMember, depth: usize) -> String {
  let indent = INDENT.repeat(depth);
  match member {
    TypeMember::Property(property) => {
      let mut lines: Vec<String> = property
        .comment
        .as_deref()
        .map(doc_comment)
        .unwrap_or_default()
        .into_iter()
        .map(|line| format!("{indent}{line}"))
        .collect();
      let optional = if property.optional { "?" } else { "" };
      lines.push(format!(
        "{indent}{}{optional}: {};",
        property_key(&property.name),
        render_type(&property.ty, depth)
      ));
      lines.join("\n")
    }
    TypeMember::Index(index) => format!("{indent}[{}: string]: {};", index.name, render_type(&index.ty, depth)),
  }
}

fn keyword_text(keyword: Keyword) -> &'static str {
  match keyword {
    Keyword::Boolean => "boolean",
    Keyword::Null => "null",
    Keyword::Integer | Keyword::Number => "number",
    Keyword::String => "string",
    Keyword::Undefined => "undefined",
    Keyword::Never => "never",
  }
}

fn literal_text(literal: &Literal) -> String {
  match literal {
    Literal::String(text) => serde_json::Value::String(text.clone()).to_string(),
    Literal::Number(number) => number.to_string(),
    Literal::Boolean(flag) => flag.to_string(),
  }
}

fn is_union_like(ty: &TypeNode) -> bool {
  match ty {
    TypeNode::Union(members) => members.len() > 1,
    TypeNode::Literals(literals) => literals.len() > 1,
    _ => false,
  }
}

fn needs_parens_in_array(ty: &TypeNode) -> bool {
  is_union_like(ty) || matches!(ty, TypeNode::Intersection(members) if members.len() > 1)
}
