use serde_json::json;

use super::support::{documents, generate_components, property};
use crate::generator::{
  ast::{Keyword, Literal, TypeAliasDecl, TypeNode},
  errors::GenerateError,
  metrics::GenerationWarning,
};

fn string_literal(value: &str) -> TypeNode {
  TypeNode::Literals(vec![Literal::String(value.to_string())])
}

#[test]
fn test_parameter_becomes_object_alias() -> anyhow::Result<()> {
  let documents = documents(json!({
    "components": {
      "parameters": {
        "limit": {
          "name": "limit",
          "in": "query",
          "description": "page size",
          "required": false,
          "explode": true,
          "schema": { "type": "integer" }
        }
      }
    }
  }));
  let ctx = generate_components(&documents)?;

  let limit = ctx
    .store()
    .get_statement::<TypeAliasDecl>("components/parameters/limit")?
    .expect("limit alias");
  assert_eq!(limit.comment.as_deref(), Some("page size"));

  let TypeNode::Object(members) = &limit.ty else {
    panic!("expected object, got {:?}", limit.ty);
  };
  assert_eq!(property(members, "name").ty, string_literal("limit"));
  assert_eq!(property(members, "in").ty, string_literal("query"));
  assert_eq!(
    property(members, "required").ty,
    TypeNode::Literals(vec![Literal::Boolean(false)])
  );
  assert_eq!(
    property(members, "explode").ty,
    TypeNode::Literals(vec![Literal::Boolean(true)])
  );
  assert_eq!(property(members, "description").ty, string_literal("page size"));
  assert_eq!(property(members, "schema").ty, TypeNode::Keyword(Keyword::Integer));
  assert_eq!(members.len(), 6);
  Ok(())
}

#[test]
fn test_parameter_schema_reference_is_qualified() -> anyhow::Result<()> {
  let documents = documents(json!({
    "components": {
      "schemas": { "PetId": { "type": "string" } },
      "parameters": {
        "petId": { "name": "petId", "in": "path", "schema": { "$ref": "#/components/schemas/PetId" } }
      }
    }
  }));
  let ctx = generate_components(&documents)?;

  let pet_id = ctx
    .store()
    .get_statement::<TypeAliasDecl>("components/parameters/petId")?
    .expect("petId alias");
  let TypeNode::Object(members) = &pet_id.ty else {
    panic!("expected object");
  };
  assert_eq!(property(members, "schema").ty, TypeNode::reference("Schemas.PetId"));
  Ok(())
}

#[test]
fn test_local_parameter_reference_is_rejected() {
  let documents = documents(json!({
    "components": {
      "parameters": {
        "limit": { "name": "limit", "in": "query", "schema": { "type": "integer" } },
        "pageSize": { "$ref": "#/components/parameters/limit" }
      }
    }
  }));

  let error = generate_components(&documents).err().expect("local reference must fail");
  assert!(matches!(error, GenerateError::UnsupportedConstruct { .. }), "{error}");
}

#[test]
fn test_external_parameter_reference() -> anyhow::Result<()> {
  let documents = documents(json!({
    "components": {
      "parameters": {
        "token": { "$ref": "shared.json#/components/parameters/token" },
        "trace": { "$ref": "shared.json#/components/parameters/trace" }
      }
    }
  }))
  .with_document(
    "shared.json",
    json!({
      "components": {
        "parameters": {
          "token": { "name": "token", "in": "header", "schema": { "type": "string" } },
          "trace": { "name": "trace", "in": "header" }
        }
      }
    }),
  );
  let ctx = generate_components(&documents)?;

  let token = ctx
    .store()
    .get_statement::<TypeAliasDecl>("components/parameters/token")?
    .expect("token alias");
  let TypeNode::Object(members) = &token.ty else {
    panic!("expected object");
  };
  assert_eq!(property(members, "in").ty, string_literal("header"));

  assert!(
    ctx
      .store()
      .get_statement::<TypeAliasDecl>("components/parameters/trace")?
      .is_none()
  );
  assert!(matches!(
    ctx.warnings(),
    [GenerationWarning::ParameterSkipped { name, .. }] if name == "trace"
  ));
  Ok(())
}

#[test]
fn test_parameter_list_is_keyed_by_name() -> anyhow::Result<()> {
  let documents = documents(json!({
    "components": {
      "parameters": [
        { "name": "offset", "in": "query", "schema": { "type": "integer" } },
        { "$ref": "shared.json#/components/parameters/token" }
      ]
    }
  }))
  .with_document(
    "shared.json",
    json!({
      "components": {
        "parameters": { "token": { "name": "token", "in": "header", "schema": { "type": "string" } } }
      }
    }),
  );
  let ctx = generate_components(&documents)?;

  for path in ["components/parameters/offset", "components/parameters/token"] {
    assert!(ctx.store().get_statement::<TypeAliasDecl>(path)?.is_some(), "{path}");
  }
  Ok(())
}
