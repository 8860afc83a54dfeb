use serde_json::json;

use crate::generator::{
  ast::{InterfaceDecl, Keyword, Statement, StatementKind, TypeAliasDecl, TypeNode},
  errors::GenerateError,
  registry::ComponentName,
  store::{ComponentStatement, NamespaceNode, NamespaceParams, Store, StorePath},
};

fn alias(name: &str, ty: TypeNode) -> ComponentStatement {
  ComponentStatement::TypeAlias(TypeAliasDecl::builder().name(name).ty(ty).build())
}

fn statement_names(statements: &[Statement]) -> Vec<&str> {
  statements.iter().map(Statement::name).collect()
}

#[test]
fn test_store_path_parsing() -> anyhow::Result<()> {
  let path = StorePath::parse("components/responses/NotFound/Content")?;
  assert_eq!(path.component(), ComponentName::Responses);
  assert_eq!(path.segments(), ["NotFound", "Content"]);
  assert_eq!(path.name(), Some("Content"));
  assert_eq!(path.to_string(), "components/responses/NotFound/Content");

  for invalid in [
    "schemas/Pet",
    "paths/~1pets",
    "components/securitySchemes/Key",
    "components/schemas//Pet",
    "",
  ] {
    assert!(
      matches!(StorePath::parse(invalid), Err(GenerateError::UnsupportedPath { .. })),
      "expected {invalid:?} to be rejected"
    );
  }
  Ok(())
}

#[test]
fn test_add_statement_rejects_paths_outside_components() {
  let document = json!({});
  let mut store = Store::new(&document);

  let error = store
    .add_statement("definitions/Pet", alias("Pet", Keyword::String.into()))
    .unwrap_err();
  assert!(matches!(error, GenerateError::UnsupportedPath { path } if path == "definitions/Pet"));

  let error = store
    .add_statement("components/schemas", alias("Pet", Keyword::String.into()))
    .unwrap_err();
  assert!(matches!(error, GenerateError::UnsupportedPath { .. }));
}

#[test]
fn test_has_and_get_statement_by_kind() -> anyhow::Result<()> {
  let document = json!({});
  let mut store = Store::new(&document);
  store.add_statement("components/schemas/Pet", alias("Pet", Keyword::String.into()))?;

  assert!(store.has_statement("components/schemas/Pet", &[StatementKind::TypeAlias])?);
  assert!(store.has_statement(
    "components/schemas/Pet",
    &[StatementKind::Interface, StatementKind::TypeAlias]
  )?);
  assert!(!store.has_statement("components/schemas/Pet", &[StatementKind::Interface])?);
  assert!(!store.has_statement("components/schemas/Owner", &[StatementKind::TypeAlias])?);

  let decl = store.get_statement::<TypeAliasDecl>("components/schemas/Pet")?;
  assert_eq!(decl.map(|decl| &decl.ty), Some(&TypeNode::Keyword(Keyword::String)));
  assert!(store.get_statement::<InterfaceDecl>("components/schemas/Pet")?.is_none());
  Ok(())
}

#[test]
fn test_add_statement_overwrites_same_kind_in_place() -> anyhow::Result<()> {
  let document = json!({});
  let mut store = Store::new(&document);
  store.add_statement("components/schemas/A", alias("A", Keyword::String.into()))?;
  store.add_statement("components/schemas/B", alias("B", Keyword::String.into()))?;
  store.add_statement("components/schemas/A", alias("A", Keyword::Number.into()))?;

  let statements = store.root_statements();
  let [Statement::Namespace(schemas)] = statements.as_slice() else {
    panic!("expected a single namespace, got {statements:?}");
  };
  assert_eq!(statement_names(&schemas.statements), ["A", "B"]);
  let Statement::TypeAlias(first) = &schemas.statements[0] else {
    panic!("expected type alias");
  };
  assert_eq!(first.ty, TypeNode::Keyword(Keyword::Number));
  Ok(())
}

#[test]
fn test_namespace_and_type_share_a_name() -> anyhow::Result<()> {
  let document = json!({});
  let mut store = Store::new(&document);
  store.add_statement(
    "components/responses/NotFound",
    ComponentStatement::Namespace(NamespaceParams::named("NotFound")),
  )?;
  store.add_statement("components/responses/NotFound", alias("NotFound", Keyword::Never.into()))?;

  assert!(store.has_statement("components/responses/NotFound", &[StatementKind::Namespace])?);
  assert!(store.has_statement("components/responses/NotFound", &[StatementKind::TypeAlias])?);
  Ok(())
}

#[test]
fn test_intermediate_namespaces_are_created() -> anyhow::Result<()> {
  let document = json!({});
  let mut store = Store::new(&document);
  store.add_statement(
    "components/responses/NotFound/Content",
    ComponentStatement::Interface(InterfaceDecl::builder().name("Content").build()),
  )?;

  let namespace = store.get_statement::<NamespaceNode>("components/responses/NotFound")?;
  assert_eq!(namespace.map(|node| node.params.name.as_str()), Some("NotFound"));

  let statements = store.root_statements();
  let [Statement::Namespace(responses)] = statements.as_slice() else {
    panic!("expected responses namespace");
  };
  assert_eq!(responses.name, "Responses");
  let [Statement::Namespace(not_found)] = responses.statements.as_slice() else {
    panic!("expected nested namespace");
  };
  assert_eq!(statement_names(&not_found.statements), ["Content"]);
  Ok(())
}

#[test]
fn test_re_adding_namespace_keeps_children() -> anyhow::Result<()> {
  let document = json!({});
  let mut store = Store::new(&document);
  store.add_statement(
    "components/requestBodies/NewPet/Content",
    ComponentStatement::Interface(InterfaceDecl::builder().name("Content").build()),
  )?;
  store.add_statement(
    "components/requestBodies/NewPet",
    ComponentStatement::Namespace(
      NamespaceParams::builder()
        .name("NewPet")
        .comment("A new pet".to_string())
        .build(),
    ),
  )?;

  let namespace = store
    .get_statement::<NamespaceNode>("components/requestBodies/NewPet")?
    .expect("namespace");
  assert_eq!(namespace.params.comment.as_deref(), Some("A new pet"));
  assert_eq!(namespace.children().count(), 1);
  Ok(())
}

#[test]
fn test_add_component_resets_namespace() -> anyhow::Result<()> {
  let document = json!({});
  let mut store = Store::new(&document);
  store.add_statement("components/schemas/Pet", alias("Pet", Keyword::String.into()))?;
  store.add_component(ComponentName::Schemas, NamespaceParams::named("Schemas"));

  assert!(store.has_component(ComponentName::Schemas));
  assert!(!store.has_statement("components/schemas/Pet", &[StatementKind::TypeAlias])?);
  Ok(())
}

#[test]
fn test_root_statements_follow_registry_order() -> anyhow::Result<()> {
  let document = json!({});
  let mut store = Store::new(&document);
  store.add_statement("components/headers/RateLimit", alias("RateLimit", Keyword::Integer.into()))?;
  store.add_statement("components/schemas/Pet", alias("Pet", Keyword::String.into()))?;
  store.add_statement("components/parameters/Limit", alias("Limit", Keyword::Integer.into()))?;

  let statements = store.root_statements();
  assert_eq!(statement_names(&statements), ["Schemas", "Parameters", "Headers"]);
  Ok(())
}

#[test]
fn test_document_lookups() -> anyhow::Result<()> {
  let document = json!({
    "components": {
      "pathItems": { "PetItem": { "get": { "operationId": "getPet" } } },
      "parameters": { "Limit": { "name": "limit", "in": "query" } }
    }
  });
  let store = Store::new(&document);

  let path_item = store.get_path_item("components/pathItems/PetItem")?;
  assert_eq!(path_item["get"]["operationId"], "getPet");

  let parameter = store.get_parameter("components/parameters/Limit")?;
  assert_eq!(parameter["name"], "limit");

  assert!(matches!(
    store.get_parameter("components/parameters/Missing"),
    Err(GenerateError::NotFound { path }) if path == "components/parameters/Missing"
  ));
  assert!(matches!(
    store.get_path_item("components/parameters/Limit"),
    Err(GenerateError::UnsupportedPath { .. })
  ));
  Ok(())
}

#[test]
fn test_additional_statements_are_kept_in_order() {
  let document = json!({});
  let mut store = Store::new(&document);
  store.add_additional_statements([
    Statement::TypeAlias(TypeAliasDecl::builder().name("B").ty(Keyword::Never.into()).build()),
    Statement::TypeAlias(TypeAliasDecl::builder().name("A").ty(Keyword::Never.into()).build()),
  ]);
  assert_eq!(statement_names(store.additional_statements()), ["B", "A"]);
}
