use serde_json::{Value, json};

use crate::generator::{ast::Statement, document::DocumentSet};

pub(super) fn petstore() -> Value {
  json!({
    "openapi": "3.1.0",
    "info": { "title": "Pet Store", "version": "1.0.0", "description": "Sample pet store" },
    "paths": {
      "/pets": {
        "parameters": [{ "$ref": "#/components/parameters/limit" }],
        "get": {
          "operationId": "listPets",
          "summary": "List all pets",
          "parameters": [{ "name": "tag", "in": "query", "schema": { "type": "string" } }],
          "responses": {
            "200": {
              "description": "A page of pets",
              "content": {
                "application/json": {
                  "schema": { "type": "array", "items": { "$ref": "#/components/schemas/Pet" } }
                }
              }
            },
            "default": { "$ref": "#/components/responses/Error" }
          }
        },
        "post": {
          "operationId": "createPet",
          "requestBody": { "$ref": "#/components/requestBodies/NewPet" },
          "responses": { "201": { "description": "Created" } }
        }
      },
      "/pets/{petId}": { "$ref": "#/components/pathItems/PetById" }
    },
    "components": {
      "schemas": {
        "Pet": {
          "type": "object",
          "required": ["id", "name"],
          "properties": {
            "id": { "type": "integer" },
            "name": { "type": "string" },
            "tag": { "type": "string", "nullable": true },
            "owner": { "$ref": "#/components/schemas/Owner" }
          }
        },
        "Owner": {
          "type": "object",
          "properties": { "pets": { "type": "array", "items": { "$ref": "#/components/schemas/Pet" } } }
        },
        "Status": { "type": "string", "enum": ["available", "pending", "sold"] }
      },
      "parameters": {
        "limit": { "name": "limit", "in": "query", "required": false, "schema": { "type": "integer" } },
        "petId": { "name": "petId", "in": "path", "required": true, "schema": { "type": "string" } }
      },
      "responses": {
        "Error": {
          "description": "Unexpected error",
          "content": { "application/json": { "schema": { "$ref": "errors.json#/components/schemas/Error" } } }
        }
      },
      "requestBodies": {
        "NewPet": { "content": { "application/json": { "schema": { "$ref": "#/components/schemas/Pet" } } } }
      },
      "pathItems": {
        "PetById": {
          "parameters": [{ "$ref": "#/components/parameters/petId" }],
          "get": {
            "operationId": "showPetById",
            "deprecated": true,
            "responses": {
              "200": {
                "description": "A pet",
                "content": { "application/json": { "schema": { "$ref": "#/components/schemas/Pet" } } }
              }
            }
          }
        }
      }
    }
  })
}

pub(super) fn errors_document() -> Value {
  json!({
    "components": {
      "schemas": {
        "Error": {
          "type": "object",
          "required": ["code"],
          "properties": { "code": { "type": "integer" }, "message": { "type": "string" } }
        }
      }
    }
  })
}

pub(super) fn petstore_documents() -> DocumentSet {
  DocumentSet::new("api.json", petstore()).with_document("errors.json", errors_document())
}

pub(super) fn names(statements: &[Statement]) -> Vec<&str> {
  statements.iter().map(Statement::name).collect()
}

/// Names of the children of the top-level namespace `namespace`.
pub(super) fn namespace_children<'a>(statements: &'a [Statement], namespace: &str) -> Vec<&'a str> {
  statements
    .iter()
    .find_map(|statement| match statement {
      Statement::Namespace(decl) if decl.name == namespace => Some(names(&decl.statements)),
      _ => None,
    })
    .unwrap_or_default()
}
