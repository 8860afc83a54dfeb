//! Borrowed, exhaustive view over a schema node.
//!
//! [`SchemaNode::classify`] inspects one `serde_json::Value` and picks exactly
//! one variant. Adding a variant forces every `match` over it to be revisited.

use serde_json::{Map, Value};
use strum::{Display, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum PrimitiveKind {
  Boolean,
  Null,
  Integer,
  Number,
  String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SchemaNode<'a> {
  /// `true` / `false` used as a schema.
  FreeForm,
  Reference(&'a str),
  OneOf(&'a [Value]),
  AllOf(&'a [Value]),
  AnyOf(&'a [Value]),
  Primitive(PrimitiveSchema<'a>),
  Array(ArraySchema<'a>),
  Object(ObjectSchema<'a>),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrimitiveSchema<'a> {
  pub kind: PrimitiveKind,
  pub enum_values: Option<&'a [Value]>,
  pub nullable: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ArrayItems<'a> {
  Absent,
  Schema(&'a Value),
  Tuple(&'a [Value]),
  Boolean(bool),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArraySchema<'a> {
  pub items: ArrayItems<'a>,
  pub nullable: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AdditionalProperties<'a> {
  Absent,
  Forbidden,
  FreeForm,
  Schema(&'a Value),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObjectSchema<'a> {
  pub properties: Option<&'a Map<String, Value>>,
  pub required: Vec<&'a str>,
  pub additional_properties: AdditionalProperties<'a>,
  pub nullable: bool,
}

impl ObjectSchema<'_> {
  #[must_use]
  pub fn is_required(&self, name: &str) -> bool {
    self.required.contains(&name)
  }

  /// True when `properties` is present and the object is not free-form.
  #[must_use]
  pub fn has_declared_members(&self) -> bool {
    self.properties.is_some() && self.additional_properties != AdditionalProperties::FreeForm
  }
}

/// Why a value could not be classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeError {
  /// Neither `type` nor `$ref`.
  Unset,
  /// A `type` outside the primitive/array/object set, or a value that is not a schema at all.
  Unknown,
}

impl<'a> SchemaNode<'a> {
  pub fn classify(value: &'a Value) -> Result<Self, ShapeError> {
    let schema = match value {
      Value::Bool(_) => return Ok(Self::FreeForm),
      Value::Object(schema) => schema,
      _ => return Err(ShapeError::Unknown),
    };

    if let Some(pointer) = reference_pointer(value) {
      return Ok(Self::Reference(pointer));
    }
    if let Some(members) = schema.get("oneOf").and_then(Value::as_array) {
      return Ok(Self::OneOf(members));
    }
    if let Some(members) = schema.get("allOf").and_then(Value::as_array) {
      return Ok(Self::AllOf(members));
    }
    if let Some(members) = schema.get("anyOf").and_then(Value::as_array) {
      return Ok(Self::AnyOf(members));
    }

    let type_name = match schema.get("type") {
      None | Some(Value::Null) => return Err(ShapeError::Unset),
      Some(Value::String(type_name)) => type_name.as_str(),
      Some(_) => return Err(ShapeError::Unknown),
    };
    let nullable = is_nullable(schema);

    match type_name {
      "array" => Ok(Self::Array(ArraySchema {
        items: classify_items(schema.get("items")),
        nullable,
      })),
      "object" => Ok(Self::Object(ObjectSchema {
        properties: schema.get("properties").and_then(Value::as_object),
        required: schema
          .get("required")
          .and_then(Value::as_array)
          .map(|names| names.iter().filter_map(Value::as_str).collect())
          .unwrap_or_default(),
        additional_properties: classify_additional_properties(schema.get("additionalProperties")),
        nullable,
      })),
      other => {
        let kind = other.parse::<PrimitiveKind>().map_err(|_| ShapeError::Unknown)?;
        Ok(Self::Primitive(PrimitiveSchema {
          kind,
          enum_values: schema.get("enum").and_then(Value::as_array).map(Vec::as_slice),
          nullable,
        }))
      }
    }
  }
}

fn is_nullable(schema: &Map<String, Value>) -> bool {
  schema.get("nullable").and_then(Value::as_bool).unwrap_or(false)
}

fn classify_items(items: Option<&Value>) -> ArrayItems<'_> {
  match items {
    None => ArrayItems::Absent,
    Some(Value::Array(items)) => ArrayItems::Tuple(items),
    Some(Value::Bool(allowed)) => ArrayItems::Boolean(*allowed),
    Some(items) => ArrayItems::Schema(items),
  }
}

fn classify_additional_properties(value: Option<&Value>) -> AdditionalProperties<'_> {
  match value {
    None => AdditionalProperties::Absent,
    Some(Value::Bool(true)) => AdditionalProperties::FreeForm,
    Some(Value::Bool(false)) => AdditionalProperties::Forbidden,
    Some(schema) => AdditionalProperties::Schema(schema),
  }
}

/// The `$ref` string of a reference object, if `value` is one.
#[must_use]
pub fn reference_pointer(value: &Value) -> Option<&str> {
  value.get("$ref").and_then(Value::as_str)
}

#[must_use]
pub fn description(value: &Value) -> Option<&str> {
  value.get("description").and_then(Value::as_str)
}

#[must_use]
pub fn is_deprecated(value: &Value) -> bool {
  value.get("deprecated").and_then(Value::as_bool).unwrap_or(false)
}
