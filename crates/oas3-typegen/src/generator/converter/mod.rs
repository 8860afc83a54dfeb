//! Recursive schema to [`TypeNode`] conversion.
//!
//! References to component entries are never followed here: they go through
//! [`ConversionContext::register_reference`] and come back as a named type.
//! That is what keeps self-referencing schemas finite.

#[cfg(test)]
mod tests;

use serde_json::{Map, Value};

use super::{
  ast::{IndexSignatureDecl, Keyword, Literal, PropertySignature, TypeMember, TypeNode},
  context::ConversionContext,
  document::{DocumentPoint, DocumentSet},
  errors::{GenerateError, Result},
  metrics::GenerationWarning,
  reference::Reference,
  schema::{
    AdditionalProperties, ArrayItems, ArraySchema, ObjectSchema, PrimitiveKind, PrimitiveSchema, SchemaNode,
    ShapeError, description,
  },
};

/// Name of the member emitted for `additionalProperties` schemas.
pub const INDEX_SIGNATURE_NAME: &str = "key";

#[derive(Debug, Clone, Copy, Default)]
pub struct ConvertOptions<'a> {
  /// Enclosing schema, reported when the node turns out to be malformed.
  pub parent: Option<&'a Value>,
}

impl<'a> ConvertOptions<'a> {
  #[must_use]
  pub fn with_parent(parent: &'a Value) -> Self {
    Self { parent: Some(parent) }
  }
}

/// Converts `schema`, located at `current`, into a type.
pub fn convert(
  documents: &DocumentSet,
  current: &DocumentPoint,
  schema: &Value,
  ctx: &mut dyn ConversionContext,
  options: ConvertOptions<'_>,
) -> Result<TypeNode> {
  Converter::new(documents, ctx).convert(current, schema, options.parent)
}

/// Converts the declared properties of an object schema into members.
///
/// Used for schemas that are emitted as interfaces rather than aliases.
pub fn convert_members(
  documents: &DocumentSet,
  current: &DocumentPoint,
  schema: &Value,
  ctx: &mut dyn ConversionContext,
) -> Result<Vec<TypeMember>> {
  let Ok(SchemaNode::Object(object)) = SchemaNode::classify(schema) else {
    return Err(GenerateError::unsupported(format!(
      "expected an object schema at {current}"
    )));
  };
  Converter::new(documents, ctx).object_members(current, schema, &object)
}

struct Converter<'c, 'x> {
  documents: &'c DocumentSet,
  ctx: &'c mut (dyn ConversionContext + 'x),
  /// Inlined reference paths on the current branch.
  trail: Vec<String>,
}

impl<'c, 'x> Converter<'c, 'x> {
  fn new(documents: &'c DocumentSet, ctx: &'c mut (dyn ConversionContext + 'x)) -> Self {
    Self {
      documents,
      ctx,
      trail: vec![],
    }
  }

  fn convert(&mut self, current: &DocumentPoint, schema: &Value, parent: Option<&Value>) -> Result<TypeNode> {
    let node = match SchemaNode::classify(schema) {
      Ok(node) => node,
      Err(ShapeError::Unset) => {
        return Err(GenerateError::UnsetType {
          schema: Box::new(schema.clone()),
          parent: parent.cloned().map(Box::new),
          location: current.clone(),
        });
      }
      Err(ShapeError::Unknown) => {
        return Err(GenerateError::UnknownSchemaShape {
          schema: Box::new(schema.clone()),
          location: current.clone(),
        });
      }
    };

    match node {
      SchemaNode::FreeForm => Ok(TypeNode::open_object()),
      SchemaNode::Reference(_) => self.reference(current, schema),
      SchemaNode::OneOf(members) => Ok(TypeNode::Union(self.members(current, "oneOf", schema, members)?)),
      SchemaNode::AllOf(members) => Ok(TypeNode::Intersection(self.members(current, "allOf", schema, members)?)),
      SchemaNode::AnyOf(members) => {
        // Members are still visited so that their references get generated.
        self.members(current, "anyOf", schema, members)?;
        self.ctx.warn(GenerationWarning::AnyOfCollapsed {
          location: current.to_string(),
        });
        Ok(Keyword::Never.into())
      }
      SchemaNode::Primitive(primitive) => Ok(Self::primitive(&primitive)),
      SchemaNode::Array(array) => self.array(current, schema, &array),
      SchemaNode::Object(object) => self.object(current, schema, &object),
    }
  }

  fn reference(&mut self, current: &DocumentPoint, schema: &Value) -> Result<TypeNode> {
    let documents = self.documents;
    let reference = Reference::resolve(documents, current, schema)?;

    if reference.is_component() {
      self.ctx.register_reference(&reference)?;
      return Ok(TypeNode::reference(self.ctx.reference_name(current, &reference.path)));
    }

    if self.trail.contains(&reference.path) {
      return Err(GenerateError::unsupported(format!(
        "cyclic reference to '{}' outside of components cannot be inlined",
        reference.path
      )));
    }

    self.ctx.register_reference(&reference)?;
    self.trail.push(reference.path.clone());
    let result = self.convert(&reference.point, reference.data, Some(schema));
    self.trail.pop();
    result
  }

  fn members(
    &mut self,
    current: &DocumentPoint,
    keyword: &str,
    schema: &Value,
    members: &[Value],
  ) -> Result<Vec<TypeNode>> {
    let base = current.join(keyword);
    members
      .iter()
      .enumerate()
      .map(|(index, member)| self.convert(&base.join(index.to_string()), member, Some(schema)))
      .collect()
  }

  fn primitive(primitive: &PrimitiveSchema<'_>) -> TypeNode {
    let node = primitive
      .enum_values
      .filter(|values| !values.is_empty())
      .and_then(|values| Literal::collect(primitive.kind, values))
      .map_or_else(|| Keyword::from(primitive.kind).into(), TypeNode::Literals);

    if primitive.kind == PrimitiveKind::Null {
      return node;
    }
    node.with_nullable(primitive.nullable)
  }

  fn array(&mut self, current: &DocumentPoint, schema: &Value, array: &ArraySchema<'_>) -> Result<TypeNode> {
    let element = match array.items {
      ArrayItems::Absent => Keyword::Undefined.into(),
      ArrayItems::Schema(items) => self.convert(&current.join("items"), items, Some(schema))?,
      ArrayItems::Tuple(_) | ArrayItems::Boolean(_) => {
        return Err(GenerateError::unsupported(format!(
          "schema.items = {} at {current}",
          schema.get("items").unwrap_or(&Value::Null)
        )));
      }
    };
    Ok(TypeNode::array_of(element).with_nullable(array.nullable))
  }

  fn object(&mut self, current: &DocumentPoint, schema: &Value, object: &ObjectSchema<'_>) -> Result<TypeNode> {
    if object.properties.is_none() || object.additional_properties == AdditionalProperties::FreeForm {
      return Ok(TypeNode::open_object());
    }
    let members = self.object_members(current, schema, object)?;
    Ok(TypeNode::Object(members).with_nullable(object.nullable))
  }

  fn object_members(
    &mut self,
    current: &DocumentPoint,
    schema: &Value,
    object: &ObjectSchema<'_>,
  ) -> Result<Vec<TypeMember>> {
    let empty = Map::new();
    let properties = object.properties.unwrap_or(&empty);
    let parent = schema.get("properties").unwrap_or(schema);
    let base = current.join("properties");

    let mut members = properties
      .iter()
      .map(|(name, property)| {
        let ty = self.convert(&base.join(name.as_str()), property, Some(parent))?;
        Ok(TypeMember::Property(
          PropertySignature::builder()
            .name(name.as_str())
            .ty(ty)
            .optional(!object.is_required(name))
            .maybe_comment(description(property).map(str::to_string))
            .build(),
        ))
      })
      .collect::<Result<Vec<_>>>()?;

    if let AdditionalProperties::Schema(additional) = object.additional_properties {
      let ty = self.convert(&current.join("additionalProperties"), additional, Some(parent))?;
      members.push(TypeMember::Index(IndexSignatureDecl::new(INDEX_SIGNATURE_NAME, ty)));
    }

    Ok(members)
  }
}
