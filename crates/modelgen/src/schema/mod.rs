//! Input side of the compiler: a deserialized graph of abstract
//! object-schema definitions. The graph is immutable once handed to the
//! compiler; schema identity is the map key, and two structurally
//! identical schemas under different keys are distinct entities.

use indexmap::IndexMap;
use serde::Deserialize;

/// All schemas of one compilation run, in declaration order.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SchemaGraph {
  #[serde(default)]
  schemas: IndexMap<String, SchemaDef>,
}

impl SchemaGraph {
  #[allow(unused)]
  pub fn from_schemas<I>(schemas: I) -> Self
  where
    I: IntoIterator<Item = (String, SchemaDef)>,
  {
    Self {
      schemas: schemas.into_iter().collect(),
    }
  }

  pub fn get(&self, name: &str) -> Option<&SchemaDef> {
    self.schemas.get(name)
  }

  pub fn schema_names(&self) -> impl Iterator<Item = &String> {
    self.schemas.keys()
  }

  pub fn iter(&self) -> impl Iterator<Item = (&String, &SchemaDef)> {
    self.schemas.iter()
  }

  #[allow(unused)]
  pub fn len(&self) -> usize {
    self.schemas.len()
  }

  #[allow(unused)]
  pub fn is_empty(&self) -> bool {
    self.schemas.is_empty()
  }
}

/// One object-shaped schema definition.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SchemaDef {
  /// Declared properties, in declaration order.
  pub properties: Vec<PropertyDef>,
  /// Direct parent schemas, in `allOf` order.
  pub parents: Vec<String>,
  /// Name of the property whose runtime value identifies the concrete
  /// subclass. Declaring this makes the schema a polymorphic root.
  pub discriminator_property: Option<String>,
  /// Literal value identifying this schema as a concrete variant of some
  /// polymorphic ancestor.
  pub discriminator_value: Option<String>,
  /// Open/typed extension map beyond the declared properties.
  pub additional_properties: Option<AdditionalPropertiesSpec>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDef {
  pub name: String,
  #[serde(rename = "type", default)]
  pub schema: PropertySchema,
  #[serde(default)]
  pub required: bool,
  #[serde(default)]
  pub read_only: bool,
  #[serde(default)]
  pub header_source: bool,
  #[serde(default)]
  pub serialized_name: Option<String>,
}

impl PropertyDef {
  /// Name used on the wire; falls back to the declared property name.
  pub fn wire_name(&self) -> &str {
    self.serialized_name.as_deref().unwrap_or(&self.name)
  }
}

/// The type of a property: a scalar kind, a reference to another schema in
/// the graph, or an anonymous inline object carrying its own properties.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PropertySchema {
  Scalar(ScalarType),
  Reference {
    #[serde(rename = "$ref")]
    target: String,
  },
  Inline {
    object: InlineObject,
  },
}

impl Default for PropertySchema {
  fn default() -> Self {
    Self::Scalar(ScalarType::String)
  }
}

/// Anonymous nested object schema. Its properties are flattened onto the
/// containing class surface rather than generating a class of their own.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InlineObject {
  #[serde(default)]
  pub properties: Vec<PropertyDef>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, serde::Serialize, strum::Display)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum ScalarType {
  String,
  Integer,
  Number,
  Boolean,
  Date,
  DateTime,
  Binary,
  Any,
}

/// Additional-properties rule as written in the input: a boolean gate or a
/// fixed value type.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AdditionalPropertiesSpec {
  Allowed(bool),
  Typed(Box<PropertySchema>),
}
