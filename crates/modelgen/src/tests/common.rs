use crate::{
  compiler::{CodegenConfig, CompiledModels, ModelCompiler},
  schema::{PropertyDef, PropertySchema, ScalarType, SchemaDef, SchemaGraph},
};

pub fn graph_from(schemas: Vec<(&str, SchemaDef)>) -> SchemaGraph {
  SchemaGraph::from_schemas(schemas.into_iter().map(|(name, schema)| (name.to_string(), schema)))
}

pub fn compile(graph: SchemaGraph) -> anyhow::Result<CompiledModels> {
  compile_with(graph, CodegenConfig::default())
}

pub fn compile_with(graph: SchemaGraph, config: CodegenConfig) -> anyhow::Result<CompiledModels> {
  Ok(ModelCompiler::new(graph, config).compile()?)
}

pub fn string_prop(name: &str) -> PropertyDef {
  PropertyDef {
    name: name.to_string(),
    schema: PropertySchema::Scalar(ScalarType::String),
    required: false,
    read_only: false,
    header_source: false,
    serialized_name: None,
  }
}

pub fn required_prop(name: &str) -> PropertyDef {
  PropertyDef {
    required: true,
    ..string_prop(name)
  }
}

pub fn read_only_prop(name: &str) -> PropertyDef {
  PropertyDef {
    read_only: true,
    ..string_prop(name)
  }
}

pub fn header_prop(name: &str) -> PropertyDef {
  PropertyDef {
    header_source: true,
    ..string_prop(name)
  }
}

pub fn ref_prop(name: &str, target: &str) -> PropertyDef {
  PropertyDef {
    schema: PropertySchema::Reference {
      target: target.to_string(),
    },
    ..string_prop(name)
  }
}

pub fn object_schema(properties: Vec<PropertyDef>, parents: Vec<&str>) -> SchemaDef {
  SchemaDef {
    properties,
    parents: parents.into_iter().map(str::to_string).collect(),
    ..Default::default()
  }
}

/// A polymorphic root owning the discriminator property.
pub fn root_schema(discriminator_property: &str, properties: Vec<PropertyDef>) -> SchemaDef {
  SchemaDef {
    properties,
    discriminator_property: Some(discriminator_property.to_string()),
    ..Default::default()
  }
}

/// A concrete variant declaring its discriminator literal.
pub fn variant_schema(parent: &str, literal: &str, properties: Vec<PropertyDef>) -> SchemaDef {
  SchemaDef {
    properties,
    parents: vec![parent.to_string()],
    discriminator_value: Some(literal.to_string()),
    ..Default::default()
  }
}
