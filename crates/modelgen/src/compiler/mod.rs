//! Orchestration of the build pass.
//!
//! `ModelCompiler` runs a single synchronous, deterministic pass over the
//! schema set: every schema is resolved with full construction required,
//! descriptors land in one arena, and discriminator registrations are
//! delivered as each subject finishes. A fatal error aborts the whole run;
//! no partial output is handed out.

pub(crate) mod accessors;
pub mod arena;
pub(crate) mod builder;
pub mod descriptor;
pub(crate) mod discriminator;
pub(crate) mod validation;

use std::collections::BTreeSet;

use petgraph::{algo::kosaraju_scc, graphmap::DiGraphMap};

use self::{arena::DescriptorArena, builder::ModelBuilder};
use crate::{
  error::BuildError,
  schema::{AdditionalPropertiesSpec, PropertySchema, SchemaDef, SchemaGraph},
};

/// Project-wide switches handed in by the host.
#[derive(Debug, Clone, Copy)]
pub struct CodegenConfig {
  pub json_serialization: bool,
  pub xml_serialization: bool,
  /// Routes validation through an external storage-specific pipeline; the
  /// validation capability is suppressed even when checks exist.
  pub storage_pipeline: bool,
}

impl Default for CodegenConfig {
  fn default() -> Self {
    Self {
      json_serialization: true,
      xml_serialization: false,
      storage_pipeline: false,
    }
  }
}

/// Statistics about one compilation pass.
#[derive(Debug, Default)]
pub struct CompilationStats {
  pub models_built: usize,
  pub polymorphic_roots: usize,
  pub variants_registered: usize,
  /// Mutually recursive schema reference clusters. Reference cycles are
  /// legal (broken by placeholder backfill) and reported for visibility;
  /// only ancestor-chain cycles are fatal.
  pub reference_cycles: Vec<Vec<String>>,
  pub warnings: Vec<String>,
}

/// The compiled artifact set: every descriptor plus pass statistics.
#[derive(Debug)]
pub struct CompiledModels {
  pub arena: DescriptorArena,
  pub stats: CompilationStats,
}

impl CompiledModels {
  #[allow(unused)]
  pub fn descriptor(&self, schema_name: &str) -> Option<&descriptor::ModelDescriptor> {
    self.arena.descriptor(schema_name)
  }
}

pub struct ModelCompiler {
  graph: SchemaGraph,
  config: CodegenConfig,
}

impl ModelCompiler {
  pub fn new(graph: SchemaGraph, config: CodegenConfig) -> Self {
    Self { graph, config }
  }

  /// Runs the build pass over the full schema set, in declaration order.
  pub fn compile(&self) -> Result<CompiledModels, BuildError> {
    let reference_cycles = detect_reference_cycles(&self.graph);

    let mut arena = DescriptorArena::new();
    let mut builder = ModelBuilder::new(&self.graph, &self.config, &mut arena);

    for name in self.graph.schema_names() {
      builder.resolve(name, name, true)?;
    }

    let (variants_registered, warnings) = builder.finish();

    let stats = CompilationStats {
      models_built: arena.len(),
      polymorphic_roots: arena.iter().filter(|(_, d)| d.is_polymorphic).count(),
      variants_registered,
      reference_cycles,
      warnings,
    };

    Ok(CompiledModels { arena, stats })
  }
}

/// Finds strongly connected reference clusters (parents, property
/// references, typed additional properties) across the schema graph.
fn detect_reference_cycles(graph: &SchemaGraph) -> Vec<Vec<String>> {
  let mut edges = DiGraphMap::<&str, ()>::new();

  for (name, schema) in graph.iter() {
    edges.add_node(name.as_str());
    let mut refs = BTreeSet::new();
    collect_schema_refs(schema, &mut refs);
    for target in refs {
      edges.add_edge(name.as_str(), target, ());
    }
  }

  kosaraju_scc(&edges)
    .into_iter()
    .filter(|scc| scc.len() > 1 || edges.contains_edge(scc[0], scc[0]))
    .map(|scc| scc.into_iter().map(String::from).collect())
    .collect()
}

fn collect_schema_refs<'s>(schema: &'s SchemaDef, refs: &mut BTreeSet<&'s str>) {
  for parent in &schema.parents {
    refs.insert(parent.as_str());
  }
  for property in &schema.properties {
    collect_type_refs(&property.schema, refs);
  }
  if let Some(AdditionalPropertiesSpec::Typed(value_type)) = &schema.additional_properties {
    collect_type_refs(value_type, refs);
  }
}

fn collect_type_refs<'s>(schema: &'s PropertySchema, refs: &mut BTreeSet<&'s str>) {
  match schema {
    PropertySchema::Scalar(_) => {}
    PropertySchema::Reference { target } => {
      refs.insert(target.as_str());
    }
    PropertySchema::Inline { object } => {
      for property in &object.properties {
        collect_type_refs(&property.schema, refs);
      }
    }
  }
}

#[cfg(test)]
mod tests;
