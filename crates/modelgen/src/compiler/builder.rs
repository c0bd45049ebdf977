//! Descriptor construction. The builder owns the resolve/build recursion:
//! `resolve` memoizes by schema identity through the arena, and
//! `build_in_place` runs the construction sequence for one schema,
//! publishing the slot before recursing so self-referential and mutually
//! referential schemas converge instead of looping.

use std::collections::BTreeSet;

use string_cache::DefaultAtom;

use super::{
  CodegenConfig, accessors,
  arena::DescriptorArena,
  descriptor::{
    AccessorKind, AdditionalCapability, BackingEntry, DescriptorId, DescriptorState, FieldSlot, ModelDescriptor,
    TypeRef,
  },
  discriminator::{self, DiscriminatorRegistration},
  validation::ValidationAggregator,
};
use crate::{
  error::BuildError,
  naming::identifiers::{RENAME_ATTEMPT_LIMIT, to_member_name, to_type_name, unique_member_name},
  schema::{AdditionalPropertiesSpec, InlineObject, PropertySchema, SchemaGraph},
};

pub(crate) struct ModelBuilder<'a> {
  graph: &'a SchemaGraph,
  config: &'a CodegenConfig,
  arena: &'a mut DescriptorArena,
  variants_registered: usize,
  warnings: Vec<String>,
}

impl<'a> ModelBuilder<'a> {
  pub(crate) fn new(graph: &'a SchemaGraph, config: &'a CodegenConfig, arena: &'a mut DescriptorArena) -> Self {
    Self {
      graph,
      config,
      arena,
      variants_registered: 0,
      warnings: vec![],
    }
  }

  /// Resolves a schema identity to its descriptor handle.
  ///
  /// Memoized: the same identity always yields the same handle. With
  /// `require_declared` the descriptor is fully built before returning;
  /// without it a placeholder handle may be returned to break mutual
  /// recursion, backfilled in place once the target's own build completes.
  pub(crate) fn resolve(
    &mut self,
    schema_name: &str,
    referenced_from: &str,
    require_declared: bool,
  ) -> Result<DescriptorId, BuildError> {
    if let Some(id) = self.arena.lookup(schema_name) {
      if require_declared && self.arena.get(id).state == DescriptorState::Placeholder {
        self.build_in_place(id)?;
      }
      return Ok(id);
    }

    if self.graph.get(schema_name).is_none() {
      return Err(BuildError::SchemaNotFound {
        schema: schema_name.to_string(),
        referenced_from: referenced_from.to_string(),
      });
    }

    let id = self.arena.intern(schema_name, to_type_name(schema_name));
    if require_declared {
      self.build_in_place(id)?;
    }
    Ok(id)
  }

  /// Consumes the builder, yielding registered-variant count and warnings.
  pub(crate) fn finish(self) -> (usize, Vec<String>) {
    (self.variants_registered, self.warnings)
  }

  fn build_in_place(&mut self, id: DescriptorId) -> Result<(), BuildError> {
    let schema_name = self.arena.get(id).schema_name.clone();
    let Some(schema) = self.graph.get(&schema_name) else {
      return Err(BuildError::SchemaNotFound {
        schema: schema_name.clone(),
        referenced_from: schema_name,
      });
    };

    self.arena.get_mut(id).state = DescriptorState::Building;
    let mut descriptor = self.arena.get(id).clone();

    if let Some(property) = &schema.discriminator_property {
      descriptor.is_polymorphic = true;
      descriptor.discriminator_property = Some(property.clone());
    }

    let mut registration = None;
    if let Some(value) = &schema.discriminator_value {
      let literal = DefaultAtom::from(value.as_str());
      descriptor.discriminator_value = Some(literal.clone());
      for parent_name in &schema.parents {
        let parent_id = self.resolve(parent_name, &schema_name, true)?;
        if self.arena.get(parent_id).is_polymorphic && !descriptor.polymorphic_parents.contains(&parent_id) {
          descriptor.polymorphic_parents.push(parent_id);
        }
      }
      registration = Some(DiscriminatorRegistration { literal, subject: id });
    }

    descriptor.capabilities.default_construct = true;

    let mut validation = ValidationAggregator::new();
    for parent_name in &schema.parents {
      self.flatten_parent(&mut descriptor, &mut validation, &schema_name, parent_name)?;
    }

    for property in &schema.properties {
      let type_ref = self.lower_type(&schema_name, &property.schema)?;
      let used = descriptor.member_names();
      let base = to_member_name(&property.name);
      let name = unique_member_name(&base, &used).ok_or_else(|| BuildError::NameCollisionExhausted {
        schema: schema_name.clone(),
        base: base.clone(),
        attempts: RENAME_ATTEMPT_LIMIT,
      })?;
      let field = FieldSlot {
        name,
        property: property.name.clone(),
        type_ref,
        required: property.required,
        read_only: property.read_only,
        header_source: property.header_source,
        serialized_name: property.wire_name().to_string(),
      };
      validation.add_property(&field);
      descriptor.virtuals.push(accessors::own_property(&field));
      descriptor.fields.push(field);
    }

    self.attach_inherited(&mut descriptor);
    self.hoist_inlined(&mut descriptor, &schema_name)?;

    descriptor.additional = match &schema.additional_properties {
      None | Some(AdditionalPropertiesSpec::Allowed(false)) => AdditionalCapability::None,
      Some(AdditionalPropertiesSpec::Allowed(true)) => AdditionalCapability::Untyped,
      Some(AdditionalPropertiesSpec::Typed(value_type)) => {
        AdditionalCapability::Typed(self.lower_type(&schema_name, value_type)?)
      }
    };

    descriptor.capabilities.validate = !validation.is_empty() && !self.config.storage_pipeline;
    descriptor.validation = validation.into_steps();
    descriptor.capabilities.header_reader = descriptor.virtuals.iter().any(|v| v.header_source);
    descriptor.capabilities.json = self.config.json_serialization;
    descriptor.capabilities.xml =
      self.config.xml_serialization && descriptor.virtuals.iter().any(|v| !v.header_source);

    descriptor.state = DescriptorState::Built;
    *self.arena.get_mut(id) = descriptor;

    if let Some(registration) = registration {
      let report = discriminator::deliver(self.arena, &registration)?;
      self.variants_registered += report.entries_added;
      self.warnings.extend(report.warnings);
    }

    Ok(())
  }

  /// Produces the backing entry for one direct parent. Duplicate `allOf`
  /// entries referencing the same parent identity are skipped silently.
  /// Multi-level chains need no recursion here: the parent's surface was
  /// flattened the same way, so its access paths already reach every
  /// transitive ancestor.
  fn flatten_parent(
    &mut self,
    descriptor: &mut ModelDescriptor,
    validation: &mut ValidationAggregator,
    schema_name: &str,
    parent_name: &str,
  ) -> Result<(), BuildError> {
    let parent_id = self.resolve(parent_name, schema_name, true)?;

    if !self.arena.get(parent_id).is_built() {
      return Err(BuildError::CyclicAncestry {
        schema: schema_name.to_string(),
        chain: format!("'{schema_name}' composes '{parent_name}' while '{parent_name}' is still being flattened"),
      });
    }

    if descriptor.backings.iter().any(|b| b.parent == parent_id) {
      return Ok(());
    }

    let parent = self.arena.get(parent_id);
    let class_name = parent.class_name.clone();
    let mut satisfied = vec![parent_id];
    satisfied.extend(parent.implements.iter().copied());

    let base = to_member_name(&class_name);
    let used = descriptor.member_names();
    let field_name = unique_member_name(&base, &used).ok_or_else(|| BuildError::NameCollisionExhausted {
      schema: schema_name.to_string(),
      base: base.clone(),
      attempts: RENAME_ATTEMPT_LIMIT,
    })?;

    for interface in satisfied {
      if !descriptor.implements.contains(&interface) {
        descriptor.implements.push(interface);
      }
    }

    validation.add_backing(&field_name);
    descriptor.backings.push(BackingEntry {
      field_name,
      parent: parent_id,
      class_name,
    });
    Ok(())
  }

  /// Re-exposes every ancestor property through proxy accessors. A name
  /// already on the surface wins: the child's own property shadows the
  /// inherited one silently, while a collision between two backings
  /// (diamond ancestry through distinct composed instances) keeps the
  /// first backing's proxy and records a warning.
  fn attach_inherited(&mut self, descriptor: &mut ModelDescriptor) {
    let mut surface: BTreeSet<String> = descriptor.virtuals.iter().map(|v| v.name.clone()).collect();

    for backing in descriptor.backings.clone() {
      let parent_virtuals = self.arena.get(backing.parent).virtuals.clone();
      for source in &parent_virtuals {
        if surface.contains(&source.name) {
          let shadowed_by_proxy = descriptor
            .find_virtual(&source.name)
            .is_some_and(|v| v.kind == AccessorKind::Proxy);
          if shadowed_by_proxy {
            self.warnings.push(format!(
              "property '{}' of '{}' is already exposed through another composed parent of '{}'",
              source.name, backing.class_name, descriptor.schema_name,
            ));
          }
          continue;
        }
        descriptor.virtuals.push(accessors::proxy_property(&backing, source));
        surface.insert(source.name.clone());
      }
    }
  }

  /// Hoists every scalar or model-typed leaf of an inline-object field
  /// onto the surface, at any nesting depth, with the full field chain as
  /// access path.
  fn hoist_inlined(&mut self, descriptor: &mut ModelDescriptor, schema_name: &str) -> Result<(), BuildError> {
    let mut surface: BTreeSet<String> = descriptor.virtuals.iter().map(|v| v.name.clone()).collect();

    let own_fields = descriptor.fields.clone();
    for field in &own_fields {
      if let TypeRef::Nested(nested) = &field.type_ref {
        Self::hoist_leaves(
          descriptor,
          &mut surface,
          schema_name,
          vec![field.name.clone()],
          nested,
        )?;
      }
    }
    Ok(())
  }

  fn hoist_leaves(
    descriptor: &mut ModelDescriptor,
    surface: &mut BTreeSet<String>,
    schema_name: &str,
    prefix: Vec<String>,
    fields: &[FieldSlot],
  ) -> Result<(), BuildError> {
    for leaf in fields {
      let mut path = prefix.clone();
      path.push(leaf.name.clone());

      if let TypeRef::Nested(deeper) = &leaf.type_ref {
        Self::hoist_leaves(descriptor, surface, schema_name, path, deeper)?;
        continue;
      }

      let exposed = unique_member_name(&leaf.name, surface).ok_or_else(|| BuildError::NameCollisionExhausted {
        schema: schema_name.to_string(),
        base: leaf.name.clone(),
        attempts: RENAME_ATTEMPT_LIMIT,
      })?;
      surface.insert(exposed.clone());
      descriptor.virtuals.push(accessors::inlined_property(exposed, path, leaf));
    }
    Ok(())
  }

  fn lower_type(&mut self, schema_name: &str, schema: &PropertySchema) -> Result<TypeRef, BuildError> {
    match schema {
      PropertySchema::Scalar(scalar) => Ok(TypeRef::Scalar(*scalar)),
      PropertySchema::Reference { target } => Ok(TypeRef::Model(self.resolve(target, schema_name, false)?)),
      PropertySchema::Inline { object } => Ok(TypeRef::Nested(self.lower_inline(schema_name, object)?)),
    }
  }

  fn lower_inline(&mut self, schema_name: &str, object: &InlineObject) -> Result<Vec<FieldSlot>, BuildError> {
    let mut fields: Vec<FieldSlot> = Vec::with_capacity(object.properties.len());
    let mut used: BTreeSet<String> = BTreeSet::new();

    for property in &object.properties {
      let type_ref = self.lower_type(schema_name, &property.schema)?;
      let base = to_member_name(&property.name);
      let name = unique_member_name(&base, &used).ok_or_else(|| BuildError::NameCollisionExhausted {
        schema: schema_name.to_string(),
        base: base.clone(),
        attempts: RENAME_ATTEMPT_LIMIT,
      })?;
      used.insert(name.clone());
      fields.push(FieldSlot {
        name,
        property: property.name.clone(),
        type_ref,
        required: property.required,
        read_only: property.read_only,
        header_source: property.header_source,
        serialized_name: property.wire_name().to_string(),
      });
    }
    Ok(fields)
  }
}
