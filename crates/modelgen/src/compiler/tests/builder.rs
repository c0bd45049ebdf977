use crate::{
  compiler::descriptor::{AccessorKind, AdditionalCapability, TypeRef},
  error::BuildError,
  schema::{AdditionalPropertiesSpec, PropertySchema, ScalarType, SchemaDef},
  tests::common::{compile, graph_from, object_schema, string_prop},
};

#[test]
fn empty_schema_yields_bare_descriptor() -> anyhow::Result<()> {
  let compiled = compile(graph_from(vec![("Empty", SchemaDef::default())]))?;

  let empty = compiled.descriptor("Empty").expect("Empty should be built");
  assert!(empty.fields.is_empty());
  assert!(empty.backings.is_empty());
  assert!(empty.virtuals.is_empty());
  assert!(empty.validation.is_empty());
  assert!(empty.capabilities.default_construct);
  assert!(!empty.capabilities.validate);
  assert!(!empty.is_polymorphic);
  Ok(())
}

#[test]
fn distinct_parents_produce_one_backing_each() -> anyhow::Result<()> {
  let graph = graph_from(vec![
    ("Engine", object_schema(vec![string_prop("serial")], vec![])),
    ("Chassis", object_schema(vec![string_prop("frame")], vec![])),
    ("Truck", object_schema(vec![string_prop("plate")], vec!["Engine", "Chassis"])),
  ]);
  let compiled = compile(graph)?;

  let truck = compiled.descriptor("Truck").expect("Truck should be built");
  assert_eq!(truck.backings.len(), 2);
  assert_eq!(truck.backings[0].class_name, "Engine");
  assert_eq!(truck.backings[1].class_name, "Chassis");

  for backing in &truck.backings {
    assert!(compiled.arena.get(backing.parent).is_built());
  }

  // Every ancestor property is re-exposed alongside the own surface.
  assert!(truck.find_virtual("plate").is_some());
  assert!(truck.find_virtual("serial").is_some());
  assert!(truck.find_virtual("frame").is_some());
  Ok(())
}

#[test]
fn duplicate_parent_entries_are_deduplicated_by_identity() -> anyhow::Result<()> {
  let graph = graph_from(vec![
    ("Base", object_schema(vec![string_prop("id")], vec![])),
    ("Twice", object_schema(vec![], vec!["Base", "Base"])),
  ]);
  let compiled = compile(graph)?;

  let twice = compiled.descriptor("Twice").expect("Twice should be built");
  assert_eq!(twice.backings.len(), 1);
  assert_eq!(twice.virtuals.len(), 1);
  Ok(())
}

#[test]
fn ancestor_surface_is_flattened_transitively() -> anyhow::Result<()> {
  let graph = graph_from(vec![
    ("Root", object_schema(vec![string_prop("origin")], vec![])),
    ("Middle", object_schema(vec![string_prop("waypoint")], vec!["Root"])),
    ("Leaf", object_schema(vec![string_prop("tip")], vec!["Middle"])),
  ]);
  let compiled = compile(graph)?;

  let leaf = compiled.descriptor("Leaf").expect("Leaf should be built");
  assert_eq!(leaf.backings.len(), 1);

  // The grandparent property arrives with a fully precomputed path through
  // the nested composed instances.
  let origin = leaf.find_virtual("origin").expect("origin should be exposed on Leaf");
  assert_eq!(origin.kind, AccessorKind::Proxy);
  assert_eq!(
    origin.read.path,
    vec!["middle".to_string(), "root".to_string(), "origin".to_string()]
  );

  // Leaf satisfies both ancestor interfaces.
  let middle_id = compiled.arena.lookup("Middle").expect("Middle handle");
  let root_id = compiled.arena.lookup("Root").expect("Root handle");
  assert!(leaf.implements.contains(&middle_id));
  assert!(leaf.implements.contains(&root_id));
  Ok(())
}

#[test]
fn colliding_member_names_get_stable_numeric_suffixes() -> anyhow::Result<()> {
  let make_graph = || {
    graph_from(vec![(
      "Crowded",
      object_schema(
        vec![string_prop("base"), string_prop("Base"), string_prop("base ")],
        vec![],
      ),
    )])
  };

  let first = compile(make_graph())?;
  let second = compile(make_graph())?;

  for compiled in [&first, &second] {
    let crowded = compiled.descriptor("Crowded").expect("Crowded should be built");
    let names: Vec<&str> = crowded.fields.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["base", "base0", "base1"]);
  }
  Ok(())
}

#[test]
fn parent_backing_field_collides_with_property() -> anyhow::Result<()> {
  // A property named like the composed parent field forces the property
  // onto the suffix path; the backing was placed first.
  let graph = graph_from(vec![
    ("Engine", object_schema(vec![], vec![])),
    ("Car", object_schema(vec![string_prop("engine")], vec!["Engine"])),
  ]);
  let compiled = compile(graph)?;

  let car = compiled.descriptor("Car").expect("Car should be built");
  assert_eq!(car.backings[0].field_name, "engine");
  assert_eq!(car.fields[0].name, "engine0");
  Ok(())
}

#[test]
fn own_property_shadows_inherited_one() -> anyhow::Result<()> {
  let graph = graph_from(vec![
    ("Parent", object_schema(vec![string_prop("label")], vec![])),
    ("Child", object_schema(vec![string_prop("label")], vec!["Parent"])),
  ]);
  let compiled = compile(graph)?;

  let child = compiled.descriptor("Child").expect("Child should be built");
  let exposed: Vec<_> = child.virtuals.iter().filter(|v| v.name == "label").collect();
  assert_eq!(exposed.len(), 1);
  assert_eq!(exposed[0].kind, AccessorKind::Own);
  Ok(())
}

#[test]
fn diamond_ancestry_keeps_first_backing_and_warns() -> anyhow::Result<()> {
  let graph = graph_from(vec![
    ("Core", object_schema(vec![string_prop("id")], vec![])),
    ("West", object_schema(vec![], vec!["Core"])),
    ("East", object_schema(vec![], vec!["Core"])),
    ("Junction", object_schema(vec![], vec!["West", "East"])),
  ]);
  let compiled = compile(graph)?;

  let junction = compiled.descriptor("Junction").expect("Junction should be built");
  let id_virtuals: Vec<_> = junction.virtuals.iter().filter(|v| v.name == "id").collect();
  assert_eq!(id_virtuals.len(), 1);
  assert_eq!(id_virtuals[0].read.path[0], "west");
  assert!(
    compiled.stats.warnings.iter().any(|w| w.contains("Junction")),
    "diamond skip should be reported"
  );
  Ok(())
}

#[test]
fn additional_properties_capability_variants() -> anyhow::Result<()> {
  let graph = graph_from(vec![
    (
      "Open",
      SchemaDef {
        additional_properties: Some(AdditionalPropertiesSpec::Allowed(true)),
        ..Default::default()
      },
    ),
    (
      "Closed",
      SchemaDef {
        additional_properties: Some(AdditionalPropertiesSpec::Allowed(false)),
        ..Default::default()
      },
    ),
    ("Fixed", SchemaDef::default()),
    (
      "Counted",
      SchemaDef {
        additional_properties: Some(AdditionalPropertiesSpec::Typed(Box::new(PropertySchema::Scalar(
          ScalarType::Integer,
        )))),
        ..Default::default()
      },
    ),
  ]);
  let compiled = compile(graph)?;

  assert!(matches!(
    compiled.descriptor("Open").expect("Open").additional,
    AdditionalCapability::Untyped
  ));
  assert!(matches!(
    compiled.descriptor("Closed").expect("Closed").additional,
    AdditionalCapability::None
  ));
  assert!(matches!(
    compiled.descriptor("Fixed").expect("Fixed").additional,
    AdditionalCapability::None
  ));
  assert!(matches!(
    compiled.descriptor("Counted").expect("Counted").additional,
    AdditionalCapability::Typed(TypeRef::Scalar(ScalarType::Integer))
  ));
  Ok(())
}

#[test]
fn composition_cycle_is_fatal() {
  let graph = graph_from(vec![
    ("Left", object_schema(vec![], vec!["Right"])),
    ("Right", object_schema(vec![], vec!["Left"])),
  ]);
  let result = crate::compiler::ModelCompiler::new(graph, crate::compiler::CodegenConfig::default()).compile();

  assert!(matches!(result, Err(BuildError::CyclicAncestry { .. })));
}

#[test]
fn self_parent_is_fatal() {
  let graph = graph_from(vec![("Ouroboros", object_schema(vec![], vec!["Ouroboros"]))]);
  let result = crate::compiler::ModelCompiler::new(graph, crate::compiler::CodegenConfig::default()).compile();

  assert!(matches!(result, Err(BuildError::CyclicAncestry { .. })));
}
