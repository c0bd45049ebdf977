use crate::{
  compiler::descriptor::TypeRef,
  error::BuildError,
  tests::common::{compile, graph_from, object_schema, ref_prop, string_prop},
};

#[test]
fn resolution_is_memoized_by_identity() -> anyhow::Result<()> {
  // Two referrers to the same schema must observe the same handle, and the
  // arena must hold exactly one descriptor per identity.
  let graph = graph_from(vec![
    ("Shared", object_schema(vec![string_prop("tag")], vec![])),
    ("Left", object_schema(vec![ref_prop("shared", "Shared")], vec![])),
    ("Right", object_schema(vec![ref_prop("shared", "Shared")], vec![])),
  ]);
  let compiled = compile(graph)?;

  assert_eq!(compiled.arena.len(), 3);

  let shared_id = compiled.arena.lookup("Shared").expect("Shared handle");
  for model in ["Left", "Right"] {
    let descriptor = compiled.descriptor(model).expect("descriptor should exist");
    let TypeRef::Model(target) = &descriptor.fields[0].type_ref else {
      panic!("field should reference the shared model");
    };
    assert_eq!(*target, shared_id);
  }
  Ok(())
}

#[test]
fn mutual_references_converge_through_placeholders() -> anyhow::Result<()> {
  let graph = graph_from(vec![
    ("Ping", object_schema(vec![ref_prop("pong", "Pong")], vec![])),
    ("Pong", object_schema(vec![ref_prop("ping", "Ping")], vec![])),
  ]);
  let compiled = compile(graph)?;

  let ping = compiled.descriptor("Ping").expect("Ping should be built");
  let pong = compiled.descriptor("Pong").expect("Pong should be built");
  assert!(ping.is_built());
  assert!(pong.is_built());

  // The mutual reference is legal and reported as one cluster.
  assert_eq!(compiled.stats.reference_cycles.len(), 1);
  let cluster = &compiled.stats.reference_cycles[0];
  assert!(cluster.contains(&"Ping".to_string()));
  assert!(cluster.contains(&"Pong".to_string()));
  Ok(())
}

#[test]
fn self_reference_converges() -> anyhow::Result<()> {
  let graph = graph_from(vec![(
    "TreeNode",
    object_schema(vec![string_prop("label"), ref_prop("left", "TreeNode")], vec![]),
  )]);
  let compiled = compile(graph)?;

  let node = compiled.descriptor("TreeNode").expect("TreeNode should be built");
  let node_id = compiled.arena.lookup("TreeNode").expect("TreeNode handle");
  let TypeRef::Model(target) = &node.fields[1].type_ref else {
    panic!("left should reference the node model itself");
  };
  assert_eq!(*target, node_id);
  Ok(())
}

#[test]
fn unknown_reference_is_fatal() {
  let graph = graph_from(vec![(
    "Orphan",
    object_schema(vec![ref_prop("missing", "Nowhere")], vec![]),
  )]);
  let result = crate::compiler::ModelCompiler::new(graph, crate::compiler::CodegenConfig::default()).compile();

  match result {
    Err(BuildError::SchemaNotFound { schema, referenced_from }) => {
      assert_eq!(schema, "Nowhere");
      assert_eq!(referenced_from, "Orphan");
    }
    other => panic!("expected SchemaNotFound, got {other:?}"),
  }
}

#[test]
fn unknown_parent_is_fatal() {
  let graph = graph_from(vec![("Child", object_schema(vec![], vec!["Ghost"]))]);
  let result = crate::compiler::ModelCompiler::new(graph, crate::compiler::CodegenConfig::default()).compile();

  assert!(matches!(result, Err(BuildError::SchemaNotFound { schema, .. }) if schema == "Ghost"));
}
