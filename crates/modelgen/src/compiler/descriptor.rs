//! The compiled artifact: one flattened model class descriptor per schema
//! identity, consumed by a code-emission backend. Everything here is plain
//! data; the build logic lives in the builder.

use std::collections::BTreeMap;

use serde::Serialize;
use string_cache::DefaultAtom;

use crate::schema::ScalarType;

/// Stable handle into the descriptor arena. Holders of a handle taken
/// before a descriptor finished building observe the completed descriptor
/// afterwards, never a stale copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct DescriptorId(pub(crate) usize);

/// Lifecycle of a descriptor slot. A `Placeholder` breaks mutual recursion
/// between schema references; `Building` marks the slot while its own
/// construction is on the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescriptorState {
  Placeholder,
  Building,
  Built,
}

/// Resolved type of a field or virtual property.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TypeRef {
  Scalar(ScalarType),
  /// Another model class, by descriptor handle.
  Model(DescriptorId),
  /// Anonymous inline record; its leaves are hoisted onto the surface.
  Nested(Vec<FieldSlot>),
}

impl TypeRef {
  /// Composite values get allocate-on-first-read accessors and recursive
  /// value validation.
  pub fn is_composite(&self) -> bool {
    matches!(self, TypeRef::Model(_) | TypeRef::Nested(_))
  }
}

/// A concrete storage slot owned by the class.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSlot {
  /// Unique member name within the class.
  pub name: String,
  /// Source property name in the schema.
  pub property: String,
  pub type_ref: TypeRef,
  pub required: bool,
  pub read_only: bool,
  pub header_source: bool,
  pub serialized_name: String,
}

/// Flattening of one direct parent: a private, eagerly default-constructed
/// composed instance of the parent class.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BackingEntry {
  pub field_name: String,
  pub parent: DescriptorId,
  pub class_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum AccessorKind {
  /// Reads/writes a local field directly.
  Own,
  /// Delegates through a composed parent instance.
  Proxy,
  /// Follows an expression path into nested inline records.
  Inlined,
}

/// Read side of an accessor: an expression path of member names walked
/// from the class root. `lazy_init` marks allocate-on-read semantics:
/// missing composite values along the path are default-constructed, so
/// reads never fail (reading an "empty" nested object allocates it; this
/// is deliberate ergonomics, surfaced here so the backend emits it
/// knowingly).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadAccess {
  pub path: Vec<String>,
  pub lazy_init: bool,
}

/// Write side of an accessor. Absent entirely for read-only sources; a
/// suppressed setter is never rendered as a silent no-op.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WriteAccess {
  pub path: Vec<String>,
}

/// The uniform accessor surface exposed to consumers, regardless of
/// whether the backing storage is local, inherited, or nested.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VirtualProperty {
  /// Exposed name, unique on the class surface.
  pub name: String,
  /// Source property name in the declaring schema.
  pub property: String,
  pub kind: AccessorKind,
  pub type_ref: TypeRef,
  pub read: ReadAccess,
  pub write: Option<WriteAccess>,
  pub required: bool,
  pub header_source: bool,
  pub serialized_name: String,
}

/// One statement of the aggregated validation routine. Order is
/// significant: parents in declaration order, then own properties in
/// declaration order, presence before value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ValidationStep {
  /// Composed parent instance is present.
  BackingPresence { field: String },
  /// Composed parent instance validates recursively.
  BackingValue { field: String },
  /// Required property is present. `field` may be a dotted path for
  /// hoisted inline leaves.
  PropertyPresence { field: String, property: String },
  /// Composite-typed property validates recursively.
  PropertyValue { field: String, property: String },
}

/// Which generated entry points the class carries.
#[derive(Debug, Clone, Copy, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Capabilities {
  pub default_construct: bool,
  pub validate: bool,
  pub header_reader: bool,
  pub json: bool,
  pub xml: bool,
}

/// Open extension map attached beyond the declared properties.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum AdditionalCapability {
  #[default]
  None,
  /// String-keyed, arbitrarily-typed values.
  Untyped,
  /// String-keyed values of one fixed type.
  Typed(TypeRef),
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelDescriptor {
  /// Identity in the source graph.
  pub schema_name: String,
  pub class_name: String,
  #[serde(skip)]
  pub state: DescriptorState,
  pub fields: Vec<FieldSlot>,
  pub backings: Vec<BackingEntry>,
  pub virtuals: Vec<VirtualProperty>,
  /// Ancestor interfaces this class satisfies, transitively.
  pub implements: Vec<DescriptorId>,
  /// True iff the schema owns the discriminator property.
  pub is_polymorphic: bool,
  pub discriminator_property: Option<String>,
  /// Literal under which this class registers itself with its polymorphic
  /// ancestors.
  pub discriminator_value: Option<DefaultAtom>,
  /// Literal -> concrete descriptor, populated on polymorphic roots.
  pub discriminator_map: BTreeMap<String, DescriptorId>,
  /// Direct polymorphic parents, recorded only when this schema declares a
  /// discriminator literal.
  pub polymorphic_parents: Vec<DescriptorId>,
  pub validation: Vec<ValidationStep>,
  pub additional: AdditionalCapability,
  pub capabilities: Capabilities,
}

impl ModelDescriptor {
  pub(crate) fn placeholder(schema_name: &str, class_name: String) -> Self {
    Self {
      schema_name: schema_name.to_string(),
      class_name,
      state: DescriptorState::Placeholder,
      fields: vec![],
      backings: vec![],
      virtuals: vec![],
      implements: vec![],
      is_polymorphic: false,
      discriminator_property: None,
      discriminator_value: None,
      discriminator_map: BTreeMap::new(),
      polymorphic_parents: vec![],
      validation: vec![],
      additional: AdditionalCapability::default(),
      capabilities: Capabilities::default(),
    }
  }

  pub fn is_built(&self) -> bool {
    self.state == DescriptorState::Built
  }

  pub fn find_virtual(&self, name: &str) -> Option<&VirtualProperty> {
    self.virtuals.iter().find(|v| v.name == name)
  }

  /// Member names already taken on this class, fields and backings alike.
  pub(crate) fn member_names(&self) -> std::collections::BTreeSet<String> {
    self
      .fields
      .iter()
      .map(|f| f.name.clone())
      .chain(self.backings.iter().map(|b| b.field_name.clone()))
      .collect()
  }
}
