//! Accessor synthesis: every exposed property becomes a [`VirtualProperty`]
//! with a precomputed expression path, so the emission backend renders
//! direct member walks with no runtime dispatch through ancestor classes.

use super::descriptor::{AccessorKind, BackingEntry, FieldSlot, ReadAccess, VirtualProperty, WriteAccess};

/// Accessor for a locally declared field. Object-typed reads allocate the
/// value on first read; the read operation never fails.
pub(crate) fn own_property(field: &FieldSlot) -> VirtualProperty {
  let path = vec![field.name.clone()];
  VirtualProperty {
    name: field.name.clone(),
    property: field.property.clone(),
    kind: AccessorKind::Own,
    type_ref: field.type_ref.clone(),
    read: ReadAccess {
      path: path.clone(),
      lazy_init: field.type_ref.is_composite(),
    },
    write: (!field.read_only).then_some(WriteAccess { path }),
    required: field.required,
    header_source: field.header_source,
    serialized_name: field.serialized_name.clone(),
  }
}

/// Accessor delegating through a composed parent instance. The source is a
/// virtual property on the parent's already-flattened surface, so
/// prefixing its path with the backing field covers ancestors at any
/// depth. A source without a write operation stays write-less here: a
/// read-only ancestor property never gains a setter by being composed in.
pub(crate) fn proxy_property(backing: &BackingEntry, source: &VirtualProperty) -> VirtualProperty {
  VirtualProperty {
    name: source.name.clone(),
    property: source.property.clone(),
    kind: AccessorKind::Proxy,
    type_ref: source.type_ref.clone(),
    read: ReadAccess {
      path: prefixed(&backing.field_name, &source.read.path),
      lazy_init: source.read.lazy_init,
    },
    write: source.write.as_ref().map(|w| WriteAccess {
      path: prefixed(&backing.field_name, &w.path),
    }),
    required: source.required,
    header_source: source.header_source,
    serialized_name: source.serialized_name.clone(),
  }
}

/// Accessor for a leaf hoisted out of an inline nested record. Reads and
/// writes vivify missing intermediate records along the path.
pub(crate) fn inlined_property(exposed_name: String, path: Vec<String>, leaf: &FieldSlot) -> VirtualProperty {
  VirtualProperty {
    name: exposed_name,
    property: leaf.property.clone(),
    kind: AccessorKind::Inlined,
    type_ref: leaf.type_ref.clone(),
    read: ReadAccess {
      path: path.clone(),
      lazy_init: true,
    },
    write: (!leaf.read_only).then_some(WriteAccess { path }),
    required: leaf.required,
    header_source: leaf.header_source,
    serialized_name: leaf.serialized_name.clone(),
  }
}

fn prefixed(head: &str, tail: &[String]) -> Vec<String> {
  let mut path = Vec::with_capacity(tail.len() + 1);
  path.push(head.to_string());
  path.extend(tail.iter().cloned());
  path
}
