//! Identity-keyed descriptor storage. The arena is the memoization table
//! of the resolver: one slot per distinct schema identity, created once
//! and then mutated in place through its stable index handle.

use std::collections::BTreeMap;

use serde::{Serialize, Serializer, ser::SerializeSeq};

use super::descriptor::{DescriptorId, ModelDescriptor};

#[derive(Debug, Default)]
pub struct DescriptorArena {
  descriptors: Vec<ModelDescriptor>,
  index: BTreeMap<String, DescriptorId>,
}

impl DescriptorArena {
  pub fn new() -> Self {
    Self::default()
  }

  /// Returns the slot for a schema identity, creating a placeholder on
  /// first sight. Subsequent calls for the same identity return the same
  /// handle.
  pub(crate) fn intern(&mut self, schema_name: &str, class_name: String) -> DescriptorId {
    if let Some(id) = self.index.get(schema_name) {
      return *id;
    }

    let id = DescriptorId(self.descriptors.len());
    self.descriptors.push(ModelDescriptor::placeholder(schema_name, class_name));
    self.index.insert(schema_name.to_string(), id);
    id
  }

  pub fn lookup(&self, schema_name: &str) -> Option<DescriptorId> {
    self.index.get(schema_name).copied()
  }

  pub fn get(&self, id: DescriptorId) -> &ModelDescriptor {
    &self.descriptors[id.0]
  }

  pub(crate) fn get_mut(&mut self, id: DescriptorId) -> &mut ModelDescriptor {
    &mut self.descriptors[id.0]
  }

  pub fn descriptor(&self, schema_name: &str) -> Option<&ModelDescriptor> {
    self.lookup(schema_name).map(|id| self.get(id))
  }

  pub fn iter(&self) -> impl Iterator<Item = (DescriptorId, &ModelDescriptor)> {
    self.descriptors.iter().enumerate().map(|(i, d)| (DescriptorId(i), d))
  }

  pub fn len(&self) -> usize {
    self.descriptors.len()
  }

  #[allow(unused)]
  pub fn is_empty(&self) -> bool {
    self.descriptors.is_empty()
  }
}

impl Serialize for DescriptorArena {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    let mut seq = serializer.serialize_seq(Some(self.descriptors.len()))?;
    for descriptor in &self.descriptors {
      seq.serialize_element(descriptor)?;
    }
    seq.end()
  }
}
