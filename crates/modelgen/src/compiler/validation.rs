//! Bottom-up aggregation of presence/value checks into one ordered
//! statement sequence per class. Order is the contract: parents in
//! declaration order, then own properties in declaration order, presence
//! before value, so diagnostics and emitted code are reproducible.

use super::descriptor::{FieldSlot, TypeRef, ValidationStep};

#[derive(Debug, Default)]
pub(crate) struct ValidationAggregator {
  steps: Vec<ValidationStep>,
}

impl ValidationAggregator {
  pub(crate) fn new() -> Self {
    Self::default()
  }

  /// Checks for one composed parent instance: presence, then recursive
  /// value validation. Emitted unconditionally; whether a check is vacuous
  /// is the backend's concern, the sequence is the contract.
  pub(crate) fn add_backing(&mut self, field_name: &str) {
    self.steps.push(ValidationStep::BackingPresence {
      field: field_name.to_string(),
    });
    self.steps.push(ValidationStep::BackingValue {
      field: field_name.to_string(),
    });
  }

  /// Checks for one own property: presence if required, recursive value
  /// validation if composite-typed. Required leaves of an inline record
  /// are hoisted directly after their owning property, addressed by
  /// dotted path.
  pub(crate) fn add_property(&mut self, field: &FieldSlot) {
    if field.required {
      self.steps.push(ValidationStep::PropertyPresence {
        field: field.name.clone(),
        property: field.property.clone(),
      });
    }

    match &field.type_ref {
      TypeRef::Model(_) => {
        self.steps.push(ValidationStep::PropertyValue {
          field: field.name.clone(),
          property: field.property.clone(),
        });
      }
      TypeRef::Nested(nested) => {
        self.add_nested_required(&field.name, nested);
      }
      TypeRef::Scalar(_) => {}
    }
  }

  fn add_nested_required(&mut self, prefix: &str, fields: &[FieldSlot]) {
    for field in fields {
      let path = format!("{prefix}.{}", field.name);
      if field.required {
        self.steps.push(ValidationStep::PropertyPresence {
          field: path.clone(),
          property: field.property.clone(),
        });
      }
      match &field.type_ref {
        TypeRef::Model(_) => {
          self.steps.push(ValidationStep::PropertyValue {
            field: path,
            property: field.property.clone(),
          });
        }
        TypeRef::Nested(nested) => self.add_nested_required(&path, nested),
        TypeRef::Scalar(_) => {}
      }
    }
  }

  pub(crate) fn is_empty(&self) -> bool {
    self.steps.is_empty()
  }

  pub(crate) fn into_steps(self) -> Vec<ValidationStep> {
    self.steps
  }
}
