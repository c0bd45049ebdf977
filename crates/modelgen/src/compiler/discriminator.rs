//! Discriminator registration as explicit message passing: a build
//! produces at most one registration event, and the builder delivers it to
//! every polymorphic ancestor reachable over composed-parent handles.
//! Ownership stays directed (subject -> builder -> ancestors); descriptors
//! hold no live back-pointers into each other.

use std::collections::{BTreeSet, VecDeque};

use string_cache::DefaultAtom;

use super::{arena::DescriptorArena, descriptor::DescriptorId};
use crate::error::BuildError;

/// Event emitted by a schema that declares a discriminator literal.
#[derive(Debug, Clone)]
pub(crate) struct DiscriminatorRegistration {
  pub literal: DefaultAtom,
  pub subject: DescriptorId,
}

/// Outcome of one delivery, for stats and diagnostics.
#[derive(Debug, Default)]
pub(crate) struct DeliveryReport {
  pub entries_added: usize,
  pub warnings: Vec<String>,
}

/// Walks the subject's polymorphic ancestors as a work queue and inserts
/// `literal -> subject` into each map, forwarding transitively until every
/// ancestor list is exhausted. Diamond ancestry is deduplicated by the
/// visited set; the first registration of a literal wins and a conflicting
/// later one is reported, not applied. Reaching the subject inside its own
/// ancestor closure means the chain does not terminate and is fatal.
pub(crate) fn deliver(
  arena: &mut DescriptorArena,
  registration: &DiscriminatorRegistration,
) -> Result<DeliveryReport, BuildError> {
  let mut report = DeliveryReport::default();
  let mut visited: BTreeSet<DescriptorId> = BTreeSet::new();
  let mut queue: VecDeque<DescriptorId> = arena
    .get(registration.subject)
    .polymorphic_parents
    .iter()
    .copied()
    .collect();

  while let Some(ancestor_id) = queue.pop_front() {
    if ancestor_id == registration.subject {
      let subject = arena.get(registration.subject);
      return Err(BuildError::CyclicAncestry {
        schema: subject.schema_name.clone(),
        chain: format!("'{}' is its own polymorphic ancestor", subject.schema_name),
      });
    }

    if !visited.insert(ancestor_id) {
      continue;
    }

    let subject_name = arena.get(registration.subject).schema_name.clone();
    let ancestor = arena.get_mut(ancestor_id);
    let literal = registration.literal.to_string();

    match ancestor.discriminator_map.get(&literal) {
      None => {
        ancestor.discriminator_map.insert(literal, registration.subject);
        report.entries_added += 1;
      }
      Some(existing) if *existing != registration.subject => {
        report.warnings.push(format!(
          "discriminator literal '{}' on '{}' already maps to a different model; registration from '{}' ignored",
          registration.literal, ancestor.schema_name, subject_name,
        ));
      }
      Some(_) => {}
    }

    let forward: Vec<DescriptorId> = arena.get(ancestor_id).polymorphic_parents.clone();
    queue.extend(forward);
  }

  Ok(report)
}
