use std::collections::BTreeSet;

use crate::naming::identifiers::{
  RENAME_ATTEMPT_LIMIT, sanitize, to_member_name, to_type_name, unique_member_name,
};

#[test]
fn sanitize_strips_invalid_characters() {
  assert_eq!(sanitize("pet.store/v2"), "pet_store_v2");
  assert_eq!(sanitize("__wrapped__"), "wrapped");
  assert_eq!(sanitize("a--b"), "a_b");
  assert_eq!(sanitize(""), "");
}

#[test]
fn sanitize_transliterates_to_ascii() {
  assert_eq!(sanitize("café"), "cafe");
  assert_eq!(sanitize("größe"), "grosse");
}

#[test]
fn type_names_are_pascal_case() {
  assert_eq!(to_type_name("pet_store"), "PetStore");
  assert_eq!(to_type_name("pet.store"), "PetStore");
  assert_eq!(to_type_name("dog"), "Dog");
}

#[test]
fn type_names_never_start_with_a_digit() {
  assert_eq!(to_type_name("404_error"), "N404Error");
}

#[test]
fn empty_type_name_gets_a_fallback() {
  assert_eq!(to_type_name("!!!"), "Unnamed");
}

#[test]
fn member_names_are_snake_case() {
  assert_eq!(to_member_name("barkDecibels"), "bark_decibels");
  assert_eq!(to_member_name("serialized-name"), "serialized_name");
}

#[test]
fn member_names_avoid_keywords() {
  assert_eq!(to_member_name("type"), "type_");
  assert_eq!(to_member_name("self"), "self_");
  assert_eq!(to_member_name("match"), "match_");
}

#[test]
fn member_names_never_start_with_a_digit() {
  assert_eq!(to_member_name("2nd"), "_2nd");
}

#[test]
fn unique_member_name_appends_smallest_free_suffix() {
  let mut used = BTreeSet::new();
  assert_eq!(unique_member_name("base", &used), Some("base".to_string()));

  used.insert("base".to_string());
  assert_eq!(unique_member_name("base", &used), Some("base0".to_string()));

  used.insert("base0".to_string());
  assert_eq!(unique_member_name("base", &used), Some("base1".to_string()));
}

#[test]
fn unique_member_name_reuses_gaps() {
  let used: BTreeSet<String> = ["base", "base1"].into_iter().map(str::to_string).collect();
  assert_eq!(unique_member_name("base", &used), Some("base0".to_string()));
}

#[test]
fn unique_member_name_exhausts_after_the_bound() {
  let mut used = BTreeSet::new();
  used.insert("base".to_string());
  for i in 0..RENAME_ATTEMPT_LIMIT {
    used.insert(format!("base{i}"));
  }
  assert_eq!(unique_member_name("base", &used), None);
}
