use std::{
  collections::{BTreeSet, HashSet},
  sync::LazyLock,
};

use any_ascii::any_ascii;
use inflections::Inflect;
use regex::Regex;

/// Upper bound on numeric-suffix attempts when deduplicating member names.
/// Exhausting it indicates a pathological schema and is fatal upstream.
pub(crate) const RENAME_ATTEMPT_LIMIT: usize = 64;

pub(crate) static FORBIDDEN_IDENTIFIERS: LazyLock<HashSet<&str>> = LazyLock::new(|| {
  [
    "as", "break", "const", "continue", "crate", "else", "enum", "extern", "false", "fn", "for", "if", "impl", "in",
    "let", "loop", "match", "mod", "move", "mut", "pub", "ref", "return", "static", "struct", "super", "trait", "true",
    "type", "unsafe", "use", "where", "while", "async", "await", "dyn", "try", "abstract", "become", "box", "do",
    "final", "macro", "override", "priv", "typeof", "unsized", "virtual", "yield", "gen", "self", "Self",
  ]
  .into_iter()
  .collect()
});

static INVALID_CHARS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_]+").unwrap());
static MULTI_UNDERSCORE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"_+").unwrap());

/// Base sanitization shared by type and member naming: transliterates to
/// ASCII, replaces invalid characters with underscores, collapses runs of
/// underscores, and trims leading/trailing underscores.
pub(crate) fn sanitize(input: &str) -> String {
  if input.is_empty() {
    return String::new();
  }

  let ascii = any_ascii(input);
  let replaced = INVALID_CHARS_RE.replace_all(&ascii, "_");
  let collapsed = MULTI_UNDERSCORE_RE.replace_all(&replaced, "_");

  collapsed.trim_matches('_').to_string()
}

/// Converts a schema identity into a class name (`PascalCase`).
pub(crate) fn to_type_name(name: &str) -> String {
  let ident = sanitize(name).to_pascal_case();

  if ident.is_empty() {
    return "Unnamed".to_string();
  }

  if ident.starts_with(|c: char| c.is_ascii_digit()) {
    return format!("N{ident}");
  }

  ident
}

/// Converts a property or schema name into a member name (`snake_case`).
///
/// Keywords get a trailing underscore rather than a raw-identifier prefix
/// so the result stays usable as a path segment in access expressions.
pub(crate) fn to_member_name(name: &str) -> String {
  let ident = sanitize(name).to_snake_case();

  if ident.is_empty() {
    return "member".to_string();
  }

  if ident.starts_with(|c: char| c.is_ascii_digit()) {
    return format!("_{ident}");
  }

  if FORBIDDEN_IDENTIFIERS.contains(ident.as_str()) {
    return format!("{ident}_");
  }

  ident
}

/// Finds a free member name by appending the smallest available numeric
/// suffix (`base`, `base0`, `base1`, ...). Returns `None` once the attempt
/// bound is exceeded; the caller treats that as fatal.
pub(crate) fn unique_member_name(base: &str, used: &BTreeSet<String>) -> Option<String> {
  if !used.contains(base) {
    return Some(base.to_string());
  }

  for i in 0..RENAME_ATTEMPT_LIMIT {
    let candidate = format!("{base}{i}");
    if !used.contains(&candidate) {
      return Some(candidate);
    }
  }

  None
}
