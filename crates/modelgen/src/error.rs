use thiserror::Error;

/// Fatal build failures. None of these are retryable: the build is a
/// one-shot deterministic transform over a fixed input, so retrying
/// without changing the input cannot succeed.
#[derive(Debug, Error)]
pub enum BuildError {
  /// A referenced schema is absent from the source graph.
  #[error("schema '{schema}' referenced from '{referenced_from}' is not defined in the source graph")]
  SchemaNotFound { schema: String, referenced_from: String },

  /// Deterministic member renaming ran out of numeric suffixes. This
  /// guards against pathological or adversarial schemas, not a normal
  /// code path.
  #[error("no free member name for '{base}' in '{schema}' after {attempts} attempts")]
  NameCollisionExhausted {
    schema: String,
    base: String,
    attempts: usize,
  },

  /// The ancestor chain of a schema does not terminate. The schema graph
  /// must form a DAG along composed-parent edges.
  #[error("ancestor chain of '{schema}' does not terminate ({chain})")]
  CyclicAncestry { schema: String, chain: String },
}
