//! Deterministic id generation
//!
//! Expanded rest segments and rotation groups need fresh ids. Callers inject
//! the generator so the same input always produces the same ids.

/// Source of fresh ids, keyed by a prefix ("rest", "group", ...)
pub trait IdGenerator {
  fn next_id(&mut self, prefix: &str) -> String;
}

/// Monotonic counter: `{prefix}-1`, `{prefix}-2`, ...
///
/// One counter per generator, shared across prefixes.
#[derive(Debug, Clone, Default)]
pub struct SequentialIds {
  counter: u64,
}

impl SequentialIds {
  pub fn new() -> Self {
    Self::default()
  }

  /// Start counting after `start`
  pub fn starting_at(start: u64) -> Self {
    Self { counter: start }
  }
}

impl IdGenerator for SequentialIds {
  fn next_id(&mut self, prefix: &str) -> String {
    self.counter += 1;
    format!("{}-{}", prefix, self.counter)
  }
}

/// Caller-supplied id factory
pub struct IdFactory<F>(pub F);

impl<F> IdGenerator for IdFactory<F>
where
  F: FnMut(&str) -> String,
{
  fn next_id(&mut self, prefix: &str) -> String {
    (self.0)(prefix)
  }
}
