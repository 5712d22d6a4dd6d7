//! Errors raised by the core model types.

use thiserror::Error;

/// A string did not name any variant of a model enum.
///
/// Returned by the [`FromStr`](std::str::FromStr) implementations of the
/// enums in [`semantic`](crate::semantic), so CLI arguments and config files
/// report the same message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported {kind} `{value}` (expected one of: {expected})")]
pub struct UnknownVariant {
    kind: &'static str,
    value: String,
    expected: String,
}

impl UnknownVariant {
    /// Create a new error for `value`, listing the accepted spellings.
    pub fn new(kind: &'static str, value: &str, expected: &[&str]) -> Self {
        Self {
            kind,
            value: value.to_string(),
            expected: expected.join(", "),
        }
    }

    /// The rejected input.
    pub fn value(&self) -> &str {
        &self.value
    }
}
