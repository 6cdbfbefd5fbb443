//! Error type surfaced by tag-expression parsing.

use thiserror::Error;

/// Errors raised while parsing a tag expression.
///
/// The `Display` output is the human-readable message, so callers can forward
/// it directly to users.
///
/// # Examples
/// ```
/// use tag_expressions::{TagExpressionError, parse};
/// let Err(err) = parse("a and b)") else {
///     panic!("expected an unbalanced parenthesis error");
/// };
/// assert_eq!(err, TagExpressionError::UnclosedOpen);
/// assert_eq!(err.to_string(), "Unclosed (");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TagExpressionError {
    /// A `)` was found without a matching `(` before it.
    #[error("Unclosed (")]
    UnclosedOpen,
    /// A `(` was never closed.
    #[error("Unclosed )")]
    UnclosedClose,
    /// More than one unconnected expression remained, e.g. `a b`.
    #[error("Not empty")]
    NotEmpty,
    /// The input contained no literal at all.
    #[error("Empty expression")]
    Empty,
    /// An operator had fewer operands than it needs, e.g. `a and`.
    #[error("Missing operand for '{operator}'")]
    MissingOperand {
        /// Keyword of the operator that could not be reduced.
        operator: &'static str,
    },
}
