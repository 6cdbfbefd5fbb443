//! Parse and evaluate boolean tag expressions.
//!
//! A tag expression combines literal tags with `and`, `or`, `not`, and
//! parentheses, for example `smoke and (linux or not slow)`. Literals may also
//! be complex literals written as `name(arg,...)`, such as `author(alice)`;
//! these are opaque text matched verbatim, never decomposed.
//!
//! [`parse`] builds an immutable [`Expression`] tree which can be evaluated
//! any number of times against a set of observed tags. [`evaluate`] combines
//! both steps.
//!
//! ```
//! # fn main() -> Result<(), tag_expressions::TagExpressionError> {
//! let expr = tag_expressions::parse("(a and b) or (c and d)")?;
//! assert!(expr.evaluate(["c", "d"]));
//! assert!(!expr.evaluate(["a", "c"]));
//! assert_eq!(expr.to_string(), "( ( a and b ) or ( c and d ) )");
//! # Ok(())
//! # }
//! ```

mod ast;
mod errors;
mod lexer;
mod parser;

pub use ast::Expression;
pub use errors::TagExpressionError;
pub use parser::{evaluate, parse};
