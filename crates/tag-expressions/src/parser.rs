//! Operator-precedence parser building [`Expression`] trees from tokens.
//!
//! The parser runs the two-stack shunting-yard algorithm: one stack holds
//! pending operators and `(` markers, the other holds expressions awaiting
//! combination. Reducing an operator pops its operands and pushes the combined
//! node back. `not` binds tighter than `and`, which binds tighter than `or`;
//! `and` and `or` associate to the left and `not` to the right.

use crate::ast::Expression;
use crate::errors::TagExpressionError;
use crate::lexer::{Operator, Token, tokenize};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Associativity {
    Left,
    Right,
}

impl Operator {
    fn precedence(self) -> u8 {
        match self {
            Self::Or => 0,
            Self::And => 1,
            Self::Not => 2,
        }
    }

    fn associativity(self) -> Associativity {
        match self {
            Self::And | Self::Or => Associativity::Left,
            Self::Not => Associativity::Right,
        }
    }

    /// Whether `top` must be reduced before `self` is pushed over it.
    fn yields_to(self, top: Self) -> bool {
        match self.associativity() {
            Associativity::Left => self.precedence() <= top.precedence(),
            Associativity::Right => self.precedence() < top.precedence(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum StackEntry {
    Operator(Operator),
    Open,
}

#[derive(Debug, Default)]
struct Parser {
    operators: Vec<StackEntry>,
    expressions: Vec<Expression>,
}

impl Parser {
    fn feed(&mut self, token: Token) -> Result<(), TagExpressionError> {
        match token {
            Token::Operator(op) => self.push_operator(op),
            Token::Open => {
                self.operators.push(StackEntry::Open);
                Ok(())
            }
            Token::Close => self.close_group(),
            Token::Literal(value) => {
                self.expressions.push(Expression::Literal(value));
                Ok(())
            }
        }
    }

    fn push_operator(&mut self, op: Operator) -> Result<(), TagExpressionError> {
        while let Some(&StackEntry::Operator(top)) = self.operators.last() {
            if !op.yields_to(top) {
                break;
            }
            self.operators.pop();
            self.reduce(top)?;
        }
        self.operators.push(StackEntry::Operator(op));
        Ok(())
    }

    fn close_group(&mut self) -> Result<(), TagExpressionError> {
        loop {
            match self.operators.pop() {
                None => return Err(TagExpressionError::UnclosedOpen),
                Some(StackEntry::Open) => return Ok(()),
                Some(StackEntry::Operator(op)) => self.reduce(op)?,
            }
        }
    }

    fn reduce(&mut self, op: Operator) -> Result<(), TagExpressionError> {
        let node = match op {
            Operator::And => {
                let (left, right) = self.pop_pair(op)?;
                Expression::and(left, right)
            }
            Operator::Or => {
                let (left, right) = self.pop_pair(op)?;
                Expression::or(left, right)
            }
            Operator::Not => Expression::negate(self.pop_operand(op)?),
        };
        self.expressions.push(node);
        Ok(())
    }

    fn pop_operand(&mut self, op: Operator) -> Result<Expression, TagExpressionError> {
        self.expressions
            .pop()
            .ok_or_else(|| TagExpressionError::MissingOperand {
                operator: op.keyword(),
            })
    }

    fn pop_pair(&mut self, op: Operator) -> Result<(Expression, Expression), TagExpressionError> {
        let right = self.pop_operand(op)?;
        let left = self.pop_operand(op)?;
        Ok((left, right))
    }

    fn finish(mut self) -> Result<Expression, TagExpressionError> {
        while let Some(entry) = self.operators.pop() {
            match entry {
                StackEntry::Open => return Err(TagExpressionError::UnclosedClose),
                StackEntry::Operator(op) => self.reduce(op)?,
            }
        }
        let root = self.expressions.pop().ok_or(TagExpressionError::Empty)?;
        if self.expressions.is_empty() {
            Ok(root)
        } else {
            Err(TagExpressionError::NotEmpty)
        }
    }
}

/// Parse an infix tag expression into an [`Expression`] tree.
///
/// Literals are any whitespace-separated words other than `and`, `or` and
/// `not`. Complex literals such as `author(alice,bob)` are kept whole.
///
/// # Errors
/// Returns [`TagExpressionError`] when parentheses are unbalanced, an operator
/// lacks an operand, literals are left unconnected, or the input is empty.
/// Nesting depth and length are bounded only by memory.
///
/// # Examples
/// ```
/// use tag_expressions::parse;
/// # fn main() -> Result<(), tag_expressions::TagExpressionError> {
/// let expr = parse("not a or b and c")?;
/// assert_eq!(expr.render(), "( not ( a ) or ( b and c ) )");
/// # Ok(())
/// # }
/// ```
pub fn parse(infix: &str) -> Result<Expression, TagExpressionError> {
    let mut parser = Parser::default();
    for token in tokenize(infix) {
        parser.feed(token).inspect_err(|err| log_failure(infix, err))?;
    }
    parser.finish().inspect_err(|err| log_failure(infix, err))
}

fn log_failure(infix: &str, err: &TagExpressionError) {
    log::debug!("failed to parse tag expression '{infix}': {err}");
}

/// Parse `infix` and evaluate it against `values` in one step.
///
/// # Errors
/// Fails exactly when [`parse`] fails.
///
/// # Examples
/// ```
/// # fn main() -> Result<(), tag_expressions::TagExpressionError> {
/// assert!(tag_expressions::evaluate("sometag(someValue,y) or b(x)", ["b(x)"])?);
/// assert!(!tag_expressions::evaluate("a and b", ["a"])?);
/// # Ok(())
/// # }
/// ```
pub fn evaluate<I>(infix: &str, values: I) -> Result<bool, TagExpressionError>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    Ok(parse(infix)?.evaluate(values))
}

#[cfg(test)]
mod tests;
