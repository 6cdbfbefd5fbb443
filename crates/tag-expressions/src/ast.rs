//! Expression tree and evaluation for parsed tag expressions.
//!
//! A tree is built once by the parser and never mutated afterwards. Each node
//! owns its children, so trees can be cloned, sent across threads, and dropped
//! without any bookkeeping.
//!
//! Every walk over the tree (evaluation, rendering, literal collection,
//! cloning, comparison, and drop) uses an explicit work stack, so a tree of
//! any depth the parser accepts is handled without growing the call stack.
//! Evaluation tests literals for membership in the observed tag set. `and` and
//! `or` short-circuit, so the right operand is skipped once the outcome is
//! known.

use std::collections::HashSet;
use std::fmt;
use std::mem;
use std::str::FromStr;

use crate::errors::TagExpressionError;

/// Parsed tag expression.
///
/// # Examples
/// ```
/// use tag_expressions::Expression;
/// let expr = Expression::or(
///     Expression::literal("fast"),
///     Expression::negate(Expression::literal("wip")),
/// );
/// assert_eq!(expr.render(), "( fast or not ( wip ) )");
/// assert!(expr.evaluate(["fast", "wip"]));
/// assert!(!expr.evaluate(["wip"]));
/// ```
pub enum Expression {
    /// True when the value is one of the observed tags.
    Literal(String),
    /// True when both operands are true.
    And(Box<Expression>, Box<Expression>),
    /// True when either operand is true.
    Or(Box<Expression>, Box<Expression>),
    /// True when the operand is false.
    Not(Box<Expression>),
}

enum EvalStep<'a> {
    Visit(&'a Expression),
    AndThen(&'a Expression),
    OrThen(&'a Expression),
    Negate,
}

enum RenderStep<'a> {
    Visit(&'a Expression),
    Text(&'static str),
}

enum CloneStep<'a> {
    Visit(&'a Expression),
    And,
    Or,
    Not,
}

impl Expression {
    /// Build a literal node.
    #[must_use]
    pub fn literal(value: impl Into<String>) -> Self {
        Self::Literal(value.into())
    }

    /// Build an `and` node from its left and right operands.
    #[must_use]
    pub fn and(left: Self, right: Self) -> Self {
        Self::And(Box::new(left), Box::new(right))
    }

    /// Build an `or` node from its left and right operands.
    #[must_use]
    pub fn or(left: Self, right: Self) -> Self {
        Self::Or(Box::new(left), Box::new(right))
    }

    /// Build a `not` node wrapping `inner`.
    #[must_use]
    pub fn negate(inner: Self) -> Self {
        Self::Not(Box::new(inner))
    }

    /// Evaluate the expression against the observed tag values.
    ///
    /// Accepts borrowed or owned values, e.g. `["a", "b"]`, a `Vec<String>`,
    /// or `&HashSet<String>`. Literals missing from `values` evaluate to
    /// `false`; evaluation itself never fails.
    ///
    /// # Examples
    /// ```
    /// use std::collections::HashSet;
    /// use tag_expressions::parse;
    /// # fn main() -> Result<(), tag_expressions::TagExpressionError> {
    /// let expr = parse("a and b")?;
    /// assert!(expr.evaluate(["b", "a"]));
    /// assert!(!expr.evaluate(["a"]));
    ///
    /// let owned: HashSet<String> = ["a".to_string(), "b".to_string()].into();
    /// assert!(expr.evaluate(&owned));
    /// # Ok(())
    /// # }
    /// ```
    #[must_use]
    pub fn evaluate<I>(&self, values: I) -> bool
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let items: Vec<I::Item> = values.into_iter().collect();
        let set: HashSet<&str> = items.iter().map(AsRef::<str>::as_ref).collect();
        self.matches(&set)
    }

    /// Evaluate the expression against an already collected tag set.
    #[must_use]
    pub fn matches(&self, values: &HashSet<&str>) -> bool {
        let mut work = vec![EvalStep::Visit(self)];
        let mut result = false;
        while let Some(step) = work.pop() {
            match step {
                EvalStep::Visit(Self::Literal(value)) => result = values.contains(value.as_str()),
                EvalStep::Visit(Self::And(left, right)) => {
                    work.push(EvalStep::AndThen(right));
                    work.push(EvalStep::Visit(left));
                }
                EvalStep::Visit(Self::Or(left, right)) => {
                    work.push(EvalStep::OrThen(right));
                    work.push(EvalStep::Visit(left));
                }
                EvalStep::Visit(Self::Not(inner)) => {
                    work.push(EvalStep::Negate);
                    work.push(EvalStep::Visit(inner));
                }
                // `result` holds the left operand's value here.
                EvalStep::AndThen(right) if result => work.push(EvalStep::Visit(right)),
                EvalStep::OrThen(right) if !result => work.push(EvalStep::Visit(right)),
                EvalStep::AndThen(_) | EvalStep::OrThen(_) => {}
                EvalStep::Negate => result = !result,
            }
        }
        result
    }

    /// Render the canonical, fully parenthesised form of the expression.
    ///
    /// Re-parsing the rendered string yields an equivalent expression.
    #[must_use]
    pub fn render(&self) -> String {
        self.to_string()
    }

    /// Literal values referenced by the expression, in source order.
    ///
    /// Repeated literals are listed once per occurrence.
    #[must_use]
    pub fn literals(&self) -> Vec<&str> {
        let mut out = Vec::new();
        let mut work = vec![self];
        while let Some(node) = work.pop() {
            match node {
                Self::Literal(value) => out.push(value.as_str()),
                Self::And(left, right) | Self::Or(left, right) => {
                    work.push(right);
                    work.push(left);
                }
                Self::Not(inner) => work.push(inner),
            }
        }
        out
    }

    /// Move the children of `self` onto `pending`, leaving empty literals.
    fn detach_children(&mut self, pending: &mut Vec<Self>) {
        match self {
            Self::Literal(_) => {}
            Self::And(left, right) | Self::Or(left, right) => {
                pending.push(mem::replace(&mut **left, Self::Literal(String::new())));
                pending.push(mem::replace(&mut **right, Self::Literal(String::new())));
            }
            Self::Not(inner) => {
                pending.push(mem::replace(&mut **inner, Self::Literal(String::new())));
            }
        }
    }
}

impl Drop for Expression {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.detach_children(&mut pending);
        while let Some(mut node) = pending.pop() {
            node.detach_children(&mut pending);
        }
    }
}

impl Clone for Expression {
    fn clone(&self) -> Self {
        let mut work = vec![CloneStep::Visit(self)];
        let mut built: Vec<Self> = Vec::new();
        while let Some(step) = work.pop() {
            match step {
                CloneStep::Visit(Self::Literal(value)) => built.push(Self::Literal(value.clone())),
                CloneStep::Visit(Self::And(left, right)) => {
                    work.extend([CloneStep::And, CloneStep::Visit(right), CloneStep::Visit(left)]);
                }
                CloneStep::Visit(Self::Or(left, right)) => {
                    work.extend([CloneStep::Or, CloneStep::Visit(right), CloneStep::Visit(left)]);
                }
                CloneStep::Visit(Self::Not(inner)) => {
                    work.extend([CloneStep::Not, CloneStep::Visit(inner)]);
                }
                CloneStep::And => {
                    let (left, right) = pop_operands(&mut built);
                    built.push(Self::and(left, right));
                }
                CloneStep::Or => {
                    let (left, right) = pop_operands(&mut built);
                    built.push(Self::or(left, right));
                }
                CloneStep::Not => {
                    let Some(inner) = built.pop() else {
                        unreachable!("negation visited its operand");
                    };
                    built.push(Self::negate(inner));
                }
            }
        }
        built.pop().unwrap_or_else(|| unreachable!("clone produced a root"))
    }
}

fn pop_operands(built: &mut Vec<Expression>) -> (Expression, Expression) {
    let (Some(right), Some(left)) = (built.pop(), built.pop()) else {
        unreachable!("binary node visited both operands");
    };
    (left, right)
}

impl PartialEq for Expression {
    fn eq(&self, other: &Self) -> bool {
        let mut pending = vec![(self, other)];
        while let Some(pair) = pending.pop() {
            match pair {
                (Self::Literal(a), Self::Literal(b)) => {
                    if a != b {
                        return false;
                    }
                }
                (Self::And(a_left, a_right), Self::And(b_left, b_right))
                | (Self::Or(a_left, a_right), Self::Or(b_left, b_right)) => {
                    pending.push((&**a_right, &**b_right));
                    pending.push((&**a_left, &**b_left));
                }
                (Self::Not(a), Self::Not(b)) => pending.push((&**a, &**b)),
                _ => return false,
            }
        }
        true
    }
}

impl Eq for Expression {}

/// Formats as `Expression(<canonical form>)`.
impl fmt::Debug for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Expression")
            .field(&format_args!("{self}"))
            .finish()
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut work = vec![RenderStep::Visit(self)];
        while let Some(step) = work.pop() {
            match step {
                RenderStep::Text(text) => f.write_str(text)?,
                RenderStep::Visit(Self::Literal(value)) => f.write_str(value)?,
                RenderStep::Visit(Self::And(left, right)) => {
                    f.write_str("( ")?;
                    work.extend([
                        RenderStep::Text(" )"),
                        RenderStep::Visit(right),
                        RenderStep::Text(" and "),
                        RenderStep::Visit(left),
                    ]);
                }
                RenderStep::Visit(Self::Or(left, right)) => {
                    f.write_str("( ")?;
                    work.extend([
                        RenderStep::Text(" )"),
                        RenderStep::Visit(right),
                        RenderStep::Text(" or "),
                        RenderStep::Visit(left),
                    ]);
                }
                RenderStep::Visit(Self::Not(inner)) => {
                    f.write_str("not ( ")?;
                    work.extend([RenderStep::Text(" )"), RenderStep::Visit(inner)]);
                }
            }
        }
        Ok(())
    }
}

impl FromStr for Expression {
    type Err = TagExpressionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::parser::parse(s)
    }
}
