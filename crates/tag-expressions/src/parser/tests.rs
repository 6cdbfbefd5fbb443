//! Coverage for shunting-yard parsing, rendering, and parse errors.
//!
//! Exercises operator precedence and associativity, complex literals, and the
//! malformed inputs the parser must reject instead of underflowing its stacks.

use rstest::rstest;

use super::parse;
use crate::ast::Expression;
use crate::errors::TagExpressionError;

fn parse_expression(input: &str) -> Expression {
    parse(input).unwrap_or_else(|err| panic!("parse expression `{input}`: {err}"))
}

fn parse_error(input: &str) -> TagExpressionError {
    match parse(input) {
        Ok(expr) => panic!("expected parse error for `{input}`, got {expr:?}"),
        Err(err) => err,
    }
}

#[rstest]
#[case("a and b", "( a and b )")]
#[case("a or b", "( a or b )")]
#[case("not a", "not ( a )")]
#[case("( a and b ) or ( c and d )", "( ( a and b ) or ( c and d ) )")]
#[case(
    "not a or b and not c or not d or e and f",
    "( ( ( not ( a ) or ( b and not ( c ) ) ) or not ( d ) ) or ( e and f ) )"
)]
#[case("(a and b)or (c)", "( ( a and b ) or c )")]
fn renders_canonical_form(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(parse_expression(input).render(), expected);
}

#[test]
fn and_binds_tighter_than_or() {
    assert_eq!(
        parse_expression("a or b and c"),
        Expression::or(
            Expression::literal("a"),
            Expression::and(Expression::literal("b"), Expression::literal("c")),
        )
    );
}

#[test]
fn binary_operators_associate_left() {
    assert_eq!(parse_expression("a and b and c").render(), "( ( a and b ) and c )");
    assert_eq!(parse_expression("a or b or c").render(), "( ( a or b ) or c )");
}

#[test]
fn not_associates_right() {
    assert_eq!(parse_expression("not not a").render(), "not ( not ( a ) )");
}

#[test]
fn parentheses_override_precedence() {
    assert_eq!(parse_expression("(a or b) and c").render(), "( ( a or b ) and c )");
    assert_eq!(parse_expression("not (a or b)").render(), "not ( ( a or b ) )");
}

#[test]
fn complex_literals_are_single_literals() {
    let expr = parse_expression("sometag(someValue,y) or b(x)");
    assert_eq!(expr.render(), "( sometag(someValue,y) or b(x) )");
    assert_eq!(expr.literals(), vec!["sometag(someValue,y)", "b(x)"]);
}

#[test]
fn repeated_complex_literal_restores_each_occurrence() {
    let expr = parse_expression("author(a,b) and not author(a,b)");
    assert_eq!(expr.literals(), vec!["author(a,b)", "author(a,b)"]);
    assert!(!expr.evaluate(["author(a,b)"]));
}

#[rstest]
#[case("(a and b", TagExpressionError::UnclosedClose)]
#[case("((a)", TagExpressionError::UnclosedClose)]
#[case("a and b)", TagExpressionError::UnclosedOpen)]
#[case(")", TagExpressionError::UnclosedOpen)]
#[case("a b", TagExpressionError::NotEmpty)]
#[case("(a) (b)", TagExpressionError::NotEmpty)]
#[case("a not b", TagExpressionError::NotEmpty)]
#[case("", TagExpressionError::Empty)]
#[case("   ", TagExpressionError::Empty)]
#[case("()", TagExpressionError::Empty)]
#[case("and", TagExpressionError::MissingOperand { operator: "and" })]
#[case("a and", TagExpressionError::MissingOperand { operator: "and" })]
#[case("or b", TagExpressionError::MissingOperand { operator: "or" })]
#[case("not", TagExpressionError::MissingOperand { operator: "not" })]
#[case("(not)", TagExpressionError::MissingOperand { operator: "not" })]
#[case("a and (not)", TagExpressionError::MissingOperand { operator: "and" })]
fn reports_parse_errors(#[case] input: &str, #[case] expected: TagExpressionError) {
    assert_eq!(parse_error(input), expected);
}

#[test]
fn error_messages_name_the_problem() {
    assert_eq!(parse_error("(a and b").to_string(), "Unclosed )");
    assert_eq!(parse_error("a and b)").to_string(), "Unclosed (");
    assert_eq!(parse_error("a b").to_string(), "Not empty");
}

#[test]
fn accepts_long_flat_disjunction() {
    let input = vec!["a"; 2100].join(" or ");
    let expr = parse_expression(&input);
    assert_eq!(expr.literals().len(), 2100);
    assert!(expr.evaluate(["a"]));
    assert!(!expr.evaluate(["b"]));
}

#[test]
fn complex_literal_is_one_literal_among_many() {
    let expr = parse_expression("tag(a,b,c,d,e) and not x");
    assert_eq!(expr.literals(), vec!["tag(a,b,c,d,e)", "x"]);
}

#[test]
fn keyword_glued_to_parenthesis_is_a_literal() {
    assert_eq!(parse_expression("not(a)"), Expression::literal("not(a)"));
}

#[test]
fn from_str_delegates_to_parse() {
    let Ok(expr) = "not a".parse::<Expression>() else {
        panic!("`not a` should parse");
    };
    assert_eq!(expr, Expression::negate(Expression::literal("a")));
    assert!("a b".parse::<Expression>().is_err());
}
