use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Zero};
use once_cell::sync::Lazy;
use pest::error::LineColLocation;
use pest::iterators::{Pair, Pairs};
use pest::pratt_parser::{Assoc, Op, PrattParser};
use pest::Parser;
use pest_derive::Parser;

use crate::error::Error;
use crate::expression::{Comparison, Expression, Relation};
use crate::normalize::normalize;

#[derive(Parser)]
#[grammar = "grammar.pest"] // relative to project `src`
struct ExpressionParser;

pub type ParseError = pest::error::Error<Rule>;

impl Expression {
    /// Parse one side of an inequality. The input must already be in the
    /// canonical syntax produced by [`normalize`].
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let mut pairs = ExpressionParser::parse(Rule::side, input)?;
        match pairs.next() {
            Some(pair) if pair.as_rule() == Rule::expression => Ok(climb(pair.into_inner())),
            other => unreachable!("`side` starts with an expression, got {other:?}"),
        }
    }
}

impl Relation {
    /// Parse an inequality such as `x^2 - 5*x + 6 >= 0`.
    ///
    /// The operator is the first of `<=`, `>=`, `<`, `>` (in that order) that
    /// occurs anywhere in the normalized line; the line is split at its first
    /// occurrence.
    pub fn parse(line: &str) -> Result<Self, Error> {
        let normalized = normalize(line);
        let Some(op) = Comparison::SCAN_ORDER
            .into_iter()
            .find(|op| normalized.contains(op.symbol()))
        else {
            return Err(Error::syntax(line, "no inequality operator"));
        };
        let (lhs, rhs) = normalized
            .split_once(op.symbol())
            .unwrap_or((normalized.as_str(), ""));
        let parse_side = |name: &str, side: &str| {
            Expression::parse(side.trim()).map_err(|e| Error::syntax(line, short_reason(name, &e)))
        };
        Ok(Self {
            lhs: parse_side("left", lhs)?,
            op,
            rhs: parse_side("right", rhs)?,
        })
    }
}

/// Position and expected tokens only; pest's rendering repeats the input.
fn short_reason(side: &str, error: &ParseError) -> String {
    let column = match error.line_col {
        LineColLocation::Pos((_, column)) | LineColLocation::Span((_, column), _) => column,
    };
    format!("{side} side, column {column}: {}", error.variant.message())
}

/// Parse an inequality such as `2*x - 3 <= 5` into a [`Relation`].
pub fn parse_inequality(line: &str) -> Result<Relation, Error> {
    Relation::parse(line)
}

/// One endpoint as written in interval notation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BoundNotation {
    NegativeInfinity,
    PositiveInfinity,
    Value(Expression),
}

/// One `[a, b)`-style interval as written, before any evaluation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IntervalNotation {
    pub left_open: bool,
    pub start: BoundNotation,
    pub end: BoundNotation,
    pub right_open: bool,
}

/// Parse a union of intervals such as `(-∞,2]U(5,∞)`. Whitespace must already
/// be stripped and `∪` replaced by `U`.
pub fn parse_interval_notation(input: &str) -> Result<Vec<IntervalNotation>, ParseError> {
    Ok(ExpressionParser::parse(Rule::solution_set, input)?
        .filter(|pair| pair.as_rule() == Rule::interval)
        .map(interval_notation)
        .collect())
}

fn interval_notation(pair: Pair<Rule>) -> IntervalNotation {
    let mut inner = pair.into_inner();
    let mut next = || {
        inner
            .next()
            .unwrap_or_else(|| unreachable!("`interval` has four parts"))
    };
    let left_open = next().as_str() == "(";
    let start = bound_notation(next());
    let end = bound_notation(next());
    let right_open = next().as_str() == ")";
    IntervalNotation {
        left_open,
        start,
        end,
        right_open,
    }
}

fn bound_notation(pair: Pair<Rule>) -> BoundNotation {
    match pair.as_rule() {
        Rule::negative_infinity => BoundNotation::NegativeInfinity,
        Rule::positive_infinity => BoundNotation::PositiveInfinity,
        Rule::expression => BoundNotation::Value(climb(pair.into_inner())),
        x => unreachable!("Unexpected bound rule {x:?}"),
    }
}

static PRATT_PARSER: Lazy<PrattParser<Rule>> = Lazy::new(|| {
    use Assoc::*;
    use Rule::*;

    // Lowest precedence first.
    PrattParser::new()
        .op(Op::infix(add, Left) | Op::infix(subtract, Left))
        .op(Op::infix(multiply, Left) | Op::infix(divide, Left))
        .op(Op::prefix(neg) | Op::prefix(pos))
        .op(Op::infix(power, Right))
});

fn climb(pairs: Pairs<Rule>) -> Expression {
    PRATT_PARSER
        .map_primary(primary)
        .map_prefix(|op, only| match op.as_rule() {
            Rule::neg => Expression::Neg(Box::new(only)),
            Rule::pos => only,
            x => unreachable!("Unexpected prefix operator {x:?}"),
        })
        .map_infix(|lhs, op, rhs| {
            let (lhs, rhs) = (Box::new(lhs), Box::new(rhs));
            match op.as_rule() {
                Rule::add => Expression::Add(lhs, rhs),
                Rule::subtract => Expression::Sub(lhs, rhs),
                Rule::multiply => Expression::Mul(lhs, rhs),
                Rule::divide => Expression::Div(lhs, rhs),
                Rule::power => Expression::Pow(lhs, rhs),
                x => unreachable!("Unexpected operator {x:?}"),
            }
        })
        .parse(pairs)
}

fn primary(pair: Pair<Rule>) -> Expression {
    match pair.as_rule() {
        Rule::expression => climb(pair.into_inner()),
        Rule::number => Expression::Literal(parse_decimal(pair.as_str())),
        Rule::variable => Expression::Variable,
        Rule::abs_call => Expression::Abs(Box::new(only_child(pair))),
        Rule::sqrt_call | Rule::radical => Expression::Sqrt(Box::new(only_child(pair))),
        Rule::scaled_radical => {
            let mut inner = pair.into_inner();
            let (Some(coefficient), Some(radical)) = (inner.next(), inner.next()) else {
                unreachable!("`scaled_radical` is a number and a radical")
            };
            Expression::Mul(Box::new(primary(coefficient)), Box::new(primary(radical)))
        }
        x => unreachable!("Unexpected primary rule {x:?}"),
    }
}

fn only_child(pair: Pair<Rule>) -> Expression {
    match pair.into_inner().next() {
        Some(child) => primary(child),
        None => unreachable!("function call without argument"),
    }
}

/// Exact value of a decimal literal: `2.50` becomes `5/2`.
fn parse_decimal(literal: &str) -> BigRational {
    let (whole, fraction) = literal.split_once('.').unwrap_or((literal, ""));
    let ten = BigInt::from(10);
    let mut numer = BigInt::zero();
    let mut denom = BigInt::one();
    for digit in whole.chars().chain(fraction.chars()) {
        numer = numer * &ten + BigInt::from(digit.to_digit(10).unwrap_or(0));
    }
    for _ in fraction.chars() {
        denom *= &ten;
    }
    BigRational::new(numer, denom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use expect_test::expect;

    #[test]
    fn op_precedence() {
        let check = |input: &str, expected: expect_test::Expect| {
            expected.assert_eq(&Expression::parse(input).unwrap().to_string());
        };
        check("1 * 2 + 3 * 4", expect!["1*2 + 3*4"]);
        check("8 / 4 * 3", expect!["8/4*3"]);
        check("4 ** 3 ** 2", expect!["4**3**2"]);
        check("(4 ** 3) ** 2", expect!["(4**3)**2"]);
        check("-x ** 2", expect!["-x**2"]);
        check("x ** -1", expect!["x**-1"]);
        check("2 - (x - 3)", expect!["2 - (x - 3)"]);
        check("Abs(2*x + 1) - 3", expect!["Abs(2*x + 1) - 3"]);
        check("3√5 + sqrt(2)", expect!["3*sqrt(5) + sqrt(2)"]);
        check("0.25 * x", expect!["1/4*x"]);
    }

    #[test]
    fn parse_relations() {
        let relation = Relation::parse("2*x - 3 <= 5").unwrap();
        assert_eq!(relation.op, Comparison::LessEqual);
        assert_eq!(relation.to_string(), "2*x - 3 <= 5");

        assert_eq!(Relation::parse("x >= 1").unwrap().op, Comparison::GreaterEqual);
        assert_eq!(Relation::parse("x < 1").unwrap().op, Comparison::Less);
        assert_eq!(Relation::parse("x > 1").unwrap().op, Comparison::Greater);
        assert_eq!(
            Relation::parse("abs (x-3) ≤ 5").unwrap().to_string(),
            "Abs(x - 3) <= 5"
        );
        assert_eq!(
            Relation::parse("x^2 - 9 < 0").unwrap().lhs,
            Expression::Sub(
                Box::new(Expression::Pow(
                    Box::new(Expression::Variable),
                    Box::new(Expression::literal(2))
                )),
                Box::new(Expression::literal(9)),
            )
        );
    }

    #[test]
    fn two_character_operators_win() {
        // `<=` is found before the bare `>` even though `>` comes first.
        let error = Relation::parse("x > 1 <= 2").unwrap_err();
        assert!(matches!(error, Error::Syntax { .. }), "{error:?}");
        let relation = Relation::parse("1 <= x").unwrap();
        assert_eq!(relation.rhs, Expression::Variable);
    }

    #[test]
    fn syntax_errors() {
        assert_eq!(
            Relation::parse("x + 1 = 3"),
            Err(Error::Syntax {
                line: "x + 1 = 3".into(),
                reason: "no inequality operator".into()
            })
        );
        assert!(matches!(Relation::parse("x + < 3"), Err(Error::Syntax { .. })));
        assert!(matches!(Relation::parse("y < 3"), Err(Error::Syntax { .. })));
        assert!(matches!(Relation::parse("2x < 3"), Err(Error::Syntax { .. })));
        assert!(matches!(Relation::parse("x < "), Err(Error::Syntax { .. })));
    }

    #[test]
    fn syntax_errors_name_the_position() {
        let reason = |line: &str| match Relation::parse(line) {
            Err(Error::Syntax { reason, .. }) => reason,
            other => panic!("expected a syntax error, got {other:?}"),
        };
        assert!(reason("x + < 3").starts_with("left side, column "));
        assert!(reason("x < 3 +").starts_with("right side, column "));
        assert!(reason("y < 3").contains("expected "));

        let long = format!("{}* < 3", "x + ".repeat(500));
        let message = reason(&long);
        assert!(!message.contains('\n'), "{message}");
        assert!(!message.contains("x + x"), "{message}");
        assert!(message.len() < 200, "{message}");
        assert!(
            Error::syntax(&long, message).to_string().len() < long.len() + 200
        );
    }

    #[test]
    fn interval_notation() {
        let parsed = parse_interval_notation("(-∞,2]U(5,oo)").unwrap();
        assert_eq!(
            parsed,
            [
                IntervalNotation {
                    left_open: true,
                    start: BoundNotation::NegativeInfinity,
                    end: BoundNotation::Value(Expression::literal(2)),
                    right_open: false,
                },
                IntervalNotation {
                    left_open: true,
                    start: BoundNotation::Value(Expression::literal(5)),
                    end: BoundNotation::PositiveInfinity,
                    right_open: true,
                },
            ]
        );
        assert_eq!(parse_interval_notation("[(1-√5)/2,3)").unwrap().len(), 1);
        assert!(parse_interval_notation("(1,2").is_err());
        assert!(parse_interval_notation("1<x<2").is_err());
    }
}
