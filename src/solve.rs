use std::collections::BTreeMap;

use num_traits::Signed;
use tracing::{debug, trace};

use crate::config::SolverConfig;
use crate::error::{Error, Unsupported};
use crate::expression::{Comparison, Expression, Relation};
use crate::polynomial::RationalFunction;
use crate::real::Real;
use crate::set::{Endpoint, Interval, SolutionSet};

/// Solve `relation` exactly over the reals with default limits.
pub fn solve(relation: &Relation) -> Result<SolutionSet, Error> {
    solve_with(relation, &SolverConfig::default())
}

/// Solve `relation` exactly over the reals.
///
/// Linear, polynomial and rational relations go through a sign chart of the
/// factored numerator and denominator. Absolute values are split into the
/// cases where their argument is non-negative or negative. Points where a
/// denominator vanishes are never part of the solution.
pub fn solve_with(relation: &Relation, config: &SolverConfig) -> Result<SolutionSet, Error> {
    let expression = Expression::Sub(
        Box::new(relation.lhs.clone()),
        Box::new(relation.rhs.clone()),
    );
    let failure = |reason| Error::Solve {
        relation: relation.to_string(),
        reason,
    };
    if expression.size() > config.max_expression_size {
        return Err(failure(Unsupported::ExpressionTooLarge(
            config.max_expression_size,
        )));
    }
    debug!(%relation, "solving");
    let solution = solve_against_zero(&expression, relation.op, config, 0).map_err(failure)?;
    debug!(%relation, %solution, "solved");
    Ok(solution)
}

/// Solutions of `expression op 0`.
fn solve_against_zero(
    expression: &Expression,
    op: Comparison,
    config: &SolverConfig,
    splits: usize,
) -> Result<SolutionSet, Unsupported> {
    let Some(argument) = expression.innermost_abs() else {
        let factors = expression.to_rational_factors(config)?;
        return sign_chart(&factors, op, config);
    };
    if splits >= config.max_abs_splits {
        return Err(Unsupported::TooManyCases(config.max_abs_splits));
    }
    debug!(%argument, "splitting absolute value");

    let zero = Expression::literal(0);
    let argument_sign = |op| {
        solve_against_zero(
            &Expression::Sub(Box::new(argument.clone()), Box::new(zero.clone())),
            op,
            config,
            splits + 1,
        )
    };
    let non_negative = argument_sign(Comparison::GreaterEqual)?;
    let negative = argument_sign(Comparison::Less)?;

    let positive_case = expression.replace_abs(argument, argument);
    let negative_case =
        expression.replace_abs(argument, &Expression::Neg(Box::new(argument.clone())));
    let positive = solve_against_zero(&positive_case, op, config, splits + 1)?;
    let negative_solution = solve_against_zero(&negative_case, op, config, splits + 1)?;

    Ok(positive
        .intersection(&non_negative)
        .union(&negative_solution.intersection(&negative)))
}

#[derive(Debug, Default)]
struct CriticalPoint {
    multiplicity: usize,
    pole: bool,
}

/// Solutions of `Π numeratorᵢ / denominatorᵢ op 0` from the sign of each
/// region between consecutive roots.
fn sign_chart(
    factors: &[RationalFunction],
    op: Comparison,
    config: &SolverConfig,
) -> Result<SolutionSet, Unsupported> {
    let mut critical: BTreeMap<Real, CriticalPoint> = BTreeMap::new();
    let mut leading_positive = true;
    let vanishes = factors.iter().any(|factor| factor.numerator.is_zero());
    for factor in factors {
        let denominator = factor.denominator.factor(config)?;
        leading_positive ^= denominator.leading.is_negative();
        for root in &denominator.roots {
            let point = critical.entry(root.value.clone()).or_default();
            point.multiplicity += root.multiplicity;
            point.pole = true;
        }
        if vanishes {
            continue;
        }
        let numerator = factor.numerator.factor(config)?;
        leading_positive ^= numerator.leading.is_negative();
        for root in &numerator.roots {
            critical.entry(root.value.clone()).or_default().multiplicity += root.multiplicity;
        }
    }

    if vanishes {
        // `0 op 0` wherever the expression is defined.
        let poles = critical
            .into_iter()
            .filter(|(_, info)| info.pole)
            .map(|(point, _)| point);
        return Ok(if op.is_strict() {
            SolutionSet::Empty
        } else {
            SolutionSet::reals_except(poles)
        });
    }
    trace!(?critical, "critical points");

    let satisfied = |positive: bool| match op {
        Comparison::Less | Comparison::LessEqual => !positive,
        Comparison::Greater | Comparison::GreaterEqual => positive,
    };

    // Right of every critical point each linear factor is positive, so only
    // the leading coefficients decide. Moving left across a root of odd
    // multiplicity flips the sign.
    let mut positive = leading_positive;
    let mut intervals = Vec::with_capacity(2 * critical.len() + 1);
    let mut end = Endpoint::PosInfinity;
    for (point, info) in critical.iter().rev() {
        let start = Endpoint::Finite(point.clone());
        if satisfied(positive) {
            intervals.extend(Interval::open(start.clone(), end));
        }
        if !info.pole && !op.is_strict() {
            intervals.push(Interval::point(point.clone()));
        }
        if info.multiplicity % 2 == 1 {
            positive = !positive;
        }
        end = start;
    }
    if satisfied(positive) {
        intervals.extend(Interval::open(Endpoint::NegInfinity, end));
    }

    Ok(SolutionSet::from_intervals(intervals))
}

#[cfg(test)]
mod tests {
    use super::*;
    use expect_test::{expect, Expect};

    fn check(line: &str, expected: Expect) {
        let relation = Relation::parse(line).unwrap();
        expected.assert_eq(&solve(&relation).unwrap().to_string());
    }

    fn failure(line: &str) -> Unsupported {
        match solve(&Relation::parse(line).unwrap()) {
            Err(Error::Solve { reason, .. }) => reason,
            other => panic!("expected a solve error, got {other:?}"),
        }
    }

    #[test]
    fn linear() {
        check("2*x - 3 <= 5", expect!["(-∞, 4]"]);
        check("-3*x + 6 > 0", expect!["(-∞, 2)"]);
        check("x/3 + 1/2 >= 2*x", expect!["(-∞, 3/10]"]);
        check("x + 1 > x", expect!["ℝ"]);
        check("x + 1 < x", expect!["∅"]);
        check("2*x <= 2*x", expect!["ℝ"]);
        check("2*x < 2*x", expect!["∅"]);
    }

    #[test]
    fn quadratic() {
        check("x^2 - 9 < 0", expect!["(-3, 3)"]);
        check("x^2 - 5*x + 6 >= 0", expect!["(-∞, 2] ∪ [3, ∞)"]);
        check("x^2 - 2 <= 0", expect!["[-√2, √2]"]);
        check("x^2 - x - 1 > 0", expect!["(-∞, (1 - √5)/2) ∪ ((1 + √5)/2, ∞)"]);
        check("x^2 + 1 > 0", expect!["ℝ"]);
        check("x^2 + 1 < 0", expect!["∅"]);
        check("(x - 1)^2 <= 0", expect!["[1, 1]"]);
        check("(x - 1)^2 > 0", expect!["(-∞, 1) ∪ (1, ∞)"]);
        check("-x^2 + 4 >= 0", expect!["[-2, 2]"]);
    }

    #[test]
    fn higher_degree() {
        check("x^3 - x >= 0", expect!["[-1, 0] ∪ [1, ∞)"]);
        check("x^2*(x - 1) >= 0", expect!["[0, 0] ∪ [1, ∞)"]);
        check("(x - 3)*(x^2 - 2) < 0", expect!["(-∞, -√2) ∪ (√2, 3)"]);
        assert_eq!(failure("x^3 - 2 > 0"), Unsupported::NoClosedForm(3));
        assert_eq!(failure("x^4 - 2 > 0"), Unsupported::NoClosedForm(4));
    }

    #[test]
    fn quartics_and_repeated_factors() {
        check("x^4 - 5*x^2 + 6 < 0", expect!["(-√3, -√2) ∪ (√2, √3)"]);
        check("(x^2 + 1)*(x^2 + 2) > 0", expect!["ℝ"]);
        check("x^4 + 1 > 0", expect!["ℝ"]);
        check("x^4 + 1 <= 0", expect!["∅"]);
        check("x^4 + x + 1 > 0", expect!["ℝ"]);
        check(
            "x^4 - 3*x^2 + 1 <= 0",
            expect!["[(-1 - √5)/2, (1 - √5)/2] ∪ [(-1 + √5)/2, (1 + √5)/2]"],
        );
        check("(x^2 - 2)^2 > 0", expect!["(-∞, -√2) ∪ (-√2, √2) ∪ (√2, ∞)"]);
        check("(x^2 - 2)^2 <= 0", expect!["[-√2, -√2] ∪ [√2, √2]"]);
        check(
            "(x^2 - 2)*(x^2 - 3)*(x^2 - 5) < 0",
            expect!["(-√5, -√3) ∪ (-√2, √2) ∪ (√3, √5)"],
        );
        check("-(x^2 + 1)*(x^2 + 3) < 0", expect!["ℝ"]);
        check("(x^2 - 2)/(x^4 + 1) >= 0", expect!["(-∞, -√2] ∪ [√2, ∞)"]);
    }

    #[test]
    fn oversized_constants_fail_cleanly() {
        assert!(matches!(
            failure("x > 2**-9223372036854775808"),
            Unsupported::ExponentTooLarge { exponent: i64::MIN, .. }
        ));
        assert_eq!(
            failure("x > ((((2**64)**64)**64)**64)**64"),
            Unsupported::CoefficientsTooLarge
        );
        assert_eq!(
            failure("963761198400*x^3 + x + 963761198400 > 0"),
            Unsupported::CoefficientsTooLarge
        );
    }

    #[test]
    fn rational() {
        check("(x-1)/(x+2) >= 0", expect!["(-∞, -2) ∪ [1, ∞)"]);
        check("(x-1)/(x+2) <= 0", expect!["(-2, 1]"]);
        check("1/x > 0", expect!["(0, ∞)"]);
        check("x/x >= 1", expect!["(-∞, 0) ∪ (0, ∞)"]);
        check("(x^2 - 1)/(x - 1) >= 0", expect!["[-1, 1) ∪ (1, ∞)"]);
        check("1/x - 1/x >= 0", expect!["(-∞, 0) ∪ (0, ∞)"]);
        check("1/(x^2 - 4) <= 0", expect!["(-2, 2)"]);
        check("x/(x^2 + 1) > 0", expect!["(0, ∞)"]);
        check("0*(x^3 - 2)/(x - 1) >= 0", expect!["(-∞, 1) ∪ (1, ∞)"]);
    }

    #[test]
    fn denominator_roots_are_always_excluded() {
        for op in ["<", "<=", ">", ">="] {
            let relation = Relation::parse(&format!("(x-1)/(x+2) {op} 0")).unwrap();
            let solution = solve(&relation).unwrap();
            assert!(!solution.contains(&Real::from_integer(-2)), "{op}: {solution}");
        }
    }

    #[test]
    fn absolute_value() {
        check("Abs(x-3) <= 5", expect!["[-2, 8]"]);
        check("Abs(2*x+1) > 3", expect!["(-∞, -2) ∪ (1, ∞)"]);
        check("abs(x - 2) < 3", expect!["(-1, 5)"]);
        check("Abs(x) < -1", expect!["∅"]);
        check("Abs(x) >= 0", expect!["ℝ"]);
        check("Abs(x - 1) <= x", expect!["[1/2, ∞)"]);
        check("Abs(x - 1) + Abs(x + 1) <= 4", expect!["[-2, 2]"]);
        check("Abs(Abs(x) - 2) < 1", expect!["(-3, -1) ∪ (1, 3)"]);
        check("1/Abs(x) > 1", expect!["(-1, 0) ∪ (0, 1)"]);
        check("Abs(x^2 - 4) <= 0", expect!["[-2, -2] ∪ [2, 2]"]);
    }

    #[test]
    fn limits() {
        let relation = Relation::parse("x^20 > 0").unwrap();
        assert!(matches!(
            solve(&relation),
            Err(Error::Solve {
                reason: Unsupported::ExponentTooLarge { .. },
                ..
            })
        ));
        let config = SolverConfig {
            max_abs_splits: 1,
            ..SolverConfig::default()
        };
        let relation = Relation::parse("Abs(Abs(x) - 1) < 1").unwrap();
        assert_eq!(
            solve_with(&relation, &config),
            Err(Error::Solve {
                relation: "Abs(Abs(x) - 1) < 1".into(),
                reason: Unsupported::TooManyCases(1),
            })
        );
        let config = SolverConfig {
            max_expression_size: 4,
            ..SolverConfig::default()
        };
        let relation = Relation::parse("x + x + x > 1").unwrap();
        assert_eq!(
            solve_with(&relation, &config),
            Err(Error::Solve {
                relation: "x + x + x > 1".into(),
                reason: Unsupported::ExpressionTooLarge(4),
            })
        );
    }

    #[test]
    fn unsupported_shapes() {
        assert!(matches!(failure("x^x > 1"), Unsupported::Exponent(_)));
        assert!(matches!(failure("sqrt(x) > 1"), Unsupported::NotRational(_)));
        assert_eq!(failure("x/0 > 1"), Unsupported::DivisionByZero);
    }
}
