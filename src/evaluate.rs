use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};

use crate::config::SolverConfig;
use crate::error::Unsupported;
use crate::expression::Expression;
use crate::polynomial::RationalFunction;
use crate::real::Real;

/// Largest power accepted when evaluating a constant.
const MAX_CONSTANT_EXPONENT: u64 = 64;

impl Expression {
    /// Exact value of an expression without `x`.
    ///
    /// Returns `None` if the expression mentions `x`, divides by zero, takes
    /// the root of a negative or irrational number, raises to a non-integer
    /// power, mixes radicals such as `√2 + √3` that leave `a + b√d` form, or
    /// grows beyond what exact arithmetic keeps.
    pub fn evaluate_constant(&self) -> Option<Real> {
        self.evaluate_exact(SolverConfig::default().max_factor_magnitude)
            .ok()
    }

    /// Exact value of a constant expression, or the reason it has none.
    fn evaluate_exact(&self, limit: u64) -> Result<Real, Unsupported> {
        let not_rational = || Unsupported::NotRational(self.to_string());
        let binary = |lhs: &Expression,
                      rhs: &Expression,
                      op: fn(&Real, &Real) -> Option<Real>|
         -> Result<Real, Unsupported> {
            let (lhs, rhs) = (lhs.evaluate_exact(limit)?, rhs.evaluate_exact(limit)?);
            if !lhs.shares_radicand(&rhs) {
                return Err(not_rational());
            }
            op(&lhs, &rhs).ok_or(Unsupported::CoefficientsTooLarge)
        };
        match self {
            Self::Add(lhs, rhs) => binary(lhs, rhs, Real::checked_add),
            Self::Sub(lhs, rhs) => binary(lhs, rhs, Real::checked_sub),
            Self::Mul(lhs, rhs) => binary(lhs, rhs, Real::checked_mul),
            Self::Div(lhs, rhs) => {
                if rhs.evaluate_exact(limit)?.is_zero() {
                    return Err(Unsupported::DivisionByZero);
                }
                binary(lhs, rhs, Real::checked_div)
            }
            Self::Pow(base, exponent) => {
                let exponent = integer_exponent(exponent, limit)?;
                if exponent.unsigned_abs() > MAX_CONSTANT_EXPONENT {
                    return Err(Unsupported::ExponentTooLarge {
                        exponent,
                        limit: MAX_CONSTANT_EXPONENT as usize,
                    });
                }
                let base = base.evaluate_exact(limit)?;
                if exponent < 0 && base.is_zero() {
                    return Err(Unsupported::DivisionByZero);
                }
                base.checked_pow(exponent)
                    .ok_or(Unsupported::CoefficientsTooLarge)
            }
            Self::Neg(only) => Ok(-only.evaluate_exact(limit)?),
            Self::Abs(only) => Ok(only.evaluate_exact(limit)?.abs()),
            Self::Sqrt(only) => match only.evaluate_exact(limit)?.as_rational() {
                Some(value) if !value.is_negative() => {
                    Real::sqrt(value, limit).ok_or(Unsupported::CoefficientsTooLarge)
                }
                _ => Err(not_rational()),
            },
            Self::Literal(value) => Ok(Real::from(value.clone())),
            Self::Variable => Err(not_rational()),
        }
    }

    /// Converts the expression into an exact quotient of polynomials.
    ///
    /// Absolute values must already have been split away by the solver.
    /// Constant sub-expressions may use `sqrt` as long as they come out
    /// rational.
    pub fn to_rational_function(
        &self,
        config: &SolverConfig,
    ) -> Result<RationalFunction, Unsupported> {
        if !self.contains_variable() {
            let value = self.evaluate_exact(config.max_factor_magnitude)?;
            return value
                .as_rational()
                .cloned()
                .map(RationalFunction::constant)
                .ok_or_else(|| Unsupported::NotRational(self.to_string()));
        }
        match self {
            Self::Add(lhs, rhs) => lhs
                .to_rational_function(config)?
                .add(&rhs.to_rational_function(config)?, config),
            Self::Sub(lhs, rhs) => lhs
                .to_rational_function(config)?
                .sub(&rhs.to_rational_function(config)?, config),
            Self::Mul(lhs, rhs) => lhs
                .to_rational_function(config)?
                .mul(&rhs.to_rational_function(config)?, config),
            Self::Div(lhs, rhs) => lhs
                .to_rational_function(config)?
                .div(&rhs.to_rational_function(config)?, config),
            Self::Pow(base, exponent) => {
                let exponent = integer_exponent(exponent, config.max_factor_magnitude)?;
                base.to_rational_function(config)?.pow(exponent, config)
            }
            Self::Neg(only) => Ok(only.to_rational_function(config)?.neg()),
            Self::Variable => Ok(RationalFunction::x()),
            Self::Abs(_) | Self::Sqrt(_) | Self::Literal(_) => {
                Err(Unsupported::NotRational(self.to_string()))
            }
        }
    }

    /// Converts `self` into rational functions whose product it is.
    ///
    /// Products, quotients and negations are taken apart so that every
    /// factor is factored on its own, and `p - 0` counts as `p`. Anything
    /// else is a single factor. The summed degrees obey `max_degree` just as
    /// the expanded product would.
    pub fn to_rational_factors(
        &self,
        config: &SolverConfig,
    ) -> Result<Vec<RationalFunction>, Unsupported> {
        let product = match self {
            Self::Sub(lhs, rhs) if matches!(rhs.as_ref(), Self::Literal(value) if value.is_zero()) => {
                lhs.as_ref()
            }
            _ => self,
        };
        let mut factors = Vec::new();
        product.collect_factors(false, config, &mut factors)?;

        let numerator: usize = factors
            .iter()
            .map(|factor| factor.numerator.degree().unwrap_or(0))
            .sum();
        let denominator: usize = factors
            .iter()
            .map(|factor| factor.denominator.degree().unwrap_or(0))
            .sum();
        let degree = numerator.max(denominator);
        if degree > config.max_degree {
            return Err(Unsupported::DegreeTooLarge {
                degree,
                limit: config.max_degree,
            });
        }
        Ok(factors)
    }

    fn collect_factors(
        &self,
        inverted: bool,
        config: &SolverConfig,
        factors: &mut Vec<RationalFunction>,
    ) -> Result<(), Unsupported> {
        match self {
            Self::Mul(lhs, rhs) if self.contains_variable() => {
                lhs.collect_factors(inverted, config, factors)?;
                rhs.collect_factors(inverted, config, factors)
            }
            Self::Div(lhs, rhs) if self.contains_variable() => {
                lhs.collect_factors(inverted, config, factors)?;
                rhs.collect_factors(!inverted, config, factors)
            }
            Self::Neg(only) if self.contains_variable() => {
                factors.push(RationalFunction::constant(-BigRational::one()));
                only.collect_factors(inverted, config, factors)
            }
            _ => {
                let factor = self.to_rational_function(config)?;
                factors.push(if inverted { factor.recip()? } else { factor });
                Ok(())
            }
        }
    }
}

/// The exponent as a machine integer, if it is a constant integer.
fn integer_exponent(exponent: &Expression, limit: u64) -> Result<i64, Unsupported> {
    let not_integer = || Unsupported::Exponent(exponent.to_string());
    if exponent.contains_variable() {
        return Err(not_integer());
    }
    let value = exponent.evaluate_exact(limit).map_err(|reason| match reason {
        Unsupported::NotRational(_) => not_integer(),
        other => other,
    })?;
    let rational = value
        .as_rational()
        .filter(|rational| rational.is_integer())
        .ok_or_else(not_integer)?;
    rational.to_integer().to_i64().ok_or_else(not_integer)
}
