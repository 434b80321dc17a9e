use std::collections::BTreeSet;
use std::ops::{Add, Mul, Neg, Sub};

use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};

use crate::config::SolverConfig;
use crate::error::Unsupported;
use crate::real::Real;

/// A polynomial in `x` with rational coefficients.
///
/// Coefficients are stored lowest degree first with no trailing zeros, so the
/// zero polynomial has no coefficients at all.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Polynomial {
    coefficients: Vec<BigRational>,
}

/// A real root together with its multiplicity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Root {
    pub value: Real,
    pub multiplicity: usize,
}

/// `leading · Π (x - rᵢ)^mᵢ · q(x)` where `q` is monic without real roots,
/// hence positive everywhere.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Factorization {
    pub leading: BigRational,
    pub roots: Vec<Root>,
}

impl Polynomial {
    pub fn new(coefficients: Vec<BigRational>) -> Self {
        let mut output = Self { coefficients };
        output.trim();
        output
    }

    pub fn zero() -> Self {
        Self::default()
    }

    pub fn one() -> Self {
        Self::constant(BigRational::one())
    }

    pub fn constant(value: BigRational) -> Self {
        Self::new(vec![value])
    }

    /// The identity polynomial `x`.
    pub fn x() -> Self {
        Self::new(vec![BigRational::zero(), BigRational::one()])
    }

    fn trim(&mut self) {
        while self.coefficients.last().is_some_and(Zero::is_zero) {
            self.coefficients.pop();
        }
    }

    pub fn is_zero(&self) -> bool {
        self.coefficients.is_empty()
    }

    /// `None` for the zero polynomial.
    pub fn degree(&self) -> Option<usize> {
        self.coefficients.len().checked_sub(1)
    }

    pub fn coefficient(&self, power: usize) -> BigRational {
        self.coefficients
            .get(power)
            .cloned()
            .unwrap_or_else(BigRational::zero)
    }

    pub fn leading_coefficient(&self) -> Option<&BigRational> {
        self.coefficients.last()
    }

    pub fn scale(&self, factor: &BigRational) -> Self {
        Self::new(self.coefficients.iter().map(|c| c * factor).collect())
    }

    pub fn pow(&self, exponent: u32) -> Self {
        let mut output = Self::one();
        for _ in 0..exponent {
            output = &output * self;
        }
        output
    }

    pub fn evaluate(&self, at: &BigRational) -> BigRational {
        // Horner's scheme.
        self.coefficients
            .iter()
            .rev()
            .fold(BigRational::zero(), |acc, c| acc * at + c)
    }

    /// Synthetic division by `(x - root)`, discarding the remainder.
    fn deflate(&self, root: &BigRational) -> Self {
        let Some(degree) = self.degree() else {
            return Self::zero();
        };
        let mut quotient = vec![BigRational::zero(); degree];
        let mut carry = BigRational::zero();
        for power in (1..=degree).rev() {
            carry = carry * root + &self.coefficients[power];
            quotient[power - 1] = carry.clone();
        }
        Self::new(quotient)
    }

    fn strip_zero_root(&self) -> Self {
        Self::new(self.coefficients[1.min(self.coefficients.len())..].to_vec())
    }

    fn monic(&self) -> Self {
        match self.leading_coefficient() {
            Some(leading) => self.scale(&leading.recip()),
            None => Self::zero(),
        }
    }

    pub fn derivative(&self) -> Self {
        Self::new(
            self.coefficients
                .iter()
                .enumerate()
                .skip(1)
                .map(|(power, c)| c * BigRational::from_integer(BigInt::from(power)))
                .collect(),
        )
    }

    /// `p(x + by)`.
    pub fn shift(&self, by: &BigRational) -> Self {
        let step = Self::new(vec![by.clone(), BigRational::one()]);
        self.coefficients
            .iter()
            .rev()
            .fold(Self::zero(), |acc, c| {
                &(&acc * &step) + &Self::constant(c.clone())
            })
    }

    /// Quotient and remainder of long division. Dividing by the zero
    /// polynomial leaves everything in the remainder.
    pub fn div_rem(&self, divisor: &Self) -> (Self, Self) {
        let Some(divisor_degree) = divisor.degree() else {
            return (Self::zero(), self.clone());
        };
        let leading = &divisor.coefficients[divisor_degree];
        let mut remainder = self.coefficients.clone();
        let mut quotient =
            vec![BigRational::zero(); remainder.len().saturating_sub(divisor_degree)];
        for power in (0..quotient.len()).rev() {
            let coefficient = &remainder[power + divisor_degree] / leading;
            for (i, d) in divisor.coefficients.iter().enumerate() {
                remainder[power + i] -= &coefficient * d;
            }
            quotient[power] = coefficient;
        }
        (Self::new(quotient), Self::new(remainder))
    }

    /// Monic greatest common divisor.
    pub fn gcd(&self, other: &Self) -> Self {
        let (mut a, mut b) = (self.clone(), other.clone());
        while !b.is_zero() {
            let remainder = a.div_rem(&b).1.monic();
            a = b;
            b = remainder;
        }
        a.monic()
    }

    /// Yun's decomposition of a monic polynomial into `(pᵢ, i)` with
    /// `self = Π pᵢ^i`, each `pᵢ` monic, square-free and coprime to the rest.
    fn square_free_parts(&self) -> Vec<(Self, usize)> {
        let mut parts = Vec::new();
        if self.degree().unwrap_or(0) == 0 {
            return parts;
        }
        let derivative = self.derivative();
        let repeated = self.gcd(&derivative);
        let mut rest = self.div_rem(&repeated).0;
        let mut slope = &derivative.div_rem(&repeated).0 - &rest.derivative();
        let mut multiplicity = 1;
        while rest.degree().unwrap_or(0) > 0 {
            let part = rest.gcd(&slope);
            rest = rest.div_rem(&part).0;
            slope = &slope.div_rem(&part).0 - &rest.derivative();
            if part.degree().unwrap_or(0) > 0 {
                parts.push((part, multiplicity));
            }
            multiplicity += 1;
        }
        parts
    }

    /// Number of distinct real roots, by Sturm's theorem.
    pub fn real_root_count(&self) -> usize {
        if self.is_zero() {
            return 0;
        }
        let mut sequence = vec![self.clone()];
        let mut next = self.derivative();
        while !next.is_zero() {
            let remainder = sequence[sequence.len() - 1].div_rem(&next).1;
            sequence.push(next);
            next = -&remainder;
        }
        let sign_changes = |at_negative_infinity: bool| {
            let signs: Vec<bool> = sequence
                .iter()
                .map(|p| {
                    let positive = p.leading_coefficient().is_some_and(Signed::is_positive);
                    let odd = p.degree().unwrap_or(0) % 2 == 1;
                    positive != (at_negative_infinity && odd)
                })
                .collect();
            signs.windows(2).filter(|pair| pair[0] != pair[1]).count()
        };
        sign_changes(true).saturating_sub(sign_changes(false))
    }

    /// Splits a nonzero polynomial into its leading coefficient and real roots.
    ///
    /// The monic part is broken into square-free factors. Each one loses its
    /// rational roots (the rational root theorem), and what remains is solved
    /// by the quadratic formula or, for quartics, by splitting into rational
    /// quadratics. A leftover without real roots is positive and dropped;
    /// anything else is [`Unsupported::NoClosedForm`].
    pub fn factor(&self, config: &SolverConfig) -> Result<Factorization, Unsupported> {
        let Some(leading) = self.leading_coefficient().cloned() else {
            return Err(Unsupported::DivisionByZero);
        };
        if let Some(degree) = self.degree() {
            if degree > config.max_degree {
                return Err(Unsupported::DegreeTooLarge {
                    degree,
                    limit: config.max_degree,
                });
            }
        }
        let mut roots = Vec::new();
        for (part, multiplicity) in self.monic().square_free_parts() {
            for value in part.real_roots(config)? {
                roots.push(Root {
                    value,
                    multiplicity,
                });
            }
        }
        roots.sort_by(|a, b| a.value.cmp(&b.value));
        Ok(Factorization { leading, roots })
    }

    /// Real roots of a monic square-free polynomial.
    fn real_roots(&self, config: &SolverConfig) -> Result<Vec<Real>, Unsupported> {
        let mut rest = self.clone();
        let mut roots = Vec::new();
        if rest.degree().unwrap_or(0) > 0 && rest.coefficient(0).is_zero() {
            rest = rest.strip_zero_root();
            roots.push(Real::zero());
        }

        // Quadratics and below are handled in closed form.
        if rest.degree().unwrap_or(0) > 2 {
            let candidates =
                rational_root_candidates(&rest, config).ok_or(Unsupported::CoefficientsTooLarge)?;
            for candidate in candidates {
                if rest.evaluate(&candidate).is_zero() {
                    rest = rest.deflate(&candidate);
                    roots.push(Real::from(candidate));
                }
            }
        }

        let limit = config.max_factor_magnitude;
        match rest.degree().unwrap_or(0) {
            0 => {}
            // Monic: x + c.
            1 => roots.push(Real::from(-rest.coefficient(0))),
            2 => roots.extend(quadratic_roots(
                &rest.coefficient(1),
                &rest.coefficient(0),
                limit,
            )?),
            degree => {
                let found = if degree == 4 {
                    rest.quartic_roots(config)?
                } else {
                    None
                };
                match found {
                    Some(found) => roots.extend(found),
                    None if rest.real_root_count() == 0 => {}
                    None => return Err(Unsupported::NoClosedForm(degree)),
                }
            }
        }
        Ok(roots)
    }

    /// Real roots of a monic quartic `x⁴ + a₃x³ + ...` after the shift
    /// `x = y - a₃/4` leaves `y⁴ + py² + qy + r`. `None` when the roots have
    /// no single-radical form this way.
    fn quartic_roots(&self, config: &SolverConfig) -> Result<Option<Vec<Real>>, Unsupported> {
        let limit = config.max_factor_magnitude;
        let shift = -self.coefficient(3) / BigRational::from_integer(4.into());
        let depressed = self.shift(&shift);
        let (p, q, r) = (
            depressed.coefficient(2),
            depressed.coefficient(1),
            depressed.coefficient(0),
        );

        let mut found = None;
        if q.is_zero() {
            found = biquadratic_roots(&p, &r, limit)?;
        }
        if found.is_none() {
            found = quadratic_pair_roots(&p, &q, &r, config)?;
        }
        let Some(found) = found else {
            return Ok(None);
        };
        let shift = Real::from(shift);
        found
            .iter()
            .map(|y| y.checked_add(&shift).ok_or(Unsupported::CoefficientsTooLarge))
            .collect::<Result<Vec<_>, _>>()
            .map(Some)
    }
}

/// Distinct real roots of `x² + bx + c`, ascending.
fn quadratic_roots(
    b: &BigRational,
    c: &BigRational,
    limit: u64,
) -> Result<Vec<Real>, Unsupported> {
    let four = BigRational::from_integer(4.into());
    let discriminant = b * b - &four * c;
    let vertex = Real::from(-b / BigRational::from_integer(2.into()));
    if discriminant.is_negative() {
        return Ok(Vec::new());
    }
    if discriminant.is_zero() {
        return Ok(vec![vertex]);
    }
    let half_width =
        Real::sqrt(&(discriminant / four), limit).ok_or(Unsupported::CoefficientsTooLarge)?;
    [vertex.checked_sub(&half_width), vertex.checked_add(&half_width)]
        .into_iter()
        .map(|value| value.ok_or(Unsupported::CoefficientsTooLarge))
        .collect()
}

/// `y⁴ + py² + r` as `(y² - u₁)(y² - u₂)` with rational `uᵢ`.
fn biquadratic_roots(
    p: &BigRational,
    r: &BigRational,
    limit: u64,
) -> Result<Option<Vec<Real>>, Unsupported> {
    let four = BigRational::from_integer(4.into());
    let discriminant = p * p - &four * r;
    if discriminant.is_negative() {
        // Both u are complex, so no y² is real.
        return Ok(Some(Vec::new()));
    }
    let half_width =
        Real::sqrt(&(discriminant / four), limit).ok_or(Unsupported::CoefficientsTooLarge)?;
    let Some(half_width) = half_width.as_rational() else {
        return Ok(None);
    };
    let center = -p / BigRational::from_integer(2.into());
    let mut roots = Vec::new();
    for u in [&center - half_width, &center + half_width] {
        if u.is_positive() {
            let root = Real::sqrt(&u, limit).ok_or(Unsupported::CoefficientsTooLarge)?;
            roots.push(-&root);
            roots.push(root);
        }
    }
    Ok(Some(roots))
}

/// `y⁴ + py² + qy + r` as `(y² + sy + t)(y² - sy + v)` with rational
/// `s, t, v`. Then `s²` is a rational root of the resolvent
/// `S³ + 2pS² + (p² - 4r)S - q²`.
fn quadratic_pair_roots(
    p: &BigRational,
    q: &BigRational,
    r: &BigRational,
    config: &SolverConfig,
) -> Result<Option<Vec<Real>>, Unsupported> {
    let limit = config.max_factor_magnitude;
    let two = BigRational::from_integer(2.into());
    let four = BigRational::from_integer(4.into());
    let mut resolvent = Polynomial::new(vec![
        -(q * q),
        p * p - &four * r,
        p * &two,
        BigRational::one(),
    ]);
    while resolvent.coefficient(0).is_zero() {
        resolvent = resolvent.strip_zero_root();
    }
    let Some(candidates) = rational_root_candidates(&resolvent, config) else {
        return Ok(None);
    };
    for square in candidates {
        if !square.is_positive() || !resolvent.evaluate(&square).is_zero() {
            continue;
        }
        let Some(s) = Real::sqrt(&square, limit).and_then(|s| s.as_rational().cloned()) else {
            continue;
        };
        let t = (&square + p - q / &s) / &two;
        let v = (&square + p + q / &s) / &two;
        let mut roots = quadratic_roots(&s, &t, limit)?;
        roots.extend(quadratic_roots(&-&s, &v, limit)?);
        return Ok(Some(roots));
    }
    Ok(None)
}

/// Every `±p/q` with `p | a₀` and `q | aₙ` after clearing denominators, or
/// `None` when the coefficients are too large or have too many divisors.
fn rational_root_candidates(
    polynomial: &Polynomial,
    config: &SolverConfig,
) -> Option<BTreeSet<BigRational>> {
    let common = polynomial
        .coefficients
        .iter()
        .fold(BigInt::one(), |acc, c| acc.lcm(c.denom()));
    let scale = BigRational::from_integer(common);
    let constant = (polynomial.coefficient(0) * &scale).to_integer().abs();
    let leading = (polynomial.leading_coefficient()? * &scale)
        .to_integer()
        .abs();

    let (constant, leading) = (constant.to_u64()?, leading.to_u64()?);
    let limit = config.max_factor_magnitude;
    if constant > limit || leading > limit {
        return None;
    }
    let (numerators, denominators) = (divisors(constant), divisors(leading));
    if numerators.len().saturating_mul(denominators.len()) > config.max_root_candidates {
        return None;
    }
    let mut candidates = BTreeSet::new();
    for p in &numerators {
        for q in &denominators {
            let candidate = BigRational::new(BigInt::from(*p), BigInt::from(*q));
            candidates.insert(-&candidate);
            candidates.insert(candidate);
        }
    }
    Some(candidates)
}

fn divisors(n: u64) -> Vec<u64> {
    let mut small = Vec::new();
    let mut large = Vec::new();
    let mut d = 1u64;
    while d * d <= n {
        if n % d == 0 {
            small.push(d);
            if d != n / d {
                large.push(n / d);
            }
        }
        d += 1;
    }
    small.extend(large.into_iter().rev());
    small
}

impl Add for &Polynomial {
    type Output = Polynomial;

    fn add(self, rhs: &Polynomial) -> Polynomial {
        let len = self.coefficients.len().max(rhs.coefficients.len());
        Polynomial::new(
            (0..len)
                .map(|i| self.coefficient(i) + rhs.coefficient(i))
                .collect(),
        )
    }
}

impl Sub for &Polynomial {
    type Output = Polynomial;

    fn sub(self, rhs: &Polynomial) -> Polynomial {
        self + &-rhs
    }
}

impl Mul for &Polynomial {
    type Output = Polynomial;

    fn mul(self, rhs: &Polynomial) -> Polynomial {
        if self.is_zero() || rhs.is_zero() {
            return Polynomial::zero();
        }
        let mut product =
            vec![BigRational::zero(); self.coefficients.len() + rhs.coefficients.len() - 1];
        for (i, a) in self.coefficients.iter().enumerate() {
            for (j, b) in rhs.coefficients.iter().enumerate() {
                product[i + j] += a * b;
            }
        }
        Polynomial::new(product)
    }
}

impl Neg for &Polynomial {
    type Output = Polynomial;

    fn neg(self) -> Polynomial {
        Polynomial::new(self.coefficients.iter().map(|c| -c).collect())
    }
}

/// A quotient `numerator / denominator` of polynomials.
///
/// Common factors are never cancelled: a factor that once appeared in a
/// denominator keeps marking the points where the original expression is
/// undefined.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RationalFunction {
    pub numerator: Polynomial,
    pub denominator: Polynomial,
}

impl RationalFunction {
    pub fn polynomial(numerator: Polynomial) -> Self {
        Self {
            numerator,
            denominator: Polynomial::one(),
        }
    }

    pub fn constant(value: BigRational) -> Self {
        Self::polynomial(Polynomial::constant(value))
    }

    pub fn x() -> Self {
        Self::polynomial(Polynomial::x())
    }

    fn checked(self, config: &SolverConfig) -> Result<Self, Unsupported> {
        let degree = self
            .numerator
            .degree()
            .unwrap_or(0)
            .max(self.denominator.degree().unwrap_or(0));
        if degree > config.max_degree {
            return Err(Unsupported::DegreeTooLarge {
                degree,
                limit: config.max_degree,
            });
        }
        Ok(self)
    }

    pub fn add(&self, rhs: &Self, config: &SolverConfig) -> Result<Self, Unsupported> {
        if self.denominator == rhs.denominator {
            return Self {
                numerator: &self.numerator + &rhs.numerator,
                denominator: self.denominator.clone(),
            }
            .checked(config);
        }
        Self {
            numerator: &(&self.numerator * &rhs.denominator)
                + &(&rhs.numerator * &self.denominator),
            denominator: &self.denominator * &rhs.denominator,
        }
        .checked(config)
    }

    pub fn sub(&self, rhs: &Self, config: &SolverConfig) -> Result<Self, Unsupported> {
        self.add(&rhs.neg(), config)
    }

    pub fn neg(&self) -> Self {
        Self {
            numerator: -&self.numerator,
            denominator: self.denominator.clone(),
        }
    }

    pub fn mul(&self, rhs: &Self, config: &SolverConfig) -> Result<Self, Unsupported> {
        Self {
            numerator: &self.numerator * &rhs.numerator,
            denominator: &self.denominator * &rhs.denominator,
        }
        .checked(config)
    }

    /// `1 / self`. The old numerator becomes a denominator and keeps its
    /// roots as poles.
    pub fn recip(&self) -> Result<Self, Unsupported> {
        if self.numerator.is_zero() {
            return Err(Unsupported::DivisionByZero);
        }
        Ok(Self {
            numerator: self.denominator.clone(),
            denominator: self.numerator.clone(),
        })
    }

    pub fn div(&self, rhs: &Self, config: &SolverConfig) -> Result<Self, Unsupported> {
        self.mul(&rhs.recip()?, config)
    }

    pub fn pow(&self, exponent: i64, config: &SolverConfig) -> Result<Self, Unsupported> {
        let magnitude = exponent.unsigned_abs();
        if magnitude > config.max_degree as u64 {
            return Err(Unsupported::ExponentTooLarge {
                exponent,
                limit: config.max_degree,
            });
        }
        // Bounded by `max_degree` above.
        let magnitude = magnitude as u32;
        let (numerator, denominator) = if exponent < 0 {
            if self.numerator.is_zero() {
                return Err(Unsupported::DivisionByZero);
            }
            (&self.denominator, &self.numerator)
        } else {
            (&self.numerator, &self.denominator)
        };
        Self {
            numerator: numerator.pow(magnitude),
            denominator: denominator.pow(magnitude),
        }
        .checked(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn poly(coefficients: &[i64]) -> Polynomial {
        Polynomial::new(
            coefficients
                .iter()
                .map(|&c| BigRational::from_integer(BigInt::from(c)))
                .collect(),
        )
    }

    fn roots(polynomial: &Polynomial) -> Vec<(String, usize)> {
        polynomial
            .factor(&SolverConfig::default())
            .unwrap()
            .roots
            .into_iter()
            .map(|r| (r.value.to_string(), r.multiplicity))
            .collect()
    }

    #[test]
    fn arithmetic() {
        // (x - 2)(x + 3) = x² + x - 6
        let product = &poly(&[-2, 1]) * &poly(&[3, 1]);
        assert_eq!(product, poly(&[-6, 1, 1]));
        assert_eq!(&product - &product, Polynomial::zero());
        assert_eq!(product.degree(), Some(2));
        assert_eq!(Polynomial::zero().degree(), None);
        assert_eq!(
            product.evaluate(&BigRational::from_integer(2.into())),
            BigRational::zero()
        );
        assert_eq!(poly(&[1, 1]).pow(2), poly(&[1, 2, 1]));
    }

    #[test]
    fn factors_rational_roots() {
        assert_eq!(roots(&poly(&[6, -5, 1])), [("2".to_string(), 1), ("3".to_string(), 1)]);
        // 2x³ - x² = x²(2x - 1)
        assert_eq!(
            roots(&poly(&[0, 0, -1, 2])),
            [("0".to_string(), 2), ("1/2".to_string(), 1)]
        );
        // (x - 1)³
        assert_eq!(roots(&poly(&[-1, 3, -3, 1])), [("1".to_string(), 3)]);
    }

    #[test]
    fn factors_irrational_and_complex_quadratics() {
        assert_eq!(
            roots(&poly(&[-2, 0, 1])),
            [("-√2".to_string(), 1), ("√2".to_string(), 1)]
        );
        // x² - x - 1
        assert_eq!(
            roots(&poly(&[-1, -1, 1])),
            [("(1 - √5)/2".to_string(), 1), ("(1 + √5)/2".to_string(), 1)]
        );
        // (x - 3)(x² + 1)
        let factored = poly(&[-3, 1, -3, 1]).factor(&SolverConfig::default()).unwrap();
        assert_eq!(factored.roots.len(), 1);
        assert_eq!(factored.roots[0].value, Real::from_integer(3));
        assert!(poly(&[1, 0, 1]).factor(&SolverConfig::default()).unwrap().roots.is_empty());
    }

    #[test]
    fn leading_coefficient_is_kept() {
        let factored = poly(&[6, -3]).factor(&SolverConfig::default()).unwrap();
        assert_eq!(factored.leading, BigRational::from_integer((-3).into()));
        assert_eq!(factored.roots[0].value, Real::from_integer(2));
    }

    #[test]
    fn irreducible_cubic_has_no_closed_form() {
        assert_eq!(
            poly(&[-2, 0, 0, 1]).factor(&SolverConfig::default()),
            Err(Unsupported::NoClosedForm(3))
        );
        // x⁵ - 2 has one real root, the fifth root of two.
        assert_eq!(
            poly(&[-2, 0, 0, 0, 0, 1]).factor(&SolverConfig::default()),
            Err(Unsupported::NoClosedForm(5))
        );
    }

    #[test]
    fn long_division_and_gcd() {
        // x³ - 1 = (x - 1)(x² + x + 1)
        let (quotient, remainder) = poly(&[-1, 0, 0, 1]).div_rem(&poly(&[-1, 1]));
        assert_eq!(quotient, poly(&[1, 1, 1]));
        assert!(remainder.is_zero());
        let (quotient, remainder) = poly(&[1, 0, 1]).div_rem(&poly(&[0, 2]));
        assert_eq!(quotient, poly(&[0, 1]).scale(&BigRational::new(1.into(), 2.into())));
        assert_eq!(remainder, Polynomial::one());

        // gcd((x - 1)²(x + 2), (x - 1)(x + 3)) = x - 1
        let a = &poly(&[1, -2, 1]) * &poly(&[2, 1]);
        let b = &poly(&[-1, 1]) * &poly(&[3, 1]);
        assert_eq!(a.gcd(&b), poly(&[-1, 1]));
        assert_eq!(poly(&[2, 0, 1]).gcd(&poly(&[1, 1])), Polynomial::one());

        assert_eq!(poly(&[5, 3, 0, 4]).derivative(), poly(&[3, 0, 12]));
        // (x + 1)² shifted by one is (x + 2)²
        assert_eq!(
            poly(&[1, 2, 1]).shift(&BigRational::one()),
            poly(&[4, 4, 1])
        );
    }

    #[test]
    fn repeated_irrational_factors() {
        // (x² - 2)²
        assert_eq!(
            roots(&poly(&[4, 0, -4, 0, 1])),
            [("-√2".to_string(), 2), ("√2".to_string(), 2)]
        );
        // (x² - 2)³(x - 1)
        let product = &poly(&[-2, 0, 1]).pow(3) * &poly(&[-1, 1]);
        assert_eq!(
            roots(&product),
            [
                ("-√2".to_string(), 3),
                ("1".to_string(), 1),
                ("√2".to_string(), 3)
            ]
        );
    }

    #[test]
    fn quartics() {
        // (x² - 2)(x² - 3)
        assert_eq!(
            roots(&poly(&[6, 0, -5, 0, 1])),
            [
                ("-√3".to_string(), 1),
                ("-√2".to_string(), 1),
                ("√2".to_string(), 1),
                ("√3".to_string(), 1)
            ]
        );
        // (x² + x - 1)(x² - x - 1)
        assert_eq!(
            roots(&poly(&[1, 0, -3, 0, 1])),
            [
                ("(-1 - √5)/2".to_string(), 1),
                ("(1 - √5)/2".to_string(), 1),
                ("(-1 + √5)/2".to_string(), 1),
                ("(1 + √5)/2".to_string(), 1)
            ]
        );
        // (x² + x - 1)(x² + 2), no rational roots and no symmetry in x.
        assert_eq!(
            roots(&poly(&[-2, 2, 1, 1, 1])),
            [("(-1 - √5)/2".to_string(), 1), ("(-1 + √5)/2".to_string(), 1)]
        );
        // (x² - 2)(x² - 2x - 1), roots ±√2 and 1 ± √2 across the shift.
        assert_eq!(
            roots(&(&poly(&[-2, 0, 1]) * &poly(&[-1, -2, 1]))),
            [
                ("-√2".to_string(), 1),
                ("1 - √2".to_string(), 1),
                ("√2".to_string(), 1),
                ("1 + √2".to_string(), 1)
            ]
        );
        assert!(roots(&poly(&[1, 0, 0, 0, 1])).is_empty());
        assert!(roots(&poly(&[2, 0, 3, 0, 1])).is_empty());
        // x⁴ + x + 1 is positive but splits into no rational quadratics.
        assert!(roots(&poly(&[1, 1, 0, 0, 1])).is_empty());
        // x⁴ - 2 has real roots ±⁴√2.
        assert_eq!(
            poly(&[-2, 0, 0, 0, 1]).factor(&SolverConfig::default()),
            Err(Unsupported::NoClosedForm(4))
        );
    }

    #[test]
    fn sturm_counts_distinct_real_roots() {
        assert_eq!(poly(&[1, 0, 0, 0, 1]).real_root_count(), 0);
        assert_eq!(poly(&[-2, 0, 0, 1]).real_root_count(), 1);
        assert_eq!(poly(&[6, 0, -5, 0, 1]).real_root_count(), 4);
        assert_eq!(poly(&[1, -2, 1]).real_root_count(), 1);
        assert_eq!(poly(&[7]).real_root_count(), 0);
    }

    #[test]
    fn candidate_count_is_bounded() {
        // 963761198400 has 6720 divisors.
        let big = 963_761_198_400;
        assert_eq!(
            poly(&[big, 1, 0, big]).factor(&SolverConfig::default()),
            Err(Unsupported::CoefficientsTooLarge)
        );
        let config = SolverConfig {
            max_root_candidates: 8,
            ..SolverConfig::default()
        };
        // 10 and 1 give 4 candidates, 36 and 1 give 9.
        assert!(poly(&[-10, 1, 0, 1]).factor(&config).is_ok());
        assert_eq!(
            poly(&[-36, 1, 0, 1]).factor(&config),
            Err(Unsupported::CoefficientsTooLarge)
        );
    }

    #[test]
    fn degree_limit() {
        let config = SolverConfig {
            max_degree: 2,
            ..SolverConfig::default()
        };
        let x = RationalFunction::x();
        let square = x.mul(&x, &config).unwrap();
        assert_eq!(
            square.mul(&x, &config),
            Err(Unsupported::DegreeTooLarge { degree: 3, limit: 2 })
        );
        assert!(matches!(
            x.pow(3, &config),
            Err(Unsupported::ExponentTooLarge { .. })
        ));
    }

    #[test]
    fn rational_functions_keep_denominators() {
        let config = SolverConfig::default();
        let x = RationalFunction::x();
        let reciprocal = RationalFunction::constant(BigRational::one())
            .div(&x, &config)
            .unwrap();
        let zero = reciprocal.sub(&reciprocal, &config).unwrap();
        assert!(zero.numerator.is_zero());
        assert_eq!(zero.denominator, Polynomial::x());
        assert_eq!(
            x.div(&RationalFunction::constant(BigRational::zero()), &config),
            Err(Unsupported::DivisionByZero)
        );
    }
}
