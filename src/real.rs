use std::cmp::Ordering;
use std::fmt;
use std::ops::Neg;

use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};

/// Largest bit length of a numerator or denominator that arithmetic may
/// produce. Anything bigger is treated as out of reach.
const MAX_BITS: u64 = 8192;

/// An exact real number of the form `a + b√d`.
///
/// `a` and `b` are rationals and `d` is a square-free integer greater than one
/// whenever `b` is nonzero. Values are kept normalized, so two `Real`s are
/// structurally equal exactly when they are numerically equal.
///
/// This covers every rational number and every root produced by the quadratic
/// formula on rational coefficients, which is all the solver needs to place
/// interval endpoints.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Real {
    rational: BigRational,
    surd: BigRational,
    radicand: BigInt,
}

impl Real {
    fn new(rational: BigRational, surd: BigRational, radicand: BigInt) -> Self {
        if surd.is_zero() || radicand.is_one() {
            Self {
                rational: rational + surd,
                surd: BigRational::zero(),
                radicand: BigInt::one(),
            }
        } else {
            Self {
                rational,
                surd,
                radicand,
            }
        }
    }

    /// `None` once a part outgrows [`MAX_BITS`].
    fn bounded(self) -> Option<Self> {
        let fits = |value: &BigRational| {
            value.numer().bits() <= MAX_BITS && value.denom().bits() <= MAX_BITS
        };
        (fits(&self.rational) && fits(&self.surd)).then_some(self)
    }

    pub fn zero() -> Self {
        Self::from(BigRational::zero())
    }

    pub fn from_integer(value: i64) -> Self {
        Self::from(BigRational::from_integer(BigInt::from(value)))
    }

    pub fn from_ratio(numer: i64, denom: i64) -> Self {
        Self::from(BigRational::new(BigInt::from(numer), BigInt::from(denom)))
    }

    /// The exact square root of a non-negative rational.
    ///
    /// Returns `None` for negative input, or when the square-free part of the
    /// value cannot be extracted because it exceeds `limit`.
    pub fn sqrt(value: &BigRational, limit: u64) -> Option<Self> {
        if value.is_negative() {
            return None;
        }
        if value.is_zero() {
            return Some(Self::zero());
        }
        // √(p/q) = √(p·q) / q
        let product = value.numer() * value.denom();
        let (square, free) = square_free_split(&product, limit)?;
        let coefficient = BigRational::new(square, value.denom().clone());
        Some(Self::new(BigRational::zero(), coefficient, free))
    }

    /// Rational part `a`.
    pub fn rational_part(&self) -> &BigRational {
        &self.rational
    }

    /// Coefficient `b` of the radical.
    pub fn surd_part(&self) -> &BigRational {
        &self.surd
    }

    /// Square-free radicand `d`, `1` for rational values.
    pub fn radicand(&self) -> &BigInt {
        &self.radicand
    }

    pub fn as_rational(&self) -> Option<&BigRational> {
        self.surd.is_zero().then_some(&self.rational)
    }

    pub fn is_zero(&self) -> bool {
        self.rational.is_zero() && self.surd.is_zero()
    }

    pub fn signum(&self) -> Ordering {
        sign_of_pair(&self.rational, &self.surd, &self.radicand)
    }

    pub fn abs(&self) -> Self {
        if self.signum() == Ordering::Less {
            -self
        } else {
            self.clone()
        }
    }

    pub fn to_f64(&self) -> f64 {
        let rational = self.rational.to_f64().unwrap_or(f64::NAN);
        if self.surd.is_zero() {
            return rational;
        }
        let surd = self.surd.to_f64().unwrap_or(f64::NAN);
        let radicand = self.radicand.to_f64().unwrap_or(f64::NAN);
        rational + surd * radicand.sqrt()
    }

    /// Radicand shared by `self` and `other`, if their sum stays in `ℚ(√d)`.
    fn common_radicand(&self, other: &Self) -> Option<BigInt> {
        if self.surd.is_zero() {
            Some(other.radicand.clone())
        } else if other.surd.is_zero() || self.radicand == other.radicand {
            Some(self.radicand.clone())
        } else {
            None
        }
    }

    /// Whether sums and products of `self` and `other` stay in `a + b√d` form.
    pub fn shares_radicand(&self, other: &Self) -> bool {
        self.common_radicand(other).is_some()
    }

    /// `None` when the radicands differ or the result grows too large.
    pub fn checked_add(&self, other: &Self) -> Option<Self> {
        let radicand = self.common_radicand(other)?;
        Self::new(
            &self.rational + &other.rational,
            &self.surd + &other.surd,
            radicand,
        )
        .bounded()
    }

    pub fn checked_sub(&self, other: &Self) -> Option<Self> {
        self.checked_add(&-other)
    }

    pub fn checked_mul(&self, other: &Self) -> Option<Self> {
        let radicand = self.common_radicand(other)?;
        let d = BigRational::from_integer(radicand.clone());
        // (a + b√d)(c + e√d) = ac + be·d + (ae + bc)√d
        let rational = &self.rational * &other.rational + &self.surd * &other.surd * d;
        let surd = &self.rational * &other.surd + &self.surd * &other.rational;
        Self::new(rational, surd, radicand).bounded()
    }

    /// `1 / self`, or `None` for zero.
    pub fn checked_recip(&self) -> Option<Self> {
        if self.is_zero() {
            return None;
        }
        // 1 / (a + b√d) = (a - b√d) / (a² - b²d)
        let d = BigRational::from_integer(self.radicand.clone());
        let norm = &self.rational * &self.rational - &self.surd * &self.surd * d;
        Self::new(
            &self.rational / &norm,
            -&self.surd / &norm,
            self.radicand.clone(),
        )
        .bounded()
    }

    pub fn checked_div(&self, other: &Self) -> Option<Self> {
        self.checked_mul(&other.checked_recip()?)
    }

    pub fn checked_pow(&self, exponent: i64) -> Option<Self> {
        let base = if exponent < 0 {
            self.checked_recip()?
        } else {
            self.clone()
        };
        let mut output = Self::from(BigRational::one());
        for _ in 0..exponent.unsigned_abs() {
            output = output.checked_mul(&base)?;
        }
        Some(output)
    }
}

impl From<BigRational> for Real {
    fn from(value: BigRational) -> Self {
        Self {
            rational: value,
            surd: BigRational::zero(),
            radicand: BigInt::one(),
        }
    }
}

impl Neg for &Real {
    type Output = Real;

    fn neg(self) -> Real {
        Real {
            rational: -&self.rational,
            surd: -&self.surd,
            radicand: self.radicand.clone(),
        }
    }
}

impl Neg for Real {
    type Output = Real;

    fn neg(self) -> Real {
        -&self
    }
}

impl PartialOrd for Real {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Real {
    fn cmp(&self, other: &Self) -> Ordering {
        let difference = &self.rational - &other.rational;
        sign_of_sum(
            &difference,
            &self.surd,
            &self.radicand,
            &-&other.surd,
            &other.radicand,
        )
    }
}

impl fmt::Display for Real {
    /// Prints `p/q` for rationals and a single fraction over a common
    /// denominator otherwise, e.g. `(1 - √5)/2` or `3√2/4`.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.surd.is_zero() {
            return write!(f, "{}", self.rational);
        }
        let denom = self.rational.denom().lcm(self.surd.denom());
        let scale = BigRational::from_integer(denom.clone());
        let rational = (&self.rational * &scale).to_integer();
        let surd = (&self.surd * &scale).to_integer();

        let magnitude = surd.abs();
        let radical = if magnitude.is_one() {
            format!("√{}", self.radicand)
        } else {
            format!("{magnitude}√{}", self.radicand)
        };
        let numerator = match (rational.is_zero(), surd.is_negative()) {
            (true, false) => radical,
            (true, true) => format!("-{radical}"),
            (false, false) => format!("{rational} + {radical}"),
            (false, true) => format!("{rational} - {radical}"),
        };
        if denom.is_one() {
            write!(f, "{numerator}")
        } else if rational.is_zero() {
            write!(f, "{numerator}/{denom}")
        } else {
            write!(f, "({numerator})/{denom}")
        }
    }
}

/// Splits a non-negative integer `n` into `(s, k)` with `n = s²·k` and `k`
/// square-free. Gives up above `limit`.
fn square_free_split(n: &BigInt, limit: u64) -> Option<(BigInt, BigInt)> {
    let mut rest = n.to_u64()?;
    if rest > limit {
        return None;
    }
    let mut square = 1u64;
    let mut free = 1u64;
    let mut p = 2u64;
    while p * p <= rest {
        let mut exponent = 0;
        while rest % p == 0 {
            rest /= p;
            exponent += 1;
        }
        square *= p.pow(exponent / 2);
        if exponent % 2 == 1 {
            free *= p;
        }
        p += 1;
    }
    free *= rest;
    Some((BigInt::from(square), BigInt::from(free)))
}

fn sign(value: &BigRational) -> Ordering {
    value.cmp(&BigRational::zero())
}

/// Sign of `p + q√d`.
fn sign_of_pair(p: &BigRational, q: &BigRational, d: &BigInt) -> Ordering {
    let (sp, sq) = (sign(p), sign(q));
    if sq == Ordering::Equal {
        return sp;
    }
    if sp == Ordering::Equal || sp == sq {
        return sq;
    }
    // Opposite signs: the term with the larger square wins.
    let p_squared = p * p;
    let q_squared = q * q * BigRational::from_integer(d.clone());
    match p_squared.cmp(&q_squared) {
        Ordering::Greater => sp,
        Ordering::Less => sq,
        Ordering::Equal => Ordering::Equal,
    }
}

/// Sign of `p + q√m + r√n` for square-free `m` and `n`.
fn sign_of_sum(
    p: &BigRational,
    q: &BigRational,
    m: &BigInt,
    r: &BigRational,
    n: &BigInt,
) -> Ordering {
    if q.is_zero() {
        return sign_of_pair(p, r, n);
    }
    if r.is_zero() {
        return sign_of_pair(p, q, m);
    }
    if m == n {
        return sign_of_pair(p, &(q + r), m);
    }

    // Sign of s = q√m + r√n. Opposite terms cannot cancel since m ≠ n.
    let q_squared = q * q * BigRational::from_integer(m.clone());
    let r_squared = r * r * BigRational::from_integer(n.clone());
    let s_sign = if sign(q) == sign(r) || q_squared > r_squared {
        sign(q)
    } else {
        sign(r)
    };
    let p_sign = sign(p);
    if p_sign == Ordering::Equal || p_sign == s_sign {
        return s_sign;
    }

    // p and s disagree; compare p² with s² = q²m + r²n + 2qr·g√k where
    // mn = g²k.
    let g = m.gcd(n);
    let k = (m / &g) * (n / &g);
    let t = p * p - q_squared - r_squared;
    let cross = -(q * r * BigRational::from_integer(BigInt::from(2) * g));
    match sign_of_pair(&t, &cross, &k) {
        Ordering::Greater => p_sign,
        Ordering::Less => s_sign,
        Ordering::Equal => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIMIT: u64 = 1_000_000_000_000;

    fn rational(numer: i64, denom: i64) -> BigRational {
        BigRational::new(BigInt::from(numer), BigInt::from(denom))
    }

    fn sqrt(numer: i64, denom: i64) -> Real {
        Real::sqrt(&rational(numer, denom), LIMIT).unwrap()
    }

    #[test]
    fn square_roots_are_simplified() {
        assert_eq!(sqrt(9, 1), Real::from_integer(3));
        assert_eq!(sqrt(1, 4), Real::from_ratio(1, 2));
        let root_twelve = sqrt(12, 1);
        assert_eq!(root_twelve.surd_part(), &rational(2, 1));
        assert_eq!(root_twelve.radicand(), &BigInt::from(3));
        assert_eq!(sqrt(1, 2).to_string(), "√2/2");
        assert!(Real::sqrt(&rational(-1, 1), LIMIT).is_none());
    }

    #[test]
    fn arithmetic_stays_exact() {
        let root_two = sqrt(2, 1);
        let squared = root_two.checked_mul(&root_two).unwrap();
        assert_eq!(squared, Real::from_integer(2));

        let one_plus = Real::from_integer(1).checked_add(&root_two).unwrap();
        let inverse = one_plus.checked_recip().unwrap();
        // 1 / (1 + √2) = √2 - 1
        assert_eq!(inverse, root_two.checked_sub(&Real::from_integer(1)).unwrap());

        assert!(root_two.checked_add(&sqrt(3, 1)).is_none());
        assert!(Real::zero().checked_recip().is_none());
        assert_eq!(
            root_two.checked_pow(-2).unwrap(),
            Real::from_ratio(1, 2)
        );
    }

    #[test]
    fn growth_is_bounded() {
        let big = Real::from_integer(2).checked_pow(64).unwrap();
        let bigger = big.checked_pow(64).unwrap();
        assert_eq!(bigger.rational_part().numer().bits(), 4097);
        assert!(bigger.checked_pow(64).is_none());
        assert!(bigger.checked_pow(-64).is_none());
        assert!(bigger.checked_mul(&bigger).is_none());
        assert!(bigger.checked_recip().is_some());
    }

    #[test]
    fn ordering_with_one_radicand() {
        let root_two = sqrt(2, 1);
        assert!(root_two > Real::from_ratio(141, 100));
        assert!(root_two < Real::from_ratio(142, 100));
        assert!(-&root_two < Real::zero());
        let golden = Real::from_ratio(1, 2)
            .checked_add(&sqrt(5, 4))
            .unwrap();
        assert!(golden > Real::from_ratio(161, 100));
        assert!(golden < Real::from_ratio(162, 100));
    }

    #[test]
    fn ordering_across_radicands() {
        let root_two = sqrt(2, 1);
        let root_three = sqrt(3, 1);
        assert!(root_two < root_three);
        assert!(-&root_two > -&root_three);

        // 1 + √2 ≈ 2.414 against √6 ≈ 2.449
        let one_plus_root_two = Real::from_integer(1).checked_add(&root_two).unwrap();
        assert!(one_plus_root_two < sqrt(6, 1));
        // 3 - √2 ≈ 1.586 against √3 ≈ 1.732
        let three_minus_root_two = Real::from_integer(3).checked_sub(&root_two).unwrap();
        assert!(three_minus_root_two < root_three);
        assert_eq!(root_two.cmp(&root_two.clone()), Ordering::Equal);
    }

    #[test]
    fn display_uses_common_denominator() {
        let half = Real::from_ratio(1, 2);
        let root_five_half = sqrt(5, 4);
        assert_eq!(
            half.checked_sub(&root_five_half).unwrap().to_string(),
            "(1 - √5)/2"
        );
        assert_eq!((-sqrt(2, 1)).to_string(), "-√2");
        assert_eq!(sqrt(18, 1).to_string(), "3√2");
        assert_eq!(Real::from_ratio(-7, 3).to_string(), "-7/3");
        assert_eq!(
            Real::from_integer(-1).checked_add(&sqrt(2, 1)).unwrap().to_string(),
            "-1 + √2"
        );
    }

    #[test]
    fn converts_to_float() {
        assert!((sqrt(2, 1).to_f64() - std::f64::consts::SQRT_2).abs() < 1e-12);
        assert_eq!(Real::from_ratio(-5, 2).to_f64(), -2.5);
    }
}
