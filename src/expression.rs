use std::fmt;

use num_rational::BigRational;
use num_traits::Signed;

/// A real-valued expression in the single unknown `x`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Expression {
    // Binary ops.
    Add(Box<Expression>, Box<Expression>),
    Div(Box<Expression>, Box<Expression>),
    Mul(Box<Expression>, Box<Expression>),
    Pow(Box<Expression>, Box<Expression>),
    Sub(Box<Expression>, Box<Expression>),

    // Unary ops.
    Neg(Box<Expression>),
    Abs(Box<Expression>),
    Sqrt(Box<Expression>),

    // Constant.
    Literal(BigRational),

    // The unknown.
    Variable,
}

/// Comparison operator of an inequality.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Comparison {
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
}

/// One inequality statement `lhs op rhs`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Relation {
    pub lhs: Expression,
    pub op: Comparison,
    pub rhs: Expression,
}

impl Comparison {
    /// Scan order used when looking for the operator of an inequality. The
    /// two-character operators come first so `<=` is never read as `<`.
    pub const SCAN_ORDER: [Comparison; 4] = [
        Comparison::LessEqual,
        Comparison::GreaterEqual,
        Comparison::Less,
        Comparison::Greater,
    ];

    pub fn symbol(self) -> &'static str {
        match self {
            Self::Less => "<",
            Self::LessEqual => "<=",
            Self::Greater => ">",
            Self::GreaterEqual => ">=",
        }
    }

    pub fn is_strict(self) -> bool {
        matches!(self, Self::Less | Self::Greater)
    }
}

impl Expression {
    pub fn literal(value: i64) -> Self {
        Self::Literal(BigRational::from_integer(value.into()))
    }

    /// Number of nodes in the tree.
    pub fn size(&self) -> usize {
        match self {
            Self::Add(lhs, rhs)
            | Self::Div(lhs, rhs)
            | Self::Mul(lhs, rhs)
            | Self::Pow(lhs, rhs)
            | Self::Sub(lhs, rhs) => 1 + lhs.size() + rhs.size(),
            Self::Neg(only) | Self::Abs(only) | Self::Sqrt(only) => 1 + only.size(),
            Self::Literal(_) | Self::Variable => 1,
        }
    }

    pub fn contains_variable(&self) -> bool {
        match self {
            Self::Add(lhs, rhs)
            | Self::Div(lhs, rhs)
            | Self::Mul(lhs, rhs)
            | Self::Pow(lhs, rhs)
            | Self::Sub(lhs, rhs) => lhs.contains_variable() || rhs.contains_variable(),
            Self::Neg(only) | Self::Abs(only) | Self::Sqrt(only) => only.contains_variable(),
            Self::Literal(_) => false,
            Self::Variable => true,
        }
    }

    /// Argument of an absolute value whose own argument holds no further
    /// absolute value, if any.
    pub fn innermost_abs(&self) -> Option<&Expression> {
        match self {
            Self::Add(lhs, rhs)
            | Self::Div(lhs, rhs)
            | Self::Mul(lhs, rhs)
            | Self::Pow(lhs, rhs)
            | Self::Sub(lhs, rhs) => lhs.innermost_abs().or_else(|| rhs.innermost_abs()),
            Self::Abs(only) => only.innermost_abs().or(Some(only.as_ref())),
            Self::Neg(only) | Self::Sqrt(only) => only.innermost_abs(),
            Self::Literal(_) | Self::Variable => None,
        }
    }

    /// Copy of `self` with every `Abs(argument)` replaced by `replacement`.
    pub fn replace_abs(&self, argument: &Expression, replacement: &Expression) -> Expression {
        let binary = |lhs: &Expression, rhs: &Expression| {
            (
                Box::new(lhs.replace_abs(argument, replacement)),
                Box::new(rhs.replace_abs(argument, replacement)),
            )
        };
        match self {
            Self::Abs(only) if only.as_ref() == argument => replacement.clone(),
            Self::Add(lhs, rhs) => {
                let (lhs, rhs) = binary(lhs, rhs);
                Self::Add(lhs, rhs)
            }
            Self::Div(lhs, rhs) => {
                let (lhs, rhs) = binary(lhs, rhs);
                Self::Div(lhs, rhs)
            }
            Self::Mul(lhs, rhs) => {
                let (lhs, rhs) = binary(lhs, rhs);
                Self::Mul(lhs, rhs)
            }
            Self::Pow(lhs, rhs) => {
                let (lhs, rhs) = binary(lhs, rhs);
                Self::Pow(lhs, rhs)
            }
            Self::Sub(lhs, rhs) => {
                let (lhs, rhs) = binary(lhs, rhs);
                Self::Sub(lhs, rhs)
            }
            Self::Neg(only) => Self::Neg(Box::new(only.replace_abs(argument, replacement))),
            Self::Abs(only) => Self::Abs(Box::new(only.replace_abs(argument, replacement))),
            Self::Sqrt(only) => Self::Sqrt(Box::new(only.replace_abs(argument, replacement))),
            Self::Literal(_) | Self::Variable => self.clone(),
        }
    }

    fn precedence(&self) -> u8 {
        match self {
            Self::Add(..) | Self::Sub(..) => 1,
            Self::Mul(..) | Self::Div(..) => 2,
            Self::Literal(value) if !value.is_integer() => 2,
            Self::Neg(_) => 3,
            Self::Literal(value) if value.is_negative() => 3,
            Self::Pow(..) => 4,
            Self::Abs(_) | Self::Sqrt(_) | Self::Literal(_) | Self::Variable => 5,
        }
    }
}

/// Writes `child`, parenthesized when it binds weaker than `min_precedence`.
fn write_operand(f: &mut fmt::Formatter, child: &Expression, min_precedence: u8) -> fmt::Result {
    if child.precedence() < min_precedence {
        write!(f, "({child})")
    } else {
        write!(f, "{child}")
    }
}

impl fmt::Display for Expression {
    /// Prints in the canonical input syntax (`**` for powers, `Abs(..)`), so
    /// the output parses back to an equal tree up to literal folding.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let (lhs, symbol, rhs, left_min, right_min) = match self {
            Self::Add(lhs, rhs) => (lhs, " + ", rhs, 1, 2),
            Self::Sub(lhs, rhs) => (lhs, " - ", rhs, 1, 2),
            Self::Mul(lhs, rhs) => (lhs, "*", rhs, 2, 3),
            Self::Div(lhs, rhs) => (lhs, "/", rhs, 2, 3),
            Self::Pow(lhs, rhs) => (lhs, "**", rhs, 5, 3),
            Self::Neg(only) => {
                write!(f, "-")?;
                return write_operand(f, only, 3);
            }
            Self::Abs(only) => return write!(f, "Abs({only})"),
            Self::Sqrt(only) => return write!(f, "sqrt({only})"),
            Self::Literal(value) => return write!(f, "{value}"),
            Self::Variable => return write!(f, "x"),
        };
        write_operand(f, lhs, left_min)?;
        write!(f, "{symbol}")?;
        write_operand(f, rhs, right_min)
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {} {}", self.lhs, self.op, self.rhs)
    }
}
