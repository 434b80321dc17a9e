use thiserror::Error;

/// Everything that can go wrong while turning text into a solution set.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum Error {
    /// The text is not an inequality we can read.
    #[error("syntax error in `{line}`: {reason}")]
    Syntax { line: String, reason: String },
    /// The inequality was read but has no closed-form real solution here.
    #[error("cannot solve `{relation}`: {reason}")]
    Solve {
        relation: String,
        reason: Unsupported,
    },
    /// A failure inside a multi-line batch; `index` counts from 1.
    #[error("line {index}: {source}")]
    Line {
        index: usize,
        #[source]
        source: Box<Error>,
    },
    #[error("invalid viewport [{xmin}, {xmax}]: xmin must be finite and less than xmax")]
    Viewport { xmin: f64, xmax: f64 },
}

impl Error {
    pub(crate) fn syntax(line: &str, reason: impl Into<String>) -> Self {
        Self::Syntax {
            line: line.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn at_line(self, index: usize) -> Self {
        Self::Line {
            index,
            source: Box::new(self),
        }
    }
}

/// Why a well-formed inequality could not be solved exactly.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum Unsupported {
    #[error("`{0}` is not a rational expression in x")]
    NotRational(String),
    #[error("exponent `{0}` is not a constant integer")]
    Exponent(String),
    #[error("exponent {exponent} exceeds the limit of {limit}")]
    ExponentTooLarge { exponent: i64, limit: usize },
    #[error("degree {degree} exceeds the limit of {limit}")]
    DegreeTooLarge { degree: usize, limit: usize },
    #[error("division by zero")]
    DivisionByZero,
    #[error("no closed form for the real roots of a degree {0} factor")]
    NoClosedForm(usize),
    #[error("coefficients are too large to factor exactly")]
    CoefficientsTooLarge,
    #[error("more than {0} nested absolute value cases")]
    TooManyCases(usize),
    #[error("expression has more than {0} nodes")]
    ExpressionTooLarge(usize),
}
