//! Exact solver for single-variable real inequalities.
//!
//! # Why?
//!
//! Grading. A student's answer in interval notation and the solver's answer
//! are both reduced to one canonical union of intervals with exact endpoints
//! (rationals and square roots like `(1 - √5)/2`, never floats), so checking
//! an answer is plain equality rather than numeric sampling.
//!
//! Covered families: linear, polynomial (rational roots, quadratic and
//! quartic factors, repeated factors), rational (denominator roots are always
//! excluded), and nested absolute values.
//!
//! # Example
//!
//! ```rust
//! use inequality_quest::*;
//!
//! let solution = solve_line("(x-1)/(x+2) >= 0").unwrap();
//! assert_eq!(solution.to_string(), "(-∞, -2) ∪ [1, ∞)");
//!
//! assert_eq!(grade("(-oo,-2) U [1,oo)", &solution), Verdict::Correct);
//! assert_eq!(grade("(-∞,-2] U [1,∞)", &solution), Verdict::Incorrect);
//! assert_eq!(grade("x >= 1", &solution), Verdict::Ungraded);
//!
//! let lines = explain_endpoints(&solution).unwrap();
//! assert_eq!(lines[1], "[1, ∞) (left: closed, right: open)");
//!
//! let plot = render(&solution, Viewport::default());
//! assert_eq!(plot.segments.len(), 2);
//! ```

mod answer;
mod batch;
mod config;
mod error;
mod evaluate;
mod exercise;
mod explain;
mod expression;
mod normalize;
mod parse;
mod plot;
mod polynomial;
mod real;
mod set;
mod solve;

/// Uses the [`pest`] parsing expression grammar language.
///
/// ```text
#[doc = include_str!("grammar.pest")]
/// ```
pub mod grammar_doc {}

pub use answer::{grade, parse_student_set, Verdict, EMPTY_SET_TOKENS, REAL_LINE_TOKENS};
pub use batch::{solve_line, solve_line_with, solve_lines, solve_lines_with, Combined};
pub use config::SolverConfig;
pub use error::{Error, Unsupported};
pub use exercise::{by_topic, exercises, find, topics, Exercise, Topic};
pub use explain::{describe_endpoints, explain_endpoints, EndpointDescription, Openness};
pub use expression::*;
pub use normalize::normalize;
pub use parse::{parse_inequality, ParseError, Rule};
pub use plot::{render, Marker, MarkerStyle, PlotSpec, Segment, Viewport};
pub use polynomial::{Factorization, Polynomial, RationalFunction, Root};
pub use real::Real;
pub use set::{intersect, Endpoint, Interval, Intervals, SolutionSet};
pub use solve::{solve, solve_with};
