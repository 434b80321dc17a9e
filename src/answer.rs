use serde::Serialize;

use crate::config::SolverConfig;
use crate::parse::{parse_interval_notation, BoundNotation, IntervalNotation};
use crate::set::{Endpoint, Interval, SolutionSet};

/// Spellings accepted for the empty set.
pub const EMPTY_SET_TOKENS: [&str; 3] = ["∅", "EmptySet", "{}"];

/// Spellings accepted for the whole real line.
pub const REAL_LINE_TOKENS: [&str; 3] = ["R", "Reals", "ℝ"];

/// Parse a student's answer such as `(-∞,2] U (5,∞)`.
///
/// Returns `None` when nothing was typed or the notation is not understood,
/// including bounds too large to evaluate exactly.
/// That is distinct from `Some(SolutionSet::Empty)`, which the student writes
/// as `∅`. Intervals that contain nothing, like `(3,3)`, are dropped and the
/// union is brought into canonical form.
pub fn parse_student_set(text: &str) -> Option<SolutionSet> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    let text = text.replace('∪', "U");
    if let Some(set) = named_set(&text) {
        return Some(set);
    }
    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    if let Some(set) = named_set(&compact) {
        return Some(set);
    }

    let parts = parse_interval_notation(&compact).ok()?;
    let mut intervals = Vec::with_capacity(parts.len());
    for part in parts {
        intervals.extend(evaluate_interval(part)?);
    }
    Some(SolutionSet::from_intervals(intervals))
}

fn named_set(token: &str) -> Option<SolutionSet> {
    if EMPTY_SET_TOKENS.contains(&token) {
        Some(SolutionSet::Empty)
    } else if REAL_LINE_TOKENS.contains(&token) {
        Some(SolutionSet::Reals)
    } else {
        None
    }
}

/// `None` when a bound is not an exact constant, `Some(None)` when the
/// interval is empty.
fn evaluate_interval(notation: IntervalNotation) -> Option<Option<Interval>> {
    let start = evaluate_bound(notation.start)?;
    let end = evaluate_bound(notation.end)?;
    Some(Interval::new(
        start,
        end,
        notation.left_open,
        notation.right_open,
    ))
}

fn evaluate_bound(bound: BoundNotation) -> Option<Endpoint> {
    match bound {
        BoundNotation::NegativeInfinity => Some(Endpoint::NegInfinity),
        BoundNotation::PositiveInfinity => Some(Endpoint::PosInfinity),
        BoundNotation::Value(expression) => {
            if expression.size() > SolverConfig::default().max_expression_size {
                return None;
            }
            expression.evaluate_constant().map(Endpoint::Finite)
        }
    }
}

/// Outcome of comparing a student's answer with the solution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Correct,
    Incorrect,
    /// The answer was empty or could not be read.
    Ungraded,
}

/// Grade `text` against `reference` by canonical set equality.
pub fn grade(text: &str, reference: &SolutionSet) -> Verdict {
    match parse_student_set(text) {
        Some(answer) if answer == *reference => Verdict::Correct,
        Some(_) => Verdict::Incorrect,
        None => Verdict::Ungraded,
    }
}
