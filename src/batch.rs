#[cfg(feature = "rayon")]
use rayon::prelude::{IntoParallelRefIterator, ParallelIterator};
use tracing::{debug, warn};

use crate::config::SolverConfig;
use crate::error::Error;
use crate::parse::parse_inequality;
use crate::set::{intersect, SolutionSet};
use crate::solve::solve_with;

/// Solutions of several inequalities that must hold together.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Combined {
    /// Every non-blank line with its own solution, in input order.
    pub lines: Vec<(String, SolutionSet)>,
    /// The intersection of all of them.
    pub common: SolutionSet,
}

/// Parse and solve one line of text.
pub fn solve_line(line: &str) -> Result<SolutionSet, Error> {
    solve_line_with(line, &SolverConfig::default())
}

pub fn solve_line_with(line: &str, config: &SolverConfig) -> Result<SolutionSet, Error> {
    solve_with(&parse_inequality(line)?, config)
}

/// Solve each non-blank line and intersect the results.
pub fn solve_lines<S: AsRef<str>>(lines: &[S]) -> Result<Combined, Error> {
    solve_lines_with(lines, &SolverConfig::default())
}

/// Like [`solve_lines`] with explicit limits.
///
/// Stops at the first line that fails, reported as [`Error::Line`] with its
/// 1-based position in `lines`; blank lines still count towards that position.
pub fn solve_lines_with<S: AsRef<str>>(
    lines: &[S],
    config: &SolverConfig,
) -> Result<Combined, Error> {
    let numbered: Vec<(usize, &str)> = lines
        .iter()
        .enumerate()
        .map(|(i, line)| (i + 1, line.as_ref().trim()))
        .filter(|(_, line)| !line.is_empty())
        .collect();
    if numbered.is_empty() {
        return Err(Error::syntax("", "no inequality given"));
    }

    let solve = |&(index, line): &(usize, &str)| {
        debug!(index, line, "solving line");
        solve_line_with(line, config)
    };
    #[cfg(feature = "rayon")]
    let results: Vec<_> = numbered.par_iter().map(solve).collect();
    #[cfg(not(feature = "rayon"))]
    let results: Vec<_> = numbered.iter().map(solve).collect();

    let mut solved = Vec::with_capacity(numbered.len());
    for ((index, line), result) in numbered.into_iter().zip(results) {
        match result {
            Ok(set) => solved.push((line.to_string(), set)),
            Err(error) => {
                warn!(index, %error, "line failed");
                return Err(error.at_line(index));
            }
        }
    }
    let sets: Vec<SolutionSet> = solved.iter().map(|(_, set)| set.clone()).collect();
    Ok(Combined {
        common: intersect(&sets),
        lines: solved,
    })
}
