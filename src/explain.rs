use std::fmt;

use serde::Serialize;

use crate::set::{Endpoint, SolutionSet};

/// Whether an interval includes its boundary point.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Openness {
    Open,
    Closed,
}

impl Openness {
    fn from_open(open: bool) -> Self {
        if open {
            Self::Open
        } else {
            Self::Closed
        }
    }
}

impl fmt::Display for Openness {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Open => write!(f, "open"),
            Self::Closed => write!(f, "closed"),
        }
    }
}

/// Both boundaries of one interval of a solution set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EndpointDescription {
    pub start: Endpoint,
    pub left: Openness,
    pub end: Endpoint,
    pub right: Openness,
}

impl fmt::Display for EndpointDescription {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let left = match self.left {
            Openness::Open => "(",
            Openness::Closed => "[",
        };
        let right = match self.right {
            Openness::Open => ")",
            Openness::Closed => "]",
        };
        write!(
            f,
            "{left}{}, {}{right} (left: {}, right: {})",
            self.start, self.end, self.left, self.right
        )
    }
}

/// Boundaries of every interval in increasing order.
pub fn describe_endpoints(set: &SolutionSet) -> Vec<EndpointDescription> {
    set.intervals()
        .into_iter()
        .map(|interval| EndpointDescription {
            left: Openness::from_open(interval.left_open()),
            right: Openness::from_open(interval.right_open()),
            start: interval.start().clone(),
            end: interval.end().clone(),
        })
        .collect()
}

/// One line per interval, e.g. `[-2, 8] (left: closed, right: closed)`.
///
/// `None` for the empty set, which has no boundaries to explain.
pub fn explain_endpoints(set: &SolutionSet) -> Option<Vec<String>> {
    if set.is_empty() {
        return None;
    }
    Some(
        describe_endpoints(set)
            .iter()
            .map(ToString::to_string)
            .collect(),
    )
}
