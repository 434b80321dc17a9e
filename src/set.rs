use std::cmp::Ordering;
use std::fmt;
use std::ops::Deref;

use crate::real::Real;

/// One end of an interval on the extended real line.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Endpoint {
    NegInfinity,
    Finite(Real),
    PosInfinity,
}

impl Endpoint {
    pub fn is_finite(&self) -> bool {
        matches!(self, Self::Finite(_))
    }

    pub fn as_real(&self) -> Option<&Real> {
        match self {
            Self::Finite(value) => Some(value),
            _ => None,
        }
    }
}

impl From<Real> for Endpoint {
    fn from(value: Real) -> Self {
        Self::Finite(value)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::NegInfinity => write!(f, "-∞"),
            Self::Finite(value) => write!(f, "{value}"),
            Self::PosInfinity => write!(f, "∞"),
        }
    }
}

/// A non-empty interval of reals.
///
/// Infinite sides are always open, and `start == end` only occurs for a
/// closed single point.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Interval {
    start: Endpoint,
    end: Endpoint,
    left_open: bool,
    right_open: bool,
}

impl Interval {
    /// Returns `None` if the described interval holds no real number.
    pub fn new(start: Endpoint, end: Endpoint, left_open: bool, right_open: bool) -> Option<Self> {
        if start == Endpoint::PosInfinity || end == Endpoint::NegInfinity {
            return None;
        }
        let left_open = left_open || !start.is_finite();
        let right_open = right_open || !end.is_finite();
        match start.cmp(&end) {
            Ordering::Greater => None,
            Ordering::Equal if left_open || right_open => None,
            _ => Some(Self {
                start,
                end,
                left_open,
                right_open,
            }),
        }
    }

    pub fn open(start: Endpoint, end: Endpoint) -> Option<Self> {
        Self::new(start, end, true, true)
    }

    pub fn closed(start: Real, end: Real) -> Option<Self> {
        Self::new(start.into(), end.into(), false, false)
    }

    pub fn point(value: Real) -> Self {
        Self {
            start: Endpoint::Finite(value.clone()),
            end: Endpoint::Finite(value),
            left_open: false,
            right_open: false,
        }
    }

    pub fn real_line() -> Self {
        Self {
            start: Endpoint::NegInfinity,
            end: Endpoint::PosInfinity,
            left_open: true,
            right_open: true,
        }
    }

    pub fn start(&self) -> &Endpoint {
        &self.start
    }

    pub fn end(&self) -> &Endpoint {
        &self.end
    }

    pub fn left_open(&self) -> bool {
        self.left_open
    }

    pub fn right_open(&self) -> bool {
        self.right_open
    }

    pub fn is_point(&self) -> bool {
        self.start == self.end
    }

    fn is_real_line(&self) -> bool {
        self.start == Endpoint::NegInfinity && self.end == Endpoint::PosInfinity
    }

    pub fn contains(&self, value: &Real) -> bool {
        let value = Endpoint::Finite(value.clone());
        let after_start = match self.start.cmp(&value) {
            Ordering::Less => true,
            Ordering::Equal => !self.left_open,
            Ordering::Greater => false,
        };
        let before_end = match value.cmp(&self.end) {
            Ordering::Less => true,
            Ordering::Equal => !self.right_open,
            Ordering::Greater => false,
        };
        after_start && before_end
    }

    pub fn intersection(&self, other: &Self) -> Option<Self> {
        let (start, left_open) = match self.start.cmp(&other.start) {
            Ordering::Less => (&other.start, other.left_open),
            Ordering::Greater => (&self.start, self.left_open),
            Ordering::Equal => (&self.start, self.left_open || other.left_open),
        };
        let (end, right_open) = match self.end.cmp(&other.end) {
            Ordering::Less => (&self.end, self.right_open),
            Ordering::Greater => (&other.end, other.right_open),
            Ordering::Equal => (&self.end, self.right_open || other.right_open),
        };
        Self::new(start.clone(), end.clone(), left_open, right_open)
    }

    /// Whether `next`, which starts no earlier than `self`, overlaps `self` or
    /// meets it at a point that one of them contains.
    fn touches(&self, next: &Self) -> bool {
        match next.start.cmp(&self.end) {
            Ordering::Less => true,
            Ordering::Equal => !(self.right_open && next.left_open),
            Ordering::Greater => false,
        }
    }

    fn absorb(&mut self, next: Self) {
        if next.start == self.start {
            self.left_open &= next.left_open;
        }
        match next.end.cmp(&self.end) {
            Ordering::Greater => {
                self.end = next.end;
                self.right_open = next.right_open;
            }
            Ordering::Equal => self.right_open &= next.right_open,
            Ordering::Less => {}
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let left = if self.left_open { "(" } else { "[" };
        let right = if self.right_open { ")" } else { "]" };
        write!(f, "{left}{}, {}{right}", self.start, self.end)
    }
}

/// A sorted, non-empty list of pairwise disjoint intervals, no two of which
/// could be merged.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Intervals(Vec<Interval>);

impl Deref for Intervals {
    type Target = [Interval];

    fn deref(&self) -> &[Interval] {
        &self.0
    }
}

/// The exact set of reals satisfying an inequality, in canonical form.
///
/// Every set has exactly one representation: `(-∞, ∞)` is always `Reals`,
/// and unions are maximally merged. Derived equality is therefore set
/// equality.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum SolutionSet {
    Empty,
    Reals,
    Union(Intervals),
}

impl SolutionSet {
    /// The canonical set covering all of `intervals`.
    ///
    /// Overlapping intervals merge, and so do intervals meeting at a point
    /// contained in either one: `[a, b) ∪ [b, c]` is `[a, c]` while
    /// `(a, b) ∪ (b, c)` stays two intervals.
    pub fn from_intervals(intervals: impl IntoIterator<Item = Interval>) -> Self {
        let mut intervals: Vec<Interval> = intervals.into_iter().collect();
        // Closed starts sort before open ones at the same point.
        intervals.sort_by(|a, b| {
            a.start
                .cmp(&b.start)
                .then(a.left_open.cmp(&b.left_open))
        });

        let mut merged: Vec<Interval> = Vec::with_capacity(intervals.len());
        for next in intervals {
            match merged.last_mut() {
                Some(last) if last.touches(&next) => last.absorb(next),
                _ => merged.push(next),
            }
        }

        match merged.as_slice() {
            [] => Self::Empty,
            [only] if only.is_real_line() => Self::Reals,
            _ => Self::Union(Intervals(merged)),
        }
    }

    pub fn interval(interval: Interval) -> Self {
        Self::from_intervals([interval])
    }

    /// Constituent intervals in increasing order; `Reals` is `(-∞, ∞)`.
    pub fn intervals(&self) -> Vec<Interval> {
        match self {
            Self::Empty => Vec::new(),
            Self::Reals => vec![Interval::real_line()],
            Self::Union(intervals) => intervals.to_vec(),
        }
    }

    pub fn canonicalize(&self) -> Self {
        Self::from_intervals(self.intervals())
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    pub fn contains(&self, value: &Real) -> bool {
        match self {
            Self::Empty => false,
            Self::Reals => true,
            Self::Union(intervals) => intervals.iter().any(|i| i.contains(value)),
        }
    }

    pub fn union(&self, other: &Self) -> Self {
        Self::from_intervals(self.intervals().into_iter().chain(other.intervals()))
    }

    pub fn intersection(&self, other: &Self) -> Self {
        match (self, other) {
            (Self::Empty, _) | (_, Self::Empty) => Self::Empty,
            (Self::Reals, set) | (set, Self::Reals) => set.clone(),
            (Self::Union(lhs), Self::Union(rhs)) => Self::from_intervals(
                lhs.iter()
                    .flat_map(|a| rhs.iter().filter_map(move |b| a.intersection(b))),
            ),
        }
    }

    /// All reals except the given points.
    pub fn reals_except(points: impl IntoIterator<Item = Real>) -> Self {
        let mut points: Vec<Real> = points.into_iter().collect();
        points.sort();
        points.dedup();
        let mut start = Endpoint::NegInfinity;
        let mut pieces = Vec::with_capacity(points.len() + 1);
        for point in points {
            let end = Endpoint::Finite(point);
            pieces.extend(Interval::open(start, end.clone()));
            start = end;
        }
        pieces.extend(Interval::open(start, Endpoint::PosInfinity));
        Self::from_intervals(pieces)
    }
}

impl fmt::Display for SolutionSet {
    /// Interval notation joined by `∪`, `∅` for the empty set and `ℝ` for
    /// all reals. The output is accepted by
    /// [`parse_student_set`](crate::parse_student_set).
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "∅"),
            Self::Reals => write!(f, "ℝ"),
            Self::Union(intervals) => {
                for (i, interval) in intervals.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ∪ ")?;
                    }
                    write!(f, "{interval}")?;
                }
                Ok(())
            }
        }
    }
}

/// Intersection of all `sets`, folded left to right.
///
/// An empty slice yields `Reals`, the identity of intersection.
pub fn intersect(sets: &[SolutionSet]) -> SolutionSet {
    sets.iter()
        .fold(SolutionSet::Reals, |acc, set| acc.intersection(set))
}
