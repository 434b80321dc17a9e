use std::fmt;

use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Topic {
    Linear,
    Quadratic,
    Rational,
    AbsoluteValue,
}

impl Topic {
    pub const ALL: [Topic; 4] = [
        Topic::Linear,
        Topic::Quadratic,
        Topic::Rational,
        Topic::AbsoluteValue,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Quadratic => "quadratic",
            Self::Rational => "rational",
            Self::AbsoluteValue => "absolute value",
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A practice problem from the classroom catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Exercise {
    pub id: &'static str,
    pub topic: Topic,
    pub prompt: &'static str,
    /// Input for [`solve_line`](crate::solve_line).
    pub inequality: &'static str,
    pub hint: &'static str,
}

static EXERCISES: [Exercise; 7] = [
    Exercise {
        id: "A1",
        topic: Topic::Linear,
        prompt: "Solve the inequality: 2x - 3 ≤ 5",
        inequality: "2*x - 3 <= 5",
        hint: "Move the constants across, then divide by a positive number.",
    },
    Exercise {
        id: "A2",
        topic: Topic::Linear,
        prompt: "Solve the inequality: -3x + 6 > 0",
        inequality: "-3*x + 6 > 0",
        hint: "Dividing by a negative number flips the direction of the inequality.",
    },
    Exercise {
        id: "B1",
        topic: Topic::Quadratic,
        prompt: "Solve the inequality: x² - 5x + 6 ≥ 0",
        inequality: "x^2 - 5*x + 6 >= 0",
        hint: "Find the roots, then build a sign chart.",
    },
    Exercise {
        id: "B2",
        topic: Topic::Quadratic,
        prompt: "Solve the inequality: x² - 9 < 0",
        inequality: "x^2 - 9 < 0",
        hint: "x² - 9 = (x - 3)(x + 3).",
    },
    Exercise {
        id: "C1",
        topic: Topic::Rational,
        prompt: "Solve the inequality: (x - 1)/(x + 2) ≥ 0",
        inequality: "(x-1)/(x+2) >= 0",
        hint: "Critical points: x = 1 and x = -2 (but x ≠ -2).",
    },
    Exercise {
        id: "D1",
        topic: Topic::AbsoluteValue,
        prompt: "Solve the inequality: |x - 3| ≤ 5",
        inequality: "Abs(x-3) <= 5",
        hint: "|A| ≤ k ⇔ -k ≤ A ≤ k (k ≥ 0).",
    },
    Exercise {
        id: "D2",
        topic: Topic::AbsoluteValue,
        prompt: "Solve the inequality: |2x + 1| > 3",
        inequality: "Abs(2*x+1) > 3",
        hint: "|A| > k ⇔ A > k or A < -k (k ≥ 0).",
    },
];

/// The whole catalog in a fixed order.
pub fn exercises() -> &'static [Exercise] {
    &EXERCISES
}

/// Exercises of one topic, or all of them for `None`.
pub fn by_topic(topic: Option<Topic>) -> impl Iterator<Item = &'static Exercise> {
    EXERCISES
        .iter()
        .filter(move |exercise| topic.map_or(true, |topic| exercise.topic == topic))
}

pub fn find(id: &str) -> Option<&'static Exercise> {
    EXERCISES
        .iter()
        .find(|exercise| exercise.id.eq_ignore_ascii_case(id))
}

/// Topics that have at least one exercise, sorted.
pub fn topics() -> Vec<Topic> {
    let mut topics: Vec<Topic> = EXERCISES.iter().map(|exercise| exercise.topic).collect();
    topics.sort();
    topics.dedup();
    topics
}
