use serde::Serialize;

use crate::error::Error;
use crate::set::{Endpoint, Interval, SolutionSet};

/// The visible part of the number line.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Viewport {
    xmin: f64,
    xmax: f64,
}

impl Viewport {
    pub fn new(xmin: f64, xmax: f64) -> Result<Self, Error> {
        if xmin.is_finite() && xmax.is_finite() && xmin < xmax {
            Ok(Self { xmin, xmax })
        } else {
            Err(Error::Viewport { xmin, xmax })
        }
    }

    pub fn xmin(&self) -> f64 {
        self.xmin
    }

    pub fn xmax(&self) -> f64 {
        self.xmax
    }

    fn contains(&self, x: f64) -> bool {
        self.xmin <= x && x <= self.xmax
    }

    /// Integer tick positions: from `trunc(xmin)` to `trunc(xmax)` in steps
    /// of a tenth of the width, at least 1.
    fn ticks(&self) -> Vec<i64> {
        let first = self.xmin.trunc() as i64;
        let last = self.xmax.trunc() as i64;
        let step = (((self.xmax - self.xmin) / 10.0).trunc() as i64).max(1);
        let mut ticks = Vec::new();
        let mut tick = Some(first);
        while let Some(position) = tick.filter(|&position| position <= last) {
            ticks.push(position);
            tick = position.checked_add(step);
        }
        ticks
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            xmin: -10.0,
            xmax: 10.0,
        }
    }
}

/// A thick stretch of the number line. A clipped end continues past the
/// viewport and carries no marker.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Segment {
    pub start: f64,
    pub end: f64,
    pub start_clipped: bool,
    pub end_clipped: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerStyle {
    /// The boundary belongs to the set.
    Filled,
    /// The boundary is excluded.
    Hollow,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Marker {
    pub position: f64,
    pub style: MarkerStyle,
}

/// Backend-neutral description of a number-line plot.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PlotSpec {
    pub viewport: Viewport,
    /// Always the full viewport width.
    pub baseline: (f64, f64),
    pub segments: Vec<Segment>,
    pub markers: Vec<Marker>,
    pub ticks: Vec<i64>,
}

/// Draw `set` on the number line between the viewport bounds.
///
/// Single points and the empty set leave only the baseline.
pub fn render(set: &SolutionSet, viewport: Viewport) -> PlotSpec {
    let mut segments = Vec::new();
    let mut markers = Vec::new();
    for interval in set.intervals().iter().filter(|i| !i.is_point()) {
        segments.extend(segment(interval, &viewport));
        markers.extend(marker(interval.start(), interval.left_open(), &viewport));
        markers.extend(marker(interval.end(), interval.right_open(), &viewport));
    }
    PlotSpec {
        viewport,
        baseline: (viewport.xmin, viewport.xmax),
        segments,
        markers,
        ticks: viewport.ticks(),
    }
}

fn segment(interval: &Interval, viewport: &Viewport) -> Option<Segment> {
    let (start, start_clipped) = match interval.start().as_real().map(|r| r.to_f64()) {
        Some(x) if x >= viewport.xmin => (x, false),
        _ => (viewport.xmin, true),
    };
    let (end, end_clipped) = match interval.end().as_real().map(|r| r.to_f64()) {
        Some(x) if x <= viewport.xmax => (x, false),
        _ => (viewport.xmax, true),
    };
    (start < end).then_some(Segment {
        start,
        end,
        start_clipped,
        end_clipped,
    })
}

fn marker(endpoint: &Endpoint, open: bool, viewport: &Viewport) -> Option<Marker> {
    let position = endpoint.as_real()?.to_f64();
    viewport.contains(position).then_some(Marker {
        position,
        style: if open {
            MarkerStyle::Hollow
        } else {
            MarkerStyle::Filled
        },
    })
}
