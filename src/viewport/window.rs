//! Visible index window and y extent.

use std::ops::Range;

use serde::Serialize;

use crate::series::{Interval, Point};

/// Default minimum visible y span, as a fraction of the domain's y width.
pub const MIN_Y_SPAN_FRACTION: f64 = 0.01;

/// Half-open range of point indices inside the visible x range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IndexWindow {
    pub start: usize,
    pub end: usize,
}

impl IndexWindow {
    pub fn full(len: usize) -> Self {
        Self { start: 0, end: len }
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Finds the points of a sorted series with `x` inside `visible`.
///
/// The first index with `x >= visible.lower` falls back to 0 and the last
/// index with `x <= visible.upper` falls back to the series length when
/// nothing matches. The window never runs backwards.
pub fn index_window(points: &[Point], visible: Interval) -> IndexWindow {
    let first = points.partition_point(|p| p.x < visible.lower);
    let start = if first == points.len() { 0 } else { first };
    let through = points.partition_point(|p| p.x <= visible.upper);
    let end = if through == 0 { points.len() } else { through };
    IndexWindow {
        start,
        end: end.max(start),
    }
}

/// The y extent of `points`, or `domain` when there are none.
///
/// Extents narrower than `min_fraction` of the domain width are re-centered
/// to that width.
pub fn visible_y_range(points: &[Point], domain: Interval, min_fraction: f64) -> Interval {
    let extent = points
        .iter()
        .map(|p| p.y)
        .fold(None, |acc: Option<(f64, f64)>, y| match acc {
            None => Some((y, y)),
            Some((lo, hi)) => Some((lo.min(y), hi.max(y))),
        })
        .map_or(domain, |(lower, upper)| Interval { lower, upper });
    extent.with_min_width(domain.width() * min_fraction)
}
