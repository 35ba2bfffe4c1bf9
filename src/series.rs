//! Point series and numeric intervals.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Width given to a zero-width domain near zero.
pub const MIN_DOMAIN_WIDTH: f64 = 0.001;

/// Relative widening applied to zero-width domains away from zero.
const DEGENERATE_RELATIVE_PAD: f64 = 0.0005;

/// A single sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Both coordinates are finite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// A closed numeric interval `[lower, upper]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    pub lower: f64,
    pub upper: f64,
}

impl Interval {
    /// Creates an interval, ordering the bounds.
    pub fn new(a: f64, b: f64) -> Self {
        if a <= b {
            Self { lower: a, upper: b }
        } else {
            Self { lower: b, upper: a }
        }
    }

    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    pub fn midpoint(&self) -> f64 {
        self.lower + self.width() / 2.0
    }

    pub fn contains(&self, value: f64) -> bool {
        (self.lower..=self.upper).contains(&value)
    }

    /// `self` lies entirely within `other`.
    pub fn is_within(&self, other: &Interval) -> bool {
        self.lower >= other.lower && self.upper <= other.upper
    }

    /// Intersection with `other`, or `other` itself when they are disjoint.
    pub fn clamp_to(&self, other: &Interval) -> Interval {
        let lower = self.lower.max(other.lower);
        let upper = self.upper.min(other.upper);
        if lower <= upper {
            Interval { lower, upper }
        } else {
            *other
        }
    }

    /// Widens a zero-width interval symmetrically around its center.
    ///
    /// An interval counts as zero-width when its width is within float
    /// rounding of its bounds. Any other interval, however narrow, is
    /// returned unchanged.
    pub fn non_degenerate(&self) -> Interval {
        let magnitude = self.lower.abs().max(self.upper.abs());
        if self.width() > f64::EPSILON * magnitude {
            return *self;
        }
        let width = (magnitude * DEGENERATE_RELATIVE_PAD * 2.0).max(MIN_DOMAIN_WIDTH);
        let center = self.midpoint();
        Interval {
            lower: center - width / 2.0,
            upper: center + width / 2.0,
        }
    }

    /// Re-centers the interval to at least `min_width`.
    pub fn with_min_width(&self, min_width: f64) -> Interval {
        if self.width() >= min_width {
            return *self;
        }
        let center = self.midpoint();
        Interval {
            lower: center - min_width / 2.0,
            upper: center + min_width / 2.0,
        }
    }
}

impl Default for Interval {
    fn default() -> Self {
        Self {
            lower: 0.0,
            upper: 1.0,
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.lower, self.upper)
    }
}

/// Rejected series input.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SeriesError {
    #[error("point {index} is not finite")]
    NonFinite { index: usize },
    #[error("point {index} has x = {x}, which is less than the previous x")]
    Unsorted { index: usize, x: f64 },
}

/// Points sorted ascending by `x`, all finite.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PointSeries {
    points: Vec<Point>,
}

impl PointSeries {
    /// Builds a series from raw samples, dropping non-finite points and sorting by `x`.
    ///
    /// The sort is stable, so samples sharing an `x` keep their order.
    pub fn from_unsorted(points: impl IntoIterator<Item = Point>) -> Self {
        let mut dropped = 0usize;
        let mut points: Vec<Point> = points
            .into_iter()
            .filter(|p| {
                let keep = p.is_finite();
                if !keep {
                    dropped += 1;
                }
                keep
            })
            .collect();
        points.sort_by(|a, b| a.x.partial_cmp(&b.x).unwrap_or(Ordering::Equal));
        if dropped > 0 {
            debug!(dropped, kept = points.len(), "dropped non-finite points");
        }
        Self { points }
    }

    /// Builds a series from parallel `x` and `y` slices.
    ///
    /// Extra values in the longer slice are ignored.
    pub fn from_xy(xs: &[f64], ys: &[f64]) -> Self {
        Self::from_unsorted(xs.iter().zip(ys).map(|(&x, &y)| Point::new(x, y)))
    }

    /// Wraps points that the caller already sorted.
    ///
    /// # Errors
    ///
    /// Returns [`SeriesError`] at the first non-finite or out-of-order point.
    pub fn from_sorted(points: Vec<Point>) -> Result<Self, SeriesError> {
        for (index, p) in points.iter().enumerate() {
            if !p.is_finite() {
                return Err(SeriesError::NonFinite { index });
            }
            if index > 0 && p.x < points[index - 1].x {
                return Err(SeriesError::Unsorted { index, x: p.x });
            }
        }
        Ok(Self { points })
    }

    /// Combines several series into one sorted series.
    pub fn merge<'a>(series: impl IntoIterator<Item = &'a PointSeries>) -> Self {
        Self::from_unsorted(
            series
                .into_iter()
                .flat_map(|s| s.points.iter().copied()),
        )
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Extent along `x`, `[0, 1]` when empty.
    pub fn x_bounds(&self) -> Interval {
        match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) => Interval::new(first.x, last.x),
            _ => Interval::default(),
        }
    }

    /// Extent along `y`, `[0, 1]` when empty.
    pub fn y_bounds(&self) -> Interval {
        let mut ys = self.points.iter().map(|p| p.y);
        let Some(first) = ys.next() else {
            return Interval::default();
        };
        let (lower, upper) = ys.fold((first, first), |(lo, hi), y| (lo.min(y), hi.max(y)));
        Interval { lower, upper }
    }

    /// Mean and population standard deviation of `y`.
    pub fn y_mean_std(&self) -> Option<(f64, f64)> {
        if self.points.is_empty() {
            return None;
        }
        let n = self.points.len() as f64;
        let mean = self.points.iter().map(|p| p.y).sum::<f64>() / n;
        let variance = self
            .points
            .iter()
            .map(|p| (p.y - mean).powi(2))
            .sum::<f64>()
            / n;
        Some((mean, variance.sqrt()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsorted_input_is_sorted_and_filtered() {
        let s = PointSeries::from_unsorted(vec![
            Point::new(3.0, 1.0),
            Point::new(1.0, f64::INFINITY),
            Point::new(f64::NAN, 2.0),
            Point::new(2.0, 5.0),
        ]);
        assert_eq!(s.len(), 2);
        assert_eq!(s.points()[0], Point::new(2.0, 5.0));
        assert_eq!(s.points()[1], Point::new(3.0, 1.0));
    }

    #[test]
    fn from_sorted_rejects_out_of_order() {
        let err = PointSeries::from_sorted(vec![Point::new(1.0, 0.0), Point::new(0.5, 0.0)]);
        assert_eq!(err, Err(SeriesError::Unsorted { index: 1, x: 0.5 }));
        let err = PointSeries::from_sorted(vec![Point::new(1.0, f64::NAN)]);
        assert_eq!(err, Err(SeriesError::NonFinite { index: 0 }));
    }

    #[test]
    fn merge_interleaves() {
        let a = PointSeries::from_xy(&[0.0, 2.0], &[1.0, 1.0]);
        let b = PointSeries::from_xy(&[1.0, 3.0], &[2.0, 2.0]);
        let m = PointSeries::merge([&a, &b]);
        let xs: Vec<f64> = m.points().iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![0.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn bounds_default_when_empty() {
        let s = PointSeries::default();
        assert_eq!(s.x_bounds(), Interval::new(0.0, 1.0));
        assert_eq!(s.y_bounds(), Interval::new(0.0, 1.0));
        assert!(s.y_mean_std().is_none());
    }

    #[test]
    fn bounds_cover_points() {
        let s = PointSeries::from_xy(&[0.0, 1.0, 2.0], &[3.0, -1.0, 7.0]);
        assert_eq!(s.x_bounds(), Interval::new(0.0, 2.0));
        assert_eq!(s.y_bounds(), Interval::new(-1.0, 7.0));
    }

    #[test]
    fn mean_and_population_std() {
        let s = PointSeries::from_xy(&[0.0, 1.0, 2.0, 3.0], &[2.0, 4.0, 4.0, 6.0]);
        let (mean, std) = s.y_mean_std().unwrap_or_default();
        assert!((mean - 4.0).abs() < 1e-12);
        assert!((std - 2.0_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn degenerate_interval_is_widened() {
        let i = Interval::new(5.0, 5.0).non_degenerate();
        assert!(i.width() >= MIN_DOMAIN_WIDTH);
        assert!((i.midpoint() - 5.0).abs() < 1e-12);
        let wide = Interval::new(0.0, 10.0);
        assert_eq!(wide.non_degenerate(), wide);
        let zero = Interval::new(0.0, 0.0).non_degenerate();
        assert_eq!(zero.width(), MIN_DOMAIN_WIDTH);
    }

    #[test]
    fn narrow_interval_is_not_widened() {
        for narrow in [
            Interval::new(0.0, 0.0003),
            Interval::new(1e-9, 2e-9),
            Interval::new(1000.0, 1000.0001),
        ] {
            assert_eq!(narrow.non_degenerate(), narrow);
        }
    }

    #[test]
    fn min_width_recenters() {
        let i = Interval::new(4.0, 4.0).with_min_width(2.0);
        assert_eq!(i, Interval::new(3.0, 5.0));
    }

    #[test]
    fn clamp_to_intersects() {
        let a = Interval::new(-1.0, 5.0);
        let b = Interval::new(0.0, 4.0);
        assert_eq!(a.clamp_to(&b), b);
        assert!(Interval::new(1.0, 2.0).is_within(&b));
    }
}
