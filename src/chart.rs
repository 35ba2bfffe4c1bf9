//! Chart assembly: picks one readable range per axis from its dimension.
//!
//! The dimension of each axis is inspected once, here. Everything after
//! construction goes through [`AxisRange`] and the [`Readable`] trait.

use tracing::{debug, warn};

use crate::range::{
    AxisRange, RangeError, Readable, ReadableDurationRange, ReadablePaceRange, ReadableRange,
};
use crate::series::{Interval, PointSeries};
use crate::units::{DurationUnit, PaceUnit};
use crate::viewport::ViewportEngine;

/// Default tick counts tried on the x axis.
pub const X_COUNTS: [usize; 2] = [3, 4];
/// Default tick counts tried on the y axis.
pub const Y_COUNTS: [usize; 3] = [4, 5, 6];

/// What the values on an axis measure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dimension {
    #[default]
    Plain,
    /// Elapsed time, with values stored in `unit`.
    Duration { unit: DurationUnit },
    /// Time per distance, stored in `data_unit` and labelled in `label_unit`.
    Pace {
        label_unit: PaceUnit,
        data_unit: PaceUnit,
    },
}

/// Dimension and candidate tick counts for one axis.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisSpec {
    pub dimension: Dimension,
    pub candidate_counts: Vec<usize>,
}

impl AxisSpec {
    pub fn plain_x() -> Self {
        Self {
            dimension: Dimension::Plain,
            candidate_counts: X_COUNTS.to_vec(),
        }
    }

    pub fn plain_y() -> Self {
        Self {
            dimension: Dimension::Plain,
            candidate_counts: Y_COUNTS.to_vec(),
        }
    }

    pub fn with_dimension(mut self, dimension: Dimension) -> Self {
        self.dimension = dimension;
        self
    }
}

/// A point series with its two axis ranges.
#[derive(Debug, Clone)]
pub struct Chart {
    series: PointSeries,
    x_domain: Interval,
    y_domain: Interval,
    x_axis: AxisRange,
    y_axis: AxisRange,
}

impl Chart {
    /// Builds both axis ranges for `series`.
    ///
    /// Plain and duration y axes are anchored at zero when the data is
    /// positive. A pace y axis spans one standard deviation on the fast
    /// side of the mean and falls back to a plain range when the pace is
    /// not finite.
    ///
    /// # Errors
    ///
    /// Returns a [`RangeError`] when an axis range cannot be computed, for
    /// example with an empty candidate count list.
    pub fn new(series: PointSeries, x_spec: &AxisSpec, y_spec: &AxisSpec) -> Result<Self, RangeError> {
        let x_domain = series.x_bounds().non_degenerate();
        let y_domain = series.y_bounds().non_degenerate();

        let x_axis = x_axis_range(x_domain, x_spec)?;
        let y_axis = y_axis_range(&series, y_domain, y_spec)?;
        debug!(
            x = x_axis.kind(),
            y = y_axis.kind(),
            x_count = x_axis.count(),
            y_count = y_axis.count(),
            points = series.len(),
            "chart axes built"
        );

        Ok(Self {
            series,
            x_domain,
            y_domain,
            x_axis,
            y_axis,
        })
    }

    pub fn series(&self) -> &PointSeries {
        &self.series
    }

    pub fn x_domain(&self) -> Interval {
        self.x_domain
    }

    pub fn y_domain(&self) -> Interval {
        self.y_domain
    }

    pub fn x_axis(&self) -> &AxisRange {
        &self.x_axis
    }

    pub fn y_axis(&self) -> &AxisRange {
        &self.y_axis
    }

    /// A viewport engine over this chart's series and axes.
    pub fn viewport(&self) -> ViewportEngine<'_> {
        ViewportEngine::with_axes(
            self.x_domain,
            self.y_domain,
            &self.series,
            self.x_axis.clone(),
            self.y_axis.clone(),
        )
    }
}

fn x_axis_range(domain: Interval, spec: &AxisSpec) -> Result<AxisRange, RangeError> {
    match spec.dimension {
        Dimension::Duration { unit } => {
            ReadableDurationRange::compute(domain.lower, domain.upper, unit).map(AxisRange::from)
        }
        Dimension::Plain | Dimension::Pace { .. } => {
            ReadableRange::compute(domain.lower, domain.upper, &spec.candidate_counts)
                .map(AxisRange::from)
        }
    }
}

fn y_axis_range(
    series: &PointSeries,
    domain: Interval,
    spec: &AxisSpec,
) -> Result<AxisRange, RangeError> {
    let anchored_lower = domain.lower.min(0.0);
    match spec.dimension {
        Dimension::Duration { unit } => {
            ReadableDurationRange::compute(anchored_lower, domain.upper, unit).map(AxisRange::from)
        }
        Dimension::Pace {
            label_unit,
            data_unit,
        } => {
            let (mean, std) = series.y_mean_std().unwrap_or((domain.upper, 0.0));
            let fast = domain.lower.max(mean - std);
            match ReadablePaceRange::compute(mean, fast, label_unit, data_unit) {
                Some(range) => Ok(range.into()),
                None => {
                    warn!(mean, std, "pace axis not finite, using a plain range");
                    ReadableRange::compute(domain.lower, domain.upper, &spec.candidate_counts)
                        .map(AxisRange::from)
                }
            }
        }
        Dimension::Plain => {
            ReadableRange::compute(anchored_lower, domain.upper, &spec.candidate_counts)
                .map(AxisRange::from)
        }
    }
}
