//! Readable ranges for elapsed-time axes.

use tracing::{debug, warn};

use super::RangeError;
use super::decimal::{Decimal, Rounding, format_fixed, int, round_to_multiple, to_decimal, to_f64};
use super::plain::{count_decimal, decimal_bounds};
use crate::units::DurationUnit;

/// Candidate tick counts for duration axes.
const COUNTS: [usize; 3] = [3, 4, 5];

/// Tick count used when no candidate covers the interval.
const FALLBACK_COUNT: usize = 5;

/// Increment multipliers for sub-second units.
const SUB_SECOND_FACTORS: &[i64] = &[1, 2, 5, 10, 20, 50, 100, 200, 500];
/// Increment multipliers for seconds and minutes.
const SEXAGESIMAL_FACTORS: &[i64] = &[1, 2, 5, 10, 15, 30];
/// Increment multipliers for hours.
const HOUR_FACTORS: &[i64] = &[1, 2, 5, 10, 12, 24];

/// A duration axis snapped to round values of a readable unit.
///
/// The unit is promoted from the interval's magnitude, so a two-second span
/// is labelled in milliseconds and a two-hour span in minutes.
///
/// # Examples
///
/// ```
/// use fitchart::range::ReadableDurationRange;
/// use fitchart::units::DurationUnit;
///
/// let range = ReadableDurationRange::compute(0.0, 300.0, DurationUnit::Seconds)
///     .expect("finite interval");
/// assert_eq!(range.label_unit(), DurationUnit::Minutes);
/// assert_eq!(range.labels(), ["0", "1", "2", "3", "4"]);
/// assert_eq!(range.end_f64(), 300.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ReadableDurationRange {
    /// Unit of the caller's bounds.
    data_unit: DurationUnit,
    /// Unit the labels are expressed in.
    label_unit: DurationUnit,
    start: Decimal,
    end: Decimal,
    /// In `label_unit`.
    increment: Decimal,
    count: usize,
    labels: Vec<String>,
}

/// Picks the label unit for an interval of `seconds` width.
///
/// Each threshold is 2.5 of the next larger unit.
pub fn readable_unit(seconds: Decimal) -> DurationUnit {
    let magnitude = if seconds < int(0) { -seconds } else { seconds };
    let half = int(5) / int(2);
    let mut chosen = DurationUnit::Hours;
    for pair in DurationUnit::ALL.windows(2) {
        if magnitude <= half * pair[1].seconds() {
            chosen = pair[0];
            break;
        }
    }
    chosen
}

fn factors(unit: DurationUnit) -> &'static [i64] {
    match unit {
        DurationUnit::Picoseconds
        | DurationUnit::Nanoseconds
        | DurationUnit::Microseconds
        | DurationUnit::Milliseconds => SUB_SECOND_FACTORS,
        DurationUnit::Seconds | DurationUnit::Minutes => SEXAGESIMAL_FACTORS,
        DurationUnit::Hours => HOUR_FACTORS,
    }
}

impl ReadableDurationRange {
    /// Chooses a readable duration range covering `[lower, upper]` in `unit`.
    ///
    /// # Errors
    ///
    /// Returns a [`RangeError`] when a bound is not finite or `lower > upper`.
    pub fn compute(lower: f64, upper: f64, unit: DurationUnit) -> Result<Self, RangeError> {
        let (lo, hi) = decimal_bounds(lower, upper)?;
        let width = unit.convert(hi - lo, DurationUnit::Seconds);
        let label_unit = if width == int(0) {
            readable_unit(unit.convert(lo, DurationUnit::Seconds))
        } else {
            readable_unit(width)
        };
        let lo_label = unit.convert(lo, label_unit);
        let hi_label = unit.convert(hi, label_unit);

        let mut best: Option<(Decimal, usize, Decimal)> = None;
        let mut best_span = int(0);
        for n in COUNTS {
            for &factor in factors(label_unit) {
                let increment = int(factor);
                let start = round_to_multiple(lo_label, increment, Rounding::Down);
                let span = count_decimal(n) * increment;
                if start > lo_label || start + span < hi_label {
                    continue;
                }
                if best.is_none() || span < best_span {
                    best = Some((start, n, increment));
                    best_span = span;
                }
            }
        }

        let (start, count, increment) = best.unwrap_or_else(|| {
            warn!(%lower, %upper, %label_unit, "no covering duration candidate");
            let count = FALLBACK_COUNT;
            (lo_label, count, (hi_label - lo_label) / count_decimal(count))
        });
        let end = start + count_decimal(count) * increment;
        let labels = integer_labels(start, increment, count);
        debug!(%start, %end, count, %increment, %label_unit, "readable duration range");

        Ok(Self {
            data_unit: unit,
            label_unit,
            start: label_unit.convert(start, unit),
            end: label_unit.convert(end, unit),
            increment,
            count,
            labels,
        })
    }

    /// Unit of `start`, `end` and the caller's bounds.
    pub fn data_unit(&self) -> DurationUnit {
        self.data_unit
    }

    /// Unit the labels are expressed in.
    pub fn label_unit(&self) -> DurationUnit {
        self.label_unit
    }

    /// Lower bound in the data unit.
    pub fn start(&self) -> Decimal {
        self.start
    }

    /// Upper bound in the data unit.
    pub fn end(&self) -> Decimal {
        self.end
    }

    pub fn start_f64(&self) -> f64 {
        to_f64(self.start)
    }

    pub fn end_f64(&self) -> f64 {
        to_f64(self.end)
    }

    /// Tick spacing in the label unit.
    pub fn increment(&self) -> Decimal {
        self.increment
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Character width of the last label.
    pub fn integer_digits(&self) -> usize {
        self.labels.last().map_or(0, |l| l.chars().count())
    }

    /// Long unit name shown next to the axis, e.g. `minutes`.
    pub fn label_factor_label(&self) -> &'static str {
        self.label_unit.long_name()
    }

    /// Re-labels `[lower, upper]` (data unit) as integers of the label unit.
    pub fn labels_for_range(&self, lower: f64, upper: f64) -> Vec<String> {
        let (Some(lo), Some(hi)) = (to_decimal(lower), to_decimal(upper)) else {
            return Vec::new();
        };
        let lo = self.data_unit.convert(lo, self.label_unit);
        let hi = self.data_unit.convert(hi, self.label_unit);
        let step = (hi - lo) / count_decimal(self.count.max(1));
        integer_labels(lo, step, self.count)
    }
}

fn integer_labels(start: Decimal, step: Decimal, count: usize) -> Vec<String> {
    (0..count)
        .map(|i| format_fixed(start + count_decimal(i) * step, 0))
        .collect()
}
