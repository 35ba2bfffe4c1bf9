//! Readable ranges for pace (time per distance) axes.
//!
//! Pace is an inverse domain: the slower bound is numerically larger, so the
//! range starts at the slow end and counts down toward the fast end. All
//! arithmetic runs in whole seconds of the label unit.

use std::fmt;

use tracing::{debug, warn};

use super::decimal::{Decimal, Rounding, int, round_to_multiple, to_decimal, to_i64};
use super::plain::count_decimal;
use crate::units::PaceUnit;

/// Human-readable increments in seconds, searched in ascending order.
const FACTORS_SECONDS: [i64; 17] = [
    1, 2, 5, 10, 15, 30, 60, 120, 300, 600, 900, 1800, 3600, 7200, 21600, 43200, 86400,
];

/// Maximum number of ticks a candidate may span.
const MAX_COUNT: i64 = 5;

/// Tick count used when no factor fits.
const FALLBACK_COUNT: usize = 4;

/// Largest start, in seconds, still labelled as plain seconds.
const SECONDS_STYLE_LIMIT: i64 = 90;
/// Largest start, in seconds, labelled as minutes and seconds.
const MINUTES_STYLE_LIMIT: i64 = 3600;

/// How pace labels are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaceLabelStyle {
    /// `SS`
    Seconds,
    /// `M:SS`
    MinutesSeconds,
    /// `H:MM`
    HoursMinutes,
}

impl PaceLabelStyle {
    /// Style for a range whose slow end is `start_seconds`.
    pub fn for_start(start_seconds: i64) -> Self {
        if start_seconds <= SECONDS_STYLE_LIMIT {
            Self::Seconds
        } else if start_seconds <= MINUTES_STYLE_LIMIT {
            Self::MinutesSeconds
        } else {
            Self::HoursMinutes
        }
    }

    /// Renders a whole number of seconds.
    pub fn format(self, seconds: i64) -> String {
        let sign = if seconds < 0 { "-" } else { "" };
        let s = seconds.unsigned_abs();
        match self {
            Self::Seconds => format!("{sign}{s}"),
            Self::MinutesSeconds => format!("{sign}{}:{:02}", s / 60, s % 60),
            Self::HoursMinutes => format!("{sign}{}:{:02}", s / 3600, (s % 3600) / 60),
        }
    }

    fn unit_name(self) -> &'static str {
        match self {
            Self::Seconds => "seconds",
            Self::MinutesSeconds => "minutes",
            Self::HoursMinutes => "hours",
        }
    }
}

impl fmt::Display for PaceLabelStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.unit_name())
    }
}

/// A pace axis running from a slow bound down to a fast bound.
///
/// # Examples
///
/// ```
/// use fitchart::range::ReadablePaceRange;
/// use fitchart::units::PaceUnit;
///
/// let km = PaceUnit::MinutesPerKilometer;
/// let range = ReadablePaceRange::compute(6.0, 5.0, km, km).expect("finite paces");
/// assert_eq!(range.labels(), ["6:00", "5:45", "5:30", "5:15"]);
/// assert_eq!(range.label_factor_label(), "minutes / kilometer");
///
/// assert!(ReadablePaceRange::compute(f64::INFINITY, 5.0, km, km).is_none());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ReadablePaceRange {
    label_unit: PaceUnit,
    data_unit: PaceUnit,
    /// Slow end, seconds per label unit.
    start_seconds: Decimal,
    /// Fast end, seconds per label unit.
    end_seconds: Decimal,
    increment_seconds: Decimal,
    count: usize,
    style: PaceLabelStyle,
    labels: Vec<String>,
}

impl ReadablePaceRange {
    /// Chooses a readable pace range from the slow `lower` to the fast `upper`.
    ///
    /// Bounds are in `data_unit`; labels are in `label_unit`. The first
    /// factor whose five-tick span reaches `upper` wins. Bounds given fast
    /// first are swapped.
    ///
    /// Returns `None` when either bound is not finite in the label unit,
    /// which is what a zero speed produces.
    pub fn compute(
        lower: f64,
        upper: f64,
        label_unit: PaceUnit,
        data_unit: PaceUnit,
    ) -> Option<Self> {
        let slow = data_unit.convert(lower, label_unit);
        let fast = data_unit.convert(upper, label_unit);
        if !slow.is_finite() || !fast.is_finite() {
            debug!(lower, upper, "pace bounds are not finite");
            return None;
        }
        let (slow, fast) = if slow < fast { (fast, slow) } else { (slow, fast) };
        let sixty = int(60);
        let slow_s = to_decimal(slow)? * sixty;
        let fast_s = to_decimal(fast)? * sixty;

        let found = FACTORS_SECONDS.iter().find_map(|&factor| {
            let increment = int(factor);
            let start = round_to_multiple(slow_s, increment, Rounding::Up);
            (start >= slow_s && start - int(MAX_COUNT) * increment <= fast_s)
                .then_some((start, increment))
        });

        let (start, count, increment) = match found {
            Some((start, increment)) => {
                let steps = round_to_multiple(start - fast_s, increment, Rounding::Up) / increment;
                let count = to_i64(steps)
                    .and_then(|n| usize::try_from(n).ok())
                    .unwrap_or(1)
                    .max(1);
                (start, count, increment)
            }
            None => {
                warn!(lower, upper, "no pace factor fits, using fallback increment");
                let count = FALLBACK_COUNT;
                (slow_s, count, (slow_s - fast_s) / count_decimal(count))
            }
        };
        let end = start - count_decimal(count) * increment;

        let start_whole = to_i64(start).unwrap_or(0);
        let style = PaceLabelStyle::for_start(start_whole);
        let labels = second_labels(start, increment, count, style);
        debug!(%start, %end, count, %increment, %style, "readable pace range");

        Some(Self {
            label_unit,
            data_unit,
            start_seconds: start,
            end_seconds: end,
            increment_seconds: increment,
            count,
            style,
            labels,
        })
    }

    pub fn label_unit(&self) -> PaceUnit {
        self.label_unit
    }

    pub fn data_unit(&self) -> PaceUnit {
        self.data_unit
    }

    /// Slow end in seconds per label unit.
    pub fn start_seconds(&self) -> Decimal {
        self.start_seconds
    }

    /// Fast end in seconds per label unit.
    pub fn end_seconds(&self) -> Decimal {
        self.end_seconds
    }

    /// Tick spacing in seconds per label unit.
    pub fn increment_seconds(&self) -> Decimal {
        self.increment_seconds
    }

    /// Slow end in the data unit.
    pub fn start_f64(&self) -> f64 {
        self.to_data(self.start_seconds)
    }

    /// Fast end in the data unit.
    pub fn end_f64(&self) -> f64 {
        self.to_data(self.end_seconds)
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn style(&self) -> PaceLabelStyle {
        self.style
    }

    /// Labels from slow to fast.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Number of `:` separators in the widest label.
    pub fn separators(&self) -> usize {
        self.labels.last().map_or(0, |l| l.matches(':').count())
    }

    /// Digits in the last label, separators excluded.
    pub fn integer_digits(&self) -> usize {
        self.labels
            .last()
            .map_or(0, |l| l.chars().filter(char::is_ascii_digit).count())
    }

    /// Axis annotation, e.g. `minutes / mile`.
    pub fn label_factor_label(&self) -> String {
        format!("{} / {}", self.style, self.label_unit.long_name())
    }

    /// Re-labels the paces between two data-unit bounds, slow to fast.
    pub fn labels_for_range(&self, lower: f64, upper: f64) -> Vec<String> {
        let a = self.data_unit.convert(lower, self.label_unit);
        let b = self.data_unit.convert(upper, self.label_unit);
        let (slow, fast) = if a < b { (b, a) } else { (a, b) };
        let sixty = int(60);
        let (Some(slow), Some(fast)) = (to_decimal(slow), to_decimal(fast)) else {
            return Vec::new();
        };
        let (slow, fast) = (slow * sixty, fast * sixty);
        let step = (slow - fast) / count_decimal(self.count.max(1));
        second_labels(slow, step, self.count, self.style)
    }

    fn to_data(&self, seconds: Decimal) -> f64 {
        let minutes = super::decimal::to_f64(seconds) / 60.0;
        self.label_unit.convert(minutes, self.data_unit)
    }
}

fn second_labels(
    start: Decimal,
    increment: Decimal,
    count: usize,
    style: PaceLabelStyle,
) -> Vec<String> {
    let first = to_i64(start).unwrap_or(0);
    let step = to_i64(increment).unwrap_or(0);
    (0..count)
        .map(|i| {
            let offset = i64::try_from(i).unwrap_or(i64::MAX).saturating_mul(step);
            style.format(first.saturating_sub(offset))
        })
        .collect()
}
