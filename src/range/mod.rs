//! Readable axis ranges for plain, duration and pace dimensions.
//!
//! Each variant snaps a raw data interval to human-friendly tick values and
//! pre-formats the labels. Charts hold one [`AxisRange`] per axis, chosen
//! once from the axis dimension, and talk to it through [`Readable`].

pub mod decimal;
pub mod duration;
pub mod pace;
pub mod plain;

use serde::Serialize;
use thiserror::Error;

pub use duration::ReadableDurationRange;
pub use pace::ReadablePaceRange;
pub use plain::ReadableRange;

use decimal::{Decimal, format_compact, int, to_f64};

/// Rejected range input.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RangeError {
    #[error("interval bounds must be finite, got [{lower}, {upper}]")]
    NonFinite { lower: f64, upper: f64 },
    #[error("interval lower bound {lower} exceeds upper bound {upper}")]
    Inverted { lower: f64, upper: f64 },
    #[error("candidate tick counts must be non-empty and positive")]
    InvalidCounts,
}

/// Shared view of a readable range.
///
/// `start`, `end` and `increment` are draw coordinates in the data unit of
/// the axis. Everything textual stays decimal-exact inside the range.
pub trait Readable {
    /// First tick position.
    fn start(&self) -> f64;
    /// Far end of the last tick interval.
    fn end(&self) -> f64;
    /// Number of tick intervals; equals the number of labels.
    fn count(&self) -> usize;
    /// Signed tick spacing, `(end - start) / count`.
    fn increment(&self) -> f64 {
        (self.end() - self.start()) / self.count().max(1) as f64
    }
    /// Formatted tick labels from `start` toward `end`.
    fn labels(&self) -> &[String];
    /// Power-of-ten divisor applied to the labels; 1 for unit domains.
    fn label_factor(&self) -> Decimal;
    /// Annotation displayed beside the axis, if any.
    fn label_factor_label(&self) -> Option<String>;
    fn integer_digits(&self) -> usize;
    fn fraction_digits(&self) -> usize;
    /// Labels for a sub-interval using the format fixed at construction.
    fn labels_for_range(&self, lower: f64, upper: f64) -> Vec<String>;

    /// Serializable copy of the range.
    fn snapshot(&self) -> RangeSnapshot {
        RangeSnapshot {
            start: self.start(),
            end: self.end(),
            count: self.count(),
            increment: self.increment(),
            labels: self.labels().to_vec(),
            label_factor: format_compact(self.label_factor()),
            label_factor_label: self.label_factor_label(),
            integer_digits: self.integer_digits(),
            fraction_digits: self.fraction_digits(),
        }
    }
}

/// Plain-data copy of a [`Readable`] range for output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeSnapshot {
    pub start: f64,
    pub end: f64,
    pub count: usize,
    pub increment: f64,
    pub labels: Vec<String>,
    pub label_factor: String,
    pub label_factor_label: Option<String>,
    pub integer_digits: usize,
    pub fraction_digits: usize,
}

impl Readable for ReadableRange {
    fn start(&self) -> f64 {
        self.start_f64()
    }

    fn end(&self) -> f64 {
        self.end_f64()
    }

    fn count(&self) -> usize {
        ReadableRange::count(self)
    }

    fn increment(&self) -> f64 {
        to_f64(ReadableRange::increment(self))
    }

    fn labels(&self) -> &[String] {
        ReadableRange::labels(self)
    }

    fn label_factor(&self) -> Decimal {
        ReadableRange::label_factor(self)
    }

    fn label_factor_label(&self) -> Option<String> {
        self.label_factor_text()
    }

    fn integer_digits(&self) -> usize {
        ReadableRange::integer_digits(self)
    }

    fn fraction_digits(&self) -> usize {
        ReadableRange::fraction_digits(self)
    }

    fn labels_for_range(&self, lower: f64, upper: f64) -> Vec<String> {
        ReadableRange::labels_for_range(self, lower, upper)
    }
}

impl Readable for ReadableDurationRange {
    fn start(&self) -> f64 {
        self.start_f64()
    }

    fn end(&self) -> f64 {
        self.end_f64()
    }

    fn count(&self) -> usize {
        ReadableDurationRange::count(self)
    }

    fn labels(&self) -> &[String] {
        ReadableDurationRange::labels(self)
    }

    fn label_factor(&self) -> Decimal {
        int(1)
    }

    fn label_factor_label(&self) -> Option<String> {
        Some(ReadableDurationRange::label_factor_label(self).to_string())
    }

    fn integer_digits(&self) -> usize {
        ReadableDurationRange::integer_digits(self)
    }

    fn fraction_digits(&self) -> usize {
        0
    }

    fn labels_for_range(&self, lower: f64, upper: f64) -> Vec<String> {
        ReadableDurationRange::labels_for_range(self, lower, upper)
    }
}

impl Readable for ReadablePaceRange {
    fn start(&self) -> f64 {
        self.start_f64()
    }

    fn end(&self) -> f64 {
        self.end_f64()
    }

    fn count(&self) -> usize {
        ReadablePaceRange::count(self)
    }

    fn labels(&self) -> &[String] {
        ReadablePaceRange::labels(self)
    }

    fn label_factor(&self) -> Decimal {
        int(1)
    }

    fn label_factor_label(&self) -> Option<String> {
        Some(ReadablePaceRange::label_factor_label(self))
    }

    fn integer_digits(&self) -> usize {
        ReadablePaceRange::integer_digits(self)
    }

    fn fraction_digits(&self) -> usize {
        0
    }

    fn labels_for_range(&self, lower: f64, upper: f64) -> Vec<String> {
        ReadablePaceRange::labels_for_range(self, lower, upper)
    }
}

/// One readable range per axis, tagged by dimension.
#[derive(Debug, Clone, PartialEq)]
pub enum AxisRange {
    Plain(ReadableRange),
    Duration(ReadableDurationRange),
    Pace(ReadablePaceRange),
}

impl AxisRange {
    fn inner(&self) -> &dyn Readable {
        match self {
            Self::Plain(r) => r,
            Self::Duration(r) => r,
            Self::Pace(r) => r,
        }
    }

    /// Dimension name, e.g. `"pace"`.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Plain(_) => "plain",
            Self::Duration(_) => "duration",
            Self::Pace(_) => "pace",
        }
    }
}

impl Readable for AxisRange {
    fn start(&self) -> f64 {
        self.inner().start()
    }

    fn end(&self) -> f64 {
        self.inner().end()
    }

    fn count(&self) -> usize {
        self.inner().count()
    }

    fn increment(&self) -> f64 {
        self.inner().increment()
    }

    fn labels(&self) -> &[String] {
        self.inner().labels()
    }

    fn label_factor(&self) -> Decimal {
        self.inner().label_factor()
    }

    fn label_factor_label(&self) -> Option<String> {
        self.inner().label_factor_label()
    }

    fn integer_digits(&self) -> usize {
        self.inner().integer_digits()
    }

    fn fraction_digits(&self) -> usize {
        self.inner().fraction_digits()
    }

    fn labels_for_range(&self, lower: f64, upper: f64) -> Vec<String> {
        self.inner().labels_for_range(lower, upper)
    }
}

impl From<ReadableRange> for AxisRange {
    fn from(range: ReadableRange) -> Self {
        Self::Plain(range)
    }
}

impl From<ReadableDurationRange> for AxisRange {
    fn from(range: ReadableDurationRange) -> Self {
        Self::Duration(range)
    }
}

impl From<ReadablePaceRange> for AxisRange {
    fn from(range: ReadablePaceRange) -> Self {
        Self::Pace(range)
    }
}
