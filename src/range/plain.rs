//! Plain numeric readable range.

use tracing::{debug, trace, warn};

use super::RangeError;
use super::decimal::{
    Decimal, Rounding, format_compact, format_fixed, int, order, pow10, round_to_multiple,
    to_decimal, to_f64,
};

/// Candidate tick counts used when the caller has no preference.
pub const DEFAULT_COUNTS: [usize; 3] = [4, 5, 6];

/// Human-friendly increment multipliers, searched in ascending order.
const HUMAN_FACTORS: [i64; 4] = [1, 2, 5, 10];

/// Tick count used when no candidate covers the interval.
const FALLBACK_COUNT: usize = 5;

/// An axis interval snapped to round numbers with pre-formatted labels.
///
/// The range always covers the input interval (`start <= lower` and
/// `end >= upper`). Large or tiny magnitudes are divided by a power-of-ten
/// [`label_factor`](Self::label_factor) so labels stay short.
///
/// # Examples
///
/// ```
/// use fitchart::range::ReadableRange;
///
/// let range = ReadableRange::compute(0.0, 50_000.0, &[5]).expect("finite interval");
/// assert_eq!(range.count(), 5);
/// assert_eq!(range.labels(), ["0", "10", "20", "30", "40"]);
/// assert_eq!(range.label_factor_text().as_deref(), Some("×1000"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ReadableRange {
    start: Decimal,
    end: Decimal,
    increment: Decimal,
    count: usize,
    label_factor: Decimal,
    labels: Vec<String>,
    integer_digits: usize,
    fraction_digits: usize,
}

/// Width hints for fixed-width label layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DigitCount {
    /// Digits left of the decimal point.
    pub integer: usize,
    /// Digits right of the decimal point.
    pub fraction: usize,
}

impl ReadableRange {
    /// Chooses a readable range covering `[lower, upper]`.
    ///
    /// Every `(count, factor)` pair is tried and the covering candidate with
    /// the smallest span wins; ties keep the earliest candidate.
    ///
    /// # Errors
    ///
    /// Returns a [`RangeError`] when a bound is not finite, when
    /// `lower > upper`, or when `counts` is empty or contains zero.
    pub fn compute(lower: f64, upper: f64, counts: &[usize]) -> Result<Self, RangeError> {
        let (lo, hi) = decimal_bounds(lower, upper)?;
        if counts.is_empty() || counts.contains(&0) {
            return Err(RangeError::InvalidCounts);
        }
        Ok(Self::from_decimals(lo, hi, counts))
    }

    /// Like [`compute`](Self::compute) with [`DEFAULT_COUNTS`].
    ///
    /// # Errors
    ///
    /// See [`compute`](Self::compute).
    pub fn with_default_counts(lower: f64, upper: f64) -> Result<Self, RangeError> {
        Self::compute(lower, upper, &DEFAULT_COUNTS)
    }

    fn from_decimals(lower: Decimal, upper: Decimal, counts: &[usize]) -> Self {
        let (start, count, increment) = match search(lower, upper, counts) {
            Some(found) => found,
            None => {
                warn!(%lower, %upper, "no covering tick candidate, using fallback increment");
                let count = FALLBACK_COUNT;
                (lower, count, (upper - lower) / count_decimal(count))
            }
        };
        let end = start + count_decimal(count) * increment;
        let label_factor = label_factor(start, end, increment);
        let digits = digit_count(start / label_factor, end / label_factor, count);
        let labels = format_labels(start, end, label_factor, count, digits.fraction);
        debug!(%start, %end, count, %increment, %label_factor, "readable range");

        Self {
            start,
            end,
            increment,
            count,
            label_factor,
            labels,
            integer_digits: digits.integer,
            fraction_digits: digits.fraction,
        }
    }

    /// Lower bound of the readable range.
    pub fn start(&self) -> Decimal {
        self.start
    }

    /// Upper bound of the readable range.
    pub fn end(&self) -> Decimal {
        self.end
    }

    /// Distance between consecutive ticks.
    pub fn increment(&self) -> Decimal {
        self.increment
    }

    /// Number of tick intervals (and labels).
    pub fn count(&self) -> usize {
        self.count
    }

    /// Power-of-ten divisor applied to every label.
    pub fn label_factor(&self) -> Decimal {
        self.label_factor
    }

    /// Side annotation for the label factor, e.g. `×1000`, or `None` at 1.
    pub fn label_factor_text(&self) -> Option<String> {
        (self.label_factor != int(1)).then(|| format!("×{}", format_compact(self.label_factor)))
    }

    /// Formatted tick labels in ascending order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Digits left of the decimal point in the widest label.
    pub fn integer_digits(&self) -> usize {
        self.integer_digits
    }

    /// Digits right of the decimal point in every label.
    pub fn fraction_digits(&self) -> usize {
        self.fraction_digits
    }

    /// Re-labels `[lower, upper]` with this range's factor and precision.
    ///
    /// Returns [`count`](Self::count) labels stepping from `lower` toward
    /// `upper`. Used while zoomed so label widths stay stable. Non-finite
    /// bounds produce no labels.
    pub fn labels_for_range(&self, lower: f64, upper: f64) -> Vec<String> {
        let (Some(lo), Some(hi)) = (to_decimal(lower), to_decimal(upper)) else {
            return Vec::new();
        };
        format_labels(lo, hi, self.label_factor, self.count, self.fraction_digits)
    }

    /// Lower bound as a draw coordinate.
    pub fn start_f64(&self) -> f64 {
        to_f64(self.start)
    }

    /// Upper bound as a draw coordinate.
    pub fn end_f64(&self) -> f64 {
        to_f64(self.end)
    }
}

/// Converts and validates interval bounds.
pub(crate) fn decimal_bounds(lower: f64, upper: f64) -> Result<(Decimal, Decimal), RangeError> {
    let (Some(lo), Some(hi)) = (to_decimal(lower), to_decimal(upper)) else {
        return Err(RangeError::NonFinite { lower, upper });
    };
    if lo > hi {
        return Err(RangeError::Inverted { lower, upper });
    }
    Ok((lo, hi))
}

pub(crate) fn count_decimal(count: usize) -> Decimal {
    int(i64::try_from(count).unwrap_or(i64::MAX))
}

/// Tightest covering `(start, count, increment)` over all candidates.
fn search(lower: Decimal, upper: Decimal, counts: &[usize]) -> Option<(Decimal, usize, Decimal)> {
    let magnitude = upper - lower;
    let mut best: Option<(Decimal, usize, Decimal)> = None;
    let mut best_span = int(0);

    for &n in counts {
        let n_dec = count_decimal(n);
        let rough = magnitude / n_dec;
        let rough_order = order(rough);
        let scale = if rough_order >= 0 {
            pow10(rough_order - 1)
        } else {
            pow10(rough_order)
        };
        for h in HUMAN_FACTORS {
            let increment = int(h) * scale;
            let start = round_to_multiple(lower, increment, Rounding::Down);
            let span = n_dec * increment;
            if start > lower || start + span < upper {
                continue;
            }
            trace!(n, %increment, %start, %span, "covering candidate");
            if best.is_none() || span < best_span {
                best = Some((start, n, increment));
                best_span = span;
            }
        }
    }
    best
}

/// Power of ten that keeps labels within a few digits.
fn label_factor(start: Decimal, end: Decimal, increment: Decimal) -> Decimal {
    let widest = if abs(start) > abs(end) {
        abs(start)
    } else {
        abs(end)
    };
    let magnitude = order(widest);
    if magnitude.abs() <= 3 {
        return int(1);
    }
    let power = if magnitude >= 0 {
        3 + (magnitude - 4) / 3 * 3
    } else {
        3 + (-magnitude) / 3 * 3
    };
    let signed = |p: i32| if magnitude >= 0 { p } else { -p };
    let factor = pow10(signed(power));
    if increment / factor <= int(1) {
        pow10(signed(power - 3))
    } else {
        factor
    }
}

fn abs(x: Decimal) -> Decimal {
    if x < int(0) { -x } else { x }
}

/// Digit-width hints for labels spanning `[lower, upper]` in `count` steps.
pub fn digit_count(lower: Decimal, upper: Decimal, count: usize) -> DigitCount {
    let widest = if abs(lower) > abs(upper) {
        abs(lower)
    } else {
        abs(upper)
    };
    let integer_order = order(widest);
    let increment = (upper - lower) / count_decimal(count.max(1));
    let increment_order = order(increment);
    DigitCount {
        integer: usize::try_from(integer_order).unwrap_or(1).max(1),
        fraction: usize::try_from(-increment_order).unwrap_or(0),
    }
}

/// `count` labels stepping from `lower` toward `upper`, divided by `factor`.
fn format_labels(
    lower: Decimal,
    upper: Decimal,
    factor: Decimal,
    count: usize,
    fraction_digits: usize,
) -> Vec<String> {
    let first = lower / factor;
    let step = (upper - lower) / factor / count_decimal(count.max(1));
    (0..count)
        .map(|i| format_fixed(first + count_decimal(i) * step, fraction_digits))
        .collect()
}
