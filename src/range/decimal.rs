//! Exact decimal primitives shared by every readable range.
//!
//! Tick arithmetic runs on [`Decimal`] so that labels such as `0.3` never
//! pick up binary floating-point artifacts. Floats only enter at the edges:
//! [`to_decimal`] on the way in and [`to_f64`] for draw coordinates.

use fastnum::decimal::D128;
use num_traits::{Float, ToPrimitive};

/// Decimal type used for all range arithmetic.
pub type Decimal = D128;

/// Direction used by [`round_to_multiple`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rounding {
    /// Toward negative infinity.
    Down,
    /// Toward positive infinity.
    Up,
}

/// Converts an integer to a decimal.
pub fn int(n: i64) -> Decimal {
    Decimal::from(n)
}

/// Converts a finite `f64` to its shortest round-trip decimal value.
///
/// `0.1_f64` becomes exactly `0.1`, not the binary expansion of the float.
/// Returns `None` for NaN and infinities.
///
/// # Examples
///
/// ```
/// use fitchart::range::decimal::{format_fixed, to_decimal};
///
/// let sum = to_decimal(0.1).zip(to_decimal(0.2)).map(|(a, b)| a + b);
/// assert_eq!(sum.map(|s| format_fixed(s, 2)).as_deref(), Some("0.30"));
/// assert!(to_decimal(f64::NAN).is_none());
/// ```
pub fn to_decimal(x: f64) -> Option<Decimal> {
    if !x.is_finite() {
        return None;
    }
    // Shortest round-trip digits in exponent form, so large magnitudes
    // stay within the decimal's digit budget.
    format!("{x:e}").parse::<Decimal>().ok()
}

/// Converts a decimal back to `f64` for draw coordinates.
pub fn to_f64(d: Decimal) -> f64 {
    ToPrimitive::to_f64(&d).unwrap_or(f64::NAN)
}

/// Returns `10^n` exactly.
pub fn pow10(n: i32) -> Decimal {
    let ten = int(10);
    let mut value = int(1);
    if n >= 0 {
        for _ in 0..n {
            value = value * ten;
        }
    } else {
        for _ in 0..n.unsigned_abs() {
            value = value / ten;
        }
    }
    value
}

/// Base-10 order of magnitude.
///
/// * `order(0) == 1`
/// * `|x| >= 1`: number of integer digits, so `order(1) == 1` and `order(10) == 2`
/// * `0 < |x| < 1`: `floor(log10 |x|)`, so `order(0.5) == -1` and `order(0.05) == -2`
///
/// # Examples
///
/// ```
/// use fitchart::range::decimal::{int, order, to_decimal};
///
/// assert_eq!(order(int(50_000)), 5);
/// assert_eq!(order(int(0)), 1);
/// assert_eq!(to_decimal(0.012).map(order), Some(-2));
/// ```
pub fn order(x: Decimal) -> i32 {
    let ten = int(10);
    let one = int(1);
    let mut m = Float::abs(x);
    if m == int(0) {
        return 1;
    }
    let mut n = 0;
    if m >= one {
        while m >= one {
            m = m / ten;
            n += 1;
        }
    } else {
        while m < one {
            m = m * ten;
            n -= 1;
        }
    }
    n
}

/// Rounds `x` to a multiple of `multiple` in the given direction.
///
/// Rounding down is floor-like for negative values: `-0.3` rounded down to a
/// multiple of `0.5` is `-0.5`. A zero multiple returns `x` unchanged.
pub fn round_to_multiple(x: Decimal, multiple: Decimal, direction: Rounding) -> Decimal {
    if multiple == int(0) {
        return x;
    }
    let ratio = x / multiple;
    let steps = match direction {
        Rounding::Down => Float::floor(ratio),
        Rounding::Up => Float::ceil(ratio),
    };
    steps * multiple
}

/// Rounds half away from zero to an integer.
pub fn round_half_away(x: Decimal) -> Decimal {
    let half = int(1) / int(2);
    let magnitude = Float::floor(Float::abs(x) + half);
    if x < int(0) { -magnitude } else { magnitude }
}

/// Rounds to the nearest integer and converts to `i64`.
pub fn to_i64(x: Decimal) -> Option<i64> {
    ToPrimitive::to_i64(&round_half_away(x))
}

/// Formats `x` with exactly `fraction_digits` digits after the point.
///
/// Rounds half away from zero and never renders a negative zero.
///
/// # Examples
///
/// ```
/// use fitchart::range::decimal::{format_fixed, int, to_decimal};
///
/// assert_eq!(to_decimal(0.004).map(|d| format_fixed(d, 3)).as_deref(), Some("0.004"));
/// assert_eq!(format_fixed(int(-1), 1), "-1.0");
/// assert_eq!(to_decimal(-0.01).map(|d| format_fixed(d, 1)).as_deref(), Some("0.0"));
/// ```
pub fn format_fixed(x: Decimal, fraction_digits: usize) -> String {
    let digits = i32::try_from(fraction_digits).unwrap_or(i32::MAX);
    let scaled = round_half_away(x * pow10(digits));
    let Some(units) = ToPrimitive::to_i128(&Float::abs(scaled)) else {
        return format!("{:.*}", fraction_digits, to_f64(x));
    };
    let mut text = format!("{units:0>width$}", width = fraction_digits + 1);
    if fraction_digits > 0 {
        text.insert(text.len() - fraction_digits, '.');
    }
    if scaled < int(0) && units != 0 {
        text.insert(0, '-');
    }
    text
}

/// Formats a decimal with as many fractional digits as its order requires.
///
/// Used for factor annotations such as `1000` or `0.000001`.
pub fn format_compact(x: Decimal) -> String {
    let digits = usize::try_from(-order(x)).unwrap_or(0);
    format_fixed(x, digits)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(x: f64) -> Decimal {
        to_decimal(x).unwrap_or_else(|| int(0))
    }

    #[test]
    fn order_of_zero_is_one() {
        assert_eq!(order(int(0)), 1);
    }

    #[test]
    fn order_counts_integer_digits() {
        assert_eq!(order(int(1)), 1);
        assert_eq!(order(dec(9.9)), 1);
        assert_eq!(order(int(10)), 2);
        assert_eq!(order(int(50_000)), 5);
        assert_eq!(order(int(1_000_000)), 7);
        assert_eq!(order(int(-250)), 3);
    }

    #[test]
    fn order_of_fractions_is_negative() {
        assert_eq!(order(dec(0.5)), -1);
        assert_eq!(order(dec(0.1)), -1);
        assert_eq!(order(dec(0.05)), -2);
        assert_eq!(order(dec(0.012)), -2);
        assert_eq!(order(dec(0.00005)), -5);
        assert_eq!(order(dec(-0.002)), -3);
    }

    #[test]
    fn pow10_is_exact() {
        assert_eq!(pow10(0), int(1));
        assert_eq!(pow10(3), int(1000));
        assert_eq!(pow10(-2), dec(0.01));
    }

    #[test]
    fn round_down_is_floor_like() {
        assert_eq!(round_to_multiple(dec(-0.3), dec(0.5), Rounding::Down), dec(-0.5));
        assert_eq!(round_to_multiple(dec(1.3), dec(0.5), Rounding::Down), int(1));
        assert_eq!(round_to_multiple(int(4), int(2), Rounding::Down), int(4));
    }

    #[test]
    fn round_up_is_ceil_like() {
        assert_eq!(round_to_multiple(dec(301.5), int(5), Rounding::Up), int(305));
        assert_eq!(round_to_multiple(dec(-0.3), dec(0.5), Rounding::Up), int(0));
    }

    #[test]
    fn round_to_zero_multiple_is_identity() {
        assert_eq!(round_to_multiple(dec(1.25), int(0), Rounding::Down), dec(1.25));
    }

    #[test]
    fn decimal_sum_has_no_float_artifacts() {
        assert_eq!(format_fixed(dec(0.1) + dec(0.2), 17), "0.30000000000000000");
    }

    #[test]
    fn format_fixed_pads_and_rounds() {
        assert_eq!(format_fixed(int(0), 3), "0.000");
        assert_eq!(format_fixed(dec(2.5), 0), "3");
        assert_eq!(format_fixed(dec(-2.5), 0), "-3");
        assert_eq!(format_fixed(dec(0.25), 1), "0.3");
        assert_eq!(format_fixed(dec(-0.5), 1), "-0.5");
        assert_eq!(format_fixed(int(40), 0), "40");
    }

    #[test]
    fn format_fixed_never_prints_negative_zero() {
        assert_eq!(format_fixed(dec(-0.0001), 2), "0.00");
        assert_eq!(format_fixed(dec(-0.0), 0), "0");
    }

    #[test]
    fn format_compact_uses_order_digits() {
        assert_eq!(format_compact(int(1000)), "1000");
        assert_eq!(format_compact(pow10(-6)), "0.000001");
    }

    #[test]
    fn to_decimal_rejects_non_finite() {
        assert!(to_decimal(f64::INFINITY).is_none());
        assert!(to_decimal(f64::NEG_INFINITY).is_none());
        assert!(to_decimal(f64::NAN).is_none());
    }

    #[test]
    fn to_f64_round_trips_simple_values() {
        assert!((to_f64(dec(0.125)) - 0.125).abs() < 1e-12);
        assert!((to_f64(int(-40)) + 40.0).abs() < 1e-12);
    }

    #[test]
    fn to_decimal_keeps_large_magnitudes() {
        assert_eq!(to_decimal(1e39), Some(pow10(39)));
        assert_eq!(to_decimal(-2.5e50), Some(int(-25) * pow10(49)));
        assert_eq!(to_decimal(1e-30), Some(pow10(-30)));
        assert_eq!(to_decimal(0.0), Some(int(0)));
    }
}
