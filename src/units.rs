//! Units of measure for duration, pace and speed axes.
//!
//! Pace conversions are linear: every [`PaceUnit`] carries a coefficient
//! that maps its value onto minutes per kilometer.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::range::decimal::{Decimal, int, pow10};

/// Meters in one statute mile.
const METERS_PER_MILE: f64 = 1609.344;
/// Kilometers in a half marathon.
const HALF_MARATHON_KM: f64 = 21.0975;
/// Kilometers in a marathon.
const MARATHON_KM: f64 = 42.195;

/// A unit of elapsed time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DurationUnit {
    Picoseconds,
    Nanoseconds,
    Microseconds,
    Milliseconds,
    Seconds,
    Minutes,
    Hours,
}

impl DurationUnit {
    /// All units from smallest to largest.
    pub const ALL: [DurationUnit; 7] = [
        Self::Picoseconds,
        Self::Nanoseconds,
        Self::Microseconds,
        Self::Milliseconds,
        Self::Seconds,
        Self::Minutes,
        Self::Hours,
    ];

    /// Exact number of seconds in one unit.
    pub fn seconds(self) -> Decimal {
        match self {
            Self::Picoseconds => pow10(-12),
            Self::Nanoseconds => pow10(-9),
            Self::Microseconds => pow10(-6),
            Self::Milliseconds => pow10(-3),
            Self::Seconds => int(1),
            Self::Minutes => int(60),
            Self::Hours => int(3600),
        }
    }

    /// Converts `value` in this unit to `target`.
    pub fn convert(self, value: Decimal, target: DurationUnit) -> Decimal {
        if self == target {
            return value;
        }
        value * self.seconds() / target.seconds()
    }

    /// Short symbol, e.g. `ms`.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Picoseconds => "ps",
            Self::Nanoseconds => "ns",
            Self::Microseconds => "µs",
            Self::Milliseconds => "ms",
            Self::Seconds => "s",
            Self::Minutes => "min",
            Self::Hours => "hr",
        }
    }

    /// Long plural name shown next to an axis, e.g. `seconds`.
    pub fn long_name(self) -> &'static str {
        match self {
            Self::Picoseconds => "picoseconds",
            Self::Nanoseconds => "nanoseconds",
            Self::Microseconds => "microseconds",
            Self::Milliseconds => "milliseconds",
            Self::Seconds => "seconds",
            Self::Minutes => "minutes",
            Self::Hours => "hours",
        }
    }
}

impl fmt::Display for DurationUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Time per distance, expressed in minutes per some distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaceUnit {
    #[serde(rename = "minutes_per_200m")]
    MinutesPer200Meters,
    #[serde(rename = "minutes_per_400m")]
    MinutesPer400Meters,
    MinutesPerKilometer,
    MinutesPerMile,
    #[serde(rename = "minutes_per_5k")]
    MinutesPer5Kilometers,
    #[serde(rename = "minutes_per_10k")]
    MinutesPer10Kilometers,
    MinutesPerHalfMarathon,
    MinutesPerMarathon,
}

impl PaceUnit {
    /// Multiplier from this unit to minutes per kilometer.
    pub fn coefficient(self) -> f64 {
        match self {
            Self::MinutesPer200Meters => 1.0 / 0.2,
            Self::MinutesPer400Meters => 1.0 / 0.4,
            Self::MinutesPerKilometer => 1.0,
            Self::MinutesPerMile => 1000.0 / METERS_PER_MILE,
            Self::MinutesPer5Kilometers => 1.0 / 5.0,
            Self::MinutesPer10Kilometers => 1.0 / 10.0,
            Self::MinutesPerHalfMarathon => 1.0 / HALF_MARATHON_KM,
            Self::MinutesPerMarathon => 1.0 / MARATHON_KM,
        }
    }

    /// Converts a pace in this unit to minutes per kilometer.
    pub fn to_base(self, pace: f64) -> f64 {
        pace * self.coefficient()
    }

    /// Converts a pace in minutes per kilometer to this unit.
    pub fn from_base(self, pace_min_per_km: f64) -> f64 {
        pace_min_per_km / self.coefficient()
    }

    /// Converts `pace` in this unit to `target`.
    pub fn convert(self, pace: f64, target: PaceUnit) -> f64 {
        if self == target {
            return pace;
        }
        target.from_base(self.to_base(pace))
    }

    /// Distance name used in axis annotations, e.g. `kilometer`.
    pub fn long_name(self) -> &'static str {
        match self {
            Self::MinutesPer200Meters => "200 meters",
            Self::MinutesPer400Meters => "400 meters",
            Self::MinutesPerKilometer => "kilometer",
            Self::MinutesPerMile => "mile",
            Self::MinutesPer5Kilometers => "5 kilometers",
            Self::MinutesPer10Kilometers => "10 kilometers",
            Self::MinutesPerHalfMarathon => "half marathon",
            Self::MinutesPerMarathon => "marathon",
        }
    }

    /// Short symbol, e.g. `min/km`.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::MinutesPer200Meters => "min/200m",
            Self::MinutesPer400Meters => "min/400m",
            Self::MinutesPerKilometer => "min/km",
            Self::MinutesPerMile => "min/mi",
            Self::MinutesPer5Kilometers => "min/5k",
            Self::MinutesPer10Kilometers => "min/10k",
            Self::MinutesPerHalfMarathon => "min/half",
            Self::MinutesPerMarathon => "min/marathon",
        }
    }
}

impl fmt::Display for PaceUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A unit of speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpeedUnit {
    MetersPerSecond,
    KilometersPerHour,
    MilesPerHour,
}

impl SpeedUnit {
    /// Multiplier from this unit to meters per second.
    pub fn coefficient(self) -> f64 {
        match self {
            Self::MetersPerSecond => 1.0,
            Self::KilometersPerHour => 1000.0 / 3600.0,
            Self::MilesPerHour => METERS_PER_MILE / 3600.0,
        }
    }

    /// Converts `speed` in this unit to meters per second.
    pub fn to_meters_per_second(self, speed: f64) -> f64 {
        speed * self.coefficient()
    }
}

/// Converts a speed in m/s to a pace in `unit`.
///
/// Zero speed yields an infinite pace; callers decide how to treat it.
///
/// # Examples
///
/// ```
/// use fitchart::units::{PaceUnit, pace_from_speed};
///
/// let pace = pace_from_speed(1000.0 / 300.0, PaceUnit::MinutesPerKilometer);
/// assert!((pace - 5.0).abs() < 1e-9);
/// assert!(pace_from_speed(0.0, PaceUnit::MinutesPerKilometer).is_infinite());
/// ```
pub fn pace_from_speed(meters_per_second: f64, unit: PaceUnit) -> f64 {
    unit.from_base(1000.0 / meters_per_second / 60.0)
}

/// Converts a pace in `unit` to a speed in m/s.
pub fn speed_from_pace(pace: f64, unit: PaceUnit) -> f64 {
    1000.0 / unit.to_base(pace) / 60.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn duration_conversion_is_exact() {
        let minutes = DurationUnit::Hours.convert(int(2), DurationUnit::Minutes);
        assert_eq!(minutes, int(120));
        let ms = DurationUnit::Seconds.convert(int(2), DurationUnit::Milliseconds);
        assert_eq!(ms, int(2000));
    }

    #[test]
    fn duration_names() {
        assert_eq!(DurationUnit::Seconds.long_name(), "seconds");
        assert_eq!(DurationUnit::Microseconds.symbol(), "µs");
        assert_eq!(DurationUnit::Hours.to_string(), "hr");
    }

    #[test]
    fn mile_pace_is_slower_than_km_pace() {
        let per_mile = PaceUnit::MinutesPerKilometer.convert(5.0, PaceUnit::MinutesPerMile);
        assert!(close(per_mile, 5.0 * 1.609344));
        let back = PaceUnit::MinutesPerMile.convert(per_mile, PaceUnit::MinutesPerKilometer);
        assert!(close(back, 5.0));
    }

    #[test]
    fn race_distance_paces() {
        let per_5k = PaceUnit::MinutesPerKilometer.convert(4.0, PaceUnit::MinutesPer5Kilometers);
        assert!(close(per_5k, 20.0));
        let per_400 = PaceUnit::MinutesPerKilometer.convert(5.0, PaceUnit::MinutesPer400Meters);
        assert!(close(per_400, 2.0));
        let marathon = PaceUnit::MinutesPerKilometer.convert(5.0, PaceUnit::MinutesPerMarathon);
        assert!(close(marathon, 5.0 * 42.195));
    }

    #[test]
    fn speed_and_pace_are_inverse() {
        let mps = 3.2;
        let pace = pace_from_speed(mps, PaceUnit::MinutesPerMile);
        assert!(close(speed_from_pace(pace, PaceUnit::MinutesPerMile), mps));
    }

    #[test]
    fn zero_speed_is_infinite_pace() {
        assert!(pace_from_speed(0.0, PaceUnit::MinutesPerKilometer).is_infinite());
    }

    #[test]
    fn speed_units() {
        assert!(close(SpeedUnit::KilometersPerHour.to_meters_per_second(36.0), 10.0));
        assert!(close(SpeedUnit::MilesPerHour.to_meters_per_second(3600.0), 1609.344));
    }

    #[test]
    fn units_deserialize_from_snake_case() {
        #[derive(Deserialize)]
        struct Units {
            duration: DurationUnit,
            pace: PaceUnit,
        }
        let parsed: Result<Units, _> =
            toml::from_str("duration = \"minutes\"\npace = \"minutes_per_mile\"\n");
        let parsed = parsed.ok();
        assert_eq!(parsed.as_ref().map(|u| u.duration), Some(DurationUnit::Minutes));
        assert_eq!(parsed.map(|u| u.pace), Some(PaceUnit::MinutesPerMile));
    }
}
