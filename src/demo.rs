//! Seeded synthetic workouts for presets, demos and tests.

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use rand::{Rng, SeedableRng, rngs::StdRng};
use tracing::debug;

use crate::config::DataConfig;
use crate::series::{Point, PointSeries};
use crate::units::{PaceUnit, pace_from_speed};

/// Chance that a pace sample is a standstill (zero speed).
const STOP_PROBABILITY: f64 = 0.01;

/// Kind of synthetic workout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Workout {
    /// Beats per minute: warm-up ramp, then a steady effort with intervals.
    HeartRate,
    /// Running pace derived from speed; standstills produce infinite pace.
    Pace,
    /// Meters above sea level over rolling terrain.
    Elevation,
}

impl Workout {
    /// Accepted names, as used in configuration.
    pub const NAMES: &[&str] = &["heart_rate", "pace", "elevation"];
}

impl FromStr for Workout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "heart_rate" => Ok(Self::HeartRate),
            "pace" => Ok(Self::Pace),
            "elevation" => Ok(Self::Elevation),
            other => Err(format!("unknown workout \"{other}\"")),
        }
    }
}

impl fmt::Display for Workout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::HeartRate => "heart_rate",
            Self::Pace => "pace",
            Self::Elevation => "elevation",
        })
    }
}

/// Generates one workout sample at a time.
///
/// The same seed always yields the same samples.
///
/// # Examples
///
/// ```
/// use fitchart::demo::{Workout, WorkoutGenerator};
///
/// let mut a = WorkoutGenerator::new(Workout::HeartRate, 5.0, 2.0, 7);
/// let mut b = WorkoutGenerator::new(Workout::HeartRate, 5.0, 2.0, 7);
/// assert_eq!(a.series(100), b.series(100));
/// ```
#[derive(Debug, Clone)]
pub struct WorkoutGenerator {
    workout: Workout,
    /// Seconds between samples.
    interval_s: f64,
    /// Standard deviation of the Gaussian noise, in sample units.
    noise_std: f64,
    /// Unit pace samples are produced in.
    pace_unit: PaceUnit,
    rng: StdRng,
}

impl WorkoutGenerator {
    pub fn new(workout: Workout, interval_s: f64, noise_std: f64, seed: u64) -> Self {
        Self {
            workout,
            interval_s: interval_s.max(f64::MIN_POSITIVE),
            noise_std: noise_std.max(0.0),
            pace_unit: PaceUnit::MinutesPerKilometer,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Builds a generator from validated configuration.
    ///
    /// Returns `None` when the workout name is unknown.
    pub fn from_config(cfg: &DataConfig) -> Option<Self> {
        let workout = cfg.source.parse().ok()?;
        Some(Self::new(workout, cfg.interval_s, cfg.noise_std, cfg.seed))
    }

    /// Produces pace samples in `unit` instead of minutes per kilometer.
    pub fn with_pace_unit(mut self, unit: PaceUnit) -> Self {
        self.pace_unit = unit;
        self
    }

    /// Sample value at `step`; `x` is `step * interval_s` seconds.
    pub fn sample(&mut self, step: usize) -> f64 {
        let t = step as f64 * self.interval_s;
        match self.workout {
            Workout::HeartRate => {
                let warmup = (t / 600.0).min(1.0);
                let intervals = if (t / 240.0) as u64 % 2 == 1 { 12.0 } else { 0.0 };
                95.0 + 55.0 * warmup + intervals + 4.0 * (2.0 * PI * t / 900.0).sin() + self.noise()
            }
            Workout::Pace => {
                if self.rng.random::<f64>() < STOP_PROBABILITY {
                    return pace_from_speed(0.0, self.pace_unit);
                }
                let speed = 3.3 + 0.3 * (2.0 * PI * t / 1200.0).sin() + 0.1 * self.noise();
                pace_from_speed(speed.max(0.5), self.pace_unit)
            }
            Workout::Elevation => {
                let rolling = 35.0 * (2.0 * PI * t / 3600.0).sin() + 12.0 * (2.0 * PI * t / 700.0).sin();
                (120.0 + rolling + self.noise()).max(0.0)
            }
        }
    }

    /// The first `samples` points, with standstills dropped.
    pub fn series(&mut self, samples: usize) -> PointSeries {
        let points: Vec<Point> = (0..samples)
            .map(|step| Point::new(step as f64 * self.interval_s, self.sample(step)))
            .collect();
        let series = PointSeries::from_unsorted(points);
        debug!(workout = %self.workout, requested = samples, kept = series.len(), "generated workout");
        series
    }

    fn noise(&mut self) -> f64 {
        if self.noise_std <= 0.0 {
            return 0.0;
        }
        // Box-Muller
        let u1: f64 = self.rng.random::<f64>().clamp(1e-12, 1.0);
        let u2: f64 = self.rng.random::<f64>();
        let z0 = (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos();
        z0 * self.noise_std
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for name in Workout::NAMES {
            let parsed: Result<Workout, _> = name.parse();
            assert_eq!(parsed.map(|w| w.to_string()).as_deref(), Ok(*name));
        }
        assert!("cadence".parse::<Workout>().is_err());
    }

    #[test]
    fn same_seed_same_series() {
        let a = WorkoutGenerator::new(Workout::Elevation, 10.0, 0.5, 42).series(200);
        let b = WorkoutGenerator::new(Workout::Elevation, 10.0, 0.5, 42).series(200);
        assert_eq!(a, b);
    }

    #[test]
    fn different_seeds_differ() {
        let a = WorkoutGenerator::new(Workout::HeartRate, 5.0, 2.0, 1).series(50);
        let b = WorkoutGenerator::new(Workout::HeartRate, 5.0, 2.0, 2).series(50);
        assert_ne!(a, b);
    }

    #[test]
    fn heart_rate_is_plausible() {
        let s = WorkoutGenerator::new(Workout::HeartRate, 5.0, 2.0, 42).series(720);
        let y = s.y_bounds();
        assert!(y.lower > 70.0 && y.upper < 200.0, "got {y}");
        assert_eq!(s.x_bounds().upper, 719.0 * 5.0);
    }

    #[test]
    fn pace_drops_standstills() {
        let s = WorkoutGenerator::new(Workout::Pace, 1.0, 0.15, 42).series(2000);
        assert!(s.len() < 2000, "expected some zero-speed samples to be dropped");
        assert!(s.points().iter().all(|p| p.y.is_finite()));
        let y = s.y_bounds();
        assert!(y.lower > 3.0 && y.upper < 34.0, "got {y}");
    }

    #[test]
    fn pace_unit_scales_samples() {
        let km = WorkoutGenerator::new(Workout::Pace, 1.0, 0.0, 3).series(100);
        let mile = WorkoutGenerator::new(Workout::Pace, 1.0, 0.0, 3)
            .with_pace_unit(PaceUnit::MinutesPerMile)
            .series(100);
        assert_eq!(km.len(), mile.len());
        let ratio = mile.points()[0].y / km.points()[0].y;
        assert!((ratio - 1.609344).abs() < 1e-9);
    }

    #[test]
    fn noiseless_elevation_is_deterministic_without_rng() {
        let mut g = WorkoutGenerator::new(Workout::Elevation, 10.0, 0.0, 0);
        assert_eq!(g.sample(0), 120.0);
    }
}
