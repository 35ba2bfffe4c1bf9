//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use rand::{Rng, SeedableRng, rngs::StdRng};

use fitchart::chart::Chart;
use fitchart::config::ChartConfig;
use fitchart::demo::WorkoutGenerator;
use fitchart::series::{Point, PointSeries};

/// Iterations for seeded property loops.
pub const CASES: usize = 500;

/// Deterministic RNG for property loops.
pub fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// A random `(lower, upper)` with `lower < upper`, spanning many magnitudes.
pub fn random_interval(rng: &mut StdRng) -> (f64, f64) {
    let magnitude = 10f64.powi(rng.random_range(-4..=6));
    let lower = (rng.random::<f64>() * 2.0 - 1.0) * magnitude * 10.0;
    let width = rng.random::<f64>().max(1e-3) * magnitude;
    (round_to(lower, 8), round_to(lower + width, 8))
}

/// Rounds to `digits` significant digits, keeping generated inputs tidy.
fn round_to(x: f64, digits: i32) -> f64 {
    if x == 0.0 {
        return 0.0;
    }
    let scale = 10f64.powi(digits - 1 - x.abs().log10().floor() as i32);
    (x * scale).round() / scale
}

/// `n` samples with strictly increasing x and random y.
pub fn random_series(rng: &mut StdRng, n: usize) -> PointSeries {
    let mut x = rng.random::<f64>() * 100.0;
    let points: Vec<Point> = (0..n)
        .map(|_| {
            x += 0.1 + rng.random::<f64>() * 5.0;
            Point::new(x, rng.random::<f64>() * 200.0 - 50.0)
        })
        .collect();
    PointSeries::from_unsorted(points)
}

/// The series a preset generates.
pub fn preset_series(name: &str) -> PointSeries {
    let config = ChartConfig::from_preset(name).expect("preset exists");
    WorkoutGenerator::from_config(&config.data)
        .expect("preset workout is known")
        .with_pace_unit(config.y_axis.data_unit)
        .series(config.data.samples)
}

/// The chart a preset describes.
pub fn preset_chart(name: &str) -> Chart {
    let config = ChartConfig::from_preset(name).expect("preset exists");
    Chart::new(preset_series(name), &config.x_spec(), &config.y_spec()).expect("preset chart builds")
}
