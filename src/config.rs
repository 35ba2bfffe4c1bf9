//! TOML-based chart configuration and preset definitions.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::chart::{AxisSpec, Dimension, X_COUNTS, Y_COUNTS};
use crate::demo::Workout;
use crate::units::{DurationUnit, PaceUnit};
use crate::viewport::state::MAX_ZOOM;
use crate::viewport::window::MIN_Y_SPAN_FRACTION;

/// Top-level chart configuration parsed from TOML.
///
/// All fields have defaults matching the heart rate preset. Load from
/// TOML with [`ChartConfig::from_toml_file`] or use
/// [`ChartConfig::heart_rate`] for the built-in default.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChartConfig {
    /// Where the plotted samples come from.
    #[serde(default)]
    pub data: DataConfig,
    /// Horizontal axis.
    #[serde(default = "AxisConfig::x_default")]
    pub x_axis: AxisConfig,
    /// Vertical axis.
    #[serde(default = "AxisConfig::y_default")]
    pub y_axis: AxisConfig,
    /// Zoom and pan limits.
    #[serde(default)]
    pub viewport: ViewportConfig,
}

/// Synthetic workout parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DataConfig {
    /// Workout kind: `"heart_rate"`, `"pace"` or `"elevation"`.
    pub source: String,
    /// Number of samples to generate (must be > 0).
    pub samples: usize,
    /// Seconds between samples (must be > 0).
    pub interval_s: f64,
    /// Noise standard deviation, in the unit of the samples.
    pub noise_std: f64,
    /// Random seed.
    pub seed: u64,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            source: "heart_rate".to_string(),
            samples: 720,
            interval_s: 5.0,
            noise_std: 2.0,
            seed: 42,
        }
    }
}

/// Axis dimension as written in TOML.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DimensionKind {
    #[default]
    Plain,
    Duration,
    Pace,
}

/// One chart axis.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AxisConfig {
    /// `plain`, `duration` or `pace`.
    pub dimension: DimensionKind,
    /// Unit of duration values.
    pub unit: DurationUnit,
    /// Unit pace labels are shown in.
    pub label_unit: PaceUnit,
    /// Unit pace values are stored in.
    pub data_unit: PaceUnit,
    /// Tick counts tried by plain ranges, in order.
    pub candidate_counts: Vec<usize>,
}

impl Default for AxisConfig {
    fn default() -> Self {
        Self {
            dimension: DimensionKind::Plain,
            unit: DurationUnit::Seconds,
            label_unit: PaceUnit::MinutesPerKilometer,
            data_unit: PaceUnit::MinutesPerKilometer,
            candidate_counts: Y_COUNTS.to_vec(),
        }
    }
}

impl AxisConfig {
    fn x_default() -> Self {
        Self {
            dimension: DimensionKind::Duration,
            candidate_counts: X_COUNTS.to_vec(),
            ..Self::default()
        }
    }

    fn y_default() -> Self {
        Self::default()
    }

    /// Attaches the configured units to the dimension.
    pub fn spec(&self) -> AxisSpec {
        let dimension = match self.dimension {
            DimensionKind::Plain => Dimension::Plain,
            DimensionKind::Duration => Dimension::Duration { unit: self.unit },
            DimensionKind::Pace => Dimension::Pace {
                label_unit: self.label_unit,
                data_unit: self.data_unit,
            },
        };
        AxisSpec {
            dimension,
            candidate_counts: self.candidate_counts.clone(),
        }
    }

    fn validate(&self, field: &str, errors: &mut Vec<ConfigError>) {
        if self.candidate_counts.is_empty() {
            errors.push(ConfigError {
                field: format!("{field}.candidate_counts"),
                message: "must not be empty".into(),
            });
        }
        if self.candidate_counts.contains(&0) {
            errors.push(ConfigError {
                field: format!("{field}.candidate_counts"),
                message: "entries must be > 0".into(),
            });
        }
    }
}

/// Viewport limits.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewportConfig {
    /// Width of the plot area in pixels, used to scale pan drags.
    pub pixel_width: f64,
    /// Largest zoom factor (must be >= 1).
    pub max_zoom: f64,
    /// Smallest visible y span as a fraction of the full y range.
    pub min_y_span_fraction: f64,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            pixel_width: 800.0,
            max_zoom: MAX_ZOOM,
            min_y_span_fraction: MIN_Y_SPAN_FRACTION,
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug)]
pub struct ConfigError {
    /// Dotted field path (e.g., `"data.samples"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "config error: {}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

impl ChartConfig {
    /// Heart rate over elapsed time.
    pub fn heart_rate() -> Self {
        Self {
            data: DataConfig::default(),
            x_axis: AxisConfig::x_default(),
            y_axis: AxisConfig::y_default(),
            viewport: ViewportConfig::default(),
        }
    }

    /// Running pace in minutes per kilometer over elapsed time.
    pub fn pace() -> Self {
        Self {
            data: DataConfig {
                source: "pace".to_string(),
                noise_std: 0.15,
                ..DataConfig::default()
            },
            y_axis: AxisConfig {
                dimension: DimensionKind::Pace,
                ..AxisConfig::y_default()
            },
            ..Self::heart_rate()
        }
    }

    /// The pace workout labelled in minutes per mile.
    pub fn pace_imperial() -> Self {
        let mut cfg = Self::pace();
        cfg.y_axis.label_unit = PaceUnit::MinutesPerMile;
        cfg
    }

    /// Elevation over a long ride, sampled every 10 seconds.
    pub fn elevation() -> Self {
        Self {
            data: DataConfig {
                source: "elevation".to_string(),
                samples: 1080,
                interval_s: 10.0,
                noise_std: 0.5,
                ..DataConfig::default()
            },
            ..Self::heart_rate()
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["heart_rate", "pace", "pace_imperial", "elevation"];

    /// Loads a configuration from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "heart_rate" => Ok(Self::heart_rate()),
            "pace" => Ok(Self::pace()),
            "pace_imperial" => Ok(Self::pace_imperial()),
            "elevation" => Ok(Self::elevation()),
            _ => Err(ConfigError {
                field: "preset".to_string(),
                message: format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            }),
        }
    }

    /// Parses a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "config".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// Resolved x axis.
    pub fn x_spec(&self) -> AxisSpec {
        self.x_axis.spec()
    }

    /// Resolved y axis.
    pub fn y_spec(&self) -> AxisSpec {
        self.y_axis.spec()
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        let d = &self.data;

        if d.source.parse::<Workout>().is_err() {
            errors.push(ConfigError {
                field: "data.source".into(),
                message: format!(
                    "must be one of {}, got \"{}\"",
                    Workout::NAMES.join(", "),
                    d.source
                ),
            });
        }
        if d.samples == 0 {
            errors.push(ConfigError {
                field: "data.samples".into(),
                message: "must be > 0".into(),
            });
        }
        if !(d.interval_s > 0.0 && d.interval_s.is_finite()) {
            errors.push(ConfigError {
                field: "data.interval_s".into(),
                message: "must be a finite number > 0".into(),
            });
        }
        if !(d.noise_std >= 0.0 && d.noise_std.is_finite()) {
            errors.push(ConfigError {
                field: "data.noise_std".into(),
                message: "must be a finite number >= 0".into(),
            });
        }

        self.x_axis.validate("x_axis", &mut errors);
        self.y_axis.validate("y_axis", &mut errors);
        if self.x_axis.dimension == DimensionKind::Pace {
            errors.push(ConfigError {
                field: "x_axis.dimension".into(),
                message: "pace is only supported on the y axis".into(),
            });
        }

        let v = &self.viewport;
        if !(v.pixel_width > 0.0 && v.pixel_width.is_finite()) {
            errors.push(ConfigError {
                field: "viewport.pixel_width".into(),
                message: "must be a finite number > 0".into(),
            });
        }
        if v.max_zoom.is_nan() || v.max_zoom < 1.0 {
            errors.push(ConfigError {
                field: "viewport.max_zoom".into(),
                message: "must be >= 1".into(),
            });
        }
        if !(0.0..1.0).contains(&v.min_y_span_fraction) {
            errors.push(ConfigError {
                field: "viewport.min_y_span_fraction".into(),
                message: "must be in [0.0, 1.0)".into(),
            });
        }

        errors
    }
}
