//! Chart viewer state.

use crate::chart::Chart;
use crate::config::{ChartConfig, ViewportConfig};
use crate::demo::WorkoutGenerator;
use crate::range::Readable;
use crate::series::{Interval, Point, PointSeries};
use crate::viewport::{Gesture, GestureTracker, ViewportEngine, ViewportFrame, ViewportState};

/// Magnification applied by one zoom key press.
pub const ZOOM_STEP: f64 = 1.5;

/// Fraction of the plot width moved by one pan key press.
const PAN_STEP_FRACTION: f64 = 0.125;

fn engine<'a>(chart: &'a Chart, limits: &ViewportConfig, state: ViewportState) -> ViewportEngine<'a> {
    chart
        .viewport()
        .with_limits(limits.max_zoom, limits.min_y_span_fraction)
        .with_state(state)
}

fn build_chart(config: &ChartConfig, series: PointSeries) -> Option<Chart> {
    Chart::new(series, &config.x_spec(), &config.y_spec()).ok()
}

fn generate(config: &ChartConfig) -> PointSeries {
    WorkoutGenerator::from_config(&config.data)
        .map(|g| {
            g.with_pace_unit(config.y_axis.data_unit)
                .series(config.data.samples)
        })
        .unwrap_or_default()
}

/// TUI application state.
///
/// The engine borrows the chart, so only the committed [`ViewportState`]
/// is stored and an engine is rebuilt around it when needed.
pub struct App {
    config: ChartConfig,
    chart: Chart,
    state: ViewportState,
    tracker: GestureTracker,
    /// Frame for the committed state.
    pub frame: ViewportFrame,
    /// Name of the active preset.
    pub preset_name: String,
    /// Whether the user has requested quit.
    pub quit: bool,
    /// Plot width in pixels used to scale drags.
    pub width: f64,
}

impl App {
    /// Creates a viewer for `config`, plotting `series` when given and the
    /// configured synthetic workout otherwise.
    ///
    /// Returns `None` when no chart can be built from the configuration.
    pub fn new(name: &str, config: ChartConfig, series: Option<PointSeries>) -> Option<Self> {
        let series = series.unwrap_or_else(|| generate(&config));
        let chart = build_chart(&config, series)?;
        let state = ViewportState::reset(chart.x_domain());
        let frame = engine(&chart, &config.viewport, state).frame();
        Some(Self {
            width: config.viewport.pixel_width,
            config,
            chart,
            state,
            tracker: GestureTracker::new(),
            frame,
            preset_name: name.to_string(),
            quit: false,
        })
    }

    pub fn chart(&self) -> &Chart {
        &self.chart
    }

    pub fn state(&self) -> ViewportState {
        self.state
    }

    pub fn gesture(&self) -> Gesture {
        self.tracker.gesture()
    }

    /// State the viewport would settle to, including an unfinished drag.
    pub fn preview(&self) -> ViewportState {
        let engine = engine(&self.chart, &self.config.viewport, self.state);
        self.tracker.preview(&engine, self.width)
    }

    /// Zooms in or out by one step and settles.
    pub fn zoom(&mut self, zoom_in: bool) {
        self.tracker.cancel();
        let factor = if zoom_in { ZOOM_STEP } else { 1.0 / ZOOM_STEP };
        self.tracker.zoom_changed(factor);
        self.settle();
    }

    /// Pans by one step and settles. `rightward` reveals later samples.
    pub fn pan(&mut self, rightward: bool) {
        self.tracker.cancel();
        self.tracker.pan_changed(self.pan_step(rightward));
        self.settle();
    }

    /// Extends the in-flight drag by one step without settling.
    pub fn drag(&mut self, rightward: bool) {
        let so_far = match self.tracker.gesture() {
            Gesture::Panning { pixels } => pixels,
            _ => 0.0,
        };
        self.tracker.pan_changed(so_far + self.pan_step(rightward));
    }

    /// Commits the in-flight gesture, if any.
    pub fn settle(&mut self) {
        let mut engine = engine(&self.chart, &self.config.viewport, self.state);
        if let Some(frame) = self.tracker.settle(&mut engine, self.width) {
            self.state = engine.state();
            self.frame = frame;
        }
    }

    /// Drops the in-flight gesture.
    pub fn cancel(&mut self) {
        self.tracker.cancel();
    }

    /// Back to the full domain.
    pub fn reset(&mut self) {
        self.tracker.cancel();
        let mut engine = engine(&self.chart, &self.config.viewport, self.state);
        self.frame = engine.reset();
        self.state = engine.state();
    }

    /// Switches to a different preset, resetting the viewport.
    pub fn switch_preset(&mut self, name: &str) {
        let Ok(config) = ChartConfig::from_preset(name) else {
            return;
        };
        if let Some(app) = Self::new(name, config, None) {
            *self = app;
        }
    }

    /// Points in the committed window.
    pub fn visible_points(&self) -> Vec<(f64, f64)> {
        let engine = engine(&self.chart, &self.config.viewport, self.state);
        engine.visible_points().iter().map(|p: &Point| (p.x, p.y)).collect()
    }

    /// Plot bounds matching the frame labels.
    ///
    /// At zoom 1 these are the readable ranges; otherwise the visible ranges.
    pub fn bounds(&self) -> (Interval, Interval) {
        if self.state.is_reset() {
            let x = self.chart.x_axis();
            let y = self.chart.y_axis();
            (Interval::new(x.start(), x.end()), Interval::new(y.start(), y.end()))
        } else {
            (self.frame.visible_x_range, self.frame.visible_y_range)
        }
    }

    fn pan_step(&self, rightward: bool) -> f64 {
        // Dragging left reveals what lies to the right.
        let pixels = self.width * PAN_STEP_FRACTION;
        if rightward { -pixels } else { pixels }
    }
}
