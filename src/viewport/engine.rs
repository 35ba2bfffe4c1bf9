//! Viewport engine: settles gestures and derives the visible frame.

use serde::Serialize;
use tracing::debug;

use super::state::{MAX_ZOOM, ViewportState};
use super::window::{IndexWindow, MIN_Y_SPAN_FRACTION, index_window, visible_y_range};
use crate::range::{AxisRange, RangeError, Readable, ReadableRange};
use crate::series::{Interval, Point, PointSeries};

/// Default x-axis tick counts when the engine builds its own axes.
const X_COUNTS: [usize; 2] = [3, 4];
/// Default y-axis tick counts when the engine builds its own axes.
const Y_COUNTS: [usize; 3] = [4, 5, 6];

/// Everything a renderer needs for the current viewport.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewportFrame {
    pub zoom: f64,
    pub pan: f64,
    pub visible_x_range: Interval,
    pub visible_y_range: Interval,
    pub visible_index_range: IndexWindow,
    pub x_labels: Vec<String>,
    pub y_labels: Vec<String>,
}

/// Pan/zoom windowing over a sorted point series.
///
/// The engine borrows the series and owns one readable range per axis. It
/// holds the committed [`ViewportState`]; gestures replace that state only
/// when they settle.
#[derive(Debug, Clone)]
pub struct ViewportEngine<'a> {
    points: &'a [Point],
    x_domain: Interval,
    y_domain: Interval,
    x_axis: AxisRange,
    y_axis: AxisRange,
    state: ViewportState,
    max_zoom: f64,
    min_y_span_fraction: f64,
}

impl<'a> ViewportEngine<'a> {
    /// Creates an engine with plain readable axes over the two domains.
    ///
    /// Zero-width domains are widened to a minimum width first.
    ///
    /// # Errors
    ///
    /// Returns a [`RangeError`] if a domain bound is not finite.
    pub fn new(
        x_domain: Interval,
        y_domain: Interval,
        series: &'a PointSeries,
    ) -> Result<Self, RangeError> {
        let x_domain = x_domain.non_degenerate();
        let y_domain = y_domain.non_degenerate();
        let x_axis = ReadableRange::compute(x_domain.lower, x_domain.upper, &X_COUNTS)?;
        let y_axis = ReadableRange::compute(y_domain.lower, y_domain.upper, &Y_COUNTS)?;
        Ok(Self::with_axes(
            x_domain,
            y_domain,
            series,
            x_axis.into(),
            y_axis.into(),
        ))
    }

    /// Creates an engine with caller-chosen axis ranges.
    pub fn with_axes(
        x_domain: Interval,
        y_domain: Interval,
        series: &'a PointSeries,
        x_axis: AxisRange,
        y_axis: AxisRange,
    ) -> Self {
        let x_domain = x_domain.non_degenerate();
        let y_domain = y_domain.non_degenerate();
        Self {
            points: series.points(),
            x_domain,
            y_domain,
            x_axis,
            y_axis,
            state: ViewportState::reset(x_domain),
            max_zoom: MAX_ZOOM,
            min_y_span_fraction: MIN_Y_SPAN_FRACTION,
        }
    }

    /// Overrides the zoom cap and minimum y span fraction.
    pub fn with_limits(mut self, max_zoom: f64, min_y_span_fraction: f64) -> Self {
        self.max_zoom = max_zoom.max(1.0);
        self.min_y_span_fraction = min_y_span_fraction.max(0.0);
        self
    }

    /// Restores a previously committed state.
    pub fn with_state(mut self, state: ViewportState) -> Self {
        self.state = state;
        self
    }

    pub fn state(&self) -> ViewportState {
        self.state
    }

    pub fn max_zoom(&self) -> f64 {
        self.max_zoom
    }

    pub fn x_domain(&self) -> Interval {
        self.x_domain
    }

    pub fn y_domain(&self) -> Interval {
        self.y_domain
    }

    pub fn x_axis(&self) -> &AxisRange {
        &self.x_axis
    }

    pub fn y_axis(&self) -> &AxisRange {
        &self.y_axis
    }

    /// Commits a finished zoom gesture and returns the new frame.
    pub fn on_zoom_settle(&mut self, factor: f64) -> ViewportFrame {
        self.state = self.state.zoomed(factor, self.x_domain, self.max_zoom);
        debug!(factor, zoom = self.state.zoom(), pan = self.state.pan(), "zoom settled");
        self.frame()
    }

    /// Commits a finished drag of `pixel_delta` across a view
    /// `viewport_width` pixels wide and returns the new frame.
    pub fn on_pan_settle(&mut self, pixel_delta: f64, viewport_width: f64) -> ViewportFrame {
        let delta = self
            .state
            .pixels_to_domain(pixel_delta, viewport_width, self.x_domain);
        self.state = self.state.panned(delta, self.x_domain);
        debug!(pixel_delta, delta, pan = self.state.pan(), "pan settled");
        self.frame()
    }

    /// Returns to the full domain.
    pub fn reset(&mut self) -> ViewportFrame {
        self.state = ViewportState::reset(self.x_domain);
        self.frame()
    }

    /// Index window for the committed state.
    pub fn index_window(&self) -> IndexWindow {
        if self.state.is_reset() {
            return IndexWindow::full(self.points.len());
        }
        index_window(self.points, self.state.visible_range(self.x_domain))
    }

    /// Points inside the committed window.
    pub fn visible_points(&self) -> &'a [Point] {
        let points = self.points;
        points.get(self.index_window().range()).unwrap_or(&[])
    }

    /// Derives the frame for the committed state.
    pub fn frame(&self) -> ViewportFrame {
        let visible_x = self.state.visible_range(self.x_domain);
        let window = self.index_window();
        let visible_y = visible_y_range(
            self.points.get(window.range()).unwrap_or(&[]),
            self.y_domain,
            self.min_y_span_fraction,
        );

        let (x_labels, y_labels) = if self.state.is_reset() {
            (self.x_axis.labels().to_vec(), self.y_axis.labels().to_vec())
        } else {
            (
                self.x_axis.labels_for_range(visible_x.lower, visible_x.upper),
                self.y_axis.labels_for_range(visible_y.lower, visible_y.upper),
            )
        };

        ViewportFrame {
            zoom: self.state.zoom(),
            pan: self.state.pan(),
            visible_x_range: visible_x,
            visible_y_range: visible_y,
            visible_index_range: window,
            x_labels,
            y_labels,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series() -> PointSeries {
        let xs: Vec<f64> = (0..=100).map(f64::from).collect();
        let ys: Vec<f64> = xs.iter().map(|x| (x / 10.0).sin() * 10.0 + 50.0).collect();
        PointSeries::from_xy(&xs, &ys)
    }

    fn engine(series: &PointSeries) -> ViewportEngine<'_> {
        ViewportEngine::new(series.x_bounds(), series.y_bounds(), series).expect("finite domain")
    }

    #[test]
    fn initial_frame_shows_everything() {
        let s = series();
        let e = engine(&s);
        let frame = e.frame();
        assert_eq!(frame.zoom, 1.0);
        assert_eq!(frame.pan, 50.0);
        assert_eq!(frame.visible_x_range, Interval::new(0.0, 100.0));
        assert_eq!(frame.visible_index_range, IndexWindow::full(101));
        assert_eq!(frame.x_labels, e.x_axis().labels());
    }

    #[test]
    fn narrow_domain_is_shown_as_given() {
        let xs = [0.0, 0.0001, 0.0002, 0.0003];
        let s = PointSeries::from_xy(&xs, &[1.0, 2.0, 3.0, 4.0]);
        let domain = Interval::new(0.0, 0.0003);
        let e = ViewportEngine::new(domain, s.y_bounds(), &s).expect("finite domain");
        assert_eq!(e.x_domain(), domain);
        let frame = e.frame();
        assert_eq!(frame.visible_x_range, domain);
        assert_eq!(frame.pan, domain.midpoint());
    }

    #[test]
    fn zoom_narrows_window_and_relabels() {
        let s = series();
        let mut e = engine(&s);
        let frame = e.on_zoom_settle(4.0);
        assert_eq!(frame.visible_x_range, Interval::new(37.5, 62.5));
        assert_eq!(frame.visible_index_range.range(), 38..63);
        assert_eq!(frame.x_labels.len(), e.x_axis().count());
        assert_eq!(frame.y_labels.len(), e.y_axis().count());
        assert_eq!(e.visible_points().len(), 25);
    }

    #[test]
    fn zoom_back_to_one_resets() {
        let s = series();
        let mut e = engine(&s);
        e.on_zoom_settle(5.0);
        e.on_pan_settle(-200.0, 400.0);
        let frame = e.on_zoom_settle(0.1);
        assert_eq!(frame.pan, 50.0);
        assert_eq!(frame.visible_x_range, e.x_domain());
    }

    #[test]
    fn pan_is_noop_when_not_zoomed() {
        let s = series();
        let mut e = engine(&s);
        let before = e.frame();
        let after = e.on_pan_settle(120.0, 400.0);
        assert_eq!(before, after);
    }

    #[test]
    fn pan_stops_at_domain_edge() {
        let s = series();
        let mut e = engine(&s);
        e.on_zoom_settle(2.0);
        let frame = e.on_pan_settle(-10_000.0, 400.0);
        assert_eq!(frame.visible_x_range, Interval::new(50.0, 100.0));
        assert_eq!(frame.visible_index_range.end, 101);
    }

    #[test]
    fn y_span_never_collapses() {
        let flat = PointSeries::from_xy(&[0.0, 1.0, 2.0, 3.0], &[0.0, 0.0, 10.0, 10.0]);
        let mut e = engine(&flat);
        let frame = e.on_zoom_settle(10.0);
        assert!(frame.visible_y_range.width() >= 10.0 / 100.0 - 1e-12);
    }

    #[test]
    fn empty_series_does_not_panic() {
        let empty = PointSeries::default();
        let mut e = engine(&empty);
        let frame = e.on_zoom_settle(3.0);
        assert!(frame.visible_index_range.is_empty());
        assert_eq!(frame.visible_y_range, Interval::new(0.0, 1.0));
        let frame = e.on_pan_settle(50.0, 300.0);
        assert!(frame.visible_x_range.is_within(&e.x_domain()));
    }

    #[test]
    fn single_point_domain_is_widened() {
        let one = PointSeries::from_xy(&[7.0], &[3.0]);
        let mut e = engine(&one);
        assert!(e.x_domain().width() > 0.0);
        let frame = e.on_zoom_settle(2.0);
        assert!(frame.visible_x_range.is_within(&e.x_domain()));
        assert_eq!(frame.visible_index_range.range(), 0..1);
    }

    #[test]
    fn restoring_state_reproduces_frame() {
        let s = series();
        let mut e = engine(&s);
        let frame = e.on_zoom_settle(3.0);
        let restored = engine(&s).with_state(e.state());
        assert_eq!(restored.frame(), frame);
    }
}
