//! Committed zoom and pan.

use serde::Serialize;
use tracing::warn;

use crate::series::Interval;

/// Default upper bound on magnification.
pub const MAX_ZOOM: f64 = 1000.0;

/// Zoom factor and window center of a chart viewport.
///
/// Values are immutable: [`zoomed`](Self::zoomed) and [`panned`](Self::panned)
/// return a new state. `zoom == 1` shows the whole domain with `pan` at
/// the domain midpoint.
///
/// # Examples
///
/// ```
/// use fitchart::series::Interval;
/// use fitchart::viewport::ViewportState;
///
/// let domain = Interval::new(0.0, 100.0);
/// let state = ViewportState::reset(domain).zoomed(4.0, domain, 1000.0);
/// assert_eq!(state.visible_range(domain), Interval::new(37.5, 62.5));
///
/// let state = state.panned(1000.0, domain);
/// assert_eq!(state.visible_range(domain), Interval::new(75.0, 100.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ViewportState {
    zoom: f64,
    pan: f64,
}

impl ViewportState {
    /// Full-domain state.
    pub fn reset(domain: Interval) -> Self {
        Self {
            zoom: 1.0,
            pan: domain.midpoint(),
        }
    }

    /// Magnification, always `>= 1`.
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Window center in domain coordinates.
    pub fn pan(&self) -> f64 {
        self.pan
    }

    pub fn is_reset(&self) -> bool {
        self.zoom <= 1.0
    }

    /// Half the visible width.
    pub fn half_width(&self, domain: Interval) -> f64 {
        domain.width() / (2.0 * self.zoom)
    }

    /// Visible part of `domain`, never extending past it.
    pub fn visible_range(&self, domain: Interval) -> Interval {
        if self.is_reset() {
            return domain;
        }
        let half = self.half_width(domain);
        Interval::new(self.pan - half, self.pan + half).clamp_to(&domain)
    }

    /// Applies a settled zoom gesture.
    ///
    /// The new zoom is `factor * zoom`, floored at 1 and capped at
    /// `max_zoom`. Reaching 1 recenters on the domain. Otherwise `pan` is
    /// kept if the new window still fits, or moved to the nearest center
    /// that does. Non-finite or non-positive factors leave the state as is.
    pub fn zoomed(self, factor: f64, domain: Interval, max_zoom: f64) -> Self {
        if !factor.is_finite() || factor <= 0.0 {
            warn!(factor, "ignoring invalid zoom factor");
            return self;
        }
        let zoom = (factor * self.zoom).min(max_zoom.max(1.0));
        if zoom <= 1.0 {
            return Self::reset(domain);
        }
        let half = domain.width() / (2.0 * zoom);
        let pan = self.pan.clamp(domain.lower + half, domain.upper - half);
        Self { zoom, pan }
    }

    /// Applies a settled pan of `delta` domain units.
    ///
    /// The translation is clamped on both sides so the window stays inside
    /// `domain`. At zoom 1 this is a no-op.
    pub fn panned(self, delta: f64, domain: Interval) -> Self {
        if self.is_reset() {
            return Self::reset(domain);
        }
        if !delta.is_finite() {
            warn!(delta, "ignoring invalid pan delta");
            return self;
        }
        let half = self.half_width(domain);
        let room_left = self.pan - half - domain.lower;
        let room_right = domain.upper - (self.pan + half);
        let translation = delta.max(-room_left).min(room_right);
        Self {
            zoom: self.zoom,
            pan: self.pan + translation,
        }
    }

    /// Domain translation for a drag of `pixel_delta` across a view
    /// `viewport_width` pixels wide.
    ///
    /// Dragging right moves the window left. Returns 0 for an empty view.
    pub fn pixels_to_domain(&self, pixel_delta: f64, viewport_width: f64, domain: Interval) -> f64 {
        if viewport_width.is_nan() || viewport_width <= 0.0 || viewport_width.is_infinite() {
            return 0.0;
        }
        -(domain.width() / self.zoom) * pixel_delta / viewport_width
    }
}
