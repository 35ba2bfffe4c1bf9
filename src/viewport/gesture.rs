//! In-flight gesture tracking.
//!
//! Continuous updates only record the live value. The committed viewport
//! changes once, when the gesture settles; a cancelled gesture leaves it
//! untouched.

use tracing::{debug, trace};

use super::engine::{ViewportEngine, ViewportFrame};
use super::state::ViewportState;

/// The gesture currently in progress.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Gesture {
    #[default]
    Idle,
    /// Cumulative magnification since the pinch began.
    Zooming { factor: f64 },
    /// Cumulative horizontal drag in pixels since the drag began.
    Panning { pixels: f64 },
}

/// Drives the idle, zooming and panning states for one chart.
#[derive(Debug, Clone, Default)]
pub struct GestureTracker {
    gesture: Gesture,
}

impl GestureTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gesture(&self) -> Gesture {
        self.gesture
    }

    pub fn is_idle(&self) -> bool {
        self.gesture == Gesture::Idle
    }

    /// Records the live magnification of a pinch.
    ///
    /// Returns `false` and changes nothing while a drag is in flight.
    pub fn zoom_changed(&mut self, factor: f64) -> bool {
        match self.gesture {
            Gesture::Idle | Gesture::Zooming { .. } => {
                trace!(factor, "zoom update");
                self.gesture = Gesture::Zooming { factor };
                true
            }
            Gesture::Panning { .. } => false,
        }
    }

    /// Records the live translation of a drag.
    ///
    /// Returns `false` and changes nothing while a pinch is in flight.
    pub fn pan_changed(&mut self, pixels: f64) -> bool {
        match self.gesture {
            Gesture::Idle | Gesture::Panning { .. } => {
                trace!(pixels, "pan update");
                self.gesture = Gesture::Panning { pixels };
                true
            }
            Gesture::Zooming { .. } => false,
        }
    }

    /// State the viewport would have if the gesture settled now.
    ///
    /// Nothing is committed and no labels are derived.
    pub fn preview(&self, engine: &ViewportEngine<'_>, viewport_width: f64) -> ViewportState {
        let state = engine.state();
        let domain = engine.x_domain();
        match self.gesture {
            Gesture::Idle => state,
            Gesture::Zooming { factor } => state.zoomed(factor, domain, engine.max_zoom()),
            Gesture::Panning { pixels } => {
                state.panned(state.pixels_to_domain(pixels, viewport_width, domain), domain)
            }
        }
    }

    /// Commits the in-flight gesture through `engine`.
    ///
    /// Returns the new frame, or `None` when idle.
    pub fn settle(
        &mut self,
        engine: &mut ViewportEngine<'_>,
        viewport_width: f64,
    ) -> Option<ViewportFrame> {
        let gesture = std::mem::take(&mut self.gesture);
        match gesture {
            Gesture::Idle => None,
            Gesture::Zooming { factor } => Some(engine.on_zoom_settle(factor)),
            Gesture::Panning { pixels } => Some(engine.on_pan_settle(pixels, viewport_width)),
        }
    }

    /// Abandons the in-flight gesture, returning what was discarded.
    pub fn cancel(&mut self) -> Gesture {
        let abandoned = std::mem::take(&mut self.gesture);
        if abandoned != Gesture::Idle {
            debug!(?abandoned, "gesture cancelled");
        }
        abandoned
    }
}
