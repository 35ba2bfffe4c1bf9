//! Zoom and pan windowing over a sorted point series.

pub mod engine;
pub mod gesture;
pub mod state;
pub mod window;

pub use engine::{ViewportEngine, ViewportFrame};
pub use gesture::{Gesture, GestureTracker};
pub use state::ViewportState;
pub use window::IndexWindow;
