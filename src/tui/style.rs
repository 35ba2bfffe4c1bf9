//! Color constants and axis label helpers for the TUI.

use ratatui::style::Color;

/// Series line color.
pub const SERIES_COLOR: Color = Color::Cyan;
/// Axis annotation color.
pub const AXIS_COLOR: Color = Color::Gray;
/// Header bar foreground.
pub const HEADER_FG: Color = Color::White;
/// Header bar background.
pub const HEADER_BG: Color = Color::DarkGray;
/// Footer help text color.
pub const FOOTER_FG: Color = Color::DarkGray;
/// In-flight gesture indicator color.
pub const GESTURE_ACTIVE: Color = Color::Magenta;

/// Spreads tick labels over an axis whose bounds are one tick wider than
/// the labels cover.
///
/// Ratatui places labels evenly from the low bound to the high bound, so a
/// blank label fills the unlabelled slot. Descending labels (pace) are
/// flipped to run bottom to top.
pub fn axis_labels(labels: &[String], descending: bool) -> Vec<String> {
    let mut out = Vec::with_capacity(labels.len() + 1);
    if descending {
        out.push(String::new());
        out.extend(labels.iter().rev().cloned());
    } else {
        out.extend(labels.iter().cloned());
        out.push(String::new());
    }
    out
}
