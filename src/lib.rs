//! Readable axis ranges and pan/zoom windowing for fitness telemetry charts.
//!
//! [`range`] turns a raw data interval into human-friendly ticks and labels
//! for plain values, durations and paces, using exact decimal arithmetic.
//! [`viewport`] keeps a zoomed and panned window inside the data domain and
//! re-derives labels for whatever is visible. [`chart`] ties a series to one
//! range per axis.

pub mod chart;
pub mod config;
pub mod demo;
/// CSV series import and frame export.
pub mod io;
pub mod range;
pub mod series;
#[cfg(feature = "tui")]
pub mod tui;
pub mod units;
pub mod viewport;
