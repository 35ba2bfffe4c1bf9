//! CSV export for viewport frames and visible points.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::series::Point;
use crate::viewport::ViewportFrame;

/// Column header for frame label export.
const LABEL_HEADER: &str = "axis,index,label";

/// Column header for visible point export.
const WINDOW_HEADER: &str = "x,y";

/// Exports the tick labels of `frame` to a CSV file at the given path.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_frame_csv(frame: &ViewportFrame, path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    write_frame_csv(frame, io::BufWriter::new(file))
}

/// Writes the tick labels of `frame` as CSV to any writer.
///
/// One row per label: x labels first, then y labels, each in display
/// order. Produces identical output for identical frames.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_frame_csv(frame: &ViewportFrame, writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);
    wtr.write_record(LABEL_HEADER.split(','))?;

    let axes = [("x", &frame.x_labels), ("y", &frame.y_labels)];
    for (axis, labels) in axes {
        for (i, label) in labels.iter().enumerate() {
            wtr.write_record([axis, i.to_string().as_str(), label.as_str()])?;
        }
    }

    wtr.flush()?;
    Ok(())
}

/// Exports visible points to a CSV file at the given path.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_window_csv(points: &[Point], path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    write_window_csv(points, io::BufWriter::new(file))
}

/// Writes points as `x,y` CSV, readable again by the importer.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_window_csv(points: &[Point], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);
    wtr.write_record(WINDOW_HEADER.split(','))?;
    for p in points {
        wtr.write_record(&[p.x.to_string(), p.y.to_string()])?;
    }
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::Interval;
    use crate::viewport::IndexWindow;

    fn make_frame() -> ViewportFrame {
        ViewportFrame {
            zoom: 2.0,
            pan: 50.0,
            visible_x_range: Interval::new(25.0, 75.0),
            visible_y_range: Interval::new(0.0, 10.0),
            visible_index_range: IndexWindow { start: 25, end: 76 },
            x_labels: vec!["25".into(), "42".into(), "58".into()],
            y_labels: vec!["0.0".into(), "2.5".into(), "5.0".into(), "7.5".into()],
        }
    }

    fn output(frame: &ViewportFrame) -> String {
        let mut buf = Vec::new();
        write_frame_csv(frame, &mut buf).ok();
        String::from_utf8(buf).unwrap_or_default()
    }

    #[test]
    fn header_matches_schema() {
        let out = output(&make_frame());
        assert_eq!(out.lines().next(), Some("axis,index,label"));
    }

    #[test]
    fn row_count_matches_label_count() {
        let out = output(&make_frame());
        // 1 header + 3 x labels + 4 y labels
        assert_eq!(out.lines().count(), 8);
        assert_eq!(out.lines().nth(4), Some("y,0,0.0"));
    }

    #[test]
    fn deterministic_output() {
        assert_eq!(output(&make_frame()), output(&make_frame()));
    }

    #[test]
    fn pace_labels_are_written_verbatim() {
        let mut frame = make_frame();
        frame.y_labels = vec!["6:00".into(), "5:45".into()];
        let out = output(&frame);
        assert!(out.contains("y,1,5:45"));
    }

    #[test]
    fn window_round_trip_parseable() {
        let points = vec![Point::new(0.0, 1.5), Point::new(0.5, -2.0)];
        let mut buf = Vec::new();
        write_window_csv(&points, &mut buf).ok();
        let series = crate::io::import::read_series(buf.as_slice()).ok();
        assert_eq!(series.as_ref().map(|s| s.points().to_vec()), Some(points));
    }
}
