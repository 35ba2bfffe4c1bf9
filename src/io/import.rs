//! CSV import of `x,y` point series.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::series::{Point, PointSeries};

/// Failure while loading a series.
#[derive(Error, Debug)]
pub enum ImportError {
    #[error("cannot open \"{path}\": {source}")]
    Open { path: String, source: io::Error },
    #[error("row {row}: {source}")]
    Row { row: usize, source: csv::Error },
}

#[derive(Debug, Deserialize)]
struct Row {
    x: f64,
    y: f64,
}

/// Loads a series from a CSV file with an `x,y` header.
///
/// # Errors
///
/// Returns an [`ImportError`] if the file cannot be opened or a row does
/// not parse.
pub fn load_series(path: &Path) -> Result<PointSeries, ImportError> {
    let file = File::open(path).map_err(|source| ImportError::Open {
        path: path.display().to_string(),
        source,
    })?;
    read_series(io::BufReader::new(file))
}

/// Reads a series from CSV with an `x,y` header.
///
/// Extra columns are ignored. Rows may come in any order; non-finite
/// values are dropped and the result is sorted by `x`.
///
/// # Errors
///
/// Returns [`ImportError::Row`] with the 1-based data row number of the
/// first row that does not parse.
pub fn read_series(reader: impl Read) -> Result<PointSeries, ImportError> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut points = Vec::new();
    for (i, record) in rdr.deserialize::<Row>().enumerate() {
        let row = record.map_err(|source| ImportError::Row { row: i + 1, source })?;
        points.push(Point::new(row.x, row.y));
    }
    let read = points.len();
    let series = PointSeries::from_unsorted(points);
    debug!(read, kept = series.len(), "series imported");
    Ok(series)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_and_sorts_rows() {
        let data = "x,y\n2,20\n0,0\n1, 10\n";
        let series = read_series(data.as_bytes());
        let xs: Vec<f64> = series
            .as_ref()
            .map(|s| s.points().iter().map(|p| p.x).collect())
            .unwrap_or_default();
        assert_eq!(xs, vec![0.0, 1.0, 2.0]);
    }

    #[test]
    fn extra_columns_are_ignored() {
        let data = "t,x,y,note\n9,0,5,start\n9,1,6,end\n";
        let series = read_series(data.as_bytes());
        assert_eq!(series.as_ref().map(PointSeries::len).ok(), Some(2));
    }

    #[test]
    fn infinite_values_are_dropped() {
        let data = "x,y\n0,inf\n1,2\n";
        let series = read_series(data.as_bytes());
        assert_eq!(series.as_ref().map(PointSeries::len).ok(), Some(1));
    }

    #[test]
    fn bad_row_reports_its_number() {
        let data = "x,y\n0,1\n1,abc\n";
        let err = read_series(data.as_bytes()).err();
        assert!(matches!(err, Some(ImportError::Row { row: 2, .. })), "got {err:?}");
    }

    #[test]
    fn missing_file_is_an_open_error() {
        let err = load_series(Path::new("/nonexistent/series.csv")).err();
        assert!(matches!(err, Some(ImportError::Open { .. })));
    }
}
