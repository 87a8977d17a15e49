//! The immutable elevation surface and its CSV loader.

use std::fs;
use std::path::Path;

use crate::error::{Result, SimError};
use crate::types::Coord;

/// A rectangular, fully populated elevation surface.
///
/// Constructed once before a run and never mutated afterwards. Cells are
/// stored row-major and queried as `elevation(x, y)` with `x` indexing
/// rows and `y` indexing columns.
#[derive(Debug, Clone)]
pub struct Grid {
    cells: Vec<f64>,
    rows: usize,
    cols: usize,
}

impl Grid {
    /// Builds a grid from already-parsed rows.
    ///
    /// Fails with [`SimError::EmptyGrid`] when no rows (or no columns)
    /// are given, and with [`SimError::RaggedRow`] when any row differs
    /// in width from the first.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        if rows.is_empty() || cols == 0 {
            return Err(SimError::EmptyGrid);
        }
        for (i, row) in rows.iter().enumerate() {
            if row.len() != cols {
                return Err(SimError::RaggedRow {
                    row: i + 1,
                    found: row.len(),
                    expected: cols,
                });
            }
        }

        let n_rows = rows.len();
        let cells = rows.into_iter().flatten().collect();
        Ok(Self {
            cells,
            rows: n_rows,
            cols,
        })
    }

    /// Parses a grid from CSV text: one row per line, comma-separated.
    ///
    /// Every field is force-parsed as a floating-point number after
    /// stripping whitespace and surrounding double quotes, so quoted
    /// numerics are accepted but anything non-numeric is a fatal
    /// [`SimError::MalformedField`]. Blank lines (e.g. a trailing
    /// newline) are skipped.
    pub fn from_csv(text: &str) -> Result<Self> {
        let mut rows = Vec::new();
        for (line_no, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let mut row = Vec::new();
            for (field_no, field) in line.split(',').enumerate() {
                let cleaned = field.trim().trim_matches('"');
                let value: f64 =
                    cleaned
                        .parse()
                        .map_err(|_| SimError::MalformedField {
                            row: line_no + 1,
                            col: field_no + 1,
                            value: field.trim().to_owned(),
                        })?;
                row.push(value);
            }
            rows.push(row);
        }
        Self::from_rows(rows)
    }

    /// Reads and parses a grid from a CSV file on disk.
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| SimError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_csv(&text)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// The elevation at row `x`, column `y`.
    ///
    /// ### Panics
    /// Panics if the coordinate is outside the grid. Callers keep
    /// coordinates within `[0, length]` and `length` is validated
    /// against the grid before a run starts, so this cannot fire during
    /// a simulation.
    #[inline]
    pub fn elevation(&self, x: usize, y: usize) -> f64 {
        assert!(x < self.rows && y < self.cols, "coordinate out of grid");
        self.cells[x * self.cols + y]
    }

    /// The smallest elevation within the square window
    /// `[0, length] x [0, length]`.
    ///
    /// Only the used window counts: a grid larger than `length + 1` on
    /// either axis may hold lower cells outside it, and those do not
    /// participate in the run.
    pub fn min_elevation(&self, length: usize) -> f64 {
        let mut min = f64::INFINITY;
        for x in 0..=length {
            for y in 0..=length {
                min = min.min(self.elevation(x, y));
            }
        }
        min
    }

    /// Every coordinate in the window holding the minimum elevation.
    pub fn outlet_cells(&self, length: usize) -> Vec<Coord> {
        let min = self.min_elevation(length);
        let mut outlets = Vec::new();
        for x in 0..=length {
            for y in 0..=length {
                if self.elevation(x, y) == min {
                    outlets.push((x, y));
                }
            }
        }
        outlets
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_csv_parses_plain_and_quoted_fields() {
        let grid = Grid::from_csv("1,2.5,3\n\"4\", 5 ,\"6.5\"\n").unwrap();

        assert_eq!(grid.rows(), 2);
        assert_eq!(grid.cols(), 3);
        assert_eq!(grid.elevation(0, 1), 2.5);
        assert_eq!(grid.elevation(1, 0), 4.0);
        assert_eq!(grid.elevation(1, 2), 6.5);
    }

    #[test]
    fn from_csv_rejects_non_numeric_fields() {
        let err = Grid::from_csv("1,2\n3,abc\n").unwrap_err();
        match err {
            SimError::MalformedField { row, col, value } => {
                assert_eq!(row, 2);
                assert_eq!(col, 2);
                assert_eq!(value, "abc");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn from_csv_rejects_ragged_rows() {
        let err = Grid::from_csv("1,2,3\n4,5\n").unwrap_err();
        match err {
            SimError::RaggedRow {
                row,
                found,
                expected,
            } => {
                assert_eq!(row, 2);
                assert_eq!(found, 2);
                assert_eq!(expected, 3);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn from_csv_rejects_empty_input() {
        assert!(matches!(Grid::from_csv(""), Err(SimError::EmptyGrid)));
        assert!(matches!(Grid::from_csv("\n\n"), Err(SimError::EmptyGrid)));
    }

    #[test]
    fn min_and_outlets_respect_the_window() {
        // The lowest cell (-5) sits outside the 2x2 window.
        let grid = Grid::from_rows(vec![
            vec![3.0, 1.0, 9.0],
            vec![1.0, 4.0, 9.0],
            vec![9.0, 9.0, -5.0],
        ])
        .unwrap();

        assert_eq!(grid.min_elevation(1), 1.0);
        assert_eq!(grid.outlet_cells(1), vec![(0, 1), (1, 0)]);

        // Widening the window to the whole grid picks up the -5 cell.
        assert_eq!(grid.min_elevation(2), -5.0);
        assert_eq!(grid.outlet_cells(2), vec![(2, 2)]);
    }
}
