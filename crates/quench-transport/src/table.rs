//! Tabulated transport coefficients.
//!
//! A [`CoefficientTable`] is a one-dimensional table `T -> value` loaded
//! from a whitespace-separated text file and evaluated by linear
//! interpolation. Kernels receive it at construction; the evolution driver
//! never touches table paths.

use std::fs;
use std::path::Path;

use crate::error::TableError;

/// A piecewise-linear function of temperature.
///
/// Outside the tabulated range the end values are held constant.
#[derive(Clone, Debug, PartialEq)]
pub struct CoefficientTable {
    xs: Vec<f64>,
    ys: Vec<f64>,
}

impl CoefficientTable {
    /// Build from `(x, y)` points.
    ///
    /// # Errors
    ///
    /// [`TableError::Empty`] for no points, [`TableError::NonFinite`] for a
    /// NaN or infinite coordinate, [`TableError::NotAscending`] if the
    /// abscissae are not strictly ascending.
    pub fn from_points(points: Vec<(f64, f64)>) -> Result<Self, TableError> {
        if points.is_empty() {
            return Err(TableError::Empty);
        }
        if let Some(row) = points
            .iter()
            .position(|(x, y)| !(x.is_finite() && y.is_finite()))
        {
            return Err(TableError::NonFinite { row });
        }
        for (row, pair) in points.windows(2).enumerate() {
            if pair[0].0 >= pair[1].0 {
                return Err(TableError::NotAscending { row: row + 1 });
            }
        }
        let (xs, ys) = points.into_iter().unzip();
        Ok(Self { xs, ys })
    }

    /// Parse table text: two numbers per line, `#` starts a comment line,
    /// blank lines are skipped, extra columns are ignored.
    ///
    /// # Errors
    ///
    /// [`TableError::Parse`] for a malformed line, plus the errors of
    /// [`from_points`](Self::from_points).
    pub fn parse(text: &str) -> Result<Self, TableError> {
        let mut points = Vec::new();
        for (i, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut cols = line.split_whitespace().map(str::parse::<f64>);
            match (cols.next(), cols.next()) {
                (Some(Ok(x)), Some(Ok(y))) if x.is_finite() && y.is_finite() => {
                    points.push((x, y));
                }
                _ => {
                    return Err(TableError::Parse {
                        line: i + 1,
                        content: raw.to_string(),
                    })
                }
            }
        }
        Self::from_points(points)
    }

    /// Read and parse a table file.
    ///
    /// # Errors
    ///
    /// [`TableError::Io`] if the file cannot be read, plus the errors of
    /// [`parse`](Self::parse).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TableError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| TableError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    /// Number of tabulated points.
    pub fn len(&self) -> usize {
        self.xs.len()
    }

    /// Always false for a constructed table.
    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    /// Tabulated abscissa range `(min, max)`.
    pub fn range(&self) -> (f64, f64) {
        (self.xs[0], self.xs[self.xs.len() - 1])
    }

    /// Evaluate at `x`. NaN evaluates to NaN.
    pub fn eval(&self, x: f64) -> f64 {
        if x.is_nan() {
            return f64::NAN;
        }
        let n = self.xs.len();
        if x <= self.xs[0] {
            return self.ys[0];
        }
        if x >= self.xs[n - 1] {
            return self.ys[n - 1];
        }
        // xs[hi - 1] < x < xs[hi], with 1 <= hi <= n - 1.
        let hi = self.xs.partition_point(|&v| v <= x);
        let (x0, x1) = (self.xs[hi - 1], self.xs[hi]);
        let (y0, y1) = (self.ys[hi - 1], self.ys[hi]);
        y0 + (y1 - y0) * (x - x0) / (x1 - x0)
    }
}
