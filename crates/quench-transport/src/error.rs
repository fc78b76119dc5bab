//! Error types for transport kernels, their parameters, and their tables.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors from [`Transport::update`](crate::Transport::update).
///
/// The driver treats every transport error as fatal for the run.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum TransportError {
    /// The kernel could not complete the update.
    #[error("transport update failed: {reason}")]
    ExecutionFailed {
        /// Human-readable description of the failure.
        reason: String,
    },
    /// The kernel produced or received a non-finite quantity.
    #[error("non-finite {what} in transport update")]
    NonFinite {
        /// Which quantity was non-finite.
        what: &'static str,
    },
}

/// Errors from [`TransportParams::validate`](crate::TransportParams::validate).
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ParamError {
    /// A parameter that must be finite and positive is not.
    #[error("transport parameter '{name}' must be finite and positive, got {value}")]
    NotPositive {
        /// Parameter name.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// A fixed coupling outside `(0, 1]`.
    #[error("fixed coupling must be in (0, 1], got {value}")]
    InvalidCoupling {
        /// The rejected value.
        value: f64,
    },
}

/// Errors from loading a [`CoefficientTable`](crate::CoefficientTable).
#[derive(Debug, Error)]
pub enum TableError {
    /// The table file could not be read.
    #[error("cannot read table {path:?}: {source}")]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// A line did not contain two numbers.
    #[error("malformed table line {line}: {content:?}")]
    Parse {
        /// 1-based line number.
        line: usize,
        /// The offending line.
        content: String,
    },
    /// The table has no data rows.
    #[error("table has no data rows")]
    Empty,
    /// A point has a NaN or infinite coordinate.
    #[error("table row {row} is not finite")]
    NonFinite {
        /// 0-based data row index.
        row: usize,
    },
    /// Abscissae must be strictly ascending.
    #[error("table abscissa not ascending at row {row}")]
    NotAscending {
        /// 0-based data row index.
        row: usize,
    },
}
