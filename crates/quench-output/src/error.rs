//! Error types for output.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors from writing output files.
#[derive(Debug, Error)]
pub enum OutputError {
    /// An output file could not be created.
    #[error("cannot create {path:?}: {source}")]
    Create {
        /// The path that could not be created.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// Writing to the sink failed.
    #[error("write failed: {0}")]
    Io(#[from] io::Error),
    /// An unrecognized format name.
    #[error("unknown output format '{name}' (expected 'compact' or 'extended')")]
    UnknownFormat {
        /// The rejected name.
        name: String,
    },
}
