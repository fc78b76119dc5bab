//! Error types shared across the quench workspace.
//!
//! Organized by collaborator: trigger-bin construction, the medium
//! snapshot source, and hard-process generator setup. Per-draw generator
//! failures are not errors; they are reported as `None` by
//! [`HardGenerator::generate`](crate::HardGenerator::generate).

use thiserror::Error;

/// Errors from [`TriggerBins::new`](crate::TriggerBins::new).
#[derive(Clone, Debug, PartialEq, Error)]
pub enum BinError {
    /// At least two edges are needed to form one bin.
    #[error("trigger table needs at least 2 edges, got {count}")]
    TooFewEdges {
        /// Number of edges supplied.
        count: usize,
    },
    /// An edge is NaN or infinite.
    #[error("trigger edge {index} is not finite")]
    NonFinite {
        /// Position of the offending edge.
        index: usize,
    },
    /// An edge is below its predecessor.
    #[error("trigger edges descend at {index}: {lo} > {hi}")]
    NotAscending {
        /// Position of the lower edge of the bad pair.
        index: usize,
        /// The lower edge value.
        lo: f64,
        /// The upper edge value.
        hi: f64,
    },
}

/// Errors from a [`Medium`](crate::Medium) snapshot source.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum MediumError {
    /// `advance_to_next_snapshot` was called with no snapshot left.
    #[error("medium history exhausted")]
    Exhausted,
    /// The next snapshot could not be loaded.
    #[error("failed to load medium snapshot: {reason}")]
    LoadFailed {
        /// Human-readable description of the failure.
        reason: String,
    },
    /// The medium was constructed with an unusable configuration.
    #[error("invalid medium configuration: {reason}")]
    Invalid {
        /// Human-readable description of the problem.
        reason: String,
    },
}

/// Errors raised while instantiating a generator for one trigger window.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum GeneratorError {
    /// The generator rejected its configuration.
    #[error("generator setup failed: {reason}")]
    Setup {
        /// Human-readable description of the failure.
        reason: String,
    },
}
