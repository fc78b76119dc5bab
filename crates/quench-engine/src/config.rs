//! Builder and driver configuration, validation, and error types.
//!
//! Both config structs are plain data with defaults matching the
//! reference run settings. [`validate()`](EvolutionConfig::validate)
//! checks every invariant before any event is processed.

use quench_transport::ParamError;
use thiserror::Error;

/// Default `|ηs|` beyond which particles are frozen.
pub const DEFAULT_ETAS_CUTOFF: f64 = 6.0;

/// Default transport stopping temperature, GeV.
pub const DEFAULT_TF: f64 = 0.17;

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected before any event processing.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    /// The rapidity cutoff is NaN, infinite, zero, or negative.
    #[error("etas_cutoff must be finite and positive, got {value}")]
    InvalidEtasCutoff {
        /// The invalid value.
        value: f64,
    },
    /// The stopping temperature is NaN, infinite, zero, or negative.
    #[error("stopping temperature must be finite and positive, got {value}")]
    InvalidTemperature {
        /// The invalid value.
        value: f64,
    },
    /// The hard scale is NaN, infinite, zero, or negative.
    #[error("hard scale q0 must be finite and positive, got {value}")]
    InvalidScale {
        /// The invalid value.
        value: f64,
    },
    /// Transport parameters failed validation.
    #[error("transport parameters: {0}")]
    Params(#[from] ParamError),
}

fn positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

// ── EvolutionConfig ────────────────────────────────────────────────

/// Configuration for [`EvolutionDriver`](crate::EvolutionDriver).
#[derive(Clone, Debug, PartialEq)]
pub struct EvolutionConfig {
    /// Particles with `|ηs|` above this are frozen. Default: 6.0.
    pub etas_cutoff: f64,
    /// Particles whose freeze-out marker drops below this are frozen.
    /// Default: 0.17 GeV.
    pub tf: f64,
    /// Record a loss current for every kernel update. Default: false.
    pub record_currents: bool,
    /// Seed for the per-event random streams. Default: 0.
    pub seed: u64,
    /// Process events on the rayon pool. Default: false.
    pub parallel: bool,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            etas_cutoff: DEFAULT_ETAS_CUTOFF,
            tf: DEFAULT_TF,
            record_currents: false,
            seed: 0,
            parallel: false,
        }
    }
}

impl EvolutionConfig {
    /// Validate all invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        // 1. The rapidity cut must admit some particles.
        if !positive(self.etas_cutoff) {
            return Err(ConfigError::InvalidEtasCutoff {
                value: self.etas_cutoff,
            });
        }
        // 2. The stopping temperature must be physical.
        if !positive(self.tf) {
            return Err(ConfigError::InvalidTemperature { value: self.tf });
        }
        Ok(())
    }
}

// ── BuilderConfig ──────────────────────────────────────────────────

/// Configuration for [`build_ensemble`](crate::build_ensemble).
#[derive(Clone, Debug, PartialEq)]
pub struct BuilderConfig {
    /// Draws requested per trigger bin; also the cross-section
    /// denominator. Default: 100.
    pub events_per_bin: usize,
    /// Hard scale handed to the generator. Default: 0.4 GeV.
    pub q0: f64,
    /// Stopping temperature; every accepted particle is stamped just
    /// above it.
    /// Default: 0.17 GeV.
    pub tf: f64,
    /// Base seed for generator draws. Default: 0.
    pub seed: u64,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            events_per_bin: 100,
            q0: 0.4,
            tf: DEFAULT_TF,
            seed: 0,
        }
    }
}

impl BuilderConfig {
    /// Validate all invariants. Zero draws per bin is allowed and
    /// produces an empty ensemble.
    pub fn validate(&self) -> Result<(), ConfigError> {
        // 1. Hard scale.
        if !positive(self.q0) {
            return Err(ConfigError::InvalidScale { value: self.q0 });
        }
        // 2. Stopping temperature.
        if !positive(self.tf) {
            return Err(ConfigError::InvalidTemperature { value: self.tf });
        }
        Ok(())
    }
}
