//! Quench: time-stepped transport of hard partons through an evolving
//! heavy-ion medium.
//!
//! This is the facade crate that re-exports the public API of the quench
//! sub-crates, and ships the `quench` command-line driver.
//!
//! # Quick start
//!
//! ```rust
//! use quench::prelude::*;
//!
//! let bins = TriggerBins::new(vec![10.0, 20.0]).unwrap();
//! let config = BuilderConfig { events_per_bin: 4, ..BuilderConfig::default() };
//! let (mut ensemble, _) =
//!     build_ensemble(&bins, &config, |_| PowerLawGenerator::new(2.0, 6.0)).unwrap();
//!
//! let medium = BjorkenMedium::new(0.4, 3.0, 1.0, 10.0).unwrap();
//! free_stream(&mut ensemble, medium.initial_time());
//!
//! let mut driver = EvolutionDriver::new(
//!     medium,
//!     FreeStreaming,
//!     TransportParams::default(),
//!     EvolutionConfig::default(),
//!     ensemble,
//! )
//! .unwrap();
//! let report = driver.evolve().unwrap();
//! assert_eq!(report.pass_count(), 7);
//!
//! let mut ensemble = driver.into_ensemble();
//! boost_to_lab(&mut ensemble);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `quench-core` | Particles, events, trigger bins, medium and generator traits |
//! | [`transport`] | `quench-transport` | Transport trait, update context, parameters, coefficient tables |
//! | [`kernels`] | `quench-kernels` | Reference kernels (free streaming, thermal drag) |
//! | [`sources`] | `quench-sources` | Reference media and hard-event sources |
//! | [`engine`] | `quench-engine` | Ensemble builder and evolution driver |
//! | [`output`] | `quench-output` | Particle and current file writers |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core data model (`quench-core`).
///
/// Four-vectors, particles, events, trigger bins, and the
/// [`types::Medium`] and [`types::HardGenerator`] traits.
pub use quench_core as types;

/// Transport kernel interface (`quench-transport`).
///
/// The [`transport::Transport`] trait is the extension point for
/// user-defined kernels.
pub use quench_transport as transport;

/// Reference kernels (`quench-kernels`).
pub use quench_kernels as kernels;

/// Reference media and hard-event sources (`quench-sources`).
///
/// [`sources::BjorkenMedium`], [`sources::PowerLawGenerator`], and
/// [`sources::HeavyQuarkSource`].
pub use quench_sources as sources;

/// Ensemble construction and evolution (`quench-engine`).
pub use quench_engine as engine;

/// Run files (`quench-output`).
pub use quench_output as output;

/// Common imports for typical quench usage.
///
/// ```rust
/// use quench::prelude::*;
/// ```
pub mod prelude {
    // Core types and traits
    pub use quench_core::{
        Current, Ensemble, Event, FourVector, HardGenerator, Medium, MediumSample, Particle,
        SpaceTime, TriggerBins, TriggerWindow, GEV_INV_PER_FM,
    };

    // Errors
    pub use quench_core::{BinError, GeneratorError, MediumError};
    pub use quench_transport::{ParamError, TableError, TransportError};

    // Transport
    pub use quench_transport::{
        CoefficientTable, Coupling, Outgoing, Transport, TransportParams, UpdateContext,
    };

    // Kernels and sources
    pub use quench_kernels::{FreeStreaming, ThermalDrag};
    pub use quench_sources::{BjorkenMedium, HeavyQuarkSource, PowerLawGenerator};

    // Engine
    pub use quench_engine::{
        boost_to_lab, build_ensemble, free_stream, BuildError, BuilderConfig, EvolutionConfig,
        EvolutionDriver, EvolutionError, EvolutionReport, PassMetrics,
    };

    // Output
    pub use quench_output::{write_run, OutputError, OutputFormat};
}
