//! Ensemble construction and the time-stepped evolution driver.
//!
//! The pipeline, in order:
//!
//! 1. [`build_ensemble`] draws hard events bin by bin from a
//!    [`HardGenerator`](quench_core::HardGenerator), then [`free_stream`]
//!    projects them to the medium's start time.
//! 2. [`EvolutionDriver`] walks the medium's snapshots, advancing every
//!    eligible particle through a [`Transport`](quench_transport::Transport)
//!    kernel and recording energy-loss currents.
//! 3. [`boost_to_lab`] clears evolution scratch state and returns momenta
//!    to the lab frame.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod builder;
pub mod config;
pub mod driver;
pub mod frame;
pub mod metrics;

pub use builder::{build_ensemble, free_stream, BinReport, BuildError, BuildReport};
pub use config::{BuilderConfig, ConfigError, EvolutionConfig};
pub use driver::{EvolutionDriver, EvolutionError, ParticleState};
pub use frame::{boost_to_lab, to_lab};
pub use metrics::{EvolutionReport, PassMetrics};
