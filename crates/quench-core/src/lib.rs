//! Core types and traits for the quench transport driver.
//!
//! This is the leaf crate with no internal dependencies. It defines the
//! passive data model every other crate operates on (four-vectors,
//! particles, events, loss currents), the trigger-bin tables used to
//! partition hard-process generation, and the traits through which the
//! driver consumes its external collaborators: the [`Medium`] snapshot
//! source and the [`HardGenerator`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod event;
pub mod generator;
pub mod medium;
pub mod particle;
pub mod trigger;
pub mod vector;

pub use error::{BinError, GeneratorError, MediumError};
pub use event::{Current, Ensemble, Event};
pub use generator::HardGenerator;
pub use medium::{Medium, MediumSample, SnapshotWindow};
pub use particle::{Particle, TransportScratch};
pub use trigger::{TriggerBins, TriggerWindow};
pub use vector::{FourVector, SpaceTime};

/// Conversion factor between natural units and fm/c (`1 fm/c = 5.076 GeV⁻¹`).
pub const GEV_INV_PER_FM: f64 = 5.076;
