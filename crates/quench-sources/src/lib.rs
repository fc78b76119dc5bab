//! Reference collaborators for the quench driver.
//!
//! Analytic stand-ins for the external physics codes the driver consumes:
//!
//! - [`BjorkenMedium`]: a boost-invariant cooling medium implementing
//!   [`Medium`](quench_core::Medium).
//! - [`PowerLawGenerator`]: back-to-back parton pairs from a power-law
//!   spectrum, implementing [`HardGenerator`](quench_core::HardGenerator).
//! - [`HeavyQuarkSource`]: a static ensemble of heavy quarks at rest.
//!
//! Times are in GeV⁻¹ throughout; multiply fm/c by
//! [`GEV_INV_PER_FM`](quench_core::GEV_INV_PER_FM) to convert.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod bjorken;
pub mod heavy_quark;
pub mod power_law;

pub use bjorken::BjorkenMedium;
pub use heavy_quark::HeavyQuarkSource;
pub use power_law::PowerLawGenerator;

use rand::Rng;

/// Uniform point in a disc of radius `radius` centred on the origin.
pub(crate) fn sample_disc<R: Rng + ?Sized>(rng: &mut R, radius: f64) -> (f64, f64) {
    if radius <= 0.0 {
        return (0.0, 0.0);
    }
    let r = radius * rng.random::<f64>().sqrt();
    let phi = rng.random_range(0.0..std::f64::consts::TAU);
    (r * phi.cos(), r * phi.sin())
}
