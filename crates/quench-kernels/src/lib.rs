//! Reference transport kernels.
//!
//! Two small [`Transport`](quench_transport::Transport) implementations
//! that let the driver run end to end without an external scattering
//! code. Neither makes a claim of physical accuracy.
//!
//! - [`FreeStreaming`]: straight-line advance, no interaction.
//! - [`ThermalDrag`]: temperature-dependent drag from a
//!   [`CoefficientTable`](quench_transport::CoefficientTable), absorption
//!   of soft light partons, and random soft splitting.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod free_streaming;
pub mod thermal_drag;

pub use free_streaming::FreeStreaming;
pub use thermal_drag::{ThermalDrag, ThermalDragBuilder};

use quench_core::Particle;
use quench_transport::TransportError;

/// Copy of `particle` moved along its velocity for `dt`, in the
/// transverse plane. Spatial rapidity is unchanged.
pub(crate) fn drift(particle: &Particle, dt: f64) -> Particle {
    let [vx, vy, _] = particle.velocity();
    let mut next = particle.clone();
    next.x.tau += dt;
    next.x.x += vx * dt;
    next.x.y += vy * dt;
    next
}

pub(crate) fn check_finite(particle: &Particle, dt: f64) -> Result<(), TransportError> {
    let p = particle.p;
    if !(p.t.is_finite() && p.x.is_finite() && p.y.is_finite() && p.z.is_finite()) {
        return Err(TransportError::NonFinite { what: "momentum" });
    }
    if !dt.is_finite() {
        return Err(TransportError::NonFinite { what: "time step" });
    }
    Ok(())
}
