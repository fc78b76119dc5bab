//! Update context passed to transport kernels.
//!
//! [`UpdateContext`] bundles everything a kernel needs for one particle
//! update: the time step to the end of the current snapshot, the medium
//! state at the particle's position, the run's transport parameters, and
//! the owning event's random stream.

use quench_core::MediumSample;
use rand::RngCore;

use crate::params::TransportParams;

/// Context passed to each [`Transport::update`](crate::Transport::update).
///
/// The random stream is borrowed as `&mut dyn RngCore` so the trait stays
/// object-safe and tests can inject any generator.
pub struct UpdateContext<'a> {
    dt: f64,
    sample: MediumSample,
    params: &'a TransportParams,
    rng: &'a mut dyn RngCore,
}

impl<'a> UpdateContext<'a> {
    /// Construct a context.
    ///
    /// Typically called by the evolution driver, not by kernels directly.
    pub fn new(
        dt: f64,
        sample: MediumSample,
        params: &'a TransportParams,
        rng: &'a mut dyn RngCore,
    ) -> Self {
        Self {
            dt,
            sample,
            params,
            rng,
        }
    }

    /// Time step in GeV⁻¹, from the particle's proper time to the end of
    /// the current snapshot. Never negative.
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Medium temperature at the particle's position, in GeV.
    pub fn temperature(&self) -> f64 {
        self.sample.temperature
    }

    /// Medium flow velocity at the particle's position.
    pub fn flow(&self) -> [f64; 3] {
        self.sample.flow
    }

    /// The full medium sample.
    pub fn sample(&self) -> MediumSample {
        self.sample
    }

    /// Run-wide transport parameters.
    pub fn params(&self) -> &TransportParams {
        self.params
    }

    /// The owning event's random stream.
    pub fn rng(&mut self) -> &mut dyn RngCore {
        self.rng
    }
}
