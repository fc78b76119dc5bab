//! Static heavy-quark ensembles for diffusion studies.

use quench_core::{Ensemble, Event, FourVector, GeneratorError, Particle, SpaceTime};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::sample_disc;

/// Species code of the charm quark.
pub const CHARM: i32 = 4;

/// Charm quark mass in GeV.
pub const CHARM_MASS: f64 = 1.3;

/// Builds one event of heavy quarks at rest, spread uniformly over a
/// transverse disc at the medium's start time.
///
/// The event carries unit weight and unit hard scale; there is no hard
/// process to normalize against.
#[derive(Clone, Debug)]
pub struct HeavyQuarkSource {
    count: usize,
    radius: f64,
}

impl HeavyQuarkSource {
    /// `count` charm quarks inside a disc of `radius` (GeV⁻¹).
    ///
    /// # Errors
    ///
    /// [`GeneratorError::Setup`] if `radius` is negative or not finite.
    pub fn new(count: usize, radius: f64) -> Result<Self, GeneratorError> {
        if !(radius.is_finite() && radius >= 0.0) {
            return Err(GeneratorError::Setup {
                reason: format!("radius must be finite and >= 0, got {radius}"),
            });
        }
        Ok(Self { count, radius })
    }

    /// Number of quarks per ensemble.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Build the ensemble at proper time `tau_init`.
    ///
    /// Every quark's freeze-out marker is stamped just above the stopping
    /// temperature `tf`, matching what the ensemble builder does for
    /// generated events.
    pub fn ensemble(&self, tau_init: f64, tf: f64, seed: u64) -> Ensemble {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let plist = (0..self.count)
            .map(|_| {
                let (x, y) = sample_disc(&mut rng, self.radius);
                let mut q = Particle::new(
                    CHARM,
                    FourVector::at_rest(CHARM_MASS),
                    SpaceTime::new(tau_init, x, y, 0.0),
                )
                .with_charge(true)
                .with_scale(1.0)
                .with_formation_time(tau_init);
                q.tf = tf + 0.001;
                q
            })
            .collect();
        Ensemble::new(vec![Event::new(plist, 1.0, 1.0, 0.0, FourVector::ZERO)])
    }
}
