//! Return to the lab frame after evolution.

use quench_core::{Ensemble, Particle};

/// Clear `particle`'s evolution scratch and boost its momentum from the
/// co-moving frame at its spatial rapidity back to the lab.
pub fn to_lab(particle: &mut Particle) {
    particle.scratch.clear();
    particle.p = particle.p.boost_back(0.0, 0.0, particle.x.etas.tanh());
}

/// Apply [`to_lab`] to every particle of every event.
pub fn boost_to_lab(ensemble: &mut Ensemble) {
    for particle in ensemble.events.iter_mut().flat_map(|e| e.plist.iter_mut()) {
        to_lab(particle);
    }
}
