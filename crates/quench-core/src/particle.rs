//! The [`Particle`] record and its transport scratch state.

use crate::vector::{FourVector, SpaceTime};

/// Evolution-only state owned by the driver and the transport kernel.
///
/// The local flow velocity is only meaningful while a particle is being
/// updated; the radiation history exists to let a kernel track pending
/// emissions across steps. Both are cleared by the frame transformer and
/// are not part of the final output.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TransportScratch {
    /// Local medium flow velocity sampled at the last update.
    pub flow: [f64; 3],
    /// Radiation history accumulated by the kernel.
    pub radiation: Vec<Particle>,
}

impl TransportScratch {
    /// Reset to the empty state, releasing the radiation buffer.
    pub fn clear(&mut self) {
        self.flow = [0.0; 3];
        self.radiation = Vec::new();
    }

    /// Whether the scratch holds no evolution state.
    pub fn is_empty(&self) -> bool {
        self.flow == [0.0; 3] && self.radiation.is_empty()
    }
}

/// One parton at a point in its history.
///
/// A passive record: the ensemble builder creates it, the transport kernel
/// produces advanced copies of it, and the writer reads it. Fields are
/// public so kernels can build outgoing particles directly.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    /// Species code (PDG numbering).
    pub pid: i32,
    /// Whether the species carries electric charge.
    pub charged: bool,
    /// Current hard scale.
    pub q0: f64,
    /// Hard scale at creation; never modified.
    pub q00: f64,
    /// Four-momentum in the co-moving frame during evolution, in the lab
    /// frame after the frame transformer runs.
    pub p: FourVector,
    /// Current space-time position.
    pub x: SpaceTime,
    /// Production vertex.
    pub x0: SpaceTime,
    /// Earliest proper time at which the particle may enter the medium.
    pub tau0: f64,
    /// Freeze-out temperature marker. The driver freezes the particle once
    /// this drops below the configured transport stopping temperature.
    pub tf: f64,
    /// Rest mass.
    pub mass: f64,
    /// Colour tag, opaque to the driver.
    pub col: i32,
    /// Anticolour tag, opaque to the driver.
    pub acol: i32,
    /// Whether the particle is still off-shell from its production.
    pub is_virtual: bool,
    /// Medium temperature at production.
    pub t0: f64,
    /// Mean free path at production.
    pub mfp0: f64,
    /// Statistical weight, stamped by the writer.
    pub weight: f64,
    /// Evolution scratch state.
    pub scratch: TransportScratch,
}

impl Particle {
    /// Create a particle at `x` with momentum `p`.
    ///
    /// The mass is taken from `p`, the production vertex is set to `x`, and
    /// every bookkeeping field starts at zero.
    pub fn new(pid: i32, p: FourVector, x: SpaceTime) -> Self {
        Self {
            pid,
            charged: false,
            q0: 0.0,
            q00: 0.0,
            p,
            x,
            x0: x,
            tau0: 0.0,
            tf: 0.0,
            mass: p.mass(),
            col: 0,
            acol: 0,
            is_virtual: false,
            t0: 0.0,
            mfp0: 0.0,
            weight: 0.0,
            scratch: TransportScratch::default(),
        }
    }

    /// Set the charge flag.
    pub fn with_charge(mut self, charged: bool) -> Self {
        self.charged = charged;
        self
    }

    /// Set both the current and reference hard scale.
    pub fn with_scale(mut self, q0: f64) -> Self {
        self.q0 = q0;
        self.q00 = q0;
        self
    }

    /// Override the rest mass.
    pub fn with_mass(mut self, mass: f64) -> Self {
        self.mass = mass;
        self
    }

    /// Set the colour / anticolour tags.
    pub fn with_colors(mut self, col: i32, acol: i32) -> Self {
        self.col = col;
        self.acol = acol;
        self
    }

    /// Set the earliest proper time for entering the medium.
    pub fn with_formation_time(mut self, tau0: f64) -> Self {
        self.tau0 = tau0;
        self
    }

    /// Three-velocity `p / E`.
    ///
    /// Returns zero for a particle with no energy.
    pub fn velocity(&self) -> [f64; 3] {
        if self.p.t <= 0.0 {
            return [0.0; 3];
        }
        [self.p.x / self.p.t, self.p.y / self.p.t, self.p.z / self.p.t]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_copies_position_into_vertex() {
        let x = SpaceTime::new(0.0, 1.0, -2.0, 0.5);
        let p = Particle::new(21, FourVector::on_shell(0.0, 3.0, 0.0, 0.0), x);
        assert_eq!(p.x0, x);
        assert_eq!(p.mass, 0.0);
        assert!(p.scratch.is_empty());
    }

    #[test]
    fn builders_set_fields() {
        let p = Particle::new(4, FourVector::at_rest(1.3), SpaceTime::default())
            .with_charge(true)
            .with_scale(1.0)
            .with_colors(101, 0)
            .with_formation_time(0.2);
        assert!(p.charged);
        assert_eq!((p.q0, p.q00), (1.0, 1.0));
        assert_eq!((p.col, p.acol), (101, 0));
        assert_eq!(p.tau0, 0.2);
        assert!((p.mass - 1.3).abs() < 1e-12);
    }

    #[test]
    fn velocity_of_rest_and_moving() {
        let rest = Particle::new(4, FourVector::at_rest(1.3), SpaceTime::default());
        assert_eq!(rest.velocity(), [0.0; 3]);
        let moving = Particle::new(
            21,
            FourVector::new(2.0, 1.0, 0.0, 1.0),
            SpaceTime::default(),
        );
        assert_eq!(moving.velocity(), [0.5, 0.0, 0.5]);
    }

    #[test]
    fn scratch_clear_releases_history() {
        let mut p = Particle::new(21, FourVector::at_rest(0.0), SpaceTime::default());
        p.scratch.flow = [0.1, 0.2, 0.3];
        p.scratch.radiation.push(p.clone());
        assert!(!p.scratch.is_empty());
        p.scratch.clear();
        assert!(p.scratch.is_empty());
        assert_eq!(p.scratch.radiation.capacity(), 0);
    }
}
