//! Four-momenta and Milne space-time coordinates.
//!
//! [`FourVector`] is an `(E, px, py, pz)` four-momentum in natural units.
//! [`SpaceTime`] is a point `(τ, x, y, ηs)` in Milne coordinates, the
//! natural chart for a longitudinally boost-invariant medium.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

/// Smallest `|v|²` treated as a genuine boost.
const MIN_BOOST_V2: f64 = 1e-20;

/// Floor applied to logarithm arguments in rapidity-like observables.
const LOG_FLOOR: f64 = 1e-300;

// ── FourVector ─────────────────────────────────────────────────

/// A four-momentum `(E, px, py, pz)`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FourVector {
    /// Energy (time-like component).
    pub t: f64,
    /// x component.
    pub x: f64,
    /// y component.
    pub y: f64,
    /// z component (beam axis).
    pub z: f64,
}

impl FourVector {
    /// The zero vector.
    pub const ZERO: Self = Self {
        t: 0.0,
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    /// Construct from components.
    pub const fn new(t: f64, x: f64, y: f64, z: f64) -> Self {
        Self { t, x, y, z }
    }

    /// A particle of mass `mass` at rest.
    pub const fn at_rest(mass: f64) -> Self {
        Self::new(mass, 0.0, 0.0, 0.0)
    }

    /// On-shell four-momentum for a given mass and three-momentum.
    pub fn on_shell(mass: f64, px: f64, py: f64, pz: f64) -> Self {
        let e = (mass * mass + px * px + py * py + pz * pz).sqrt();
        Self::new(e, px, py, pz)
    }

    /// Transverse magnitude `sqrt(px² + py²)`.
    pub fn xt(&self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Magnitude of the spatial part.
    pub fn pabs(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Azimuthal angle in `(-π, π]`.
    pub fn phi(&self) -> f64 {
        self.y.atan2(self.x)
    }

    /// Pseudorapidity `½ ln((|p| + pz) / (|p| − pz))`.
    ///
    /// Returns 0 for a vector with no spatial momentum.
    pub fn pseudorapidity(&self) -> f64 {
        let pabs = self.pabs();
        if pabs == 0.0 {
            return 0.0;
        }
        0.5 * ((pabs + self.z).max(LOG_FLOOR) / (pabs - self.z).max(LOG_FLOOR)).ln()
    }

    /// Rapidity `½ ln((E + pz) / (E − pz))`.
    pub fn rapidity(&self) -> f64 {
        0.5 * ((self.t + self.z).max(LOG_FLOOR) / (self.t - self.z).max(LOG_FLOOR)).ln()
    }

    /// Minkowski square `E² − |p|²`.
    pub fn mass_squared(&self) -> f64 {
        self.t * self.t - self.x * self.x - self.y * self.y - self.z * self.z
    }

    /// Invariant mass, clamped to zero for space-like vectors.
    pub fn mass(&self) -> f64 {
        self.mass_squared().max(0.0).sqrt()
    }

    /// Express this vector in a frame moving with velocity `(vx, vy, vz)`.
    ///
    /// The velocity must satisfy `|v| < 1`. A vanishing velocity returns
    /// the vector unchanged.
    pub fn boost_to(&self, vx: f64, vy: f64, vz: f64) -> Self {
        let v2 = vx * vx + vy * vy + vz * vz;
        if v2 < MIN_BOOST_V2 {
            return *self;
        }
        debug_assert!(v2 < 1.0, "boost velocity must be sub-luminal, |v|² = {v2}");
        let gamma = 1.0 / (1.0 - v2).sqrt();
        let vdotp = vx * self.x + vy * self.y + vz * self.z;
        let coeff = (gamma - 1.0) * vdotp / v2 - gamma * self.t;
        Self {
            t: gamma * (self.t - vdotp),
            x: self.x + coeff * vx,
            y: self.y + coeff * vy,
            z: self.z + coeff * vz,
        }
    }

    /// Inverse of [`boost_to`](Self::boost_to) with the same velocity.
    pub fn boost_back(&self, vx: f64, vy: f64, vz: f64) -> Self {
        self.boost_to(-vx, -vy, -vz)
    }

    /// Component-wise comparison within an absolute tolerance.
    pub fn approx_eq(&self, other: &Self, tol: f64) -> bool {
        (self.t - other.t).abs() <= tol
            && (self.x - other.x).abs() <= tol
            && (self.y - other.y).abs() <= tol
            && (self.z - other.z).abs() <= tol
    }
}

impl Add for FourVector {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.t + rhs.t, self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl AddAssign for FourVector {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for FourVector {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.t - rhs.t, self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl SubAssign for FourVector {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Mul<f64> for FourVector {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self::new(self.t * rhs, self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Neg for FourVector {
    type Output = Self;

    fn neg(self) -> Self {
        self * -1.0
    }
}

impl Sum for FourVector {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a FourVector> for FourVector {
    fn sum<I: Iterator<Item = &'a FourVector>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl fmt::Display for FourVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {}, {})", self.t, self.x, self.y, self.z)
    }
}

// ── SpaceTime ──────────────────────────────────────────────────

/// A Milne coordinate `(τ, x, y, ηs)`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SpaceTime {
    /// Proper time.
    pub tau: f64,
    /// Transverse x.
    pub x: f64,
    /// Transverse y.
    pub y: f64,
    /// Spatial rapidity.
    pub etas: f64,
}

impl SpaceTime {
    /// Construct from components.
    pub const fn new(tau: f64, x: f64, y: f64, etas: f64) -> Self {
        Self { tau, x, y, etas }
    }

    /// Transverse distance from the beam axis.
    pub fn r(&self) -> f64 {
        self.x.hypot(self.y)
    }
}

impl fmt::Display for SpaceTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {}, {})", self.tau, self.x, self.y, self.etas)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn arithmetic_is_component_wise() {
        let a = FourVector::new(4.0, 1.0, 2.0, 3.0);
        let b = FourVector::new(1.0, 1.0, 1.0, 1.0);
        assert_eq!(a + b, FourVector::new(5.0, 2.0, 3.0, 4.0));
        assert_eq!(a - b, FourVector::new(3.0, 0.0, 1.0, 2.0));
        assert_eq!(a * 2.0, FourVector::new(8.0, 2.0, 4.0, 6.0));
        assert_eq!(-b, FourVector::new(-1.0, -1.0, -1.0, -1.0));
        let total: FourVector = [a, b, b].iter().sum();
        assert_eq!(total, FourVector::new(6.0, 3.0, 4.0, 5.0));
    }

    #[test]
    fn mass_of_on_shell_vector() {
        let p = FourVector::on_shell(1.3, 0.4, -2.0, 5.0);
        assert!((p.mass() - 1.3).abs() < 1e-12);
    }

    #[test]
    fn transverse_observables() {
        let p = FourVector::new(5.0, 3.0, 4.0, 0.0);
        assert!((p.xt() - 5.0).abs() < 1e-12);
        assert!((p.phi() - 4.0f64.atan2(3.0)).abs() < 1e-12);
        assert!(p.pseudorapidity().abs() < 1e-12);
    }

    #[test]
    fn pseudorapidity_sign_follows_pz() {
        let fwd = FourVector::on_shell(0.0, 1.0, 0.0, 2.0);
        let bwd = FourVector::on_shell(0.0, 1.0, 0.0, -2.0);
        assert!(fwd.pseudorapidity() > 0.0);
        assert!((fwd.pseudorapidity() + bwd.pseudorapidity()).abs() < 1e-12);
    }

    #[test]
    fn pseudorapidity_of_zero_momentum_is_zero() {
        assert_eq!(FourVector::at_rest(1.0).pseudorapidity(), 0.0);
    }

    #[test]
    fn longitudinal_boost_of_rest_particle() {
        // A particle at rest in the co-moving frame moves with -v there.
        let p = FourVector::at_rest(1.0);
        let v = 0.6;
        let moved = p.boost_to(0.0, 0.0, v);
        let gamma = 1.25;
        assert!((moved.t - gamma).abs() < 1e-12);
        assert!((moved.z + gamma * v).abs() < 1e-12);
        let lab = p.boost_back(0.0, 0.0, v);
        assert!((lab.z - gamma * v).abs() < 1e-12);
    }

    #[test]
    fn zero_velocity_boost_is_identity() {
        let p = FourVector::new(3.0, 1.0, 1.0, 1.0);
        assert_eq!(p.boost_to(0.0, 0.0, 0.0), p);
    }

    #[test]
    fn boost_back_with_tanh_etas_restores_rapidity() {
        // A massless parton at zero rapidity in the co-moving frame acquires
        // rapidity ηs after the inverse longitudinal boost.
        let etas: f64 = 1.2;
        let p = FourVector::new(10.0, 10.0, 0.0, 0.0);
        let lab = p.boost_back(0.0, 0.0, etas.tanh());
        assert!((lab.rapidity() - etas).abs() < 1e-9);
        assert!((lab.xt() - 10.0).abs() < 1e-9);
    }

    #[test]
    fn spacetime_radius() {
        let x = SpaceTime::new(0.6, 3.0, 4.0, 0.0);
        assert!((x.r() - 5.0).abs() < 1e-12);
    }

    proptest! {
        #[test]
        fn boost_round_trip_recovers_momentum(
            m in 0.0f64..5.0,
            px in -50.0f64..50.0,
            py in -50.0f64..50.0,
            pz in -50.0f64..50.0,
            vx in -0.5f64..0.5,
            vy in -0.5f64..0.5,
            vz in -0.6f64..0.6,
        ) {
            let p = FourVector::on_shell(m, px, py, pz);
            let back = p.boost_to(vx, vy, vz).boost_back(vx, vy, vz);
            prop_assert!(back.approx_eq(&p, 1e-8 * (1.0 + p.t)));
        }

        #[test]
        fn boost_preserves_invariant_mass(
            m in 0.1f64..5.0,
            px in -20.0f64..20.0,
            pz in -20.0f64..20.0,
            etas in -3.0f64..3.0,
        ) {
            let p = FourVector::on_shell(m, px, 0.0, pz);
            let boosted = p.boost_back(0.0, 0.0, etas.tanh());
            let rel = (boosted.mass_squared() - p.mass_squared()).abs() / (1.0 + p.t * p.t);
            prop_assert!(rel < 1e-9);
        }
    }
}
