//! Power-law hard-process generator.

use quench_core::{FourVector, GeneratorError, HardGenerator, Particle, SpaceTime, TriggerWindow};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::sample_disc;

const GLUON: i32 = 21;

/// Samples back-to-back gluon pairs with `dσ/dpT² ∝ (1 + pT²/p0²)^(-n)`.
///
/// Each draw places two gluons at the same transverse vertex, opposite in
/// azimuth, with independent rapidities uniform in `[-y_max, y_max]`.
/// Space-time rapidity equals momentum rapidity, and the stored momentum
/// is in the co-moving frame at that rapidity, as the evolution driver
/// expects.
///
/// The cross section reported by [`sigma_gen`](HardGenerator::sigma_gen)
/// is the analytic integral of the spectrum over the last requested
/// window, times the normalization.
#[derive(Clone, Debug)]
pub struct PowerLawGenerator {
    p0: f64,
    n: f64,
    y_max: f64,
    norm: f64,
    vertex_radius: f64,
    sigma: f64,
    max_pt: f64,
    vertex: FourVector,
}

impl PowerLawGenerator {
    /// Create a generator with scale `p0` (GeV) and exponent `n`.
    ///
    /// Defaults: rapidity range ±1, normalization 1, vertex at the origin.
    ///
    /// # Errors
    ///
    /// [`GeneratorError::Setup`] if `p0` is not positive or `n <= 1`.
    pub fn new(p0: f64, n: f64) -> Result<Self, GeneratorError> {
        if !(p0.is_finite() && p0 > 0.0) {
            return Err(GeneratorError::Setup {
                reason: format!("p0 must be finite and positive, got {p0}"),
            });
        }
        if !(n.is_finite() && n > 1.0) {
            return Err(GeneratorError::Setup {
                reason: format!("exponent must be finite and > 1, got {n}"),
            });
        }
        Ok(Self {
            p0,
            n,
            y_max: 1.0,
            norm: 1.0,
            vertex_radius: 0.0,
            sigma: 0.0,
            max_pt: 0.0,
            vertex: FourVector::ZERO,
        })
    }

    /// Set the half-width of the rapidity range.
    pub fn with_rapidity_range(mut self, y_max: f64) -> Self {
        self.y_max = y_max.abs();
        self
    }

    /// Set the cross-section normalization.
    pub fn with_norm(mut self, norm: f64) -> Self {
        self.norm = norm;
        self
    }

    /// Sample production vertices uniformly in a transverse disc.
    pub fn with_vertex_radius(mut self, radius: f64) -> Self {
        self.vertex_radius = radius.max(0.0);
        self
    }

    /// Antiderivative shape `(1 + u/p0²)^(1-n)`, decreasing in `u = pT²`.
    fn shape(&self, u: f64) -> f64 {
        (1.0 + u / (self.p0 * self.p0)).powf(1.0 - self.n)
    }

    /// Analytic cross section for `window`.
    pub fn cross_section(&self, window: TriggerWindow) -> f64 {
        if window.is_empty() {
            return 0.0;
        }
        let lo = window.lo.max(0.0);
        let a = self.p0 * self.p0;
        self.norm * a / (self.n - 1.0) * (self.shape(lo * lo) - self.shape(window.hi * window.hi))
    }

    fn sample_pt(&self, rng: &mut ChaCha8Rng, window: TriggerWindow) -> f64 {
        let lo = window.lo.max(0.0);
        let g_lo = self.shape(lo * lo);
        let g_hi = self.shape(window.hi * window.hi);
        let s = g_lo + (g_hi - g_lo) * rng.random::<f64>();
        let u = self.p0 * self.p0 * (s.powf(1.0 / (1.0 - self.n)) - 1.0);
        u.max(0.0).sqrt().clamp(lo, window.hi)
    }

    fn parton(&self, pt: f64, phi: f64, y: f64, vertex: (f64, f64), colors: (i32, i32)) -> Particle {
        let lab = FourVector::new(pt * y.cosh(), pt * phi.cos(), pt * phi.sin(), pt * y.sinh());
        let comoving = lab.boost_to(0.0, 0.0, y.tanh());
        Particle::new(GLUON, comoving, SpaceTime::new(0.0, vertex.0, vertex.1, y))
            .with_mass(0.0)
            .with_colors(colors.0, colors.1)
    }
}

impl HardGenerator for PowerLawGenerator {
    fn generate(&mut self, window: TriggerWindow, seed: u64, scale: f64) -> Option<Vec<Particle>> {
        self.sigma = self.cross_section(window);
        if window.is_empty() || window.hi <= 0.0 {
            return None;
        }
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        let pt = self.sample_pt(&mut rng, window);
        if !(pt.is_finite() && window.contains(pt)) {
            return None;
        }
        let phi = rng.random_range(0.0..std::f64::consts::TAU);
        let (y1, y2) = if self.y_max > 0.0 {
            (
                rng.random_range(-self.y_max..=self.y_max),
                rng.random_range(-self.y_max..=self.y_max),
            )
        } else {
            (0.0, 0.0)
        };
        let vertex = sample_disc(&mut rng, self.vertex_radius);

        self.max_pt = pt;
        self.vertex = FourVector::new(0.0, vertex.0, vertex.1, 0.0);
        let first = self.parton(pt, phi, y1, vertex, (101, 102)).with_scale(scale);
        let second = self
            .parton(pt, phi + std::f64::consts::PI, y2, vertex, (102, 101))
            .with_scale(scale);
        Some(vec![first, second])
    }

    fn sigma_gen(&self) -> f64 {
        self.sigma
    }

    fn max_pt(&self) -> f64 {
        self.max_pt
    }

    fn production_vertex(&self) -> FourVector {
        self.vertex
    }
}
