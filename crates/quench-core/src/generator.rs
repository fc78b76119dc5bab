//! The hard-process generator consumed by the ensemble builder.

use crate::particle::Particle;
use crate::trigger::TriggerWindow;
use crate::vector::FourVector;

/// Samples hard-process particle lists inside a trigger window.
///
/// A generator is instantiated once per trigger bin and asked for draws
/// until the requested count is reached. The accessors describe the most
/// recent successful draw.
///
/// # Examples
///
/// ```
/// use quench_core::{FourVector, HardGenerator, Particle, SpaceTime, TriggerWindow};
///
/// struct Single;
///
/// impl HardGenerator for Single {
///     fn generate(&mut self, window: TriggerWindow, _seed: u64, scale: f64)
///         -> Option<Vec<Particle>>
///     {
///         let pt = window.lo;
///         let p = FourVector::on_shell(0.0, pt, 0.0, 0.0);
///         Some(vec![Particle::new(21, p, SpaceTime::default()).with_scale(scale)])
///     }
///     fn sigma_gen(&self) -> f64 { 1.0 }
///     fn max_pt(&self) -> f64 { 0.0 }
///     fn production_vertex(&self) -> FourVector { FourVector::ZERO }
/// }
///
/// let mut g = Single;
/// let plist = g.generate(TriggerWindow::new(10.0, 20.0), 1, 0.4).unwrap();
/// assert_eq!(plist[0].p.xt(), 10.0);
/// ```
pub trait HardGenerator {
    /// Draw one hard process in `window`.
    ///
    /// Returns `None` if the draw did not produce a usable event. The
    /// caller discards such draws; they are not errors.
    fn generate(&mut self, window: TriggerWindow, seed: u64, scale: f64) -> Option<Vec<Particle>>;

    /// Cross-section estimate for the window, before normalization.
    fn sigma_gen(&self) -> f64;

    /// Largest transverse momentum in the last draw.
    fn max_pt(&self) -> f64;

    /// Production vertex of the last draw.
    fn production_vertex(&self) -> FourVector;
}
