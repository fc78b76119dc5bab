//! The [`Transport`] trait.
//!
//! A transport kernel is a stateless operator applied to one particle at a
//! time. It receives the particle as it enters the current medium snapshot
//! and emits zero or more outgoing particles:
//!
//! - one particle: the original, advanced to the end of the step;
//! - none: the particle was absorbed (thermalized) by the medium;
//! - several: the particle radiated or split.

use quench_core::Particle;
use smallvec::SmallVec;

use crate::context::UpdateContext;
use crate::error::TransportError;

/// Output buffer for one update. Inline capacity covers the common
/// advance and single-split outcomes without heap allocation.
pub type Outgoing = SmallVec<[Particle; 2]>;

/// A stochastic transport kernel.
///
/// # Contract
///
/// - `update()` must not lower the proper time of any outgoing particle
///   below the incoming particle's proper time.
/// - `&self`: kernels are stateless between calls; randomness comes only
///   from [`UpdateContext::rng`], so results are reproducible for a fixed
///   stream regardless of how events are scheduled across threads.
/// - `out` is empty on entry; the kernel pushes its outgoing particles.
///
/// # Examples
///
/// A kernel that advances the particle's clock and nothing else:
///
/// ```
/// use quench_core::Particle;
/// use quench_transport::{Outgoing, Transport, TransportError, UpdateContext};
///
/// struct Tick;
///
/// impl Transport for Tick {
///     fn name(&self) -> &str { "tick" }
///
///     fn update(
///         &self,
///         ctx: &mut UpdateContext<'_>,
///         particle: &Particle,
///         out: &mut Outgoing,
///     ) -> Result<(), TransportError> {
///         let mut next = particle.clone();
///         next.x.tau += ctx.dt();
///         out.push(next);
///         Ok(())
///     }
/// }
///
/// assert_eq!(Tick.name(), "tick");
/// ```
pub trait Transport: Send + Sync {
    /// Human-readable name for logs and error reports.
    fn name(&self) -> &str;

    /// Advance `particle` through one medium step.
    fn update(
        &self,
        ctx: &mut UpdateContext<'_>,
        particle: &Particle,
        out: &mut Outgoing,
    ) -> Result<(), TransportError>;
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn update(
        &self,
        ctx: &mut UpdateContext<'_>,
        particle: &Particle,
        out: &mut Outgoing,
    ) -> Result<(), TransportError> {
        (**self).update(ctx, particle, out)
    }
}
