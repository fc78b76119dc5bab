//! Reusable transport kernels and particle fixtures.
//!
//! - [`AdvanceTransport`]: moves the particle to the end of the step.
//! - [`SplitTransport`]: advances, then splits into two equal halves.
//! - [`AbsorbTransport`]: emits nothing.
//! - [`CoolingTransport`]: advances and stamps the local temperature.
//! - [`KickTransport`]: advances with a random momentum kick.
//! - [`RewindTransport`]: moves the particle back in proper time.
//! - [`FailingTransport`]: fails deterministically after N calls.
//!
//! Every fixture counts its calls with an `AtomicUsize` so it stays
//! `Sync` for parallel driver runs.

use std::sync::atomic::{AtomicUsize, Ordering};

use quench_core::{Ensemble, Event, FourVector, Particle, SpaceTime};
use quench_transport::{Outgoing, Transport, TransportError, UpdateContext};
use rand::Rng;

/// A massless gluon with energy `e` along x at `(tau, 0, 0, etas)`,
/// stamped just above the default stopping temperature.
pub fn parton(e: f64, tau: f64, etas: f64) -> Particle {
    let mut p = Particle::new(
        21,
        FourVector::new(e, e, 0.0, 0.0),
        SpaceTime::new(tau, 0.0, 0.0, etas),
    )
    .with_scale(0.4);
    p.tf = 0.171;
    p
}

/// A single-event ensemble.
pub fn single_event(plist: Vec<Particle>, sigma: f64) -> Ensemble {
    Ensemble::new(vec![Event::new(plist, sigma, 0.4, 0.0, FourVector::ZERO)])
}

fn advanced(ctx: &UpdateContext<'_>, particle: &Particle) -> Particle {
    let mut next = particle.clone();
    next.x.tau += ctx.dt();
    next
}

macro_rules! counted {
    ($ty:ident) => {
        impl $ty {
            /// How many times `update()` has been called.
            pub fn calls(&self) -> usize {
                self.calls.load(Ordering::Relaxed)
            }
        }
    };
}

#[derive(Default)]
pub struct AdvanceTransport {
    calls: AtomicUsize,
}
counted!(AdvanceTransport);

impl Transport for AdvanceTransport {
    fn name(&self) -> &str {
        "advance"
    }

    fn update(
        &self,
        ctx: &mut UpdateContext<'_>,
        particle: &Particle,
        out: &mut Outgoing,
    ) -> Result<(), TransportError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        out.push(advanced(ctx, particle));
        Ok(())
    }
}

/// Splits the advanced particle into two halves sharing its momentum.
#[derive(Default)]
pub struct SplitTransport {
    calls: AtomicUsize,
}
counted!(SplitTransport);

impl Transport for SplitTransport {
    fn name(&self) -> &str {
        "split"
    }

    fn update(
        &self,
        ctx: &mut UpdateContext<'_>,
        particle: &Particle,
        out: &mut Outgoing,
    ) -> Result<(), TransportError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        let mut half = advanced(ctx, particle);
        half.p = half.p * 0.5;
        out.push(half.clone());
        out.push(half);
        Ok(())
    }
}

#[derive(Default)]
pub struct AbsorbTransport {
    calls: AtomicUsize,
}
counted!(AbsorbTransport);

impl Transport for AbsorbTransport {
    fn name(&self) -> &str {
        "absorb"
    }

    fn update(
        &self,
        _ctx: &mut UpdateContext<'_>,
        _particle: &Particle,
        _out: &mut Outgoing,
    ) -> Result<(), TransportError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}

/// Advances and sets the freeze-out marker to the local temperature, so
/// particles freeze once the medium cools below the stopping temperature.
#[derive(Default)]
pub struct CoolingTransport {
    calls: AtomicUsize,
}
counted!(CoolingTransport);

impl Transport for CoolingTransport {
    fn name(&self) -> &str {
        "cooling"
    }

    fn update(
        &self,
        ctx: &mut UpdateContext<'_>,
        particle: &Particle,
        out: &mut Outgoing,
    ) -> Result<(), TransportError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        let mut next = advanced(ctx, particle);
        next.tf = ctx.temperature();
        out.push(next);
        Ok(())
    }
}

/// Advances and removes a random fraction (up to 10%) of the momentum.
#[derive(Default)]
pub struct KickTransport {
    calls: AtomicUsize,
}
counted!(KickTransport);

impl Transport for KickTransport {
    fn name(&self) -> &str {
        "kick"
    }

    fn update(
        &self,
        ctx: &mut UpdateContext<'_>,
        particle: &Particle,
        out: &mut Outgoing,
    ) -> Result<(), TransportError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        let loss = ctx.rng().random_range(0.0..0.1);
        let mut next = advanced(ctx, particle);
        next.p = next.p * (1.0 - loss);
        out.push(next);
        Ok(())
    }
}

/// Returns the particle one unit earlier in proper time.
#[derive(Default)]
pub struct RewindTransport;

impl Transport for RewindTransport {
    fn name(&self) -> &str {
        "rewind"
    }

    fn update(
        &self,
        _ctx: &mut UpdateContext<'_>,
        particle: &Particle,
        out: &mut Outgoing,
    ) -> Result<(), TransportError> {
        let mut next = particle.clone();
        next.x.tau -= 1.0;
        out.push(next);
        Ok(())
    }
}

/// Advances `succeed_count` times, then fails every call.
pub struct FailingTransport {
    pub succeed_count: usize,
    calls: AtomicUsize,
}
counted!(FailingTransport);

impl FailingTransport {
    pub fn new(succeed_count: usize) -> Self {
        Self {
            succeed_count,
            calls: AtomicUsize::new(0),
        }
    }
}

impl Transport for FailingTransport {
    fn name(&self) -> &str {
        "failing"
    }

    fn update(
        &self,
        ctx: &mut UpdateContext<'_>,
        particle: &Particle,
        out: &mut Outgoing,
    ) -> Result<(), TransportError> {
        let n = self.calls.fetch_add(1, Ordering::Relaxed);
        if n >= self.succeed_count {
            return Err(TransportError::ExecutionFailed {
                reason: format!(
                    "deliberate failure after {} successful calls",
                    self.succeed_count
                ),
            });
        }
        out.push(advanced(ctx, particle));
        Ok(())
    }
}
