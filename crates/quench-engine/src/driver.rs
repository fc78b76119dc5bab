//! The time-stepped evolution driver.
//!
//! [`EvolutionDriver`] synchronizes independently clocked particles against
//! a sequence of medium snapshots. For each snapshot window
//! `[clock, clock + width)` every particle is classified:
//!
//! - **Frozen**: `|ηs|` beyond the cutoff, or freeze-out marker below the
//!   stopping temperature. Carried unchanged, and never touched again.
//! - **Deferred**: `τ > clock + width`. Carried unchanged and
//!   re-evaluated on the next snapshot.
//! - **Active**: handed to the transport kernel with
//!   `Δt = clock + width − τ` and the medium sampled at the particle.
//!
//! # Buffers and randomness
//!
//! Each event owns a lane: a reusable `next` buffer that is swapped with
//! the event's particle list after every pass, and an independent
//! `ChaCha8Rng` stream (base seed, stream = event index). Because events
//! never share mutable state and their random streams are fixed, running
//! the pass sequentially or on the rayon pool gives identical results.

use std::mem;
use std::time::Instant;

use quench_core::{
    Current, Ensemble, Event, FourVector, Medium, MediumError, Particle, SnapshotWindow,
    GEV_INV_PER_FM,
};
use quench_transport::{Outgoing, Transport, TransportError, TransportParams, UpdateContext};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::{ConfigError, EvolutionConfig};
use crate::metrics::{EvolutionReport, PassMetrics};

// ── Errors ─────────────────────────────────────────────────────────

/// Errors that abort an evolution.
#[derive(Debug, Error)]
pub enum EvolutionError {
    /// The medium could not supply the next snapshot.
    #[error("medium: {0}")]
    Medium(#[from] MediumError),
    /// The transport kernel failed.
    #[error("kernel '{kernel}' failed in event {event}: {source}")]
    Transport {
        /// Index of the event being processed.
        event: usize,
        /// Kernel name.
        kernel: String,
        /// The kernel's error.
        #[source]
        source: TransportError,
    },
    /// The kernel returned a particle earlier in proper time than its
    /// input.
    #[error("kernel moved a particle of event {event} back in proper time: {before} -> {after}")]
    ProperTimeReversed {
        /// Index of the event being processed.
        event: usize,
        /// Incoming proper time.
        before: f64,
        /// Outgoing proper time.
        after: f64,
    },
}

// ── Classification ─────────────────────────────────────────────────

/// How a particle is treated in one pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParticleState {
    /// Outside the rapidity cut or below the stopping temperature.
    Frozen,
    /// Ahead of the current snapshot window.
    Deferred,
    /// Eligible for a kernel update.
    Active,
}

impl ParticleState {
    /// Classify `particle` against `window`.
    pub fn classify(particle: &Particle, window: SnapshotWindow, config: &EvolutionConfig) -> Self {
        if particle.x.etas.abs() > config.etas_cutoff || particle.tf < config.tf {
            Self::Frozen
        } else if particle.x.tau > window.upper() {
            Self::Deferred
        } else {
            Self::Active
        }
    }
}

// ── Per-event state ────────────────────────────────────────────────

/// Per-event scratch owned by the driver.
struct Lane {
    rng: ChaCha8Rng,
    next: Vec<Particle>,
    out: Outgoing,
}

impl Lane {
    fn new(seed: u64, index: usize) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        rng.set_stream(index as u64);
        Self {
            rng,
            next: Vec::new(),
            out: Outgoing::new(),
        }
    }
}

/// Read-only inputs shared by every event in a pass.
struct PassInputs<'a, M, T> {
    medium: &'a M,
    transport: &'a T,
    params: &'a TransportParams,
    config: &'a EvolutionConfig,
    window: SnapshotWindow,
}

impl<M: Medium, T: Transport> PassInputs<'_, M, T> {
    /// Run one event through the current snapshot, leaving the new list in
    /// `event.plist`.
    fn run_event(
        &self,
        index: usize,
        event: &mut Event,
        lane: &mut Lane,
    ) -> Result<PassMetrics, EvolutionError> {
        let mut tally = PassMetrics::default();
        let upper = self.window.upper();
        lane.next.clear();

        for particle in event.plist.drain(..) {
            match ParticleState::classify(&particle, self.window, self.config) {
                ParticleState::Frozen => {
                    tally.frozen += 1;
                    lane.next.push(particle);
                    continue;
                }
                ParticleState::Deferred => {
                    tally.deferred += 1;
                    lane.next.push(particle);
                    continue;
                }
                ParticleState::Active => {}
            }

            let dt = upper - particle.x.tau;
            let sample = self.medium.interpolate(&particle.x);
            lane.out.clear();
            let mut ctx = UpdateContext::new(dt, sample, self.params, &mut lane.rng);
            self.transport
                .update(&mut ctx, &particle, &mut lane.out)
                .map_err(|source| EvolutionError::Transport {
                    event: index,
                    kernel: self.transport.name().to_string(),
                    source,
                })?;

            if let Some(back) = lane.out.iter().find(|q| q.x.tau < particle.x.tau) {
                return Err(EvolutionError::ProperTimeReversed {
                    event: index,
                    before: particle.x.tau,
                    after: back.x.tau,
                });
            }

            tally.active += 1;
            tally.produced += lane.out.len();
            if lane.out.is_empty() {
                tally.absorbed += 1;
            }
            if self.config.record_currents {
                let emitted: FourVector = lane.out.iter().map(|q| q.p).sum();
                event.clist.push(Current {
                    p: particle.p - emitted,
                    etas: particle.x.etas,
                });
                tally.currents += 1;
            }
            lane.next.extend(lane.out.drain(..));
        }

        mem::swap(&mut event.plist, &mut lane.next);
        Ok(tally)
    }
}

// ── Driver ─────────────────────────────────────────────────────────

/// Evolves an [`Ensemble`] through every snapshot of a [`Medium`].
///
/// Construct with [`new`](Self::new), then either call
/// [`evolve`](Self::evolve) to run to the end of the medium history or
/// [`step`](Self::step) to run one snapshot at a time. On error the
/// ensemble is left in an unspecified state; the run should be abandoned.
pub struct EvolutionDriver<M, T> {
    medium: M,
    transport: T,
    params: TransportParams,
    config: EvolutionConfig,
    ensemble: Ensemble,
    lanes: Vec<Lane>,
    passes: usize,
}

impl<M: Medium, T: Transport> EvolutionDriver<M, T> {
    /// Create a driver.
    ///
    /// # Errors
    ///
    /// [`ConfigError`] if `config` or `params` fail validation.
    pub fn new(
        medium: M,
        transport: T,
        params: TransportParams,
        config: EvolutionConfig,
        ensemble: Ensemble,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        params.validate()?;
        let lanes = (0..ensemble.len())
            .map(|i| Lane::new(config.seed, i))
            .collect();
        Ok(Self {
            medium,
            transport,
            params,
            config,
            ensemble,
            lanes,
            passes: 0,
        })
    }

    /// Run one pass over the next snapshot.
    ///
    /// Returns `Ok(None)` without touching the ensemble once the medium
    /// has no snapshots left.
    ///
    /// # Errors
    ///
    /// Any [`EvolutionError`]; all are fatal.
    pub fn step(&mut self) -> Result<Option<PassMetrics>, EvolutionError> {
        if !self.medium.has_next_snapshot() {
            return Ok(None);
        }
        self.medium.advance_to_next_snapshot()?;
        let window = self.medium.window();
        self.passes += 1;
        info!(
            pass = self.passes,
            clock_fm = window.clock / GEV_INV_PER_FM,
            width_fm = window.width / GEV_INV_PER_FM,
            "Medium pass"
        );

        let start = Instant::now();
        let inputs = PassInputs {
            medium: &self.medium,
            transport: &self.transport,
            params: &self.params,
            config: &self.config,
            window,
        };
        let events = &mut self.ensemble.events;
        let lanes = &mut self.lanes;

        let tally = if self.config.parallel {
            events
                .par_iter_mut()
                .zip(lanes.par_iter_mut())
                .enumerate()
                .map(|(i, (event, lane))| inputs.run_event(i, event, lane))
                .try_reduce(PassMetrics::default, |a, b| Ok(a + b))?
        } else {
            let mut total = PassMetrics::default();
            for (i, (event, lane)) in events.iter_mut().zip(lanes.iter_mut()).enumerate() {
                total = total + inputs.run_event(i, event, lane)?;
            }
            total
        };

        let metrics = PassMetrics {
            pass: self.passes,
            clock: window.clock,
            width: window.width,
            elapsed_us: start.elapsed().as_micros() as u64,
            ..tally
        };
        debug!(
            pass = metrics.pass,
            active = metrics.active,
            frozen = metrics.frozen,
            deferred = metrics.deferred,
            absorbed = metrics.absorbed,
            elapsed_us = metrics.elapsed_us,
            "Pass complete"
        );
        Ok(Some(metrics))
    }

    /// Run every remaining snapshot.
    ///
    /// # Errors
    ///
    /// Any [`EvolutionError`]; all are fatal.
    pub fn evolve(&mut self) -> Result<EvolutionReport, EvolutionError> {
        if self.ensemble.is_empty() {
            warn!("Evolving an empty ensemble");
        }
        info!(
            events = self.ensemble.len(),
            particles = self.ensemble.particle_count(),
            kernel = self.transport.name(),
            "Starting evolution"
        );
        let mut report = EvolutionReport::default();
        while let Some(metrics) = self.step()? {
            report.passes.push(metrics);
        }
        info!(
            passes = report.pass_count(),
            particles = self.ensemble.particle_count(),
            "Evolution finished"
        );
        Ok(report)
    }

    /// The ensemble in its current state.
    pub fn ensemble(&self) -> &Ensemble {
        &self.ensemble
    }

    /// The medium.
    pub fn medium(&self) -> &M {
        &self.medium
    }

    /// The transport kernel.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Passes run so far.
    pub fn passes(&self) -> usize {
        self.passes
    }

    /// Consume the driver, returning the evolved ensemble.
    pub fn into_ensemble(self) -> Ensemble {
        self.ensemble
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quench_core::{MediumSample, SpaceTime};

    struct TwoWindows {
        loaded: usize,
    }

    impl Medium for TwoWindows {
        fn initial_time(&self) -> f64 {
            0.0
        }
        fn has_next_snapshot(&self) -> bool {
            self.loaded < 2
        }
        fn advance_to_next_snapshot(&mut self) -> Result<(), MediumError> {
            self.loaded += 1;
            Ok(())
        }
        fn current_clock(&self) -> f64 {
            5.0 * (self.loaded as f64 - 1.0)
        }
        fn current_step_width(&self) -> f64 {
            5.0
        }
        fn interpolate(&self, _point: &SpaceTime) -> MediumSample {
            MediumSample::at_rest(0.3)
        }
    }

    struct Advance;

    impl Transport for Advance {
        fn name(&self) -> &str {
            "advance"
        }
        fn update(
            &self,
            ctx: &mut UpdateContext<'_>,
            particle: &Particle,
            out: &mut Outgoing,
        ) -> Result<(), TransportError> {
            let mut next = particle.clone();
            next.x.tau += ctx.dt();
            out.push(next);
            Ok(())
        }
    }

    fn particle_at(tau: f64, etas: f64) -> Particle {
        let mut p = Particle::new(
            21,
            FourVector::new(10.0, 10.0, 0.0, 0.0),
            SpaceTime::new(tau, 0.0, 0.0, etas),
        );
        p.tf = 0.171;
        p
    }

    fn driver(plist: Vec<Particle>) -> EvolutionDriver<TwoWindows, Advance> {
        let ensemble = Ensemble::new(vec![Event::new(plist, 1.0, 0.4, 10.0, FourVector::ZERO)]);
        EvolutionDriver::new(
            TwoWindows { loaded: 0 },
            Advance,
            TransportParams::default(),
            EvolutionConfig::default(),
            ensemble,
        )
        .unwrap()
    }

    #[test]
    fn classify_covers_all_states() {
        let cfg = EvolutionConfig::default();
        let w = SnapshotWindow::new(0.0, 5.0);
        assert_eq!(ParticleState::classify(&particle_at(2.0, 0.0), w, &cfg), ParticleState::Active);
        assert_eq!(ParticleState::classify(&particle_at(5.0, 0.0), w, &cfg), ParticleState::Active);
        assert_eq!(ParticleState::classify(&particle_at(6.0, 0.0), w, &cfg), ParticleState::Deferred);
        assert_eq!(ParticleState::classify(&particle_at(2.0, -7.0), w, &cfg), ParticleState::Frozen);
        let mut cold = particle_at(2.0, 0.0);
        cold.tf = 0.1;
        assert_eq!(ParticleState::classify(&cold, w, &cfg), ParticleState::Frozen);
    }

    #[test]
    fn step_advances_to_window_end() {
        let mut d = driver(vec![particle_at(2.0, 0.0)]);
        let m = d.step().unwrap().unwrap();
        assert_eq!((m.pass, m.active, m.produced), (1, 1, 1));
        assert_eq!(d.ensemble().events[0].plist[0].x.tau, 5.0);
        d.step().unwrap().unwrap();
        assert_eq!(d.ensemble().events[0].plist[0].x.tau, 10.0);
        assert!(d.step().unwrap().is_none());
        assert_eq!(d.passes(), 2);
    }

    #[test]
    fn invalid_config_is_rejected_before_running() {
        let cfg = EvolutionConfig {
            etas_cutoff: 0.0,
            ..EvolutionConfig::default()
        };
        let result = EvolutionDriver::new(
            TwoWindows { loaded: 0 },
            Advance,
            TransportParams::default(),
            cfg,
            Ensemble::default(),
        );
        assert!(matches!(result, Err(ConfigError::InvalidEtasCutoff { .. })));
    }

    #[test]
    fn lanes_get_distinct_streams() {
        use rand::Rng;
        let mut a = Lane::new(1, 0);
        let mut b = Lane::new(1, 1);
        let mut a2 = Lane::new(1, 0);
        let x: u64 = a.rng.random();
        assert_ne!(x, b.rng.random::<u64>());
        assert_eq!(x, a2.rng.random::<u64>());
    }
}
