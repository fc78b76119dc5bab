//! Ensemble construction from a hard-process generator.
//!
//! [`build_ensemble`] draws `events_per_bin` hard processes in every
//! trigger window. Failed draws are dropped without retry, but the
//! cross-section weight is always divided by the *requested* draw count,
//! so a bin with failures contributes proportionally less. Every accepted
//! particle is stamped just above the stopping temperature.
//! [`free_stream`] then moves particles produced before the medium starts
//! onto the medium's initial time slice.

use quench_core::{
    Ensemble, Event, GeneratorError, HardGenerator, TriggerBins, TriggerWindow,
};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::{BuilderConfig, ConfigError};

/// Offset added to the stopping temperature when stamping particles, so
/// fresh particles are never frozen on their first snapshot.
const TF_MARGIN: f64 = 0.001;

// ── Errors ─────────────────────────────────────────────────────────

/// Errors from [`build_ensemble`].
#[derive(Debug, Error)]
pub enum BuildError {
    /// The builder configuration is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The generator could not be instantiated for a window.
    #[error("generator for window {window}: {source}")]
    Generator {
        /// The window being set up.
        window: TriggerWindow,
        /// The underlying failure.
        #[source]
        source: GeneratorError,
    },
}

// ── Reports ────────────────────────────────────────────────────────

/// Draw statistics for one trigger bin.
#[derive(Clone, Debug, PartialEq)]
pub struct BinReport {
    /// The bin's window.
    pub window: TriggerWindow,
    /// Draws requested.
    pub requested: usize,
    /// Draws that produced an event.
    pub accepted: usize,
    /// Draws that were discarded.
    pub failed: usize,
}

/// Draw statistics for a whole build.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BuildReport {
    /// One entry per bin, lowest window first.
    pub bins: Vec<BinReport>,
}

impl BuildReport {
    /// Events produced across all bins.
    pub fn accepted(&self) -> usize {
        self.bins.iter().map(|b| b.accepted).sum()
    }

    /// Draws discarded across all bins.
    pub fn failed(&self) -> usize {
        self.bins.iter().map(|b| b.failed).sum()
    }
}

// ── Building ───────────────────────────────────────────────────────

/// Seed for draw `draw` in bin `bin`: distinct across the whole build and
/// reproducible from the base seed.
fn draw_seed(base: u64, bin: usize, draw: usize) -> u64 {
    base ^ ((bin as u64) << 32) ^ draw as u64
}

/// Draw an ensemble bin by bin.
///
/// `factory` is called once per bin to obtain a generator scoped to that
/// window; empty windows and bins with zero requested draws skip it.
/// Events keep bin order,
/// then draw order.
///
/// # Errors
///
/// [`BuildError::Config`] for an invalid `config`,
/// [`BuildError::Generator`] if `factory` fails. Individual failed draws
/// are not errors.
pub fn build_ensemble<G, F>(
    bins: &TriggerBins,
    config: &BuilderConfig,
    mut factory: F,
) -> Result<(Ensemble, BuildReport), BuildError>
where
    G: HardGenerator,
    F: FnMut(TriggerWindow) -> Result<G, GeneratorError>,
{
    config.validate()?;
    let requested = config.events_per_bin;
    info!(bins = bins.len(), events_per_bin = requested, "Building ensemble");

    let mut events = Vec::new();
    let mut report = BuildReport::default();
    for (bin, window) in bins.windows().enumerate() {
        let mut stats = BinReport {
            window,
            requested,
            accepted: 0,
            failed: 0,
        };
        if requested == 0 || window.is_empty() {
            stats.requested = 0;
            report.bins.push(stats);
            continue;
        }

        let mut generator =
            factory(window).map_err(|source| BuildError::Generator { window, source })?;
        for draw in 0..requested {
            let seed = draw_seed(config.seed, bin, draw);
            match generator.generate(window, seed, config.q0) {
                Some(mut plist) => {
                    for particle in &mut plist {
                        particle.tf = config.tf + TF_MARGIN;
                    }
                    let sigma = generator.sigma_gen() / requested as f64;
                    events.push(Event::new(
                        plist,
                        sigma,
                        config.q0,
                        generator.max_pt(),
                        generator.production_vertex(),
                    ));
                    stats.accepted += 1;
                }
                None => {
                    debug!(%window, draw, "Discarded failed draw");
                    stats.failed += 1;
                }
            }
        }
        report.bins.push(stats);
    }

    if events.is_empty() {
        warn!("Ensemble has no events");
    }
    Ok((Ensemble::new(events), report))
}

/// Project every particle onto the medium's initial time slice.
///
/// A particle with `τ < tau_init` is moved to `τ' = max(tau_init, tau0)`
/// and its transverse position shifted by `v⊥ · τ'`. Particles already
/// at or past `tau_init` keep their position. Freeze-out markers are left
/// as [`build_ensemble`] stamped them.
pub fn free_stream(ensemble: &mut Ensemble, tau_init: f64) {
    info!(tau0 = tau_init, events = ensemble.len(), "Initializing ensemble");
    for particle in ensemble.events.iter_mut().flat_map(|e| e.plist.iter_mut()) {
        if particle.x.tau < tau_init {
            let dtau = tau_init.max(particle.tau0);
            let [vx, vy, _] = particle.velocity();
            particle.x.tau = dtau;
            particle.x.x += vx * dtau;
            particle.x.y += vy * dtau;
        }
    }
}
