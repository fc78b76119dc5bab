//! Test utilities and mock collaborators for quench development.
//!
//! Provides a scripted [`HardGenerator`], a [`WindowMedium`] built from an
//! explicit list of snapshot windows, and (in [`fixtures`]) transport
//! kernels with fixed, easily checked behaviour.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use std::collections::HashSet;

use quench_core::{
    FourVector, HardGenerator, Medium, MediumError, MediumSample, Particle, SnapshotWindow,
    SpaceTime, TriggerWindow,
};

/// Temperature profile `(snapshot clock, point) -> T`.
pub type Profile = Box<dyn Fn(f64, &SpaceTime) -> f64 + Send + Sync>;

/// Mock [`HardGenerator`] producing one parton per draw.
///
/// The parton sits at the origin with transverse momentum at the centre
/// of the window. Draws listed with [`fail_on`](Self::fail_on) return
/// `None`. Every seed received is recorded.
pub struct ScriptedGenerator {
    sigma: f64,
    failures: HashSet<usize>,
    calls: usize,
    last_pt: f64,
    pub seeds: Vec<u64>,
}

impl ScriptedGenerator {
    pub fn new(sigma: f64) -> Self {
        Self {
            sigma,
            failures: HashSet::new(),
            calls: 0,
            last_pt: 0.0,
            seeds: Vec::new(),
        }
    }

    /// Fail the draws with these 0-based call indices.
    pub fn fail_on(mut self, draws: impl IntoIterator<Item = usize>) -> Self {
        self.failures.extend(draws);
        self
    }

    /// How many times `generate()` has been called.
    pub fn calls(&self) -> usize {
        self.calls
    }
}

impl HardGenerator for ScriptedGenerator {
    fn generate(&mut self, window: TriggerWindow, seed: u64, scale: f64) -> Option<Vec<Particle>> {
        let call = self.calls;
        self.calls += 1;
        self.seeds.push(seed);
        if self.failures.contains(&call) || window.is_empty() {
            return None;
        }
        let pt = window.lo + 0.5 * window.width();
        self.last_pt = pt;
        let p = FourVector::on_shell(0.0, pt, 0.0, 0.0);
        Some(vec![Particle::new(21, p, SpaceTime::default()).with_scale(scale)])
    }

    fn sigma_gen(&self) -> f64 {
        self.sigma
    }

    fn max_pt(&self) -> f64 {
        self.last_pt
    }

    fn production_vertex(&self) -> FourVector {
        FourVector::ZERO
    }
}

/// Mock [`Medium`] stepping through an explicit list of windows.
pub struct WindowMedium {
    windows: Vec<SnapshotWindow>,
    profile: Profile,
    loaded: usize,
    fail_at: Option<usize>,
}

impl WindowMedium {
    /// Windows at constant temperature `t`.
    pub fn uniform(windows: Vec<(f64, f64)>, t: f64) -> Self {
        Self::with_profile(windows, Box::new(move |_, _| t))
    }

    /// Contiguous windows `[edges[k], edges[k+1])` at constant temperature.
    pub fn from_edges(edges: &[f64], t: f64) -> Self {
        let windows = edges.windows(2).map(|e| (e[0], e[1] - e[0])).collect();
        Self::uniform(windows, t)
    }

    /// Windows with a temperature profile.
    pub fn with_profile(windows: Vec<(f64, f64)>, profile: Profile) -> Self {
        Self {
            windows: windows
                .into_iter()
                .map(|(clock, width)| SnapshotWindow::new(clock, width))
                .collect(),
            profile,
            loaded: 0,
            fail_at: None,
        }
    }

    /// Fail the advance that would load window `index` (0-based).
    pub fn failing_at(mut self, index: usize) -> Self {
        self.fail_at = Some(index);
        self
    }

    /// Number of windows loaded so far.
    pub fn loaded(&self) -> usize {
        self.loaded
    }

    fn current(&self) -> SnapshotWindow {
        let index = self.loaded.saturating_sub(1);
        self.windows
            .get(index)
            .copied()
            .unwrap_or(SnapshotWindow::new(0.0, 0.0))
    }
}

impl Medium for WindowMedium {
    fn initial_time(&self) -> f64 {
        self.windows.first().map_or(0.0, |w| w.clock)
    }

    fn has_next_snapshot(&self) -> bool {
        self.loaded < self.windows.len()
    }

    fn advance_to_next_snapshot(&mut self) -> Result<(), MediumError> {
        if self.fail_at == Some(self.loaded) {
            return Err(MediumError::LoadFailed {
                reason: format!("scripted failure loading window {}", self.loaded),
            });
        }
        if !self.has_next_snapshot() {
            return Err(MediumError::Exhausted);
        }
        self.loaded += 1;
        Ok(())
    }

    fn current_clock(&self) -> f64 {
        self.current().clock
    }

    fn current_step_width(&self) -> f64 {
        self.current().width
    }

    fn interpolate(&self, point: &SpaceTime) -> MediumSample {
        MediumSample::at_rest((self.profile)(self.current_clock(), point))
    }
}
