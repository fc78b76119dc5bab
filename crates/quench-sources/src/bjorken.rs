//! Boost-invariant Bjorken medium.

use quench_core::{Medium, MediumError, MediumSample, SpaceTime};

/// Ideal Bjorken expansion: `T(τ) = T0 · (τ0 / τ)^(1/3)` with no
/// transverse flow in the co-moving frame.
///
/// Snapshot `k` covers `[τ0 + kΔτ, τ0 + (k+1)Δτ)` and is evaluated at its
/// lower boundary. Snapshots are produced while their start lies below
/// `τ_end`. With a radius set, points farther than the radius from the
/// beam axis see zero temperature.
#[derive(Clone, Debug)]
pub struct BjorkenMedium {
    t0: f64,
    tau0: f64,
    dtau: f64,
    tau_end: f64,
    radius: Option<f64>,
    loaded: usize,
}

impl BjorkenMedium {
    /// Create a medium with initial temperature `t0` (GeV) at proper time
    /// `tau0`, stepped by `dtau` until `tau_end` (all times in GeV⁻¹).
    ///
    /// # Errors
    ///
    /// [`MediumError::Invalid`] if a parameter is non-finite or
    /// non-positive, or if `tau_end <= tau0`.
    pub fn new(t0: f64, tau0: f64, dtau: f64, tau_end: f64) -> Result<Self, MediumError> {
        for (name, value) in [("t0", t0), ("tau0", tau0), ("dtau", dtau)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(MediumError::Invalid {
                    reason: format!("{name} must be finite and positive, got {value}"),
                });
            }
        }
        if !(tau_end.is_finite() && tau_end > tau0) {
            return Err(MediumError::Invalid {
                reason: format!("tau_end {tau_end} must exceed tau0 {tau0}"),
            });
        }
        Ok(Self {
            t0,
            tau0,
            dtau,
            tau_end,
            radius: None,
            loaded: 0,
        })
    }

    /// Restrict the medium to a transverse disc.
    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = Some(radius);
        self
    }

    /// Temperature at proper time `tau`.
    pub fn temperature_at(&self, tau: f64) -> f64 {
        self.t0 * (self.tau0 / tau).cbrt()
    }

    /// Total number of snapshots in the history.
    pub fn snapshot_count(&self) -> usize {
        let span = (self.tau_end - self.tau0) / self.dtau;
        // Tolerate rounding when tau_end is a multiple of dtau.
        (span - 1e-9).ceil().max(0.0) as usize
    }

    fn index(&self) -> usize {
        self.loaded.saturating_sub(1)
    }
}

impl Medium for BjorkenMedium {
    fn initial_time(&self) -> f64 {
        self.tau0
    }

    fn has_next_snapshot(&self) -> bool {
        self.loaded < self.snapshot_count()
    }

    fn advance_to_next_snapshot(&mut self) -> Result<(), MediumError> {
        if !self.has_next_snapshot() {
            return Err(MediumError::Exhausted);
        }
        self.loaded += 1;
        Ok(())
    }

    fn current_clock(&self) -> f64 {
        self.tau0 + self.index() as f64 * self.dtau
    }

    fn current_step_width(&self) -> f64 {
        self.dtau
    }

    fn interpolate(&self, point: &SpaceTime) -> MediumSample {
        if let Some(radius) = self.radius {
            if point.r() > radius {
                return MediumSample::at_rest(0.0);
            }
        }
        MediumSample::at_rest(self.temperature_at(self.current_clock()))
    }
}
