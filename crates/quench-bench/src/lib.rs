//! Benchmark profiles for the quench transport driver.
//!
//! - [`reference_medium`]: Bjorken cooling from 0.6 to 10 fm/c in 0.2 fm/c steps
//! - [`reference_ensemble`]: power-law dijets over the hadron trigger bins,
//!   already projected to the medium's start time
//! - [`reference_kernel`]: thermal drag with a two-point coefficient table

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::error::Error;

use quench_core::{Ensemble, Medium, TriggerBins, GEV_INV_PER_FM};
use quench_engine::{build_ensemble, free_stream, BuilderConfig};
use quench_kernels::ThermalDrag;
use quench_sources::{BjorkenMedium, PowerLawGenerator};
use quench_transport::CoefficientTable;

/// Error type shared by the profile builders.
pub type ProfileError = Box<dyn Error + Send + Sync>;

/// Bjorken medium at T0 = 0.45 GeV, 0.6 → 10 fm/c, Δτ = 0.2 fm/c
/// (47 snapshots).
pub fn reference_medium() -> Result<BjorkenMedium, ProfileError> {
    let medium = BjorkenMedium::new(
        0.45,
        0.6 * GEV_INV_PER_FM,
        0.2 * GEV_INV_PER_FM,
        10.0 * GEV_INV_PER_FM,
    )?
    .with_radius(7.0 * GEV_INV_PER_FM);
    Ok(medium)
}

/// Power-law dijets, `events_per_bin` per hadron trigger bin, free-streamed
/// to the start of [`reference_medium`].
pub fn reference_ensemble(events_per_bin: usize, seed: u64) -> Result<Ensemble, ProfileError> {
    let config = BuilderConfig {
        events_per_bin,
        seed,
        ..BuilderConfig::default()
    };
    let (mut ensemble, _) = build_ensemble(&TriggerBins::hadron(), &config, |_| {
        PowerLawGenerator::new(2.0, 6.0).map(|g| g.with_vertex_radius(5.0 * GEV_INV_PER_FM))
    })?;
    free_stream(&mut ensemble, reference_medium()?.initial_time());
    Ok(ensemble)
}

/// Thermal drag with A(T) rising linearly from 2 to 6 between 0.15 and
/// 0.45 GeV.
pub fn reference_kernel() -> Result<ThermalDrag, ProfileError> {
    let table = CoefficientTable::from_points(vec![(0.15, 2.0), (0.45, 6.0)])?;
    Ok(ThermalDrag::builder().table(table).build()?)
}
