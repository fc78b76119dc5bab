//! Toy stochastic kernel: drag, absorption, and soft splitting.
//!
//! Per update, at local temperature `T`:
//!
//! 1. A light parton with `E < theta · T` is absorbed (no outgoing
//!    particle). Heavy quarks are never absorbed.
//! 2. The three-momentum is scaled by `exp(-A(T) · T² / E · dt)`, with
//!    `A(T)` read from the injected [`CoefficientTable`]. The energy is
//!    put back on shell.
//! 3. With probability `1 - exp(-split_rate · T · dt)` a collinear gluon
//!    carrying a fraction `z ∈ [min_fraction, 1/2)` of the momentum is
//!    split off. The emission is recorded in the parent's radiation
//!    history.
//!
//! Both outgoing particles are drifted to the end of the step and their
//! freeze-out marker is set to the local temperature, so the driver stops
//! transporting them once the medium has cooled below the stopping
//! temperature.

use quench_core::{FourVector, Particle};
use quench_transport::{CoefficientTable, Outgoing, Transport, TransportError, UpdateContext};
use rand::Rng;

use crate::{check_finite, drift};

const GLUON: i32 = 21;

/// A temperature-dependent drag kernel.
///
/// Constructed via the builder pattern: [`ThermalDrag::builder`].
#[derive(Clone, Debug)]
pub struct ThermalDrag {
    table: CoefficientTable,
    split_rate: f64,
    min_fraction: f64,
}

/// Builder for [`ThermalDrag`].
///
/// Required field: `table`.
pub struct ThermalDragBuilder {
    table: Option<CoefficientTable>,
    split_rate: f64,
    min_fraction: f64,
}

impl ThermalDrag {
    /// Create a new builder.
    pub fn builder() -> ThermalDragBuilder {
        ThermalDragBuilder {
            table: None,
            split_rate: 0.5,
            min_fraction: 0.1,
        }
    }

    /// The drag coefficient table.
    pub fn table(&self) -> &CoefficientTable {
        &self.table
    }

    fn is_heavy(pid: i32) -> bool {
        matches!(pid.abs(), 4 | 5)
    }
}

impl ThermalDragBuilder {
    /// Set the drag coefficient table `A(T)`.
    pub fn table(mut self, table: CoefficientTable) -> Self {
        self.table = Some(table);
        self
    }

    /// Splitting rate per unit temperature (default: 0.5). Zero disables
    /// splitting.
    pub fn split_rate(mut self, rate: f64) -> Self {
        self.split_rate = rate;
        self
    }

    /// Smallest momentum fraction carried by a split-off gluon
    /// (default: 0.1). Must lie in `(0, 0.5)`.
    pub fn min_fraction(mut self, z: f64) -> Self {
        self.min_fraction = z;
        self
    }

    /// Build the kernel, validating all configuration.
    ///
    /// # Errors
    ///
    /// Returns `Err` if:
    /// - `table` is not set
    /// - `split_rate` is negative or NaN
    /// - `min_fraction` is outside `(0, 0.5)`
    pub fn build(self) -> Result<ThermalDrag, String> {
        let table = self.table.ok_or_else(|| "table is required".to_string())?;

        if !self.split_rate.is_finite() || self.split_rate < 0.0 {
            return Err(format!(
                "split_rate must be finite and >= 0, got {}",
                self.split_rate
            ));
        }
        if !(self.min_fraction > 0.0 && self.min_fraction < 0.5) {
            return Err(format!(
                "min_fraction must be in (0, 0.5), got {}",
                self.min_fraction
            ));
        }

        Ok(ThermalDrag {
            table,
            split_rate: self.split_rate,
            min_fraction: self.min_fraction,
        })
    }
}

/// Three-momentum of `p` scaled by `factor`, on shell for `mass`.
fn scaled(p: FourVector, factor: f64, mass: f64) -> FourVector {
    FourVector::on_shell(mass, p.x * factor, p.y * factor, p.z * factor)
}

impl Transport for ThermalDrag {
    fn name(&self) -> &str {
        "ThermalDrag"
    }

    fn update(
        &self,
        ctx: &mut UpdateContext<'_>,
        particle: &Particle,
        out: &mut Outgoing,
    ) -> Result<(), TransportError> {
        let dt = ctx.dt();
        check_finite(particle, dt)?;
        let temperature = ctx.temperature();
        if !temperature.is_finite() {
            return Err(TransportError::NonFinite { what: "temperature" });
        }

        let mut next = drift(particle, dt);
        next.scratch.flow = ctx.flow();
        next.tf = temperature;

        if temperature <= 0.0 {
            out.push(next);
            return Ok(());
        }

        let energy = particle.p.t;
        if !Self::is_heavy(particle.pid) && energy < ctx.params().theta * temperature {
            return Ok(());
        }

        let rate = self.table.eval(temperature) * temperature * temperature / energy.max(1e-9);
        let damping = (-rate * dt).exp();
        next.p = scaled(particle.p, damping, particle.mass);

        let p_split = 1.0 - (-self.split_rate * temperature * dt).exp();
        let rng = ctx.rng();
        if self.split_rate > 0.0 && rng.random::<f64>() < p_split {
            let z = rng.random_range(self.min_fraction..0.5);
            let mut gluon = next.clone();
            gluon.pid = GLUON;
            gluon.charged = false;
            gluon.mass = 0.0;
            gluon.col = 0;
            gluon.acol = 0;
            gluon.p = scaled(next.p, z, 0.0);
            gluon.x0 = next.x;
            gluon.tau0 = next.x.tau;
            gluon.scratch.radiation.clear();

            next.p = scaled(next.p, 1.0 - z, next.mass);
            next.scratch.radiation.push(gluon.clone());
            out.push(next);
            out.push(gluon);
        } else {
            out.push(next);
        }
        Ok(())
    }
}
