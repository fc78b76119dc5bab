//! Run-wide transport parameters.

use indexmap::IndexMap;

use crate::error::ParamError;

/// Strong-coupling prescription.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Coupling {
    /// Running coupling, evaluated by the kernel at the interaction scale.
    #[default]
    Running,
    /// Fixed coupling constant.
    Fixed(f64),
}

impl Coupling {
    /// Decode the scalar convention where a negative value selects the
    /// running coupling.
    pub fn from_afix(afix: f64) -> Self {
        if afix < 0.0 {
            Self::Running
        } else {
            Self::Fixed(afix)
        }
    }

    /// Encode back to the scalar convention (`-1` for running).
    pub fn afix(&self) -> f64 {
        match self {
            Self::Running => -1.0,
            Self::Fixed(a) => *a,
        }
    }
}

/// Parameters shared by every transport update in a run.
///
/// Defaults:
///
/// | field | default |
/// |-------|---------|
/// | `q0` | 0.4 GeV |
/// | `mu_t` | 1.5 |
/// | `coupling` | running |
/// | `cut` | 4 |
/// | `theta` | 4 |
/// | `tf` | 0.17 GeV |
#[derive(Clone, Debug, PartialEq)]
pub struct TransportParams {
    /// Hard scale handed to generated particles.
    pub q0: f64,
    /// Medium-scale multiplier `μ/T`.
    pub mu_t: f64,
    /// Strong-coupling prescription.
    pub coupling: Coupling,
    /// Soft cutoff in units of the medium scale.
    pub cut: f64,
    /// Thermalization threshold: a particle with `E < theta · T` is
    /// absorbed by the medium.
    pub theta: f64,
    /// Transport stopping temperature in GeV.
    pub tf: f64,
}

impl Default for TransportParams {
    fn default() -> Self {
        Self {
            q0: 0.4,
            mu_t: 1.5,
            coupling: Coupling::Running,
            cut: 4.0,
            theta: 4.0,
            tf: 0.17,
        }
    }
}

impl TransportParams {
    /// The packed parameter vector `[mu_t, afix, cut, theta]` consumed by
    /// kernels that take their parameters positionally.
    pub fn as_vector(&self) -> [f64; 4] {
        [self.mu_t, self.coupling.afix(), self.cut, self.theta]
    }

    /// All parameters by name, in declaration order.
    pub fn named(&self) -> IndexMap<&'static str, f64> {
        IndexMap::from([
            ("q0", self.q0),
            ("mu_t", self.mu_t),
            ("afix", self.coupling.afix()),
            ("cut", self.cut),
            ("theta", self.theta),
            ("tf", self.tf),
        ])
    }

    /// Check the parameters.
    ///
    /// # Errors
    ///
    /// [`ParamError::NotPositive`] for a non-finite or non-positive scale,
    /// multiplier, cutoff, threshold, or temperature;
    /// [`ParamError::InvalidCoupling`] for a fixed coupling outside `(0, 1]`.
    pub fn validate(&self) -> Result<(), ParamError> {
        let checks = [
            ("q0", self.q0),
            ("mu_t", self.mu_t),
            ("cut", self.cut),
            ("theta", self.theta),
            ("tf", self.tf),
        ];
        for (name, value) in checks {
            if !(value.is_finite() && value > 0.0) {
                return Err(ParamError::NotPositive { name, value });
            }
        }
        if let Coupling::Fixed(value) = self.coupling {
            if !(value > 0.0 && value <= 1.0) {
                return Err(ParamError::InvalidCoupling { value });
            }
        }
        Ok(())
    }
}
