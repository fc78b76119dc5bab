//! Trigger windows and the bin tables that partition hard-process generation.
//!
//! Generation is split into disjoint, ascending, half-open windows of a
//! trigger observable (the hard-process transverse momentum) so that the
//! steeply falling spectrum is sampled evenly across its range.

use std::fmt;

use crate::error::BinError;

/// Default bin edges for hadron/parton spectra, in GeV.
const HADRON_EDGES: [f64; 30] = [
    0.0, 0.1, 0.3, 0.5, 0.7, 1.0, 1.5, 2.0, 2.5, 3.0, 3.5, 4.0, 4.5, 5.0, 6.0, 8.0, 10.0, 12.0,
    15.0, 18.0, 21.0, 25.0, 30.0, 40.0, 60.0, 80.0, 100.0, 150.0, 200.0, 300.0,
];

/// Bin edges used when secondary jet reconstruction is requested, in GeV.
const JET_EDGES: [f64; 29] = [
    10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0, 80.0, 90.0, 100.0, 110.0, 120.0, 140.0, 160.0,
    180.0, 200.0, 220.0, 240.0, 260.0, 280.0, 300.0, 400.0, 500.0, 600.0, 800.0, 1000.0, 1500.0,
    2000.0, 2500.0,
];

/// A half-open window `[lo, hi)` of the trigger observable.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TriggerWindow {
    /// Inclusive lower edge.
    pub lo: f64,
    /// Exclusive upper edge.
    pub hi: f64,
}

impl TriggerWindow {
    /// Construct a window. No ordering is enforced; see [`is_empty`](Self::is_empty).
    pub const fn new(lo: f64, hi: f64) -> Self {
        Self { lo, hi }
    }

    /// Whether `value` lies in `[lo, hi)`.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.lo && value < self.hi
    }

    /// A window with `hi <= lo` admits no values.
    #[allow(clippy::neg_cmp_op_on_partial_ord)]
    pub fn is_empty(&self) -> bool {
        !(self.hi > self.lo)
    }

    /// Width `hi - lo`.
    pub fn width(&self) -> f64 {
        self.hi - self.lo
    }
}

impl fmt::Display for TriggerWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.lo, self.hi)
    }
}

/// A non-descending table of bin edges. Repeated edges form empty
/// windows, which generate no events.
#[derive(Clone, Debug, PartialEq)]
pub struct TriggerBins {
    edges: Vec<f64>,
}

impl TriggerBins {
    /// Build from explicit edges.
    ///
    /// # Errors
    ///
    /// Returns [`BinError`] if fewer than two edges are supplied, an edge is
    /// not finite, or an edge is below its predecessor.
    pub fn new(edges: Vec<f64>) -> Result<Self, BinError> {
        if edges.len() < 2 {
            return Err(BinError::TooFewEdges { count: edges.len() });
        }
        if let Some(index) = edges.iter().position(|e| !e.is_finite()) {
            return Err(BinError::NonFinite { index });
        }
        for (index, pair) in edges.windows(2).enumerate() {
            if pair[0] > pair[1] {
                return Err(BinError::NotAscending {
                    index,
                    lo: pair[0],
                    hi: pair[1],
                });
            }
        }
        Ok(Self { edges })
    }

    /// The default table for inclusive hadron/parton spectra (0–300 GeV).
    pub fn hadron() -> Self {
        Self {
            edges: HADRON_EDGES.to_vec(),
        }
    }

    /// The table used with jet reconstruction (10–2500 GeV).
    pub fn jet() -> Self {
        Self {
            edges: JET_EDGES.to_vec(),
        }
    }

    /// Pick [`jet`](Self::jet) or [`hadron`](Self::hadron).
    pub fn for_jets(jets: bool) -> Self {
        if jets {
            Self::jet()
        } else {
            Self::hadron()
        }
    }

    /// The raw edge list.
    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    /// Number of bins (`edges - 1`).
    pub fn len(&self) -> usize {
        self.edges.len() - 1
    }

    /// Always false; a validated table has at least one bin.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate the bins as windows, lowest first.
    pub fn windows(&self) -> impl Iterator<Item = TriggerWindow> + '_ {
        self.edges
            .windows(2)
            .map(|pair| TriggerWindow::new(pair[0], pair[1]))
    }
}
