//! Per-pass metrics for the evolution driver.
//!
//! [`PassMetrics`] captures classification counts and timing for one
//! medium snapshot; [`EvolutionReport`] collects them for a whole run.

use std::ops::Add;

/// Counts and timing collected during one driver pass.
///
/// Counts are summed over every event in the ensemble.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PassMetrics {
    /// 1-based pass number.
    pub pass: usize,
    /// Start of the snapshot window, GeV⁻¹.
    pub clock: f64,
    /// Width of the snapshot window, GeV⁻¹.
    pub width: f64,
    /// Particles handed to the kernel.
    pub active: usize,
    /// Particles carried unchanged because they are frozen.
    pub frozen: usize,
    /// Particles carried unchanged because they are ahead of the window.
    pub deferred: usize,
    /// Particles emitted by the kernel.
    pub produced: usize,
    /// Kernel updates that emitted nothing.
    pub absorbed: usize,
    /// Loss currents recorded.
    pub currents: usize,
    /// Wall-clock time for the pass, in microseconds.
    pub elapsed_us: u64,
}

impl PassMetrics {
    /// Particles in the ensemble after the pass.
    pub fn survivors(&self) -> usize {
        self.frozen + self.deferred + self.produced
    }
}

impl Add for PassMetrics {
    type Output = Self;

    /// Sums the counts; window and timing fields come from `self`.
    fn add(self, rhs: Self) -> Self {
        Self {
            active: self.active + rhs.active,
            frozen: self.frozen + rhs.frozen,
            deferred: self.deferred + rhs.deferred,
            produced: self.produced + rhs.produced,
            absorbed: self.absorbed + rhs.absorbed,
            currents: self.currents + rhs.currents,
            ..self
        }
    }
}

/// Metrics for a complete evolution.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EvolutionReport {
    /// One entry per snapshot, in order.
    pub passes: Vec<PassMetrics>,
}

impl EvolutionReport {
    /// Number of passes run.
    pub fn pass_count(&self) -> usize {
        self.passes.len()
    }

    /// Kernel updates across all passes.
    pub fn total_active(&self) -> usize {
        self.passes.iter().map(|p| p.active).sum()
    }

    /// Absorptions across all passes.
    pub fn total_absorbed(&self) -> usize {
        self.passes.iter().map(|p| p.absorbed).sum()
    }

    /// Total wall-clock time, in microseconds.
    pub fn elapsed_us(&self) -> u64 {
        self.passes.iter().map(|p| p.elapsed_us).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_metrics_are_zero() {
        let m = PassMetrics::default();
        assert_eq!(m.active, 0);
        assert_eq!(m.survivors(), 0);
        assert_eq!(m.elapsed_us, 0);
    }

    #[test]
    fn add_sums_counts_only() {
        let a = PassMetrics {
            pass: 2,
            clock: 5.0,
            active: 1,
            produced: 2,
            ..PassMetrics::default()
        };
        let b = PassMetrics {
            pass: 9,
            active: 3,
            frozen: 1,
            absorbed: 1,
            ..PassMetrics::default()
        };
        let sum = a + b;
        assert_eq!(sum.pass, 2);
        assert_eq!(sum.clock, 5.0);
        assert_eq!(sum.active, 4);
        assert_eq!(sum.survivors(), 3);
    }

    #[test]
    fn report_totals() {
        let r = EvolutionReport {
            passes: vec![
                PassMetrics {
                    active: 2,
                    absorbed: 1,
                    elapsed_us: 10,
                    ..PassMetrics::default()
                },
                PassMetrics {
                    active: 1,
                    elapsed_us: 5,
                    ..PassMetrics::default()
                },
            ],
        };
        assert_eq!(r.pass_count(), 2);
        assert_eq!(r.total_active(), 3);
        assert_eq!(r.total_absorbed(), 1);
        assert_eq!(r.elapsed_us(), 15);
    }
}
