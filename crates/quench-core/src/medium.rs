//! The medium snapshot source consumed by the evolution driver.
//!
//! A medium is a sequence of discrete time slices. Each slice has a
//! validity window `[clock, clock + width)` and exposes the local
//! temperature and flow velocity at any space-time point inside it.

use crate::error::MediumError;
use crate::vector::SpaceTime;

/// Local medium state at one space-time point.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MediumSample {
    /// Temperature in GeV.
    pub temperature: f64,
    /// Flow three-velocity `(vx, vy, vz)`.
    pub flow: [f64; 3],
}

impl MediumSample {
    /// A sample with zero flow.
    pub const fn at_rest(temperature: f64) -> Self {
        Self {
            temperature,
            flow: [0.0; 3],
        }
    }
}

/// The validity window of one medium snapshot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SnapshotWindow {
    /// Proper time at which the snapshot starts.
    pub clock: f64,
    /// Time-step width of the snapshot.
    pub width: f64,
}

impl SnapshotWindow {
    /// Construct a window.
    pub const fn new(clock: f64, width: f64) -> Self {
        Self { clock, width }
    }

    /// Upper boundary `clock + width`; particles are advanced up to here.
    pub fn upper(&self) -> f64 {
        self.clock + self.width
    }
}

/// A time-ordered source of medium snapshots.
///
/// The driver calls [`has_next_snapshot`](Medium::has_next_snapshot) and
/// [`advance_to_next_snapshot`](Medium::advance_to_next_snapshot) strictly
/// in sequence, finishing every particle of snapshot k before requesting
/// snapshot k+1. Between advances the medium is only read, which is why
/// [`interpolate`](Medium::interpolate) takes `&self` and implementors must
/// be `Sync`: events may be processed concurrently against one snapshot.
///
/// Before the first advance there is no current snapshot; the values of
/// [`current_clock`](Medium::current_clock) and
/// [`current_step_width`](Medium::current_step_width) are unspecified.
pub trait Medium: Send + Sync {
    /// Proper time at which the medium history begins.
    fn initial_time(&self) -> f64;

    /// Whether another snapshot can be loaded.
    fn has_next_snapshot(&self) -> bool;

    /// Load the next snapshot, making it current.
    ///
    /// # Errors
    ///
    /// Returns [`MediumError::Exhausted`] if no snapshot is left, or
    /// [`MediumError::LoadFailed`] if the snapshot could not be read.
    fn advance_to_next_snapshot(&mut self) -> Result<(), MediumError>;

    /// Start of the current snapshot's validity window.
    fn current_clock(&self) -> f64;

    /// Width of the current snapshot's validity window.
    fn current_step_width(&self) -> f64;

    /// Temperature and flow at `point` in the current snapshot.
    fn interpolate(&self, point: &SpaceTime) -> MediumSample;

    /// The current snapshot's validity window.
    fn window(&self) -> SnapshotWindow {
        SnapshotWindow::new(self.current_clock(), self.current_step_width())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_upper_bound() {
        let w = SnapshotWindow::new(5.0, 5.0);
        assert_eq!(w.upper(), 10.0);
    }

    #[test]
    fn medium_is_object_safe() {
        struct Flat;
        impl Medium for Flat {
            fn initial_time(&self) -> f64 {
                0.0
            }
            fn has_next_snapshot(&self) -> bool {
                false
            }
            fn advance_to_next_snapshot(&mut self) -> Result<(), MediumError> {
                Err(MediumError::Exhausted)
            }
            fn current_clock(&self) -> f64 {
                1.0
            }
            fn current_step_width(&self) -> f64 {
                0.5
            }
            fn interpolate(&self, _point: &SpaceTime) -> MediumSample {
                MediumSample::at_rest(0.3)
            }
        }

        let mut m: Box<dyn Medium> = Box::new(Flat);
        assert_eq!(m.window(), SnapshotWindow::new(1.0, 0.5));
        assert_eq!(m.advance_to_next_snapshot(), Err(MediumError::Exhausted));
        assert_eq!(m.interpolate(&SpaceTime::default()).temperature, 0.3);
    }
}
