//! Events, loss currents, and the ensemble that groups them.

use crate::particle::Particle;
use crate::vector::FourVector;

/// Momentum deposited into the medium by one interaction.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Current {
    /// Four-momentum removed from the interacting particle.
    pub p: FourVector,
    /// Spatial rapidity at which the loss occurred.
    pub etas: f64,
}

/// One independent realization of the hard process.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Event {
    /// Particle list; the only list the driver mutates.
    pub plist: Vec<Particle>,
    /// Loss currents, filled when current bookkeeping is enabled.
    pub clist: Vec<Current>,
    /// Cross-section weight, already divided by the requested draw count.
    pub sigma: f64,
    /// Hard scale the event was generated with.
    pub q0: f64,
    /// Largest transverse momentum produced by the generator.
    pub max_pt: f64,
    /// Production vertex of the hard process.
    pub x0: FourVector,
}

impl Event {
    /// Create an event from a generated particle list.
    pub fn new(plist: Vec<Particle>, sigma: f64, q0: f64, max_pt: f64, x0: FourVector) -> Self {
        Self {
            plist,
            clist: Vec::new(),
            sigma,
            q0,
            max_pt,
            x0,
        }
    }

    /// Sum of all particle momenta.
    pub fn total_momentum(&self) -> FourVector {
        self.plist.iter().map(|p| p.p).sum()
    }

    /// Sum of all recorded loss currents.
    pub fn total_current(&self) -> FourVector {
        self.clist.iter().map(|c| c.p).sum()
    }
}

/// All events sharing one medium history and one configuration.
///
/// Events never share mutable state during evolution; the ensemble is
/// just an ordered container that preserves creation order for output.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Ensemble {
    /// Events in creation order.
    pub events: Vec<Event>,
}

impl Ensemble {
    /// Wrap an event list.
    pub fn new(events: Vec<Event>) -> Self {
        Self { events }
    }

    /// Number of events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether the ensemble holds no events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Total number of particles across all events.
    pub fn particle_count(&self) -> usize {
        self.events.iter().map(|e| e.plist.len()).sum()
    }

    /// Iterate events in creation order.
    pub fn iter(&self) -> std::slice::Iter<'_, Event> {
        self.events.iter()
    }
}

impl From<Vec<Event>> for Ensemble {
    fn from(events: Vec<Event>) -> Self {
        Self::new(events)
    }
}

impl<'a> IntoIterator for &'a Ensemble {
    type Item = &'a Event;
    type IntoIter = std::slice::Iter<'a, Event>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}
