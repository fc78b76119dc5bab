//! Transport kernel trait and update context for the quench driver.
//!
//! The [`Transport`] trait is the call contract between the evolution
//! driver and the stochastic scattering/diffusion physics. The driver
//! hands each eligible particle to the kernel together with an
//! [`UpdateContext`] carrying the time step, the local medium state, the
//! run's [`TransportParams`], and the owning event's random stream.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod context;
pub mod error;
pub mod params;
pub mod table;
pub mod transport;

pub use context::UpdateContext;
pub use error::{ParamError, TableError, TransportError};
pub use params::{Coupling, TransportParams};
pub use table::CoefficientTable;
pub use transport::{Outgoing, Transport};
