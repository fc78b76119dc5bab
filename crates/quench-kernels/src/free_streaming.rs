//! Straight-line propagation without medium interaction.

use quench_core::Particle;
use quench_transport::{Outgoing, Transport, TransportError, UpdateContext};

use crate::{check_finite, drift};

/// Advances every particle to the end of the step along its velocity.
///
/// Momentum and the freeze-out marker are untouched, so no energy is
/// lost and the particle is only ever frozen by the rapidity cut.
#[derive(Clone, Copy, Debug, Default)]
pub struct FreeStreaming;

impl Transport for FreeStreaming {
    fn name(&self) -> &str {
        "FreeStreaming"
    }

    fn update(
        &self,
        ctx: &mut UpdateContext<'_>,
        particle: &Particle,
        out: &mut Outgoing,
    ) -> Result<(), TransportError> {
        check_finite(particle, ctx.dt())?;
        let mut next = drift(particle, ctx.dt());
        next.scratch.flow = ctx.flow();
        out.push(next);
        Ok(())
    }
}
