//! Property tests for driver bookkeeping.

use std::sync::atomic::{AtomicUsize, Ordering};

use proptest::prelude::*;
use quench_core::{Ensemble, Event, FourVector, Particle};
use quench_engine::{EvolutionConfig, EvolutionDriver};
use quench_kernels::ThermalDrag;
use quench_test_utils::fixtures::{parton, KickTransport};
use quench_test_utils::WindowMedium;
use quench_transport::{
    CoefficientTable, Outgoing, Transport, TransportError, TransportParams, UpdateContext,
};

fn arb_parton() -> impl Strategy<Value = Particle> {
    (1.0f64..100.0, 0.0f64..12.0, -8.0f64..8.0).prop_map(|(e, tau, etas)| parton(e, tau, etas))
}

fn arb_ensemble() -> impl Strategy<Value = Ensemble> {
    prop::collection::vec(prop::collection::vec(arb_parton(), 0..6), 1..6).prop_map(|events| {
        Ensemble::new(
            events
                .into_iter()
                .map(|plist| Event::new(plist, 1.0, 0.4, 0.0, FourVector::ZERO))
                .collect(),
        )
    })
}

fn drag() -> ThermalDrag {
    ThermalDrag::builder()
        .table(CoefficientTable::from_points(vec![(0.15, 1.0), (0.5, 4.0)]).unwrap())
        .split_rate(0.5)
        .build()
        .unwrap()
}

/// Wraps a kernel and checks every outgoing particle against the one it
/// came from: never earlier in τ, and exactly at the end of the step.
struct Lineage<T> {
    inner: T,
    updates: AtomicUsize,
    violations: AtomicUsize,
}

impl<T> Lineage<T> {
    fn new(inner: T) -> Self {
        Self {
            inner,
            updates: AtomicUsize::new(0),
            violations: AtomicUsize::new(0),
        }
    }
}

impl<T: Transport> Transport for Lineage<T> {
    fn name(&self) -> &str {
        "lineage"
    }

    fn update(
        &self,
        ctx: &mut UpdateContext<'_>,
        particle: &Particle,
        out: &mut Outgoing,
    ) -> Result<(), TransportError> {
        let end = particle.x.tau + ctx.dt();
        self.inner.update(ctx, particle, out)?;
        self.updates.fetch_add(1, Ordering::Relaxed);
        let bad = out
            .iter()
            .filter(|q| q.x.tau < particle.x.tau || (q.x.tau - end).abs() > 1e-9 * (1.0 + end))
            .count();
        self.violations.fetch_add(bad, Ordering::Relaxed);
        Ok(())
    }
}

fn config(seed: u64) -> EvolutionConfig {
    EvolutionConfig {
        record_currents: true,
        seed,
        ..EvolutionConfig::default()
    }
}

proptest! {
    #[test]
    fn no_particle_moves_back_in_proper_time(ens in arb_ensemble(), seed in any::<u64>()) {
        let medium = WindowMedium::from_edges(&[0.0, 2.0, 4.0, 6.0, 8.0, 10.0], 0.3);
        let mut d = EvolutionDriver::new(
            medium,
            Lineage::new(drag()),
            TransportParams::default(),
            config(seed),
            ens,
        )
        .unwrap();
        let mut floor: Vec<f64> = d
            .ensemble()
            .iter()
            .map(|e| e.plist.iter().map(|p| p.x.tau).fold(f64::INFINITY, f64::min))
            .collect();
        while d.step().unwrap().is_some() {
            for (ev, lo) in d.ensemble().iter().zip(floor.iter_mut()) {
                let min_tau = ev.plist.iter().map(|p| p.x.tau).fold(f64::INFINITY, f64::min);
                prop_assert!(min_tau >= *lo);
                *lo = min_tau;
            }
        }
        let lineage = d.transport();
        prop_assert_eq!(lineage.violations.load(Ordering::Relaxed), 0);
        let active: usize = d.ensemble().iter().map(|e| e.clist.len()).sum();
        prop_assert_eq!(lineage.updates.load(Ordering::Relaxed), active);
    }

    #[test]
    fn loss_plus_survivors_equals_input(ens in arb_ensemble(), seed in any::<u64>()) {
        let before: Vec<FourVector> = ens.iter().map(Event::total_momentum).collect();
        let medium = WindowMedium::from_edges(&[0.0, 3.0, 6.0, 9.0], 0.3);
        let mut d = EvolutionDriver::new(
            medium,
            KickTransport::default(),
            TransportParams::default(),
            config(seed),
            ens,
        )
        .unwrap();
        d.evolve().unwrap();
        for (ev, p_in) in d.ensemble().iter().zip(before) {
            let balance = ev.total_momentum() + ev.total_current();
            prop_assert!(balance.approx_eq(&p_in, 1e-9 * (1.0 + p_in.t)));
        }
    }

    #[test]
    fn frozen_particles_are_never_touched(ens in arb_ensemble(), seed in any::<u64>()) {
        let cfg = config(seed);
        let frozen: Vec<Vec<Particle>> = ens
            .iter()
            .map(|e| {
                e.plist
                    .iter()
                    .filter(|p| p.x.etas.abs() > cfg.etas_cutoff)
                    .cloned()
                    .collect()
            })
            .collect();
        let medium = WindowMedium::from_edges(&[0.0, 4.0, 8.0, 12.0], 0.3);
        let mut d = EvolutionDriver::new(medium, drag(), TransportParams::default(), cfg, ens)
            .unwrap();
        while d.step().unwrap().is_some() {
            for (ev, kept) in d.ensemble().iter().zip(&frozen) {
                for p in kept {
                    prop_assert!(ev.plist.contains(p));
                }
            }
        }
    }
}
