//! Driver scenarios against scripted media and fixture kernels.

use quench_core::{Ensemble, Event, FourVector, Medium, MediumError, Particle};
use quench_engine::{boost_to_lab, EvolutionConfig, EvolutionDriver, EvolutionError};
use quench_test_utils::fixtures::{
    parton, single_event, AbsorbTransport, AdvanceTransport, CoolingTransport, FailingTransport,
    KickTransport, RewindTransport, SplitTransport,
};
use quench_kernels::ThermalDrag;
use quench_test_utils::WindowMedium;
use quench_transport::{CoefficientTable, Transport, TransportError, TransportParams};

fn two_windows(t: f64) -> WindowMedium {
    WindowMedium::from_edges(&[0.0, 5.0, 10.0], t)
}

fn with_currents() -> EvolutionConfig {
    EvolutionConfig {
        record_currents: true,
        ..EvolutionConfig::default()
    }
}

fn driver<M: Medium, T: Transport>(
    medium: M,
    transport: T,
    config: EvolutionConfig,
    ensemble: Ensemble,
) -> EvolutionDriver<M, T> {
    EvolutionDriver::new(medium, transport, TransportParams::default(), config, ensemble).unwrap()
}

#[test]
fn particle_tracks_snapshot_boundaries() {
    let mut d = driver(
        two_windows(0.3),
        AdvanceTransport::default(),
        EvolutionConfig::default(),
        single_event(vec![parton(10.0, 2.0, 0.0)], 1.0),
    );

    d.step().unwrap().unwrap();
    let plist = &d.ensemble().events[0].plist;
    assert_eq!(plist.len(), 1);
    assert_eq!(plist[0].x.tau, 5.0);

    d.step().unwrap().unwrap();
    let plist = &d.ensemble().events[0].plist;
    assert_eq!(plist.len(), 1);
    assert_eq!(plist[0].x.tau, 10.0);

    assert!(d.step().unwrap().is_none());
}

#[test]
fn forward_particle_stays_frozen_until_frame_transform() {
    let forward = parton(10.0, 2.0, 7.0);
    let mut d = driver(
        two_windows(0.3),
        AdvanceTransport::default(),
        EvolutionConfig::default(),
        single_event(vec![forward.clone()], 1.0),
    );

    while let Some(m) = d.step().unwrap() {
        assert_eq!(m.frozen, 1);
        assert_eq!(m.active, 0);
        assert_eq!(d.ensemble().events[0].plist[0], forward);
    }

    let mut ens = d.into_ensemble();
    boost_to_lab(&mut ens);
    let lab = &ens.events[0].plist[0];
    assert_eq!(lab.x, forward.x);
    assert!(lab.p.approx_eq(&forward.p.boost_back(0.0, 0.0, 7.0f64.tanh()), 1e-12));
    assert!(lab.p.z > 0.0);
}

#[test]
fn deferred_particle_is_picked_up_later() {
    let mut d = driver(
        two_windows(0.3),
        AdvanceTransport::default(),
        EvolutionConfig::default(),
        single_event(vec![parton(10.0, 7.0, 0.0)], 1.0),
    );

    let first = d.step().unwrap().unwrap();
    assert_eq!((first.deferred, first.active), (1, 0));
    assert_eq!(d.ensemble().events[0].plist[0].x.tau, 7.0);

    let second = d.step().unwrap().unwrap();
    assert_eq!((second.deferred, second.active), (0, 1));
    assert_eq!(d.ensemble().events[0].plist[0].x.tau, 10.0);
}

#[test]
fn absorbed_particle_deposits_full_momentum() {
    let p = parton(8.0, 1.0, 0.4);
    let absorb = AbsorbTransport::default();
    let mut d = driver(
        two_windows(0.3),
        absorb,
        with_currents(),
        single_event(vec![p.clone()], 1.0),
    );

    let report = d.evolve().unwrap();
    assert_eq!(report.total_absorbed(), 1);
    let ev = &d.ensemble().events[0];
    assert!(ev.plist.is_empty());
    assert_eq!(ev.clist.len(), 1);
    assert_eq!(ev.clist[0].p, p.p);
    assert_eq!(ev.clist[0].etas, 0.4);
}

#[test]
fn splitting_conserves_momentum_and_records_zero_loss() {
    let mut d = driver(
        WindowMedium::from_edges(&[0.0, 5.0], 0.3),
        SplitTransport::default(),
        with_currents(),
        single_event(vec![parton(8.0, 1.0, 0.0)], 1.0),
    );
    let m = d.step().unwrap().unwrap();
    assert_eq!((m.active, m.produced, m.currents), (1, 2, 1));

    let ev = &d.ensemble().events[0];
    assert_eq!(ev.plist.len(), 2);
    assert_eq!(ev.total_momentum(), FourVector::new(8.0, 8.0, 0.0, 0.0));
    assert_eq!(ev.clist[0].p, FourVector::ZERO);
}

#[test]
fn currents_are_off_by_default() {
    let mut d = driver(
        two_windows(0.3),
        AbsorbTransport::default(),
        EvolutionConfig::default(),
        single_event(vec![parton(8.0, 1.0, 0.0)], 1.0),
    );
    d.evolve().unwrap();
    assert!(d.ensemble().events[0].clist.is_empty());
}

#[test]
fn cooled_particle_freezes_permanently() {
    // Hot in the first window, below the stopping temperature afterwards.
    let medium = WindowMedium::with_profile(
        vec![(0.0, 5.0), (5.0, 5.0), (10.0, 5.0)],
        Box::new(|clock, _| if clock < 5.0 { 0.3 } else { 0.1 }),
    );
    let cooling = CoolingTransport::default();
    let mut d = driver(
        medium,
        cooling,
        EvolutionConfig::default(),
        single_event(vec![parton(10.0, 1.0, 0.0)], 1.0),
    );

    d.step().unwrap().unwrap();
    d.step().unwrap().unwrap();
    // Second update stamped T = 0.1 < 0.17.
    let frozen = d.ensemble().events[0].plist[0].clone();
    assert_eq!(frozen.tf, 0.1);
    assert_eq!(frozen.x.tau, 10.0);

    let third = d.step().unwrap().unwrap();
    assert_eq!((third.frozen, third.active), (1, 0));
    assert_eq!(d.ensemble().events[0].plist[0], frozen);
}

#[test]
fn parallel_matches_sequential() {
    let ensemble = Ensemble::new(
        (0..64)
            .map(|i| {
                let plist: Vec<Particle> = (0..4)
                    .map(|j| parton(5.0 + i as f64 + j as f64, 0.5 * j as f64, 0.1 * j as f64))
                    .collect();
                Event::new(plist, 1.0, 0.4, 0.0, FourVector::ZERO)
            })
            .collect(),
    );
    let edges: Vec<f64> = (0..12).map(|k| k as f64).collect();

    let run = |parallel: bool| {
        let config = EvolutionConfig {
            record_currents: true,
            parallel,
            seed: 99,
            ..EvolutionConfig::default()
        };
        let mut d = driver(
            WindowMedium::from_edges(&edges, 0.3),
            KickTransport::default(),
            config,
            ensemble.clone(),
        );
        let report = d.evolve().unwrap();
        (report.total_active(), d.into_ensemble())
    };

    let (seq_active, seq) = run(false);
    let (par_active, par) = run(true);
    assert_eq!(seq_active, par_active);
    assert_eq!(seq, par);
}

#[test]
fn different_events_draw_different_randomness() {
    let ensemble = Ensemble::new(vec![
        Event::new(vec![parton(10.0, 0.0, 0.0)], 1.0, 0.4, 0.0, FourVector::ZERO),
        Event::new(vec![parton(10.0, 0.0, 0.0)], 1.0, 0.4, 0.0, FourVector::ZERO),
    ]);
    let mut d = driver(
        WindowMedium::from_edges(&[0.0, 1.0], 0.3),
        KickTransport::default(),
        EvolutionConfig::default(),
        ensemble,
    );
    d.evolve().unwrap();
    let ens = d.ensemble();
    assert_ne!(ens.events[0].plist[0].p, ens.events[1].plist[0].p);
}

#[test]
fn kernel_failure_aborts_with_event_index() {
    let ensemble = Ensemble::new(vec![
        Event::new(vec![parton(10.0, 0.0, 0.0)], 1.0, 0.4, 0.0, FourVector::ZERO),
        Event::new(vec![parton(10.0, 0.0, 0.0)], 1.0, 0.4, 0.0, FourVector::ZERO),
    ]);
    let mut d = driver(
        two_windows(0.3),
        FailingTransport::new(1),
        EvolutionConfig::default(),
        ensemble,
    );
    match d.evolve() {
        Err(EvolutionError::Transport {
            event: 1,
            kernel,
            source: TransportError::ExecutionFailed { .. },
        }) => assert_eq!(kernel, "failing"),
        other => panic!("expected Transport error in event 1, got {other:?}"),
    }
}

#[test]
fn nan_temperature_is_reported_not_panicked() {
    let medium = WindowMedium::with_profile(vec![(0.0, 5.0)], Box::new(|_, _| f64::NAN));
    let kernel = ThermalDrag::builder()
        .table(CoefficientTable::from_points(vec![(0.1, 1.0), (0.5, 2.0)]).unwrap())
        .build()
        .unwrap();
    let mut d = driver(
        medium,
        kernel,
        EvolutionConfig::default(),
        single_event(vec![parton(10.0, 1.0, 0.0)], 1.0),
    );
    match d.evolve() {
        Err(EvolutionError::Transport {
            event: 0,
            source: TransportError::NonFinite { what },
            ..
        }) => assert_eq!(what, "temperature"),
        other => panic!("expected NonFinite temperature, got {other:?}"),
    }
}

#[test]
fn medium_failure_aborts() {
    let medium = two_windows(0.3).failing_at(1);
    let mut d = driver(
        medium,
        AdvanceTransport::default(),
        EvolutionConfig::default(),
        single_event(vec![parton(10.0, 0.0, 0.0)], 1.0),
    );
    match d.evolve() {
        Err(EvolutionError::Medium(MediumError::LoadFailed { .. })) => {}
        other => panic!("expected Medium(LoadFailed), got {other:?}"),
    }
    assert_eq!(d.passes(), 1);
}

#[test]
fn reversed_proper_time_is_rejected() {
    let mut d = driver(
        two_windows(0.3),
        RewindTransport,
        EvolutionConfig::default(),
        single_event(vec![parton(10.0, 2.0, 0.0)], 1.0),
    );
    match d.step() {
        Err(EvolutionError::ProperTimeReversed {
            event: 0,
            before,
            after,
        }) => {
            assert_eq!(before, 2.0);
            assert_eq!(after, 1.0);
        }
        other => panic!("expected ProperTimeReversed, got {other:?}"),
    }
}

#[test]
fn empty_ensemble_still_consumes_medium() {
    let mut d = driver(
        two_windows(0.3),
        AdvanceTransport::default(),
        EvolutionConfig::default(),
        Ensemble::default(),
    );
    let report = d.evolve().unwrap();
    assert_eq!(report.pass_count(), 2);
    assert_eq!(report.total_active(), 0);
    assert_eq!(d.medium().loaded(), 2);
}

#[test]
fn pass_metrics_carry_window() {
    let mut d = driver(
        WindowMedium::uniform(vec![(1.0, 0.5)], 0.3),
        AdvanceTransport::default(),
        EvolutionConfig::default(),
        single_event(vec![parton(10.0, 1.0, 0.0)], 1.0),
    );
    let m = d.step().unwrap().unwrap();
    assert_eq!((m.pass, m.clock, m.width), (1, 1.0, 0.5));
    assert_eq!(m.survivors(), 1);
}
