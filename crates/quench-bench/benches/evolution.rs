//! Criterion benchmarks for ensemble construction and medium passes.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use quench_bench::{reference_ensemble, reference_kernel, reference_medium};
use quench_core::TriggerBins;
use quench_engine::{build_ensemble, BuilderConfig, EvolutionConfig, EvolutionDriver};
use quench_kernels::ThermalDrag;
use quench_sources::{BjorkenMedium, PowerLawGenerator};
use quench_transport::TransportParams;

fn driver(parallel: bool) -> EvolutionDriver<BjorkenMedium, ThermalDrag> {
    let config = EvolutionConfig {
        record_currents: true,
        parallel,
        seed: 42,
        ..EvolutionConfig::default()
    };
    EvolutionDriver::new(
        reference_medium().unwrap(),
        reference_kernel().unwrap(),
        TransportParams::default(),
        config,
        reference_ensemble(20, 42).unwrap(),
    )
    .unwrap()
}

fn bench_build(c: &mut Criterion) {
    let bins = TriggerBins::hadron();
    let config = BuilderConfig {
        events_per_bin: 20,
        ..BuilderConfig::default()
    };
    c.bench_function("build_hadron_bins_20", |b| {
        b.iter(|| {
            black_box(build_ensemble(&bins, &config, |_| PowerLawGenerator::new(2.0, 6.0)).unwrap())
        });
    });
}

fn bench_first_pass(c: &mut Criterion) {
    let mut group = c.benchmark_group("first_pass");
    for (name, parallel) in [("sequential", false), ("parallel", true)] {
        group.bench_function(name, |b| {
            b.iter_batched(
                || driver(parallel),
                |mut d| black_box(d.step().unwrap()),
                BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

fn bench_full_evolution(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_evolution");
    group.sample_size(10);
    group.bench_function("parallel", |b| {
        b.iter_batched(
            || driver(true),
            |mut d| black_box(d.evolve().unwrap()),
            BatchSize::LargeInput,
        );
    });
    group.finish();
}

criterion_group!(benches, bench_build, bench_first_pass, bench_full_evolution);
criterion_main!(benches);
