//! Benchmarks for the simulate facade and the projection curve.

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use lumisim_core::{
    AreaDomain, ReferenceDataset, ReferenceRow, RoomType, SimulationRequest, Simulator,
    SimulatorConfig, Technology, UncertaintyMode,
};
use rand::{rngs::SmallRng, SeedableRng};

fn reference_rows(count: usize) -> Arc<ReferenceDataset> {
    Arc::new(
        (0..count)
            .map(|i| ReferenceRow {
                area: 8.0 + (i % 90) as f64,
                room_type: RoomType::ALL[i % 3],
                technology: if i % 2 == 0 { Technology::Led } else { Technology::Fluorescent },
                observed_lumens: 2_000.0 + (i % 90) as f64 * 850.0,
            })
            .collect(),
    )
}

fn bench_simulate_fixed(c: &mut Criterion) {
    let simulator = Simulator::new(SimulatorConfig::default()).unwrap();
    let request = SimulationRequest::new(35.0, RoomType::Classroom, Technology::Led);

    c.bench_function("simulate_fixed_band", |b| {
        b.iter(|| simulator.simulate(black_box(&request)).unwrap())
    });
}

fn bench_simulate_bootstrap(c: &mut Criterion) {
    let mut group = c.benchmark_group("simulate_bootstrap");
    let request = SimulationRequest::new(35.0, RoomType::Office, Technology::Fluorescent);
    let dataset = reference_rows(400);

    for iterations in [100, 200, 500].iter() {
        let simulator = Simulator::with_reference(
            SimulatorConfig {
                uncertainty: UncertaintyMode::Bootstrap {
                    iterations: *iterations,
                },
                ..SimulatorConfig::default()
            },
            Arc::clone(&dataset),
        )
        .unwrap();
        let mut rng = SmallRng::seed_from_u64(42);

        group.bench_with_input(BenchmarkId::from_parameter(iterations), iterations, |b, _| {
            b.iter(|| {
                simulator
                    .simulate_with(black_box(&request), &mut rng)
                    .unwrap()
            });
        });
    }

    group.finish();
}

fn bench_projection(c: &mut Criterion) {
    let mut group = c.benchmark_group("projection_curve");
    let simulator = Simulator::new(SimulatorConfig::default()).unwrap();
    let request = SimulationRequest::new(37.5, RoomType::MeetingRoom, Technology::Led);
    let domain = AreaDomain::new(5.0, 200.0).unwrap();

    for samples in [50, 200, 1000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(samples), samples, |b, &n| {
            b.iter(|| simulator.projection(black_box(&request), domain, n).unwrap());
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_simulate_fixed,
    bench_simulate_bootstrap,
    bench_projection
);
criterion_main!(benches);
