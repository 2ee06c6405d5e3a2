/*
 * Step Benchmark
 *
 * Measures one controller step per behaviour mode at several population
 * sizes. Every force law is an all-pairs neighbour scan, so cost grows with
 * the square of the agent count.
 */

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use swarm_core::{Simulation, SimulationMode, SimulationParameters};

fn bench_modes(c: &mut Criterion) {
    let mut group = c.benchmark_group("step");

    for mode in [
        SimulationMode::Cohesion,
        SimulationMode::Separation,
        SimulationMode::CollisionAvoidance,
        SimulationMode::Leader,
        SimulationMode::CollaborativeAdversarial,
    ] {
        for agents in [40usize, 200, 800] {
            let id = BenchmarkId::new(mode.name(), agents);
            group.bench_with_input(id, &agents, |b, &n| {
                let mut sim = Simulation::new(n, SimulationParameters::default(), 42)
                    .expect("default parameters are valid");
                sim.set_mode(mode);
                sim.resume();
                b.iter(|| {
                    sim.step();
                    black_box(sim.agent_count())
                });
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_modes);
criterion_main!(benches);
