use criterion::{criterion_group, criterion_main, Criterion};
use rand::SeedableRng;
use std::hint::black_box;

use sparkles_sim::physic_engine::config::PhysicConfig;
use sparkles_sim::physic_engine::physic_engine_sparkles::{
    PhysicEngineSparkles, PhysicEngineTestHelpers,
};
use sparkles_sim::physic_engine::PhysicEngine;

fn bench_update(c: &mut Criterion) {
    for population in [100usize, 1_000, 10_000] {
        c.bench_function(&format!("update_{}_sparkles", population), |b| {
            let mut engine = PhysicEngineSparkles::with_rng(
                &PhysicConfig::default(),
                rand::rngs::StdRng::seed_from_u64(42),
            );
            engine.set_active(true);
            engine.force_spawn(population);

            b.iter(|| {
                let result = engine.update();
                // maintient la population à peu près constante
                engine.force_spawn(result.expired);
                black_box(result)
            });
        });
    }
}

criterion_group!(benches, bench_update);
criterion_main!(benches);
