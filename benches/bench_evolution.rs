use criterion::{black_box, criterion_group, criterion_main, Criterion};
use genroute::{
    evolution::{EvolutionLauncher, EvolutionOptions, NoopObserver},
    oracle::{Point, Scene},
    rng::RandomNumberGenerator,
};

fn scene(num_points: usize) -> Scene {
    let mut rng = RandomNumberGenerator::from_seed(num_points as u64);
    let points = (0..num_points)
        .map(|_| Point::new(rng.gen_probability() * 100.0, rng.gen_probability() * 100.0))
        .collect();
    Scene::new(points).unwrap()
}

fn bench_evolution(c: &mut Criterion) {
    let scene = scene(30);

    let mut group = c.benchmark_group("evolution");
    group.sample_size(10);
    for (name, parallel_threshold) in [("sequential", usize::MAX), ("parallel", 1)] {
        for size in [100, 1000].iter() {
            group.bench_function(&format!("{}_{}", name, size), |b| {
                b.iter(|| {
                    let options = EvolutionOptions::builder()
                        .num_points(scene.num_points())
                        .population_size(*size)
                        .num_selected(size / 10)
                        .max_generations(20)
                        .distance_threshold(0.0)
                        .parallel_threshold(parallel_threshold)
                        .build();
                    let mut launcher = EvolutionLauncher::new(
                        black_box(options),
                        &scene,
                        RandomNumberGenerator::from_seed(7),
                    )
                    .unwrap();
                    let result = launcher.run(&mut NoopObserver);
                    assert!(result.is_ok());
                })
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_evolution);
criterion_main!(benches);
