use criterion::{
    BenchmarkId, Criterion, black_box, criterion_group, criterion_main,
};
use isomesh::{
    field::PointSet,
    mesh::{Octree, Settings, Sweep, ThreadPool},
};
use nalgebra::Vector3;

/// Builds a deterministic cloud of points along a helix
fn helix(n: usize) -> PointSet {
    PointSet::new(
        (0..n)
            .map(|i| {
                let t = i as f32 / n as f32;
                let a = t * std::f32::consts::TAU * 3.0;
                Vector3::new(
                    0.5 + 0.3 * a.cos(),
                    0.5 + 0.3 * a.sin(),
                    0.1 + 0.8 * t,
                )
            })
            .collect(),
    )
}

pub fn helix_octree_thread_sweep(c: &mut Criterion) {
    let points = &helix(256);
    let pools = [1, 2, 4, 8].map(|n| {
        ThreadPool::Custom(
            rayon::ThreadPoolBuilder::new()
                .num_threads(n)
                .build()
                .unwrap(),
        )
    });
    let mut group = c.benchmark_group("speed vs threads (helix, octree) (64)");
    let pools = std::iter::once(None).chain(pools.iter().map(Some));
    for threads in pools {
        let cfg = &Settings {
            grid_size: 64,
            iso_level: 0.05,
            resolution: 1.0 / 64.0,
            threads,
            ..Default::default()
        };
        let n = threads.map(|t| t.thread_count()).unwrap_or(0);
        group.bench_function(BenchmarkId::new("octree", n), move |b| {
            b.iter(|| black_box(Octree::build(points, cfg)))
        });
    }
}

pub fn helix_octree_vs_sweep(c: &mut Criterion) {
    let points = &helix(64);
    let mut group = c.benchmark_group("octree vs sweep (helix)");
    for grid_size in [16, 32, 64] {
        let cfg = &Settings {
            grid_size,
            iso_level: 0.05,
            resolution: 1.0 / grid_size as f32,
            ..Default::default()
        };
        group.bench_function(BenchmarkId::new("octree", grid_size), move |b| {
            b.iter(|| black_box(Octree::build(points, cfg)))
        });
        group.bench_function(BenchmarkId::new("sweep", grid_size), move |b| {
            b.iter(|| black_box(Sweep::build(points, cfg)))
        });
    }
}

criterion_group!(benches, helix_octree_thread_sweep, helix_octree_vs_sweep);
criterion_main!(benches);
