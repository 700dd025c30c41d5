use isomesh::{
    field::PointSet,
    mesh::{Mesh, Octree, Settings, Stats, Sweep, ThreadPool},
};
use nalgebra::Vector3;

/// Unit-resolution grid with an isolevel of 0.5, built on a single thread
fn settings(grid_size: u32) -> Settings<'static> {
    Settings {
        grid_size,
        iso_level: 0.5,
        resolution: 1.0,
        threads: None,
        ..Default::default()
    }
}

/// Returns the mesh's triangles as sorted raw bits, for exact comparison
fn canonical(mesh: &Mesh) -> Vec<[u32; 9]> {
    let mut out: Vec<[u32; 9]> = mesh
        .triangles
        .iter()
        .map(|t| {
            let mut bits = [0; 9];
            for (i, v) in t.iter().enumerate() {
                for (j, c) in v.iter().enumerate() {
                    bits[i * 3 + j] = c.to_bits();
                }
            }
            bits
        })
        .collect();
    out.sort_unstable();
    out
}

fn cloud() -> PointSet {
    PointSet::new(vec![
        Vector3::new(0.5, 0.75, 1.0),
        Vector3::new(1.25, 1.0, 0.625),
        Vector3::new(1.5, 1.5, 1.5),
        Vector3::new(0.375, 1.625, 0.5),
        Vector3::new(1.0, 0.25, 1.75),
    ])
}

fn cloud_settings<'a>(threads: Option<&'a ThreadPool>) -> Settings<'a> {
    Settings {
        grid_size: 16,
        iso_level: 0.3,
        resolution: 2.0 / 16.0,
        threads,
        ..Default::default()
    }
}

#[test]
fn test_centered_point() {
    // Only the 8 unit cells touching the point survive pruning, and each of
    // them holds a single corner of the sphere
    let points = PointSet::new(vec![Vector3::new(2.0, 2.0, 2.0)]);
    let mesh = Octree::build(&points, &settings(4)).unwrap();
    assert_eq!(mesh.triangle_count(), 8);
    assert_eq!(
        mesh.stats,
        Stats {
            visited: 1 + 8 + 64,
            pruned: 56,
            cubes: 8,
            depth: 2,
        }
    );
}

#[test]
fn test_off_center_point() {
    // Top-level octants which are too far from the point are pruned without
    // being subdivided
    let points = PointSet::new(vec![Vector3::new(1.0, 1.0, 1.0)]);
    let mesh = Octree::build(&points, &settings(4)).unwrap();
    assert_eq!(mesh.triangle_count(), 8);
    assert_eq!(
        mesh.stats,
        Stats {
            visited: 1 + 8 + 4 * 8,
            pruned: 4 + 24,
            cubes: 8,
            depth: 2,
        }
    );
}

#[test]
fn test_empty_point_set() {
    let mesh = Octree::build(&PointSet::default(), &settings(64)).unwrap();
    assert_eq!(mesh.triangle_count(), 0);
    assert_eq!(
        mesh.stats,
        Stats {
            visited: 1,
            pruned: 1,
            cubes: 0,
            depth: 0,
        }
    );
}

#[test]
fn test_single_cell_grid() {
    let points = PointSet::new(vec![Vector3::new(0.0, 0.0, 0.0)]);
    let mesh = Octree::build(&points, &settings(1)).unwrap();
    assert_eq!(mesh.triangle_count(), 1);
    assert_eq!(
        mesh.stats,
        Stats {
            visited: 1,
            pruned: 0,
            cubes: 1,
            depth: 0,
        }
    );
}

#[test]
fn test_no_pruning() {
    // With a huge isolevel, nothing is pruned; every corner is inside, so no
    // triangles are built either
    let points = PointSet::new(vec![Vector3::new(2.0, 2.0, 2.0)]);
    let s = Settings {
        iso_level: 100.0,
        ..settings(4)
    };
    let mesh = Octree::build(&points, &s).unwrap();
    assert_eq!(mesh.triangle_count(), 0);
    assert_eq!(
        mesh.stats,
        Stats {
            visited: 73,
            pruned: 0,
            cubes: 64,
            depth: 2,
        }
    );
}

#[test]
fn test_sphere_vertices() {
    let center = Vector3::new(1.0, 1.0, 1.0);
    let points = PointSet::new(vec![center]);
    let s = Settings {
        grid_size: 16,
        iso_level: 0.25,
        resolution: 2.0 / 16.0,
        threads: None,
        ..Default::default()
    };
    let mesh = Octree::build(&points, &s).unwrap();
    assert!(mesh.triangle_count() > 0);
    for t in &mesh.triangles {
        for v in t {
            let n = (v - center).norm();
            assert!(n > 0.2 && n < 0.3, "invalid vertex at {v:?}: {n}");
        }
    }
}

#[test]
fn test_octree_matches_sweep() {
    let points = cloud();
    let octree = Octree::build(&points, &cloud_settings(None)).unwrap();
    let sweep = Sweep::build(&points, &cloud_settings(None)).unwrap();
    assert!(octree.triangle_count() > 0);
    assert_eq!(octree.triangle_count(), sweep.triangle_count());
    assert_eq!(canonical(&octree), canonical(&sweep));

    // The octree should do much less work
    assert_eq!(sweep.stats.cubes, 16 * 16 * 16);
    assert!(octree.stats.cubes < sweep.stats.cubes);
}

#[test]
fn test_octree_matches_sweep_near_ties() {
    // Points along cell diagonals, with isolevels at and around the distance
    // to the nearest grid corner, put cells right at the prune bound
    let resolution = 0.25;
    for i in 1..200 {
        let t = 0.5 + i as f32 * 0.00731;
        let p = Vector3::new(t, t, t);
        let points = PointSet::new(vec![p, Vector3::new(t, 2.0 - t, 0.75)]);
        let corner = (p / resolution).map(f32::round) * resolution;
        let d = (p - corner).norm();
        for iso_level in [d.next_down(), d, d.next_up(), d + resolution] {
            if iso_level <= 0.0 {
                continue;
            }
            let s = Settings {
                grid_size: 8,
                iso_level,
                resolution,
                threads: None,
                ..Default::default()
            };
            let octree = Octree::build(&points, &s).unwrap();
            let sweep = Sweep::build(&points, &s).unwrap();
            assert_eq!(
                canonical(&octree),
                canonical(&sweep),
                "mismatch at t = {t}, iso level = {iso_level}"
            );
        }
    }
}

#[test]
fn test_thread_count_independence() {
    let points = cloud();
    let expected =
        canonical(&Octree::build(&points, &cloud_settings(None)).unwrap());

    let global = ThreadPool::Global;
    let mut pools = vec![&global];
    let custom: Vec<ThreadPool> = [1, 2, 4, 8]
        .into_iter()
        .map(|n| {
            ThreadPool::Custom(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(n)
                    .build()
                    .unwrap(),
            )
        })
        .collect();
    pools.extend(custom.iter());

    for pool in pools {
        let threads = pool.thread_count();
        for task_cutoff in [1, 2, 4] {
            let s = Settings {
                task_cutoff,
                ..cloud_settings(Some(pool))
            };
            let octree = Octree::build(&points, &s).unwrap();
            assert_eq!(
                canonical(&octree),
                expected,
                "octree mismatch with {threads} threads, cutoff {task_cutoff}"
            );
        }
        let sweep = Sweep::build(&points, &cloud_settings(Some(pool))).unwrap();
        assert_eq!(
            canonical(&sweep),
            expected,
            "sweep mismatch with {threads} threads"
        );
    }
}

#[test]
fn test_write_built_mesh() {
    let points = cloud();
    let mesh = Octree::build(&points, &cloud_settings(None)).unwrap();
    let mut stl = vec![];
    mesh.write_stl(&mut stl).unwrap();
    assert_eq!(stl.len(), 84 + 50 * mesh.triangle_count());

    let mut obj = vec![];
    mesh.write_obj(&mut obj).unwrap();
    let text = String::from_utf8(obj).unwrap();
    assert_eq!(text.lines().count(), 4 * mesh.triangle_count());
}
