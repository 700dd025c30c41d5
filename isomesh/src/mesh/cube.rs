//! Single-cube marching cubes
use super::{
    Settings, Triangle,
    sink::TriangleSink,
    tables::{EDGE_TABLE, TRI_TABLE},
    types::{CellMask, Corner, Edge},
};
use crate::field::Field;
use nalgebra::Vector3;

/// Immutable sampling grid shared by every cell in a build
///
/// The grid spans `[0, size]` cells on each axis, starting at the origin;
/// a grid position `p` maps to the world position `p * resolution`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Grid {
    /// Number of unit cells along each axis
    pub size: u32,
    /// Field value defining the surface
    pub iso_level: f32,
    /// World-space edge length of one unit cell
    pub resolution: f32,
}

impl From<&Settings<'_>> for Grid {
    fn from(s: &Settings) -> Self {
        Self {
            size: s.grid_size,
            iso_level: s.iso_level,
            resolution: s.resolution,
        }
    }
}

impl Grid {
    /// Converts a grid position to world space
    pub fn world(&self, p: Vector3<u32>) -> Vector3<f32> {
        p.cast::<f32>() * self.resolution
    }

    /// Interpolates the isolevel crossing between two samples
    ///
    /// `va` and `vb` must lie on opposite sides of the isolevel.
    fn crossing(
        &self,
        a: Vector3<f32>,
        b: Vector3<f32>,
        va: f32,
        vb: f32,
    ) -> Vector3<f32> {
        let t = (self.iso_level - va) / (vb - va);
        a + (b - a) * t
    }
}

/// Builds triangles for the unit cube at `origin` (in grid coordinates)
///
/// Samples the field at the cube's 8 corners, classifies them against the
/// isolevel (a corner is inside when its value is strictly below it), and
/// sends between 0 and 5 triangles to `sink`.  Returns the number of
/// triangles emitted.
pub fn build_cube<F, S>(
    grid: &Grid,
    field: &F,
    origin: Vector3<u32>,
    sink: &S,
) -> usize
where
    F: Field + ?Sized,
    S: TriangleSink + ?Sized,
{
    let mut pos = [Vector3::zeros(); 8];
    let mut value = [0f32; 8];
    let mut mask = CellMask::new(0);
    for c in Corner::iter() {
        let p = grid.world(origin + c.offset());
        let v = field.eval(p);
        pos[c.index()] = p;
        value[c.index()] = v;
        if v < grid.iso_level {
            mask = mask.with(c);
        }
    }

    let edges = EDGE_TABLE[mask.index()];
    if edges == 0 {
        return 0;
    }

    let mut verts = [Vector3::zeros(); 12];
    for e in Edge::iter().filter(|e| edges & (1 << e.index()) != 0) {
        let (a, b) = e.corners();
        verts[e.index()] = grid.crossing(
            pos[a.index()],
            pos[b.index()],
            value[a.index()],
            value[b.index()],
        );
    }

    let tris: arrayvec::ArrayVec<Triangle, 5> = TRI_TABLE[mask.index()]
        .chunks_exact(3)
        .take_while(|t| t[0] != -1)
        .map(|t| [t[0], t[1], t[2]].map(|e| verts[e as usize]))
        .collect();
    for t in &tris {
        sink.emit(*t);
    }
    tris.len()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{field::PointSet, mesh::sink::LocalSink};

    const GRID: Grid = Grid {
        size: 1,
        iso_level: 0.5,
        resolution: 1.0,
    };

    #[test]
    fn empty_cube() {
        let sink = LocalSink::new();
        let points = PointSet::new(vec![Vector3::new(10.0, 10.0, 10.0)]);
        assert_eq!(build_cube(&GRID, &points, Vector3::zeros(), &sink), 0);
        assert!(sink.is_empty());

        let points = PointSet::default();
        assert_eq!(build_cube(&GRID, &points, Vector3::zeros(), &sink), 0);
        assert!(sink.is_empty());
    }

    #[test]
    fn full_cube() {
        // Every corner is inside, so there's no surface
        let sink = LocalSink::new();
        let points = PointSet::new(vec![Vector3::new(0.5, 0.5, 0.5)]);
        let grid = Grid {
            iso_level: 1.0,
            ..GRID
        };
        assert_eq!(build_cube(&grid, &points, Vector3::zeros(), &sink), 0);
        assert!(sink.is_empty());
    }

    #[test]
    fn single_corner() {
        let sink = LocalSink::new();
        let points = PointSet::new(vec![Vector3::new(1.0, 1.0, 1.0)]);
        let n = build_cube(&GRID, &points, Vector3::zeros(), &sink);
        assert_eq!(n, 1);

        let tris = sink.into_inner();
        assert_eq!(tris.len(), 1);
        for v in tris[0] {
            // Crossings lie on the three edges leaving corner 6, at the
            // isolevel distance from the point
            let d = (v - Vector3::new(1.0, 1.0, 1.0)).norm();
            approx::assert_relative_eq!(d, 0.5);
            let on_edge = v.iter().filter(|&&c| c == 1.0).count();
            assert_eq!(on_edge, 2, "vertex {v:?} is not on a cube edge");
        }
    }

    #[test]
    fn plane() {
        // A distant point below the cube makes a nearly flat sheet, which
        // crosses only the four vertical edges
        let grid = Grid {
            iso_level: 10.25,
            ..GRID
        };
        let points = PointSet::new(vec![Vector3::new(0.5, 0.5, -10.0)]);
        let sink = LocalSink::new();
        let n = build_cube(&grid, &points, Vector3::zeros(), &sink);
        assert_eq!(n, 2);
        for t in sink.into_inner() {
            for v in t {
                assert!(v.z > 0.0 && v.z < 1.0);
            }
        }
    }

    #[test]
    fn offset_origin() {
        let grid = Grid {
            size: 4,
            resolution: 0.5,
            ..GRID
        };
        let points = PointSet::new(vec![Vector3::new(1.0, 1.0, 1.0)]);
        let sink = LocalSink::new();
        // Cube spanning [1, 1.5] has the point at its corner 0
        let n = build_cube(&grid, &points, Vector3::new(2, 2, 2), &sink);
        assert_eq!(n, 1);
        for v in sink.into_inner()[0] {
            assert!(v.iter().all(|&c| (1.0..=1.5).contains(&c)));
        }
    }
}
