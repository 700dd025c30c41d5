//! Isosurface meshing with octree-pruned marching cubes
//!
//! This module builds a triangle mesh of the surface where a
//! [`Field`](crate::field::Field) equals a chosen isolevel, sampling the field
//! on a cubic grid of unit cells and running marching cubes on each cell.
//!
//! Two meshers are provided:
//! - [`Octree`] walks the grid as an implicit octree, culling cells which
//!   can't contain the surface and processing large cells in parallel
//! - [`Sweep`] builds every cell in the grid with a parallel loop; it's slower,
//!   but serves as a reference for the octree mesher
//!
//! Both produce a [`Mesh`], which is an unindexed triangle soup and can be
//! written out as an STL or OBJ file.
//!
//! Here's a full example:
//!
//! ```
//! use isomesh::{
//!     field::PointSet,
//!     mesh::{Octree, Settings},
//! };
//! use nalgebra::Vector3;
//!
//! let points = PointSet::new(vec![Vector3::new(0.5, 0.5, 0.5)]);
//! let settings = Settings {
//!     grid_size: 16,
//!     iso_level: 0.25,
//!     resolution: 1.0 / 16.0,
//!     ..Default::default()
//! };
//! let mesh = Octree::build(&points, &settings)?;
//! assert!(mesh.triangle_count() > 0);
//!
//! // Open a file to write, e.g.
//! // let mut f = std::fs::File::create("out.stl")?;
//! # let mut f = vec![];
//! mesh.write_stl(&mut f)?;
//! # Ok::<(), isomesh::Error>(())
//! ```

mod config;
mod cube;
mod octree;
mod output;
mod sink;
mod stats;
mod sweep;
mod tables;

#[doc(hidden)]
pub mod types;

pub use config::{Settings, ThreadPool};
pub use cube::{Grid, build_cube};
pub use octree::Octree;
pub use sink::{LocalSink, LockedSink, TriangleSink};
pub use stats::Stats;
pub use sweep::Sweep;

/// A single triangle, as three world-space vertex positions
pub type Triangle = [nalgebra::Vector3<f32>; 3];

/// An unindexed triangle mesh
#[derive(Default, Debug)]
pub struct Mesh {
    /// Triangles, in no particular order
    pub triangles: Vec<Triangle>,
    /// Statistics from the build which produced this mesh
    pub stats: Stats,
}

impl Mesh {
    /// Builds a new empty mesh
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of triangles in the mesh
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }
}
