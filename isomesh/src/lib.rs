//! isomesh builds triangle meshes of isosurfaces of scalar fields.
//!
//! A **scalar field** is a function `f(x, y, z)` which maps a position in 3D
//! space to a value.  The **isosurface** at a level `L` is the set of
//! positions where `f(x, y, z) == L`; positions where the field is below `L`
//! are considered **inside** the surface.
//!
//! The main field in this crate is the distance field of a set of points,
//! [`PointSet`](crate::field::PointSet).  Meshing its isosurface at level `L`
//! produces the boundary of the union of spheres of radius `L` around every
//! point, similar to metaballs.
//!
//! # Fields
//! Any type implementing the [`Field`](crate::field::Field) trait can be
//! meshed.  Point sets can be built directly or parsed from text:
//! ```
//! use isomesh::field::{Field, PointSet};
//! use nalgebra::Vector3;
//!
//! let points = PointSet::from_text("0 0 0\n1 0 0\n".as_bytes())?;
//! assert_eq!(points.eval(Vector3::new(0.5, 0.0, 0.0)), 0.5);
//! # Ok::<(), isomesh::Error>(())
//! ```
//!
//! # Meshing
//! Meshing samples the field on a cubic grid, rooted at the origin, and runs
//! marching cubes on every unit cell that may contain part of the surface.
//! The grid is described by [`mesh::Settings`], and walked as an octree by
//! [`mesh::Octree`], which skips empty regions and spreads work across a
//! [`rayon`] thread pool:
//! ```
//! use isomesh::{
//!     field::PointSet,
//!     mesh::{Octree, Settings},
//! };
//! use nalgebra::Vector3;
//!
//! let points = PointSet::new(vec![
//!     Vector3::new(1.0, 1.0, 1.0),
//!     Vector3::new(1.5, 1.0, 1.0),
//! ]);
//! let settings = Settings {
//!     grid_size: 32,
//!     iso_level: 0.4,
//!     resolution: 2.5 / 32.0,
//!     ..Default::default()
//! };
//! let mesh = Octree::build(&points, &settings)?;
//! assert!(mesh.triangle_count() > 0);
//! assert!(mesh.stats.pruned > 0);
//! # Ok::<(), isomesh::Error>(())
//! ```
#![warn(missing_docs)]

mod error;
pub use error::Error;

pub mod field;
pub mod mesh;
