//! Loop-parallel marching cubes, without pruning
//!
//! Every unit cube in the grid is built, so the field is sampled at every
//! corner of every cube.  This is much slower than the [octree
//! mesher](super::Octree), but makes a useful baseline: both produce the same
//! triangles for any field.
use super::{
    Mesh, Settings,
    cube::{Grid, build_cube},
    sink::LocalSink,
    stats::Stats,
};
use crate::{Error, field::Field};
use log::{debug, trace};
use nalgebra::Vector3;
use rayon::prelude::*;

/// Mesher which builds every cube in the grid
pub struct Sweep;

impl Sweep {
    /// Builds a mesh of the isosurface of `field`
    ///
    /// Rows of cubes are distributed across the thread pool from `settings`;
    /// each worker accumulates triangles into its own buffer, and buffers are
    /// concatenated at the end.
    ///
    /// # Errors
    /// If the settings are invalid; nothing is evaluated in that case
    pub fn build<F: Field + ?Sized>(
        field: &F,
        settings: &Settings,
    ) -> Result<Mesh, Error> {
        settings.validate()?;
        let grid = Grid::from(settings);
        let n = grid.size;
        debug!(
            "sweep build: grid {n}, iso level {}, resolution {}",
            grid.iso_level, grid.resolution,
        );

        // Builds a row of cubes along the X axis
        let row = |sink: LocalSink, i: u64| {
            let (y, z) = row_position(i, n);
            for x in 0..n {
                build_cube(&grid, field, Vector3::new(x, y, z), &sink);
            }
            sink
        };
        let rows = 0..u64::from(n) * u64::from(n);
        let triangles = match settings.threads {
            Some(pool) => {
                trace!("running in pool with {} threads", pool.thread_count());
                pool.run(|| {
                    rows.into_par_iter()
                        .fold(LocalSink::new, row)
                        .map(LocalSink::into_inner)
                        .reduce(Vec::new, |mut a, mut b| {
                            a.append(&mut b);
                            a
                        })
                })
            }
            None => rows.fold(LocalSink::new(), row).into_inner(),
        };

        let cubes = u64::from(n).saturating_pow(3);
        let stats = Stats {
            visited: cubes,
            pruned: 0,
            cubes,
            depth: n.trailing_zeros(),
        };
        debug!("sweep build done: {} triangles", triangles.len());
        Ok(Mesh { triangles, stats })
    }
}

/// Returns the `(y, z)` position of the given row of an `n`-cell grid
fn row_position(i: u64, n: u32) -> (u32, u32) {
    let n = u64::from(n);
    // Both are below n, which is a u32
    ((i % n) as u32, (i / n) as u32)
}
