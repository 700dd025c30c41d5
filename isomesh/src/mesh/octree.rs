//! Octree-pruned marching cubes
//!
//! The grid is walked as an implicit octree: each cell samples the field once
//! at its center and is culled if the surface provably can't pass through it.
//! Surviving cells are split into 8 octants, down to unit cubes, which are
//! handed to [`build_cube`].
//!
//! Large cells process their octants as parallel tasks; once cells shrink to
//! [`Settings::task_cutoff`], the rest of the subtree runs inline.
use super::{
    Mesh, Settings,
    cube::{Grid, build_cube},
    sink::{LockedSink, TriangleSink},
    stats::{Counters, Stats},
    types::Corner,
};
use crate::{Error, field::Field};
use log::{debug, trace};
use nalgebra::Vector3;

/// Half of the diagonal of a unit cube
const HALF_DIAGONAL: f64 = 0.866_025_403_784_438_6;

/// Relative rounding error allowed in the prune test, in units of `f32` epsilon
const PRUNE_SLACK: f64 = 8.0;

/// Recursive octree traversal over a shared field and triangle sink
pub struct Octree<'a, F: ?Sized, S: ?Sized> {
    grid: Grid,
    field: &'a F,
    sink: &'a S,
    task_cutoff: u32,
    parallel: bool,
    stats: Counters,
}

impl<'a, F, S> Octree<'a, F, S>
where
    F: Field + ?Sized,
    S: TriangleSink + Sync + ?Sized,
{
    /// Builds a new traverser
    ///
    /// The settings are not validated here; callers which build their own
    /// traverser must pass a power-of-two size to [`Octree::traverse`].
    pub fn new(field: &'a F, sink: &'a S, settings: &Settings) -> Self {
        Self {
            grid: settings.into(),
            field,
            sink,
            task_cutoff: settings.task_cutoff,
            parallel: settings.threads.is_some(),
            stats: Counters::default(),
        }
    }

    /// Processes the cell with the given origin and size (in grid units)
    ///
    /// Returns the number of triangles sent to the sink by this cell and all
    /// of its descendants.
    ///
    /// `size` must be a power of two.  Cells larger than the grid are
    /// recorded at depth 0 in [`Octree::stats`].
    pub fn traverse(&self, origin: Vector3<u32>, size: u32) -> usize {
        debug_assert!(size.is_power_of_two());
        let depth = self
            .grid
            .size
            .trailing_zeros()
            .saturating_sub(size.trailing_zeros());
        self.stats.visit(depth);

        if self.prunable(origin, size) {
            self.stats.prune();
            return 0;
        }

        if size == 1 {
            self.stats.cube();
            return build_cube(&self.grid, self.field, origin, self.sink);
        }

        let half = size / 2;
        let child = |c: Corner| self.traverse(origin + c.offset() * half, half);
        if self.parallel && size > self.task_cutoff {
            use rayon::prelude::*;
            Corner::par_iter().map(child).sum()
        } else {
            Corner::iter().map(child).sum()
        }
    }

    /// Checks whether the surface can't pass through the given cell
    ///
    /// The field is 1-Lipschitz, so no point in the cell is further than half
    /// a diagonal away from the center.  The bound is widened by a few ulps of
    /// the magnitudes involved, so that rounding in the field or in the
    /// center position never culls a cell with a corner below the isolevel;
    /// exact ties are never pruned.
    fn prunable(&self, origin: Vector3<u32>, size: u32) -> bool {
        let size_f = size as f32;
        let center = self
            .grid
            .world(origin)
            .add_scalar(size_f * self.grid.resolution / 2.0);
        let iso = f64::from(self.grid.iso_level);
        let reach =
            HALF_DIAGONAL * f64::from(size) * f64::from(self.grid.resolution);
        let scale = iso.abs() + reach + 2.0 * f64::from(center.amax());
        let slack = scale * PRUNE_SLACK * f64::from(f32::EPSILON);
        f64::from(self.field.eval(center)) > iso + reach + slack
    }

    /// Returns statistics for all traversals run so far
    pub fn stats(&self) -> Stats {
        self.stats.get()
    }
}

impl<F: Field + ?Sized> Octree<'_, F, LockedSink> {
    /// Builds a mesh of the isosurface of `field`
    ///
    /// The traversal starts at the root cell, which covers the whole grid,
    /// and runs in the thread pool from `settings` (or on the calling thread
    /// if there is no pool).
    ///
    /// # Errors
    /// If the settings are invalid; nothing is evaluated in that case
    pub fn build(field: &F, settings: &Settings) -> Result<Mesh, Error> {
        settings.validate()?;
        debug!(
            "octree build: grid {}, iso level {}, resolution {}, cutoff {}",
            settings.grid_size,
            settings.iso_level,
            settings.resolution,
            settings.task_cutoff,
        );

        let sink = LockedSink::new();
        let octree = Octree::new(field, &sink, settings);
        let root = || octree.traverse(Vector3::zeros(), settings.grid_size);
        let count = match settings.threads {
            Some(pool) => {
                trace!("running in pool with {} threads", pool.thread_count());
                pool.run(root)
            }
            None => root(),
        };
        let stats = octree.stats();
        debug!("octree build done: {count} triangles, {stats:?}");

        let triangles = sink.into_inner();
        debug_assert_eq!(count, triangles.len());
        Ok(Mesh { triangles, stats })
    }
}
