//! Build statistics
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};

/// Summary of the work done by a single build
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Stats {
    /// Number of cells visited, including pruned cells and leaves
    pub visited: u64,
    /// Number of cells culled without building any geometry
    pub pruned: u64,
    /// Number of unit cubes passed to the cube builder
    pub cubes: u64,
    /// Deepest octree level reached, with the root at level 0
    pub depth: u32,
}

/// Counters shared by every task in a build
///
/// All updates are relaxed; the counters are only read once the build has
/// finished, and never influence traversal.
#[derive(Debug, Default)]
pub(crate) struct Counters {
    visited: AtomicU64,
    pruned: AtomicU64,
    cubes: AtomicU64,
    depth: AtomicU32,
}

impl Counters {
    pub fn visit(&self, depth: u32) {
        self.visited.fetch_add(1, Ordering::Relaxed);
        self.depth.fetch_max(depth, Ordering::Relaxed);
    }

    pub fn prune(&self) {
        self.pruned.fetch_add(1, Ordering::Relaxed);
    }

    pub fn cube(&self) {
        self.cubes.fetch_add(1, Ordering::Relaxed);
    }

    pub fn get(&self) -> Stats {
        Stats {
            visited: self.visited.load(Ordering::Relaxed),
            pruned: self.pruned.load(Ordering::Relaxed),
            cubes: self.cubes.load(Ordering::Relaxed),
            depth: self.depth.load(Ordering::Relaxed),
        }
    }
}
