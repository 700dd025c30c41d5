//! Types used in configuration structures
use crate::Error;

/// Thread pool to use for multithreaded meshing
///
/// Most users will use the global Rayon pool, but it's possible to provide your
/// own as well.
pub enum ThreadPool {
    /// User-provided pool
    Custom(rayon::ThreadPool),
    /// Global Rayon pool
    Global,
}

impl ThreadPool {
    /// Runs a function across the thread pool
    pub fn run<F: FnOnce() -> V + Send, V: Send>(&self, f: F) -> V {
        match self {
            ThreadPool::Custom(p) => p.install(f),
            ThreadPool::Global => f(),
        }
    }

    /// Returns the number of threads in the pool
    pub fn thread_count(&self) -> usize {
        match self {
            ThreadPool::Custom(p) => p.current_num_threads(),
            ThreadPool::Global => rayon::current_num_threads(),
        }
    }
}

/// Settings when building a mesh
pub struct Settings<'a> {
    /// Number of unit cells along each axis of the grid
    ///
    /// This must be a power of two, so that octree cells can be halved all
    /// the way down to unit cells.
    pub grid_size: u32,

    /// Field value defining the surface
    pub iso_level: f32,

    /// World-space edge length of a single unit cell
    ///
    /// The grid spans `[0, grid_size * resolution]` on every axis.
    pub resolution: f32,

    /// Largest octree cell which is subdivided without spawning tasks
    ///
    /// Cells with an edge length (in unit cells) above this value process
    /// their 8 children as parallel tasks; smaller cells recurse inline on the
    /// calling thread.
    pub task_cutoff: u32,

    /// Thread pool to use for meshing
    ///
    /// If this is `None`, then meshing is done in a single thread; otherwise,
    /// the provided pool is used.
    pub threads: Option<&'a ThreadPool>,
}

impl Default for Settings<'_> {
    fn default() -> Self {
        Self {
            grid_size: 64,
            iso_level: 0.15,
            resolution: 1.0 / 64.0,
            task_cutoff: 2,
            threads: Some(&ThreadPool::Global),
        }
    }
}

impl Settings<'_> {
    /// Checks that the settings describe a valid grid
    pub fn validate(&self) -> Result<(), Error> {
        if !self.grid_size.is_power_of_two() {
            Err(Error::BadGridSize(self.grid_size))
        } else if !self.iso_level.is_finite() {
            Err(Error::BadIsoLevel(self.iso_level))
        } else if !(self.resolution.is_finite() && self.resolution > 0.0) {
            Err(Error::BadResolution(self.resolution))
        } else {
            Ok(())
        }
    }
}
