//! Triangle accumulation under concurrent producers
use super::Triangle;
use std::{
    cell::RefCell,
    sync::{Mutex, PoisonError},
};

/// Destination for triangles produced by [`build_cube`](super::build_cube)
///
/// Emission takes `&self`, so that a single sink can be shared by every task
/// in a parallel build; implementations decide how appends are synchronized.
/// Triangle order is not significant.
pub trait TriangleSink {
    /// Appends a single triangle
    fn emit(&self, tri: Triangle);
}

/// Sink guarded by a single mutex, shared between all workers
///
/// Triangle emission is rare compared to field evaluation (surface versus
/// volume), so the central lock is not a bottleneck.
#[derive(Default, Debug)]
pub struct LockedSink(Mutex<Vec<Triangle>>);

impl LockedSink {
    /// Builds a new empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Unwraps the accumulated triangles
    pub fn into_inner(self) -> Vec<Triangle> {
        self.0.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

impl TriangleSink for LockedSink {
    fn emit(&self, tri: Triangle) {
        // A panicking producer can't leave a half-pushed triangle behind, so
        // the buffer is still usable after poisoning.
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(tri)
    }
}

/// Unsynchronized sink owned by a single worker
///
/// Per-worker sinks are concatenated once the build is done.
#[derive(Default, Debug)]
pub struct LocalSink(RefCell<Vec<Triangle>>);

impl LocalSink {
    /// Builds a new empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of triangles accumulated so far
    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    /// Checks whether the sink is empty
    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// Unwraps the accumulated triangles
    pub fn into_inner(self) -> Vec<Triangle> {
        self.0.into_inner()
    }
}

impl TriangleSink for LocalSink {
    fn emit(&self, tri: Triangle) {
        self.0.borrow_mut().push(tri)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use nalgebra::Vector3;
    use rayon::prelude::*;

    fn tri(i: usize) -> Triangle {
        let v = Vector3::new(i as f32, 0.0, 0.0);
        [v, v, v]
    }

    #[test]
    fn locked_sink_is_shared() {
        let sink = LockedSink::new();
        (0..1000).into_par_iter().for_each(|i| sink.emit(tri(i)));
        let mut out: Vec<usize> =
            sink.into_inner().iter().map(|t| t[0].x as usize).collect();
        out.sort();
        assert_eq!(out, (0..1000).collect::<Vec<_>>());
    }

    #[test]
    fn local_sink() {
        let sink = LocalSink::new();
        assert!(sink.is_empty());
        sink.emit(tri(1));
        sink.emit(tri(2));
        assert_eq!(sink.len(), 2);
        assert_eq!(sink.into_inner(), vec![tri(1), tri(2)]);
    }
}
