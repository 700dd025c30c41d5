//! Scalar fields and the point-set distance field
//!
//! A [`Field`] maps a position in world space to a scalar value; the surface
//! is the set of positions where that value equals the isolevel.  Meshing with
//! octree pruning relies on the field being **1-Lipschitz**, i.e.
//! `|f(a) - f(b)| <= |a - b|` for any two positions, which is what lets a
//! single sample at a cell's center bound the value everywhere in the cell.
//!
//! [`PointSet`] is the distance field of a finite set of sample points:
//! ```
//! use isomesh::field::{Field, PointSet};
//! use nalgebra::Vector3;
//!
//! let points = PointSet::new(vec![
//!     Vector3::new(0.0, 0.0, 0.0),
//!     Vector3::new(4.0, 0.0, 0.0),
//! ]);
//! assert_eq!(points.eval(Vector3::new(1.0, 0.0, 0.0)), 1.0);
//! assert_eq!(points.eval(Vector3::new(4.0, 3.0, 0.0)), 3.0);
//! ```
use crate::Error;
use nalgebra::Vector3;
use std::io::BufRead;

/// A scalar field which can be sampled at arbitrary positions
///
/// Implementations are shared between every worker thread during a build, so
/// they must be `Sync` and evaluation must not mutate anything.
pub trait Field: Sync {
    /// Evaluates the field at the given world-space position
    fn eval(&self, pos: Vector3<f32>) -> f32;
}

impl<F: Field + ?Sized> Field for &F {
    fn eval(&self, pos: Vector3<f32>) -> f32 {
        (**self).eval(pos)
    }
}

/// Immutable set of sample points, evaluated as a distance field
///
/// The field value at a position is the Euclidean distance to the nearest
/// point.  An empty set evaluates to `f32::INFINITY` everywhere, so it never
/// produces any geometry.
#[derive(Clone, Debug, Default)]
pub struct PointSet {
    points: Vec<Vector3<f32>>,
}

impl From<Vec<Vector3<f32>>> for PointSet {
    fn from(points: Vec<Vector3<f32>>) -> Self {
        Self::new(points)
    }
}

impl PointSet {
    /// Builds a new point set
    pub fn new(points: Vec<Vector3<f32>>) -> Self {
        Self { points }
    }

    /// Parses a point set from text
    ///
    /// Each line contains three whitespace-separated coordinates.  Blank lines
    /// and lines starting with `#` are skipped.
    ///
    /// ```
    /// use isomesh::field::PointSet;
    ///
    /// let text = "# two points\n0 0 0\n\n1.5 2 -3\n";
    /// let points = PointSet::from_text(text.as_bytes())?;
    /// assert_eq!(points.len(), 2);
    /// # Ok::<(), isomesh::Error>(())
    /// ```
    pub fn from_text<R: std::io::Read>(r: R) -> Result<Self, Error> {
        let reader = std::io::BufReader::new(r);
        let mut points = vec![];
        for (i, line) in reader.lines().enumerate() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let bad = || Error::BadPoint {
                line: i + 1,
                text: line.clone(),
            };
            let mut coords = [0f32; 3];
            let mut iter = trimmed.split_whitespace();
            for c in coords.iter_mut() {
                *c = iter
                    .next()
                    .and_then(|s| s.parse().ok())
                    .ok_or_else(bad)?;
            }
            if iter.next().is_some() {
                return Err(bad());
            }
            if !coords.iter().all(|c| c.is_finite()) {
                return Err(Error::NonFinitePoint(i + 1));
            }
            points.push(Vector3::from(coords));
        }
        Ok(Self { points })
    }

    /// Returns the points in this set
    pub fn points(&self) -> &[Vector3<f32>] {
        &self.points
    }

    /// Returns the number of points in this set
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Checks whether this set is empty
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns the axis-aligned bounds of the set as `(min, max)`
    pub fn bounds(&self) -> Option<(Vector3<f32>, Vector3<f32>)> {
        let first = *self.points.first()?;
        Some(self.points[1..].iter().fold((first, first), |(lo, hi), p| {
            (lo.inf(p), hi.sup(p))
        }))
    }

    /// Picks a grid resolution for a grid rooted at the origin
    ///
    /// The returned resolution makes `[0, grid_size * resolution]` reach the
    /// largest coordinate of any point plus `iso_level`, so that every
    /// surface around points in the positive octant fits in the grid.
    ///
    /// Returns `None` if the set is empty or has no positive extent.
    pub fn fit_resolution(&self, grid_size: u32, iso_level: f32) -> Option<f32> {
        let (_lo, hi) = self.bounds()?;
        let extent = hi.max() + iso_level.max(0.0);
        (extent > 0.0 && grid_size > 0).then(|| extent / grid_size as f32)
    }
}

impl Field for PointSet {
    fn eval(&self, pos: Vector3<f32>) -> f32 {
        // Squared distances are compared so that we only take one square root
        self.points
            .iter()
            .map(|p| (pos - p).norm_squared())
            .fold(f32::INFINITY, f32::min)
            .sqrt()
    }
}
