//! Strongly-typed indexes of cube corners and edges
//!
//! Corners and edges follow the classic marching cubes numbering, which the
//! lookup tables depend on:
//!
//! ```text
//!          7 -------- 6
//!         /|         /|       Z
//!        / |        / |       ^  _ Y
//!       4----------5  |       | /
//!       |  3-------|--2       |/
//!       | /        | /        ---> X
//!       |/         |/
//!       0----------1
//! ```
//!
//! The same corner offsets are used to place the 8 children of an octree cell.
use nalgebra::Vector3;

/// Strongly-typed cube corner, in the `0..8` range
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Corner(u8);

/// Unit offset of each corner from the cube's origin
const CORNER_OFFSETS: [[u32; 3]; 8] = [
    [0, 0, 0],
    [1, 0, 0],
    [1, 1, 0],
    [0, 1, 0],
    [0, 0, 1],
    [1, 0, 1],
    [1, 1, 1],
    [0, 1, 1],
];

impl Corner {
    /// Builds a new corner
    ///
    /// # Panics
    /// If `i >= 8`, which is not a valid corner index
    pub const fn new(i: u8) -> Self {
        assert!(i < 8);
        Self(i)
    }

    /// Returns the value of this corner as an index
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterates over all 8 corners
    pub fn iter() -> impl Iterator<Item = Self> {
        (0..8).map(Corner)
    }

    /// Iterates over all 8 corners in parallel
    pub fn par_iter() -> impl rayon::iter::ParallelIterator<Item = Self> {
        use rayon::prelude::*;
        (0..8u8).into_par_iter().map(Corner)
    }

    /// Returns the unit offset of this corner from the cube's origin
    pub fn offset(self) -> Vector3<u32> {
        CORNER_OFFSETS[self.index()].into()
    }
}

/// Strongly-typed cube edge, in the `0..12` range
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Edge(u8);

/// Endpoints of each edge
const EDGE_CORNERS: [[u8; 2]; 12] = [
    [0, 1],
    [1, 2],
    [2, 3],
    [3, 0],
    [4, 5],
    [5, 6],
    [6, 7],
    [7, 4],
    [0, 4],
    [1, 5],
    [2, 6],
    [3, 7],
];

impl Edge {
    /// Builds a new edge
    ///
    /// # Panics
    /// If `i >= 12`, since that's an invalid edge
    pub const fn new(i: u8) -> Self {
        assert!(i < 12);
        Self(i)
    }

    /// Converts from an edge to an index
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterates over all 12 edges
    pub fn iter() -> impl Iterator<Item = Self> {
        (0..12).map(Edge)
    }

    /// Returns a `(start, end)` tuple for the given edge
    pub fn corners(self) -> (Corner, Corner) {
        let [a, b] = EDGE_CORNERS[self.index()];
        (Corner(a), Corner(b))
    }
}

/// Bitmask of which cube corners are below the isolevel
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct CellMask(u8);

impl CellMask {
    /// Builds a new mask from a bitfield, one bit per corner
    pub fn new(i: u8) -> Self {
        Self(i)
    }

    /// Returns a copy of this mask with the given corner set
    pub fn with(self, c: Corner) -> Self {
        Self(self.0 | (1 << c.0))
    }

    /// Returns the bitmask as an index into the lookup tables
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::ops::BitAnd<Corner> for CellMask {
    type Output = bool;
    fn bitand(self, c: Corner) -> bool {
        (self.0 & (1 << c.index())) != 0
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn edges_are_axis_aligned() {
        for e in Edge::iter() {
            let (a, b) = e.corners();
            let d = a.offset().cast::<i32>() - b.offset().cast::<i32>();
            assert_eq!(d.abs().sum(), 1, "edge {e:?} is not a unit edge");
        }
    }

    #[test]
    fn corners_are_distinct() {
        let mut seen = 0u8;
        for c in Corner::iter() {
            let o = c.offset();
            seen |= 1 << (o.x + 2 * o.y + 4 * o.z);
        }
        assert_eq!(seen, 0xFF);
    }

    #[test]
    fn mask_bits() {
        let m = CellMask::new(0).with(Corner::new(0)).with(Corner::new(6));
        assert_eq!(m.index(), 0b0100_0001);
        assert!(m & Corner::new(6));
        assert!(!(m & Corner::new(5)));
    }
}
