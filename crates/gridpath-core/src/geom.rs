//! Geometry primitives: [`Coord`] and [`Dims`].
//!
//! A [`Coord`] names one cell by column (`x`) and row (`y`). A [`Dims`]
//! describes the extent of a dense `rows x cols` grid anchored at the origin
//! and converts between coordinates and flat row-major indices.

use std::fmt;
use std::ops::{Add, Sub};

// ---------------------------------------------------------------------------
// Coord
// ---------------------------------------------------------------------------

/// A cell coordinate. `x` is the column, `y` is the row; Y grows down.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    /// Origin (0, 0).
    pub const ZERO: Self = Self { x: 0, y: 0 };

    /// Create a new coordinate.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Return a coordinate shifted by (dx, dy).
    #[inline]
    pub const fn shift(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// L1 distance to `other`.
    #[inline]
    pub fn manhattan(self, other: Coord) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    /// Straight-line distance to `other`.
    #[inline]
    pub fn euclidean(self, other: Coord) -> f64 {
        let dx = f64::from(self.x - other.x);
        let dy = f64::from(self.y - other.y);
        dx.hypot(dy)
    }

    /// Whether `other` differs from `self` on both axes by at most one step
    /// and is not `self`.
    #[inline]
    pub fn is_adjacent(self, other: Coord) -> bool {
        self != other && (self.x - other.x).abs() <= 1 && (self.y - other.y).abs() <= 1
    }
}

impl PartialOrd for Coord {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Coord {
    /// Row-major: rows first, then columns.
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.y.cmp(&other.y).then(self.x.cmp(&other.x))
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl Add for Coord {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Coord {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

// ---------------------------------------------------------------------------
// Dims
// ---------------------------------------------------------------------------

/// Extent of a dense grid: `rows` rows of `cols` cells each, covering the
/// half-open rectangle `[0, cols) x [0, rows)`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dims {
    pub rows: i32,
    pub cols: i32,
}

impl Dims {
    /// Create a new extent.
    #[inline]
    pub const fn new(rows: i32, cols: i32) -> Self {
        Self { rows, cols }
    }

    /// Total number of cells, or `None` if either side is non-positive or
    /// the product overflows `usize`.
    #[inline]
    pub fn cell_count(self) -> Option<usize> {
        if self.is_empty() {
            return None;
        }
        (self.rows as usize).checked_mul(self.cols as usize)
    }

    /// Total number of cells (0 for an empty extent).
    #[inline]
    pub fn len(self) -> usize {
        self.cell_count().unwrap_or(0)
    }

    /// Whether the extent has zero or negative area.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.rows <= 0 || self.cols <= 0
    }

    /// Whether `c` names a cell inside the extent.
    #[inline]
    pub fn contains(self, c: Coord) -> bool {
        c.x >= 0 && c.x < self.cols && c.y >= 0 && c.y < self.rows
    }

    /// Flat row-major index of `c`. Returns `None` if out of range.
    #[inline]
    pub fn index(self, c: Coord) -> Option<usize> {
        if !self.contains(c) {
            return None;
        }
        Some(c.y as usize * self.cols as usize + c.x as usize)
    }

    /// Coordinate of the flat index `idx`. The caller guarantees
    /// `idx < self.len()`.
    #[inline]
    pub fn coord(self, idx: usize) -> Coord {
        let cols = self.cols as usize;
        Coord::new((idx % cols) as i32, (idx / cols) as i32)
    }

    /// Row-major iterator over every coordinate in the extent.
    #[inline]
    pub fn iter(self) -> DimsIter {
        DimsIter {
            dims: self,
            cur: Coord::ZERO,
        }
    }
}

impl IntoIterator for Dims {
    type Item = Coord;
    type IntoIter = DimsIter;
    #[inline]
    fn into_iter(self) -> DimsIter {
        self.iter()
    }
}

impl fmt::Display for Dims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

// ---------------------------------------------------------------------------
// DimsIter
// ---------------------------------------------------------------------------

/// Row-major iterator over the coordinates of a [`Dims`].
#[derive(Clone, Debug)]
pub struct DimsIter {
    dims: Dims,
    cur: Coord,
}

impl Iterator for DimsIter {
    type Item = Coord;

    #[inline]
    fn next(&mut self) -> Option<Coord> {
        if self.dims.is_empty() || self.cur.y >= self.dims.rows {
            return None;
        }
        let c = self.cur;
        self.cur.x += 1;
        if self.cur.x >= self.dims.cols {
            self.cur.x = 0;
            self.cur.y += 1;
        }
        Some(c)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.dims.is_empty() || self.cur.y >= self.dims.rows {
            return (0, Some(0));
        }
        let w = self.dims.cols as usize;
        let remaining_in_row = (self.dims.cols - self.cur.x) as usize;
        let remaining_rows = (self.dims.rows - self.cur.y - 1) as usize;
        let total = remaining_in_row + remaining_rows * w;
        (total, Some(total))
    }
}

impl ExactSizeIterator for DimsIter {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coord_arithmetic() {
        let a = Coord::new(1, 2);
        let b = Coord::new(3, 4);
        assert_eq!(a + b, Coord::new(4, 6));
        assert_eq!(b - a, Coord::new(2, 2));
        assert_eq!(a.shift(-1, 1), Coord::new(0, 3));
    }

    #[test]
    fn coord_distances() {
        let a = Coord::new(0, 0);
        let b = Coord::new(3, 4);
        assert_eq!(a.manhattan(b), 7);
        assert!((a.euclidean(b) - 5.0).abs() < 1e-12);
        assert_eq!(b.manhattan(a), 7);
    }

    #[test]
    fn coord_adjacency() {
        let c = Coord::new(2, 2);
        assert!(c.is_adjacent(Coord::new(3, 3)));
        assert!(c.is_adjacent(Coord::new(2, 1)));
        assert!(!c.is_adjacent(c));
        assert!(!c.is_adjacent(Coord::new(4, 2)));
    }

    #[test]
    fn coord_orders_row_major() {
        let mut v = vec![Coord::new(1, 1), Coord::new(0, 1), Coord::new(5, 0)];
        v.sort();
        assert_eq!(v, vec![Coord::new(5, 0), Coord::new(0, 1), Coord::new(1, 1)]);
    }

    #[test]
    fn dims_contains_and_index() {
        let d = Dims::new(2, 3);
        assert_eq!(d.len(), 6);
        assert!(d.contains(Coord::new(2, 1)));
        assert!(!d.contains(Coord::new(3, 0)));
        assert!(!d.contains(Coord::new(0, 2)));
        assert!(!d.contains(Coord::new(-1, 0)));
        assert_eq!(d.index(Coord::new(2, 1)), Some(5));
        assert_eq!(d.index(Coord::new(3, 1)), None);
        assert_eq!(d.coord(5), Coord::new(2, 1));
    }

    #[test]
    fn dims_index_coord_agree() {
        let d = Dims::new(4, 7);
        for (i, c) in d.iter().enumerate() {
            assert_eq!(d.index(c), Some(i));
            assert_eq!(d.coord(i), c);
        }
    }

    #[test]
    fn dims_iter_count() {
        let d = Dims::new(2, 3);
        let cs: Vec<_> = d.iter().collect();
        assert_eq!(cs.len(), 6);
        assert_eq!(d.iter().len(), 6);
        assert_eq!(cs[0], Coord::new(0, 0));
        assert_eq!(cs[5], Coord::new(2, 1));
    }

    #[test]
    fn empty_dims() {
        let d = Dims::new(0, 5);
        assert!(d.is_empty());
        assert_eq!(d.cell_count(), None);
        assert_eq!(d.len(), 0);
        assert_eq!(d.iter().count(), 0);
        assert!(Dims::new(3, -1).is_empty());
    }

    #[test]
    fn display() {
        assert_eq!(Coord::new(4, 9).to_string(), "(4, 9)");
        assert_eq!(Dims::new(60, 100).to_string(), "60x100");
    }
}
