//! Axial hex geometry: [`Hex`] coordinates and [`HexRange`] parallelograms.
//!
//! Axial coordinates use two axes, `q` and `r`, sharing one diagonal. The
//! implicit third cube coordinate is `s = -q - r`.

use std::fmt;
use std::ops::{Add, Mul, Sub};

/// Largest coordinate magnitude a grid corner may have.
///
/// Keeps neighbour offsets, distances and range sizes inside `i32`.
pub const MAX_COORD: i32 = 1 << 28;

// ---------------------------------------------------------------------------
// Hex
// ---------------------------------------------------------------------------

/// An axial hex coordinate.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hex {
    pub q: i32,
    pub r: i32,
}

impl Hex {
    /// Origin (0, 0).
    pub const ZERO: Self = Self { q: 0, r: 0 };

    /// The six axial offsets, in neighbour order.
    pub const DIRECTIONS: [Hex; 6] = [
        Hex::new(0, -1),
        Hex::new(1, -1),
        Hex::new(1, 0),
        Hex::new(0, 1),
        Hex::new(-1, 1),
        Hex::new(-1, 0),
    ];

    /// Create a new coordinate.
    #[inline]
    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    /// The implicit third cube coordinate.
    #[inline]
    pub const fn s(self) -> i32 {
        -self.q - self.r
    }

    /// The six adjacent coordinates, in [`DIRECTIONS`](Self::DIRECTIONS) order.
    #[inline]
    pub fn neighbors(self) -> [Hex; 6] {
        Self::DIRECTIONS.map(|d| self + d)
    }

    /// Minimum number of hex steps between two coordinates on an open plane.
    #[inline]
    pub fn distance(self, other: Hex) -> i32 {
        let dq = (self.q - other.q).abs();
        let dr = (self.r - other.r).abs();
        let ds = (self.q + self.r - other.q - other.r).abs();
        dq.max(dr).max(ds)
    }

    /// Whether `other` is one of the six neighbours.
    #[inline]
    pub fn is_adjacent(self, other: Hex) -> bool {
        self.distance(other) == 1
    }
}

impl PartialOrd for Hex {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Hex {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.r.cmp(&other.r).then(self.q.cmp(&other.q))
    }
}

impl fmt::Display for Hex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.q, self.r)
    }
}

impl From<(i32, i32)> for Hex {
    fn from((q, r): (i32, i32)) -> Self {
        Self::new(q, r)
    }
}

impl Add for Hex {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.q + rhs.q, self.r + rhs.r)
    }
}

impl Sub for Hex {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.q - rhs.q, self.r - rhs.r)
    }
}

impl Mul<i32> for Hex {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: i32) -> Self {
        Self::new(self.q * rhs, self.r * rhs)
    }
}

// ---------------------------------------------------------------------------
// HexRange
// ---------------------------------------------------------------------------

/// A half-open parallelogram of axial coordinates \[min, max).
///
/// `q` runs over `[min.q, max.q)` and `r` over `[min.r, max.r)`. All empty
/// ranges are considered equal.
#[derive(Copy, Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HexRange {
    pub min: Hex,
    pub max: Hex,
}

impl PartialEq for HexRange {
    fn eq(&self, other: &Self) -> bool {
        (self.min == other.min && self.max == other.max) || (self.is_empty() && other.is_empty())
    }
}

impl Eq for HexRange {}

impl HexRange {
    /// Create a new range from two corners, canonicalized so that
    /// `min` ≤ `max` on each axis.
    #[inline]
    pub fn new(q0: i32, r0: i32, q1: i32, r1: i32) -> Self {
        Self {
            min: Hex::new(q0.min(q1), r0.min(r1)),
            max: Hex::new(q0.max(q1), r0.max(r1)),
        }
    }

    /// Number of columns (`q` extent).
    #[inline]
    pub fn width(self) -> i32 {
        self.max.q - self.min.q
    }

    /// Number of rows (`r` extent).
    #[inline]
    pub fn height(self) -> i32 {
        self.max.r - self.min.r
    }

    /// Total number of coordinates in the range.
    #[inline]
    pub fn len(self) -> usize {
        if self.is_empty() {
            return 0;
        }
        (self.width() as usize) * (self.height() as usize)
    }

    /// Whether the range has zero or negative area.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.min.q >= self.max.q || self.min.r >= self.max.r
    }

    /// Whether `h` is inside the half-open range.
    #[inline]
    pub fn contains(self, h: Hex) -> bool {
        h.q >= self.min.q && h.q < self.max.q && h.r >= self.min.r && h.r < self.max.r
    }

    /// Flat row-major index of `h`, or `None` when outside.
    #[inline]
    pub fn index(self, h: Hex) -> Option<usize> {
        if !self.contains(h) {
            return None;
        }
        let q = (h.q - self.min.q) as usize;
        let r = (h.r - self.min.r) as usize;
        Some(r * self.width() as usize + q)
    }

    /// Inverse of [`index`](Self::index). `idx` must be below [`len`](Self::len).
    #[inline]
    pub fn hex_at(self, idx: usize) -> Hex {
        let w = self.width().max(1) as usize;
        Hex::new((idx % w) as i32 + self.min.q, (idx / w) as i32 + self.min.r)
    }

    /// Row-major iterator over every coordinate in the range.
    #[inline]
    pub fn iter(self) -> HexRangeIter {
        HexRangeIter {
            range: self,
            cur: self.min,
        }
    }
}

impl IntoIterator for HexRange {
    type Item = Hex;
    type IntoIter = HexRangeIter;
    #[inline]
    fn into_iter(self) -> HexRangeIter {
        self.iter()
    }
}

impl fmt::Display for HexRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}-{})", self.min, self.max)
    }
}

/// Row-major iterator over the coordinates of a [`HexRange`].
#[derive(Clone, Debug)]
pub struct HexRangeIter {
    range: HexRange,
    cur: Hex,
}

impl Iterator for HexRangeIter {
    type Item = Hex;

    #[inline]
    fn next(&mut self) -> Option<Hex> {
        if self.cur.r >= self.range.max.r || self.range.is_empty() {
            return None;
        }
        let h = self.cur;
        self.cur.q += 1;
        if self.cur.q >= self.range.max.q {
            self.cur.q = self.range.min.q;
            self.cur.r += 1;
        }
        Some(h)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.range.is_empty() || self.cur.r >= self.range.max.r {
            return (0, Some(0));
        }
        let w = self.range.width() as usize;
        let remaining_in_row = (self.range.max.q - self.cur.q) as usize;
        let remaining_rows = (self.range.max.r - self.cur.r - 1) as usize;
        let total = remaining_in_row + remaining_rows * w;
        (total, Some(total))
    }
}

impl ExactSizeIterator for HexRangeIter {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn neighbor_order_is_fixed() {
        let n = Hex::new(3, 3).neighbors();
        assert_eq!(
            n,
            [
                Hex::new(3, 2),
                Hex::new(4, 2),
                Hex::new(4, 3),
                Hex::new(3, 4),
                Hex::new(2, 4),
                Hex::new(2, 3),
            ]
        );
    }

    #[test]
    fn neighbors_are_distance_one() {
        let c = Hex::new(-2, 5);
        for n in c.neighbors() {
            assert_eq!(c.distance(n), 1);
            assert!(c.is_adjacent(n));
        }
        assert!(!c.is_adjacent(c));
    }

    #[test]
    fn distance_examples() {
        assert_eq!(Hex::ZERO.distance(Hex::ZERO), 0);
        assert_eq!(Hex::new(0, 0).distance(Hex::new(5, 6)), 11);
        // Along the shared diagonal both axes move together.
        assert_eq!(Hex::new(0, 3).distance(Hex::new(3, 0)), 3);
        assert_eq!(Hex::new(1, -1).distance(Hex::new(-2, 2)), 3);
    }

    #[test]
    fn distance_is_symmetric() {
        let a = Hex::new(4, -7);
        let b = Hex::new(-3, 2);
        assert_eq!(a.distance(b), b.distance(a));
    }

    #[test]
    fn cube_coordinate() {
        assert_eq!(Hex::new(2, 3).s(), -5);
    }

    #[test]
    fn hex_arithmetic() {
        let a = Hex::new(1, 2);
        let b = Hex::new(3, -4);
        assert_eq!(a + b, Hex::new(4, -2));
        assert_eq!(b - a, Hex::new(2, -6));
        assert_eq!(a * 3, Hex::new(3, 6));
        assert_eq!(Hex::from((7, 8)), Hex::new(7, 8));
    }

    #[test]
    fn hex_hash_is_structural() {
        let set: HashSet<Hex> = [Hex::new(1, 1), Hex::new(1, 1), Hex::new(1, 2)]
            .into_iter()
            .collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn hex_display() {
        assert_eq!(Hex::new(-1, 4).to_string(), "(-1, 4)");
    }

    #[test]
    fn range_basics() {
        let r = HexRange::new(0, 0, 8, 7);
        assert_eq!(r.len(), 56);
        assert!(r.contains(Hex::new(7, 6)));
        assert!(!r.contains(Hex::new(8, 0)));
        assert!(!r.contains(Hex::new(0, -1)));
    }

    #[test]
    fn range_canonicalizes() {
        let r = HexRange::new(3, 2, 0, 0);
        assert_eq!(r.min, Hex::new(0, 0));
        assert_eq!(r.max, Hex::new(3, 2));
    }

    #[test]
    fn empty_ranges_are_equal() {
        assert_eq!(HexRange::new(0, 0, 0, 5), HexRange::new(2, 2, 4, 2));
        assert_eq!(HexRange::new(0, 0, 0, 0).iter().count(), 0);
    }

    #[test]
    fn range_index_round_trip() {
        let r = HexRange::new(-2, 1, 3, 4);
        for (i, h) in r.iter().enumerate() {
            assert_eq!(r.index(h), Some(i));
            assert_eq!(r.hex_at(i), h);
        }
        assert_eq!(r.index(Hex::new(3, 1)), None);
    }

    #[test]
    fn range_iter_exact_size() {
        let r = HexRange::new(0, 0, 3, 2);
        let mut it = r.iter();
        assert_eq!(it.len(), 6);
        it.next();
        assert_eq!(it.len(), 5);
        let all: Vec<_> = r.into_iter().collect();
        assert_eq!(all[0], Hex::new(0, 0));
        assert_eq!(all[5], Hex::new(2, 1));
    }
}
