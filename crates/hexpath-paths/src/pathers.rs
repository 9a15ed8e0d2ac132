//! [`HexGrid`] as a pather: in-bounds, unblocked neighbors; entry cost of
//! the destination cell; hex-distance heuristic.

use hexpath_core::{Hex, HexGrid};

use crate::distance::hex_distance;
use crate::traits::{AstarPather, Pather, WeightedPather};

impl Pather for HexGrid {
    fn neighbors(&self, h: Hex, buf: &mut Vec<Hex>) {
        for n in h.neighbors() {
            if !self.is_blocked(n) {
                buf.push(n);
            }
        }
    }
}

impl WeightedPather for HexGrid {
    fn cost(&self, _from: Hex, to: Hex) -> i32 {
        HexGrid::cost(self, to).unwrap_or(i32::MAX)
    }
}

impl AstarPather for HexGrid {
    fn estimate(&self, from: Hex, to: Hex) -> i32 {
        hex_distance(from, to)
    }
}
