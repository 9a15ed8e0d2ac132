use hexpath_core::Hex;

/// Minimal pathfinding interface — provides neighbor enumeration.
pub trait Pather {
    /// Append the passable neighbors of `h` into `buf`, in a fixed order.
    /// The caller clears `buf` before calling.
    fn neighbors(&self, h: Hex, buf: &mut Vec<Hex>);
}

/// Pather with weighted (positive-cost) steps.
pub trait WeightedPather: Pather {
    /// Cost of stepping from `from` onto adjacent `to`. Must be > 0.
    fn cost(&self, from: Hex, to: Hex) -> i32;
}

/// Full A* pather with an admissible heuristic.
pub trait AstarPather: WeightedPather {
    /// Heuristic estimate of the cost from `from` to `to`.
    /// Must never overestimate the true cost (admissible).
    fn estimate(&self, from: Hex, to: Hex) -> i32;
}
