//! The [`Cell`] type — one passable or blocked hex with a movement cost.

use crate::hex::Hex;

/// A single grid position.
///
/// `cost` is what it takes to *enter* the cell. Search bookkeeping is kept
/// outside the cell, so a configured grid can be searched through a shared
/// reference.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub pos: Hex,
    pub cost: i32,
    pub obstacle: bool,
}

impl Cell {
    /// A passable cell at `pos` with the given entry cost.
    #[inline]
    pub const fn new(pos: Hex, cost: i32) -> Self {
        Self {
            pos,
            cost,
            obstacle: false,
        }
    }

    /// Set the movement cost (builder).
    #[inline]
    pub const fn with_cost(mut self, cost: i32) -> Self {
        self.cost = cost;
        self
    }

    /// Set the obstacle flag (builder).
    #[inline]
    pub const fn with_obstacle(mut self, obstacle: bool) -> Self {
        self.obstacle = obstacle;
        self
    }

    /// Whether a search may step onto this cell.
    #[inline]
    pub const fn is_passable(&self) -> bool {
        !self.obstacle
    }
}
