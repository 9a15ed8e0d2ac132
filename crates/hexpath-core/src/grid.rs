//! The [`HexGrid`] type — the set of [`Cell`]s a search runs over.
//!
//! Cells live in a flat row-major buffer addressed through the grid's
//! [`HexRange`]. The grid carries configuration only (obstacles and costs);
//! it never holds start/goal designation or per-search scores.

use std::fmt;

use rand::{Rng, RngExt};

use crate::cell::Cell;
use crate::hex::{Hex, HexRange, MAX_COORD};

/// A parallelogram of hex cells keyed by axial coordinate.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct HexGrid {
    bounds: HexRange,
    cells: Vec<Cell>,
}

impl HexGrid {
    /// Create a `width` × `height` grid covering q in `[0, width)` and
    /// r in `[0, height)`, every cell passable with `default_cost`.
    pub fn new(width: i32, height: i32, default_cost: i32) -> Result<Self, GridError> {
        if width <= 0 || height <= 0 {
            return Err(GridError::InvalidSize { width, height });
        }
        Self::with_range(HexRange::new(0, 0, width, height), default_cost)
    }

    /// Create a grid over an arbitrary range.
    ///
    /// Every corner coordinate must lie within ±[`MAX_COORD`].
    pub fn with_range(bounds: HexRange, default_cost: i32) -> Result<Self, GridError> {
        check_bounds(bounds)?;
        check_cost(default_cost)?;
        let cells = bounds.iter().map(|h| Cell::new(h, default_cost)).collect();
        log::debug!("hex grid {bounds} created, default cost {default_cost}");
        Ok(Self { bounds, cells })
    }

    /// Assemble a grid from stored cells, enforcing the same rules as
    /// [`with_range`](Self::with_range) and [`set_cost`](Self::set_cost).
    #[cfg(feature = "serde")]
    fn from_cells(bounds: HexRange, cells: Vec<Cell>) -> Result<Self, GridError> {
        check_bounds(bounds)?;
        if cells.len() != bounds.len() {
            return Err(GridError::CellCount {
                expected: bounds.len(),
                found: cells.len(),
            });
        }
        for (c, h) in cells.iter().zip(bounds.iter()) {
            if c.pos != h {
                return Err(GridError::MisplacedCell(c.pos));
            }
            check_cost(c.cost)?;
        }
        Ok(Self { bounds, cells })
    }

    /// The coordinate range covered by the grid.
    #[inline]
    pub fn bounds(&self) -> HexRange {
        self.bounds
    }

    /// Number of columns.
    #[inline]
    pub fn width(&self) -> i32 {
        self.bounds.width()
    }

    /// Number of rows.
    #[inline]
    pub fn height(&self) -> i32 {
        self.bounds.height()
    }

    /// Number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the grid has no cells.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether `h` lies inside the grid.
    #[inline]
    pub fn contains(&self, h: Hex) -> bool {
        self.bounds.contains(h)
    }

    /// The cell at `h`, or `None` outside the grid.
    #[inline]
    pub fn get(&self, h: Hex) -> Option<&Cell> {
        self.bounds.index(h).map(|i| &self.cells[i])
    }

    /// Entry cost of the cell at `h`.
    #[inline]
    pub fn cost(&self, h: Hex) -> Option<i32> {
        self.get(h).map(|c| c.cost)
    }

    /// True when `h` is outside the grid or marked as an obstacle.
    #[inline]
    pub fn is_blocked(&self, h: Hex) -> bool {
        self.get(h).is_none_or(|c| !c.is_passable())
    }

    /// Set or clear the obstacle flag at `h`.
    pub fn set_obstacle(&mut self, h: Hex, obstacle: bool) -> Result<(), GridError> {
        let cell = self.get_mut(h)?;
        cell.obstacle = obstacle;
        log::trace!("obstacle at {h} set to {obstacle}");
        Ok(())
    }

    /// Change the entry cost at `h`. Costs below 1 are rejected.
    pub fn set_cost(&mut self, h: Hex, cost: i32) -> Result<(), GridError> {
        check_cost(cost)?;
        let cell = self.get_mut(h)?;
        cell.cost = cost;
        log::trace!("cost at {h} set to {cost}");
        Ok(())
    }

    /// Mark every coordinate yielded by `iter` as an obstacle.
    ///
    /// Stops at the first coordinate outside the grid; earlier ones stay set.
    pub fn fill_obstacles(&mut self, iter: impl IntoIterator<Item = Hex>) -> Result<(), GridError> {
        for h in iter {
            self.set_obstacle(h, true)?;
        }
        Ok(())
    }

    /// Clear all obstacle flags.
    pub fn clear_obstacles(&mut self) {
        for c in self.cells.iter_mut() {
            c.obstacle = false;
        }
    }

    /// Randomly block roughly `percent` % of the cells, never touching a
    /// coordinate for which `keep` returns `true`. Returns the number of
    /// cells newly blocked.
    pub fn scatter_obstacles(
        &mut self,
        rng: &mut impl Rng,
        percent: u32,
        keep: impl Fn(Hex) -> bool,
    ) -> usize {
        let mut count = 0;
        for c in self.cells.iter_mut() {
            if c.obstacle || keep(c.pos) {
                continue;
            }
            if rng.random_range(0..100u32) < percent {
                c.obstacle = true;
                count += 1;
            }
        }
        log::debug!("scattered {count} obstacles ({percent}%)");
        count
    }

    /// Row-major iterator over all cells.
    pub fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Coordinates of all obstacle cells, row-major.
    pub fn obstacles(&self) -> impl Iterator<Item = Hex> + '_ {
        self.cells.iter().filter(|c| c.obstacle).map(|c| c.pos)
    }

    fn get_mut(&mut self, h: Hex) -> Result<&mut Cell, GridError> {
        match self.bounds.index(h) {
            Some(i) => Ok(&mut self.cells[i]),
            None => Err(GridError::OutOfBounds(h)),
        }
    }
}

fn check_bounds(bounds: HexRange) -> Result<(), GridError> {
    let corners = [bounds.min.q, bounds.min.r, bounds.max.q, bounds.max.r];
    if corners.iter().any(|c| !(-MAX_COORD..=MAX_COORD).contains(c)) {
        return Err(GridError::BoundsTooLarge(bounds));
    }
    if bounds.is_empty() {
        return Err(GridError::InvalidSize {
            width: bounds.width(),
            height: bounds.height(),
        });
    }
    Ok(())
}

fn check_cost(cost: i32) -> Result<(), GridError> {
    if cost < 1 {
        return Err(GridError::InvalidCost(cost));
    }
    Ok(())
}

/// Errors raised while building or configuring a [`HexGrid`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridError {
    /// The coordinate is not part of the grid.
    OutOfBounds(Hex),
    /// Movement costs must be at least 1.
    InvalidCost(i32),
    /// Width and height must both be positive.
    InvalidSize { width: i32, height: i32 },
    /// A corner lies beyond ±[`MAX_COORD`].
    BoundsTooLarge(HexRange),
    /// Stored cells do not cover the bounds one-to-one.
    CellCount { expected: usize, found: usize },
    /// A stored cell sits at the wrong position for its slot.
    MisplacedCell(Hex),
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds(h) => write!(f, "coordinate {h} is outside the grid"),
            Self::InvalidCost(c) => write!(f, "invalid movement cost {c}: must be at least 1"),
            Self::InvalidSize { width, height } => {
                write!(f, "invalid grid size {width}x{height}")
            }
            Self::BoundsTooLarge(b) => {
                write!(f, "grid bounds {b} exceed the coordinate limit ±{MAX_COORD}")
            }
            Self::CellCount { expected, found } => {
                write!(f, "grid has {found} cells, bounds need {expected}")
            }
            Self::MisplacedCell(h) => write!(f, "cell {h} is stored out of order"),
        }
    }
}

impl std::error::Error for GridError {}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for HexGrid {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(serde::Deserialize)]
        struct Stored {
            bounds: HexRange,
            cells: Vec<Cell>,
        }
        let stored = <Stored as serde::Deserialize>::deserialize(deserializer)?;
        HexGrid::from_cells(stored.bounds, stored.cells).map_err(serde::de::Error::custom)
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn grid_round_trip() {
        let mut g = HexGrid::new(4, 3, 2).unwrap();
        g.set_obstacle(Hex::new(1, 1), true).unwrap();
        let json = serde_json::to_string(&g).unwrap();
        let back: HexGrid = serde_json::from_str(&json).unwrap();
        assert_eq!(g, back);
    }

    #[test]
    fn empty_cells_are_rejected() {
        let json = r#"{"bounds":{"min":{"q":0,"r":0},"max":{"q":2,"r":2}},"cells":[]}"#;
        let err = serde_json::from_str::<HexGrid>(json).unwrap_err();
        assert!(err.to_string().contains("0 cells"));
    }

    #[test]
    fn stored_cost_below_one_is_rejected() {
        let g = HexGrid::new(2, 1, 1).unwrap();
        let json = serde_json::to_string(&g).unwrap().replacen("\"cost\":1", "\"cost\":-5", 1);
        let err = serde_json::from_str::<HexGrid>(&json).unwrap_err();
        assert!(err.to_string().contains("-5"));
    }

    #[test]
    fn misplaced_cell_is_rejected() {
        let g = HexGrid::new(2, 1, 1).unwrap();
        let json = serde_json::to_string(&g)
            .unwrap()
            .replacen("\"q\":1,\"r\":0}", "\"q\":5,\"r\":0}", 1);
        assert!(serde_json::from_str::<HexGrid>(&json).is_err());
    }

    #[test]
    fn empty_bounds_are_rejected() {
        let json = r#"{"bounds":{"min":{"q":0,"r":0},"max":{"q":0,"r":0}},"cells":[]}"#;
        assert!(serde_json::from_str::<HexGrid>(json).is_err());
    }
}
