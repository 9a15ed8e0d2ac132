//! Shortest-path search on hexagonal grids.
//!
//! This crate provides the search engine for *hexpath* grids:
//!
//! - **A\*** shortest-path search ([`find_path`], [`HexPathRange::find_path`],
//!   and the generic [`HexPathRange::astar_path`])
//! - **Dijkstra** multi-source cost maps for movement ranges
//!   ([`HexPathRange::dijkstra_map`])
//!
//! Per-search scores live in a [`HexPathRange`], never on the grid, so a
//! configured [`HexGrid`](hexpath_core::HexGrid) is only borrowed while it is
//! searched. Reusing one `HexPathRange` avoids allocations after warm-up.
//!
//! # Trait hierarchy
//!
//! | Trait | Required for |
//! |---|---|
//! | [`Pather`] | neighbour enumeration |
//! | [`WeightedPather`] : [`Pather`] | Dijkstra |
//! | [`AstarPather`] : [`WeightedPather`] | A* |
//!
//! `HexGrid` implements all three.
//!
//! ```
//! use hexpath_core::{Hex, HexGrid};
//! use hexpath_paths::{PathOutcome, find_path};
//!
//! let mut grid = HexGrid::new(8, 7, 1).unwrap();
//! grid.set_obstacle(Hex::new(1, 0), true).unwrap();
//! match find_path(&grid, Hex::new(0, 0), Hex::new(3, 0)).unwrap() {
//!     PathOutcome::Found(path) => assert_eq!(path.goal(), Hex::new(3, 0)),
//!     PathOutcome::NotFound => unreachable!(),
//! }
//! ```

mod astar;
mod dijkstra;
mod distance;
mod neighbors;
mod pathers;
mod pathrange;
mod search;
mod traits;

pub use distance::hex_distance;
pub use neighbors::Neighbors;
pub use pathrange::{HexPathRange, PathNode, UNREACHABLE};
pub use search::{Path, PathOutcome, SearchConfig, SearchError, find_path, find_path_with};
pub use traits::{AstarPather, Pather, WeightedPather};
