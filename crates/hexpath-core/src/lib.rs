//! **hexpath-core** — axial hex coordinates and the grid model that the
//! *hexpath* search engine runs over.
//!
//! This crate provides [`Hex`] coordinates with their distance metric,
//! [`HexRange`] parallelograms, the [`Cell`] record, and the [`HexGrid`]
//! that owns all cells together with their obstacle flags and movement
//! costs. Grids can be configured programmatically or from a text layout.

pub mod cell;
pub mod grid;
pub mod hex;
pub mod layout;

pub use cell::Cell;
pub use grid::{GridError, HexGrid};
pub use hex::{Hex, HexRange, HexRangeIter, MAX_COORD};
pub use layout::LayoutError;
