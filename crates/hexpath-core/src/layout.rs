//! Text layouts for configuring a [`HexGrid`].
//!
//! One line per `r` row and one glyph per `q` column. Whitespace between
//! glyphs is ignored, so rows can be indented to look like a hex map:
//!
//! ```text
//! . . . # # . . .
//!  . . . . # . . .
//!   . . # # . . . .
//! ```
//!
//! Glyphs: `.` passable (cost 1), `#` obstacle, `1`–`9` passable with that
//! cost.

use std::fmt;

use crate::grid::HexGrid;
use crate::hex::Hex;

const PASSABLE: char = '.';
const OBSTACLE: char = '#';

impl HexGrid {
    /// Build a grid from a text layout. The grid covers q in
    /// `[0, columns)` and r in `[0, rows)`.
    pub fn from_layout(s: &str) -> Result<HexGrid, LayoutError> {
        let rows: Vec<Vec<char>> = s
            .lines()
            .map(|l| l.chars().filter(|c| !c.is_whitespace()).collect::<Vec<_>>())
            .filter(|row| !row.is_empty())
            .collect();
        let Some(first) = rows.first() else {
            return Err(LayoutError::Empty);
        };
        let width = first.len();
        for (r, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(LayoutError::InconsistentWidth {
                    row: r,
                    expected: width,
                    found: row.len(),
                });
            }
        }

        let mut grid = HexGrid::new(width as i32, rows.len() as i32, 1)
            .map_err(|_| LayoutError::Empty)?;
        for (r, row) in rows.iter().enumerate() {
            for (q, &glyph) in row.iter().enumerate() {
                let pos = Hex::new(q as i32, r as i32);
                let (cost, obstacle) = match glyph {
                    PASSABLE => (1, false),
                    OBSTACLE => (1, true),
                    '1'..='9' => (glyph as i32 - '0' as i32, false),
                    _ => return Err(LayoutError::InvalidGlyph { glyph, pos }),
                };
                // In-bounds and cost >= 1 by construction.
                grid.set_cost(pos, cost)
                    .and_then(|()| grid.set_obstacle(pos, obstacle))
                    .map_err(|_| LayoutError::InvalidGlyph { glyph, pos })?;
            }
        }
        Ok(grid)
    }

    /// Render the grid in the [`from_layout`](Self::from_layout) format,
    /// each row indented by its `r` offset. Costs above 9 are written as `9`.
    pub fn to_layout(&self) -> String {
        let b = self.bounds();
        let mut out = String::new();
        for r in b.min.r..b.max.r {
            out.extend(std::iter::repeat_n(' ', (r - b.min.r) as usize));
            for q in b.min.q..b.max.q {
                if q > b.min.q {
                    out.push(' ');
                }
                out.push(match self.get(Hex::new(q, r)) {
                    Some(c) if c.obstacle => OBSTACLE,
                    Some(c) if c.cost <= 1 => PASSABLE,
                    Some(c) => char::from_digit(c.cost.min(9) as u32, 10).unwrap_or(PASSABLE),
                    None => PASSABLE,
                });
            }
            out.push('\n');
        }
        out
    }
}

/// Errors that can occur when parsing a layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// The layout contains no glyphs.
    Empty,
    /// A row has a different number of glyphs than the first row.
    InconsistentWidth {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// A glyph outside the layout alphabet.
    InvalidGlyph { glyph: char, pos: Hex },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "layout: no cells"),
            Self::InconsistentWidth {
                row,
                expected,
                found,
            } => write!(
                f,
                "layout: row {row} has {found} cells, expected {expected}"
            ),
            Self::InvalidGlyph { glyph, pos } => {
                write!(f, "layout contains invalid glyph \u{201c}{glyph}\u{201d} at {pos}")
            }
        }
    }
}

impl std::error::Error for LayoutError {}
