//! Validated shortest-path search over a [`HexGrid`].
//!
//! [`find_path`] checks both endpoints, runs A* and reports either a
//! [`Path`] or [`PathOutcome::NotFound`]. An unreachable goal is a normal
//! outcome; only misconfigured endpoints and an exhausted iteration budget
//! are errors.

use std::fmt;

use hexpath_core::{Hex, HexGrid};

use crate::HexPathRange;

// ---------------------------------------------------------------------------
// SearchConfig
// ---------------------------------------------------------------------------

/// Tuning knobs for a search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchConfig {
    /// Maximum number of cells A* may expand before giving up.
    /// `None` means unlimited.
    pub max_iterations: Option<usize>,
}

impl SearchConfig {
    /// Unlimited search.
    pub const fn new() -> Self {
        Self {
            max_iterations: None,
        }
    }

    /// Limit the number of expansions (builder).
    pub const fn with_max_iterations(mut self, max: usize) -> Self {
        self.max_iterations = Some(max);
        self
    }
}

// ---------------------------------------------------------------------------
// Path / PathOutcome
// ---------------------------------------------------------------------------

/// A route from start to goal, both inclusive, in traversal order.
///
/// Always holds at least one coordinate, and consecutive coordinates are
/// adjacent.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Path {
    steps: Vec<Hex>,
    cost: i64,
}

impl Path {
    /// The coordinates from start to goal.
    pub fn steps(&self) -> &[Hex] {
        &self.steps
    }

    /// Accumulated movement cost (the goal's g-score). The start cell's own
    /// cost is not counted.
    pub fn cost(&self) -> i64 {
        self.cost
    }

    /// First coordinate.
    pub fn start(&self) -> Hex {
        self.steps[0]
    }

    /// Last coordinate.
    pub fn goal(&self) -> Hex {
        self.steps[self.steps.len() - 1]
    }

    /// Number of moves, one less than the number of coordinates.
    pub fn len(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }

    /// Whether the path has no moves (start equals goal).
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `h` is on the path.
    pub fn contains(&self, h: Hex) -> bool {
        self.steps.contains(&h)
    }

    /// Iterate over the coordinates from start to goal.
    pub fn iter(&self) -> std::slice::Iter<'_, Hex> {
        self.steps.iter()
    }

    /// Consume the path, returning its coordinates.
    pub fn into_steps(self) -> Vec<Hex> {
        self.steps
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Path {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        use serde::de::Error;

        #[derive(serde::Deserialize)]
        struct Stored {
            steps: Vec<Hex>,
            cost: i64,
        }
        let Stored { steps, cost } = <Stored as serde::Deserialize>::deserialize(deserializer)?;
        if steps.is_empty() {
            return Err(D::Error::custom("path has no steps"));
        }
        if let Some(w) = steps.windows(2).find(|w| !w[0].is_adjacent(w[1])) {
            return Err(D::Error::custom(format!("path step {} -> {} is not a move", w[0], w[1])));
        }
        // Every move costs at least 1.
        let moves = steps.len() as i64 - 1;
        if cost < moves {
            return Err(D::Error::custom(format!(
                "path cost {cost} is below its {moves} moves"
            )));
        }
        Ok(Path { steps, cost })
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a Hex;
    type IntoIter = std::slice::Iter<'a, Hex>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Result of a search that ran to completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathOutcome {
    /// An optimal route.
    Found(Path),
    /// No route exists under the current obstacles.
    NotFound,
}

impl PathOutcome {
    /// The path, if one was found.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Found(p) => Some(p),
            Self::NotFound => None,
        }
    }

    /// Consume the outcome, returning the path if one was found.
    pub fn into_path(self) -> Option<Path> {
        match self {
            Self::Found(p) => Some(p),
            Self::NotFound => None,
        }
    }

    /// Whether a path was found.
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }
}

// ---------------------------------------------------------------------------
// SearchError
// ---------------------------------------------------------------------------

/// Reasons a search could not produce an outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchError {
    /// The start or goal is not part of the grid.
    InvalidCoordinate(Hex),
    /// The start or goal is an obstacle.
    BlockedEndpoint(Hex),
    /// The configured expansion budget ran out.
    BudgetExhausted { iterations: usize },
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCoordinate(h) => write!(f, "endpoint {h} is outside the grid"),
            Self::BlockedEndpoint(h) => write!(f, "endpoint {h} is an obstacle"),
            Self::BudgetExhausted { iterations } => {
                write!(f, "search budget exhausted after {iterations} expansions")
            }
        }
    }
}

impl std::error::Error for SearchError {}

// ---------------------------------------------------------------------------
// Entry points
// ---------------------------------------------------------------------------

/// Find a cheapest route from `start` to `goal` on `grid`.
///
/// Search state is allocated fresh for the call, so the grid is only
/// borrowed and any number of searches may share it.
pub fn find_path(grid: &HexGrid, start: Hex, goal: Hex) -> Result<PathOutcome, SearchError> {
    find_path_with(grid, start, goal, SearchConfig::default())
}

/// [`find_path`] with an explicit configuration.
pub fn find_path_with(
    grid: &HexGrid,
    start: Hex,
    goal: Hex,
    config: SearchConfig,
) -> Result<PathOutcome, SearchError> {
    HexPathRange::new(grid.bounds())
        .with_config(config)
        .find_path(grid, start, goal)
}

impl HexPathRange {
    /// Find a cheapest route on `grid`, reusing this range's caches.
    ///
    /// The range is resized to the grid's bounds when they differ. After a
    /// successful call [`g_score`](Self::g_score) reports the scores of every
    /// cell the search touched.
    pub fn find_path(
        &mut self,
        grid: &HexGrid,
        start: Hex,
        goal: Hex,
    ) -> Result<PathOutcome, SearchError> {
        check_endpoint(grid, start)?;
        check_endpoint(grid, goal)?;
        if self.rng != grid.bounds() {
            self.set_range(grid.bounds());
        }

        match self.astar(grid, start, goal)? {
            Some(goal_idx) => {
                let cost = self.astar_nodes[goal_idx].g;
                let steps = self.reconstruct(goal_idx);
                Ok(PathOutcome::Found(Path { steps, cost }))
            }
            None => Ok(PathOutcome::NotFound),
        }
    }
}

fn check_endpoint(grid: &HexGrid, h: Hex) -> Result<(), SearchError> {
    match grid.get(h) {
        None => {
            log::debug!("rejecting endpoint {h}: outside {}", grid.bounds());
            Err(SearchError::InvalidCoordinate(h))
        }
        Some(c) if c.obstacle => {
            log::debug!("rejecting endpoint {h}: obstacle");
            Err(SearchError::BlockedEndpoint(h))
        }
        Some(_) => Ok(()),
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn path_round_trip() {
        let g = HexGrid::new(4, 4, 2).unwrap();
        let path = find_path(&g, Hex::new(0, 0), Hex::new(3, 3))
            .unwrap()
            .into_path()
            .unwrap();
        let json = serde_json::to_string(&path).unwrap();
        let back: Path = serde_json::from_str(&json).unwrap();
        assert_eq!(path, back);
    }

    #[test]
    fn stored_path_must_be_walkable() {
        let empty = r#"{"steps":[],"cost":0}"#;
        let err = serde_json::from_str::<Path>(empty).unwrap_err();
        assert!(err.to_string().contains("no steps"));

        let jump = r#"{"steps":[{"q":0,"r":0},{"q":2,"r":0}],"cost":2}"#;
        let err = serde_json::from_str::<Path>(jump).unwrap_err();
        assert!(err.to_string().contains("(0, 0) -> (2, 0)"));

        let cheap = r#"{"steps":[{"q":0,"r":0},{"q":1,"r":0}],"cost":-3}"#;
        assert!(serde_json::from_str::<Path>(cheap).is_err());

        let single = r#"{"steps":[{"q":4,"r":1}],"cost":0}"#;
        let p: Path = serde_json::from_str(single).unwrap();
        assert!(p.is_empty());
        assert_eq!(p.goal(), Hex::new(4, 1));
    }

    #[test]
    fn config_round_trip() {
        let config = SearchConfig::new().with_max_iterations(64);
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(serde_json::from_str::<SearchConfig>(&json).unwrap(), config);
    }
}
