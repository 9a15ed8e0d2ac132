use hexpath_core::{Hex, HexRange};

use crate::search::SearchConfig;

/// A position with an associated cost, returned from Dijkstra map queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathNode {
    pub pos: Hex,
    pub cost: i64,
}

// ---------------------------------------------------------------------------
// Internal node for A*/Dijkstra priority-queue searches
// ---------------------------------------------------------------------------

/// Per-run search record for one cell. Only meaningful when `generation`
/// matches the owning search's current generation.
#[derive(Clone)]
pub(crate) struct Node {
    pub(crate) g: i64,
    pub(crate) h: i64,
    pub(crate) f: i64,
    pub(crate) parent: usize,
    pub(crate) generation: u32,
    /// `true` while in the open set; `false` once finalized.
    pub(crate) open: bool,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            g: 0,
            h: 0,
            f: 0,
            parent: usize::MAX,
            generation: 0,
            open: false,
        }
    }
}

/// Reference into the node array, ordered for use in `BinaryHeap`.
///
/// Lowest `f` pops first; ties go to the lower `h` (closer to the goal),
/// then to the earlier insertion.
#[derive(Clone, Copy, Eq, PartialEq)]
pub(crate) struct NodeRef {
    pub(crate) idx: usize,
    pub(crate) f: i64,
    pub(crate) h: i64,
    pub(crate) seq: u64,
}

impl Ord for NodeRef {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Reversed: BinaryHeap is a max-heap.
        other
            .f
            .cmp(&self.f)
            .then(other.h.cmp(&self.h))
            .then(other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for NodeRef {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Sentinel value meaning "unreachable" in Dijkstra maps.
///
/// Scores accumulate `i32` step costs in `i64`, so no real path cost can
/// reach it.
pub const UNREACHABLE: i64 = i64::MAX;

/// Advance a generation counter, clearing every stamp in `nodes` when it
/// wraps so that stale nodes never match the new generation.
pub(crate) fn bump_generation(generation: &mut u32, nodes: &mut [Node]) -> u32 {
    *generation = generation.wrapping_add(1);
    if *generation == 0 {
        log::trace!("generation wrapped, clearing {} nodes", nodes.len());
        for n in nodes.iter_mut() {
            n.generation = 0;
        }
        *generation = 1;
    }
    *generation
}

// ---------------------------------------------------------------------------
// HexPathRange
// ---------------------------------------------------------------------------

/// Owner of all per-search state for a hex range.
///
/// Scores and parent links live here rather than on the grid's cells, so
/// one grid can be searched through a shared reference while each
/// `HexPathRange` keeps its own bookkeeping. Every run bumps a generation
/// counter, which invalidates the previous run's nodes without a reset pass.
pub struct HexPathRange {
    pub(crate) rng: HexRange,
    pub(crate) config: SearchConfig,
    // A* caches
    pub(crate) astar_nodes: Vec<Node>,
    pub(crate) astar_generation: u32,
    // Dijkstra caches
    pub(crate) dijkstra_nodes: Vec<Node>,
    pub(crate) dijkstra_generation: u32,
    pub(crate) dijkstra_results: Vec<PathNode>,
    pub(crate) dijkstra_map: Vec<i64>,
    // shared scratch buffer for neighbor queries
    pub(crate) nbuf: Vec<Hex>,
}

impl HexPathRange {
    /// Create a new `HexPathRange` for the given range.
    pub fn new(rng: HexRange) -> Self {
        let len = rng.len();
        Self {
            rng,
            config: SearchConfig::default(),
            astar_nodes: vec![Node::default(); len],
            astar_generation: 0,
            dijkstra_nodes: vec![Node::default(); len],
            dijkstra_generation: 0,
            dijkstra_results: Vec::new(),
            dijkstra_map: vec![UNREACHABLE; len],
            nbuf: Vec::with_capacity(6),
        }
    }

    /// Replace the search configuration (builder).
    pub fn with_config(mut self, config: SearchConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the search configuration.
    pub fn set_config(&mut self, config: SearchConfig) {
        self.config = config;
    }

    /// The current search configuration.
    #[inline]
    pub fn config(&self) -> SearchConfig {
        self.config
    }

    /// Replace the underlying range.
    ///
    /// If the new range fits within the existing caches they are kept and
    /// only the generation counters are bumped; otherwise they are
    /// reallocated.
    pub fn set_range(&mut self, rng: HexRange) {
        let new_len = rng.len();
        let old_capacity = self.astar_nodes.len();
        self.rng = rng;

        if new_len <= old_capacity {
            bump_generation(&mut self.astar_generation, &mut self.astar_nodes);
            bump_generation(&mut self.dijkstra_generation, &mut self.dijkstra_nodes);
            self.dijkstra_results.clear();
            for v in self.dijkstra_map.iter_mut() {
                *v = UNREACHABLE;
            }
            return;
        }

        log::debug!("path range grown to {rng} ({new_len} cells)");
        self.astar_nodes.clear();
        self.astar_nodes.resize(new_len, Node::default());
        self.astar_generation = 0;

        self.dijkstra_nodes.clear();
        self.dijkstra_nodes.resize(new_len, Node::default());
        self.dijkstra_generation = 0;
        self.dijkstra_results.clear();
        self.dijkstra_map.clear();
        self.dijkstra_map.resize(new_len, UNREACHABLE);
    }

    /// The hex range being used.
    #[inline]
    pub fn range(&self) -> HexRange {
        self.rng
    }

    /// The g-score recorded for `h` by the last A* run, if the run reached it.
    pub fn g_score(&self, h: Hex) -> Option<i64> {
        let i = self.idx(h)?;
        let n = &self.astar_nodes[i];
        (n.generation == self.astar_generation && self.astar_generation != 0).then_some(n.g)
    }

    // -----------------------------------------------------------------------
    // Coordinate helpers
    // -----------------------------------------------------------------------

    /// Convert a `Hex` to a flat index. Returns `None` if out of range.
    #[inline]
    pub(crate) fn idx(&self, h: Hex) -> Option<usize> {
        self.rng.index(h)
    }

    /// Convert a flat index back to a `Hex`.
    #[inline]
    pub(crate) fn hex(&self, idx: usize) -> Hex {
        self.rng.hex_at(idx)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for HexPathRange {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serde::Serialize::serialize(&self.rng, serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for HexPathRange {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let range = <HexRange as serde::Deserialize>::deserialize(deserializer)?;
        Ok(HexPathRange::new(range))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BinaryHeap;

    #[test]
    fn set_range_smaller_preserves_capacity() {
        let mut pr = HexPathRange::new(HexRange::new(0, 0, 20, 20));
        let original_cap = pr.astar_nodes.len();

        let small = HexRange::new(0, 0, 5, 5);
        pr.set_range(small);
        assert_eq!(pr.range(), small);
        assert_eq!(pr.astar_nodes.len(), original_cap);
        assert!(pr.astar_generation > 0 && pr.dijkstra_generation > 0);
    }

    #[test]
    fn set_range_smaller_survives_generation_wrap() {
        let rng = HexRange::new(0, 0, 6, 6);
        let mut pr = HexPathRange::new(rng);
        for n in pr.astar_nodes.iter_mut().chain(pr.dijkstra_nodes.iter_mut()) {
            n.generation = 1;
            n.open = true;
        }
        pr.astar_generation = u32::MAX;
        pr.dijkstra_generation = u32::MAX;

        pr.set_range(HexRange::new(0, 0, 3, 3));
        assert_eq!(pr.astar_generation, 1);
        assert_eq!(pr.dijkstra_generation, 1);
        assert!(pr.astar_nodes.iter().all(|n| n.generation == 0));
        assert!(pr.dijkstra_nodes.iter().all(|n| n.generation == 0));
        assert_eq!(pr.g_score(Hex::new(0, 0)), None);
    }

    #[test]
    fn bump_generation_skips_zero() {
        let mut nodes = vec![Node::default(); 4];
        nodes[2].generation = 7;
        let mut generation = 6;
        assert_eq!(bump_generation(&mut generation, &mut nodes), 7);
        assert_eq!(nodes[2].generation, 7);

        generation = u32::MAX;
        assert_eq!(bump_generation(&mut generation, &mut nodes), 1);
        assert!(nodes.iter().all(|n| n.generation == 0));
    }

    #[test]
    fn set_range_larger_reallocates() {
        let mut pr = HexPathRange::new(HexRange::new(0, 0, 5, 5));
        let big = HexRange::new(0, 0, 20, 20);
        pr.set_range(big);
        assert_eq!(pr.range(), big);
        assert_eq!(pr.astar_nodes.len(), 400);
        assert_eq!(pr.dijkstra_map.len(), 400);
    }

    #[test]
    fn offset_range_indexing() {
        let pr = HexPathRange::new(HexRange::new(-3, 2, 4, 6));
        for h in pr.range() {
            let i = pr.idx(h).unwrap();
            assert_eq!(pr.hex(i), h);
        }
        assert_eq!(pr.idx(Hex::new(4, 2)), None);
    }

    #[test]
    fn no_scores_before_first_search() {
        let pr = HexPathRange::new(HexRange::new(0, 0, 3, 3));
        assert_eq!(pr.g_score(Hex::new(0, 0)), None);
    }

    #[test]
    fn heap_order_f_then_h_then_seq() {
        let mut heap = BinaryHeap::new();
        heap.push(NodeRef { idx: 0, f: 5, h: 3, seq: 0 });
        heap.push(NodeRef { idx: 1, f: 5, h: 1, seq: 1 });
        heap.push(NodeRef { idx: 2, f: 4, h: 4, seq: 2 });
        heap.push(NodeRef { idx: 3, f: 5, h: 1, seq: 3 });
        let order: Vec<_> = std::iter::from_fn(|| heap.pop().map(|n| n.idx)).collect();
        assert_eq!(order, vec![2, 1, 3, 0]);
    }
}
