use std::collections::BinaryHeap;

use hexpath_core::Hex;

use crate::HexPathRange;
use crate::pathrange::{Node, NodeRef, bump_generation};
use crate::search::SearchError;
use crate::traits::AstarPather;

impl HexPathRange {
    /// Compute the shortest path from `from` to `to` using A*.
    ///
    /// Returns the full path (including both endpoints) or `None` if no path
    /// exists within the current range or the configured iteration budget
    /// ran out. Endpoint passability is up to the pather; use
    /// [`find_path`](Self::find_path) for a validated grid search.
    pub fn astar_path<P: AstarPather>(
        &mut self,
        pather: &P,
        from: Hex,
        to: Hex,
    ) -> Option<Vec<Hex>> {
        match self.astar(pather, from, to) {
            Ok(Some(goal_idx)) => Some(self.reconstruct(goal_idx)),
            Ok(None) => None,
            Err(err) => {
                log::debug!("astar {from} -> {to}: {err}");
                None
            }
        }
    }

    /// Run A* and return the goal's node index on success.
    ///
    /// Nodes of the current generation with `open == false` form the closed
    /// set. Heap entries whose node was closed in the meantime are stale and
    /// skipped when popped.
    pub(crate) fn astar<P: AstarPather>(
        &mut self,
        pather: &P,
        from: Hex,
        to: Hex,
    ) -> Result<Option<usize>, SearchError> {
        let Some(start_idx) = self.idx(from) else {
            return Ok(None);
        };
        let Some(goal_idx) = self.idx(to) else {
            return Ok(None);
        };

        let cur_gen = bump_generation(&mut self.astar_generation, &mut self.astar_nodes);
        let budget = self.config.max_iterations;
        log::debug!("astar {from} -> {to} (generation {cur_gen})");

        let h0 = i64::from(pather.estimate(from, to));
        self.astar_nodes[start_idx] = Node {
            g: 0,
            h: h0,
            f: h0,
            parent: usize::MAX,
            generation: cur_gen,
            open: true,
        };

        let mut seq: u64 = 0;
        let mut open: BinaryHeap<NodeRef> = BinaryHeap::new();
        open.push(NodeRef {
            idx: start_idx,
            f: h0,
            h: h0,
            seq,
        });

        let mut nbuf = std::mem::take(&mut self.nbuf);
        let mut expanded: usize = 0;

        let result = 'search: loop {
            let Some(current) = open.pop() else {
                break 'search Ok(None);
            };

            let ci = current.idx;

            // Skip stale entries.
            if self.astar_nodes[ci].generation != cur_gen || !self.astar_nodes[ci].open {
                continue;
            }

            if ci == goal_idx {
                break 'search Ok(Some(ci));
            }

            if budget.is_some_and(|max| expanded >= max) {
                break 'search Err(SearchError::BudgetExhausted {
                    iterations: expanded,
                });
            }
            expanded += 1;

            self.astar_nodes[ci].open = false;
            let current_g = self.astar_nodes[ci].g;
            let current_hex = self.hex(ci);
            log::trace!("expand {current_hex} g={current_g} f={}", current.f);

            nbuf.clear();
            pather.neighbors(current_hex, &mut nbuf);

            for &nh in nbuf.iter() {
                let Some(ni) = self.idx(nh) else {
                    continue;
                };
                let n = &self.astar_nodes[ni];
                let seen = n.generation == cur_gen;
                if seen && !n.open {
                    continue;
                }

                let g = current_g.saturating_add(i64::from(pather.cost(current_hex, nh)));
                let h = i64::from(pather.estimate(nh, to));
                let f = g.saturating_add(h);
                if seen && n.f <= f {
                    continue;
                }

                self.astar_nodes[ni] = Node {
                    g,
                    h,
                    f,
                    parent: ci,
                    generation: cur_gen,
                    open: true,
                };
                seq += 1;
                open.push(NodeRef { idx: ni, f, h, seq });
            }
        };

        self.nbuf = nbuf;
        log::debug!(
            "astar {from} -> {to}: {} after {expanded} expansions",
            match &result {
                Ok(Some(_)) => "found",
                Ok(None) => "not found",
                Err(_) => "budget exhausted",
            }
        );
        result
    }

    /// Follow parent links from `goal_idx` back to the start.
    pub(crate) fn reconstruct(&self, goal_idx: usize) -> Vec<Hex> {
        let mut path = Vec::new();
        let mut ci = goal_idx;
        while ci != usize::MAX {
            path.push(self.hex(ci));
            ci = self.astar_nodes[ci].parent;
        }
        path.reverse();
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::SearchConfig;
    use crate::traits::{Pather, WeightedPather};
    use hexpath_core::HexRange;

    /// Open plane clipped to a range, unit costs.
    struct Plane(HexRange);

    impl Pather for Plane {
        fn neighbors(&self, h: Hex, buf: &mut Vec<Hex>) {
            buf.extend(h.neighbors().into_iter().filter(|&n| self.0.contains(n)));
        }
    }

    impl WeightedPather for Plane {
        fn cost(&self, _from: Hex, _to: Hex) -> i32 {
            1
        }
    }

    impl AstarPather for Plane {
        fn estimate(&self, from: Hex, to: Hex) -> i32 {
            crate::hex_distance(from, to)
        }
    }

    #[test]
    fn straight_line() {
        let rng = HexRange::new(0, 0, 10, 10);
        let mut pr = HexPathRange::new(rng);
        let path = pr.astar_path(&Plane(rng), Hex::new(0, 0), Hex::new(4, 0)).unwrap();
        assert_eq!(
            path,
            (0..=4).map(|q| Hex::new(q, 0)).collect::<Vec<_>>()
        );
    }

    #[test]
    fn same_endpoint() {
        let rng = HexRange::new(0, 0, 4, 4);
        let mut pr = HexPathRange::new(rng);
        let p = pr.astar_path(&Plane(rng), Hex::new(2, 2), Hex::new(2, 2));
        assert_eq!(p, Some(vec![Hex::new(2, 2)]));
        assert_eq!(pr.g_score(Hex::new(2, 2)), Some(0));
    }

    #[test]
    fn endpoint_outside_range() {
        let rng = HexRange::new(0, 0, 4, 4);
        let mut pr = HexPathRange::new(rng);
        assert!(pr.astar_path(&Plane(rng), Hex::new(0, 0), Hex::new(9, 9)).is_none());
        assert!(pr.astar_path(&Plane(rng), Hex::new(-1, 0), Hex::new(1, 1)).is_none());
    }

    #[test]
    fn budget_exhaustion_yields_none() {
        let rng = HexRange::new(0, 0, 20, 20);
        let mut pr =
            HexPathRange::new(rng).with_config(SearchConfig::new().with_max_iterations(3));
        assert!(pr.astar_path(&Plane(rng), Hex::new(0, 0), Hex::new(19, 19)).is_none());
        // Zero expansions are enough when start is the goal.
        assert!(pr.astar_path(&Plane(rng), Hex::new(5, 5), Hex::new(5, 5)).is_some());
    }

    #[test]
    fn generation_wrap_resets_nodes() {
        let rng = HexRange::new(0, 0, 5, 5);
        let mut pr = HexPathRange::new(rng);
        pr.astar_generation = u32::MAX;
        let p = pr.astar_path(&Plane(rng), Hex::new(0, 0), Hex::new(3, 0)).unwrap();
        assert_eq!(p.len(), 4);
        assert_eq!(pr.astar_generation, 1);
    }
}
