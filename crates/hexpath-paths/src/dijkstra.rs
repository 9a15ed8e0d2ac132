use std::collections::BinaryHeap;

use hexpath_core::Hex;

use crate::HexPathRange;
use crate::pathrange::{NodeRef, PathNode, UNREACHABLE, bump_generation};
use crate::traits::WeightedPather;

impl HexPathRange {
    /// Compute a multi-source Dijkstra cost map: every cell reachable from
    /// any source within `max_cost`, e.g. a unit's movement range.
    ///
    /// Every source starts at cost 0. Returns the reached nodes in the order
    /// they were finalized (non-decreasing cost).
    pub fn dijkstra_map<P: WeightedPather>(
        &mut self,
        pather: &P,
        sources: &[Hex],
        max_cost: i64,
    ) -> &[PathNode] {
        for v in self.dijkstra_map.iter_mut() {
            *v = UNREACHABLE;
        }
        self.dijkstra_results.clear();

        let cur_gen = bump_generation(&mut self.dijkstra_generation, &mut self.dijkstra_nodes);

        let mut seq: u64 = 0;
        let mut open: BinaryHeap<NodeRef> = BinaryHeap::new();

        for &src in sources {
            if let Some(si) = self.idx(src) {
                let n = &mut self.dijkstra_nodes[si];
                n.g = 0;
                n.f = 0;
                n.generation = cur_gen;
                n.open = true;
                self.dijkstra_map[si] = 0;
                seq += 1;
                open.push(NodeRef {
                    idx: si,
                    f: 0,
                    h: 0,
                    seq,
                });
            }
        }

        let mut nbuf = std::mem::take(&mut self.nbuf);

        while let Some(current) = open.pop() {
            let ci = current.idx;
            let cn = &self.dijkstra_nodes[ci];
            if cn.generation != cur_gen || !cn.open {
                continue;
            }
            let current_g = cn.g;
            self.dijkstra_nodes[ci].open = false;

            let ch = self.hex(ci);
            self.dijkstra_results.push(PathNode {
                pos: ch,
                cost: current_g,
            });

            nbuf.clear();
            pather.neighbors(ch, &mut nbuf);

            for &nh in nbuf.iter() {
                let Some(ni) = self.idx(nh) else {
                    continue;
                };
                let tentative = current_g.saturating_add(i64::from(pather.cost(ch, nh)));
                if tentative > max_cost {
                    continue;
                }

                let n = &mut self.dijkstra_nodes[ni];
                if n.generation == cur_gen {
                    if tentative >= n.g {
                        continue;
                    }
                } else {
                    n.generation = cur_gen;
                    n.g = UNREACHABLE;
                }

                n.g = tentative;
                n.f = tentative;
                n.open = true;
                self.dijkstra_map[ni] = tentative;
                seq += 1;
                open.push(NodeRef {
                    idx: ni,
                    f: tentative,
                    h: 0,
                    seq,
                });
            }
        }

        self.nbuf = nbuf;
        log::debug!(
            "dijkstra map from {} sources: {} cells within {max_cost}",
            sources.len(),
            self.dijkstra_results.len()
        );
        &self.dijkstra_results
    }

    /// Query the Dijkstra cost at a specific coordinate.
    ///
    /// Returns [`UNREACHABLE`] if the coordinate is outside the range or was
    /// not reached by the last `dijkstra_map` call.
    pub fn dijkstra_at(&self, h: Hex) -> i64 {
        match self.idx(h) {
            Some(i) => self.dijkstra_map[i],
            None => UNREACHABLE,
        }
    }
}
