//! Spanning forests using Kruskal's algorithm.
//!
//! Edges are sorted by weight (iteration order breaks ties), then accepted
//! whenever their endpoints are in different disjoint sets. A disconnected
//! graph yields a forest with one tree per connected component, never an
//! error.

use std::cmp::Ordering;
use std::fmt;
use std::hash::Hash;

use crate::{EdgeId, EdgeKind, Graph};

/// Union-Find over dense vertex handles for Kruskal's algorithm.
struct UnionFind {
    parent: Vec<u32>,
    rank: Vec<u32>,
}

impl UnionFind {
    fn new(len: usize) -> Self {
        Self {
            parent: (0..len as u32).collect(),
            rank: vec![0; len],
        }
    }

    fn find(&mut self, x: u32) -> u32 {
        let p = self.parent[x as usize];
        if p == x {
            x
        } else {
            let root = self.find(p);
            self.parent[x as usize] = root;
            root
        }
    }

    fn union(&mut self, x: u32, y: u32) -> bool {
        let rx = self.find(x);
        let ry = self.find(y);
        if rx == ry {
            return false;
        }

        match self.rank[rx as usize].cmp(&self.rank[ry as usize]) {
            Ordering::Less => self.parent[rx as usize] = ry,
            Ordering::Greater => self.parent[ry as usize] = rx,
            Ordering::Equal => {
                self.parent[ry as usize] = rx;
                self.rank[rx as usize] += 1;
            },
        }
        true
    }
}

impl<V, K> Graph<V, K>
where
    V: Clone + Eq + Hash + fmt::Debug,
    K: EdgeKind,
{
    /// Computes a minimum-weight spanning forest. The result contains every
    /// vertex; on a disconnected graph each connected component contributes
    /// its own tree.
    #[must_use]
    pub fn minimum_spanning_forest(&self) -> Self {
        self.kruskal(true)
    }

    /// Computes a maximum-weight spanning forest.
    #[must_use]
    pub fn maximum_spanning_forest(&self) -> Self {
        self.kruskal(false)
    }

    fn kruskal(&self, minimum: bool) -> Self {
        let mut forest = Self::with_capacity(self.vertex_count());
        for v in self.vertices() {
            forest.add_vertex(v.clone());
        }

        // Stable sort keeps iteration order for equal weights.
        let mut by_weight: Vec<EdgeId> = self.edge_iter_order().to_vec();
        by_weight.sort_by(|&x, &y| {
            let (wx, wy) = (self.edge_record(x).2, self.edge_record(y).2);
            let ord = wx.partial_cmp(&wy).unwrap_or(Ordering::Equal);
            if minimum {
                ord
            } else {
                ord.reverse()
            }
        });

        let mut sets = UnionFind::new(self.arena_len());
        let mut accepted = 0;
        let spanning = self.vertex_count().saturating_sub(1);
        for eid in by_weight {
            let (a, b, weight) = self.edge_record(eid);
            if sets.union(a.handle(), b.handle()) {
                // Both endpoints are in the forest and distinct.
                let _ = forest.add_weighted_edge(self.vertex(a), self.vertex(b), weight);
                accepted += 1;
                if accepted == spanning {
                    break;
                }
            }
        }
        forest
    }
}
