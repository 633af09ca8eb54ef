//! Topological sorting for directed graphs.
//!
//! Kahn's algorithm: repeatedly emit a vertex of in-degree zero (iteration
//! order decides among candidates) and decrement the in-degrees of its
//! successors. If not every vertex was emitted the graph has a cycle. These
//! methods exist only on `Graph<V, Directed>`; calling them on an undirected
//! graph is a compile error.

use std::collections::VecDeque;
use std::fmt;
use std::hash::Hash;

use crate::{Directed, Graph, NodeId};

impl<V> Graph<V, Directed>
where
    V: Clone + Eq + Hash + fmt::Debug,
{
    /// Re-establishes the graph's own vertex iteration order as a
    /// topological order. Returns false (and leaves the order untouched)
    /// when the graph has a cycle.
    pub fn topological_sort(&mut self) -> bool {
        let mut order = Vec::with_capacity(self.vertex_count());
        if !self.kahn(&mut order) {
            return false;
        }
        self.set_iter_order(order);
        true
    }

    /// Appends a topological order of the vertices to `out` without
    /// disturbing the graph. Returns false when the graph has a cycle; in
    /// that case `out` holds only the prefix computed before termination.
    pub fn topological_sort_into(&self, out: &mut Vec<V>) -> bool {
        let mut order = Vec::with_capacity(self.vertex_count());
        let complete = self.kahn(&mut order);
        out.extend(order.into_iter().map(|id| self.vertex(id).clone()));
        complete
    }

    /// Emits handles in topological order; true when every vertex was
    /// emitted.
    fn kahn(&self, order: &mut Vec<NodeId>) -> bool {
        let mut in_degree = vec![0usize; self.arena_len()];
        for &eid in self.edge_iter_order() {
            let (_, b, _) = self.edge_record(eid);
            in_degree[b.index()] += 1;
        }

        let mut ready: VecDeque<NodeId> = self
            .iter_order()
            .iter()
            .copied()
            .filter(|id| in_degree[id.index()] == 0)
            .collect();

        while let Some(v) = ready.pop_front() {
            order.push(v);
            let n = self.adjacency_len(v);
            for i in 0..n {
                let (w, _) = self.adjacent(v, i);
                in_degree[w.index()] -= 1;
                if in_degree[w.index()] == 0 {
                    ready.push_back(w);
                }
            }
        }
        order.len() == self.vertex_count()
    }
}
