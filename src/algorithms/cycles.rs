//! Cycle detection.
//!
//! Depth-first exploration from every unvisited vertex with an
//! on-current-path marker. A cycle is declared the instant an edge reaches a
//! vertex that is on the path; undirected graphs skip the immediate parent
//! link so a single edge is not reported as a two-cycle.

use std::fmt;
use std::hash::Hash;

use crate::{EdgeKind, Graph, NodeId};

impl<V, K> Graph<V, K>
where
    V: Clone + Eq + Hash + fmt::Debug,
    K: EdgeKind,
{
    /// Whether the graph contains at least one cycle.
    pub fn detect_cycle(&mut self) -> bool {
        if self.is_empty() {
            return false;
        }
        let run = self.next_run();
        let roots: Vec<NodeId> = self.iter_order().to_vec();
        for v in roots {
            self.touch(v, run);
            if !self.scratch(v).visited && self.cycle_dfs(v, None, run) {
                return true;
            }
        }
        false
    }

    fn cycle_dfs(&mut self, v: NodeId, parent: Option<NodeId>, run: u64) -> bool {
        {
            let s = self.scratch_mut(v);
            s.visited = true;
            // `seen` marks membership on the current DFS path.
            s.seen = true;
        }
        let n = self.adjacency_len(v);
        for i in 0..n {
            let (w, _) = self.adjacent(v, i);
            if !K::IS_DIRECTED && Some(w) == parent {
                continue;
            }
            self.touch(w, run);
            if self.scratch(w).seen {
                return true;
            }
            if !self.scratch(w).visited && self.cycle_dfs(w, Some(v), run) {
                return true;
            }
        }
        self.scratch_mut(v).seen = false;
        false
    }
}

#[cfg(test)]
mod tests {
    use crate::{DirectedGraph, UndirectedGraph};

    #[test]
    fn directed_triangle_has_a_cycle() {
        let mut g = DirectedGraph::new();
        g.add_vertices(["a", "b", "c"]);
        g.add_edge(&"a", &"b").unwrap();
        g.add_edge(&"b", &"c").unwrap();
        g.add_edge(&"c", &"a").unwrap();

        assert!(g.detect_cycle());
    }

    #[test]
    fn directed_two_cycle_is_detected() {
        let mut g = DirectedGraph::new();
        g.add_vertices(["a", "b"]);
        g.add_edge(&"a", &"b").unwrap();
        g.add_edge(&"b", &"a").unwrap();

        assert!(g.detect_cycle());
    }

    #[test]
    fn directed_diamond_is_acyclic() {
        let mut g = DirectedGraph::new();
        g.add_vertices(["a", "b", "c", "d"]);
        g.add_edge(&"a", &"b").unwrap();
        g.add_edge(&"a", &"c").unwrap();
        g.add_edge(&"b", &"d").unwrap();
        g.add_edge(&"c", &"d").unwrap();

        assert!(!g.detect_cycle());
    }

    #[test]
    fn undirected_single_edge_is_not_a_cycle() {
        let mut g = UndirectedGraph::new();
        g.add_vertices(["a", "b"]);
        g.add_edge(&"a", &"b").unwrap();

        assert!(!g.detect_cycle());
    }

    #[test]
    fn undirected_triangle_has_a_cycle() {
        let mut g = UndirectedGraph::new();
        g.add_vertices(["a", "b", "c"]);
        g.add_edge(&"a", &"b").unwrap();
        g.add_edge(&"b", &"c").unwrap();
        g.add_edge(&"c", &"a").unwrap();

        assert!(g.detect_cycle());
    }

    #[test]
    fn cycle_in_a_later_component_is_found() {
        let mut g = DirectedGraph::new();
        g.add_vertices([1, 2, 3, 4]);
        g.add_edge(&1, &2).unwrap();
        g.add_edge(&3, &4).unwrap();
        g.add_edge(&4, &3).unwrap();

        assert!(g.detect_cycle());
    }

    #[test]
    fn empty_and_edgeless_graphs_are_acyclic() {
        let mut g: DirectedGraph<i32> = DirectedGraph::new();
        assert!(!g.detect_cycle());

        g.add_vertices([1, 2, 3]);
        assert!(!g.detect_cycle());
    }

    #[test]
    fn detection_is_repeatable() {
        let mut g = DirectedGraph::new();
        g.add_vertices(["a", "b", "c"]);
        g.add_edge(&"a", &"b").unwrap();
        g.add_edge(&"b", &"c").unwrap();
        g.add_edge(&"c", &"a").unwrap();

        assert!(g.detect_cycle());
        assert!(g.detect_cycle());

        g.remove_edge(&"c", &"a");
        assert!(!g.detect_cycle());
    }
}
