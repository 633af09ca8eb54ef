//! Shortest-path search: Dijkstra and A* over one best-first core.
//!
//! Dijkstra is the no-heuristic case; A* drives the same priority queue
//! with `distance + estimate`. With an admissible heuristic (one that never
//! overestimates the true remaining cost) A* returns optimal paths; that is
//! the caller's responsibility and is not enforced.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::fmt;
use std::hash::Hash;

use tracing::{instrument, trace};

use crate::{EdgeKind, Graph, NodeId, Result};

/// Entry in the search frontier.
#[derive(Debug, Clone, Copy)]
struct FrontierEntry {
    node: NodeId,
    /// Priority key: tentative distance, plus the heuristic estimate when
    /// searching with one.
    key: f64,
    /// Iteration rank of the node; equal keys resolve to the lower rank so
    /// results are reproducible.
    rank: u32,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.node == other.node
    }
}

impl Eq for FrontierEntry {}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse order for a min-heap (lower key = higher priority).
        other
            .key
            .partial_cmp(&self.key)
            .unwrap_or(Ordering::Equal)
            .then_with(|| other.rank.cmp(&self.rank))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<V, K> Graph<V, K>
where
    V: Clone + Eq + Hash + fmt::Debug,
    K: EdgeKind,
{
    /// Finds the shortest path between two vertices with Dijkstra's
    /// algorithm. The returned sequence includes both endpoints and is
    /// empty when the target is unreachable.
    ///
    /// Weights are expected to be non-negative; negative weights are not
    /// rejected but void the shortest-path guarantee.
    ///
    /// # Errors
    ///
    /// `VertexNotFound` if either endpoint is not in the graph.
    pub fn find_shortest_path(&mut self, start: &V, target: &V) -> Result<Vec<V>> {
        let mut path = Vec::new();
        self.shortest_path_into(start, target, None::<fn(&V, &V) -> f64>, &mut path)?;
        Ok(path)
    }

    /// Finds the shortest path between two vertices with the A* algorithm
    /// and the supplied heuristic. Same contract as
    /// [`find_shortest_path`](Self::find_shortest_path).
    pub fn find_shortest_path_with<H>(&mut self, start: &V, target: &V, heuristic: H) -> Result<Vec<V>>
    where
        H: Fn(&V, &V) -> f64,
    {
        let mut path = Vec::new();
        self.shortest_path_into(start, target, Some(heuristic), &mut path)?;
        Ok(path)
    }

    /// Appends the shortest path to `path` instead of allocating a new
    /// sequence, for callers that issue repeated queries. Returns true if a
    /// path was found; on an unreachable target the buffer is left
    /// untouched.
    #[instrument(skip_all)]
    pub fn shortest_path_into<H>(
        &mut self,
        start: &V,
        target: &V,
        heuristic: Option<H>,
        path: &mut Vec<V>,
    ) -> Result<bool>
    where
        H: Fn(&V, &V) -> f64,
    {
        let start = self.node_of(start)?;
        let target = self.node_of(target)?;
        let Some(end) = self.best_first(start, target, heuristic.as_ref()) else {
            return Ok(false);
        };

        // Walk the predecessor chain back to the source, then reverse.
        let first = path.len();
        let mut cur = end;
        loop {
            path.push(self.vertex(cur).clone());
            match self.scratch(cur).prev {
                Some(p) => cur = p,
                None => break,
            }
        }
        path[first..].reverse();
        Ok(true)
    }

    /// The summed weight of a shortest path between the two vertices, or
    /// `f64::INFINITY` when the target is unreachable.
    ///
    /// # Errors
    ///
    /// `VertexNotFound` if either endpoint is not in the graph.
    #[instrument(skip_all)]
    pub fn minimum_distance(&mut self, start: &V, target: &V) -> Result<f64> {
        let start = self.node_of(start)?;
        let target = self.node_of(target)?;
        match self.best_first::<fn(&V, &V) -> f64>(start, target, None) {
            Some(end) => Ok(self.scratch(end).distance),
            None => Ok(f64::INFINITY),
        }
    }

    /// Whether any path leads from `start` to `target`.
    pub fn is_reachable(&mut self, start: &V, target: &V) -> Result<bool> {
        let start = self.node_of(start)?;
        let target = self.node_of(target)?;
        Ok(self
            .best_first::<fn(&V, &V) -> f64>(start, target, None)
            .is_some())
    }

    /// Best-first core shared by Dijkstra and A*. On success the target's
    /// scratch block holds its distance and predecessor chain.
    ///
    /// Settled nodes are never relaxed again; improved frontier nodes are
    /// re-pushed and the stale entry is skipped when popped. The heuristic
    /// estimate is computed once per node per run, on first enqueue.
    fn best_first<H>(&mut self, start: NodeId, target: NodeId, heuristic: Option<&H>) -> Option<NodeId>
    where
        H: Fn(&V, &V) -> f64,
    {
        let run = self.next_run();
        trace!(run, "best-first search");
        self.touch(start, run);
        self.scratch_mut(start).distance = 0.0;
        self.scratch_mut(start).seen = true;

        let mut frontier = BinaryHeap::new();
        frontier.push(FrontierEntry {
            node: start,
            key: 0.0,
            rank: self.rank(start),
        });

        while let Some(entry) = frontier.pop() {
            let u = entry.node;
            if u == target {
                return Some(u);
            }
            if self.scratch(u).visited {
                continue;
            }
            self.scratch_mut(u).visited = true;

            let du = self.scratch(u).distance;
            let n = self.adjacency_len(u);
            for i in 0..n {
                let (v, weight) = self.adjacent(u, i);
                self.touch(v, run);
                if self.scratch(v).visited {
                    continue;
                }
                let candidate = du + weight;
                if candidate < self.scratch(v).distance {
                    let estimate = if self.scratch(v).seen {
                        self.scratch(v).estimate
                    } else {
                        heuristic.map_or(0.0, |h| h(self.vertex(v), self.vertex(target)))
                    };
                    let s = self.scratch_mut(v);
                    s.distance = candidate;
                    s.estimate = estimate;
                    s.prev = Some(u);
                    s.seen = true;
                    frontier.push(FrontierEntry {
                        node: v,
                        key: candidate + estimate,
                        rank: self.rank(v),
                    });
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use crate::heuristics;
    use crate::{DirectedGraph, GraphError, UndirectedGraph};

    #[test]
    fn direct_edge_is_shortest() {
        let mut g = DirectedGraph::new();
        g.add_vertices(["a", "b"]);
        g.add_weighted_edge(&"a", &"b", 5.0).unwrap();

        assert_eq!(g.find_shortest_path(&"a", &"b").unwrap(), vec!["a", "b"]);
        assert!((g.minimum_distance(&"a", &"b").unwrap() - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn prefers_cheaper_detour() {
        let mut g = DirectedGraph::new();
        g.add_vertices(["a", "b", "c"]);
        g.add_weighted_edge(&"a", &"c", 10.0).unwrap();
        g.add_weighted_edge(&"a", &"b", 1.0).unwrap();
        g.add_weighted_edge(&"b", &"c", 2.0).unwrap();

        assert_eq!(
            g.find_shortest_path(&"a", &"c").unwrap(),
            vec!["a", "b", "c"]
        );
        assert!((g.minimum_distance(&"a", &"c").unwrap() - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn unreachable_target_is_not_an_error() {
        let mut g = DirectedGraph::new();
        g.add_vertices(["a", "b"]);

        assert!(g.find_shortest_path(&"a", &"b").unwrap().is_empty());
        assert_eq!(g.minimum_distance(&"a", &"b").unwrap(), f64::INFINITY);
        assert!(!g.is_reachable(&"a", &"b").unwrap());
    }

    #[test]
    fn missing_endpoint_fails_fast() {
        let mut g = DirectedGraph::new();
        g.add_vertex("a");

        assert!(matches!(
            g.find_shortest_path(&"a", &"z"),
            Err(GraphError::VertexNotFound(_))
        ));
    }

    #[test]
    fn start_equals_target() {
        let mut g = UndirectedGraph::new();
        g.add_vertex("a");

        assert_eq!(g.find_shortest_path(&"a", &"a").unwrap(), vec!["a"]);
        assert_eq!(g.minimum_distance(&"a", &"a").unwrap(), 0.0);
    }

    #[test]
    fn directed_edges_are_one_way() {
        let mut g = DirectedGraph::new();
        g.add_vertices(["a", "b"]);
        g.add_edge(&"a", &"b").unwrap();

        assert!(g.is_reachable(&"a", &"b").unwrap());
        assert!(!g.is_reachable(&"b", &"a").unwrap());
    }

    #[test]
    fn path_buffer_is_reused_without_clearing() {
        let mut g = UndirectedGraph::new();
        g.add_vertices(["a", "b"]);
        g.add_edge(&"a", &"b").unwrap();

        let mut buf = vec!["x"];
        let found = g
            .shortest_path_into(&"a", &"b", None::<fn(&&str, &&str) -> f64>, &mut buf)
            .unwrap();
        assert!(found);
        assert_eq!(buf, vec!["x", "a", "b"]);

        let found = g
            .shortest_path_into(&"b", &"a", None::<fn(&&str, &&str) -> f64>, &mut buf)
            .unwrap();
        assert!(found);
        assert_eq!(buf, vec!["x", "a", "b", "b", "a"]);
    }

    #[test]
    fn astar_matches_dijkstra_on_a_corridor() {
        let mut g = heuristics::from_walkable_grid(&vec![vec![true; 1]; 8], false);
        let start = heuristics::GridPoint::new(0, 0);
        let goal = heuristics::GridPoint::new(7, 0);

        let plain = g.minimum_distance(&start, &goal).unwrap();
        let guided = g
            .find_shortest_path_with(&start, &goal, heuristics::manhattan)
            .unwrap();
        assert!((plain - 7.0).abs() < f64::EPSILON);
        assert_eq!(guided.len(), 8);
    }

    #[test]
    fn repeated_searches_reuse_scratch_state() {
        let mut g = DirectedGraph::new();
        g.add_vertices(["a", "b", "c"]);
        g.add_weighted_edge(&"a", &"b", 1.0).unwrap();
        g.add_weighted_edge(&"b", &"c", 1.0).unwrap();

        for _ in 0..10 {
            assert!((g.minimum_distance(&"a", &"c").unwrap() - 2.0).abs() < f64::EPSILON);
            assert_eq!(g.minimum_distance(&"c", &"a").unwrap(), f64::INFINITY);
        }
    }
}
