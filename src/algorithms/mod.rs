//! Graph algorithms, implemented as inherent methods on [`crate::Graph`].
//!
//! - Dijkstra and A* shortest paths sharing one best-first core
//! - Bounded breadth-first and depth-first traversal
//! - Minimum and maximum weight spanning forests (Kruskal's algorithm)
//! - Cycle detection
//! - Topological sorting (directed graphs only)

mod cycles;
mod mst;
mod search;
mod topsort;
mod traversal;
