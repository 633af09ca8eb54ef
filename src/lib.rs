//! Generic weighted-graph engine for directed and undirected graphs over
//! arbitrary vertex types, with priority-queue shortest-path search (Dijkstra
//! and A*), bounded breadth/depth traversal, spanning forests, cycle
//! detection and topological sorting.

// Pedantic lint configuration for search_graph
#![allow(clippy::cast_possible_truncation)] // vertex and edge counts fit in u32 handles
#![allow(clippy::missing_errors_doc)] // error conditions are self-evident from Result types
#![allow(clippy::uninlined_format_args)] // keep format strings readable

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;

use serde::{Deserialize, Serialize};

mod algorithms;
mod error;
pub mod heuristics;
#[cfg(feature = "metrics")]
pub mod metrics;

pub use error::{GraphError, Result};

/// Weight assigned to edges created without an explicit weight.
pub const DEFAULT_EDGE_WEIGHT: f64 = 1.0;

/// Dense handle into the vertex arena. Internal only; external callers
/// interact with vertex values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(u32);

impl NodeId {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }

    pub(crate) fn handle(self) -> u32 {
        self.0
    }
}

/// Dense handle into the edge arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct EdgeId(u32);

impl EdgeId {
    fn index(self) -> usize {
        self.0 as usize
    }
}

mod sealed {
    pub trait Sealed {}
}

/// Edge-kind strategy: fixes directedness and edge-key normalization for a
/// graph at the type level, so directed-only operations are compile-time
/// restricted and there is no dispatch on the hot path.
pub trait EdgeKind: sealed::Sealed + 'static {
    /// Fixed directedness of any graph built with this strategy.
    const IS_DIRECTED: bool;
}

/// Edges are ordered pairs: `(a, b)` and `(b, a)` are distinct edges.
#[derive(Debug, Clone, Copy)]
pub enum Directed {}

impl sealed::Sealed for Directed {}

impl EdgeKind for Directed {
    const IS_DIRECTED: bool = true;
}

/// Edges are symmetric: `(a, b)` and `(b, a)` are the same logical edge,
/// stored once and reachable from both endpoints.
#[derive(Debug, Clone, Copy)]
pub enum Undirected {}

impl sealed::Sealed for Undirected {}

impl EdgeKind for Undirected {
    const IS_DIRECTED: bool = false;
}

/// A graph whose edges are ordered pairs.
pub type DirectedGraph<V> = Graph<V, Directed>;

/// A graph whose edges are unordered pairs.
pub type UndirectedGraph<V> = Graph<V, Undirected>;

/// Read-only view of one weighted edge.
///
/// Identity of a logical edge is its endpoint pair (normalized for
/// undirected graphs); the weight never participates in identity and may be
/// updated in place by re-adding the edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge<V> {
    pub a: V,
    pub b: V,
    pub weight: f64,
}

#[derive(Debug, Clone, Copy)]
struct EdgeRecord {
    a: NodeId,
    b: NodeId,
    weight: f64,
}

impl EdgeRecord {
    fn other(&self, n: NodeId) -> NodeId {
        if self.a == n {
            self.b
        } else {
            self.a
        }
    }
}

/// Per-vertex algorithm scratch state, reset lazily via the run counter
/// instead of an O(V) clear before every search.
#[derive(Debug, Clone)]
pub(crate) struct Scratch {
    /// Run id this block was last reset for.
    pub(crate) run: u64,
    /// Settled (popped from the frontier) in the current run.
    pub(crate) visited: bool,
    /// In the frontier (search) or on the current DFS path (cycle check).
    pub(crate) seen: bool,
    /// Best known cost from the current run's source.
    pub(crate) distance: f64,
    /// Heuristic estimate to the current run's target.
    pub(crate) estimate: f64,
    /// Predecessor on the current run's best path.
    pub(crate) prev: Option<NodeId>,
    /// Discovery depth in the current run.
    pub(crate) depth: usize,
}

impl Scratch {
    /// Resets to defaults when stamped with a different run id. Returns true
    /// if the block was stale.
    pub(crate) fn reset_if_stale(&mut self, run: u64) -> bool {
        if self.run == run {
            return false;
        }
        self.run = run;
        self.visited = false;
        self.seen = false;
        self.distance = f64::INFINITY;
        self.estimate = 0.0;
        self.prev = None;
        self.depth = 0;
        true
    }
}

impl Default for Scratch {
    fn default() -> Self {
        Self {
            run: 0,
            visited: false,
            seen: false,
            distance: f64::INFINITY,
            estimate: 0.0,
            prev: None,
            depth: 0,
        }
    }
}

#[derive(Debug, Clone)]
struct NodeSlot<V> {
    vertex: V,
    /// Edges leaving this vertex (for undirected graphs, all incident
    /// edges), in insertion order.
    adjacency: Vec<EdgeId>,
    /// Cached position in the vertex iteration order; tie-breaker for equal
    /// search keys.
    rank: u32,
    scratch: Scratch,
}

/// Weighted graph over arbitrary vertex values.
///
/// Vertices are stored in a dense arena; all algorithm scratch state lives
/// in the arena slots and is reset lazily per run. Vertex and edge
/// iteration preserve insertion order until re-sorted, and every algorithm
/// breaks cost ties by the current iteration order, so outputs are
/// reproducible.
///
/// The graph performs no internal locking; algorithm entry points take
/// `&mut self` (they stamp the run counter), which makes concurrent
/// searches on one instance a compile error rather than a data race.
pub struct Graph<V, K: EdgeKind = Directed> {
    lookup: HashMap<V, NodeId>,
    slots: Vec<NodeSlot<V>>,
    vertex_order: Vec<NodeId>,
    records: Vec<EdgeRecord>,
    edge_order: Vec<EdgeId>,
    edge_lookup: HashMap<(NodeId, NodeId), EdgeId>,
    run: u64,
    _kind: PhantomData<K>,
}

impl<V, K> fmt::Debug for Graph<V, K>
where
    K: EdgeKind,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Graph")
            .field("directed", &K::IS_DIRECTED)
            .field("vertices", &self.vertex_order.len())
            .field("edges", &self.edge_order.len())
            .finish_non_exhaustive()
    }
}

impl<V, K> Graph<V, K>
where
    V: Clone + Eq + Hash + fmt::Debug,
    K: EdgeKind,
{
    #[must_use]
    pub fn new() -> Self {
        Self {
            lookup: HashMap::new(),
            slots: Vec::new(),
            vertex_order: Vec::new(),
            records: Vec::new(),
            edge_order: Vec::new(),
            edge_lookup: HashMap::new(),
            run: 0,
            _kind: PhantomData,
        }
    }

    /// Creates a graph with room for `vertices` vertex slots.
    #[must_use]
    pub fn with_capacity(vertices: usize) -> Self {
        Self {
            lookup: HashMap::with_capacity(vertices),
            slots: Vec::with_capacity(vertices),
            vertex_order: Vec::with_capacity(vertices),
            records: Vec::new(),
            edge_order: Vec::new(),
            edge_lookup: HashMap::new(),
            run: 0,
            _kind: PhantomData,
        }
    }

    /// Whether edges of this graph are ordered pairs. Fixed by the kind
    /// parameter, not mutable per instance.
    #[must_use]
    pub fn is_directed(&self) -> bool {
        K::IS_DIRECTED
    }

    /// Adds a vertex. Returns true if it was newly inserted, false (and
    /// leaves the graph untouched) if it was already present.
    pub fn add_vertex(&mut self, v: V) -> bool {
        if self.lookup.contains_key(&v) {
            return false;
        }
        let id = NodeId(self.slots.len() as u32);
        let rank = self.vertex_order.len() as u32;
        self.lookup.insert(v.clone(), id);
        self.slots.push(NodeSlot {
            vertex: v,
            adjacency: Vec::new(),
            rank,
            scratch: Scratch::default(),
        });
        self.vertex_order.push(id);
        true
    }

    /// Adds every vertex from the iterator, skipping those already present.
    pub fn add_vertices<I>(&mut self, vertices: I)
    where
        I: IntoIterator<Item = V>,
    {
        for v in vertices {
            self.add_vertex(v);
        }
    }

    /// Removes a vertex and every edge incident to it. Returns false if the
    /// vertex was not in the graph.
    pub fn remove_vertex(&mut self, v: &V) -> bool {
        let Some(&id) = self.lookup.get(v) else {
            return false;
        };

        // Incident edges, highest index first, so the remaining handles stay
        // valid while purging.
        let incident: Vec<EdgeId> = self
            .records
            .iter()
            .enumerate()
            .rev()
            .filter(|(_, r)| r.a == id || r.b == id)
            .map(|(i, _)| EdgeId(i as u32))
            .collect();
        for eid in incident {
            let r = self.records[eid.index()];
            self.edge_lookup.remove(&Self::canonical(r.a, r.b));
            self.purge_edge(eid);
        }

        self.lookup.remove(v);
        self.slots.remove(id.index());
        self.vertex_order.retain(|&n| n != id);
        for n in self.lookup.values_mut() {
            if n.0 > id.0 {
                n.0 -= 1;
            }
        }
        for n in &mut self.vertex_order {
            if n.0 > id.0 {
                n.0 -= 1;
            }
        }
        for r in &mut self.records {
            if r.a.0 > id.0 {
                r.a.0 -= 1;
            }
            if r.b.0 > id.0 {
                r.b.0 -= 1;
            }
        }
        // Endpoint handles shifted; rebuild the normalized-pair table.
        let mut rebuilt = HashMap::with_capacity(self.records.len());
        for (i, r) in self.records.iter().enumerate() {
            rebuilt.insert(Self::canonical(r.a, r.b), EdgeId(i as u32));
        }
        self.edge_lookup = rebuilt;
        self.refresh_ranks();
        true
    }

    /// Adds an edge with the default weight (1.0), or updates the weight of
    /// an existing edge between the pair.
    pub fn add_edge(&mut self, u: &V, v: &V) -> Result<Edge<V>> {
        self.add_weighted_edge(u, v, DEFAULT_EDGE_WEIGHT)
    }

    /// Adds an edge between two existing vertices, or updates the weight of
    /// the existing edge between the pair in place.
    ///
    /// Both endpoints must already be in the graph, and self-loops are
    /// rejected; either case is a usage error and fails fast.
    pub fn add_weighted_edge(&mut self, u: &V, v: &V, weight: f64) -> Result<Edge<V>> {
        let a = self
            .lookup
            .get(u)
            .copied()
            .ok_or_else(|| GraphError::VertexNotFound(format!("{u:?}")))?;
        let b = self
            .lookup
            .get(v)
            .copied()
            .ok_or_else(|| GraphError::VertexNotFound(format!("{v:?}")))?;
        if a == b {
            return Err(GraphError::SelfLoop(format!("{u:?}")));
        }

        let key = Self::canonical(a, b);
        if let Some(&eid) = self.edge_lookup.get(&key) {
            self.records[eid.index()].weight = weight;
            return Ok(self.view(eid));
        }

        let eid = EdgeId(self.records.len() as u32);
        self.records.push(EdgeRecord { a, b, weight });
        self.edge_lookup.insert(key, eid);
        self.edge_order.push(eid);
        self.slots[a.index()].adjacency.push(eid);
        if !K::IS_DIRECTED {
            self.slots[b.index()].adjacency.push(eid);
        }
        Ok(self.view(eid))
    }

    /// Removes the logical edge between two vertices (both adjacency records
    /// for undirected graphs). Returns false if there is no such edge.
    pub fn remove_edge(&mut self, u: &V, v: &V) -> bool {
        let (Some(&a), Some(&b)) = (self.lookup.get(u), self.lookup.get(v)) else {
            return false;
        };
        let Some(eid) = self.edge_lookup.remove(&Self::canonical(a, b)) else {
            return false;
        };
        self.purge_edge(eid);
        true
    }

    /// Whether an edge exists between the two vertices. For undirected
    /// graphs the argument order is irrelevant.
    #[must_use]
    pub fn edge_exists(&self, u: &V, v: &V) -> bool {
        self.edge_id(u, v).is_some()
    }

    /// The edge between two vertices, if any. For undirected graphs the
    /// argument order is irrelevant.
    #[must_use]
    pub fn get_edge(&self, u: &V, v: &V) -> Option<Edge<V>> {
        self.edge_id(u, v).map(|eid| self.view(eid))
    }

    #[must_use]
    pub fn contains_vertex(&self, v: &V) -> bool {
        self.lookup.contains_key(v)
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertex_order.len()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edge_order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertex_order.is_empty()
    }

    /// Vertices in iteration order.
    pub fn vertices(&self) -> impl Iterator<Item = &V> {
        self.vertex_order
            .iter()
            .map(|id| &self.slots[id.index()].vertex)
    }

    /// Edges in iteration order.
    pub fn edges(&self) -> impl Iterator<Item = Edge<V>> + '_ {
        self.edge_order.iter().map(|&eid| self.view(eid))
    }

    /// Number of edges leaving the vertex (every incident edge for
    /// undirected graphs), or None if the vertex is absent.
    #[must_use]
    pub fn out_degree(&self, v: &V) -> Option<usize> {
        self.lookup
            .get(v)
            .map(|id| self.slots[id.index()].adjacency.len())
    }

    /// Number of edges arriving at the vertex, or None if it is absent.
    #[must_use]
    pub fn in_degree(&self, v: &V) -> Option<usize> {
        let id = *self.lookup.get(v)?;
        if K::IS_DIRECTED {
            Some(self.records.iter().filter(|r| r.b == id).count())
        } else {
            Some(self.slots[id.index()].adjacency.len())
        }
    }

    /// Total number of incident edges, or None if the vertex is absent.
    #[must_use]
    pub fn degree(&self, v: &V) -> Option<usize> {
        let id = *self.lookup.get(v)?;
        let out = self.slots[id.index()].adjacency.len();
        if K::IS_DIRECTED {
            Some(out + self.records.iter().filter(|r| r.b == id).count())
        } else {
            Some(out)
        }
    }

    /// Re-establishes vertex iteration order by the vertex type's total
    /// order.
    pub fn sort_vertices(&mut self)
    where
        V: Ord,
    {
        self.sort_vertices_by(V::cmp);
    }

    /// Re-establishes vertex iteration order with a caller-supplied
    /// comparator. The sort is stable.
    pub fn sort_vertices_by<F>(&mut self, mut cmp: F)
    where
        F: FnMut(&V, &V) -> Ordering,
    {
        let slots = &self.slots;
        self.vertex_order
            .sort_by(|x, y| cmp(&slots[x.index()].vertex, &slots[y.index()].vertex));
        self.refresh_ranks();
    }

    /// Re-establishes edge iteration order with a caller-supplied
    /// comparator. The sort is stable.
    pub fn sort_edges_by<F>(&mut self, mut cmp: F)
    where
        F: FnMut(&Edge<V>, &Edge<V>) -> Ordering,
    {
        let views: Vec<Edge<V>> = self.edge_order.iter().map(|&eid| self.view(eid)).collect();
        let mut positions: Vec<usize> = (0..self.edge_order.len()).collect();
        positions.sort_by(|&i, &j| cmp(&views[i], &views[j]));
        self.edge_order = positions.into_iter().map(|i| self.edge_order[i]).collect();
    }

    /// Re-establishes edge iteration order ascending by weight.
    pub fn sort_edges_by_weight(&mut self) {
        self.sort_edges_by(|x, y| x.weight.partial_cmp(&y.weight).unwrap_or(Ordering::Equal));
    }

    /// Removes every vertex and edge. The run counter is preserved so
    /// previously stamped scratch state can never leak into a later run.
    pub fn clear(&mut self) {
        self.lookup.clear();
        self.slots.clear();
        self.vertex_order.clear();
        self.records.clear();
        self.edge_order.clear();
        self.edge_lookup.clear();
    }

    // ---- crate-internal support for the algorithm modules ----

    /// Normalized lookup key for an endpoint pair. Undirected graphs order
    /// the pair by handle so `(u, v)` and `(v, u)` collide; edge identity is
    /// this key alone, never the weight.
    fn canonical(a: NodeId, b: NodeId) -> (NodeId, NodeId) {
        if K::IS_DIRECTED || a.0 <= b.0 {
            (a, b)
        } else {
            (b, a)
        }
    }

    fn edge_id(&self, u: &V, v: &V) -> Option<EdgeId> {
        let a = *self.lookup.get(u)?;
        let b = *self.lookup.get(v)?;
        self.edge_lookup.get(&Self::canonical(a, b)).copied()
    }

    fn view(&self, eid: EdgeId) -> Edge<V> {
        let r = &self.records[eid.index()];
        Edge {
            a: self.slots[r.a.index()].vertex.clone(),
            b: self.slots[r.b.index()].vertex.clone(),
            weight: r.weight,
        }
    }

    /// Drops one edge record and compacts the edge arena, fixing every
    /// stored handle above the removed slot. The caller must have removed
    /// the normalized-pair table entry already.
    fn purge_edge(&mut self, eid: EdgeId) {
        let r = self.records.remove(eid.index());
        self.slots[r.a.index()].adjacency.retain(|&e| e != eid);
        if !K::IS_DIRECTED {
            self.slots[r.b.index()].adjacency.retain(|&e| e != eid);
        }
        self.edge_order.retain(|&e| e != eid);
        for slot in &mut self.slots {
            for e in &mut slot.adjacency {
                if e.0 > eid.0 {
                    e.0 -= 1;
                }
            }
        }
        for e in &mut self.edge_order {
            if e.0 > eid.0 {
                e.0 -= 1;
            }
        }
        for e in self.edge_lookup.values_mut() {
            if e.0 > eid.0 {
                e.0 -= 1;
            }
        }
    }

    fn refresh_ranks(&mut self) {
        for (i, id) in self.vertex_order.iter().enumerate() {
            self.slots[id.index()].rank = i as u32;
        }
    }

    pub(crate) fn node_of(&self, v: &V) -> Result<NodeId> {
        self.lookup
            .get(v)
            .copied()
            .ok_or_else(|| GraphError::VertexNotFound(format!("{v:?}")))
    }

    /// Stamps a fresh run id. Scratch blocks reset against it on first
    /// touch instead of an eager O(V) clear.
    pub(crate) fn next_run(&mut self) -> u64 {
        self.run += 1;
        self.run
    }

    pub(crate) fn touch(&mut self, id: NodeId, run: u64) -> bool {
        self.slots[id.index()].scratch.reset_if_stale(run)
    }

    pub(crate) fn scratch(&self, id: NodeId) -> &Scratch {
        &self.slots[id.index()].scratch
    }

    pub(crate) fn scratch_mut(&mut self, id: NodeId) -> &mut Scratch {
        &mut self.slots[id.index()].scratch
    }

    pub(crate) fn vertex(&self, id: NodeId) -> &V {
        &self.slots[id.index()].vertex
    }

    pub(crate) fn rank(&self, id: NodeId) -> u32 {
        self.slots[id.index()].rank
    }

    pub(crate) fn adjacency_len(&self, id: NodeId) -> usize {
        self.slots[id.index()].adjacency.len()
    }

    /// The `i`-th neighbor of `id` in adjacency order, with the connecting
    /// edge's weight.
    pub(crate) fn adjacent(&self, id: NodeId, i: usize) -> (NodeId, f64) {
        let eid = self.slots[id.index()].adjacency[i];
        let r = &self.records[eid.index()];
        (r.other(id), r.weight)
    }

    pub(crate) fn iter_order(&self) -> &[NodeId] {
        &self.vertex_order
    }

    pub(crate) fn edge_iter_order(&self) -> &[EdgeId] {
        &self.edge_order
    }

    pub(crate) fn edge_record(&self, eid: EdgeId) -> (NodeId, NodeId, f64) {
        let r = &self.records[eid.index()];
        (r.a, r.b, r.weight)
    }

    pub(crate) fn arena_len(&self) -> usize {
        self.slots.len()
    }

    pub(crate) fn set_iter_order(&mut self, order: Vec<NodeId>) {
        self.vertex_order = order;
        self.refresh_ranks();
    }
}

impl<V, K> Default for Graph<V, K>
where
    V: Clone + Eq + Hash + fmt::Debug,
    K: EdgeKind,
{
    fn default() -> Self {
        Self::new()
    }
}
