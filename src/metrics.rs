// SPDX-License-Identifier: MIT
//! OpenTelemetry metrics for graph operations.
//!
//! This module provides metrics instrumentation for graph mutation and
//! search operations. Enable the `metrics` feature to use this
//! functionality.

use opentelemetry::{
    global,
    metrics::{Counter, Histogram, Meter, Unit},
    KeyValue,
};

/// Metrics collector for graph operations.
pub struct GraphMetrics {
    /// Counter for vertex operations (add, remove).
    vertex_ops: Counter<u64>,
    /// Counter for edge operations (add, remove, reweight).
    edge_ops: Counter<u64>,
    /// Counter for search and traversal runs.
    searches: Counter<u64>,
    /// Histogram for search latency in seconds.
    search_latency: Histogram<f64>,
    /// Histogram for vertices settled per search.
    vertices_settled: Histogram<u64>,
}

impl GraphMetrics {
    /// Creates a new metrics collector using the global meter provider.
    #[must_use]
    pub fn new() -> Self {
        let meter = global::meter("search_graph");
        Self::with_meter(&meter)
    }

    /// Creates a new metrics collector with a specific meter.
    #[must_use]
    pub fn with_meter(meter: &Meter) -> Self {
        let vertex_ops = meter
            .u64_counter("search_graph.vertex_operations")
            .with_description("Total number of vertex operations")
            .init();

        let edge_ops = meter
            .u64_counter("search_graph.edge_operations")
            .with_description("Total number of edge operations")
            .init();

        let searches = meter
            .u64_counter("search_graph.searches")
            .with_description("Total number of search and traversal runs")
            .init();

        let search_latency = meter
            .f64_histogram("search_graph.search_latency")
            .with_description("Search latency in seconds")
            .with_unit(Unit::new("s"))
            .init();

        let vertices_settled = meter
            .u64_histogram("search_graph.vertices_settled")
            .with_description("Vertices settled per search run")
            .init();

        Self {
            vertex_ops,
            edge_ops,
            searches,
            search_latency,
            vertices_settled,
        }
    }

    /// Records a vertex operation.
    pub fn record_vertex_op(&self, op: &str) {
        self.vertex_ops.add(1, &[KeyValue::new("op", op.to_string())]);
    }

    /// Records an edge operation.
    pub fn record_edge_op(&self, op: &str) {
        self.edge_ops.add(1, &[KeyValue::new("op", op.to_string())]);
    }

    /// Records a search or traversal run.
    pub fn record_search(&self, algorithm: &str) {
        self.searches
            .add(1, &[KeyValue::new("algorithm", algorithm.to_string())]);
    }

    /// Records search latency.
    pub fn record_search_latency(&self, latency_secs: f64, algorithm: &str) {
        self.search_latency.record(
            latency_secs,
            &[KeyValue::new("algorithm", algorithm.to_string())],
        );
    }

    /// Records the number of vertices a search settled.
    pub fn record_vertices_settled(&self, count: u64, algorithm: &str) {
        self.vertices_settled
            .record(count, &[KeyValue::new("algorithm", algorithm.to_string())]);
    }
}

impl Default for GraphMetrics {
    fn default() -> Self {
        Self::new()
    }
}
