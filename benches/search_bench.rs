// SPDX-License-Identifier: MIT
#![allow(missing_docs)]
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use search_graph::heuristics::{self, GridPoint};
use search_graph::UndirectedGraph;

fn build_open_grid(side: usize) -> UndirectedGraph<GridPoint> {
    heuristics::from_walkable_grid(&vec![vec![true; side]; side], false)
}

fn bench_build_grid(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_grid");

    for side in [8, 16, 32].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(side), side, |b, &side| {
            b.iter(|| black_box(build_open_grid(side)));
        });
    }
    group.finish();
}

fn bench_dijkstra(c: &mut Criterion) {
    let mut group = c.benchmark_group("dijkstra_corner_to_corner");

    for side in [8, 16, 32].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(side), side, |b, &side| {
            let mut g = build_open_grid(side);
            let start = GridPoint::new(0, 0);
            let goal = GridPoint::new(side as i32 - 1, side as i32 - 1);
            b.iter(|| {
                let path = g.find_shortest_path(&start, &goal).unwrap();
                black_box(path);
            });
        });
    }
    group.finish();
}

fn bench_astar(c: &mut Criterion) {
    let mut group = c.benchmark_group("astar_corner_to_corner");

    for side in [8, 16, 32].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(side), side, |b, &side| {
            let mut g = build_open_grid(side);
            let start = GridPoint::new(0, 0);
            let goal = GridPoint::new(side as i32 - 1, side as i32 - 1);
            let mut buf = Vec::new();
            b.iter(|| {
                buf.clear();
                let found = g
                    .shortest_path_into(&start, &goal, Some(heuristics::manhattan), &mut buf)
                    .unwrap();
                black_box(found);
            });
        });
    }
    group.finish();
}

fn bench_spanning_forest(c: &mut Criterion) {
    let mut group = c.benchmark_group("minimum_spanning_forest");

    for side in [8, 16].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(side), side, |b, &side| {
            let g = build_open_grid(side);
            b.iter(|| black_box(g.minimum_spanning_forest()));
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_build_grid,
    bench_dijkstra,
    bench_astar,
    bench_spanning_forest
);
criterion_main!(benches);
