//! Distance estimators for 2D grid vertices, and walkability-grid
//! construction.
//!
//! The estimator functions match the signature expected by
//! [`Graph::find_shortest_path_with`](crate::Graph::find_shortest_path_with)
//! and can be passed directly:
//!
//! ```
//! use search_graph::heuristics::{self, GridPoint};
//!
//! let mut g = heuristics::from_walkable_grid(&vec![vec![true; 3]; 3], false);
//! let path = g
//!     .find_shortest_path_with(&GridPoint::new(0, 0), &GridPoint::new(2, 2), heuristics::manhattan)
//!     .unwrap();
//! assert_eq!(path.len(), 5);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::UndirectedGraph;

/// A 2D grid coordinate, usable as a graph vertex.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct GridPoint {
    pub x: i32,
    pub y: i32,
}

impl GridPoint {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for GridPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// `|dx| + |dy|`. Admissible when only 4-directional moves are allowed.
#[must_use]
pub fn manhattan(a: &GridPoint, b: &GridPoint) -> f64 {
    f64::from((a.x - b.x).abs()) + f64::from((a.y - b.y).abs())
}

/// `max(|dx|, |dy|)`. Admissible for 8-directional movement with equal
/// diagonal and orthogonal cost.
#[must_use]
pub fn chebyshev(a: &GridPoint, b: &GridPoint) -> f64 {
    f64::from((a.x - b.x).abs().max((a.y - b.y).abs()))
}

/// Straight-line distance, as the crow flies. Admissible.
#[must_use]
pub fn euclidean(a: &GridPoint, b: &GridPoint) -> f64 {
    f64::from(a.x - b.x).hypot(f64::from(a.y - b.y))
}

/// Constant 1.0. Degenerates A* into Dijkstra-like behavior; included for
/// API symmetry rather than optimization.
#[must_use]
pub fn dijkstra(_a: &GridPoint, _b: &GridPoint) -> f64 {
    1.0
}

/// Clockwise neighbor offsets; the first four are the cardinal directions.
const NEIGHBORS: [(i32, i32); 8] = [
    (0, -1),
    (1, 0),
    (0, 1),
    (-1, 0),
    (1, -1),
    (1, 1),
    (-1, 1),
    (-1, -1),
];

/// Builds a unit-weight graph from a finished walkability mask: every
/// passable cell becomes a vertex connected to its passable 4-directional
/// neighbors, or 8-directional when `eight_way` is set.
///
/// `grid[x][y] == true` marks the cell at column `x`, row `y` as passable.
#[must_use]
pub fn from_walkable_grid(grid: &[Vec<bool>], eight_way: bool) -> UndirectedGraph<GridPoint> {
    let mut graph = UndirectedGraph::with_capacity(grid.iter().map(Vec::len).sum());
    for (x, column) in grid.iter().enumerate() {
        for (y, &passable) in column.iter().enumerate() {
            if passable {
                graph.add_vertex(GridPoint::new(x as i32, y as i32));
            }
        }
    }

    let steps = if eight_way {
        &NEIGHBORS[..]
    } else {
        &NEIGHBORS[..4]
    };
    let cells: Vec<GridPoint> = graph.vertices().copied().collect();
    for center in cells {
        for &(dx, dy) in steps {
            let neighbor = GridPoint::new(center.x + dx, center.y + dy);
            if graph.contains_vertex(&neighbor) && !graph.edge_exists(&center, &neighbor) {
                // Both cells are vertices already.
                let _ = graph.add_edge(&center, &neighbor);
            }
        }
    }
    graph
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manhattan_sums_the_axes() {
        let a = GridPoint::new(0, 0);
        let b = GridPoint::new(3, -4);
        assert!((manhattan(&a, &b) - 7.0).abs() < f64::EPSILON);
    }

    #[test]
    fn chebyshev_takes_the_longer_axis() {
        let a = GridPoint::new(1, 1);
        let b = GridPoint::new(4, 2);
        assert!((chebyshev(&a, &b) - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn euclidean_is_the_hypotenuse() {
        let a = GridPoint::new(0, 0);
        let b = GridPoint::new(3, 4);
        assert!((euclidean(&a, &b) - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn dijkstra_estimator_is_constant() {
        let a = GridPoint::new(0, 0);
        let b = GridPoint::new(100, 100);
        assert!((dijkstra(&a, &b) - 1.0).abs() < f64::EPSILON);
        assert!((dijkstra(&a, &a) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn grid_connects_cardinal_neighbors() {
        let g = from_walkable_grid(&vec![vec![true; 2]; 2], false);
        assert_eq!(g.vertex_count(), 4);
        assert_eq!(g.edge_count(), 4);
        assert!(g.edge_exists(&GridPoint::new(0, 0), &GridPoint::new(1, 0)));
        assert!(!g.edge_exists(&GridPoint::new(0, 0), &GridPoint::new(1, 1)));
    }

    #[test]
    fn eight_way_grid_adds_diagonals() {
        let g = from_walkable_grid(&vec![vec![true; 2]; 2], true);
        assert_eq!(g.edge_count(), 6);
        assert!(g.edge_exists(&GridPoint::new(0, 0), &GridPoint::new(1, 1)));
    }

    #[test]
    fn walls_are_neither_vertices_nor_endpoints() {
        let mut grid = vec![vec![true; 3]; 3];
        grid[1][1] = false;
        let g = from_walkable_grid(&grid, false);

        assert_eq!(g.vertex_count(), 8);
        assert!(!g.contains_vertex(&GridPoint::new(1, 1)));
        assert!(!g.edge_exists(&GridPoint::new(1, 0), &GridPoint::new(1, 1)));
    }

    #[test]
    fn ragged_columns_are_tolerated() {
        let grid = vec![vec![true, true], vec![true]];
        let g = from_walkable_grid(&grid, false);
        assert_eq!(g.vertex_count(), 3);
        assert!(g.edge_exists(&GridPoint::new(0, 0), &GridPoint::new(1, 0)));
        assert!(!g.contains_vertex(&GridPoint::new(1, 1)));
    }
}
