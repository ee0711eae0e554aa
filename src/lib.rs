//! # grid_router
//!
//! A grid-based pathfinding and routing engine. Computes shortest paths on an
//! 8-connected grid under two cost models (uniform-cost
//! [Dijkstra](https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm) and
//! heuristic-guided [A*](https://en.wikipedia.org/wiki/A*_search_algorithm)
//! with an octile heuristic), exposes the search as a lazy step sequence for
//! frame-by-frame rendering, and routes through user-declared stops connected
//! by a sparse graph. Pre-computes
//! [connected components](https://en.wikipedia.org/wiki/Component_(graph_theory))
//! so reachability can be queried without flood-filling.
//!
//! All mutable state lives in a [Session] owned by the caller; the engine
//! itself holds no globals and installs no logger.
pub mod best_first;
pub mod grid;
pub mod search;
pub mod session;
pub mod stops;

pub use crate::best_first::SearchEvent;
pub use crate::grid::WallGrid;
pub use crate::search::{search, search_events, Heuristic};
pub use crate::session::Session;
pub use crate::stops::{ConnectionGraph, StopSet};
pub use grid_util::point::Point;

/// Cost of a horizontal or vertical step.
pub const CARDINAL_COST: f64 = 1.0;
/// Cost of a diagonal step. All cost computations in the crate use this exact
/// constant so that path costs from different entry points are comparable.
pub const DIAGONAL_COST: f64 = 1.414;

/// Smallest accepted session grid size.
pub const MIN_GRID_SIZE: usize = 8;
/// Largest accepted session grid size.
pub const MAX_GRID_SIZE: usize = 32;

/// Manhattan distance between two points, as used for connection-graph costs.
pub fn manhattan_distance(a: &Point, b: &Point) -> f64 {
    ((a.x - b.x).abs() + (a.y - b.y).abs()) as f64
}

/// Octile distance: the exact cost of an obstacle-free 8-directional path,
/// taking the maximal number of diagonal steps before going straight. This is
/// admissible and consistent for the [CARDINAL_COST]/[DIAGONAL_COST] model.
pub fn octile_distance(a: &Point, b: &Point) -> f64 {
    let dx = (a.x - b.x).abs() as f64;
    let dy = (a.y - b.y).abs() as f64;
    dx.max(dy) + (DIAGONAL_COST - CARDINAL_COST) * dx.min(dy)
}

/// Total cost of a step path, summing [CARDINAL_COST] and [DIAGONAL_COST] per
/// move. Paths of fewer than two points cost nothing.
pub fn path_cost(path: &[Point]) -> f64 {
    path.windows(2)
        .map(|w| {
            if w[0].x != w[1].x && w[0].y != w[1].y {
                DIAGONAL_COST
            } else {
                CARDINAL_COST
            }
        })
        .sum()
}
