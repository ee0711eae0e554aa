//! Grid-level search entry points. [search_events] exposes the search as a
//! lazy event stream for step-by-step consumers; [search] drives the same
//! state machine to completion and collects the results.
use crate::best_first::{BestFirstSearch, SearchEvent};
use crate::grid::WallGrid;
use crate::Point;

/// An admissible estimate of the remaining cost between two points, such as
/// [octile_distance](crate::octile_distance). Passing `None` to the search
/// functions degrades A* to Dijkstra.
pub type Heuristic = fn(&Point, &Point) -> f64;

/// Incremental shortest-path search from `start` to `end`.
///
/// Yields a [SearchEvent::Visit] for every node settled by the search, in
/// deterministic order, followed by one [SearchEvent::PathStep] per node of
/// the shortest path in reverse (end first). An unreachable `end` yields
/// visits for the whole component of `start` and no path steps.
///
/// The stream only reads the grid; a consumer that stops pulling abandons the
/// search without side effects.
pub fn search_events(
    grid: &WallGrid,
    start: Point,
    end: Point,
    heuristic: Option<Heuristic>,
) -> impl Iterator<Item = SearchEvent<Point>> + '_ {
    BestFirstSearch::new(
        start,
        move |node: &Point| grid.neighbors(*node),
        move |node: &Point| heuristic.map_or(0.0, |h| h(node, &end)),
        move |node: &Point| *node == end,
    )
}

/// Shortest-path search from `start` to `end`, run to completion.
///
/// Returns the path (start to end inclusive; empty if `end` is unreachable)
/// and the visit order. Dijkstra when `heuristic` is `None`, A* otherwise;
/// both agree on the optimal cost and share identical tie-breaking.
pub fn search(
    grid: &WallGrid,
    start: Point,
    end: Point,
    heuristic: Option<Heuristic>,
) -> (Vec<Point>, Vec<Point>) {
    let mut path = Vec::new();
    let mut visited = Vec::new();
    for event in search_events(grid, start, end, heuristic) {
        match event {
            SearchEvent::Visit(p) => visited.push(p),
            SearchEvent::PathStep(p) => path.push(p),
        }
    }
    path.reverse();
    (path, visited)
}
