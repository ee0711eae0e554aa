//! The long-lived session: grid, endpoints, stops, connections and the last
//! search results, owned as one explicit struct and mutated only through edit
//! operations. Invalid edits are rejected as silent no-ops (`false`), never
//! raised as errors.
use crate::best_first::SearchEvent;
use crate::grid::WallGrid;
use crate::search::{search, search_events, Heuristic};
use crate::stops::{ConnectionGraph, StopSet};
use crate::{manhattan_distance, octile_distance, Point, MAX_GRID_SIZE, MIN_GRID_SIZE};
use fxhash::FxHashSet;
use grid_util::grid::Grid;
use itertools::Itertools;
use log::{info, warn};

/// A pathfinding session over one square grid.
///
/// The presentation layer supplies edits and consumes the stored results; it
/// never mutates the state directly. There is no internal synchronization:
/// a session exposed across threads must be serialized externally (one mutex
/// or actor per session).
#[derive(Clone, Debug, Default)]
pub struct Session {
    grid: WallGrid,
    start: Option<Point>,
    end: Option<Point>,
    stops: StopSet,
    connections: ConnectionGraph,
    path: Vec<Point>,
    visited: FxHashSet<Point>,
}

impl Session {
    /// Creates a session over an empty `size` x `size` grid. Sizes outside
    /// [[MIN_GRID_SIZE], [MAX_GRID_SIZE]] are rejected.
    pub fn new(size: usize) -> Option<Session> {
        if !(MIN_GRID_SIZE..=MAX_GRID_SIZE).contains(&size) {
            warn!("Rejecting session grid size {size}, accepted range is [{MIN_GRID_SIZE}, {MAX_GRID_SIZE}]");
            return None;
        }
        Some(Session {
            grid: WallGrid::new(size, size, false),
            ..Session::default()
        })
    }

    pub fn size(&self) -> usize {
        self.grid.width()
    }

    pub fn grid(&self) -> &WallGrid {
        &self.grid
    }

    pub fn start(&self) -> Option<Point> {
        self.start
    }

    pub fn end(&self) -> Option<Point> {
        self.end
    }

    pub fn stops(&self) -> &StopSet {
        &self.stops
    }

    pub fn connections(&self) -> &ConnectionGraph {
        &self.connections
    }

    /// The last computed path, start to end inclusive; empty until a search
    /// has run or when no path exists.
    pub fn path(&self) -> &[Point] {
        &self.path
    }

    /// The cells settled by the last search.
    pub fn visited(&self) -> &FxHashSet<Point> {
        &self.visited
    }

    fn heuristic_for(use_heuristic: bool) -> Option<Heuristic> {
        use_heuristic.then_some(octile_distance as Heuristic)
    }

    fn is_route_vertex(&self, pos: Point) -> bool {
        self.stops.contains(pos) || self.start == Some(pos) || self.end == Some(pos)
    }

    /// Moves the start. Rejected on walls, stops, the end, or out of bounds.
    /// Moving the start drops its connection edges and the stale results.
    pub fn set_start(&mut self, pos: Point) -> bool {
        if self.start == Some(pos) {
            return true;
        }
        if !self.grid.contains(pos)
            || self.grid.is_wall(pos)
            || self.stops.contains(pos)
            || self.end == Some(pos)
        {
            return false;
        }
        if let Some(old) = self.start.replace(pos) {
            self.connections.remove_vertex(old);
        }
        self.path.clear();
        self.visited.clear();
        true
    }

    /// Moves the end. Same rules as [set_start](Self::set_start).
    pub fn set_end(&mut self, pos: Point) -> bool {
        if self.end == Some(pos) {
            return true;
        }
        if !self.grid.contains(pos)
            || self.grid.is_wall(pos)
            || self.stops.contains(pos)
            || self.start == Some(pos)
        {
            return false;
        }
        if let Some(old) = self.end.replace(pos) {
            self.connections.remove_vertex(old);
        }
        self.path.clear();
        self.visited.clear();
        true
    }

    /// Places or removes a wall. Start, end and stop cells cannot be walled.
    pub fn toggle_wall(&mut self, pos: Point) -> bool {
        if !self.grid.contains(pos)
            || self.start == Some(pos)
            || self.end == Some(pos)
            || self.stops.contains(pos)
        {
            return false;
        }
        let blocked = !self.grid.is_wall(pos);
        self.grid.set(pos.x as usize, pos.y as usize, blocked);
        // Keep components fresh so reachability queries stay O(~1).
        self.grid.update();
        true
    }

    /// Declares a stop, labelling it with the lowest available number.
    /// Rejected on the start, the end, walls, existing stops, or out of
    /// bounds.
    pub fn add_stop(&mut self, pos: Point) -> bool {
        if !self.grid.contains(pos)
            || self.grid.is_wall(pos)
            || self.start == Some(pos)
            || self.end == Some(pos)
        {
            return false;
        }
        self.stops.add(pos).is_some()
    }

    /// Removes a stop, freeing its label for reuse and dropping every
    /// connection edge incident to it.
    pub fn remove_stop(&mut self, pos: Point) -> bool {
        if self.stops.remove(pos).is_none() {
            return false;
        }
        self.connections.remove_vertex(pos);
        true
    }

    /// Connects or disconnects two route vertices (stops or endpoints).
    /// Applying it twice restores the prior graph exactly.
    pub fn toggle_connection(&mut self, a: Point, b: Point) -> bool {
        if a == b || !self.is_route_vertex(a) || !self.is_route_vertex(b) {
            return false;
        }
        self.connections.toggle(a, b);
        true
    }

    /// Clears walls, stops, connections, endpoints, results and the label
    /// reuse pool, leaving a fresh session of the same size.
    pub fn reset(&mut self) {
        info!("Resetting session state");
        let size = self.size();
        self.grid = WallGrid::new(size, size, false);
        self.start = None;
        self.end = None;
        self.stops.clear();
        self.connections.clear();
        self.path.clear();
        self.visited.clear();
    }

    /// Runs a shortest-path search between the endpoints and replaces the
    /// stored path and visited set wholesale. Returns whether a path was
    /// found; a no-op returning [false] when either endpoint is unset.
    pub fn find_path(&mut self, use_heuristic: bool) -> bool {
        let (Some(start), Some(end)) = (self.start, self.end) else {
            return false;
        };
        let (path, visited) = search(&self.grid, start, end, Self::heuristic_for(use_heuristic));
        let found = !path.is_empty();
        info!(
            "Search from {:?} to {:?}: visited {} cells, path {}",
            start,
            end,
            visited.len(),
            if found { "found" } else { "not found" }
        );
        self.path = path;
        self.visited = visited.into_iter().collect();
        found
    }

    /// Incremental counterpart of [find_path](Self::find_path): yields the
    /// search one event at a time without touching the session. [None] when
    /// either endpoint is unset. The consumer writes the outcome back with
    /// [record_result](Self::record_result) once it has finished pulling.
    pub fn animated_search(
        &self,
        use_heuristic: bool,
    ) -> Option<impl Iterator<Item = SearchEvent<Point>> + '_> {
        let (start, end) = (self.start?, self.end?);
        Some(search_events(
            &self.grid,
            start,
            end,
            Self::heuristic_for(use_heuristic),
        ))
    }

    /// Stores the outcome of a consumed [animated_search](Self::animated_search).
    pub fn record_result(
        &mut self,
        path: Vec<Point>,
        visited: impl IntoIterator<Item = Point>,
    ) {
        self.path = path;
        self.visited = visited.into_iter().collect();
    }

    /// Sequences the connected stops into a travel order by greedy nearest
    /// neighbour: from the start, repeatedly move to the cheapest (Manhattan
    /// distance) unvisited adjacent vertex until none remains, then append
    /// the end if it was not reached. Returns the waypoint order and the
    /// accumulated Manhattan cost; `(empty, 0.0)` when either endpoint is
    /// unset. Not an optimal tour, and no grid paths are computed here (see
    /// [find_path_through_stops](Self::find_path_through_stops)).
    pub fn route_through_stops(&self) -> (Vec<Point>, f64) {
        let (Some(start), Some(end)) = (self.start, self.end) else {
            return (Vec::new(), 0.0);
        };
        let mut order = vec![start];
        let mut total = 0.0;
        let mut seen: FxHashSet<Point> = FxHashSet::default();
        seen.insert(start);
        let mut current = start;
        loop {
            let mut nearest: Option<(Point, f64)> = None;
            for next in self.connections.neighbors(current) {
                if seen.contains(&next) {
                    continue;
                }
                let cost = manhattan_distance(&current, &next);
                if nearest.map_or(true, |(_, min_cost)| cost < min_cost) {
                    nearest = Some((next, cost));
                }
            }
            let Some((next, cost)) = nearest else {
                break;
            };
            seen.insert(next);
            order.push(next);
            total += cost;
            current = next;
        }
        if current != end {
            total += manhattan_distance(&current, &end);
            order.push(end);
        }
        (order, total)
    }

    /// Routes through the stops and computes one grid path per consecutive
    /// waypoint pair, storing the concatenated path and the union of the
    /// visited sets. Returns [false] (clearing the results) if the endpoints
    /// are unset or any leg is unroutable.
    pub fn find_path_through_stops(&mut self, use_heuristic: bool) -> bool {
        let (order, _) = self.route_through_stops();
        if order.len() < 2 {
            return false;
        }
        let heuristic = Self::heuristic_for(use_heuristic);
        let mut full_path: Vec<Point> = Vec::new();
        let mut all_visited: FxHashSet<Point> = FxHashSet::default();
        for (from, to) in order.iter().tuple_windows() {
            let (leg, leg_visited) = search(&self.grid, *from, *to, heuristic);
            if leg.is_empty() {
                info!("Leg {:?} -> {:?} is unroutable, clearing results", from, to);
                self.path.clear();
                self.visited.clear();
                return false;
            }
            full_path.extend(leg);
            all_visited.extend(leg_visited);
        }
        // Each waypoint appears at the end of one leg and the start of the
        // next; dedup collapses the joints.
        self.path = full_path.into_iter().dedup().collect();
        self.visited = all_visited;
        true
    }
}
