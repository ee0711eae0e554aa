//! User-declared stops and the sparse connection graph between them.
//!
//! Stops carry small positive display labels drawn from a reuse pool: the
//! lowest label freed by a removal is handed out again before a new one is
//! allocated. The connection graph is undirected adjacency between stops and
//! the two endpoints, kept symmetric at all times; a vertex whose adjacency
//! set becomes empty is removed from the mapping entirely.
use fxhash::{FxBuildHasher, FxHashMap, FxHashSet};
use grid_util::point::Point;
use indexmap::IndexMap;
use std::cmp::Reverse;
use std::collections::BinaryHeap;

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// An insertion-ordered collection of stops with reusable numeric labels.
#[derive(Clone, Debug, Default)]
pub struct StopSet {
    stops: FxIndexMap<Point, u32>,
    free_labels: BinaryHeap<Reverse<u32>>,
}

impl StopSet {
    pub fn new() -> StopSet {
        StopSet::default()
    }

    /// Adds a stop and returns its label, reusing the smallest freed label if
    /// any, else allocating `len + 1`. Returns [None] if `pos` already is a
    /// stop.
    pub fn add(&mut self, pos: Point) -> Option<u32> {
        if self.stops.contains_key(&pos) {
            return None;
        }
        let label = match self.free_labels.pop() {
            Some(Reverse(label)) => label,
            None => self.stops.len() as u32 + 1,
        };
        self.stops.insert(pos, label);
        Some(label)
    }

    /// Removes a stop, returning its label to the reuse pool.
    pub fn remove(&mut self, pos: Point) -> Option<u32> {
        let label = self.stops.shift_remove(&pos)?;
        self.free_labels.push(Reverse(label));
        Some(label)
    }

    pub fn contains(&self, pos: Point) -> bool {
        self.stops.contains_key(&pos)
    }

    pub fn label_of(&self, pos: Point) -> Option<u32> {
        self.stops.get(&pos).copied()
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Stops in insertion order with their labels.
    pub fn iter(&self) -> impl Iterator<Item = (Point, u32)> + '_ {
        self.stops.iter().map(|(p, l)| (*p, *l))
    }

    /// Drops every stop and the label reuse pool.
    pub fn clear(&mut self) {
        self.stops.clear();
        self.free_labels.clear();
    }
}

/// Undirected adjacency between stops and endpoints. Edge (a, b) is always
/// stored in both directions.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConnectionGraph {
    adjacency: FxHashMap<Point, FxHashSet<Point>>,
}

impl ConnectionGraph {
    pub fn new() -> ConnectionGraph {
        ConnectionGraph::default()
    }

    /// Inserts edge (a, b) if absent, deletes it if present; its own inverse.
    /// Returns whether the edge exists afterwards.
    pub fn toggle(&mut self, a: Point, b: Point) -> bool {
        if self.connected(a, b) {
            self.remove_half_edge(a, b);
            self.remove_half_edge(b, a);
            false
        } else {
            self.adjacency.entry(a).or_default().insert(b);
            self.adjacency.entry(b).or_default().insert(a);
            true
        }
    }

    fn remove_half_edge(&mut self, from: Point, to: Point) {
        if let Some(set) = self.adjacency.get_mut(&from) {
            set.remove(&to);
            if set.is_empty() {
                self.adjacency.remove(&from);
            }
        }
    }

    pub fn connected(&self, a: Point, b: Point) -> bool {
        self.adjacency.get(&a).is_some_and(|set| set.contains(&b))
    }

    /// Vertices adjacent to `v`; empty if `v` has no edges.
    pub fn neighbors(&self, v: Point) -> impl Iterator<Item = Point> + '_ {
        self.adjacency.get(&v).into_iter().flatten().copied()
    }

    /// Removes `v` and every edge incident to it, pruning adjacency entries
    /// left empty on the other side.
    pub fn remove_vertex(&mut self, v: Point) {
        if let Some(set) = self.adjacency.remove(&v) {
            for other in set {
                self.remove_half_edge(other, v);
            }
        }
    }

    /// Each undirected edge once, smaller endpoint (by x then y) first.
    /// Intended for presentation layers drawing connection lines.
    pub fn edges(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.adjacency.iter().flat_map(|(a, set)| {
            set.iter()
                .filter(move |b| (a.x, a.y) < (b.x, b.y))
                .map(move |b| (*a, *b))
        })
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    pub fn clear(&mut self) {
        self.adjacency.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_count_up_from_one() {
        let mut stops = StopSet::new();
        assert_eq!(stops.add(Point::new(1, 1)), Some(1));
        assert_eq!(stops.add(Point::new(2, 2)), Some(2));
        assert_eq!(stops.add(Point::new(3, 3)), Some(3));
        assert_eq!(stops.add(Point::new(3, 3)), None);
    }

    #[test]
    fn freed_labels_are_reused_lowest_first() {
        let mut stops = StopSet::new();
        stops.add(Point::new(1, 1));
        stops.add(Point::new(2, 2));
        stops.add(Point::new(3, 3));
        assert_eq!(stops.remove(Point::new(2, 2)), Some(2));
        // The freed label 2 comes back before 4 is allocated.
        assert_eq!(stops.add(Point::new(4, 4)), Some(2));
        assert_eq!(stops.add(Point::new(5, 5)), Some(4));
    }

    #[test]
    fn reuse_pool_hands_out_the_minimum() {
        let mut stops = StopSet::new();
        for i in 1..=4 {
            stops.add(Point::new(i, i));
        }
        stops.remove(Point::new(3, 3));
        stops.remove(Point::new(1, 1));
        assert_eq!(stops.add(Point::new(5, 5)), Some(1));
        assert_eq!(stops.add(Point::new(6, 6)), Some(3));
    }

    #[test]
    fn clear_resets_the_pool() {
        let mut stops = StopSet::new();
        stops.add(Point::new(1, 1));
        stops.add(Point::new(2, 2));
        stops.remove(Point::new(1, 1));
        stops.clear();
        assert_eq!(stops.add(Point::new(7, 7)), Some(1));
    }

    #[test]
    fn toggle_is_symmetric_and_self_inverse() {
        let a = Point::new(1, 1);
        let b = Point::new(3, 3);
        let c = Point::new(5, 5);
        let mut graph = ConnectionGraph::new();
        graph.toggle(a, c);
        let before = graph.clone();
        assert!(graph.toggle(a, b));
        assert!(graph.connected(b, a));
        assert!(!graph.toggle(a, b));
        assert_eq!(graph, before);
    }

    #[test]
    fn empty_adjacency_entries_are_pruned() {
        let a = Point::new(1, 1);
        let b = Point::new(3, 3);
        let mut graph = ConnectionGraph::new();
        graph.toggle(a, b);
        graph.toggle(a, b);
        assert!(graph.is_empty());
    }

    #[test]
    fn remove_vertex_drops_incident_edges() {
        let a = Point::new(1, 1);
        let b = Point::new(3, 3);
        let c = Point::new(5, 5);
        let mut graph = ConnectionGraph::new();
        graph.toggle(a, b);
        graph.toggle(a, c);
        graph.toggle(b, c);
        graph.remove_vertex(a);
        assert!(!graph.connected(a, b));
        assert!(!graph.connected(c, a));
        assert!(graph.connected(b, c));
        assert_eq!(graph.edges().count(), 1);
    }
}
