//! Generic best-first search, modelled as a resumable state machine rather
//! than a run-to-completion function so that consumers can drive it one event
//! at a time (a render loop, a test harness, a background task). With a zero
//! heuristic this is Dijkstra; with an admissible one it is A*. Both modes
//! share the exact same frontier, tie-breaking and stale-entry handling.
use fxhash::FxBuildHasher;
use indexmap::map::Entry::{Occupied, Vacant};
use indexmap::IndexMap;
use num_traits::Zero;

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::hash::Hash;

/// A single step of an incremental search: either a node settled by the
/// expansion loop, or one node of the reconstructed path, emitted goal-first.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchEvent<N> {
    Visit(N),
    PathStep(N),
}

struct FrontierEntry<C> {
    estimated: C,
    cost: C,
    index: usize,
    seq: usize,
}

impl<C: PartialOrd> Eq for FrontierEntry<C> {}

impl<C: PartialOrd> PartialEq for FrontierEntry<C> {
    fn eq(&self, other: &Self) -> bool {
        self.seq == other.seq && self.estimated == other.estimated
    }
}

impl<C: PartialOrd> PartialOrd for FrontierEntry<C> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<C: PartialOrd> Ord for FrontierEntry<C> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Orders by estimated cost (reversed: BinaryHeap is a max-heap), then
        // first-in-first-out among equal priorities so that the visit order
        // is deterministic.
        match other.estimated.partial_cmp(&self.estimated) {
            Some(Ordering::Equal) | None => other.seq.cmp(&self.seq),
            Some(ord) => ord,
        }
    }
}

#[derive(Clone, Copy)]
enum Phase {
    Expand,
    Walk(usize),
    Finished,
}

/// Best-first search over an implicit graph given by a successor function.
///
/// Implements [Iterator]: each `next` call settles one node (yielding
/// [SearchEvent::Visit]) until the success predicate holds for a popped node
/// or the frontier runs dry, then walks the predecessor chain back to the
/// start (yielding [SearchEvent::PathStep] per node, goal first). The iterator
/// never mutates anything outside itself; dropping it mid-stream abandons the
/// search with no side effects.
///
/// Nodes and their predecessor links live in an [IndexMap] keyed by insertion
/// index, so frontier entries store a plain `usize`. A node may sit in the
/// frontier several times with different costs; entries whose stored cost
/// exceeds the best known cost for their node are discarded on pop and never
/// surface as events.
pub struct BestFirstSearch<N, C, FN, FH, FS> {
    frontier: BinaryHeap<FrontierEntry<C>>,
    parents: FxIndexMap<N, (usize, C)>,
    successors: FN,
    heuristic: FH,
    success: FS,
    seq: usize,
    phase: Phase,
}

impl<N, C, FN, IN, FH, FS> BestFirstSearch<N, C, FN, FH, FS>
where
    N: Eq + Hash + Clone,
    C: Zero + Copy + PartialOrd,
    FN: FnMut(&N) -> IN,
    IN: IntoIterator<Item = (N, C)>,
    FH: FnMut(&N) -> C,
    FS: FnMut(&N) -> bool,
{
    pub fn new(start: N, successors: FN, heuristic: FH, success: FS) -> Self {
        let mut frontier = BinaryHeap::new();
        frontier.push(FrontierEntry {
            estimated: Zero::zero(),
            cost: Zero::zero(),
            index: 0,
            seq: 0,
        });
        let mut parents: FxIndexMap<N, (usize, C)> = FxIndexMap::default();
        parents.insert(start, (usize::MAX, Zero::zero()));
        BestFirstSearch {
            frontier,
            parents,
            successors,
            heuristic,
            success,
            seq: 0,
            phase: Phase::Expand,
        }
    }
}

impl<N, C, FN, IN, FH, FS> Iterator for BestFirstSearch<N, C, FN, FH, FS>
where
    N: Eq + Hash + Clone,
    C: Zero + Copy + PartialOrd,
    FN: FnMut(&N) -> IN,
    IN: IntoIterator<Item = (N, C)>,
    FH: FnMut(&N) -> C,
    FS: FnMut(&N) -> bool,
{
    type Item = SearchEvent<N>;

    fn next(&mut self) -> Option<SearchEvent<N>> {
        loop {
            match self.phase {
                Phase::Expand => {
                    let Some(FrontierEntry { cost, index, .. }) = self.frontier.pop() else {
                        // Frontier exhausted without reaching the goal: no
                        // predecessor chain to walk, so no path events.
                        self.phase = Phase::Finished;
                        return None;
                    };
                    let (node, &(_, best)) = self.parents.get_index(index).unwrap();
                    if (self.success)(node) {
                        let node = node.clone();
                        self.phase = Phase::Walk(index);
                        return Some(SearchEvent::Visit(node));
                    }
                    // The node may have been re-inserted with a better cost
                    // after this entry was pushed; only the best one settles.
                    if cost > best {
                        continue;
                    }
                    let node = node.clone();
                    for (successor, move_cost) in (self.successors)(&node) {
                        let new_cost = cost + move_cost;
                        let h; // heuristic(&successor)
                        let n; // index for successor
                        match self.parents.entry(successor) {
                            Vacant(e) => {
                                h = (self.heuristic)(e.key());
                                n = e.index();
                                e.insert((index, new_cost));
                            }
                            Occupied(mut e) => {
                                if e.get().1 > new_cost {
                                    h = (self.heuristic)(e.key());
                                    n = e.index();
                                    e.insert((index, new_cost));
                                } else {
                                    continue;
                                }
                            }
                        }
                        self.seq += 1;
                        self.frontier.push(FrontierEntry {
                            estimated: new_cost + h,
                            cost: new_cost,
                            index: n,
                            seq: self.seq,
                        });
                    }
                    return Some(SearchEvent::Visit(node));
                }
                Phase::Walk(index) => {
                    if index == usize::MAX {
                        self.phase = Phase::Finished;
                        return None;
                    }
                    let (node, &(parent, _)) = self.parents.get_index(index).unwrap();
                    self.phase = Phase::Walk(parent);
                    return Some(SearchEvent::PathStep(node.clone()));
                }
                Phase::Finished => return None,
            }
        }
    }
}
