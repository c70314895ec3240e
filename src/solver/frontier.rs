//! The set of generated but not yet expanded nodes.
//!
//! Every frontier keeps its ordering structure and a membership set in lock-step,
//! so [`Frontier::contains`] never has to scan.

use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, VecDeque};
use std::fmt::{self, Debug, Formatter};

use fnv::{FnvHashMap, FnvHashSet};
use log::trace;

use crate::config::Strategy;
use crate::heuristic::{AStar, Estimate, Greedy, Heuristic, WeightedAStar};
use crate::solver::{Node, SearchState, SolverErr};

const INITIAL_CAPACITY: usize = 1 << 12;

pub trait Frontier<'a, S: SearchState> {
    /// Adding a state that's already held is ignored unless the frontier
    /// says the new node `improves` on it.
    fn add(&mut self, node: &'a Node<'a, S>);

    fn pop(&mut self) -> Result<&'a Node<'a, S>, SolverErr>;

    fn is_empty(&self) -> bool;

    fn len(&self) -> usize;

    fn contains(&self, state: &S) -> bool;

    /// Whether a held state would be replaced by a node reaching it with cost `g`.
    fn improves(&self, _state: &S, _g: u32) -> bool {
        false
    }

    fn name(&self) -> String;
}

/// Frontier for `strategy`. Uninformed strategies ignore `estimate`.
pub fn create<'a, S, E>(strategy: Strategy, estimate: E) -> Box<dyn Frontier<'a, S> + 'a>
where
    S: SearchState + 'a,
    E: Estimate<S> + 'a,
{
    match strategy {
        Strategy::Bfs => Box::new(BreadthFirst::new()),
        Strategy::Dfs => Box::new(DepthFirst::new()),
        Strategy::AStar => Box::new(BestFirst::new(AStar::new(estimate))),
        Strategy::WeightedAStar(w) => Box::new(BestFirst::new(WeightedAStar::new(estimate, w))),
        Strategy::Greedy => Box::new(BestFirst::new(Greedy::new(estimate))),
    }
}

/// FIFO
pub struct BreadthFirst<'a, S: SearchState> {
    queue: VecDeque<&'a Node<'a, S>>,
    set: FnvHashSet<&'a S>,
}

impl<'a, S: SearchState> BreadthFirst<'a, S> {
    pub fn new() -> Self {
        BreadthFirst {
            queue: VecDeque::with_capacity(INITIAL_CAPACITY),
            set: FnvHashSet::with_capacity_and_hasher(INITIAL_CAPACITY, Default::default()),
        }
    }
}

impl<'a, S: SearchState> Default for BreadthFirst<'a, S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, S: SearchState> Frontier<'a, S> for BreadthFirst<'a, S> {
    fn add(&mut self, node: &'a Node<'a, S>) {
        if !self.set.insert(&node.state) {
            trace!("Ignoring state already in frontier");
            return;
        }
        self.queue.push_back(node);
        debug_assert_eq!(self.queue.len(), self.set.len());
    }

    fn pop(&mut self) -> Result<&'a Node<'a, S>, SolverErr> {
        let node = self.queue.pop_front().ok_or(SolverErr::EmptyFrontier)?;
        let removed = self.set.remove(&node.state);
        debug_assert!(removed);
        debug_assert_eq!(self.queue.len(), self.set.len());
        Ok(node)
    }

    fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    fn len(&self) -> usize {
        self.queue.len()
    }

    fn contains(&self, state: &S) -> bool {
        self.set.contains(state)
    }

    fn name(&self) -> String {
        "breadth-first search".to_string()
    }
}

impl<S: SearchState> Debug for BreadthFirst<'_, S> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "BreadthFirst {{ len: {} }}", self.len())
    }
}

/// LIFO
pub struct DepthFirst<'a, S: SearchState> {
    stack: Vec<&'a Node<'a, S>>,
    set: FnvHashSet<&'a S>,
}

impl<'a, S: SearchState> DepthFirst<'a, S> {
    pub fn new() -> Self {
        DepthFirst {
            stack: Vec::with_capacity(INITIAL_CAPACITY),
            set: FnvHashSet::with_capacity_and_hasher(INITIAL_CAPACITY, Default::default()),
        }
    }
}

impl<'a, S: SearchState> Default for DepthFirst<'a, S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, S: SearchState> Frontier<'a, S> for DepthFirst<'a, S> {
    fn add(&mut self, node: &'a Node<'a, S>) {
        if !self.set.insert(&node.state) {
            trace!("Ignoring state already in frontier");
            return;
        }
        self.stack.push(node);
        debug_assert_eq!(self.stack.len(), self.set.len());
    }

    fn pop(&mut self) -> Result<&'a Node<'a, S>, SolverErr> {
        let node = self.stack.pop().ok_or(SolverErr::EmptyFrontier)?;
        let removed = self.set.remove(&node.state);
        debug_assert!(removed);
        debug_assert_eq!(self.stack.len(), self.set.len());
        Ok(node)
    }

    fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    fn len(&self) -> usize {
        self.set.len()
    }

    fn contains(&self, state: &S) -> bool {
        self.set.contains(state)
    }

    fn name(&self) -> String {
        "depth-first search".to_string()
    }
}

impl<S: SearchState> Debug for DepthFirst<'_, S> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "DepthFirst {{ len: {} }}", self.len())
    }
}

struct Entry<'a, S: SearchState> {
    // reversed so the max-heap pops the lowest score, then lowest g, then oldest
    key: Reverse<(u32, u32, u64)>,
    node: &'a Node<'a, S>,
}

impl<S: SearchState> Entry<'_, S> {
    fn seq(&self) -> u64 {
        (self.key.0).2
    }
}

impl<S: SearchState> PartialEq for Entry<'_, S> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl<S: SearchState> Eq for Entry<'_, S> {}

impl<S: SearchState> PartialOrd for Entry<'_, S> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<S: SearchState> Ord for Entry<'_, S> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

#[derive(Debug, Clone, Copy)]
struct Held {
    seq: u64,
    g: u32,
}

/// Priority queue ordered by a [`Heuristic`].
///
/// A held state reached again with a lower path cost is re-queued with the new score.
/// The old heap entry stays behind and is skipped when it surfaces.
pub struct BestFirst<'a, S: SearchState, H> {
    heap: BinaryHeap<Entry<'a, S>>,
    held: FnvHashMap<&'a S, Held>,
    heuristic: H,
    next_seq: u64,
}

impl<'a, S: SearchState, H: Heuristic<S>> BestFirst<'a, S, H> {
    pub fn new(heuristic: H) -> Self {
        BestFirst {
            heap: BinaryHeap::with_capacity(INITIAL_CAPACITY),
            held: FnvHashMap::with_capacity_and_hasher(INITIAL_CAPACITY, Default::default()),
            heuristic,
            next_seq: 0,
        }
    }
}

impl<'a, S: SearchState, H: Heuristic<S>> Frontier<'a, S> for BestFirst<'a, S, H> {
    fn add(&mut self, node: &'a Node<'a, S>) {
        if let Some(held) = self.held.get(&node.state) {
            if held.g <= node.g {
                trace!("Ignoring state already in frontier");
                return;
            }
            trace!("Re-queueing state with cost {} instead of {}", node.g, held.g);
        }

        let seq = self.next_seq;
        self.next_seq += 1;
        let score = self.heuristic.score(&node.state, node.g);
        self.held.insert(&node.state, Held { seq, g: node.g });
        self.heap.push(Entry {
            key: Reverse((score, node.g, seq)),
            node,
        });
    }

    fn pop(&mut self) -> Result<&'a Node<'a, S>, SolverErr> {
        while let Some(entry) = self.heap.pop() {
            let live = match self.held.get(&entry.node.state) {
                Some(held) => held.seq == entry.seq(),
                None => false,
            };
            if live {
                self.held.remove(&entry.node.state);
                return Ok(entry.node);
            }
        }
        debug_assert!(self.held.is_empty());
        Err(SolverErr::EmptyFrontier)
    }

    fn is_empty(&self) -> bool {
        self.held.is_empty()
    }

    fn len(&self) -> usize {
        self.held.len()
    }

    fn contains(&self, state: &S) -> bool {
        self.held.contains_key(state)
    }

    fn improves(&self, state: &S, g: u32) -> bool {
        self.held.get(state).map_or(false, |held| g < held.g)
    }

    fn name(&self) -> String {
        format!("best-first search using {}", self.heuristic)
    }
}

impl<S: SearchState, H: Heuristic<S>> Debug for BestFirst<'_, S, H> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "BestFirst {{ heuristic: {}, len: {}, stale: {} }}",
            self.heuristic,
            self.held.len(),
            self.heap.len() - self.held.len()
        )
    }
}
