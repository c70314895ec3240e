pub mod frontier;
mod node;
mod stats;

use std::error::Error;
use std::fmt::{self, Debug, Display, Formatter};
use std::hash::Hash;
use std::sync::atomic::Ordering;
use std::time::{Duration, Instant};

use fnv::FnvHashSet;
use log::{debug, info};
use separator::Separatable;
use typed_arena::Arena;

use crate::action::JointAction;
use crate::config::{Config, HeuristicKind};
use crate::heuristic::{Estimate, GoalCount, GoalDistance};
use crate::level::Level;
use crate::plan::Plan;
use crate::Solve;

pub use self::frontier::Frontier;
pub use self::node::Node;
pub use self::stats::Stats;

/// What the driver needs from a state. Identity (`Eq` + `Hash`) must only
/// depend on the configuration, never on how the state was reached.
pub trait SearchState: Eq + Hash {
    type Action: Clone;

    fn successors(&self) -> Vec<(Self::Action, Self)>
    where
        Self: Sized;

    fn is_goal(&self) -> bool;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolverErr {
    EmptyFrontier,
    UnimplementedStrategy(String),
}

impl Display for SolverErr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            SolverErr::EmptyFrontier => write!(f, "Pop from an empty frontier"),
            SolverErr::UnimplementedStrategy(name) => {
                write!(f, "Unimplemented strategy: {}", name)
            }
        }
    }
}

impl Error for SolverErr {}

/// Why a search gave up before deciding whether a solution exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Limit {
    /// More than this many states were held (expanded plus queued).
    States(usize),
    Deadline(Duration),
    Cancelled,
}

impl Display for Limit {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            Limit::States(max) => write!(f, "more than {} states", (max as u64).separated_string()),
            Limit::Deadline(timeout) => write!(f, "timeout of {} ms", timeout.as_millis()),
            Limit::Cancelled => write!(f, "cancelled"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<A> {
    Solved(Plan<A>),
    Unsolvable,
    Stopped(Limit),
}

pub struct SolverOk<A> {
    pub outcome: Outcome<A>,
    pub stats: Stats,
    pub strategy: String,
}

impl<A> SolverOk<A> {
    fn new(outcome: Outcome<A>, stats: Stats, strategy: String) -> Self {
        Self {
            outcome,
            stats,
            strategy,
        }
    }

    pub fn plan(&self) -> Option<&Plan<A>> {
        match &self.outcome {
            Outcome::Solved(plan) => Some(plan),
            _ => None,
        }
    }

    pub fn is_solved(&self) -> bool {
        self.plan().is_some()
    }
}

impl<A> Debug for SolverOk<A> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.outcome {
            Outcome::Solved(plan) => writeln!(f, "{}: {}", self.strategy, plan.len())?,
            Outcome::Unsolvable => writeln!(f, "{}: no solution", self.strategy)?,
            Outcome::Stopped(limit) => writeln!(f, "{}: stopped, {}", self.strategy, limit)?,
        }
        write!(f, "{}", self.stats)
    }
}

impl Solve for Level {
    fn solve(&self, config: &Config) -> Result<SolverOk<JointAction>, SolverErr> {
        debug!(
            "Solving {}x{} level with {} agents using {}",
            self.rows(),
            self.cols(),
            self.agent_count(),
            config.strategy
        );
        if config.strategy.is_informed() {
            debug!("Estimating with {}", config.heuristic);
        }
        let initial = self.initial_state(config.actions);
        match config.heuristic {
            HeuristicKind::GoalCount => search(initial, GoalCount, config),
            HeuristicKind::GoalDistance => search(initial, GoalDistance, config),
        }
    }
}

/// Runs a graph search from `initial` with the frontier `config.strategy` selects.
pub fn search<S, E>(
    initial: S,
    estimate: E,
    config: &Config,
) -> Result<SolverOk<S::Action>, SolverErr>
where
    S: SearchState,
    E: Estimate<S>,
{
    // the frontier holds references into the arena so it must be dropped first
    let arena = Arena::new();
    let mut frontier = frontier::create(config.strategy, estimate);
    graph_search(&arena, initial, &mut *frontier, config)
}

/// Expands every state at most once: popped states go into the explored set
/// and successors already explored or queued are skipped, unless the frontier
/// reports the new path as an improvement.
///
/// Limits are checked after the goal test, so a popped goal is always returned
/// as solved even when a ceiling has been reached.
pub fn graph_search<'a, S, F>(
    arena: &'a Arena<Node<'a, S>>,
    initial: S,
    frontier: &mut F,
    config: &Config,
) -> Result<SolverOk<S::Action>, SolverErr>
where
    S: SearchState,
    F: Frontier<'a, S> + ?Sized,
{
    let started = Instant::now();
    let mut stats = Stats::new();
    let mut explored: FnvHashSet<&'a S> = FnvHashSet::default();
    let name = frontier.name();

    info!("Starting {}.", name);

    let root = arena.alloc(Node::root(initial));
    stats.add_created(root.g);
    frontier.add(root);

    let mut iterations = 0;
    loop {
        if config.status_interval > 0 && iterations == config.status_interval {
            log_status(&stats, explored.len(), frontier.len(), started);
            iterations = 0;
        }

        if frontier.is_empty() {
            debug!("Frontier exhausted, no solution");
            return Ok(SolverOk::new(Outcome::Unsolvable, stats, name));
        }

        let node = frontier.pop()?;

        if node.state.is_goal() {
            stats.add_expanded(node.g);
            debug!("Solved, extracting plan of length {}", node.g);
            log_status(&stats, explored.len(), frontier.len(), started);
            return Ok(SolverOk::new(Outcome::Solved(node.plan()), stats, name));
        }

        // the popped node still counts as held
        let held = explored.len() + frontier.len() + 1;
        if let Some(limit) = reached_limit(config, held, started) {
            debug!("Stopped: {}", limit);
            log_status(&stats, explored.len(), frontier.len(), started);
            return Ok(SolverOk::new(Outcome::Stopped(limit), stats, name));
        }

        if stats.add_expanded(node.g) {
            debug!("Expanded new depth: {}", node.g);
        }

        explored.insert(&node.state);

        let g = node.g + 1;
        for (action, state) in node.state.successors() {
            if explored.contains(&state)
                || (frontier.contains(&state) && !frontier.improves(&state, g))
            {
                stats.add_reached_duplicate(g);
                continue;
            }
            frontier.add(arena.alloc(Node::child(state, node, action)));
            stats.add_created(g);
        }
        stats.observe_frontier(frontier.len());

        iterations += 1;
    }
}

fn reached_limit(config: &Config, held: usize, started: Instant) -> Option<Limit> {
    if let Some(stop) = &config.stop {
        if stop.load(Ordering::Relaxed) {
            return Some(Limit::Cancelled);
        }
    }
    if let Some(max) = config.max_states {
        if held > max {
            return Some(Limit::States(max));
        }
    }
    if let Some(timeout) = config.timeout {
        if started.elapsed() >= timeout {
            return Some(Limit::Deadline(timeout));
        }
    }
    None
}

fn log_status(stats: &Stats, explored: usize, frontier: usize, started: Instant) {
    info!(
        "#Explored: {}, #Frontier: {}, #Generated: {}, Time: {:.3} s",
        (explored as u64).separated_string(),
        (frontier as u64).separated_string(),
        stats.total_created().separated_string(),
        started.elapsed().as_secs_f64()
    );
}
