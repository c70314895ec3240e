use std::fmt::{self, Display, Formatter};
use std::str::FromStr;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Duration;

use crate::action::{Action, CORNER_TURNS, STRAIGHT};
use crate::solver::SolverErr;

pub const DEFAULT_MAX_STATES: usize = 4_000_000;
pub const DEFAULT_WEIGHT: u32 = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Strategy {
    Bfs,
    Dfs,
    AStar,
    WeightedAStar(u32),
    Greedy,
}

impl Strategy {
    pub fn is_informed(self) -> bool {
        match self {
            Strategy::Bfs | Strategy::Dfs => false,
            Strategy::AStar | Strategy::WeightedAStar(_) | Strategy::Greedy => true,
        }
    }
}

impl Display for Strategy {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            Strategy::Bfs => write!(f, "bfs"),
            Strategy::Dfs => write!(f, "dfs"),
            Strategy::AStar => write!(f, "astar"),
            Strategy::WeightedAStar(w) => write!(f, "wastar({})", w),
            Strategy::Greedy => write!(f, "greedy"),
        }
    }
}

impl FromStr for Strategy {
    type Err = SolverErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bfs" => Ok(Strategy::Bfs),
            "dfs" => Ok(Strategy::Dfs),
            "astar" => Ok(Strategy::AStar),
            "wastar" => Ok(Strategy::WeightedAStar(DEFAULT_WEIGHT)),
            "greedy" => Ok(Strategy::Greedy),
            _ => Err(SolverErr::UnimplementedStrategy(s.to_string())),
        }
    }
}

/// Which estimate the informed strategies use.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HeuristicKind {
    GoalCount,
    GoalDistance,
}

impl Display for HeuristicKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            HeuristicKind::GoalCount => write!(f, "goal-count"),
            HeuristicKind::GoalDistance => write!(f, "goal-distance"),
        }
    }
}

impl FromStr for HeuristicKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "goal-count" => Ok(HeuristicKind::GoalCount),
            "goal-distance" => Ok(HeuristicKind::GoalDistance),
            _ => Err(format!("Unknown heuristic: {}", s)),
        }
    }
}

/// The part of the action catalogue successor generation draws from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ActionSet {
    /// No-op, moves and same-axis pushes/pulls.
    Straight,
    /// Also pushes and pulls that turn a box around the agent's corner.
    WithCornerTurns,
}

impl ActionSet {
    pub fn actions(self) -> impl Iterator<Item = Action> {
        let corners: &'static [Action] = match self {
            ActionSet::Straight => &[],
            ActionSet::WithCornerTurns => &CORNER_TURNS,
        };
        STRAIGHT.iter().chain(corners.iter()).cloned()
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub strategy: Strategy,
    pub heuristic: HeuristicKind,
    pub actions: ActionSet,
    /// Ceiling on expanded + queued states.
    pub max_states: Option<usize>,
    pub timeout: Option<Duration>,
    /// Checked once per expanded state; the search stops when it's set.
    pub stop: Option<Arc<AtomicBool>>,
    /// Expanded states between status log lines.
    pub status_interval: u32,
}

impl Config {
    pub fn new(strategy: Strategy) -> Self {
        Config {
            strategy,
            ..Config::default()
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            strategy: Strategy::Bfs,
            heuristic: HeuristicKind::GoalDistance,
            actions: ActionSet::Straight,
            max_states: Some(DEFAULT_MAX_STATES),
            timeout: None,
            stop: None,
            status_interval: 1000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parsing_strategies() {
        assert_eq!("bfs".parse::<Strategy>().unwrap(), Strategy::Bfs);
        assert_eq!("dfs".parse::<Strategy>().unwrap(), Strategy::Dfs);
        assert_eq!("astar".parse::<Strategy>().unwrap(), Strategy::AStar);
        assert_eq!(
            "wastar".parse::<Strategy>().unwrap(),
            Strategy::WeightedAStar(DEFAULT_WEIGHT)
        );
        assert_eq!("greedy".parse::<Strategy>().unwrap(), Strategy::Greedy);
        assert_eq!(
            "idastar".parse::<Strategy>().unwrap_err(),
            SolverErr::UnimplementedStrategy("idastar".to_string())
        );
    }

    #[test]
    fn action_sets() {
        assert_eq!(ActionSet::Straight.actions().count(), 13);
        assert_eq!(ActionSet::WithCornerTurns.actions().count(), 29);
        assert_eq!(ActionSet::Straight.actions().next(), Some(Action::NoOp));
    }
}
