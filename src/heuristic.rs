//! Evaluation functions for best-first search.
//!
//! An [`Estimate`] guesses the remaining cost from a state. A [`Heuristic`] combines it
//! with the path cost into the score the frontier orders by - lower is expanded first.

use std::fmt::{self, Display, Formatter};

use crate::level::Goal;
use crate::state::GridState;

pub trait Estimate<S> {
    fn estimate(&self, state: &S) -> u32;
}

impl<S, F> Estimate<S> for F
where
    F: Fn(&S) -> u32,
{
    fn estimate(&self, state: &S) -> u32 {
        self(state)
    }
}

/// Display is used in the frontier's name.
pub trait Heuristic<S>: Display {
    fn score(&self, state: &S, g: u32) -> u32;
}

/// `g + h`
#[derive(Debug, Clone, Copy)]
pub struct AStar<E> {
    estimate: E,
}

impl<E> AStar<E> {
    pub fn new(estimate: E) -> Self {
        AStar { estimate }
    }
}

impl<S, E: Estimate<S>> Heuristic<S> for AStar<E> {
    fn score(&self, state: &S, g: u32) -> u32 {
        g.saturating_add(self.estimate.estimate(state))
    }
}

impl<E> Display for AStar<E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "A* evaluation")
    }
}

/// `g + w * h`
#[derive(Debug, Clone, Copy)]
pub struct WeightedAStar<E> {
    estimate: E,
    weight: u32,
}

impl<E> WeightedAStar<E> {
    pub fn new(estimate: E, weight: u32) -> Self {
        WeightedAStar { estimate, weight }
    }
}

impl<S, E: Estimate<S>> Heuristic<S> for WeightedAStar<E> {
    fn score(&self, state: &S, g: u32) -> u32 {
        let h = self.estimate.estimate(state).saturating_mul(self.weight);
        g.saturating_add(h)
    }
}

impl<E> Display for WeightedAStar<E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "WA*({}) evaluation", self.weight)
    }
}

/// `h`, path cost ignored
#[derive(Debug, Clone, Copy)]
pub struct Greedy<E> {
    estimate: E,
}

impl<E> Greedy<E> {
    pub fn new(estimate: E) -> Self {
        Greedy { estimate }
    }
}

impl<S, E: Estimate<S>> Heuristic<S> for Greedy<E> {
    fn score(&self, state: &S, _g: u32) -> u32 {
        self.estimate.estimate(state)
    }
}

impl<E> Display for Greedy<E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "greedy evaluation")
    }
}

/// Number of goals not yet satisfied.
#[derive(Debug, Clone, Copy)]
pub struct GoalCount;

impl Estimate<GridState<'_>> for GoalCount {
    fn estimate(&self, state: &GridState<'_>) -> u32 {
        state
            .level()
            .goals()
            .iter()
            .filter(|&&(pos, goal)| match goal {
                Goal::Agent(id) => state.agents()[usize::from(id)] != pos,
                Goal::Box(letter) => state.box_at(pos) != Some(letter),
            })
            .count() as u32
    }
}

/// The largest Manhattan distance between a goal and the closest object that can satisfy it.
///
/// Each action moves an object at most one cell so this never overestimates.
#[derive(Debug, Clone, Copy)]
pub struct GoalDistance;

impl Estimate<GridState<'_>> for GoalDistance {
    fn estimate(&self, state: &GridState<'_>) -> u32 {
        let dist = state
            .level()
            .goals()
            .iter()
            .map(|&(pos, goal)| match goal {
                Goal::Agent(id) => state.agents()[usize::from(id)].dist(pos),
                Goal::Box(letter) => state
                    .boxes()
                    .iter()
                    .filter(|&&(_, l)| l == letter)
                    .map(|&(b, _)| b.dist(pos))
                    .min()
                    .unwrap_or(0),
            })
            .max()
            .unwrap_or(0);
        u32::from(dist)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ActionSet;
    use crate::data::{Color, Pos};
    use crate::level::LevelBuilder;

    #[test]
    fn combining_estimates() {
        let h = |s: &u32| *s;
        assert_eq!(AStar::new(h).score(&4u32, 3), 7);
        assert_eq!(WeightedAStar::new(h, 5).score(&4u32, 3), 23);
        assert_eq!(Greedy::new(h).score(&4u32, 3), 4);
        assert_eq!(AStar::new(h).score(&u32::max_value(), 3), u32::max_value());
        assert_eq!(WeightedAStar::new(h, 5).score(&u32::max_value(), 0), u32::max_value());

        assert_eq!(AStar::new(h).to_string(), "A* evaluation");
        assert_eq!(WeightedAStar::new(h, 2).to_string(), "WA*(2) evaluation");
        assert_eq!(Greedy::new(h).to_string(), "greedy evaluation");
    }

    #[test]
    fn grid_estimates() {
        let level = LevelBuilder::new(5, 7)
            .border()
            .agent(0, Color::Blue, Pos::new(1, 1))
            .box_color('A', Color::Blue)
            .box_at('A', Pos::new(2, 2))
            .box_at('A', Pos::new(3, 5))
            .agent_goal(0, Pos::new(1, 2))
            .box_goal('A', Pos::new(3, 4))
            .box_goal('A', Pos::new(1, 5))
            .build()
            .unwrap();
        let state = level.initial_state(ActionSet::Straight);

        assert_eq!(GoalCount.estimate(&state), 3);
        // agent 1 away, first box goal 1 away, second box goal 2 away
        assert_eq!(GoalDistance.estimate(&state), 2);

        let solved = LevelBuilder::new(3, 3)
            .border()
            .agent(0, Color::Red, Pos::new(1, 1))
            .agent_goal(0, Pos::new(1, 1))
            .build()
            .unwrap();
        let state = solved.initial_state(ActionSet::Straight);
        assert_eq!(GoalCount.estimate(&state), 0);
        assert_eq!(GoalDistance.estimate(&state), 0);
    }
}
