use std::fmt::{self, Debug, Formatter};
use std::hash::{Hash, Hasher};

use crate::action::{Action, ActionKind, JointAction};
use crate::config::ActionSet;
use crate::data::Pos;
use crate::level::{Goal, Level};
use crate::solver::SearchState;

/// Positions of all agents and boxes. Everything static lives in the borrowed `Level`.
#[derive(Clone)]
pub struct GridState<'l> {
    level: &'l Level,
    actions: ActionSet,
    agents: Vec<Pos>,
    // sorted so equal configurations compare equal
    boxes: Vec<(Pos, char)>,
}

impl<'l> GridState<'l> {
    pub(crate) fn new(
        level: &'l Level,
        actions: ActionSet,
        agents: Vec<Pos>,
        mut boxes: Vec<(Pos, char)>,
    ) -> Self {
        boxes.sort();
        GridState {
            level,
            actions,
            agents,
            boxes,
        }
    }

    pub fn level(&self) -> &'l Level {
        self.level
    }

    pub fn agents(&self) -> &[Pos] {
        &self.agents
    }

    pub fn boxes(&self) -> &[(Pos, char)] {
        &self.boxes
    }

    pub fn box_at(&self, pos: Pos) -> Option<char> {
        self.boxes
            .binary_search_by_key(&pos, |&(p, _)| p)
            .ok()
            .map(|i| self.boxes[i].1)
    }

    pub fn agent_at(&self, pos: Pos) -> Option<usize> {
        self.agents.iter().position(|&p| p == pos)
    }

    pub fn is_free(&self, pos: Pos) -> bool {
        !self.level.is_wall(pos) && self.box_at(pos).is_none() && self.agent_at(pos).is_none()
    }

    fn can_move_box(&self, agent: usize, box_pos: Pos) -> bool {
        match self.box_at(box_pos) {
            None => false,
            Some(letter) => self.level.box_color(letter) == Some(self.level.agent_color(agent)),
        }
    }

    pub fn is_applicable(&self, agent: usize, action: Action) -> bool {
        let agent_pos = self.agents[agent];
        match action.kind() {
            ActionKind::NoOp => true,
            ActionKind::Move => self.is_free(agent_pos + action.agent_delta()),
            ActionKind::Push => {
                let box_pos = agent_pos + action.agent_delta();
                self.can_move_box(agent, box_pos) && self.is_free(box_pos + action.box_delta())
            }
            ActionKind::Pull => {
                let box_pos = agent_pos + action.box_delta();
                self.can_move_box(agent, box_pos) && self.is_free(agent_pos + action.agent_delta())
            }
        }
    }

    /// Two agents moving into the same cell or moving the same box.
    pub fn is_conflicting(&self, joint: &[Action]) -> bool {
        let targets: Vec<(Option<Pos>, Option<Pos>)> = joint
            .iter()
            .enumerate()
            .map(|(agent, &action)| {
                let agent_pos = self.agents[agent];
                match action.kind() {
                    ActionKind::NoOp => (None, None),
                    ActionKind::Move => (Some(agent_pos + action.agent_delta()), None),
                    ActionKind::Push => {
                        let box_pos = agent_pos + action.agent_delta();
                        (Some(box_pos + action.box_delta()), Some(box_pos))
                    }
                    ActionKind::Pull => (
                        Some(agent_pos + action.agent_delta()),
                        Some(agent_pos + action.box_delta()),
                    ),
                }
            })
            .collect();

        for (i, &(dest1, box1)) in targets.iter().enumerate() {
            for &(dest2, box2) in &targets[i + 1..] {
                if dest1.is_some() && dest1 == dest2 {
                    return true;
                }
                if box1.is_some() && box1 == box2 {
                    return true;
                }
            }
        }
        false
    }

    /// Precondition: every action is applicable and the joint action isn't conflicting.
    pub fn apply(&self, joint: &JointAction) -> GridState<'l> {
        let mut agents = self.agents.clone();
        let mut boxes = self.boxes.clone();

        for (agent, &action) in joint.iter().enumerate() {
            let agent_pos = agents[agent];
            match action.kind() {
                ActionKind::NoOp => {}
                ActionKind::Move => agents[agent] = agent_pos + action.agent_delta(),
                ActionKind::Push => {
                    let box_pos = agent_pos + action.agent_delta();
                    move_box(&mut boxes, box_pos, box_pos + action.box_delta());
                    agents[agent] = box_pos;
                }
                ActionKind::Pull => {
                    move_box(&mut boxes, agent_pos + action.box_delta(), agent_pos);
                    agents[agent] = agent_pos + action.agent_delta();
                }
            }
        }

        GridState::new(self.level, self.actions, agents, boxes)
    }
}

// boxes may be out of order while a joint action is applied so no binary search here
fn move_box(boxes: &mut [(Pos, char)], from: Pos, to: Pos) {
    let b = boxes.iter_mut().find(|b| b.0 == from);
    debug_assert!(b.is_some(), "no box at {}", from);
    if let Some(b) = b {
        b.0 = to;
    }
}

impl SearchState for GridState<'_> {
    type Action = JointAction;

    fn successors(&self) -> Vec<(JointAction, Self)> {
        let applicable: Vec<Vec<Action>> = (0..self.agents.len())
            .map(|agent| {
                self.actions
                    .actions()
                    .filter(|&action| self.is_applicable(agent, action))
                    .collect()
            })
            .collect();

        // odometer over every agent's applicable actions, agent 0 changes fastest
        // NoOp is always applicable so no list is empty
        let mut indices = vec![0; applicable.len()];
        let mut successors = Vec::new();
        loop {
            let joint: Vec<Action> = indices
                .iter()
                .enumerate()
                .map(|(agent, &i)| applicable[agent][i])
                .collect();
            if !self.is_conflicting(&joint) {
                let joint = JointAction::new(joint);
                let state = self.apply(&joint);
                successors.push((joint, state));
            }

            let mut agent = 0;
            loop {
                if agent == indices.len() {
                    return successors;
                }
                if indices[agent] + 1 < applicable[agent].len() {
                    indices[agent] += 1;
                    break;
                }
                indices[agent] = 0;
                agent += 1;
            }
        }
    }

    fn is_goal(&self) -> bool {
        self.level.goals().iter().all(|&(pos, goal)| match goal {
            Goal::Agent(id) => self.agents[usize::from(id)] == pos,
            Goal::Box(letter) => self.box_at(pos) == Some(letter),
        })
    }
}

// identity is only the positions - the level is shared and the path isn't stored here
impl PartialEq for GridState<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.agents == other.agents && self.boxes == other.boxes
    }
}

impl Eq for GridState<'_> {}

impl Hash for GridState<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.agents.hash(state);
        self.boxes.hash(state);
    }
}

impl Debug for GridState<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("GridState")
            .field("agents", &self.agents)
            .field("boxes", &self.boxes)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use fnv::FnvHashSet;

    use super::*;
    use crate::data::Color;
    use crate::level::LevelBuilder;

    fn joint(actions: &[Action]) -> JointAction {
        JointAction::new(actions.to_vec())
    }

    #[test]
    fn applicability() {
        let level = LevelBuilder::new(3, 7)
            .border()
            .agent(0, Color::Blue, Pos::new(1, 2))
            .box_color('A', Color::Blue)
            .box_color('B', Color::Red)
            .box_at('A', Pos::new(1, 3))
            .box_at('B', Pos::new(1, 1))
            .build()
            .unwrap();
        let state = level.initial_state(ActionSet::Straight);

        assert!(state.is_applicable(0, Action::NoOp));
        assert!(!state.is_applicable(0, Action::MoveN)); // wall
        assert!(!state.is_applicable(0, Action::MoveE)); // box
        assert!(state.is_applicable(0, Action::PushEE));
        assert!(!state.is_applicable(0, Action::PushWW)); // wrong color
        assert!(!state.is_applicable(0, Action::PullWE)); // box behind
        assert!(!state.is_applicable(0, Action::PullEW)); // wrong color

        let successors = state.successors();
        let actions: Vec<_> = successors.iter().map(|(a, _)| a.to_string()).collect();
        assert_eq!(actions, vec!["NoOp", "Push(E,E)"]);
        assert_eq!(successors[1].1.agents(), &[Pos::new(1, 3)]);
        assert_eq!(successors[1].1.box_at(Pos::new(1, 4)), Some('A'));
        assert_eq!(successors[1].1.box_at(Pos::new(1, 3)), None);
    }

    #[test]
    fn pulling() {
        let level = LevelBuilder::new(3, 6)
            .border()
            .agent(0, Color::Green, Pos::new(1, 3))
            .box_color('A', Color::Green)
            .box_at('A', Pos::new(1, 4))
            .build()
            .unwrap();
        let state = level.initial_state(ActionSet::Straight);
        assert!(state.is_applicable(0, Action::PullWE));
        assert!(!state.is_applicable(0, Action::PushEE));

        let pulled = state.apply(&joint(&[Action::PullWE]));
        assert_eq!(pulled.agents(), &[Pos::new(1, 2)]);
        assert_eq!(pulled.boxes(), &[(Pos::new(1, 3), 'A')]);
    }

    #[test]
    fn corner_turns() {
        let level = LevelBuilder::new(5, 5)
            .border()
            .agent(0, Color::Blue, Pos::new(1, 1))
            .box_color('A', Color::Blue)
            .box_at('A', Pos::new(1, 2))
            .build()
            .unwrap();

        let straight = level.initial_state(ActionSet::Straight).successors();
        let names: Vec<_> = straight.iter().map(|(a, _)| a.to_string()).collect();
        assert_eq!(names, vec!["NoOp", "Move(S)", "Push(E,E)"]);

        let all = level.initial_state(ActionSet::WithCornerTurns).successors();
        let names: Vec<_> = all.iter().map(|(a, _)| a.to_string()).collect();
        assert_eq!(
            names,
            vec!["NoOp", "Move(S)", "Push(E,E)", "Push(E,S)", "Pull(S,E)"]
        );
        let turned = &all[3].1;
        assert_eq!(turned.agents(), &[Pos::new(1, 2)]);
        assert_eq!(turned.boxes(), &[(Pos::new(2, 2), 'A')]);
    }

    #[test]
    fn conflicts() {
        let level = LevelBuilder::new(3, 5)
            .border()
            .agent(0, Color::Blue, Pos::new(1, 1))
            .agent(1, Color::Red, Pos::new(1, 3))
            .build()
            .unwrap();
        let state = level.initial_state(ActionSet::Straight);

        assert!(state.is_conflicting(&[Action::MoveE, Action::MoveW]));
        assert!(!state.is_conflicting(&[Action::MoveE, Action::NoOp]));
        assert!(!state.is_conflicting(&[Action::NoOp, Action::NoOp]));

        let names: Vec<_> = state
            .successors()
            .iter()
            .map(|(a, _)| a.to_string())
            .collect();
        assert_eq!(names, vec!["NoOp;NoOp", "Move(E);NoOp", "NoOp;Move(W)"]);
    }

    #[test]
    fn moving_the_same_box() {
        let level = LevelBuilder::new(7, 5)
            .border()
            .agent(0, Color::Blue, Pos::new(2, 2))
            .agent(1, Color::Blue, Pos::new(4, 2))
            .box_color('A', Color::Blue)
            .box_at('A', Pos::new(3, 2))
            .build()
            .unwrap();
        let state = level.initial_state(ActionSet::Straight);

        // both pull the box out of the middle
        assert!(state.is_applicable(0, Action::PullNS));
        assert!(state.is_applicable(1, Action::PullSN));
        assert!(state.is_conflicting(&[Action::PullNS, Action::PullSN]));
    }

    #[test]
    fn identity_ignores_path() {
        let level = LevelBuilder::new(3, 5)
            .border()
            .agent(0, Color::Blue, Pos::new(1, 1))
            .agent_goal(0, Pos::new(1, 3))
            .build()
            .unwrap();
        let initial = level.initial_state(ActionSet::Straight);
        assert!(!initial.is_goal());

        let there_and_back = initial
            .apply(&joint(&[Action::MoveE]))
            .apply(&joint(&[Action::MoveW]));
        assert_eq!(there_and_back, initial);

        let mut seen = FnvHashSet::default();
        seen.insert(initial.clone());
        assert!(!seen.insert(there_and_back));

        let goal = initial
            .apply(&joint(&[Action::MoveE]))
            .apply(&joint(&[Action::MoveE]));
        assert!(goal.is_goal());
        assert_ne!(goal, initial);
    }
}
