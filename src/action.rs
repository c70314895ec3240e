use std::fmt::{self, Debug, Display, Formatter};

use crate::data::Dir;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ActionKind {
    NoOp,
    Move,
    Push,
    Pull,
}

/// One agent's atomic action.
///
/// For pushes the box sits at `agent + agent_delta` and moves by `box_delta`.
/// For pulls the box sits at `agent + box_delta` and follows the agent into the cell it left.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    NoOp,

    MoveN,
    MoveS,
    MoveE,
    MoveW,

    PushNN,
    PushNE,
    PushNW,
    PushSS,
    PushSE,
    PushSW,
    PushEN,
    PushES,
    PushEE,
    PushWN,
    PushWS,
    PushWW,

    PullNS,
    PullNE,
    PullNW,
    PullSN,
    PullSE,
    PullSW,
    PullEN,
    PullES,
    PullEW,
    PullWN,
    PullWS,
    PullWE,
}

struct ActionData {
    name: &'static str,
    kind: ActionKind,
    agent_delta: Dir,
    box_delta: Dir,
}

const fn data(name: &'static str, kind: ActionKind, agent_delta: Dir, box_delta: Dir) -> ActionData {
    ActionData {
        name,
        kind,
        agent_delta,
        box_delta,
    }
}

// indexed by discriminant - keep in declaration order
static TABLE: [ActionData; 29] = [
    data("NoOp", ActionKind::NoOp, Dir::NONE, Dir::NONE),
    data("Move(N)", ActionKind::Move, Dir::N, Dir::NONE),
    data("Move(S)", ActionKind::Move, Dir::S, Dir::NONE),
    data("Move(E)", ActionKind::Move, Dir::E, Dir::NONE),
    data("Move(W)", ActionKind::Move, Dir::W, Dir::NONE),
    data("Push(N,N)", ActionKind::Push, Dir::N, Dir::N),
    data("Push(N,E)", ActionKind::Push, Dir::N, Dir::E),
    data("Push(N,W)", ActionKind::Push, Dir::N, Dir::W),
    data("Push(S,S)", ActionKind::Push, Dir::S, Dir::S),
    data("Push(S,E)", ActionKind::Push, Dir::S, Dir::E),
    data("Push(S,W)", ActionKind::Push, Dir::S, Dir::W),
    data("Push(E,N)", ActionKind::Push, Dir::E, Dir::N),
    data("Push(E,S)", ActionKind::Push, Dir::E, Dir::S),
    data("Push(E,E)", ActionKind::Push, Dir::E, Dir::E),
    data("Push(W,N)", ActionKind::Push, Dir::W, Dir::N),
    data("Push(W,S)", ActionKind::Push, Dir::W, Dir::S),
    data("Push(W,W)", ActionKind::Push, Dir::W, Dir::W),
    data("Pull(N,S)", ActionKind::Pull, Dir::N, Dir::S),
    data("Pull(N,E)", ActionKind::Pull, Dir::N, Dir::E),
    data("Pull(N,W)", ActionKind::Pull, Dir::N, Dir::W),
    data("Pull(S,N)", ActionKind::Pull, Dir::S, Dir::N),
    data("Pull(S,E)", ActionKind::Pull, Dir::S, Dir::E),
    data("Pull(S,W)", ActionKind::Pull, Dir::S, Dir::W),
    data("Pull(E,N)", ActionKind::Pull, Dir::E, Dir::N),
    data("Pull(E,S)", ActionKind::Pull, Dir::E, Dir::S),
    data("Pull(E,W)", ActionKind::Pull, Dir::E, Dir::W),
    data("Pull(W,N)", ActionKind::Pull, Dir::W, Dir::N),
    data("Pull(W,S)", ActionKind::Pull, Dir::W, Dir::S),
    data("Pull(W,E)", ActionKind::Pull, Dir::W, Dir::E),
];

/// The active catalogue.
pub static STRAIGHT: [Action; 13] = [
    Action::NoOp,
    Action::MoveN,
    Action::MoveS,
    Action::MoveE,
    Action::MoveW,
    Action::PushNN,
    Action::PushSS,
    Action::PushEE,
    Action::PushWW,
    Action::PullNS,
    Action::PullSN,
    Action::PullEW,
    Action::PullWE,
];

/// Disabled unless `ActionSet::WithCornerTurns` is configured.
pub static CORNER_TURNS: [Action; 16] = [
    Action::PushNE,
    Action::PushNW,
    Action::PushSE,
    Action::PushSW,
    Action::PushEN,
    Action::PushES,
    Action::PushWN,
    Action::PushWS,
    Action::PullNE,
    Action::PullNW,
    Action::PullSE,
    Action::PullSW,
    Action::PullEN,
    Action::PullES,
    Action::PullWN,
    Action::PullWS,
];

impl Action {
    fn data(self) -> &'static ActionData {
        &TABLE[self as usize]
    }

    pub fn name(self) -> &'static str {
        self.data().name
    }

    pub fn kind(self) -> ActionKind {
        self.data().kind
    }

    pub fn agent_delta(self) -> Dir {
        self.data().agent_delta
    }

    pub fn box_delta(self) -> Dir {
        self.data().box_delta
    }
}

impl Display for Action {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl Debug for Action {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

/// One action per agent, indexed by agent number.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct JointAction(Vec<Action>);

impl JointAction {
    pub fn new(actions: Vec<Action>) -> Self {
        JointAction(actions)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> ::std::slice::Iter<'_, Action> {
        self.0.iter()
    }
}

impl Display for JointAction {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (i, action) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ";")?;
            }
            write!(f, "{}", action)?;
        }
        Ok(())
    }
}

impl Debug for JointAction {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all() -> Vec<Action> {
        STRAIGHT.iter().chain(CORNER_TURNS.iter()).cloned().collect()
    }

    #[test]
    fn table_matches_declaration_order() {
        assert_eq!(Action::NoOp.name(), "NoOp");
        assert_eq!(Action::MoveW.name(), "Move(W)");
        assert_eq!(Action::PushWW.name(), "Push(W,W)");
        assert_eq!(Action::PullNS.name(), "Pull(N,S)");
        assert_eq!(Action::PullWE.name(), "Pull(W,E)");
        assert_eq!(Action::PushSE.agent_delta(), Dir::S);
        assert_eq!(Action::PushSE.box_delta(), Dir::E);
        assert_eq!(Action::PullEN.kind(), ActionKind::Pull);

        for action in all() {
            let name = action.name();
            let prefix = match action.kind() {
                ActionKind::NoOp => "NoOp",
                ActionKind::Move => "Move(",
                ActionKind::Push => "Push(",
                ActionKind::Pull => "Pull(",
            };
            assert!(name.starts_with(prefix), "{}", name);
        }
    }

    #[test]
    fn catalogue_is_complete_and_disjoint() {
        let actions = all();
        assert_eq!(actions.len(), 29);
        for (i, a) in actions.iter().enumerate() {
            assert!(!actions[i + 1..].contains(a), "{} listed twice", a);
        }
        assert!(CORNER_TURNS
            .iter()
            .all(|a| a.agent_delta() != a.box_delta() && a.agent_delta() != a.box_delta().inverse()));
    }

    #[test]
    fn deltas_are_unit_steps() {
        for action in all() {
            let (agent, boxx) = (action.agent_delta(), action.box_delta());
            match action.kind() {
                ActionKind::NoOp => {
                    assert!(agent.is_zero());
                    assert!(boxx.is_zero());
                }
                ActionKind::Move => {
                    assert!(agent.is_unit());
                    assert!(boxx.is_zero());
                }
                ActionKind::Push | ActionKind::Pull => {
                    assert!(agent.is_unit(), "{}", action);
                    assert!(boxx.is_unit(), "{}", action);
                }
            }
        }
    }

    #[test]
    fn straight_pushes_and_pulls() {
        for action in STRAIGHT.iter() {
            match action.kind() {
                ActionKind::Push => assert_eq!(action.agent_delta(), action.box_delta()),
                ActionKind::Pull => assert_eq!(action.agent_delta(), action.box_delta().inverse()),
                _ => {}
            }
        }
        let pushes = STRAIGHT.iter().filter(|a| a.kind() == ActionKind::Push).count();
        let pulls = STRAIGHT.iter().filter(|a| a.kind() == ActionKind::Pull).count();
        assert_eq!((pushes, pulls), (4, 4));
    }

    #[test]
    fn formatting_joint_actions() {
        let joint = JointAction::new(vec![Action::MoveE, Action::NoOp, Action::PullWE]);
        assert_eq!(joint.to_string(), "Move(E);NoOp;Pull(W,E)");
        assert_eq!(format!("{:?}", joint), "Move(E);NoOp;Pull(W,E)");
        assert_eq!(joint.len(), 3);
        assert_eq!(joint.iter().last(), Some(&Action::PullWE));
    }
}
