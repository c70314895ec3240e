use std::fmt::{self, Debug, Formatter};

use crate::plan::Plan;
use crate::solver::SearchState;

/// A state together with how it was reached.
///
/// Nodes live in an arena for the whole search so parents are plain references.
pub struct Node<'a, S: SearchState> {
    pub state: S,
    prev: Option<(&'a Node<'a, S>, S::Action)>,
    pub g: u32,
}

impl<'a, S: SearchState> Node<'a, S> {
    pub fn root(state: S) -> Self {
        Node::new(state, None, 0)
    }

    pub fn child(state: S, parent: &'a Node<'a, S>, action: S::Action) -> Self {
        Node::new(state, Some((parent, action)), parent.g + 1)
    }

    pub(crate) fn new(state: S, prev: Option<(&'a Node<'a, S>, S::Action)>, g: u32) -> Self {
        Node { state, prev, g }
    }

    /// Actions from the root to this node.
    pub fn plan(&self) -> Plan<S::Action> {
        let mut actions = Vec::with_capacity(self.g as usize);
        let mut node = self;
        while let Some((parent, action)) = &node.prev {
            actions.push(action.clone());
            node = *parent;
        }
        actions.reverse();
        Plan::new(actions)
    }
}

impl<S: SearchState + Debug> Debug for Node<'_, S> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("state", &self.state)
            .field("g", &self.g)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use typed_arena::Arena;

    use super::*;

    #[derive(Debug, PartialEq, Eq, Hash)]
    struct Counter(u32);

    impl SearchState for Counter {
        type Action = char;

        fn successors(&self) -> Vec<(char, Self)> {
            vec![('+', Counter(self.0 + 1))]
        }

        fn is_goal(&self) -> bool {
            false
        }
    }

    #[test]
    fn extracting_plan() {
        let arena = Arena::new();
        let root: &Node<'_, Counter> = arena.alloc(Node::root(Counter(0)));
        assert_eq!(root.g, 0);
        assert!(root.plan().is_empty());

        let a = arena.alloc(Node::child(Counter(1), root, 'a'));
        let b = arena.alloc(Node::child(Counter(2), a, 'b'));
        let c = arena.alloc(Node::child(Counter(3), b, 'c'));
        assert_eq!(c.g, 3);
        assert_eq!(b.plan().into_vec(), vec!['a', 'b']);
        assert_eq!(c.plan().into_vec(), vec!['a', 'b', 'c']);
    }
}
