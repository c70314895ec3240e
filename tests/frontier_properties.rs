use proptest::prelude::*;
use typed_arena::Arena;

use searchclient::config::Strategy as SearchStrategy;
use searchclient::solver::frontier::{self, Frontier};
use searchclient::solver::{Node, SearchState, SolverErr};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct Id(u8);

impl SearchState for Id {
    type Action = ();

    fn successors(&self) -> Vec<((), Self)> {
        Vec::new()
    }

    fn is_goal(&self) -> bool {
        false
    }
}

#[derive(Debug, Clone, Copy)]
enum Op {
    Add(u8),
    Pop,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![(0..12u8).prop_map(Op::Add), Just(Op::Pop)]
}

fn score(id: &Id) -> u32 {
    u32::from(id.0 % 3)
}

/// Index into `held` (insertion order) of the id the frontier should pop next.
fn expected(strategy: SearchStrategy, held: &[u8]) -> usize {
    match strategy {
        SearchStrategy::Bfs => 0,
        SearchStrategy::Dfs => held.len() - 1,
        _ => {
            let mut best = 0;
            for (i, &id) in held.iter().enumerate() {
                if score(&Id(id)) < score(&Id(held[best])) {
                    best = i;
                }
            }
            best
        }
    }
}

fn check(strategy: SearchStrategy, ops: &[Op]) -> Result<(), TestCaseError> {
    let arena = Arena::new();
    let mut frontier = frontier::create(strategy, score);
    let mut held: Vec<u8> = Vec::new();

    for &op in ops {
        match op {
            Op::Add(id) => {
                frontier.add(arena.alloc(Node::root(Id(id))));
                if !held.contains(&id) {
                    held.push(id);
                }
            }
            Op::Pop => {
                if held.is_empty() {
                    prop_assert_eq!(
                        frontier.pop().map(|n| n.state.0),
                        Err(SolverErr::EmptyFrontier)
                    );
                } else {
                    let node = frontier.pop().map(|n| n.state.0);
                    let i = expected(strategy, &held);
                    prop_assert_eq!(node, Ok(held.remove(i)));
                }
            }
        }

        prop_assert_eq!(frontier.len(), held.len());
        prop_assert_eq!(frontier.is_empty(), held.is_empty());
        for id in 0..12 {
            prop_assert_eq!(frontier.contains(&Id(id)), held.contains(&id));
        }
    }
    Ok(())
}

proptest! {
    #[test]
    fn breadth_first_stays_in_lock_step(ops in prop::collection::vec(op(), 0..64)) {
        check(SearchStrategy::Bfs, &ops)?;
    }

    #[test]
    fn depth_first_stays_in_lock_step(ops in prop::collection::vec(op(), 0..64)) {
        check(SearchStrategy::Dfs, &ops)?;
    }

    #[test]
    fn best_first_stays_in_lock_step(ops in prop::collection::vec(op(), 0..64)) {
        check(SearchStrategy::Greedy, &ops)?;
    }
}
