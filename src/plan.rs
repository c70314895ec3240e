use std::fmt::{self, Debug, Display, Formatter};

/// Actions leading from the initial state to a goal state, in order.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Plan<A>(Vec<A>);

impl<A> Plan<A> {
    pub(crate) fn new(actions: Vec<A>) -> Self {
        Plan(actions)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> ::std::slice::Iter<'_, A> {
        self.0.iter()
    }

    pub fn into_vec(self) -> Vec<A> {
        self.0
    }
}

impl<A> Default for Plan<A> {
    fn default() -> Self {
        Plan(Vec::new())
    }
}

impl<A> IntoIterator for Plan<A> {
    type Item = A;
    type IntoIter = ::std::vec::IntoIter<A>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a, A> IntoIterator for &'a Plan<A> {
    type Item = &'a A;
    type IntoIter = ::std::slice::Iter<'a, A>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<A: Display> Display for Plan<A> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for action in self {
            writeln!(f, "{}", action)?;
        }
        Ok(())
    }
}

impl<A: Debug> Debug for Plan<A> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.iter()).finish()
    }
}
