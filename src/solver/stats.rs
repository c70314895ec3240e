use std::fmt::{self, Debug, Display, Formatter};

use separator::Separatable;

/// Per-depth counters, depth being the path cost `g`.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct Stats {
    created_states: Vec<u64>,
    expanded_states: Vec<u64>,
    duplicate_states: Vec<u64>,
    peak_frontier: usize,
}

impl Stats {
    pub fn new() -> Self {
        Stats::default()
    }

    pub fn total_created(&self) -> u64 {
        self.created_states.iter().sum()
    }

    pub fn total_expanded(&self) -> u64 {
        self.expanded_states.iter().sum()
    }

    pub fn total_reached_duplicates(&self) -> u64 {
        self.duplicate_states.iter().sum()
    }

    /// Returns true when this is the first state created at `depth`.
    pub fn add_created(&mut self, depth: u32) -> bool {
        Self::add(&mut self.created_states, depth)
    }

    /// Returns true when this is the first state expanded at `depth`.
    pub fn add_expanded(&mut self, depth: u32) -> bool {
        Self::add(&mut self.expanded_states, depth)
    }

    pub fn add_reached_duplicate(&mut self, depth: u32) -> bool {
        Self::add(&mut self.duplicate_states, depth)
    }

    pub(crate) fn observe_frontier(&mut self, len: usize) {
        self.peak_frontier = self.peak_frontier.max(len);
    }

    fn add(counts: &mut Vec<u64>, depth: u32) -> bool {
        let depth = depth as usize;
        let mut ret = false;

        // while because best-first and depth-first can skip depths
        while depth >= counts.len() {
            counts.push(0);
            ret = true;
        }
        counts[depth] += 1;
        ret
    }

    /// One row per depth: created, reached duplicates, expanded.
    pub fn by_depth(&self) -> Vec<(u32, u64, u64, u64)> {
        let at = |counts: &[u64], i: usize| counts.get(i).cloned().unwrap_or(0);
        let depths = self
            .created_states
            .len()
            .max(self.duplicate_states.len())
            .max(self.expanded_states.len());
        (0..depths)
            .map(|i| {
                (
                    i as u32,
                    at(&self.created_states, i),
                    at(&self.duplicate_states, i),
                    at(&self.expanded_states, i),
                )
            })
            .collect()
    }
}

impl Debug for Stats {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "created by depth: {:?}", self.created_states)?;
        writeln!(f, "reached duplicates by depth: {:?}", self.duplicate_states)?;
        writeln!(f, "expanded by depth: {:?}", self.expanded_states)?;
        writeln!(f, "total created: {}", self.total_created().separated_string())?;
        writeln!(
            f,
            "total reached duplicates: {}",
            self.total_reached_duplicates().separated_string()
        )?;
        writeln!(f, "total expanded: {}", self.total_expanded().separated_string())?;
        writeln!(f, "peak frontier: {}", (self.peak_frontier as u64).separated_string())
    }
}

impl Display for Stats {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "States created total: {}", self.total_created().separated_string())?;
        writeln!(f, "States expanded total: {}", self.total_expanded().separated_string())?;
        writeln!(
            f,
            "Reached duplicates total: {}",
            self.total_reached_duplicates().separated_string()
        )?;
        writeln!(
            f,
            "Largest frontier: {}",
            (self.peak_frontier as u64).separated_string()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counting() {
        let mut stats = Stats::new();
        assert!(stats.add_created(0));
        assert!(stats.add_created(2));
        assert!(!stats.add_created(2));
        assert!(!stats.add_created(1));
        assert!(stats.add_expanded(0));
        assert!(stats.add_reached_duplicate(3));

        assert_eq!(stats.total_created(), 4);
        assert_eq!(stats.total_expanded(), 1);
        assert_eq!(stats.total_reached_duplicates(), 1);
        assert_eq!(
            stats.by_depth(),
            vec![(0, 1, 0, 1), (1, 1, 0, 0), (2, 2, 0, 0), (3, 0, 1, 0)]
        );

        stats.observe_frontier(7);
        stats.observe_frontier(3);
        assert!(stats.to_string().contains("Largest frontier: 7"));
    }

    #[test]
    fn formatting() {
        let mut stats = Stats::new();
        for _ in 0..1234 {
            stats.add_created(1);
        }
        let s = stats.to_string();
        assert!(s.contains("States created total: 1,234"), "{}", s);
        assert!(s.contains("States expanded total: 0"), "{}", s);
    }
}
