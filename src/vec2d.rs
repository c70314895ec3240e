use std::fmt::{self, Debug, Display, Formatter};
use std::ops::{Index, IndexMut};

use crate::data::Pos;

#[derive(Clone, PartialEq, Eq)]
pub(crate) struct Vec2d<T> {
    data: Vec<T>,
    rows: u8,
    cols: u8,
}

impl<T: Clone> Vec2d<T> {
    pub(crate) fn new(rows: u8, cols: u8, default: T) -> Self {
        Vec2d {
            data: vec![default; usize::from(rows) * usize::from(cols)],
            rows,
            cols,
        }
    }

    pub(crate) fn scratchpad<U: Clone>(&self, default: U) -> Vec2d<U> {
        Vec2d::new(self.rows, self.cols, default)
    }
}

impl<T> Vec2d<T> {
    pub(crate) fn rows(&self) -> u8 {
        self.rows
    }

    pub(crate) fn cols(&self) -> u8 {
        self.cols
    }

    pub(crate) fn contains(&self, r: i16, c: i16) -> bool {
        r >= 0 && c >= 0 && r < i16::from(self.rows) && c < i16::from(self.cols)
    }

    pub(crate) fn positions(&self) -> impl Iterator<Item = Pos> {
        let cols = self.cols;
        (0..self.rows).flat_map(move |r| (0..cols).map(move |c| Pos::new(r, c)))
    }

    fn index_of(&self, pos: Pos) -> usize {
        usize::from(pos.r) * usize::from(self.cols) + usize::from(pos.c)
    }
}

impl Display for Vec2d<bool> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for row in self.data.chunks(self.cols.into()) {
            for &cell in row {
                write!(f, "{}", if cell { 1 } else { 0 })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl Debug for Vec2d<bool> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl<T> Index<Pos> for Vec2d<T> {
    type Output = T;

    fn index(&self, index: Pos) -> &Self::Output {
        // unchecked indexing is only marginally faster (if at all) to justify unsafe
        &self.data[self.index_of(index)]
    }
}

impl<T> IndexMut<Pos> for Vec2d<T> {
    fn index_mut(&mut self, index: Pos) -> &mut Self::Output {
        let index = self.index_of(index);
        &mut self.data[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indexing_and_formatting() {
        let mut grid = Vec2d::new(2, 3, false);
        grid[Pos::new(0, 2)] = true;
        grid[Pos::new(1, 0)] = true;
        assert!(grid[Pos::new(0, 2)]);
        assert!(!grid[Pos::new(1, 2)]);
        assert_eq!(grid.to_string(), "001\n100\n");
        assert_eq!(grid.positions().count(), 6);
        assert_eq!(grid.positions().last(), Some(Pos::new(1, 2)));
    }

    #[test]
    fn bounds() {
        let grid = Vec2d::new(2, 3, 0u8);
        assert!(grid.contains(1, 2));
        assert!(!grid.contains(2, 0));
        assert!(!grid.contains(0, -1));
    }
}
