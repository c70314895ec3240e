use std::fmt::{self, Display, Formatter};
use std::ops::Add;

/// Agents are numbered `0..=9`.
pub const MAX_AGENTS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pos {
    pub r: u8,
    pub c: u8,
}

impl Pos {
    pub fn new(r: u8, c: u8) -> Pos {
        Pos { r, c }
    }

    /// Manhattan distance
    pub fn dist(self, other: Pos) -> u16 {
        let dr = (i16::from(self.r) - i16::from(other.r)).abs();
        let dc = (i16::from(self.c) - i16::from(other.c)).abs();
        (dr + dc) as u16
    }
}

impl Display for Pos {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.r, self.c)
    }
}

/// A step on the 4-connected grid, or no step at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dir {
    pub r: i8,
    pub c: i8,
}

impl Dir {
    pub const NONE: Dir = Dir { r: 0, c: 0 };
    pub const N: Dir = Dir { r: -1, c: 0 };
    pub const S: Dir = Dir { r: 1, c: 0 };
    pub const E: Dir = Dir { r: 0, c: 1 };
    pub const W: Dir = Dir { r: 0, c: -1 };

    pub fn is_zero(self) -> bool {
        self == Dir::NONE
    }

    /// True for the four unit steps.
    pub fn is_unit(self) -> bool {
        self.r.abs() + self.c.abs() == 1
    }

    pub fn inverse(self) -> Dir {
        Dir {
            r: -self.r,
            c: -self.c,
        }
    }
}

pub(crate) const DIRECTIONS: [Dir; 4] = [Dir::N, Dir::E, Dir::S, Dir::W];

// Levels are validated to have a closed border around everything an agent can reach
// so stepping from a reachable cell never leaves the grid.
impl Add<Dir> for Pos {
    type Output = Pos;

    fn add(self, dir: Dir) -> Pos {
        Pos {
            r: (i16::from(self.r) + i16::from(dir.r)) as u8,
            c: (i16::from(self.c) + i16::from(dir.c)) as u8,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Blue,
    Red,
    Cyan,
    Purple,
    Green,
    Orange,
    Pink,
    Grey,
    Lightblue,
    Brown,
}

impl Display for Color {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let name = match *self {
            Color::Blue => "blue",
            Color::Red => "red",
            Color::Cyan => "cyan",
            Color::Purple => "purple",
            Color::Green => "green",
            Color::Orange => "orange",
            Color::Pink => "pink",
            Color::Grey => "grey",
            Color::Lightblue => "lightblue",
            Color::Brown => "brown",
        };
        write!(f, "{}", name)
    }
}
