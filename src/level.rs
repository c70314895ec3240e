use std::error::Error;
use std::fmt::{self, Display, Formatter};

use crate::config::ActionSet;
use crate::data::{Color, Pos, DIRECTIONS, MAX_AGENTS};
use crate::state::GridState;
use crate::vec2d::Vec2d;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Goal {
    Agent(u8),
    Box(char),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LevelErr {
    OutOfBounds(Pos),
    Overlap(Pos),
    NoAgents,
    TooManyAgents,
    DuplicateAgent(u8),
    MissingAgent(u8),
    InvalidBox(char),
    BoxWithoutColor(char),
    IncompleteBorder,
}

impl Display for LevelErr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            LevelErr::OutOfBounds(pos) => write!(f, "Position {} is outside the level", pos),
            LevelErr::Overlap(pos) => write!(f, "Multiple objects at {}", pos),
            LevelErr::NoAgents => write!(f, "No agents"),
            LevelErr::TooManyAgents => write!(f, "More than {} agents", MAX_AGENTS),
            LevelErr::DuplicateAgent(id) => write!(f, "Agent {} placed more than once", id),
            LevelErr::MissingAgent(id) => write!(f, "Agent {} is missing", id),
            LevelErr::InvalidBox(letter) => write!(f, "Invalid box letter: {}", letter),
            LevelErr::BoxWithoutColor(letter) => write!(f, "Box {} has no color", letter),
            LevelErr::IncompleteBorder => {
                write!(f, "Agents can leave the level because of missing border")
            }
        }
    }
}

impl Error for LevelErr {}

/// The parts of a level that never change during search, plus the initial positions.
#[derive(Debug, Clone)]
pub struct Level {
    walls: Vec2d<bool>,
    goals: Vec<(Pos, Goal)>,
    agent_colors: Vec<Color>,
    box_colors: [Option<Color>; 26],
    agents: Vec<Pos>,
    boxes: Vec<(Pos, char)>,
}

impl Level {
    pub fn rows(&self) -> u8 {
        self.walls.rows()
    }

    pub fn cols(&self) -> u8 {
        self.walls.cols()
    }

    pub fn is_wall(&self, pos: Pos) -> bool {
        self.walls[pos]
    }

    pub fn goals(&self) -> &[(Pos, Goal)] {
        &self.goals
    }

    pub fn agent_count(&self) -> usize {
        self.agent_colors.len()
    }

    pub fn agent_color(&self, agent: usize) -> Color {
        self.agent_colors[agent]
    }

    pub fn box_color(&self, letter: char) -> Option<Color> {
        box_index(letter).and_then(|i| self.box_colors[i])
    }

    pub fn initial_state(&self, actions: ActionSet) -> GridState<'_> {
        GridState::new(self, actions, self.agents.clone(), self.boxes.clone())
    }
}

fn box_index(letter: char) -> Option<usize> {
    if letter.is_ascii_uppercase() {
        Some(letter as usize - 'A' as usize)
    } else {
        None
    }
}

/// Assembles a `Level` cell by cell; everything is validated in `build`.
#[derive(Debug, Clone)]
pub struct LevelBuilder {
    rows: u8,
    cols: u8,
    border: bool,
    walls: Vec<Pos>,
    agents: Vec<(u8, Color, Pos)>,
    box_colors: Vec<(char, Color)>,
    boxes: Vec<(char, Pos)>,
    goals: Vec<(Pos, Goal)>,
}

impl LevelBuilder {
    pub fn new(rows: u8, cols: u8) -> Self {
        LevelBuilder {
            rows,
            cols,
            border: false,
            walls: Vec::new(),
            agents: Vec::new(),
            box_colors: Vec::new(),
            boxes: Vec::new(),
            goals: Vec::new(),
        }
    }

    /// Walls along all four edges.
    pub fn border(mut self) -> Self {
        self.border = true;
        self
    }

    pub fn wall(mut self, pos: Pos) -> Self {
        self.walls.push(pos);
        self
    }

    pub fn agent(mut self, id: u8, color: Color, pos: Pos) -> Self {
        self.agents.push((id, color, pos));
        self
    }

    pub fn box_color(mut self, letter: char, color: Color) -> Self {
        self.box_colors.push((letter, color));
        self
    }

    pub fn box_at(mut self, letter: char, pos: Pos) -> Self {
        self.boxes.push((letter, pos));
        self
    }

    pub fn agent_goal(mut self, id: u8, pos: Pos) -> Self {
        self.goals.push((pos, Goal::Agent(id)));
        self
    }

    pub fn box_goal(mut self, letter: char, pos: Pos) -> Self {
        self.goals.push((pos, Goal::Box(letter)));
        self
    }

    pub fn build(self) -> Result<Level, LevelErr> {
        let in_bounds = |pos: Pos| pos.r < self.rows && pos.c < self.cols;
        let check = |pos: Pos| {
            if in_bounds(pos) {
                Ok(pos)
            } else {
                Err(LevelErr::OutOfBounds(pos))
            }
        };

        let mut walls = Vec2d::new(self.rows, self.cols, false);
        if self.border {
            for pos in walls.positions() {
                if pos.r == 0 || pos.c == 0 || pos.r + 1 == self.rows || pos.c + 1 == self.cols {
                    walls[pos] = true;
                }
            }
        }
        for &pos in &self.walls {
            walls[check(pos)?] = true;
        }

        let mut occupied = walls.clone();
        let mut occupy = |pos: Pos| {
            let pos = check(pos)?;
            if occupied[pos] {
                return Err(LevelErr::Overlap(pos));
            }
            occupied[pos] = true;
            Ok(pos)
        };

        let mut agents = self.agents.clone();
        agents.sort_by_key(|&(id, _, _)| id);
        if agents.is_empty() {
            return Err(LevelErr::NoAgents);
        }
        if agents.len() > MAX_AGENTS {
            return Err(LevelErr::TooManyAgents);
        }
        for (i, &(id, _, pos)) in agents.iter().enumerate() {
            occupy(pos)?;
            if i > 0 && agents[i - 1].0 == id {
                return Err(LevelErr::DuplicateAgent(id));
            }
            if usize::from(id) != i {
                return Err(LevelErr::MissingAgent(i as u8));
            }
        }

        let mut box_colors = [None; 26];
        for &(letter, color) in &self.box_colors {
            let i = box_index(letter).ok_or(LevelErr::InvalidBox(letter))?;
            box_colors[i] = Some(color);
        }
        let colored = |letter: char| match box_index(letter) {
            None => Err(LevelErr::InvalidBox(letter)),
            Some(i) if box_colors[i].is_none() => Err(LevelErr::BoxWithoutColor(letter)),
            Some(_) => Ok(letter),
        };

        let mut boxes = Vec::with_capacity(self.boxes.len());
        for &(letter, pos) in &self.boxes {
            boxes.push((occupy(pos)?, colored(letter)?));
        }

        let mut goal_cells = walls.scratchpad(false);
        for &(pos, goal) in &self.goals {
            let pos = check(pos)?;
            if walls[pos] || goal_cells[pos] {
                return Err(LevelErr::Overlap(pos));
            }
            goal_cells[pos] = true;
            match goal {
                Goal::Agent(id) if usize::from(id) >= agents.len() => {
                    return Err(LevelErr::MissingAgent(id));
                }
                Goal::Agent(_) => {}
                Goal::Box(letter) => {
                    colored(letter)?;
                }
            }
        }

        check_border(&walls, agents.iter().map(|&(_, _, pos)| pos))?;

        boxes.sort();
        Ok(Level {
            walls,
            goals: self.goals,
            agent_colors: agents.iter().map(|&(_, color, _)| color).collect(),
            box_colors,
            agents: agents.iter().map(|&(_, _, pos)| pos).collect(),
            boxes,
        })
    }
}

/// Makes sure nothing an agent can walk to (ignoring boxes) touches the edge of the grid.
fn check_border<I: Iterator<Item = Pos>>(walls: &Vec2d<bool>, agents: I) -> Result<(), LevelErr> {
    let mut visited = walls.scratchpad(false);
    let mut to_visit: Vec<Pos> = agents.collect();

    while let Some(cur) = to_visit.pop() {
        visited[cur] = true;

        for &dir in &DIRECTIONS {
            let (nr, nc) = (
                i16::from(cur.r) + i16::from(dir.r),
                i16::from(cur.c) + i16::from(dir.c),
            );
            // this is the only place we need to check bounds (using signed types)
            // everything after that will be surrounded by walls
            if !walls.contains(nr, nc) {
                return Err(LevelErr::IncompleteBorder);
            }

            let new_pos = Pos::new(nr as u8, nc as u8);
            if !visited[new_pos] && !walls[new_pos] {
                to_visit.push(new_pos);
            }
        }
    }

    Ok(())
}
