//! Small built-in levels for the binary, tests and benchmarks.

use crate::data::{Color, Pos};
use crate::level::{Level, LevelBuilder, LevelErr};

pub const NAMES: [&str; 7] = [
    "solved",
    "corridor",
    "room",
    "push",
    "pull",
    "two-agents",
    "walled-off",
];

/// `None` if there's no scenario called `name`.
pub fn scenario(name: &str) -> Option<Result<Level, LevelErr>> {
    let builder = match name {
        // the agent starts on its goal
        "solved" => LevelBuilder::new(3, 3)
            .border()
            .agent(0, Color::Blue, Pos::new(1, 1))
            .agent_goal(0, Pos::new(1, 1)),
        // 3 moves east
        "corridor" => LevelBuilder::new(3, 6)
            .border()
            .agent(0, Color::Blue, Pos::new(1, 1))
            .agent_goal(0, Pos::new(1, 4)),
        // open 5x5 interior, one box to move diagonally across
        "room" => LevelBuilder::new(7, 7)
            .border()
            .agent(0, Color::Blue, Pos::new(1, 1))
            .box_color('A', Color::Blue)
            .box_at('A', Pos::new(2, 2))
            .box_goal('A', Pos::new(4, 4)),
        "push" => LevelBuilder::new(3, 7)
            .border()
            .agent(0, Color::Green, Pos::new(1, 1))
            .box_color('A', Color::Green)
            .box_at('A', Pos::new(1, 2))
            .box_goal('A', Pos::new(1, 4)),
        // the box is in a dead end so it can only be pulled out
        "pull" => LevelBuilder::new(3, 6)
            .border()
            .agent(0, Color::Red, Pos::new(1, 3))
            .box_color('B', Color::Red)
            .box_at('B', Pos::new(1, 4))
            .box_goal('B', Pos::new(1, 2)),
        // two agents swapping sides in parallel rows
        "two-agents" => LevelBuilder::new(4, 6)
            .border()
            .agent(0, Color::Blue, Pos::new(1, 1))
            .agent(1, Color::Red, Pos::new(2, 4))
            .agent_goal(0, Pos::new(1, 4))
            .agent_goal(1, Pos::new(2, 1)),
        "walled-off" => LevelBuilder::new(3, 7)
            .border()
            .wall(Pos::new(1, 3))
            .agent(0, Color::Blue, Pos::new(1, 1))
            .agent_goal(0, Pos::new(1, 5)),
        _ => return None,
    };
    Some(builder.build())
}
