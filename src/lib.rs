// Opt in to warnings about new 2018 idioms
#![warn(rust_2018_idioms)]
// Additional warnings that are allow by default (`rustc -W help`)
#![warn(missing_copy_implementations)]
#![warn(missing_debug_implementations)]
#![warn(trivial_casts)]
#![warn(trivial_numeric_casts)]
#![warn(unreachable_pub)]
#![warn(unused)]
// Clippy
#![allow(unknown_lints)] // necessary because rustc doesn't know about clippy
#![warn(clippy::all)]

pub mod action;
pub mod config;
pub mod data;
pub mod heuristic;
pub mod level;
pub mod plan;
pub mod scenarios;
pub mod solver;
pub mod state;

mod vec2d;

use crate::action::JointAction;
use crate::config::Config;
use crate::solver::{SolverErr, SolverOk};

pub trait Solve {
    fn solve(&self, config: &Config) -> Result<SolverOk<JointAction>, SolverErr>;
}
