//! Solver for Ricochet Robots style puzzles.
//!
//! Robots on a walled grid slide in one of four directions until they hit a
//! wall or another robot. The solver runs a breadth-first search over robot
//! configurations to find the shortest move sequence that brings the goal
//! robot (or any robot) onto the goal cell, every tied shortest sequence, or
//! the fewest moves needed for a robot to reach each cell.
//!
//! ```
//! use ricochet_solver::{find_shortest_solution, Puzzle};
//!
//! let puzzle: Puzzle = "5 5\nrobot A 1 1\ngoal any 5 5\n".parse().unwrap();
//! let search = find_shortest_solution(&puzzle, None);
//! assert_eq!(search.paths()[0].len(), 2);
//! ```

pub mod board;
pub mod error;
pub mod movement;
pub mod parse;
pub mod puzzle;
pub mod render;
pub mod solver;
pub mod state;

pub use board::{Board, Cell, Edge};
pub use error::{DomainError, ParseDirectionError, ParseError, PuzzleError, ReplayError};
pub use movement::{slide, Configuration, Direction, Move, Path};
pub use parse::{load_puzzle, parse_puzzle};
pub use puzzle::{Goal, GoalRobot, GoalSelector, Puzzle, PuzzleBuilder, Robot};
pub use render::BoardView;
pub use solver::{
    compute_reachability, find_all_shortest_solutions, find_shortest_solution, replay, Outcome,
    ReachabilityMap, Search, SearchStats, Solver,
};
pub use state::SearchNode;
