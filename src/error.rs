use std::io;

use crate::board::Cell;
use crate::movement::Move;

/// A puzzle that cannot be built: bad walls, bad robot placement or a bad goal.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PuzzleError {
    #[error("board must have at least one row and one column, got {rows}x{cols}")]
    EmptyBoard { rows: usize, cols: usize },
    #[error("wall {0} is outside the board")]
    WallOutOfRange(String),
    #[error("wall {0} already exists")]
    DuplicateWall(String),
    #[error("cell {0} is outside the board")]
    CellOutOfRange(Cell),
    #[error("cell {cell} is already occupied by robot {by}")]
    CellOccupied { cell: Cell, by: char },
    #[error("robot {name} may not start on the goal {cell}")]
    RobotOnGoal { name: char, cell: Cell },
    #[error("robot name {0:?} is not a single uppercase letter")]
    InvalidRobotName(String),
    #[error("robot {0} is placed twice")]
    DuplicateRobot(char),
    #[error("robot {0} does not exist")]
    UnknownRobot(char),
    #[error("goal {cell} is occupied by robot {by}")]
    GoalOccupied { cell: Cell, by: char },
    #[error("puzzle has no goal")]
    MissingGoal,
    #[error("puzzle has no robots")]
    NoRobots,
}

/// A query outside the board or with a malformed coordinate. These are caller
/// bugs, not properties of a puzzle.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("{0} is not a half-integer edge coordinate")]
    NotHalfInteger(f64),
    #[error("edge {edge} is outside 0.5..={limit}.5")]
    EdgeOutOfRange { edge: String, limit: usize },
    #[error("{axis} {value} is outside 1..={limit}")]
    OutOfRange {
        axis: &'static str,
        value: usize,
        limit: usize,
    },
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown direction {0:?}")]
pub struct ParseDirectionError(pub(crate) String);

#[derive(thiserror::Error, Debug)]
pub enum ParseError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("missing board dimensions")]
    MissingDimensions,
    #[error("line {line}: unknown token {token:?}")]
    UnknownToken { line: usize, token: String },
    #[error("line {line}: {token} is missing its {field}")]
    MissingField {
        line: usize,
        token: &'static str,
        field: &'static str,
    },
    #[error("line {line}: {value:?} is not a valid number")]
    BadNumber { line: usize, value: String },
    #[error("line {line}: {source}")]
    BadEdge { line: usize, source: DomainError },
    #[error("line {line}: {source}")]
    Puzzle { line: usize, source: PuzzleError },
    #[error(transparent)]
    Build(#[from] PuzzleError),
}

/// A path that cannot be replayed against a puzzle.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ReplayError {
    #[error("step {step}: robot {name} does not exist")]
    UnknownRobot { step: usize, name: char },
    #[error("step {step}: {mv} does not move the robot")]
    Blocked { step: usize, mv: Move },
}
