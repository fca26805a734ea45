//! The sliding rule: a robot moves in a straight line until the next step
//! would cross a wall or land on another robot.

use std::{
    fmt::{self, Display},
    ops::{Index, Neg},
    str::FromStr,
};

use itertools::Itertools;
use smallvec::SmallVec;

use crate::board::{Board, Cell};
use crate::error::ParseDirectionError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];
}

impl Neg for Direction {
    type Output = Direction;

    fn neg(self) -> Self::Output {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Direction::North => "north",
            Direction::East => "east",
            Direction::South => "south",
            Direction::West => "west",
        })
    }
}

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "north" => Ok(Direction::North),
            "east" => Ok(Direction::East),
            "south" => Ok(Direction::South),
            "west" => Ok(Direction::West),
            _ => Err(ParseDirectionError(s.to_string())),
        }
    }
}

/// One edge of the search graph: which robot moved, and where.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub robot: char,
    pub direction: Direction,
}

impl Move {
    pub const fn new(robot: char, direction: Direction) -> Move {
        Move { robot, direction }
    }
}

impl Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "robot {} moves {}", self.robot, self.direction)
    }
}

pub type Path = Vec<Move>;

/// The position of every robot, by robot index.
///
/// Equality and hashing only look at the positions, so two routes to the same
/// arrangement are the same search state.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Configuration(SmallVec<[Cell; 4]>);

impl Configuration {
    pub fn positions(&self) -> &[Cell] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_occupied(&self, cell: Cell) -> bool {
        self.0.contains(&cell)
    }

    /// Index of the robot standing on `cell`, if any.
    pub fn robot_at(&self, cell: Cell) -> Option<usize> {
        self.0.iter().position(|&c| c == cell)
    }

    /// The configuration after sliding `robot` towards `direction`, or `None`
    /// when the robot cannot leave its cell.
    pub fn apply(&self, board: &Board, robot: usize, direction: Direction) -> Option<Configuration> {
        let rest = slide(board, self, robot, direction)?;
        let mut next = self.clone();
        next.0[robot] = rest;
        Some(next)
    }
}

impl Index<usize> for Configuration {
    type Output = Cell;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl FromIterator<Cell> for Configuration {
    fn from_iter<T: IntoIterator<Item = Cell>>(iter: T) -> Self {
        Configuration(iter.into_iter().collect())
    }
}

impl Display for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "( {} )", self.0.iter().join(" "))
    }
}

// cells from `from` (exclusive) to the board edge, nearest first
#[auto_enums::auto_enum(Iterator)]
fn ray(board: &Board, from: Cell, direction: Direction) -> impl Iterator<Item = Cell> {
    let Cell { row, col } = from;
    match direction {
        Direction::North => (1..row).rev().map(move |r| Cell::new(r, col)),
        Direction::South => (row + 1..=board.rows()).map(move |r| Cell::new(r, col)),
        Direction::West => (1..col).rev().map(move |c| Cell::new(row, c)),
        Direction::East => (col + 1..=board.cols()).map(move |c| Cell::new(row, c)),
    }
}

/// Where `robot` comes to rest when pushed towards `direction`.
///
/// Returns `None` when the first step is already blocked by a wall or a
/// robot. The perimeter walls keep the result on the board.
pub fn slide(
    board: &Board,
    configuration: &Configuration,
    robot: usize,
    direction: Direction,
) -> Option<Cell> {
    let from = configuration[robot];
    let mut rest = from;
    for next in ray(board, from, direction) {
        if board.wall_beside(rest, direction) || configuration.is_occupied(next) {
            break;
        }
        rest = next;
    }

    (rest != from).then_some(rest)
}
