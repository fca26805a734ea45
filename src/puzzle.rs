//! A board plus its robots and goal.
//!
//! Puzzles are assembled with a [`PuzzleBuilder`] and are read-only once
//! built, so a solver can hold a plain shared reference for the whole search.

use std::str::FromStr;

use crate::board::{Board, Cell, Edge};
use crate::error::PuzzleError;
use crate::movement::Configuration;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Robot {
    pub name: char,
    pub start: Cell,
}

/// Which robot has to reach the goal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GoalRobot {
    Any,
    /// Index into the puzzle's robots.
    Robot(usize),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Goal {
    pub cell: Cell,
    pub robot: GoalRobot,
}

impl Goal {
    pub fn is_met(&self, configuration: &Configuration) -> bool {
        match self.robot {
            GoalRobot::Any => configuration.is_occupied(self.cell),
            GoalRobot::Robot(index) => configuration[index] == self.cell,
        }
    }
}

/// An unresolved goal robot as written in a puzzle description.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GoalSelector {
    Any,
    Named(char),
}

impl FromStr for GoalSelector {
    type Err = PuzzleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "any" {
            return Ok(GoalSelector::Any);
        }
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(name), None) if name.is_ascii_uppercase() => Ok(GoalSelector::Named(name)),
            _ => Err(PuzzleError::InvalidRobotName(s.to_string())),
        }
    }
}

#[derive(Clone, Debug)]
pub struct PuzzleBuilder {
    board: Board,
    robots: Vec<Robot>,
    goal: Option<Goal>,
}

impl PuzzleBuilder {
    pub fn new(rows: usize, cols: usize) -> Result<PuzzleBuilder, PuzzleError> {
        Ok(PuzzleBuilder {
            board: Board::new(rows, cols)?,
            robots: Vec::new(),
            goal: None,
        })
    }

    pub fn add_horizontal_wall(&mut self, edge: Edge, col: usize) -> Result<&mut Self, PuzzleError> {
        self.board.add_horizontal_wall(edge, col)?;
        Ok(self)
    }

    pub fn add_vertical_wall(&mut self, row: usize, edge: Edge) -> Result<&mut Self, PuzzleError> {
        self.board.add_vertical_wall(row, edge)?;
        Ok(self)
    }

    /// Adds a robot. Its index is the number of robots placed before it.
    pub fn place_robot(&mut self, cell: Cell, name: char) -> Result<&mut Self, PuzzleError> {
        if !name.is_ascii_uppercase() {
            return Err(PuzzleError::InvalidRobotName(name.to_string()));
        }
        if self.robots.iter().any(|r| r.name == name) {
            return Err(PuzzleError::DuplicateRobot(name));
        }
        if !self.board.contains(cell) {
            return Err(PuzzleError::CellOutOfRange(cell));
        }
        if let Some(by) = self.occupant(cell) {
            return Err(PuzzleError::CellOccupied { cell, by });
        }
        if self.goal.map_or(false, |g| g.cell == cell) {
            return Err(PuzzleError::RobotOnGoal { name, cell });
        }

        self.robots.push(Robot { name, start: cell });
        Ok(self)
    }

    /// Sets (or replaces) the goal.
    pub fn set_goal(&mut self, selector: GoalSelector, cell: Cell) -> Result<&mut Self, PuzzleError> {
        if !self.board.contains(cell) {
            return Err(PuzzleError::CellOutOfRange(cell));
        }
        if let Some(by) = self.occupant(cell) {
            return Err(PuzzleError::GoalOccupied { cell, by });
        }
        let robot = match selector {
            GoalSelector::Any => GoalRobot::Any,
            GoalSelector::Named(name) => GoalRobot::Robot(
                self.robots
                    .iter()
                    .position(|r| r.name == name)
                    .ok_or(PuzzleError::UnknownRobot(name))?,
            ),
        };

        self.goal = Some(Goal { cell, robot });
        Ok(self)
    }

    pub fn build(self) -> Result<Puzzle, PuzzleError> {
        if self.robots.is_empty() {
            return Err(PuzzleError::NoRobots);
        }
        let goal = self.goal.ok_or(PuzzleError::MissingGoal)?;
        Ok(Puzzle {
            board: self.board,
            robots: self.robots,
            goal,
        })
    }

    fn occupant(&self, cell: Cell) -> Option<char> {
        self.robots.iter().find(|r| r.start == cell).map(|r| r.name)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Puzzle {
    board: Board,
    robots: Vec<Robot>,
    goal: Goal,
}

impl Puzzle {
    pub fn builder(rows: usize, cols: usize) -> Result<PuzzleBuilder, PuzzleError> {
        PuzzleBuilder::new(rows, cols)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn rows(&self) -> usize {
        self.board.rows()
    }

    pub fn cols(&self) -> usize {
        self.board.cols()
    }

    pub fn robot_count(&self) -> usize {
        self.robots.len()
    }

    /// The robot placed `index`-th, or `None` past the last robot.
    pub fn robot(&self, index: usize) -> Option<&Robot> {
        self.robots.get(index)
    }

    pub fn robot_name(&self, index: usize) -> Option<char> {
        self.robot(index).map(|r| r.name)
    }

    /// Where the robot starts, not where a search has moved it to.
    pub fn robot_start(&self, index: usize) -> Option<Cell> {
        self.robot(index).map(|r| r.start)
    }

    pub fn robot_index(&self, name: char) -> Option<usize> {
        self.robots.iter().position(|r| r.name == name)
    }

    pub fn goal(&self) -> Goal {
        self.goal
    }

    pub fn initial_configuration(&self) -> Configuration {
        self.robots.iter().map(|r| r.start).collect()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn builder() -> PuzzleBuilder {
        let mut b = PuzzleBuilder::new(4, 4).unwrap();
        b.place_robot(Cell::new(1, 1), 'A').unwrap();
        b.place_robot(Cell::new(2, 2), 'B').unwrap();
        b
    }

    #[test]
    fn robots_keep_their_placement_order() {
        let mut b = builder();
        b.set_goal(GoalSelector::Named('B'), Cell::new(4, 4)).unwrap();
        let puzzle = b.build().unwrap();

        assert_eq!(puzzle.robot_count(), 2);
        assert_eq!(puzzle.robot_name(1), Some('B'));
        assert_eq!(puzzle.robot_start(0), Some(Cell::new(1, 1)));
        assert_eq!(
            puzzle.robot(1),
            Some(&Robot { name: 'B', start: Cell::new(2, 2) })
        );
        assert_eq!(puzzle.robot(2), None);
        assert_eq!(puzzle.robot_name(2), None);
        assert_eq!(puzzle.robot_start(7), None);
        assert_eq!(puzzle.robot_index('B'), Some(1));
        assert_eq!(puzzle.robot_index('C'), None);
        assert_eq!(puzzle.goal().robot, GoalRobot::Robot(1));
        assert_eq!(
            puzzle.initial_configuration().positions(),
            &[Cell::new(1, 1), Cell::new(2, 2)]
        );
    }

    #[test]
    fn bad_placements_are_rejected() {
        let mut b = builder();
        assert_eq!(
            b.place_robot(Cell::new(2, 2), 'C').unwrap_err(),
            PuzzleError::CellOccupied { cell: Cell::new(2, 2), by: 'B' }
        );
        assert_eq!(
            b.place_robot(Cell::new(3, 3), 'A').unwrap_err(),
            PuzzleError::DuplicateRobot('A')
        );
        assert!(matches!(
            b.place_robot(Cell::new(3, 3), 'c'),
            Err(PuzzleError::InvalidRobotName(_))
        ));
        assert_eq!(
            b.place_robot(Cell::new(5, 1), 'C').unwrap_err(),
            PuzzleError::CellOutOfRange(Cell::new(5, 1))
        );

        b.set_goal(GoalSelector::Any, Cell::new(3, 3)).unwrap();
        assert_eq!(
            b.place_robot(Cell::new(3, 3), 'C').unwrap_err(),
            PuzzleError::RobotOnGoal { name: 'C', cell: Cell::new(3, 3) }
        );
    }

    #[test]
    fn bad_goals_are_rejected() {
        let mut b = builder();
        assert_eq!(
            b.set_goal(GoalSelector::Any, Cell::new(1, 1)).unwrap_err(),
            PuzzleError::GoalOccupied { cell: Cell::new(1, 1), by: 'A' }
        );
        assert_eq!(
            b.set_goal(GoalSelector::Named('Z'), Cell::new(3, 3)).unwrap_err(),
            PuzzleError::UnknownRobot('Z')
        );
    }

    #[test]
    fn incomplete_puzzles_do_not_build() {
        assert_eq!(builder().build().unwrap_err(), PuzzleError::MissingGoal);

        let mut empty = PuzzleBuilder::new(2, 2).unwrap();
        empty.set_goal(GoalSelector::Any, Cell::new(1, 1)).unwrap();
        assert_eq!(empty.build().unwrap_err(), PuzzleError::NoRobots);

        assert_eq!(
            PuzzleBuilder::new(0, 3).unwrap_err(),
            PuzzleError::EmptyBoard { rows: 0, cols: 3 }
        );
    }

    #[test]
    fn goal_selectors_parse() {
        assert_eq!("any".parse::<GoalSelector>(), Ok(GoalSelector::Any));
        assert_eq!("R".parse::<GoalSelector>(), Ok(GoalSelector::Named('R')));
        assert!("RG".parse::<GoalSelector>().is_err());
        assert!("r".parse::<GoalSelector>().is_err());
    }

    #[test]
    fn goal_conditions() {
        let config: Configuration = [Cell::new(3, 3), Cell::new(1, 2)].into_iter().collect();
        let any = Goal { cell: Cell::new(1, 2), robot: GoalRobot::Any };
        let first = Goal { cell: Cell::new(1, 2), robot: GoalRobot::Robot(0) };
        let second = Goal { cell: Cell::new(1, 2), robot: GoalRobot::Robot(1) };
        assert!(any.is_met(&config));
        assert!(!first.is_met(&config));
        assert!(second.is_met(&config));
    }
}
