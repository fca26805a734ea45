//! Text rendering.
//!
//! Each board row takes three lines of text plus a separator line. Walls are
//! drawn as `|` and `---`, robots by their letter, and an empty goal cell as
//! `?` (any robot) or the lowercase letter of the robot that must reach it.

use std::fmt::{self, Display, Write};

use crate::board::Cell;
use crate::movement::Configuration;
use crate::puzzle::{GoalRobot, Puzzle};
use crate::solver::ReachabilityMap;

/// A puzzle drawn with its robots at some configuration.
pub struct BoardView<'a> {
    puzzle: &'a Puzzle,
    config: &'a Configuration,
}

impl Puzzle {
    pub fn view<'a>(&'a self, config: &'a Configuration) -> BoardView<'a> {
        BoardView {
            puzzle: self,
            config,
        }
    }
}

impl BoardView<'_> {
    fn symbol(&self, cell: Cell) -> char {
        if let Some(name) = self
            .config
            .robot_at(cell)
            .and_then(|robot| self.puzzle.robot_name(robot))
        {
            return name;
        }
        let goal = self.puzzle.goal();
        if goal.cell != cell {
            return ' ';
        }
        match goal.robot {
            GoalRobot::Any => '?',
            GoalRobot::Robot(index) => self
                .puzzle
                .robot_name(index)
                .map_or(' ', |name| name.to_ascii_lowercase()),
        }
    }
}

impl Display for BoardView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let board = self.puzzle.board();

        f.write_char(' ')?;
        for col in 1..=board.cols() {
            write!(f, "{:>4}", col)?;
        }
        f.write_char('\n')?;

        for row in 0..=board.rows() {
            // row 0 only has its lower edge
            if row > 0 {
                let mut outer = String::from("  ");
                let mut middle = String::new();
                for col in 0..=board.cols() {
                    if col > 0 {
                        outer.push_str("   ");
                        middle.push(' ');
                        middle.push(self.symbol(Cell::new(row, col)));
                        middle.push(' ');
                    }
                    let wall = if board.vertical_edge(row, col) { '|' } else { ' ' };
                    outer.push(wall);
                    middle.push(wall);
                }
                writeln!(f, "{outer}")?;
                writeln!(f, "{:>2}{middle}", row)?;
                writeln!(f, "{outer}")?;
            }

            f.write_str("  +")?;
            for col in 1..=board.cols() {
                f.write_str(if board.horizontal_edge(row, col) { "---" } else { "   " })?;
                f.write_char('+')?;
            }
            f.write_char('\n')?;
        }

        Ok(())
    }
}

impl Display for Puzzle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.view(&self.initial_configuration()).fmt(f)
    }
}

impl Display for ReachabilityMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 1..=self.rows() {
            for col in 1..=self.cols() {
                match self.get(Cell::new(row, col)) {
                    Some(d) => write!(f, "{:<3}", d)?,
                    None => write!(f, "{:<3}", '.')?,
                }
            }
            f.write_char('\n')?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use crate::board::{Cell, Edge};
    use crate::puzzle::{GoalSelector, PuzzleBuilder};
    use crate::solver::compute_reachability;

    #[test]
    fn draws_walls_robots_and_goal() {
        let mut b = PuzzleBuilder::new(2, 2).unwrap();
        b.place_robot(Cell::new(1, 1), 'A').unwrap();
        b.add_vertical_wall(2, Edge::after(1)).unwrap();
        b.set_goal(GoalSelector::Named('A'), Cell::new(2, 2)).unwrap();
        let puzzle = b.build().unwrap();

        let expected = "\
    1   2
  +---+---+
  |       |
 1| A     |
  |       |
  +   +   +
  |   |   |
 2|   | a |
  |   |   |
  +---+---+
";
        assert_eq!(puzzle.to_string(), expected);
    }

    #[test]
    fn any_goal_is_a_question_mark() {
        let mut b = PuzzleBuilder::new(1, 2).unwrap();
        b.place_robot(Cell::new(1, 1), 'A').unwrap();
        b.set_goal(GoalSelector::Any, Cell::new(1, 2)).unwrap();
        let puzzle = b.build().unwrap();

        assert!(puzzle.to_string().contains(" 1| A   ? |"));
    }

    #[test]
    fn reachability_grid() {
        let mut b = PuzzleBuilder::new(2, 3).unwrap();
        b.place_robot(Cell::new(1, 1), 'A').unwrap();
        b.add_vertical_wall(1, Edge::after(1)).unwrap();
        b.add_horizontal_wall(Edge::after(1), 1).unwrap();
        b.set_goal(GoalSelector::Any, Cell::new(2, 3)).unwrap();
        let puzzle = b.build().unwrap();

        assert_eq!(
            compute_reachability(&puzzle, None).to_string(),
            "0  .  .  \n.  .  .  \n"
        );
    }
}
