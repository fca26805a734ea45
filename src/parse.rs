//! Loader for the whitespace separated puzzle format:
//!
//! ```text
//! <rows> <cols>
//! robot <LETTER> <row> <col>
//! vertical_wall <row> <col.5>
//! horizontal_wall <row.5> <col>
//! goal <any|LETTER> <row> <col>
//! ```
//!
//! Everything after the dimensions may come in any order.

use std::{fs, path::Path, str::FromStr};

use crate::board::{Cell, Edge};
use crate::error::{ParseError, PuzzleError};
use crate::puzzle::{GoalSelector, Puzzle, PuzzleBuilder};

struct Tokens<'a> {
    inner: Box<dyn Iterator<Item = (usize, &'a str)> + 'a>,
    line: usize,
}

impl<'a> Tokens<'a> {
    fn new(input: &'a str) -> Tokens<'a> {
        let inner = input
            .lines()
            .enumerate()
            .flat_map(|(i, line)| line.split_whitespace().map(move |t| (i + 1, t)));
        Tokens {
            inner: Box::new(inner),
            line: 0,
        }
    }

    fn next_token(&mut self) -> Option<&'a str> {
        let (line, token) = self.inner.next()?;
        self.line = line;
        Some(token)
    }

    fn field(&mut self, token: &'static str, field: &'static str) -> Result<&'a str, ParseError> {
        self.next_token().ok_or(ParseError::MissingField {
            line: self.line,
            token,
            field,
        })
    }

    fn number<T: FromStr>(&mut self, token: &'static str, field: &'static str) -> Result<T, ParseError> {
        let value = self.field(token, field)?;
        value.parse().map_err(|_| ParseError::BadNumber {
            line: self.line,
            value: value.to_string(),
        })
    }

    fn edge(&mut self, token: &'static str, field: &'static str) -> Result<Edge, ParseError> {
        let value: f64 = self.number(token, field)?;
        Edge::try_from(value).map_err(|source| ParseError::BadEdge {
            line: self.line,
            source,
        })
    }

    fn dimension(&mut self) -> Result<usize, ParseError> {
        let value = self.next_token().ok_or(ParseError::MissingDimensions)?;
        value.parse().map_err(|_| ParseError::BadNumber {
            line: self.line,
            value: value.to_string(),
        })
    }

    fn cell(&mut self, token: &'static str) -> Result<Cell, ParseError> {
        let row = self.number(token, "row")?;
        let col = self.number(token, "column")?;
        Ok(Cell::new(row, col))
    }
}

pub fn parse_puzzle(input: &str) -> Result<Puzzle, ParseError> {
    let mut tokens = Tokens::new(input);
    let rows = tokens.dimension()?;
    let cols = tokens.dimension()?;
    let mut builder = PuzzleBuilder::new(rows, cols)?;

    while let Some(token) = tokens.next_token() {
        let line = tokens.line;
        let placed = match token {
            "robot" => {
                let name = tokens.field("robot", "name")?;
                let cell = tokens.cell("robot")?;
                single_letter(name).and_then(|name| builder.place_robot(cell, name).map(drop))
            }
            "vertical_wall" => {
                let row = tokens.number("vertical_wall", "row")?;
                let edge = tokens.edge("vertical_wall", "column")?;
                builder.add_vertical_wall(row, edge).map(drop)
            }
            "horizontal_wall" => {
                let edge = tokens.edge("horizontal_wall", "row")?;
                let col = tokens.number("horizontal_wall", "column")?;
                builder.add_horizontal_wall(edge, col).map(drop)
            }
            "goal" => {
                let selector = tokens.field("goal", "robot")?;
                let cell = tokens.cell("goal")?;
                selector
                    .parse::<GoalSelector>()
                    .and_then(|selector| builder.set_goal(selector, cell).map(drop))
            }
            _ => {
                return Err(ParseError::UnknownToken {
                    line,
                    token: token.to_string(),
                })
            }
        };
        placed.map_err(|source| ParseError::Puzzle { line, source })?;
    }

    let puzzle = builder.build()?;
    log::debug!(
        "loaded {}x{} puzzle with {} robot(s)",
        puzzle.rows(),
        puzzle.cols(),
        puzzle.robot_count()
    );
    Ok(puzzle)
}

pub fn load_puzzle(path: impl AsRef<Path>) -> Result<Puzzle, ParseError> {
    parse_puzzle(&fs::read_to_string(path)?)
}

impl FromStr for Puzzle {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_puzzle(s)
    }
}

fn single_letter(name: &str) -> Result<char, PuzzleError> {
    let mut chars = name.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(PuzzleError::InvalidRobotName(name.to_string())),
    }
}
