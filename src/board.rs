//! Board geometry: dimensions and wall placement.
//!
//! Cells are 1-indexed `(row, col)`. Walls sit on the edges between cells,
//! addressed with half-integer coordinates: the horizontal wall below row `r`
//! is at row `r + 0.5`, the vertical wall right of column `c` is at column
//! `c + 0.5`. The four perimeter edges are always walls.

use std::fmt::{self, Display};

use itertools::iproduct;
use pathfinding::matrix::Matrix;

use crate::error::{DomainError, PuzzleError};
use crate::movement::Direction;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    /// The unset coordinate. Never equal to a cell on any board.
    pub const INVALID: Cell = Cell { row: 0, col: 0 };

    pub const fn new(row: usize, col: usize) -> Cell {
        Cell { row, col }
    }

    pub fn is_valid(self) -> bool {
        self.row > 0 && self.col > 0
    }
}

impl Default for Cell {
    fn default() -> Self {
        Cell::INVALID
    }
}

impl Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

/// A half-integer wall coordinate, stored as the index of the edge.
///
/// `Edge::after(r)` is the coordinate `r + 0.5`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Edge(usize);

impl Edge {
    pub const fn after(index: usize) -> Edge {
        Edge(index)
    }

    pub const fn index(self) -> usize {
        self.0
    }
}

impl TryFrom<f64> for Edge {
    type Error = DomainError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if !value.is_finite() || value <= 0.0 || value.fract() != 0.5 {
            return Err(DomainError::NotHalfInteger(value));
        }
        Ok(Edge(value.floor() as usize))
    }
}

impl Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.5", self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    rows: usize,
    cols: usize,
    // (rows + 1) x cols, indexed by (edge, col - 1)
    horizontal: Matrix<bool>,
    // rows x (cols + 1), indexed by (row - 1, edge)
    vertical: Matrix<bool>,
}

impl Board {
    pub fn new(rows: usize, cols: usize) -> Result<Board, PuzzleError> {
        if rows == 0 || cols == 0 {
            return Err(PuzzleError::EmptyBoard { rows, cols });
        }

        let mut horizontal = Matrix::new(rows + 1, cols, false);
        let mut vertical = Matrix::new(rows, cols + 1, false);
        for c in 0..cols {
            horizontal[(0, c)] = true;
            horizontal[(rows, c)] = true;
        }
        for r in 0..rows {
            vertical[(r, 0)] = true;
            vertical[(r, cols)] = true;
        }

        Ok(Board {
            rows,
            cols,
            horizontal,
            vertical,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn contains(&self, cell: Cell) -> bool {
        (1..=self.rows).contains(&cell.row) && (1..=self.cols).contains(&cell.col)
    }

    /// Every cell, row by row.
    pub fn cells(&self) -> impl Iterator<Item = Cell> {
        iproduct!(1..=self.rows, 1..=self.cols).map(|(row, col)| Cell::new(row, col))
    }

    /// Whether a wall blocks vertical movement across `edge` in column `col`.
    pub fn has_horizontal_wall(&self, edge: Edge, col: usize) -> Result<bool, DomainError> {
        check_edge(edge, self.rows)?;
        check_axis("column", col, self.cols)?;
        Ok(self.horizontal[(edge.0, col - 1)])
    }

    /// Whether a wall blocks horizontal movement across `edge` in row `row`.
    pub fn has_vertical_wall(&self, row: usize, edge: Edge) -> Result<bool, DomainError> {
        check_axis("row", row, self.rows)?;
        check_edge(edge, self.cols)?;
        Ok(self.vertical[(row - 1, edge.0)])
    }

    pub fn add_horizontal_wall(&mut self, edge: Edge, col: usize) -> Result<(), PuzzleError> {
        let name = || format!("horizontal {edge} {col}");
        if edge.0 > self.rows || !(1..=self.cols).contains(&col) {
            return Err(PuzzleError::WallOutOfRange(name()));
        }
        let slot = &mut self.horizontal[(edge.0, col - 1)];
        if *slot {
            return Err(PuzzleError::DuplicateWall(name()));
        }
        *slot = true;
        Ok(())
    }

    pub fn add_vertical_wall(&mut self, row: usize, edge: Edge) -> Result<(), PuzzleError> {
        let name = || format!("vertical {row} {edge}");
        if edge.0 > self.cols || !(1..=self.rows).contains(&row) {
            return Err(PuzzleError::WallOutOfRange(name()));
        }
        let slot = &mut self.vertical[(row - 1, edge.0)];
        if *slot {
            return Err(PuzzleError::DuplicateWall(name()));
        }
        *slot = true;
        Ok(())
    }

    /// Whether the side of `cell` facing `direction` is a wall. `cell` must be
    /// on the board.
    pub(crate) fn wall_beside(&self, cell: Cell, direction: Direction) -> bool {
        debug_assert!(self.contains(cell));
        match direction {
            Direction::North => self.horizontal[(cell.row - 1, cell.col - 1)],
            Direction::South => self.horizontal[(cell.row, cell.col - 1)],
            Direction::West => self.vertical[(cell.row - 1, cell.col - 1)],
            Direction::East => self.vertical[(cell.row - 1, cell.col)],
        }
    }

    pub(crate) fn horizontal_edge(&self, edge: usize, col: usize) -> bool {
        self.horizontal[(edge, col - 1)]
    }

    pub(crate) fn vertical_edge(&self, row: usize, edge: usize) -> bool {
        self.vertical[(row - 1, edge)]
    }
}

fn check_edge(edge: Edge, limit: usize) -> Result<(), DomainError> {
    if edge.0 > limit {
        return Err(DomainError::EdgeOutOfRange {
            edge: edge.to_string(),
            limit,
        });
    }
    Ok(())
}

fn check_axis(axis: &'static str, value: usize, limit: usize) -> Result<(), DomainError> {
    if !(1..=limit).contains(&value) {
        return Err(DomainError::OutOfRange { axis, value, limit });
    }
    Ok(())
}
