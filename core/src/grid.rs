//! Rectangular tile grid and quarter-turn rotation.
//!
//! A [`Grid`] can only be obtained through a validating constructor, so every
//! value in circulation is rectangular with at least one row and column.
//! Transformations return a new grid and leave the receiver untouched.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ShapeError;

/// Tile value. Powers of two by convention, not enforced.
pub type Tile = u32;

/// A grid position: `None` is empty, `Some(v)` holds a tile.
pub type Cell = Option<Tile>;

/// Counter-clockwise quarter turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rotation {
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    /// Accepts any multiple of 90, normalized modulo 360.
    pub fn from_degrees(degrees: u32) -> Option<Rotation> {
        if degrees % 90 != 0 {
            return None;
        }
        match (degrees / 90) % 4 {
            0 => Some(Rotation::Deg0),
            1 => Some(Rotation::Deg90),
            2 => Some(Rotation::Deg180),
            _ => Some(Rotation::Deg270),
        }
    }

    pub fn degrees(self) -> u32 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 90,
            Rotation::Deg180 => 180,
            Rotation::Deg270 => 270,
        }
    }

    /// The rotation that undoes this one.
    pub fn inverse(self) -> Rotation {
        match self {
            Rotation::Deg0 => Rotation::Deg0,
            Rotation::Deg90 => Rotation::Deg270,
            Rotation::Deg180 => Rotation::Deg180,
            Rotation::Deg270 => Rotation::Deg90,
        }
    }
}

/// An R×C board of cells, stored row-major.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<Cell>>", into = "Vec<Vec<Cell>>")]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// An all-empty grid of the given shape.
    pub fn empty(rows: usize, cols: usize) -> Result<Grid, ShapeError> {
        if rows == 0 || cols == 0 {
            return Err(ShapeError::Empty);
        }
        Ok(Grid {
            rows,
            cols,
            cells: vec![None; rows * cols],
        })
    }

    /// Build a grid from nested rows, rejecting empty or ragged input and
    /// zero-valued tiles.
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Result<Grid, ShapeError> {
        let cols = rows.first().map_or(0, Vec::len);
        if cols == 0 {
            return Err(ShapeError::Empty);
        }
        if let Some((row, found)) = rows
            .iter()
            .map(Vec::len)
            .enumerate()
            .find(|&(_, len)| len != cols)
        {
            return Err(ShapeError::Ragged {
                row,
                expected: cols,
                found,
            });
        }
        if let Some(pos) = rows.iter().flatten().position(|&cell| cell == Some(0)) {
            return Err(ShapeError::ZeroTile {
                row: pos / cols,
                col: pos % cols,
            });
        }
        Ok(Grid {
            rows: rows.len(),
            cols,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    /// Callers guarantee `cells.len() == rows * cols` with both non-zero.
    pub(crate) fn from_parts(rows: usize, cols: usize, cells: Vec<Cell>) -> Grid {
        debug_assert!(rows > 0 && cols > 0);
        debug_assert_eq!(cells.len(), rows * cols);
        Grid { rows, cols, cells }
    }

    fn build(rows: usize, cols: usize, f: impl Fn(usize, usize) -> Cell) -> Grid {
        let f = &f;
        let cells = (0..rows)
            .flat_map(|r| (0..cols).map(move |c| f(r, c)))
            .collect();
        Grid::from_parts(rows, cols, cells)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Cell at `(row, col)`, or `None` if out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        (row < self.rows && col < self.cols).then(|| self.at(row, col))
    }

    #[inline]
    fn at(&self, row: usize, col: usize) -> Cell {
        self.cells[row * self.cols + col]
    }

    /// Borrow row `r`. Panics if `r >= rows()`.
    pub fn row(&self, r: usize) -> &[Cell] {
        &self.cells[r * self.cols..(r + 1) * self.cols]
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks(self.cols)
    }

    pub fn to_rows(&self) -> Vec<Vec<Cell>> {
        self.iter_rows().map(<[Cell]>::to_vec).collect()
    }

    /// Copy of this grid with one cell replaced. `Some(0)` clears the cell.
    /// Out-of-bounds positions return an unchanged copy.
    pub fn with_cell(&self, row: usize, col: usize, cell: Cell) -> Grid {
        let mut next = self.clone();
        if row < self.rows && col < self.cols {
            next.cells[row * self.cols + col] = cell.filter(|&v| v != 0);
        }
        next
    }

    /// Coordinates of every empty cell, row-major.
    pub fn empty_cells(&self) -> Vec<(usize, usize)> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_none())
            .map(|(i, _)| (i / self.cols, i % self.cols))
            .collect()
    }

    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_none()).count()
    }

    /// Largest tile on the board, 0 when empty.
    pub fn max_tile(&self) -> Tile {
        self.cells.iter().flatten().copied().max().unwrap_or(0)
    }

    pub fn contains(&self, value: Tile) -> bool {
        self.cells.contains(&Some(value))
    }

    /// Rotate counter-clockwise. Quarter turns transpose the shape.
    pub fn rotate(&self, rotation: Rotation) -> Grid {
        let (rows, cols) = (self.rows, self.cols);
        match rotation {
            Rotation::Deg0 => self.clone(),
            Rotation::Deg90 => Grid::build(cols, rows, |r, c| self.at(c, cols - 1 - r)),
            Rotation::Deg180 => {
                Grid::build(rows, cols, |r, c| self.at(rows - 1 - r, cols - 1 - c))
            }
            Rotation::Deg270 => Grid::build(cols, rows, |r, c| self.at(rows - 1 - c, r)),
        }
    }
}

impl TryFrom<Vec<Vec<Cell>>> for Grid {
    type Error = ShapeError;

    fn try_from(rows: Vec<Vec<Cell>>) -> Result<Self, Self::Error> {
        Grid::from_rows(rows)
    }
}

impl From<Grid> for Vec<Vec<Cell>> {
    fn from(grid: Grid) -> Self {
        grid.to_rows()
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Grid {}x{} {{", self.rows, self.cols)?;
        for row in self.iter_rows() {
            for cell in row {
                match cell {
                    Some(v) => write!(f, "{:5}", v)?,
                    None => write!(f, "    .")?,
                }
            }
            writeln!(f)?;
        }
        write!(f, "}}")
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let border = "+------".repeat(self.cols) + "+";
        writeln!(f, "{}", border)?;
        for row in self.iter_rows() {
            write!(f, "|")?;
            for cell in row {
                match cell {
                    Some(v) => write!(f, "{:^6}|", v)?,
                    None => write!(f, "      |")?,
                }
            }
            writeln!(f)?;
            writeln!(f, "{}", border)?;
        }
        Ok(())
    }
}
