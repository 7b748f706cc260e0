//! Sliding and merging.
//!
//! Every direction is reduced to a single "slide left" primitive: the grid is
//! rotated so the requested direction points left, each row is collapsed, and
//! the result is rotated back.

use serde::{Deserialize, Serialize};

use crate::grid::{Cell, Grid, Rotation};

/// The four possible move directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Direction {
    Up = 0,
    Down = 1,
    Left = 2,
    Right = 3,
}

impl Direction {
    /// Convert a u8 to a Direction (0=Up, 1=Down, 2=Left, 3=Right).
    /// Returns None for invalid values.
    pub fn from_u8(value: u8) -> Option<Direction> {
        match value {
            0 => Some(Direction::Up),
            1 => Some(Direction::Down),
            2 => Some(Direction::Left),
            3 => Some(Direction::Right),
            _ => None,
        }
    }

    /// Get all four directions.
    pub fn all() -> [Direction; 4] {
        [
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ]
    }

    /// Rotation that makes this direction point left.
    pub fn forward_rotation(self) -> Rotation {
        match self {
            Direction::Left => Rotation::Deg0,
            Direction::Up => Rotation::Deg90,
            Direction::Right => Rotation::Deg180,
            Direction::Down => Rotation::Deg270,
        }
    }

    pub fn inverse_rotation(self) -> Rotation {
        self.forward_rotation().inverse()
    }
}

/// Outcome of collapsing a single row toward its head.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowCollapse {
    pub row: Vec<Cell>,
    pub changed: bool,
}

/// Outcome of sliding a whole grid. Not retained by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveResult {
    pub grid: Grid,
    pub changed: bool,
}

/// Slide a row's tiles to the left, merging each equal pair once.
///
/// A merged tile is never reconsidered in the same pass, so `[2, 2, 2, _]`
/// becomes `[4, 2, _, _]`. A pair whose sum would overflow `u32` stays
/// unmerged.
pub fn collapse_row_left(row: &[Cell]) -> RowCollapse {
    let mut out = Vec::with_capacity(row.len());
    let mut pending = None;

    for value in row.iter().flatten().copied() {
        match pending {
            None => pending = Some(value),
            Some(p) if p == value && p.checked_mul(2).is_some() => {
                out.push(Some(p * 2));
                pending = None;
            }
            Some(p) => {
                out.push(Some(p));
                pending = Some(value);
            }
        }
    }
    if let Some(p) = pending {
        out.push(Some(p));
    }
    out.resize(row.len(), None);

    let changed = out.as_slice() != row;
    RowCollapse { row: out, changed }
}

/// Slide every tile of `grid` toward `direction`.
pub fn slide(grid: &Grid, direction: Direction) -> MoveResult {
    let normalized = grid.rotate(direction.forward_rotation());

    let mut changed = false;
    let mut cells = Vec::with_capacity(normalized.rows() * normalized.cols());
    for row in normalized.iter_rows() {
        let collapsed = collapse_row_left(row);
        changed |= collapsed.changed;
        cells.extend(collapsed.row);
    }

    let collapsed = Grid::from_parts(normalized.rows(), normalized.cols(), cells);
    MoveResult {
        grid: collapsed.rotate(direction.inverse_rotation()),
        changed,
    }
}

/// Whether sliding toward `direction` would change the grid.
pub fn can_slide(grid: &Grid, direction: Direction) -> bool {
    slide(grid, direction).changed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(values: &[u32]) -> Vec<Cell> {
        values.iter().map(|&v| (v != 0).then_some(v)).collect()
    }

    fn grid(rows: &[&[u32]]) -> Grid {
        Grid::from_rows(rows.iter().map(|row| cells(row)).collect()).unwrap()
    }

    // -------------------------------------------------------------------------
    // Row collapse
    // -------------------------------------------------------------------------

    #[test]
    fn test_collapse_first_pair_only() {
        let result = collapse_row_left(&cells(&[2, 2, 2, 0]));
        assert_eq!(result.row, cells(&[4, 2, 0, 0]));
        assert!(result.changed);
    }

    #[test]
    fn test_collapse_all_empty() {
        let result = collapse_row_left(&cells(&[0, 0, 0, 0]));
        assert_eq!(result.row, cells(&[0, 0, 0, 0]));
        assert!(!result.changed);
    }

    #[test]
    fn test_collapse_full_row_without_pairs() {
        let row = cells(&[2, 4, 8, 16]);
        let result = collapse_row_left(&row);
        assert_eq!(result.row, row);
        assert!(!result.changed);
    }

    #[test]
    fn test_collapse_slides_without_merge() {
        let result = collapse_row_left(&cells(&[0, 2, 0, 4]));
        assert_eq!(result.row, cells(&[2, 4, 0, 0]));
        assert!(result.changed);
    }

    #[test]
    fn test_collapse_no_cascade() {
        // [4, 2, 2, 0] should become [4, 4, 0, 0], not [8, 0, 0, 0]
        let result = collapse_row_left(&cells(&[4, 2, 2, 0]));
        assert_eq!(result.row, cells(&[4, 4, 0, 0]));

        let result = collapse_row_left(&cells(&[2, 2, 2, 2]));
        assert_eq!(result.row, cells(&[4, 4, 0, 0]));
    }

    #[test]
    fn test_collapse_merges_across_gaps() {
        let result = collapse_row_left(&cells(&[2, 0, 0, 2]));
        assert_eq!(result.row, cells(&[4, 0, 0, 0]));
        assert!(result.changed);
    }

    #[test]
    fn test_collapse_keeps_overflowing_pair() {
        let top = 1 << 31;
        let result = collapse_row_left(&[None, Some(top), Some(top)]);
        assert_eq!(result.row, vec![Some(top), Some(top), None]);
        assert!(result.changed);
    }

    #[test]
    fn test_collapse_single_cell() {
        let result = collapse_row_left(&cells(&[8]));
        assert_eq!(result.row, cells(&[8]));
        assert!(!result.changed);
    }

    // -------------------------------------------------------------------------
    // Grid moves
    // -------------------------------------------------------------------------

    #[test]
    fn test_slide_left_merges_top_row() {
        let g = grid(&[&[2, 2, 0, 0], &[0, 0, 0, 0], &[0, 0, 0, 0], &[0, 0, 0, 0]]);
        let result = slide(&g, Direction::Left);
        assert_eq!(result.grid.row(0), cells(&[4, 0, 0, 0]).as_slice());
        assert!(result.changed);
    }

    #[test]
    fn test_slide_all_directions() {
        let g = grid(&[&[2, 2, 0, 0], &[0, 4, 4, 0], &[2, 0, 2, 0], &[8, 8, 8, 8]]);

        let left = slide(&g, Direction::Left).grid;
        assert_eq!(
            left,
            grid(&[&[4, 0, 0, 0], &[8, 0, 0, 0], &[4, 0, 0, 0], &[16, 16, 0, 0]])
        );

        let right = slide(&g, Direction::Right).grid;
        assert_eq!(
            right,
            grid(&[&[0, 0, 0, 4], &[0, 0, 0, 8], &[0, 0, 0, 4], &[0, 0, 16, 16]])
        );

        let g = grid(&[&[2, 0, 2, 8], &[2, 4, 0, 8], &[0, 4, 2, 8], &[0, 0, 0, 8]]);

        let up = slide(&g, Direction::Up).grid;
        assert_eq!(
            up,
            grid(&[&[4, 8, 4, 16], &[0, 0, 0, 16], &[0, 0, 0, 0], &[0, 0, 0, 0]])
        );

        let down = slide(&g, Direction::Down).grid;
        assert_eq!(
            down,
            grid(&[&[0, 0, 0, 0], &[0, 0, 0, 0], &[0, 0, 0, 16], &[4, 8, 4, 16]])
        );
    }

    #[test]
    fn test_slide_keeps_non_square_shape() {
        let g = grid(&[&[2, 0, 2], &[0, 4, 0]]);
        let up = slide(&g, Direction::Up);
        assert_eq!(up.grid, grid(&[&[2, 4, 2], &[0, 0, 0]]));
        assert!(up.changed);

        let down = slide(&g, Direction::Down);
        assert_eq!(down.grid, grid(&[&[0, 0, 0], &[2, 4, 2]]));

        let right = slide(&g, Direction::Right);
        assert_eq!(right.grid, grid(&[&[0, 0, 4], &[0, 0, 4]]));
    }

    #[test]
    fn test_slide_large_tiles_without_overflow() {
        let top = 1 << 31;
        let g = Grid::from_rows(vec![vec![Some(top), Some(top)]]).unwrap();
        let result = slide(&g, Direction::Left);
        assert_eq!(result.grid, g);
        assert!(!result.changed);

        let half = 1 << 30;
        let g = Grid::from_rows(vec![vec![Some(half), Some(half)]]).unwrap();
        assert_eq!(slide(&g, Direction::Left).grid.row(0), &[Some(top), None]);
    }

    #[test]
    fn test_slide_into_wall_is_unchanged() {
        let g = grid(&[&[2, 0], &[4, 0]]);
        let result = slide(&g, Direction::Left);
        assert!(!result.changed);
        assert_eq!(result.grid, g);
        assert!(!can_slide(&g, Direction::Left));
        assert!(can_slide(&g, Direction::Right));
    }

    #[test]
    fn test_direction_rotations_are_inverse() {
        for direction in Direction::all() {
            let forward = direction.forward_rotation();
            assert_eq!(direction.inverse_rotation(), forward.inverse());
        }
        assert_eq!(Direction::Up.inverse_rotation(), Rotation::Deg270);
        assert_eq!(Direction::Down.inverse_rotation(), Rotation::Deg90);
    }

    #[test]
    fn test_direction_from_u8() {
        assert_eq!(Direction::from_u8(0), Some(Direction::Up));
        assert_eq!(Direction::from_u8(1), Some(Direction::Down));
        assert_eq!(Direction::from_u8(2), Some(Direction::Left));
        assert_eq!(Direction::from_u8(3), Some(Direction::Right));
        assert_eq!(Direction::from_u8(4), None);
    }
}
