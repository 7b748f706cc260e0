//! Error types for grid construction and game configuration.
//!
//! Blocked moves, full boards and empty undo stacks are not errors; they
//! surface as `changed == false` / `false` return values instead.

/// A grid that is empty, ragged, or holds a zero-valued tile.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ShapeError {
    #[error("grid must have at least one row and one column")]
    Empty,
    #[error("cell ({row}, {col}) holds a zero tile")]
    ZeroTile { row: usize, col: usize },
    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// An invalid [`GameConfig`](crate::GameConfig) or starting grid.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("board dimensions must be non-zero (got {rows}x{cols})")]
    EmptyDimension { rows: usize, cols: usize },
    #[error("board of {rows}x{cols} cells is too large")]
    TooLarge { rows: usize, cols: usize },
    #[error("win threshold {0} must be a power of two and at least 4")]
    Threshold(u32),
    #[error("starting grid is {found_rows}x{found_cols}, config expects {rows}x{cols}")]
    DimensionMismatch {
        rows: usize,
        cols: usize,
        found_rows: usize,
        found_cols: usize,
    },
}
