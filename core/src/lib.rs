//! # slide2048 Core Engine
//!
//! Board-mutation engine for a sliding-tile merge puzzle on any R×C grid.
//! Every direction is implemented as "rotate, slide left, rotate back";
//! randomness comes from an injectable [`RandomSource`] so games can be
//! replayed deterministically. Rendering and input handling live elsewhere.
//!
//! ## Example
//!
//! ```rust
//! use slide2048_core::{Direction, Game};
//!
//! let mut game = Game::new(42); // 4x4 board, seed 42
//! let before = game.grid().clone();
//! let result = game.apply_move(Direction::Left);
//! if result.changed {
//!     assert!(game.undo());
//!     assert_eq!(game.grid(), &before);
//! }
//! println!("over: {}, can undo: {}", game.is_over(), game.can_undo());
//! ```

pub mod engine;
pub mod error;
pub mod game;
pub mod grid;
pub mod spawn;

pub use engine::{collapse_row_left, slide, Direction, MoveResult, RowCollapse};
pub use error::{ConfigError, ShapeError};
pub use game::{Game, GameConfig, StepResult, DEFAULT_WIN_THRESHOLD};
pub use grid::{Cell, Grid, Rotation, Tile};
pub use spawn::{spawn, RandomSource};
