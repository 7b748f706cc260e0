//! Game state: current grid, undo history and the derived game-over flag.

use std::fmt;

use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::engine::{can_slide, slide, Direction};
use crate::error::ConfigError;
use crate::grid::{Grid, Tile};
use crate::spawn::{spawn, RandomSource};

/// Tile value that ends the game unless configured otherwise.
pub const DEFAULT_WIN_THRESHOLD: Tile = 128;

/// Board shape and win threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub rows: usize,
    pub cols: usize,
    pub win_threshold: Tile,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            rows: 4,
            cols: 4,
            win_threshold: DEFAULT_WIN_THRESHOLD,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows == 0 || self.cols == 0 {
            return Err(ConfigError::EmptyDimension {
                rows: self.rows,
                cols: self.cols,
            });
        }
        if self.rows.checked_mul(self.cols).is_none() {
            return Err(ConfigError::TooLarge {
                rows: self.rows,
                cols: self.cols,
            });
        }
        if self.win_threshold < 4 || !self.win_threshold.is_power_of_two() {
            return Err(ConfigError::Threshold(self.win_threshold));
        }
        Ok(())
    }
}

/// Result of a move request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepResult {
    /// Whether the grid changed (and a new tile was spawned).
    pub changed: bool,
    /// Whether the win threshold is present after the request.
    pub over: bool,
}

/// The game state machine.
///
/// Owns the current grid and a stack of earlier grids. A move that changes
/// the grid pushes the previous grid, spawns one tile and adopts the result;
/// any other move leaves everything untouched. Game over is recomputed from
/// the grid on every query and never stored.
///
/// Not internally synchronized: hosts running several threads must serialize
/// access themselves.
#[derive(Clone)]
pub struct Game<S = SmallRng> {
    config: GameConfig,
    grid: Grid,
    history: Vec<Grid>,
    source: S,
}

impl Game<SmallRng> {
    /// Create a default 4x4 game with the given seed.
    ///
    /// The game starts with two random tiles (90% chance of 2, 10% chance of 4).
    pub fn new(seed: u64) -> Self {
        Game::start(GameConfig::default(), SmallRng::seed_from_u64(seed))
    }

    pub fn with_config(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        Game::with_source(config, SmallRng::seed_from_u64(seed))
    }

    /// Reset to a fresh board with a new seed, discarding the history.
    pub fn reset(&mut self, seed: u64) {
        *self = Game::start(self.config, SmallRng::seed_from_u64(seed));
    }
}

impl<S: RandomSource> Game<S> {
    /// Create a game drawing its randomness from `source`.
    pub fn with_source(config: GameConfig, source: S) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Game::start(config, source))
    }

    /// Start from an existing grid with an empty history. No tiles are spawned.
    pub fn from_grid(config: GameConfig, grid: Grid, source: S) -> Result<Self, ConfigError> {
        config.validate()?;
        if (grid.rows(), grid.cols()) != (config.rows, config.cols) {
            return Err(ConfigError::DimensionMismatch {
                rows: config.rows,
                cols: config.cols,
                found_rows: grid.rows(),
                found_cols: grid.cols(),
            });
        }
        Ok(Game {
            config,
            grid,
            history: Vec::new(),
            source,
        })
    }

    // `config` must already be valid.
    fn start(config: GameConfig, mut source: S) -> Self {
        let blank = Grid::from_parts(
            config.rows,
            config.cols,
            vec![None; config.rows * config.cols],
        );
        let first = spawn(&blank, &mut source);
        let grid = spawn(&first, &mut source);
        Game {
            config,
            grid,
            history: Vec::new(),
            source,
        }
    }

    /// Slide toward `direction`.
    ///
    /// Ignored once the game is over. A move that changes nothing does not
    /// touch the history and does not spawn.
    #[instrument(level = "debug", skip(self))]
    pub fn apply_move(&mut self, direction: Direction) -> StepResult {
        if self.is_over() {
            debug!("move ignored, game is over");
            return StepResult {
                changed: false,
                over: true,
            };
        }

        let result = slide(&self.grid, direction);
        if !result.changed {
            debug!("move blocked");
            return StepResult {
                changed: false,
                over: false,
            };
        }

        let next = spawn(&result.grid, &mut self.source);
        self.history.push(std::mem::replace(&mut self.grid, next));

        let over = self.is_over();
        if over {
            debug!(threshold = self.config.win_threshold, "threshold reached");
        }
        StepResult {
            changed: true,
            over,
        }
    }

    /// Restore the grid from before the last successful move.
    ///
    /// Returns `false` when there is nothing to undo. There is no redo.
    #[instrument(level = "debug", skip(self), fields(depth = self.history.len()))]
    pub fn undo(&mut self) -> bool {
        match self.history.pop() {
            Some(previous) => {
                self.grid = previous;
                true
            }
            None => {
                debug!("nothing to undo");
                false
            }
        }
    }
}

impl<S> Game<S> {
    /// Current grid snapshot.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Whether the win threshold is present anywhere on the grid.
    pub fn is_over(&self) -> bool {
        self.grid.contains(self.config.win_threshold)
    }

    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Which moves would change the grid, as [Up, Down, Left, Right].
    pub fn legal_moves(&self) -> [bool; 4] {
        Direction::all().map(|direction| can_slide(&self.grid, direction))
    }

    /// No direction changes the grid. Informational only; does not end the game.
    pub fn is_stuck(&self) -> bool {
        !self.legal_moves().contains(&true)
    }

    pub fn max_tile(&self) -> Tile {
        self.grid.max_tile()
    }

    pub fn empty_count(&self) -> usize {
        self.grid.empty_count()
    }
}

impl<S> fmt::Debug for Game<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Game")
            .field("config", &self.config)
            .field("over", &self.is_over())
            .field("history", &self.history.len())
            .field("grid", &self.grid)
            .finish()
    }
}

impl<S> fmt::Display for Game<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Max tile: {}  Undo: {}",
            self.max_tile(),
            self.history.len()
        )?;
        write!(f, "{}", self.grid)
    }
}
