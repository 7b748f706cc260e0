//! Random tile placement.

use rand::Rng;

use crate::grid::{Grid, Tile};

/// Probability that a spawned tile is a 2 rather than a 4.
pub const TWO_PROBABILITY: f64 = 0.9;

/// Source of the two random draws spawning needs.
///
/// Implemented for every [`rand::Rng`]; tests supply scripted sources.
pub trait RandomSource {
    /// Uniform index in `0..len`. `len` is never zero.
    fn pick(&mut self, len: usize) -> usize;

    /// `true` with probability `p`.
    fn chance(&mut self, p: f64) -> bool;
}

impl<R: Rng + ?Sized> RandomSource for R {
    fn pick(&mut self, len: usize) -> usize {
        self.gen_range(0..len)
    }

    fn chance(&mut self, p: f64) -> bool {
        self.gen_bool(p)
    }
}

/// Place one tile in a uniformly chosen empty cell: 2 with probability 0.9,
/// otherwise 4. A full grid is returned unchanged.
pub fn spawn<S: RandomSource + ?Sized>(grid: &Grid, source: &mut S) -> Grid {
    let empty = grid.empty_cells();
    if empty.is_empty() {
        return grid.clone();
    }

    let (row, col) = empty[source.pick(empty.len())];
    let value: Tile = if source.chance(TWO_PROBABILITY) { 2 } else { 4 };
    tracing::trace!(row, col, value, "spawned tile");
    grid.with_cell(row, col, Some(value))
}

#[cfg(test)]
pub(crate) mod scripted {
    use std::collections::VecDeque;

    use super::RandomSource;

    /// Replays queued draws; panics when a queue runs dry.
    #[derive(Debug, Default)]
    pub(crate) struct ScriptedSource {
        picks: VecDeque<usize>,
        coins: VecDeque<bool>,
        pub(crate) calls: usize,
    }

    impl ScriptedSource {
        pub(crate) fn new(picks: &[usize], coins: &[bool]) -> Self {
            ScriptedSource {
                picks: picks.iter().copied().collect(),
                coins: coins.iter().copied().collect(),
                calls: 0,
            }
        }
    }

    impl RandomSource for ScriptedSource {
        fn pick(&mut self, len: usize) -> usize {
            self.calls += 1;
            let index = self.picks.pop_front().expect("scripted pick exhausted");
            assert!(index < len, "scripted pick {} out of range {}", index, len);
            index
        }

        fn chance(&mut self, _p: f64) -> bool {
            self.coins.pop_front().expect("scripted coin exhausted")
        }
    }
}
