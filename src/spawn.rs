//! Random tile injection.
//!
//! This is the only source of randomness in the game. The random number
//! generator is always passed in by the caller, so tests can drive it with a
//! seeded `SmallRng` and the rest of the engine stays deterministic.
use crate::engine::Board;
use log::trace;
use rand::seq::SliceRandom;
use rand::Rng;

/// Chance that a new tile is a 2; otherwise it is a 4.
pub const TWO_PROBABILITY: f64 = 0.75;

/// Where a tile was placed, and its value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Spawn {
    pub row: usize,
    pub col: usize,
    pub value: u32,
}

fn random_tile_value<R: Rng + ?Sized>(rng: &mut R) -> u32 {
    if rng.gen_bool(TWO_PROBABILITY) {
        2
    } else {
        4
    }
}

/// Places a 2 or a 4 on a uniformly chosen empty cell.
///
/// # Returns
/// The new board and the `Spawn` that was made. If the board has no empty
/// cell, it is returned unchanged together with `None`.
pub fn place_random_tile<R: Rng + ?Sized>(board: &Board, rng: &mut R) -> (Board, Option<Spawn>) {
    let empties = board.empty_cells();
    let Some(&(row, col)) = empties.choose(rng) else {
        return (board.clone(), None);
    };

    let value = random_tile_value(rng);
    let mut next = board.clone();
    next.set_tile(row, col, Some(value));
    trace!("spawned {} at ({}, {}), {} empty cells before", value, row, col, empties.len());

    (next, Some(Spawn { row, col, value }))
}

/// Returns a copy of `board` with one random tile added, or the board as is
/// when it is full.
///
/// # Examples
/// ```
/// use rand::rngs::SmallRng;
/// use rand::SeedableRng;
/// use twenty48_engine::engine::{Board, BOARD_SIZE};
/// use twenty48_engine::spawn::inject;
///
/// let mut rng = SmallRng::seed_from_u64(7);
/// let board = inject(&Board::new_empty(BOARD_SIZE), &mut rng);
/// assert_eq!(board.empty_cells().len(), BOARD_SIZE * BOARD_SIZE - 1);
/// ```
pub fn inject<R: Rng + ?Sized>(board: &Board, rng: &mut R) -> Board {
    place_random_tile(board, rng).0
}
