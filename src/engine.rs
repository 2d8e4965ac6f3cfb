//! Core rules of the 2048 sliding-tile puzzle.
//!
//! This module defines the deterministic parts of the game:
//! - `Direction`: The four ways the player can slide the tiles.
//! - `Board`: A square grid of optional tile values, with the move resolver
//!   (`Board::resolve`) and the terminal-state detector (`Board::is_over`).
//! - `MoveOutcome`: The board produced by a move, the points it scored and
//!   whether anything actually moved.
//! - `compact_line`: The single line transform every direction is built on.
//!
//! Random tile injection lives in `spawn`, and the session state (score,
//! steps, RNG) lives in `game`.
use crate::error::BoardError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Side length of the board used for play. The algorithms accept any size.
pub const BOARD_SIZE: usize = 4;

/// Largest tile a `u32` cell can hold. Two tiles of this value never merge.
pub const MAX_TILE: u32 = 1 << 31;

/// A direction the tiles can be slid in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// Every direction.
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    /// Maps a key to a direction. Accepts `wasd` and vim-style `hjkl`,
    /// case-insensitive.
    ///
    /// # Examples
    /// ```
    /// use twenty48_engine::engine::Direction;
    /// assert_eq!(Direction::from_key('a'), Some(Direction::Left));
    /// assert_eq!(Direction::from_key('K'), Some(Direction::Up));
    /// assert_eq!(Direction::from_key('x'), None);
    /// ```
    pub fn from_key(key: char) -> Option<Direction> {
        match key.to_ascii_lowercase() {
            'a' | 'h' => Some(Direction::Left),
            'd' | 'l' => Some(Direction::Right),
            'w' | 'k' => Some(Direction::Up),
            's' | 'j' => Some(Direction::Down),
            _ => None,
        }
    }

    /// Arrow glyph shown as the "last action" indicator.
    pub fn arrow(&self) -> char {
        match self {
            Direction::Left => '←',
            Direction::Right => '→',
            Direction::Up => '↑',
            Direction::Down => '↓',
        }
    }

    /// Coordinates of line `index` listed in the order tiles travel, so the
    /// first entry is the edge the tiles are pushed against.
    ///
    /// Rows serve `Left`/`Right`, columns serve `Up`/`Down`; `Right` and `Down`
    /// walk their line backwards, which makes them mirror images of `Left`
    /// and `Up` without a second copy of the merge logic.
    fn line_positions(&self, size: usize, index: usize) -> Vec<(usize, usize)> {
        match self {
            Direction::Left => (0..size).map(|c| (index, c)).collect(),
            Direction::Right => (0..size).rev().map(|c| (index, c)).collect(),
            Direction::Up => (0..size).map(|r| (r, index)).collect(),
            Direction::Down => (0..size).rev().map(|r| (r, index)).collect(),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Up => "up",
            Direction::Down => "down",
        };
        f.write_str(name)
    }
}

/// Slides one line towards its leading edge and merges equal neighbours.
///
/// `line` is given in travel order (index 0 is the edge tiles move towards).
/// Empty cells are squeezed out, then the tiles are scanned from the leading
/// edge: two equal tiles in a row become one tile of double value, and the
/// result is not merged again in the same pass. The output is padded with
/// empty cells back to the input length.
///
/// # Returns
/// A tuple of the transformed line and the points scored, which is the sum of
/// the values created by merges.
///
/// # Examples
/// ```
/// use twenty48_engine::engine::compact_line;
/// let (line, gained) = compact_line(&[Some(2), Some(2), Some(4), None]);
/// assert_eq!(line, vec![Some(4), Some(4), None, None]);
/// assert_eq!(gained, 4);
/// ```
pub fn compact_line(line: &[Option<u32>]) -> (Vec<Option<u32>>, u64) {
    let tiles: Vec<u32> = line.iter().flatten().copied().collect();
    let mut merged = Vec::with_capacity(line.len());
    let mut gained = 0u64;

    let mut i = 0;
    while i < tiles.len() {
        let current = tiles[i];
        let doubled = if tiles.get(i + 1) == Some(&current) {
            current.checked_mul(2)
        } else {
            None
        };

        match doubled {
            Some(value) => {
                merged.push(Some(value));
                gained += u64::from(value);
                i += 2; // the neighbour is consumed
            }
            None => {
                merged.push(Some(current));
                i += 1;
            }
        }
    }

    merged.resize(line.len(), None);
    (merged, gained)
}

/// Checks that a value can sit on the board: a power of two, at least 2.
fn is_valid_tile(value: u32) -> bool {
    value >= 2 && value.is_power_of_two()
}

/// The result of sliding a board in one direction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveOutcome {
    /// The board after compaction and merging (no tile has been injected yet).
    pub board: Board,
    /// Points scored by this move.
    pub score_delta: u64,
    /// Whether `board` differs from the board the move was applied to.
    pub changed: bool,
}

/// Represents the game board as a square grid of optional tile values.
///
/// `None` is an empty cell, `Some(v)` holds a tile where `v` is a power of two
/// no smaller than 2. Boards are values: every move returns a new `Board`
/// rather than mutating the one it was given.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<Option<u32>>>", into = "Vec<Vec<Option<u32>>>")]
pub struct Board {
    size: usize,
    cells: Vec<Option<u32>>,
}

impl Board {
    /// Creates a `size` x `size` board where every cell is empty.
    ///
    /// # Examples
    /// ```
    /// use twenty48_engine::engine::{Board, BOARD_SIZE};
    /// let board = Board::new_empty(BOARD_SIZE);
    /// assert_eq!(board.get_tile(0, 0), None);
    /// assert_eq!(board.empty_cells().len(), BOARD_SIZE * BOARD_SIZE);
    /// ```
    pub fn new_empty(size: usize) -> Self {
        Board {
            size,
            cells: vec![None; size * size],
        }
    }

    /// Builds a board from rows of cells, validating its shape and tiles.
    ///
    /// The number of rows fixes the board size; every row must have exactly
    /// that many cells.
    ///
    /// # Returns
    /// * `Ok(Board)` if the grid is square and every tile is a power of two
    ///   of at least 2.
    /// * `Err(BoardError::Empty)` if there are no rows.
    /// * `Err(BoardError::RaggedRow)` if a row has the wrong length.
    /// * `Err(BoardError::InvalidTile)` for values such as 0, 1, 3 or 6.
    pub fn from_rows(rows: Vec<Vec<Option<u32>>>) -> Result<Self, BoardError> {
        let size = rows.len();
        if size == 0 {
            return Err(BoardError::Empty);
        }
        let mut cells = Vec::with_capacity(size * size);

        for (r, row) in rows.into_iter().enumerate() {
            if row.len() != size {
                return Err(BoardError::RaggedRow {
                    row: r,
                    expected: size,
                    found: row.len(),
                });
            }
            for (c, cell) in row.into_iter().enumerate() {
                if let Some(value) = cell {
                    if !is_valid_tile(value) {
                        return Err(BoardError::InvalidTile { row: r, col: c, value });
                    }
                }
                cells.push(cell);
            }
        }

        Ok(Board { size, cells })
    }

    /// Side length of the board.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the cell at row `r`, column `c`.
    ///
    /// # Panics
    /// Panics if `r` or `c` is outside the board.
    pub fn get_tile(&self, r: usize, c: usize) -> Option<u32> {
        assert!(r < self.size && c < self.size, "cell ({r}, {c}) is off the board");
        self.cells[r * self.size + c]
    }

    /// Returns `true` if the cell at row `r`, column `c` holds no tile.
    pub fn is_empty_cell(&self, r: usize, c: usize) -> bool {
        self.get_tile(r, c).is_none()
    }

    /// Overwrites one cell. Callers inside the crate keep the tile invariant.
    pub(crate) fn set_tile(&mut self, r: usize, c: usize, tile: Option<u32>) {
        assert!(r < self.size && c < self.size, "cell ({r}, {c}) is off the board");
        self.cells[r * self.size + c] = tile;
    }

    /// Copies the grid out as rows, top to bottom.
    pub fn rows(&self) -> Vec<Vec<Option<u32>>> {
        if self.size == 0 {
            return Vec::new();
        }
        self.cells.chunks(self.size).map(<[_]>::to_vec).collect()
    }

    /// Coordinates of every empty cell in row-major order.
    pub fn empty_cells(&self) -> Vec<(usize, usize)> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_none())
            .map(|(i, _)| (i / self.size, i % self.size))
            .collect()
    }

    /// Returns `true` if no cell is empty.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// The highest tile on the board, or `None` on an empty board.
    pub fn max_tile(&self) -> Option<u32> {
        self.cells.iter().flatten().copied().max()
    }

    /// Sum of all tile values.
    pub fn tile_sum(&self) -> u64 {
        self.cells.iter().flatten().map(|&v| u64::from(v)).sum()
    }

    /// Slides every line of the board in `direction`, merging equal tiles.
    ///
    /// Each row (for `Left`/`Right`) or column (for `Up`/`Down`) goes through
    /// `compact_line` on its own; merges are resolved from the edge the tiles
    /// move towards. The board itself is left untouched.
    ///
    /// # Returns
    /// A `MoveOutcome` with the new board, the points scored and whether the
    /// move changed anything. A move that changes nothing scores 0.
    ///
    /// # Examples
    /// ```
    /// use twenty48_engine::engine::Direction;
    /// use twenty48_engine::utils::board_from_str_array;
    ///
    /// let board = board_from_str_array(&["2 . 2 2", ". . . .", ". . . .", ". . . ."]).unwrap();
    /// let outcome = board.resolve(Direction::Right);
    /// assert_eq!(outcome.board.rows()[0], vec![None, None, Some(2), Some(4)]);
    /// assert_eq!(outcome.score_delta, 4);
    /// assert!(outcome.changed);
    /// ```
    pub fn resolve(&self, direction: Direction) -> MoveOutcome {
        let mut board = self.clone();
        let mut score_delta = 0;

        for index in 0..self.size {
            let positions = direction.line_positions(self.size, index);
            let line: Vec<Option<u32>> = positions
                .iter()
                .map(|&(r, c)| self.get_tile(r, c))
                .collect();

            let (moved, gained) = compact_line(&line);
            for (&(r, c), cell) in positions.iter().zip(moved) {
                board.set_tile(r, c, cell);
            }
            score_delta += gained;
        }

        let changed = board != *self;
        MoveOutcome {
            board,
            score_delta,
            changed,
        }
    }

    /// Returns `true` if sliding in `direction` would change the board.
    pub fn can_move(&self, direction: Direction) -> bool {
        self.resolve(direction).changed
    }

    /// Checks whether no move can change the board any more.
    ///
    /// The board is over when every cell is occupied and no two orthogonally
    /// adjacent cells hold equal, still-mergeable tiles. Only the right and
    /// lower neighbour of each cell are compared, which covers every adjacent
    /// pair once. Any board with an empty cell is never over.
    pub fn is_over(&self) -> bool {
        for r in 0..self.size {
            for c in 0..self.size {
                let Some(value) = self.get_tile(r, c) else {
                    return false;
                };
                if value == MAX_TILE {
                    continue;
                }
                let right = c + 1 < self.size && self.get_tile(r, c + 1) == Some(value);
                let below = r + 1 < self.size && self.get_tile(r + 1, c) == Some(value);
                if right || below {
                    return false;
                }
            }
        }
        true
    }

    /// Renders the board for a terminal with ANSI colours, optionally
    /// marking one cell (e.g. the tile that just spawned) with `*`.
    ///
    /// Column numbers run along the top and row numbers down the left side.
    pub fn to_string_with_highlight(&self, pos: Option<(usize, usize)>) -> String {
        let mut output = String::new();

        output.push_str("  ");
        for c_idx in 0..self.size {
            output.push_str(&format!("{:^6}", c_idx));
        }
        output.push('\n');

        for r_idx in 0..self.size {
            output.push_str(&format!("{:<2}", r_idx));

            for c_idx in 0..self.size {
                let tile = self.get_tile(r_idx, c_idx);
                let is_highlight = pos == Some((r_idx, c_idx));
                let content = match tile {
                    Some(value) if is_highlight => format!("*{}*", value),
                    Some(value) => value.to_string(),
                    None => String::new(),
                };
                output.push_str(&format!(
                    "\x1b[1;{}m{:^6}\x1b[m",
                    ansi_color_code(tile),
                    content
                ));
            }
            if r_idx + 1 < self.size {
                output.push('\n');
            }
        }

        output
    }
}

/// Background colour for a cell; tiles cycle through six colours by exponent.
fn ansi_color_code(tile: Option<u32>) -> &'static str {
    const PALETTE: [&str; 6] = ["43", "42", "46", "44", "45", "41"];
    match tile {
        None => "40",
        Some(value) => PALETTE[(value.trailing_zeros() as usize - 1) % PALETTE.len()],
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_string_with_highlight(None))
    }
}

impl TryFrom<Vec<Vec<Option<u32>>>> for Board {
    type Error = BoardError;

    fn try_from(rows: Vec<Vec<Option<u32>>>) -> Result<Self, Self::Error> {
        Board::from_rows(rows)
    }
}

impl From<Board> for Vec<Vec<Option<u32>>> {
    fn from(board: Board) -> Self {
        board.rows()
    }
}
