//! Validation errors raised when a board is built from outside input.
//!
//! Moves, tile injection and game-over detection never fail; only
//! construction and parsing can.
use thiserror::Error;

/// Reasons a grid cannot become a `Board`.
#[derive(Debug, Error)]
pub enum BoardError {
    /// The grid has no rows at all.
    #[error("board has no rows")]
    Empty,

    /// A row does not have as many cells as there are rows.
    #[error("row {row} has {found} cells (expected {expected})")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// A tile value is not a power of two in `2..=MAX_TILE`.
    #[error("invalid tile {value} at row {row} col {col}: not a power of two in range")]
    InvalidTile { row: usize, col: usize, value: u32 },

    /// A token in a text board is neither a number nor an empty marker.
    #[error("unrecognized token '{token}' in row {row} col {col}")]
    UnrecognizedToken {
        row: usize,
        col: usize,
        token: String,
    },

    #[error("failed to read board file: {0}")]
    Io(#[from] std::io::Error),
}
