//! # 2048 Grid Engine
//!
//! This library provides the rules of the 2048 sliding-tile puzzle as pure
//! functions over board values, plus a small session type that strings them
//! together turn by turn. Rendering and input handling are left to the caller.
//!
//! It is used by two binaries:
//! - `play`: Interactive gameplay in a terminal.
//! - `rollout`: Plays a batch of seeded games with random moves and reports
//!   the scores, as a quick end-to-end exercise of the engine.
//!
//! ## Modules
//! - `engine`: The board (`Board`), directions (`Direction`), the move
//!   resolver (`Board::resolve`) and the game-over check (`Board::is_over`).
//! - `spawn`: Injection of a random 2 or 4 into an empty cell.
//! - `game`: Session state (`Game`) with score, steps, last move and reset.
//! - `utils`: Parsing boards from text, such as `"2 . 4 ."` rows.
//! - `error`: `BoardError`, returned when a board fails validation.

pub mod engine;
pub mod error;
pub mod game;
pub mod spawn;
pub mod utils;
