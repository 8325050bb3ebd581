//! Errors raised while building a puzzle from external input.

use thiserror::Error;

/// Malformed puzzle input.
///
/// Search failures are not errors: a solver that runs out of budget or
/// exhausts the reachable space returns `None`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PuzzleError {
    #[error("input is empty: expected the board size as the first token")]
    EmptyInput,

    #[error("invalid board size '{token}': expected a positive integer")]
    InvalidSize { token: String },

    #[error("wrong tile count: expected {expected} cells, got {got}")]
    WrongTileCount { expected: usize, got: usize },

    #[error("invalid token '{token}' at cell {position}: expected a tile number or 'X'")]
    InvalidToken { token: String, position: usize },

    #[error("tile {value} is out of range (must be 1..={max})")]
    TileOutOfRange { value: u32, max: u32 },

    #[error("tile {value} appears more than once")]
    DuplicateTile { value: u32 },

    #[error("board has no blank cell")]
    MissingBlank,

    #[error("board has more than one blank cell")]
    MultipleBlanks,
}

/// Convenience alias for results carrying a [`PuzzleError`].
pub type Result<T> = std::result::Result<T, PuzzleError>;
