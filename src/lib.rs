//! # Sliding puzzle search
//!
//! Solves the N×N sliding tile puzzle (8-puzzle, 15-puzzle and larger) by
//! searching from a start board to the canonical solved board.
//!
//! ## Modules
//! - `puzzle`: the board state (`Puzzle`), blank moves (`Move`) and the
//!   heuristic (misplaced tiles + Manhattan distance + blank penalty).
//! - `parse`: loading a board from the whitespace-separated text format.
//! - `solver`: iterative-deepening DFS, A* and iterative-deepening A*.
//! - `path`: walking parent links back from a solved state.
//! - `error`: errors for malformed input.

pub mod error;
pub mod parse;
pub mod path;
pub mod puzzle;
pub mod solver;

pub use error::{PuzzleError, Result};
pub use path::{solution_moves, solution_path, Ancestors, Solution};
pub use puzzle::{Move, Puzzle};
pub use solver::{
    a_star, a_star_with_stats, ida_star, ida_star_with_stats, iddfs, iddfs_with_stats, Algorithm,
    SearchConfig, SearchStats,
};
