//! Loader for the textual board format.
//!
//! The first token is the board dimension `N`, followed by `N²` cells in
//! row-major order. Tokens may be separated by any whitespace, tabs and
//! newlines included. The blank is written as `X`.

use std::str::FromStr;

use crate::error::{PuzzleError, Result};
use crate::puzzle::{Puzzle, BLANK};

pub const BLANK_TOKEN: &str = "X";

impl Puzzle {
    /// Builds a root state from a token stream whose first token is the size.
    pub fn from_tokens<'a, I>(tokens: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut tokens = tokens.into_iter();
        let size = parse_size(tokens.next().ok_or(PuzzleError::EmptyInput)?)?;
        let max = size.saturating_mul(size).saturating_sub(1);

        let cells = tokens
            .enumerate()
            .map(|(position, token)| parse_cell(token, position, max))
            .collect::<Result<Vec<u32>>>()?;

        Puzzle::from_cells(size, cells)
    }
}

impl FromStr for Puzzle {
    type Err = PuzzleError;

    fn from_str(s: &str) -> Result<Self> {
        Puzzle::from_tokens(s.split_whitespace())
    }
}

fn parse_size(token: &str) -> Result<usize> {
    match token.parse::<usize>() {
        Ok(size) if size > 0 => Ok(size),
        _ => Err(PuzzleError::InvalidSize {
            token: token.to_string(),
        }),
    }
}

fn parse_cell(token: &str, position: usize, max: usize) -> Result<u32> {
    if token.eq_ignore_ascii_case(BLANK_TOKEN) {
        return Ok(BLANK);
    }
    match token.parse::<u32>() {
        Ok(BLANK) => Err(PuzzleError::TileOutOfRange {
            value: BLANK,
            max: u32::try_from(max).unwrap_or(u32::MAX),
        }),
        Ok(value) => Ok(value),
        Err(_) => Err(PuzzleError::InvalidToken {
            token: token.to_string(),
            position,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tab_separated_file() {
        let input = "3\n1\t2\t3\n4\t5\t6\n7\tX\t8\n";
        let puzzle: Puzzle = input.parse().unwrap();

        assert_eq!(puzzle.size(), 3);
        assert_eq!(puzzle.blank(), (2, 1));
        assert_eq!(puzzle.depth(), 0);
        assert_eq!(puzzle.heuristic(), 3);
        assert_eq!(puzzle.score(), 3);
        assert_eq!(puzzle.rows()[2], vec![7, BLANK, 8]);
    }

    #[test]
    fn test_parse_mixed_whitespace_and_lowercase_blank() {
        let a: Puzzle = "2 1 2\n3   x".parse().unwrap();
        let b = Puzzle::from_tokens(["2", "1", "2", "3", "X"]).unwrap();
        assert_eq!(a, b);
        assert!(a.is_solved());
    }

    #[test]
    fn test_display_round_trip() {
        let puzzle: Puzzle = "3 8 1 3 4 X 2 7 6 5".parse().unwrap();
        let rendered = format!("{}\n{}", puzzle.size(), puzzle);
        let again: Puzzle = rendered.parse().unwrap();
        assert_eq!(again, puzzle);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<Puzzle>().unwrap_err(), PuzzleError::EmptyInput);
        assert_eq!(
            "three 1 2 3".parse::<Puzzle>().unwrap_err(),
            PuzzleError::InvalidSize {
                token: "three".to_string()
            }
        );
        assert_eq!(
            "0".parse::<Puzzle>().unwrap_err(),
            PuzzleError::InvalidSize {
                token: "0".to_string()
            }
        );
        assert_eq!(
            "-2 1 2 3 X".parse::<Puzzle>().unwrap_err(),
            PuzzleError::InvalidSize {
                token: "-2".to_string()
            }
        );
        assert_eq!(
            "2 1 2 X".parse::<Puzzle>().unwrap_err(),
            PuzzleError::WrongTileCount { expected: 4, got: 3 }
        );
        assert_eq!(
            "2 1 2 3 X 4".parse::<Puzzle>().unwrap_err(),
            PuzzleError::WrongTileCount { expected: 4, got: 5 }
        );
        assert_eq!(
            "2 1 Y 3 X".parse::<Puzzle>().unwrap_err(),
            PuzzleError::InvalidToken {
                token: "Y".to_string(),
                position: 1
            }
        );
        assert_eq!(
            "2 1 0 3 X".parse::<Puzzle>().unwrap_err(),
            PuzzleError::TileOutOfRange { value: 0, max: 3 }
        );
        assert_eq!("2 1 X 3 X".parse::<Puzzle>().unwrap_err(), PuzzleError::MultipleBlanks);
        assert_eq!("2 1 2 3 3".parse::<Puzzle>().unwrap_err(), PuzzleError::MissingBlank);
    }
}
