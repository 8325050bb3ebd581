use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use crate::error::{PuzzleError, Result};

/// Cell value used for the blank.
pub const BLANK: u32 = 0;

/// Direction the blank travels in a single move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

impl Move {
    /// Expansion order used by every solver. Equal-score ties resolve in this order.
    pub const ALL: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];

    /// `(row, col)` offset of the blank.
    pub fn as_offset(&self) -> (isize, isize) {
        match self {
            Move::Up => (-1, 0),
            Move::Down => (1, 0),
            Move::Left => (0, -1),
            Move::Right => (0, 1),
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            Move::Up => Move::Down,
            Move::Down => Move::Up,
            Move::Left => Move::Right,
            Move::Right => Move::Left,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            Move::Up => "Up",
            Move::Down => "Down",
            Move::Left => "Left",
            Move::Right => "Right",
        };
        write!(f, "{}", s)
    }
}

/// A board configuration reached during search.
///
/// Cells are fixed once the state is built; exploring a move always yields a
/// new state that points back at the one it was generated from. Equality and
/// hashing look at the cells only, so the same board reached along two
/// different paths is the same state for visited-set purposes.
#[derive(Clone)]
pub struct Puzzle {
    size: usize,
    board: Vec<Vec<u32>>,
    blank_row: usize,
    blank_col: usize,
    heuristic: u32,
    depth: u32,
    score: u32,
    parent: Option<Rc<Puzzle>>,
}

impl Puzzle {
    /// Builds the solved board of dimension `size`: tiles `1..size²` in
    /// row-major order with the blank in the bottom-right cell.
    ///
    /// # Panics
    ///
    /// Panics if `size` is zero.
    pub fn new(size: usize) -> Self {
        assert!(size > 0, "board size must be positive");

        let mut board = Vec::new();
        let mut value = 1;

        for i in 0..size {
            let mut row = Vec::new();
            for j in 0..size {
                if i == size - 1 && j == size - 1 {
                    row.push(BLANK);
                } else {
                    row.push(value);
                    value += 1;
                }
            }
            board.push(row);
        }

        Self::unscored(size, board, size - 1, size - 1, None).finalize(0)
    }

    /// Builds a root state from row-major cells, `BLANK` marking the blank.
    pub fn from_cells(size: usize, cells: Vec<u32>) -> Result<Self> {
        let expected = size
            .checked_mul(size)
            .filter(|&n| n > 0)
            .ok_or_else(|| PuzzleError::InvalidSize {
                token: size.to_string(),
            })?;
        if cells.len() != expected {
            return Err(PuzzleError::WrongTileCount {
                expected,
                got: cells.len(),
            });
        }

        match cells.iter().filter(|&&value| value == BLANK).count() {
            0 => return Err(PuzzleError::MissingBlank),
            1 => {}
            _ => return Err(PuzzleError::MultipleBlanks),
        }

        let max = (expected - 1) as u32;
        let mut seen = HashSet::with_capacity(expected);
        for &value in cells.iter().filter(|&&value| value != BLANK) {
            if value > max {
                return Err(PuzzleError::TileOutOfRange { value, max });
            }
            if !seen.insert(value) {
                return Err(PuzzleError::DuplicateTile { value });
            }
        }

        let blank = cells
            .iter()
            .position(|&value| value == BLANK)
            .ok_or(PuzzleError::MissingBlank)?;
        let board = cells.chunks(size).map(|row| row.to_vec()).collect();

        Ok(Self::unscored(size, board, blank / size, blank % size, None).finalize(0))
    }

    /// Random walk of `moves` blank moves away from the solved board. The walk
    /// never undoes its previous move, and every result is solvable.
    pub fn scrambled<R: Rng + ?Sized>(size: usize, moves: usize, rng: &mut R) -> Self {
        let mut puzzle = Self::new(size);
        let mut last: Option<Move> = None;

        for _ in 0..moves {
            let options: Vec<Move> = Move::ALL
                .iter()
                .copied()
                .filter(|&dir| Some(dir.opposite()) != last && puzzle.neighbor(dir).is_some())
                .collect();
            let Some(&dir) = options.choose(rng) else {
                break;
            };
            puzzle.apply_move(dir);
            last = Some(dir);
        }

        puzzle.finalize(0)
    }

    fn unscored(
        size: usize,
        board: Vec<Vec<u32>>,
        blank_row: usize,
        blank_col: usize,
        parent: Option<Rc<Puzzle>>,
    ) -> Self {
        Self {
            size,
            board,
            blank_row,
            blank_col,
            heuristic: 0,
            depth: 0,
            score: 0,
            parent,
        }
    }

    fn finalize(mut self, depth: u32) -> Self {
        self.heuristic = self.misplaced_tiles() + self.manhattan_distance() + self.blank_penalty();
        self.depth = depth;
        self.score = self.heuristic + self.depth;
        self
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of moves from the search root.
    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn heuristic(&self) -> u32 {
        self.heuristic
    }

    /// `heuristic + depth`.
    pub fn score(&self) -> u32 {
        self.score
    }

    /// The state this one was generated from; `None` for a root.
    pub fn parent(&self) -> Option<&Rc<Puzzle>> {
        self.parent.as_ref()
    }

    /// `(row, col)` of the blank.
    pub fn blank(&self) -> (usize, usize) {
        (self.blank_row, self.blank_col)
    }

    /// Tile at `(row, col)`, `None` for the blank or an out-of-bounds cell.
    pub fn tile(&self, row: usize, col: usize) -> Option<u32> {
        self.board
            .get(row)
            .and_then(|r| r.get(col))
            .copied()
            .filter(|&value| value != BLANK)
    }

    pub fn rows(&self) -> &[Vec<u32>] {
        &self.board
    }

    pub fn is_solved(&self) -> bool {
        self.heuristic == 0
    }

    /// Children in `Move::ALL` order, one per in-bounds blank move. Each child
    /// keeps a handle on `self` as its parent.
    pub fn available_moves(self: &Rc<Self>) -> Vec<Rc<Puzzle>> {
        Move::ALL
            .iter()
            .filter_map(|&dir| self.try_move(dir))
            .map(Rc::new)
            .collect()
    }

    /// The child reached by moving the blank in `dir`, if that stays on the board.
    pub fn try_move(self: &Rc<Self>, dir: Move) -> Option<Puzzle> {
        let mut child = Self::unscored(
            self.size,
            self.board.clone(),
            self.blank_row,
            self.blank_col,
            Some(Rc::clone(self)),
        );
        if child.apply_move(dir) {
            Some(child.finalize(self.depth + 1))
        } else {
            None
        }
    }

    fn neighbor(&self, dir: Move) -> Option<(usize, usize)> {
        let (dr, dc) = dir.as_offset();
        let row = self.blank_row.checked_add_signed(dr)?;
        let col = self.blank_col.checked_add_signed(dc)?;
        (row < self.size && col < self.size).then_some((row, col))
    }

    // Only called before `finalize`.
    fn apply_move(&mut self, dir: Move) -> bool {
        match self.neighbor(dir) {
            Some((row, col)) => {
                self.board[self.blank_row][self.blank_col] = self.board[row][col];
                self.board[row][col] = BLANK;
                self.blank_row = row;
                self.blank_col = col;
                true
            }
            None => false,
        }
    }

    /// Non-blank cells whose tile differs from the row-major expected value.
    pub fn misplaced_tiles(&self) -> u32 {
        let mut count = 0;
        let mut expected = 1;

        for row in &self.board {
            for &value in row {
                if value != BLANK && value != expected {
                    count += 1;
                }
                expected += 1;
            }
        }
        count
    }

    pub fn manhattan_distance(&self) -> u32 {
        let mut distance = 0;
        for i in 0..self.size {
            for j in 0..self.size {
                let value = self.board[i][j];
                if value != BLANK {
                    let target_row = (value as usize - 1) / self.size;
                    let target_col = (value as usize - 1) % self.size;
                    distance += i.abs_diff(target_row) as u32;
                    distance += j.abs_diff(target_col) as u32;
                }
            }
        }
        distance
    }

    /// 0 when the blank sits in the bottom-right cell, 1 otherwise.
    pub fn blank_penalty(&self) -> u32 {
        u32::from(self.board[self.size - 1][self.size - 1] != BLANK)
    }
}

impl PartialEq for Puzzle {
    fn eq(&self, other: &Self) -> bool {
        self.board == other.board
    }
}

impl Eq for Puzzle {}

impl Hash for Puzzle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.board.hash(state);
    }
}

impl fmt::Debug for Puzzle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Puzzle")
            .field("board", &self.board)
            .field("depth", &self.depth)
            .field("heuristic", &self.heuristic)
            .field("score", &self.score)
            .field("has_parent", &self.parent.is_some())
            .finish()
    }
}

/// Renders the board in the input layout: tab-separated cells, `X` for the blank.
impl fmt::Display for Puzzle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.board {
            for (j, &val) in row.iter().enumerate() {
                if j > 0 {
                    write!(f, "\t")?;
                }
                if val == BLANK {
                    write!(f, "X")?;
                } else {
                    write!(f, "{}", val)?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
