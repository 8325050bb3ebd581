//! Turning a solved state back into the sequence of boards that led to it.

use std::fmt;
use std::rc::Rc;

use crate::puzzle::{Move, Puzzle};

/// Walks parent links from a state up to its root, the state itself first.
pub struct Ancestors {
    next: Option<Rc<Puzzle>>,
}

impl Ancestors {
    pub fn new(state: &Rc<Puzzle>) -> Self {
        Self {
            next: Some(Rc::clone(state)),
        }
    }
}

impl Iterator for Ancestors {
    type Item = Rc<Puzzle>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        self.next = current.parent().cloned();
        Some(current)
    }
}

/// States from the root to `end`, root first.
pub fn solution_path(end: &Rc<Puzzle>) -> Vec<Rc<Puzzle>> {
    let mut path: Vec<_> = Ancestors::new(end).collect();
    path.reverse();
    path
}

/// Blank moves between consecutive states of `path`. A pair of states that
/// are not one move apart ends the sequence.
pub fn solution_moves(path: &[Rc<Puzzle>]) -> Vec<Move> {
    path.windows(2)
        .map_while(|pair| move_between(&pair[0], &pair[1]))
        .collect()
}

fn move_between(from: &Puzzle, to: &Puzzle) -> Option<Move> {
    let (from_row, from_col) = from.blank();
    let (to_row, to_col) = to.blank();
    let offset = (
        to_row as isize - from_row as isize,
        to_col as isize - from_col as isize,
    );
    Move::ALL.into_iter().find(|m| m.as_offset() == offset)
}

/// A reconstructed solution.
#[derive(Clone, Debug)]
pub struct Solution {
    /// Every board from the start to the goal.
    pub states: Vec<Rc<Puzzle>>,
    /// Blank moves turning each board into the next one.
    pub moves: Vec<Move>,
}

impl Solution {
    pub fn from_goal(end: &Rc<Puzzle>) -> Self {
        let states = solution_path(end);
        let moves = solution_moves(&states);
        Self { states, moves }
    }

    /// Number of moves, equal to the depth of the final state.
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }
}

/// Prints each board root first, separated by blank lines.
impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for state in &self.states {
            writeln!(f, "{}", state)?;
        }
        write!(f, "It took {} moves to find a solution", self.len())
    }
}
