//! The jump move type.

use std::fmt;

use super::layout::Position;

/// A single jump: the peg at `start` leaps over `over` into `end`.
///
/// A `Move` is only meaningful relative to the board it was generated
/// from; legality is checked by the move generator, not by this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Move {
    pub start: Position,
    pub over: Position,
    pub end: Position,
}

impl Move {
    pub const fn new(start: Position, over: Position, end: Position) -> Self {
        Move { start, over, end }
    }

    /// Returns the (start, end) pair used in move notation.
    pub const fn endpoints(&self) -> (Position, Position) {
        (self.start, self.end)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}>{}", self.start, self.end)
    }
}
