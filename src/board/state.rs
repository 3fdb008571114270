//! Board state: which holes hold a peg.
//!
//! A `Board` owns its layout and adjacency table together with one fill
//! flag per position. Accessors validate positions and report
//! `InvalidPosition` instead of returning a sentinel, so a caller can tell
//! "valid hole, empty" apart from "no such hole".

use thiserror::Error;

use super::adjacency::Adjacency;
use super::layout::{is_valid_size, position_count, Layout, Position};

/// Errors raised by board accessors and the move engine.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("invalid board size {0}: side length must be between 1 and 1024")]
    InvalidSize(usize),

    #[error("invalid position {position}: board has {count} positions")]
    InvalidPosition { position: Position, count: usize },

    #[error("illegal move {start}>{end}")]
    IllegalMove { start: Position, end: Position },

    #[error("configuration has {found} cells, expected {expected}")]
    ConfigurationLengthMismatch { expected: usize, found: usize },
}

/// Fill flags for every position of a board, in position order.
///
/// This is the value captured in game records; its `T`/`F` text form lives
/// in [`crate::protocol::configuration`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Configuration(Vec<bool>);

impl Configuration {
    pub fn new(cells: Vec<bool>) -> Self {
        Configuration(cells)
    }

    /// The default starting layout: every hole filled except position 0.
    pub fn standard(size: usize) -> Self {
        let count = position_count(size);
        Configuration((0..count).map(|p| p != 0).collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn cells(&self) -> &[bool] {
        &self.0
    }

    pub fn filled_count(&self) -> usize {
        self.0.iter().filter(|&&c| c).count()
    }
}

/// A triangular peg board of a fixed side length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    layout: Layout,
    adjacency: Adjacency,
    filled: Vec<bool>,
}

impl Board {
    /// Creates a board of side length `size` with every hole empty.
    pub fn new(size: usize) -> Result<Self, BoardError> {
        if !is_valid_size(size) {
            return Err(BoardError::InvalidSize(size));
        }
        let layout = Layout::new(size);
        let adjacency = Adjacency::build(&layout);
        let filled = vec![false; layout.len()];
        Ok(Board {
            layout,
            adjacency,
            filled,
        })
    }

    /// Creates a board in the standard starting layout (only position 0 empty).
    pub fn standard(size: usize) -> Result<Self, BoardError> {
        let mut board = Board::new(size)?;
        board.filled.fill(true);
        board.filled[0] = false;
        Ok(board)
    }

    /// Creates a board with the given fill flags.
    pub fn from_configuration(size: usize, config: &Configuration) -> Result<Self, BoardError> {
        let mut board = Board::new(size)?;
        board.load(config)?;
        Ok(board)
    }

    /// Overwrites every fill flag from `config`.
    pub fn load(&mut self, config: &Configuration) -> Result<(), BoardError> {
        if config.len() != self.filled.len() {
            return Err(BoardError::ConfigurationLengthMismatch {
                expected: self.filled.len(),
                found: config.len(),
            });
        }
        self.filled.copy_from_slice(config.cells());
        Ok(())
    }

    /// Side length of the triangle.
    pub fn size(&self) -> usize {
        self.layout.size()
    }

    pub fn position_count(&self) -> usize {
        self.filled.len()
    }

    pub fn is_valid_position(&self, position: Position) -> bool {
        position < self.filled.len()
    }

    fn check(&self, position: Position) -> Result<(), BoardError> {
        if self.is_valid_position(position) {
            Ok(())
        } else {
            Err(BoardError::InvalidPosition {
                position,
                count: self.filled.len(),
            })
        }
    }

    pub fn is_filled(&self, position: Position) -> Result<bool, BoardError> {
        self.check(position)?;
        Ok(self.filled[position])
    }

    pub fn set_filled(&mut self, position: Position, filled: bool) -> Result<(), BoardError> {
        self.check(position)?;
        self.filled[position] = filled;
        Ok(())
    }

    /// Positions one hex step away from `position`, in step order.
    pub fn adjacent_positions(&self, position: Position) -> Result<&[Position], BoardError> {
        self.check(position)?;
        Ok(self.adjacency.of(position))
    }

    pub fn is_adjacent(&self, a: Position, b: Position) -> Result<bool, BoardError> {
        self.check(a)?;
        self.check(b)?;
        Ok(self.adjacency.is_adjacent(a, b))
    }

    /// Positions adjacent to both `a` and `b`.
    pub fn shared_neighbors(&self, a: Position, b: Position) -> Result<Vec<Position>, BoardError> {
        self.check(a)?;
        self.check(b)?;
        Ok(self.adjacency.shared(a, b))
    }

    /// Returns true if `middle` sits exactly halfway between `a` and `b` on
    /// the lattice.
    pub fn is_collinear(&self, a: Position, middle: Position, b: Position) -> Result<bool, BoardError> {
        self.check(a)?;
        self.check(middle)?;
        self.check(b)?;
        let (ca, cm, cb) = (
            self.layout.coord(a),
            self.layout.coord(middle),
            self.layout.coord(b),
        );
        Ok(ca.col + cb.col == 2 * cm.col && ca.row + cb.row == 2 * cm.row && a != b)
    }

    /// Unchecked neighbor lookup for callers iterating valid positions.
    pub(crate) fn adjacency_of(&self, position: Position) -> &[Position] {
        self.adjacency.of(position)
    }

    /// Unchecked fill lookup for callers iterating valid positions.
    pub(crate) fn filled_at(&self, position: Position) -> bool {
        self.filled[position]
    }

    /// Number of holes holding a peg.
    pub fn filled_count(&self) -> usize {
        self.filled.iter().filter(|&&f| f).count()
    }

    /// Iterates over positions holding a peg, in ascending order.
    pub fn filled_positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.filled
            .iter()
            .enumerate()
            .filter_map(|(p, &f)| f.then_some(p))
    }

    /// Iterates over empty positions, in ascending order.
    pub fn empty_positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.filled
            .iter()
            .enumerate()
            .filter_map(|(p, &f)| (!f).then_some(p))
    }

    /// Snapshot of every fill flag.
    pub fn configuration(&self) -> Configuration {
        Configuration(self.filled.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_size_is_rejected() {
        assert_eq!(Board::new(0).unwrap_err(), BoardError::InvalidSize(0));
    }

    #[test]
    fn oversized_board_is_rejected() {
        use crate::board::MAX_SIZE;
        assert!(Board::new(MAX_SIZE).is_ok());
        assert_eq!(
            Board::new(MAX_SIZE + 1).unwrap_err(),
            BoardError::InvalidSize(MAX_SIZE + 1)
        );
        assert_eq!(
            Board::standard(usize::MAX).unwrap_err(),
            BoardError::InvalidSize(usize::MAX)
        );
    }

    #[test]
    fn new_board_is_empty() {
        let board = Board::new(4).unwrap();
        assert_eq!(board.size(), 4);
        assert_eq!(board.position_count(), 10);
        assert_eq!(board.filled_count(), 0);
    }

    #[test]
    fn standard_board_has_apex_empty() {
        let board = Board::standard(5).unwrap();
        assert_eq!(board.position_count(), 15);
        assert_eq!(board.filled_count(), 14);
        assert_eq!(board.is_filled(0), Ok(false));
        assert!((1..15).all(|p| board.is_filled(p) == Ok(true)));
    }

    #[test]
    fn invalid_position_is_an_error_not_false() {
        let mut board = Board::standard(3).unwrap();
        let err = BoardError::InvalidPosition {
            position: 6,
            count: 6,
        };
        assert!(!board.is_valid_position(6));
        assert_eq!(board.is_filled(6), Err(err.clone()));
        assert_eq!(board.set_filled(6, true), Err(err.clone()));
        assert_eq!(board.adjacent_positions(6), Err(err));
        assert_eq!(board.is_filled(0), Ok(false));
    }

    #[test]
    fn set_filled_round_trips() {
        let mut board = Board::new(3).unwrap();
        board.set_filled(4, true).unwrap();
        assert_eq!(board.is_filled(4), Ok(true));
        board.set_filled(4, false).unwrap();
        assert_eq!(board.is_filled(4), Ok(false));
    }

    #[test]
    fn configuration_length_is_checked() {
        let config = Configuration::new(vec![true; 5]);
        assert_eq!(
            Board::from_configuration(3, &config).unwrap_err(),
            BoardError::ConfigurationLengthMismatch {
                expected: 6,
                found: 5
            }
        );
    }

    #[test]
    fn configuration_snapshot_matches_board() {
        let mut board = Board::standard(4).unwrap();
        board.set_filled(7, false).unwrap();
        let config = board.configuration();
        assert_eq!(config.len(), 10);
        assert_eq!(config.filled_count(), 8);
        let copy = Board::from_configuration(4, &config).unwrap();
        assert_eq!(copy, board);
    }

    #[test]
    fn filled_and_empty_positions_partition_the_board() {
        let board = Board::standard(4).unwrap();
        let filled: Vec<_> = board.filled_positions().collect();
        let empty: Vec<_> = board.empty_positions().collect();
        assert_eq!(empty, vec![0]);
        assert_eq!(filled, (1..10).collect::<Vec<_>>());
    }

    #[test]
    fn collinearity_follows_lattice_midpoints() {
        let board = Board::standard(5).unwrap();
        // Left edge: 0, 1, 3.
        assert_eq!(board.is_collinear(0, 1, 3), Ok(true));
        // Bottom row: 10, 11, 12.
        assert_eq!(board.is_collinear(10, 11, 12), Ok(true));
        // 1 is adjacent to both 0 and 4 but not between them.
        assert_eq!(board.is_collinear(0, 1, 4), Ok(false));
        assert!(board.is_collinear(0, 1, 99).is_err());
    }

    #[test]
    fn single_hole_board() {
        let board = Board::standard(1).unwrap();
        assert_eq!(board.position_count(), 1);
        assert_eq!(board.filled_count(), 0);
        assert_eq!(board.adjacent_positions(0).unwrap(), &[] as &[Position]);
    }
}
