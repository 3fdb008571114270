//! Move application and end-of-game detection.
//!
//! Applying a jump empties the start and jumped holes and fills the end
//! hole, so every applied move removes exactly one peg. A game ends when
//! no jump is available; the pegs left on the board are its score.

use crate::board::{Board, BoardError, Move, Position};
use crate::movegen::{has_legal_move, legal_move};

/// Applies the jump from `start` to `end` and returns the full move.
///
/// Fails with `IllegalMove` (leaving the board untouched) if the pair is
/// not currently legal, or `InvalidPosition` if either id is off the board.
pub fn apply_move(board: &mut Board, start: Position, end: Position) -> Result<Move, BoardError> {
    let mv = legal_move(board, start, end)?;
    board.set_filled(mv.start, false)?;
    board.set_filled(mv.over, false)?;
    board.set_filled(mv.end, true)?;
    Ok(mv)
}

/// Returns true once no legal jump remains.
pub fn is_game_over(board: &Board) -> bool {
    !has_legal_move(board)
}

/// Number of pegs left on the board. Lower is better; 1 is a perfect game.
pub fn score(board: &Board) -> usize {
    board.filled_count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::movegen::legal_moves;

    #[test]
    fn apply_updates_three_holes() {
        let mut board = Board::standard(5).unwrap();
        let mv = apply_move(&mut board, 3, 0).unwrap();
        assert_eq!(mv, Move::new(3, 1, 0));
        assert_eq!(board.is_filled(0), Ok(true));
        assert_eq!(board.is_filled(1), Ok(false));
        assert_eq!(board.is_filled(3), Ok(false));
        assert_eq!(board.filled_count(), 13);
    }

    #[test]
    fn illegal_apply_leaves_board_unchanged() {
        let mut board = Board::standard(5).unwrap();
        let before = board.clone();
        assert_eq!(
            apply_move(&mut board, 4, 0),
            Err(BoardError::IllegalMove { start: 4, end: 0 })
        );
        assert_eq!(board, before);
        assert!(matches!(
            apply_move(&mut board, 3, 99),
            Err(BoardError::InvalidPosition { .. })
        ));
        assert_eq!(board, before);
    }

    #[test]
    fn each_move_removes_one_peg() {
        let mut board = Board::standard(6).unwrap();
        let mut pegs = board.filled_count();
        while let Some(mv) = legal_moves(&board).first().copied() {
            apply_move(&mut board, mv.start, mv.end).unwrap();
            assert_eq!(board.filled_count(), pegs - 1);
            pegs -= 1;
        }
        assert!(is_game_over(&board));
    }

    #[test]
    fn score_counts_remaining_pegs() {
        let mut board = Board::standard(5).unwrap();
        while let Some(mv) = legal_moves(&board).last().copied() {
            apply_move(&mut board, mv.start, mv.end).unwrap();
        }
        assert!(is_game_over(&board));
        let direct = (0..board.position_count())
            .filter(|&p| board.is_filled(p).unwrap())
            .count();
        assert_eq!(score(&board), direct);
        assert!(score(&board) >= 1);
    }

    #[test]
    fn fresh_standard_board_is_not_over() {
        assert!(!is_game_over(&Board::standard(5).unwrap()));
        assert!(is_game_over(&Board::standard(2).unwrap()));
    }
}
