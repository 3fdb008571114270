//! Jump legality and enumeration.
//!
//! A jump is legal when the start holds a peg, the end is empty, the two
//! holes are not neighbors, and they share exactly one neighbor. That
//! shared neighbor is the jumped hole: it must hold a peg and sit on the
//! lattice midpoint between start and end.

use crate::board::{Board, BoardError, Move, Position};

/// Returns the hole a jump from `start` to `end` would pass over, if the
/// two holes are exactly one jump apart. Ignores fill state.
fn jump_line(board: &Board, start: Position, end: Position) -> Result<Option<Position>, BoardError> {
    if start == end || board.is_adjacent(start, end)? {
        return Ok(None);
    }
    let matching = board.shared_neighbors(start, end)?;
    if matching.len() != 1 {
        return Ok(None);
    }
    let over = matching[0];
    if !board.is_collinear(start, over, end)? {
        return Ok(None);
    }
    Ok(Some(over))
}

/// Returns whether the peg at `start` can currently jump into `end`.
///
/// Fails with `InvalidPosition` if either position is off the board.
pub fn is_legal_move(board: &Board, start: Position, end: Position) -> Result<bool, BoardError> {
    if !board.is_filled(start)? || board.is_filled(end)? {
        return Ok(false);
    }
    match jump_line(board, start, end)? {
        Some(over) => board.is_filled(over),
        None => Ok(false),
    }
}

/// Returns the position jumped over by a legal move.
///
/// Fails with `IllegalMove` if the pair is not currently legal.
pub fn jumped_position(board: &Board, start: Position, end: Position) -> Result<Position, BoardError> {
    if !is_legal_move(board, start, end)? {
        return Err(BoardError::IllegalMove { start, end });
    }
    jump_line(board, start, end)?.ok_or(BoardError::IllegalMove { start, end })
}

/// Builds the full move triple for a legal (start, end) pair.
pub fn legal_move(board: &Board, start: Position, end: Position) -> Result<Move, BoardError> {
    let over = jumped_position(board, start, end)?;
    Ok(Move::new(start, over, end))
}

/// Enumerates every legal jump on the board.
///
/// Walks outward from each empty hole: to each filled neighbor, then to
/// each filled neighbor of that neighbor, and keeps the candidates that
/// pass [`is_legal_move`]. Results are ordered by ascending end position,
/// then by neighbor step order, and contain no duplicates.
pub fn legal_moves(board: &Board) -> Vec<Move> {
    let mut moves: Vec<Move> = Vec::new();

    for end in board.empty_positions() {
        for &over in board.adjacency_of(end) {
            if !board.filled_at(over) {
                continue;
            }
            for &start in board.adjacency_of(over) {
                if !board.filled_at(start) {
                    continue;
                }
                // A legal pair has exactly one shared neighbor, so `over`
                // is the jumped hole whenever this passes.
                if is_legal_move(board, start, end) == Ok(true) {
                    let mv = Move::new(start, over, end);
                    if !moves.contains(&mv) {
                        moves.push(mv);
                    }
                }
            }
        }
    }

    moves
}

/// Returns true if at least one jump is available.
pub fn has_legal_move(board: &Board) -> bool {
    !legal_moves(board).is_empty()
}
